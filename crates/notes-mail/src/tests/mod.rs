mod http_mailer;
