use crate::{HttpMailer, MailError, Mailer};

use wiremock::matchers::{body_partial_json, header, method, path};
use wiremock::{Mock, MockServer, ResponseTemplate};

#[tokio::test]
async fn given_accepting_api_when_sending_then_ok() {
    let server = MockServer::start().await;
    Mock::given(method("POST"))
        .and(path("/emails"))
        .and(header("authorization", "Bearer test-key"))
        .and(body_partial_json(serde_json::json!({
            "to": ["ann@example.com"],
            "from": "Notes <no-reply@notes.local>",
        })))
        .respond_with(ResponseTemplate::new(200))
        .expect(1)
        .mount(&server)
        .await;

    let mailer = HttpMailer::new(
        &format!("{}/emails", server.uri()),
        "test-key",
        "Notes <no-reply@notes.local>",
        10,
    );

    let result = mailer.send_otp_email("ann@example.com", "123456").await;

    assert!(result.is_ok());
}

#[tokio::test]
async fn given_code_when_sending_then_body_contains_code_and_window() {
    let server = MockServer::start().await;
    Mock::given(method("POST"))
        .and(body_partial_json(serde_json::json!({
            "text": "Your verification code is 654321. It expires in 5 minutes.",
        })))
        .respond_with(ResponseTemplate::new(200))
        .expect(1)
        .mount(&server)
        .await;

    let mailer = HttpMailer::new(&server.uri(), "k", "Notes <no-reply@notes.local>", 5);

    let result = mailer.send_otp_email("ann@example.com", "654321").await;

    assert!(result.is_ok());
}

#[tokio::test]
async fn given_failing_api_when_sending_then_delivery_error() {
    let server = MockServer::start().await;
    Mock::given(method("POST"))
        .respond_with(ResponseTemplate::new(500))
        .mount(&server)
        .await;

    let mailer = HttpMailer::new(&server.uri(), "k", "Notes <no-reply@notes.local>", 10);

    let result = mailer.send_otp_email("ann@example.com", "123456").await;

    assert!(matches!(result, Err(MailError::Delivery { .. })));
}
