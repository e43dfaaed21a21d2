#[allow(clippy::module_inception)]
pub mod auth;
pub mod auth_response;
pub mod google_login_request;
pub mod login_otp_request;
pub mod login_request;
pub mod message_response;
pub mod request_otp_request;
pub mod user_dto;
pub mod verify_registration_request;
