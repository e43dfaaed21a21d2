use serde::Deserialize;

#[derive(Debug, Deserialize)]
pub struct LoginOtpRequest {
    pub email: String,
}
