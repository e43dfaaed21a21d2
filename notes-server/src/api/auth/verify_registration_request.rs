use serde::Deserialize;

#[derive(Debug, Deserialize)]
pub struct VerifyRegistrationRequest {
    pub email: String,

    /// Final display name, applied on success
    pub name: String,

    /// The delivered one-time code
    pub otp: String,
}
