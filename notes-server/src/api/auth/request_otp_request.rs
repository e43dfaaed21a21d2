use serde::Deserialize;

#[derive(Debug, Deserialize)]
pub struct RequestOtpRequest {
    /// Address the code is mailed to (required)
    pub email: String,

    /// Display name for the account (required)
    pub name: String,
}
