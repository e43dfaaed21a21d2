use serde::Deserialize;

/// Payload extracted from an already-validated Google assertion.
/// Decoding and signature checking happen upstream; this handler trusts
/// its caller.
#[derive(Debug, Deserialize)]
pub struct GoogleLoginRequest {
    pub google_id: String,
    pub email: String,
    #[serde(default)]
    pub name: String,
}
