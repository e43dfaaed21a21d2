//! Input validation helpers shared by the auth flows and the API layer.

/// Basic address-shape check: `<non-space>@<non-space>.<non-space>`.
///
/// This is deliberately loose; the OTP round-trip is what actually proves
/// the address is deliverable.
pub fn is_valid_email(email: &str) -> bool {
    if email.chars().any(char::is_whitespace) {
        return false;
    }

    let Some((local, domain)) = email.split_once('@') else {
        return false;
    };

    if local.is_empty() || domain.contains('@') {
        return false;
    }

    match domain.rsplit_once('.') {
        Some((host, tld)) => !host.is_empty() && !tld.is_empty(),
        None => false,
    }
}

/// Canonical form used for lookup and storage: trimmed, lower-cased.
pub fn normalize_email(email: &str) -> String {
    email.trim().to_lowercase()
}
