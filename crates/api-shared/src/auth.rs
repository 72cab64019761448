//! API token checking.
//!
//! Clients authenticate with `Authorization: Token <token>`; `Bearer <token>` is
//! accepted as well. Token issuance happens elsewhere; this module only compares the
//! presented token with the one configured at startup.

use subtle::ConstantTimeEq;

/// Reasons a request fails authentication.
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum AuthError {
    #[error("missing Authorization header")]
    MissingCredentials,
    #[error("malformed Authorization header")]
    MalformedCredentials,
    #[error("invalid API token")]
    InvalidToken,
}

/// Extracts the token from an `Authorization` header value.
pub fn token_from_header(header: Option<&str>) -> Result<&str, AuthError> {
    let header = header.ok_or(AuthError::MissingCredentials)?;
    header
        .strip_prefix("Token ")
        .or_else(|| header.strip_prefix("Bearer "))
        .map(str::trim)
        .filter(|t| !t.is_empty())
        .ok_or(AuthError::MalformedCredentials)
}

/// Validates the provided token against the expected token.
///
/// Returns `Ok(())` if the tokens match.
pub fn validate_api_token(provided: &str, expected: &str) -> Result<(), AuthError> {
    if bool::from(provided.as_bytes().ct_eq(expected.as_bytes())) {
        Ok(())
    } else {
        Err(AuthError::InvalidToken)
    }
}
