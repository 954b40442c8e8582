//! Target URL validation.
//!
//! Targets are stored exactly as submitted; this module only checks that they
//! are absolute HTTP(S) URLs with a host.

use url::Url;
use validator::ValidationError;

/// Errors that can occur during target URL validation.
#[derive(Debug, thiserror::Error)]
pub enum UrlValidationError {
    #[error("Invalid URL format: {0}")]
    InvalidFormat(String),

    #[error("Only HTTP and HTTPS protocols are allowed")]
    UnsupportedProtocol,

    #[error("URL must contain a host")]
    MissingHost,

    #[error("URL must not contain control characters or surrounding whitespace")]
    UnsafeCharacters,
}

/// Checks that `input` is an absolute `http`/`https` URL with a host.
///
/// Rejects potentially dangerous schemes like `javascript:`, `data:` and `file:`.
///
/// # Errors
///
/// Returns [`UrlValidationError::InvalidFormat`] for malformed URLs.
/// Returns [`UrlValidationError::UnsupportedProtocol`] for non-HTTP(S) schemes.
/// Returns [`UrlValidationError::MissingHost`] when the host is empty.
/// Returns [`UrlValidationError::UnsafeCharacters`] for ASCII control
/// characters anywhere or whitespace at either end; the stored target must be
/// usable verbatim as a `Location` header.
pub fn validate_target_url(input: &str) -> Result<(), UrlValidationError> {
    if input.chars().any(|c| c.is_ascii_control()) || input.trim() != input {
        return Err(UrlValidationError::UnsafeCharacters);
    }

    let url = Url::parse(input).map_err(|e| UrlValidationError::InvalidFormat(e.to_string()))?;

    match url.scheme() {
        "http" | "https" => {}
        _ => return Err(UrlValidationError::UnsupportedProtocol),
    }

    match url.host_str() {
        Some(host) if !host.is_empty() => Ok(()),
        _ => Err(UrlValidationError::MissingHost),
    }
}

/// `validator` adapter for [`validate_target_url`].
pub fn validate_target(input: &str) -> Result<(), ValidationError> {
    validate_target_url(input).map_err(|e| {
        let mut err = ValidationError::new("url");
        err.message = Some(e.to_string().into());
        err
    })
}
