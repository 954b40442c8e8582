//! Short alias generation and validation utilities.

use crate::error::AppError;
use rand::Rng;
use rand::distr::Alphanumeric;
use regex::Regex;
use serde_json::json;
use std::sync::LazyLock;

/// Shortest alias the generator will produce.
pub const MIN_ALIAS_LENGTH: usize = 3;

/// Longest alias the generator will produce.
pub const MAX_ALIAS_LENGTH: usize = 10;

/// Length used when neither the request nor the configuration supplies one.
pub const DEFAULT_ALIAS_LENGTH: usize = 8;

/// Aliases that would shadow top-level routes.
const RESERVED_ALIASES: &[&str] = &["links", "tags", "health"];

/// Characters accepted in a user-supplied alias.
pub static ALIAS_PATTERN: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"^[A-Za-z0-9_-]+$").expect("alias pattern is valid"));

/// Generates a random alphanumeric alias of exactly `length` characters.
///
/// `length` is clamped into `MIN_ALIAS_LENGTH..=MAX_ALIAS_LENGTH`.
///
/// # Examples
///
/// ```ignore
/// let alias = generate_alias(8);
/// assert_eq!(alias.len(), 8);
/// assert!(alias.chars().all(|c| c.is_ascii_alphanumeric()));
/// ```
pub fn generate_alias(length: usize) -> String {
    let length = length.clamp(MIN_ALIAS_LENGTH, MAX_ALIAS_LENGTH);

    rand::rng()
        .sample_iter(&Alphanumeric)
        .take(length)
        .map(char::from)
        .collect()
}

/// Picks the generated alias length: the requested one when it is in range,
/// otherwise the configured default.
pub fn resolve_alias_length(requested: Option<usize>, default_length: usize) -> usize {
    match requested {
        Some(len) if (MIN_ALIAS_LENGTH..=MAX_ALIAS_LENGTH).contains(&len) => len,
        _ => default_length.clamp(MIN_ALIAS_LENGTH, MAX_ALIAS_LENGTH),
    }
}

/// Validates a user-provided alias.
///
/// # Rules
///
/// - Length: 1-64 characters
/// - Allowed characters: ASCII letters, digits, `_` and `-`
/// - Cannot be a reserved route name
///
/// # Errors
///
/// Returns [`AppError::Validation`] if any rule is violated.
pub fn validate_alias(alias: &str) -> Result<(), AppError> {
    if alias.is_empty() || alias.len() > 64 {
        return Err(AppError::bad_request(
            "Alias must be 1-64 characters",
            json!({ "alias": ["length"] }),
        ));
    }

    if !ALIAS_PATTERN.is_match(alias) {
        return Err(AppError::bad_request(
            "Alias can only contain letters, digits, '_' and '-'",
            json!({ "alias": alias }),
        ));
    }

    if RESERVED_ALIASES.contains(&alias) {
        return Err(AppError::bad_request(
            "This alias is reserved",
            json!({ "alias": alias }),
        ));
    }

    Ok(())
}
