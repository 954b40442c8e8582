//! List limit normalization.

/// Limit applied when the caller gives none, or a non-positive one.
pub const DEFAULT_LIMIT: i64 = 10;

/// Upper bound on any list request.
pub const MAX_LIMIT: i64 = 100;

/// Normalizes a requested list limit.
///
/// - `None` or `<= 0` becomes [`DEFAULT_LIMIT`]
/// - anything above [`MAX_LIMIT`] becomes [`MAX_LIMIT`]
pub fn clamp_limit(limit: Option<i64>) -> i64 {
    match limit {
        Some(l) if l > MAX_LIMIT => MAX_LIMIT,
        Some(l) if l > 0 => l,
        _ => DEFAULT_LIMIT,
    }
}
