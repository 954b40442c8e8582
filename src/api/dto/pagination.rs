//! List query parameters.

use serde::Deserialize;
use serde_with::{DefaultOnError, DisplayFromStr, serde_as};

/// `?limit=N` for list endpoints.
///
/// Uses `serde_with` to parse the limit from the query string. Any integer is
/// accepted here; the service layer clamps it. A value that is not an integer
/// is treated as absent.
#[serde_as]
#[derive(Debug, Default, Deserialize)]
pub struct LimitParams {
    #[serde_as(as = "DefaultOnError<Option<DisplayFromStr>>")]
    #[serde(default)]
    pub limit: Option<i64>,
}
