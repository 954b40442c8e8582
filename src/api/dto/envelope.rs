//! Success envelope shared by all JSON endpoints.

use serde::Serialize;

/// `{"message": "ok", "data": ...}`
#[derive(Debug, Serialize)]
pub struct Envelope<T> {
    pub message: &'static str,
    pub data: T,
}

impl<T> Envelope<T> {
    pub fn ok(data: T) -> Self {
        Self {
            message: "ok",
            data,
        }
    }
}
