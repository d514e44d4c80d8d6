//! DTOs for manual expiry endpoint.

use serde::Serialize;

/// Confirmation returned after a link was expired.
#[derive(Debug, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct ExpireResponse {
    pub message: &'static str,
    pub short_code: String,
}

impl ExpireResponse {
    pub fn new(short_code: String) -> Self {
        Self {
            message: "URL expired manually",
            short_code,
        }
    }
}
