//! DTOs for link shortening endpoint.

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use serde_with::{DisplayFromStr, PickFirst, serde_as};
use validator::Validate;

use crate::domain::entities::ShortLink;

/// Request to shorten a URL.
///
/// `expiresInMinutes` may be a JSON number or a numeric string, and may be
/// fractional. When absent or `null` the server default applies.
#[serde_as]
#[derive(Debug, Deserialize, Validate)]
#[serde(rename_all = "camelCase")]
pub struct ShortenRequest {
    #[serde(default)]
    #[validate(
        required(message = "Original URL is required"),
        length(min = 1, message = "Original URL is required")
    )]
    pub original_url: Option<String>,

    #[serde(default)]
    #[serde_as(as = "Option<PickFirst<(_, DisplayFromStr)>>")]
    pub expires_in_minutes: Option<f64>,
}

/// Created short link.
#[derive(Debug, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct ShortenResponse {
    pub short_url: String,
    pub short_code: String,
    pub expires_at: DateTime<Utc>,
}

impl ShortenResponse {
    pub fn new(link: ShortLink, short_url: String) -> Self {
        Self {
            short_url,
            short_code: link.short_code,
            expires_at: link.expires_at,
        }
    }
}
