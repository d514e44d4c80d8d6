//! DTOs for link analytics endpoint.

use chrono::{DateTime, Utc};
use serde::Serialize;

use crate::domain::entities::LinkAnalytics;

/// Click analytics for a single short link.
///
/// `isActive` is the effective status: `false` once the link was manually
/// expired or its expiry time has passed.
#[derive(Debug, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct AnalyticsResponse {
    pub original_url: String,
    pub short_code: String,
    pub clicks: i64,
    pub created_at: DateTime<Utc>,
    pub expires_at: DateTime<Utc>,
    pub is_active: bool,
}

impl From<LinkAnalytics> for AnalyticsResponse {
    fn from(analytics: LinkAnalytics) -> Self {
        Self {
            original_url: analytics.original_url,
            short_code: analytics.short_code,
            clicks: analytics.clicks,
            created_at: analytics.created_at,
            expires_at: analytics.expires_at,
            is_active: analytics.is_active,
        }
    }
}
