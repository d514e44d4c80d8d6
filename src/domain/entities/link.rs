//! Short link entity and its analytics projection.

use chrono::{DateTime, Utc};

/// A shortened URL with its expiry window and click counter.
///
/// `short_code`, `original_url`, `created_at` and `expires_at` never change
/// after creation. `clicks` only grows, and `is_active` only goes from `true`
/// to `false`.
#[derive(Debug, Clone, PartialEq)]
pub struct ShortLink {
    pub short_code: String,
    pub original_url: String,
    pub clicks: i64,
    pub created_at: DateTime<Utc>,
    pub expires_at: DateTime<Utc>,
    pub is_active: bool,
    pub updated_at: DateTime<Utc>,
}

impl ShortLink {
    /// Creates a freshly shortened link: zero clicks, active.
    pub fn new(
        short_code: String,
        original_url: String,
        created_at: DateTime<Utc>,
        expires_at: DateTime<Utc>,
    ) -> Self {
        Self {
            short_code,
            original_url,
            clicks: 0,
            created_at,
            expires_at,
            is_active: true,
            updated_at: created_at,
        }
    }

    /// Returns true once `now` has reached `expires_at`.
    pub fn is_expired_at(&self, now: DateTime<Utc>) -> bool {
        now >= self.expires_at
    }

    /// Returns true if the link may be redirected at `now`.
    pub fn is_usable_at(&self, now: DateTime<Utc>) -> bool {
        self.is_active && !self.is_expired_at(now)
    }

    /// Returns true if the link may be redirected right now.
    pub fn is_usable(&self) -> bool {
        self.is_usable_at(Utc::now())
    }

    /// Read-only view reported by the analytics endpoint.
    ///
    /// `is_active` is the effective status at `now`, so a link past its expiry
    /// reads as inactive even though the stored flag is still set.
    pub fn analytics_at(&self, now: DateTime<Utc>) -> LinkAnalytics {
        LinkAnalytics {
            short_code: self.short_code.clone(),
            original_url: self.original_url.clone(),
            clicks: self.clicks,
            created_at: self.created_at,
            expires_at: self.expires_at,
            is_active: self.is_usable_at(now),
        }
    }
}

/// Input data for persisting a new link.
#[derive(Debug, Clone, PartialEq)]
pub struct NewShortLink {
    pub short_code: String,
    pub original_url: String,
    pub created_at: DateTime<Utc>,
    pub expires_at: DateTime<Utc>,
}

impl From<NewShortLink> for ShortLink {
    fn from(new_link: NewShortLink) -> Self {
        ShortLink::new(
            new_link.short_code,
            new_link.original_url,
            new_link.created_at,
            new_link.expires_at,
        )
    }
}

/// Click analytics for a single link.
#[derive(Debug, Clone, PartialEq)]
pub struct LinkAnalytics {
    pub short_code: String,
    pub original_url: String,
    pub clicks: i64,
    pub created_at: DateTime<Utc>,
    pub expires_at: DateTime<Utc>,
    pub is_active: bool,
}

/// Store-wide totals used by the admin CLI.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub struct LinkSummary {
    pub total: i64,
    pub usable: i64,
    pub clicks: i64,
}
