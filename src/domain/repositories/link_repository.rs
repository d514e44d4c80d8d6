//! Repository trait for short link storage.

use crate::domain::entities::{LinkSummary, NewShortLink, ShortLink};
use crate::error::AppError;
use async_trait::async_trait;
use chrono::{DateTime, Utc};

/// Persistent store for short links, keyed by short code.
///
/// Implementations own all synchronization: code uniqueness is enforced by
/// the store, and every mutation is a single atomic per-record update.
///
/// # Implementations
///
/// - [`crate::infrastructure::persistence::PgLinkRepository`] - PostgreSQL implementation
/// - [`crate::infrastructure::persistence::InMemoryLinkRepository`] - In-process implementation
/// - Test mocks available with `cfg(test)`
#[cfg_attr(test, mockall::automock)]
#[async_trait]
pub trait LinkRepository: Send + Sync {
    /// Inserts a new link with zero clicks, marked active.
    ///
    /// # Errors
    ///
    /// Returns [`AppError::Conflict`] if the short code is already taken.
    /// Returns [`AppError::Storage`] on store failures.
    async fn create(&self, new_link: NewShortLink) -> Result<ShortLink, AppError>;

    /// Finds a link by its short code.
    ///
    /// # Errors
    ///
    /// Returns [`AppError::Storage`] on store failures.
    async fn find_by_code(&self, code: &str) -> Result<Option<ShortLink>, AppError>;

    /// Atomically increments `clicks` if the link is usable at `now`.
    ///
    /// # Returns
    ///
    /// - `Ok(Some(original_url))` if the link was usable and the click counted
    /// - `Ok(None)` if the link is missing, inactive, or expired
    ///
    /// # Errors
    ///
    /// Returns [`AppError::Storage`] on store failures.
    async fn record_click(&self, code: &str, now: DateTime<Utc>)
    -> Result<Option<String>, AppError>;

    /// Sets `is_active = false`.
    ///
    /// Returns `Ok(true)` if the link exists (whether or not it was already
    /// inactive), `Ok(false)` if it does not.
    ///
    /// # Errors
    ///
    /// Returns [`AppError::Storage`] on store failures.
    async fn deactivate(&self, code: &str) -> Result<bool, AppError>;

    /// Totals across all links, with `usable` evaluated at `now`.
    ///
    /// # Errors
    ///
    /// Returns [`AppError::Storage`] on store failures.
    async fn summary(&self, now: DateTime<Utc>) -> Result<LinkSummary, AppError>;

    /// Verifies the store is reachable.
    ///
    /// # Errors
    ///
    /// Returns [`AppError::Storage`] if the store cannot be reached.
    async fn ping(&self) -> Result<(), AppError>;
}
