//! Short link lifecycle: creation, redirect resolution, analytics, manual expiry.

use std::sync::Arc;

use chrono::{TimeDelta, Utc};
use serde_json::json;
use tracing::{debug, info};

use crate::domain::entities::{LinkAnalytics, NewShortLink, ShortLink};
use crate::domain::repositories::LinkRepository;
use crate::error::AppError;
use crate::utils::code_generator::{CodeGenerator, is_reserved_code};

/// TTL applied when a create request supplies none, or a non-positive one.
pub const DEFAULT_TTL_MINUTES: u32 = 30;

/// Attempts at finding a free short code before giving up.
const MAX_CODE_ATTEMPTS: usize = 10;

/// Service owning the lifecycle of short links.
///
/// Holds no mutable state of its own: the store handle is injected at
/// construction and all synchronization (code uniqueness, atomic click
/// increments) is delegated to it. Expiry is evaluated lazily against the
/// current time on every read.
pub struct LinkService<L: LinkRepository + ?Sized> {
    repository: Arc<L>,
    generator: Arc<dyn CodeGenerator>,
    base_url: String,
    default_ttl: TimeDelta,
}

impl<L: LinkRepository + ?Sized> LinkService<L> {
    /// Creates a new link service.
    ///
    /// `base_url` is the public address short codes are appended to; a
    /// trailing slash is ignored.
    pub fn new(
        repository: Arc<L>,
        generator: Arc<dyn CodeGenerator>,
        base_url: impl Into<String>,
        default_ttl: TimeDelta,
    ) -> Self {
        let base_url = base_url.into().trim_end_matches('/').to_string();

        Self {
            repository,
            generator,
            base_url,
            default_ttl,
        }
    }

    /// Creates a short link for `original_url` expiring after `ttl_minutes`.
    ///
    /// # TTL
    ///
    /// Fractional minutes are allowed. A missing, zero, negative, or
    /// non-finite TTL falls back to the configured default.
    ///
    /// # Code Generation
    ///
    /// The store rejects duplicate codes; on rejection a fresh code is drawn
    /// and the insert retried, up to 10 attempts.
    ///
    /// # Errors
    ///
    /// Returns [`AppError::Validation`] if:
    /// - `original_url` is empty or whitespace
    /// - the TTL pushes the expiry past the representable time range
    ///
    /// Returns [`AppError::Internal`] if no free code was found.
    /// Returns [`AppError::Storage`] on store failures.
    pub async fn create_short_link(
        &self,
        original_url: &str,
        ttl_minutes: Option<f64>,
    ) -> Result<ShortLink, AppError> {
        let original_url = original_url.trim();
        if original_url.is_empty() {
            return Err(AppError::bad_request(
                "Original URL is required",
                json!({ "field": "originalUrl" }),
            ));
        }

        let ttl = self.resolve_ttl(ttl_minutes)?;
        let created_at = Utc::now();
        let expires_at = created_at.checked_add_signed(ttl).ok_or_else(|| {
            AppError::bad_request(
                "Expiry is out of range",
                json!({ "expiresInMinutes": ttl_minutes }),
            )
        })?;

        for attempt in 1..=MAX_CODE_ATTEMPTS {
            let short_code = self.generator.generate()?;

            if is_reserved_code(&short_code) {
                debug!("Generated reserved code {}, regenerating", short_code);
                continue;
            }

            let new_link = NewShortLink {
                short_code,
                original_url: original_url.to_string(),
                created_at,
                expires_at,
            };

            match self.repository.create(new_link).await {
                Ok(link) => {
                    info!(
                        short_code = %link.short_code,
                        expires_at = %link.expires_at,
                        "Short link created"
                    );
                    return Ok(link);
                }
                Err(AppError::Conflict { .. }) => {
                    debug!("Short code collision on attempt {}", attempt);
                }
                Err(e) => return Err(e),
            }
        }

        Err(AppError::internal(
            "Failed to generate unique code",
            json!({ "reason": "Too many collisions" }),
        ))
    }

    /// Resolves a short code to its destination and counts the click.
    ///
    /// The click is recorded by the store as a single atomic update that only
    /// applies while the link is usable, so concurrent redirects never lose
    /// increments.
    ///
    /// # Errors
    ///
    /// Returns [`AppError::LinkUnavailable`] if the code is unknown, manually
    /// expired, or past its expiry time. The three cases are deliberately
    /// indistinguishable.
    /// Returns [`AppError::Storage`] on store failures.
    pub async fn resolve(&self, code: &str) -> Result<String, AppError> {
        let now = Utc::now();

        match self.repository.record_click(code, now).await? {
            Some(original_url) => {
                debug!(short_code = %code, "Redirect resolved");
                Ok(original_url)
            }
            None => {
                debug!(short_code = %code, "Redirect refused: link unavailable");
                Err(AppError::gone(
                    "This link has expired",
                    json!({ "short_code": code }),
                ))
            }
        }
    }

    /// Returns click analytics for a short code.
    ///
    /// Read-only. The reported `is_active` is the effective status: a link
    /// past its expiry reads as inactive even if never manually expired.
    ///
    /// # Errors
    ///
    /// Returns [`AppError::NotFound`] if the code does not exist.
    /// Returns [`AppError::Storage`] on store failures.
    pub async fn get_analytics(&self, code: &str) -> Result<LinkAnalytics, AppError> {
        let link = self.get_link(code).await?;
        Ok(link.analytics_at(Utc::now()))
    }

    /// Retrieves a stored link by code.
    ///
    /// # Errors
    ///
    /// Returns [`AppError::NotFound`] if the code does not exist.
    /// Returns [`AppError::Storage`] on store failures.
    pub async fn get_link(&self, code: &str) -> Result<ShortLink, AppError> {
        self.repository
            .find_by_code(code)
            .await?
            .ok_or_else(|| AppError::not_found("URL not found", json!({ "short_code": code })))
    }

    /// Deactivates a short link before its expiry time.
    ///
    /// Idempotent: expiring an already inactive link succeeds.
    ///
    /// # Errors
    ///
    /// Returns [`AppError::NotFound`] if the code does not exist.
    /// Returns [`AppError::Storage`] on store failures.
    pub async fn expire(&self, code: &str) -> Result<(), AppError> {
        if !self.repository.deactivate(code).await? {
            return Err(AppError::not_found(
                "URL not found",
                json!({ "short_code": code }),
            ));
        }

        info!(short_code = %code, "Short link expired manually");
        Ok(())
    }

    /// Constructs the public short URL for a code.
    pub fn short_url(&self, code: &str) -> String {
        format!("{}/{}", self.base_url, code)
    }

    /// Verifies the underlying store is reachable.
    ///
    /// # Errors
    ///
    /// Returns [`AppError::Storage`] if the store cannot be reached.
    pub async fn check_storage(&self) -> Result<(), AppError> {
        self.repository.ping().await
    }

    fn resolve_ttl(&self, ttl_minutes: Option<f64>) -> Result<TimeDelta, AppError> {
        let minutes = match ttl_minutes {
            Some(m) if m.is_finite() && m > 0.0 => m,
            _ => return Ok(self.default_ttl),
        };

        let millis = (minutes * 60_000.0).round();
        if millis >= i64::MAX as f64 {
            return Err(AppError::bad_request(
                "Expiry is out of range",
                json!({ "expiresInMinutes": minutes }),
            ));
        }

        TimeDelta::try_milliseconds(millis as i64).ok_or_else(|| {
            AppError::bad_request(
                "Expiry is out of range",
                json!({ "expiresInMinutes": minutes }),
            )
        })
    }
}
