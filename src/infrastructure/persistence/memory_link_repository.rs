//! In-process implementation of link repository.

use async_trait::async_trait;
use chrono::{DateTime, Utc};
use dashmap::DashMap;
use dashmap::mapref::entry::Entry;
use serde_json::json;
use tracing::debug;

use crate::domain::entities::{LinkSummary, NewShortLink, ShortLink};
use crate::domain::repositories::LinkRepository;
use crate::error::AppError;

/// Link store held in a concurrent hash map.
///
/// Every mutation runs under the map's per-entry write lock, which gives the
/// same guarantees as the PostgreSQL store: duplicate codes are rejected and
/// click increments are never lost. Contents are lost when the process exits.
///
/// # Use Cases
///
/// - Development environments without PostgreSQL
/// - Handler and service tests
#[derive(Debug, Default)]
pub struct InMemoryLinkRepository {
    links: DashMap<String, ShortLink>,
}

impl InMemoryLinkRepository {
    /// Creates an empty store.
    pub fn new() -> Self {
        debug!("Using in-memory link storage");
        Self::default()
    }

    /// Number of stored links.
    pub fn len(&self) -> usize {
        self.links.len()
    }

    /// Returns true if no links are stored.
    pub fn is_empty(&self) -> bool {
        self.links.is_empty()
    }
}

#[async_trait]
impl LinkRepository for InMemoryLinkRepository {
    async fn create(&self, new_link: NewShortLink) -> Result<ShortLink, AppError> {
        match self.links.entry(new_link.short_code.clone()) {
            Entry::Occupied(_) => Err(AppError::conflict(
                "Unique constraint violation",
                json!({ "constraint": "short_links_pkey" }),
            )),
            Entry::Vacant(entry) => {
                let link = ShortLink::from(new_link);
                entry.insert(link.clone());
                Ok(link)
            }
        }
    }

    async fn find_by_code(&self, code: &str) -> Result<Option<ShortLink>, AppError> {
        Ok(self.links.get(code).map(|link| link.value().clone()))
    }

    async fn record_click(
        &self,
        code: &str,
        now: DateTime<Utc>,
    ) -> Result<Option<String>, AppError> {
        let Some(mut link) = self.links.get_mut(code) else {
            return Ok(None);
        };

        if !link.is_usable_at(now) {
            return Ok(None);
        }

        link.clicks += 1;
        link.updated_at = now;

        Ok(Some(link.original_url.clone()))
    }

    async fn deactivate(&self, code: &str) -> Result<bool, AppError> {
        let Some(mut link) = self.links.get_mut(code) else {
            return Ok(false);
        };

        if link.is_active {
            link.is_active = false;
            link.updated_at = Utc::now();
        }

        Ok(true)
    }

    async fn summary(&self, now: DateTime<Utc>) -> Result<LinkSummary, AppError> {
        let summary = self
            .links
            .iter()
            .fold(LinkSummary::default(), |mut acc, link| {
                acc.total += 1;
                acc.clicks += link.clicks;
                if link.is_usable_at(now) {
                    acc.usable += 1;
                }
                acc
            });

        Ok(summary)
    }

    async fn ping(&self) -> Result<(), AppError> {
        Ok(())
    }
}
