//! PostgreSQL implementation of link repository.

use async_trait::async_trait;
use chrono::{DateTime, Utc};
use sqlx::{FromRow, PgPool};
use std::sync::Arc;

use super::retry::{RetryPolicy, with_retry};
use crate::domain::entities::{LinkSummary, NewShortLink, ShortLink};
use crate::domain::repositories::LinkRepository;
use crate::error::AppError;

const LINK_COLUMNS: &str =
    "short_code, original_url, clicks, created_at, expires_at, is_active, updated_at";

#[derive(Debug, FromRow)]
struct ShortLinkRow {
    short_code: String,
    original_url: String,
    clicks: i64,
    created_at: DateTime<Utc>,
    expires_at: DateTime<Utc>,
    is_active: bool,
    updated_at: DateTime<Utc>,
}

impl From<ShortLinkRow> for ShortLink {
    fn from(row: ShortLinkRow) -> Self {
        ShortLink {
            short_code: row.short_code,
            original_url: row.original_url,
            clicks: row.clicks,
            created_at: row.created_at,
            expires_at: row.expires_at,
            is_active: row.is_active,
            updated_at: row.updated_at,
        }
    }
}

/// PostgreSQL repository for short links.
///
/// Code uniqueness comes from the `short_links` primary key. Click counting
/// is a single conditional `UPDATE ... SET clicks = clicks + 1`, so the
/// increment happens inside the database and concurrent redirects never
/// overwrite each other.
pub struct PgLinkRepository {
    pool: Arc<PgPool>,
    retry: RetryPolicy,
}

impl PgLinkRepository {
    /// Creates a new repository with the default retry policy.
    pub fn new(pool: Arc<PgPool>) -> Self {
        Self::with_retry_policy(pool, RetryPolicy::default())
    }

    /// Creates a new repository with an explicit retry policy.
    pub fn with_retry_policy(pool: Arc<PgPool>, retry: RetryPolicy) -> Self {
        Self { pool, retry }
    }
}

#[async_trait]
impl LinkRepository for PgLinkRepository {
    async fn create(&self, new_link: NewShortLink) -> Result<ShortLink, AppError> {
        let sql = format!(
            r#"
            INSERT INTO short_links
                (short_code, original_url, clicks, created_at, expires_at, is_active, updated_at)
            VALUES ($1, $2, 0, $3, $4, TRUE, $3)
            RETURNING {LINK_COLUMNS}
            "#
        );

        let (sql, new_link, pool) = (sql.as_str(), &new_link, self.pool.as_ref());

        let row = with_retry("create link", self.retry, move || {
            sqlx::query_as::<_, ShortLinkRow>(sql)
                .bind(new_link.short_code.as_str())
                .bind(new_link.original_url.as_str())
                .bind(new_link.created_at)
                .bind(new_link.expires_at)
                .fetch_one(pool)
        })
        .await?;

        Ok(row.into())
    }

    async fn find_by_code(&self, code: &str) -> Result<Option<ShortLink>, AppError> {
        let sql = format!("SELECT {LINK_COLUMNS} FROM short_links WHERE short_code = $1");

        let (sql, pool) = (sql.as_str(), self.pool.as_ref());

        let row = with_retry("find link", self.retry, move || {
            sqlx::query_as::<_, ShortLinkRow>(sql)
                .bind(code)
                .fetch_optional(pool)
        })
        .await?;

        Ok(row.map(ShortLink::from))
    }

    async fn record_click(
        &self,
        code: &str,
        now: DateTime<Utc>,
    ) -> Result<Option<String>, AppError> {
        let pool = self.pool.as_ref();

        let url = with_retry("record click", self.retry, move || {
            sqlx::query_scalar::<_, String>(
                r#"
                UPDATE short_links
                SET clicks = clicks + 1, updated_at = $2
                WHERE short_code = $1 AND is_active AND expires_at > $2
                RETURNING original_url
                "#,
            )
            .bind(code)
            .bind(now)
            .fetch_optional(pool)
        })
        .await?;

        Ok(url)
    }

    async fn deactivate(&self, code: &str) -> Result<bool, AppError> {
        let pool = self.pool.as_ref();
        let now = Utc::now();

        let result = with_retry("deactivate link", self.retry, move || {
            sqlx::query(
                r#"
                UPDATE short_links
                SET is_active = FALSE,
                    updated_at = CASE WHEN is_active THEN $2 ELSE updated_at END
                WHERE short_code = $1
                "#,
            )
            .bind(code)
            .bind(now)
            .execute(pool)
        })
        .await?;

        Ok(result.rows_affected() > 0)
    }

    async fn summary(&self, now: DateTime<Utc>) -> Result<LinkSummary, AppError> {
        let pool = self.pool.as_ref();

        let (total, usable, clicks) = with_retry("link summary", self.retry, move || {
            sqlx::query_as::<_, (i64, i64, i64)>(
                r#"
                SELECT
                    COUNT(*),
                    COUNT(*) FILTER (WHERE is_active AND expires_at > $1),
                    COALESCE(SUM(clicks), 0)::BIGINT
                FROM short_links
                "#,
            )
            .bind(now)
            .fetch_one(pool)
        })
        .await?;

        Ok(LinkSummary {
            total,
            usable,
            clicks,
        })
    }

    async fn ping(&self) -> Result<(), AppError> {
        sqlx::query_scalar::<_, i32>("SELECT 1")
            .fetch_one(self.pool.as_ref())
            .await?;

        Ok(())
    }
}
