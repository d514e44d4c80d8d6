//! Link repository implementations.
//!
//! # Repositories
//!
//! - [`PgLinkRepository`] - PostgreSQL storage, used in production
//! - [`InMemoryLinkRepository`] - Process-local storage for development and tests
//!
//! PostgreSQL calls are wrapped in [`retry::with_retry`], which retries
//! transient failures with bounded exponential backoff.

pub mod memory_link_repository;
pub mod pg_link_repository;
pub mod retry;

pub use memory_link_repository::InMemoryLinkRepository;
pub use pg_link_repository::PgLinkRepository;
pub use retry::RetryPolicy;
