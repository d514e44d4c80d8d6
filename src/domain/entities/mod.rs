//! Core domain entities.
//!
//! - [`ShortLink`] - A stored short link
//! - [`NewShortLink`] - Input for creating a link
//! - [`LinkAnalytics`] - Read-only analytics projection
//! - [`LinkSummary`] - Store-wide totals

pub mod link;

pub use link::{LinkAnalytics, LinkSummary, NewShortLink, ShortLink};
