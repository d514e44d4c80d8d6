//! Data Transfer Objects for API requests and responses.
//!
//! All DTOs use Serde for JSON serialization/deserialization with camelCase
//! field names. Request bodies are checked with validator.

pub mod analytics;
pub mod expire;
pub mod health;
pub mod shorten;
