//! Domain layer containing business entities and storage contracts.
//!
//! - [`entities`] - Core business data structures
//! - [`repositories`] - Data access trait definitions
//!
//! The domain layer has no dependencies on infrastructure or presentation
//! layers. Expiry is a pure function of stored timestamps and the current
//! time, evaluated whenever a link is read; nothing sweeps expired links in
//! the background.

pub mod entities;
pub mod repositories;
