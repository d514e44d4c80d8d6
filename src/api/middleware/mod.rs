//! HTTP middleware for request processing.
//!
//! Provides browser access control and observability middleware.

pub mod cors;
pub mod tracing;
