//! Lightweight in-process observability.
//!
//! Counters are stored as atomics, updated by the request-tracking
//! middleware, and rendered by the `/metrics` handler. No metrics crate.

pub mod metrics;
pub mod middleware;
