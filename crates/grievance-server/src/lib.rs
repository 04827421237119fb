//! Grievance server library entry.
//!
//! This crate wires config, the database connector, the metrics subsystem,
//! and the API routers into a cohesive backend. It is intended to be
//! consumed by the binary (`main.rs`) and by integration tests.

pub mod app_state;
pub mod auth;
pub mod config;
pub mod db;
pub mod obs;
pub mod ops;
pub mod router;
pub mod routes;
