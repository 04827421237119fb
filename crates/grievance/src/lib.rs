//! Top-level facade crate for the grievance portal.
//!
//! Re-exports core types and the server library so users can depend on a single crate.

pub mod core {
    pub use grievance_core::*;
}

pub mod server {
    pub use grievance_server::*;
}
