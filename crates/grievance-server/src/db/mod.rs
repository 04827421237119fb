//! MongoDB connection management.
//!
//! The driver connects lazily, so startup never blocks on the database: a
//! bad URL degrades the process to 503s on data routes, and reachability is
//! probed by a fire-and-forget ping whose outcome is only logged.

use std::time::Duration;

use mongodb::bson::doc;
use mongodb::options::ClientOptions;
use mongodb::{Client, Database};

use grievance_core::PortalError;

use crate::config::DatabaseSection;

/// Users collection name.
pub const USERS: &str = "users";
/// Complaints collection name.
pub const COMPLAINTS: &str = "complaints";

/// Build a database handle from config.
///
/// Returns `None` when the URL cannot be parsed at all; handlers then answer
/// `503`. An unreachable server still yields `Some` — each operation fails
/// on its own with a bounded server-selection timeout.
pub async fn connect(cfg: &DatabaseSection) -> Option<Database> {
    let mut options = match ClientOptions::parse(&cfg.url).await {
        Ok(options) => options,
        Err(e) => {
            tracing::error!(error = %e, "invalid database url, data routes disabled");
            return None;
        }
    };
    options.server_selection_timeout =
        Some(Duration::from_millis(cfg.server_selection_timeout_ms));

    let client = match Client::with_options(options) {
        Ok(client) => client,
        Err(e) => {
            tracing::error!(error = %e, "database client init failed, data routes disabled");
            return None;
        }
    };

    let db = client
        .default_database()
        .unwrap_or_else(|| client.database(&cfg.name));

    // Reachability probe; failure is logged, never fatal.
    let ping_db = db.clone();
    tokio::spawn(async move {
        match ping_db.run_command(doc! { "ping": 1 }).await {
            Ok(_) => tracing::info!(db = %ping_db.name(), "connected to MongoDB"),
            Err(e) => tracing::error!(error = %e, "database ping failed"),
        }
    });

    Some(db)
}

/// Map driver failures onto the shared error surface.
///
/// Server-selection timeouts mean the database is unreachable right now;
/// everything else is reported as internal with the detail kept in logs.
pub fn db_err(e: mongodb::error::Error) -> PortalError {
    match e.kind.as_ref() {
        mongodb::error::ErrorKind::ServerSelection { .. } => {
            PortalError::Unavailable("database unreachable".into())
        }
        _ => {
            tracing::error!(error = %e, "database operation failed");
            PortalError::Internal("database operation failed".into())
        }
    }
}
