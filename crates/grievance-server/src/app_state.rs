//! Shared application state for the grievance server.
//!
//! Everything a handler needs hangs off one cheaply clonable struct: config,
//! the metrics registry (owned here, not a global, so tests get isolated
//! instances), the request counter handle, the token signer, and the
//! optional database handle.

use std::sync::Arc;

use mongodb::Database;

use grievance_core::error::{PortalError, Result};

use crate::auth::TokenSigner;
use crate::config::ServerConfig;
use crate::obs::metrics::{Counter, Registry};

#[derive(Clone)]
pub struct AppState {
    inner: Arc<AppStateInner>,
}

struct AppStateInner {
    cfg: ServerConfig,
    registry: Registry,
    http_requests: Arc<Counter>,
    tokens: TokenSigner,
    db: Option<Database>,
}

impl AppState {
    /// Build application state.
    /// Returns Result so main can handle errors gracefully (no panic).
    pub fn new(cfg: ServerConfig, db: Option<Database>) -> Result<Self> {
        let registry = Registry::new();
        registry.collect_defaults();
        let http_requests = registry.register(
            "http_requests_total",
            "Total number of HTTP requests",
            &["method", "route", "status"],
        )?;

        if cfg.auth.is_default_secret() {
            tracing::warn!("auth.jwt_secret is the built-in default; set JWT_SECRET");
        }
        let tokens = TokenSigner::new(&cfg.auth);

        Ok(Self {
            inner: Arc::new(AppStateInner {
                cfg,
                registry,
                http_requests,
                tokens,
                db,
            }),
        })
    }

    pub fn cfg(&self) -> &ServerConfig {
        &self.inner.cfg
    }

    pub fn registry(&self) -> &Registry {
        &self.inner.registry
    }

    pub fn http_requests(&self) -> &Counter {
        &self.inner.http_requests
    }

    pub fn tokens(&self) -> &TokenSigner {
        &self.inner.tokens
    }

    /// The database handle, or `Unavailable` when the process came up
    /// without one.
    pub fn db(&self) -> Result<&Database> {
        self.inner
            .db
            .as_ref()
            .ok_or_else(|| PortalError::Unavailable("database not connected".into()))
    }
}
