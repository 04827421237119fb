//! Server config loader (strict parsing, env overrides).

pub mod schema;

use std::env;
use std::fs;
use std::path::Path;

use grievance_core::error::{PortalError, Result};

pub use schema::{AuthSection, CorsSection, DatabaseSection, ServerConfig, ServerSection};

/// Config file read when present next to the binary.
pub const DEFAULT_PATH: &str = "grievance.yaml";

/// Load the config file if one exists, apply environment overrides, validate.
///
/// `MONGO_URL`, `PORT`, and `JWT_SECRET` take precedence over file values.
pub fn load() -> Result<ServerConfig> {
    let mut cfg = if Path::new(DEFAULT_PATH).exists() {
        load_from_file(DEFAULT_PATH)?
    } else {
        ServerConfig::default()
    };
    apply_env_overrides(&mut cfg)?;
    cfg.validate()?;
    Ok(cfg)
}

pub fn load_from_file(path: &str) -> Result<ServerConfig> {
    let s = fs::read_to_string(path)
        .map_err(|e| PortalError::Internal(format!("read config failed: {e}")))?;
    load_from_str(&s)
}

pub fn load_from_str(s: &str) -> Result<ServerConfig> {
    let cfg: ServerConfig = serde_yaml::from_str(s)
        .map_err(|e| PortalError::BadRequest(format!("invalid yaml: {e}")))?;
    cfg.validate()?;
    Ok(cfg)
}

fn apply_env_overrides(cfg: &mut ServerConfig) -> Result<()> {
    if let Ok(url) = env::var("MONGO_URL") {
        cfg.database.url = url;
    }
    if let Ok(port) = env::var("PORT") {
        cfg.server.port = port
            .parse()
            .map_err(|_| PortalError::BadRequest(format!("PORT is not a valid port: {port}")))?;
    }
    if let Ok(secret) = env::var("JWT_SECRET") {
        cfg.auth.jwt_secret = secret;
    }
    Ok(())
}
