use serde::Deserialize;

use grievance_core::error::{PortalError, Result};

#[derive(Debug, Default, Deserialize)]
#[serde(deny_unknown_fields)]
pub struct ServerConfig {
    #[serde(default)]
    pub server: ServerSection,

    #[serde(default)]
    pub database: DatabaseSection,

    #[serde(default)]
    pub auth: AuthSection,

    #[serde(default)]
    pub cors: CorsSection,
}

impl ServerConfig {
    pub fn validate(&self) -> Result<()> {
        self.server.validate()?;
        self.database.validate()?;
        self.auth.validate()?;
        Ok(())
    }
}

#[derive(Debug, Deserialize)]
#[serde(deny_unknown_fields)]
pub struct ServerSection {
    #[serde(default = "default_bind")]
    pub bind: String,

    #[serde(default = "default_port")]
    pub port: u16,

    /// Directory served for requests no API route matches.
    #[serde(default = "default_static_dir")]
    pub static_dir: String,
}

impl Default for ServerSection {
    fn default() -> Self {
        Self {
            bind: default_bind(),
            port: default_port(),
            static_dir: default_static_dir(),
        }
    }
}

impl ServerSection {
    pub fn validate(&self) -> Result<()> {
        if self.port == 0 {
            return Err(PortalError::BadRequest(
                "server.port must not be 0".into(),
            ));
        }
        if self.bind.parse::<std::net::IpAddr>().is_err() {
            return Err(PortalError::BadRequest(
                "server.bind must be a valid IP address".into(),
            ));
        }
        Ok(())
    }
}

fn default_bind() -> String {
    "0.0.0.0".into()
}
fn default_port() -> u16 {
    3001
}
fn default_static_dir() -> String {
    "public".into()
}

#[derive(Debug, Deserialize)]
#[serde(deny_unknown_fields)]
pub struct DatabaseSection {
    #[serde(default = "default_database_url")]
    pub url: String,

    /// Fallback database name when the URL path does not carry one.
    #[serde(default = "default_database_name")]
    pub name: String,

    #[serde(default = "default_server_selection_timeout_ms")]
    pub server_selection_timeout_ms: u64,
}

impl Default for DatabaseSection {
    fn default() -> Self {
        Self {
            url: default_database_url(),
            name: default_database_name(),
            server_selection_timeout_ms: default_server_selection_timeout_ms(),
        }
    }
}

impl DatabaseSection {
    pub fn validate(&self) -> Result<()> {
        if !self.url.starts_with("mongodb://") && !self.url.starts_with("mongodb+srv://") {
            return Err(PortalError::BadRequest(
                "database.url must be a mongodb:// or mongodb+srv:// URL".into(),
            ));
        }
        if !(100..=60000).contains(&self.server_selection_timeout_ms) {
            return Err(PortalError::BadRequest(
                "database.server_selection_timeout_ms must be between 100 and 60000".into(),
            ));
        }
        Ok(())
    }
}

fn default_database_url() -> String {
    "mongodb://localhost:27017/grievance-portal".into()
}
fn default_database_name() -> String {
    "grievance-portal".into()
}
fn default_server_selection_timeout_ms() -> u64 {
    2000
}

#[derive(Debug, Deserialize)]
#[serde(deny_unknown_fields)]
pub struct AuthSection {
    /// HS256 signing key. The built-in value is for development only.
    #[serde(default = "default_jwt_secret")]
    pub jwt_secret: String,

    #[serde(default = "default_token_ttl_secs")]
    pub token_ttl_secs: u64,
}

impl Default for AuthSection {
    fn default() -> Self {
        Self {
            jwt_secret: default_jwt_secret(),
            token_ttl_secs: default_token_ttl_secs(),
        }
    }
}

impl AuthSection {
    pub fn validate(&self) -> Result<()> {
        if self.jwt_secret.len() < 8 {
            return Err(PortalError::BadRequest(
                "auth.jwt_secret must be at least 8 characters".into(),
            ));
        }
        if !(60..=2_592_000).contains(&self.token_ttl_secs) {
            return Err(PortalError::BadRequest(
                "auth.token_ttl_secs must be between 60 and 2592000".into(),
            ));
        }
        Ok(())
    }

    pub fn is_default_secret(&self) -> bool {
        self.jwt_secret == default_jwt_secret()
    }
}

fn default_jwt_secret() -> String {
    "dev-only-signing-key".into()
}
fn default_token_ttl_secs() -> u64 {
    3600
}

#[derive(Debug, Deserialize)]
#[serde(deny_unknown_fields)]
pub struct CorsSection {
    /// `["*"]` allows any origin.
    #[serde(default = "default_allowed_origins")]
    pub allowed_origins: Vec<String>,
}

impl Default for CorsSection {
    fn default() -> Self {
        Self {
            allowed_origins: default_allowed_origins(),
        }
    }
}

fn default_allowed_origins() -> Vec<String> {
    vec!["*".into()]
}
