//! Grievance portal backend.
//!
//! Bootstrap order matters only in one place: the database connect is
//! allowed to fail (the server still listens and answers /health), so it
//! happens before state construction but never aborts startup.

use std::net::SocketAddr;
use tracing_subscriber::{fmt, EnvFilter};

use grievance_server::{app_state, config, db, router};

#[tokio::main]
async fn main() {
    fmt().with_env_filter(EnvFilter::from_default_env()).init();

    let cfg = config::load().expect("config load failed");
    let listen: SocketAddr = format!("{}:{}", cfg.server.bind, cfg.server.port)
        .parse()
        .expect("server.bind/server.port must form a valid SocketAddr");

    let database = db::connect(&cfg.database).await;
    let state = app_state::AppState::new(cfg, database).expect("state build failed");
    let app = router::build_router(state);

    tracing::info!(%listen, "grievance-server starting");
    tracing::info!("metrics exposed at /metrics");
    let listener = tokio::net::TcpListener::bind(listen).await.expect("failed to bind");

    axum::serve(listener, app).await.expect("server failed");
}
