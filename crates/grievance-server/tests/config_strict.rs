#![allow(clippy::unwrap_used)]
#![allow(clippy::expect_used)]
#![allow(clippy::panic)]

use grievance_server::config;

#[test]
fn deny_unknown_fields_nested() {
    let bad = r#"
server:
  port: 3001
database:
  uri: "mongodb://localhost:27017/x" # typo (url) should fail
"#;

    let err = config::load_from_str(bad).expect_err("must fail");
    assert_eq!(err.client_code().as_str(), "BAD_REQUEST");
}

#[test]
fn ok_empty_config_uses_defaults() {
    let cfg = config::load_from_str("{}").expect("must parse");
    assert_eq!(cfg.server.port, 3001);
    assert_eq!(cfg.server.bind, "0.0.0.0");
    assert_eq!(cfg.database.url, "mongodb://localhost:27017/grievance-portal");
    assert_eq!(cfg.database.name, "grievance-portal");
}

#[test]
fn ok_partial_config() {
    let ok = r#"
server:
  port: 8080
cors:
  allowed_origins: ["https://portal.example.com"]
"#;
    let cfg = config::load_from_str(ok).expect("must parse");
    assert_eq!(cfg.server.port, 8080);
    assert_eq!(cfg.cors.allowed_origins, vec!["https://portal.example.com"]);
    // untouched sections keep defaults
    assert_eq!(cfg.auth.token_ttl_secs, 3600);
}

#[test]
fn rejects_non_mongodb_url() {
    let bad = r#"
database:
  url: "postgres://localhost/portal"
"#;
    let err = config::load_from_str(bad).expect_err("must fail");
    assert_eq!(err.client_code().as_str(), "BAD_REQUEST");
}

#[test]
fn rejects_out_of_range_values() {
    let err = config::load_from_str("database:\n  server_selection_timeout_ms: 5\n")
        .expect_err("must fail");
    assert_eq!(err.client_code().as_str(), "BAD_REQUEST");

    let err = config::load_from_str("auth:\n  token_ttl_secs: 1\n").expect_err("must fail");
    assert_eq!(err.client_code().as_str(), "BAD_REQUEST");

    let err = config::load_from_str("auth:\n  jwt_secret: \"short\"\n").expect_err("must fail");
    assert_eq!(err.client_code().as_str(), "BAD_REQUEST");
}

#[test]
fn env_vars_override_defaults() {
    // single test mutates the environment to avoid races between cases
    std::env::set_var("MONGO_URL", "mongodb://db.internal:27017/portal");
    std::env::set_var("PORT", "4000");
    let cfg = config::load().expect("must load");
    assert_eq!(cfg.database.url, "mongodb://db.internal:27017/portal");
    assert_eq!(cfg.server.port, 4000);

    std::env::set_var("PORT", "not-a-port");
    let err = config::load().expect_err("must fail");
    assert_eq!(err.client_code().as_str(), "BAD_REQUEST");

    std::env::remove_var("MONGO_URL");
    std::env::remove_var("PORT");
}
