#![allow(clippy::unwrap_used)]
#![allow(clippy::expect_used)]
#![allow(clippy::panic)]

use grievance_server::obs::metrics::Registry;

#[test]
fn distinct_tuples_each_report_one() {
    let registry = Registry::new();
    let requests = registry
        .register("http_requests_total", "Total requests", &["method", "route", "status"])
        .unwrap();

    let tuples = [
        ["GET", "/health", "200"],
        ["GET", "/api/complaints", "200"],
        ["POST", "/api/complaints", "201"],
        ["GET", "/api/complaints", "404"],
        ["DELETE", "/api/complaints", "405"],
    ];
    for t in &tuples {
        requests.inc(&t[..]);
    }

    for t in &tuples {
        assert_eq!(requests.value(&t[..]), 1);
    }
    assert_eq!(requests.total(), tuples.len() as u64);
}

#[test]
fn same_tuple_accumulates_without_loss() {
    let registry = Registry::new();
    let requests = registry
        .register("http_requests_total", "Total requests", &["method", "route", "status"])
        .unwrap();

    for _ in 0..1000 {
        requests.inc(&["GET", "/api/complaints", "200"]);
    }
    assert_eq!(requests.value(&["GET", "/api/complaints", "200"]), 1000);
    assert_eq!(requests.total(), 1000);
}

#[test]
fn concurrent_increments_are_not_lost() {
    let registry = std::sync::Arc::new(Registry::new());
    let requests = registry
        .register("http_requests_total", "Total requests", &["method", "route", "status"])
        .unwrap();

    let mut handles = Vec::new();
    for _ in 0..8 {
        let counter = std::sync::Arc::clone(&requests);
        handles.push(std::thread::spawn(move || {
            for _ in 0..500 {
                counter.inc(&["GET", "/health", "200"]);
            }
        }));
    }
    for h in handles {
        h.join().unwrap();
    }
    assert_eq!(requests.value(&["GET", "/health", "200"]), 4000);
}

#[test]
fn render_is_deterministic_and_does_not_mutate() {
    let registry = Registry::new();
    let requests = registry
        .register("http_requests_total", "Total requests", &["method", "route", "status"])
        .unwrap();
    requests.inc(&["GET", "/b", "200"]);
    requests.inc(&["GET", "/a", "200"]);
    requests.add(&["POST", "/a", "500"], 3);

    let first = registry.render();
    let second = registry.render();
    assert_eq!(first, second);

    // sorted sample rows, declared label order
    let a = first.find(r#"http_requests_total{method="GET",route="/a",status="200"} 1"#);
    let b = first.find(r#"http_requests_total{method="GET",route="/b",status="200"} 1"#);
    let p = first.find(r#"http_requests_total{method="POST",route="/a",status="500"} 3"#);
    assert!(a.unwrap() < b.unwrap());
    assert!(b.unwrap() < p.unwrap());
}

#[test]
fn render_emits_help_and_type_comments() {
    let registry = Registry::new();
    registry
        .register("http_requests_total", "Total number of HTTP requests", &["method"])
        .unwrap();

    let out = registry.render();
    assert!(out.contains("# HELP http_requests_total Total number of HTTP requests\n"));
    assert!(out.contains("# TYPE http_requests_total counter\n"));
}

#[test]
fn collect_defaults_exposes_uptime() {
    let registry = Registry::new();
    // not enabled yet
    assert!(!registry.render().contains("process_uptime_seconds"));

    registry.collect_defaults();
    let out = registry.render();
    assert!(out.contains("# TYPE process_uptime_seconds gauge"));
    assert!(out.contains("process_uptime_seconds "));
}

#[test]
fn label_values_are_escaped() {
    let registry = Registry::new();
    let counter = registry.register("weird_total", "Labels with quotes", &["q"]).unwrap();
    counter.inc(&["say \"hi\"\nthere"]);

    let out = registry.render();
    assert!(out.contains(r#"weird_total{q="say \"hi\"\nthere"} 1"#));
}

#[test]
fn duplicate_register_fails() {
    let registry = Registry::new();
    registry.register("dup_total", "first", &["a"]).unwrap();
    let err = registry.register("dup_total", "second", &["a"]).expect_err("must fail");
    assert_eq!(err.client_code().as_str(), "CONFLICT");
}

#[cfg(debug_assertions)]
#[test]
#[should_panic]
fn wrong_label_arity_panics_in_debug_builds() {
    let registry = Registry::new();
    let counter = registry
        .register("http_requests_total", "Total requests", &["method", "route", "status"])
        .unwrap();
    counter.inc(&["GET", "/health"]); // missing status
}
