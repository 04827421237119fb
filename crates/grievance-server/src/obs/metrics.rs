//! Minimal metrics registry for the server.
//!
//! No metrics crate is used; counters are plain atomics with label cells
//! backed by `DashMap`, rendered on demand into the Prometheus text
//! exposition format. Sample rows are sorted so repeated scrapes of the same
//! state produce byte-identical output.

use dashmap::DashMap;
use std::fmt::Write;
use std::sync::atomic::{AtomicBool, AtomicU64, Ordering};
use std::sync::{Arc, RwLock};
use std::time::Instant;

use grievance_core::{PortalError, Result};

/// Helper to escape label values.
fn escape_label(v: &str) -> String {
    v.replace('\\', "\\\\").replace('"', "\\\"").replace('\n', "\\n")
}

/// Helper to escape HELP text (backslash and newline only, per the format).
fn escape_help(v: &str) -> String {
    v.replace('\\', "\\\\").replace('\n', "\\n")
}

/// A named counter with a fixed, ordered set of label names.
///
/// Cells are created lazily the first time a label-value tuple is observed
/// and only ever grow; there is no decrement and no reset short of process
/// restart.
#[derive(Debug)]
pub struct Counter {
    name: String,
    help: String,
    label_names: Vec<&'static str>,
    cells: DashMap<Vec<String>, AtomicU64>,
}

impl Counter {
    fn new(name: &str, help: &str, label_names: &[&'static str]) -> Self {
        Self {
            name: name.to_string(),
            help: help.to_string(),
            label_names: label_names.to_vec(),
            cells: DashMap::new(),
        }
    }

    pub fn name(&self) -> &str {
        &self.name
    }

    /// Increment by 1.
    pub fn inc(&self, label_values: &[&str]) {
        self.add(label_values, 1);
    }

    /// Increment by an arbitrary value.
    ///
    /// `label_values` must carry exactly one value per declared label name,
    /// in declaration order. An arity mismatch is a programming error: it
    /// panics in debug builds and is logged and dropped in release builds.
    pub fn add(&self, label_values: &[&str], v: u64) {
        if label_values.len() != self.label_names.len() {
            debug_assert!(
                false,
                "counter {}: got {} label values, declared {}",
                self.name,
                label_values.len(),
                self.label_names.len()
            );
            tracing::error!(
                metric = %self.name,
                got = label_values.len(),
                declared = self.label_names.len(),
                "dropping increment with wrong label arity"
            );
            return;
        }
        let key: Vec<String> = label_values.iter().map(|v| v.to_string()).collect();
        let counter = self.cells.entry(key).or_insert_with(|| AtomicU64::new(0));
        counter.fetch_add(v, Ordering::Relaxed);
    }

    /// Current value of one label-value tuple (0 if never observed).
    pub fn value(&self, label_values: &[&str]) -> u64 {
        let key: Vec<String> = label_values.iter().map(|v| v.to_string()).collect();
        self.cells
            .get(&key)
            .map(|c| c.load(Ordering::Relaxed))
            .unwrap_or(0)
    }

    /// Sum over every observed label-value tuple.
    pub fn total(&self) -> u64 {
        self.cells
            .iter()
            .map(|c| c.value().load(Ordering::Relaxed))
            .sum()
    }

    /// Render HELP/TYPE comments plus one line per observed tuple.
    fn render(&self, out: &mut String) {
        let _ = writeln!(out, "# HELP {} {}", self.name, escape_help(&self.help));
        let _ = writeln!(out, "# TYPE {} counter", self.name);
        let mut rows: Vec<(String, u64)> = self
            .cells
            .iter()
            .map(|r| {
                let label_str = self
                    .label_names
                    .iter()
                    .zip(r.key())
                    .map(|(k, v)| format!("{}=\"{}\"", k, escape_label(v)))
                    .collect::<Vec<_>>()
                    .join(",");
                (label_str, r.value().load(Ordering::Relaxed))
            })
            .collect();
        rows.sort();
        for (label_str, val) in rows {
            let _ = writeln!(out, "{}{{{}}} {}", self.name, label_str, val);
        }
    }
}

/// Process-wide collection of metrics.
///
/// Owned by the application state and passed by reference to the middleware
/// and the exposition handler; tests build isolated instances. Metric names
/// are unique within a registry.
pub struct Registry {
    counters: RwLock<Vec<Arc<Counter>>>,
    defaults: AtomicBool,
    started: Instant,
}

impl Default for Registry {
    fn default() -> Self {
        Self::new()
    }
}

impl Registry {
    pub fn new() -> Self {
        Self {
            counters: RwLock::new(Vec::new()),
            defaults: AtomicBool::new(false),
            started: Instant::now(),
        }
    }

    /// Register a new counter. Fails with `Conflict` if `name` is taken.
    pub fn register(
        &self,
        name: &str,
        help: &str,
        label_names: &[&'static str],
    ) -> Result<Arc<Counter>> {
        let mut counters = self
            .counters
            .write()
            .map_err(|_| PortalError::Internal("metrics registry lock poisoned".into()))?;
        if counters.iter().any(|c| c.name() == name) {
            return Err(PortalError::Conflict(format!(
                "metric already registered: {name}"
            )));
        }
        let counter = Arc::new(Counter::new(name, help, label_names));
        counters.push(Arc::clone(&counter));
        Ok(counter)
    }

    /// Enable the built-in process/runtime gauges. One-time call at startup.
    pub fn collect_defaults(&self) {
        self.defaults.store(true, Ordering::Relaxed);
    }

    /// Render all registered metrics in the exposition text format.
    ///
    /// Pure in-memory read; never suspends, so every emitted line reflects a
    /// well-formed value even while other tasks keep incrementing.
    pub fn render(&self) -> String {
        let mut out = String::new();
        if self.defaults.load(Ordering::Relaxed) {
            self.render_runtime(&mut out);
        }
        let counters = match self.counters.read() {
            Ok(c) => c,
            Err(_) => return out,
        };
        for counter in counters.iter() {
            counter.render(&mut out);
        }
        out
    }

    /// Process/runtime gauges computed at scrape time.
    fn render_runtime(&self, out: &mut String) {
        let _ = writeln!(out, "# HELP process_uptime_seconds Seconds since process start");
        let _ = writeln!(out, "# TYPE process_uptime_seconds gauge");
        let _ = writeln!(
            out,
            "process_uptime_seconds {:.3}",
            self.started.elapsed().as_secs_f64()
        );

        #[cfg(target_os = "linux")]
        render_proc_self(out);
    }
}

// /proc-derived gauges. Absent on non-Linux targets; each read failure
// simply omits its lines.
#[cfg(target_os = "linux")]
fn render_proc_self(out: &mut String) {
    // statm reports pages; assumes 4 KiB pages.
    const PAGE_SIZE: u64 = 4096;
    if let Some((vsize, rss)) = read_statm() {
        let _ = writeln!(out, "# HELP process_virtual_memory_bytes Virtual memory size in bytes");
        let _ = writeln!(out, "# TYPE process_virtual_memory_bytes gauge");
        let _ = writeln!(out, "process_virtual_memory_bytes {}", vsize * PAGE_SIZE);
        let _ = writeln!(out, "# HELP process_resident_memory_bytes Resident memory size in bytes");
        let _ = writeln!(out, "# TYPE process_resident_memory_bytes gauge");
        let _ = writeln!(out, "process_resident_memory_bytes {}", rss * PAGE_SIZE);
    }
    if let Some(fds) = count_open_fds() {
        let _ = writeln!(out, "# HELP process_open_fds Number of open file descriptors");
        let _ = writeln!(out, "# TYPE process_open_fds gauge");
        let _ = writeln!(out, "process_open_fds {fds}");
    }
    if let Some(threads) = read_thread_count() {
        let _ = writeln!(out, "# HELP process_threads Number of OS threads");
        let _ = writeln!(out, "# TYPE process_threads gauge");
        let _ = writeln!(out, "process_threads {threads}");
    }
}

#[cfg(target_os = "linux")]
fn read_statm() -> Option<(u64, u64)> {
    let s = std::fs::read_to_string("/proc/self/statm").ok()?;
    let mut fields = s.split_whitespace();
    let vsize = fields.next()?.parse().ok()?;
    let rss = fields.next()?.parse().ok()?;
    Some((vsize, rss))
}

#[cfg(target_os = "linux")]
fn count_open_fds() -> Option<u64> {
    Some(std::fs::read_dir("/proc/self/fd").ok()?.count() as u64)
}

#[cfg(target_os = "linux")]
fn read_thread_count() -> Option<u64> {
    let s = std::fs::read_to_string("/proc/self/status").ok()?;
    s.lines()
        .find_map(|l| l.strip_prefix("Threads:"))
        .and_then(|v| v.trim().parse().ok())
}
