//! Tracing setup for the qxdts binary.
//!
//! Logging is off unless one of these asks for it, in this order:
//!
//! - `QXDTS_LOG`: a bare level (`debug`) applies to the qxdts crates only;
//!   anything with a target or a comma is used as a full filter
//! - `RUST_LOG`: used as-is
//! - `-v` / `-vv` on the command line: `debug` / `trace` for the qxdts crates
//!
//! `QXDTS_LOG_FORMAT=tree` prints the per-class spans of the emitter as an
//! indented tree, `json` prints one object per event, anything else prints
//! flat text. Output always goes to stderr so `--list-classes` stays clean.
//!
//! ```bash
//! QXDTS_LOG=debug QXDTS_LOG_FORMAT=tree qxdts compiled/meta
//! QXDTS_LOG="qxdts_emitter::type_mapper=trace" qxdts compiled/meta
//! ```

use tracing_subscriber::prelude::*;
use tracing_subscriber::{EnvFilter, Registry, fmt};

const LOG_VAR: &str = "QXDTS_LOG";
const FORMAT_VAR: &str = "QXDTS_LOG_FORMAT";

/// Targets a bare level is applied to.
const QXDTS_TARGETS: &[&str] = &["qxdts_cli", "qxdts_meta", "qxdts_emitter"];

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum LogFormat {
    Text,
    Tree,
    Json,
}

impl LogFormat {
    pub fn parse(value: &str) -> Self {
        match value.trim().to_lowercase().as_str() {
            "tree" => Self::Tree,
            "json" => Self::Json,
            _ => Self::Text,
        }
    }
}

/// Resolved subscriber settings.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct TracingSettings {
    /// `EnvFilter` directives.
    pub filter: String,
    pub format: LogFormat,
}

impl TracingSettings {
    /// Settings from the raw variable values and the `-v` count, or `None`
    /// when nothing asks for logging.
    pub fn resolve(
        qxdts_log: Option<&str>,
        rust_log: Option<&str>,
        log_format: Option<&str>,
        verbose: u8,
    ) -> Option<Self> {
        let filter = match (qxdts_log, rust_log, verbose) {
            (Some(own), _, _) => scoped_directives(own),
            (None, Some(rust), _) => rust.to_string(),
            (None, None, 0) => return None,
            (None, None, 1) => scoped_directives("debug"),
            (None, None, _) => scoped_directives("trace"),
        };
        Some(Self {
            filter,
            format: LogFormat::parse(log_format.unwrap_or_default()),
        })
    }

    fn from_env(verbose: u8) -> Option<Self> {
        let qxdts_log = std::env::var(LOG_VAR).ok();
        let rust_log = std::env::var("RUST_LOG").ok();
        let log_format = std::env::var(FORMAT_VAR).ok();
        Self::resolve(
            qxdts_log.as_deref(),
            rust_log.as_deref(),
            log_format.as_deref(),
            verbose,
        )
    }
}

/// Expand a bare level into one directive per qxdts crate, so dependencies
/// stay quiet. Full filter expressions pass through unchanged.
pub fn scoped_directives(value: &str) -> String {
    let value = value.trim();
    if value.contains('=') || value.contains(',') {
        return value.to_string();
    }
    let level = if value.is_empty() { "info" } else { value };
    QXDTS_TARGETS
        .iter()
        .map(|target| format!("{target}={level}"))
        .collect::<Vec<_>>()
        .join(",")
}

/// Install the global subscriber when logging was requested.
pub fn init_tracing(verbose: u8) {
    let Some(settings) = TracingSettings::from_env(verbose) else {
        return;
    };
    let filter = EnvFilter::builder().parse_lossy(&settings.filter);

    match settings.format {
        LogFormat::Tree => {
            // The class name is a span field, so targets add nothing.
            let tree_layer = tracing_tree::HierarchicalLayer::default()
                .with_writer(std::io::stderr)
                .with_indent_amount(2)
                .with_indent_lines(true)
                .with_deferred_spans(true)
                .with_bracketed_fields(true)
                .with_targets(false);

            Registry::default().with(filter).with(tree_layer).init();
        }
        LogFormat::Json => {
            let json_layer = fmt::layer()
                .json()
                .with_current_span(true)
                .with_writer(std::io::stderr);

            Registry::default().with(filter).with(json_layer).init();
        }
        LogFormat::Text => {
            tracing_subscriber::fmt()
                .with_env_filter(filter)
                .with_target(false)
                .with_writer(std::io::stderr)
                .init();
        }
    }
}
