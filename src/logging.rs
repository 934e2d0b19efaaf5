//! Diagnostic logging
//!
//! The library only emits `tracing` events. The binary installs a
//! subscriber once through [`init`]; logs go to stderr so that JSON on
//! stdout stays machine-readable.

use std::sync::OnceLock;

use tracing_subscriber::{fmt, layer::SubscriberExt, util::SubscriberInitExt, EnvFilter, Layer};

static LOGGER_INITIALIZED: OnceLock<()> = OnceLock::new();

/// Explicit filter directive, checked before `RUST_LOG`.
pub const LOG_ENV: &str = "CAPCONF_LOG";
/// Set to `json` for one JSON object per log line.
pub const LOG_FORMAT_ENV: &str = "CAPCONF_LOG_FORMAT";

/// Log line format
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum LogFormat {
    #[default]
    Text,
    Json,
}

impl LogFormat {
    fn from_env() -> Self {
        match std::env::var(LOG_FORMAT_ENV) {
            Ok(v) if v.trim().eq_ignore_ascii_case("json") => LogFormat::Json,
            _ => LogFormat::Text,
        }
    }
}

/// Default filter directive for a `-v` count.
pub fn level_for_verbosity(verbose: u8) -> &'static str {
    match verbose {
        0 => "warn",
        1 => "info",
        2 => "debug",
        _ => "trace",
    }
}

/// Filter directive from the environment, falling back to the `-v` count.
fn filter_directive(verbose: u8) -> String {
    std::env::var(LOG_ENV)
        .or_else(|_| std::env::var("RUST_LOG"))
        .unwrap_or_else(|_| level_for_verbosity(verbose).to_string())
}

/// Install the global subscriber. Later calls are no-ops.
pub fn init(verbose: u8) {
    LOGGER_INITIALIZED.get_or_init(|| {
        let directive = filter_directive(verbose);
        let filter = EnvFilter::try_new(&directive).unwrap_or_else(|_| EnvFilter::new("warn"));

        let layer = match LogFormat::from_env() {
            LogFormat::Json => fmt::layer()
                .with_writer(std::io::stderr)
                .with_target(true)
                .json()
                .with_filter(filter)
                .boxed(),
            LogFormat::Text => fmt::layer()
                .with_writer(std::io::stderr)
                .with_target(true)
                .with_ansi(false)
                .without_time()
                .with_filter(filter)
                .boxed(),
        };

        // Another subscriber may already be installed (e.g. by a test harness).
        if tracing_subscriber::registry().with(layer).try_init().is_err() {
            tracing::debug!("global tracing subscriber already installed");
        }
    });
}
