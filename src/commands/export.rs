use std::path::Path;

use anyhow::Result;
use capconf::domain::services::with_key_prefix;
use capconf::{to_flat_config, FlatConfig};

use super::Session;
use crate::cli::ColorWhen;

/// Java-properties text, one `key=value` per line in key order.
pub(crate) fn render_properties(config: &FlatConfig) -> String {
    config
        .iter()
        .map(|(key, value)| format!("{}={}\n", key, value))
        .collect()
}

pub fn cmd_export(
    file: &Path,
    no_prefix: bool,
    json: bool,
    verbose: u8,
    color: Option<ColorWhen>,
) -> Result<()> {
    let session = Session::load(json, verbose, color)?;
    let result = session.parse_input(file)?;

    if result.has_errors() {
        for issue in result.errors() {
            eprintln!("[{}] {}", issue.kind, issue);
        }
        std::process::exit(1);
    }

    let mut flat = to_flat_config(&result);
    if let Some(prefix) = session.config.key_prefix().filter(|_| !no_prefix) {
        flat = with_key_prefix(flat, prefix);
    }
    tracing::debug!(keys = flat.len(), "exporting flat configuration");

    if json {
        println!("{}", serde_json::to_string_pretty(&flat)?);
    } else {
        print!("{}", render_properties(&flat));
    }
    Ok(())
}
