//! Command handlers
//!
//! Each handler loads the tool configuration, reads its input file and
//! either renders text or streams NDJSON events. Handlers exit with
//! status 1 themselves when the input has blocking problems; `Err` is
//! reserved for I/O and input-format failures.

mod export;
mod parse;
mod project_root;
mod validate;

pub use export::cmd_export;
pub use parse::cmd_parse;
pub use validate::{cmd_validate, ValidateArgs};

use std::path::Path;

use anyhow::Result;
use capconf::config::{load_or_default_with_warnings, Config};
use capconf::{load_flat_config, ParseResult};

use crate::cli::ColorWhen;
use crate::ui::context::UiContext;

/// Configuration and presentation settings for one run.
pub(crate) struct Session {
    pub config: Config,
    pub ui: UiContext,
}

impl Session {
    pub fn load(json: bool, verbose: u8, color: Option<ColorWhen>) -> Result<Self> {
        let cwd = std::env::current_dir()?;
        let project_root = project_root::discover_project_root(&cwd);
        let (config, warnings) = load_or_default_with_warnings(Some(&project_root));
        crate::ui::output::print_config_warnings(&warnings);

        let ui = UiContext::new(json, verbose, color, &config);
        Ok(Self { config, ui })
    }

    /// Read `file` and parse it with the configured key prefix.
    pub fn parse_input(&self, file: &Path) -> Result<ParseResult> {
        let flat = load_flat_config(file)?;
        let result = self.config.config_parser().parse(&flat);
        tracing::info!(
            file = %file.display(),
            queues = result.queue_count(),
            errors = result.errors().len(),
            warnings = result.warnings().len(),
            "parsed flat configuration"
        );
        Ok(result)
    }
}

/// NDJSON form of a parse error or warning.
pub(crate) fn issue_event(
    command: &str,
    severity: &str,
    issue: &capconf::ParseIssue,
) -> serde_json::Value {
    serde_json::json!({
        "event": "issue",
        "command": command,
        "severity": severity,
        "kind": issue.kind,
        "queue_path": issue.queue_path,
        "message": issue.message,
    })
}

pub(crate) fn emit_parse_issues(out: &mut impl std::io::Write, command: &str, result: &ParseResult) {
    let errors = result.errors().iter().map(|i| ("error", i));
    let warnings = result.warnings().iter().map(|i| ("warning", i));
    for (severity, issue) in errors.chain(warnings) {
        let _ = crate::ui::json::write_event(out, &issue_event(command, severity, issue));
    }
}
