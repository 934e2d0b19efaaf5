use std::path::PathBuf;

use anyhow::Result;
use capconf::config::Config;
use capconf::{ParseResult, RuntimeContext, ValidationContext, ValidationPipeline, ValidationReport};

use super::Session;
use crate::cli::ColorWhen;
use crate::ui::json::write_event;
use crate::ui::views::{parse as parse_view, validate as view};

/// Options of `capconf validate`.
#[derive(Debug, Clone, Default)]
pub struct ValidateArgs {
    pub file: PathBuf,
    pub context: Option<PathBuf>,
    pub legacy: bool,
    pub flexible: bool,
    pub strict_warnings: bool,
}

impl ValidateArgs {
    /// `--legacy`/`--flexible` beat the config file, which beats the flag
    /// derived from the input.
    fn legacy_override(&self, config: &Config) -> Option<bool> {
        if self.legacy {
            Some(true)
        } else if self.flexible {
            Some(false)
        } else {
            config.validation.legacy_mode
        }
    }
}

/// Context from the parse, then tool configuration, then the runtime
/// context file.
fn build_context(
    args: &ValidateArgs,
    config: &Config,
    result: &ParseResult,
) -> Result<ValidationContext> {
    let mut ctx = ValidationContext::from_parse(result);
    if let Some(legacy) = args.legacy_override(config) {
        ctx = ctx.with_legacy_mode(legacy);
    }
    if let Some(inventory) = config.node_label_inventory() {
        ctx = ctx.with_node_labels(inventory);
    }
    if let Some(path) = &args.context {
        ctx = RuntimeContext::load(path)?.apply(ctx);
    }
    Ok(ctx)
}

/// Exit status decision: parse errors and error findings always fail;
/// with `strict`, any warning does too.
fn has_issues(result: &ParseResult, report: &ValidationReport, strict: bool) -> bool {
    let blocking = result.has_errors() || report.has_blocking_errors();
    let warned = !result.warnings().is_empty() || report.warning_count() > 0;
    blocking || (strict && warned)
}

pub fn cmd_validate(
    args: ValidateArgs,
    json: bool,
    verbose: u8,
    color: Option<ColorWhen>,
) -> Result<()> {
    let session = Session::load(json, verbose, color)?;
    let ui = session.ui;
    let strict = args.strict_warnings || session.config.validation.strict_warnings;
    let file_label = args.file.display().to_string();
    let pipeline = ValidationPipeline::standard();

    let result = session.parse_input(&args.file)?;
    let ctx = build_context(&args, &session.config, &result)?;

    let report = if json {
        let mut out = std::io::stdout().lock();
        let _ = write_event(
            &mut out,
            &serde_json::json!({
                "event": "start",
                "command": "validate",
                "file": file_label,
                "legacy_mode": ctx.is_legacy_mode(),
                "strict_warnings": strict,
                "rules": pipeline.rule_names(),
            }),
        );
        super::emit_parse_issues(&mut out, "validate", &result);

        pipeline.validate_with_callback(result.queues(), &ctx, |finding| {
            let mut event = serde_json::to_value(finding).unwrap_or_default();
            if let Some(fields) = event.as_object_mut() {
                fields.insert("event".to_string(), "finding".into());
                fields.insert("command".to_string(), "validate".into());
            }
            let _ = write_event(&mut out, &event);
        })
    } else {
        if !ui.quiet {
            print!(
                "{}",
                view::render_validate_header(
                    &file_label,
                    ctx.is_legacy_mode(),
                    &pipeline.rule_names(),
                    strict,
                    ui.color,
                    ui.unicode
                )
            );
            println!();
        }
        pipeline.validate(result.queues(), &ctx)
    };

    let failed = has_issues(&result, &report, strict);

    if json {
        let mut out = std::io::stdout().lock();
        let _ = write_event(
            &mut out,
            &serde_json::json!({
                "event": "complete",
                "command": "validate",
                "parse_errors": result.errors().len(),
                "parse_warnings": result.warnings().len(),
                "errors": report.error_count(),
                "warnings": report.warning_count(),
                "strict_warnings": strict,
                "success": !failed,
            }),
        );
    } else {
        if !ui.quiet {
            let issues = parse_view::render_parse_issues(&result, ui.color, ui.unicode);
            let findings = view::render_findings(&report, ui.verbose, ui.color, ui.unicode);
            if !issues.is_empty() || !findings.is_empty() {
                println!("{}{}", issues, findings);
            }
        }
        print!(
            "{}",
            view::render_validate_summary(
                &report,
                result.errors().len(),
                failed,
                ui.color,
                ui.unicode
            )
        );
    }

    if failed {
        std::process::exit(1);
    }

    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;
    use capconf::parse_flat_config;
    use std::collections::BTreeMap;

    fn parsed(pairs: &[(&str, &str)]) -> ParseResult {
        let flat: BTreeMap<String, String> = pairs
            .iter()
            .map(|(k, v)| (k.to_string(), v.to_string()))
            .collect();
        parse_flat_config(&flat)
    }

    #[test]
    fn cli_flags_override_configured_legacy_mode() {
        let mut config = Config::default();
        config.validation.legacy_mode = Some(true);
        let result = parsed(&[("root.queues", "a"), ("root.a.capacity", "100")]);

        let args = ValidateArgs {
            flexible: true,
            ..ValidateArgs::default()
        };
        assert!(!build_context(&args, &config, &result).unwrap().is_legacy_mode());

        let args = ValidateArgs::default();
        assert!(build_context(&args, &config, &result).unwrap().is_legacy_mode());
    }

    #[test]
    fn configured_labels_feed_the_context() {
        let mut config = Config::default();
        config.node_labels.known = Some(vec!["gpu".to_string()]);
        let result = parsed(&[("root.queues", "a")]);

        let ctx = build_context(&ValidateArgs::default(), &config, &result).unwrap();
        assert!(ctx.node_labels().unwrap().contains("gpu"));
    }

    #[test]
    fn runtime_context_file_is_applied_last() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("ctx.json");
        std::fs::write(&path, r#"{"node_labels": ["ssd"]}"#).unwrap();

        let mut config = Config::default();
        config.node_labels.known = Some(vec!["gpu".to_string()]);
        let args = ValidateArgs {
            context: Some(path),
            ..ValidateArgs::default()
        };
        let ctx = build_context(&args, &config, &parsed(&[("root.queues", "a")])).unwrap();
        let labels = ctx.node_labels().unwrap();
        assert!(labels.contains("ssd"));
        assert!(!labels.contains("gpu"));
    }

    #[test]
    fn missing_runtime_context_is_an_error() {
        let args = ValidateArgs {
            context: Some(PathBuf::from("/no/such/ctx.json")),
            ..ValidateArgs::default()
        };
        let result = parsed(&[("root.queues", "a")]);
        assert!(build_context(&args, &Config::default(), &result).is_err());
    }

    #[test]
    fn strict_mode_fails_on_parse_warnings() {
        let result = parsed(&[
            ("root.queues", "a,b"),
            ("root.a.capacity", "30"),
            ("root.b.capacity", "30"),
        ]);
        assert!(!result.has_errors());
        assert!(!result.warnings().is_empty());

        let report = ValidationReport::new();
        assert!(!has_issues(&result, &report, false));
        assert!(has_issues(&result, &report, true));
    }

    #[test]
    fn strict_mode_fails_on_warning_findings() {
        use capconf::validation::{Severity, ValidationError, ValidationErrorKind};

        let result = parsed(&[("root.queues", "a"), ("root.a.capacity", "100")]);
        assert!(result.warnings().is_empty());

        let mut report = ValidationReport::new();
        report.findings.push(
            ValidationError::new(ValidationErrorKind::InvalidNodeLabel, "label not yet rolled out")
                .at("root.a")
                .with_severity(Severity::Warning),
        );
        assert!(!report.has_blocking_errors());
        assert!(!has_issues(&result, &report, false));
        assert!(has_issues(&result, &report, true));
    }
}
