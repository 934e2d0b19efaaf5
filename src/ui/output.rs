use capconf::config::ConfigWarning;

/// Print unknown-key warnings from the tool configuration to stderr.
/// Stdout is left alone so `--json` output stays a clean event stream.
pub fn print_config_warnings(warnings: &[ConfigWarning]) {
    for w in warnings {
        eprintln!("{}", format_config_warning(w));
    }
}

fn format_config_warning(w: &ConfigWarning) -> String {
    let location = match w.line {
        Some(line) => format!("{}:{}", w.file.display(), line),
        None => w.file.display().to_string(),
    };
    let mut out = format!("Unknown config key '{}' in {}", w.key, location);
    if let Some(suggestion) = &w.suggestion {
        out.push_str(&format!("\n   Did you mean '{}'?", suggestion));
    }
    out
}
