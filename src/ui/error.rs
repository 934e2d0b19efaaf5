use capconf::CapconfError;

use crate::ui::blocks::error::ErrorBlock;

pub fn format_capconf_error(err: &CapconfError, supports_color: bool, supports_unicode: bool) -> String {
    match err {
        CapconfError::MalformedProperty { file, line, .. } => {
            ErrorBlock::new(file, "line holds only a key, or its key is empty")
                .with_line(*line)
                .with_file_context(2, 2)
                .with_fix("Write each property as key=value, e.g. root.queues=default")
                .render(supports_color, supports_unicode)
        }
        CapconfError::InvalidFlatConfig { file, message } => ErrorBlock::new(file, message)
            .with_fix("Use a single JSON object mapping property keys to scalar values")
            .render(supports_color, supports_unicode),
        CapconfError::InvalidRuntimeContext { file, message } => ErrorBlock::new(file, message)
            .with_fix("Allowed keys: node_labels, queue_metrics, pending_deletes, mode_overrides")
            .render(supports_color, supports_unicode),
        CapconfError::InvalidConfig { file, message } => {
            ErrorBlock::new(file, message).render(supports_color, supports_unicode)
        }
        CapconfError::InputNotFound { path } => {
            ErrorBlock::new(path, "file not found").render(supports_color, supports_unicode)
        }
        other => format!("[ERROR] {}\n", other),
    }
}

pub fn format_error(err: &anyhow::Error, supports_color: bool, supports_unicode: bool) -> String {
    match err.downcast_ref::<CapconfError>() {
        Some(capconf) => format_capconf_error(capconf, supports_color, supports_unicode),
        None => format!("[ERROR] {:#}\n", err),
    }
}

/// Report a top-level failure: an `error` event with `--json`, a boxed
/// message on stderr otherwise.
pub fn print_error(err: &anyhow::Error, json: bool) {
    if json {
        let _ = crate::ui::json::emit(serde_json::json!({
            "event": "error",
            "message": format!("{:#}", err),
        }));
        return;
    }

    let caps = crate::ui::terminal::detect_capabilities();
    eprint!("{}", format_error(err, caps.supports_color, caps.supports_unicode));
}
