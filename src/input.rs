//! Input loading
//!
//! Reads flat scheduler configurations and runtime context files from disk.
//! Flat configurations come either as a JSON object or as Java-properties
//! style `key=value` text; the file extension decides which.

use std::collections::{HashMap, HashSet};
use std::fs;
use std::path::Path;

use serde::Deserialize;

use crate::domain::services::FlatConfig;
use crate::domain::value_objects::CapacityMode;
use crate::error::{CapconfError, CapconfResult};
use crate::validation::{NodeLabelInventory, QueueMetrics, ValidationContext};

/// Supported flat configuration formats.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum InputFormat {
    Json,
    Properties,
}

impl InputFormat {
    /// `.json` files are JSON, everything else is properties text.
    pub fn from_path(path: &Path) -> Self {
        match path.extension().and_then(|e| e.to_str()) {
            Some(ext) if ext.eq_ignore_ascii_case("json") => InputFormat::Json,
            _ => InputFormat::Properties,
        }
    }
}

/// Load a flat configuration from `path`.
pub fn load_flat_config(path: &Path) -> CapconfResult<FlatConfig> {
    if !path.exists() {
        return Err(CapconfError::InputNotFound {
            path: path.to_path_buf(),
        });
    }
    let content = fs::read_to_string(path)?;
    let config = match InputFormat::from_path(path) {
        InputFormat::Json => parse_json_flat(&content, path)?,
        InputFormat::Properties => parse_properties(&content, path)?,
    };
    tracing::debug!(path = %path.display(), keys = config.len(), "loaded flat configuration");
    Ok(config)
}

/// Parse a JSON object whose values are strings, numbers or booleans.
pub fn parse_json_flat(content: &str, file: &Path) -> CapconfResult<FlatConfig> {
    let value: serde_json::Value = serde_json::from_str(content)?;
    let invalid = |message: String| CapconfError::InvalidFlatConfig {
        file: file.to_path_buf(),
        message,
    };

    let serde_json::Value::Object(map) = value else {
        return Err(invalid("top-level value must be an object".to_string()));
    };

    map.into_iter()
        .map(|(key, value)| {
            let text = match value {
                serde_json::Value::String(s) => s,
                serde_json::Value::Number(n) => n.to_string(),
                serde_json::Value::Bool(b) => b.to_string(),
                other => {
                    return Err(invalid(format!(
                        "value of '{}' must be a string, number or boolean, found {}",
                        key,
                        json_type_name(&other)
                    )))
                }
            };
            Ok((key, text))
        })
        .collect()
}

/// Parse Java-properties text.
///
/// The key ends at the first `=`, `:` or whitespace; whitespace around the
/// separator is ignored, so `key=value`, `key: value` and `key value` are
/// all accepted. Blank lines and lines starting with `#` or `!` are
/// skipped. A line ending in `\` continues on the next line. Later
/// duplicates win. A line holding only a key has no separator and is
/// rejected.
pub fn parse_properties(content: &str, file: &Path) -> CapconfResult<FlatConfig> {
    let mut config = FlatConfig::new();
    let mut lines = content.lines().enumerate();

    while let Some((index, line)) = lines.next() {
        let trimmed = line.trim();
        if trimmed.is_empty() || trimmed.starts_with('#') || trimmed.starts_with('!') {
            continue;
        }

        let mut logical = trimmed.to_string();
        while logical.ends_with('\\') {
            logical.pop();
            match lines.next() {
                Some((_, next)) => logical.push_str(next.trim_start()),
                None => break,
            }
        }

        let (key, value) = split_property(&logical).ok_or_else(|| {
            CapconfError::MalformedProperty {
                file: file.to_path_buf(),
                line: index + 1,
                content: trimmed.to_string(),
            }
        })?;
        config.insert(key.to_string(), value.to_string());
    }

    Ok(config)
}

/// Split one logical line into key and value. `None` when the key is
/// empty or nothing follows it.
fn split_property(line: &str) -> Option<(&str, &str)> {
    let key_end = line.find(|c: char| c == '=' || c == ':' || c.is_whitespace())?;
    let key = &line[..key_end];
    if key.is_empty() {
        return None;
    }

    let rest = line[key_end..].trim_start();
    let value = rest.strip_prefix(['=', ':']).unwrap_or(rest);
    Some((key, value.trim()))
}

fn json_type_name(value: &serde_json::Value) -> &'static str {
    match value {
        serde_json::Value::Null => "null",
        serde_json::Value::Bool(_) => "boolean",
        serde_json::Value::Number(_) => "number",
        serde_json::Value::String(_) => "string",
        serde_json::Value::Array(_) => "array",
        serde_json::Value::Object(_) => "object",
    }
}

/// Cluster state and staged edits supplied alongside a configuration.
///
/// ```json
/// {
///   "node_labels": ["gpu"],
///   "queue_metrics": { "root.a": { "running_applications": 3 } },
///   "pending_deletes": ["root.b"],
///   "mode_overrides": { "root.c": "weight" }
/// }
/// ```
#[derive(Debug, Clone, Default, PartialEq, Eq, Deserialize)]
#[serde(deny_unknown_fields)]
pub struct RuntimeContext {
    #[serde(default)]
    pub node_labels: Option<Vec<String>>,
    #[serde(default)]
    pub queue_metrics: HashMap<String, QueueMetrics>,
    #[serde(default)]
    pub pending_deletes: HashSet<String>,
    #[serde(default)]
    pub mode_overrides: HashMap<String, CapacityMode>,
}

impl RuntimeContext {
    pub fn from_json(content: &str, file: &Path) -> CapconfResult<Self> {
        serde_json::from_str(content).map_err(|e| CapconfError::InvalidRuntimeContext {
            file: file.to_path_buf(),
            message: e.to_string(),
        })
    }

    pub fn load(path: &Path) -> CapconfResult<Self> {
        if !path.exists() {
            return Err(CapconfError::InputNotFound {
                path: path.to_path_buf(),
            });
        }
        Self::from_json(&fs::read_to_string(path)?, path)
    }

    /// Merge into `ctx`. Labels given here replace any already set.
    pub fn apply(self, mut ctx: ValidationContext) -> ValidationContext {
        if let Some(labels) = self.node_labels {
            ctx = ctx.with_node_labels(NodeLabelInventory::new(labels));
        }
        for (path, metrics) in self.queue_metrics {
            ctx = ctx.with_queue_metrics(path, metrics);
        }

        let mut staged = ctx.staged().clone();
        for path in self.pending_deletes {
            staged = staged.with_pending_delete(path);
        }
        for (path, mode) in self.mode_overrides {
            staged = staged.with_mode_override(path, mode);
        }
        ctx.with_staged_changes(staged)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::path::PathBuf;
    use tempfile::tempdir;

    fn file() -> PathBuf {
        PathBuf::from("capacity-scheduler.properties")
    }

    #[test]
    fn format_from_extension() {
        assert_eq!(InputFormat::from_path(Path::new("a.json")), InputFormat::Json);
        assert_eq!(InputFormat::from_path(Path::new("a.JSON")), InputFormat::Json);
        assert_eq!(
            InputFormat::from_path(Path::new("a.properties")),
            InputFormat::Properties
        );
        assert_eq!(InputFormat::from_path(Path::new("conf")), InputFormat::Properties);
    }

    #[test]
    fn properties_with_comments_and_separators() {
        let text = "# comment\n! also comment\n\nroot.queues = a,b\nroot.a.capacity:40\n  root.b.capacity=60  \n";
        let config = parse_properties(text, &file()).unwrap();
        assert_eq!(config.len(), 3);
        assert_eq!(config["root.queues"], "a,b");
        assert_eq!(config["root.a.capacity"], "40");
        assert_eq!(config["root.b.capacity"], "60");
    }

    #[test]
    fn properties_whitespace_separator() {
        let text = "root.queues a,b\nroot.a.capacity\t40\nroot.b.capacity  =  60\n";
        let config = parse_properties(text, &file()).unwrap();
        assert_eq!(config["root.queues"], "a,b");
        assert_eq!(config["root.a.capacity"], "40");
        assert_eq!(config["root.b.capacity"], "60");
    }

    #[test]
    fn properties_empty_key_is_malformed() {
        let err = parse_properties("= 40\n", &file()).unwrap_err();
        assert!(matches!(err, CapconfError::MalformedProperty { line: 1, .. }));
    }

    #[test]
    fn properties_value_keeps_later_separators() {
        let config = parse_properties("root.a.capacity=[memory=1024,vcores=2]\n", &file()).unwrap();
        assert_eq!(config["root.a.capacity"], "[memory=1024,vcores=2]");
    }

    #[test]
    fn properties_line_continuation() {
        let text = "root.queues=a,\\\n    b,c\n";
        let config = parse_properties(text, &file()).unwrap();
        assert_eq!(config["root.queues"], "a,b,c");
    }

    #[test]
    fn properties_malformed_line_reports_line_number() {
        let err = parse_properties("root.queues=a\njust-a-key\n", &file()).unwrap_err();
        match err {
            CapconfError::MalformedProperty { line, content, .. } => {
                assert_eq!(line, 2);
                assert_eq!(content, "just-a-key");
            }
            other => panic!("unexpected error {:?}", other),
        }
    }

    #[test]
    fn json_scalars_are_stringified() {
        let json = r#"{"root.queues": "a", "root.a.capacity": 100, "root.a.disable_preemption": true}"#;
        let config = parse_json_flat(json, Path::new("c.json")).unwrap();
        assert_eq!(config["root.a.capacity"], "100");
        assert_eq!(config["root.a.disable_preemption"], "true");
    }

    #[test]
    fn json_rejects_nested_values() {
        let err = parse_json_flat(r#"{"root": {"queues": "a"}}"#, Path::new("c.json")).unwrap_err();
        assert!(matches!(err, CapconfError::InvalidFlatConfig { .. }));

        let err = parse_json_flat("[1, 2]", Path::new("c.json")).unwrap_err();
        assert!(err.to_string().contains("must be an object"));
    }

    #[test]
    fn load_missing_file() {
        let err = load_flat_config(Path::new("/definitely/not/here.json")).unwrap_err();
        assert!(matches!(err, CapconfError::InputNotFound { .. }));
    }

    #[test]
    fn load_dispatches_on_extension() {
        let dir = tempdir().unwrap();
        let json = dir.path().join("conf.json");
        fs::write(&json, r#"{"root.queues": "a"}"#).unwrap();
        let props = dir.path().join("conf.properties");
        fs::write(&props, "root.queues=a\n").unwrap();

        assert_eq!(load_flat_config(&json).unwrap(), load_flat_config(&props).unwrap());
    }

    #[test]
    fn runtime_context_applies_to_validation_context() {
        let json = r#"{
            "node_labels": ["gpu"],
            "queue_metrics": {"root.a": {"running_applications": 3}},
            "pending_deletes": ["root.b"],
            "mode_overrides": {"root.c": "weight"}
        }"#;
        let runtime = RuntimeContext::from_json(json, Path::new("ctx.json")).unwrap();
        let ctx = runtime.apply(ValidationContext::new());

        assert!(ctx.node_labels().unwrap().contains("gpu"));
        assert_eq!(ctx.running_applications("root.a"), 3);
        assert!(ctx.staged().is_pending_delete("root.b"));
        assert_eq!(ctx.staged().mode_override("root.c"), Some(CapacityMode::Weight));
    }

    #[test]
    fn runtime_context_rejects_unknown_fields() {
        let err = RuntimeContext::from_json(r#"{"labels": []}"#, Path::new("ctx.json")).unwrap_err();
        assert!(matches!(err, CapconfError::InvalidRuntimeContext { .. }));
    }

    #[test]
    fn empty_runtime_context_leaves_labels_unset() {
        let runtime = RuntimeContext::from_json("{}", Path::new("ctx.json")).unwrap();
        let ctx = runtime.apply(ValidationContext::new());
        assert!(ctx.node_labels().is_none());
        assert!(ctx.staged().is_empty());
    }
}
