//! Configuration loading

use std::fs;
use std::path::{Path, PathBuf};

use crate::error::{CapconfError, CapconfResult};

use super::env_validator::{levenshtein, EnvVarValidator};
use super::types::{Config, Verbosity};

/// Project-level config file name, looked up in the working directory.
pub const PROJECT_CONFIG_FILE: &str = ".capconf.toml";

/// Non-fatal configuration warning surfaced to CLI users.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ConfigWarning {
    pub key: String,
    pub file: PathBuf,
    pub line: Option<usize>,
    pub suggestion: Option<String>,
}

/// Load configuration and collect non-fatal warnings (e.g. unknown keys).
pub fn load_with_warnings(path: &Path) -> CapconfResult<(Config, Vec<ConfigWarning>)> {
    let content = fs::read_to_string(path)?;

    let mut unknown_paths: Vec<String> = Vec::new();
    let deserializer = toml::de::Deserializer::new(&content);

    let config: Config = serde_ignored::deserialize(deserializer, |p| {
        unknown_paths.push(p.to_string());
    })
    .map_err(|e| CapconfError::InvalidConfig {
        file: path.to_path_buf(),
        message: e.to_string(),
    })?;

    let warnings = unknown_paths
        .into_iter()
        .map(|path_str| {
            let key = path_str
                .split('.')
                .next_back()
                .unwrap_or(path_str.as_str())
                .to_string();
            ConfigWarning {
                key: key.clone(),
                file: path.to_path_buf(),
                line: find_line_number(&content, &key),
                suggestion: suggest_key(&key),
            }
        })
        .collect();

    Ok((config, warnings))
}

/// Candidate config files, highest precedence first.
pub fn config_candidates(project_root: Option<&Path>) -> Vec<PathBuf> {
    let mut candidates = Vec::new();
    if let Some(root) = project_root {
        candidates.push(root.join(PROJECT_CONFIG_FILE));
    }
    if let Some(dir) = dirs::config_dir() {
        candidates.push(dir.join("capconf").join("config.toml"));
    }
    candidates
}

/// Load the first existing config file, falling back to defaults, then
/// apply env overrides. Unreadable files are reported as warnings.
pub fn load_or_default_with_warnings(
    project_root: Option<&Path>,
) -> (Config, Vec<ConfigWarning>) {
    for candidate in config_candidates(project_root) {
        if !candidate.exists() {
            continue;
        }
        match load_with_warnings(&candidate) {
            Ok((config, warnings)) => {
                tracing::debug!(path = %candidate.display(), "loaded configuration");
                return (with_env_overrides(config), warnings);
            }
            Err(err) => {
                tracing::warn!(path = %candidate.display(), error = %err, "ignoring unreadable configuration");
            }
        }
    }
    (with_env_overrides(Config::default()), Vec::new())
}

/// Load from project config, user config, or defaults
pub fn load_or_default(project_root: Option<&Path>) -> Config {
    load_or_default_with_warnings(project_root).0
}

/// Apply environment variable overrides (CAPCONF_* prefix)
pub fn with_env_overrides(config: Config) -> Config {
    apply_overrides(config, |name| std::env::var(name).ok(), &mut std::io::stderr())
}

/// Apply overrides read through `lookup`; warnings go to `writer`.
pub(crate) fn apply_overrides<W: std::io::Write>(
    mut config: Config,
    lookup: impl Fn(&str) -> Option<String>,
    writer: &mut W,
) -> Config {
    if let Some(raw) = lookup("CAPCONF_LEGACY_MODE") {
        let current = config.validation.legacy_mode;
        config.validation.legacy_mode = EnvVarValidator::new("CAPCONF_LEGACY_MODE", BOOL_NAMES)
            .parse_with_writer(&raw, |s| parse_bool(s).map(Some), current, writer);
    }

    if let Some(raw) = lookup("CAPCONF_VERBOSITY") {
        let current = config.output.verbosity;
        config.output.verbosity = EnvVarValidator::new("CAPCONF_VERBOSITY", Verbosity::NAMES)
            .parse_with_writer(&raw, Verbosity::parse, current, writer);
    }

    // Comma-separated; an empty value declares a cluster without labels.
    if let Some(raw) = lookup("CAPCONF_NODE_LABELS") {
        config.node_labels.known = Some(
            raw.split(',')
                .map(str::trim)
                .filter(|s| !s.is_empty())
                .map(str::to_string)
                .collect(),
        );
    }

    if let Some(prefix) = lookup("CAPCONF_KEY_PREFIX") {
        config.parser.key_prefix = prefix;
    }

    config
}

const BOOL_NAMES: &[&str] = &["true", "false"];

fn parse_bool(s: &str) -> Option<bool> {
    match s.trim().to_lowercase().as_str() {
        "true" | "1" | "yes" => Some(true),
        "false" | "0" | "no" => Some(false),
        _ => None,
    }
}

fn find_line_number(content: &str, needle: &str) -> Option<usize> {
    content
        .lines()
        .position(|line| line.contains(needle))
        .map(|i| i + 1)
}

fn suggest_key(unknown: &str) -> Option<String> {
    const CANDIDATES: &[&str] = &[
        "parser",
        "key_prefix",
        "validation",
        "legacy_mode",
        "strict_warnings",
        "node_labels",
        "known",
        "output",
        "verbosity",
        "color",
        "unicode",
    ];

    let mut best: Option<(&str, usize)> = None;
    for candidate in CANDIDATES {
        let dist = levenshtein(unknown, candidate);
        best = match best {
            None => Some((candidate, dist)),
            Some((_, best_dist)) if dist < best_dist => Some((candidate, dist)),
            Some(current) => Some(current),
        };
    }

    match best {
        Some((candidate, dist)) if dist <= 2 => Some(candidate.to_string()),
        _ => None,
    }
}
