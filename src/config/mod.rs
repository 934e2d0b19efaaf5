//! Tool configuration
//!
//! Resolution order:
//! 1. CLI flags (highest priority)
//! 2. Environment variables (CAPCONF_*)
//! 3. Project config (.capconf.toml)
//! 4. User config (<config_dir>/capconf/config.toml)
//! 5. Built-in defaults (lowest priority)

mod env_validator;
mod loader;
mod types;

pub use env_validator::{levenshtein, EnvVarValidator, EnvVarWarning};
pub use loader::{
    config_candidates, load_or_default_with_warnings, ConfigWarning, PROJECT_CONFIG_FILE,
};
pub use types::{
    ColorMode, Config, NodeLabelsConfig, OutputConfig, ParserConfig, ValidationConfig, Verbosity,
};
