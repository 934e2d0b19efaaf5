//! Domain Services
//!
//! Stateless services over the queue model. No I/O: callers hand in the
//! flat configuration and get values back.

mod config_parser;
mod config_writer;

pub use config_parser::{
    parse_flat_config, ConfigParser, FlatConfig, DEFAULT_KEY_PREFIX, DEFAULT_LEGACY_MODE,
};
pub use config_writer::{to_flat_config, with_key_prefix};
