//! capconf - capacity scheduler configuration parser and validator
//!
//! Turns the flat key/value configuration of a hierarchical capacity
//! scheduler into a typed queue tree, then checks the tree with a set of
//! validation rules before it is submitted to a cluster.
//!
//! ```
//! use std::collections::BTreeMap;
//! use capconf::{parse_flat_config, validate_parse_result};
//!
//! let mut flat = BTreeMap::new();
//! flat.insert("root.queues".to_string(), "prod,dev".to_string());
//! flat.insert("root.prod.capacity".to_string(), "70".to_string());
//! flat.insert("root.dev.capacity".to_string(), "30".to_string());
//!
//! let parsed = parse_flat_config(&flat);
//! assert!(!parsed.has_errors());
//! assert_eq!(parsed.queue_count(), 3);
//!
//! let report = validate_parse_result(&parsed);
//! assert!(report.is_success());
//! ```

pub mod config;
pub mod domain;
pub mod error;
pub mod input;
pub mod logging;
pub mod validation;

// Re-exports for convenience
pub use config::Config;
pub use domain::entities::{ParseIssue, ParseIssueKind, ParseResult, ParsedQueue};
pub use domain::services::{parse_flat_config, to_flat_config, ConfigParser, FlatConfig};
pub use domain::value_objects::{CapacityMode, CapacityValue, QueueState};
pub use error::{CapconfError, CapconfResult};
pub use input::{load_flat_config, RuntimeContext};
pub use validation::{
    validate_parse_result, ValidationContext, ValidationError, ValidationErrorKind,
    ValidationPipeline, ValidationReport,
};
