//! Validation
//!
//! Rule-based checks over a parsed queue hierarchy.
//!
//! ## Structure
//!
//! - `types` - Findings and their structured details
//! - `context` - Legacy flag, node labels, metrics and staged changes
//! - `rules/` - One module per rule
//! - `pipeline` - Ordered execution with failure isolation
//! - `report` - Aggregated findings

mod context;
mod pipeline;
mod report;
pub mod rules;
mod types;

pub use context::{NodeLabelInventory, QueueMetrics, StagedChanges, ValidationContext};
pub use pipeline::{validate_parse_result, ValidationPipeline};
pub use report::{ValidationReport, ValidationSink};
pub use rules::{RuleError, ValidationRule};
pub use types::{ErrorDetails, Severity, ValidationError, ValidationErrorKind};
