//! Domain Entities
//!
//! - `ParsedQueue` - A node of the reconstructed queue hierarchy
//! - `ParseResult` - The tree, global properties and issues from one parse

mod parse_result;
mod queue;

pub use parse_result::{ParseIssue, ParseIssueKind, ParseResult};
pub use queue::{NodeLabelCapacity, ParsedQueue, QueueIter};
