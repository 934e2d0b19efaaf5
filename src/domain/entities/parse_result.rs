//! Parse result entity
//!
//! Everything one parse of a flat configuration produced: the queue tree,
//! the global properties, and the problems found along the way.

use std::collections::BTreeMap;
use std::fmt;

use serde::Serialize;

use super::queue::ParsedQueue;

/// Kind of problem found while interpreting a flat configuration.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize)]
#[serde(rename_all = "SCREAMING_SNAKE_CASE")]
pub enum ParseIssueKind {
    NoRootQueue,
    CapacityOutOfRange,
    MaximumCapacityOutOfRange,
    InvalidCapacity,
    NonPositiveWeight,
    CapacitySumMismatch,
    InvalidPropertyValue,
    DuplicateQueueDeclaration,
    InvalidLegacyModeFlag,
}

impl ParseIssueKind {
    pub fn as_str(&self) -> &'static str {
        match self {
            ParseIssueKind::NoRootQueue => "NO_ROOT_QUEUE",
            ParseIssueKind::CapacityOutOfRange => "CAPACITY_OUT_OF_RANGE",
            ParseIssueKind::MaximumCapacityOutOfRange => "MAXIMUM_CAPACITY_OUT_OF_RANGE",
            ParseIssueKind::InvalidCapacity => "INVALID_CAPACITY",
            ParseIssueKind::NonPositiveWeight => "NON_POSITIVE_WEIGHT",
            ParseIssueKind::CapacitySumMismatch => "CAPACITY_SUM_MISMATCH",
            ParseIssueKind::InvalidPropertyValue => "INVALID_PROPERTY_VALUE",
            ParseIssueKind::DuplicateQueueDeclaration => "DUPLICATE_QUEUE_DECLARATION",
            ParseIssueKind::InvalidLegacyModeFlag => "INVALID_LEGACY_MODE_FLAG",
        }
    }
}

impl fmt::Display for ParseIssueKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.as_str())
    }
}

/// A single parse error or warning.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct ParseIssue {
    pub kind: ParseIssueKind,
    pub message: String,
    /// Queue the issue concerns; `None` for configuration-wide issues.
    pub queue_path: Option<String>,
}

impl ParseIssue {
    pub fn new(kind: ParseIssueKind, message: impl Into<String>) -> Self {
        Self {
            kind,
            message: message.into(),
            queue_path: None,
        }
    }

    pub fn for_queue(kind: ParseIssueKind, path: &str, message: impl Into<String>) -> Self {
        Self {
            kind,
            message: message.into(),
            queue_path: Some(path.to_string()),
        }
    }
}

impl fmt::Display for ParseIssue {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match &self.queue_path {
            Some(path) => write!(f, "{}: {}", path, self.message),
            None => write!(f, "{}", self.message),
        }
    }
}

/// Outcome of one parse. Built once by the parser and read-only afterwards.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct ParseResult {
    queues: Vec<ParsedQueue>,
    global_properties: BTreeMap<String, String>,
    errors: Vec<ParseIssue>,
    warnings: Vec<ParseIssue>,
    is_legacy_mode: bool,
}

impl ParseResult {
    pub(crate) fn new(
        queues: Vec<ParsedQueue>,
        global_properties: BTreeMap<String, String>,
        errors: Vec<ParseIssue>,
        warnings: Vec<ParseIssue>,
        is_legacy_mode: bool,
    ) -> Self {
        Self {
            queues,
            global_properties,
            errors,
            warnings,
            is_legacy_mode,
        }
    }

    /// Root queues of the tree (exactly one after a successful parse).
    pub fn queues(&self) -> &[ParsedQueue] {
        &self.queues
    }

    pub fn root(&self) -> Option<&ParsedQueue> {
        self.queues.first()
    }

    pub fn global_properties(&self) -> &BTreeMap<String, String> {
        &self.global_properties
    }

    pub fn errors(&self) -> &[ParseIssue] {
        &self.errors
    }

    pub fn warnings(&self) -> &[ParseIssue] {
        &self.warnings
    }

    pub fn is_legacy_mode(&self) -> bool {
        self.is_legacy_mode
    }

    pub fn has_errors(&self) -> bool {
        !self.errors.is_empty()
    }

    pub fn find_queue(&self, path: &str) -> Option<&ParsedQueue> {
        self.queues.iter().find_map(|q| q.find(path))
    }

    pub fn queue_count(&self) -> usize {
        self.queues.iter().map(ParsedQueue::subtree_len).sum()
    }

    /// Consume the result, keeping only the queue tree.
    pub fn into_queues(self) -> Vec<ParsedQueue> {
        self.queues
    }
}
