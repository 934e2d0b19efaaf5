//! Validation context
//!
//! Everything the rules need besides the tree itself: the legacy-mode
//! flag, the cluster's node labels, live queue metrics, and edits staged
//! but not yet applied.

use std::collections::{BTreeSet, HashMap, HashSet};

use serde::Deserialize;

use crate::domain::entities::{ParseResult, ParsedQueue};
use crate::domain::services::DEFAULT_LEGACY_MODE;
use crate::domain::value_objects::property_key;
use crate::domain::value_objects::CapacityMode;

/// Node labels known to exist in the cluster.
///
/// The empty (default partition) label is always present.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct NodeLabelInventory {
    labels: BTreeSet<String>,
}

impl NodeLabelInventory {
    pub fn new<I, S>(labels: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        let mut labels: BTreeSet<String> = labels
            .into_iter()
            .map(|l| l.into().trim().to_string())
            .collect();
        labels.insert(String::new());
        Self { labels }
    }

    pub fn contains(&self, label: &str) -> bool {
        self.labels.contains(label.trim())
    }

    /// All labels in sorted order, the default label first.
    pub fn labels(&self) -> Vec<String> {
        self.labels.iter().cloned().collect()
    }
}

impl Default for NodeLabelInventory {
    fn default() -> Self {
        Self::new(Vec::<String>::new())
    }
}

/// Live metrics of one queue.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Deserialize)]
pub struct QueueMetrics {
    #[serde(default)]
    pub running_applications: u64,
}

/// Edits staged against the configuration but not yet applied.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct StagedChanges {
    pending_deletes: HashSet<String>,
    mode_overrides: HashMap<String, CapacityMode>,
}

impl StagedChanges {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn with_pending_delete(mut self, path: impl Into<String>) -> Self {
        self.pending_deletes.insert(path.into());
        self
    }

    pub fn with_mode_override(mut self, path: impl Into<String>, mode: CapacityMode) -> Self {
        self.mode_overrides.insert(path.into(), mode);
        self
    }

    /// True if the queue itself is marked for deletion.
    pub fn is_pending_delete(&self, path: &str) -> bool {
        self.pending_deletes.contains(path)
    }

    /// True if the queue or one of its ancestors is marked for deletion.
    pub fn is_removed(&self, path: &str) -> bool {
        self.is_pending_delete(path)
            || property_key::segment_prefixes(path).any(|p| self.pending_deletes.contains(p))
    }

    pub fn mode_override(&self, path: &str) -> Option<CapacityMode> {
        self.mode_overrides.get(path).copied()
    }

    pub fn is_empty(&self) -> bool {
        self.pending_deletes.is_empty() && self.mode_overrides.is_empty()
    }
}

/// Inputs shared by every rule of a validation pass.
#[derive(Debug, Clone, PartialEq)]
pub struct ValidationContext {
    legacy_mode: bool,
    node_labels: Option<NodeLabelInventory>,
    metrics: HashMap<String, QueueMetrics>,
    staged: StagedChanges,
}

impl Default for ValidationContext {
    fn default() -> Self {
        Self {
            legacy_mode: DEFAULT_LEGACY_MODE,
            node_labels: None,
            metrics: HashMap::new(),
            staged: StagedChanges::default(),
        }
    }
}

impl ValidationContext {
    pub fn new() -> Self {
        Self::default()
    }

    /// Context carrying the legacy flag detected by the parser.
    pub fn from_parse(result: &ParseResult) -> Self {
        Self::default().with_legacy_mode(result.is_legacy_mode())
    }

    pub fn with_legacy_mode(mut self, legacy_mode: bool) -> Self {
        self.legacy_mode = legacy_mode;
        self
    }

    pub fn with_node_labels(mut self, inventory: NodeLabelInventory) -> Self {
        self.node_labels = Some(inventory);
        self
    }

    pub fn with_queue_metrics(mut self, path: impl Into<String>, metrics: QueueMetrics) -> Self {
        self.metrics.insert(path.into(), metrics);
        self
    }

    pub fn with_staged_changes(mut self, staged: StagedChanges) -> Self {
        self.staged = staged;
        self
    }

    pub fn is_legacy_mode(&self) -> bool {
        self.legacy_mode
    }

    /// Cluster node labels, if runtime information was supplied.
    pub fn node_labels(&self) -> Option<&NodeLabelInventory> {
        self.node_labels.as_ref()
    }

    pub fn staged(&self) -> &StagedChanges {
        &self.staged
    }

    pub fn running_applications(&self, path: &str) -> u64 {
        self.metrics
            .get(path)
            .map(|m| m.running_applications)
            .unwrap_or(0)
    }

    /// Staged mode override if any, else the mode of the capacity string.
    pub fn effective_mode(&self, queue: &ParsedQueue) -> CapacityMode {
        self.staged
            .mode_override(&queue.path)
            .unwrap_or_else(|| queue.capacity.mode())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn inventory_always_has_default_label() {
        let inventory = NodeLabelInventory::new(["gpu"]);
        assert!(inventory.contains(""));
        assert!(inventory.contains("gpu"));
        assert!(!inventory.contains("ssd"));
        assert_eq!(inventory.labels(), vec!["".to_string(), "gpu".to_string()]);
    }

    #[test]
    fn removed_covers_descendants() {
        let staged = StagedChanges::new().with_pending_delete("root.a");
        assert!(staged.is_pending_delete("root.a"));
        assert!(staged.is_removed("root.a.x"));
        assert!(!staged.is_pending_delete("root.a.x"));
        assert!(!staged.is_removed("root.ab"));
        assert!(!staged.is_removed("root"));
    }

    #[test]
    fn effective_mode_prefers_override() {
        let queue = ParsedQueue::new("root.a").with_capacity("40");
        let ctx = ValidationContext::new();
        assert_eq!(ctx.effective_mode(&queue), CapacityMode::Percentage);

        let ctx = ValidationContext::new().with_staged_changes(
            StagedChanges::new().with_mode_override("root.a", CapacityMode::Weight),
        );
        assert_eq!(ctx.effective_mode(&queue), CapacityMode::Weight);
    }

    #[test]
    fn default_context_is_legacy_without_labels() {
        let ctx = ValidationContext::default();
        assert!(ctx.is_legacy_mode());
        assert!(ctx.node_labels().is_none());
        assert_eq!(ctx.running_applications("root.a"), 0);
    }
}
