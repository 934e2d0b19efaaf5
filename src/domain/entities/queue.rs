//! Parsed queue entity
//!
//! One node of the reconstructed queue hierarchy.

use std::collections::BTreeMap;

use serde::Serialize;

use crate::domain::value_objects::property_key::{self, ROOT_QUEUE};
use crate::domain::value_objects::{CapacityValue, QueueState};

/// Capacities a queue is granted on a specific node label partition.
#[derive(Debug, Clone, Default, PartialEq, Serialize)]
pub struct NodeLabelCapacity {
    pub capacity: Option<CapacityValue>,
    pub maximum_capacity: Option<CapacityValue>,
}

/// A queue in the hierarchy.
///
/// `path` is the dot-joined path from `root`; a child's path is always its
/// parent's path plus `.` plus its name.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct ParsedQueue {
    pub name: String,
    pub path: String,
    pub parent: Option<String>,
    pub capacity: CapacityValue,
    pub maximum_capacity: CapacityValue,
    pub state: QueueState,
    pub maximum_applications: Option<u64>,
    pub maximum_am_resource_percent: Option<f64>,
    pub minimum_user_limit_percent: Option<f64>,
    pub user_limit_factor: Option<f64>,
    pub priority: Option<i32>,
    pub submit_acl: Option<String>,
    pub admin_acl: Option<String>,
    pub preemption_disabled: Option<bool>,
    /// Labels this queue may run on; `*` means all labels.
    pub accessible_node_labels: Vec<String>,
    pub default_node_label_expression: Option<String>,
    pub node_label_capacities: BTreeMap<String, NodeLabelCapacity>,
    /// Children in declaration order.
    pub children: Vec<ParsedQueue>,
    /// Unrecognized properties, keyed by property name relative to the queue.
    pub properties: BTreeMap<String, String>,
}

impl ParsedQueue {
    /// Create a queue with default settings at `path`.
    pub fn new(path: impl Into<String>) -> Self {
        let path = path.into();
        Self {
            name: property_key::leaf_name(&path).to_string(),
            parent: property_key::parent_path(&path).map(str::to_string),
            path,
            capacity: CapacityValue::default(),
            maximum_capacity: CapacityValue::percentage(100.0),
            state: QueueState::default(),
            maximum_applications: None,
            maximum_am_resource_percent: None,
            minimum_user_limit_percent: None,
            user_limit_factor: None,
            priority: None,
            submit_acl: None,
            admin_acl: None,
            preemption_disabled: None,
            accessible_node_labels: Vec::new(),
            default_node_label_expression: None,
            node_label_capacities: BTreeMap::new(),
            children: Vec::new(),
            properties: BTreeMap::new(),
        }
    }

    pub fn root() -> Self {
        Self::new(ROOT_QUEUE)
    }

    pub fn with_capacity(mut self, raw: &str) -> Self {
        self.capacity = CapacityValue::parse(raw);
        self
    }

    pub fn with_state(mut self, state: QueueState) -> Self {
        self.state = state;
        self
    }

    pub fn with_node_labels(mut self, labels: &[&str]) -> Self {
        self.accessible_node_labels = labels.iter().map(|l| l.to_string()).collect();
        self
    }

    pub fn with_child(mut self, child: ParsedQueue) -> Self {
        self.children.push(child);
        self
    }

    pub fn is_root(&self) -> bool {
        self.parent.is_none()
    }

    pub fn is_leaf(&self) -> bool {
        self.children.is_empty()
    }

    /// Find a queue by path in this subtree.
    pub fn find(&self, path: &str) -> Option<&ParsedQueue> {
        if self.path == path {
            return Some(self);
        }
        if property_key::property_of(path, &self.path).is_none() {
            return None;
        }
        self.children.iter().find_map(|child| child.find(path))
    }

    pub fn find_mut(&mut self, path: &str) -> Option<&mut ParsedQueue> {
        if self.path == path {
            return Some(self);
        }
        if property_key::property_of(path, &self.path).is_none() {
            return None;
        }
        self.children
            .iter_mut()
            .find_map(|child| child.find_mut(path))
    }

    /// Depth-first, pre-order traversal of this subtree (self first).
    pub fn iter(&self) -> QueueIter<'_> {
        QueueIter { stack: vec![self] }
    }

    /// Number of queues in this subtree, including self.
    pub fn subtree_len(&self) -> usize {
        self.iter().count()
    }
}

/// Pre-order iterator over a queue subtree.
pub struct QueueIter<'a> {
    stack: Vec<&'a ParsedQueue>,
}

impl<'a> Iterator for QueueIter<'a> {
    type Item = &'a ParsedQueue;

    fn next(&mut self) -> Option<Self::Item> {
        let queue = self.stack.pop()?;
        self.stack.extend(queue.children.iter().rev());
        Some(queue)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn sample_tree() -> ParsedQueue {
        ParsedQueue::root()
            .with_child(
                ParsedQueue::new("root.a")
                    .with_capacity("60")
                    .with_child(ParsedQueue::new("root.a.x").with_capacity("100")),
            )
            .with_child(ParsedQueue::new("root.b").with_capacity("40"))
    }

    #[test]
    fn new_derives_name_and_parent() {
        let queue = ParsedQueue::new("root.prod.etl");
        assert_eq!(queue.name, "etl");
        assert_eq!(queue.parent.as_deref(), Some("root.prod"));
        assert!(!queue.is_root());
    }

    #[test]
    fn root_has_no_parent() {
        let root = ParsedQueue::root();
        assert_eq!(root.name, "root");
        assert!(root.is_root());
    }

    #[test]
    fn defaults() {
        let queue = ParsedQueue::new("root.a");
        assert_eq!(queue.capacity.as_percentage(), Some(0.0));
        assert_eq!(queue.maximum_capacity.as_percentage(), Some(100.0));
        assert_eq!(queue.state, QueueState::Running);
        assert!(queue.is_leaf());
    }

    #[test]
    fn iter_is_preorder_in_declaration_order() {
        let tree = sample_tree();
        let paths: Vec<&str> = tree.iter().map(|q| q.path.as_str()).collect();
        assert_eq!(paths, vec!["root", "root.a", "root.a.x", "root.b"]);
        assert_eq!(tree.subtree_len(), 4);
    }

    #[test]
    fn find_by_path() {
        let tree = sample_tree();
        assert_eq!(tree.find("root.a.x").map(|q| q.name.as_str()), Some("x"));
        assert!(tree.find("root.c").is_none());
        assert!(tree.find("rootx").is_none());
    }

    #[test]
    fn find_mut_allows_edit() {
        let mut tree = sample_tree();
        tree.find_mut("root.b").unwrap().state = QueueState::Stopped;
        assert_eq!(tree.find("root.b").unwrap().state, QueueState::Stopped);
    }
}
