//! Flat config writer
//!
//! Turns a parsed tree back into the flat wire format. Capacities are
//! written from their raw strings, so values round-trip byte-for-byte.

use crate::domain::entities::{ParseResult, ParsedQueue};
use crate::domain::value_objects::property_key::{full_key, props};

use super::config_parser::FlatConfig;

/// Serialize the tree and global properties of a parse.
pub fn to_flat_config(result: &ParseResult) -> FlatConfig {
    let mut config = FlatConfig::new();
    for root in result.queues() {
        write_queue(root, &mut config);
    }
    for (key, value) in result.global_properties() {
        config.insert(key.clone(), value.clone());
    }
    config
}

/// Prepend `prefix` to every key.
pub fn with_key_prefix(config: FlatConfig, prefix: &str) -> FlatConfig {
    config
        .into_iter()
        .map(|(key, value)| (format!("{}{}", prefix, key), value))
        .collect()
}

fn write_queue(queue: &ParsedQueue, config: &mut FlatConfig) {
    let mut put = |property: &str, value: String| {
        config.insert(full_key(&queue.path, property), value);
    };

    if !queue.children.is_empty() {
        let names: Vec<&str> = queue.children.iter().map(|c| c.name.as_str()).collect();
        put(props::QUEUES, names.join(","));
    }

    put(props::CAPACITY, queue.capacity.raw().to_string());
    put(props::MAXIMUM_CAPACITY, queue.maximum_capacity.raw().to_string());
    put(props::STATE, queue.state.to_string());

    if let Some(v) = queue.maximum_applications {
        put(props::MAXIMUM_APPLICATIONS, v.to_string());
    }
    if let Some(v) = queue.maximum_am_resource_percent {
        put(props::MAXIMUM_AM_RESOURCE_PERCENT, v.to_string());
    }
    if let Some(v) = queue.minimum_user_limit_percent {
        put(props::MINIMUM_USER_LIMIT_PERCENT, v.to_string());
    }
    if let Some(v) = queue.user_limit_factor {
        put(props::USER_LIMIT_FACTOR, v.to_string());
    }
    if let Some(v) = queue.priority {
        put(props::PRIORITY, v.to_string());
    }
    if let Some(acl) = &queue.submit_acl {
        put(props::ACL_SUBMIT_APPLICATIONS, acl.clone());
    }
    if let Some(acl) = &queue.admin_acl {
        put(props::ACL_ADMINISTER_QUEUE, acl.clone());
    }
    if let Some(v) = queue.preemption_disabled {
        put(props::DISABLE_PREEMPTION, v.to_string());
    }
    if !queue.accessible_node_labels.is_empty() {
        put(
            props::ACCESSIBLE_NODE_LABELS,
            queue.accessible_node_labels.join(","),
        );
    }
    if let Some(expr) = &queue.default_node_label_expression {
        put(props::DEFAULT_NODE_LABEL_EXPRESSION, expr.clone());
    }

    for (label, caps) in &queue.node_label_capacities {
        let base = format!("{}.{}", props::ACCESSIBLE_NODE_LABELS, label);
        if let Some(cap) = &caps.capacity {
            put(&format!("{}.{}", base, props::CAPACITY), cap.raw().to_string());
        }
        if let Some(cap) = &caps.maximum_capacity {
            put(
                &format!("{}.{}", base, props::MAXIMUM_CAPACITY),
                cap.raw().to_string(),
            );
        }
    }

    for (property, value) in &queue.properties {
        put(property, value.clone());
    }

    for child in &queue.children {
        write_queue(child, config);
    }
}
