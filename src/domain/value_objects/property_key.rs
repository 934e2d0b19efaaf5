//! Property key mapping
//!
//! Builds and splits the fully-qualified keys of the flat configuration
//! (`<queuePath>.<propertyName>`). Pure string algebra: nothing here
//! validates that a path or property actually exists.

/// Path of the root queue.
pub const ROOT_QUEUE: &str = "root";

/// Segment separator used by queue paths and property keys.
pub const SEPARATOR: char = '.';

/// Known per-queue property names.
pub mod props {
    pub const QUEUES: &str = "queues";
    pub const CAPACITY: &str = "capacity";
    pub const MAXIMUM_CAPACITY: &str = "maximum-capacity";
    pub const STATE: &str = "state";
    pub const MAXIMUM_APPLICATIONS: &str = "maximum-applications";
    pub const MAXIMUM_AM_RESOURCE_PERCENT: &str = "maximum-am-resource-percent";
    pub const MINIMUM_USER_LIMIT_PERCENT: &str = "minimum-user-limit-percent";
    pub const USER_LIMIT_FACTOR: &str = "user-limit-factor";
    pub const PRIORITY: &str = "priority";
    pub const ACL_SUBMIT_APPLICATIONS: &str = "acl_submit_applications";
    pub const ACL_ADMINISTER_QUEUE: &str = "acl_administer_queue";
    pub const DISABLE_PREEMPTION: &str = "disable_preemption";
    pub const ACCESSIBLE_NODE_LABELS: &str = "accessible-node-labels";
    pub const DEFAULT_NODE_LABEL_EXPRESSION: &str = "default-node-label-expression";
}

/// Known global property names.
pub mod globals {
    pub const LEGACY_QUEUE_MODE: &str = "legacy-queue-mode.enabled";
}

/// Build the flat key for a queue property.
///
/// `full_key("root.prod", "capacity")` is `root.prod.capacity`.
pub fn full_key(queue_path: &str, property: &str) -> String {
    format!("{}{}{}", queue_path, SEPARATOR, property)
}

/// Build the path of a child queue.
pub fn child_path(parent_path: &str, name: &str) -> String {
    full_key(parent_path, name)
}

/// Split a key at its last separator into `(prefix, last_segment)`.
pub fn split_last(key: &str) -> Option<(&str, &str)> {
    key.rsplit_once(SEPARATOR)
}

/// Path of the parent queue, or `None` for a single-segment path.
pub fn parent_path(path: &str) -> Option<&str> {
    split_last(path).map(|(parent, _)| parent)
}

/// Final segment of a queue path.
pub fn leaf_name(path: &str) -> &str {
    split_last(path).map(|(_, name)| name).unwrap_or(path)
}

/// Property name of `key` relative to `queue_path`.
///
/// Matches on segment boundaries only: `root-foo` is not under `root`,
/// and a key equal to the path itself has no property part.
pub fn property_of<'a>(key: &'a str, queue_path: &str) -> Option<&'a str> {
    let rest = key.strip_prefix(queue_path)?;
    let property = rest.strip_prefix(SEPARATOR)?;
    (!property.is_empty()).then_some(property)
}

/// Every strict segment-prefix of `key`, longest first.
///
/// `a.b.c` yields `a.b` then `a`.
pub fn segment_prefixes(key: &str) -> impl Iterator<Item = &str> {
    key.char_indices()
        .rev()
        .filter(|(_, c)| *c == SEPARATOR)
        .map(move |(idx, _)| &key[..idx])
        .filter(|prefix| !prefix.is_empty())
}

/// Split a comma-separated list, trimming entries and dropping empties.
pub fn split_list(value: &str) -> Vec<String> {
    value
        .split(',')
        .map(str::trim)
        .filter(|s| !s.is_empty())
        .map(str::to_string)
        .collect()
}
