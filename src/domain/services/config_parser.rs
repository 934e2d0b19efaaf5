//! Config parser
//!
//! Rebuilds the queue hierarchy from a flat `key -> value` map.
//!
//! Property keys and queue path segments look the same (`root.capacity`
//! can be root's capacity or a queue named `capacity`), so parsing runs in
//! two passes:
//!
//! 1. **Topology**: follow `<path>.queues` declarations from `root` and
//!    register every declared queue, even ones with no other properties.
//! 2. **Properties**: attach each remaining key to the longest registered
//!    queue path that is a strict segment-prefix of it. Keys matching no
//!    queue are global properties.
//!
//! Parsing is total: problems come back as issues in the `ParseResult`.

use std::collections::{BTreeMap, HashMap, VecDeque};

use crate::domain::entities::{
    NodeLabelCapacity, ParseIssue, ParseIssueKind, ParseResult, ParsedQueue,
};
use crate::domain::value_objects::property_key::{self, globals, props, ROOT_QUEUE};
use crate::domain::value_objects::{
    percentage_sum, sums_to_full, CapacityKind, CapacityValue, QueueState,
};

/// Prefix carried by fully-qualified scheduler keys.
pub const DEFAULT_KEY_PREFIX: &str = "yarn.scheduler.capacity.";

/// Legacy mode applies unless the configuration says otherwise.
pub const DEFAULT_LEGACY_MODE: bool = true;

/// Maximum-capacity value meaning "no limit".
const UNLIMITED_MAXIMUM_CAPACITY: f64 = -1.0;

/// Flat configuration with deterministic key order.
pub type FlatConfig = BTreeMap<String, String>;

/// Parser for flat scheduler configurations.
///
/// Holds only options; every `parse` call is independent.
#[derive(Debug, Clone)]
pub struct ConfigParser {
    key_prefix: Option<String>,
}

impl Default for ConfigParser {
    fn default() -> Self {
        Self {
            key_prefix: Some(DEFAULT_KEY_PREFIX.to_string()),
        }
    }
}

impl ConfigParser {
    pub fn new() -> Self {
        Self::default()
    }

    /// Prefix stripped from incoming keys (`None` keeps keys untouched).
    pub fn with_key_prefix(mut self, prefix: Option<String>) -> Self {
        self.key_prefix = prefix.filter(|p| !p.is_empty());
        self
    }

    pub fn key_prefix(&self) -> Option<&str> {
        self.key_prefix.as_deref()
    }

    /// Parse a flat configuration into a queue tree.
    pub fn parse<'a, I>(&self, flat: I) -> ParseResult
    where
        I: IntoIterator<Item = (&'a String, &'a String)>,
    {
        let config = self.normalize(flat);
        let mut errors = Vec::new();
        let mut warnings = Vec::new();

        let is_legacy_mode = detect_legacy_mode(&config, &mut warnings);

        if !declares_root(&config) {
            errors.push(ParseIssue::new(
                ParseIssueKind::NoRootQueue,
                "no root queue found in configuration",
            ));
            return ParseResult::new(Vec::new(), config, errors, warnings, is_legacy_mode);
        }

        let mut topology = discover_topology(&config, &mut warnings);
        tracing::debug!(queues = topology.nodes.len(), "queue topology discovered");

        let mut global_properties = BTreeMap::new();
        for (key, value) in &config {
            let Some(idx) = topology.owner_of(key) else {
                global_properties.insert(key.clone(), value.clone());
                continue;
            };
            let queue = &mut topology.nodes[idx];
            let Some(property) = property_key::property_of(key, &queue.path) else {
                continue;
            };
            if property == props::QUEUES {
                continue;
            }
            assign_property(queue, property, value, &mut warnings);
        }

        for queue in &topology.nodes {
            check_capacity_bounds(queue, &mut errors, &mut warnings);
        }

        if is_legacy_mode {
            for (idx, queue) in topology.nodes.iter().enumerate() {
                let children = topology.children[idx].iter().map(|&c| &topology.nodes[c].capacity);
                if let Some(sum) = percentage_sum(children) {
                    if !sums_to_full(sum) {
                        warnings.push(ParseIssue::for_queue(
                            ParseIssueKind::CapacitySumMismatch,
                            &queue.path,
                            format!(
                                "child capacities of {} sum to {}, expected 100",
                                queue.path,
                                round_sum(sum)
                            ),
                        ));
                    }
                }
            }
        }

        let queues = topology.into_tree().into_iter().collect();
        ParseResult::new(queues, global_properties, errors, warnings, is_legacy_mode)
    }

    /// Strip the key prefix. Prefixed keys win over unprefixed duplicates.
    fn normalize<'a, I>(&self, flat: I) -> FlatConfig
    where
        I: IntoIterator<Item = (&'a String, &'a String)>,
    {
        let mut config = FlatConfig::new();
        for (key, value) in flat {
            let key = key.trim();
            match self.key_prefix.as_deref().and_then(|p| key.strip_prefix(p)) {
                Some(stripped) => {
                    config.insert(stripped.to_string(), value.clone());
                }
                None => {
                    config
                        .entry(key.to_string())
                        .or_insert_with(|| value.clone());
                }
            }
        }
        config
    }
}

/// Parse with default options.
pub fn parse_flat_config<'a, I>(flat: I) -> ParseResult
where
    I: IntoIterator<Item = (&'a String, &'a String)>,
{
    ConfigParser::default().parse(flat)
}

/// Queues registered in pass 1, stored flat in breadth-first order.
struct Topology {
    nodes: Vec<ParsedQueue>,
    children: Vec<Vec<usize>>,
    index: HashMap<String, usize>,
}

impl Topology {
    fn register(&mut self, queue: ParsedQueue) -> usize {
        let idx = self.nodes.len();
        self.index.insert(queue.path.clone(), idx);
        self.nodes.push(queue);
        self.children.push(Vec::new());
        idx
    }

    /// Longest registered queue path that is a strict prefix of `key`.
    fn owner_of(&self, key: &str) -> Option<usize> {
        property_key::segment_prefixes(key).find_map(|prefix| self.index.get(prefix).copied())
    }

    /// Assemble the tree. Children always sit after their parent in
    /// `nodes`, so building from the back sees every subtree complete.
    fn into_tree(self) -> Option<ParsedQueue> {
        let mut slots: Vec<Option<ParsedQueue>> = self.nodes.into_iter().map(Some).collect();
        for idx in (0..slots.len()).rev() {
            let kids: Vec<ParsedQueue> = self.children[idx]
                .iter()
                .filter_map(|&child| slots[child].take())
                .collect();
            if let Some(queue) = slots[idx].as_mut() {
                queue.children = kids;
            }
        }
        slots.into_iter().next().flatten()
    }
}

fn declares_root(config: &FlatConfig) -> bool {
    config
        .keys()
        .any(|key| property_key::property_of(key, ROOT_QUEUE).is_some())
}

/// Pass 1: register every queue reachable through `.queues` declarations.
fn discover_topology(config: &FlatConfig, warnings: &mut Vec<ParseIssue>) -> Topology {
    let mut topology = Topology {
        nodes: Vec::new(),
        children: Vec::new(),
        index: HashMap::new(),
    };
    let root = topology.register(ParsedQueue::root());

    let mut worklist = VecDeque::from([root]);
    while let Some(parent_idx) = worklist.pop_front() {
        let parent_path = topology.nodes[parent_idx].path.clone();
        let Some(declared) = config.get(&property_key::full_key(&parent_path, props::QUEUES)) else {
            continue;
        };

        for name in property_key::split_list(declared) {
            let path = property_key::child_path(&parent_path, &name);
            if topology.index.contains_key(&path) {
                warnings.push(ParseIssue::for_queue(
                    ParseIssueKind::DuplicateQueueDeclaration,
                    &path,
                    format!("queue {} is declared more than once", path),
                ));
                continue;
            }

            let mut queue = ParsedQueue::new(path);
            queue.name = name;
            queue.parent = Some(parent_path.clone());
            let child_idx = topology.register(queue);
            topology.children[parent_idx].push(child_idx);
            worklist.push_back(child_idx);
        }
    }

    topology
}

fn detect_legacy_mode(config: &FlatConfig, warnings: &mut Vec<ParseIssue>) -> bool {
    let Some(raw) = config.get(globals::LEGACY_QUEUE_MODE) else {
        return DEFAULT_LEGACY_MODE;
    };
    match parse_bool(raw) {
        Some(enabled) => enabled,
        None => {
            warnings.push(ParseIssue::new(
                ParseIssueKind::InvalidLegacyModeFlag,
                format!(
                    "{} has non-boolean value '{}', assuming legacy mode",
                    globals::LEGACY_QUEUE_MODE,
                    raw
                ),
            ));
            DEFAULT_LEGACY_MODE
        }
    }
}

/// Pass 2: interpret one property of a queue.
fn assign_property(
    queue: &mut ParsedQueue,
    property: &str,
    value: &str,
    warnings: &mut Vec<ParseIssue>,
) {
    match property {
        props::CAPACITY => queue.capacity = parse_capacity(&queue.path, property, value, warnings),
        props::MAXIMUM_CAPACITY => {
            queue.maximum_capacity = parse_capacity(&queue.path, property, value, warnings)
        }
        props::STATE => queue.state = QueueState::parse(value),
        props::MAXIMUM_APPLICATIONS => {
            queue.maximum_applications = parse_scalar(&queue.path, property, value, warnings)
        }
        props::MAXIMUM_AM_RESOURCE_PERCENT => {
            queue.maximum_am_resource_percent = parse_scalar(&queue.path, property, value, warnings)
        }
        props::MINIMUM_USER_LIMIT_PERCENT => {
            queue.minimum_user_limit_percent = parse_scalar(&queue.path, property, value, warnings)
        }
        props::USER_LIMIT_FACTOR => {
            queue.user_limit_factor = parse_scalar(&queue.path, property, value, warnings)
        }
        props::PRIORITY => queue.priority = parse_scalar(&queue.path, property, value, warnings),
        props::ACL_SUBMIT_APPLICATIONS => queue.submit_acl = Some(value.to_string()),
        props::ACL_ADMINISTER_QUEUE => queue.admin_acl = Some(value.to_string()),
        props::DISABLE_PREEMPTION => match parse_bool(value) {
            Some(flag) => queue.preemption_disabled = Some(flag),
            None => warnings.push(invalid_value(&queue.path, property, value)),
        },
        props::ACCESSIBLE_NODE_LABELS => {
            queue.accessible_node_labels = property_key::split_list(value)
        }
        props::DEFAULT_NODE_LABEL_EXPRESSION => {
            queue.default_node_label_expression = Some(value.trim().to_string())
        }
        other => {
            if !assign_label_capacity(queue, other, value, warnings) {
                queue
                    .properties
                    .insert(other.to_string(), value.to_string());
            }
        }
    }
}

/// `accessible-node-labels.<label>.(maximum-)capacity`
fn assign_label_capacity(
    queue: &mut ParsedQueue,
    property: &str,
    value: &str,
    warnings: &mut Vec<ParseIssue>,
) -> bool {
    let Some(rest) = property
        .strip_prefix(props::ACCESSIBLE_NODE_LABELS)
        .and_then(|r| r.strip_prefix('.'))
    else {
        return false;
    };
    let Some((label, setting)) = property_key::split_last(rest) else {
        return false;
    };
    if label.is_empty() {
        return false;
    }

    match setting {
        props::CAPACITY => {
            let capacity = parse_capacity(&queue.path, property, value, warnings);
            queue
                .node_label_capacities
                .entry(label.to_string())
                .or_insert_with(NodeLabelCapacity::default)
                .capacity = Some(capacity);
            true
        }
        props::MAXIMUM_CAPACITY => {
            let capacity = parse_capacity(&queue.path, property, value, warnings);
            queue
                .node_label_capacities
                .entry(label.to_string())
                .or_insert_with(NodeLabelCapacity::default)
                .maximum_capacity = Some(capacity);
            true
        }
        _ => false,
    }
}

fn parse_capacity(
    path: &str,
    property: &str,
    value: &str,
    warnings: &mut Vec<ParseIssue>,
) -> CapacityValue {
    match CapacityValue::try_parse(value) {
        Ok(capacity) => capacity,
        Err(err) => {
            warnings.push(ParseIssue::for_queue(
                ParseIssueKind::InvalidCapacity,
                path,
                format!("{} of {}: {}, treating as 0", property, path, err),
            ));
            CapacityValue::parse(value)
        }
    }
}

fn parse_scalar<T: std::str::FromStr>(
    path: &str,
    property: &str,
    value: &str,
    warnings: &mut Vec<ParseIssue>,
) -> Option<T> {
    match value.trim().parse::<T>() {
        Ok(parsed) => Some(parsed),
        Err(_) => {
            warnings.push(invalid_value(path, property, value));
            None
        }
    }
}

fn invalid_value(path: &str, property: &str, value: &str) -> ParseIssue {
    ParseIssue::for_queue(
        ParseIssueKind::InvalidPropertyValue,
        path,
        format!("invalid value '{}' for {} of {}", value, property, path),
    )
}

fn parse_bool(value: &str) -> Option<bool> {
    match value.trim().to_ascii_lowercase().as_str() {
        "true" => Some(true),
        "false" => Some(false),
        _ => None,
    }
}

fn check_capacity_bounds(
    queue: &ParsedQueue,
    errors: &mut Vec<ParseIssue>,
    warnings: &mut Vec<ParseIssue>,
) {
    if !queue.capacity.is_within_percentage_range() {
        errors.push(ParseIssue::for_queue(
            ParseIssueKind::CapacityOutOfRange,
            &queue.path,
            format!(
                "capacity {} of {} is outside [0, 100]",
                queue.capacity.raw(),
                queue.path
            ),
        ));
    }

    let unlimited = queue.maximum_capacity.as_percentage() == Some(UNLIMITED_MAXIMUM_CAPACITY);
    if !unlimited && !queue.maximum_capacity.is_within_percentage_range() {
        errors.push(ParseIssue::for_queue(
            ParseIssueKind::MaximumCapacityOutOfRange,
            &queue.path,
            format!(
                "maximum-capacity {} of {} is outside [0, 100]",
                queue.maximum_capacity.raw(),
                queue.path
            ),
        ));
    }

    if let CapacityKind::Weight { value } = queue.capacity.kind() {
        if *value <= 0.0 {
            warnings.push(ParseIssue::for_queue(
                ParseIssueKind::NonPositiveWeight,
                &queue.path,
                format!(
                    "weight {} of {} must be greater than 0",
                    queue.capacity.raw(),
                    queue.path
                ),
            ));
        }
    }
}

fn round_sum(sum: f64) -> f64 {
    (sum * 100.0).round() / 100.0
}
