//! Property tests for the flat configuration parser.

use std::collections::BTreeMap;

use proptest::prelude::*;
use proptest::sample::Index;

use capconf::{parse_flat_config, to_flat_config, FlatConfig, ParseIssueKind, ParsedQueue};

fn key_segment() -> impl Strategy<Value = String> {
    prop_oneof![
        Just("root".to_string()),
        Just("queues".to_string()),
        Just("capacity".to_string()),
        proptest::string::string_regex("[a-z]{1,4}").unwrap(),
    ]
}

fn arbitrary_key() -> impl Strategy<Value = String> {
    proptest::collection::vec(key_segment(), 1..=4).prop_map(|segments| segments.join("."))
}

/// A random queue tree as a flat configuration: node `i + 1` hangs off one
/// of the nodes before it, node 0 being root.
fn queue_tree() -> impl Strategy<Value = (FlatConfig, usize)> {
    proptest::collection::vec((any::<Index>(), 0u32..=100), 0..=12).prop_map(|nodes| {
        let mut paths = vec!["root".to_string()];
        let mut children: BTreeMap<usize, Vec<String>> = BTreeMap::new();
        let mut config = FlatConfig::new();

        for (i, (parent, capacity)) in nodes.iter().enumerate() {
            let parent = parent.index(i + 1);
            let name = format!("q{}", i);
            let path = format!("{}.{}", paths[parent], name);
            config.insert(format!("{}.capacity", path), capacity.to_string());
            children.entry(parent).or_default().push(name);
            paths.push(path);
        }
        for (parent, names) in children {
            config.insert(format!("{}.queues", paths[parent]), names.join(","));
        }
        config.insert("root.capacity".to_string(), "100".to_string());
        (config, paths.len())
    })
}

proptest! {
    #![proptest_config(ProptestConfig {
        cases: 96,
        .. ProptestConfig::default()
    })]

    /// PROPERTY: The parser is total over arbitrary flat maps.
    #[test]
    fn property_parse_never_panics(
        config in proptest::collection::btree_map(arbitrary_key(), "(?s).{0,16}", 0..=16)
    ) {
        let _ = parse_flat_config(&config);
    }

    /// PROPERTY: Every declared queue appears exactly once in the tree.
    #[test]
    fn property_every_declared_queue_is_parsed((config, expected) in queue_tree()) {
        let result = parse_flat_config(&config);
        prop_assert!(!result.has_errors(), "errors: {:?}", result.errors());
        prop_assert_eq!(result.queue_count(), expected);

        let visited = result.queues().iter().flat_map(ParsedQueue::iter).count();
        prop_assert_eq!(visited, expected);
    }

    /// PROPERTY: Children always point back at their parent.
    #[test]
    fn property_parent_links_match_tree((config, _) in queue_tree()) {
        let result = parse_flat_config(&config);
        for queue in result.queues().iter().flat_map(ParsedQueue::iter) {
            for child in &queue.children {
                prop_assert_eq!(child.parent.as_deref(), Some(queue.path.as_str()));
                let expected = format!("{}.{}", queue.path, child.name);
                prop_assert_eq!(&child.path, &expected);
            }
        }
    }

    /// PROPERTY: Writing a parse back out is a fixed point.
    #[test]
    fn property_export_is_stable((config, _) in queue_tree()) {
        let first = to_flat_config(&parse_flat_config(&config));
        let second = to_flat_config(&parse_flat_config(&first));
        prop_assert_eq!(first, second);
    }

    /// PROPERTY: Children summing to exactly 100 never raise a sum mismatch.
    #[test]
    fn property_full_children_have_no_sum_warning(split in 0u32..=100) {
        let mut config = FlatConfig::new();
        config.insert("root.queues".to_string(), "a,b".to_string());
        config.insert("root.a.capacity".to_string(), split.to_string());
        config.insert("root.b.capacity".to_string(), (100 - split).to_string());

        let result = parse_flat_config(&config);
        prop_assert!(result
            .warnings()
            .iter()
            .all(|w| w.kind != ParseIssueKind::CapacitySumMismatch));
    }
}
