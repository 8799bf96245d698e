//! Destination resolution for relocating a key or subtree.
//!
//! A row can move under any known folder except itself and anything nested
//! inside it, which is what keeps the namespace acyclic. The picker presents
//! candidates as a tree rebuilt from the flat folder-key list.

use crate::key::{key_name, parent_path};

/// One node of the destination picker tree.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct DestinationNode {
    pub key: String,
    pub name: String,
    pub children: Vec<DestinationNode>,
}

/// Folder keys a row at `source_key` may legally move under.
///
/// Excludes the source itself and its whole subtree; moving a folder into its
/// own descendants would create a cycle.
pub fn legal_destinations(source_key: &str, parent_keys: &[String]) -> Vec<String> {
    let prefix = format!("{source_key}.");
    parent_keys
        .iter()
        .filter(|candidate| {
            source_key.is_empty()
                || (candidate.as_str() != source_key && !candidate.starts_with(&prefix))
        })
        .cloned()
        .collect()
}

/// Arrange flat folder keys into a hierarchy for display.
///
/// A key whose parent is not itself in the list (it may have been excluded as
/// part of the source subtree) is presented at the root.
pub fn destination_tree(parent_keys: &[String]) -> Vec<DestinationNode> {
    let mut sorted: Vec<&String> = parent_keys.iter().collect();
    sorted.sort();

    let roots: Vec<&String> = sorted
        .iter()
        .filter(|key| {
            let parent = parent_path(key);
            parent.is_empty() || !parent_keys.iter().any(|known| known == parent)
        })
        .copied()
        .collect();

    roots
        .into_iter()
        .map(|key| build_node(key, &sorted))
        .collect()
}

fn build_node(key: &str, sorted: &[&String]) -> DestinationNode {
    let children = sorted
        .iter()
        .filter(|candidate| parent_path(candidate) == key)
        .map(|candidate| build_node(candidate, sorted))
        .collect();
    DestinationNode {
        key: key.to_string(),
        name: key_name(key).to_string(),
        children,
    }
}

#[cfg(test)]
mod tests {
    use pretty_assertions::assert_eq;

    use super::*;

    fn parents(keys: &[&str]) -> Vec<String> {
        keys.iter().map(|key| key.to_string()).collect()
    }

    #[test]
    fn test_legal_destinations_exclude_source_and_subtree() {
        let all = parents(&["common", "dashboard", "dashboard.stats", "dashboards"]);
        let legal = legal_destinations("dashboard", &all);
        assert_eq!(legal, vec!["common", "dashboards"]);
    }

    #[test]
    fn test_legal_destinations_for_leaf_source() {
        let all = parents(&["common", "dashboard"]);
        let legal = legal_destinations("common.ok", &all);
        assert_eq!(legal, vec!["common", "dashboard"]);
    }

    #[test]
    fn test_never_includes_source_or_descendants() {
        let all = parents(&["a", "a.b", "a.b.c", "ab"]);
        let legal = legal_destinations("a", &all);
        assert!(!legal.iter().any(|key| key == "a" || key.starts_with("a.")));
        assert_eq!(legal, vec!["ab"], "'ab' is not under 'a'");
    }

    #[test]
    fn test_destination_tree_nests_children() {
        let tree = destination_tree(&parents(&["common", "common.buttons", "dashboard"]));
        assert_eq!(tree.len(), 2);
        assert_eq!(tree[0].key, "common");
        assert_eq!(tree[0].children.len(), 1);
        assert_eq!(tree[0].children[0].key, "common.buttons");
        assert_eq!(tree[0].children[0].name, "buttons");
        assert_eq!(tree[1].key, "dashboard");
    }

    #[test]
    fn test_destination_tree_roots_unknown_parents() {
        // "a.b.c" survives an exclusion that removed "a.b": shown at root
        let tree = destination_tree(&parents(&["a.b.c", "z"]));
        let keys: Vec<&str> = tree.iter().map(|node| node.key.as_str()).collect();
        assert_eq!(keys, vec!["a.b.c", "z"]);
    }
}
