//! Deep merge of configuration trees.
//!
//! The engine is total: any pair of trees merges, mismatched shapes resolve
//! with the incoming value winning.

use super::MergeStrategy;
use crate::tree::ConfigTree;

/// Merge two possibly absent trees. An absent side is the identity.
pub fn merge(
    base: Option<ConfigTree>,
    incoming: Option<ConfigTree>,
    strategy: MergeStrategy,
) -> Option<ConfigTree> {
    match (base, incoming) {
        (base, None) => base,
        (None, incoming) => incoming,
        (Some(base), Some(incoming)) => Some(merge_trees(base, incoming, strategy)),
    }
}

/// Merge `incoming` over `base`.
///
/// - Two mappings: the union of keys. Colliding keys keep their position from
///   `base` and are merged recursively, except under [`MergeStrategy::Replace`]
///   where the incoming value is taken wholesale.
/// - Two sequences under [`MergeStrategy::MergeMapsAndSequences`]: `base`
///   followed by `incoming`, duplicates retained.
/// - Anything else: `incoming`.
pub fn merge_trees(base: ConfigTree, incoming: ConfigTree, strategy: MergeStrategy) -> ConfigTree {
    match (base, incoming) {
        (ConfigTree::Mapping(mut base_map), ConfigTree::Mapping(incoming_map)) => {
            for (key, incoming_value) in incoming_map {
                match base_map.get_mut(&key) {
                    Some(slot) if strategy.merges_maps() => {
                        let base_value = std::mem::take(slot);
                        *slot = merge_trees(base_value, incoming_value, strategy);
                    }
                    Some(slot) => *slot = incoming_value,
                    None => {
                        base_map.insert(key, incoming_value);
                    }
                }
            }
            ConfigTree::Mapping(base_map)
        }
        (ConfigTree::Sequence(mut base_items), ConfigTree::Sequence(incoming_items))
            if strategy.concatenates_sequences() =>
        {
            base_items.extend(incoming_items);
            ConfigTree::Sequence(base_items)
        }
        (_, incoming) => incoming,
    }
}

/// Fold trees in order, starting from an empty mapping. Later trees win.
pub fn merge_all(trees: impl IntoIterator<Item = ConfigTree>, strategy: MergeStrategy) -> ConfigTree {
    trees
        .into_iter()
        .fold(ConfigTree::empty_mapping(), |acc, tree| merge_trees(acc, tree, strategy))
}
