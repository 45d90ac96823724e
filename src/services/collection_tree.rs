//! Collection tree construction.
//!
//! The API returns collections as a flat list where nested collections point
//! at their parent. [`build_tree`] turns that list into an ordered forest and
//! [`flatten`] walks it back into the indented order used by the dropdown.

use std::collections::HashMap;

use tracing::warn;

use crate::types::collection::{
    Collection, CollectionDropdownItem, CollectionNode, SyntheticCollection,
};

/// Builds the collection forest and returns its roots.
///
/// Collections whose parent is missing from `collections` become roots.
/// Siblings are ordered by `sort`; equal keys keep their input order.
pub fn build_tree(collections: &[Collection]) -> Vec<CollectionNode> {
    let index: HashMap<i64, usize> = collections
        .iter()
        .enumerate()
        .map(|(i, c)| (c.id, i))
        .collect();

    let mut children_of: Vec<Vec<usize>> = vec![Vec::new(); collections.len()];
    let mut roots: Vec<usize> = Vec::new();

    for (i, collection) in collections.iter().enumerate() {
        match collection.parent_id().and_then(|pid| index.get(&pid)) {
            Some(&parent) => children_of[parent].push(i),
            None => roots.push(i),
        }
    }

    // Vec::sort_by_key is stable.
    roots.sort_by_key(|&i| collections[i].sort);
    let forest: Vec<CollectionNode> = roots
        .into_iter()
        .map(|i| build_node(collections, &mut children_of, i, 0))
        .collect();

    let placed: usize = forest.iter().map(CollectionNode::subtree_len).sum();
    if placed < collections.len() {
        warn!(
            unplaced = collections.len() - placed,
            "collections with cyclic parent references were left out of the tree"
        );
    }

    forest
}

fn build_node(
    collections: &[Collection],
    children_of: &mut [Vec<usize>],
    i: usize,
    depth: usize,
) -> CollectionNode {
    let mut child_indices = std::mem::take(&mut children_of[i]);
    child_indices.sort_by_key(|&c| collections[c].sort);

    let children = child_indices
        .into_iter()
        .map(|c| build_node(collections, children_of, c, depth + 1))
        .collect();

    CollectionNode {
        collection: collections[i].clone(),
        children,
        depth,
    }
}

/// Pre-order walk: every node is followed by its whole subtree before its next sibling.
pub fn flatten(roots: &[CollectionNode]) -> Vec<&CollectionNode> {
    fn visit<'a>(node: &'a CollectionNode, out: &mut Vec<&'a CollectionNode>) {
        out.push(node);
        for child in &node.children {
            visit(child, out);
        }
    }

    let mut out = Vec::new();
    for root in roots {
        visit(root, &mut out);
    }
    out
}

/// Dropdown title: roots as-is, nested collections indented two spaces per level plus an arrow.
pub fn display_title(node: &CollectionNode) -> String {
    if node.depth == 0 {
        return node.title().to_string();
    }
    format!("{}→ {}", "  ".repeat(node.depth), node.title())
}

/// Collection dropdown entries: the pseudo-collections, then the flattened tree.
pub fn dropdown_items(flat: &[&CollectionNode]) -> Vec<CollectionDropdownItem> {
    let synthetic = SyntheticCollection::ALL
        .iter()
        .map(|s| CollectionDropdownItem {
            id: s.key().to_string(),
            title: s.title().to_string(),
            collection_id: s.id(),
        });

    let real = flat.iter().map(|node| CollectionDropdownItem {
        id: node.id().to_string(),
        title: display_title(node),
        collection_id: node.id(),
    });

    synthetic.chain(real).collect()
}
