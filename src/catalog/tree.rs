//! Tree Resolver
//!
//! Pure functions over an already-fetched collection snapshot. Every
//! place that needs "this collection or anything nested under it" goes
//! through [`resolve_descendant_ids`]; navigation menus go through
//! [`build_tree`]. Neither touches storage.
//!
//! Ids are keyed by their `"collection:xxx"` string form throughout.
//!
//! Malformed input (a parent chain that loops) must not hang a request:
//! both traversals carry a visited set and cut the first revisited
//! node, logging a warning, so the result is always finite and the
//! reachable part of the forest is still returned.

use std::collections::{HashMap, HashSet, VecDeque};

use serde::Serialize;

use crate::db::models::Collection;

/// One node of the nested collection forest
#[derive(Debug, Clone, Serialize)]
pub struct CollectionNode {
    pub collection: Collection,
    pub children: Vec<CollectionNode>,
}

/// Parent key ("collection:xxx") -> children, each bucket in sibling
/// order (sort_order asc, created_at asc — newest last).
fn children_index(collections: &[Collection]) -> HashMap<Option<String>, Vec<&Collection>> {
    let mut index: HashMap<Option<String>, Vec<&Collection>> = HashMap::new();
    for collection in collections {
        index
            .entry(collection.parent_string())
            .or_default()
            .push(collection);
    }
    for bucket in index.values_mut() {
        bucket.sort_by(|a, b| {
            a.sort_order
                .cmp(&b.sort_order)
                .then(a.created_at.cmp(&b.created_at))
        });
    }
    index
}

/// Build the ordered forest rooted at `root_parent` (None = top level).
///
/// Pure function of its input list; the caller is responsible for
/// feeding it only browsable collections.
pub fn build_tree(collections: &[Collection], root_parent: Option<&str>) -> Vec<CollectionNode> {
    let index = children_index(collections);
    let mut visited = HashSet::new();
    attach_children(root_parent.map(str::to_string), &index, &mut visited)
}

fn attach_children(
    parent_key: Option<String>,
    index: &HashMap<Option<String>, Vec<&Collection>>,
    visited: &mut HashSet<String>,
) -> Vec<CollectionNode> {
    let Some(children) = index.get(&parent_key) else {
        return Vec::new();
    };

    let mut nodes = Vec::with_capacity(children.len());
    for collection in children {
        let key = collection.id_string();
        if !visited.insert(key.clone()) {
            tracing::warn!(
                collection = %key,
                "cycle detected in collection tree, treating node as terminal"
            );
            continue;
        }
        let grandchildren = attach_children(Some(key), index, visited);
        nodes.push(CollectionNode {
            collection: (*collection).clone(),
            children: grandchildren,
        });
    }
    nodes
}

/// The id set of `root_id` plus every collection reachable from it by
/// following child edges. Always contains `root_id`; a root absent from
/// the snapshot yields just `{root_id}`, so the caller's product query
/// naturally returns zero rows.
pub fn resolve_descendant_ids(root_id: &str, collections: &[Collection]) -> HashSet<String> {
    let mut child_ids: HashMap<String, Vec<String>> = HashMap::new();
    for collection in collections {
        if let Some(parent) = collection.parent_string() {
            child_ids.entry(parent).or_default().push(collection.id_string());
        }
    }

    let mut ids = HashSet::new();
    ids.insert(root_id.to_string());

    let mut queue = VecDeque::new();
    queue.push_back(root_id.to_string());

    while let Some(current) = queue.pop_front() {
        if let Some(children) = child_ids.get(&current) {
            for child in children {
                if ids.insert(child.clone()) {
                    queue.push_back(child.clone());
                } else {
                    tracing::warn!(
                        collection = %child,
                        "cycle detected while expanding descendants, skipping revisit"
                    );
                }
            }
        }
    }

    ids
}
