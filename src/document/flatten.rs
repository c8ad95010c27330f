//! Conversion between nested trees and single-level maps keyed by escaped
//! dot paths.
//!
//! # Example
//!
//! ```
//! use dotquill::document::flatten::{flatten, unflatten};
//! use dotquill::document::node::Tree;
//! use serde_json::json;
//!
//! let tree = Tree::from(json!({"test": {"tester.makeup": {"testing": "10"}}}));
//! let flat = flatten(&tree).unwrap();
//! assert_eq!(flat[r"test.tester\.makeup.testing"], Tree::from("10"));
//! assert_eq!(unflatten(&flat), tree);
//! ```
//!
//! Empty mappings and null leaves leave no entry in the flattened map, so
//! they do not survive a round trip.

use super::node::Tree;
use crate::dotpath::error::DotPathError;
use crate::dotpath::tokenizer;
use crate::dotpath::traversal::assign;
use indexmap::IndexMap;

/// Flattens a tree into a map from escaped dot path to leaf value.
///
/// Leaves are visited depth-first in key order. Arrays are recorded whole.
///
/// # Errors
///
/// `InvalidArgument` when the root is neither a mapping nor null.
pub fn flatten(tree: &Tree) -> Result<IndexMap<String, Tree>, DotPathError> {
    match tree {
        Tree::Object(entries) => Ok(flatten_entries(entries)),
        Tree::Null => Ok(IndexMap::new()),
        other => Err(DotPathError::invalid_argument(format!(
            "cannot flatten a {}, expected an object",
            other.type_name()
        ))),
    }
}

pub(crate) fn flatten_entries(entries: &IndexMap<String, Tree>) -> IndexMap<String, Tree> {
    let mut flat = IndexMap::new();
    collect_leaves(entries, "", &mut flat);
    flat
}

fn collect_leaves(entries: &IndexMap<String, Tree>, prefix: &str, flat: &mut IndexMap<String, Tree>) {
    for (key, value) in entries {
        let path = tokenizer::child_path(prefix, key);
        match value {
            Tree::Object(children) => collect_leaves(children, &path, flat),
            Tree::Null => {}
            leaf => {
                flat.insert(path, leaf.clone());
            }
        }
    }
}

/// Rebuilds a nested tree from a map of escaped dot paths.
///
/// Entries are written in order with the same creation policy as
/// [`write`](crate::dotpath::write): a later entry whose path runs through an
/// earlier leaf replaces that leaf with a mapping.
pub fn unflatten(flat: &IndexMap<String, Tree>) -> Tree {
    let mut root = IndexMap::new();
    for (path, value) in flat {
        assign(&mut root, &tokenizer::split(path), value.clone());
    }
    Tree::Object(root)
}

/// Unflattens a dynamically typed value, which must be a mapping or null.
///
/// # Errors
///
/// `InvalidArgument` when `flat` is any other kind of value.
pub fn unflatten_tree(flat: &Tree) -> Result<Tree, DotPathError> {
    match flat {
        Tree::Object(entries) => Ok(unflatten(entries)),
        Tree::Null => Ok(Tree::object()),
        other => Err(DotPathError::invalid_argument(format!(
            "cannot unflatten a {}, expected an object",
            other.type_name()
        ))),
    }
}
