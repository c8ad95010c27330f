//! Read, write, and existence checks against a nested `Tree` by dot path.

use super::error::DotPathError;
use super::tokenizer;
use crate::document::node::Tree;
use indexmap::IndexMap;

/// Resolves `path` against `tree`.
///
/// Returns `Ok(None)` as soon as a segment is missing or the current node is
/// not a mapping. A stored null resolves to `Some(&Tree::Null)`. A null root
/// is treated as an empty mapping.
///
/// # Errors
///
/// `InvalidArgument` when the root is neither a mapping nor null.
///
/// ```
/// use dotquill::document::node::Tree;
/// use dotquill::dotpath::{read, write};
///
/// let mut tree = Tree::object();
/// write(&mut tree, "server.port", Tree::from(8080)).unwrap();
/// assert_eq!(read(&tree, "server.port").unwrap(), Some(&Tree::from(8080)));
/// assert_eq!(read(&tree, "server.host").unwrap(), None);
/// ```
pub fn read<'a>(tree: &'a Tree, path: &str) -> Result<Option<&'a Tree>, DotPathError> {
    match tree {
        Tree::Object(entries) => Ok(lookup(entries, &tokenizer::split(path))),
        Tree::Null => Ok(None),
        other => Err(root_error(other)),
    }
}

/// Identical to [`read`]; kept as a separate entry point for path searches.
pub fn search<'a>(tree: &'a Tree, path: &str) -> Result<Option<&'a Tree>, DotPathError> {
    read(tree, path)
}

/// Returns whether every segment of `path` is present, including when the
/// final value is null.
pub fn exists(tree: &Tree, path: &str) -> Result<bool, DotPathError> {
    read(tree, path).map(|found| found.is_some())
}

/// Assigns `value` at `path`, creating intermediate mappings as needed.
///
/// Any intermediate value that is not a mapping is replaced by an empty
/// mapping. The final segment is overwritten unconditionally. A null root
/// becomes a mapping first.
///
/// # Errors
///
/// `InvalidArgument` when the root is neither a mapping nor null; the tree is
/// left untouched in that case.
pub fn write(tree: &mut Tree, path: &str, value: Tree) -> Result<(), DotPathError> {
    if tree.is_null() {
        *tree = Tree::object();
    }
    match tree {
        Tree::Object(entries) => {
            assign(entries, &tokenizer::split(path), value);
            Ok(())
        }
        other => Err(root_error(other)),
    }
}

fn root_error(root: &Tree) -> DotPathError {
    DotPathError::invalid_argument(format!(
        "root must be an object or null, found {}",
        root.type_name()
    ))
}

/// Descends through `segments` starting at a mapping.
pub(crate) fn lookup<'a>(root: &'a IndexMap<String, Tree>, segments: &[String]) -> Option<&'a Tree> {
    let (first, rest) = segments.split_first()?;
    let mut current = root.get(first)?;
    for segment in rest {
        current = current.as_object()?.get(segment)?;
    }
    Some(current)
}

/// Writes `value` under `segments`, replacing non-mapping intermediates.
pub(crate) fn assign(entries: &mut IndexMap<String, Tree>, segments: &[String], value: Tree) {
    match segments {
        [] => {}
        [last] => {
            entries.insert(last.clone(), value);
        }
        [head, rest @ ..] => {
            let child = entries.entry(head.clone()).or_insert_with(Tree::object);
            if !child.is_object() {
                *child = Tree::object();
            }
            if let Tree::Object(children) = child {
                assign(children, rest, value);
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    fn sample() -> Tree {
        Tree::from(json!({
            "nest": {"secondnest": {"third": {"nest": 10}}},
            "flag": null,
            "list": [1, 2]
        }))
    }

    #[test]
    fn test_read_nested_value() {
        let tree = sample();
        assert_eq!(
            read(&tree, "nest.secondnest.third.nest").unwrap(),
            Some(&Tree::from(10))
        );
    }

    #[test]
    fn test_read_intermediate_returns_subtree() {
        let tree = sample();
        let found = read(&tree, "nest.secondnest").unwrap().unwrap();
        assert!(found.is_object());
    }

    #[test]
    fn test_read_missing_is_none() {
        let tree = sample();
        assert_eq!(read(&tree, "nest.fakekey").unwrap(), None);
        assert_eq!(read(&tree, "nest.secondnest.third.nest.deeper").unwrap(), None);
    }

    #[test]
    fn test_read_does_not_descend_into_arrays() {
        let tree = sample();
        assert_eq!(read(&tree, "list.0").unwrap(), None);
    }

    #[test]
    fn test_read_null_distinct_from_absent() {
        let tree = sample();
        assert_eq!(read(&tree, "flag").unwrap(), Some(&Tree::Null));
        assert!(exists(&tree, "flag").unwrap());
        assert!(!exists(&tree, "missing").unwrap());
    }

    #[test]
    fn test_read_from_null_root() {
        assert_eq!(read(&Tree::Null, "a.b").unwrap(), None);
    }

    #[test]
    fn test_read_rejects_scalar_root() {
        let err = read(&Tree::from("text"), "a").unwrap_err();
        assert!(matches!(err, DotPathError::InvalidArgument { .. }));
    }

    #[test]
    fn test_write_creates_intermediates() {
        let mut tree = Tree::object();
        write(&mut tree, "a.b.c", Tree::from(1)).unwrap();
        assert_eq!(tree, Tree::from(json!({"a": {"b": {"c": 1}}})));
    }

    #[test]
    fn test_write_replaces_scalar_intermediate() {
        let mut tree = Tree::from(json!({"a": 5}));
        write(&mut tree, "a.b", Tree::from("x")).unwrap();
        assert_eq!(tree, Tree::from(json!({"a": {"b": "x"}})));
    }

    #[test]
    fn test_write_overwrites_final_segment() {
        let mut tree = Tree::from(json!({"a": {"b": {"deep": true}}}));
        write(&mut tree, "a.b", Tree::from(2)).unwrap();
        assert_eq!(tree, Tree::from(json!({"a": {"b": 2}})));
    }

    #[test]
    fn test_write_into_null_root() {
        let mut tree = Tree::Null;
        write(&mut tree, "x", Tree::from(true)).unwrap();
        assert_eq!(tree, Tree::from(json!({"x": true})));
    }

    #[test]
    fn test_write_rejects_array_root_without_mutation() {
        let mut tree = Tree::Array(vec![Tree::from(1)]);
        let err = write(&mut tree, "a", Tree::from(2)).unwrap_err();
        assert!(matches!(err, DotPathError::InvalidArgument { .. }));
        assert_eq!(tree, Tree::Array(vec![Tree::from(1)]));
    }

    #[test]
    fn test_write_escaped_segment() {
        let mut tree = Tree::object();
        write(&mut tree, r"escaped\.key.level.nested", Tree::from("x")).unwrap();
        assert_eq!(
            tree,
            Tree::from(json!({"escaped.key": {"level": {"nested": "x"}}}))
        );
        assert_eq!(read(&tree, "escaped.key.level.nested").unwrap(), None);
    }

    #[test]
    fn test_search_matches_read() {
        let tree = sample();
        for path in ["nest", "nest.secondnest.third.nest", "flag", "nope"] {
            assert_eq!(search(&tree, path).unwrap(), read(&tree, path).unwrap());
        }
    }
}
