//! Tree value representation.
//!
//! A `Tree` is either a primitive (string, number, boolean, null), an ordered
//! mapping from key to `Tree`, or an array. Arrays are carried through every
//! operation as opaque leaves: paths never descend into them.
//!
//! # Example
//!
//! ```
//! use dotquill::document::node::{Tree, TreeNumber};
//! use indexmap::IndexMap;
//!
//! let mut server = IndexMap::new();
//! server.insert("host".to_string(), Tree::from("localhost"));
//! server.insert("port".to_string(), Tree::Number(TreeNumber::Integer(8080)));
//!
//! let mut root = Tree::object();
//! if let Some(entries) = root.as_object_mut() {
//!     entries.insert("server".to_string(), Tree::Object(server));
//! }
//! assert!(root.is_object());
//! ```

use indexmap::IndexMap;
use serde::ser::{Serialize, SerializeMap, SerializeSeq, Serializer};

/// A numeric leaf (integer or float).
#[derive(Debug, Clone, PartialEq)]
pub enum TreeNumber {
    Integer(i64),
    Float(f64),
}

impl std::fmt::Display for TreeNumber {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            TreeNumber::Integer(i) => write!(f, "{}", i),
            TreeNumber::Float(fl) => write!(f, "{}", fl),
        }
    }
}

/// A nested key/value tree.
#[derive(Debug, Clone, PartialEq)]
pub enum Tree {
    /// Ordered mapping from segment name to child tree
    Object(IndexMap<String, Tree>),
    /// Array, treated as an opaque leaf
    Array(Vec<Tree>),
    String(String),
    Number(TreeNumber),
    Boolean(bool),
    Null,
}

impl Default for Tree {
    fn default() -> Self {
        Tree::object()
    }
}

impl Tree {
    /// Creates an empty mapping.
    pub fn object() -> Self {
        Tree::Object(IndexMap::new())
    }

    /// Returns true if this value is a mapping.
    ///
    /// ```
    /// use dotquill::document::node::Tree;
    ///
    /// assert!(Tree::object().is_object());
    /// assert!(!Tree::from(42).is_object());
    /// ```
    pub fn is_object(&self) -> bool {
        matches!(self, Tree::Object(_))
    }

    pub fn is_null(&self) -> bool {
        matches!(self, Tree::Null)
    }

    pub fn as_object(&self) -> Option<&IndexMap<String, Tree>> {
        match self {
            Tree::Object(entries) => Some(entries),
            _ => None,
        }
    }

    pub fn as_object_mut(&mut self) -> Option<&mut IndexMap<String, Tree>> {
        match self {
            Tree::Object(entries) => Some(entries),
            _ => None,
        }
    }

    pub fn as_str(&self) -> Option<&str> {
        match self {
            Tree::String(s) => Some(s),
            _ => None,
        }
    }

    /// Short name of the value's kind, used in error messages.
    pub fn type_name(&self) -> &'static str {
        match self {
            Tree::Object(_) => "object",
            Tree::Array(_) => "array",
            Tree::String(_) => "string",
            Tree::Number(_) => "number",
            Tree::Boolean(_) => "boolean",
            Tree::Null => "null",
        }
    }
}

impl Serialize for Tree {
    fn serialize<S: Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        match self {
            Tree::Object(entries) => {
                let mut map = serializer.serialize_map(Some(entries.len()))?;
                for (key, value) in entries {
                    map.serialize_entry(key, value)?;
                }
                map.end()
            }
            Tree::Array(items) => {
                let mut seq = serializer.serialize_seq(Some(items.len()))?;
                for item in items {
                    seq.serialize_element(item)?;
                }
                seq.end()
            }
            Tree::String(s) => serializer.serialize_str(s),
            Tree::Number(TreeNumber::Integer(i)) => serializer.serialize_i64(*i),
            Tree::Number(TreeNumber::Float(f)) => serializer.serialize_f64(*f),
            Tree::Boolean(b) => serializer.serialize_bool(*b),
            Tree::Null => serializer.serialize_unit(),
        }
    }
}

impl From<&str> for Tree {
    fn from(value: &str) -> Self {
        Tree::String(value.to_string())
    }
}

impl From<String> for Tree {
    fn from(value: String) -> Self {
        Tree::String(value)
    }
}

impl From<i64> for Tree {
    fn from(value: i64) -> Self {
        Tree::Number(TreeNumber::Integer(value))
    }
}

impl From<i32> for Tree {
    fn from(value: i32) -> Self {
        Tree::Number(TreeNumber::Integer(value.into()))
    }
}

impl From<f64> for Tree {
    fn from(value: f64) -> Self {
        Tree::Number(TreeNumber::Float(value))
    }
}

impl From<bool> for Tree {
    fn from(value: bool) -> Self {
        Tree::Boolean(value)
    }
}

impl From<Vec<Tree>> for Tree {
    fn from(value: Vec<Tree>) -> Self {
        Tree::Array(value)
    }
}

impl From<IndexMap<String, Tree>> for Tree {
    fn from(value: IndexMap<String, Tree>) -> Self {
        Tree::Object(value)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_default_is_empty_object() {
        let tree = Tree::default();
        assert_eq!(tree.as_object().map(|entries| entries.len()), Some(0));
    }

    #[test]
    fn test_number_display() {
        assert_eq!(format!("{}", TreeNumber::Integer(42)), "42");
        assert_eq!(format!("{}", TreeNumber::Float(42.5)), "42.5");
    }

    #[test]
    fn test_type_names() {
        assert_eq!(Tree::object().type_name(), "object");
        assert_eq!(Tree::Array(vec![]).type_name(), "array");
        assert_eq!(Tree::from("x").type_name(), "string");
        assert_eq!(Tree::from(1.5).type_name(), "number");
        assert_eq!(Tree::from(true).type_name(), "boolean");
        assert_eq!(Tree::Null.type_name(), "null");
    }

    #[test]
    fn test_serialize_preserves_key_order() {
        let mut entries = IndexMap::new();
        entries.insert("zeta".to_string(), Tree::from(1));
        entries.insert("alpha".to_string(), Tree::Null);
        entries.insert("list".to_string(), Tree::Array(vec![Tree::from("a"), Tree::from(false)]));
        let json = serde_json::to_string(&Tree::Object(entries)).unwrap();
        assert_eq!(json, r#"{"zeta":1,"alpha":null,"list":["a",false]}"#);
    }
}
