//! Stateful owner of one tree with path-based accessors.
//!
//! A `Store` is constructed explicitly and owns its tree outright; there is no
//! shared default instance. Callers that need one store across threads wrap
//! it themselves (for example in a `Mutex`).
//!
//! # Example
//!
//! ```
//! use dotquill::store::Store;
//! use dotquill::document::node::Tree;
//!
//! let mut store = Store::new();
//! store.write("nest.secondnest.third.nest", Tree::from(10));
//! assert_eq!(store.read("nest.secondnest.third.nest"), Some(&Tree::from(10)));
//! assert_eq!(store.read("nest.fakekey"), None);
//! ```

use crate::document::flatten::{flatten, flatten_entries, unflatten};
use crate::document::node::Tree;
use crate::dotpath::error::DotPathError;
use crate::dotpath::{tokenizer, traversal};
use crate::search::{self, Criteria, SearchMatch};
use indexmap::IndexMap;

/// Owns one nested tree, initially an empty mapping.
///
/// The tree is kept nested internally. `init` normalizes its input through
/// flatten and unflatten so empty mappings and null leaves are dropped the
/// same way a flattened representation would drop them.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct Store {
    root: IndexMap<String, Tree>,
}

impl Store {
    /// Creates a store holding an empty mapping.
    pub fn new() -> Self {
        Self::default()
    }

    /// Creates a store initialized from `tree`.
    ///
    /// # Errors
    ///
    /// `InvalidArgument` when `tree` is neither a mapping nor null.
    pub fn from_tree(tree: &Tree) -> Result<Self, DotPathError> {
        let mut store = Self::new();
        store.init(tree)?;
        Ok(store)
    }

    /// Replaces the owned tree with a normalized copy of `tree`.
    ///
    /// The caller's tree is never aliased. On error the store is unchanged.
    pub fn init(&mut self, tree: &Tree) -> Result<(), DotPathError> {
        let flat = flatten(tree)?;
        log::debug!("store init with {} leaves", flat.len());
        if let Tree::Object(root) = unflatten(&flat) {
            self.root = root;
        }
        Ok(())
    }

    /// Returns the value at `path`, or `None` when any segment is absent.
    ///
    /// Values are kept nested, so a path that stops at an intermediate
    /// mapping returns that whole subtree. A store holding only flattened
    /// leaf paths would have nothing at such a path.
    pub fn read(&self, path: &str) -> Option<&Tree> {
        traversal::lookup(&self.root, &tokenizer::split(path))
    }

    /// Writes `value` at `path`, creating or replacing intermediates.
    pub fn write(&mut self, path: &str, value: impl Into<Tree>) {
        let segments = tokenizer::split(path);
        log::trace!("store write {:?}", segments);
        traversal::assign(&mut self.root, &segments, value.into());
    }

    /// Returns whether `path` resolves, even to a null value.
    pub fn has_key(&self, path: &str) -> bool {
        self.read(path).is_some()
    }

    /// Path lookup; behaves exactly like [`Store::read`].
    pub fn search(&self, path: &str) -> Option<&Tree> {
        self.read(path)
    }

    /// Decoded segments of `path`, as the tokenizer sees them.
    pub fn get_keys(&self, path: &str) -> Vec<String> {
        tokenizer::split(path)
    }

    /// Returns a detached deep copy of the owned tree.
    pub fn dump(&self) -> Tree {
        Tree::Object(self.root.clone())
    }

    /// The owned tree as a map from escaped path to leaf.
    pub fn flatten(&self) -> IndexMap<String, Tree> {
        flatten_entries(&self.root)
    }

    /// Multi-criteria search over the owned tree.
    pub fn has(&self, criteria: &Criteria) -> Vec<SearchMatch<'_>> {
        search::matcher::has_in(&self.root, criteria)
    }
}
