//! dotquill - dot-notation access to nested configuration trees.
//!
//! Paths join key names with `.`; a literal dot inside one key is written
//! `\.`. On top of the path tokenizer the crate provides stateless
//! read/write/exists functions, flatten/unflatten transforms, a [`Store`]
//! that owns one tree, and multi-criteria search.
//!
//! ```
//! use dotquill::{Criteria, Store, Tree};
//!
//! let mut store = Store::new();
//! store.write(r"escaped\.key.level.nested", "x");
//! assert_eq!(store.read(r"escaped\.key.level.nested"), Some(&Tree::from("x")));
//! assert_eq!(store.get_keys(r"escaped\.key.level"), vec!["escaped.key", "level"]);
//!
//! let matches = store.has(&Criteria::new().with_like("level"));
//! assert_eq!(matches.len(), 2);
//! ```

pub mod config;
pub mod document;
pub mod dotpath;
pub mod file;
pub mod search;
pub mod store;

pub use document::flatten::{flatten, unflatten};
pub use document::node::{Tree, TreeNumber};
pub use dotpath::{exists, read, write, DotPathError};
pub use search::{has, Criteria, MatchKind, SearchMatch};
pub use store::Store;
