//! Multi-criteria search over the key space of a tree.
//!
//! Criteria are tested independently rather than intersected:
//!
//! - `path` - resolve one exact path
//! - `like` - substring of a generated escaped path
//! - `keywords` - any keyword inside a generated path or a string value
//! - `regex` - pattern found in a generated escaped path

pub mod criteria;
pub mod matcher;

pub use criteria::{parse_regex, Criteria};
pub use matcher::{has, MatchKind, SearchMatch};
