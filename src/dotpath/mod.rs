//! Dot-notation paths over nested trees.
//!
//! A path addresses a location in a [`Tree`](crate::document::node::Tree) by
//! joining key names with `.`. A literal dot inside one key is written `\.`.
//!
//! # Examples
//!
//! ```text
//! // server.port                 - key "port" inside "server"
//! // logging.file\.name          - key "file.name" inside "logging"
//! // a\.b.c\.d.e                 - keys "a.b" -> "c.d" -> "e"
//! ```
//!
//! Escaping only covers dots. A key that itself ends in a backslash cannot be
//! told apart from an escaped dot once joined into a path.

pub mod error;
pub mod tokenizer;
pub mod traversal;

pub use error::DotPathError;
pub use tokenizer::{escape, join, split, unescape, Tokenizer};
pub use traversal::{exists, read, search, write};
