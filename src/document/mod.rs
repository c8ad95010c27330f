//! In-memory document model: the `Tree` value, its conversions from parsed
//! JSON/YAML/TOML, and the flatten/unflatten transforms.

pub mod convert;
pub mod flatten;
pub mod node;
