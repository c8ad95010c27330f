//! File I/O for configuration documents.
//!
//! This module loads JSON, YAML, and TOML documents (optionally gzipped) into
//! `Tree` values and writes trees back out with atomic writes and optional
//! backups.

pub mod loader;
pub mod saver;

use clap::ValueEnum;
use serde::{Deserialize, Serialize};
use std::path::Path;

/// Serialization format of a document.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize, ValueEnum)]
#[serde(rename_all = "lowercase")]
pub enum DocumentFormat {
    #[default]
    Json,
    Yaml,
    Toml,
}

impl DocumentFormat {
    /// Infers the format from a file name, looking through a trailing `.gz`.
    ///
    /// - `config.json` → `Json`
    /// - `values.yml.gz` → `Yaml`
    /// - `Cargo.toml` → `Toml`
    pub fn from_path<P: AsRef<Path>>(path: P) -> Option<Self> {
        let name = path.as_ref().to_string_lossy().to_lowercase();
        let base = name.strip_suffix(".gz").unwrap_or(&name);

        if base.ends_with(".json") {
            Some(DocumentFormat::Json)
        } else if base.ends_with(".yaml") || base.ends_with(".yml") {
            Some(DocumentFormat::Yaml)
        } else if base.ends_with(".toml") {
            Some(DocumentFormat::Toml)
        } else {
            None
        }
    }
}

impl std::fmt::Display for DocumentFormat {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        let name = match self {
            DocumentFormat::Json => "json",
            DocumentFormat::Yaml => "yaml",
            DocumentFormat::Toml => "toml",
        };
        write!(f, "{}", name)
    }
}

/// Returns true when the path names a gzip-compressed file.
pub(crate) fn is_gzipped<P: AsRef<Path>>(path: P) -> bool {
    path.as_ref()
        .extension()
        .and_then(|ext| ext.to_str())
        .map(|ext| ext.eq_ignore_ascii_case("gz"))
        .unwrap_or(false)
}
