//! Configuration system for dotquill.
//!
//! Settings are read from `~/.config/dotquill/config.toml`. Every field has a
//! default, so a partial file (or none at all) is fine. Command-line flags
//! take precedence over the file.
//!
//! # Example
//!
//! ```
//! use dotquill::config::Config;
//! use dotquill::file::DocumentFormat;
//!
//! let config = Config::default();
//! assert_eq!(config.output_format, DocumentFormat::Json);
//! assert_eq!(config.indent_size, 2);
//!
//! let custom = Config {
//!     output_format: DocumentFormat::Yaml,
//!     ..Config::default()
//! };
//! ```

use crate::file::DocumentFormat;
use serde::{Deserialize, Serialize};

/// Configuration for the dotquill command-line tool.
///
/// * `output_format` - Format used to print documents (default: json)
/// * `indent_size` - Spaces per indentation level in JSON output (default: 2)
/// * `create_backup` - Create .bak files before saving in place (default: false)
/// * `compact_output` - Print JSON on a single line (default: false)
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Config {
    /// Format used to print documents
    #[serde(default)]
    pub output_format: DocumentFormat,

    /// Number of spaces per indentation level
    #[serde(default = "default_indent_size")]
    pub indent_size: usize,

    /// Create .bak files before saving
    #[serde(default)]
    pub create_backup: bool,

    /// Print JSON on a single line
    #[serde(default)]
    pub compact_output: bool,
}

/// Returns the default indentation size.
fn default_indent_size() -> usize {
    2
}

impl Default for Config {
    fn default() -> Self {
        Self {
            output_format: DocumentFormat::default(),
            indent_size: default_indent_size(),
            create_backup: false,
            compact_output: false,
        }
    }
}

impl Config {
    /// Returns the path to the config file.
    ///
    /// Uses `~/.config/dotquill/config.toml` on all platforms.
    pub fn config_path() -> Option<std::path::PathBuf> {
        dirs::home_dir().map(|mut path| {
            path.push(".config");
            path.push("dotquill");
            path.push("config.toml");
            path
        })
    }

    /// Loads configuration from the default config file.
    ///
    /// Returns the default configuration if the file doesn't exist or can't be read.
    pub fn load() -> Self {
        match Self::config_path() {
            Some(path) if path.exists() => Self::load_from(&path),
            _ => Self::default(),
        }
    }

    /// Loads configuration from a specific file, falling back to defaults.
    pub fn load_from(path: &std::path::Path) -> Self {
        match std::fs::read_to_string(path) {
            Ok(contents) => toml::from_str(&contents).unwrap_or_else(|e| {
                log::warn!("ignoring invalid config {}: {}", path.display(), e);
                Self::default()
            }),
            Err(e) => {
                log::debug!("cannot read config {}: {}", path.display(), e);
                Self::default()
            }
        }
    }

    /// Saves configuration to the default config file.
    ///
    /// Creates the config directory if it doesn't exist.
    pub fn save(&self) -> anyhow::Result<()> {
        let config_path = Self::config_path()
            .ok_or_else(|| anyhow::anyhow!("Could not determine config directory"))?;
        self.save_to(&config_path)
    }

    /// Saves configuration to a specific file.
    pub fn save_to(&self, path: &std::path::Path) -> anyhow::Result<()> {
        if let Some(parent) = path.parent() {
            std::fs::create_dir_all(parent)?;
        }

        let toml_string = toml::to_string_pretty(self)?;
        std::fs::write(path, toml_string)?;

        Ok(())
    }
}
