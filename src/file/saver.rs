//! Document saving.
//!
//! Serializes `Tree` values as JSON, YAML, or TOML and writes them to disk
//! atomically, with optional backups and gzip compression.

use super::{is_gzipped, DocumentFormat};
use crate::config::Config;
use crate::document::node::Tree;
use anyhow::{Context, Result};
use serde::Serialize;
use std::fs;
use std::path::{Path, PathBuf};

/// Serializes a tree in the given format.
///
/// JSON output honours `indent_size` and `compact_output` from `config`.
/// YAML and TOML use their libraries' standard layout. The output always
/// ends with a newline.
///
/// # Errors
///
/// TOML cannot represent null values or a non-table root; such trees fail
/// to serialize.
pub fn serialize_tree(tree: &Tree, format: DocumentFormat, config: &Config) -> Result<String> {
    let mut text = match format {
        DocumentFormat::Json if config.compact_output => {
            serde_json::to_string(tree).context("Failed to serialize JSON")?
        }
        DocumentFormat::Json => {
            let indent = " ".repeat(config.indent_size);
            let formatter = serde_json::ser::PrettyFormatter::with_indent(indent.as_bytes());
            let mut buffer = Vec::new();
            let mut serializer = serde_json::Serializer::with_formatter(&mut buffer, formatter);
            tree.serialize(&mut serializer)
                .context("Failed to serialize JSON")?;
            String::from_utf8(buffer).context("Serialized JSON is not UTF-8")?
        }
        DocumentFormat::Yaml => serde_yaml::to_string(tree).context("Failed to serialize YAML")?,
        DocumentFormat::Toml => toml::to_string_pretty(tree).context("Failed to serialize TOML")?,
    };

    if !text.ends_with('\n') {
        text.push('\n');
    }
    Ok(text)
}

/// Saves a tree to a file.
///
/// The format is inferred from the file name, falling back to
/// `config.output_format`. Targets ending in `.gz` are compressed.
///
/// # Examples
///
/// ```no_run
/// use dotquill::config::Config;
/// use dotquill::document::node::Tree;
/// use dotquill::file::saver::save_tree_file;
///
/// save_tree_file("output.json", &Tree::object(), &Config::default()).unwrap();
/// ```
///
/// # Errors
///
/// This function will return an error if:
/// - Backup creation fails (if requested)
/// - Serialization fails
/// - Writing or renaming the temp file fails
pub fn save_tree_file<P: AsRef<Path>>(path: P, tree: &Tree, config: &Config) -> Result<()> {
    let path = path.as_ref();
    let format = DocumentFormat::from_path(path).unwrap_or(config.output_format);
    let text = serialize_tree(tree, format, config)?;

    if config.create_backup && path.exists() {
        create_backup(path)?;
    }

    log::debug!("saving {} as {}", path.display(), format);
    write_file_atomic(path, text.as_bytes(), is_gzipped(path))
}

/// Returns `path` with `suffix` appended to its full file name.
fn with_name_suffix(path: &Path, suffix: &str) -> Result<PathBuf> {
    let original_name = path
        .file_name()
        .and_then(|n| n.to_str())
        .ok_or_else(|| anyhow::anyhow!("Invalid file name"))?;
    Ok(path.with_file_name(format!("{}.{}", original_name, suffix)))
}

/// Creates a backup of a file by copying it with a .bak extension.
fn create_backup<P: AsRef<Path>>(path: P) -> Result<()> {
    let path = path.as_ref();
    let backup_path = with_name_suffix(path, "bak")?;
    fs::copy(path, backup_path).context("Failed to create backup")?;
    Ok(())
}

/// Writes data to a temp file next to `path`, then renames it into place.
fn write_file_atomic<P: AsRef<Path>>(path: P, data: &[u8], compress: bool) -> Result<()> {
    use flate2::write::GzEncoder;
    use flate2::Compression;
    use std::io::Write;

    let path = path.as_ref();
    let temp_path = with_name_suffix(path, "tmp")?;

    if compress {
        let file = fs::File::create(&temp_path).context("Failed to create temp file")?;
        let mut encoder = GzEncoder::new(file, Compression::default());
        encoder
            .write_all(data)
            .context("Failed to write compressed data")?;
        encoder.finish().context("Failed to finish compression")?;
    } else {
        fs::write(&temp_path, data).context("Failed to write temp file")?;
    }

    fs::rename(&temp_path, path).context("Failed to rename temp file")?;

    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    #[test]
    fn test_serialize_json_indent() {
        let tree = Tree::from(json!({"a": {"b": 1}}));
        let config = Config {
            indent_size: 4,
            ..Config::default()
        };
        let text = serialize_tree(&tree, DocumentFormat::Json, &config).unwrap();
        assert_eq!(text, "{\n    \"a\": {\n        \"b\": 1\n    }\n}\n");
    }

    #[test]
    fn test_serialize_json_compact() {
        let tree = Tree::from(json!({"a": [1, 2]}));
        let config = Config {
            compact_output: true,
            ..Config::default()
        };
        let text = serialize_tree(&tree, DocumentFormat::Json, &config).unwrap();
        assert_eq!(text, "{\"a\":[1,2]}\n");
    }

    #[test]
    fn test_serialize_yaml() {
        let tree = Tree::from(json!({"a": {"b": "x"}}));
        let text = serialize_tree(&tree, DocumentFormat::Yaml, &Config::default()).unwrap();
        assert_eq!(text, "a:\n  b: x\n");
    }

    #[test]
    fn test_serialize_toml_rejects_null() {
        let tree = Tree::from(json!({"a": null}));
        assert!(serialize_tree(&tree, DocumentFormat::Toml, &Config::default()).is_err());
    }

    #[test]
    fn test_create_backup() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("doc.json");
        fs::write(&path, "{}").unwrap();
        create_backup(&path).unwrap();
        assert_eq!(fs::read_to_string(dir.path().join("doc.json.bak")).unwrap(), "{}");
    }

    #[test]
    fn test_save_leaves_sibling_tmp_file_alone() {
        let dir = tempfile::tempdir().unwrap();
        let sibling = dir.path().join("doc.tmp");
        fs::write(&sibling, "keep me").unwrap();

        let path = dir.path().join("doc.json");
        save_tree_file(&path, &Tree::from(json!({"a": 1})), &Config::default()).unwrap();

        assert_eq!(fs::read_to_string(&sibling).unwrap(), "keep me");
        assert_eq!(fs::read_to_string(&path).unwrap(), "{\n  \"a\": 1\n}\n");
        assert!(!dir.path().join("doc.json.tmp").exists());
    }
}
