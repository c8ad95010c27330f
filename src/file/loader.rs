//! Document loading.
//!
//! Reads JSON, YAML, or TOML from files or any reader and converts the
//! parsed value into a `Tree`.

use super::{is_gzipped, DocumentFormat};
use crate::document::node::Tree;
use anyhow::{Context, Result};
use std::fs;
use std::io::Read;
use std::path::Path;

/// Loads and parses a document from the filesystem.
///
/// The format is inferred from the file name; `.gz` files are decompressed
/// first. Use [`load_tree_file_as`] when the name carries no usable
/// extension.
///
/// # Examples
///
/// ```no_run
/// use dotquill::file::loader::load_tree_file;
///
/// let tree = load_tree_file("config.yaml").unwrap();
/// ```
///
/// # Errors
///
/// This function will return an error if:
/// - The format cannot be inferred from the file name
/// - The file cannot be read or decompressed
/// - The contents are not valid for the format
pub fn load_tree_file<P: AsRef<Path>>(path: P) -> Result<Tree> {
    let path = path.as_ref();
    let format = DocumentFormat::from_path(path).with_context(|| {
        format!(
            "Cannot infer document format from '{}', pass it explicitly",
            path.display()
        )
    })?;
    load_tree_file_as(path, format)
}

/// Loads a document from the filesystem in an explicit format.
pub fn load_tree_file_as<P: AsRef<Path>>(path: P, format: DocumentFormat) -> Result<Tree> {
    let path = path.as_ref();
    log::debug!("loading {} as {}", path.display(), format);

    let content = if is_gzipped(path) {
        read_gzipped_file(path)?
    } else {
        fs::read_to_string(path).context("Failed to read file")?
    };

    parse_tree(&content, format).with_context(|| format!("Failed to parse {}", path.display()))
}

/// Reads a whole document from `reader`, e.g. stdin.
///
/// Input starting with the gzip magic bytes is decompressed transparently.
pub fn load_tree_from_reader<R: Read>(mut reader: R, format: DocumentFormat) -> Result<Tree> {
    let mut buffer = Vec::new();
    reader
        .read_to_end(&mut buffer)
        .context("Failed to read input")?;

    let content = if buffer.starts_with(&[0x1f, 0x8b]) {
        decompress_gzip_bytes(&buffer)?
    } else {
        String::from_utf8(buffer).context("Invalid UTF-8 in input")?
    };

    parse_tree(&content, format)
}

/// Parses document text in the given format.
///
/// An empty YAML document parses to `Tree::Null`.
pub fn parse_tree(content: &str, format: DocumentFormat) -> Result<Tree> {
    let tree = match format {
        DocumentFormat::Json => {
            let value: serde_json::Value =
                serde_json::from_str(content).context("Invalid JSON")?;
            Tree::from(value)
        }
        DocumentFormat::Yaml => {
            let value: serde_yaml::Value =
                serde_yaml::from_str(content).context("Invalid YAML")?;
            Tree::from(value)
        }
        DocumentFormat::Toml => {
            let value: toml::Value = toml::from_str(content).context("Invalid TOML")?;
            Tree::from(value)
        }
    };
    Ok(tree)
}

/// Reads and decompresses a gzipped file.
fn read_gzipped_file<P: AsRef<Path>>(path: P) -> Result<String> {
    use flate2::read::GzDecoder;

    let file = fs::File::open(path).context("Failed to open gzipped file")?;
    let mut decoder = GzDecoder::new(file);
    let mut content = String::new();
    decoder
        .read_to_string(&mut content)
        .context("Failed to decompress gzipped file - file may be corrupted")?;
    Ok(content)
}

/// Decompresses gzip-encoded bytes to a UTF-8 string.
fn decompress_gzip_bytes(bytes: &[u8]) -> Result<String> {
    use flate2::read::GzDecoder;

    let mut decoder = GzDecoder::new(bytes);
    let mut content = String::new();
    decoder
        .read_to_string(&mut content)
        .context("Failed to decompress gzipped input")?;
    Ok(content)
}
