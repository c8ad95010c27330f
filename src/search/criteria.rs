//! Search criteria for multi-criteria lookups.

use crate::document::node::Tree;
use crate::dotpath::error::DotPathError;
use regex::{Regex, RegexBuilder};

/// The recognized criteria keys of a criteria document.
pub const CRITERIA_KEYS: [&str; 4] = ["path", "like", "keywords", "regex"];

/// A set of independent search criteria.
///
/// Every present criterion is tested on its own; a node that satisfies two
/// criteria is reported twice.
///
/// # Example
///
/// ```
/// use dotquill::search::Criteria;
///
/// let criteria = Criteria::new()
///     .with_like("port")
///     .with_keywords(["localhost", "127.0.0.1"]);
/// assert!(!criteria.is_empty());
/// ```
#[derive(Debug, Clone, Default)]
pub struct Criteria {
    /// Exact path to resolve
    pub path: Option<String>,
    /// Substring that must appear in a generated path
    pub like: Option<String>,
    /// Substrings matched against generated paths and string values
    pub keywords: Option<Vec<String>>,
    /// Pattern searched for in generated paths
    pub regex: Option<Regex>,
}

impl Criteria {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn with_path(mut self, path: impl Into<String>) -> Self {
        self.path = Some(path.into());
        self
    }

    pub fn with_like(mut self, like: impl Into<String>) -> Self {
        self.like = Some(like.into());
        self
    }

    pub fn with_keywords<I, S>(mut self, keywords: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        self.keywords = Some(keywords.into_iter().map(Into::into).collect());
        self
    }

    pub fn with_regex(mut self, regex: Regex) -> Self {
        self.regex = Some(regex);
        self
    }

    /// Compiles `pattern` (plain, or `/pattern/flags`) and sets it as the
    /// regex criterion.
    pub fn with_regex_str(self, pattern: &str) -> Result<Self, DotPathError> {
        Ok(self.with_regex(parse_regex(pattern)?))
    }

    /// True when no criterion is set.
    pub fn is_empty(&self) -> bool {
        self.path.is_none() && !self.needs_traversal()
    }

    /// True when a full walk of the tree is required.
    pub fn needs_traversal(&self) -> bool {
        self.like.is_some() || self.keywords.is_some() || self.regex.is_some()
    }

    /// Builds criteria from a dynamically typed document such as
    /// `{"like": "port", "keywords": ["a", "b"]}`.
    ///
    /// Null fields count as absent and unknown keys are ignored.
    ///
    /// # Errors
    ///
    /// - `InvalidCriteria` when `tree` is not an object, carries none of the
    ///   recognized keys, or holds a malformed `like`, `keywords`, or `regex`
    /// - `InvalidPath` when `path` is present but not a string
    pub fn from_tree(tree: &Tree) -> Result<Self, DotPathError> {
        let entries = tree.as_object().ok_or_else(|| {
            DotPathError::invalid_criteria(format!(
                "criteria must be an object, found {}",
                tree.type_name()
            ))
        })?;

        let field = |name: &str| entries.get(name).filter(|value| !value.is_null());

        if CRITERIA_KEYS.iter().all(|&key| field(key).is_none()) {
            return Err(DotPathError::invalid_criteria(format!(
                "expected at least one of {}",
                CRITERIA_KEYS.join(", ")
            )));
        }

        for key in entries.keys() {
            if !CRITERIA_KEYS.contains(&key.as_str()) {
                log::debug!("ignoring unknown criteria key '{}'", key);
            }
        }

        let mut criteria = Criteria::new();

        if let Some(path) = field("path") {
            let path = path.as_str().ok_or_else(|| {
                DotPathError::invalid_path(format!(
                    "path must be a string, found {}",
                    path.type_name()
                ))
            })?;
            criteria.path = Some(path.to_string());
        }

        if let Some(like) = field("like") {
            let like = like.as_str().ok_or_else(|| {
                DotPathError::invalid_criteria(format!(
                    "like must be a string, found {}",
                    like.type_name()
                ))
            })?;
            criteria.like = Some(like.to_string());
        }

        if let Some(keywords) = field("keywords") {
            criteria.keywords = Some(parse_keywords(keywords)?);
        }

        if let Some(regex) = field("regex") {
            let pattern = regex.as_str().ok_or_else(|| {
                DotPathError::invalid_criteria(format!(
                    "regex must be a string, found {}",
                    regex.type_name()
                ))
            })?;
            criteria.regex = Some(parse_regex(pattern)?);
        }

        Ok(criteria)
    }
}

/// Accepts a single string or an array of strings.
fn parse_keywords(value: &Tree) -> Result<Vec<String>, DotPathError> {
    match value {
        Tree::String(keyword) => Ok(vec![keyword.clone()]),
        Tree::Array(items) => items
            .iter()
            .map(|item| {
                item.as_str().map(str::to_string).ok_or_else(|| {
                    DotPathError::invalid_criteria(format!(
                        "keywords must be strings, found {}",
                        item.type_name()
                    ))
                })
            })
            .collect(),
        other => Err(DotPathError::invalid_criteria(format!(
            "keywords must be a string or an array of strings, found {}",
            other.type_name()
        ))),
    }
}

const REGEX_FLAGS: &str = "imsgu";

/// Compiles a regex given either as a bare pattern or as `/pattern/flags`.
///
/// The slash form is only recognized when everything after the last `/` is a
/// flag letter; `/usr/bin` is a bare pattern. Supported flags are `i`, `m`,
/// and `s`; `g` and `u` are accepted and have no effect.
pub fn parse_regex(pattern: &str) -> Result<Regex, DotPathError> {
    let (body, flags) = split_slash_form(pattern).unwrap_or((pattern, ""));

    let mut builder = RegexBuilder::new(body);
    for flag in flags.chars() {
        match flag {
            'i' => {
                builder.case_insensitive(true);
            }
            'm' => {
                builder.multi_line(true);
            }
            's' => {
                builder.dot_matches_new_line(true);
            }
            // g, u
            _ => {}
        }
    }

    builder
        .build()
        .map_err(|e| DotPathError::invalid_criteria(format!("invalid regex: {}", e)))
}

fn split_slash_form(pattern: &str) -> Option<(&str, &str)> {
    let rest = pattern.strip_prefix('/')?;
    let end = rest.rfind('/')?;
    let flags = &rest[end + 1..];
    if flags.chars().all(|c| REGEX_FLAGS.contains(c)) {
        Some((&rest[..end], flags))
    } else {
        None
    }
}
