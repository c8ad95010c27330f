//! Multi-criteria search over a nested tree.

use super::criteria::Criteria;
use crate::document::node::Tree;
use crate::dotpath::error::DotPathError;
use crate::dotpath::tokenizer;
use crate::dotpath::traversal;
use indexmap::IndexMap;
use serde::Serialize;

/// Which criterion produced a match.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "lowercase")]
pub enum MatchKind {
    Path,
    Like,
    Keywords,
    Regex,
}

impl MatchKind {
    pub fn as_str(&self) -> &'static str {
        match self {
            MatchKind::Path => "path",
            MatchKind::Like => "like",
            MatchKind::Keywords => "keywords",
            MatchKind::Regex => "regex",
        }
    }
}

/// One search hit: the node's path and its value (a whole subtree for
/// intermediate mappings).
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct SearchMatch<'a> {
    pub path: String,
    pub kind: MatchKind,
    pub value: &'a Tree,
}

/// Runs every criterion in `criteria` against `tree`.
///
/// The `path` criterion contributes at most one match, reported with the
/// caller's path string verbatim. The remaining criteria are tested at every
/// node of a pre-order walk, in the order `like`, `keywords`, `regex`, and
/// each satisfied criterion adds its own match. Results are not deduplicated.
///
/// # Errors
///
/// `InvalidArgument` when the root is neither a mapping nor null.
///
/// # Example
///
/// ```
/// use dotquill::document::node::Tree;
/// use dotquill::search::{has, Criteria};
/// use serde_json::json;
///
/// let tree = Tree::from(json!({"example": {"like": {"path": "test"}}}));
/// let matches = has(&tree, &Criteria::new().with_like("like")).unwrap();
/// let paths: Vec<&str> = matches.iter().map(|m| m.path.as_str()).collect();
/// assert_eq!(paths, vec!["example.like", "example.like.path"]);
/// ```
pub fn has<'a>(tree: &'a Tree, criteria: &Criteria) -> Result<Vec<SearchMatch<'a>>, DotPathError> {
    match tree {
        Tree::Object(entries) => Ok(has_in(entries, criteria)),
        Tree::Null => Ok(Vec::new()),
        other => Err(DotPathError::invalid_argument(format!(
            "cannot search a {}, expected an object",
            other.type_name()
        ))),
    }
}

pub(crate) fn has_in<'a>(entries: &'a IndexMap<String, Tree>, criteria: &Criteria) -> Vec<SearchMatch<'a>> {
    let mut matches = Vec::new();

    if let Some(path) = &criteria.path {
        if let Some(value) = traversal::lookup(entries, &tokenizer::split(path)) {
            matches.push(SearchMatch {
                path: path.clone(),
                kind: MatchKind::Path,
                value,
            });
        }
    }

    if criteria.needs_traversal() {
        visit(entries, "", criteria, &mut matches);
    }

    log::debug!("search {:?} produced {} matches", criteria, matches.len());
    matches
}

fn visit<'a>(
    entries: &'a IndexMap<String, Tree>,
    prefix: &str,
    criteria: &Criteria,
    matches: &mut Vec<SearchMatch<'a>>,
) {
    for (key, value) in entries {
        let path = tokenizer::child_path(prefix, key);
        test_node(&path, value, criteria, matches);
        if let Tree::Object(children) = value {
            visit(children, &path, criteria, matches);
        }
    }
}

fn test_node<'a>(path: &str, value: &'a Tree, criteria: &Criteria, matches: &mut Vec<SearchMatch<'a>>) {
    let mut hit = |kind| {
        matches.push(SearchMatch {
            path: path.to_string(),
            kind,
            value,
        })
    };

    if let Some(like) = &criteria.like {
        if path.contains(like.as_str()) {
            hit(MatchKind::Like);
        }
    }

    if let Some(keywords) = &criteria.keywords {
        let text = value.as_str();
        let found = keywords.iter().any(|keyword| {
            path.contains(keyword.as_str()) || text.is_some_and(|s| s.contains(keyword.as_str()))
        });
        if found {
            hit(MatchKind::Keywords);
        }
    }

    if let Some(regex) = &criteria.regex {
        if regex.is_match(path) {
            hit(MatchKind::Regex);
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    fn sample() -> Tree {
        Tree::from(json!({
            "example": {"like": {"path": "test"}},
            "other": "holds a keyword"
        }))
    }

    fn paths<'a>(matches: &'a [SearchMatch<'_>]) -> Vec<&'a str> {
        matches.iter().map(|m| m.path.as_str()).collect()
    }

    #[test]
    fn test_empty_criteria_yields_nothing() {
        assert!(has(&sample(), &Criteria::new()).unwrap().is_empty());
    }

    #[test]
    fn test_path_criterion_uses_caller_path() {
        let tree = sample();
        let matches = has(&tree, &Criteria::new().with_path("example.like.path")).unwrap();
        assert_eq!(matches.len(), 1);
        assert_eq!(matches[0].kind, MatchKind::Path);
        assert_eq!(matches[0].value, &Tree::from("test"));
    }

    #[test]
    fn test_path_criterion_missing() {
        let tree = sample();
        assert!(has(&tree, &Criteria::new().with_path("example.nope")).unwrap().is_empty());
    }

    #[test]
    fn test_keywords_match_values_and_paths() {
        let tree = sample();
        let matches = has(&tree, &Criteria::new().with_keywords(["keyword", "path"])).unwrap();
        assert_eq!(paths(&matches), vec!["example.like.path", "other"]);
        assert!(matches.iter().all(|m| m.kind == MatchKind::Keywords));
    }

    #[test]
    fn test_node_reported_once_per_criterion() {
        let tree = sample();
        let criteria = Criteria::new()
            .with_like("other")
            .with_keywords(["other"])
            .with_regex_str("^other$")
            .unwrap();
        let matches = has(&tree, &criteria).unwrap();
        let kinds: Vec<MatchKind> = matches.iter().map(|m| m.kind).collect();
        assert_eq!(kinds, vec![MatchKind::Like, MatchKind::Keywords, MatchKind::Regex]);
    }

    #[test]
    fn test_arrays_are_visited_but_not_descended() {
        let tree = Tree::from(json!({"items": [{"needle": 1}]}));
        assert!(has(&tree, &Criteria::new().with_like("needle")).unwrap().is_empty());
        assert_eq!(
            paths(&has(&tree, &Criteria::new().with_like("items")).unwrap()),
            vec!["items"]
        );
    }

    #[test]
    fn test_escaped_paths_are_generated() {
        let tree = Tree::from(json!({"a.b": {"c": 1}}));
        let matches = has(&tree, &Criteria::new().with_like("\\.")).unwrap();
        assert_eq!(paths(&matches), vec![r"a\.b", r"a\.b.c"]);
    }

    #[test]
    fn test_rejects_scalar_root() {
        assert!(has(&Tree::from(1), &Criteria::new().with_like("x")).is_err());
    }
}
