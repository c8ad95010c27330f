//! Dot-path tokenizer and key escaper.
//!
//! A path such as `server.tls\.cert.file` splits into the segments
//! `server`, `tls.cert`, and `file`: a `.` separates segments unless the
//! character immediately before it is a backslash.

/// Splits a dot path into decoded segment names.
pub struct Tokenizer<'a> {
    input: &'a str,
    position: usize,
    previous: Option<char>,
}

impl<'a> Tokenizer<'a> {
    /// Creates a tokenizer over the given path.
    pub fn new(path: &'a str) -> Self {
        Self {
            input: path,
            position: 0,
            previous: None,
        }
    }

    /// Splits `path` into its decoded segments.
    ///
    /// ```
    /// use dotquill::dotpath::Tokenizer;
    ///
    /// let segments = Tokenizer::split(r"escaped\.key.level.nested");
    /// assert_eq!(segments, vec!["escaped.key", "level", "nested"]);
    /// ```
    pub fn split(path: &str) -> Vec<String> {
        let mut tokenizer = Tokenizer::new(path);
        let mut segments = Vec::new();
        while let Some(raw) = tokenizer.next_raw_segment() {
            segments.push(unescape(&raw));
        }
        segments
    }

    fn peek(&self) -> Option<char> {
        self.input[self.position..].chars().next()
    }

    fn next(&mut self) -> Option<char> {
        let ch = self.peek()?;
        self.position += ch.len_utf8();
        Some(ch)
    }

    /// Returns the next undecoded segment, or `None` once the input is spent.
    ///
    /// An empty path and a trailing separator both yield an empty segment.
    fn next_raw_segment(&mut self) -> Option<String> {
        if self.position > self.input.len() {
            return None;
        }

        let mut raw = String::new();
        while let Some(ch) = self.next() {
            let escaped = self.previous == Some('\\');
            self.previous = Some(ch);
            if ch == '.' && !escaped {
                return Some(raw);
            }
            raw.push(ch);
        }

        // Step past the end so the final segment is emitted exactly once.
        self.position = self.input.len() + 1;
        Some(raw)
    }
}

/// Splits a dot path into decoded segment names.
pub fn split(path: &str) -> Vec<String> {
    Tokenizer::split(path)
}

/// Escapes every literal `.` in a segment name as `\.`.
///
/// Existing backslashes are left alone.
pub fn escape(segment: &str) -> String {
    segment.replace('.', "\\.")
}

/// Decodes every `\.` in a raw segment back to `.`.
pub fn unescape(segment: &str) -> String {
    segment.replace("\\.", ".")
}

/// Builds a dot path from decoded segment names.
pub fn join<S: AsRef<str>>(segments: &[S]) -> String {
    segments
        .iter()
        .map(|segment| escape(segment.as_ref()))
        .collect::<Vec<_>>()
        .join(".")
}

/// Appends one decoded segment to an already escaped path prefix.
pub(crate) fn child_path(prefix: &str, segment: &str) -> String {
    if prefix.is_empty() {
        escape(segment)
    } else {
        format!("{}.{}", prefix, escape(segment))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_split_plain_path() {
        assert_eq!(split("a.b.c"), vec!["a", "b", "c"]);
    }

    #[test]
    fn test_split_single_segment() {
        assert_eq!(split("root"), vec!["root"]);
    }

    #[test]
    fn test_split_escaped_dot() {
        assert_eq!(split(r"a\.b.c\.d.e"), vec!["a.b", "c.d", "e"]);
    }

    #[test]
    fn test_split_empty_path() {
        assert_eq!(split(""), vec![""]);
    }

    #[test]
    fn test_split_trailing_and_leading_separator() {
        assert_eq!(split("a."), vec!["a", ""]);
        assert_eq!(split(".a"), vec!["", "a"]);
        assert_eq!(split("a..b"), vec!["a", "", "b"]);
    }

    #[test]
    fn test_split_double_backslash_still_escapes() {
        // The preceding character decides, so `\\.` is not a separator.
        assert_eq!(split(r"a\\.b"), vec![r"a\.b"]);
    }

    #[test]
    fn test_split_multibyte_segments() {
        assert_eq!(split("héllo.wörld\\.ü"), vec!["héllo", "wörld.ü"]);
    }

    #[test]
    fn test_escape_and_unescape() {
        assert_eq!(escape("tester.makeup"), r"tester\.makeup");
        assert_eq!(escape("plain"), "plain");
        assert_eq!(unescape(r"tester\.makeup"), "tester.makeup");
    }

    #[test]
    fn test_escape_round_trip() {
        for name in ["", ".", "a.b", "..x..", "no dots", "trailing."] {
            assert_eq!(unescape(&escape(name)), name);
            assert_eq!(split(&escape(name)), vec![name.to_string()]);
        }
    }

    #[test]
    fn test_join_escapes_segments() {
        assert_eq!(join(&["test", "tester.makeup", "testing"]), r"test.tester\.makeup.testing");
        assert_eq!(split(&join(&["a.b", "c"])), vec!["a.b", "c"]);
    }

    #[test]
    fn test_child_path() {
        assert_eq!(child_path("", "a.b"), r"a\.b");
        assert_eq!(child_path("root", "leaf"), "root.leaf");
    }
}
