//! Ordered pattern cascade for location references.
//!
//! Every pattern uses the same capture contract: group 1 is the path token
//! (empty when the line names no file), group 2 the line number and group 3
//! the column. The table order is the precedence order.

use once_cell::sync::Lazy;
use regex::{Captures, Regex};
use tracing::trace;

use crate::types::{CandidateLine, RecognizedMatch};

/// Reference idioms recognized by the cascade, in precedence order.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum PatternFamily {
    /// `path:line:col`
    ColonDelimited,
    /// `"path", line N`
    QuotedLine,
    /// `path(line,col)` with an optional `-col2` range
    Parenthesized,
    /// `path line N:`
    LineKeyword,
    /// `path N:col`
    SpaceDelimited,
    /// `   N:col: message`
    LeadingCoordinates,
    /// `@@ -N,col +N,col @@`
    DiffHunk,
}

impl PatternFamily {
    /// Whether matches of this family never carry a path, so the file has
    /// to be recovered from an earlier line.
    pub fn is_location_only(&self) -> bool {
        matches!(self, Self::LeadingCoordinates | Self::DiffHunk)
    }
}

/// One recognizer of the cascade.
#[derive(Debug)]
pub struct Pattern {
    pub family: PatternFamily,
    regex: Regex,
    rejects_urls: bool,
}

impl Pattern {
    fn new(family: PatternFamily, pattern: &str) -> Self {
        Self {
            family,
            regex: Regex::new(pattern).unwrap_or_else(|e| panic!("invalid {:?} pattern: {}", family, e)),
            rejects_urls: false,
        }
    }

    fn rejecting_urls(mut self) -> Self {
        self.rejects_urls = true;
        self
    }

    /// First match of this pattern on `text`.
    pub fn recognize(&self, text: &str) -> Option<RecognizedMatch> {
        if self.rejects_urls && URL_PREFIX.is_match(text) {
            return None;
        }
        self.regex.captures(text).map(|caps| {
            // A column is meaningless without its line.
            let line_number = capture_number(&caps, 2);
            RecognizedMatch {
                raw_match_text: caps[0].to_string(),
                path_token: caps.get(1).map_or("", |m| m.as_str()).to_string(),
                line_number,
                column: line_number.and(capture_number(&caps, 3)),
            }
        })
    }
}

fn capture_number(caps: &Captures<'_>, index: usize) -> Option<u32> {
    caps.get(index).and_then(|m| m.as_str().parse().ok())
}

/// Text starting with an http(s) URL scheme.
pub static URL_PREFIX: Lazy<Regex> =
    Lazy::new(|| Regex::new(r"^https?://").expect("valid URL prefix regex"));

/// The cascade, most specific first.
pub static PATTERNS: Lazy<Vec<Pattern>> = Lazy::new(|| {
    vec![
        Pattern::new(
            PatternFamily::ColonDelimited,
            r"^([A-Za-z]:[\\/][\w./\\~-]+|[~./\\a-zA-Z_][\w./\\~-]+):(\d+)(?::(\d+))?",
        )
        .rejecting_urls(),
        Pattern::new(
            PatternFamily::QuotedLine,
            r#"["']([A-Za-z]:[\\/][^"]*|[~./\\a-zA-Z_][^"]*)["'],?\s+line:?\s+(\d+)"#,
        ),
        Pattern::new(
            PatternFamily::Parenthesized,
            r"([A-Za-z]:[\\/][\w./\\@~-]+|[~./\\a-zA-Z_][\w./\\@~-]+)\s*\((\d+),\s*(\d+)(?:-(\d+))?\)",
        ),
        Pattern::new(
            PatternFamily::LineKeyword,
            r"([A-Za-z]:[\\/]\S*|[~./\\a-zA-Z_]\S*[/.\\]\S*)\s+line\s+(\d+):",
        ),
        Pattern::new(
            PatternFamily::SpaceDelimited,
            r"([A-Za-z]:[\\/]\S*|[~./\\a-zA-Z_]\S*)\s+(\d+):(\d+)",
        ),
        Pattern::new(PatternFamily::LeadingCoordinates, r"^()\s+(\d+):(\d+).*$"),
        Pattern::new(
            PatternFamily::DiffHunk,
            r"^()@@\s+[-+](\d+),(\d+)\s+[-+](\d+),(\d+)\s+@@(.*$)",
        ),
    ]
});

/// A cascade hit together with the line it was found on.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct CascadeMatch<'a> {
    pub family: PatternFamily,
    pub recognized: RecognizedMatch,
    pub source_line: &'a CandidateLine,
}

/// Evaluates patterns against candidate lines in precedence order.
#[derive(Debug, Clone, Copy)]
pub struct PatternCascade {
    patterns: &'static [Pattern],
}

impl Default for PatternCascade {
    fn default() -> Self {
        Self::new()
    }
}

impl PatternCascade {
    pub fn new() -> Self {
        Self {
            patterns: PATTERNS.as_slice(),
        }
    }

    /// All hits, pattern priority first and candidate order second.
    pub fn matches<'a>(
        &self,
        lines: &'a [CandidateLine],
    ) -> impl Iterator<Item = CascadeMatch<'a>> + 'a {
        let patterns = self.patterns;
        patterns.iter().flat_map(move |pattern| {
            lines.iter().filter_map(move |line| {
                let recognized = pattern.recognize(&line.text)?;
                trace!(
                    "{:?} matched {:?} on line {}",
                    pattern.family,
                    recognized.raw_match_text,
                    line.first_line
                );
                Some(CascadeMatch {
                    family: pattern.family,
                    recognized,
                    source_line: line,
                })
            })
        })
    }

    /// The single highest priority hit.
    pub fn first_match<'a>(&self, lines: &'a [CandidateLine]) -> Option<CascadeMatch<'a>> {
        self.matches(lines).next()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn pattern(family: PatternFamily) -> &'static Pattern {
        PATTERNS.iter().find(|p| p.family == family).unwrap()
    }

    fn recognize(family: PatternFamily, text: &str) -> Option<RecognizedMatch> {
        pattern(family).recognize(text)
    }

    fn parts(m: &RecognizedMatch) -> (&str, Option<u32>, Option<u32>) {
        (m.path_token.as_str(), m.line_number, m.column)
    }

    #[test]
    fn test_table_order() {
        let families: Vec<_> = PATTERNS.iter().map(|p| p.family).collect();
        assert_eq!(
            families,
            vec![
                PatternFamily::ColonDelimited,
                PatternFamily::QuotedLine,
                PatternFamily::Parenthesized,
                PatternFamily::LineKeyword,
                PatternFamily::SpaceDelimited,
                PatternFamily::LeadingCoordinates,
                PatternFamily::DiffHunk,
            ]
        );
    }

    #[test]
    fn test_colon_delimited() {
        use PatternFamily::ColonDelimited as F;

        let m = recognize(F, "foo/bar.txt:123:45").unwrap();
        assert_eq!(parts(&m), ("foo/bar.txt", Some(123), Some(45)));

        let m = recognize(F, "./foo.txt:1").unwrap();
        assert_eq!(parts(&m), ("./foo.txt", Some(1), None));

        let m = recognize(F, r"C:\WINDOWS\System32\drivers\etc\hosts:4").unwrap();
        assert_eq!(parts(&m), (r"C:\WINDOWS\System32\drivers\etc\hosts", Some(4), None));

        let m = recognize(F, "~/.gitconfig:4").unwrap();
        assert_eq!(parts(&m), ("~/.gitconfig", Some(4), None));

        let m = recognize(F, "~/foo/bar.txt:123:45").unwrap();
        assert_eq!(parts(&m), ("~/foo/bar.txt", Some(123), Some(45)));

        assert!(recognize(F, "http://foo.txt:123:45").is_none());
        assert!(recognize(F, "https://host:8080/x").is_none());
        assert!(recognize(F, "error in foo.txt:1:2").is_none());
    }

    #[test]
    fn test_quoted_line() {
        use PatternFamily::QuotedLine as F;

        let m = recognize(F, r#"  File "foo/bar.txt", line 10, in <module>"#).unwrap();
        assert_eq!(parts(&m), ("foo/bar.txt", Some(10), None));

        let m = recognize(F, "'foo.txt', line: 1").unwrap();
        assert_eq!(parts(&m), ("foo.txt", Some(1), None));

        assert!(recognize(F, "foo.txt line 1").is_none());
    }

    #[test]
    fn test_parenthesized() {
        use PatternFamily::Parenthesized as F;

        let m = recognize(F, "foo/bar.txt(123,45)").unwrap();
        assert_eq!(parts(&m), ("foo/bar.txt", Some(123), Some(45)));

        let m = recognize(F, "./foo.txt(1, 2-5)").unwrap();
        assert_eq!(parts(&m), ("./foo.txt", Some(1), Some(2)));

        let m = recognize(F, "~/.vimrc(15,8)").unwrap();
        assert_eq!(parts(&m), ("~/.vimrc", Some(15), Some(8)));

        assert!(recognize(F, "foo.txt:1:2").is_none());
    }

    #[test]
    fn test_line_keyword() {
        use PatternFamily::LineKeyword as F;

        let m = recognize(F, "foo/bar.txt line 123: unexpected").unwrap();
        assert_eq!(parts(&m), ("foo/bar.txt", Some(123), None));

        let m = recognize(F, "~/foo.txt line 9:").unwrap();
        assert_eq!(parts(&m), ("~/foo.txt", Some(9), None));

        assert!(recognize(F, "./foo.js line 1:").is_some());
        assert!(recognize(F, "foo.txt line 1").is_none());
    }

    #[test]
    fn test_space_delimited() {
        use PatternFamily::SpaceDelimited as F;

        let m = recognize(F, "foo/bar.txt 123:45").unwrap();
        assert_eq!(parts(&m), ("foo/bar.txt", Some(123), Some(45)));

        let m = recognize(F, "~/foo.txt 7:3").unwrap();
        assert_eq!(parts(&m), ("~/foo.txt", Some(7), Some(3)));

        assert!(recognize(F, "foo.txt:1:2").is_none());
    }

    #[test]
    fn test_leading_coordinates() {
        use PatternFamily::LeadingCoordinates as F;

        let m = recognize(F, "  123:45: error message").unwrap();
        assert_eq!(parts(&m), ("", Some(123), Some(45)));

        assert!(recognize(F, "  1:2: info").is_some());
        assert!(recognize(F, "foo.txt 1:2").is_none());
    }

    #[test]
    fn test_diff_hunk() {
        use PatternFamily::DiffHunk as F;

        let m = recognize(F, "@@ -123,45 +67,89 @@ function foo").unwrap();
        assert_eq!(parts(&m), ("", Some(123), Some(45)));
        assert_eq!(m.raw_match_text, "@@ -123,45 +67,89 @@ function foo");

        assert!(recognize(F, "@@ -1,2 +3,4 @@").is_some());
        assert!(recognize(F, "foo.txt:1:2").is_none());
    }

    #[test]
    fn test_family_flags() {
        assert!(PatternFamily::DiffHunk.is_location_only());
        assert!(PatternFamily::LeadingCoordinates.is_location_only());
        assert!(!PatternFamily::ColonDelimited.is_location_only());
        assert!(!PatternFamily::SpaceDelimited.is_location_only());
    }

    #[test]
    fn test_out_of_range_line_drops_column() {
        let m = recognize(PatternFamily::ColonDelimited, "a.rs:99999999999:2").unwrap();
        assert_eq!(parts(&m), ("a.rs", None, None));

        let m = recognize(PatternFamily::Parenthesized, "a.rs(1,99999999999)").unwrap();
        assert_eq!(parts(&m), ("a.rs", Some(1), None));
    }

    #[test]
    fn test_pattern_priority_dominates_line_order() {
        let lines = vec![
            CandidateLine::new("x.rs 3:4", 1, 1),
            CandidateLine::new("y.rs:5:6", 1, 1),
        ];

        let hit = PatternCascade::new().first_match(&lines).unwrap();
        assert_eq!(hit.family, PatternFamily::ColonDelimited);
        assert_eq!(hit.recognized.path_token, "y.rs");
        assert_eq!(hit.source_line.text, "y.rs:5:6");
    }

    #[test]
    fn test_specific_family_wins_on_same_line() {
        let lines = vec![CandidateLine::new("a/b.rs:10:2 see c.rs 3:4", 1, 1)];

        let hit = PatternCascade::new().first_match(&lines).unwrap();
        assert_eq!(hit.family, PatternFamily::ColonDelimited);
        assert_eq!(parts(&hit.recognized), ("a/b.rs", Some(10), Some(2)));
    }

    #[test]
    fn test_matches_enumerates_in_cascade_order() {
        let lines = vec![CandidateLine::new("a/b.rs:10:2 see c.rs 3:4", 1, 1)];

        let families: Vec<_> = PatternCascade::new().matches(&lines).map(|m| m.family).collect();
        assert_eq!(
            families,
            vec![PatternFamily::ColonDelimited, PatternFamily::SpaceDelimited]
        );
    }

    #[test]
    fn test_no_match() {
        let lines = vec![CandidateLine::new("nothing to see here", 1, 1), CandidateLine::new("", 1, 1)];
        assert!(PatternCascade::new().first_match(&lines).is_none());
        assert!(PatternCascade::new().first_match(&[]).is_none());
    }
}
