//! Locating and replacing labels inside query text

use crate::error::Result;
use regex::{NoExpand, Regex};
use serde::{Deserialize, Serialize};

/// How a registered label is matched against the query text
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum MatchMode {
    /// Plain substring search; `:id` also matches inside `:id2`
    #[default]
    Substring,
    /// A label ending in an identifier character must not be followed by one
    Boundary,
}

/// A label compiled for one match mode
pub(crate) enum LabelMatcher<'a> {
    Substring(&'a str),
    Boundary(Regex),
}

impl<'a> LabelMatcher<'a> {
    pub(crate) fn new(label: &'a str, mode: MatchMode) -> Result<Self> {
        match mode {
            MatchMode::Substring => Ok(LabelMatcher::Substring(label)),
            MatchMode::Boundary => {
                let mut pattern = regex::escape(label);
                if label.chars().last().is_some_and(is_identifier_char) {
                    // ASCII boundary: `é` after `:id` ends the identifier
                    pattern.push_str(r"(?-u:\b)");
                }
                Ok(LabelMatcher::Boundary(Regex::new(&pattern)?))
            }
        }
    }

    pub(crate) fn is_match(&self, text: &str) -> bool {
        match self {
            LabelMatcher::Substring(label) => text.contains(label),
            LabelMatcher::Boundary(re) => re.is_match(text),
        }
    }

    pub(crate) fn replace_all(&self, text: &str, replacement: &str) -> String {
        match self {
            LabelMatcher::Substring(label) => text.replace(label, replacement),
            LabelMatcher::Boundary(re) => re.replace_all(text, NoExpand(replacement)).into_owned(),
        }
    }
}

fn is_identifier_char(c: char) -> bool {
    c.is_ascii_alphanumeric() || c == '_'
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_substring_over_matches() {
        let matcher = LabelMatcher::new(":id", MatchMode::Substring).unwrap();
        assert!(matcher.is_match("WHERE x = :id2"));
        assert_eq!(matcher.replace_all(":id, :id2", "?"), "?, ?2");
    }

    #[test]
    fn test_boundary_skips_longer_identifiers() {
        let matcher = LabelMatcher::new(":id", MatchMode::Boundary).unwrap();
        assert!(!matcher.is_match("WHERE x = :id2"));
        assert!(!matcher.is_match("WHERE x = :id_old"));
        assert!(matcher.is_match("WHERE x = :id AND y = 1"));
        assert!(matcher.is_match("WHERE x = :id"));
        assert_eq!(matcher.replace_all(":id, :id2", "?"), "?, :id2");
    }

    #[test]
    fn test_boundary_non_ascii_follower() {
        let matcher = LabelMatcher::new(":id", MatchMode::Boundary).unwrap();
        assert!(matcher.is_match("WHERE x = :idé"));
        assert_eq!(matcher.replace_all(":idé, :id9", "?"), "?é, :id9");

        // Labels ending in a non-ASCII letter match as plain substrings
        let matcher = LabelMatcher::new(":naïvé", MatchMode::Boundary).unwrap();
        assert!(matcher.is_match("WHERE x = :naïvéx"));
    }

    #[test]
    fn test_boundary_array_label() {
        let matcher = LabelMatcher::new(":u[]", MatchMode::Boundary).unwrap();
        assert!(matcher.is_match("IN (:u[])"));
        assert_eq!(matcher.replace_all("IN (:u[]) OR (:u[])", "$0"), "IN ($0) OR ($0)");
    }
}
