//! Anchor strategies locating the region spliced into the app shell.

use std::ops::Range;

use regex::Regex;

/// Finds the substitutable region of an HTML document.
pub trait AnchorMatcher: Send + Sync + std::fmt::Debug {
    /// Byte range of the first region in `document`, if any.
    fn find(&self, document: &str) -> Option<Range<usize>>;
}

/// Region described by a regular expression; the whole match is the region.
#[derive(Debug, Clone)]
pub struct RegexAnchor {
    pattern: Regex,
}

impl RegexAnchor {
    pub fn new(pattern: &str) -> Result<Self, regex::Error> {
        Ok(Self {
            pattern: Regex::new(pattern)?,
        })
    }
}

impl AnchorMatcher for RegexAnchor {
    fn find(&self, document: &str) -> Option<Range<usize>> {
        self.pattern.find(document).map(|m| m.range())
    }
}

/// Region running from a start marker through the nearest following end
/// marker, both inclusive.
#[derive(Debug, Clone)]
pub struct MarkerAnchor {
    start: String,
    end: String,
}

impl MarkerAnchor {
    pub fn new(start: impl Into<String>, end: impl Into<String>) -> Self {
        Self {
            start: start.into(),
            end: end.into(),
        }
    }
}

impl AnchorMatcher for MarkerAnchor {
    fn find(&self, document: &str) -> Option<Range<usize>> {
        let begin = document.find(&self.start)?;
        let after_start = begin + self.start.len();
        let end = document[after_start..].find(&self.end)? + after_start + self.end.len();
        Some(begin..end)
    }
}
