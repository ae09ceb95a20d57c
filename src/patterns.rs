use crate::error::CleanError;
use rustc_hash::FxHashSet;
use std::fs::File;
use std::io::{BufRead, BufReader, Read};
use std::path::Path;

/// Statements that only make sense in the environment the dump came from:
/// ownership, ACLs, blanket grants/revokes and session configuration.
pub const DEFAULT_IGNORE_PATTERNS: &[&str] = &[
    "OWNER TO",
    "ACL",
    "GRANT ALL",
    "REVOKE ALL",
    "SET default_table_access_method",
    "SELECT pg_catalog.set_config('search_path'",
    "\\restrict",
];

/// Ordered set of literal substrings that cause a line to be discarded
///
/// Order is first-insertion order; pushing a pattern that is already present
/// changes nothing.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct IgnorePatterns {
    patterns: Vec<String>,
}

impl Default for IgnorePatterns {
    fn default() -> Self {
        let mut set = IgnorePatterns::empty();
        set.extend(DEFAULT_IGNORE_PATTERNS.iter().copied());
        set
    }
}

impl IgnorePatterns {
    /// A set with no patterns at all
    pub fn empty() -> Self {
        IgnorePatterns {
            patterns: Vec::new(),
        }
    }

    /// Append a pattern. Returns false if it was empty or already present.
    pub fn push(&mut self, pattern: impl Into<String>) -> bool {
        let pattern = pattern.into();
        if pattern.is_empty() || self.patterns.contains(&pattern) {
            return false;
        }
        self.patterns.push(pattern);
        true
    }

    /// Append several patterns, keeping the first occurrence of each
    pub fn extend<I, S>(&mut self, patterns: I)
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        let mut seen: FxHashSet<String> = self.patterns.iter().cloned().collect();
        for pattern in patterns {
            let pattern = pattern.into();
            if !pattern.is_empty() && seen.insert(pattern.clone()) {
                self.patterns.push(pattern);
            }
        }
    }

    /// Read patterns, one per line (supports comments with #)
    pub fn from_reader<R: Read>(reader: R) -> std::io::Result<Self> {
        let mut set = IgnorePatterns::empty();
        let mut lines = Vec::new();

        for line in BufReader::new(reader).lines() {
            let line = line?;
            let pattern = line.trim();
            // Skip empty lines and comments
            if !pattern.is_empty() && !pattern.starts_with('#') {
                lines.push(pattern.to_string());
            }
        }

        set.extend(lines);
        Ok(set)
    }

    /// Load a pattern file from disk
    pub fn load(path: &Path) -> Result<Self, CleanError> {
        let file = File::open(path).map_err(|e| CleanError::input(Some(path), e))?;
        IgnorePatterns::from_reader(file).map_err(|e| CleanError::input(Some(path), e))
    }

    /// First pattern contained in `trimmed`, with its position in the set
    #[inline]
    pub fn find(&self, trimmed: &str) -> Option<(usize, &str)> {
        self.patterns
            .iter()
            .enumerate()
            .find(|(_, pattern)| trimmed.contains(pattern.as_str()))
            .map(|(index, pattern)| (index, pattern.as_str()))
    }

    pub fn iter(&self) -> impl Iterator<Item = &str> {
        self.patterns.iter().map(String::as_str)
    }

    pub fn len(&self) -> usize {
        self.patterns.len()
    }

    pub fn is_empty(&self) -> bool {
        self.patterns.is_empty()
    }
}
