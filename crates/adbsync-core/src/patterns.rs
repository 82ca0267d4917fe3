//! Glob-style ignore patterns translated to anchored regular expressions
//!
//! Glob dialect:
//! - a pattern starting with the separator is anchored at the root,
//! - a pattern starting with `*` gets a separator inserted in front of it,
//! - any other pattern matches as a path suffix starting at a separator,
//! - `*` matches one or more characters (never zero),
//! - everything else is literal.
//!
//! Matching is a full-path match, so a trailing separator is significant:
//! `cache/` only matches directory paths.

use std::collections::HashSet;

use regex::Regex;

use crate::error::PatternError;

/// A single compiled ignore pattern
#[derive(Debug, Clone)]
pub struct IgnorePattern {
    regex: Regex,
}

impl IgnorePattern {
    /// Compile a glob for paths using `separator`
    ///
    /// # Errors
    ///
    /// Returns an error if the pattern is empty.
    pub fn compile(pattern: &str, separator: char) -> Result<Self, PatternError> {
        if pattern.is_empty() {
            return Err(PatternError::EmptyPattern);
        }

        let source = Self::translate(pattern, separator);
        let regex = Regex::new(&source).map_err(|e| PatternError::Compile {
            pattern: pattern.to_string(),
            reason: e.to_string(),
        })?;

        Ok(Self { regex })
    }

    /// Build the regular expression source for a glob
    fn translate(pattern: &str, separator: char) -> String {
        let mut glob = String::with_capacity(pattern.len() + 1);
        let mut anywhere = false;

        if pattern.starts_with('*') {
            glob.push(separator);
        } else if !pattern.starts_with(separator) {
            anywhere = true;
        }
        glob.push_str(pattern);

        let body = glob
            .split('*')
            .map(regex::escape)
            .collect::<Vec<_>>()
            .join(".+?");

        let mut source = String::from("^");
        if anywhere {
            source.push_str(".*?");
            source.push_str(&regex::escape(separator.encode_utf8(&mut [0; 4])));
        }
        source.push_str(&body);
        source.push('$');
        source
    }

    /// Check whether `path` matches this pattern in full
    ///
    /// # Errors
    ///
    /// Returns an error if the path is empty.
    pub fn matches(&self, path: &str) -> Result<bool, PatternError> {
        if path.is_empty() {
            return Err(PatternError::EmptyPath);
        }
        Ok(self.regex.is_match(path))
    }
}

/// Set of ignore patterns, compiled once at registration
#[derive(Debug, Clone)]
pub struct IgnoreSet {
    separator: char,
    patterns: Vec<IgnorePattern>,
    registered: HashSet<String>,
}

impl IgnoreSet {
    /// Create an empty set for paths using `separator`
    #[must_use]
    pub fn new(separator: char) -> Self {
        Self {
            separator,
            patterns: Vec::new(),
            registered: HashSet::new(),
        }
    }

    /// Build a set from a list of patterns
    ///
    /// # Errors
    ///
    /// Returns an error if any pattern is invalid.
    pub fn with_patterns<S: AsRef<str>>(
        separator: char,
        patterns: &[S],
    ) -> Result<Self, PatternError> {
        let mut set = Self::new(separator);
        for pattern in patterns {
            set.add(pattern.as_ref())?;
        }
        Ok(set)
    }

    /// Register a pattern; a pattern already in the set is not compiled again
    ///
    /// # Errors
    ///
    /// Returns an error if the pattern is empty.
    pub fn add(&mut self, pattern: &str) -> Result<(), PatternError> {
        if self.registered.contains(pattern) {
            return Ok(());
        }
        let compiled = IgnorePattern::compile(pattern, self.separator)?;
        self.registered.insert(pattern.to_string());
        self.patterns.push(compiled);
        Ok(())
    }

    /// Check whether any registered pattern matches `path`
    #[must_use]
    pub fn is_ignored(&self, path: &str) -> bool {
        self.patterns
            .iter()
            .any(|pattern| pattern.matches(path).unwrap_or(false))
    }

    /// Number of distinct registered patterns
    #[must_use]
    pub fn len(&self) -> usize {
        self.patterns.len()
    }

    /// Whether no pattern is registered
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.patterns.is_empty()
    }
}
