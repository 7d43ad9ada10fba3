//! Name matching rules shared by module and type selection

use regex::{Regex, RegexBuilder};

use crate::constants::{PATTERN_WILDCARD, PREFIX_SEGMENT_SEPARATORS};
use crate::error::{Error, Result};

/// Wildcard-or-substring name matcher
///
/// A pattern containing `*` is compiled to an anchored, case-insensitive
/// regular expression in which `*` matches any sequence. Any other pattern is
/// a case-insensitive substring match.
#[derive(Debug, Clone)]
pub enum NamePattern {
    /// Anchored wildcard expression
    Wildcard(Regex),
    /// Lowercased substring
    Substring(String),
}

impl NamePattern {
    /// Compile a pattern; blank patterns are rejected
    pub fn new(pattern: &str) -> Result<Self> {
        if pattern.trim().is_empty() {
            return Err(Error::invalid_argument("pattern cannot be empty"));
        }

        if !pattern.contains(PATTERN_WILDCARD) {
            return Ok(Self::Substring(pattern.to_lowercase()));
        }

        let body = pattern
            .split(PATTERN_WILDCARD)
            .map(regex::escape)
            .collect::<Vec<_>>()
            .join(".*");
        let regex = RegexBuilder::new(&format!("^{body}$"))
            .case_insensitive(true)
            .build()
            .map_err(|e| Error::invalid_argument(format!("invalid pattern '{pattern}': {e}")))?;
        Ok(Self::Wildcard(regex))
    }

    /// Whether `name` matches
    pub fn matches(&self, name: &str) -> bool {
        match self {
            Self::Wildcard(regex) => regex.is_match(name),
            Self::Substring(needle) => name.to_lowercase().contains(needle.as_str()),
        }
    }
}

/// Whether `name` starts with one of `prefixes` as a whole leading segment
///
/// `"std"` matches `"std"`, `"std::io"` and `"std.io"` but not `"stdx"` or `"std_ext"`.
pub fn has_segment_prefix<S: AsRef<str>>(name: &str, prefixes: &[S]) -> bool {
    prefixes.iter().any(|prefix| {
        let prefix = prefix.as_ref();
        match name.strip_prefix(prefix) {
            Some("") => true,
            Some(rest) => rest.starts_with(PREFIX_SEGMENT_SEPARATORS),
            None => false,
        }
    })
}
