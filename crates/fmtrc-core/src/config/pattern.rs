//! File patterns for override selection
//!
//! Patterns use standard glob syntax via the `glob` crate. `*` never crosses
//! a `/`; `**` does. A pattern without any `/` matches against the file name
//! alone, so `*.md` selects markdown files at any depth.

use glob::{MatchOptions, Pattern};
use std::fmt;
use std::path::Path;

use crate::error::FmtrcError;
use crate::result::Result;

const MATCH_OPTIONS: MatchOptions = MatchOptions {
    case_sensitive: true,
    require_literal_separator: true,
    require_literal_leading_dot: false,
};

/// A compiled file pattern
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct FilePattern {
    source: String,
    pattern: Pattern,
    match_base: bool,
}

impl FilePattern {
    /// Compile a pattern, rejecting empty or malformed globs
    pub fn new(source: &str) -> Result<Self> {
        let normalized = strip_current_dir(source.trim());
        if normalized.is_empty() {
            return Err(FmtrcError::invalid_pattern(source, "pattern is empty"));
        }

        let pattern = Pattern::new(normalized)
            .map_err(|e| FmtrcError::invalid_pattern(source, e.to_string()))?;

        Ok(Self {
            source: source.to_string(),
            pattern,
            match_base: !normalized.contains('/'),
        })
    }

    /// The pattern as written in the configuration
    pub fn as_str(&self) -> &str {
        &self.source
    }

    /// Test a normalized path (see [`normalize_path`])
    pub fn matches(&self, path: &str) -> bool {
        let candidate = if self.match_base {
            path.rsplit('/').next().unwrap_or(path)
        } else {
            path
        };
        self.pattern.matches_with(candidate, MATCH_OPTIONS)
    }
}

impl fmt::Display for FilePattern {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.source)
    }
}

/// Convert a path into the `/`-separated form patterns are matched against
pub fn normalize_path(path: &Path) -> String {
    let text = path.to_string_lossy().replace('\\', "/");
    strip_current_dir(&text).to_string()
}

fn strip_current_dir(mut text: &str) -> &str {
    while let Some(rest) = text.strip_prefix("./") {
        text = rest;
    }
    text
}
