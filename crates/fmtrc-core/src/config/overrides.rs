//! Override blocks keyed by file patterns

use super::options::OptionSet;
use super::pattern::FilePattern;
use crate::result::Result;

/// A partial option set applied to files matching its patterns
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct OverrideRule {
    files: Vec<FilePattern>,
    exclude_files: Vec<FilePattern>,
    options: OptionSet,
}

impl OverrideRule {
    /// Build a rule from include patterns and the options it applies
    pub fn new<I, S>(files: I, options: OptionSet) -> Result<Self>
    where
        I: IntoIterator<Item = S>,
        S: AsRef<str>,
    {
        Ok(Self {
            files: compile(files)?,
            exclude_files: Vec::new(),
            options,
        })
    }

    /// Add patterns that veto a match even when an include pattern matches
    pub fn with_excludes<I, S>(mut self, exclude_files: I) -> Result<Self>
    where
        I: IntoIterator<Item = S>,
        S: AsRef<str>,
    {
        self.exclude_files.extend(compile(exclude_files)?);
        Ok(self)
    }

    pub fn files(&self) -> &[FilePattern] {
        &self.files
    }

    pub fn exclude_files(&self) -> &[FilePattern] {
        &self.exclude_files
    }

    pub fn options(&self) -> &OptionSet {
        &self.options
    }

    /// Whether this rule applies to a normalized path
    pub fn matches(&self, path: &str) -> bool {
        self.files.iter().any(|pattern| pattern.matches(path))
            && !self.exclude_files.iter().any(|pattern| pattern.matches(path))
    }
}

fn compile<I, S>(patterns: I) -> Result<Vec<FilePattern>>
where
    I: IntoIterator<Item = S>,
    S: AsRef<str>,
{
    patterns
        .into_iter()
        .map(|pattern| FilePattern::new(pattern.as_ref()))
        .collect()
}
