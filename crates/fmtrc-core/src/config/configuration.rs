//! Configuration document and per-file resolution
//!
//! A configuration file is a flat object of base options plus the reserved
//! `overrides` array:
//!
//! ```jsonc
//! {
//!   "singleQuote": true,
//!   "tabWidth": 2,
//!   "overrides": [
//!     { "files": "*.md", "options": { "singleQuote": false, "tabWidth": 4 } }
//!   ]
//! }
//! ```
//!
//! [`Configuration`] is the compiled, immutable form. Every key and pattern
//! is validated while it is built, so [`Configuration::resolve`] cannot fail.

use schemars::JsonSchema;
use serde::{Deserialize, Serialize};
use serde_json::{Map, Value, json};
use std::path::{Path, PathBuf};
use tracing::debug;

use super::options::OptionSet;
use super::overrides::OverrideRule;
use super::pattern::{FilePattern, normalize_path};
use crate::error::FmtrcError;
use crate::result::Result;

/// Reserved top-level key holding the override list
pub const OVERRIDES_KEY: &str = "overrides";

/// Top-level key pointing editors at the JSON Schema; ignored on load
pub const SCHEMA_KEY: &str = "$schema";

const BASE_LOCATION: &str = "base options";

/// One or more glob patterns
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize, JsonSchema)]
#[serde(untagged)]
pub enum PatternList {
    One(String),
    Many(Vec<String>),
}

impl PatternList {
    pub fn iter(&self) -> impl Iterator<Item = &str> {
        let patterns: &[String] = match self {
            PatternList::One(pattern) => std::slice::from_ref(pattern),
            PatternList::Many(patterns) => patterns,
        };
        patterns.iter().map(String::as_str)
    }

    pub fn is_empty(&self) -> bool {
        self.iter().next().is_none()
    }

    fn from_patterns(patterns: &[FilePattern]) -> Self {
        match patterns {
            [single] => PatternList::One(single.as_str().to_string()),
            _ => PatternList::Many(patterns.iter().map(|p| p.as_str().to_string()).collect()),
        }
    }
}

impl Default for PatternList {
    fn default() -> Self {
        PatternList::Many(Vec::new())
    }
}

/// Serialized form of an override block
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize, JsonSchema)]
#[serde(rename_all = "camelCase")]
pub struct OverrideConfig {
    /// Patterns selecting the files this block applies to
    #[schemars(description = "Glob pattern(s) selecting files; patterns without '/' match file names")]
    pub files: PatternList,

    /// Patterns removing files from the selection
    #[schemars(description = "Glob pattern(s) excluding files matched by 'files'")]
    #[serde(default, skip_serializing_if = "PatternList::is_empty")]
    pub exclude_files: PatternList,

    /// Options applied to matching files
    #[schemars(description = "Options merged over the base options for matching files")]
    #[serde(default)]
    pub options: OptionSet,
}

/// Serialized form of a configuration file
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize, JsonSchema)]
#[serde(rename_all = "camelCase")]
pub struct ConfigFile {
    /// JSON Schema reference for editor support
    #[serde(rename = "$schema", default, skip_serializing_if = "Option::is_none")]
    pub schema: Option<String>,

    /// Base options applied to every file
    #[serde(flatten)]
    pub options: OptionSet,

    /// Ordered override blocks; later matching blocks win
    #[schemars(description = "Ordered override blocks; later matches take precedence")]
    #[serde(default, skip_serializing_if = "Vec::is_empty")]
    pub overrides: Vec<OverrideConfig>,
}

/// Compiled, immutable formatter configuration
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct Configuration {
    base: OptionSet,
    overrides: Vec<OverrideRule>,
    root_dir: Option<PathBuf>,
}

impl Configuration {
    pub fn new(base: OptionSet, overrides: Vec<OverrideRule>) -> Self {
        Self {
            base,
            overrides,
            root_dir: None,
        }
    }

    /// Resolve file paths relative to `root_dir` (usually the config file's directory)
    pub fn with_root_dir(mut self, root_dir: impl Into<PathBuf>) -> Self {
        self.root_dir = Some(root_dir.into());
        self
    }

    /// Build a configuration from a parsed document, rejecting unknown keys
    ///
    /// # Errors
    ///
    /// * [`FmtrcError::UnknownOption`] for keys outside the option vocabulary
    /// * [`FmtrcError::InvalidOptionValue`] for mistyped values
    /// * [`FmtrcError::InvalidPattern`] for malformed globs
    /// * [`FmtrcError::ConfigError`] for structural problems
    pub fn from_value(value: &Value) -> Result<Self> {
        let object = value
            .as_object()
            .ok_or_else(|| FmtrcError::config_error("configuration must be an object"))?;

        let mut base_map = Map::new();
        let mut overrides = Vec::new();

        for (key, value) in object {
            match key.as_str() {
                OVERRIDES_KEY => overrides = parse_overrides(value)?,
                SCHEMA_KEY => {}
                _ => {
                    base_map.insert(key.clone(), value.clone());
                }
            }
        }

        let base = OptionSet::from_map(&base_map, BASE_LOCATION)?;
        debug!(
            "Loaded configuration with {} base options and {} overrides",
            base.len(),
            overrides.len()
        );

        Ok(Self::new(base, overrides))
    }

    /// Parse a JSON configuration string
    pub fn from_json_str(content: &str) -> Result<Self> {
        let value: Value = serde_json::from_str(content)
            .map_err(|e| FmtrcError::config_error(format!("Invalid JSON: {e}")))?;
        Self::from_value(&value)
    }

    /// Build a configuration from its typed document form
    pub fn from_document(document: &ConfigFile) -> Result<Self> {
        let overrides = document
            .overrides
            .iter()
            .map(|ov| {
                OverrideRule::new(ov.files.iter(), ov.options.clone())?
                    .with_excludes(ov.exclude_files.iter())
            })
            .collect::<Result<Vec<_>>>()?;

        Ok(Self::new(document.options.clone(), overrides))
    }

    /// Convert back into the serializable document form
    pub fn to_document(&self) -> ConfigFile {
        ConfigFile {
            schema: None,
            options: self.base.clone(),
            overrides: self
                .overrides
                .iter()
                .map(|rule| OverrideConfig {
                    files: PatternList::from_patterns(rule.files()),
                    exclude_files: if rule.exclude_files().is_empty() {
                        PatternList::default()
                    } else {
                        PatternList::from_patterns(rule.exclude_files())
                    },
                    options: rule.options().clone(),
                })
                .collect(),
        }
    }

    /// The configuration shipped as `fmtrc config init`
    ///
    /// Single quotes and a 100 column width for code; markdown gets its own
    /// parser, tabs and a wider 120 column width.
    pub fn reference() -> Result<Self> {
        Self::from_value(&json!({
            "arrowParens": "always",
            "bracketSpacing": true,
            "endOfLine": "lf",
            "printWidth": 100,
            "proseWrap": "never",
            "singleQuote": true,
            "tabWidth": 2,
            "trailingComma": "all",
            "quoteProps": "as-needed",
            "semi": true,
            "overrides": [
                {
                    "files": "*.md",
                    "options": {
                        "parser": "markdown",
                        "printWidth": 120,
                        "proseWrap": "never",
                        "tabWidth": 4,
                        "useTabs": true,
                        "singleQuote": false,
                        "bracketSpacing": true
                    }
                }
            ]
        }))
    }

    pub fn base(&self) -> &OptionSet {
        &self.base
    }

    pub fn overrides(&self) -> &[OverrideRule] {
        &self.overrides
    }

    pub fn root_dir(&self) -> Option<&Path> {
        self.root_dir.as_deref()
    }

    /// Effective options for one file
    ///
    /// Starts from the base options and merges every matching override in
    /// declaration order, so the last matching override wins per key.
    pub fn resolve(&self, file_path: impl AsRef<Path>) -> OptionSet {
        let path = file_path.as_ref();
        let relative = self
            .root_dir
            .as_deref()
            .and_then(|root| path.strip_prefix(root).ok())
            .unwrap_or(path);
        let normalized = normalize_path(relative);

        let mut options = self.base.clone();
        for (index, rule) in self.overrides.iter().enumerate() {
            if rule.matches(&normalized) {
                debug!("Applying override #{} to {}", index, normalized);
                options.merge_with(rule.options());
            }
        }
        options
    }

    /// Effective options layered over [`OptionSet::formatter_defaults`]
    pub fn resolve_with_defaults(&self, file_path: impl AsRef<Path>) -> OptionSet {
        OptionSet::formatter_defaults().merged(&self.resolve(file_path))
    }
}

fn parse_overrides(value: &Value) -> Result<Vec<OverrideRule>> {
    let entries = value
        .as_array()
        .ok_or_else(|| FmtrcError::config_error("'overrides' must be an array"))?;

    entries
        .iter()
        .enumerate()
        .map(|(index, entry)| parse_override(index, entry))
        .collect()
}

fn parse_override(index: usize, entry: &Value) -> Result<OverrideRule> {
    let location = format!("overrides[{index}]");
    let object = entry
        .as_object()
        .ok_or_else(|| FmtrcError::config_error(format!("{location} must be an object")))?;

    let mut files = None;
    let mut exclude_files = Vec::new();
    let mut options = OptionSet::default();

    for (key, value) in object {
        match key.as_str() {
            "files" => files = Some(parse_patterns(value, &location, key)?),
            "excludeFiles" => exclude_files = parse_patterns(value, &location, key)?,
            "options" => {
                let map = value.as_object().ok_or_else(|| {
                    FmtrcError::config_error(format!("{location}.options must be an object"))
                })?;
                options = OptionSet::from_map(map, &format!("{location}.options"))?;
            }
            other => {
                return Err(FmtrcError::config_error(format!(
                    "{location} has unexpected key '{other}' (expected 'files', 'excludeFiles' or 'options')"
                )));
            }
        }
    }

    let files = files.ok_or_else(|| {
        FmtrcError::config_error(format!("{location} is missing the required 'files' key"))
    })?;
    if files.is_empty() {
        return Err(FmtrcError::config_error(format!(
            "{location}.files must list at least one pattern"
        )));
    }

    OverrideRule::new(files, options)?.with_excludes(exclude_files)
}

fn parse_patterns(value: &Value, location: &str, key: &str) -> Result<Vec<String>> {
    let invalid = || {
        FmtrcError::config_error(format!(
            "{location}.{key} must be a pattern string or an array of pattern strings"
        ))
    };

    match value {
        Value::String(pattern) => Ok(vec![pattern.clone()]),
        Value::Array(items) => items
            .iter()
            .map(|item| item.as_str().map(str::to_string).ok_or_else(invalid))
            .collect(),
        _ => Err(invalid()),
    }
}
