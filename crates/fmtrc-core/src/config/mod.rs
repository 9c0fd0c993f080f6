//! Configuration system for fmtrc
//!
//! This module provides:
//! - A typed vocabulary of formatting options ([`OptionSet`])
//! - Override blocks selected by glob patterns ([`OverrideRule`])
//! - Per-file resolution with last-match-wins semantics ([`Configuration::resolve`])
//! - JSON/JSONC/YAML/TOML config files and `package.json` embedding
//! - Auto-discovery by traversing up directories
//! - JSON Schema generation via schemars
//!
//! ## Unknown keys
//!
//! Loading is strict: a key outside the option vocabulary, in the base
//! options or in any override, fails with [`crate::FmtrcError::UnknownOption`].
//!
//! ## Example Configuration
//!
//! ```jsonc
//! {
//!   "$schema": "https://fmtrc.github.io/fmtrc/schema/v1.json",
//!   "arrowParens": "always",
//!   "printWidth": 100,
//!   "singleQuote": true,
//!   "trailingComma": "all",
//!   "overrides": [
//!     {
//!       "files": "*.md",
//!       "options": { "parser": "markdown", "printWidth": 120, "useTabs": true }
//!     }
//!   ]
//! }
//! ```

mod configuration;
mod loader;
mod merge;
mod options;
mod overrides;
mod pattern;
pub mod schema;

pub use configuration::{
    ConfigFile, Configuration, OVERRIDES_KEY, OverrideConfig, PatternList, SCHEMA_KEY,
};
pub use loader::{
    CONFIG_FILE_NAMES, ConfigFormat, ConfigLoader, PACKAGE_JSON_KEY, absolute_file_path,
};
pub use options::{
    ArrowParens, EndOfLine, OptionName, OptionSet, OptionValue, ProseWrap, QuoteProps,
    TrailingComma,
};
pub use overrides::OverrideRule;
pub use pattern::{FilePattern, normalize_path};
