//! Formatting option vocabulary
//!
//! [`OptionSet`] is the flat mapping of option names to values that both the
//! base configuration and every override block carry. Every field is
//! optional: an unset key means "not specified here", which is what lets
//! override blocks act as partial option sets.

use indexmap::IndexMap;
use schemars::JsonSchema;
use serde::{Deserialize, Serialize};
use serde_json::{Map, Value};
use std::fmt;

use crate::error::FmtrcError;
use crate::result::Result;

/// Parenthesization of sole arrow-function parameters
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize, JsonSchema)]
#[serde(rename_all = "lowercase")]
pub enum ArrowParens {
    /// Always wrap the parameter: `(x) => x`
    Always,
    /// Omit parentheses when possible: `x => x`
    Avoid,
}

/// Line ending style
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize, JsonSchema)]
#[serde(rename_all = "lowercase")]
pub enum EndOfLine {
    Lf,
    Crlf,
    Cr,
    /// Keep whatever the file already uses
    Auto,
}

/// Wrapping policy for prose (markdown paragraphs and the like)
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize, JsonSchema)]
#[serde(rename_all = "lowercase")]
pub enum ProseWrap {
    Always,
    Never,
    Preserve,
}

/// Trailing comma policy for multi-line lists
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize, JsonSchema)]
#[serde(rename_all = "lowercase")]
pub enum TrailingComma {
    All,
    Es5,
    None,
}

/// When to quote object property names
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize, JsonSchema)]
#[serde(rename_all = "kebab-case")]
pub enum QuoteProps {
    AsNeeded,
    Consistent,
    Preserve,
}

impl ArrowParens {
    pub fn as_str(&self) -> &'static str {
        match self {
            ArrowParens::Always => "always",
            ArrowParens::Avoid => "avoid",
        }
    }
}

impl EndOfLine {
    pub fn as_str(&self) -> &'static str {
        match self {
            EndOfLine::Lf => "lf",
            EndOfLine::Crlf => "crlf",
            EndOfLine::Cr => "cr",
            EndOfLine::Auto => "auto",
        }
    }
}

impl ProseWrap {
    pub fn as_str(&self) -> &'static str {
        match self {
            ProseWrap::Always => "always",
            ProseWrap::Never => "never",
            ProseWrap::Preserve => "preserve",
        }
    }
}

impl TrailingComma {
    pub fn as_str(&self) -> &'static str {
        match self {
            TrailingComma::All => "all",
            TrailingComma::Es5 => "es5",
            TrailingComma::None => "none",
        }
    }
}

impl QuoteProps {
    pub fn as_str(&self) -> &'static str {
        match self {
            QuoteProps::AsNeeded => "as-needed",
            QuoteProps::Consistent => "consistent",
            QuoteProps::Preserve => "preserve",
        }
    }
}

/// The recognized option keys
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum OptionName {
    ArrowParens,
    BracketSpacing,
    EndOfLine,
    PrintWidth,
    ProseWrap,
    SingleQuote,
    TabWidth,
    TrailingComma,
    QuoteProps,
    Semi,
    UseTabs,
    Parser,
}

impl OptionName {
    /// Every recognized option, in canonical listing order
    pub const ALL: [OptionName; 12] = [
        OptionName::ArrowParens,
        OptionName::BracketSpacing,
        OptionName::EndOfLine,
        OptionName::PrintWidth,
        OptionName::ProseWrap,
        OptionName::SingleQuote,
        OptionName::TabWidth,
        OptionName::TrailingComma,
        OptionName::QuoteProps,
        OptionName::Semi,
        OptionName::UseTabs,
        OptionName::Parser,
    ];

    /// The key used in configuration files
    pub fn key(self) -> &'static str {
        match self {
            OptionName::ArrowParens => "arrowParens",
            OptionName::BracketSpacing => "bracketSpacing",
            OptionName::EndOfLine => "endOfLine",
            OptionName::PrintWidth => "printWidth",
            OptionName::ProseWrap => "proseWrap",
            OptionName::SingleQuote => "singleQuote",
            OptionName::TabWidth => "tabWidth",
            OptionName::TrailingComma => "trailingComma",
            OptionName::QuoteProps => "quoteProps",
            OptionName::Semi => "semi",
            OptionName::UseTabs => "useTabs",
            OptionName::Parser => "parser",
        }
    }

    /// Look up an option by its configuration key (case-sensitive)
    pub fn from_key(key: &str) -> Option<Self> {
        Self::ALL.into_iter().find(|name| name.key() == key)
    }
}

impl fmt::Display for OptionName {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.key())
    }
}

/// A single option value, untyped
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum OptionValue {
    Bool(bool),
    Number(u32),
    Text(String),
}

impl fmt::Display for OptionValue {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            OptionValue::Bool(value) => write!(f, "{value}"),
            OptionValue::Number(value) => write!(f, "{value}"),
            OptionValue::Text(value) => f.write_str(value),
        }
    }
}

/// Formatting options (base set or partial override set)
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize, JsonSchema)]
#[serde(rename_all = "camelCase")]
pub struct OptionSet {
    /// Parenthesize sole arrow-function parameters
    #[schemars(description = "Include parentheses around a sole arrow function parameter")]
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub arrow_parens: Option<ArrowParens>,

    /// Spaces inside object literal braces
    #[schemars(description = "Print spaces between brackets in object literals")]
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub bracket_spacing: Option<bool>,

    /// Line ending style
    #[schemars(description = "Which end of line characters to apply")]
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub end_of_line: Option<EndOfLine>,

    /// Maximum line width
    #[schemars(description = "The line length where the formatter will try to wrap")]
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub print_width: Option<u32>,

    /// Prose wrapping mode
    #[schemars(description = "How to wrap prose")]
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub prose_wrap: Option<ProseWrap>,

    /// Quote style: single when true, double when false
    #[schemars(description = "Use single quotes instead of double quotes")]
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub single_quote: Option<bool>,

    /// Indentation width
    #[schemars(description = "Number of spaces per indentation level")]
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub tab_width: Option<u32>,

    /// Trailing comma policy
    #[schemars(description = "Print trailing commas wherever possible in multi-line lists")]
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub trailing_comma: Option<TrailingComma>,

    /// Object property quoting policy
    #[schemars(description = "Change when properties in objects are quoted")]
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub quote_props: Option<QuoteProps>,

    /// Statement terminators
    #[schemars(description = "Print semicolons at the ends of statements")]
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub semi: Option<bool>,

    /// Indent with tabs
    #[schemars(description = "Indent lines with tabs instead of spaces")]
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub use_tabs: Option<bool>,

    /// Parser name override
    #[schemars(description = "Force the parser used for matching files")]
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub parser: Option<String>,
}

impl OptionSet {
    /// Parse an option set from a raw key/value map
    ///
    /// Unrecognized keys are rejected with [`FmtrcError::UnknownOption`];
    /// `location` names the map in diagnostics (e.g. `overrides[0].options`).
    pub fn from_map(map: &Map<String, Value>, location: &str) -> Result<Self> {
        let mut options = Self::default();
        for (key, value) in map {
            let name = OptionName::from_key(key)
                .ok_or_else(|| FmtrcError::unknown_option(key, location))?;
            options.set_from_value(name, value, location)?;
        }
        Ok(options)
    }

    /// Set one option from a raw value, validating its type
    pub fn set_from_value(&mut self, name: OptionName, value: &Value, location: &str) -> Result<()> {
        match name {
            OptionName::ArrowParens => self.arrow_parens = Some(parse_enum(name, value, location)?),
            OptionName::BracketSpacing => {
                self.bracket_spacing = Some(parse_bool(name, value, location)?)
            }
            OptionName::EndOfLine => self.end_of_line = Some(parse_enum(name, value, location)?),
            OptionName::PrintWidth => self.print_width = Some(parse_width(name, value, location)?),
            OptionName::ProseWrap => self.prose_wrap = Some(parse_enum(name, value, location)?),
            OptionName::SingleQuote => self.single_quote = Some(parse_bool(name, value, location)?),
            OptionName::TabWidth => self.tab_width = Some(parse_width(name, value, location)?),
            OptionName::TrailingComma => {
                self.trailing_comma = Some(parse_enum(name, value, location)?)
            }
            OptionName::QuoteProps => self.quote_props = Some(parse_enum(name, value, location)?),
            OptionName::Semi => self.semi = Some(parse_bool(name, value, location)?),
            OptionName::UseTabs => self.use_tabs = Some(parse_bool(name, value, location)?),
            OptionName::Parser => match value.as_str() {
                Some(parser) if !parser.trim().is_empty() => self.parser = Some(parser.to_string()),
                _ => {
                    return Err(FmtrcError::invalid_option_value(
                        name.key(),
                        location,
                        "expected a non-empty parser name",
                    ));
                }
            },
        }
        Ok(())
    }

    /// Get the value of one option, if set
    pub fn get(&self, name: OptionName) -> Option<OptionValue> {
        match name {
            OptionName::ArrowParens => self.arrow_parens.map(|v| text(v.as_str())),
            OptionName::BracketSpacing => self.bracket_spacing.map(OptionValue::Bool),
            OptionName::EndOfLine => self.end_of_line.map(|v| text(v.as_str())),
            OptionName::PrintWidth => self.print_width.map(OptionValue::Number),
            OptionName::ProseWrap => self.prose_wrap.map(|v| text(v.as_str())),
            OptionName::SingleQuote => self.single_quote.map(OptionValue::Bool),
            OptionName::TabWidth => self.tab_width.map(OptionValue::Number),
            OptionName::TrailingComma => self.trailing_comma.map(|v| text(v.as_str())),
            OptionName::QuoteProps => self.quote_props.map(|v| text(v.as_str())),
            OptionName::Semi => self.semi.map(OptionValue::Bool),
            OptionName::UseTabs => self.use_tabs.map(OptionValue::Bool),
            OptionName::Parser => self.parser.clone().map(OptionValue::Text),
        }
    }

    /// All set options in canonical order
    pub fn entries(&self) -> IndexMap<&'static str, OptionValue> {
        OptionName::ALL
            .into_iter()
            .filter_map(|name| self.get(name).map(|value| (name.key(), value)))
            .collect()
    }

    /// Number of options that are set
    pub fn len(&self) -> usize {
        OptionName::ALL
            .into_iter()
            .filter(|name| self.get(*name).is_some())
            .count()
    }

    pub fn is_empty(&self) -> bool {
        self.len() == 0
    }

    /// Conventional formatter defaults with every option set except `parser`
    pub fn formatter_defaults() -> Self {
        Self {
            arrow_parens: Some(ArrowParens::Always),
            bracket_spacing: Some(true),
            end_of_line: Some(EndOfLine::Lf),
            print_width: Some(80),
            prose_wrap: Some(ProseWrap::Preserve),
            single_quote: Some(false),
            tab_width: Some(2),
            trailing_comma: Some(TrailingComma::All),
            quote_props: Some(QuoteProps::AsNeeded),
            semi: Some(true),
            use_tabs: Some(false),
            parser: None,
        }
    }
}

fn text(value: &str) -> OptionValue {
    OptionValue::Text(value.to_string())
}

fn parse_enum<'de, T: Deserialize<'de>>(
    name: OptionName,
    value: &'de Value,
    location: &str,
) -> Result<T> {
    T::deserialize(value)
        .map_err(|e| FmtrcError::invalid_option_value(name.key(), location, e.to_string()))
}

fn parse_bool(name: OptionName, value: &Value, location: &str) -> Result<bool> {
    value.as_bool().ok_or_else(|| {
        FmtrcError::invalid_option_value(name.key(), location, format!("expected a boolean, found {value}"))
    })
}

// JSON5 and YAML may hand integers over as floats, so whole floats are accepted.
fn parse_width(name: OptionName, value: &Value, location: &str) -> Result<u32> {
    let number = value.as_u64().or_else(|| {
        value
            .as_f64()
            .filter(|f| *f >= 0.0 && f.fract() == 0.0 && *f <= u32::MAX as f64)
            .map(|f| f as u64)
    });

    number
        .and_then(|n| u32::try_from(n).ok())
        .ok_or_else(|| {
            FmtrcError::invalid_option_value(
                name.key(),
                location,
                format!("expected a non-negative integer, found {value}"),
            )
        })
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::error::ErrorKind;
    use serde_json::json;

    fn map(value: Value) -> Map<String, Value> {
        value.as_object().cloned().unwrap()
    }

    #[test]
    fn test_from_map_parses_full_vocabulary() {
        let options = OptionSet::from_map(
            &map(json!({
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
                "useTabs": false,
                "parser": "typescript"
            })),
            "base options",
        )
        .unwrap();

        assert_eq!(options.arrow_parens, Some(ArrowParens::Always));
        assert_eq!(options.end_of_line, Some(EndOfLine::Lf));
        assert_eq!(options.print_width, Some(100));
        assert_eq!(options.prose_wrap, Some(ProseWrap::Never));
        assert_eq!(options.quote_props, Some(QuoteProps::AsNeeded));
        assert_eq!(options.parser.as_deref(), Some("typescript"));
        assert_eq!(options.len(), 12);
    }

    #[test]
    fn test_unknown_key_is_rejected() {
        let err = OptionSet::from_map(&map(json!({ "quoteStyle": "single" })), "base options")
            .unwrap_err();
        assert_eq!(err.kind(), ErrorKind::Option);
        assert!(matches!(
            err,
            FmtrcError::UnknownOption { ref key, ref location }
                if key == "quoteStyle" && location == "base options"
        ));
    }

    #[test]
    fn test_keys_are_case_sensitive() {
        assert!(OptionName::from_key("tabWidth").is_some());
        assert!(OptionName::from_key("TabWidth").is_none());
        assert!(OptionName::from_key("tab_width").is_none());
    }

    #[test]
    fn test_invalid_values() {
        let cases = [
            json!({ "tabWidth": "two" }),
            json!({ "tabWidth": -1 }),
            json!({ "printWidth": 80.5 }),
            json!({ "semi": "yes" }),
            json!({ "trailingComma": "sometimes" }),
            json!({ "parser": "" }),
            json!({ "parser": 3 }),
        ];

        for case in cases {
            let err = OptionSet::from_map(&map(case.clone()), "base options").unwrap_err();
            assert!(
                matches!(err, FmtrcError::InvalidOptionValue { .. }),
                "expected invalid value for {case}"
            );
        }
    }

    #[test]
    fn test_whole_float_widths_are_accepted() {
        let options = OptionSet::from_map(&map(json!({ "printWidth": 120.0 })), "base").unwrap();
        assert_eq!(options.print_width, Some(120));
    }

    #[test]
    fn test_entries_in_canonical_order() {
        let options = OptionSet {
            tab_width: Some(4),
            arrow_parens: Some(ArrowParens::Avoid),
            single_quote: Some(false),
            ..Default::default()
        };

        let keys: Vec<_> = options.entries().keys().copied().collect();
        assert_eq!(keys, vec!["arrowParens", "singleQuote", "tabWidth"]);
        assert_eq!(
            options.get(OptionName::ArrowParens),
            Some(OptionValue::Text("avoid".to_string()))
        );
        assert_eq!(options.get(OptionName::Semi), None);
    }

    #[test]
    fn test_serialization_skips_unset() {
        let options = OptionSet {
            quote_props: Some(QuoteProps::AsNeeded),
            tab_width: Some(2),
            ..Default::default()
        };
        let json = serde_json::to_string(&options).unwrap();
        assert_eq!(json, r#"{"tabWidth":2,"quoteProps":"as-needed"}"#);
    }

    #[test]
    fn test_defaults_cover_everything_but_parser() {
        let defaults = OptionSet::formatter_defaults();
        assert_eq!(defaults.len(), OptionName::ALL.len() - 1);
        assert!(defaults.parser.is_none());
        assert!(OptionSet::default().is_empty());
    }
}
