//! Option merging logic
//!
//! Override blocks are shallow-merged onto the accumulated option set: every
//! key the incoming set specifies replaces the current value, unset keys are
//! left alone.

use super::options::OptionSet;

impl OptionSet {
    /// Merge another option set into this one (`other` takes precedence)
    pub fn merge_with(&mut self, other: &OptionSet) {
        if other.arrow_parens.is_some() {
            self.arrow_parens = other.arrow_parens;
        }
        if other.bracket_spacing.is_some() {
            self.bracket_spacing = other.bracket_spacing;
        }
        if other.end_of_line.is_some() {
            self.end_of_line = other.end_of_line;
        }
        if other.print_width.is_some() {
            self.print_width = other.print_width;
        }
        if other.prose_wrap.is_some() {
            self.prose_wrap = other.prose_wrap;
        }
        if other.single_quote.is_some() {
            self.single_quote = other.single_quote;
        }
        if other.tab_width.is_some() {
            self.tab_width = other.tab_width;
        }
        if other.trailing_comma.is_some() {
            self.trailing_comma = other.trailing_comma;
        }
        if other.quote_props.is_some() {
            self.quote_props = other.quote_props;
        }
        if other.semi.is_some() {
            self.semi = other.semi;
        }
        if other.use_tabs.is_some() {
            self.use_tabs = other.use_tabs;
        }
        if other.parser.is_some() {
            self.parser.clone_from(&other.parser);
        }
    }

    /// Return a copy of this set with `other` merged over it
    pub fn merged(&self, other: &OptionSet) -> OptionSet {
        let mut merged = self.clone();
        merged.merge_with(other);
        merged
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::config::options::{ProseWrap, TrailingComma};

    #[test]
    fn test_merge_overwrites_set_keys() {
        let mut base = OptionSet {
            single_quote: Some(true),
            tab_width: Some(2),
            print_width: Some(100),
            ..Default::default()
        };

        let override_options = OptionSet {
            single_quote: Some(false),
            tab_width: Some(4),
            ..Default::default()
        };

        base.merge_with(&override_options);

        assert_eq!(base.single_quote, Some(false)); // Override takes precedence
        assert_eq!(base.tab_width, Some(4));
        assert_eq!(base.print_width, Some(100)); // Untouched
    }

    #[test]
    fn test_merge_fills_unset_keys() {
        let mut base = OptionSet::default();
        let override_options = OptionSet {
            prose_wrap: Some(ProseWrap::Always),
            parser: Some("markdown".to_string()),
            ..Default::default()
        };

        base.merge_with(&override_options);

        assert_eq!(base.prose_wrap, Some(ProseWrap::Always));
        assert_eq!(base.parser.as_deref(), Some("markdown"));
    }

    #[test]
    fn test_merge_empty_is_identity() {
        let base = OptionSet {
            trailing_comma: Some(TrailingComma::Es5),
            semi: Some(false),
            ..Default::default()
        };

        assert_eq!(base.merged(&OptionSet::default()), base);
    }

    #[test]
    fn test_merge_every_key() {
        let mut base = OptionSet::default();
        base.merge_with(&OptionSet::formatter_defaults());
        assert_eq!(base, OptionSet::formatter_defaults());
    }
}
