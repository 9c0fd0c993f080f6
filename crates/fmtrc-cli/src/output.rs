//! Output formatting for resolved options

use colored::*;
use fmtrc_core::{FmtrcError, OptionSet, Result};
use serde_json::{Map, Value};

use crate::OutputFormat;

/// Print resolved options for each file
pub fn print_resolved(results: &[(String, OptionSet)], format: &OutputFormat) -> Result<()> {
    match format {
        OutputFormat::Human => {
            print!("{}", render_human(results));
            Ok(())
        }
        OutputFormat::Json => {
            println!("{}", render_json(results)?);
            Ok(())
        }
    }
}

fn render_human(results: &[(String, OptionSet)]) -> String {
    let mut out = String::new();
    for (index, (file, options)) in results.iter().enumerate() {
        if index > 0 {
            out.push('\n');
        }
        out.push_str(&format!("{}\n", file.bold()));

        let entries = options.entries();
        if entries.is_empty() {
            out.push_str(&format!("  {}\n", "(no options set)".dimmed()));
            continue;
        }

        let width = entries.keys().map(|key| key.len()).max().unwrap_or(0);
        for (key, value) in entries {
            out.push_str(&format!(
                "  {}  {}\n",
                format!("{key:<width$}").cyan(),
                value
            ));
        }
    }
    out
}

fn render_json(results: &[(String, OptionSet)]) -> Result<String> {
    let mut map = Map::new();
    for (file, options) in results {
        let value = serde_json::to_value(options)
            .map_err(|e| FmtrcError::config_error(format!("Failed to serialize options: {e}")))?;
        map.insert(file.clone(), value);
    }

    serde_json::to_string_pretty(&Value::Object(map))
        .map_err(|e| FmtrcError::config_error(format!("Failed to serialize options: {e}")))
}

#[cfg(test)]
mod tests {
    use super::*;
    use fmtrc_core::TrailingComma;

    fn sample() -> Vec<(String, OptionSet)> {
        vec![
            (
                "src/app.ts".to_string(),
                OptionSet {
                    tab_width: Some(2),
                    trailing_comma: Some(TrailingComma::All),
                    ..Default::default()
                },
            ),
            ("empty.txt".to_string(), OptionSet::default()),
        ]
    }

    #[test]
    fn test_render_human() {
        colored::control::set_override(false);
        let text = render_human(&sample());

        assert!(text.starts_with("src/app.ts\n"));
        assert!(text.contains("  tabWidth       2\n"));
        assert!(text.contains("  trailingComma  all\n"));
        assert!(text.contains("empty.txt\n  (no options set)\n"));
    }

    #[test]
    fn test_render_json() {
        let json: Value = serde_json::from_str(&render_json(&sample()).unwrap()).unwrap();

        assert_eq!(json["src/app.ts"]["tabWidth"], Value::from(2));
        assert_eq!(json["src/app.ts"]["trailingComma"], Value::from("all"));
        assert_eq!(json["empty.txt"], Value::Object(Map::new()));
    }
}
