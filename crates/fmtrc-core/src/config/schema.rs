//! JSON Schema for configuration files
//!
//! Generated from the document types using schemars.

use schemars::schema_for;
use serde_json::{Value, json};
use std::fs;
use std::path::Path;

use super::configuration::ConfigFile;
use crate::error::FmtrcError;
use crate::result::Result;

/// Canonical location of the published schema
pub const SCHEMA_ID: &str = "https://fmtrc.github.io/fmtrc/schema/v1.json";

/// Build the JSON Schema for `.fmtrc*` files
pub fn configuration_schema() -> Value {
    let mut schema = serde_json::to_value(schema_for!(ConfigFile)).unwrap_or_else(|_| json!({}));

    schema["$id"] = json!(SCHEMA_ID);
    schema["title"] = json!("fmtrc configuration");
    schema["description"] = json!(
        "Formatter options with per-file overrides - validates .fmtrc, .fmtrc.json, .fmtrc.yaml and .fmtrc.toml files"
    );
    schema
}

/// Write the schema to `output_path` as pretty-printed JSON
pub fn write_schema(output_path: &Path) -> Result<()> {
    tracing::info!("Generating JSON Schema for fmtrc configuration...");

    if let Some(parent) = output_path.parent()
        && !parent.as_os_str().is_empty()
    {
        fs::create_dir_all(parent).map_err(|e| FmtrcError::io_error(parent, e))?;
    }

    let output = serde_json::to_string_pretty(&configuration_schema())
        .map_err(|e| FmtrcError::config_error(format!("Failed to serialize schema: {e}")))?;
    fs::write(output_path, output).map_err(|e| FmtrcError::io_error(output_path, e))?;

    tracing::info!("Schema written to {}", output_path.display());
    Ok(())
}
