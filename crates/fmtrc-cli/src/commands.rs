//! Command implementations

use fmtrc_core::config::absolute_file_path;
use fmtrc_core::config::schema::{SCHEMA_ID, configuration_schema, write_schema};
use fmtrc_core::{ConfigLoader, Configuration, FmtrcError, OptionSet, Result};
use std::path::{Path, PathBuf};
use tracing::{debug, warn};

use crate::output::print_resolved;
use crate::{ConfigFormat, OutputFormat};

/// Resolve command implementation
///
/// With `--config` every file is resolved against that one configuration;
/// otherwise each file discovers its own.
pub fn resolve_command(
    files: Vec<PathBuf>,
    config_path: Option<PathBuf>,
    with_defaults: bool,
    format: OutputFormat,
) -> Result<()> {
    debug!("Resolving options for {} files", files.len());

    let explicit = config_path
        .as_deref()
        .map(ConfigLoader::load_from_file)
        .transpose()?;

    let mut results = Vec::with_capacity(files.len());
    for file in &files {
        let absolute = absolute_file_path(file)?;
        let resolved = match &explicit {
            Some(config) => resolve_one(config, &absolute, with_defaults),
            None => match discover_for(&absolute)? {
                Some(config) => resolve_one(&config, &absolute, with_defaults),
                None => {
                    warn!("No configuration found for {}", file.display());
                    resolve_one(&Configuration::default(), &absolute, with_defaults)
                }
            },
        };
        results.push((file.display().to_string(), resolved));
    }

    print_resolved(&results, &format)
}

fn resolve_one(config: &Configuration, file: &Path, with_defaults: bool) -> OptionSet {
    if with_defaults {
        config.resolve_with_defaults(file)
    } else {
        config.resolve(file)
    }
}

fn discover_for(file: &Path) -> Result<Option<Configuration>> {
    let start_dir = file.parent().unwrap_or_else(|| Path::new("."));
    ConfigLoader::auto_discover(start_dir)?
        .map(|path| ConfigLoader::load_from_file(&path))
        .transpose()
}

/// Config init command implementation
pub fn config_init_command(format: ConfigFormat, force: bool) -> Result<()> {
    debug!("Initializing configuration file with format: {:?}", format);

    let filename = match format {
        ConfigFormat::Json => ".fmtrc.json",
        ConfigFormat::Yaml => ".fmtrc.yaml",
        ConfigFormat::Toml => ".fmtrc.toml",
    };
    let config_path = PathBuf::from(filename);

    if config_path.exists() && !force {
        return Err(FmtrcError::config_error(format!(
            "{filename} already exists. Use --force to overwrite"
        )));
    }

    let mut document = Configuration::reference()?.to_document();
    let content = match format {
        ConfigFormat::Json => {
            document.schema = Some(SCHEMA_ID.to_string());
            serde_json::to_string_pretty(&document)
                .map_err(|e| FmtrcError::config_error(format!("Failed to serialize JSON: {e}")))?
        }
        ConfigFormat::Yaml => serde_yaml::to_string(&document)
            .map_err(|e| FmtrcError::config_error(format!("Failed to serialize YAML: {e}")))?,
        ConfigFormat::Toml => toml::to_string_pretty(&document)
            .map_err(|e| FmtrcError::config_error(format!("Failed to serialize TOML: {e}")))?,
    };

    std::fs::write(&config_path, content).map_err(|e| FmtrcError::io_error(&config_path, e))?;

    println!("✅ Created configuration file: {filename}");
    println!("   Edit the file to customize your formatting options.");

    Ok(())
}

/// Config validate command implementation
pub fn config_validate_command(path: Option<PathBuf>) -> Result<()> {
    debug!("Validating configuration file: {:?}", path);

    let config = ConfigLoader::load(path.as_deref(), None)?;
    println!("✅ Configuration is valid");
    println!("   Base options: {}", config.base().len());
    println!("   Overrides: {}", config.overrides().len());

    Ok(())
}

/// Config show command implementation
pub fn config_show_command(config_path: Option<PathBuf>) -> Result<()> {
    debug!("Showing configuration");

    let config = ConfigLoader::load(config_path.as_deref(), None)?;
    let config_json = serde_json::to_string_pretty(&config.to_document())
        .map_err(|e| FmtrcError::config_error(format!("Failed to serialize config: {e}")))?;
    println!("{config_json}");

    Ok(())
}

/// Config schema command implementation
pub fn config_schema_command(output: Option<PathBuf>) -> Result<()> {
    match output {
        Some(path) => {
            write_schema(&path)?;
            println!("✓ Generated JSON Schema: {}", path.display());
        }
        None => {
            let schema = serde_json::to_string_pretty(&configuration_schema())
                .map_err(|e| FmtrcError::config_error(format!("Failed to serialize schema: {e}")))?;
            println!("{schema}");
        }
    }
    Ok(())
}
