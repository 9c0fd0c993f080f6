//! Configuration file discovery and loading

use serde_json::{Map, Value};
use std::fs;
use std::path::{Path, PathBuf};

use super::configuration::Configuration;
use super::options::OptionSet;
use crate::error::FmtrcError;
use crate::result::Result;

/// Dedicated config file names, in discovery priority order
pub const CONFIG_FILE_NAMES: &[&str] = &[
    ".fmtrc",
    ".fmtrc.json",
    ".fmtrc.jsonc",
    ".fmtrc.json5",
    ".fmtrc.yaml",
    ".fmtrc.yml",
    ".fmtrc.toml",
];

/// `package.json` is only used when it carries this key
pub const PACKAGE_JSON_KEY: &str = "fmtrc";

const PACKAGE_JSON: &str = "package.json";

/// Syntax of a configuration file
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ConfigFormat {
    Json,
    /// JSON with comments and trailing commas (`.jsonc`, `.json5`)
    Json5,
    Yaml,
    Toml,
    /// Extension-less `.fmtrc`: JSON5 first, then YAML
    Rc,
    /// The `fmtrc` key of a `package.json`
    PackageJson,
}

impl ConfigFormat {
    /// Pick the format from a file name
    pub fn from_path(path: &Path) -> Result<Self> {
        let file_name = path.file_name().and_then(|n| n.to_str()).unwrap_or_default();
        if file_name == PACKAGE_JSON {
            return Ok(ConfigFormat::PackageJson);
        }

        match path.extension().and_then(|e| e.to_str()) {
            Some("json") => Ok(ConfigFormat::Json),
            Some("jsonc") | Some("json5") => Ok(ConfigFormat::Json5),
            Some("yaml") | Some("yml") => Ok(ConfigFormat::Yaml),
            Some("toml") => Ok(ConfigFormat::Toml),
            None if file_name.starts_with('.') => Ok(ConfigFormat::Rc),
            _ => Err(FmtrcError::config_error(format!(
                "Unsupported config file '{}' (expected .json, .jsonc, .json5, .yaml, .yml, .toml or package.json)",
                path.display()
            ))),
        }
    }

    /// Parse file content into a raw document
    pub fn parse(self, content: &str) -> Result<Value> {
        let value: Value = match self {
            ConfigFormat::Json => serde_json::from_str(content)
                .map_err(|e| FmtrcError::config_error(format!("Invalid JSON: {e}")))?,
            ConfigFormat::Json5 => json5::from_str(content)
                .map_err(|e| FmtrcError::config_error(format!("Invalid JSON5: {e}")))?,
            ConfigFormat::Yaml => serde_yaml::from_str(content)
                .map_err(|e| FmtrcError::config_error(format!("Invalid YAML: {e}")))?,
            ConfigFormat::Toml => toml::from_str(content)
                .map_err(|e| FmtrcError::config_error(format!("Invalid TOML: {e}")))?,
            ConfigFormat::Rc => match json5::from_str::<Value>(content) {
                Ok(value) => value,
                Err(json_err) => serde_yaml::from_str(content).map_err(|yaml_err| {
                    FmtrcError::config_error(format!(
                        "Not valid JSON5 ({json_err}) or YAML ({yaml_err})"
                    ))
                })?,
            },
            ConfigFormat::PackageJson => {
                let mut package: Value = serde_json::from_str(content)
                    .map_err(|e| FmtrcError::config_error(format!("Invalid JSON: {e}")))?;
                package
                    .get_mut(PACKAGE_JSON_KEY)
                    .map(Value::take)
                    .ok_or_else(|| {
                        FmtrcError::config_error(format!(
                            "package.json has no '{PACKAGE_JSON_KEY}' key"
                        ))
                    })?
            }
        };

        // An empty YAML document is an empty configuration
        Ok(match value {
            Value::Null => Value::Object(Map::new()),
            other => other,
        })
    }
}

/// Configuration loader for discovering and loading config files
pub struct ConfigLoader;

impl ConfigLoader {
    /// Auto-discover config file by traversing upward from start_path
    ///
    /// Directories that do not exist yet are skipped over. In each
    /// directory the dedicated files are tried in
    /// [`CONFIG_FILE_NAMES`] order, then `package.json` if it has an
    /// `fmtrc` key. The first directory with a hit wins.
    pub fn auto_discover(start_path: &Path) -> Result<Option<PathBuf>> {
        let start = absolute_file_path(start_path)?;

        for dir in start.ancestors() {
            for filename in CONFIG_FILE_NAMES {
                let config_path = dir.join(filename);
                if config_path.is_file() {
                    tracing::debug!("Found config: {}", config_path.display());
                    return Ok(Some(config_path));
                }
            }

            let package_json = dir.join(PACKAGE_JSON);
            if package_json.is_file() && package_json_has_config(&package_json) {
                tracing::debug!("Found config in {}", package_json.display());
                return Ok(Some(package_json));
            }
        }

        Ok(None)
    }

    /// Load configuration from a specific file
    ///
    /// Paths resolved against the result are taken relative to the file's
    /// directory.
    pub fn load_from_file(path: &Path) -> Result<Configuration> {
        let format = ConfigFormat::from_path(path)?;
        let content = fs::read_to_string(path).map_err(|e| FmtrcError::io_error(path, e))?;
        let document = format.parse(&content).map_err(|e| match e {
            FmtrcError::ConfigError { message } => FmtrcError::config_error(format!(
                "Failed to load config from '{}': {}",
                path.display(),
                message
            )),
            other => other,
        })?;

        let config = Configuration::from_value(&document)?;
        let root_dir = path
            .canonicalize()
            .map_err(|e| FmtrcError::io_error(path, e))?
            .parent()
            .map(Path::to_path_buf)
            .unwrap_or_default();

        tracing::info!("Loaded configuration from {}", path.display());
        Ok(config.with_root_dir(root_dir))
    }

    /// Load config from path or auto-discover
    ///
    /// If a custom path is provided, loads from that path. Otherwise,
    /// discovers a config file starting from `start_dir` (or the current
    /// directory).
    pub fn load(custom_path: Option<&Path>, start_dir: Option<&Path>) -> Result<Configuration> {
        let config_path = if let Some(path) = custom_path {
            if !path.exists() {
                return Err(FmtrcError::config_error(format!(
                    "Config file not found: {}",
                    path.display()
                )));
            }
            path.to_path_buf()
        } else {
            let search_dir = start_dir.unwrap_or_else(|| Path::new("."));
            Self::auto_discover(search_dir)?.ok_or_else(|| {
                FmtrcError::config_error(format!(
                    "No config file found ({}, or package.json with an '{}' key). Run 'fmtrc config init' to create one",
                    CONFIG_FILE_NAMES.join(", "),
                    PACKAGE_JSON_KEY
                ))
            })?
        };

        Self::load_from_file(&config_path)
    }

    /// Discover the config governing `file` and resolve its options
    ///
    /// Returns `None` when no config file exists between the file and the
    /// filesystem root.
    pub fn resolve_for_file(file: &Path) -> Result<Option<OptionSet>> {
        let file = absolute_file_path(file)?;
        let start_dir = file.parent().unwrap_or_else(|| Path::new("/"));

        match Self::auto_discover(start_dir)? {
            Some(config_path) => {
                let config = Self::load_from_file(&config_path)?;
                Ok(Some(config.resolve(&file)))
            }
            None => Ok(None),
        }
    }
}

/// Absolute, symlink-resolved form of a path that may not exist yet
///
/// The nearest existing ancestor is canonicalized and the missing
/// components are appended to it.
pub fn absolute_file_path(path: &Path) -> Result<PathBuf> {
    let absolute = std::path::absolute(path).map_err(|e| FmtrcError::io_error(path, e))?;

    let mut existing = absolute.as_path();
    let mut missing = Vec::new();
    loop {
        if let Ok(canonical) = existing.canonicalize() {
            return Ok(missing
                .iter()
                .rev()
                .fold(canonical, |acc: PathBuf, part| acc.join(part)));
        }
        match (existing.parent(), existing.file_name()) {
            (Some(parent), Some(name)) => {
                missing.push(name.to_os_string());
                existing = parent;
            }
            _ => return Ok(absolute),
        }
    }
}

fn package_json_has_config(path: &Path) -> bool {
    let has_key = fs::read_to_string(path)
        .ok()
        .and_then(|content| serde_json::from_str::<Value>(&content).ok())
        .is_some_and(|package| package.get(PACKAGE_JSON_KEY).is_some());

    if !has_key {
        tracing::debug!("Skipping {} (no '{}' key)", path.display(), PACKAGE_JSON_KEY);
    }
    has_key
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::config::options::{EndOfLine, TrailingComma};
    use crate::error::ErrorKind;
    use tempfile::TempDir;

    fn create_temp_config(dir: &Path, filename: &str, content: &str) -> PathBuf {
        let path = dir.join(filename);
        fs::write(&path, content).unwrap();
        path
    }

    #[test]
    fn test_load_from_file_json() {
        let temp_dir = TempDir::new().unwrap();
        let config_path = create_temp_config(
            temp_dir.path(),
            ".fmtrc.json",
            r#"{
                "tabWidth": 2,
                "overrides": [{ "files": "*.md", "options": { "tabWidth": 4 } }]
            }"#,
        );

        let config = ConfigLoader::load_from_file(&config_path).unwrap();
        assert_eq!(config.base().tab_width, Some(2));
        assert_eq!(config.overrides().len(), 1);
    }

    #[test]
    fn test_load_from_file_jsonc() {
        let temp_dir = TempDir::new().unwrap();
        let config_path = create_temp_config(
            temp_dir.path(),
            ".fmtrc.jsonc",
            r#"{
                // Comments and trailing commas are fine here
                "semi": false,
                "trailingComma": "es5",
            }"#,
        );

        let config = ConfigLoader::load_from_file(&config_path).unwrap();
        assert_eq!(config.base().semi, Some(false));
        assert_eq!(config.base().trailing_comma, Some(TrailingComma::Es5));
    }

    #[test]
    fn test_load_from_file_yaml() {
        let temp_dir = TempDir::new().unwrap();
        let config_path = create_temp_config(
            temp_dir.path(),
            ".fmtrc.yaml",
            "printWidth: 100\nendOfLine: crlf\noverrides:\n  - files: ['*.md']\n    options:\n      printWidth: 120\n",
        );

        let config = ConfigLoader::load_from_file(&config_path).unwrap();
        assert_eq!(config.base().print_width, Some(100));
        assert_eq!(config.base().end_of_line, Some(EndOfLine::Crlf));
        assert_eq!(config.resolve("README.md").print_width, Some(120));
    }

    #[test]
    fn test_load_from_file_toml() {
        let temp_dir = TempDir::new().unwrap();
        let config_path = create_temp_config(
            temp_dir.path(),
            ".fmtrc.toml",
            r#"
useTabs = true
tabWidth = 8

[[overrides]]
files = "*.md"

[overrides.options]
useTabs = false
"#,
        );

        let config = ConfigLoader::load_from_file(&config_path).unwrap();
        assert_eq!(config.base().use_tabs, Some(true));
        assert_eq!(config.resolve("notes.md").use_tabs, Some(false));
        assert_eq!(config.resolve("notes.md").tab_width, Some(8));
    }

    #[test]
    fn test_load_extensionless_rc_as_yaml() {
        let temp_dir = TempDir::new().unwrap();
        let config_path = create_temp_config(temp_dir.path(), ".fmtrc", "semi: false\n");

        let config = ConfigLoader::load_from_file(&config_path).unwrap();
        assert_eq!(config.base().semi, Some(false));
    }

    #[test]
    fn test_load_empty_yaml_is_empty_config() {
        let temp_dir = TempDir::new().unwrap();
        let config_path = create_temp_config(temp_dir.path(), ".fmtrc.yaml", "");

        let config = ConfigLoader::load_from_file(&config_path).unwrap();
        assert!(config.base().is_empty());
        assert!(config.overrides().is_empty());
    }

    #[test]
    fn test_load_package_json() {
        let temp_dir = TempDir::new().unwrap();
        let config_path = create_temp_config(
            temp_dir.path(),
            "package.json",
            r#"{ "name": "demo", "fmtrc": { "singleQuote": true } }"#,
        );

        let config = ConfigLoader::load_from_file(&config_path).unwrap();
        assert_eq!(config.base().single_quote, Some(true));
    }

    #[test]
    fn test_auto_discover() {
        let temp_dir = TempDir::new().unwrap();
        let nested = temp_dir.path().join("src/nested");
        fs::create_dir_all(&nested).unwrap();

        create_temp_config(temp_dir.path(), ".fmtrc.json", r#"{"semi": true}"#);

        let found = ConfigLoader::auto_discover(&nested).unwrap();
        assert_eq!(found.unwrap().file_name().unwrap(), ".fmtrc.json");
    }

    #[test]
    fn test_auto_discover_from_missing_directory() {
        let temp_dir = TempDir::new().unwrap();
        create_temp_config(temp_dir.path(), ".fmtrc.yml", "semi: true");

        let found = ConfigLoader::auto_discover(&temp_dir.path().join("not/yet/created")).unwrap();
        assert_eq!(found.unwrap().file_name().unwrap(), ".fmtrc.yml");
    }

    #[test]
    fn test_auto_discover_priority() {
        let temp_dir = TempDir::new().unwrap();

        create_temp_config(temp_dir.path(), ".fmtrc.toml", "semi = true");
        create_temp_config(temp_dir.path(), ".fmtrc.yaml", "semi: true");
        create_temp_config(temp_dir.path(), ".fmtrc.json", r#"{"semi": true}"#);

        let found = ConfigLoader::auto_discover(temp_dir.path()).unwrap();
        assert_eq!(found.unwrap().file_name().unwrap(), ".fmtrc.json");
    }

    #[test]
    fn test_auto_discover_skips_package_json_without_key() {
        let temp_dir = TempDir::new().unwrap();
        let nested = temp_dir.path().join("pkg");
        fs::create_dir_all(&nested).unwrap();

        create_temp_config(&nested, "package.json", r#"{"name": "pkg"}"#);
        create_temp_config(temp_dir.path(), ".fmtrc.yml", "semi: false");

        let found = ConfigLoader::auto_discover(&nested).unwrap().unwrap();
        assert_eq!(found.file_name().unwrap(), ".fmtrc.yml");
    }

    #[test]
    fn test_nearest_directory_wins() {
        let temp_dir = TempDir::new().unwrap();
        let nested = temp_dir.path().join("pkg");
        fs::create_dir_all(&nested).unwrap();

        create_temp_config(temp_dir.path(), ".fmtrc.json", r#"{"semi": true}"#);
        create_temp_config(&nested, "package.json", r#"{"fmtrc": {"semi": false}}"#);

        let found = ConfigLoader::auto_discover(&nested).unwrap().unwrap();
        assert_eq!(found.file_name().unwrap(), "package.json");
    }

    #[test]
    fn test_load_nonexistent_file() {
        let result = ConfigLoader::load_from_file(Path::new("nonexistent.json"));
        assert_eq!(result.unwrap_err().kind(), ErrorKind::Io);

        let result = ConfigLoader::load(Some(Path::new("nonexistent.json")), None);
        assert_eq!(result.unwrap_err().kind(), ErrorKind::Config);
    }

    #[test]
    fn test_load_invalid_json() {
        let temp_dir = TempDir::new().unwrap();
        let config_path = create_temp_config(temp_dir.path(), "bad.json", r#"{ invalid json }"#);

        let err = ConfigLoader::load_from_file(&config_path).unwrap_err();
        assert_eq!(err.kind(), ErrorKind::Config);
        assert!(err.to_string().contains("bad.json"));
    }

    #[test]
    fn test_unsupported_extension() {
        let err = ConfigFormat::from_path(Path::new("fmtrc.ini")).unwrap_err();
        assert_eq!(err.kind(), ErrorKind::Config);
    }

    #[test]
    fn test_load_propagates_unknown_option() {
        let temp_dir = TempDir::new().unwrap();
        let config_path =
            create_temp_config(temp_dir.path(), ".fmtrc.json", r#"{"quoteStyle": "single"}"#);

        let err = ConfigLoader::load_from_file(&config_path).unwrap_err();
        assert!(matches!(err, FmtrcError::UnknownOption { .. }));
    }

    #[test]
    fn test_resolve_for_file_uses_config_directory() {
        let temp_dir = TempDir::new().unwrap();
        let docs = temp_dir.path().join("docs");
        fs::create_dir_all(&docs).unwrap();

        create_temp_config(
            temp_dir.path(),
            ".fmtrc.json",
            r#"{
                "tabWidth": 2,
                "overrides": [{ "files": "docs/*.md", "options": { "tabWidth": 4 } }]
            }"#,
        );
        let readme = create_temp_config(&docs, "intro.md", "# Intro\n");

        let resolved = ConfigLoader::resolve_for_file(&readme).unwrap().unwrap();
        assert_eq!(resolved.tab_width, Some(4));

        // The file need not exist yet
        let resolved = ConfigLoader::resolve_for_file(&docs.join("new.md"))
            .unwrap()
            .unwrap();
        assert_eq!(resolved.tab_width, Some(4));

        // Nor its directory
        let resolved = ConfigLoader::resolve_for_file(&temp_dir.path().join("src/new/app.md"))
            .unwrap()
            .unwrap();
        assert_eq!(resolved.tab_width, Some(2));
    }
}
