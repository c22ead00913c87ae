//! Configuration management for the CLI.
//!
//! This module handles loading configuration from `form-schema.toml` files
//! and merging with command-line arguments.

use crate::error::{CliResult, ConfigError};
use form_schema::ParserOptions;
use serde::Deserialize;
use std::path::{Path, PathBuf};

/// Default configuration filename.
pub const CONFIG_FILENAME: &str = "form-schema.toml";

/// Default output file.
pub const DEFAULT_OUTPUT: &str = "./.form-schema/output/form-schema.json";

/// Accepted `logging.level` values.
pub const LOG_LEVELS: &[&str] = &["trace", "debug", "info", "warn", "error", "off"];

/// Main configuration structure.
#[derive(Debug, Default, Clone, Deserialize)]
#[serde(default)]
pub struct Config {
    /// Input configuration.
    pub input: InputConfig,

    /// Output configuration.
    pub output: OutputConfig,

    /// Schema engine options.
    pub parser: ParserOptions,

    /// Logging configuration.
    pub logging: LoggingConfig,
}

/// Input configuration.
#[derive(Debug, Default, Clone, Deserialize)]
#[serde(default)]
pub struct InputConfig {
    /// Root TypeScript file.
    pub file: Option<PathBuf>,
}

/// Output configuration.
#[derive(Debug, Clone, Deserialize)]
#[serde(default)]
pub struct OutputConfig {
    /// Output JSON file.
    pub file: PathBuf,

    /// Pretty-print with two-space indentation.
    pub pretty: bool,
}

/// Logging configuration.
#[derive(Debug, Clone, Deserialize)]
#[serde(default)]
pub struct LoggingConfig {
    /// Log level used when `RUST_LOG` is not set.
    pub level: String,
}

impl Default for OutputConfig {
    fn default() -> Self {
        Self {
            file: PathBuf::from(DEFAULT_OUTPUT),
            pretty: true,
        }
    }
}

impl Default for LoggingConfig {
    fn default() -> Self {
        Self {
            level: "warn".to_string(),
        }
    }
}

/// Configuration manager for loading and merging configs.
pub struct ConfigManager;

impl ConfigManager {
    /// Load configuration from a file path.
    ///
    /// Without a path, `form-schema.toml` in the working directory is used
    /// if it exists, and defaults otherwise. An explicit path must exist.
    pub fn load(path: Option<&Path>) -> CliResult<Config> {
        let config_path = path
            .map(PathBuf::from)
            .unwrap_or_else(|| PathBuf::from(CONFIG_FILENAME));

        if !config_path.exists() {
            if path.is_some() {
                return Err(ConfigError::not_found(config_path).into());
            }
            return Ok(Config::default());
        }

        let content = std::fs::read_to_string(&config_path).map_err(|e| ConfigError::Io {
            path: config_path.clone(),
            source: e,
        })?;

        Self::parse(&config_path, &content)
    }

    /// Parse and validate configuration text.
    pub fn parse(path: &Path, content: &str) -> CliResult<Config> {
        let config: Config = toml::from_str(content)
            .map_err(|e| ConfigError::invalid_toml(path.to_path_buf(), e.to_string()))?;

        Self::validate(&config)?;
        Ok(config)
    }

    /// Check values serde cannot.
    pub fn validate(config: &Config) -> CliResult<()> {
        let level = config.logging.level.to_ascii_lowercase();
        if !LOG_LEVELS.contains(&level.as_str()) {
            return Err(ConfigError::invalid_value(
                "logging.level",
                format!(
                    "unknown level '{}', expected one of {}",
                    config.logging.level,
                    LOG_LEVELS.join(", ")
                ),
            )
            .into());
        }
        Ok(())
    }

    /// Merge CLI arguments into configuration.
    ///
    /// CLI arguments take precedence over config file values.
    pub fn merge_cli_args(mut config: Config, args: &CliArgs) -> Config {
        if let Some(ref input) = args.input {
            config.input.file = Some(input.clone());
        }

        if let Some(ref output) = args.output {
            config.output.file = output.clone();
        }

        if let Some(max_depth) = args.max_depth {
            config.parser.max_import_depth = max_depth;
        }

        if args.verbose {
            config.logging.level = "debug".to_string();
        }

        config
    }

    /// Generate default configuration file content with comments.
    pub fn default_config_content() -> &'static str {
        r#"# form-schema configuration file

[input]
# Root TypeScript file (a file given on the command line takes precedence)
# file = "src/forms/schema.ts"

[output]
# Output file (must end in .json)
file = "./.form-schema/output/form-schema.json"

# Pretty-print with two-space indentation
pretty = true

[parser]
# Enable decorator syntax in class bodies
decorators = true

# Read @Name(args) annotations from leading comments
comment_annotations = true

# Maximum depth of cross-file import resolution
max_import_depth = 5

[logging]
# Log level when RUST_LOG is not set (trace, debug, info, warn, error, off)
level = "warn"
"#
    }
}

/// CLI arguments that can override configuration.
#[derive(Debug, Default)]
pub struct CliArgs {
    /// Input file override.
    pub input: Option<PathBuf>,

    /// Output file override.
    pub output: Option<PathBuf>,

    /// Import depth override.
    pub max_depth: Option<usize>,

    /// Force debug logging.
    pub verbose: bool,
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_default_config() {
        let config = Config::default();
        assert_eq!(config.input.file, None);
        assert_eq!(config.output.file, PathBuf::from(DEFAULT_OUTPUT));
        assert!(config.output.pretty);
        assert_eq!(config.parser, ParserOptions::default());
        assert_eq!(config.logging.level, "warn");
    }

    #[test]
    fn test_default_content_matches_defaults() {
        let config =
            ConfigManager::parse(Path::new(CONFIG_FILENAME), ConfigManager::default_config_content())
                .unwrap();
        let defaults = Config::default();

        assert_eq!(config.input.file, defaults.input.file);
        assert_eq!(config.output.file, defaults.output.file);
        assert_eq!(config.output.pretty, defaults.output.pretty);
        assert_eq!(config.parser, defaults.parser);
        assert_eq!(config.logging.level, defaults.logging.level);
    }

    #[test]
    fn test_merge_cli_args() {
        let config = Config::default();
        let args = CliArgs {
            input: Some(PathBuf::from("src/user.ts")),
            output: Some(PathBuf::from("out/user.json")),
            max_depth: Some(2),
            verbose: true,
        };

        let merged = ConfigManager::merge_cli_args(config, &args);
        assert_eq!(merged.input.file, Some(PathBuf::from("src/user.ts")));
        assert_eq!(merged.output.file, PathBuf::from("out/user.json"));
        assert_eq!(merged.parser.max_import_depth, 2);
        assert_eq!(merged.logging.level, "debug");
    }

    #[test]
    fn test_merge_cli_args_preserves_unset() {
        let config = Config::default();
        let args = CliArgs::default();

        let merged = ConfigManager::merge_cli_args(config.clone(), &args);
        assert_eq!(merged.output.file, config.output.file);
        assert_eq!(merged.parser, config.parser);
        assert_eq!(merged.logging.level, config.logging.level);
    }

    #[test]
    fn test_parse_toml_config() {
        let toml = r#"
[input]
file = "src/forms/schema.ts"

[output]
file = "public/forms.json"
pretty = false

[parser]
comment_annotations = false
max_import_depth = 2

[logging]
level = "info"
"#;

        let config = ConfigManager::parse(Path::new("form-schema.toml"), toml).unwrap();
        assert_eq!(config.input.file, Some(PathBuf::from("src/forms/schema.ts")));
        assert_eq!(config.output.file, PathBuf::from("public/forms.json"));
        assert!(!config.output.pretty);
        assert!(config.parser.decorators);
        assert!(!config.parser.comment_annotations);
        assert_eq!(config.parser.max_import_depth, 2);
        assert_eq!(config.logging.level, "info");
    }

    #[test]
    fn test_invalid_toml() {
        let err = ConfigManager::parse(Path::new("bad.toml"), "[output\nfile = 1").unwrap_err();
        assert!(matches!(
            err,
            crate::CliError::Config(ConfigError::InvalidToml { .. })
        ));
    }

    #[test]
    fn test_invalid_log_level() {
        let err = ConfigManager::parse(Path::new("c.toml"), "[logging]\nlevel = \"loud\"").unwrap_err();
        assert!(matches!(
            err,
            crate::CliError::Config(ConfigError::InvalidValue { .. })
        ));
    }

    #[test]
    fn test_explicit_missing_config_is_an_error() {
        let err = ConfigManager::load(Some(Path::new("/definitely/missing/form-schema.toml")))
            .unwrap_err();
        assert!(matches!(
            err,
            crate::CliError::Config(ConfigError::NotFound { .. })
        ));
    }
}
