use crate::error::{ExtractorError, Result};
use serde::{Deserialize, Serialize};
use std::path::Path;

pub const CONFIG_FILE_NAMES: [&str; 2] = ["image-extractor.toml", ".image-extractor.toml"];

const OUTPUT_MODES: [&str; 3] = ["human", "plain", "json"];

/// Presentation settings. Nothing here changes which files are extracted or
/// where they go.
#[derive(Debug, Clone, Default, Deserialize, Serialize)]
pub struct Config {
    #[serde(default)]
    pub display: DisplayConfig,
}

#[derive(Debug, Clone, Deserialize, Serialize)]
#[serde(default)]
pub struct DisplayConfig {
    pub mode: String,
    pub verbose: u8,
    pub quiet: bool,
    pub show_progress: bool,
}

impl Default for DisplayConfig {
    fn default() -> Self {
        Self {
            mode: "human".to_string(),
            verbose: 1,
            quiet: false,
            show_progress: true,
        }
    }
}

impl Config {
    pub fn load_from_file<P: AsRef<Path>>(path: P) -> Result<Self> {
        let path = path.as_ref();

        if !path.exists() {
            return Err(ExtractorError::Config {
                message: format!("Configuration file not found: {}", path.display()),
            });
        }

        let content = std::fs::read_to_string(path).map_err(|e| ExtractorError::Config {
            message: format!("Failed to read config file {}: {}", path.display(), e),
        })?;

        let config: Config = toml::from_str(&content).map_err(|e| ExtractorError::Config {
            message: format!("Failed to parse config file {}: {}", path.display(), e),
        })?;

        Ok(config)
    }

    /// Loads `config_path` if given, otherwise the first default config file
    /// found in `search_dir`, otherwise defaults.
    pub fn load_with_defaults<P: AsRef<Path>>(
        config_path: Option<P>,
        search_dir: &Path,
    ) -> Result<Self> {
        match config_path {
            Some(path) => Self::load_from_file(path),
            None => {
                for name in &CONFIG_FILE_NAMES {
                    let candidate = search_dir.join(name);
                    if candidate.is_file() {
                        return Self::load_from_file(candidate);
                    }
                }

                Ok(Self::default())
            }
        }
    }

    pub fn merge_with_cli_args(&mut self, cli_args: &CliOverrides) {
        if let Some(ref mode) = cli_args.mode {
            self.display.mode = mode.to_lowercase();
        }

        if let Some(verbose) = cli_args.verbose {
            self.display.verbose = verbose;
        }

        if cli_args.quiet {
            self.display.quiet = true;
        }

        if cli_args.no_progress {
            self.display.show_progress = false;
        }
    }

    pub fn validate(&self) -> Result<()> {
        let mode = self.display.mode.to_lowercase();
        if !OUTPUT_MODES.contains(&mode.as_str()) {
            return Err(ExtractorError::Config {
                message: format!(
                    "Unknown output mode '{}' (expected one of: {})",
                    self.display.mode,
                    OUTPUT_MODES.join(", ")
                ),
            });
        }

        Ok(())
    }

    pub fn create_sample_config() -> String {
        let sample_config = Self::default();
        toml::to_string_pretty(&sample_config).unwrap_or_else(|_| String::new())
    }
}

#[derive(Debug, Default)]
pub struct CliOverrides {
    pub mode: Option<String>,
    pub verbose: Option<u8>,
    pub quiet: bool,
    pub no_progress: bool,
}

impl CliOverrides {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn with_mode(mut self, mode: Option<String>) -> Self {
        self.mode = mode;
        self
    }

    pub fn with_verbose(mut self, verbose: Option<u8>) -> Self {
        self.verbose = verbose;
        self
    }

    pub fn with_quiet(mut self, quiet: bool) -> Self {
        self.quiet = quiet;
        self
    }

    pub fn with_no_progress(mut self, no_progress: bool) -> Self {
        self.no_progress = no_progress;
        self
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use tempfile::{NamedTempFile, TempDir};

    #[test]
    fn test_default_config() {
        let config = Config::default();
        assert_eq!(config.display.mode, "human");
        assert!(config.display.show_progress);
        assert!(!config.display.quiet);
    }

    #[test]
    fn test_config_validation() {
        let mut config = Config::default();
        assert!(config.validate().is_ok());

        config.display.mode = "JSON".to_string();
        assert!(config.validate().is_ok());

        config.display.mode = "xml".to_string();
        assert!(config.validate().is_err());
    }

    #[test]
    fn test_sample_config_loads_back() {
        let temp_file = NamedTempFile::new().unwrap();
        std::fs::write(temp_file.path(), Config::create_sample_config()).unwrap();

        let loaded_config = Config::load_from_file(temp_file.path()).unwrap();
        assert_eq!(loaded_config.display.verbose, 1);
        assert_eq!(loaded_config.display.mode, "human");
        assert!(loaded_config.validate().is_ok());
    }

    #[test]
    fn test_partial_config_uses_defaults() {
        let temp_dir = TempDir::new().unwrap();
        let path = temp_dir.path().join("image-extractor.toml");
        std::fs::write(&path, "[display]\nquiet = true\n").unwrap();

        let config = Config::load_with_defaults(None::<&Path>, temp_dir.path()).unwrap();
        assert!(config.display.quiet);
        assert_eq!(config.display.mode, "human");
        assert!(config.display.show_progress);
    }

    #[test]
    fn test_missing_search_dir_config_falls_back_to_defaults() {
        let temp_dir = TempDir::new().unwrap();
        let config = Config::load_with_defaults(None::<&Path>, temp_dir.path()).unwrap();
        assert_eq!(config.display.verbose, 1);
    }

    #[test]
    fn test_explicit_missing_config_is_error() {
        let temp_dir = TempDir::new().unwrap();
        let missing = temp_dir.path().join("nope.toml");
        let result = Config::load_with_defaults(Some(&missing), temp_dir.path());
        assert!(matches!(result, Err(ExtractorError::Config { .. })));
    }

    #[test]
    fn test_cli_overrides() {
        let mut config = Config::default();

        let overrides = CliOverrides::new()
            .with_mode(Some("Plain".to_string()))
            .with_verbose(Some(3))
            .with_no_progress(true);

        config.merge_with_cli_args(&overrides);

        assert_eq!(config.display.mode, "plain");
        assert_eq!(config.display.verbose, 3);
        assert!(!config.display.show_progress);
        assert!(!config.display.quiet);
    }

    #[test]
    fn test_sample_config_generation() {
        let sample = Config::create_sample_config();
        assert!(sample.contains("[display]"));
        assert!(sample.contains("show_progress"));
    }
}
