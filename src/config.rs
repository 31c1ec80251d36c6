use serde::{Deserialize, Serialize};
use std::path::{Path, PathBuf};
use std::fs;
use crate::property::PropertyEntry;
use crate::Result;

/// Configuration for Rental Analyzer
/// Can be loaded from a TOML file to set default values for CLI parameters
#[derive(Debug, Clone, Serialize, Deserialize, Default)]
pub struct Config {
    /// Default function to perform
    pub function: Option<String>,

    /// Default output file
    pub output: Option<String>,

    /// Force overwrite without prompting
    pub force: Option<bool>,

    /// Verbose mode
    pub verbose: Option<bool>,

    /// CSV file of properties to analyze
    pub properties_file: Option<String>,

    /// Parameters shared by all properties
    #[serde(default)]
    pub global: GlobalConfig,

    /// Inline property list, used when no properties file is given
    #[serde(default)]
    pub properties: Vec<PropertyEntry>,
}

/// Global parameter defaults
#[derive(Debug, Clone, Serialize, Deserialize, Default)]
pub struct GlobalConfig {
    /// Tax rate in percent
    pub tax_rate: Option<f64>,
    pub depreciation_years: Option<u32>,
}

impl Config {
    /// Load configuration from a file
    pub fn from_file<P: AsRef<Path>>(path: P) -> Result<Self> {
        let content = fs::read_to_string(path.as_ref())?;
        let config: Config = toml::from_str(&content)?;
        Ok(config)
    }

    /// Load configuration from default locations
    /// Checks in order:
    /// 1. ./.rental_analyzer.toml (current directory)
    /// 2. ~/.config/rental_analyzer/config.toml (user config directory)
    /// 3. ~/.rental_analyzer.toml (home directory)
    pub fn load_default() -> Result<Option<Self>> {
        Self::find_default().map(Self::from_file).transpose()
    }

    /// Path of the first default config file that exists
    pub fn find_default() -> Option<PathBuf> {
        let current_dir_config = PathBuf::from(".rental_analyzer.toml");
        if current_dir_config.exists() {
            return Some(current_dir_config);
        }

        if let Some(config_dir) = Self::get_config_dir() {
            let config_path = config_dir.join("rental_analyzer").join("config.toml");
            if config_path.exists() {
                return Some(config_path);
            }
        }

        if let Some(home_dir) = Self::get_home_dir() {
            let home_config = home_dir.join(".rental_analyzer.toml");
            if home_config.exists() {
                return Some(home_config);
            }
        }

        None
    }

    /// Get the user's config directory
    fn get_config_dir() -> Option<PathBuf> {
        if let Ok(config_dir) = std::env::var("XDG_CONFIG_HOME") {
            Some(PathBuf::from(config_dir))
        } else {
            Self::get_home_dir().map(|home_dir| home_dir.join(".config"))
        }
    }

    /// Get the user's home directory
    fn get_home_dir() -> Option<PathBuf> {
        std::env::var("HOME")
            .or_else(|_| std::env::var("USERPROFILE"))
            .ok()
            .map(PathBuf::from)
    }

    /// Merge config with CLI arguments, giving CLI arguments priority
    pub fn merge_with_cli(&self, cli_args: &mut crate::cli::Args) {
        // Only override function if it's still the default
        if cli_args.function == crate::cli::DEFAULT_FUNCTION {
            if let Some(function) = &self.function {
                cli_args.function = function.clone();
            }
        }

        if cli_args.output.is_none() {
            cli_args.output = self.output.clone();
        }

        if cli_args.properties.is_none() {
            cli_args.properties = self.properties_file.clone();
        }

        // Booleans: only set from config if CLI flag wasn't explicitly set
        if !cli_args.force && self.force == Some(true) {
            cli_args.force = true;
        }

        if !cli_args.verbose && self.verbose == Some(true) {
            cli_args.verbose = true;
        }

        if cli_args.tax_rate.is_none() {
            cli_args.tax_rate = self.global.tax_rate;
        }
        if cli_args.depreciation_years.is_none() {
            cli_args.depreciation_years = self.global.depreciation_years;
        }
    }
}
