//! Configuration management for hos-planner
//!
//! Config stored at: ~/.config/hos-planner/config.json

use std::path::{Path, PathBuf};

use serde::{Deserialize, Serialize};

use hos_domain::model::ComplianceLimits;
use hos_infra::geocoder::GeocoderSettings;
use hos_infra::limits_loader::LimitsLoader;
use hos_types::{ConfigError, OutputFormat, Result};

/// Application configuration
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Config {
    /// Default output format (json, table)
    #[serde(default = "default_output_format")]
    pub output_format: OutputFormat,

    /// Store directory override
    #[serde(default)]
    pub store_dir: Option<PathBuf>,

    /// Regulatory limits used by compliance checks
    #[serde(default)]
    pub limits: ComplianceLimits,

    /// Address lookup endpoint
    #[serde(default)]
    pub geocoder: GeocoderSettings,
}

fn default_output_format() -> OutputFormat {
    OutputFormat::Table
}

impl Default for Config {
    fn default() -> Self {
        Self {
            output_format: default_output_format(),
            store_dir: None,
            limits: ComplianceLimits::default(),
            geocoder: GeocoderSettings::default(),
        }
    }
}

impl Config {
    /// Get the config directory path
    pub fn config_dir() -> Result<PathBuf> {
        let config_dir = dirs::config_dir()
            .ok_or(ConfigError::NotFound)?
            .join("hos-planner");
        Ok(config_dir)
    }

    /// Get the config file path
    pub fn config_path() -> Result<PathBuf> {
        Ok(Self::config_dir()?.join("config.json"))
    }

    /// Get the store directory path
    pub fn store_dir(&self) -> Result<PathBuf> {
        if let Some(ref dir) = self.store_dir {
            return Ok(dir.clone());
        }

        let store_dir = dirs::data_dir()
            .ok_or(ConfigError::NotFound)?
            .join("hos-planner");
        Ok(store_dir)
    }

    /// Limits for this invocation, with an optional TOML override file applied
    pub fn effective_limits(&self, limits_file: Option<&Path>) -> Result<ComplianceLimits> {
        match limits_file {
            Some(path) => {
                let loader = LimitsLoader::load_from_file(path)?;
                tracing::debug!(path = %path.display(), "applying limits override");
                Ok(loader.apply(self.limits))
            }
            None => Ok(self.limits),
        }
    }

    /// Load config from file, or create default
    pub fn load() -> Result<Self> {
        Self::load_from(&Self::config_path()?)
    }

    pub fn load_from(path: &Path) -> Result<Self> {
        if path.exists() {
            let content = std::fs::read_to_string(path)?;
            let config: Config = serde_json::from_str(&content)
                .map_err(|e| ConfigError::ParseError(format!("{}: {}", path.display(), e)))?;
            Ok(config)
        } else {
            Ok(Config::default())
        }
    }

    /// Save config to file
    pub fn save(&self) -> Result<()> {
        self.save_to(&Self::config_path()?)
    }

    pub fn save_to(&self, path: &Path) -> Result<()> {
        if let Some(parent) = path.parent() {
            std::fs::create_dir_all(parent)?;
        }

        let content = serde_json::to_string_pretty(self)?;
        std::fs::write(path, content)?;
        Ok(())
    }
}

impl std::fmt::Display for Config {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        writeln!(f, "HOS Planner Configuration")?;
        writeln!(f, "=========================")?;
        writeln!(f)?;
        writeln!(f, "Output format:      {}", self.output_format)?;
        writeln!(
            f,
            "Store dir:          {}",
            self.store_dir()
                .map(|p| p.display().to_string())
                .unwrap_or_else(|_| "(error)".to_string())
        )?;
        writeln!(f)?;
        writeln!(f, "Max driving:        {:.1}h", self.limits.max_driving_hours)?;
        writeln!(f, "Max on-duty:        {:.1}h", self.limits.max_on_duty_hours)?;
        writeln!(f, "Max cycle:          {:.1}h", self.limits.max_cycle_hours)?;
        writeln!(f, "Rest break:         {:.1}h", self.limits.required_rest_break)?;
        writeln!(f, "Off-duty reset:     {:.1}h", self.limits.required_off_duty)?;
        writeln!(f)?;
        writeln!(f, "Geocoder URL:       {}", self.geocoder.base_url)?;
        writeln!(f, "Country codes:      {}", self.geocoder.country_codes)?;
        writeln!(f, "Timeout:            {}s", self.geocoder.timeout_secs)?;

        if let Ok(path) = Self::config_path() {
            writeln!(f)?;
            writeln!(f, "Config file:        {}", path.display())?;
        }

        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use tempfile::tempdir;

    #[test]
    fn test_missing_file_gives_default() {
        let dir = tempdir().unwrap();
        let config = Config::load_from(&dir.path().join("config.json")).unwrap();
        assert_eq!(config, Config::default());
    }

    #[test]
    fn test_save_and_load() {
        let dir = tempdir().unwrap();
        let path = dir.path().join("nested").join("config.json");

        let mut config = Config::default();
        config.output_format = OutputFormat::Json;
        config.store_dir = Some(dir.path().join("store"));
        config.limits.max_cycle_hours = 60.0;
        config.save_to(&path).unwrap();

        let loaded = Config::load_from(&path).unwrap();
        assert_eq!(loaded, config);
        assert_eq!(loaded.store_dir().unwrap(), dir.path().join("store"));
    }

    #[test]
    fn test_partial_file_uses_field_defaults() {
        let dir = tempdir().unwrap();
        let path = dir.path().join("config.json");
        std::fs::write(&path, r#"{"limits": {"maxDrivingHours": 10.0}}"#).unwrap();

        let config = Config::load_from(&path).unwrap();
        assert_eq!(config.output_format, OutputFormat::Table);
        assert_eq!(config.limits.max_driving_hours, 10.0);
        assert_eq!(config.limits.max_on_duty_hours, 14.0);
        assert_eq!(config.geocoder, GeocoderSettings::default());
    }

    #[test]
    fn test_effective_limits_with_override() {
        let dir = tempdir().unwrap();
        let path = dir.path().join("limits.toml");
        std::fs::write(&path, "[limits]\nmax_on_duty_hours = 13.0\n").unwrap();

        let config = Config::default();
        assert_eq!(config.effective_limits(None).unwrap(), ComplianceLimits::default());
        let limits = config.effective_limits(Some(&path)).unwrap();
        assert_eq!(limits.max_on_duty_hours, 13.0);
        assert_eq!(limits.max_driving_hours, 11.0);
    }
}
