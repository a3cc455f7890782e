//! Compliance limit overrides loaded from TOML
//!
//! ```toml
//! [limits]
//! max_driving_hours = 10.0
//! max_cycle_hours = 60.0
//! ```
//!
//! Keys left out keep the value of the base limits they are applied to.

use std::fs;
use std::path::Path;

use serde::Deserialize;

use hos_domain::model::ComplianceLimits;
use hos_types::{ConfigError, Error, Result};

#[derive(Debug, Default, Deserialize)]
struct LimitsFile {
    #[serde(default)]
    limits: LimitOverrides,
}

#[derive(Debug, Clone, Default, PartialEq, Deserialize)]
#[serde(deny_unknown_fields)]
pub struct LimitOverrides {
    pub max_driving_hours: Option<f64>,
    pub max_on_duty_hours: Option<f64>,
    pub max_cycle_hours: Option<f64>,
    pub required_rest_break: Option<f64>,
    pub required_off_duty: Option<f64>,
}

#[derive(Debug)]
pub struct LimitsLoader {
    overrides: LimitOverrides,
}

impl LimitsLoader {
    pub fn load_from_file(path: &Path) -> Result<Self> {
        let content = fs::read_to_string(path).map_err(|e| {
            Error::Config(ConfigError::ParseError(format!(
                "Failed to read limits file {}: {}",
                path.display(),
                e
            )))
        })?;

        Self::load_from_str(&content)
    }

    pub fn load_from_str(toml_content: &str) -> Result<Self> {
        let file: LimitsFile = toml::from_str(toml_content).map_err(|e| {
            Error::Config(ConfigError::ParseError(format!(
                "Failed to parse limits TOML: {}",
                e
            )))
        })?;

        let overrides = file.limits;
        for (name, value) in [
            ("max_driving_hours", overrides.max_driving_hours),
            ("max_on_duty_hours", overrides.max_on_duty_hours),
            ("max_cycle_hours", overrides.max_cycle_hours),
            ("required_rest_break", overrides.required_rest_break),
            ("required_off_duty", overrides.required_off_duty),
        ] {
            if let Some(v) = value {
                if !v.is_finite() || v <= 0.0 {
                    return Err(Error::Config(ConfigError::ParseError(format!(
                        "{} must be a positive number of hours, got {}",
                        name, v
                    ))));
                }
            }
        }

        Ok(Self { overrides })
    }

    pub fn overrides(&self) -> &LimitOverrides {
        &self.overrides
    }

    /// Overlay the loaded values onto `base`
    pub fn apply(&self, base: ComplianceLimits) -> ComplianceLimits {
        let o = &self.overrides;
        ComplianceLimits {
            max_driving_hours: o.max_driving_hours.unwrap_or(base.max_driving_hours),
            max_on_duty_hours: o.max_on_duty_hours.unwrap_or(base.max_on_duty_hours),
            max_cycle_hours: o.max_cycle_hours.unwrap_or(base.max_cycle_hours),
            required_rest_break: o.required_rest_break.unwrap_or(base.required_rest_break),
            required_off_duty: o.required_off_duty.unwrap_or(base.required_off_duty),
        }
    }
}
