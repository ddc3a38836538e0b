use crate::error::{LabError, Result};
use crate::logic::normalize::normalize;
use crate::logic::plan::PlanSettings;
use crate::logic::reminders::{ReminderIntervals, PETIOLE_TEST_INTERVAL_DAYS, SOIL_TEST_INTERVAL_DAYS};
use crate::logic::validation::{ValidationRange, ValidationTable};
use crate::logic::EngineTables;
use crate::models::TestType;
use serde::{Deserialize, Serialize};
use std::collections::BTreeMap;
use std::path::{Path, PathBuf};

#[derive(Debug, Clone, Default, PartialEq, Deserialize, Serialize)]
pub struct Config {
    #[serde(default)]
    pub reminders: ReminderConfig,
    #[serde(default)]
    pub validation: ValidationConfig,
    #[serde(default)]
    pub plan: PlanConfig,
}

#[derive(Debug, Clone, PartialEq, Deserialize, Serialize)]
pub struct ReminderConfig {
    #[serde(default = "default_soil_interval", deserialize_with = "deserialize_days")]
    pub soil_interval_days: i64,
    #[serde(default = "default_petiole_interval", deserialize_with = "deserialize_days")]
    pub petiole_interval_days: i64,
}

fn deserialize_days<'de, D>(deserializer: D) -> std::result::Result<i64, D::Error>
where
    D: serde::Deserializer<'de>,
{
    use serde::de::Error;

    #[derive(Deserialize)]
    #[serde(untagged)]
    enum Days {
        Number(i64),
        Text(String),
    }

    match Days::deserialize(deserializer)? {
        Days::Number(days) => Ok(days),
        Days::Text(value) => value.trim().parse::<i64>().map_err(|_| {
            D::Error::custom(format!(
                "invalid day count '{}' - ensure the referenced environment variable is set",
                value
            ))
        }),
    }
}

fn default_soil_interval() -> i64 {
    SOIL_TEST_INTERVAL_DAYS
}

fn default_petiole_interval() -> i64 {
    PETIOLE_TEST_INTERVAL_DAYS
}

impl Default for ReminderConfig {
    fn default() -> Self {
        Self {
            soil_interval_days: default_soil_interval(),
            petiole_interval_days: default_petiole_interval(),
        }
    }
}

/// Per-parameter range overrides, keyed by any spelling the normalizer accepts.
#[derive(Debug, Clone, Default, PartialEq, Deserialize, Serialize)]
pub struct ValidationConfig {
    #[serde(default)]
    pub soil: BTreeMap<String, ValidationRange>,
    #[serde(default)]
    pub petiole: BTreeMap<String, ValidationRange>,
}

#[derive(Debug, Clone, PartialEq, Deserialize, Serialize)]
pub struct PlanConfig {
    #[serde(default = "default_verification_offset")]
    pub verification_offset_months: u32,
    #[serde(default = "default_maintenance_offset")]
    pub maintenance_offset_months: u32,
}

fn default_verification_offset() -> u32 {
    PlanSettings::default().verification_offset_months
}

fn default_maintenance_offset() -> u32 {
    PlanSettings::default().maintenance_offset_months
}

impl Default for PlanConfig {
    fn default() -> Self {
        Self {
            verification_offset_months: default_verification_offset(),
            maintenance_offset_months: default_maintenance_offset(),
        }
    }
}

impl Config {
    /// Load config from an explicit path, or from the first standard location found.
    /// With no explicit path and no file on disk, the built-in defaults apply.
    pub fn load(config_override: Option<&Path>) -> Result<Self> {
        let config_path = match config_override {
            Some(p) => {
                if !p.exists() {
                    return Err(LabError::Config(format!(
                        "Config file not found at {:?}",
                        p
                    )));
                }
                p.to_path_buf()
            }
            None => match Self::find_config_path() {
                Some(p) => p,
                None => {
                    tracing::debug!("No config file found; using built-in defaults");
                    return Ok(Self::default());
                }
            },
        };

        let config_str = std::fs::read_to_string(&config_path)
            .map_err(|e| LabError::Config(format!("Failed to read config: {}", e)))?;

        let config = Self::parse(&config_str)?;
        tracing::info!("Loaded configuration from {}", config_path.display());
        Ok(config)
    }

    /// Parse YAML after substituting `${VAR}` placeholders from the environment.
    pub fn parse(content: &str) -> Result<Self> {
        let content = Self::substitute_env_vars(content);
        serde_yaml::from_str(&content)
            .map_err(|e| LabError::Config(format!("Failed to parse config: {}", e)))
    }

    /// Search for config.yaml in standard locations.
    fn find_config_path() -> Option<PathBuf> {
        // Try current directory first
        let local_config = PathBuf::from("config/config.yaml");
        if local_config.exists() {
            return Some(local_config);
        }

        // Then the XDG config directory
        let xdg_config = dirs::config_dir()?.join("vinelab").join("config.yaml");
        xdg_config.exists().then_some(xdg_config)
    }

    fn substitute_env_vars(content: &str) -> String {
        let mut result = content.to_string();

        let re = match regex_lite::Regex::new(r"\$\{([A-Z_][A-Z0-9_]*)\}") {
            Ok(re) => re,
            Err(_) => return result,
        };

        for cap in re.captures_iter(content) {
            let var_name = &cap[1];
            let placeholder = &cap[0];
            if let Ok(value) = std::env::var(var_name) {
                result = result.replace(placeholder, &value);
            }
        }

        result
    }

    /// Build the immutable engine tables this config describes.
    pub fn to_tables(&self) -> Result<EngineTables> {
        let mut validation = ValidationTable::default();
        for (test_type, overrides) in [
            (TestType::Soil, &self.validation.soil),
            (TestType::Petiole, &self.validation.petiole),
        ] {
            for (key, range) in overrides {
                let parameter = normalize(key).ok_or_else(|| {
                    LabError::Config(format!(
                        "Unknown parameter '{}' in validation.{}",
                        key, test_type
                    ))
                })?;
                if !(range.min.is_finite() && range.max.is_finite() && range.min <= range.max) {
                    return Err(LabError::Config(format!(
                        "Invalid range for validation.{}.{}: {}..{}",
                        test_type, key, range.min, range.max
                    )));
                }
                validation = validation.with_range(test_type, parameter, *range);
            }
        }

        if self.reminders.soil_interval_days < 0 || self.reminders.petiole_interval_days < 0 {
            return Err(LabError::Config(
                "Reminder intervals must not be negative".into(),
            ));
        }

        Ok(EngineTables {
            validation,
            reminders: ReminderIntervals {
                soil_days: self.reminders.soil_interval_days,
                petiole_days: self.reminders.petiole_interval_days,
            },
            plan: PlanSettings {
                verification_offset_months: self.plan.verification_offset_months,
                maintenance_offset_months: self.plan.maintenance_offset_months,
            },
            ..EngineTables::default()
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::models::Parameter;

    #[test]
    fn empty_config_uses_defaults() {
        let config = Config::parse("{}").unwrap();
        assert_eq!(config, Config::default());
        let tables = config.to_tables().unwrap();
        assert_eq!(tables.reminders, ReminderIntervals::default());
        assert_eq!(tables.plan, PlanSettings::default());
    }

    #[test]
    fn overrides_are_applied() {
        let yaml = r#"
reminders:
  soil_interval_days: 365
validation:
  soil:
    pH: { min: 3.0, max: 10.0 }
plan:
  maintenance_offset_months: 4
"#;
        let config = Config::parse(yaml).unwrap();
        let tables = config.to_tables().unwrap();
        assert_eq!(tables.reminders.soil_days, 365);
        assert_eq!(tables.reminders.petiole_days, 90);
        assert_eq!(tables.plan.maintenance_offset_months, 4);
        assert_eq!(tables.plan.verification_offset_months, 2);
        assert_eq!(
            tables.validation.range(TestType::Soil, Parameter::Ph),
            Some(ValidationRange::new(3.0, 10.0))
        );
    }

    #[test]
    fn unknown_override_key_is_rejected() {
        let yaml = r#"
validation:
  petiole:
    texture: { min: 0.0, max: 1.0 }
"#;
        let config = Config::parse(yaml).unwrap();
        assert!(config.to_tables().is_err());
    }

    #[test]
    fn inverted_range_is_rejected() {
        let yaml = r#"
validation:
  soil:
    ph: { min: 9.0, max: 3.0 }
"#;
        let config = Config::parse(yaml).unwrap();
        assert!(config.to_tables().is_err());
    }

    #[test]
    fn env_vars_are_substituted() {
        std::env::set_var("VINELAB_TEST_PETIOLE_DAYS", "60");
        let yaml = "reminders:\n  petiole_interval_days: ${VINELAB_TEST_PETIOLE_DAYS}\n";
        let config = Config::parse(yaml).unwrap();
        assert_eq!(config.reminders.petiole_interval_days, 60);
    }

    #[test]
    fn shipped_example_loads() {
        let config = Config::parse(include_str!("../config/config.yaml.example")).unwrap();
        let tables = config.to_tables().unwrap();
        assert_eq!(tables.reminders, ReminderIntervals::default());
        assert_eq!(tables.plan, PlanSettings::default());
        assert_eq!(
            tables.validation.range(TestType::Petiole, Parameter::Boron),
            Some(ValidationRange::new(0.0, 500.0))
        );
    }

    #[test]
    fn unset_env_var_names_the_placeholder() {
        std::env::remove_var("VINELAB_TEST_UNSET_DAYS");
        let yaml = "reminders:\n  soil_interval_days: ${VINELAB_TEST_UNSET_DAYS}\n";
        let err = Config::parse(yaml).unwrap_err().to_string();
        assert!(err.contains("${VINELAB_TEST_UNSET_DAYS}"), "{}", err);
        assert!(err.contains("environment variable"), "{}", err);
    }

    #[test]
    fn quoted_day_counts_are_accepted() {
        let config = Config::parse("reminders:\n  petiole_interval_days: \"45\"\n").unwrap();
        assert_eq!(config.reminders.petiole_interval_days, 45);
    }

    #[test]
    fn missing_explicit_path_is_an_error() {
        let result = Config::load(Some(Path::new("/nonexistent/vinelab/config.yaml")));
        assert!(result.is_err());
    }
}
