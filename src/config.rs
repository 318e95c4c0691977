//! Configuration boundary.
//!
//! The effector core accepts whatever numbers it is given. Values coming from a
//! file or an operator UI pass through [`HapticsConfig::validate`] first.

#[cfg(feature = "serde")]
use std::path::Path;

#[cfg(feature = "serde")]
use anyhow::{Context, Result};
#[cfg(feature = "serde")]
use serde::{Deserialize, Serialize};
use thiserror::Error;

use crate::timing::LoopRates;
use crate::workspace::WorkspaceScaleConfig;

/// Rejected configuration values.
#[derive(Debug, Clone, PartialEq, Error)]
pub enum ConfigError {
    #[error("{name} must be finite, got {value}")]
    NonFinite { name: &'static str, value: f32 },
    #[error("{name} must not be negative, got {value}")]
    Negative { name: &'static str, value: f32 },
    #[error("{name} must be at least 1 Hz")]
    ZeroRate { name: &'static str },
    #[error("minimum scale {min} exceeds maximum scale {max}")]
    ScaleRange { min: f32, max: f32 },
}

/// Check that a tunable is finite and not negative.
pub(crate) fn check_gain(name: &'static str, value: f32) -> Result<(), ConfigError> {
    if !value.is_finite() {
        return Err(ConfigError::NonFinite { name, value });
    }
    if value < 0.0 {
        return Err(ConfigError::Negative { name, value });
    }
    Ok(())
}

/// Effector tunables.
#[derive(Debug, Clone, PartialEq)]
#[cfg_attr(feature = "serde", derive(Serialize, Deserialize), serde(default))]
pub struct EffectorConfig {
    /// Spring constant (N/m). Default: 400. Typical range 0–800.
    pub stiffness: f32,
    /// Velocity damping (N·s/m). Default: 1. Typical range 0–3.
    pub damping: f32,
    /// Start with force output on. Default: false.
    pub force_enabled: bool,
    /// Only output force while the proxy is in contact. Default: true.
    pub collision_detection: bool,
}

impl Default for EffectorConfig {
    fn default() -> Self {
        Self {
            stiffness: 400.0,
            damping: 1.0,
            force_enabled: false,
            collision_detection: true,
        }
    }
}

impl EffectorConfig {
    pub fn validate(&self) -> Result<(), ConfigError> {
        check_gain("stiffness", self.stiffness)?;
        check_gain("damping", self.damping)
    }
}

/// Top-level configuration document.
#[derive(Debug, Clone, PartialEq, Default)]
#[cfg_attr(feature = "serde", derive(Serialize, Deserialize), serde(default))]
pub struct HapticsConfig {
    pub effector: EffectorConfig,
    pub rates: LoopRates,
    pub workspace_scale: WorkspaceScaleConfig,
}

impl HapticsConfig {
    pub fn validate(&self) -> Result<(), ConfigError> {
        self.effector.validate()?;
        self.rates.validate()?;
        self.workspace_scale.validate()
    }

    /// Parse and validate a JSON document. Missing fields take their defaults.
    #[cfg(feature = "serde")]
    pub fn from_json_str(json: &str) -> Result<Self> {
        let config: Self = serde_json::from_str(json).context("Failed to parse haptics config")?;
        config.validate()?;
        Ok(config)
    }

    /// Load a JSON config file.
    #[cfg(feature = "serde")]
    pub fn load<P: AsRef<Path>>(path: P) -> Result<Self> {
        let path = path.as_ref();
        let text = std::fs::read_to_string(path)
            .with_context(|| format!("Failed to read haptics config from {:?}", path))?;
        let config =
            Self::from_json_str(&text).with_context(|| format!("Invalid config in {:?}", path))?;
        tracing::info!(?path, "loaded haptics config");
        Ok(config)
    }

    #[cfg(feature = "serde")]
    pub fn to_json_string(&self) -> Result<String> {
        serde_json::to_string_pretty(self).context("Failed to serialize haptics config")
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_default_config_is_valid() {
        let config = HapticsConfig::default();
        assert!(config.validate().is_ok());
        assert_eq!(config.effector.stiffness, 400.0);
        assert_eq!(config.effector.damping, 1.0);
        assert!(!config.effector.force_enabled);
        assert!(config.effector.collision_detection);
    }

    #[test]
    fn test_rejects_non_finite_stiffness() {
        let config = EffectorConfig {
            stiffness: f32::NAN,
            ..Default::default()
        };
        assert!(matches!(
            config.validate(),
            Err(ConfigError::NonFinite {
                name: "stiffness",
                ..
            })
        ));
    }

    #[test]
    fn test_rejects_negative_damping() {
        let config = EffectorConfig {
            damping: -0.5,
            ..Default::default()
        };
        assert_eq!(
            config.validate(),
            Err(ConfigError::Negative {
                name: "damping",
                value: -0.5
            })
        );
    }

    #[test]
    fn test_error_messages() {
        let err = ConfigError::ZeroRate { name: "haptic_hz" };
        assert_eq!(err.to_string(), "haptic_hz must be at least 1 Hz");
    }

    #[cfg(feature = "serde")]
    #[test]
    fn test_partial_json_uses_defaults() {
        let config =
            HapticsConfig::from_json_str(r#"{ "effector": { "stiffness": 250.0 } }"#).unwrap();
        assert_eq!(config.effector.stiffness, 250.0);
        assert_eq!(config.effector.damping, 1.0);
        assert_eq!(config.rates, LoopRates::default());
    }

    #[cfg(feature = "serde")]
    #[test]
    fn test_json_validation_failure() {
        let result = HapticsConfig::from_json_str(r#"{ "rates": { "haptic_hz": 0 } }"#);
        let err = result.unwrap_err();
        assert!(err.downcast_ref::<ConfigError>().is_some());
    }

    #[cfg(feature = "serde")]
    #[test]
    fn test_json_roundtrip() {
        let mut config = HapticsConfig::default();
        config.effector.force_enabled = true;
        config.rates.physics_hz = 120;
        let json = config.to_json_string().unwrap();
        assert_eq!(HapticsConfig::from_json_str(&json).unwrap(), config);
    }

    #[cfg(feature = "serde")]
    #[test]
    fn test_load_missing_file() {
        let err = HapticsConfig::load("/nonexistent/haptics.json").unwrap_err();
        assert!(err.to_string().contains("Failed to read haptics config"));
    }
}
