//! Simulation configuration
//!
//! Fixed at construction. Loadable from JSON; missing fields take defaults.

use std::path::Path;

use serde::{Deserialize, Serialize};

use crate::consts::*;
use crate::error::{Error, Result};

/// Parameters for building a [`Simulation`](crate::sim::Simulation)
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct SimConfig {
    /// Arena width in arena units
    pub arena_width: f64,
    /// Arena height in arena units
    pub arena_height: f64,
    /// Number of balls in the initial batch
    pub ball_count: usize,
    /// Radius shared by every generated ball
    pub ball_radius: f64,
    /// Gap required between ball edges in the initial layout
    pub min_separation: f64,
    /// Rejection-sampling attempts per ball
    pub max_placement_attempts: u32,
    /// Layout RNG seed; `None` picks one at random
    pub seed: Option<u64>,
}

impl Default for SimConfig {
    fn default() -> Self {
        Self {
            arena_width: ARENA_WIDTH,
            arena_height: ARENA_HEIGHT,
            ball_count: BALL_COUNT,
            ball_radius: BALL_RADIUS,
            min_separation: MIN_SEPARATION,
            max_placement_attempts: MAX_PLACEMENT_ATTEMPTS,
            seed: None,
        }
    }
}

impl SimConfig {
    /// Same as default but with a fixed seed
    pub fn seeded(seed: u64) -> Self {
        Self {
            seed: Some(seed),
            ..Self::default()
        }
    }

    /// Check every value; the first problem found is reported.
    pub fn validate(&self) -> Result<()> {
        if !self.arena_width.is_finite() || self.arena_width <= 0.0 {
            return Err(Error::InvalidConfig(format!(
                "arena_width must be finite and > 0 (got {})",
                self.arena_width
            )));
        }
        if !self.arena_height.is_finite() || self.arena_height <= 0.0 {
            return Err(Error::InvalidConfig(format!(
                "arena_height must be finite and > 0 (got {})",
                self.arena_height
            )));
        }
        if !self.ball_radius.is_finite() || self.ball_radius <= 0.0 {
            return Err(Error::InvalidConfig(format!(
                "ball_radius must be finite and > 0 (got {})",
                self.ball_radius
            )));
        }
        let diameter = 2.0 * self.ball_radius;
        if self.arena_width < diameter || self.arena_height < diameter {
            return Err(Error::InvalidConfig(format!(
                "arena {}x{} cannot hold a ball of radius {}",
                self.arena_width, self.arena_height, self.ball_radius
            )));
        }
        if !self.min_separation.is_finite() || self.min_separation < 0.0 {
            return Err(Error::InvalidConfig(format!(
                "min_separation must be finite and >= 0 (got {})",
                self.min_separation
            )));
        }
        if self.max_placement_attempts == 0 {
            return Err(Error::InvalidConfig(
                "max_placement_attempts must be > 0".into(),
            ));
        }
        Ok(())
    }

    /// Parse from JSON and validate
    pub fn from_json(json: &str) -> Result<Self> {
        let config: Self = serde_json::from_str(json)?;
        config.validate()?;
        Ok(config)
    }

    /// Pretty-printed JSON
    pub fn to_json(&self) -> Result<String> {
        Ok(serde_json::to_string_pretty(self)?)
    }

    /// Load and validate a JSON config file
    pub fn load(path: impl AsRef<Path>) -> Result<Self> {
        let path = path.as_ref();
        let json = std::fs::read_to_string(path)?;
        let config = Self::from_json(&json)?;
        log::info!("Loaded config from {}", path.display());
        Ok(config)
    }

    /// Write as pretty JSON
    pub fn save(&self, path: impl AsRef<Path>) -> Result<()> {
        std::fs::write(path, self.to_json()?)?;
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_default_is_valid() {
        let config = SimConfig::default();
        assert!(config.validate().is_ok());
        assert_eq!(config.arena_width, 800.0);
        assert_eq!(config.arena_height, 600.0);
        assert_eq!(config.ball_count, 25);
    }

    #[test]
    fn test_rejects_bad_radius() {
        for radius in [0.0, -1.0, f64::NAN, f64::INFINITY] {
            let config = SimConfig {
                ball_radius: radius,
                ..SimConfig::default()
            };
            assert!(matches!(config.validate(), Err(Error::InvalidConfig(_))));
        }
    }

    #[test]
    fn test_rejects_degenerate_arena() {
        let config = SimConfig {
            arena_width: 0.0,
            ..SimConfig::default()
        };
        assert!(config.validate().is_err());

        // Narrower than one ball
        let config = SimConfig {
            arena_width: 30.0,
            ..SimConfig::default()
        };
        assert!(config.validate().is_err());
    }

    #[test]
    fn test_rejects_negative_separation() {
        let config = SimConfig {
            min_separation: -5.0,
            ..SimConfig::default()
        };
        assert!(config.validate().is_err());
    }

    #[test]
    fn test_partial_json_uses_defaults() {
        let config = SimConfig::from_json(r#"{ "ball_count": 4, "seed": 7 }"#).unwrap();
        assert_eq!(config.ball_count, 4);
        assert_eq!(config.seed, Some(7));
        assert_eq!(config.ball_radius, BALL_RADIUS);
    }

    #[test]
    fn test_json_validation_applies() {
        let result = SimConfig::from_json(r#"{ "ball_radius": -3.0 }"#);
        assert!(matches!(result, Err(Error::InvalidConfig(_))));

        let result = SimConfig::from_json("not json");
        assert!(matches!(result, Err(Error::Json(_))));
    }

    #[test]
    fn test_save_and_load() {
        let path = std::env::temp_dir().join(format!("billiards-config-{}.json", std::process::id()));
        let config = SimConfig {
            ball_count: 9,
            ..SimConfig::seeded(42)
        };
        config.save(&path).unwrap();
        let loaded = SimConfig::load(&path).unwrap();
        let _ = std::fs::remove_file(&path);
        assert_eq!(loaded, config);
    }
}
