//! Tunables for a tart session, loadable from TOML.
//!
//! Every field has a default, so a config file only needs the values it
//! changes:
//!
//! ```toml
//! speed = 12.0
//! roster = ["Cherry", "Kiwi", "Mango"]
//! ```

use std::path::Path;

use serde::{Deserialize, Serialize};

use crate::error::TartError;
use crate::fruit::FruitKind;

#[derive(Debug, Clone, Deserialize, Serialize, PartialEq)]
#[serde(default)]
pub struct TartConfig {
    /// Flight speed of a thrown fruit, in world units per second.
    pub speed: f32,
    /// A fruit closer than this to its destination has landed.
    pub collision_threshold: f32,
    /// Angle applied by one rotate command.
    pub rotation_step_degrees: f32,
    /// Idle fruits are parked this far below the tart base.
    pub hidden_depth_offset: f32,
    /// Scene name of the tart base; its z is the landing plane.
    pub tart_base_name: String,
    /// Scene name of the tart rim.
    pub tart_rim_name: String,
    /// Fruits in play, in cycling order.
    pub roster: Vec<FruitKind>,
}

impl Default for TartConfig {
    fn default() -> Self {
        Self {
            speed: 10.0,
            collision_threshold: 1.5,
            rotation_step_degrees: 5.0,
            hidden_depth_offset: 10.0,
            tart_base_name: "TartBase".into(),
            tart_rim_name: "TartShell".into(),
            roster: FruitKind::CLASSIC.to_vec(),
        }
    }
}

impl TartConfig {
    /// Config using the given roster and default tunables.
    pub fn with_roster(roster: impl Into<Vec<FruitKind>>) -> Self {
        Self {
            roster: roster.into(),
            ..Self::default()
        }
    }

    pub fn from_toml_str(text: &str) -> Result<Self, TartError> {
        let config: Self = toml::from_str(text)?;
        config.validate()?;
        Ok(config)
    }

    pub fn load(path: impl AsRef<Path>) -> Result<Self, TartError> {
        let path = path.as_ref();
        let text = std::fs::read_to_string(path).map_err(|source| TartError::ConfigIo {
            path: path.display().to_string(),
            source,
        })?;
        Self::from_toml_str(&text)
    }

    /// Checks the values a session relies on.
    pub fn validate(&self) -> Result<(), TartError> {
        if !(self.speed.is_finite() && self.speed > 0.0) {
            return Err(TartError::InvalidConfig(format!(
                "speed must be positive, got {}",
                self.speed
            )));
        }
        if !(self.collision_threshold.is_finite() && self.collision_threshold > 0.0) {
            return Err(TartError::InvalidConfig(format!(
                "collision_threshold must be positive, got {}",
                self.collision_threshold
            )));
        }
        if !self.rotation_step_degrees.is_finite() {
            return Err(TartError::InvalidConfig(
                "rotation_step_degrees must be finite".into(),
            ));
        }
        if !self.hidden_depth_offset.is_finite() {
            return Err(TartError::InvalidConfig(
                "hidden_depth_offset must be finite".into(),
            ));
        }
        if self.roster.is_empty() {
            return Err(TartError::EmptyRoster);
        }
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn empty_file_gives_defaults() {
        let config = TartConfig::from_toml_str("").unwrap();
        assert_eq!(config, TartConfig::default());
        assert_eq!(config.roster, FruitKind::CLASSIC.to_vec());
    }

    #[test]
    fn partial_file_overrides_fields() {
        let config = TartConfig::from_toml_str(
            r#"
            speed = 12.5
            roster = ["Mango", "Grape"]
            "#,
        )
        .unwrap();
        assert_eq!(config.speed, 12.5);
        assert_eq!(config.roster, vec![FruitKind::Mango, FruitKind::Grape]);
        assert_eq!(config.collision_threshold, 1.5);
    }

    #[test]
    fn rejects_bad_values() {
        assert!(matches!(
            TartConfig::from_toml_str("speed = 0.0"),
            Err(TartError::InvalidConfig(_))
        ));
        assert!(matches!(
            TartConfig::from_toml_str("collision_threshold = -1.0"),
            Err(TartError::InvalidConfig(_))
        ));
        assert!(matches!(
            TartConfig::from_toml_str("roster = []"),
            Err(TartError::EmptyRoster)
        ));
        assert!(matches!(
            TartConfig::from_toml_str(r#"roster = ["Durian"]"#),
            Err(TartError::ConfigParse(_))
        ));
    }
}
