//! Engine tunables, loadable from TOML.

use crate::error::EngineError;
use crate::lfsr::LFSR_PERIOD;
use serde::Deserialize;

#[derive(Debug, Clone, Deserialize)]
#[serde(default, deny_unknown_fields)]
pub struct EngineConfig {
    /// Logical display width in pixels.
    pub display_width: u32,
    /// Logical display height in pixels.
    pub display_height: u32,
    /// First row of the depth strata; rows above it are furthest back.
    pub horizon_row: u32,
    /// LFSR steps per dissolve tick.
    pub reveal_rate: u32,
    /// Actor speed in pixels per tick.
    pub walk_speed: f32,
    /// Distance at which a walk target counts as reached.
    pub arrive_radius: f32,
    /// Lifetime of a timed message, in ticks.
    pub message_ticks: u64,
    /// Ticks between footstep sounds while walking.
    pub footstep_interval: u64,
}

impl Default for EngineConfig {
    fn default() -> EngineConfig {
        EngineConfig {
            display_width: 640,
            display_height: 400,
            horizon_row: 96,
            reveal_rate: 3200,
            walk_speed: 3.0,
            arrive_radius: 2.0,
            message_ticks: 240,
            footstep_interval: 12,
        }
    }
}

impl EngineConfig {
    /// Parse and validate a TOML document. Absent keys keep their defaults.
    pub fn from_toml_str(text: &str) -> Result<EngineConfig, EngineError> {
        let config: EngineConfig =
            toml::from_str(text).map_err(|e| EngineError::Config(e.to_string()))?;
        config.validate()?;
        Ok(config)
    }

    pub fn validate(&self) -> Result<(), EngineError> {
        if self.display_width == 0 || self.display_height == 0 {
            return Err(EngineError::Config(
                "display dimensions must be non-zero".to_string(),
            ));
        }
        let pixels = self.display_width as u64 * self.display_height as u64;
        if pixels > LFSR_PERIOD as u64 {
            return Err(EngineError::Config(format!(
                "frame of {} pixels exceeds the dissolve register period {}",
                pixels, LFSR_PERIOD
            )));
        }
        if self.horizon_row >= self.display_height {
            return Err(EngineError::Config(format!(
                "horizon row {} outside display height {}",
                self.horizon_row, self.display_height
            )));
        }
        if self.reveal_rate == 0 {
            return Err(EngineError::Config("reveal rate must be non-zero".to_string()));
        }
        if self.walk_speed <= 0.0 {
            return Err(EngineError::Config("walk speed must be positive".to_string()));
        }
        if self.footstep_interval == 0 || self.message_ticks == 0 {
            return Err(EngineError::Config(
                "tick intervals must be non-zero".to_string(),
            ));
        }
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn defaults_validate() {
        assert!(EngineConfig::default().validate().is_ok());
    }

    #[test]
    fn toml_overrides_selected_keys() {
        let config = EngineConfig::from_toml_str(
            "display_width = 320\ndisplay_height = 200\nhorizon_row = 48\n",
        )
        .unwrap();
        assert_eq!(config.display_width, 320);
        assert_eq!(config.display_height, 200);
        assert_eq!(config.horizon_row, 48);
        // Untouched keys keep their defaults.
        assert_eq!(config.reveal_rate, 3200);
    }

    #[test]
    fn horizon_outside_display_is_rejected() {
        let result = EngineConfig::from_toml_str("horizon_row = 400\n");
        assert!(result.is_err());
    }

    #[test]
    fn oversized_frame_is_rejected() {
        let result =
            EngineConfig::from_toml_str("display_width = 2048\ndisplay_height = 2048\n");
        assert!(result.is_err());
    }

    #[test]
    fn unknown_keys_are_rejected() {
        let result = EngineConfig::from_toml_str("reveal_speed = 5\n");
        assert!(result.is_err());
    }
}
