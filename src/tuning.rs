//! Data-driven game balance
//!
//! Every number that shapes a run lives here so a JSON file can override it.
//! Missing fields fall back to the defaults below.

use std::fs;
use std::path::Path;

use serde::{Deserialize, Serialize};
use thiserror::Error;

use crate::sim::SpawnPeriods;

/// Errors raised while loading or validating tuning
#[derive(Debug, Error)]
pub enum TuningError {
    #[error("failed to read tuning file: {0}")]
    Io(#[from] std::io::Error),
    #[error("failed to parse tuning file: {0}")]
    Json(#[from] serde_json::Error),
    #[error("invalid tuning: {0}")]
    Invalid(String),
}

/// Game balance parameters
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct Tuning {
    // === Screen and sprites ===
    pub screen_half_width: f32,
    pub screen_half_height: f32,
    pub player_width: f32,
    pub player_height: f32,
    pub bank_width: f32,
    pub bonus_size: f32,
    pub obstacle_height: f32,
    pub small_obstacle_width: f32,
    pub medium_obstacle_width: f32,
    pub wave_width: f32,
    pub wave_height: f32,
    /// Collision boxes are this much smaller than the sprite in each dimension
    pub collider_erosion: f32,

    // === Scrolling ===
    /// Units per tick
    pub initial_scroll_velocity: f32,
    pub max_scroll_velocity: f32,
    pub scroll_velocity_step: f32,
    /// Extra downward drift of waves per tick, added on top of the scroll velocity
    pub wave_drift: f32,
    /// Horizontal wobble of waves per tick
    pub wave_jitter: f32,
    /// How far below the bottom edge an entity travels before it is reaped
    pub reap_margin: f32,

    // === Spawning ===
    pub wave_period: f32,
    /// Waves dropped each time the wave timer fires
    pub waves_per_spawn: u32,
    pub obstacle_period: f32,
    pub bonus_period: f32,
    pub min_spawn_period: f32,
    pub spawn_period_step: f32,
    /// Quiet time between stopping and restarting the spawn timers on a ramp
    pub settle_delay: f32,

    // === Difficulty ===
    pub ramp_enabled: bool,
    /// Seconds of play between ramps
    pub ramp_window_secs: u32,

    // === Score ===
    pub bonus_points: u64,
    pub pass_through_points: u64,
    pub survival_points_per_sec: u64,

    // === Joystick ===
    pub joystick_base_radius: f32,
    pub joystick_knob_radius: f32,
    /// Base sits this far in from the left screen edge
    pub joystick_inset_x: f32,
    /// Base sits this far up from the bottom screen edge
    pub joystick_inset_y: f32,
    pub joystick_damping: f32,
    pub knob_return_secs: f32,

    // === Audio ===
    pub music_start_delay: f32,
}

impl Default for Tuning {
    fn default() -> Self {
        Self {
            screen_half_width: 375.0,
            screen_half_height: 667.0,
            player_width: 70.0,
            player_height: 90.0,
            bank_width: 60.0,
            bonus_size: 50.0,
            obstacle_height: 60.0,
            small_obstacle_width: 110.0,
            medium_obstacle_width: 300.0,
            wave_width: 80.0,
            wave_height: 10.0,
            collider_erosion: 20.0,

            initial_scroll_velocity: 10.0,
            max_scroll_velocity: 40.0,
            scroll_velocity_step: 1.0,
            wave_drift: 20.0,
            wave_jitter: 5.0,
            reap_margin: 100.0,

            wave_period: 1.0,
            waves_per_spawn: 2,
            obstacle_period: 1.0,
            bonus_period: 3.0,
            min_spawn_period: 1.0,
            spawn_period_step: 0.2,
            settle_delay: 0.5,

            ramp_enabled: true,
            ramp_window_secs: 20,

            bonus_points: 30,
            pass_through_points: 1,
            survival_points_per_sec: 5,

            joystick_base_radius: 90.0,
            joystick_knob_radius: 50.0,
            joystick_inset_x: 160.0,
            joystick_inset_y: 240.0,
            joystick_damping: 5.0,
            knob_return_secs: 0.1,

            music_start_delay: 1.0,
        }
    }
}

impl Tuning {
    /// Load tuning from a JSON file and validate it
    pub fn load(path: impl AsRef<Path>) -> Result<Self, TuningError> {
        let json = fs::read_to_string(path.as_ref())?;
        let tuning: Tuning = serde_json::from_str(&json)?;
        tuning.validate()?;
        log::info!("Loaded tuning from {}", path.as_ref().display());
        Ok(tuning)
    }

    /// Initial spawn periods
    pub fn spawn_periods(&self) -> SpawnPeriods {
        SpawnPeriods {
            wave: self.wave_period,
            obstacle: self.obstacle_period,
            bonus: self.bonus_period,
        }
    }

    /// Reject values the engine cannot run with.
    ///
    /// Geometry is checked separately when the playfield is built.
    pub fn validate(&self) -> Result<(), TuningError> {
        let positive = [
            ("wave_period", self.wave_period),
            ("obstacle_period", self.obstacle_period),
            ("bonus_period", self.bonus_period),
            ("min_spawn_period", self.min_spawn_period),
            ("joystick_base_radius", self.joystick_base_radius),
            ("joystick_knob_radius", self.joystick_knob_radius),
            ("joystick_damping", self.joystick_damping),
            ("bonus_size", self.bonus_size),
            ("obstacle_height", self.obstacle_height),
            ("small_obstacle_width", self.small_obstacle_width),
            ("medium_obstacle_width", self.medium_obstacle_width),
        ];
        for (name, value) in positive {
            if !(value.is_finite() && value > 0.0) {
                return Err(TuningError::Invalid(format!("{name} must be positive, got {value}")));
            }
        }

        let non_negative = [
            ("initial_scroll_velocity", self.initial_scroll_velocity),
            ("scroll_velocity_step", self.scroll_velocity_step),
            ("spawn_period_step", self.spawn_period_step),
            ("settle_delay", self.settle_delay),
            ("collider_erosion", self.collider_erosion),
            ("reap_margin", self.reap_margin),
            ("knob_return_secs", self.knob_return_secs),
            ("music_start_delay", self.music_start_delay),
        ];
        for (name, value) in non_negative {
            if !(value.is_finite() && value >= 0.0) {
                return Err(TuningError::Invalid(format!("{name} must not be negative, got {value}")));
            }
        }

        let periods = [
            ("wave_period", self.wave_period),
            ("obstacle_period", self.obstacle_period),
            ("bonus_period", self.bonus_period),
        ];
        for (name, value) in periods {
            if value < self.min_spawn_period {
                return Err(TuningError::Invalid(format!(
                    "{name} {value} is below min_spawn_period {}",
                    self.min_spawn_period
                )));
            }
        }

        if self.max_scroll_velocity < self.initial_scroll_velocity {
            return Err(TuningError::Invalid(format!(
                "max_scroll_velocity {} is below initial_scroll_velocity {}",
                self.max_scroll_velocity, self.initial_scroll_velocity
            )));
        }
        if self.ramp_enabled && self.ramp_window_secs == 0 {
            return Err(TuningError::Invalid("ramp_window_secs must be at least 1".into()));
        }
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_defaults_are_valid() {
        assert!(Tuning::default().validate().is_ok());
    }

    #[test]
    fn test_partial_json_uses_defaults() {
        let tuning: Tuning = serde_json::from_str(r#"{ "bonus_points": 50 }"#).unwrap();
        assert_eq!(tuning.bonus_points, 50);
        assert_eq!(tuning.obstacle_period, 1.0);
        assert_eq!(tuning.ramp_window_secs, 20);
    }

    #[test]
    fn test_rejects_zero_damping() {
        let tuning = Tuning {
            joystick_damping: 0.0,
            ..Default::default()
        };
        assert!(matches!(tuning.validate(), Err(TuningError::Invalid(_))));
    }

    #[test]
    fn test_rejects_cap_below_start() {
        let tuning = Tuning {
            initial_scroll_velocity: 50.0,
            ..Default::default()
        };
        assert!(tuning.validate().is_err());
    }

    #[test]
    fn test_rejects_period_below_floor() {
        let fast_trees = Tuning {
            obstacle_period: 0.2,
            ..Default::default()
        };
        assert!(matches!(fast_trees.validate(), Err(TuningError::Invalid(_))));
        let fast_waves = Tuning {
            wave_period: 0.5,
            ..Default::default()
        };
        assert!(fast_waves.validate().is_err());
    }

    #[test]
    fn test_load_missing_file() {
        let err = Tuning::load("/definitely/not/here.json").unwrap_err();
        assert!(matches!(err, TuningError::Io(_)));
    }
}
