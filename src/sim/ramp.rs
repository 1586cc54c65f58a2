//! Difficulty ramp
//!
//! Every `window_secs` seconds of play the current speeds up by one step and
//! the spawn timers tighten, each bounded by its own cap.

use serde::{Deserialize, Serialize};

use super::scheduler::SpawnPeriods;
use crate::tuning::Tuning;

/// Caps and step sizes of the ramp
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct RampLimits {
    pub velocity_step: f32,
    pub max_velocity: f32,
    pub period_step: f32,
    pub min_period: f32,
}

impl From<&Tuning> for RampLimits {
    fn from(t: &Tuning) -> Self {
        Self {
            velocity_step: t.scroll_velocity_step,
            max_velocity: t.max_scroll_velocity,
            period_step: t.spawn_period_step,
            min_period: t.min_spawn_period,
        }
    }
}

impl RampLimits {
    /// Next scroll velocity; never decreases, never passes the cap
    pub fn next_velocity(&self, velocity: f32) -> f32 {
        if velocity >= self.max_velocity {
            velocity
        } else {
            (velocity + self.velocity_step).min(self.max_velocity)
        }
    }

    /// Next spawn period; never increases, never drops below the floor
    pub fn next_period(&self, period: f32) -> f32 {
        if period <= self.min_period {
            period
        } else {
            (period - self.period_step).max(self.min_period)
        }
    }

    pub fn next_periods(&self, periods: SpawnPeriods) -> SpawnPeriods {
        SpawnPeriods {
            wave: self.next_period(periods.wave),
            obstacle: self.next_period(periods.obstacle),
            bonus: self.next_period(periods.bonus),
        }
    }
}

/// Counts whole seconds of play and says when a ramp is due
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct DifficultyRamp {
    pub enabled: bool,
    pub window_secs: u32,
    /// Seconds since the last ramp
    pub elapsed_secs: u32,
    /// Ramps applied so far
    pub level: u32,
}

impl DifficultyRamp {
    pub fn new(enabled: bool, window_secs: u32) -> Self {
        Self {
            enabled,
            window_secs,
            elapsed_secs: 0,
            level: 0,
        }
    }

    /// Count one second; returns true when a ramp fires (and resets the counter)
    pub fn on_second(&mut self) -> bool {
        self.elapsed_secs += 1;
        if !self.enabled || self.window_secs == 0 || self.elapsed_secs < self.window_secs {
            return false;
        }
        self.elapsed_secs = 0;
        self.level += 1;
        true
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn limits() -> RampLimits {
        RampLimits::from(&Tuning::default())
    }

    #[test]
    fn test_fires_every_window() {
        let mut ramp = DifficultyRamp::new(true, 20);
        let fired: Vec<u32> = (1..=60).filter(|_| ramp.on_second()).collect();
        assert_eq!(fired.len(), 3);
        assert_eq!(ramp.level, 3);
        assert_eq!(ramp.elapsed_secs, 0);
    }

    #[test]
    fn test_disabled_never_fires() {
        let mut ramp = DifficultyRamp::new(false, 20);
        assert!(!(0..100).any(|_| ramp.on_second()));
        assert_eq!(ramp.level, 0);
    }

    #[test]
    fn test_velocity_caps_at_forty() {
        let l = limits();
        let mut v = 10.0;
        for _ in 0..100 {
            v = l.next_velocity(v);
        }
        assert_eq!(v, 40.0);
        assert_eq!(l.next_velocity(39.5), 40.0);
    }

    #[test]
    fn test_periods_floor() {
        let l = limits();
        let mut p = SpawnPeriods {
            wave: 1.5,
            obstacle: 1.0,
            bonus: 3.0,
        };
        p = l.next_periods(p);
        assert!((p.wave - 1.3).abs() < 1e-6);
        assert_eq!(p.obstacle, 1.0);
        assert!((p.bonus - 2.8).abs() < 1e-6);
        for _ in 0..50 {
            p = l.next_periods(p);
        }
        assert_eq!(p.bonus, 1.0);
        assert_eq!(p.wave, 1.0);
    }
}
