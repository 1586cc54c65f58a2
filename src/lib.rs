//! Whale Lake - a vertically scrolling lake survival game
//!
//! Core modules:
//! - `sim`: Deterministic simulation (spawning, scrolling, joystick, contacts, difficulty)
//! - `host`: Runtime drivers, overlap detection and event routing around a session
//! - `tuning`: Data-driven game balance
//! - `settings`: Persisted audio preferences
//! - `highscores`: Persisted best score
//! - `persistence`: JSON file helpers shared by the stores
//! - `audio`: Cue routing for the audio collaborator

pub mod audio;
pub mod highscores;
pub mod host;
pub mod persistence;
pub mod settings;
pub mod sim;
pub mod tuning;

pub use highscores::{HighScoreStore, JsonHighScoreFile, MemoryHighScore};
pub use settings::Settings;
pub use tuning::Tuning;

use glam::Vec2;

/// Engine constants that are not part of game balance
pub mod consts {
    use std::time::Duration;

    /// Simulation ticks per second
    pub const TICKS_PER_SECOND: u32 = 60;
    /// Fixed simulation timestep in seconds
    pub const SIM_DT: f32 = 1.0 / TICKS_PER_SECOND as f32;
    /// Maximum ticks the realtime driver catches up in one wake-up
    pub const MAX_SUBSTEPS: u32 = 8;
    /// Wake-up granularity of the realtime timer clock
    pub const TIMER_RESOLUTION: Duration = Duration::from_millis(5);
}

/// Angle of `v` measured from the +X axis, in radians (-π, π]
#[inline]
pub fn angle_of(v: Vec2) -> f32 {
    v.y.atan2(v.x)
}
