//! Session state and core simulation types

use glam::Vec2;
use rand::SeedableRng;
use rand_pcg::Pcg32;
use serde::{Deserialize, Serialize};

use super::entity::Aabb;
use super::scheduler::SpawnPeriods;

/// Current phase of a session
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum GamePhase {
    /// Active gameplay
    Playing,
    /// Frozen; ticks, clock and contacts are ignored
    Paused,
    /// Run ended (terminal)
    GameOver,
}

/// Discrete things that happened, drained by the host each frame
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub enum GameEvent {
    /// A bonus was eaten
    Pickup { points: u64 },
    /// The player hit a tree
    Damage,
    BackgroundMusicStart,
    BackgroundMusicStop,
    /// Difficulty went up
    Ramp { level: u32, scroll_velocity: f32 },
    /// Run over; emitted exactly once
    GameOver { score: u64, high_score: u64, new_record: bool },
}

/// The whale
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct PlayerState {
    pub pos: Vec2,
    /// Units per tick
    pub vel: Vec2,
    pub size: Vec2,
}

impl PlayerState {
    pub fn new(pos: Vec2, size: Vec2) -> Self {
        Self {
            pos,
            vel: Vec2::ZERO,
            size,
        }
    }

    pub fn collider(&self) -> Aabb {
        Aabb::from_size(self.pos, self.size)
    }
}

/// Score, counters and difficulty of a run
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct SessionState {
    pub score: u64,
    /// Whole seconds since the last ramp
    pub elapsed_ticks: u32,
    /// Whole seconds since the run started
    pub total_secs: u32,
    /// Simulation ticks since the run started
    pub tick_count: u64,
    /// Units per tick
    pub scroll_velocity: f32,
    pub spawn_periods: SpawnPeriods,
    pub phase: GamePhase,
    /// Seconds of play on the session clock
    pub clock: f32,
    pub music_started: bool,
}

impl SessionState {
    pub fn new(scroll_velocity: f32, spawn_periods: SpawnPeriods) -> Self {
        Self {
            score: 0,
            elapsed_ticks: 0,
            total_secs: 0,
            tick_count: 0,
            scroll_velocity,
            spawn_periods,
            phase: GamePhase::Playing,
            clock: 0.0,
            music_started: false,
        }
    }

    pub fn is_over(&self) -> bool {
        self.phase == GamePhase::GameOver
    }

    /// True when tick, clock and contact handlers should do work
    pub fn is_live(&self) -> bool {
        self.phase == GamePhase::Playing
    }
}

/// RNG wrapper so the seed travels with the session
#[derive(Debug, Clone)]
pub struct GameRng {
    pub seed: u64,
    pub rng: Pcg32,
}

impl GameRng {
    pub fn new(seed: u64) -> Self {
        Self {
            seed,
            rng: Pcg32::seed_from_u64(seed),
        }
    }
}
