//! A single run of the game
//!
//! `GameSession` owns every piece of mutable state and exposes the handful
//! of entry points the host drives:
//! - `tick`: one fixed simulation step (scroll, reap, player motion)
//! - `advance_clock`: elapsed time for spawn timers, the one-second clock and the ramp
//! - `handle_pointer`: joystick input
//! - `handle_contact`: overlaps reported by the host's contact detection
//!
//! None of these block, and all of them no-op once the run is over.

use glam::Vec2;
use serde::Serialize;
use thiserror::Error;

use super::collision::{self, Contact, ContactOutcome};
use super::entity::{Entity, EntityId, EntityKind, Side};
use super::geometry::{GeometryError, PlayfieldBounds, PlayfieldInput};
use super::joystick::{Joystick, PointerEvent};
use super::placer::{EntitySpawn, ObstaclePlacer};
use super::ramp::{DifficultyRamp, RampLimits};
use super::scheduler::{SpawnScheduler, SpawnTimer};
use super::scroll::{self, ScrollParams};
use super::state::{GameEvent, GamePhase, GameRng, PlayerState, SessionState};
use crate::consts::SIM_DT;
use crate::highscores::HighScoreStore;
use crate::tuning::{Tuning, TuningError};

/// Why a session could not be created
#[derive(Debug, Error)]
pub enum SessionError {
    #[error(transparent)]
    Geometry(#[from] GeometryError),
    #[error(transparent)]
    Tuning(#[from] TuningError),
}

/// Everything the renderer needs to draw a frame
#[derive(Debug, Clone, Serialize)]
pub struct SceneSnapshot {
    pub phase: GamePhase,
    pub score: u64,
    pub high_score: u64,
    pub level: u32,
    pub scroll_velocity: f32,
    pub bounds: PlayfieldBounds,
    pub player: PlayerState,
    pub joystick: Joystick,
    pub banks: Vec<Entity>,
    pub entities: Vec<Entity>,
}

pub struct GameSession {
    tuning: Tuning,
    bounds: PlayfieldBounds,
    limits: RampLimits,
    state: SessionState,
    player: PlayerState,
    joystick: Joystick,
    /// Spawned bodies, in spawn order
    entities: Vec<Entity>,
    banks: [Entity; 2],
    scheduler: SpawnScheduler,
    ramp: DifficultyRamp,
    rng: GameRng,
    high_scores: Box<dyn HighScoreStore>,
    events: Vec<GameEvent>,
    next_id: u32,
    /// Fraction of a second not yet counted by the one-second clock
    second_accumulator: f32,
    torn_down: bool,
}

impl GameSession {
    /// Start a run: validate tuning, lay out the lake, start the spawn timers
    pub fn new(
        tuning: Tuning,
        seed: u64,
        high_scores: Box<dyn HighScoreStore>,
    ) -> Result<Self, SessionError> {
        tuning.validate()?;
        let bounds = PlayfieldBounds::new(PlayfieldInput::from(&tuning))?;

        let bank_size = Vec2::new(tuning.bank_width, 2.0 * tuning.screen_half_height);
        let bank_offset = tuning.bank_width / 2.0;
        let banks = [
            Entity {
                id: EntityId(1),
                kind: EntityKind::SideBank(Side::Left),
                pos: Vec2::new(bounds.min_x - bank_offset, 0.0),
                size: bank_size,
                collider: Some(bank_size),
                created_at: 0.0,
            },
            Entity {
                id: EntityId(2),
                kind: EntityKind::SideBank(Side::Right),
                pos: Vec2::new(bounds.max_x + bank_offset, 0.0),
                size: bank_size,
                collider: Some(bank_size),
                created_at: 0.0,
            },
        ];

        let player = PlayerState::new(
            bounds.clamp_player(Vec2::new(0.0, bounds.min_y / 2.0)),
            Vec2::new(tuning.player_width, tuning.player_height),
        );

        let periods = tuning.spawn_periods();
        let mut scheduler = SpawnScheduler::new(periods, tuning.settle_delay);
        scheduler.start(periods);

        log::info!(
            "Session started (seed {seed}): lake x {:.0}..{:.0}, player x {:.0}..{:.0}",
            bounds.min_x,
            bounds.max_x,
            bounds.border_left,
            bounds.border_right
        );

        Ok(Self {
            limits: RampLimits::from(&tuning),
            state: SessionState::new(tuning.initial_scroll_velocity, periods),
            joystick: Joystick::from_tuning(&tuning),
            ramp: DifficultyRamp::new(tuning.ramp_enabled, tuning.ramp_window_secs),
            rng: GameRng::new(seed),
            tuning,
            bounds,
            player,
            entities: Vec::new(),
            banks,
            scheduler,
            high_scores,
            events: Vec::new(),
            next_id: 3,
            second_accumulator: 0.0,
            torn_down: false,
        })
    }

    // === Accessors ===

    pub fn tuning(&self) -> &Tuning {
        &self.tuning
    }

    pub fn bounds(&self) -> &PlayfieldBounds {
        &self.bounds
    }

    pub fn state(&self) -> &SessionState {
        &self.state
    }

    pub fn player(&self) -> &PlayerState {
        &self.player
    }

    pub fn joystick(&self) -> &Joystick {
        &self.joystick
    }

    pub fn entities(&self) -> &[Entity] {
        &self.entities
    }

    pub fn entity(&self, id: EntityId) -> Option<&Entity> {
        self.entities.iter().find(|e| e.id == id)
    }

    pub fn banks(&self) -> &[Entity] {
        &self.banks
    }

    pub fn scheduler(&self) -> &SpawnScheduler {
        &self.scheduler
    }

    pub fn ramp(&self) -> &DifficultyRamp {
        &self.ramp
    }

    pub fn seed(&self) -> u64 {
        self.rng.seed
    }

    pub fn score(&self) -> u64 {
        self.state.score
    }

    pub fn high_score(&self) -> u64 {
        self.high_scores.high_score()
    }

    pub fn is_over(&self) -> bool {
        self.state.is_over()
    }

    pub fn is_torn_down(&self) -> bool {
        self.torn_down
    }

    fn is_live(&self) -> bool {
        self.state.is_live() && !self.torn_down
    }

    /// Take all events emitted since the last drain
    pub fn drain_events(&mut self) -> Vec<GameEvent> {
        std::mem::take(&mut self.events)
    }

    pub fn snapshot(&self) -> SceneSnapshot {
        SceneSnapshot {
            phase: self.state.phase,
            score: self.state.score,
            high_score: self.high_score(),
            level: self.ramp.level,
            scroll_velocity: self.state.scroll_velocity,
            bounds: self.bounds,
            player: self.player.clone(),
            joystick: self.joystick.clone(),
            banks: self.banks.to_vec(),
            entities: self.entities.clone(),
        }
    }

    // === Simulation ===

    /// One fixed simulation step
    pub fn tick(&mut self) {
        if !self.is_live() {
            return;
        }
        self.state.tick_count += 1;

        self.joystick.update(SIM_DT);
        self.player.vel = self.joystick.velocity;
        self.player.pos = self.bounds.clamp_player(self.player.pos + self.player.vel);

        let params = ScrollParams {
            velocity: self.state.scroll_velocity,
            wave_drift: self.tuning.wave_drift,
            wave_jitter: self.tuning.wave_jitter,
        };
        scroll::advance(&mut self.entities, &params, &mut self.rng.rng);

        let passed = scroll::reap(&mut self.entities, &self.bounds, self.tuning.reap_margin);
        if passed > 0 {
            self.state.score += u64::from(passed) * self.tuning.pass_through_points;
        }
    }

    /// Advance the session clock by `dt` seconds: music cue, one-second
    /// clock (survival score, ramp) and spawn timers
    pub fn advance_clock(&mut self, dt: f32) {
        if !self.is_live() || dt <= 0.0 {
            return;
        }
        self.state.clock += dt;

        if !self.state.music_started && self.state.clock >= self.tuning.music_start_delay {
            self.state.music_started = true;
            self.events.push(GameEvent::BackgroundMusicStart);
        }

        self.second_accumulator += dt;
        while self.second_accumulator >= 1.0 {
            self.second_accumulator -= 1.0;
            self.on_second();
        }

        for timer in self.scheduler.advance(dt) {
            self.spawn(timer);
        }
    }

    /// Fixed step used by single-threaded drivers: clock first, then tick
    pub fn step(&mut self) {
        self.advance_clock(SIM_DT);
        self.tick();
    }

    fn on_second(&mut self) {
        self.state.total_secs += 1;
        self.state.score += self.tuning.survival_points_per_sec;
        if self.ramp.on_second() {
            self.apply_ramp();
        }
        self.state.elapsed_ticks = self.ramp.elapsed_secs;
    }

    fn apply_ramp(&mut self) {
        self.state.scroll_velocity = self.limits.next_velocity(self.state.scroll_velocity);
        self.state.spawn_periods = self.limits.next_periods(self.state.spawn_periods);
        self.scheduler.reconfigure(self.state.spawn_periods);

        log::info!(
            "Difficulty ramp {}: scroll {:.1}, periods {:?}",
            self.ramp.level,
            self.state.scroll_velocity,
            self.state.spawn_periods
        );
        self.events.push(GameEvent::Ramp {
            level: self.ramp.level,
            scroll_velocity: self.state.scroll_velocity,
        });
    }

    fn spawn(&mut self, timer: SpawnTimer) {
        let placer = ObstaclePlacer::new(&self.bounds, &self.tuning);
        let rng = &mut self.rng.rng;
        let spawns = match timer {
            SpawnTimer::Wave => (0..self.tuning.waves_per_spawn)
                .map(|_| placer.spawn_wave(rng))
                .collect(),
            SpawnTimer::Obstacle => placer.spawn_obstacle(rng),
            SpawnTimer::Bonus => vec![placer.spawn_bonus(rng)],
        };
        for spawn in spawns {
            self.insert(spawn);
        }
    }

    /// Put a body into the lake directly, bypassing the spawn timers
    pub fn insert(&mut self, spawn: EntitySpawn) -> EntityId {
        let id = EntityId(self.next_id);
        self.next_id += 1;
        log::trace!("Spawned {:?} {:?} at {:?}", id, spawn.kind, spawn.pos);
        self.entities.push(Entity {
            id,
            kind: spawn.kind,
            pos: spawn.pos,
            size: spawn.size,
            collider: spawn.collider,
            created_at: self.state.clock,
        });
        id
    }

    fn remove(&mut self, id: EntityId) -> Option<Entity> {
        let index = self.entities.iter().position(|e| e.id == id)?;
        Some(self.entities.remove(index))
    }

    // === Input ===

    pub fn handle_pointer(&mut self, event: PointerEvent) {
        if self.state.is_over() || self.torn_down {
            return;
        }
        self.joystick.handle(event);
        self.player.vel = self.joystick.velocity;
    }

    /// Resolve a contact reported by the host
    pub fn handle_contact(&mut self, contact: Contact) -> ContactOutcome {
        if !self.is_live() {
            return ContactOutcome::Ignored;
        }

        let outcome = collision::classify(&contact, |id| self.entities.iter().any(|e| e.id == id));
        match outcome {
            ContactOutcome::Ignored | ContactOutcome::Bank => {}
            ContactOutcome::Pickup { id } => {
                self.remove(id);
                let points = self.tuning.bonus_points;
                self.state.score += points;
                log::debug!("Bonus {:?} eaten, score {}", id, self.state.score);
                self.events.push(GameEvent::Pickup { points });
            }
            ContactOutcome::Crash { id } => {
                self.remove(id);
                self.finish();
            }
        }
        outcome
    }

    fn finish(&mut self) {
        let score = self.state.score;
        let previous = self.high_scores.high_score();
        let new_record = score > previous;
        if new_record {
            self.high_scores.set_high_score(score);
        }
        let high_score = previous.max(score);

        self.state.phase = GamePhase::GameOver;
        self.scheduler.stop_all();

        self.events.push(GameEvent::Damage);
        if self.state.music_started {
            self.events.push(GameEvent::BackgroundMusicStop);
        }
        self.events.push(GameEvent::GameOver {
            score,
            high_score,
            new_record,
        });
        log::info!(
            "Game over: score {score}, high score {high_score}{}",
            if new_record { " (new record)" } else { "" }
        );
    }

    // === Lifecycle ===

    pub fn pause(&mut self) {
        if self.state.phase == GamePhase::Playing && !self.torn_down {
            self.state.phase = GamePhase::Paused;
            log::info!("Paused");
        }
    }

    pub fn resume(&mut self) {
        if self.state.phase == GamePhase::Paused && !self.torn_down {
            self.state.phase = GamePhase::Playing;
            log::info!("Resumed");
        }
    }

    /// Stop the timers and the ramp, then release every spawned body
    pub fn teardown(&mut self) {
        if self.torn_down {
            return;
        }
        self.scheduler.stop_all();
        self.ramp.enabled = false;
        if self.state.music_started && !self.state.is_over() {
            self.events.push(GameEvent::BackgroundMusicStop);
        }
        self.entities.clear();
        self.torn_down = true;
        log::info!("Session torn down at score {}", self.state.score);
    }
}
