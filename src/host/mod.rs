//! Host side of the engine
//!
//! Everything a session needs from the outside world but does not own:
//! contact detection, the drivers that feed it ticks and elapsed time, and
//! routing of its events to the audio and scene collaborators.

pub mod overlap;
pub mod runtime;

pub use overlap::OverlapDetector;
pub use runtime::{Runtime, SharedSession, TickHook};

use serde::Serialize;

use crate::audio::AudioManager;
use crate::consts::SIM_DT;
use crate::sim::{Autopilot, GameEvent, GameSession};

/// Navigation away from the game scene
pub trait SceneTransition: Send {
    /// Called once per session, when the run ends
    fn game_over(&mut self, score: u64, high_score: u64);
}

/// Transition that does nothing, for tests and embedders without scenes
#[derive(Debug, Default)]
pub struct NoTransition;

impl SceneTransition for NoTransition {
    fn game_over(&mut self, _score: u64, _high_score: u64) {}
}

/// Fans session events out to the collaborators
pub struct EventRouter {
    audio: AudioManager,
    scene: Box<dyn SceneTransition>,
    transitioned: bool,
}

impl EventRouter {
    pub fn new(audio: AudioManager, scene: Box<dyn SceneTransition>) -> Self {
        Self {
            audio,
            scene,
            transitioned: false,
        }
    }

    pub fn has_transitioned(&self) -> bool {
        self.transitioned
    }

    pub fn audio(&self) -> &AudioManager {
        &self.audio
    }

    pub fn dispatch(&mut self, events: &[GameEvent]) {
        for event in events {
            self.audio.handle(event);
            if let GameEvent::GameOver {
                score, high_score, ..
            } = *event
            {
                if self.transitioned {
                    log::warn!("Ignoring repeated game over (score {score})");
                    continue;
                }
                self.transitioned = true;
                self.scene.game_over(score, high_score);
            }
        }
    }
}

/// How a headless run ended
#[derive(Debug, Clone, Copy, PartialEq, Serialize)]
pub struct RunSummary {
    pub seed: u64,
    pub ticks: u64,
    pub score: u64,
    pub high_score: u64,
    pub game_over: bool,
    pub level: u32,
}

/// Single-threaded driver: as fast as possible, fully deterministic
pub struct HeadlessDriver {
    detector: OverlapDetector,
    autopilot: Option<Autopilot>,
}

impl HeadlessDriver {
    pub fn new(autopilot: Option<Autopilot>) -> Self {
        Self {
            detector: OverlapDetector::new(),
            autopilot,
        }
    }

    /// One fixed step: input, clock, tick, contacts, events
    pub fn step(&mut self, session: &mut GameSession, router: &mut EventRouter) {
        if let Some(pilot) = &self.autopilot {
            for event in pilot.steer(session) {
                session.handle_pointer(event);
            }
        }
        session.advance_clock(SIM_DT);
        session.tick();
        for contact in self.detector.detect(session) {
            session.handle_contact(contact);
        }
        router.dispatch(&session.drain_events());
    }

    /// Step until the run ends or `max_ticks` have passed
    pub fn run(
        &mut self,
        session: &mut GameSession,
        router: &mut EventRouter,
        max_ticks: u64,
    ) -> RunSummary {
        let mut ticks = 0;
        while ticks < max_ticks && !session.is_over() {
            self.step(session, router);
            ticks += 1;
        }
        let summary = RunSummary::of(session, ticks);
        log::info!("Headless run finished after {ticks} ticks: {summary:?}");
        summary
    }

    /// Tear the session down and route its final events
    pub fn finish(&mut self, session: &mut GameSession, router: &mut EventRouter) {
        session.teardown();
        router.dispatch(&session.drain_events());
        self.detector.reset();
    }
}

impl RunSummary {
    pub fn of(session: &GameSession, ticks: u64) -> Self {
        Self {
            seed: session.seed(),
            ticks,
            score: session.score(),
            high_score: session.high_score(),
            game_over: session.is_over(),
            level: session.ramp().level,
        }
    }
}
