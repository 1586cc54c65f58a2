//! Deterministic simulation module
//!
//! All gameplay logic lives here. This module must be pure and deterministic:
//! - Fixed timestep ticks, explicit elapsed time for timers
//! - Seeded RNG only
//! - Stable iteration order (spawn order)
//! - No rendering, audio or platform dependencies

pub mod autopilot;
pub mod collision;
pub mod entity;
pub mod geometry;
pub mod joystick;
pub mod placer;
pub mod ramp;
pub mod scheduler;
pub mod scroll;
pub mod session;
pub mod state;

pub use autopilot::Autopilot;
pub use collision::{Contact, ContactBody, ContactOutcome};
pub use entity::{Aabb, Entity, EntityId, EntityKind, Side};
pub use geometry::{GeometryError, PlayfieldBounds, PlayfieldInput};
pub use joystick::{Joystick, PointerEvent};
pub use placer::{EntitySpawn, ObstaclePlacer};
pub use ramp::{DifficultyRamp, RampLimits};
pub use scheduler::{RepeatingTimer, SpawnPeriods, SpawnScheduler, SpawnTimer};
pub use session::{GameSession, SceneSnapshot, SessionError};
pub use state::{GameEvent, GamePhase, PlayerState, SessionState};
