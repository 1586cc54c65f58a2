//! On-screen virtual joystick
//!
//! A fixed circular base with a draggable knob. The knob's offset from the
//! base, divided by the damping factor, is the player's velocity per tick.

use std::f32::consts::FRAC_PI_2;

use glam::Vec2;
use serde::{Deserialize, Serialize};

use crate::angle_of;
use crate::tuning::Tuning;

/// Pointer input delivered by the host, in scene coordinates
#[derive(Debug, Clone, Copy, PartialEq)]
pub enum PointerEvent {
    Down(Vec2),
    Move(Vec2),
    Up,
    Cancel,
}

/// Knob sliding back to the base after release
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
struct KnobReturn {
    from: Vec2,
    elapsed: f32,
}

/// Joystick state, also consumed by the renderer
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Joystick {
    pub base: Vec2,
    pub knob: Vec2,
    pub base_radius: f32,
    pub knob_radius: f32,
    pub in_use: bool,
    /// Player velocity derived from the knob, units per tick
    pub velocity: Vec2,
    damping: f32,
    return_secs: f32,
    returning: Option<KnobReturn>,
}

impl Joystick {
    pub fn new(base: Vec2, base_radius: f32, knob_radius: f32, damping: f32, return_secs: f32) -> Self {
        Self {
            base,
            knob: base,
            base_radius,
            knob_radius,
            in_use: false,
            velocity: Vec2::ZERO,
            damping,
            return_secs,
            returning: None,
        }
    }

    /// Joystick anchored near the bottom-left corner of the screen
    pub fn from_tuning(t: &Tuning) -> Self {
        let base = Vec2::new(
            -(t.screen_half_width - t.joystick_inset_x),
            -(t.screen_half_height - t.joystick_inset_y),
        );
        Self::new(
            base,
            t.joystick_base_radius,
            t.joystick_knob_radius,
            t.joystick_damping,
            t.knob_return_secs,
        )
    }

    /// Largest speed the joystick can produce
    pub fn max_speed(&self) -> f32 {
        self.base_radius / self.damping
    }

    pub fn is_returning(&self) -> bool {
        self.returning.is_some()
    }

    pub fn handle(&mut self, event: PointerEvent) {
        match event {
            PointerEvent::Down(p) => self.pointer_down(p),
            PointerEvent::Move(p) => self.pointer_move(p),
            PointerEvent::Up | PointerEvent::Cancel => self.release(),
        }
    }

    /// A press only grabs the joystick when it lands on the knob
    pub fn pointer_down(&mut self, p: Vec2) {
        self.in_use = p.distance(self.knob) <= self.knob_radius;
        if self.in_use {
            self.returning = None;
        }
    }

    pub fn pointer_move(&mut self, p: Vec2) {
        if !self.in_use {
            return;
        }

        let offset = p - self.base;
        self.knob = if offset.length() <= self.base_radius {
            p
        } else {
            // Rotated a quarter turn, then rotated back through sin/cos
            let angle = angle_of(offset) - FRAC_PI_2;
            Vec2::new(
                self.base.x - self.base_radius * angle.sin(),
                self.base.y + self.base_radius * angle.cos(),
            )
        };
        self.velocity = (self.knob - self.base) / self.damping;
    }

    /// Let go: velocity drops to zero at once, the knob glides home
    pub fn release(&mut self) {
        self.in_use = false;
        self.velocity = Vec2::ZERO;
        if self.knob != self.base {
            self.returning = Some(KnobReturn {
                from: self.knob,
                elapsed: 0.0,
            });
        }
    }

    /// Advance the knob return animation
    pub fn update(&mut self, dt: f32) {
        let Some(ret) = self.returning.as_mut() else {
            return;
        };
        ret.elapsed += dt;
        let t = if self.return_secs > 0.0 {
            (ret.elapsed / self.return_secs).min(1.0)
        } else {
            1.0
        };
        self.knob = ret.from.lerp(self.base, t);
        if t >= 1.0 {
            self.knob = self.base;
            self.returning = None;
        }
    }
}
