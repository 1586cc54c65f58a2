//! Playfield bounds
//!
//! The lake is a vertical channel centered on the origin, walled in by a
//! land bank on each side. Everything that places or clamps positions reads
//! these bounds; they are computed once per session and never change.

use serde::{Deserialize, Serialize};
use thiserror::Error;

use crate::tuning::Tuning;

/// Rejected playfield inputs
#[derive(Debug, Clone, PartialEq, Error)]
pub enum GeometryError {
    #[error("{name} must be a positive finite size, got {value}")]
    NonPositive { name: &'static str, value: f32 },
    #[error("bank width {bank} leaves no water inside half width {half_width}")]
    NoWater { half_width: f32, bank: f32 },
    #[error("player ({width}x{height}) does not fit inside the lake")]
    PlayerTooLarge { width: f32, height: f32 },
}

/// Screen and sprite sizes the bounds are derived from
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct PlayfieldInput {
    pub half_width: f32,
    pub half_height: f32,
    pub player_width: f32,
    pub player_height: f32,
    pub bank_width: f32,
}

impl From<&Tuning> for PlayfieldInput {
    fn from(t: &Tuning) -> Self {
        Self {
            half_width: t.screen_half_width,
            half_height: t.screen_half_height,
            player_width: t.player_width,
            player_height: t.player_height,
            bank_width: t.bank_width,
        }
    }
}

/// Travel bounds of the lake and of the player within it
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct PlayfieldBounds {
    pub min_x: f32,
    pub max_x: f32,
    pub min_y: f32,
    pub max_y: f32,
    /// Left-most x of the player's center
    pub border_left: f32,
    /// Right-most x of the player's center
    pub border_right: f32,
    /// Highest y of the player's center
    pub border_top: f32,
    /// Lowest y of the player's center
    pub border_bottom: f32,
}

impl PlayfieldBounds {
    pub fn new(input: PlayfieldInput) -> Result<Self, GeometryError> {
        let sizes = [
            ("half_width", input.half_width),
            ("half_height", input.half_height),
            ("player_width", input.player_width),
            ("player_height", input.player_height),
            ("bank_width", input.bank_width),
        ];
        for (name, value) in sizes {
            if !(value.is_finite() && value > 0.0) {
                return Err(GeometryError::NonPositive { name, value });
            }
        }
        if input.bank_width >= input.half_width {
            return Err(GeometryError::NoWater {
                half_width: input.half_width,
                bank: input.bank_width,
            });
        }

        let max_x = input.half_width - input.bank_width;
        let min_x = -max_x;
        let max_y = input.half_height;
        let min_y = -input.half_height;

        let bounds = Self {
            min_x,
            max_x,
            min_y,
            max_y,
            border_left: min_x + input.player_width / 2.0,
            border_right: max_x - input.player_width / 2.0,
            border_top: max_y - 1.5 * input.player_height,
            border_bottom: min_y + 1.5 * input.player_height,
        };

        if bounds.border_left >= bounds.border_right || bounds.border_bottom >= bounds.border_top {
            return Err(GeometryError::PlayerTooLarge {
                width: input.player_width,
                height: input.player_height,
            });
        }
        Ok(bounds)
    }

    /// Clamp a player center into the travel borders
    pub fn clamp_player(&self, pos: glam::Vec2) -> glam::Vec2 {
        glam::Vec2::new(
            pos.x.clamp(self.border_left, self.border_right),
            pos.y.clamp(self.border_bottom, self.border_top),
        )
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn input(half_width: f32, half_height: f32) -> PlayfieldInput {
        PlayfieldInput {
            half_width,
            half_height,
            player_width: 40.0,
            player_height: 40.0,
            bank_width: 40.0,
        }
    }

    #[test]
    fn test_bounds_formulas() {
        let b = PlayfieldBounds::new(input(200.0, 400.0)).unwrap();
        assert_eq!(b.max_x, 160.0);
        assert_eq!(b.min_x, -160.0);
        assert_eq!(b.max_y, 400.0);
        assert_eq!(b.min_y, -400.0);
        assert_eq!(b.border_right, 140.0);
        assert_eq!(b.border_left, -140.0);
        assert_eq!(b.border_top, 340.0);
        assert_eq!(b.border_bottom, -340.0);
    }

    #[test]
    fn test_rejects_non_positive() {
        let err = PlayfieldBounds::new(input(0.0, 400.0)).unwrap_err();
        assert!(matches!(err, GeometryError::NonPositive { name: "half_width", .. }));

        let mut bad = input(200.0, 400.0);
        bad.player_height = -1.0;
        assert!(PlayfieldBounds::new(bad).is_err());
    }

    #[test]
    fn test_rejects_bank_wider_than_screen() {
        let mut bad = input(200.0, 400.0);
        bad.bank_width = 200.0;
        assert!(matches!(
            PlayfieldBounds::new(bad),
            Err(GeometryError::NoWater { .. })
        ));
    }

    #[test]
    fn test_rejects_oversized_player() {
        let mut bad = input(200.0, 400.0);
        bad.player_width = 400.0;
        assert!(matches!(
            PlayfieldBounds::new(bad),
            Err(GeometryError::PlayerTooLarge { .. })
        ));
    }

    #[test]
    fn test_clamp_player() {
        let b = PlayfieldBounds::new(input(200.0, 400.0)).unwrap();
        let p = b.clamp_player(glam::Vec2::new(1000.0, -1000.0));
        assert_eq!(p, glam::Vec2::new(140.0, -340.0));
    }
}
