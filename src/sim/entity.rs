//! Spawned bodies and their collision boxes

use glam::Vec2;
use serde::{Deserialize, Serialize};

/// Stable identity of a body for the lifetime of a session
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
pub struct EntityId(pub u32);

impl EntityId {
    /// The player always has this id
    pub const PLAYER: EntityId = EntityId(0);
}

/// Which side of the lake a tree grows from or a bank lies on
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum Side {
    Left,
    Right,
}

/// Every kind of body in the scene
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum EntityKind {
    Player,
    /// Land along the lake edge
    SideBank(Side),
    /// Decorative ripple, never collides
    Wave,
    ObstacleSmallLeft,
    ObstacleSmallRight,
    ObstacleMediumLeft,
    ObstacleMediumRight,
    /// Donut pickup
    Bonus,
}

impl EntityKind {
    pub fn is_obstacle(self) -> bool {
        matches!(
            self,
            EntityKind::ObstacleSmallLeft
                | EntityKind::ObstacleSmallRight
                | EntityKind::ObstacleMediumLeft
                | EntityKind::ObstacleMediumRight
        )
    }

    /// Bodies that move with the lake current
    pub fn scrolls(self) -> bool {
        !matches!(self, EntityKind::Player | EntityKind::SideBank(_))
    }

    /// Obstacles and bonuses earn pass-through points when they leave the screen
    pub fn awards_pass_through(self) -> bool {
        self.is_obstacle() || self == EntityKind::Bonus
    }

    /// Side an obstacle hugs, if any
    pub fn side(self) -> Option<Side> {
        match self {
            EntityKind::ObstacleSmallLeft | EntityKind::ObstacleMediumLeft => Some(Side::Left),
            EntityKind::ObstacleSmallRight | EntityKind::ObstacleMediumRight => Some(Side::Right),
            EntityKind::SideBank(side) => Some(side),
            _ => None,
        }
    }

    pub fn is_small_obstacle(self) -> bool {
        matches!(
            self,
            EntityKind::ObstacleSmallLeft | EntityKind::ObstacleSmallRight
        )
    }
}

/// Axis-aligned box given by center and half extents
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct Aabb {
    pub center: Vec2,
    pub half: Vec2,
}

impl Aabb {
    pub fn from_size(center: Vec2, size: Vec2) -> Self {
        Self {
            center,
            half: size * 0.5,
        }
    }

    pub fn min(&self) -> Vec2 {
        self.center - self.half
    }

    pub fn max(&self) -> Vec2 {
        self.center + self.half
    }

    /// Strict overlap; boxes that only touch along an edge do not overlap
    pub fn overlaps(&self, other: &Aabb) -> bool {
        let d = (self.center - other.center).abs();
        let reach = self.half + other.half;
        d.x < reach.x && d.y < reach.y
    }

    /// Overlap that also counts boxes meeting along an edge
    pub fn touches(&self, other: &Aabb) -> bool {
        let d = (self.center - other.center).abs();
        let reach = self.half + other.half;
        d.x <= reach.x && d.y <= reach.y
    }
}

/// A spawned body living in the session's entity collection
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Entity {
    pub id: EntityId,
    pub kind: EntityKind,
    /// Center position
    pub pos: Vec2,
    /// Sprite size
    pub size: Vec2,
    /// Collision box size, centered on `pos`; `None` for decoration
    pub collider: Option<Vec2>,
    /// Session clock (seconds) at spawn
    pub created_at: f32,
}

impl Entity {
    /// Current collision box, if the entity has one
    pub fn collider_box(&self) -> Option<Aabb> {
        self.collider.map(|size| Aabb::from_size(self.pos, size))
    }
}
