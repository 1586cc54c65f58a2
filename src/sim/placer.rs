//! Obstacle, bonus and wave placement
//!
//! Each spawner draws a small uniform integer and maps it onto a fixed table
//! of patterns. The table lookups are exposed as pure functions of the draw
//! so they can be checked without an RNG; the `ObstaclePlacer` methods just
//! roll the dice and feed them in.

use glam::Vec2;
use rand::Rng;

use super::entity::{EntityKind, Side};
use super::geometry::PlayfieldBounds;
use crate::tuning::Tuning;

/// Obstacle pattern draws are uniform in `1..=OBSTACLE_DRAW_MAX`
pub const OBSTACLE_DRAW_MAX: u32 = 50;
/// Lane draws (obstacle x and bonus x) are uniform in `1..=LANE_DRAW_MAX`
pub const LANE_DRAW_MAX: u32 = 15;
/// Horizontal positions a wave may appear at
pub const WAVE_LANES: [f32; 3] = [50.0, -50.0, 0.0];

/// Where an obstacle in a pattern goes horizontally
#[derive(Debug, Clone, Copy, PartialEq)]
pub enum Placement {
    /// Roll a lane draw and compute x from it
    Computed,
    /// Fixed x
    At(f32),
}

/// A body ready to be inserted into the session
#[derive(Debug, Clone, PartialEq)]
pub struct EntitySpawn {
    pub kind: EntityKind,
    pub pos: Vec2,
    pub size: Vec2,
    pub collider: Option<Vec2>,
}

/// Sprite width of an obstacle kind
pub fn obstacle_width(kind: EntityKind, tuning: &Tuning) -> f32 {
    if kind.is_small_obstacle() {
        tuning.small_obstacle_width
    } else {
        tuning.medium_obstacle_width
    }
}

/// x that puts an obstacle of `kind` flush against its own bank
fn flush_x(kind: EntityKind, bounds: &PlayfieldBounds, tuning: &Tuning) -> f32 {
    let half = obstacle_width(kind, tuning) / 2.0;
    match kind.side() {
        Some(Side::Right) => bounds.max_x - half,
        Some(Side::Left) => bounds.min_x + half,
        None => 0.0,
    }
}

/// Trees making up the obstacle pattern for a draw in `1..=50`.
///
/// Arms are matched first to last, so the 22..=30 arm only ever sees
/// 26..=30; 22..=25 belong to the 21..=25 arm. Anything not listed falls
/// through to a single computed medium left tree.
#[allow(clippy::match_overlapping_arm)]
pub fn obstacle_pattern(
    draw: u32,
    bounds: &PlayfieldBounds,
    tuning: &Tuning,
) -> Vec<(EntityKind, Placement)> {
    use EntityKind::*;
    use Placement::*;

    let right_small = At(flush_x(ObstacleSmallRight, bounds, tuning));
    let left_small = At(flush_x(ObstacleSmallLeft, bounds, tuning));

    match draw {
        1..=5 => vec![(ObstacleSmallRight, Computed)],
        6..=10 => vec![(ObstacleSmallLeft, Computed)],
        11..=15 => vec![(ObstacleMediumRight, Computed)],
        16..=20 => vec![(ObstacleSmallRight, right_small), (ObstacleSmallLeft, left_small)],
        21..=25 => vec![(ObstacleSmallRight, right_small), (ObstacleSmallLeft, At(0.0))],
        22..=30 => vec![(ObstacleSmallRight, At(0.0)), (ObstacleSmallLeft, left_small)],
        31..=35 => vec![
            (ObstacleSmallRight, right_small),
            (ObstacleMediumLeft, At(flush_x(ObstacleMediumLeft, bounds, tuning))),
        ],
        36..=40 => vec![
            (ObstacleSmallLeft, left_small),
            (ObstacleMediumRight, At(flush_x(ObstacleMediumRight, bounds, tuning))),
        ],
        41..=45 => vec![
            (ObstacleSmallRight, right_small),
            (ObstacleSmallLeft, At(0.0)),
            (ObstacleSmallLeft, left_small),
        ],
        _ => vec![(ObstacleMediumLeft, Computed)],
    }
}

/// Computed x of an obstacle for a lane draw in `1..=15`.
///
/// Draws 1..=5 hug the tree's own bank. Draws 6..=10 push small trees
/// inward by the player's width plus ten units per draw point; medium trees
/// have no inward lane and fall through to the center, like draws 11..=15.
pub fn computed_obstacle_x(
    kind: EntityKind,
    draw: u32,
    bounds: &PlayfieldBounds,
    tuning: &Tuning,
) -> f32 {
    match draw {
        1..=5 => flush_x(kind, bounds, tuning),
        6..=10 if kind.is_small_obstacle() => {
            let inset = tuning.player_width + 10.0 * draw as f32;
            match kind.side() {
                Some(Side::Right) => flush_x(kind, bounds, tuning) - inset,
                Some(Side::Left) => flush_x(kind, bounds, tuning) + inset,
                None => 0.0,
            }
        }
        _ => 0.0,
    }
}

/// x of a bonus for a lane draw in `1..=15`
pub fn bonus_x(draw: u32, bounds: &PlayfieldBounds, bonus_width: f32) -> f32 {
    match draw {
        1..=5 => bounds.min_x + bonus_width,
        6..=10 => bounds.max_x - bonus_width,
        _ => 0.0,
    }
}

/// Builds spawn blueprints inside a fixed playfield
#[derive(Debug, Clone, Copy)]
pub struct ObstaclePlacer<'a> {
    bounds: &'a PlayfieldBounds,
    tuning: &'a Tuning,
}

impl<'a> ObstaclePlacer<'a> {
    pub fn new(bounds: &'a PlayfieldBounds, tuning: &'a Tuning) -> Self {
        Self { bounds, tuning }
    }

    fn eroded(&self, size: Vec2) -> Vec2 {
        (size - Vec2::splat(self.tuning.collider_erosion)).max(Vec2::ZERO)
    }

    /// One obstacle at a resolved x, on the top edge
    pub fn obstacle_at(&self, kind: EntityKind, x: f32) -> EntitySpawn {
        let size = Vec2::new(obstacle_width(kind, self.tuning), self.tuning.obstacle_height);
        EntitySpawn {
            kind,
            pos: Vec2::new(x, self.bounds.max_y),
            size,
            collider: Some(self.eroded(size)),
        }
    }

    /// Roll an obstacle pattern (one to three trees)
    pub fn spawn_obstacle<R: Rng + ?Sized>(&self, rng: &mut R) -> Vec<EntitySpawn> {
        let draw = rng.random_range(1..=OBSTACLE_DRAW_MAX);
        obstacle_pattern(draw, self.bounds, self.tuning)
            .into_iter()
            .map(|(kind, placement)| {
                let x = match placement {
                    Placement::At(x) => x,
                    Placement::Computed => {
                        let lane = rng.random_range(1..=LANE_DRAW_MAX);
                        computed_obstacle_x(kind, lane, self.bounds, self.tuning)
                    }
                };
                self.obstacle_at(kind, x)
            })
            .collect()
    }

    /// A bonus for a given lane draw, slightly above the obstacle row
    pub fn bonus_for_draw(&self, draw: u32) -> EntitySpawn {
        let side = self.tuning.bonus_size;
        let size = Vec2::splat(side);
        EntitySpawn {
            kind: EntityKind::Bonus,
            pos: Vec2::new(bonus_x(draw, self.bounds, side), self.bounds.max_y + side + 10.0),
            size,
            collider: Some(self.eroded(size)),
        }
    }

    /// Roll a bonus
    pub fn spawn_bonus<R: Rng + ?Sized>(&self, rng: &mut R) -> EntitySpawn {
        self.bonus_for_draw(rng.random_range(1..=LANE_DRAW_MAX))
    }

    /// Roll a decorative wave
    pub fn spawn_wave<R: Rng + ?Sized>(&self, rng: &mut R) -> EntitySpawn {
        let x = WAVE_LANES[rng.random_range(0..WAVE_LANES.len())];
        EntitySpawn {
            kind: EntityKind::Wave,
            pos: Vec2::new(x, self.bounds.max_y),
            size: Vec2::new(self.tuning.wave_width, self.tuning.wave_height),
            collider: None,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::sim::geometry::PlayfieldInput;
    use rand::SeedableRng;
    use rand_pcg::Pcg32;

    fn setup() -> (PlayfieldBounds, Tuning) {
        let tuning = Tuning {
            player_width: 40.0,
            ..Default::default()
        };
        let bounds = PlayfieldBounds::new(PlayfieldInput {
            half_width: 200.0,
            half_height: 400.0,
            player_width: 40.0,
            player_height: 40.0,
            bank_width: 40.0,
        })
        .unwrap();
        (bounds, tuning)
    }

    #[test]
    fn test_flush_small_right() {
        let (bounds, tuning) = setup();
        let x = computed_obstacle_x(EntityKind::ObstacleSmallRight, 3, &bounds, &tuning);
        assert_eq!(x, bounds.max_x - 55.0);
        let x = computed_obstacle_x(EntityKind::ObstacleSmallLeft, 5, &bounds, &tuning);
        assert_eq!(x, bounds.min_x + 55.0);
    }

    #[test]
    fn test_inward_lane_small_only() {
        let (bounds, tuning) = setup();
        let x = computed_obstacle_x(EntityKind::ObstacleSmallRight, 7, &bounds, &tuning);
        assert_eq!(x, bounds.max_x - 55.0 - 40.0 - 70.0);
        let x = computed_obstacle_x(EntityKind::ObstacleSmallLeft, 6, &bounds, &tuning);
        assert_eq!(x, bounds.min_x + 55.0 + 40.0 + 60.0);
        // Medium trees have no inward lane
        let x = computed_obstacle_x(EntityKind::ObstacleMediumRight, 7, &bounds, &tuning);
        assert_eq!(x, 0.0);
    }

    #[test]
    fn test_center_lane() {
        let (bounds, tuning) = setup();
        for draw in 11..=15 {
            assert_eq!(
                computed_obstacle_x(EntityKind::ObstacleSmallLeft, draw, &bounds, &tuning),
                0.0
            );
        }
    }

    #[test]
    fn test_pattern_table() {
        let (bounds, tuning) = setup();
        assert_eq!(
            obstacle_pattern(3, &bounds, &tuning),
            vec![(EntityKind::ObstacleSmallRight, Placement::Computed)]
        );
        // 22..=25 belong to the earlier arm
        let p = obstacle_pattern(23, &bounds, &tuning);
        assert_eq!(p[1], (EntityKind::ObstacleSmallLeft, Placement::At(0.0)));
        let p = obstacle_pattern(27, &bounds, &tuning);
        assert_eq!(p[0], (EntityKind::ObstacleSmallRight, Placement::At(0.0)));
        assert_eq!(obstacle_pattern(43, &bounds, &tuning).len(), 3);
        assert_eq!(
            obstacle_pattern(50, &bounds, &tuning),
            vec![(EntityKind::ObstacleMediumLeft, Placement::Computed)]
        );
        let p = obstacle_pattern(33, &bounds, &tuning);
        assert_eq!(
            p[1],
            (EntityKind::ObstacleMediumLeft, Placement::At(bounds.min_x + 150.0))
        );
    }

    #[test]
    fn test_every_draw_has_a_pattern() {
        let (bounds, tuning) = setup();
        for draw in 1..=OBSTACLE_DRAW_MAX {
            let pattern = obstacle_pattern(draw, &bounds, &tuning);
            assert!((1..=3).contains(&pattern.len()), "draw {draw}");
        }
    }

    #[test]
    fn test_bonus_lanes() {
        let (bounds, tuning) = setup();
        let placer = ObstaclePlacer::new(&bounds, &tuning);
        let b = placer.bonus_for_draw(7);
        assert_eq!(b.pos.x, bounds.max_x - 50.0);
        assert_eq!(b.pos.y, bounds.max_y + 60.0);
        assert_eq!(placer.bonus_for_draw(2).pos.x, bounds.min_x + 50.0);
        assert_eq!(placer.bonus_for_draw(12).pos.x, 0.0);
        assert_eq!(b.collider, Some(Vec2::splat(30.0)));
    }

    #[test]
    fn test_obstacle_shape() {
        let (bounds, tuning) = setup();
        let placer = ObstaclePlacer::new(&bounds, &tuning);
        let tree = placer.obstacle_at(EntityKind::ObstacleMediumLeft, -10.0);
        assert_eq!(tree.size, Vec2::new(300.0, 60.0));
        assert_eq!(tree.collider, Some(Vec2::new(280.0, 40.0)));
        assert_eq!(tree.pos.y, bounds.max_y);
    }

    #[test]
    fn test_random_spawns_stay_on_known_lanes() {
        let (bounds, tuning) = setup();
        let placer = ObstaclePlacer::new(&bounds, &tuning);
        let mut rng = Pcg32::seed_from_u64(7);
        for _ in 0..500 {
            for tree in placer.spawn_obstacle(&mut rng) {
                assert!(tree.kind.is_obstacle());
                assert!(tree.pos.x.abs() <= bounds.max_x);
            }
            let wave = placer.spawn_wave(&mut rng);
            assert!(WAVE_LANES.contains(&wave.pos.x));
            assert!(wave.collider.is_none());
        }
    }
}
