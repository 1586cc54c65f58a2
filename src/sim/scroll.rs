//! Lake current: moves spawned bodies down the screen and reaps the ones that left it

use rand::Rng;

use super::entity::{Entity, EntityKind};
use super::geometry::PlayfieldBounds;

/// Per-tick motion parameters
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct ScrollParams {
    /// Downward speed of obstacles and bonuses, units per tick
    pub velocity: f32,
    /// Additional downward speed of waves
    pub wave_drift: f32,
    /// Sideways wobble of waves, applied left or right at random
    pub wave_jitter: f32,
}

/// Move every scrolling entity one tick down the lake
pub fn advance<R: Rng + ?Sized>(entities: &mut [Entity], params: &ScrollParams, rng: &mut R) {
    for entity in entities.iter_mut().filter(|e| e.kind.scrolls()) {
        match entity.kind {
            EntityKind::Wave => {
                entity.pos.y -= params.velocity + params.wave_drift;
                if rng.random_bool(0.5) {
                    entity.pos.x -= params.wave_jitter;
                } else {
                    entity.pos.x += params.wave_jitter;
                }
            }
            _ => entity.pos.y -= params.velocity,
        }
    }
}

/// Remove entities below `min_y - margin`.
///
/// Returns how many of the removed entities were obstacles or bonuses, i.e.
/// how many pass-through awards are owed.
pub fn reap(entities: &mut Vec<Entity>, bounds: &PlayfieldBounds, margin: f32) -> u32 {
    let threshold = bounds.min_y - margin;
    let mut passed = 0;
    entities.retain(|e| {
        let keep = e.pos.y >= threshold;
        if !keep && e.kind.awards_pass_through() {
            passed += 1;
        }
        keep
    });
    passed
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::sim::entity::EntityId;
    use crate::sim::geometry::PlayfieldInput;
    use glam::Vec2;
    use rand::SeedableRng;
    use rand_pcg::Pcg32;

    fn entity(id: u32, kind: EntityKind, y: f32) -> Entity {
        Entity {
            id: EntityId(id),
            kind,
            pos: Vec2::new(0.0, y),
            size: Vec2::splat(10.0),
            collider: None,
            created_at: 0.0,
        }
    }

    fn bounds() -> PlayfieldBounds {
        PlayfieldBounds::new(PlayfieldInput {
            half_width: 200.0,
            half_height: 400.0,
            player_width: 40.0,
            player_height: 40.0,
            bank_width: 40.0,
        })
        .unwrap()
    }

    const PARAMS: ScrollParams = ScrollParams {
        velocity: 10.0,
        wave_drift: 20.0,
        wave_jitter: 5.0,
    };

    #[test]
    fn test_advance_moves_by_velocity() {
        let mut rng = Pcg32::seed_from_u64(1);
        let mut entities = vec![
            entity(1, EntityKind::ObstacleSmallLeft, 400.0),
            entity(2, EntityKind::Bonus, 460.0),
        ];
        for _ in 0..7 {
            advance(&mut entities, &PARAMS, &mut rng);
        }
        assert_eq!(entities[0].pos.y, 330.0);
        assert_eq!(entities[1].pos.y, 390.0);
        assert_eq!(entities[0].pos.x, 0.0);
    }

    #[test]
    fn test_wave_drifts_and_jitters() {
        let mut rng = Pcg32::seed_from_u64(2);
        let mut entities = vec![entity(1, EntityKind::Wave, 400.0)];
        advance(&mut entities, &PARAMS, &mut rng);
        assert_eq!(entities[0].pos.y, 370.0);
        assert_eq!(entities[0].pos.x.abs(), 5.0);
    }

    #[test]
    fn test_banks_do_not_scroll() {
        let mut rng = Pcg32::seed_from_u64(3);
        let mut entities = vec![entity(
            1,
            EntityKind::SideBank(crate::sim::entity::Side::Left),
            0.0,
        )];
        advance(&mut entities, &PARAMS, &mut rng);
        assert_eq!(entities[0].pos.y, 0.0);
    }

    #[test]
    fn test_reap_awards_only_obstacles_and_bonuses() {
        let b = bounds();
        let mut entities = vec![
            entity(1, EntityKind::ObstacleMediumRight, -501.0),
            entity(2, EntityKind::Bonus, -600.0),
            entity(3, EntityKind::Wave, -700.0),
            entity(4, EntityKind::ObstacleSmallLeft, -500.0),
            entity(5, EntityKind::ObstacleSmallLeft, 0.0),
        ];
        let passed = reap(&mut entities, &b, 100.0);
        assert_eq!(passed, 2);
        let ids: Vec<u32> = entities.iter().map(|e| e.id.0).collect();
        assert_eq!(ids, vec![4, 5]);
    }
}
