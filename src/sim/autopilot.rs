//! Idle/demo mode: an AI that plays by dragging the joystick
//!
//! It only uses the public input path (pointer events), so a demo run goes
//! through exactly the same code as a human one.

use glam::Vec2;

use super::entity::EntityKind;
use super::joystick::PointerEvent;
use super::session::GameSession;

/// Extra room the autopilot keeps between the whale and a tree
const CLEARANCE: f32 = 12.0;

#[derive(Debug, Clone)]
pub struct Autopilot {
    /// How far above the whale trees are considered a threat
    pub lookahead: f32,
    /// y the whale drifts back to when nothing is in the way
    pub cruise_y: Option<f32>,
}

impl Default for Autopilot {
    fn default() -> Self {
        Self {
            lookahead: 450.0,
            cruise_y: None,
        }
    }
}

impl Autopilot {
    /// Where the whale should head this tick
    pub fn target(&self, session: &GameSession) -> Vec2 {
        let player = session.player();
        let bounds = session.bounds();
        let half_w = player.size.x / 2.0;
        let home_y = self.cruise_y.unwrap_or(player.pos.y);

        // Nearest tree ahead whose box covers the whale's lane
        let threat = session
            .entities()
            .iter()
            .filter(|e| e.kind.is_obstacle())
            .filter_map(|e| e.collider_box().map(|b| (e, b)))
            .filter(|(_, b)| {
                let ahead = b.min().y - player.pos.y;
                ahead > -player.size.y && ahead < self.lookahead
            })
            .filter(|(_, b)| {
                b.min().x < player.pos.x + half_w + CLEARANCE
                    && b.max().x > player.pos.x - half_w - CLEARANCE
            })
            .min_by(|(_, a), (_, b)| a.center.y.total_cmp(&b.center.y));

        if let Some((_, b)) = threat {
            let left = b.min().x - half_w - CLEARANCE;
            let right = b.max().x + half_w + CLEARANCE;
            let left_ok = left >= bounds.border_left;
            let right_ok = right <= bounds.border_right;
            let x = match (left_ok, right_ok) {
                (true, true) => {
                    if (player.pos.x - left).abs() <= (right - player.pos.x).abs() {
                        left
                    } else {
                        right
                    }
                }
                (true, false) => left,
                (false, true) => right,
                // No gap beside this tree: retreat down and hope
                (false, false) => player.pos.x,
            };
            let y = if left_ok || right_ok {
                home_y
            } else {
                bounds.border_bottom
            };
            return Vec2::new(x, y);
        }

        // Nothing in the way: go for the nearest donut ahead, else the middle
        let x = session
            .entities()
            .iter()
            .filter(|e| e.kind == EntityKind::Bonus && e.pos.y > player.pos.y)
            .min_by(|a, b| a.pos.y.total_cmp(&b.pos.y))
            .map(|e| e.pos.x)
            .unwrap_or(0.0);
        Vec2::new(x, home_y)
    }

    /// Pointer events that steer toward `target`
    pub fn steer(&self, session: &GameSession) -> Vec<PointerEvent> {
        if session.is_over() {
            return Vec::new();
        }
        let joystick = session.joystick();
        let player = session.player();
        let wanted = self.target(session) - player.pos;

        let mut events = Vec::with_capacity(2);
        if !joystick.in_use {
            events.push(PointerEvent::Down(joystick.knob));
        }
        // Knob offset for a velocity that covers the gap in one tick, held inside the base
        let offset = (wanted * session.tuning().joystick_damping).clamp_length_max(joystick.base_radius);
        events.push(PointerEvent::Move(joystick.base + offset));
        events
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::highscores::MemoryHighScore;
    use crate::sim::placer::ObstaclePlacer;
    use crate::tuning::Tuning;

    fn session() -> GameSession {
        let tuning = Tuning {
            ramp_enabled: false,
            ..Default::default()
        };
        GameSession::new(tuning, 5, Box::new(MemoryHighScore::default())).unwrap()
    }

    #[test]
    fn test_dodges_tree_in_lane() {
        let mut s = session();
        let player = s.player().pos;
        let mut tree = ObstaclePlacer::new(s.bounds(), s.tuning())
            .obstacle_at(EntityKind::ObstacleSmallRight, player.x + 10.0);
        tree.pos.y = player.y + 200.0;
        s.insert(tree);

        let target = Autopilot::default().target(&s);
        assert!((target.x - player.x).abs() > 50.0);
        assert!(target.x >= s.bounds().border_left && target.x <= s.bounds().border_right);
    }

    #[test]
    fn test_first_steer_grabs_knob() {
        let s = session();
        let events = Autopilot::default().steer(&s);
        assert_eq!(events[0], PointerEvent::Down(s.joystick().knob));
        assert!(matches!(events[1], PointerEvent::Move(_)));
    }

    #[test]
    fn test_steering_keeps_velocity_bounded() {
        let mut s = session();
        let pilot = Autopilot::default();
        for _ in 0..600 {
            for event in pilot.steer(&s) {
                s.handle_pointer(event);
            }
            s.step();
            assert!(s.player().vel.length() <= s.joystick().max_speed() + 1e-3);
        }
    }
}
