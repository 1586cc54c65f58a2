//! Host-side contact detection
//!
//! The session never looks for overlaps itself; a physics host reports
//! begin-contact events. This detector plays that role for headless and
//! threaded runs: axis-aligned boxes, reported once when an overlap starts.

use std::collections::BTreeSet;

use crate::sim::{Contact, ContactBody, EntityId, EntityKind, GameSession};

#[derive(Debug, Default, Clone)]
pub struct OverlapDetector {
    /// Bodies overlapping the player after the last scan
    touching: BTreeSet<EntityId>,
}

impl OverlapDetector {
    pub fn new() -> Self {
        Self::default()
    }

    /// Begin-contacts between the player and every collidable body.
    ///
    /// Banks come first, then spawned bodies in spawn order. A body that
    /// stays overlapped is not reported again until it separates.
    pub fn detect(&mut self, session: &GameSession) -> Vec<Contact> {
        let player = session.player().collider();
        let mut now = BTreeSet::new();
        let mut contacts = Vec::new();

        for entity in session.banks().iter().chain(session.entities()) {
            let Some(collider) = entity.collider_box() else {
                continue;
            };
            // The player is clamped flush against the shore, so banks count on contact
            let hit = match entity.kind {
                EntityKind::SideBank(_) => collider.touches(&player),
                _ => collider.overlaps(&player),
            };
            if !hit {
                continue;
            }
            now.insert(entity.id);
            if !self.touching.contains(&entity.id) {
                contacts.push(Contact::new(
                    ContactBody::player(),
                    ContactBody::new(entity.id, entity.kind),
                ));
            }
        }

        self.touching = now;
        contacts
    }

    pub fn reset(&mut self) {
        self.touching.clear();
    }
}
