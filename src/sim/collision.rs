//! Contact resolution
//!
//! The host reports overlaps between pairs of bodies; this module decides
//! what each overlap means. Only contacts involving the player matter.

use serde::{Deserialize, Serialize};

use super::entity::{EntityId, EntityKind};

/// One side of a contact as reported by the host
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct ContactBody {
    pub id: EntityId,
    pub kind: EntityKind,
}

impl ContactBody {
    pub fn new(id: EntityId, kind: EntityKind) -> Self {
        Self { id, kind }
    }

    pub fn player() -> Self {
        Self::new(EntityId::PLAYER, EntityKind::Player)
    }
}

/// Overlap between two bodies
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct Contact {
    pub a: ContactBody,
    pub b: ContactBody,
}

impl Contact {
    pub fn new(a: ContactBody, b: ContactBody) -> Self {
        Self { a, b }
    }

    /// The body touching the player, if exactly one side is the player
    pub fn other_than_player(&self) -> Option<ContactBody> {
        match (self.a.kind, self.b.kind) {
            (EntityKind::Player, EntityKind::Player) => None,
            (EntityKind::Player, _) => Some(self.b),
            (_, EntityKind::Player) => Some(self.a),
            _ => None,
        }
    }
}

/// What a contact does to the session
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ContactOutcome {
    /// Not a player contact, a decoration, or a body already consumed
    Ignored,
    /// Player touched a bank; nothing happens
    Bank,
    /// Bonus `id` is consumed
    Pickup { id: EntityId },
    /// Obstacle `id` is hit and the run ends
    Crash { id: EntityId },
}

/// Classify a contact.
///
/// `is_live` tells whether a spawned entity is still in the collection;
/// contacts with entities that were already consumed are ignored.
pub fn classify(contact: &Contact, is_live: impl Fn(EntityId) -> bool) -> ContactOutcome {
    let Some(other) = contact.other_than_player() else {
        return ContactOutcome::Ignored;
    };

    match other.kind {
        EntityKind::SideBank(_) => ContactOutcome::Bank,
        EntityKind::Bonus if is_live(other.id) => ContactOutcome::Pickup { id: other.id },
        kind if kind.is_obstacle() && is_live(other.id) => ContactOutcome::Crash { id: other.id },
        _ => ContactOutcome::Ignored,
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::sim::entity::Side;

    fn body(id: u32, kind: EntityKind) -> ContactBody {
        ContactBody::new(EntityId(id), kind)
    }

    #[test]
    fn test_bonus_either_order() {
        let donut = body(4, EntityKind::Bonus);
        let live = |_| true;
        assert_eq!(
            classify(&Contact::new(ContactBody::player(), donut), live),
            ContactOutcome::Pickup { id: EntityId(4) }
        );
        assert_eq!(
            classify(&Contact::new(donut, ContactBody::player()), live),
            ContactOutcome::Pickup { id: EntityId(4) }
        );
    }

    #[test]
    fn test_obstacle_crash() {
        let tree = body(9, EntityKind::ObstacleMediumLeft);
        assert_eq!(
            classify(&Contact::new(tree, ContactBody::player()), |_| true),
            ContactOutcome::Crash { id: EntityId(9) }
        );
    }

    #[test]
    fn test_bank_is_harmless() {
        let bank = body(1, EntityKind::SideBank(Side::Right));
        assert_eq!(
            classify(&Contact::new(ContactBody::player(), bank), |_| false),
            ContactOutcome::Bank
        );
    }

    #[test]
    fn test_non_player_contacts_ignored() {
        let tree = body(9, EntityKind::ObstacleSmallLeft);
        let donut = body(4, EntityKind::Bonus);
        assert_eq!(classify(&Contact::new(tree, donut), |_| true), ContactOutcome::Ignored);
        assert_eq!(
            classify(&Contact::new(ContactBody::player(), ContactBody::player()), |_| true),
            ContactOutcome::Ignored
        );
    }

    #[test]
    fn test_consumed_entity_ignored() {
        let donut = body(4, EntityKind::Bonus);
        assert_eq!(
            classify(&Contact::new(ContactBody::player(), donut), |_| false),
            ContactOutcome::Ignored
        );
    }

    #[test]
    fn test_wave_ignored() {
        let wave = body(2, EntityKind::Wave);
        assert_eq!(
            classify(&Contact::new(ContactBody::player(), wave), |_| true),
            ContactOutcome::Ignored
        );
    }
}
