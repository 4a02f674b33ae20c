//! Card instances - one physical copy of a card in a deck.
//!
//! The deck moves instances between piles by identity. Two copies of the
//! same template are distinct instances with distinct ids.

use std::sync::Arc;

use serde::{Deserialize, Serialize};

use super::definition::{Card, CardId, CardKind};

/// Unique identifier for a card copy within an encounter.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
pub struct CardInstanceId(pub u32);

impl std::fmt::Display for CardInstanceId {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "#{}", self.0)
    }
}

/// A card copy: identity plus a shared, immutable template.
#[derive(Clone, Debug, PartialEq)]
pub struct CardInstance {
    pub id: CardInstanceId,
    pub card: Arc<Card>,
}

impl CardInstance {
    #[must_use]
    pub fn new(id: CardInstanceId, card: Arc<Card>) -> Self {
        Self { id, card }
    }

    #[must_use]
    pub fn card_id(&self) -> CardId {
        self.card.id
    }

    #[must_use]
    pub fn kind(&self) -> CardKind {
        self.card.kind()
    }

    #[must_use]
    pub fn energy_cost(&self) -> u32 {
        self.card.energy_cost
    }
}

/// Hands out encounter-unique instance ids.
#[derive(Clone, Debug, Default)]
pub struct InstanceAllocator {
    next: u32,
}

impl InstanceAllocator {
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Allocate the next instance id.
    pub fn alloc(&mut self) -> CardInstanceId {
        let id = CardInstanceId(self.next);
        self.next += 1;
        id
    }
}
