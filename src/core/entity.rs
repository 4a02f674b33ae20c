//! Combatant identification.
//!
//! Every fighter in an encounter has a unique `EntityId`.
//!
//! ## ID Layout
//!
//! - `0`: always the player
//! - `1..`: enemies, in the fixed order they act during the enemy turn
//!
//! ```
//! use deck_combat::core::EntityId;
//!
//! assert!(EntityId::PLAYER.is_player());
//!
//! let first_enemy = EntityId::enemy(0);
//! assert_eq!(first_enemy, EntityId(1));
//! assert_eq!(first_enemy.as_enemy_index(), Some(0));
//! ```

use serde::{Deserialize, Serialize};

/// Unique identifier for a combatant within one encounter.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
pub struct EntityId(pub u32);

impl EntityId {
    /// The player's id. There is exactly one player per encounter.
    pub const PLAYER: EntityId = EntityId(0);

    /// Create the id of the enemy at `index` in the acting order.
    #[must_use]
    pub const fn enemy(index: usize) -> Self {
        Self(index as u32 + 1)
    }

    /// Check if this id refers to the player.
    #[must_use]
    pub const fn is_player(self) -> bool {
        self.0 == 0
    }

    /// Convert to an index into the enemy list, if this is an enemy.
    ///
    /// ```
    /// use deck_combat::core::EntityId;
    ///
    /// assert_eq!(EntityId(3).as_enemy_index(), Some(2));
    /// assert_eq!(EntityId::PLAYER.as_enemy_index(), None);
    /// ```
    #[must_use]
    pub const fn as_enemy_index(self) -> Option<usize> {
        if self.is_player() {
            None
        } else {
            Some(self.0 as usize - 1)
        }
    }

    /// Get the raw ID value.
    #[must_use]
    pub const fn raw(self) -> u32 {
        self.0
    }
}

impl From<u32> for EntityId {
    fn from(id: u32) -> Self {
        Self(id)
    }
}

impl std::fmt::Display for EntityId {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        if self.is_player() {
            write!(f, "Player")
        } else {
            write!(f, "Enemy({})", self.0)
        }
    }
}
