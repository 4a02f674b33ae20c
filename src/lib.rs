//! # deck-combat
//!
//! A deck-based, turn-based combat resolution engine: a player fights
//! waves of enemies by playing cards from a five-card hand.
//!
//! ## Design Principles
//!
//! 1. **Content as Data**: Cards and entities come from `CombatConfig`,
//!    usually parsed from JSON. Nothing about a specific card is hardcoded.
//!
//! 2. **Rejected Actions Change Nothing**: Every play is fully validated
//!    before any mutation, and failures are typed `ActionError`s.
//!
//! 3. **Presentation Agnostic**: The engine reports what happened
//!    (`CardPlay`, `TurnReport`, `EntityState`); animation and HUD code
//!    lives elsewhere.
//!
//! ## Modules
//!
//! - `core`: Entity IDs, RNG, configuration, errors
//! - `effects`: Timed status effects and their tick rules
//! - `cards`: Card templates, instances and the catalog
//! - `deck`: Draw, hand, discard and exhaust piles
//! - `combat`: Combatants, card resolution, enemy policy, turn controller
//!
//! ## Usage
//!
//! ```
//! use deck_combat::{CombatConfig, EncounterBuilder};
//!
//! let json = r#"{
//!     "cards": {
//!         "slap": { "kind": "attack", "cost": 1, "damage": 3 }
//!     },
//!     "entities": {
//!         "Ulisses": { "max_hp": 40, "max_energy": 3, "draw_pile": ["slap", "slap", "slap", "slap", "slap"] },
//!         "Fairy": { "max_hp": 3, "max_energy": 1, "draw_pile": ["slap"], "drop_xp": 5 }
//!     }
//! }"#;
//!
//! let config = CombatConfig::from_json(json).unwrap();
//! let mut combat = EncounterBuilder::new(&config)
//!     .player("Ulisses")
//!     .stage(["Fairy"])
//!     .seed(1)
//!     .build()
//!     .unwrap();
//!
//! let card = combat.hand()[0].id;
//! let fairy = combat.enemies()[0].id();
//! combat.select_card(card).unwrap();
//! combat.target_entity(fairy).unwrap();
//! assert!(combat.check_win());
//! ```

pub mod core;
pub mod effects;
pub mod cards;
pub mod deck;
pub mod combat;

#[cfg(feature = "python")]
pub mod python;

// Re-export commonly used types
pub use crate::core::{
    EntityId, GameRng,
    CardConfig, CombatConfig, EffectConfig, EntityConfig, HAND_SIZE,
    ActionError, ActionResult, SetupError, SetupResult,
};

pub use crate::effects::{StatusEffect, StatusKind, EffectTick};

pub use crate::cards::{Card, CardAction, CardCatalog, CardId, CardInstance, CardInstanceId, CardKind};

pub use crate::deck::{Deck, Pile};

pub use crate::combat::{
    Combatant, EntityState, HitReport, Role,
    CardPlay, PlayEffect,
    EnemyPolicy, FirstInHand, RandomInHand,
    CombatController, CombatOutcome, EncounterBuilder, TurnPhase, TurnReport,
};
