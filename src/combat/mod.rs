//! Combat: combatants, card resolution, enemy behaviour and the turn loop.
//!
//! ## Key Types
//!
//! - `Combatant`: Life, energy, defense, multipliers, effects and deck
//! - `apply_card`: Validate and resolve one card play
//! - `EnemyPolicy`: Which card an enemy tries next
//! - `CombatController`: The player/enemy turn state machine

pub mod combatant;
pub mod controller;
pub mod play;
pub mod policy;

pub use combatant::{Combatant, EntityState, HitReport, Role};
pub use controller::{
    CombatController, CombatOutcome, EncounterBuilder, RejectedPlay, TurnPhase, TurnReport,
};
pub use play::{apply_card, check_alive, check_energy, effective_damage, CardPlay, PlayEffect, Target};
pub use policy::{EnemyPolicy, FirstInHand, RandomInHand};
