//! Card system: templates, instances, and the catalog.
//!
//! ## Key Types
//!
//! - `CardId`: Identifier for card templates
//! - `CardKind`: Attack, Defense, OffensiveEffect, DefensiveEffect
//! - `Card`: Immutable template built from content config
//! - `CardInstance`: One copy of a card moving between deck piles
//! - `CardCatalog`: Template lookup and draw-pile instantiation
//!
//! Resolving a played card needs both combatants, so it lives in
//! `combat::play`.

pub mod catalog;
pub mod definition;
pub mod instance;

pub use catalog::CardCatalog;
pub use definition::{build_card, Card, CardAction, CardId, CardKind};
pub use instance::{CardInstance, CardInstanceId, InstanceAllocator};
