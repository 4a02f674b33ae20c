//! Deck lifecycle: draw, hand, discard and exhaust piles.
//!
//! ## Key Types
//!
//! - `Deck`: The four piles plus the current selection for one combatant
//! - `Pile`: Pile identifier

pub mod piles;

pub use piles::{Deck, Pile};
