//! Python bindings for the deck-combat engine.
//!
//! # Quick Start
//!
//! ```python
//! import deck_combat as dc
//!
//! combat = dc.Combat(open("content.json").read(), "Ulisses", [["Fairy", "Fairy"]], seed=42)
//!
//! card = combat.hand()[0]
//! combat.select_card(card.instance)
//! reason = combat.target_entity(combat.enemy_ids()[0])
//!
//! combat.end_turn()
//! combat.run_enemy_turn()
//! ```

use pyo3::prelude::*;

mod py_combat;

pub use py_combat::*;

/// deck_combat: turn-based card combat resolution.
#[pymodule]
fn deck_combat(m: &Bound<'_, PyModule>) -> PyResult<()> {
    m.add_class::<PyHandCard>()?;
    m.add_class::<PyCombat>()?;
    Ok(())
}
