//! Status effect engine.
//!
//! Effects are pure data plus apply/decay rules. The engine does not know
//! what a combatant is: anything implementing [`Affected`] can carry them.

mod status;

pub use status::{
    apply_effect, tick_effects, Affected, EffectList, EffectOutcome, EffectTick, StatusEffect,
    StatusKind,
};
