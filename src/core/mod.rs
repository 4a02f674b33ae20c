//! Core engine types: combatant ids, RNG, configuration, errors.

pub mod entity;
pub mod rng;
pub mod config;
pub mod error;

pub use entity::EntityId;
pub use rng::GameRng;
pub use config::{
    CardConfig, CombatConfig, EffectConfig, EntityConfig, DEFAULT_MAX_DEFENSE,
    DEFAULT_PLAYER_HEALTH_REGAIN, HAND_SIZE,
};
pub use error::{ActionError, ActionResult, SetupError, SetupResult};
