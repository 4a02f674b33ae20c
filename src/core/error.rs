//! Error taxonomy.
//!
//! Two families with different lifetimes:
//!
//! - `ActionError`: a single player or AI action was refused. Recoverable:
//!   the engine state is untouched and the caller may re-prompt.
//! - `SetupError`: content or encounter setup is unusable. Fatal for the
//!   encounter being built; nothing is half-constructed.

use thiserror::Error;

use super::entity::EntityId;
use crate::cards::{CardInstanceId, CardKind};

/// A refused combat action. State is unchanged when one of these is returned.
#[derive(Clone, Debug, PartialEq, Eq, Error)]
pub enum ActionError {
    #[error("insufficient energy: card costs {cost}, {available} available")]
    InsufficientEnergy { cost: u32, available: u32 },

    #[error("{kind:?} card cannot target {target}")]
    InvalidTarget { kind: CardKind, target: EntityId },

    #[error("target {0} is not alive")]
    TargetNotAlive(EntityId),

    #[error("{0} is not alive and cannot act")]
    ActorNotAlive(EntityId),

    #[error("card {0} is not in hand")]
    CardNotInHand(CardInstanceId),

    #[error("no card selected")]
    NoCardSelected,

    #[error("action not allowed during {0:?}")]
    WrongPhase(crate::combat::TurnPhase),

    #[error("unknown entity: {0}")]
    UnknownEntity(EntityId),
}

/// Content or encounter setup failure.
#[derive(Clone, Debug, PartialEq, Eq, Error)]
pub enum SetupError {
    #[error("card `{card}` is unusable: {reason}")]
    UnknownCardKind { card: String, reason: String },

    #[error("malformed config: {0}")]
    MalformedConfig(String),

    #[error("no entity `{0}` in config")]
    UnknownEntityKind(String),

    #[error("encounter has no further stages")]
    NoMoreStages,

    #[error("current stage is not cleared")]
    StageNotCleared,
}

impl From<serde_json::Error> for SetupError {
    fn from(err: serde_json::Error) -> Self {
        SetupError::MalformedConfig(err.to_string())
    }
}

/// Result of a single combat action.
pub type ActionResult<T> = std::result::Result<T, ActionError>;

/// Result of content parsing or encounter construction.
pub type SetupResult<T> = std::result::Result<T, SetupError>;
