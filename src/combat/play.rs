//! Card resolution: validating and applying a played card.
//!
//! Validation happens in a fixed order and fully before any mutation, so a
//! rejected play leaves both combatants exactly as they were:
//!
//! 1. the card is in the owner's hand (`CardNotInHand`)
//! 2. the owner can pay for it (`InsufficientEnergy`)
//! 3. the target suits the card kind (`InvalidTarget`)
//! 4. the target is alive (`TargetNotAlive`)

use serde::{Deserialize, Serialize};

use super::combatant::{Combatant, HitReport};
use crate::cards::{Card, CardAction, CardId, CardInstanceId};
use crate::core::entity::EntityId;
use crate::core::error::{ActionError, ActionResult};
use crate::effects::StatusKind;

/// Who a card is played on.
///
/// The owner can never be borrowed twice, so self-targeting is spelled out
/// instead of passing the owner as its own target.
#[derive(Debug)]
pub enum Target<'a> {
    Owner,
    Other(&'a mut Combatant),
}

/// What a resolved card did.
#[derive(Clone, Copy, Debug, PartialEq, Serialize, Deserialize)]
pub enum PlayEffect {
    Hit(HitReport),
    Shielded { gained: u32 },
    StatusApplied { kind: StatusKind, offensive: bool },
}

/// Report of a successfully resolved card, for HUD refresh and animation
/// hooks. The card is already in the owner's discard pile.
#[derive(Clone, Copy, Debug, PartialEq, Serialize, Deserialize)]
pub struct CardPlay {
    pub actor: EntityId,
    pub target: EntityId,
    pub card: CardId,
    pub instance: CardInstanceId,
    pub energy_spent: u32,
    pub effect: PlayEffect,
}

/// Can `owner` pay for `card`?
pub fn check_energy(card: &Card, owner: &Combatant) -> ActionResult<()> {
    if owner.energy() < card.energy_cost {
        return Err(ActionError::InsufficientEnergy {
            cost: card.energy_cost,
            available: owner.energy(),
        });
    }
    Ok(())
}

/// Is `target` still in the fight?
pub fn check_alive(target: &Combatant) -> ActionResult<()> {
    if !target.is_alive() {
        return Err(ActionError::TargetNotAlive(target.id()));
    }
    Ok(())
}

/// Damage after the attacker's and target's multipliers, rounded down.
#[must_use]
pub fn effective_damage(damage: u32, attacker: &Combatant, target: &Combatant) -> u32 {
    let scaled =
        damage as f32 * attacker.damage_multiplier() / target.absorption_multiplier();
    if scaled.is_finite() {
        scaled.floor().max(0.0) as u32
    } else {
        0
    }
}

/// Play the hand card `instance` from `owner` onto `target`.
///
/// On success the cost is paid, the effect applied, and the card moved
/// from hand to discard with the selection cleared. On failure nothing
/// changes.
pub fn apply_card(
    owner: &mut Combatant,
    instance: CardInstanceId,
    mut target: Target<'_>,
) -> ActionResult<CardPlay> {
    let card = owner
        .deck()
        .hand_card(instance)
        .map(|c| std::sync::Arc::clone(&c.card))
        .ok_or(ActionError::CardNotInHand(instance))?;

    check_energy(&card, owner)?;

    let target_id = match &target {
        Target::Owner => owner.id(),
        Target::Other(other) => other.id(),
    };
    if !card.check_target(owner.id(), target_id) {
        return Err(ActionError::InvalidTarget {
            kind: card.kind(),
            target: target_id,
        });
    }
    match &target {
        Target::Owner => check_alive(owner)?,
        Target::Other(other) => check_alive(other)?,
    }

    owner.spend_energy(card.energy_cost);

    let effect = match (card.action, &mut target) {
        (CardAction::Attack { damage }, Target::Other(other)) => {
            let dealt = effective_damage(damage, owner, other);
            PlayEffect::Hit(other.take_hit(dealt))
        }
        (CardAction::Defense { defense }, Target::Owner) => PlayEffect::Shielded {
            gained: owner.gain_defense(defense),
        },
        (CardAction::OffensiveEffect(status), Target::Other(other)) => {
            other.add_offensive_effect(status);
            PlayEffect::StatusApplied {
                kind: status.kind,
                offensive: true,
            }
        }
        (CardAction::DefensiveEffect(status), Target::Owner) => {
            owner.add_defensive_effect(status);
            PlayEffect::StatusApplied {
                kind: status.kind,
                offensive: false,
            }
        }
        // check_target ruled every other pairing out above.
        (_, _) => unreachable!("card kind and target already validated"),
    };

    owner.deck_mut().discard_card(instance)?;
    owner.deck_mut().clear_selection();

    let play = CardPlay {
        actor: owner.id(),
        target: target_id,
        card: card.id,
        instance,
        energy_spent: card.energy_cost,
        effect,
    };
    tracing::debug!(
        actor = %play.actor,
        target = %play.target,
        card = %card.name,
        effect = ?play.effect,
        "card applied"
    );
    Ok(play)
}
