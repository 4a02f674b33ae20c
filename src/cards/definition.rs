//! Card templates - static card data.
//!
//! A `Card` is an immutable template built once from content config. The
//! variant set is closed: every card is an attack, a defense, or a status
//! effect aimed at an opponent or at its own user. Instances in a deck
//! share the template and differ only by identity.

use serde::{Deserialize, Serialize};

use crate::core::config::CardConfig;
use crate::core::entity::EntityId;
use crate::core::error::{SetupError, SetupResult};
use crate::effects::{StatusEffect, StatusKind};

/// Catalog-assigned identifier for a card template.
///
/// This identifies the "type" of card (e.g. "Tapa"), not a specific
/// copy of it in a deck.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
pub struct CardId(pub u32);

impl CardId {
    #[must_use]
    pub const fn new(id: u32) -> Self {
        Self(id)
    }

    #[must_use]
    pub const fn raw(self) -> u32 {
        self.0
    }
}

impl std::fmt::Display for CardId {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "Card({})", self.0)
    }
}

/// Card category, used for targeting rules.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum CardKind {
    Attack,
    Defense,
    OffensiveEffect,
    DefensiveEffect,
}

impl CardKind {
    /// Parse the kind name used in content tables.
    #[must_use]
    pub fn parse(name: &str) -> Option<Self> {
        match name {
            "attack" => Some(CardKind::Attack),
            "defense" => Some(CardKind::Defense),
            "offensive_effect" => Some(CardKind::OffensiveEffect),
            "defensive_effect" => Some(CardKind::DefensiveEffect),
            _ => None,
        }
    }

    /// Must this card be played on its own user?
    ///
    /// Defense and defensive effects target the user; everything else
    /// targets someone else.
    #[must_use]
    pub const fn targets_self(self) -> bool {
        matches!(self, CardKind::Defense | CardKind::DefensiveEffect)
    }
}

/// What a card does when it resolves.
#[derive(Clone, Copy, Debug, PartialEq, Serialize, Deserialize)]
pub enum CardAction {
    Attack { damage: u32 },
    Defense { defense: u32 },
    /// Effect appended to the target's offensive list.
    OffensiveEffect(StatusEffect),
    /// Effect appended to the user's defensive list.
    DefensiveEffect(StatusEffect),
}

impl CardAction {
    #[must_use]
    pub const fn kind(&self) -> CardKind {
        match self {
            CardAction::Attack { .. } => CardKind::Attack,
            CardAction::Defense { .. } => CardKind::Defense,
            CardAction::OffensiveEffect(_) => CardKind::OffensiveEffect,
            CardAction::DefensiveEffect(_) => CardKind::DefensiveEffect,
        }
    }
}

/// Immutable card template.
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
pub struct Card {
    pub id: CardId,
    /// Content-table key this card was built from.
    pub key: String,
    pub name: String,
    pub description: String,
    pub energy_cost: u32,
    pub action: CardAction,
}

impl Card {
    #[must_use]
    pub const fn kind(&self) -> CardKind {
        self.action.kind()
    }

    /// Is `target` a legal target when `owner` plays this card?
    ///
    /// Pure predicate: attacks and offensive effects need someone other
    /// than the owner, defenses and defensive effects need the owner.
    #[must_use]
    pub fn check_target(&self, owner: EntityId, target: EntityId) -> bool {
        self.kind().targets_self() == (owner == target)
    }
}

/// Build a card template from its config row.
///
/// Fails with `UnknownCardKind` if the kind is not recognised or the row
/// lacks a field the kind requires.
pub fn build_card(id: CardId, key: &str, config: &CardConfig) -> SetupResult<Card> {
    let unusable = |reason: String| SetupError::UnknownCardKind {
        card: key.to_string(),
        reason,
    };

    let kind = CardKind::parse(&config.kind)
        .ok_or_else(|| unusable(format!("unknown kind `{}`", config.kind)))?;
    let energy_cost = config
        .cost
        .ok_or_else(|| unusable("missing `cost`".to_string()))?;

    let action = match kind {
        CardKind::Attack => CardAction::Attack {
            damage: config
                .damage
                .ok_or_else(|| unusable("attack card missing `damage`".to_string()))?,
        },
        CardKind::Defense => CardAction::Defense {
            defense: config
                .defense
                .ok_or_else(|| unusable("defense card missing `defense`".to_string()))?,
        },
        CardKind::OffensiveEffect | CardKind::DefensiveEffect => {
            let effect = config
                .effect
                .as_ref()
                .ok_or_else(|| unusable("effect card missing `effect`".to_string()))?;
            let status_kind = StatusKind::parse(&effect.kind)
                .ok_or_else(|| unusable(format!("unknown status effect `{}`", effect.kind)))?;
            let duration = effect
                .duration
                .ok_or_else(|| unusable("effect missing `duration`".to_string()))?;
            if duration == 0 {
                return Err(unusable("effect `duration` must be at least 1".to_string()));
            }
            let magnitude = effect
                .magnitude
                .ok_or_else(|| unusable("effect missing `magnitude`".to_string()))?;
            if !magnitude.is_finite() || magnitude < 0.0 {
                return Err(unusable(format!("effect `magnitude` {magnitude} must be a non-negative number")));
            }

            let status = StatusEffect::new(status_kind, duration, magnitude);
            if kind == CardKind::OffensiveEffect {
                CardAction::OffensiveEffect(status)
            } else {
                CardAction::DefensiveEffect(status)
            }
        }
    };

    Ok(Card {
        id,
        key: key.to_string(),
        name: config.name.clone().unwrap_or_else(|| key.to_string()),
        description: config.description.clone().unwrap_or_default(),
        energy_cost,
        action,
    })
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::core::config::EffectConfig;

    #[test]
    fn test_card_id() {
        let id = CardId::new(42);
        assert_eq!(id.raw(), 42);
        assert_eq!(format!("{}", id), "Card(42)");
    }

    #[test]
    fn test_build_attack() {
        let config = CardConfig::attack(1, 3)
            .with_name("Tapa")
            .with_description("Estapeia o inimigo");
        let card = build_card(CardId::new(0), "slap", &config).unwrap();

        assert_eq!(card.kind(), CardKind::Attack);
        assert_eq!(card.name, "Tapa");
        assert_eq!(card.energy_cost, 1);
        assert_eq!(card.action, CardAction::Attack { damage: 3 });
    }

    #[test]
    fn test_name_defaults_to_key() {
        let card = build_card(CardId::new(0), "shield", &CardConfig::defense(1, 2)).unwrap();
        assert_eq!(card.name, "shield");
        assert!(card.description.is_empty());
    }

    #[test]
    fn test_build_effect_cards() {
        let venom = build_card(
            CardId::new(0),
            "venom",
            &CardConfig::offensive_effect(2, "poison", 3, 2.0),
        )
        .unwrap();
        assert_eq!(
            venom.action,
            CardAction::OffensiveEffect(StatusEffect::new(StatusKind::Poison, 3, 2.0))
        );

        let rally = build_card(
            CardId::new(1),
            "rally",
            &CardConfig::defensive_effect(1, "strength", 1, 0.5),
        )
        .unwrap();
        assert_eq!(rally.kind(), CardKind::DefensiveEffect);
    }

    #[test]
    fn test_missing_fields_are_unknown_kind() {
        let mut no_damage = CardConfig::attack(1, 3);
        no_damage.damage = None;
        assert!(matches!(
            build_card(CardId::new(0), "slap", &no_damage),
            Err(SetupError::UnknownCardKind { .. })
        ));

        let mut no_duration = CardConfig::offensive_effect(1, "poison", 2, 1.0);
        no_duration.effect = Some(EffectConfig {
            kind: "poison".to_string(),
            duration: None,
            magnitude: Some(1.0),
        });
        let err = build_card(CardId::new(0), "venom", &no_duration).unwrap_err();
        assert!(err.to_string().contains("duration"));

        let mut no_cost = CardConfig::defense(1, 2);
        no_cost.cost = None;
        assert!(build_card(CardId::new(0), "shield", &no_cost).is_err());
    }

    #[test]
    fn test_unknown_kinds_rejected() {
        let config = CardConfig {
            kind: "curse".to_string(),
            cost: Some(1),
            ..CardConfig::default()
        };
        assert!(build_card(CardId::new(0), "hex", &config).is_err());

        let burn = CardConfig::offensive_effect(1, "burn", 2, 1.0);
        assert!(build_card(CardId::new(0), "burn", &burn).is_err());
    }

    #[test]
    fn test_negative_magnitude_rejected() {
        let config = CardConfig::defensive_effect(1, "absorption", 2, -1.0);
        assert!(build_card(CardId::new(0), "flimsy", &config).is_err());
    }

    #[test]
    fn test_targeting_symmetry() {
        let owner = EntityId::PLAYER;
        let enemy = EntityId::enemy(0);

        let attack = build_card(CardId::new(0), "slap", &CardConfig::attack(1, 2)).unwrap();
        assert!(!attack.check_target(owner, owner));
        assert!(attack.check_target(owner, enemy));

        let defense = build_card(CardId::new(1), "shield", &CardConfig::defense(1, 2)).unwrap();
        assert!(defense.check_target(owner, owner));
        assert!(!defense.check_target(owner, enemy));

        let venom = build_card(
            CardId::new(2),
            "venom",
            &CardConfig::offensive_effect(1, "poison", 2, 1.0),
        )
        .unwrap();
        assert!(!venom.check_target(owner, owner));
        assert!(venom.check_target(enemy, owner));

        let regen = build_card(
            CardId::new(3),
            "regen",
            &CardConfig::defensive_effect(1, "regen", 2, 1.0),
        )
        .unwrap();
        assert!(regen.check_target(enemy, enemy));
        assert!(!regen.check_target(enemy, owner));
    }
}
