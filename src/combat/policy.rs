//! Enemy card choice.
//!
//! - `EnemyPolicy`: Which hand card an enemy tries next
//! - `FirstInHand`: Always the first card in hand (the game's rule)
//! - `RandomInHand`: Uniform over the hand, for variety and testing

use super::combatant::Combatant;
use crate::cards::CardInstanceId;
use crate::core::GameRng;

/// Chooses the next card an enemy attempts during its turn.
///
/// The controller discards the chosen card whether or not it resolves,
/// so any policy that returns a hand card guarantees the turn ends.
pub trait EnemyPolicy: Send + Sync {
    /// Returns `None` to end this enemy's turn early.
    fn choose_card(&self, enemy: &Combatant, rng: &mut GameRng) -> Option<CardInstanceId>;
}

/// Always plays the first card in hand.
#[derive(Clone, Copy, Debug, Default)]
pub struct FirstInHand;

impl EnemyPolicy for FirstInHand {
    fn choose_card(&self, enemy: &Combatant, _rng: &mut GameRng) -> Option<CardInstanceId> {
        enemy.deck().hand().first().map(|c| c.id)
    }
}

/// Plays a uniformly random hand card.
#[derive(Clone, Copy, Debug, Default)]
pub struct RandomInHand;

impl EnemyPolicy for RandomInHand {
    fn choose_card(&self, enemy: &Combatant, rng: &mut GameRng) -> Option<CardInstanceId> {
        let hand = enemy.deck().hand();
        if hand.is_empty() {
            return None;
        }
        Some(hand[rng.gen_range_usize(0..hand.len())].id)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::cards::{CardCatalog, InstanceAllocator};
    use crate::core::config::{CardConfig, CombatConfig, EntityConfig};
    use crate::core::EntityId;

    fn enemy(cards: usize) -> Combatant {
        let config = CombatConfig::new().with_card("slap", CardConfig::attack(1, 2));
        let catalog = CardCatalog::from_config(&config).unwrap();
        let entity = EntityConfig::new(10, 2).with_cards("slap", cards);
        Combatant::from_config(EntityId::enemy(0), "Fairy", &entity, &catalog, &mut InstanceAllocator::new())
            .unwrap()
    }

    #[test]
    fn test_first_in_hand() {
        let mut rng = GameRng::new(1);
        let mut e = enemy(4);
        assert_eq!(FirstInHand.choose_card(&e, &mut rng), None);

        e.deck_mut().shuffle_and_allocate(&mut rng);
        let first = e.deck().hand()[0].id;
        assert_eq!(FirstInHand.choose_card(&e, &mut rng), Some(first));
    }

    #[test]
    fn test_random_in_hand_stays_in_hand() {
        let mut rng = GameRng::new(9);
        let mut e = enemy(5);
        assert_eq!(RandomInHand.choose_card(&e, &mut rng), None);

        e.deck_mut().shuffle_and_allocate(&mut rng);
        for _ in 0..20 {
            let chosen = RandomInHand.choose_card(&e, &mut rng).unwrap();
            assert!(e.deck().hand_card(chosen).is_some());
        }
    }
}
