//! Per-combatant deck: draw, hand, discard and exhaust piles.
//!
//! Every card instance lives in exactly one pile. Moves go through a
//! single private `move_card`, so the total card count only changes when cards
//! are added at construction.
//!
//! ## Usage
//!
//! ```
//! use std::sync::Arc;
//! use deck_combat::cards::{build_card, CardId, CardInstance, InstanceAllocator};
//! use deck_combat::core::{CardConfig, GameRng};
//! use deck_combat::deck::{Deck, Pile};
//!
//! let slap = Arc::new(build_card(CardId::new(0), "slap", &CardConfig::attack(1, 2)).unwrap());
//! let mut ids = InstanceAllocator::new();
//! let cards = (0..7).map(|_| CardInstance::new(ids.alloc(), Arc::clone(&slap))).collect();
//!
//! let mut deck = Deck::new(cards);
//! deck.shuffle_and_allocate(&mut GameRng::new(1));
//!
//! assert_eq!(deck.pile(Pile::Hand).len(), 5);
//! assert_eq!(deck.pile(Pile::Draw).len(), 2);
//! ```

use serde::{Deserialize, Serialize};

use crate::cards::{CardInstance, CardInstanceId};
use crate::core::config::HAND_SIZE;
use crate::core::entity::EntityId;
use crate::core::error::{ActionError, ActionResult};
use crate::core::rng::GameRng;

/// One of the four card containers in a deck.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum Pile {
    Draw,
    Hand,
    Discard,
    Exhaust,
}

impl Pile {
    pub const ALL: [Pile; 4] = [Pile::Draw, Pile::Hand, Pile::Discard, Pile::Exhaust];
}

/// Card piles for a single combatant.
///
/// Order is significant in every pile: the draw pile is dealt from the
/// front, and the hand keeps the order cards were dealt in.
#[derive(Clone, Debug, Default)]
pub struct Deck {
    owner: Option<EntityId>,
    draw_pile: Vec<CardInstance>,
    hand: Vec<CardInstance>,
    discard_pile: Vec<CardInstance>,
    exhaust_pile: Vec<CardInstance>,
    selected: Option<CardInstanceId>,
}

impl Deck {
    /// Create a deck with every card in the draw pile.
    #[must_use]
    pub fn new(cards: Vec<CardInstance>) -> Self {
        Self {
            draw_pile: cards,
            ..Self::default()
        }
    }

    /// Bind the deck to its owner. Only the first binding sticks.
    ///
    /// Returns `false` if the deck was already bound to someone else.
    pub fn set_owner(&mut self, owner: EntityId) -> bool {
        match self.owner {
            None => {
                self.owner = Some(owner);
                true
            }
            Some(existing) => {
                if existing != owner {
                    tracing::warn!(%existing, requested = %owner, "deck owner already bound");
                }
                existing == owner
            }
        }
    }

    #[must_use]
    pub fn owner(&self) -> Option<EntityId> {
        self.owner
    }

    /// Cards in a pile, in order.
    #[must_use]
    pub fn pile(&self, pile: Pile) -> &[CardInstance] {
        match pile {
            Pile::Draw => &self.draw_pile,
            Pile::Hand => &self.hand,
            Pile::Discard => &self.discard_pile,
            Pile::Exhaust => &self.exhaust_pile,
        }
    }

    fn pile_mut(&mut self, pile: Pile) -> &mut Vec<CardInstance> {
        match pile {
            Pile::Draw => &mut self.draw_pile,
            Pile::Hand => &mut self.hand,
            Pile::Discard => &mut self.discard_pile,
            Pile::Exhaust => &mut self.exhaust_pile,
        }
    }

    /// The current hand.
    #[must_use]
    pub fn hand(&self) -> &[CardInstance] {
        &self.hand
    }

    /// Find which pile holds a card.
    #[must_use]
    pub fn location(&self, card: CardInstanceId) -> Option<Pile> {
        Pile::ALL
            .into_iter()
            .find(|&pile| self.pile(pile).iter().any(|c| c.id == card))
    }

    /// Look up a card in the hand.
    #[must_use]
    pub fn hand_card(&self, card: CardInstanceId) -> Option<&CardInstance> {
        self.hand.iter().find(|c| c.id == card)
    }

    #[must_use]
    pub fn selected(&self) -> Option<CardInstanceId> {
        self.selected
    }

    /// The selected card, resolved against the hand.
    #[must_use]
    pub fn selected_card(&self) -> Option<&CardInstance> {
        self.selected.and_then(|id| self.hand_card(id))
    }

    /// Toggle selection of a hand card.
    ///
    /// Selecting the selected card clears the selection; selecting any
    /// other hand card replaces it. Returns the new selection.
    pub fn select_card(&mut self, card: CardInstanceId) -> ActionResult<Option<CardInstanceId>> {
        if self.hand_card(card).is_none() {
            return Err(ActionError::CardNotInHand(card));
        }
        self.selected = if self.selected == Some(card) {
            None
        } else {
            Some(card)
        };
        Ok(self.selected)
    }

    pub fn clear_selection(&mut self) {
        self.selected = None;
    }

    /// Move a card between piles, appending it to the destination.
    ///
    /// Returns `None` if the card is not in `from`.
    fn move_card(&mut self, card: CardInstanceId, from: Pile, to: Pile) -> Option<()> {
        let source = self.pile_mut(from);
        let index = source.iter().position(|c| c.id == card)?;
        let instance = source.remove(index);
        self.pile_mut(to).push(instance);
        if self.selected == Some(card) && to != Pile::Hand {
            self.selected = None;
        }
        Some(())
    }

    /// Move a hand card to the discard pile.
    pub fn discard_card(&mut self, card: CardInstanceId) -> ActionResult<()> {
        self.move_card(card, Pile::Hand, Pile::Discard)
            .ok_or(ActionError::CardNotInHand(card))
    }

    /// Move a hand card to the exhaust pile, out of play for the encounter.
    pub fn exhaust_card(&mut self, card: CardInstanceId) -> ActionResult<()> {
        self.move_card(card, Pile::Hand, Pile::Exhaust)
            .ok_or(ActionError::CardNotInHand(card))
    }

    /// Discard the hand and deal a fresh one.
    ///
    /// If fewer than `HAND_SIZE` cards remain in the draw pile, the discard
    /// pile is merged back in first. The draw pile is shuffled and up to
    /// `HAND_SIZE` cards are dealt from its front. The exhaust pile is never
    /// touched. Returns the number of cards dealt.
    pub fn shuffle_and_allocate(&mut self, rng: &mut GameRng) -> usize {
        self.discard_pile.append(&mut self.hand);
        self.selected = None;

        if self.draw_pile.len() < HAND_SIZE {
            self.draw_pile.append(&mut self.discard_pile);
        }
        rng.shuffle(&mut self.draw_pile);

        let dealt = HAND_SIZE.min(self.draw_pile.len());
        self.hand.extend(self.draw_pile.drain(..dealt));
        dealt
    }

    /// Return every card, exhausted ones included, to the draw pile.
    ///
    /// Used to reset a deck for a fresh encounter.
    pub fn collect_all(&mut self) {
        self.draw_pile.append(&mut self.hand);
        self.draw_pile.append(&mut self.discard_pile);
        self.draw_pile.append(&mut self.exhaust_pile);
        self.selected = None;
    }

    /// Number of cards across all four piles.
    #[must_use]
    pub fn total_cards(&self) -> usize {
        self.draw_pile.len() + self.hand.len() + self.discard_pile.len() + self.exhaust_pile.len()
    }
}
