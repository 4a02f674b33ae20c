//! Card catalog: every template an encounter can use.
//!
//! Built once from `CombatConfig`. Any unusable card row aborts the build,
//! so an encounter never starts with half-valid content.

use std::sync::Arc;

use rustc_hash::FxHashMap;

use super::definition::{build_card, Card, CardId};
use super::instance::{CardInstance, InstanceAllocator};
use crate::core::config::CombatConfig;
use crate::core::error::{SetupError, SetupResult};

/// Registry of card templates, addressable by id or content key.
///
/// ## Example
///
/// ```
/// use deck_combat::cards::CardCatalog;
/// use deck_combat::core::{CardConfig, CombatConfig};
///
/// let config = CombatConfig::new()
///     .with_card("slap", CardConfig::attack(1, 2))
///     .with_card("shield", CardConfig::defense(1, 3));
///
/// let catalog = CardCatalog::from_config(&config).unwrap();
/// assert_eq!(catalog.len(), 2);
/// assert_eq!(catalog.by_key("slap").unwrap().energy_cost, 1);
/// ```
#[derive(Clone, Debug, Default)]
pub struct CardCatalog {
    cards: FxHashMap<CardId, Arc<Card>>,
    keys: FxHashMap<String, CardId>,
}

impl CardCatalog {
    /// Create a new empty catalog.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Build every card row in `config`.
    ///
    /// Ids are assigned in key order so equal configs yield equal ids.
    pub fn from_config(config: &CombatConfig) -> SetupResult<Self> {
        let mut keys: Vec<&String> = config.cards.keys().collect();
        keys.sort();

        let mut catalog = Self::new();
        for key in keys {
            let id = CardId::new(catalog.cards.len() as u32);
            let card = build_card(id, key, &config.cards[key])?;
            catalog.register(card);
        }

        tracing::debug!(cards = catalog.len(), "card catalog built");
        Ok(catalog)
    }

    /// Register a template. A later card with the same key takes over the
    /// key lookup.
    pub fn register(&mut self, card: Card) {
        self.keys.insert(card.key.clone(), card.id);
        self.cards.insert(card.id, Arc::new(card));
    }

    #[must_use]
    pub fn by_key(&self, key: &str) -> Option<&Arc<Card>> {
        self.keys.get(key).and_then(|id| self.cards.get(id))
    }

    #[must_use]
    pub fn len(&self) -> usize {
        self.cards.len()
    }

    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.cards.is_empty()
    }

    /// Create one instance per key, in order, for a starting draw pile.
    pub fn instantiate(
        &self,
        keys: &[String],
        ids: &mut InstanceAllocator,
    ) -> SetupResult<Vec<CardInstance>> {
        keys.iter()
            .map(|key| {
                let card = self.by_key(key).ok_or_else(|| {
                    SetupError::MalformedConfig(format!("draw pile lists unknown card `{key}`"))
                })?;
                Ok(CardInstance::new(ids.alloc(), Arc::clone(card)))
            })
            .collect()
    }
}
