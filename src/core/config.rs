//! Content configuration.
//!
//! The engine never loads files. A host hands it an already-read content
//! table, either built in code with the `with_*` helpers or parsed from the
//! JSON layout the game's asset files use:
//!
//! ```json
//! {
//!   "entities": {
//!     "Fairy": { "max_hp": 12, "max_energy": 2, "draw_pile": ["slap", "shield"], "drop_xp": 5 }
//!   },
//!   "cards": {
//!     "slap":   { "kind": "attack",  "cost": 1, "damage": 2 },
//!     "shield": { "kind": "defense", "cost": 1, "defense": 3 },
//!     "venom":  { "kind": "offensive_effect", "cost": 2,
//!                 "effect": { "kind": "poison", "duration": 3, "magnitude": 2 } }
//!   }
//! }
//! ```
//!
//! Entity stat fields are required: a table missing one is rejected with
//! `SetupError::MalformedConfig`. Card fields are all optional at parse time
//! and checked per kind when the catalog builds its templates.

use rustc_hash::FxHashMap;
use serde::{Deserialize, Serialize};

use super::error::{SetupError, SetupResult};

/// Number of cards dealt into a hand at every reshuffle.
pub const HAND_SIZE: usize = 5;

/// Defense cap used when an entity config does not name one.
pub const DEFAULT_MAX_DEFENSE: u32 = 999;

/// Life the player recovers between stages when the config does not say.
pub const DEFAULT_PLAYER_HEALTH_REGAIN: u32 = 8;

fn default_max_defense() -> u32 {
    DEFAULT_MAX_DEFENSE
}

/// Static stats for one kind of combatant.
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct EntityConfig {
    pub max_hp: u32,
    pub max_energy: u32,
    #[serde(default = "default_max_defense")]
    pub max_defense: u32,
    /// Card ids making up the starting draw pile, duplicates allowed.
    #[serde(alias = "draw_pile_card_ids")]
    pub draw_pile: Vec<String>,
    /// Experience granted to the player when this entity is defeated.
    #[serde(default)]
    pub drop_xp: u32,
    /// Life recovered between stages. Only meaningful for the player.
    #[serde(default)]
    pub health_regain: Option<u32>,
}

impl EntityConfig {
    /// Create an entity config with no cards.
    pub fn new(max_hp: u32, max_energy: u32) -> Self {
        Self {
            max_hp,
            max_energy,
            max_defense: DEFAULT_MAX_DEFENSE,
            draw_pile: Vec::new(),
            drop_xp: 0,
            health_regain: None,
        }
    }

    /// Add one copy of a card to the starting draw pile.
    #[must_use]
    pub fn with_card(mut self, card_id: impl Into<String>) -> Self {
        self.draw_pile.push(card_id.into());
        self
    }

    /// Add `count` copies of a card to the starting draw pile.
    #[must_use]
    pub fn with_cards(mut self, card_id: &str, count: usize) -> Self {
        self.draw_pile
            .extend(std::iter::repeat(card_id.to_string()).take(count));
        self
    }

    #[must_use]
    pub fn with_max_defense(mut self, max_defense: u32) -> Self {
        self.max_defense = max_defense;
        self
    }

    #[must_use]
    pub fn with_drop_xp(mut self, xp: u32) -> Self {
        self.drop_xp = xp;
        self
    }

    #[must_use]
    pub fn with_health_regain(mut self, amount: u32) -> Self {
        self.health_regain = Some(amount);
        self
    }
}

/// Status effect parameters carried by an effect card.
#[derive(Clone, Debug, Default, PartialEq, Serialize, Deserialize)]
pub struct EffectConfig {
    pub kind: String,
    #[serde(default)]
    pub duration: Option<u32>,
    #[serde(default)]
    pub magnitude: Option<f32>,
}

/// Raw card row. Which fields are required depends on `kind`:
///
/// | kind               | required            |
/// |--------------------|---------------------|
/// | `attack`           | `cost`, `damage`    |
/// | `defense`          | `cost`, `defense`   |
/// | `offensive_effect` | `cost`, `effect`    |
/// | `defensive_effect` | `cost`, `effect`    |
#[derive(Clone, Debug, Default, PartialEq, Serialize, Deserialize)]
pub struct CardConfig {
    pub kind: String,
    #[serde(default)]
    pub name: Option<String>,
    #[serde(default)]
    pub description: Option<String>,
    #[serde(default)]
    pub cost: Option<u32>,
    #[serde(default)]
    pub damage: Option<u32>,
    #[serde(default)]
    pub defense: Option<u32>,
    #[serde(default)]
    pub effect: Option<EffectConfig>,
}

impl CardConfig {
    pub fn attack(cost: u32, damage: u32) -> Self {
        Self {
            kind: "attack".to_string(),
            cost: Some(cost),
            damage: Some(damage),
            ..Self::default()
        }
    }

    pub fn defense(cost: u32, defense: u32) -> Self {
        Self {
            kind: "defense".to_string(),
            cost: Some(cost),
            defense: Some(defense),
            ..Self::default()
        }
    }

    /// An effect card placed on an opponent.
    pub fn offensive_effect(cost: u32, effect: &str, duration: u32, magnitude: f32) -> Self {
        Self::effect_card("offensive_effect", cost, effect, duration, magnitude)
    }

    /// An effect card placed on its own user.
    pub fn defensive_effect(cost: u32, effect: &str, duration: u32, magnitude: f32) -> Self {
        Self::effect_card("defensive_effect", cost, effect, duration, magnitude)
    }

    fn effect_card(kind: &str, cost: u32, effect: &str, duration: u32, magnitude: f32) -> Self {
        Self {
            kind: kind.to_string(),
            cost: Some(cost),
            effect: Some(EffectConfig {
                kind: effect.to_string(),
                duration: Some(duration),
                magnitude: Some(magnitude),
            }),
            ..Self::default()
        }
    }

    #[must_use]
    pub fn with_name(mut self, name: impl Into<String>) -> Self {
        self.name = Some(name.into());
        self
    }

    #[must_use]
    pub fn with_description(mut self, description: impl Into<String>) -> Self {
        self.description = Some(description.into());
        self
    }
}

/// Complete content table for one or more encounters.
///
/// Read once at encounter setup, never mutated by the engine.
#[derive(Clone, Debug, Default, PartialEq, Serialize, Deserialize)]
pub struct CombatConfig {
    #[serde(default)]
    pub entities: FxHashMap<String, EntityConfig>,
    #[serde(default)]
    pub cards: FxHashMap<String, CardConfig>,
}

impl CombatConfig {
    /// Create an empty configuration.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Parse the JSON content layout described in the module docs.
    pub fn from_json(json: &str) -> SetupResult<Self> {
        let config: CombatConfig = serde_json::from_str(json)?;
        config.validate()?;
        Ok(config)
    }

    /// Add an entity kind.
    #[must_use]
    pub fn with_entity(mut self, id: impl Into<String>, entity: EntityConfig) -> Self {
        self.entities.insert(id.into(), entity);
        self
    }

    /// Add a card template.
    #[must_use]
    pub fn with_card(mut self, id: impl Into<String>, card: CardConfig) -> Self {
        self.cards.insert(id.into(), card);
        self
    }

    /// Look up an entity kind.
    pub fn entity(&self, id: &str) -> SetupResult<&EntityConfig> {
        self.entities
            .get(id)
            .ok_or_else(|| SetupError::UnknownEntityKind(id.to_string()))
    }

    /// Check cross-table consistency of entity stats and draw piles.
    ///
    /// Card rows themselves are checked by `CardCatalog::from_config`.
    pub fn validate(&self) -> SetupResult<()> {
        for (id, entity) in &self.entities {
            if entity.max_hp == 0 {
                return Err(SetupError::MalformedConfig(format!(
                    "entity `{id}` has max_hp 0"
                )));
            }
            if let Some(card) = entity.draw_pile.iter().find(|c| !self.cards.contains_key(*c)) {
                return Err(SetupError::MalformedConfig(format!(
                    "entity `{id}` lists unknown card `{card}`"
                )));
            }
        }
        Ok(())
    }
}
