//! Combatants: the stat container every fighter shares.
//!
//! Life, energy and defense are each clamped to `0..=max` by the mutation
//! methods here; nothing outside this module writes them directly.

use serde::{Deserialize, Serialize};

use crate::cards::{CardCatalog, InstanceAllocator};
use crate::core::config::{EntityConfig, DEFAULT_PLAYER_HEALTH_REGAIN};
use crate::core::entity::EntityId;
use crate::core::error::SetupResult;
use crate::deck::{Deck, Pile};
use crate::effects::{tick_effects, Affected, EffectList, EffectTick, StatusEffect};

/// Which side a combatant fights on.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum Role {
    Player,
    Enemy,
}

/// What an attack did to its target.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct HitReport {
    /// Effective damage after multipliers.
    pub damage: u32,
    /// Portion soaked up by defense.
    pub absorbed: u32,
    pub life_lost: u32,
    pub killed: bool,
}

/// A fighter in an encounter: stats, multipliers, effects and deck.
#[derive(Clone, Debug)]
pub struct Combatant {
    id: EntityId,
    kind: String,
    role: Role,
    max_life: u32,
    current_life: u32,
    max_energy: u32,
    current_energy: u32,
    max_defense: u32,
    current_defense: u32,
    damage_multiplier: f32,
    absorption_multiplier: f32,
    deck: Deck,
    offensive_effects: EffectList,
    defensive_effects: EffectList,
    drop_xp: u32,
    health_regain: u32,
}

impl Combatant {
    /// Create a combatant at full life and energy with all of its cards in
    /// the draw pile.
    ///
    /// The role follows the id: `EntityId::PLAYER` is the player, anything
    /// else an enemy.
    pub fn from_config(
        id: EntityId,
        kind: &str,
        config: &EntityConfig,
        catalog: &CardCatalog,
        ids: &mut InstanceAllocator,
    ) -> SetupResult<Self> {
        let role = if id.is_player() { Role::Player } else { Role::Enemy };
        let health_regain = match role {
            Role::Player => config.health_regain.unwrap_or(DEFAULT_PLAYER_HEALTH_REGAIN),
            Role::Enemy => config.health_regain.unwrap_or(0),
        };

        let mut deck = Deck::new(catalog.instantiate(&config.draw_pile, ids)?);
        deck.set_owner(id);

        Ok(Self {
            id,
            kind: kind.to_string(),
            role,
            max_life: config.max_hp,
            current_life: config.max_hp,
            max_energy: config.max_energy,
            current_energy: config.max_energy,
            max_defense: config.max_defense,
            current_defense: 0,
            damage_multiplier: 1.0,
            absorption_multiplier: 1.0,
            deck,
            offensive_effects: EffectList::new(),
            defensive_effects: EffectList::new(),
            drop_xp: config.drop_xp,
            health_regain,
        })
    }

    // === Identity ===

    #[must_use]
    pub fn id(&self) -> EntityId {
        self.id
    }

    /// Content key this combatant was built from (e.g. "Fairy").
    #[must_use]
    pub fn kind(&self) -> &str {
        &self.kind
    }

    #[must_use]
    pub fn role(&self) -> Role {
        self.role
    }

    #[must_use]
    pub fn is_alive(&self) -> bool {
        self.current_life > 0
    }

    // === Stats ===

    #[must_use]
    pub fn life(&self) -> u32 {
        self.current_life
    }

    #[must_use]
    pub fn max_life(&self) -> u32 {
        self.max_life
    }

    #[must_use]
    pub fn energy(&self) -> u32 {
        self.current_energy
    }

    #[must_use]
    pub fn max_energy(&self) -> u32 {
        self.max_energy
    }

    #[must_use]
    pub fn defense(&self) -> u32 {
        self.current_defense
    }

    #[must_use]
    pub fn max_defense(&self) -> u32 {
        self.max_defense
    }

    #[must_use]
    pub fn damage_multiplier(&self) -> f32 {
        self.damage_multiplier
    }

    #[must_use]
    pub fn absorption_multiplier(&self) -> f32 {
        self.absorption_multiplier
    }

    #[must_use]
    pub fn drop_xp(&self) -> u32 {
        self.drop_xp
    }

    #[must_use]
    pub fn health_regain(&self) -> u32 {
        self.health_regain
    }

    #[must_use]
    pub fn deck(&self) -> &Deck {
        &self.deck
    }

    pub fn deck_mut(&mut self) -> &mut Deck {
        &mut self.deck
    }

    #[must_use]
    pub fn offensive_effects(&self) -> &[StatusEffect] {
        &self.offensive_effects
    }

    #[must_use]
    pub fn defensive_effects(&self) -> &[StatusEffect] {
        &self.defensive_effects
    }

    // === Mutation ===

    /// Spend energy. Callers check affordability first.
    pub(crate) fn spend_energy(&mut self, cost: u32) {
        self.current_energy = self.current_energy.saturating_sub(cost);
    }

    pub fn restore_energy(&mut self) {
        self.current_energy = self.max_energy;
    }

    pub fn reset_defense(&mut self) {
        self.current_defense = 0;
    }

    pub fn reset_multipliers(&mut self) {
        self.damage_multiplier = 1.0;
        self.absorption_multiplier = 1.0;
    }

    /// Add defense, capped at max. Returns the defense actually gained.
    pub fn gain_defense(&mut self, amount: u32) -> u32 {
        let before = self.current_defense;
        self.current_defense = self.current_defense.saturating_add(amount).min(self.max_defense);
        self.current_defense - before
    }

    /// Take `damage` already scaled by multipliers.
    ///
    /// Defense absorbs first; only the shortfall reaches life.
    pub fn take_hit(&mut self, damage: u32) -> HitReport {
        let mut report = HitReport {
            damage,
            ..HitReport::default()
        };

        if self.current_defense < damage {
            report.absorbed = self.current_defense;
            report.life_lost = self.lose_life(damage - self.current_defense);
            self.current_defense = 0;
        } else {
            report.absorbed = damage;
            self.current_defense -= damage;
        }

        if report.life_lost > 0 && !self.is_alive() {
            report.killed = true;
            self.on_death();
        }
        report
    }

    /// Attach an effect placed by an opponent.
    pub fn add_offensive_effect(&mut self, effect: StatusEffect) {
        self.offensive_effects.push(effect);
    }

    /// Attach an effect placed by this combatant on itself.
    pub fn add_defensive_effect(&mut self, effect: StatusEffect) {
        self.defensive_effects.push(effect);
    }

    /// Apply offensive then defensive effects once, pruning expired ones.
    ///
    /// A combatant that dies during the tick loses all remaining effects.
    pub fn tick_effects(&mut self) -> EffectTick {
        let mut offensive = std::mem::take(&mut self.offensive_effects);
        let mut tick = tick_effects(&mut offensive, self);
        self.offensive_effects = offensive;

        let mut defensive = std::mem::take(&mut self.defensive_effects);
        tick.merge(tick_effects(&mut defensive, self));
        self.defensive_effects = defensive;

        if !self.is_alive() {
            self.on_death();
        }
        tick
    }

    /// Drop every status effect.
    pub fn purge_effects(&mut self) {
        self.offensive_effects.clear();
        self.defensive_effects.clear();
    }

    fn on_death(&mut self) {
        tracing::debug!(entity = %self.id, kind = %self.kind, "combatant died");
        self.purge_effects();
        self.deck.clear_selection();
    }

    /// Recover life between stages, capped at max, and drop defense.
    ///
    /// Returns the life actually recovered. Dead combatants stay dead.
    pub fn recover(&mut self, amount: u32) -> u32 {
        self.current_defense = 0;
        if !self.is_alive() {
            return 0;
        }
        self.gain_life(amount)
    }

    /// Reset to the freshly-built state: full life and energy, no defense,
    /// neutral multipliers, no effects, every card back in the draw pile.
    pub fn restore(&mut self) {
        self.current_life = self.max_life;
        self.current_energy = self.max_energy;
        self.current_defense = 0;
        self.reset_multipliers();
        self.purge_effects();
        self.deck.collect_all();
    }

    /// Snapshot for HUDs and bindings.
    #[must_use]
    pub fn snapshot(&self) -> EntityState {
        EntityState {
            id: self.id,
            kind: self.kind.clone(),
            role: self.role,
            alive: self.is_alive(),
            life: self.current_life,
            max_life: self.max_life,
            energy: self.current_energy,
            max_energy: self.max_energy,
            defense: self.current_defense,
            max_defense: self.max_defense,
            damage_multiplier: self.damage_multiplier,
            absorption_multiplier: self.absorption_multiplier,
            draw_pile: self.deck.pile(Pile::Draw).len(),
            hand: self.deck.pile(Pile::Hand).len(),
            discard_pile: self.deck.pile(Pile::Discard).len(),
            exhaust_pile: self.deck.pile(Pile::Exhaust).len(),
            offensive_effects: self.offensive_effects.to_vec(),
            defensive_effects: self.defensive_effects.to_vec(),
        }
    }
}

impl Affected for Combatant {
    fn is_alive(&self) -> bool {
        Combatant::is_alive(self)
    }

    fn lose_life(&mut self, amount: u32) -> u32 {
        let lost = amount.min(self.current_life);
        self.current_life -= lost;
        lost
    }

    fn gain_life(&mut self, amount: u32) -> u32 {
        let before = self.current_life;
        self.current_life = self.current_life.saturating_add(amount).min(self.max_life);
        self.current_life - before
    }

    fn adjust_damage_multiplier(&mut self, delta: f32) {
        self.damage_multiplier += delta;
    }

    fn adjust_absorption_multiplier(&mut self, delta: f32) {
        self.absorption_multiplier += delta;
    }
}

/// Point-in-time view of a combatant.
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
pub struct EntityState {
    pub id: EntityId,
    pub kind: String,
    pub role: Role,
    pub alive: bool,
    pub life: u32,
    pub max_life: u32,
    pub energy: u32,
    pub max_energy: u32,
    pub defense: u32,
    pub max_defense: u32,
    pub damage_multiplier: f32,
    pub absorption_multiplier: f32,
    pub draw_pile: usize,
    pub hand: usize,
    pub discard_pile: usize,
    pub exhaust_pile: usize,
    pub offensive_effects: Vec<StatusEffect>,
    pub defensive_effects: Vec<StatusEffect>,
}
