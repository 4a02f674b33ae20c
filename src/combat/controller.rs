//! Combat controller: the turn state machine for one encounter.
//!
//! ## Turn flow
//!
//! ```text
//!            select_card / target_entity
//!                 ┌──────────┐
//!                 ▼          │
//!   ┌──────────────────────────┐   end_turn()    ┌─────────────┐
//!   │        PlayerTurn        │ ──────────────▶ │  EnemyTurn  │
//!   └──────────────────────────┘ ◀────────────── └─────────────┘
//!                                 run_enemy_turn()
//! ```
//!
//! Victory and defeat are queries (`check_win`, `check_defeat`, `outcome`),
//! never states: the presentation layer decides when to leave combat, for
//! example after death animations finish.
//!
//! ## Usage
//!
//! ```
//! use deck_combat::combat::{EncounterBuilder, TurnPhase};
//! use deck_combat::core::{CardConfig, CombatConfig, EntityConfig};
//!
//! let config = CombatConfig::new()
//!     .with_card("slap", CardConfig::attack(1, 2))
//!     .with_entity("Ulisses", EntityConfig::new(40, 3).with_cards("slap", 8))
//!     .with_entity("Fairy", EntityConfig::new(6, 1).with_cards("slap", 5));
//!
//! let mut combat = EncounterBuilder::new(&config)
//!     .player("Ulisses")
//!     .stage(["Fairy"])
//!     .seed(42)
//!     .build()
//!     .unwrap();
//!
//! let card = combat.hand()[0].id;
//! let fairy = combat.enemies()[0].id();
//! combat.select_card(card).unwrap();
//! combat.target_entity(fairy).unwrap();
//!
//! combat.end_turn().unwrap();
//! assert_eq!(combat.phase(), TurnPhase::EnemyTurn);
//! combat.run_enemy_turn().unwrap();
//! assert_eq!(combat.phase(), TurnPhase::PlayerTurn);
//! ```

use serde::{Deserialize, Serialize};

use super::combatant::{Combatant, EntityState};
use super::play::{apply_card, CardPlay, PlayEffect, Target};
use super::policy::{EnemyPolicy, FirstInHand};
use crate::cards::{CardCatalog, CardInstance, CardInstanceId, InstanceAllocator};
use crate::core::config::CombatConfig;
use crate::core::entity::EntityId;
use crate::core::error::{ActionError, ActionResult, SetupError, SetupResult};
use crate::core::rng::GameRng;
use crate::effects::EffectTick;

/// Which side may act.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum TurnPhase {
    PlayerTurn,
    EnemyTurn,
}

/// How an encounter ended.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub enum CombatOutcome {
    /// Every enemy in the current stage is down.
    Victory { xp: u32 },
    Defeat,
}

/// An enemy play the engine refused. The card was discarded anyway.
#[derive(Clone, Debug, PartialEq)]
pub struct RejectedPlay {
    pub actor: EntityId,
    pub card: CardInstanceId,
    pub error: ActionError,
}

/// Everything that happened during a phase transition.
#[derive(Clone, Debug, PartialEq)]
pub struct TurnReport {
    /// Phase the controller is in after the call.
    pub entered: TurnPhase,
    pub plays: Vec<CardPlay>,
    pub rejected: Vec<RejectedPlay>,
    pub ticks: Vec<(EntityId, EffectTick)>,
    /// Combatants that died during the call, in order.
    pub deaths: Vec<EntityId>,
}

impl TurnReport {
    fn new(entered: TurnPhase) -> Self {
        Self {
            entered,
            plays: Vec::new(),
            rejected: Vec::new(),
            ticks: Vec::new(),
            deaths: Vec::new(),
        }
    }

    fn record_tick(&mut self, entity: EntityId, tick: EffectTick, died: bool) {
        if tick.applied > 0 {
            self.ticks.push((entity, tick));
        }
        if died {
            self.deaths.push(entity);
        }
    }
}

/// Builder for an encounter.
///
/// Every stage's enemies are checked against the config up front, so a
/// built controller can always spawn its later stages.
pub struct EncounterBuilder<'a> {
    config: &'a CombatConfig,
    player: Option<String>,
    stages: Vec<Vec<String>>,
    seed: Option<u64>,
}

impl<'a> EncounterBuilder<'a> {
    pub fn new(config: &'a CombatConfig) -> Self {
        Self {
            config,
            player: None,
            stages: Vec::new(),
            seed: None,
        }
    }

    /// Entity kind used for the player.
    pub fn player(mut self, kind: impl Into<String>) -> Self {
        self.player = Some(kind.into());
        self
    }

    /// Append a stage: one wave of enemies, in acting order.
    pub fn stage<I, S>(mut self, enemies: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        self.stages.push(enemies.into_iter().map(Into::into).collect());
        self
    }

    /// Fix the shuffle seed. Without one the RNG is seeded from entropy.
    pub fn seed(mut self, seed: u64) -> Self {
        self.seed = Some(seed);
        self
    }

    /// Build with the standard enemy behaviour.
    pub fn build(self) -> SetupResult<CombatController<FirstInHand>> {
        self.build_with_policy(FirstInHand)
    }

    /// Build with a custom enemy policy.
    pub fn build_with_policy<P: EnemyPolicy>(self, policy: P) -> SetupResult<CombatController<P>> {
        self.config.validate()?;
        let catalog = CardCatalog::from_config(self.config)?;

        let player_kind = self
            .player
            .ok_or_else(|| SetupError::MalformedConfig("encounter has no player".to_string()))?;
        if self.stages.is_empty() || self.stages.iter().any(Vec::is_empty) {
            return Err(SetupError::MalformedConfig(
                "every encounter stage needs at least one enemy".to_string(),
            ));
        }
        for kind in self.stages.iter().flatten() {
            self.config.entity(kind)?;
        }

        let mut ids = InstanceAllocator::new();
        let mut rng = self.seed.map_or_else(GameRng::from_entropy, GameRng::new);

        let mut player = Combatant::from_config(
            EntityId::PLAYER,
            &player_kind,
            self.config.entity(&player_kind)?,
            &catalog,
            &mut ids,
        )?;
        player.deck_mut().shuffle_and_allocate(&mut rng);
        let enemies = spawn_wave(self.config, &catalog, &mut ids, &self.stages[0])?;

        tracing::debug!(
            player = %player_kind,
            enemies = enemies.len(),
            stages = self.stages.len(),
            seed = rng.seed(),
            "encounter started"
        );

        Ok(CombatController {
            config: self.config.clone(),
            catalog,
            stages: self.stages,
            stage: 0,
            phase: TurnPhase::PlayerTurn,
            turn: 1,
            player,
            enemies,
            rng,
            ids,
            policy,
            banked_xp: 0,
        })
    }
}

fn spawn_wave(
    config: &CombatConfig,
    catalog: &CardCatalog,
    ids: &mut InstanceAllocator,
    kinds: &[String],
) -> SetupResult<Vec<Combatant>> {
    kinds
        .iter()
        .enumerate()
        .map(|(index, kind)| {
            Combatant::from_config(EntityId::enemy(index), kind, config.entity(kind)?, catalog, ids)
        })
        .collect()
}

/// Turn state machine orchestrating the player, enemies and card play.
pub struct CombatController<P: EnemyPolicy = FirstInHand> {
    config: CombatConfig,
    catalog: CardCatalog,
    stages: Vec<Vec<String>>,
    stage: usize,
    phase: TurnPhase,
    turn: u32,
    player: Combatant,
    enemies: Vec<Combatant>,
    rng: GameRng,
    ids: InstanceAllocator,
    policy: P,
    banked_xp: u32,
}

impl<P: EnemyPolicy> CombatController<P> {
    // === Queries ===

    #[must_use]
    pub fn phase(&self) -> TurnPhase {
        self.phase
    }

    /// Turn number within the current stage, starting at 1.
    #[must_use]
    pub fn turn_number(&self) -> u32 {
        self.turn
    }

    #[must_use]
    pub fn stage_index(&self) -> usize {
        self.stage
    }

    #[must_use]
    pub fn stage_count(&self) -> usize {
        self.stages.len()
    }

    #[must_use]
    pub fn has_next_stage(&self) -> bool {
        self.stage + 1 < self.stages.len()
    }

    #[must_use]
    pub fn catalog(&self) -> &CardCatalog {
        &self.catalog
    }

    #[must_use]
    pub fn player(&self) -> &Combatant {
        &self.player
    }

    /// Enemies of the current stage in acting order, dead ones included.
    #[must_use]
    pub fn enemies(&self) -> &[Combatant] {
        &self.enemies
    }

    #[must_use]
    pub fn entity(&self, id: EntityId) -> Option<&Combatant> {
        match id.as_enemy_index() {
            None => Some(&self.player),
            Some(index) => self.enemies.get(index),
        }
    }

    /// Snapshot of one combatant for HUD refresh.
    pub fn entity_state(&self, id: EntityId) -> ActionResult<EntityState> {
        self.entity(id)
            .map(Combatant::snapshot)
            .ok_or(ActionError::UnknownEntity(id))
    }

    /// The player's hand.
    #[must_use]
    pub fn hand(&self) -> &[CardInstance] {
        self.player.deck().hand()
    }

    #[must_use]
    pub fn selected_card(&self) -> Option<&CardInstance> {
        self.player.deck().selected_card()
    }

    /// True iff every enemy of the current stage is dead.
    #[must_use]
    pub fn check_win(&self) -> bool {
        self.enemies.iter().all(|enemy| !enemy.is_alive())
    }

    #[must_use]
    pub fn check_defeat(&self) -> bool {
        !self.player.is_alive()
    }

    /// XP from enemies defeated so far, earlier stages included.
    #[must_use]
    pub fn earned_xp(&self) -> u32 {
        self.banked_xp + self.wave_xp()
    }

    fn wave_xp(&self) -> u32 {
        self.enemies
            .iter()
            .filter(|enemy| !enemy.is_alive())
            .map(Combatant::drop_xp)
            .sum()
    }

    /// Defeat takes precedence if both sides are down.
    #[must_use]
    pub fn outcome(&self) -> Option<CombatOutcome> {
        if self.check_defeat() {
            Some(CombatOutcome::Defeat)
        } else if self.check_win() {
            Some(CombatOutcome::Victory {
                xp: self.earned_xp(),
            })
        } else {
            None
        }
    }

    fn ensure_phase(&self, expected: TurnPhase) -> ActionResult<()> {
        if self.phase != expected {
            return Err(ActionError::WrongPhase(self.phase));
        }
        Ok(())
    }

    /// Player input is accepted only during its turn and while it lives.
    fn ensure_player_can_act(&self) -> ActionResult<()> {
        self.ensure_phase(TurnPhase::PlayerTurn)?;
        if !self.player.is_alive() {
            return Err(ActionError::ActorNotAlive(EntityId::PLAYER));
        }
        Ok(())
    }

    // === Player turn ===

    /// Toggle selection of a card in the player's hand.
    pub fn select_card(&mut self, card: CardInstanceId) -> ActionResult<Option<CardInstanceId>> {
        self.ensure_player_can_act()?;
        self.player.deck_mut().select_card(card)
    }

    /// Play the selected card on `target`.
    ///
    /// A rejected attempt changes nothing and keeps the selection, so the
    /// player can pick another target.
    pub fn target_entity(&mut self, target: EntityId) -> ActionResult<CardPlay> {
        self.ensure_player_can_act()?;
        let card = self
            .player
            .deck()
            .selected()
            .ok_or(ActionError::NoCardSelected)?;

        let result = match target.as_enemy_index() {
            None => apply_card(&mut self.player, card, Target::Owner),
            Some(index) => {
                let enemy = self
                    .enemies
                    .get_mut(index)
                    .ok_or(ActionError::UnknownEntity(target))?;
                apply_card(&mut self.player, card, Target::Other(enemy))
            }
        };

        if let Err(error) = &result {
            tracing::debug!(%target, %card, %error, "player play rejected");
        }
        result
    }

    /// End the player's turn and prepare the enemies'.
    ///
    /// Enemies: defense dropped, multipliers reset, hands redealt, effects
    /// ticked. Player: energy refilled, hand redealt, multipliers reset.
    /// A dead player cannot end its turn; the encounter is over.
    pub fn end_turn(&mut self) -> ActionResult<TurnReport> {
        self.ensure_player_can_act()?;
        let mut report = TurnReport::new(TurnPhase::EnemyTurn);

        for enemy in &mut self.enemies {
            enemy.reset_defense();
            enemy.reset_multipliers();
            enemy.deck_mut().shuffle_and_allocate(&mut self.rng);
            let was_alive = enemy.is_alive();
            let tick = enemy.tick_effects();
            report.record_tick(enemy.id(), tick, was_alive && !enemy.is_alive());
        }

        self.player.restore_energy();
        self.player.deck_mut().shuffle_and_allocate(&mut self.rng);
        self.player.reset_multipliers();

        self.phase = TurnPhase::EnemyTurn;
        tracing::debug!(turn = self.turn, deaths = report.deaths.len(), "enemy turn begins");
        Ok(report)
    }

    // === Enemy turn ===

    /// Let every enemy act, then hand the turn back to the player.
    ///
    /// Each living enemy keeps trying cards chosen by the policy while it
    /// has energy and cards in hand. A chosen card is discarded whether or
    /// not it resolved, so the loop always ends.
    pub fn run_enemy_turn(&mut self) -> ActionResult<TurnReport> {
        self.ensure_phase(TurnPhase::EnemyTurn)?;
        let mut report = TurnReport::new(TurnPhase::PlayerTurn);

        for index in 0..self.enemies.len() {
            loop {
                let enemy = &self.enemies[index];
                if !enemy.is_alive() || enemy.energy() == 0 || enemy.deck().hand().is_empty() {
                    break;
                }
                let Some(card) = self.policy.choose_card(enemy, &mut self.rng) else {
                    break;
                };
                let Some(targets_self) = enemy
                    .deck()
                    .hand_card(card)
                    .map(|c| c.kind().targets_self())
                else {
                    tracing::warn!(enemy = %enemy.id(), %card, "policy chose a card outside the hand");
                    break;
                };

                let enemy = &mut self.enemies[index];
                if enemy.deck().selected() != Some(card) && enemy.deck_mut().select_card(card).is_err() {
                    break;
                }
                let result = if targets_self {
                    apply_card(enemy, card, Target::Owner)
                } else {
                    apply_card(enemy, card, Target::Other(&mut self.player))
                };

                match result {
                    Ok(play) => {
                        if let PlayEffect::Hit(hit) = play.effect {
                            if hit.killed {
                                report.deaths.push(play.target);
                            }
                        }
                        report.plays.push(play);
                    }
                    Err(error) => {
                        tracing::debug!(enemy = %enemy.id(), %card, %error, "enemy play skipped");
                        report.rejected.push(RejectedPlay {
                            actor: enemy.id(),
                            card,
                            error,
                        });
                        if enemy.deck_mut().discard_card(card).is_err() {
                            break;
                        }
                    }
                }
            }
        }

        self.player.reset_defense();
        let was_alive = self.player.is_alive();
        let tick = self.player.tick_effects();
        report.record_tick(EntityId::PLAYER, tick, was_alive && !self.player.is_alive());

        for enemy in &mut self.enemies {
            enemy.restore_energy();
        }

        self.phase = TurnPhase::PlayerTurn;
        self.turn += 1;
        tracing::debug!(
            turn = self.turn,
            plays = report.plays.len(),
            skipped = report.rejected.len(),
            "player turn begins"
        );
        Ok(report)
    }

    // === Stages ===

    /// Replace the current wave with the next stage's enemies.
    ///
    /// The player recovers its `health_regain` (capped at max life), loses
    /// its defense and effects, and starts a fresh turn with a new hand.
    ///
    /// Fails with `NoMoreStages` after the last stage, and with
    /// `StageNotCleared` while an enemy of the current wave lives or the
    /// player is dead. Failures leave everything unchanged.
    pub fn advance_stage(&mut self) -> SetupResult<()> {
        let next = self.stage + 1;
        if next >= self.stages.len() {
            return Err(SetupError::NoMoreStages);
        }
        if !self.check_win() || self.check_defeat() {
            return Err(SetupError::StageNotCleared);
        }
        let kinds = &self.stages[next];
        let enemies = spawn_wave(&self.config, &self.catalog, &mut self.ids, kinds)?;

        self.banked_xp += self.wave_xp();
        self.enemies = enemies;
        self.stage = next;

        let regain = self.player.health_regain();
        let recovered = self.player.recover(regain);
        self.player.purge_effects();
        self.player.reset_multipliers();
        self.player.restore_energy();
        self.player.deck_mut().shuffle_and_allocate(&mut self.rng);

        self.phase = TurnPhase::PlayerTurn;
        self.turn = 1;
        tracing::debug!(stage = next, recovered, enemies = self.enemies.len(), "stage advanced");
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::core::config::{CardConfig, EntityConfig};
    use crate::deck::Pile;

    fn config() -> CombatConfig {
        CombatConfig::new()
            .with_card("slap", CardConfig::attack(1, 3))
            .with_card("shield", CardConfig::defense(1, 2))
            .with_card("venom", CardConfig::offensive_effect(1, "poison", 2, 2.0))
            .with_card("toxin", CardConfig::offensive_effect(1, "poison", 2, 5.0))
            .with_entity("Frail", EntityConfig::new(4, 3).with_cards("slap", 5))
            .with_entity("Hexer", EntityConfig::new(10, 1).with_cards("toxin", 5))
            .with_entity(
                "Ulisses",
                EntityConfig::new(40, 3).with_cards("slap", 8).with_health_regain(8),
            )
            .with_entity("Knight", EntityConfig::new(40, 3).with_cards("shield", 5))
            .with_entity("Fairy", EntityConfig::new(6, 2).with_cards("slap", 5).with_drop_xp(5))
            .with_entity("Guard", EntityConfig::new(10, 2).with_cards("shield", 5).with_drop_xp(3))
    }

    fn combat(stages: &[&[&str]]) -> CombatController {
        combat_as("Ulisses", stages)
    }

    fn combat_as(player: &str, stages: &[&[&str]]) -> CombatController {
        let config = config();
        let mut builder = EncounterBuilder::new(&config).player(player).seed(7);
        for stage in stages {
            builder = builder.stage(stage.iter().copied());
        }
        builder.build().unwrap()
    }

    fn play_first(combat: &mut CombatController, kind_self: bool, target: EntityId) -> ActionResult<CardPlay> {
        let card = combat
            .hand()
            .iter()
            .find(|c| c.kind().targets_self() == kind_self)
            .map(|c| c.id)
            .unwrap();
        if combat.selected_card().map(|c| c.id) != Some(card) {
            combat.select_card(card)?;
        }
        combat.target_entity(target)
    }

    #[test]
    fn test_initial_state() {
        let c = combat(&[&["Fairy", "Fairy"]]);
        assert_eq!(c.phase(), TurnPhase::PlayerTurn);
        assert_eq!(c.turn_number(), 1);
        assert_eq!(c.hand().len(), 5);
        assert_eq!(c.enemies().len(), 2);
        assert_eq!(c.enemies()[1].id(), EntityId(2));
        assert!(!c.check_win());
        assert_eq!(c.outcome(), None);
    }

    #[test]
    fn test_builder_rejects_bad_plans() {
        let config = config();
        assert!(matches!(
            EncounterBuilder::new(&config).stage(["Fairy"]).build(),
            Err(SetupError::MalformedConfig(_))
        ));
        assert!(matches!(
            EncounterBuilder::new(&config).player("Ulisses").build(),
            Err(SetupError::MalformedConfig(_))
        ));
        assert_eq!(
            EncounterBuilder::new(&config)
                .player("Ulisses")
                .stage(["Fairy"])
                .stage(["Dragon"])
                .build()
                .err(),
            Some(SetupError::UnknownEntityKind("Dragon".to_string()))
        );
    }

    #[test]
    fn test_target_without_selection() {
        let mut c = combat(&[&["Fairy"]]);
        assert_eq!(c.target_entity(EntityId(1)), Err(ActionError::NoCardSelected));
    }

    #[test]
    fn test_invalid_target_keeps_selection() {
        let mut c = combat(&[&["Fairy"]]);
        let err = play_first(&mut c, false, EntityId::PLAYER).unwrap_err();
        assert!(matches!(err, ActionError::InvalidTarget { .. }));

        let selected = c.selected_card().map(|card| card.id);
        assert!(selected.is_some());

        let play = c.target_entity(EntityId(1)).unwrap();
        assert_eq!(play.instance, selected.unwrap());
        assert_eq!(c.selected_card(), None);
        assert_eq!(c.enemies()[0].life(), 3);
    }

    #[test]
    fn test_unknown_target() {
        let mut c = combat(&[&["Fairy"]]);
        assert_eq!(
            play_first(&mut c, false, EntityId(9)),
            Err(ActionError::UnknownEntity(EntityId(9)))
        );
        assert!(c.entity_state(EntityId(9)).is_err());
    }

    #[test]
    fn test_actions_locked_to_phase() {
        let mut c = combat(&[&["Fairy"]]);
        assert!(matches!(c.run_enemy_turn(), Err(ActionError::WrongPhase(TurnPhase::PlayerTurn))));

        c.end_turn().unwrap();
        assert_eq!(c.end_turn().err(), Some(ActionError::WrongPhase(TurnPhase::EnemyTurn)));
        let card = c.hand()[0].id;
        assert_eq!(c.select_card(card), Err(ActionError::WrongPhase(TurnPhase::EnemyTurn)));
    }

    #[test]
    fn test_end_turn_prepares_enemies() {
        let mut c = combat_as("Knight", &[&["Guard"]]);
        play_first(&mut c, true, EntityId::PLAYER).unwrap();
        assert_eq!(c.player().energy(), 2);

        c.end_turn().unwrap();

        assert_eq!(c.phase(), TurnPhase::EnemyTurn);
        assert_eq!(c.player().energy(), 3);
        assert_eq!(c.player().damage_multiplier(), 1.0);
        assert_eq!(c.enemies()[0].deck().hand().len(), 5);
        assert_eq!(c.enemies()[0].defense(), 0);
    }

    #[test]
    fn test_enemy_turn_spends_energy_then_returns() {
        let mut c = combat(&[&["Guard"]]);
        c.end_turn().unwrap();

        let report = c.run_enemy_turn().unwrap();

        assert_eq!(report.entered, TurnPhase::PlayerTurn);
        assert_eq!(report.plays.len(), 2);
        assert!(report.rejected.is_empty());
        assert_eq!(c.enemies()[0].defense(), 4);
        assert_eq!(c.enemies()[0].energy(), 2);
        assert_eq!(c.enemies()[0].deck().pile(Pile::Discard).len(), 2);
        assert_eq!(c.phase(), TurnPhase::PlayerTurn);
        assert_eq!(c.turn_number(), 2);
    }

    #[test]
    fn test_player_defense_drops_after_enemy_turn() {
        let mut c = combat_as("Knight", &[&["Fairy"]]);
        play_first(&mut c, true, EntityId::PLAYER).unwrap();
        assert_eq!(c.player().defense(), 2);

        c.end_turn().unwrap();
        c.run_enemy_turn().unwrap();

        // Two slaps of 3: 2 absorbed, 4 to life.
        assert_eq!(c.player().life(), 36);
        assert_eq!(c.player().defense(), 0);
    }

    #[test]
    fn test_poisoned_enemy_ticks_at_end_turn() {
        let config = config().with_entity(
            "Witch",
            EntityConfig::new(40, 3).with_cards("venom", 5),
        );
        let mut c = EncounterBuilder::new(&config)
            .player("Witch")
            .stage(["Fairy"])
            .seed(3)
            .build()
            .unwrap();

        play_first(&mut c, false, EntityId(1)).unwrap();
        let report = c.end_turn().unwrap();

        assert_eq!(c.enemies()[0].life(), 4);
        assert_eq!(report.ticks.len(), 1);
        assert_eq!(report.ticks[0].1.hits, 1);
        assert_eq!(c.enemies()[0].offensive_effects()[0].duration, 1);
    }

    #[test]
    fn test_win_and_xp() {
        let mut c = combat(&[&["Fairy"]]);
        play_first(&mut c, false, EntityId(1)).unwrap();
        play_first(&mut c, false, EntityId(1)).unwrap();

        assert!(c.check_win());
        assert_eq!(c.outcome(), Some(CombatOutcome::Victory { xp: 5 }));
        assert_eq!(
            play_first(&mut c, false, EntityId(1)),
            Err(ActionError::TargetNotAlive(EntityId(1)))
        );
    }

    #[test]
    fn test_advance_stage() {
        let mut c = combat(&[&["Fairy", "Fairy"], &["Guard", "Fairy"]]);
        play_first(&mut c, false, EntityId(1)).unwrap();
        play_first(&mut c, false, EntityId(1)).unwrap();
        c.end_turn().unwrap();
        c.run_enemy_turn().unwrap();
        let hurt = c.player().life();
        assert_eq!(hurt, 34);
        play_first(&mut c, false, EntityId(2)).unwrap();
        play_first(&mut c, false, EntityId(2)).unwrap();
        assert!(c.check_win());

        assert!(c.has_next_stage());
        c.advance_stage().unwrap();

        assert_eq!(c.stage_index(), 1);
        assert_eq!(c.enemies().len(), 2);
        assert_eq!(c.player().life(), (hurt + 8).min(40));
        assert_eq!(c.phase(), TurnPhase::PlayerTurn);
        assert_eq!(c.turn_number(), 1);
        assert_eq!(c.earned_xp(), 10);

        assert_eq!(c.advance_stage(), Err(SetupError::NoMoreStages));
        assert_eq!(c.stage_index(), 1);
    }

    #[test]
    fn test_entity_state() {
        let c = combat(&[&["Fairy"]]);
        let state = c.entity_state(EntityId(1)).unwrap();
        assert_eq!(state.kind, "Fairy");
        assert_eq!(state.life, 6);
        assert_eq!(c.entity_state(EntityId::PLAYER).unwrap().hand, 5);
    }

    #[test]
    fn test_poisoned_player_cannot_act() {
        let mut c = combat_as("Frail", &[&["Hexer", "Guard"], &["Fairy"]]);
        c.end_turn().unwrap();

        let report = c.run_enemy_turn().unwrap();

        assert_eq!(report.deaths, vec![EntityId::PLAYER]);
        assert_eq!(c.phase(), TurnPhase::PlayerTurn);
        assert!(c.check_defeat());

        let guard_before = c.entity_state(EntityId(2)).unwrap();
        let card = c.hand()[0].id;
        assert_eq!(c.select_card(card), Err(ActionError::ActorNotAlive(EntityId::PLAYER)));
        assert_eq!(c.target_entity(EntityId(2)), Err(ActionError::ActorNotAlive(EntityId::PLAYER)));
        assert_eq!(c.end_turn().err(), Some(ActionError::ActorNotAlive(EntityId::PLAYER)));
        assert_eq!(c.entity_state(EntityId(2)).unwrap(), guard_before);
        assert!(!c.check_win());
        assert_eq!(c.outcome(), Some(CombatOutcome::Defeat));
        assert_eq!(c.advance_stage(), Err(SetupError::StageNotCleared));
    }

    #[test]
    fn test_advance_requires_cleared_stage() {
        let mut c = combat(&[&["Fairy"], &["Guard"]]);
        play_first(&mut c, false, EntityId(1)).unwrap();

        assert_eq!(c.advance_stage(), Err(SetupError::StageNotCleared));
        assert_eq!(c.stage_index(), 0);
        assert_eq!(c.enemies()[0].life(), 3);

        play_first(&mut c, false, EntityId(1)).unwrap();
        c.advance_stage().unwrap();
        assert_eq!(c.enemies()[0].kind(), "Guard");
    }
}
