//! Combat bindings for Python.

use pyo3::exceptions::PyValueError;
use pyo3::prelude::*;

use crate::combat::{CombatController, CombatOutcome, EncounterBuilder, TurnPhase};
use crate::core::{CombatConfig, EntityId};
use crate::cards::CardInstanceId;

fn value_error(e: impl std::fmt::Display) -> PyErr {
    PyErr::new::<PyValueError, _>(format!("{}", e))
}

/// One card in the player's hand.
#[pyclass(name = "HandCard")]
#[derive(Clone, Debug)]
pub struct PyHandCard {
    #[pyo3(get)]
    pub instance: u32,
    #[pyo3(get)]
    pub key: String,
    #[pyo3(get)]
    pub name: String,
    #[pyo3(get)]
    pub description: String,
    #[pyo3(get)]
    pub cost: u32,
    #[pyo3(get)]
    pub targets_self: bool,
}

#[pymethods]
impl PyHandCard {
    fn __repr__(&self) -> String {
        format!("HandCard(#{}, {:?}, cost={})", self.instance, self.key, self.cost)
    }
}

/// Python wrapper for a combat encounter.
#[pyclass(name = "Combat")]
pub struct PyCombat {
    inner: CombatController,
}

#[pymethods]
impl PyCombat {
    /// Start an encounter.
    ///
    /// # Arguments
    /// - config_json: Content table with "cards" and "entities"
    /// - player: Entity kind used for the player
    /// - stages: One list of enemy kinds per stage
    /// - seed: Shuffle seed; random when omitted
    #[new]
    #[pyo3(signature = (config_json, player, stages, seed = None))]
    fn new(config_json: &str, player: &str, stages: Vec<Vec<String>>, seed: Option<u64>) -> PyResult<Self> {
        let config = CombatConfig::from_json(config_json).map_err(value_error)?;
        let mut builder = EncounterBuilder::new(&config).player(player);
        for stage in stages {
            builder = builder.stage(stage);
        }
        if let Some(seed) = seed {
            builder = builder.seed(seed);
        }
        let inner = builder.build().map_err(value_error)?;
        Ok(Self { inner })
    }

    /// "player" or "enemy".
    #[getter]
    fn phase(&self) -> &'static str {
        match self.inner.phase() {
            TurnPhase::PlayerTurn => "player",
            TurnPhase::EnemyTurn => "enemy",
        }
    }

    #[getter]
    fn turn_number(&self) -> u32 {
        self.inner.turn_number()
    }

    #[getter]
    fn stage(&self) -> usize {
        self.inner.stage_index()
    }

    fn hand(&self) -> Vec<PyHandCard> {
        self.inner
            .hand()
            .iter()
            .map(|c| PyHandCard {
                instance: c.id.0,
                key: c.card.key.clone(),
                name: c.card.name.clone(),
                description: c.card.description.clone(),
                cost: c.energy_cost(),
                targets_self: c.kind().targets_self(),
            })
            .collect()
    }

    fn selected_card(&self) -> Option<u32> {
        self.inner.selected_card().map(|c| c.id.0)
    }

    /// Enemy ids of the current stage, dead ones included.
    fn enemy_ids(&self) -> Vec<u32> {
        self.inner.enemies().iter().map(|e| e.id().raw()).collect()
    }

    /// Toggle selection of a hand card. Returns the new selection.
    fn select_card(&mut self, instance: u32) -> PyResult<Option<u32>> {
        self.inner
            .select_card(CardInstanceId(instance))
            .map(|selected| selected.map(|id| id.0))
            .map_err(value_error)
    }

    /// Play the selected card on an entity (0 is the player).
    ///
    /// Returns None on success, or the reason the play was rejected.
    fn target_entity(&mut self, entity: u32) -> Option<String> {
        self.inner
            .target_entity(EntityId(entity))
            .err()
            .map(|e| e.to_string())
    }

    fn end_turn(&mut self) -> PyResult<()> {
        self.inner.end_turn().map(|_| ()).map_err(value_error)
    }

    fn run_enemy_turn(&mut self) -> PyResult<()> {
        self.inner.run_enemy_turn().map(|_| ()).map_err(value_error)
    }

    fn check_win(&self) -> bool {
        self.inner.check_win()
    }

    fn check_defeat(&self) -> bool {
        self.inner.check_defeat()
    }

    /// "victory", "defeat" or None while the fight goes on.
    fn outcome(&self) -> Option<&'static str> {
        self.inner.outcome().map(|outcome| match outcome {
            CombatOutcome::Victory { .. } => "victory",
            CombatOutcome::Defeat => "defeat",
        })
    }

    #[getter]
    fn earned_xp(&self) -> u32 {
        self.inner.earned_xp()
    }

    fn has_next_stage(&self) -> bool {
        self.inner.has_next_stage()
    }

    fn advance_stage(&mut self) -> PyResult<()> {
        self.inner.advance_stage().map_err(value_error)
    }

    /// JSON snapshot of one entity.
    fn entity_state(&self, entity: u32) -> PyResult<String> {
        let state = self.inner.entity_state(EntityId(entity)).map_err(value_error)?;
        serde_json::to_string(&state).map_err(value_error)
    }

    fn __repr__(&self) -> String {
        format!(
            "Combat(stage={}, turn={}, phase={})",
            self.inner.stage_index(),
            self.inner.turn_number(),
            self.phase()
        )
    }
}
