//! Status effects: buffs and debuffs ticked once per owner turn.
//!
//! A `StatusEffect` is plain data. [`apply_effect`] mutates whatever it is
//! attached to through the [`Affected`] trait, then counts one turn off its
//! duration. Effects on a dead target are inert: no mutation, no countdown.
//!
//! | kind         | per tick                                         |
//! |--------------|--------------------------------------------------|
//! | `Poison`     | lose `magnitude` life (floor 0), then fade by 1  |
//! | `Regen`      | gain `magnitude` life (capped at max)            |
//! | `Strength`   | `damage_multiplier += magnitude`                 |
//! | `Weakness`   | `damage_multiplier -= magnitude`                 |
//! | `Absorption` | `absorption_multiplier += magnitude`             |

use serde::{Deserialize, Serialize};
use smallvec::SmallVec;

/// Kind of status effect.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum StatusKind {
    Poison,
    Regen,
    Strength,
    Weakness,
    Absorption,
}

impl StatusKind {
    /// Parse the lowercase name used in content tables.
    #[must_use]
    pub fn parse(name: &str) -> Option<Self> {
        match name {
            "poison" => Some(StatusKind::Poison),
            "regen" => Some(StatusKind::Regen),
            "strength" => Some(StatusKind::Strength),
            "weakness" => Some(StatusKind::Weakness),
            "absorption" => Some(StatusKind::Absorption),
            _ => None,
        }
    }

    /// Does this effect change life (as opposed to a multiplier)?
    #[must_use]
    pub const fn touches_life(self) -> bool {
        matches!(self, StatusKind::Poison | StatusKind::Regen)
    }
}

/// A status effect instance attached to one combatant.
#[derive(Clone, Copy, Debug, PartialEq, Serialize, Deserialize)]
pub struct StatusEffect {
    pub kind: StatusKind,
    /// Remaining ticks. Removed from its list once this reaches 0.
    pub duration: u32,
    pub magnitude: f32,
}

impl StatusEffect {
    #[must_use]
    pub const fn new(kind: StatusKind, duration: u32, magnitude: f32) -> Self {
        Self {
            kind,
            duration,
            magnitude,
        }
    }

    #[must_use]
    pub const fn is_expired(&self) -> bool {
        self.duration == 0
    }

    /// Whole life points moved by a life-affecting tick.
    fn life_points(&self) -> u32 {
        self.magnitude.max(0.0) as u32
    }
}

/// Ordered effect list owned by a combatant.
pub type EffectList = SmallVec<[StatusEffect; 4]>;

/// Anything a status effect can act on.
pub trait Affected {
    fn is_alive(&self) -> bool;

    /// Remove life, floored at 0. Returns the life actually lost.
    fn lose_life(&mut self, amount: u32) -> u32;

    /// Add life, capped at max. Returns the life actually gained.
    fn gain_life(&mut self, amount: u32) -> u32;

    fn adjust_damage_multiplier(&mut self, delta: f32);

    fn adjust_absorption_multiplier(&mut self, delta: f32);
}

/// What one application did to its target.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq)]
pub struct EffectOutcome {
    pub life_lost: u32,
    pub life_gained: u32,
    /// Hit feedback for the presentation layer (poison damage landed).
    pub hit: bool,
}

/// Apply one effect to `target` and count down its duration.
///
/// Returns `None` when the target is dead, in which case nothing changed.
pub fn apply_effect<T: Affected + ?Sized>(
    effect: &mut StatusEffect,
    target: &mut T,
) -> Option<EffectOutcome> {
    if !target.is_alive() || effect.is_expired() {
        return None;
    }

    let mut outcome = EffectOutcome::default();
    match effect.kind {
        StatusKind::Poison => {
            outcome.hit = true;
            outcome.life_lost = target.lose_life(effect.life_points());
            effect.magnitude = (effect.magnitude - 1.0).max(0.0);
        }
        StatusKind::Regen => {
            outcome.life_gained = target.gain_life(effect.life_points());
        }
        StatusKind::Strength => target.adjust_damage_multiplier(effect.magnitude),
        StatusKind::Weakness => target.adjust_damage_multiplier(-effect.magnitude),
        StatusKind::Absorption => target.adjust_absorption_multiplier(effect.magnitude),
    }
    effect.duration -= 1;

    Some(outcome)
}

/// Summary of ticking a whole effect list.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct EffectTick {
    pub applied: u32,
    pub expired: u32,
    pub life_lost: u32,
    pub life_gained: u32,
    pub hits: u32,
}

impl EffectTick {
    /// Fold another tick summary into this one.
    pub fn merge(&mut self, other: EffectTick) {
        self.applied += other.applied;
        self.expired += other.expired;
        self.life_lost += other.life_lost;
        self.life_gained += other.life_gained;
        self.hits += other.hits;
    }
}

/// Apply every effect in `list` in order, then prune the expired ones.
pub fn tick_effects<T: Affected + ?Sized>(list: &mut EffectList, target: &mut T) -> EffectTick {
    let mut tick = EffectTick::default();

    for effect in list.iter_mut() {
        if let Some(outcome) = apply_effect(effect, target) {
            tick.applied += 1;
            tick.life_lost += outcome.life_lost;
            tick.life_gained += outcome.life_gained;
            if outcome.hit {
                tick.hits += 1;
            }
            tracing::trace!(kind = ?effect.kind, remaining = effect.duration, "status effect ticked");
        }
    }

    let before = list.len();
    list.retain(|effect| !effect.is_expired());
    tick.expired = (before - list.len()) as u32;

    tick
}

#[cfg(test)]
mod tests {
    use super::*;
    use smallvec::smallvec;

    #[derive(Debug)]
    struct Dummy {
        life: u32,
        max_life: u32,
        damage_multiplier: f32,
        absorption_multiplier: f32,
    }

    impl Dummy {
        fn new(life: u32, max_life: u32) -> Self {
            Self {
                life,
                max_life,
                damage_multiplier: 1.0,
                absorption_multiplier: 1.0,
            }
        }
    }

    impl Affected for Dummy {
        fn is_alive(&self) -> bool {
            self.life > 0
        }

        fn lose_life(&mut self, amount: u32) -> u32 {
            let lost = amount.min(self.life);
            self.life -= lost;
            lost
        }

        fn gain_life(&mut self, amount: u32) -> u32 {
            let gained = amount.min(self.max_life - self.life);
            self.life += gained;
            gained
        }

        fn adjust_damage_multiplier(&mut self, delta: f32) {
            self.damage_multiplier += delta;
        }

        fn adjust_absorption_multiplier(&mut self, delta: f32) {
            self.absorption_multiplier += delta;
        }
    }

    #[test]
    fn test_parse_kind() {
        assert_eq!(StatusKind::parse("poison"), Some(StatusKind::Poison));
        assert_eq!(StatusKind::parse("absorption"), Some(StatusKind::Absorption));
        assert_eq!(StatusKind::parse("Poison"), None);
        assert_eq!(StatusKind::parse("burn"), None);
    }

    #[test]
    fn test_poison_floors_at_zero_and_fades() {
        let mut target = Dummy::new(3, 10);
        let mut poison = StatusEffect::new(StatusKind::Poison, 3, 5.0);

        let outcome = apply_effect(&mut poison, &mut target).unwrap();

        assert_eq!(target.life, 0);
        assert_eq!(outcome.life_lost, 3);
        assert!(outcome.hit);
        assert_eq!(poison.duration, 2);
        assert_eq!(poison.magnitude, 4.0);
    }

    #[test]
    fn test_regen_caps_at_max() {
        let mut target = Dummy::new(9, 10);
        let mut regen = StatusEffect::new(StatusKind::Regen, 2, 4.0);

        let outcome = apply_effect(&mut regen, &mut target).unwrap();

        assert_eq!(target.life, 10);
        assert_eq!(outcome.life_gained, 1);
        assert!(!outcome.hit);
    }

    #[test]
    fn test_multiplier_effects() {
        let mut target = Dummy::new(10, 10);

        apply_effect(&mut StatusEffect::new(StatusKind::Strength, 1, 0.5), &mut target);
        assert_eq!(target.damage_multiplier, 1.5);

        apply_effect(&mut StatusEffect::new(StatusKind::Weakness, 1, 0.25), &mut target);
        assert_eq!(target.damage_multiplier, 1.25);

        apply_effect(&mut StatusEffect::new(StatusKind::Absorption, 1, 1.0), &mut target);
        assert_eq!(target.absorption_multiplier, 2.0);
    }

    #[test]
    fn test_dead_target_is_inert() {
        let mut target = Dummy::new(0, 10);
        let mut regen = StatusEffect::new(StatusKind::Regen, 2, 4.0);

        assert_eq!(apply_effect(&mut regen, &mut target), None);
        assert_eq!(target.life, 0);
        assert_eq!(regen.duration, 2);
    }

    #[test]
    fn test_removed_after_exactly_duration_ticks() {
        let mut target = Dummy::new(100, 100);
        let mut list: EffectList = smallvec![
            StatusEffect::new(StatusKind::Poison, 3, 1.0),
            StatusEffect::new(StatusKind::Strength, 1, 0.5),
        ];

        let first = tick_effects(&mut list, &mut target);
        assert_eq!(first.applied, 2);
        assert_eq!(first.expired, 1);
        assert_eq!(list.len(), 1);

        tick_effects(&mut list, &mut target);
        assert_eq!(list.len(), 1);

        let third = tick_effects(&mut list, &mut target);
        assert_eq!(third.expired, 1);
        assert!(list.is_empty());
    }

    #[test]
    fn test_tick_order_stops_at_death() {
        let mut target = Dummy::new(2, 10);
        let mut list: EffectList = smallvec![
            StatusEffect::new(StatusKind::Poison, 2, 5.0),
            StatusEffect::new(StatusKind::Regen, 2, 5.0),
        ];

        let tick = tick_effects(&mut list, &mut target);

        assert_eq!(target.life, 0);
        assert_eq!(tick.applied, 1);
        assert_eq!(tick.hits, 1);
        // The regen never ran, so it has not counted down either.
        assert_eq!(list[1].duration, 2);
    }

    #[test]
    fn test_tick_merge() {
        let mut total = EffectTick::default();
        total.merge(EffectTick { applied: 2, expired: 1, life_lost: 3, life_gained: 0, hits: 1 });
        total.merge(EffectTick { applied: 1, expired: 0, life_lost: 0, life_gained: 2, hits: 0 });
        assert_eq!(total.applied, 3);
        assert_eq!(total.life_lost, 3);
        assert_eq!(total.life_gained, 2);
    }
}
