//! Resource ledger: health / mana / stamina of one actor.
//!
//! Инвариант: 0 ≤ current ≤ max после каждой мутации current.
//! Max is configuration. Changing it does NOT re-clamp current; the stale value
//! is clamped on the next `Current` mutation.

use bevy::prelude::*;
use serde::{Deserialize, Serialize};

use crate::config::{BotStats, PlayerTuning};
use crate::error::CombatError;

/// Which resource a change targets.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum ResourceKind {
    Health,
    Mana,
    Stamina,
}

impl ResourceKind {
    pub const ALL: [ResourceKind; 3] = [ResourceKind::Health, ResourceKind::Mana, ResourceKind::Stamina];

    fn slot(self) -> usize {
        match self {
            ResourceKind::Health => 0,
            ResourceKind::Mana => 1,
            ResourceKind::Stamina => 2,
        }
    }
}

/// Current value or cap.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum ValueKind {
    Current,
    Maximum,
}

/// One clamped resource.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct ResourcePool {
    pub current: f32,
    pub max: f32,
    /// Added once per whole second while below max
    pub regen_per_sec: f32,
}

impl ResourcePool {
    pub fn new(max: f32) -> Self {
        Self {
            current: max,
            max,
            regen_per_sec: 0.0,
        }
    }

    pub fn with_regen(mut self, regen_per_sec: f32) -> Self {
        self.regen_per_sec = regen_per_sec;
        self
    }

    pub fn fraction(&self) -> f32 {
        if self.max > 0.0 {
            self.current / self.max
        } else {
            0.0
        }
    }
}

/// Value of a resource right after a mutation (payload of `ResourceChanged`).
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct ResourceSnapshot {
    pub kind: ResourceKind,
    pub current: f32,
    pub max: f32,
}

/// Result of `ResourceLedger::change_value`.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct LedgerChange {
    pub snapshot: ResourceSnapshot,
    /// Health just went from > 0 to exactly 0
    pub died: bool,
}

/// Clamped resources of an actor.
///
/// Every successful mutation returns a snapshot, even when nothing changed:
/// UI recomputes unconditionally, so there is no de-duplication.
#[derive(Component, Debug, Clone, PartialEq)]
pub struct ResourceLedger {
    pools: [Option<ResourcePool>; 3],
    regen_accumulator: f32,
    /// Re-armed whenever health rises above zero
    death_armed: bool,
}

impl Default for ResourceLedger {
    fn default() -> Self {
        Self::health_only(100.0)
    }
}

impl ResourceLedger {
    pub fn empty() -> Self {
        Self {
            pools: [None, None, None],
            regen_accumulator: 0.0,
            death_armed: false,
        }
    }

    pub fn health_only(max_health: f32) -> Self {
        Self::empty().with_pool(ResourceKind::Health, ResourcePool::new(max_health))
    }

    pub fn with_pool(mut self, kind: ResourceKind, pool: ResourcePool) -> Self {
        if kind == ResourceKind::Health {
            self.death_armed = pool.current > 0.0;
        }
        self.pools[kind.slot()] = Some(pool);
        self
    }

    pub fn for_player(tuning: &PlayerTuning) -> Self {
        Self::empty()
            .with_pool(
                ResourceKind::Health,
                ResourcePool::new(tuning.max_health).with_regen(tuning.health_regen),
            )
            .with_pool(
                ResourceKind::Mana,
                ResourcePool::new(tuning.max_mana).with_regen(tuning.mana_regen),
            )
            .with_pool(
                ResourceKind::Stamina,
                ResourcePool::new(tuning.max_stamina).with_regen(tuning.stamina_regen),
            )
    }

    pub fn for_bot(stats: &BotStats) -> Self {
        Self::health_only(stats.max_health)
    }

    pub fn pool(&self, kind: ResourceKind) -> Option<&ResourcePool> {
        self.pools[kind.slot()].as_ref()
    }

    pub fn current(&self, kind: ResourceKind) -> Option<f32> {
        self.pool(kind).map(|p| p.current)
    }

    pub fn max(&self, kind: ResourceKind) -> Option<f32> {
        self.pool(kind).map(|p| p.max)
    }

    pub fn health(&self) -> f32 {
        self.current(ResourceKind::Health).unwrap_or(0.0)
    }

    pub fn health_fraction(&self) -> f32 {
        self.pool(ResourceKind::Health).map(|p| p.fraction()).unwrap_or(0.0)
    }

    pub fn is_alive(&self) -> bool {
        self.health() > 0.0
    }

    /// Single mutation entry point.
    ///
    /// - `Maximum`: sets (or adds to) the cap, current left as is.
    /// - `Current`: sets (or adds to) current, then clamps to `[0, max]`.
    ///
    /// Death is reported on exact `0.0` equality (clamping makes overkill
    /// land on exactly zero). A fractional leftover like `1e-7` never counts.
    pub fn change_value(
        &mut self,
        kind: ResourceKind,
        value_kind: ValueKind,
        amount: f32,
        additive: bool,
    ) -> Result<LedgerChange, CombatError> {
        if !amount.is_finite() {
            return Err(CombatError::NonFiniteAmount { kind, amount });
        }

        let pool = self.pools[kind.slot()]
            .as_mut()
            .ok_or(CombatError::MissingResource(kind))?;

        match value_kind {
            ValueKind::Maximum => {
                let new_max = if additive { pool.max + amount } else { amount };
                if new_max < 0.0 {
                    return Err(CombatError::NegativeMaximum { kind, value: new_max });
                }
                pool.max = new_max;
            }
            ValueKind::Current => {
                let raw = if additive { pool.current + amount } else { amount };
                pool.current = raw.clamp(0.0, pool.max);
            }
        }

        let snapshot = ResourceSnapshot {
            kind,
            current: pool.current,
            max: pool.max,
        };

        let mut died = false;
        if kind == ResourceKind::Health && value_kind == ValueKind::Current {
            if snapshot.current == 0.0 {
                died = self.death_armed;
                self.death_armed = false;
            } else if snapshot.current > 0.0 {
                self.death_armed = true;
            }
        }

        Ok(LedgerChange { snapshot, died })
    }

    /// Health decrease. Negative damage is rejected without touching state.
    pub fn apply_damage(&mut self, amount: f32) -> Result<LedgerChange, CombatError> {
        if amount < 0.0 {
            return Err(CombatError::NegativeDamage(amount));
        }
        self.change_value(ResourceKind::Health, ValueKind::Current, -amount, true)
    }

    pub fn heal(&mut self, amount: f32) -> Result<LedgerChange, CombatError> {
        self.change_value(ResourceKind::Health, ValueKind::Current, amount, true)
    }

    /// Advances the 1-second regen accumulator.
    ///
    /// Each whole second adds `regen_per_sec` to every pool below max and
    /// reports one snapshot per regenerated pool.
    pub fn tick_regen(&mut self, delta: f32) -> Vec<ResourceSnapshot> {
        let mut changed = Vec::new();
        self.regen_accumulator += delta;

        while self.regen_accumulator >= 1.0 {
            self.regen_accumulator -= 1.0;

            for kind in ResourceKind::ALL {
                let Some(pool) = self.pools[kind.slot()] else {
                    continue;
                };
                if pool.regen_per_sec <= 0.0 || pool.current >= pool.max {
                    continue;
                }
                if let Ok(change) = self.change_value(kind, ValueKind::Current, pool.regen_per_sec, true) {
                    changed.push(change.snapshot);
                }
            }
        }

        changed
    }

    /// Snapshot of every carried resource (after restore, for UI refresh).
    pub fn broadcast_all(&self) -> Vec<ResourceSnapshot> {
        ResourceKind::ALL
            .iter()
            .filter_map(|&kind| {
                self.pool(kind).map(|p| ResourceSnapshot {
                    kind,
                    current: p.current,
                    max: p.max,
                })
            })
            .collect()
    }

    /// Refills every pool (the `ResetToMax` death policy).
    pub fn reset_to_max(&mut self) {
        for pool in self.pools.iter_mut().flatten() {
            pool.current = pool.max;
        }
        self.death_armed = self.health() > 0.0;
        self.regen_accumulator = 0.0;
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn player_ledger() -> ResourceLedger {
        ResourceLedger::for_player(&PlayerTuning::default())
    }

    #[test]
    fn test_current_is_clamped() {
        let mut ledger = player_ledger();

        let change = ledger
            .change_value(ResourceKind::Mana, ValueKind::Current, 50.0, true)
            .unwrap();
        assert_eq!(change.snapshot.current, 100.0); // Clamp to max

        let change = ledger
            .change_value(ResourceKind::Mana, ValueKind::Current, -250.0, true)
            .unwrap();
        assert_eq!(change.snapshot.current, 0.0); // Clamp to 0

        let change = ledger
            .change_value(ResourceKind::Mana, ValueKind::Current, 42.0, false)
            .unwrap();
        assert_eq!(change.snapshot.current, 42.0);
    }

    #[test]
    fn test_maximum_change_leaves_current_stale() {
        let mut ledger = player_ledger();

        let change = ledger
            .change_value(ResourceKind::Health, ValueKind::Maximum, 40.0, false)
            .unwrap();
        assert_eq!(change.snapshot.max, 40.0);
        assert_eq!(change.snapshot.current, 100.0); // Stale until next Current change

        let change = ledger
            .change_value(ResourceKind::Health, ValueKind::Current, 0.0, true)
            .unwrap();
        assert_eq!(change.snapshot.current, 40.0);

        let change = ledger
            .change_value(ResourceKind::Health, ValueKind::Maximum, 10.0, true)
            .unwrap();
        assert_eq!(change.snapshot.max, 50.0);
        assert_eq!(change.snapshot.current, 40.0);
    }

    #[test]
    fn test_unchanged_value_still_reports() {
        let mut ledger = player_ledger();
        let change = ledger
            .change_value(ResourceKind::Stamina, ValueKind::Current, 0.0, true)
            .unwrap();
        assert_eq!(change.snapshot.current, 100.0);
        assert!(!change.died);
    }

    #[test]
    fn test_negative_damage_is_noop() {
        let mut ledger = ResourceLedger::health_only(100.0);
        let before = ledger.clone();

        let result = ledger.apply_damage(-5.0);
        assert_eq!(result, Err(CombatError::NegativeDamage(-5.0)));
        assert_eq!(ledger, before);
    }

    #[test]
    fn test_three_hits_of_forty() {
        let mut ledger = ResourceLedger::health_only(100.0);
        let mut healths = vec![ledger.health()];
        let mut deaths = 0;

        for _ in 0..3 {
            let change = ledger.apply_damage(40.0).unwrap();
            healths.push(change.snapshot.current);
            if change.died {
                deaths += 1;
            }
        }

        assert_eq!(healths, vec![100.0, 60.0, 20.0, 0.0]);
        assert_eq!(deaths, 1);

        // Zero damage on a corpse: no second death
        let change = ledger.apply_damage(0.0).unwrap();
        assert!(!change.died);
        let change = ledger.apply_damage(10.0).unwrap();
        assert!(!change.died);
    }

    #[test]
    fn test_death_rearms_after_heal() {
        let mut ledger = ResourceLedger::health_only(10.0);
        assert!(ledger.apply_damage(10.0).unwrap().died);

        ledger.heal(5.0).unwrap();
        assert!(ledger.apply_damage(5.0).unwrap().died);
    }

    #[test]
    fn test_fractional_leftover_never_dies() {
        let mut ledger = ResourceLedger::health_only(1.0);
        let change = ledger.apply_damage(0.9999999).unwrap();
        assert!(change.snapshot.current > 0.0);
        assert!(!change.died);
    }

    #[test]
    fn test_invalid_inputs_rejected() {
        let mut ledger = ResourceLedger::health_only(100.0);
        let before = ledger.clone();

        assert!(matches!(
            ledger.change_value(ResourceKind::Health, ValueKind::Current, f32::NAN, true),
            Err(CombatError::NonFiniteAmount { .. })
        ));
        assert!(matches!(
            ledger.change_value(ResourceKind::Health, ValueKind::Maximum, -1.0, false),
            Err(CombatError::NegativeMaximum { .. })
        ));
        assert_eq!(
            ledger.change_value(ResourceKind::Mana, ValueKind::Current, 1.0, true),
            Err(CombatError::MissingResource(ResourceKind::Mana))
        );
        assert_eq!(ledger, before);
    }

    #[test]
    fn test_regen_accumulates_whole_seconds() {
        let mut ledger = player_ledger();
        ledger.change_value(ResourceKind::Health, ValueKind::Current, 50.0, false).unwrap();
        ledger.change_value(ResourceKind::Mana, ValueKind::Current, 10.0, false).unwrap();

        // 0.5 s: nothing yet
        assert!(ledger.tick_regen(0.5).is_empty());

        // 1.0 s total: one regen step for health and mana, stamina is full
        let changed = ledger.tick_regen(0.5);
        let kinds: Vec<_> = changed.iter().map(|s| s.kind).collect();
        assert_eq!(kinds, vec![ResourceKind::Health, ResourceKind::Mana]);
        assert_eq!(ledger.current(ResourceKind::Health), Some(51.0));
        assert_eq!(ledger.current(ResourceKind::Mana), Some(12.0));

        // 2.0 s at once: two steps
        ledger.tick_regen(2.0);
        assert_eq!(ledger.current(ResourceKind::Health), Some(53.0));
    }

    #[test]
    fn test_broadcast_all_lists_carried_pools() {
        let snapshots = player_ledger().broadcast_all();
        assert_eq!(snapshots.len(), 3);

        let snapshots = ResourceLedger::health_only(30.0).broadcast_all();
        assert_eq!(
            snapshots,
            vec![ResourceSnapshot {
                kind: ResourceKind::Health,
                current: 30.0,
                max: 30.0
            }]
        );
    }

    #[test]
    fn test_reset_to_max_refills_and_rearms() {
        let mut ledger = ResourceLedger::health_only(20.0);
        assert!(ledger.apply_damage(20.0).unwrap().died);

        ledger.reset_to_max();
        assert_eq!(ledger.health(), 20.0);
        assert!(ledger.apply_damage(20.0).unwrap().died);
    }

    #[test]
    fn test_random_sequences_stay_in_bounds() {
        use crate::dice::{DeterministicRng, Roller};

        let mut dice = DeterministicRng::new(7);
        let mut ledger = player_ledger();

        for _ in 0..500 {
            let kind = ResourceKind::ALL[(dice.roll() * 2.99) as usize];
            let value_kind = if dice.roll() < 0.2 { ValueKind::Maximum } else { ValueKind::Current };
            let amount = (dice.roll() - 0.5) * 300.0;
            let additive = dice.roll() < 0.7;

            if let Ok(change) = ledger.change_value(kind, value_kind, amount, additive) {
                if value_kind == ValueKind::Current {
                    assert!(change.snapshot.current >= 0.0);
                    assert!(change.snapshot.current <= change.snapshot.max);
                }
            }
        }
    }
}
