//! Dice for probabilistic combat rules (stagger, boss decisions).
//!
//! Rules take `&mut dyn Roller` instead of a concrete RNG so tests can script
//! the exact sequence of rolls.

use bevy::prelude::*;
use rand::{Rng, SeedableRng};
use rand_chacha::ChaCha8Rng;
use std::collections::VecDeque;

/// Source of uniform rolls in `[0, 1]`.
///
/// Chance checks compare with `roll <= chance`, so a chance of `1.0` always
/// passes and `0.0` passes only on an exact zero roll.
pub trait Roller {
    fn roll(&mut self) -> f32;
}

impl Roller for ChaCha8Rng {
    fn roll(&mut self) -> f32 {
        self.gen::<f32>()
    }
}

/// Deterministic RNG (seeded)
pub struct DeterministicRng {
    pub rng: ChaCha8Rng,
    pub seed: u64,
}

impl DeterministicRng {
    pub fn new(seed: u64) -> Self {
        Self {
            rng: ChaCha8Rng::seed_from_u64(seed),
            seed,
        }
    }
}

impl Roller for DeterministicRng {
    fn roll(&mut self) -> f32 {
        self.rng.roll()
    }
}

/// Dice resource used by every probabilistic combat system.
///
/// Seeded ChaCha8 in normal runs; tests swap in `ScriptedRolls`.
#[derive(Resource)]
pub struct CombatDice {
    roller: Box<dyn Roller + Send + Sync>,
}

impl CombatDice {
    pub fn new(roller: impl Roller + Send + Sync + 'static) -> Self {
        Self {
            roller: Box::new(roller),
        }
    }

    pub fn seeded(seed: u64) -> Self {
        Self::new(DeterministicRng::new(seed))
    }

    pub fn scripted(rolls: impl IntoIterator<Item = f32>) -> Self {
        Self::new(ScriptedRolls::new(rolls))
    }
}

impl Roller for CombatDice {
    fn roll(&mut self) -> f32 {
        self.roller.roll()
    }
}

/// Pre-recorded rolls, replayed in order.
///
/// Once the script runs out every roll returns `fallback`.
#[derive(Debug, Clone)]
pub struct ScriptedRolls {
    rolls: VecDeque<f32>,
    fallback: f32,
    consumed: usize,
}

impl Default for ScriptedRolls {
    fn default() -> Self {
        Self::new([])
    }
}

impl ScriptedRolls {
    pub fn new(rolls: impl IntoIterator<Item = f32>) -> Self {
        Self {
            rolls: rolls.into_iter().collect(),
            fallback: 1.0,
            consumed: 0,
        }
    }

    pub fn with_fallback(mut self, fallback: f32) -> Self {
        self.fallback = fallback;
        self
    }

    /// How many rolls were taken so far (scripted or fallback).
    pub fn consumed(&self) -> usize {
        self.consumed
    }

    pub fn remaining(&self) -> usize {
        self.rolls.len()
    }
}

impl Roller for ScriptedRolls {
    fn roll(&mut self) -> f32 {
        self.consumed += 1;
        self.rolls.pop_front().unwrap_or(self.fallback)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_scripted_rolls_replay_then_fallback() {
        let mut dice = ScriptedRolls::new([0.1, 0.9]).with_fallback(0.5);
        assert_eq!(dice.roll(), 0.1);
        assert_eq!(dice.roll(), 0.9);
        assert_eq!(dice.roll(), 0.5);
        assert_eq!(dice.consumed(), 3);
        assert_eq!(dice.remaining(), 0);
    }

    #[test]
    fn test_deterministic_rng_same_seed_same_rolls() {
        let mut a = DeterministicRng::new(42);
        let mut b = DeterministicRng::new(42);
        for _ in 0..16 {
            let roll = a.roll();
            assert!((0.0..=1.0).contains(&roll));
            assert_eq!(roll, b.roll());
        }
    }

    #[test]
    fn test_combat_dice_delegates() {
        let mut dice = CombatDice::scripted([0.25]);
        assert_eq!(dice.roll(), 0.25);
        assert_eq!(dice.roll(), 1.0); // Fallback: every chance < 1 fails

        let mut a = CombatDice::seeded(9);
        let mut b = DeterministicRng::new(9);
        assert_eq!(a.roll(), b.roll());
    }
}
