//! Bug boss encounter AI
//!
//! ECS ответственность:
//! - Decision engine (`BossBrain`): bands, combo queue, rage, charge, watchdog
//! - Hit frames → DamageRequest, acid spawning, charge contacts
//!
//! Engine ответственность:
//! - Attack clips and their event frames (`SlashHit`, `BiteHit`, `SpawnAcid`,
//!   `AttackFinished`), charge collisions (`ChargeContact`)

use bevy::prelude::*;

pub mod brain;
pub mod systems;

#[cfg(test)]
mod brain_tests;

pub use brain::*;

use crate::SimulationSet;

/// Boss Plugin
///
/// Boss set: setup check → target → hooks → contacts → timers → think.
/// React: rage, death.
pub struct BossPlugin;

impl Plugin for BossPlugin {
    fn build(&self, app: &mut App) {
        app.add_systems(
            FixedUpdate,
            (
                systems::validate_boss_setup,
                systems::acquire_boss_target,
                systems::boss_animation_hooks,
                systems::boss_charge_contacts,
                systems::boss_timers,
                systems::boss_think,
            )
                .chain()
                .in_set(SimulationSet::Boss),
        )
        .add_systems(
            FixedUpdate,
            (systems::boss_damage_reactions, systems::boss_death_reactions)
                .chain()
                .in_set(SimulationSet::React),
        );
    }
}
