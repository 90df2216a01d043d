//! Combat resolution (resource ledger + damage pipeline)
//!
//! ECS ответственность:
//! - Game state: ResourceLedger (health/mana/stamina), Destructible props
//! - Combat rules: damage validation, death latch, death policies, regen
//! - Events: ResourceChanged, DamageDealt, ActorDied, PropBroken, KnockbackImpulse
//!
//! Engine ответственность:
//! - Finding who got hit (zones / overlap queries feed `DamageRequest`)
//! - Death clip playback (reports `OnDeath`)

use bevy::prelude::*;

pub mod components;
pub mod damage;
pub mod events;
pub mod systems;

pub use components::*;
pub use damage::{DamageOutcome, Damageable};
pub use events::*;

use crate::SimulationSet;

/// Combat Plugin
///
/// Порядок выполнения:
/// 1. apply_damage_requests (Resolve): every hit requested this tick
/// 2. resolve_deaths, finish_deaths (React): policies
/// 3. regenerate_resources (Upkeep)
pub struct CombatPlugin;

impl Plugin for CombatPlugin {
    fn build(&self, app: &mut App) {
        app.add_event::<DamageRequest>()
            .add_event::<DamageDealt>()
            .add_event::<ResourceChanged>()
            .add_event::<ActorDied>()
            .add_event::<PropBroken>()
            .add_event::<KnockbackImpulse>();

        app.add_systems(
            FixedUpdate,
            systems::apply_damage_requests.in_set(SimulationSet::Resolve),
        )
        .add_systems(
            FixedUpdate,
            (systems::resolve_deaths, systems::finish_deaths)
                .chain()
                .in_set(SimulationSet::React),
        )
        .add_systems(
            FixedUpdate,
            systems::regenerate_resources.in_set(SimulationSet::Upkeep),
        );
    }
}
