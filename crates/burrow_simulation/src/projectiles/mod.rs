//! Projectiles (boss acid, player fireball)
//!
//! Both are tick-sampled state machines: a phase enum plus a `CombatTimer`,
//! advanced once per fixed tick. Targets come from `OverlapQuery`, damage
//! goes through `DamageRequest` like every other hit.

use bevy::prelude::*;

pub mod acid;
pub mod fireball;

pub use acid::{spawn_acid, AcidPhase, AcidProjectile};
pub use fireball::{spawn_fireball, Fireball, FireballEvent, FireballPhase};

use crate::SimulationSet;

pub struct ProjectilePlugin;

impl Plugin for ProjectilePlugin {
    fn build(&self, app: &mut App) {
        app.add_systems(
            FixedUpdate,
            (acid::tick_acid_projectiles, fireball::tick_fireballs)
                .chain()
                .in_set(SimulationSet::Projectiles),
        );
    }
}
