//! Player combat (melee attack + spells)
//!
//! ECS ответственность:
//! - Attack cooldown, target search, damage requests
//! - Spell list, selection, cooldown, projectile spawning
//!
//! Engine ответственность:
//! - Input → intents, movement, attack animation

use bevy::prelude::*;

pub mod attack;
pub mod events;
pub mod spells;

pub use attack::PlayerAttack;
pub use events::*;
pub use spells::SpellCaster;

use crate::SimulationSet;

pub struct PlayerPlugin;

impl Plugin for PlayerPlugin {
    fn build(&self, app: &mut App) {
        app.add_event::<PlayerAttackIntent>()
            .add_event::<CastSpellIntent>()
            .add_event::<SelectSpellIntent>()
            .add_event::<CycleSpellIntent>();

        app.add_systems(
            FixedUpdate,
            (attack::player_attack, spells::select_spells, spells::cast_spells)
                .chain()
                .in_set(SimulationSet::PlayerCombat),
        );
    }
}
