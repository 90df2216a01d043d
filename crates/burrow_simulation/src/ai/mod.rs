//! AI decision-making module (melee bots)
//!
//! Simple FSM: Patrol → Chase → Attack → SearchLastKnown → Patrol, плюс
//! Stunned (stagger) и Dead (terminal). The boss has its own engine in
//! `crate::boss`; both implement `DecisionMaker`.

use bevy::prelude::*;

pub mod components;
pub mod decision;
pub mod systems;

// Re-export основных типов
pub use components::*;
pub use decision::DecisionMaker;

use crate::SimulationSet;

/// AI Plugin
///
/// Регистрирует AI системы в FixedUpdate для детерминизма.
/// Порядок выполнения:
/// 1. validate_bot_setup — new bots without zones get disabled
/// 2. bot_animation_hooks — PerformAttack / EndAttack / EndStun from the animator
/// 3. bot_think — FSM tick → MoveIntent, IsAttack
/// 4. bot_damage_reactions, bot_death_reactions (React) — stagger, death clip
pub struct AIPlugin;

impl Plugin for AIPlugin {
    fn build(&self, app: &mut App) {
        app.add_systems(
            FixedUpdate,
            (
                systems::validate_bot_setup,
                systems::bot_animation_hooks,
                systems::bot_think,
            )
                .chain() // Последовательное выполнение для детерминизма
                .in_set(SimulationSet::Bots),
        )
        .add_systems(
            FixedUpdate,
            (systems::bot_damage_reactions, systems::bot_death_reactions)
                .chain()
                .in_set(SimulationSet::React),
        );
    }
}
