//! Base actor components: markers and death lifecycle

use bevy::prelude::*;

use crate::combat::ResourceLedger;
use crate::physics::{Facing, MoveIntent};

/// Актор: anything with health taking part in combat (player, bots, boss)
///
/// Required Components add a default ledger, facing and move intent; spawn
/// code overrides the ledger with the configured one.
#[derive(Component, Debug, Clone, Copy, Default)]
#[require(ResourceLedger, Facing, MoveIntent, Transform)]
pub struct Actor;

/// Player-controlled actor (target of enemy AI).
#[derive(Component, Debug, Clone, Copy, Default)]
pub struct Player;

/// Компонент-маркер: actor is dead (health hit zero, death policy not ResetToMax)
///
/// Dead actors ignore damage, skip AI and regen.
#[derive(Component, Debug, Clone, Copy)]
pub struct Dead;

/// Actor finished dying under `DeathPolicy::Disable`.
///
/// The engine bridge turns off its collider / body; the entity stays around.
#[derive(Component, Debug, Clone, Copy)]
pub struct Inactive;

/// What happens when an actor's health reaches zero.
#[derive(Component, Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum DeathPolicy {
    /// Despawn once the death animation reports `OnDeath` (melee bots)
    #[default]
    Despawn,
    /// Keep the entity, mark it `Inactive` after the death animation (boss)
    Disable,
    /// Refill every resource immediately, no `Dead` marker (training dummies)
    ResetToMax,
    /// Mark `Dead` and emit `ActorDied`, nothing else (player: UI decides)
    EmitOnly,
}
