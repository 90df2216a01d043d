//! Player input intents
//!
//! Input is an external collaborator: the engine (or a test) turns button
//! presses into these intents, the player systems validate and execute them.
//!
//! - `PlayerAttackIntent`: melee swing (ignored while on cooldown)
//! - `CastSpellIntent`: cast the selected spell (ignored while on cooldown)
//! - `SelectSpellIntent`: pick a spell by index
//! - `CycleSpellIntent`: scroll through spells (wraps around)

use bevy::prelude::*;

#[derive(Event, Debug, Clone, Copy, PartialEq, Eq)]
pub struct PlayerAttackIntent {
    pub entity: Entity,
}

#[derive(Event, Debug, Clone, Copy, PartialEq, Eq)]
pub struct CastSpellIntent {
    pub entity: Entity,
}

#[derive(Event, Debug, Clone, Copy, PartialEq, Eq)]
pub struct SelectSpellIntent {
    pub entity: Entity,
    pub index: usize,
}

/// `direction > 0` → next spell, `< 0` → previous.
#[derive(Event, Debug, Clone, Copy, PartialEq, Eq)]
pub struct CycleSpellIntent {
    pub entity: Entity,
    pub direction: i32,
}
