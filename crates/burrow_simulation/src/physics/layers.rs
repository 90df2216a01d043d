//! Collision layers (bit masks, shared with the engine bridge)
//!
//! - **Layer:** which layer a hurtbox lives on
//! - **Mask:** which layers a query / zone reacts to

use bevy::prelude::*;

// ============================================================================
// Layer bits
// ============================================================================

/// Player body
pub const LAYER_PLAYER: u32 = 0b1;

/// Bots and boss
pub const LAYER_ENEMY: u32 = 0b10;

/// Destructible props, chests
pub const LAYER_PROP: u32 = 0b100;

/// Walls, floor, obstacles
pub const LAYER_ENVIRONMENT: u32 = 0b1000;

// ============================================================================
// Masks
// ============================================================================

/// Player melee and fireball: enemies + props
pub const MASK_PLAYER_ATTACK: u32 = LAYER_ENEMY | LAYER_PROP;

/// Enemy zones, acid: player only
pub const MASK_ENEMY_ATTACK: u32 = LAYER_PLAYER;

/// Surfaces that stop a boss charge
pub const MASK_CHARGE_STOP: u32 = LAYER_ENVIRONMENT;

/// Debug name of a single layer bit.
pub fn layer_name(layer_bits: u32) -> &'static str {
    match layer_bits {
        LAYER_PLAYER => "Player",
        LAYER_ENEMY => "Enemy",
        LAYER_PROP => "Prop",
        LAYER_ENVIRONMENT => "Environment",
        _ => "Unknown",
    }
}

/// Damageable body shape: axis-aligned box around the entity origin.
#[derive(Component, Debug, Clone, Copy, PartialEq)]
pub struct Hurtbox {
    pub half_extents: Vec2,
    pub layer: u32,
}

impl Hurtbox {
    pub fn new(half_extents: Vec2, layer: u32) -> Self {
        Self { half_extents, layer }
    }

    pub fn matches(&self, mask: u32) -> bool {
        self.layer & mask != 0
    }
}
