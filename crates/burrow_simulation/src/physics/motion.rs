//! Movement intents and facing.
//!
//! AI never moves bodies itself: it writes a horizontal velocity into
//! `MoveIntent`, physics applies it. Facing is ECS-owned (zones mirror with it).

use bevy::prelude::*;

/// Horizontal facing of a 2D actor.
#[derive(Component, Debug, Clone, Copy, PartialEq, Eq)]
pub struct Facing {
    pub right: bool,
}

impl Default for Facing {
    fn default() -> Self {
        Self::right()
    }
}

impl Facing {
    pub fn right() -> Self {
        Self { right: true }
    }

    pub fn left() -> Self {
        Self { right: false }
    }

    /// +1 facing right, -1 facing left
    pub fn sign(&self) -> f32 {
        if self.right {
            1.0
        } else {
            -1.0
        }
    }

    /// Face toward a horizontal offset unless it's inside the dead zone.
    ///
    /// Strict `<`: an offset exactly equal to `dead_zone` still turns.
    pub fn face_toward(&mut self, delta_x: f32, dead_zone: f32) {
        if delta_x.abs() < dead_zone {
            return;
        }
        self.right = delta_x > 0.0;
    }

    /// Jitter guard: follow velocity only when `|velocity_x| > deadband`.
    pub fn follow_velocity(&mut self, velocity_x: f32, deadband: f32) {
        if velocity_x > deadband {
            self.right = true;
        } else if velocity_x < -deadband {
            self.right = false;
        }
    }
}

/// Requested horizontal velocity for this tick (consumed by physics).
#[derive(Component, Debug, Clone, Copy, Default, PartialEq)]
pub struct MoveIntent {
    pub velocity_x: f32,
}

/// Movement capability. Decision code talks to this, not to `MoveIntent` fields.
pub trait Mover {
    fn move_horizontal(&mut self, velocity_x: f32);

    fn stop(&mut self);

    fn velocity_x(&self) -> f32;

    /// Moving faster than the jitter deadband
    fn is_moving(&self, deadband: f32) -> bool {
        self.velocity_x().abs() > deadband
    }
}

impl Mover for MoveIntent {
    fn move_horizontal(&mut self, velocity_x: f32) {
        self.velocity_x = velocity_x;
    }

    fn stop(&mut self) {
        self.velocity_x = 0.0;
    }

    fn velocity_x(&self) -> f32 {
        self.velocity_x
    }
}

/// External velocity (knockback) integrated by headless physics.
#[derive(Component, Debug, Clone, Copy, Default, PartialEq)]
pub struct Velocity(pub Vec2);
