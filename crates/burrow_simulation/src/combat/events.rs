//! Combat events (ECS → UI / engine, and between domains).

use bevy::prelude::*;

use crate::combat::components::{ResourceKind, ResourceSnapshot};

/// Resource mutated (emitted after every mutation, even a no-op one).
///
/// UI health/mana/stamina bars consume this.
#[derive(Event, Debug, Clone, Copy, PartialEq)]
pub struct ResourceChanged {
    pub entity: Entity,
    pub kind: ResourceKind,
    pub current: f32,
    pub max: f32,
}

impl ResourceChanged {
    pub fn from_snapshot(entity: Entity, snapshot: ResourceSnapshot) -> Self {
        Self {
            entity,
            kind: snapshot.kind,
            current: snapshot.current,
            max: snapshot.max,
        }
    }

    /// current / max (0 for a zero cap)
    pub fn fraction(&self) -> f32 {
        if self.max > 0.0 {
            self.current / self.max
        } else {
            0.0
        }
    }
}

/// Where a hit came from (logs, hit reactions, UI).
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum DamageSource {
    BotMelee,
    BossBite,
    BossSlash,
    BossCharge,
    Acid,
    PlayerMelee,
    Fireball,
}

/// Request to damage `target`. The only way one entity hurts another.
#[derive(Event, Debug, Clone, Copy, PartialEq)]
pub struct DamageRequest {
    pub attacker: Option<Entity>,
    pub target: Entity,
    pub amount: f32,
    pub source: DamageSource,
}

/// Событие: урон нанесен (after the ledger accepted it)
#[derive(Event, Debug, Clone, Copy, PartialEq)]
pub struct DamageDealt {
    pub attacker: Option<Entity>,
    pub target: Entity,
    pub amount: f32,
    pub source: DamageSource,
    pub remaining_health: f32,
}

/// Health went from > 0 to exactly 0. Fires once per life.
#[derive(Event, Debug, Clone, Copy, PartialEq)]
pub struct ActorDied {
    pub entity: Entity,
    pub killer: Option<Entity>,
}

/// A destructible prop broke.
#[derive(Event, Debug, Clone, Copy, PartialEq)]
pub struct PropBroken {
    pub entity: Entity,
    pub reward: Option<u32>,
}

/// Impulse for the physics collaborator (charge knockback).
#[derive(Event, Debug, Clone, Copy, PartialEq)]
pub struct KnockbackImpulse {
    pub target: Entity,
    pub impulse: Vec2,
}
