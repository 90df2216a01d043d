//! Physics collaborator bridge.
//!
//! ECS ответственность: zone contact sets, movement intents, facing, overlap
//! queries used by combat to find targets.
//!
//! Engine ответственность: bodies, collision, actual movement. It reports
//! `ZoneOverlapEvent` and `ChargeContact`, consumes `MoveIntent` and
//! `KnockbackImpulse`. `HeadlessPhysicsPlugin` fakes the engine side.

use bevy::prelude::*;

pub mod headless;
pub mod layers;
pub mod motion;
pub mod overlap;
pub mod zones;

pub use headless::ArenaBounds;
pub use layers::*;
pub use motion::{Facing, MoveIntent, Mover, Velocity};
pub use overlap::{boxes_overlap, circle_overlaps_box, overlap_area, OverlapQuery};
pub use zones::{update_zone_contacts, HitZone, HitZones, ZoneContacts, ZoneKind, ZoneOverlapEvent};

use crate::SimulationSet;

/// What a charging body ran into.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ContactTarget {
    Surface { layer: u32 },
    Actor(Entity),
}

/// Collision report for entities carrying `ReportContacts`.
#[derive(Event, Debug, Clone, Copy, PartialEq)]
pub struct ChargeContact {
    pub entity: Entity,
    pub other: ContactTarget,
}

/// Marker: physics should report collisions of this entity (charge moving phase).
#[derive(Component, Debug, Clone, Copy, Default)]
pub struct ReportContacts;

/// Physics bridge plugin: events + contact bookkeeping.
pub struct PhysicsBridgePlugin;

impl Plugin for PhysicsBridgePlugin {
    fn build(&self, app: &mut App) {
        app.add_event::<ZoneOverlapEvent>().add_event::<ChargeContact>();

        app.add_systems(FixedUpdate, update_zone_contacts.in_set(SimulationSet::Bridge));
    }
}

/// Headless physics plugin (runner binary, integration tests).
///
/// Порядок:
/// 1. apply_knockback_impulses — impulses from last tick
/// 2. integrate_motion — intents from last tick
/// 3. detect_zone_overlaps — Entered/Exited for the new positions
/// 4. detect_charge_contacts — walls / player bodies
pub struct HeadlessPhysicsPlugin;

impl Plugin for HeadlessPhysicsPlugin {
    fn build(&self, app: &mut App) {
        app.init_resource::<ArenaBounds>();

        app.add_systems(
            FixedUpdate,
            (
                headless::apply_knockback_impulses,
                headless::integrate_motion,
                headless::detect_zone_overlaps,
                headless::detect_charge_contacts,
            )
                .chain()
                .in_set(SimulationSet::EngineInput),
        );
    }
}
