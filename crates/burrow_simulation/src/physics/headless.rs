//! Headless physics: just enough to run the simulation without an engine.
//!
//! - integrates `MoveIntent` + knockback `Velocity` along x,
//! - computes zone overlaps from `HitZones` vs `Hurtbox`,
//! - reports charge contacts (arena walls, player bodies).
//!
//! No gravity model: vertical impulse components are dropped.

use bevy::prelude::*;

use crate::combat::KnockbackImpulse;
use crate::components::Dead;
use crate::physics::{
    boxes_overlap, ChargeContact, ContactTarget, Facing, HitZones, Hurtbox, MoveIntent, ReportContacts, Velocity,
    ZoneContacts, ZoneOverlapEvent, LAYER_ENVIRONMENT, LAYER_PLAYER,
};

/// Horizontal walls of the arena.
#[derive(Resource, Debug, Clone, Copy, PartialEq)]
pub struct ArenaBounds {
    pub min_x: f32,
    pub max_x: f32,
}

impl Default for ArenaBounds {
    fn default() -> Self {
        Self {
            min_x: -30.0,
            max_x: 30.0,
        }
    }
}

/// Knockback damping (1/s)
const KNOCKBACK_DAMPING: f32 = 5.0;

/// System: knockback impulses → external velocity.
pub fn apply_knockback_impulses(
    mut impulses: EventReader<KnockbackImpulse>,
    mut bodies: Query<&mut Velocity>,
) {
    for impulse in impulses.read() {
        if let Ok(mut velocity) = bodies.get_mut(impulse.target) {
            velocity.0.x += impulse.impulse.x;
        }
    }
}

/// System: integrate horizontal motion, clamp to the arena.
pub fn integrate_motion(
    time: Res<Time>,
    bounds: Res<ArenaBounds>,
    mut bodies: Query<(&mut Transform, &MoveIntent, Option<&mut Velocity>), Without<Dead>>,
) {
    let delta = time.delta_secs();
    for (mut transform, intent, velocity) in bodies.iter_mut() {
        let mut vx = intent.velocity_x;
        if let Some(mut velocity) = velocity {
            vx += velocity.0.x;
            velocity.0 *= (1.0 - KNOCKBACK_DAMPING * delta).max(0.0);
        }
        transform.translation.x = (transform.translation.x + vx * delta).clamp(bounds.min_x, bounds.max_x);
    }
}

/// System: zone shapes vs hurtboxes → Entered/Exited reports.
pub fn detect_zone_overlaps(
    owners: Query<(Entity, &Transform, &Facing, &HitZones, &ZoneContacts), Without<Dead>>,
    bodies: Query<(Entity, &Transform, &Hurtbox, Has<Dead>)>,
    mut overlaps: EventWriter<ZoneOverlapEvent>,
) {
    for (owner, owner_transform, facing, zones, contacts) in owners.iter() {
        let origin = owner_transform.translation.truncate();

        for zone in zones.zones.iter() {
            let center = zone.center(origin, facing);

            for (other, other_transform, hurtbox, dead) in bodies.iter() {
                if other == owner {
                    continue;
                }

                let touching = !dead
                    && hurtbox.matches(zone.mask)
                    && boxes_overlap(
                        center,
                        zone.half_extents,
                        other_transform.translation.truncate(),
                        hurtbox.half_extents,
                    );
                let known = contacts.contains(zone.kind, other);

                if touching && !known {
                    overlaps.write(ZoneOverlapEvent::Entered {
                        owner,
                        zone: zone.kind,
                        other,
                    });
                } else if !touching && known {
                    overlaps.write(ZoneOverlapEvent::Exited {
                        owner,
                        zone: zone.kind,
                        other,
                    });
                }
            }
        }
    }
}

/// System: contacts of entities that asked for them (charging boss).
pub fn detect_charge_contacts(
    bounds: Res<ArenaBounds>,
    reporters: Query<(Entity, &Transform, &Hurtbox), (With<ReportContacts>, Without<Dead>)>,
    bodies: Query<(Entity, &Transform, &Hurtbox), Without<Dead>>,
    mut contacts: EventWriter<ChargeContact>,
) {
    for (entity, transform, hurtbox) in reporters.iter() {
        let position = transform.translation.truncate();

        if position.x <= bounds.min_x || position.x >= bounds.max_x {
            contacts.write(ChargeContact {
                entity,
                other: ContactTarget::Surface {
                    layer: LAYER_ENVIRONMENT,
                },
            });
            continue;
        }

        for (other, other_transform, other_hurtbox) in bodies.iter() {
            if other == entity || !other_hurtbox.matches(LAYER_PLAYER) {
                continue;
            }
            if boxes_overlap(
                position,
                hurtbox.half_extents,
                other_transform.translation.truncate(),
                other_hurtbox.half_extents,
            ) {
                contacts.write(ChargeContact {
                    entity,
                    other: ContactTarget::Actor(other),
                });
                break;
            }
        }
    }
}
