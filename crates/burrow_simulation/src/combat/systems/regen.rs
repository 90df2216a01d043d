//! Passive resource regeneration.

use bevy::prelude::*;

use crate::combat::{ResourceChanged, ResourceLedger};
use crate::components::Dead;

/// Система: regen (1-second accumulator inside the ledger)
///
/// One `ResourceChanged` per regenerated resource per whole second.
pub fn regenerate_resources(
    time: Res<Time>,
    mut ledgers: Query<(Entity, &mut ResourceLedger), Without<Dead>>,
    mut resource_events: EventWriter<ResourceChanged>,
) {
    let delta = time.delta_secs();
    for (entity, mut ledger) in ledgers.iter_mut() {
        for snapshot in ledger.tick_regen(delta) {
            resource_events.write(ResourceChanged::from_snapshot(entity, snapshot));
        }
    }
}
