//! Death policies.
//!
//! `ActorDied` fires once per life (ledger latch). What happens next depends
//! on the actor's `DeathPolicy`:
//!
//! | Policy       | On ActorDied               | On death clip end (`OnDeath`) |
//! |--------------|----------------------------|-------------------------------|
//! | `Despawn`    | `Dead`, stop               | despawn                       |
//! | `Disable`    | `Dead`, stop               | `Inactive`                    |
//! | `ResetToMax` | refill + broadcast         | -                             |
//! | `EmitOnly`   | `Dead`, stop               | -                             |

use bevy::prelude::*;

use crate::animation::{AnimationHook, AnimationHookFired};
use crate::combat::{ActorDied, ResourceChanged, ResourceLedger};
use crate::components::{Dead, DeathPolicy, Inactive};
use crate::physics::{MoveIntent, Mover, ZoneContacts};

/// Система: ActorDied → Dead marker or immediate refill.
pub fn resolve_deaths(
    mut commands: Commands,
    mut died_events: EventReader<ActorDied>,
    mut actors: Query<(Option<&DeathPolicy>, &mut ResourceLedger, Option<&mut MoveIntent>)>,
    mut resource_events: EventWriter<ResourceChanged>,
) {
    for event in died_events.read() {
        let Ok((policy, mut ledger, intent)) = actors.get_mut(event.entity) else {
            continue;
        };
        let policy = policy.copied().unwrap_or_default();

        if policy == DeathPolicy::ResetToMax {
            ledger.reset_to_max();
            for snapshot in ledger.broadcast_all() {
                resource_events.write(ResourceChanged::from_snapshot(event.entity, snapshot));
            }
            crate::logger::log_info(&format!("♻️ {:?} died, reset to max", event.entity));
            continue;
        }

        if let Some(mut intent) = intent {
            intent.stop();
        }
        if let Ok(mut entity_commands) = commands.get_entity(event.entity) {
            entity_commands.insert(Dead);
        }
        crate::logger::log_info(&format!(
            "💀 {:?} died (killer: {:?}, policy: {:?})",
            event.entity, event.killer, policy
        ));
    }
}

/// Система: death clip finished → despawn / disable.
pub fn finish_deaths(
    mut commands: Commands,
    mut hooks: EventReader<AnimationHookFired>,
    actors: Query<Option<&DeathPolicy>, With<Dead>>,
    mut contacts: Query<&mut ZoneContacts>,
) {
    for fired in hooks.read() {
        if fired.hook != AnimationHook::DeathFinished {
            continue;
        }
        let Ok(policy) = actors.get(fired.entity) else {
            continue;
        };

        match policy.copied().unwrap_or_default() {
            DeathPolicy::Despawn => {
                for mut zone_contacts in contacts.iter_mut() {
                    zone_contacts.forget(fired.entity);
                }
                if let Ok(mut entity_commands) = commands.get_entity(fired.entity) {
                    entity_commands.despawn();
                }
                crate::logger::log(&format!("⚰️ Despawning {:?}", fired.entity));
            }
            DeathPolicy::Disable => {
                if let Ok(mut entity_commands) = commands.get_entity(fired.entity) {
                    entity_commands.insert(Inactive);
                }
                crate::logger::log(&format!("🔌 {:?} completely disabled", fired.entity));
            }
            DeathPolicy::ResetToMax | DeathPolicy::EmitOnly => {}
        }
    }
}
