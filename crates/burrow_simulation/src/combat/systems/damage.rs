//! Damage resolution: `DamageRequest` → `Damageable` → result events.

use bevy::prelude::*;

use crate::animation::AnimationCommand;
use crate::combat::{
    ActorDied, DamageDealt, DamageOutcome, DamageRequest, Damageable, Destructible, PropBroken, ResourceChanged,
    ResourceLedger,
};
use crate::components::Dead;

/// Система: apply damage requests
///
/// 1. Dead actors (marker or health already at 0) ignore the hit
/// 2. Ledger targets: health change → ResourceChanged + DamageDealt (+ ActorDied)
/// 3. Destructible targets: first hit breaks them → PropBroken + animation
///
/// Invalid requests (negative / non-finite damage) are logged and dropped.
pub fn apply_damage_requests(
    mut requests: EventReader<DamageRequest>,
    mut targets: Query<(Option<&mut ResourceLedger>, Option<&mut Destructible>, Has<Dead>)>,
    mut resource_events: EventWriter<ResourceChanged>,
    mut dealt_events: EventWriter<DamageDealt>,
    mut died_events: EventWriter<ActorDied>,
    mut broken_events: EventWriter<PropBroken>,
    mut animation: EventWriter<AnimationCommand>,
) {
    for request in requests.read() {
        let Ok((ledger, destructible, dead)) = targets.get_mut(request.target) else {
            crate::logger::log(&format!(
                "DamageRequest: target {:?} is gone ({:?})",
                request.target, request.source
            ));
            continue;
        };

        if dead {
            continue;
        }

        let outcome = if let Some(mut ledger) = ledger {
            if !ledger.is_alive() {
                continue;
            }
            ledger.take_damage(request.amount)
        } else if let Some(mut destructible) = destructible {
            destructible.take_damage(request.amount)
        } else {
            crate::logger::log_warning(&format!(
                "⚠️ DamageRequest: target {:?} is not damageable",
                request.target
            ));
            continue;
        };

        match outcome {
            Err(err) => {
                crate::logger::log_error(&format!(
                    "❌ {:?} → {:?}: {}",
                    request.attacker, request.target, err
                ));
            }
            Ok(DamageOutcome::Applied { snapshot, died }) => {
                resource_events.write(ResourceChanged::from_snapshot(request.target, snapshot));
                dealt_events.write(DamageDealt {
                    attacker: request.attacker,
                    target: request.target,
                    amount: request.amount,
                    source: request.source,
                    remaining_health: snapshot.current,
                });

                crate::logger::log(&format!(
                    "💥 {:?} hit {:?} for {} ({:?}), health {}/{}",
                    request.attacker, request.target, request.amount, request.source, snapshot.current, snapshot.max
                ));

                if died {
                    died_events.write(ActorDied {
                        entity: request.target,
                        killer: request.attacker,
                    });
                }
            }
            Ok(DamageOutcome::Broke { reward }) => {
                match reward {
                    Some(_) => {
                        animation.write(AnimationCommand::set_bool(request.target, "IsOn", false));
                    }
                    None => {
                        animation.write(AnimationCommand::trigger(request.target, "IsDestroy"));
                    }
                }
                broken_events.write(PropBroken {
                    entity: request.target,
                    reward,
                });
                crate::logger::log(&format!("🪵 Prop {:?} broken", request.target));
            }
            Ok(DamageOutcome::Ignored) => {}
        }
    }
}
