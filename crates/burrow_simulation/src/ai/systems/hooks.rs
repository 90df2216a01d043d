//! Bot animation hooks (swing impact, swing end, stagger end).

use bevy::prelude::*;

use crate::ai::BotBrain;
use crate::animation::{AnimationHook, AnimationHookFired};
use crate::combat::{DamageRequest, DamageSource};
use crate::components::Dead;
use crate::config::BotStats;
use crate::physics::{ZoneContacts, ZoneKind};

/// Система: bot animation callbacks
///
/// - `PerformAttack`: damage the target if it's still in the attack zone
/// - `EndAttack`: swing over (ignored while stunned)
/// - `EndStun`: back to patrol
pub fn bot_animation_hooks(
    mut hooks: EventReader<AnimationHookFired>,
    mut bots: Query<(&mut BotBrain, &BotStats, &ZoneContacts), Without<Dead>>,
    mut damage: EventWriter<DamageRequest>,
) {
    for fired in hooks.read() {
        let Ok((mut brain, stats, contacts)) = bots.get_mut(fired.entity) else {
            continue;
        };

        match fired.hook {
            AnimationHook::PerformAttack => {
                if !brain.can_strike() {
                    continue;
                }
                let victim = brain
                    .target
                    .filter(|target| contacts.contains(ZoneKind::Attack, *target));

                if let Some(victim) = victim {
                    damage.write(DamageRequest {
                        attacker: Some(fired.entity),
                        target: victim,
                        amount: stats.damage,
                        source: DamageSource::BotMelee,
                    });
                }
            }
            AnimationHook::EndAttack => brain.end_attack(),
            AnimationHook::EndStun => brain.end_stun(),
            _ => {}
        }
    }
}
