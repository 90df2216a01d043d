//! Bot reactions to combat results (stagger, death).

use bevy::prelude::*;

use crate::ai::BotBrain;
use crate::animation::AnimationCommand;
use crate::combat::{ActorDied, DamageDealt};
use crate::components::DeathPolicy;
use crate::config::{CombatTuning, StaggerConfig};
use crate::dice::CombatDice;
use crate::physics::{MoveIntent, Mover};

/// Система: stagger roll on every hit that didn't kill
///
/// Successful stagger: stop, drop the target, play `OnDamaged`.
pub fn bot_damage_reactions(
    mut dealt_events: EventReader<DamageDealt>,
    tuning: Res<CombatTuning>,
    mut dice: ResMut<CombatDice>,
    mut bots: Query<(&mut BotBrain, &mut MoveIntent, Option<&StaggerConfig>)>,
    mut animation: EventWriter<AnimationCommand>,
) {
    for dealt in dealt_events.read() {
        if dealt.remaining_health <= 0.0 {
            continue;
        }
        let Ok((mut brain, mut intent, stagger)) = bots.get_mut(dealt.target) else {
            continue;
        };

        let stagger = stagger.unwrap_or(&tuning.stagger);
        if brain.on_damaged(stagger, &mut *dice) {
            intent.stop();
            animation.write(AnimationCommand::trigger(dealt.target, "OnDamaged"));
            crate::logger::log(&format!(
                "💫 Bot {:?} staggered by {:?}",
                dealt.target, dealt.source
            ));
        }
    }
}

/// Система: bot died → terminal state + death clip
pub fn bot_death_reactions(
    mut died_events: EventReader<ActorDied>,
    mut bots: Query<(&mut BotBrain, Option<&DeathPolicy>)>,
    mut animation: EventWriter<AnimationCommand>,
) {
    for event in died_events.read() {
        let Ok((mut brain, policy)) = bots.get_mut(event.entity) else {
            continue;
        };
        if policy.copied() == Some(DeathPolicy::ResetToMax) {
            continue;
        }

        brain.die();
        animation.write(AnimationCommand::trigger(event.entity, "IsDead"));
    }
}
