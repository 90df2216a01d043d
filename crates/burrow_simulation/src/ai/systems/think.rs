//! Bot decision tick: zone contacts → BotBrain → move intent / animation.

use bevy::prelude::*;

use crate::ai::{BotAction, BotBrain, BotContext, DecisionMaker, Waypoints};
use crate::animation::AnimationCommand;
use crate::components::{Dead, Inactive, Player};
use crate::config::{BotStats, CombatTuning, StaggerConfig};
use crate::dice::CombatDice;
use crate::physics::{Facing, MoveIntent, Mover, ZoneContacts, ZoneKind};

/// Система: melee bot FSM tick
///
/// 1. Fallback stun timer (if `EndStun` never arrived)
/// 2. Context from vision contacts, target position, current waypoint
/// 3. `BotBrain::decide` → MoveIntent / attack trigger
/// 4. `IsMoving` bool (only on change), facing follows velocity (jitter guard)
#[allow(clippy::type_complexity)]
pub fn bot_think(
    time: Res<Time>,
    tuning: Res<CombatTuning>,
    mut dice: ResMut<CombatDice>,
    mut bots: Query<
        (
            Entity,
            &mut BotBrain,
            &BotStats,
            &Transform,
            &ZoneContacts,
            &mut MoveIntent,
            &mut Facing,
            Option<&Waypoints>,
            Option<&StaggerConfig>,
        ),
        (Without<Dead>, Without<Inactive>),
    >,
    targets: Query<&Transform, (With<Player>, Without<Dead>)>,
    mut animation: EventWriter<AnimationCommand>,
) {
    let delta = time.delta_secs();

    for (entity, mut brain, stats, transform, contacts, mut intent, mut facing, waypoints, stagger) in
        bots.iter_mut()
    {
        let stagger = stagger.unwrap_or(&tuning.stagger);

        if brain.tick_stun(delta) {
            crate::logger::log(&format!("😵 Bot {:?} stun timed out", entity));
        }

        let target_x = brain
            .target
            .and_then(|target| targets.get(target).ok())
            .map(|t| t.translation.x);
        let target_visible = brain
            .target
            .is_some_and(|target| contacts.contains(ZoneKind::Vision, target));
        let spotted = contacts
            .first(ZoneKind::Vision)
            .filter(|candidate| targets.contains(*candidate));
        let waypoint = waypoints
            .filter(|w| !w.points.is_empty())
            .map(|w| {
                let index = brain.waypoint_index % w.points.len();
                (w.points[index], w.points.len())
            });

        let ctx = BotContext {
            position_x: transform.translation.x,
            target_x,
            target_visible,
            spotted,
            waypoint,
            attack_distance: stats.attack_distance,
            move_speed: stats.move_speed,
            arrival_tolerance: stagger.arrival_tolerance,
        };

        let previous = brain.state;
        match brain.decide(&ctx, &mut *dice) {
            BotAction::Keep => {}
            BotAction::Move(velocity_x) => intent.move_horizontal(velocity_x),
            BotAction::Stop => intent.stop(),
            BotAction::Attack { target_dx } => {
                // Strict comparison: a target exactly above keeps the facing
                if target_dx > 0.0 {
                    facing.right = true;
                } else if target_dx < 0.0 {
                    facing.right = false;
                }
                intent.stop();
                animation.write(AnimationCommand::trigger(entity, "IsAttack"));
            }
        }

        if brain.state != previous {
            crate::logger::log(&format!(
                "🤖 Bot {:?}: {:?} → {:?}",
                entity, previous, brain.state
            ));
        }

        let moving = intent.is_moving(stagger.facing_deadband);
        if moving != brain.was_moving {
            brain.was_moving = moving;
            animation.write(AnimationCommand::set_bool(entity, "IsMoving", moving));
        }
        facing.follow_velocity(intent.velocity_x, stagger.facing_deadband);
    }
}
