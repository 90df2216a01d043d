//! Bug boss systems.
//!
//! Порядок выполнения (Boss set):
//! 1. validate_boss_setup
//! 2. acquire_boss_target: nearest player in vision radius
//! 3. boss_animation_hooks: SlashHit / BiteHit / SpawnAcid / AttackFinished
//! 4. boss_charge_contacts: wall or player hit while running
//! 5. boss_timers: watchdog, recovery, decision cooldown, charge phases
//! 6. boss_think: face target, decide
//!
//! React: boss_damage_reactions (rage), boss_death_reactions.

use bevy::prelude::*;

use crate::ai::DecisionMaker;
use crate::animation::{AnimationCommand, AnimationHook, AnimationHookFired};
use crate::boss::{BossActivity, BossAttack, BossBrain, BossContext, BossDecision, ChargeTick};
use crate::combat::{ActorDied, DamageDealt, DamageRequest, DamageSource, KnockbackImpulse, ResourceLedger};
use crate::components::{Dead, DeathPolicy, Inactive, Player};
use crate::config::{BotStats, CombatTuning};
use crate::dice::CombatDice;
use crate::error::CombatError;
use crate::physics::{
    ChargeContact, ContactTarget, Facing, HitZones, MoveIntent, Mover, ReportContacts, Velocity, ZoneContacts,
    ZoneKind, MASK_CHARGE_STOP,
};
use crate::projectiles::spawn_acid;

// ============================================================================
// Helpers
// ============================================================================

fn set_moving(
    entity: Entity,
    brain: &mut BossBrain,
    moving: bool,
    animation: &mut EventWriter<AnimationCommand>,
) {
    if brain.was_moving != moving {
        brain.was_moving = moving;
        animation.write(AnimationCommand::set_bool(entity, "IsMoving", moving));
    }
}

/// Applies a decision (from the think tick or a consumed follow-up).
fn execute_decision(
    entity: Entity,
    decision: BossDecision,
    brain: &mut BossBrain,
    intent: &mut MoveIntent,
    animation: &mut EventWriter<AnimationCommand>,
) {
    match decision {
        BossDecision::Hold => {}
        BossDecision::Move(velocity_x) => {
            intent.move_horizontal(velocity_x);
            set_moving(entity, brain, true, animation);
        }
        BossDecision::Stop => {
            intent.stop();
            set_moving(entity, brain, false, animation);
        }
        BossDecision::Attack(attack) => {
            intent.stop();
            set_moving(entity, brain, false, animation);
            for trigger in BossAttack::TRIGGERS {
                animation.write(AnimationCommand::reset_trigger(entity, trigger));
            }
            animation.write(AnimationCommand::trigger(entity, attack.trigger()));
            crate::logger::log(&format!(
                "👹 Boss {:?}: {:?} (queue: {:?})",
                entity, attack, brain.combo
            ));
        }
        BossDecision::Charge => {
            intent.stop();
            set_moving(entity, brain, false, animation);
            crate::logger::log(&format!(
                "👹 Boss {:?}: charge preparing, {:.2}s",
                entity, brain.charge_timer.remaining
            ));
        }
    }
}

/// Charge over (any reason): stand still, leave the charge pose, stop
/// reporting contacts.
fn finish_charge(
    entity: Entity,
    intent: &mut MoveIntent,
    velocity: Option<Mut<Velocity>>,
    commands: &mut Commands,
    animation: &mut EventWriter<AnimationCommand>,
) {
    intent.stop();
    if let Some(mut velocity) = velocity {
        velocity.0 = Vec2::ZERO;
    }
    animation.write(AnimationCommand::set_bool(entity, "IsCharging", false));
    animation.write(AnimationCommand::play(entity, "Idle"));
    if let Ok(mut entity_commands) = commands.get_entity(entity) {
        entity_commands.remove::<ReportContacts>();
    }
}

// ============================================================================
// Systems
// ============================================================================

/// Система: report missing boss setup (zones, acid fire point).
///
/// Nothing is disabled: a missing zone just never overlaps, a missing fire
/// point skips acid spawning.
pub fn validate_boss_setup(bosses: Query<(Entity, &BossBrain, Option<&HitZones>), Added<BossBrain>>) {
    for (entity, brain, zones) in bosses.iter() {
        let required = [
            (ZoneKind::Bite, "bite zone"),
            (ZoneKind::Claw, "claw zone"),
            (ZoneKind::UpperSlash, "upper slash zone"),
        ];
        for (kind, what) in required {
            if !zones.is_some_and(|z| z.has(kind)) {
                crate::logger::log_error(&format!(
                    "❌ Boss {:?}: {}",
                    entity,
                    CombatError::MissingReference { owner: "bug boss", what }
                ));
            }
        }
        if brain.config.fire_point.is_none() {
            crate::logger::log_error(&format!(
                "❌ Boss {:?}: {}",
                entity,
                CombatError::MissingReference {
                    owner: "bug boss",
                    what: "acid fire point"
                }
            ));
        }
    }
}

/// Система: boss target acquisition
///
/// Keeps a live target; otherwise picks the nearest player inside the vision
/// radius. Skipped while recovering.
pub fn acquire_boss_target(
    mut bosses: Query<(Entity, &mut BossBrain, &Transform), (Without<Dead>, Without<Inactive>)>,
    players: Query<(Entity, &Transform), (With<Player>, Without<Dead>)>,
) {
    for (entity, mut brain, transform) in bosses.iter_mut() {
        if brain.is_dead() || brain.activity == BossActivity::Recovering {
            continue;
        }
        if brain.target.is_some_and(|target| players.contains(target)) {
            continue;
        }

        let origin = transform.translation.truncate();
        let radius_sq = brain.config.vision_radius * brain.config.vision_radius;
        let nearest = players
            .iter()
            .map(|(player, t)| (player, t.translation.truncate().distance_squared(origin)))
            .filter(|(_, distance_sq)| *distance_sq <= radius_sq)
            .min_by(|a, b| a.1.total_cmp(&b.1).then(a.0.cmp(&b.0)))
            .map(|(player, _)| player);

        if nearest != brain.target {
            if let Some(player) = nearest {
                crate::logger::log_info(&format!("👁️ Boss {:?} spotted {:?}", entity, player));
            }
            brain.target = nearest;
        }
    }
}

/// Система: boss animation callbacks
///
/// Hit frames damage the target only if it still overlaps the matching zone.
/// `AttackFinished` consumes the combo queue.
#[allow(clippy::too_many_arguments)]
pub fn boss_animation_hooks(
    mut commands: Commands,
    mut hooks: EventReader<AnimationHookFired>,
    tuning: Res<CombatTuning>,
    mut dice: ResMut<CombatDice>,
    mut bosses: Query<
        (&mut BossBrain, &Transform, &Facing, &ZoneContacts, &ResourceLedger, &mut MoveIntent),
        Without<Dead>,
    >,
    players: Query<&Transform, (With<Player>, Without<BossBrain>)>,
    mut damage: EventWriter<DamageRequest>,
    mut animation: EventWriter<AnimationCommand>,
) {
    for fired in hooks.read() {
        let entity = fired.entity;
        let Ok((mut brain, transform, facing, contacts, ledger, mut intent)) = bosses.get_mut(entity) else {
            continue;
        };
        if brain.is_dead() {
            continue;
        }

        let target = brain.target;
        let in_zone = |kind: ZoneKind| target.is_some_and(|t| contacts.contains(kind, t));

        match fired.hook {
            AnimationHook::SlashHit => {
                if let Some(target) = target.filter(|_| in_zone(ZoneKind::Claw) || in_zone(ZoneKind::UpperSlash)) {
                    damage.write(DamageRequest {
                        attacker: Some(entity),
                        target,
                        amount: brain.config.slash_damage,
                        source: DamageSource::BossSlash,
                    });
                }
            }
            AnimationHook::BiteHit => {
                if let Some(target) = target.filter(|_| in_zone(ZoneKind::Bite)) {
                    damage.write(DamageRequest {
                        attacker: Some(entity),
                        target,
                        amount: brain.config.bite_damage,
                        source: DamageSource::BossBite,
                    });
                }
            }
            AnimationHook::SpawnAcid => {
                let Some(fire_point) = brain.config.fire_point else {
                    continue;
                };
                let Some(target_position) = target.and_then(|t| players.get(t).ok()) else {
                    continue;
                };
                let origin = transform.translation.truncate()
                    + Vec2::new(fire_point[0] * facing.sign(), fire_point[1]);
                let direction = target_position.translation.truncate() - origin;
                let acid = spawn_acid(&mut commands, Some(entity), origin, direction, &tuning.acid);
                crate::logger::log(&format!("🧪 Boss {:?} spat acid {:?}", entity, acid));
            }
            AnimationHook::AttackFinished => {
                intent.stop();
                let decision = brain.attack_finished(ledger.health_fraction(), &mut *dice);
                execute_decision(entity, decision, &mut brain, &mut intent, &mut animation);
            }
            _ => {}
        }
    }
}

/// Система: collisions during the charge run
///
/// Stop-layer surface → end charge. Player body → charge damage, knockback
/// `(dir × horizontal + up × vertical)`, end charge.
#[allow(clippy::too_many_arguments)]
pub fn boss_charge_contacts(
    mut commands: Commands,
    mut contacts: EventReader<ChargeContact>,
    mut dice: ResMut<CombatDice>,
    mut bosses: Query<(&mut BossBrain, &Transform, &ResourceLedger, &mut MoveIntent, Option<&mut Velocity>)>,
    players: Query<&Transform, (With<Player>, Without<BossBrain>)>,
    mut damage: EventWriter<DamageRequest>,
    mut knockback: EventWriter<KnockbackImpulse>,
    mut animation: EventWriter<AnimationCommand>,
) {
    for contact in contacts.read() {
        let entity = contact.entity;
        let Ok((mut brain, transform, ledger, mut intent, velocity)) = bosses.get_mut(entity) else {
            continue;
        };
        if !brain.is_charge_moving() {
            continue;
        }

        match contact.other {
            ContactTarget::Surface { layer } if layer & MASK_CHARGE_STOP != 0 => {
                crate::logger::log(&format!("🧱 Boss {:?} charge hit a wall", entity));
            }
            ContactTarget::Actor(other) => {
                let Ok(player_transform) = players.get(other) else {
                    continue;
                };
                let dir = (player_transform.translation.truncate() - transform.translation.truncate())
                    .normalize_or_zero();
                damage.write(DamageRequest {
                    attacker: Some(entity),
                    target: other,
                    amount: brain.config.charge_damage,
                    source: DamageSource::BossCharge,
                });
                knockback.write(KnockbackImpulse {
                    target: other,
                    impulse: dir * brain.config.knockback_horizontal + Vec2::Y * brain.config.knockback_vertical,
                });
                crate::logger::log(&format!("💢 Boss {:?} rammed {:?}", entity, other));
            }
            ContactTarget::Surface { .. } => continue,
        }

        if brain.stop_charge(ledger.health_fraction(), &mut *dice) {
            brain.was_moving = false;
            finish_charge(entity, &mut intent, velocity, &mut commands, &mut animation);
        }
    }
}

/// Система: boss timers (watchdog, recovery, far-band cooldown, charge)
#[allow(clippy::type_complexity)]
pub fn boss_timers(
    mut commands: Commands,
    time: Res<Time>,
    mut dice: ResMut<CombatDice>,
    mut bosses: Query<
        (Entity, &mut BossBrain, &Facing, &ResourceLedger, &mut MoveIntent, Option<&mut Velocity>),
        (Without<Dead>, Without<Inactive>),
    >,
    mut animation: EventWriter<AnimationCommand>,
) {
    let delta = time.delta_secs();

    for (entity, mut brain, facing, ledger, mut intent, velocity) in bosses.iter_mut() {
        if brain.is_dead() {
            continue;
        }

        if brain.tick_watchdog(delta) {
            animation.write(AnimationCommand::play(entity, "Idle"));
            crate::logger::log_warning(&format!(
                "⚠️ Boss {:?}: attack watchdog triggered, busy state reset",
                entity
            ));
        }
        if brain.tick_recovery(delta) {
            crate::logger::log(&format!("👹 Boss {:?} recovered", entity));
        }
        brain.tick_decision_timer(delta);

        match brain.tick_charge(delta, facing.sign(), ledger.health_fraction(), &mut *dice) {
            ChargeTick::None => {}
            ChargeTick::Go(velocity_x) => {
                intent.move_horizontal(velocity_x);
                animation.write(AnimationCommand::set_bool(entity, "IsCharging", true));
                commands.entity(entity).insert(ReportContacts);
                crate::logger::log(&format!("👹 Boss {:?}: CHARGE GO ({:.1})", entity, velocity_x));
            }
            ChargeTick::Running(velocity_x) => intent.move_horizontal(velocity_x),
            ChargeTick::Finished => {
                brain.was_moving = false;
                finish_charge(entity, &mut intent, velocity, &mut commands, &mut animation);
            }
        }
    }
}

/// Система: boss decision tick
///
/// Only when idle with a target: face it (horizontal dead zone), build the
/// context, decide, apply.
#[allow(clippy::type_complexity)]
pub fn boss_think(
    mut dice: ResMut<CombatDice>,
    mut bosses: Query<
        (
            Entity,
            &mut BossBrain,
            &BotStats,
            &Transform,
            &ZoneContacts,
            &ResourceLedger,
            &mut Facing,
            &mut MoveIntent,
        ),
        (Without<Dead>, Without<Inactive>),
    >,
    players: Query<&Transform, (With<Player>, Without<BossBrain>)>,
    mut animation: EventWriter<AnimationCommand>,
) {
    for (entity, mut brain, stats, transform, contacts, ledger, mut facing, mut intent) in bosses.iter_mut() {
        if !brain.can_decide() {
            continue;
        }
        let Some(target) = brain.target else {
            continue;
        };
        let Ok(target_transform) = players.get(target) else {
            continue;
        };

        let delta = target_transform.translation.truncate() - transform.translation.truncate();
        let ctx = BossContext {
            distance_x: delta.x.abs(),
            distance_y: delta.y.abs(),
            delta_x: delta.x,
            health_fraction: ledger.health_fraction(),
            move_speed: stats.move_speed,
            upper_zone: contacts.contains(ZoneKind::UpperSlash, target),
            claw_zone: contacts.contains(ZoneKind::Claw, target),
            bite_zone: contacts.contains(ZoneKind::Bite, target),
        };

        facing.face_toward(ctx.delta_x, brain.config.horizontal_dead_zone);
        let decision = brain.decide(&ctx, &mut *dice);
        execute_decision(entity, decision, &mut brain, &mut intent, &mut animation);
    }
}

/// Система: rage update + hurt flash on every accepted hit
pub fn boss_damage_reactions(
    mut dealt_events: EventReader<DamageDealt>,
    mut bosses: Query<(&mut BossBrain, &ResourceLedger)>,
    mut animation: EventWriter<AnimationCommand>,
) {
    for dealt in dealt_events.read() {
        let Ok((mut brain, ledger)) = bosses.get_mut(dealt.target) else {
            continue;
        };
        if brain.is_dead() {
            continue;
        }

        let before = brain.rage.steps;
        brain.update_rage(ledger.health_fraction());
        animation.write(AnimationCommand::playback_rate(dealt.target, brain.rage.speed_multiplier));
        animation.write(AnimationCommand::trigger(dealt.target, "OnDamaged"));

        if brain.rage.steps > before {
            crate::logger::log_info(&format!(
                "😡 Boss {:?} rage {} (speed ×{:.2}, delay ×{:.2})",
                dealt.target, brain.rage.steps, brain.rage.speed_multiplier, brain.rage.delay_multiplier
            ));
        }
    }
}

/// Система: boss death (cancel everything, death clip)
pub fn boss_death_reactions(
    mut commands: Commands,
    mut died_events: EventReader<ActorDied>,
    mut bosses: Query<(&mut BossBrain, &mut MoveIntent, Option<&DeathPolicy>)>,
    mut animation: EventWriter<AnimationCommand>,
) {
    for event in died_events.read() {
        let Ok((mut brain, mut intent, policy)) = bosses.get_mut(event.entity) else {
            continue;
        };
        if policy.copied() == Some(DeathPolicy::ResetToMax) {
            continue;
        }

        brain.die();
        intent.stop();
        set_moving(event.entity, &mut brain, false, &mut animation);
        animation.write(AnimationCommand::trigger(event.entity, "IsDead"));
        if let Ok(mut entity_commands) = commands.get_entity(event.entity) {
            entity_commands.remove::<ReportContacts>();
        }
        crate::logger::log_info(&format!("☠️ Boss {:?}: death sequence started", event.entity));
    }
}
