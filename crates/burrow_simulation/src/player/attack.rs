//! Player melee attack: cooldown + circle overlap in front of the player.

use bevy::prelude::*;

use crate::animation::AnimationCommand;
use crate::combat::{CombatTimer, DamageRequest, DamageSource};
use crate::components::{Dead, Player};
use crate::config::PlayerTuning;
use crate::physics::{Facing, OverlapQuery, MASK_PLAYER_ATTACK};
use crate::player::PlayerAttackIntent;

/// Melee attack state of the player.
///
/// `damage`, `attack_speed` and `range` are attack modifiers: equipment or
/// buffs may overwrite them at runtime.
#[derive(Component, Debug, Clone, PartialEq)]
pub struct PlayerAttack {
    pub damage: f32,
    /// Attacks per second
    pub attack_speed: f32,
    pub range: f32,
    /// Attack point when facing right
    pub offset: Vec2,
    pub cooldown: CombatTimer,
}

impl Default for PlayerAttack {
    fn default() -> Self {
        Self::from_tuning(&PlayerTuning::default())
    }
}

impl PlayerAttack {
    pub fn from_tuning(tuning: &PlayerTuning) -> Self {
        Self {
            damage: tuning.attack_damage,
            attack_speed: tuning.attack_speed,
            range: tuning.attack_range,
            offset: Vec2::from(tuning.attack_offset),
            cooldown: CombatTimer::default(),
        }
    }

    pub fn can_attack(&self) -> bool {
        !self.cooldown.is_running()
    }

    /// Starts the cooldown (`1 / attack_speed`). False while cooling down.
    pub fn try_attack(&mut self) -> bool {
        if !self.can_attack() {
            return false;
        }
        let interval = if self.attack_speed > 0.0 { 1.0 / self.attack_speed } else { 1.0 };
        self.cooldown.start(interval);
        true
    }

    /// World-space attack point.
    pub fn attack_point(&self, origin: Vec2, facing: &Facing) -> Vec2 {
        origin + Vec2::new(self.offset.x * facing.sign(), self.offset.y)
    }
}

/// Система: player melee
///
/// 1. Cooldown tick (`isAttacking` cleared when it runs out)
/// 2. Attack intents: every enemy / prop hurtbox within `range` of the attack
///    point gets a `DamageRequest`
pub fn player_attack(
    time: Res<Time>,
    mut intents: EventReader<PlayerAttackIntent>,
    mut players: Query<(Entity, &mut PlayerAttack, &Transform, &Facing), (With<Player>, Without<Dead>)>,
    overlap: OverlapQuery,
    mut damage: EventWriter<DamageRequest>,
    mut animation: EventWriter<AnimationCommand>,
) {
    let delta = time.delta_secs();
    for (entity, mut attack, _, _) in players.iter_mut() {
        if attack.cooldown.tick(delta) {
            animation.write(AnimationCommand::set_bool(entity, "isAttacking", false));
        }
    }

    for intent in intents.read() {
        let Ok((entity, mut attack, transform, facing)) = players.get_mut(intent.entity) else {
            continue;
        };
        if !attack.try_attack() {
            continue;
        }

        animation.write(AnimationCommand::set_bool(entity, "isAttacking", true));

        let point = attack.attack_point(transform.translation.truncate(), facing);
        let victims = overlap.area(point, attack.range, MASK_PLAYER_ATTACK);
        crate::logger::log(&format!("⚔️ Player {:?} attacks, {} targets", entity, victims.len()));

        for victim in victims {
            if victim == entity {
                continue;
            }
            damage.write(DamageRequest {
                attacker: Some(entity),
                target: victim,
                amount: attack.damage,
                source: DamageSource::PlayerMelee,
            });
        }
    }
}
