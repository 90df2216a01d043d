//! Spawn helpers: full component sets for each actor type.
//!
//! Shapes (hurtboxes, zones) are headless defaults; an engine bridge replaces
//! `HitZones` with the scene's own colliders. Animators are not attached here.

use bevy::prelude::*;

use crate::ai::{BotBrain, Waypoints};
use crate::boss::BossBrain;
use crate::combat::{Destructible, ResourceLedger, CHEST_SCORE};
use crate::components::{Actor, DeathPolicy, Player};
use crate::config::CombatTuning;
use crate::physics::{
    HitZone, HitZones, Hurtbox, Velocity, ZoneContacts, ZoneKind, LAYER_ENEMY, LAYER_PLAYER, LAYER_PROP,
    MASK_ENEMY_ATTACK,
};
use crate::player::{PlayerAttack, SpellCaster};

/// Player: full resources, melee attack, spell caster. Death only emits events.
pub fn spawn_player(commands: &mut Commands, tuning: &CombatTuning, position: Vec2) -> Entity {
    commands
        .spawn((
            Actor,
            Player,
            Transform::from_translation(position.extend(0.0)),
            ResourceLedger::for_player(&tuning.player),
            PlayerAttack::from_tuning(&tuning.player),
            SpellCaster::from_config(&tuning.spells),
            Hurtbox::new(Vec2::new(0.4, 0.9), LAYER_PLAYER),
            Velocity::default(),
            DeathPolicy::EmitOnly,
        ))
        .id()
}

/// Melee bot patrolling `waypoints` (x positions). Despawns after its death clip.
pub fn spawn_melee_bot(commands: &mut Commands, tuning: &CombatTuning, position: Vec2, waypoints: Vec<f32>) -> Entity {
    let stats = tuning.bot.clone();
    let reach = stats.attack_distance;
    let zones = HitZones::new(vec![
        HitZone::new(ZoneKind::Vision, Vec2::new(4.0, 0.0), Vec2::new(5.0, 1.5), MASK_ENEMY_ATTACK),
        HitZone::new(
            ZoneKind::Attack,
            Vec2::new(reach * 0.5, 0.0),
            Vec2::new(reach * 0.5, 0.75),
            MASK_ENEMY_ATTACK,
        ),
    ]);

    commands
        .spawn((
            Actor,
            Transform::from_translation(position.extend(0.0)),
            ResourceLedger::for_bot(&stats),
            BotBrain::default(),
            stats,
            tuning.stagger.clone(),
            Waypoints::new(waypoints),
            zones,
            ZoneContacts::default(),
            Hurtbox::new(Vec2::new(0.5, 0.75), LAYER_ENEMY),
            DeathPolicy::Despawn,
        ))
        .id()
}

/// Bug boss. Stays in the world (disabled) after its death clip.
pub fn spawn_bug_boss(commands: &mut Commands, tuning: &CombatTuning, position: Vec2) -> Entity {
    let stats = tuning.boss_stats.clone();
    let zones = HitZones::new(vec![
        HitZone::new(ZoneKind::Bite, Vec2::new(1.5, 0.0), Vec2::new(1.0, 0.75), MASK_ENEMY_ATTACK),
        HitZone::new(ZoneKind::Claw, Vec2::new(2.0, 0.0), Vec2::new(1.5, 1.0), MASK_ENEMY_ATTACK),
        HitZone::new(ZoneKind::UpperSlash, Vec2::new(0.5, 2.5), Vec2::new(1.5, 1.0), MASK_ENEMY_ATTACK),
    ]);

    commands
        .spawn((
            Actor,
            Transform::from_translation(position.extend(0.0)),
            ResourceLedger::for_bot(&stats),
            BossBrain::new(tuning.boss.clone()),
            stats,
            zones,
            ZoneContacts::default(),
            Hurtbox::new(Vec2::new(1.2, 1.0), LAYER_ENEMY),
            Velocity::default(),
            DeathPolicy::Disable,
        ))
        .id()
}

/// Chest: breaks on the first hit, awards `CHEST_SCORE` once.
pub fn spawn_chest(commands: &mut Commands, position: Vec2) -> Entity {
    commands
        .spawn((
            Transform::from_translation(position.extend(0.0)),
            Destructible::chest(CHEST_SCORE),
            Hurtbox::new(Vec2::new(0.5, 0.5), LAYER_PROP),
        ))
        .id()
}
