//! Spawn-time validation of bot setup.

use bevy::prelude::*;

use crate::ai::{BotBrain, Waypoints};
use crate::components::Inactive;
use crate::error::CombatError;
use crate::physics::{HitZones, ZoneKind};

/// Система: validate newly spawned bots
///
/// Missing vision/attack zone → logged, bot disabled (`Inactive`).
/// Missing waypoints → logged, bot idles until it sees someone.
pub fn validate_bot_setup(
    mut commands: Commands,
    bots: Query<(Entity, Option<&HitZones>, Option<&Waypoints>), Added<BotBrain>>,
) {
    for (entity, zones, waypoints) in bots.iter() {
        let mut problems = Vec::new();
        for (kind, what) in [(ZoneKind::Vision, "vision zone"), (ZoneKind::Attack, "attack zone")] {
            if !zones.is_some_and(|z| z.has(kind)) {
                problems.push(CombatError::MissingReference { owner: "melee bot", what });
            }
        }

        if !problems.is_empty() {
            for problem in problems.iter() {
                crate::logger::log_error(&format!("❌ Bot {:?}: {}", entity, problem));
            }
            commands.entity(entity).insert(Inactive);
            continue;
        }

        if waypoints.is_none_or(|w| w.points.is_empty()) {
            crate::logger::log_error(&format!(
                "❌ Bot {:?}: {}",
                entity,
                CombatError::MissingReference {
                    owner: "melee bot",
                    what: "waypoints"
                }
            ));
        }
    }
}
