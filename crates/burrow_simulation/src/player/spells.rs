//! Spell caster: spell list, selection, shared cooldown, spawning.

use bevy::prelude::*;

use crate::combat::CombatTimer;
use crate::components::{Dead, Player};
use crate::config::{CombatTuning, SpellCasterConfig, SpellEntry, SpellKind};
use crate::error::CombatError;
use crate::physics::Facing;
use crate::player::{CastSpellIntent, CycleSpellIntent, SelectSpellIntent};
use crate::projectiles::spawn_fireball;

#[derive(Component, Debug, Clone, PartialEq)]
pub struct SpellCaster {
    pub spells: Vec<SpellEntry>,
    pub current: usize,
    /// Shared cooldown after any cast
    pub cooldown_duration: f32,
    pub cooldown: CombatTimer,
    pub spawn_offset: f32,
}

impl Default for SpellCaster {
    fn default() -> Self {
        Self::from_config(&SpellCasterConfig::default())
    }
}

impl SpellCaster {
    pub fn from_config(config: &SpellCasterConfig) -> Self {
        Self {
            spells: config.spells.clone(),
            current: 0,
            cooldown_duration: config.cooldown,
            cooldown: CombatTimer::default(),
            spawn_offset: config.spawn_offset,
        }
    }

    pub fn current_spell(&self) -> Option<&SpellEntry> {
        self.spells.get(self.current)
    }

    /// Out-of-range index → error, selection unchanged.
    pub fn select(&mut self, index: usize) -> Result<(), CombatError> {
        if index >= self.spells.len() {
            return Err(CombatError::IndexOutOfRange {
                what: "spell",
                index,
                len: self.spells.len(),
            });
        }
        self.current = index;
        Ok(())
    }

    /// Steps one spell forward (`direction > 0`) or back, wrapping around.
    pub fn cycle(&mut self, direction: i32) {
        let len = self.spells.len();
        if len == 0 || direction == 0 {
            return;
        }
        self.current = if direction > 0 {
            (self.current + 1) % len
        } else {
            (self.current + len - 1) % len
        };
    }

    pub fn is_on_cooldown(&self) -> bool {
        self.cooldown.is_running()
    }

    /// 0 right after a cast, 1 when ready (UI).
    pub fn cooldown_progress(&self) -> f32 {
        if self.cooldown_duration <= 0.0 || !self.is_on_cooldown() {
            return 1.0;
        }
        1.0 - self.cooldown.remaining / self.cooldown_duration
    }

    /// Selected spell if castable right now; starts the cooldown.
    pub fn try_cast(&mut self) -> Option<SpellKind> {
        if self.is_on_cooldown() {
            return None;
        }
        let kind = self.current_spell()?.kind;
        self.cooldown.start(self.cooldown_duration);
        Some(kind)
    }
}

/// Система: spell selection (index / scroll)
pub fn select_spells(
    mut selects: EventReader<SelectSpellIntent>,
    mut cycles: EventReader<CycleSpellIntent>,
    mut casters: Query<&mut SpellCaster>,
) {
    for intent in selects.read() {
        let Ok(mut caster) = casters.get_mut(intent.entity) else {
            continue;
        };
        if let Err(err) = caster.select(intent.index) {
            crate::logger::log_warning(&format!("⚠️ {:?}: {}", intent.entity, err));
        }
    }

    for intent in cycles.read() {
        let Ok(mut caster) = casters.get_mut(intent.entity) else {
            continue;
        };
        caster.cycle(intent.direction);
        if let Some(spell) = caster.current_spell() {
            crate::logger::log(&format!("🪄 {:?} selected {} ({})", intent.entity, spell.name, caster.current));
        }
    }
}

/// Система: spell casting
///
/// Cooldown tick, then casts. The spell spawns `spawn_offset` in front of
/// the caster and flies in the facing direction.
pub fn cast_spells(
    mut commands: Commands,
    time: Res<Time>,
    tuning: Res<CombatTuning>,
    mut intents: EventReader<CastSpellIntent>,
    mut casters: Query<(&mut SpellCaster, &Transform, &Facing), (With<Player>, Without<Dead>)>,
) {
    let delta = time.delta_secs();
    for (mut caster, _, _) in casters.iter_mut() {
        caster.cooldown.tick(delta);
    }

    for intent in intents.read() {
        let Ok((mut caster, transform, facing)) = casters.get_mut(intent.entity) else {
            continue;
        };
        let Some(kind) = caster.try_cast() else {
            continue;
        };

        let direction = Vec2::new(facing.sign(), 0.0);
        let origin = transform.translation.truncate() + direction * caster.spawn_offset;
        match kind {
            SpellKind::Fireball => {
                let fireball = spawn_fireball(&mut commands, Some(intent.entity), origin, direction, &tuning.fireball);
                crate::logger::log(&format!("🔥 {:?} cast fireball {:?}", intent.entity, fireball));
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn caster_with(count: usize) -> SpellCaster {
        SpellCaster {
            spells: (0..count)
                .map(|i| SpellEntry {
                    name: format!("spell{}", i),
                    kind: SpellKind::Fireball,
                })
                .collect(),
            ..Default::default()
        }
    }

    #[test]
    fn test_select_out_of_range_is_noop() {
        let mut caster = caster_with(2);
        caster.select(1).unwrap();

        let result = caster.select(5);

        assert!(matches!(
            result,
            Err(CombatError::IndexOutOfRange { index: 5, len: 2, .. })
        ));
        assert_eq!(caster.current, 1);
    }

    #[test]
    fn test_cycle_wraps_both_ways() {
        let mut caster = caster_with(3);

        caster.cycle(-1);
        assert_eq!(caster.current, 2);
        caster.cycle(1);
        assert_eq!(caster.current, 0);
        caster.cycle(1);
        caster.cycle(1);
        caster.cycle(1);
        assert_eq!(caster.current, 0);
    }

    #[test]
    fn test_cast_respects_cooldown() {
        let mut caster = caster_with(1);

        assert_eq!(caster.try_cast(), Some(SpellKind::Fireball));
        assert_eq!(caster.try_cast(), None);
        assert_eq!(caster.cooldown_progress(), 0.0);

        caster.cooldown.tick(0.5);
        assert!((caster.cooldown_progress() - 0.5).abs() < 1e-6);

        caster.cooldown.tick(0.5);
        assert_eq!(caster.try_cast(), Some(SpellKind::Fireball));
    }

    #[test]
    fn test_empty_spell_list_never_casts() {
        let mut caster = caster_with(0);
        caster.cycle(1);

        assert_eq!(caster.try_cast(), None);
        assert!(!caster.is_on_cooldown());
    }
}
