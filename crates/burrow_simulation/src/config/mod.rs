//! Data-driven combat tuning.
//!
//! Every value mirrors what designers set on the original prefabs; `Default`
//! impls carry those numbers so a missing tuning file still gives a playable
//! setup. Files are RON, partial files are fine (`#[serde(default)]`).
//!
//! ```ignore
//! let tuning = CombatTuning::load("assets/config/tuning.ron")?;
//! app.insert_resource(tuning);
//! ```

use bevy::prelude::*;
use serde::{Deserialize, Serialize};

use crate::error::ConfigError;

/// Complete tuning set, inserted as a resource by `SimulationPlugin`.
#[derive(Resource, Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct CombatTuning {
    pub player: PlayerTuning,
    pub bot: BotStats,
    pub stagger: StaggerConfig,
    pub boss_stats: BotStats,
    pub boss: BossConfig,
    pub acid: AcidConfig,
    pub fireball: FireballConfig,
    pub spells: SpellCasterConfig,
}

impl Default for CombatTuning {
    fn default() -> Self {
        Self {
            player: PlayerTuning::default(),
            bot: BotStats::default(),
            stagger: StaggerConfig::default(),
            boss_stats: BotStats::bug_boss(),
            boss: BossConfig::default(),
            acid: AcidConfig::default(),
            fireball: FireballConfig::default(),
            spells: SpellCasterConfig::default(),
        }
    }
}

impl CombatTuning {
    pub fn from_ron_str(source: &str) -> Result<Self, ConfigError> {
        let tuning: CombatTuning = ron::from_str(source)?;
        tuning.validate()?;
        Ok(tuning)
    }

    pub fn load(path: &str) -> Result<Self, ConfigError> {
        let contents = std::fs::read_to_string(path).map_err(|source| ConfigError::Io {
            path: path.to_string(),
            source,
        })?;
        Self::from_ron_str(&contents)
    }

    /// Rejects values the decision logic can't work with.
    pub fn validate(&self) -> Result<(), ConfigError> {
        let boss = &self.boss;
        if boss.close_range > boss.medium_range {
            return Err(ConfigError::Invalid(format!(
                "boss close_range ({}) > medium_range ({})",
                boss.close_range, boss.medium_range
            )));
        }

        let chances = [
            ("medium_range_acid_chance", boss.medium_range_acid_chance),
            ("far_range_charge_chance", boss.far_range_charge_chance),
            ("far_range_acid_chance", boss.far_range_acid_chance),
            ("charge_combo_hp_threshold", boss.charge_combo_hp_threshold),
            ("charge_combo_chance", boss.charge_combo_chance),
            ("second_hit_chance", self.stagger.second_hit_chance),
            ("later_hit_chance", self.stagger.later_hit_chance),
        ];
        for (name, value) in chances {
            if !(0.0..=1.0).contains(&value) {
                return Err(ConfigError::Invalid(format!("{} must be in [0, 1], got {}", name, value)));
            }
        }

        for stats in [&self.bot, &self.boss_stats] {
            if stats.max_health <= 0.0 {
                return Err(ConfigError::Invalid(format!(
                    "'{}' max_health must be positive, got {}",
                    stats.name, stats.max_health
                )));
            }
        }

        if self.player.attack_speed <= 0.0 {
            return Err(ConfigError::Invalid(format!(
                "player attack_speed must be positive, got {}",
                self.player.attack_speed
            )));
        }

        Ok(())
    }
}

/// Player resources and melee attack.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct PlayerTuning {
    pub max_health: f32,
    pub max_mana: f32,
    pub max_stamina: f32,
    pub health_regen: f32,
    pub mana_regen: f32,
    pub stamina_regen: f32,
    pub move_speed: f32,
    pub attack_damage: f32,
    /// Attacks per second
    pub attack_speed: f32,
    pub attack_range: f32,
    /// Attack point relative to the player origin, mirrored by facing
    pub attack_offset: [f32; 2],
}

impl Default for PlayerTuning {
    fn default() -> Self {
        Self {
            max_health: 100.0,
            max_mana: 100.0,
            max_stamina: 100.0,
            health_regen: 1.0,
            mana_regen: 2.0,
            stamina_regen: 10.0,
            move_speed: 5.0,
            attack_damage: 20.0,
            attack_speed: 1.0,
            attack_range: 1.5,
            attack_offset: [0.8, 0.0],
        }
    }
}

/// Base stats shared by every enemy type.
#[derive(Component, Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct BotStats {
    pub name: String,
    pub max_health: f32,
    pub damage: f32,
    pub move_speed: f32,
    pub attack_speed: f32,
    pub attack_distance: f32,
}

impl Default for BotStats {
    fn default() -> Self {
        Self {
            name: "bot".to_string(),
            max_health: 100.0,
            damage: 10.0,
            move_speed: 20.0,
            attack_speed: 1.0,
            attack_distance: 2.0,
        }
    }
}

impl BotStats {
    pub fn bug_boss() -> Self {
        Self {
            name: "bug_boss".to_string(),
            max_health: 500.0,
            damage: 10.0,
            move_speed: 4.0,
            attack_speed: 1.0,
            attack_distance: 2.0,
        }
    }
}

/// Melee bot stagger and movement tolerances.
#[derive(Component, Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct StaggerConfig {
    /// Stun chance on the 2nd hit since the last stun/reset
    pub second_hit_chance: f32,
    /// Stun chance on the 3rd and later hits
    pub later_hit_chance: f32,
    /// Fallback stun length if the animation never reports EndStun
    pub stun_duration: f32,
    /// |velocity.x| must exceed this to flip facing
    pub facing_deadband: f32,
    /// Waypoint / last-known-position arrival tolerance
    pub arrival_tolerance: f32,
}

impl Default for StaggerConfig {
    fn default() -> Self {
        Self {
            second_hit_chance: 0.7,
            later_hit_chance: 0.3,
            stun_duration: 1.0,
            facing_deadband: 0.1,
            arrival_tolerance: 0.1,
        }
    }
}

/// Bug boss encounter tuning (distances measured from the boss origin).
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct BossConfig {
    pub close_range: f32,
    pub medium_range: f32,
    /// No facing flips and no horizontal movement while |dx| is below this
    pub horizontal_dead_zone: f32,
    /// Above this vertical separation the boss only walks under the target
    pub vertical_threshold: f32,

    pub charge_speed: f32,
    pub charge_delay: f32,
    pub charge_duration: f32,
    pub charge_damage: f32,
    pub impact_stun_duration: f32,
    pub knockback_horizontal: f32,
    pub knockback_vertical: f32,

    pub bite_damage: f32,
    pub slash_damage: f32,

    pub medium_range_acid_chance: f32,
    pub far_range_charge_chance: f32,
    pub far_range_acid_chance: f32,
    pub charge_combo_hp_threshold: f32,
    pub charge_combo_chance: f32,

    pub vision_radius: f32,
    /// Base far-band decision cooldown, scaled by the delay multiplier
    pub far_decision_interval: f32,
    /// Base watchdog timeout, scaled by the delay multiplier
    pub watchdog_duration: f32,
    /// Acid spawn point relative to the boss origin, mirrored by facing
    pub fire_point: Option<[f32; 2]>,
}

impl Default for BossConfig {
    fn default() -> Self {
        Self {
            close_range: 2.0,
            medium_range: 5.0,
            horizontal_dead_zone: 0.5,
            vertical_threshold: 2.0,
            charge_speed: 15.0,
            charge_delay: 1.0,
            charge_duration: 3.0,
            charge_damage: 20.0,
            impact_stun_duration: 0.7,
            knockback_horizontal: 10.0,
            knockback_vertical: 5.0,
            bite_damage: 10.0,
            slash_damage: 20.0,
            medium_range_acid_chance: 0.5,
            far_range_charge_chance: 0.4,
            far_range_acid_chance: 0.3,
            charge_combo_hp_threshold: 0.5,
            charge_combo_chance: 0.6,
            vision_radius: 20.0,
            far_decision_interval: 1.0,
            watchdog_duration: 3.0,
            fire_point: Some([1.5, 0.5]),
        }
    }
}

/// Boss acid glob.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct AcidConfig {
    pub speed: f32,
    pub lifetime: f32,
    /// Flight contact radius
    pub collider_radius: f32,
    pub explosion_duration: f32,
    pub explosion_scale: f32,
    pub explosion_radius: f32,
    pub damage: f32,
}

impl Default for AcidConfig {
    fn default() -> Self {
        Self {
            speed: 15.0,
            lifetime: 5.0,
            collider_radius: 0.25,
            explosion_duration: 0.5,
            explosion_scale: 2.0,
            explosion_radius: 1.0,
            damage: 15.0,
        }
    }
}

/// Player fireball: grows in place, flies, explodes.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct FireballConfig {
    pub cast_time: f32,
    pub speed: f32,
    pub lifetime: f32,
    pub growth_duration: f32,
    pub start_size: f32,
    pub cast_size: f32,
    pub explosion_size: f32,
    pub damage: f32,
    /// Time the exploded fireball stays around before despawn
    pub linger: f32,
}

impl Default for FireballConfig {
    fn default() -> Self {
        Self {
            cast_time: 0.5,
            speed: 15.0,
            lifetime: 0.7,
            growth_duration: 0.07,
            start_size: 0.1,
            cast_size: 1.0,
            explosion_size: 3.0,
            damage: 20.0,
            linger: 0.2,
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum SpellKind {
    Fireball,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct SpellEntry {
    pub name: String,
    pub kind: SpellKind,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct SpellCasterConfig {
    pub cooldown: f32,
    /// Spell spawn distance in front of the caster
    pub spawn_offset: f32,
    pub spells: Vec<SpellEntry>,
}

impl Default for SpellCasterConfig {
    fn default() -> Self {
        Self {
            cooldown: 1.0,
            spawn_offset: 1.0,
            spells: vec![SpellEntry {
                name: "Fireball".to_string(),
                kind: SpellKind::Fireball,
            }],
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_defaults_validate() {
        assert!(CombatTuning::default().validate().is_ok());
    }

    #[test]
    fn test_partial_ron_keeps_defaults() {
        let tuning = CombatTuning::from_ron_str(
            "(boss: (close_range: 1.5, medium_range: 6.0), stagger: (second_hit_chance: 1.0))",
        )
        .expect("valid tuning");

        assert_eq!(tuning.boss.close_range, 1.5);
        assert_eq!(tuning.boss.medium_range, 6.0);
        assert_eq!(tuning.boss.charge_speed, 15.0);
        assert_eq!(tuning.stagger.second_hit_chance, 1.0);
        assert_eq!(tuning.stagger.later_hit_chance, 0.3);
        assert_eq!(tuning.player, PlayerTuning::default());
        assert_eq!(tuning.boss_stats.move_speed, 4.0);
    }

    #[test]
    fn test_inverted_bands_rejected() {
        let result = CombatTuning::from_ron_str("(boss: (close_range: 6.0, medium_range: 5.0))");
        assert!(matches!(result, Err(ConfigError::Invalid(_))));
    }

    #[test]
    fn test_chance_out_of_range_rejected() {
        let result = CombatTuning::from_ron_str("(boss: (far_range_charge_chance: 1.5))");
        assert!(matches!(result, Err(ConfigError::Invalid(_))));
    }

    #[test]
    fn test_garbage_is_parse_error() {
        let result = CombatTuning::from_ron_str("(boss: [nope)");
        assert!(matches!(result, Err(ConfigError::Parse(_))));
    }

    #[test]
    fn test_missing_file_is_io_error() {
        let result = CombatTuning::load("does/not/exist.ron");
        assert!(matches!(result, Err(ConfigError::Io { .. })));
    }
}
