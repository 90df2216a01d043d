//! Boss acid glob: flight → explosion (one player hit) → growth → despawn.

use bevy::prelude::*;

use crate::animation::AnimationCommand;
use crate::combat::{CombatTimer, DamageRequest, DamageSource};
use crate::config::{AcidConfig, CombatTuning};
use crate::physics::{
    ArenaBounds, Hurtbox, OverlapQuery, LAYER_ENVIRONMENT, LAYER_PLAYER, LAYER_PROP, MASK_ENEMY_ATTACK,
};

/// Anything but enemies stops the glob
const ACID_STOP_MASK: u32 = LAYER_PLAYER | LAYER_PROP | LAYER_ENVIRONMENT;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Reflect)]
pub enum AcidPhase {
    Flying,
    /// Growing splash, despawns when the growth timer runs out
    Exploded,
}

#[derive(Component, Debug, Clone, PartialEq)]
pub struct AcidProjectile {
    pub owner: Option<Entity>,
    /// Unit flight direction
    pub direction: Vec2,
    pub phase: AcidPhase,
    pub lifetime: CombatTimer,
    pub growth: CombatTimer,
    pub scale: f32,
}

impl AcidProjectile {
    pub fn new(owner: Option<Entity>, direction: Vec2, config: &AcidConfig) -> Self {
        let mut lifetime = CombatTimer::default();
        lifetime.start(config.lifetime);
        Self {
            owner,
            direction: direction.normalize_or(Vec2::X),
            phase: AcidPhase::Flying,
            lifetime,
            growth: CombatTimer::default(),
            scale: 1.0,
        }
    }

    /// Returns false if already exploded (explosion happens once).
    pub fn explode(&mut self, config: &AcidConfig) -> bool {
        if self.phase == AcidPhase::Exploded {
            return false;
        }
        self.phase = AcidPhase::Exploded;
        self.lifetime.cancel();
        self.growth.start(config.explosion_duration);
        true
    }

    /// Grows the splash; true once it's fully grown (time to despawn).
    pub fn tick_growth(&mut self, delta: f32, config: &AcidConfig) -> bool {
        let done = self.growth.tick(delta) || self.growth.is_expired();
        self.scale = 1.0 + (config.explosion_scale - 1.0) * self.growth.progress();
        done
    }
}

/// Spawns an acid glob at `origin` flying along `direction`.
pub fn spawn_acid(
    commands: &mut Commands,
    owner: Option<Entity>,
    origin: Vec2,
    direction: Vec2,
    config: &AcidConfig,
) -> Entity {
    commands
        .spawn((
            AcidProjectile::new(owner, direction, config),
            Transform::from_translation(origin.extend(0.0)),
        ))
        .id()
}

/// Система: acid flight, explosion, growth
///
/// Explodes on the first non-enemy body it touches, on leaving the arena, or
/// when its lifetime runs out. The explosion damages at most one player.
#[allow(clippy::too_many_arguments)]
pub fn tick_acid_projectiles(
    mut commands: Commands,
    time: Res<Time>,
    tuning: Res<CombatTuning>,
    bounds: Option<Res<ArenaBounds>>,
    mut acids: Query<(Entity, &mut AcidProjectile, &mut Transform), Without<Hurtbox>>,
    overlap: OverlapQuery,
    mut damage: EventWriter<DamageRequest>,
    mut animation: EventWriter<AnimationCommand>,
) {
    let delta = time.delta_secs();
    let config = &tuning.acid;

    for (entity, mut acid, mut transform) in acids.iter_mut() {
        match acid.phase {
            AcidPhase::Flying => {
                let step = acid.direction * config.speed * delta;
                transform.translation += step.extend(0.0);
                let position = transform.translation.truncate();

                let expired = acid.lifetime.tick(delta);
                let out_of_arena = bounds
                    .as_ref()
                    .is_some_and(|b| position.x <= b.min_x || position.x >= b.max_x);
                let touched = !overlap
                    .area(position, config.collider_radius, ACID_STOP_MASK)
                    .is_empty();

                if !(expired || out_of_arena || touched) || !acid.explode(config) {
                    continue;
                }

                animation.write(AnimationCommand::set_bool(entity, "exploded", true));

                // One hit per explosion, even if the player has several bodies
                if let Some(victim) = overlap
                    .area(position, config.explosion_radius, MASK_ENEMY_ATTACK)
                    .into_iter()
                    .next()
                {
                    damage.write(DamageRequest {
                        attacker: acid.owner,
                        target: victim,
                        amount: config.damage,
                        source: DamageSource::Acid,
                    });
                }
                crate::logger::log(&format!("🧪 Acid {:?} exploded at {:.2}", entity, position.x));
            }
            AcidPhase::Exploded => {
                let done = acid.tick_growth(delta, config);
                transform.scale = Vec3::splat(acid.scale);
                if done {
                    commands.entity(entity).despawn();
                }
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_acid_explodes_once_and_grows() {
        let config = AcidConfig::default();
        let mut acid = AcidProjectile::new(None, Vec2::new(-3.0, 0.0), &config);
        assert_eq!(acid.direction, Vec2::NEG_X);

        assert!(acid.explode(&config));
        assert!(!acid.explode(&config));

        assert!(!acid.tick_growth(0.25, &config));
        assert!((acid.scale - 1.5).abs() < 1e-5);
        assert!(acid.tick_growth(0.25, &config));
        assert_eq!(acid.scale, 2.0);
    }

    #[test]
    fn test_zero_direction_falls_back() {
        let acid = AcidProjectile::new(None, Vec2::ZERO, &AcidConfig::default());
        assert_eq!(acid.direction, Vec2::X);
    }
}
