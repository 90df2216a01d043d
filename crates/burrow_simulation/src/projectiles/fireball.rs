//! Player fireball: cast growth in place → flight → explosion growth → AOE
//! damage to every enemy in radius → linger → despawn.

use bevy::prelude::*;

use crate::combat::{CombatTimer, DamageRequest, DamageSource};
use crate::config::{CombatTuning, FireballConfig};
use crate::physics::{Hurtbox, OverlapQuery, LAYER_ENEMY};

#[derive(Debug, Clone, Copy, PartialEq, Eq, Reflect)]
pub enum FireballPhase {
    Casting,
    Flying,
    Exploding,
    Lingering,
}

/// What the caller has to do after a tick.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum FireballEvent {
    None,
    /// Explosion fully grown: damage everything in `explosion_radius`
    Detonate,
    Despawn,
}

/// Ease-in-out curve with flat ends (smoothstep).
pub fn ease_in_out(t: f32) -> f32 {
    let t = t.clamp(0.0, 1.0);
    t * t * (3.0 - 2.0 * t)
}

#[derive(Component, Debug, Clone, PartialEq)]
pub struct Fireball {
    pub caster: Option<Entity>,
    pub direction: Vec2,
    pub phase: FireballPhase,
    pub timer: CombatTimer,
    pub size: f32,
    /// Size when the current growth phase started
    grow_from: f32,
}

impl Fireball {
    pub fn new(caster: Option<Entity>, direction: Vec2, config: &FireballConfig) -> Self {
        let mut timer = CombatTimer::default();
        timer.start(config.cast_time);
        Self {
            caster,
            direction: direction.normalize_or(Vec2::X),
            phase: FireballPhase::Casting,
            timer,
            size: config.start_size,
            grow_from: config.start_size,
        }
    }

    pub fn explosion_radius(config: &FireballConfig) -> f32 {
        config.explosion_size * 0.5
    }

    /// Contacts only count once the cast is over and before the explosion.
    pub fn is_armed(&self) -> bool {
        self.phase == FireballPhase::Flying
    }

    /// Early explosion on enemy contact. No-op unless flying.
    pub fn explode(&mut self, config: &FireballConfig) {
        if !self.is_armed() {
            return;
        }
        self.phase = FireballPhase::Exploding;
        self.grow_from = self.size;
        self.timer.start(config.growth_duration);
    }

    /// Advances the lifecycle. Returns the flight step (zero unless flying)
    /// and what the caller must do.
    pub fn tick(&mut self, delta: f32, config: &FireballConfig) -> (Vec2, FireballEvent) {
        match self.phase {
            FireballPhase::Casting => {
                let done = self.timer.tick(delta);
                self.size = self.grow_from + (config.cast_size - self.grow_from) * ease_in_out(self.timer.progress());
                if done {
                    self.phase = FireballPhase::Flying;
                    self.timer.start(config.lifetime);
                }
                (Vec2::ZERO, FireballEvent::None)
            }
            FireballPhase::Flying => {
                let step = self.direction * config.speed * delta;
                if self.timer.tick(delta) {
                    self.explode(config);
                }
                (step, FireballEvent::None)
            }
            FireballPhase::Exploding => {
                let done = self.timer.tick(delta);
                self.size =
                    self.grow_from + (config.explosion_size - self.grow_from) * ease_in_out(self.timer.progress());
                if done {
                    self.phase = FireballPhase::Lingering;
                    self.timer.start(config.linger);
                    return (Vec2::ZERO, FireballEvent::Detonate);
                }
                (Vec2::ZERO, FireballEvent::None)
            }
            FireballPhase::Lingering => {
                if self.timer.tick(delta) || self.timer.is_expired() {
                    return (Vec2::ZERO, FireballEvent::Despawn);
                }
                (Vec2::ZERO, FireballEvent::None)
            }
        }
    }
}

/// Spawns a fireball at `origin`, cast toward `direction`.
pub fn spawn_fireball(
    commands: &mut Commands,
    caster: Option<Entity>,
    origin: Vec2,
    direction: Vec2,
    config: &FireballConfig,
) -> Entity {
    let fireball = Fireball::new(caster, direction, config);
    let size = fireball.size;
    commands
        .spawn((
            fireball,
            Transform::from_translation(origin.extend(0.0)).with_scale(Vec3::splat(size)),
        ))
        .id()
}

/// Система: fireball lifecycle
///
/// Enemy contact while flying explodes early. The detonation hits every
/// enemy inside `explosion_size × 0.5`.
pub fn tick_fireballs(
    mut commands: Commands,
    time: Res<Time>,
    tuning: Res<CombatTuning>,
    mut fireballs: Query<(Entity, &mut Fireball, &mut Transform), Without<Hurtbox>>,
    overlap: OverlapQuery,
    mut damage: EventWriter<DamageRequest>,
) {
    let delta = time.delta_secs();
    let config = &tuning.fireball;

    for (entity, mut fireball, mut transform) in fireballs.iter_mut() {
        let (step, event) = fireball.tick(delta, config);
        transform.translation += step.extend(0.0);
        transform.scale = Vec3::splat(fireball.size);
        let position = transform.translation.truncate();

        match event {
            FireballEvent::None => {
                if fireball.is_armed() && !overlap.area(position, fireball.size * 0.5, LAYER_ENEMY).is_empty() {
                    fireball.explode(config);
                }
            }
            FireballEvent::Detonate => {
                let victims = overlap.area(position, Fireball::explosion_radius(config), LAYER_ENEMY);
                crate::logger::log(&format!(
                    "🔥 Fireball {:?} exploded, {} enemies in radius",
                    entity,
                    victims.len()
                ));
                for victim in victims {
                    damage.write(DamageRequest {
                        attacker: fireball.caster,
                        target: victim,
                        amount: config.damage,
                        source: DamageSource::Fireball,
                    });
                }
            }
            FireballEvent::Despawn => {
                commands.entity(entity).despawn();
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn run(fireball: &mut Fireball, config: &FireballConfig, seconds: f32, dt: f32) -> Vec<FireballEvent> {
        let mut events = Vec::new();
        let mut elapsed = 0.0;
        while elapsed < seconds {
            let (_, event) = fireball.tick(dt, config);
            if event != FireballEvent::None {
                events.push(event);
            }
            elapsed += dt;
        }
        events
    }

    #[test]
    fn test_ease_in_out_endpoints() {
        assert_eq!(ease_in_out(0.0), 0.0);
        assert_eq!(ease_in_out(0.5), 0.5);
        assert_eq!(ease_in_out(1.0), 1.0);
        assert_eq!(ease_in_out(2.0), 1.0);
    }

    #[test]
    fn test_cast_grows_in_place() {
        let config = FireballConfig::default();
        let mut fireball = Fireball::new(None, Vec2::X, &config);
        assert_eq!(fireball.size, 0.1);

        let (step, _) = fireball.tick(0.25, &config);
        assert_eq!(step, Vec2::ZERO);
        assert!((fireball.size - 0.55).abs() < 1e-5);

        fireball.tick(0.25, &config);
        assert_eq!(fireball.phase, FireballPhase::Flying);
        assert!((fireball.size - 1.0).abs() < 1e-5);

        // Not armed during cast, armed in flight
        let (step, _) = fireball.tick(0.1, &config);
        assert!((step.x - 1.5).abs() < 1e-5);
        assert!(fireball.is_armed());
    }

    #[test]
    fn test_full_lifecycle_detonates_once() {
        let config = FireballConfig::default();
        let mut fireball = Fireball::new(None, Vec2::NEG_X, &config);

        let events = run(&mut fireball, &config, 3.0, 0.05);

        assert_eq!(events.first(), Some(&FireballEvent::Detonate));
        assert_eq!(events.iter().filter(|e| **e == FireballEvent::Detonate).count(), 1);
        assert!(events.contains(&FireballEvent::Despawn));
        assert!((fireball.size - 3.0).abs() < 1e-4);
    }

    #[test]
    fn test_contact_before_cast_is_ignored() {
        let config = FireballConfig::default();
        let mut fireball = Fireball::new(None, Vec2::X, &config);

        fireball.explode(&config);
        assert_eq!(fireball.phase, FireballPhase::Casting);
    }
}
