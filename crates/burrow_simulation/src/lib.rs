//! BURROW Simulation Core
//!
//! ECS-симуляция на Bevy 0.16: enemy AI and combat rules of a 2D platformer.
//!
//! HYBRID ARCHITECTURE:
//! - ECS = game rules (ledgers, damage, bot FSM, boss decisions, projectiles)
//! - Engine = physics, animation playback, rendering, input
//!
//! The two sides only talk through events: zone overlaps, charge contacts and
//! animation callbacks come in; move intents, knockback impulses and
//! animation commands go out. `HeadlessPhysicsPlugin` and
//! `HeadlessAnimationPlugin` stand in for the engine in tests and the runner.

use bevy::prelude::*;
use bevy::time::TimeUpdateStrategy;
use std::time::Duration;

// Публичные модули
pub mod ai;
pub mod animation;
pub mod boss;
pub mod combat;
pub mod components;
pub mod config;
pub mod dice;
pub mod error;
pub mod logger;
pub mod physics;
pub mod player;
pub mod progress;
pub mod projectiles;
pub mod spawn;

// Re-export базовых типов для удобства
pub use ai::{AIPlugin, BotBrain, BotState, DecisionMaker, Waypoints};
pub use animation::{
    AnimationBridgePlugin, AnimationCallback, AnimationCommand, AnimationHook, HeadlessAnimationPlugin,
    HeadlessAnimator,
};
pub use boss::{BossActivity, BossAttack, BossBrain, BossPlugin};
pub use combat::{
    ActorDied, CombatPlugin, CombatTimer, DamageDealt, DamageRequest, DamageSource, Destructible, ResourceChanged,
    ResourceKind, ResourceLedger, ValueKind,
};
pub use components::*;
pub use config::CombatTuning;
pub use dice::{CombatDice, DeterministicRng, Roller, ScriptedRolls};
pub use error::{CombatError, ConfigError};
pub use logger::{init_logger, log, log_error, log_info, log_warning};
pub use physics::{HeadlessPhysicsPlugin, PhysicsBridgePlugin};
pub use player::PlayerPlugin;
pub use progress::{ProgressPlugin, RunContext, ScoreBoard};
pub use projectiles::ProjectilePlugin;

/// Simulation tick rate (FixedUpdate)
pub const TICK_HZ: f64 = 60.0;

/// Seed used when nobody inserted `CombatDice` before `SimulationPlugin`
pub const DEFAULT_SEED: u64 = 42;

/// Length of one simulation tick.
pub fn tick_duration() -> Duration {
    Duration::from_secs_f64(1.0 / TICK_HZ)
}

/// Фазы одного тика (FixedUpdate), выполняются строго по порядку.
///
/// Systems sharing `CombatDice` live in different sets, so the roll order
/// (and the whole run) is reproducible for a given seed.
#[derive(SystemSet, Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum SimulationSet {
    /// Engine → ECS: headless physics/animation stand-ins
    EngineInput,
    /// Zone contacts, animation callback dispatch
    Bridge,
    /// Melee bot FSM
    Bots,
    /// Boss decision engine
    Boss,
    /// Player attack and spells
    PlayerCombat,
    /// Acid, fireballs
    Projectiles,
    /// DamageRequest → ledgers
    Resolve,
    /// Stagger, rage, death policies
    React,
    /// Regen, score, run context
    Upkeep,
}

/// Главный plugin симуляции (объединяет все подсистемы)
///
/// Keeps an already inserted `CombatTuning` / `CombatDice`.
pub struct SimulationPlugin;

impl Plugin for SimulationPlugin {
    fn build(&self, app: &mut App) {
        // Fixed timestep 60Hz для simulation tick
        app.insert_resource(Time::<Fixed>::from_hz(TICK_HZ))
            .init_resource::<CombatTuning>();

        if !app.world().contains_resource::<CombatDice>() {
            app.insert_resource(CombatDice::seeded(DEFAULT_SEED));
        }

        app.configure_sets(
            FixedUpdate,
            (
                SimulationSet::EngineInput,
                SimulationSet::Bridge,
                SimulationSet::Bots,
                SimulationSet::Boss,
                SimulationSet::PlayerCombat,
                SimulationSet::Projectiles,
                SimulationSet::Resolve,
                SimulationSet::React,
                SimulationSet::Upkeep,
            )
                .chain(),
        );

        app.add_plugins((
            PhysicsBridgePlugin,
            AnimationBridgePlugin,
            CombatPlugin,
            AIPlugin,
            BossPlugin,
            PlayerPlugin,
            ProjectilePlugin,
            ProgressPlugin,
        ));
    }
}

/// Создаёт headless App: MinimalPlugins, the simulation and the engine stand-ins.
///
/// Every `app.update()` advances time by exactly one tick, so one update runs
/// FixedUpdate once.
pub fn create_headless_app(seed: u64) -> App {
    init_logger();

    let mut app = App::new();
    app.add_plugins(MinimalPlugins)
        .insert_resource(TimeUpdateStrategy::ManualDuration(tick_duration()))
        .insert_resource(CombatDice::seeded(seed))
        .add_plugins((SimulationPlugin, HeadlessPhysicsPlugin, HeadlessAnimationPlugin));

    app
}

/// Snapshot мира для сравнения детерминизма
///
/// Components of type `T` sorted by entity index, serialized through `Debug`.
pub fn world_snapshot<T: Component + std::fmt::Debug>(world: &mut World) -> Vec<u8> {
    let mut query = world.query::<(Entity, &T)>();
    let mut entities: Vec<_> = query.iter(world).collect();

    // Сортируем по Entity ID для детерминизма
    entities.sort_by_key(|(entity, _)| entity.index());

    let mut snapshot = Vec::new();
    for (entity, component) in entities {
        snapshot.extend_from_slice(&entity.index().to_le_bytes());
        snapshot.extend_from_slice(format!("{:?}", component).as_bytes());
    }

    snapshot
}
