//! Animation collaborator bridge.
//!
//! ECS never plays clips. It sends `AnimationCommand`s (triggers, bools,
//! playback rate, direct play) and receives `AnimationCallback`s when a clip
//! reaches an event frame. Callback names are resolved through
//! `AnimationCallbackTable` into typed `AnimationHook`s, which the owning
//! domain handles on its own schedule (never inside the decision tick that
//! started the clip).
//!
//! ```text
//! ECS: AnimationCommand::trigger(boss, "IsBite")
//!   ↓
//! Engine: AnimationTree plays bite, event frame "BiteHit"
//!   ↓
//! ECS: AnimationCallback { boss, "BiteHit" } → AnimationHookFired(BiteHit)
//! ```

use bevy::prelude::*;
use std::collections::HashMap;

pub mod headless;

pub use headless::{ClipEvents, HeadlessAnimationPlugin, HeadlessAnimator};

// ============================================================================
// Commands (ECS → engine)
// ============================================================================

#[derive(Debug, Clone, PartialEq)]
pub enum AnimOp {
    SetTrigger(&'static str),
    ResetTrigger(&'static str),
    SetBool(&'static str, bool),
    SetPlaybackRate(f32),
    /// Jump straight to a state (bypasses transitions)
    Play(&'static str),
}

#[derive(Event, Debug, Clone, PartialEq)]
pub struct AnimationCommand {
    pub entity: Entity,
    pub op: AnimOp,
}

impl AnimationCommand {
    pub fn trigger(entity: Entity, name: &'static str) -> Self {
        Self { entity, op: AnimOp::SetTrigger(name) }
    }

    pub fn reset_trigger(entity: Entity, name: &'static str) -> Self {
        Self { entity, op: AnimOp::ResetTrigger(name) }
    }

    pub fn set_bool(entity: Entity, name: &'static str, value: bool) -> Self {
        Self { entity, op: AnimOp::SetBool(name, value) }
    }

    pub fn playback_rate(entity: Entity, rate: f32) -> Self {
        Self { entity, op: AnimOp::SetPlaybackRate(rate) }
    }

    pub fn play(entity: Entity, state: &'static str) -> Self {
        Self { entity, op: AnimOp::Play(state) }
    }
}

// ============================================================================
// Callbacks (engine → ECS)
// ============================================================================

/// Raw animation event as reported by the engine.
#[derive(Event, Debug, Clone, PartialEq)]
pub struct AnimationCallback {
    pub entity: Entity,
    pub name: String,
}

impl AnimationCallback {
    pub fn new(entity: Entity, name: impl Into<String>) -> Self {
        Self { entity, name: name.into() }
    }
}

/// Typed animation hook.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum AnimationHook {
    /// Melee bot: impact frame of the attack swing
    PerformAttack,
    /// Melee bot: attack clip finished
    EndAttack,
    /// Melee bot: stagger clip finished
    EndStun,
    /// Boss: slash impact frame
    SlashHit,
    /// Boss: bite impact frame
    BiteHit,
    /// Boss: acid release frame
    SpawnAcid,
    /// Boss: terminal frame of bite / slash / acid
    AttackFinished,
    /// Any actor: death clip finished
    DeathFinished,
}

#[derive(Event, Debug, Clone, Copy, PartialEq)]
pub struct AnimationHookFired {
    pub entity: Entity,
    pub hook: AnimationHook,
}

/// Registered callback table keyed by animation-event name.
#[derive(Resource, Debug, Clone)]
pub struct AnimationCallbackTable {
    hooks: HashMap<String, AnimationHook>,
}

impl Default for AnimationCallbackTable {
    fn default() -> Self {
        let mut table = Self { hooks: HashMap::new() };
        table
            .register("PerformAttack", AnimationHook::PerformAttack)
            .register("EndAttack", AnimationHook::EndAttack)
            .register("EndStun", AnimationHook::EndStun)
            .register("SlashHit", AnimationHook::SlashHit)
            .register("BiteHit", AnimationHook::BiteHit)
            .register("SpawnAcid", AnimationHook::SpawnAcid)
            .register("AttackFinished", AnimationHook::AttackFinished)
            .register("OnDeath", AnimationHook::DeathFinished);
        table
    }
}

impl AnimationCallbackTable {
    pub fn register(&mut self, name: &str, hook: AnimationHook) -> &mut Self {
        self.hooks.insert(name.to_string(), hook);
        self
    }

    pub fn resolve(&self, name: &str) -> Option<AnimationHook> {
        self.hooks.get(name).copied()
    }
}

/// System: callback names → typed hooks. Unknown names are logged and dropped.
pub fn dispatch_animation_callbacks(
    mut callbacks: EventReader<AnimationCallback>,
    table: Res<AnimationCallbackTable>,
    mut hooks: EventWriter<AnimationHookFired>,
) {
    for callback in callbacks.read() {
        match table.resolve(&callback.name) {
            Some(hook) => {
                hooks.write(AnimationHookFired {
                    entity: callback.entity,
                    hook,
                });
            }
            None => {
                crate::logger::log_warning(&format!(
                    "⚠️ Unknown animation callback '{}' on {:?}, ignored",
                    callback.name, callback.entity
                ));
            }
        }
    }
}

/// Animation bridge plugin: events, callback table, dispatch.
///
/// Engine builds add this plugin and forward their animation events as
/// `AnimationCallback`. Headless builds also add `HeadlessAnimationPlugin`.
pub struct AnimationBridgePlugin;

impl Plugin for AnimationBridgePlugin {
    fn build(&self, app: &mut App) {
        app.add_event::<AnimationCommand>()
            .add_event::<AnimationCallback>()
            .add_event::<AnimationHookFired>()
            .init_resource::<AnimationCallbackTable>();

        app.add_systems(
            FixedUpdate,
            dispatch_animation_callbacks.in_set(crate::SimulationSet::Bridge),
        );
    }
}
