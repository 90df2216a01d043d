//! Headless stand-in for the engine animator.
//!
//! Records what the simulation asked for and replays clip event frames as
//! `AnimationCallback`s after a fixed delay, scaled by the playback rate.
//! Used by the runner binary and integration tests; engine builds leave it out.

use bevy::prelude::*;
use std::collections::HashMap;

use super::{AnimOp, AnimationCallback, AnimationCommand};
use crate::SimulationSet;

/// Event frames of one clip: (seconds from clip start at rate 1.0, callback name).
pub type ClipEvents = Vec<(f32, &'static str)>;

#[derive(Debug, Clone, PartialEq)]
struct PendingCallback {
    remaining: f32,
    name: &'static str,
}

/// Animator state mirror plus scripted clip timelines keyed by trigger.
#[derive(Component, Debug, Clone, PartialEq)]
pub struct HeadlessAnimator {
    /// Trigger name → event frames of the clip it starts
    clips: HashMap<&'static str, ClipEvents>,
    pending: Vec<PendingCallback>,
    /// Every trigger set so far, in order
    pub trigger_history: Vec<&'static str>,
    pub bools: HashMap<&'static str, bool>,
    pub playback_rate: f32,
    pub current_state: Option<&'static str>,
}

impl Default for HeadlessAnimator {
    fn default() -> Self {
        Self {
            clips: HashMap::new(),
            pending: Vec::new(),
            trigger_history: Vec::new(),
            bools: HashMap::new(),
            playback_rate: 1.0,
            current_state: None,
        }
    }
}

impl HeadlessAnimator {
    pub fn with_clip(mut self, trigger: &'static str, events: ClipEvents) -> Self {
        self.clips.insert(trigger, events);
        self
    }

    /// Melee bot controller: attack swing, stagger, death.
    pub fn melee_bot() -> Self {
        Self::default()
            .with_clip("IsAttack", vec![(0.3, "PerformAttack"), (0.6, "EndAttack")])
            .with_clip("OnDamaged", vec![(0.5, "EndStun")])
            .with_clip("IsDead", vec![(1.0, "OnDeath")])
    }

    /// Bug boss controller. Hurt flashes (`OnDamaged`) play on a separate layer
    /// and don't interrupt the attack clip.
    pub fn bug_boss() -> Self {
        Self::default()
            .with_clip("IsBite", vec![(0.3, "BiteHit"), (0.6, "AttackFinished")])
            .with_clip("IsSlashing", vec![(0.35, "SlashHit"), (0.7, "AttackFinished")])
            .with_clip("IsAcid", vec![(0.4, "SpawnAcid"), (0.8, "AttackFinished")])
            .with_clip("IsDead", vec![(1.5, "OnDeath")])
    }

    pub fn bool_value(&self, name: &str) -> Option<bool> {
        self.bools.get(name).copied()
    }

    pub fn has_pending(&self) -> bool {
        !self.pending.is_empty()
    }

    fn apply(&mut self, op: &AnimOp) {
        match *op {
            AnimOp::SetTrigger(name) => {
                self.trigger_history.push(name);
                if let Some(events) = self.clips.get(name) {
                    self.current_state = Some(name);
                    self.pending = events
                        .iter()
                        .map(|&(at, callback)| PendingCallback {
                            remaining: at,
                            name: callback,
                        })
                        .collect();
                }
            }
            AnimOp::ResetTrigger(_) => {}
            AnimOp::SetBool(name, value) => {
                self.bools.insert(name, value);
            }
            AnimOp::SetPlaybackRate(rate) => {
                self.playback_rate = rate;
            }
            AnimOp::Play(state) => {
                self.current_state = Some(state);
                self.pending.clear();
            }
        }
    }

    /// Advances clip time, returns callbacks whose frame was reached.
    fn advance(&mut self, delta: f32) -> Vec<&'static str> {
        let step = delta * self.playback_rate;
        let mut due = Vec::new();
        for pending in self.pending.iter_mut() {
            pending.remaining -= step;
            if pending.remaining <= 0.0 {
                due.push(pending.name);
            }
        }
        self.pending.retain(|p| p.remaining > 0.0);
        due
    }
}

/// System: apply animation commands to headless animators.
pub fn apply_headless_animation_commands(
    mut commands: EventReader<AnimationCommand>,
    mut animators: Query<&mut HeadlessAnimator>,
) {
    for command in commands.read() {
        if let Ok(mut animator) = animators.get_mut(command.entity) {
            animator.apply(&command.op);
        }
    }
}

/// System: fire due clip event frames as `AnimationCallback`.
pub fn tick_headless_clips(
    time: Res<Time>,
    mut animators: Query<(Entity, &mut HeadlessAnimator)>,
    mut callbacks: EventWriter<AnimationCallback>,
) {
    let delta = time.delta_secs();
    for (entity, mut animator) in animators.iter_mut() {
        for name in animator.advance(delta) {
            callbacks.write(AnimationCallback::new(entity, name));
        }
    }
}

/// Headless animator plugin.
///
/// Applies last tick's commands, then fires due event frames before the
/// callback table dispatches them.
pub struct HeadlessAnimationPlugin;

impl Plugin for HeadlessAnimationPlugin {
    fn build(&self, app: &mut App) {
        app.add_systems(
            FixedUpdate,
            (apply_headless_animation_commands, tick_headless_clips)
                .chain()
                .in_set(SimulationSet::EngineInput),
        );
    }
}
