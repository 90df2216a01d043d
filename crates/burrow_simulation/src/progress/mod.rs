//! Run progress: score and the run context carried between levels.
//!
//! Both are plain Bevy resources. UI reads `ScoreChanged` and
//! `ResourceChanged`; level flow sends `RunContextRequest`.

use bevy::prelude::*;

pub mod run_context;
pub mod score;

pub use run_context::{RunContext, RunContextRequest, RunSnapshot, SavedResource};
pub use score::{ScoreBoard, ScoreChanged};

use crate::SimulationSet;

pub struct ProgressPlugin;

impl Plugin for ProgressPlugin {
    fn build(&self, app: &mut App) {
        app.init_resource::<ScoreBoard>()
            .init_resource::<RunContext>()
            .add_event::<ScoreChanged>()
            .add_event::<RunContextRequest>();

        app.add_systems(
            FixedUpdate,
            (score::award_prop_rewards, run_context::process_run_context_requests)
                .chain()
                .in_set(SimulationSet::Upkeep),
        );
    }
}
