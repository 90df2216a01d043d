//! Breakable props (crates, chests).

use bevy::prelude::*;

/// Prop that breaks on the first hit.
///
/// Chests carry a `score_reward`, awarded once when they break.
#[derive(Component, Debug, Clone, Default, PartialEq)]
pub struct Destructible {
    pub broken: bool,
    pub score_reward: Option<u32>,
}

impl Destructible {
    pub fn prop() -> Self {
        Self::default()
    }

    pub fn chest(reward: u32) -> Self {
        Self {
            broken: false,
            score_reward: Some(reward),
        }
    }
}

/// Default chest reward.
pub const CHEST_SCORE: u32 = 50;
