//! Score board (injected resource instead of a global counter).

use bevy::prelude::*;

use crate::combat::PropBroken;

/// Current run score. Negative amounts subtract.
#[derive(Resource, Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct ScoreBoard {
    score: i32,
}

impl ScoreBoard {
    pub fn get(&self) -> i32 {
        self.score
    }

    pub fn add(&mut self, amount: i32) -> i32 {
        self.score = self.score.saturating_add(amount);
        self.score
    }

    pub fn set(&mut self, score: i32) {
        self.score = score;
    }

    pub fn reset(&mut self) {
        self.score = 0;
    }
}

/// Score changed (UI).
#[derive(Event, Debug, Clone, Copy, PartialEq, Eq)]
pub struct ScoreChanged {
    pub score: i32,
}

/// Система: broken chests → score
pub fn award_prop_rewards(
    mut broken_events: EventReader<PropBroken>,
    mut board: ResMut<ScoreBoard>,
    mut score_events: EventWriter<ScoreChanged>,
) {
    for broken in broken_events.read() {
        let Some(reward) = broken.reward else {
            continue;
        };
        let score = board.add(i32::try_from(reward).unwrap_or(i32::MAX));
        score_events.write(ScoreChanged { score });
        crate::logger::log(&format!("⭐ {:?} awarded {}, score {}", broken.entity, reward, score));
    }
}
