//! Run context: carries player health, mana and score from one level to the next.
//!
//! Save at the end of a level, load at the start of the next one, reset when
//! the run ends. Restoring writes the maximum before the current value, so a
//! current above the level's default max is not clamped away.

use bevy::prelude::*;

use crate::combat::{ResourceChanged, ResourceKind, ResourceLedger, ResourceSnapshot, ValueKind};
use crate::components::Player;
use crate::error::CombatError;
use crate::progress::{ScoreBoard, ScoreChanged};

/// Saved current/max of one resource.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct SavedResource {
    pub current: f32,
    pub max: f32,
}

#[derive(Debug, Clone, Copy, PartialEq)]
pub struct RunSnapshot {
    pub health: Option<SavedResource>,
    pub mana: Option<SavedResource>,
    pub score: i32,
}

/// Run context resource. Empty until the first save.
#[derive(Resource, Debug, Clone, Default, PartialEq)]
pub struct RunContext {
    saved: Option<RunSnapshot>,
}

#[derive(Event, Debug, Clone, Copy, PartialEq, Eq)]
pub enum RunContextRequest {
    Save,
    Load,
    Reset,
}

fn saved(ledger: &ResourceLedger, kind: ResourceKind) -> Option<SavedResource> {
    ledger.pool(kind).map(|pool| SavedResource {
        current: pool.current,
        max: pool.max,
    })
}

impl RunContext {
    pub fn has_saved_data(&self) -> bool {
        self.saved.is_some()
    }

    pub fn snapshot(&self) -> Option<&RunSnapshot> {
        self.saved.as_ref()
    }

    /// Pulls player resources (if a player exists) and the score.
    pub fn save(&mut self, ledger: Option<&ResourceLedger>, score: &ScoreBoard) {
        self.saved = Some(RunSnapshot {
            health: ledger.and_then(|l| saved(l, ResourceKind::Health)),
            mana: ledger.and_then(|l| saved(l, ResourceKind::Mana)),
            score: score.get(),
        });
    }

    /// Pushes saved values back (max first, then current).
    ///
    /// Returns the snapshots to broadcast; `Ok(None)` when nothing was saved.
    pub fn load(
        &self,
        ledger: Option<&mut ResourceLedger>,
        score: &mut ScoreBoard,
    ) -> Result<Option<Vec<ResourceSnapshot>>, CombatError> {
        let Some(snapshot) = self.saved else {
            return Ok(None);
        };

        let mut broadcast = Vec::new();
        if let Some(ledger) = ledger {
            for (kind, saved) in [(ResourceKind::Health, snapshot.health), (ResourceKind::Mana, snapshot.mana)] {
                let Some(saved) = saved else {
                    continue;
                };
                ledger.change_value(kind, ValueKind::Maximum, saved.max, false)?;
                ledger.change_value(kind, ValueKind::Current, saved.current, false)?;
            }
            broadcast = ledger.broadcast_all();
        }

        score.set(snapshot.score);
        Ok(Some(broadcast))
    }

    pub fn reset(&mut self) {
        self.saved = None;
    }
}

/// Система: run context requests (level transitions, game over)
pub fn process_run_context_requests(
    mut requests: EventReader<RunContextRequest>,
    mut context: ResMut<RunContext>,
    mut board: ResMut<ScoreBoard>,
    mut players: Query<(Entity, &mut ResourceLedger), With<Player>>,
    mut resource_events: EventWriter<ResourceChanged>,
    mut score_events: EventWriter<ScoreChanged>,
) {
    for request in requests.read() {
        let player = players.iter_mut().next();
        if player.is_none() && *request != RunContextRequest::Reset {
            crate::logger::log_warning("⚠️ RunContext: player not found");
        }

        match request {
            RunContextRequest::Save => {
                context.save(player.as_ref().map(|(_, ledger)| &**ledger), &board);
                crate::logger::log_info(&format!("💾 RunContext saved (score {})", board.get()));
            }
            RunContextRequest::Load => {
                let (entity, ledger) = match player {
                    Some((entity, ledger)) => (Some(entity), Some(ledger)),
                    None => (None, None),
                };
                match context.load(ledger.map(|l| l.into_inner()), &mut board) {
                    Ok(None) => {
                        crate::logger::log_info("RunContext: nothing saved yet, load skipped");
                    }
                    Ok(Some(snapshots)) => {
                        if let Some(entity) = entity {
                            for snapshot in snapshots {
                                resource_events.write(ResourceChanged::from_snapshot(entity, snapshot));
                            }
                        }
                        score_events.write(ScoreChanged { score: board.get() });
                        crate::logger::log_info(&format!("📂 RunContext loaded (score {})", board.get()));
                    }
                    Err(err) => {
                        crate::logger::log_error(&format!("❌ RunContext load failed: {}", err));
                    }
                }
            }
            RunContextRequest::Reset => {
                context.reset();
                board.reset();
                score_events.write(ScoreChanged { score: 0 });
                crate::logger::log_info("🗑️ RunContext reset");
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::config::PlayerTuning;

    #[test]
    fn test_load_without_save_is_skipped() {
        let context = RunContext::default();
        let mut ledger = ResourceLedger::for_player(&PlayerTuning::default());
        let mut board = ScoreBoard::default();
        board.set(12);

        assert_eq!(context.load(Some(&mut ledger), &mut board), Ok(None));
        assert_eq!(board.get(), 12);
        assert_eq!(ledger.health(), 100.0);
    }

    #[test]
    fn test_restore_sets_max_before_current() {
        let mut old = ResourceLedger::for_player(&PlayerTuning::default());
        old.change_value(ResourceKind::Health, ValueKind::Maximum, 150.0, false).unwrap();
        old.change_value(ResourceKind::Health, ValueKind::Current, 140.0, false).unwrap();
        old.change_value(ResourceKind::Mana, ValueKind::Current, 30.0, false).unwrap();
        let mut board = ScoreBoard::default();
        board.set(250);

        let mut context = RunContext::default();
        context.save(Some(&old), &board);

        // Next level: fresh player with default caps
        let mut fresh = ResourceLedger::for_player(&PlayerTuning::default());
        let mut fresh_board = ScoreBoard::default();
        let broadcast = context.load(Some(&mut fresh), &mut fresh_board).unwrap().unwrap();

        assert_eq!(fresh.current(ResourceKind::Health), Some(140.0));
        assert_eq!(fresh.max(ResourceKind::Health), Some(150.0));
        assert_eq!(fresh.current(ResourceKind::Mana), Some(30.0));
        // Stamina is not carried over
        assert_eq!(fresh.current(ResourceKind::Stamina), Some(100.0));
        assert_eq!(fresh_board.get(), 250);
        assert_eq!(broadcast.len(), 3);
    }

    #[test]
    fn test_requests_through_app() {
        let mut app = App::new();
        app.init_resource::<RunContext>()
            .init_resource::<ScoreBoard>()
            .add_event::<RunContextRequest>()
            .add_event::<ResourceChanged>()
            .add_event::<ScoreChanged>()
            .add_systems(Update, process_run_context_requests);

        let mut ledger = ResourceLedger::for_player(&PlayerTuning::default());
        ledger.apply_damage(60.0).unwrap();
        let player = app.world_mut().spawn((Player, ledger)).id();
        app.world_mut().resource_mut::<ScoreBoard>().set(90);

        app.world_mut().send_event(RunContextRequest::Save);
        app.update();

        // Level change: new player entity
        app.world_mut().despawn(player);
        let next = app
            .world_mut()
            .spawn((Player, ResourceLedger::for_player(&PlayerTuning::default())))
            .id();
        app.world_mut().resource_mut::<ScoreBoard>().reset();
        app.world_mut().resource_mut::<Events<ResourceChanged>>().clear();

        app.world_mut().send_event(RunContextRequest::Load);
        app.update();

        assert_eq!(app.world().get::<ResourceLedger>(next).unwrap().health(), 40.0);
        assert_eq!(app.world().resource::<ScoreBoard>().get(), 90);
        let changes: Vec<_> = app
            .world_mut()
            .resource_mut::<Events<ResourceChanged>>()
            .drain()
            .collect();
        assert_eq!(changes.len(), 3);
        assert!(changes.iter().all(|c| c.entity == next));

        app.world_mut().send_event(RunContextRequest::Reset);
        app.update();
        assert!(!app.world().resource::<RunContext>().has_saved_data());
        assert_eq!(app.world().resource::<ScoreBoard>().get(), 0);
    }
}
