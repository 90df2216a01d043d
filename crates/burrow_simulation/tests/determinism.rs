//! Determinism test
//!
//! Same seed → identical world after N ticks (positions, ledgers, boss state).

use bevy::prelude::*;
use burrow_simulation::player::PlayerAttackIntent;
use burrow_simulation::spawn::{spawn_bug_boss, spawn_melee_bot, spawn_player};
use burrow_simulation::*;

fn run_fight_and_snapshot(seed: u64, ticks: usize) -> Vec<u8> {
    let mut app = create_headless_app(seed);
    let tuning = app.world().resource::<CombatTuning>().clone();

    let (player, boss, bot) = {
        let mut commands = app.world_mut().commands();
        let player = spawn_player(&mut commands, &tuning, Vec2::ZERO);
        let boss = spawn_bug_boss(&mut commands, &tuning, Vec2::new(7.0, 0.0));
        let bot = spawn_melee_bot(&mut commands, &tuning, Vec2::new(-6.0, 0.0), vec![-10.0, -2.0]);
        commands.entity(boss).insert(HeadlessAnimator::bug_boss());
        commands.entity(bot).insert(HeadlessAnimator::melee_bot());
        (player, boss, bot)
    };
    app.world_mut().flush();

    for tick in 0..ticks {
        if tick % 40 == 0 {
            app.world_mut().send_event(PlayerAttackIntent { entity: player });
        }
        app.update();
    }

    let world = app.world_mut();
    let mut snapshot = world_snapshot::<ResourceLedger>(world);
    snapshot.extend(world_snapshot::<Transform>(world));
    snapshot.extend(world_snapshot::<BossBrain>(world));
    snapshot.extend(world_snapshot::<BotBrain>(world));
    snapshot.extend(format!("{:?}{:?}", boss, bot).as_bytes());
    snapshot
}

#[test]
fn test_same_seed_same_world() {
    const SEED: u64 = 42;
    const TICKS: usize = 600;

    let first = run_fight_and_snapshot(SEED, TICKS);
    let second = run_fight_and_snapshot(SEED, TICKS);
    let third = run_fight_and_snapshot(SEED, TICKS);

    assert!(!first.is_empty());
    assert_eq!(first, second, "Determinism failed: run 1 != run 2");
    assert_eq!(second, third, "Determinism failed: run 2 != run 3");
}

#[test]
fn test_seeded_dice_repeat() {
    let mut a = CombatDice::seeded(9);
    let mut b = CombatDice::seeded(9);

    let rolls_a: Vec<f32> = (0..32).map(|_| a.roll()).collect();
    let rolls_b: Vec<f32> = (0..32).map(|_| b.roll()).collect();

    assert_eq!(rolls_a, rolls_b);
    assert!(rolls_a.iter().all(|r| (0.0..=1.0).contains(r)));
}
