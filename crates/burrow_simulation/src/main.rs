//! Headless симуляция BURROW
//!
//! Player vs bug boss + melee bot, no engine: headless physics and animator
//! stand in for it. The player swings every half second and casts whenever
//! the spell is ready.

use bevy::prelude::*;
use burrow_simulation::player::{CastSpellIntent, PlayerAttackIntent};
use burrow_simulation::spawn::{spawn_bug_boss, spawn_chest, spawn_melee_bot, spawn_player};
use burrow_simulation::*;

const TUNING_PATH: &str = "assets/config/tuning.ron";
const TICKS: u32 = 1000;

fn main() {
    let seed = 42;
    let mut app = create_headless_app(seed);
    log_info(&format!("Starting BURROW headless simulation (seed: {})", seed));

    let tuning = match CombatTuning::load(TUNING_PATH) {
        Ok(tuning) => tuning,
        Err(err) => {
            log_warning(&format!("⚠️ {}; using default tuning", err));
            CombatTuning::default()
        }
    };
    app.insert_resource(tuning.clone());

    let (player, boss, bot) = {
        let mut commands = app.world_mut().commands();
        let player = spawn_player(&mut commands, &tuning, Vec2::new(0.0, 0.0));
        let boss = spawn_bug_boss(&mut commands, &tuning, Vec2::new(12.0, 0.0));
        let bot = spawn_melee_bot(&mut commands, &tuning, Vec2::new(-8.0, 0.0), vec![-12.0, -4.0]);
        spawn_chest(&mut commands, Vec2::new(1.0, 0.0));
        commands.entity(boss).insert(HeadlessAnimator::bug_boss());
        commands.entity(bot).insert(HeadlessAnimator::melee_bot());
        (player, boss, bot)
    };
    app.world_mut().flush();

    // Запускаем 1000 тиков симуляции
    for tick in 0..TICKS {
        if tick % 30 == 0 {
            app.world_mut().send_event(PlayerAttackIntent { entity: player });
        }
        if tick % 90 == 45 {
            app.world_mut().send_event(CastSpellIntent { entity: player });
        }

        app.update();

        if tick % 100 == 0 {
            let world = app.world();
            let health = |entity| world.get::<ResourceLedger>(entity).map(|l| l.health());
            println!(
                "Tick {}: player {:?}, boss {:?} ({:?}), bot {:?}",
                tick,
                health(player),
                health(boss),
                world.get::<BossBrain>(boss).map(|b| b.activity),
                health(bot),
            );
        }
    }

    let world = app.world();
    println!("Simulation complete! {} ticks", TICKS);
    println!("  score: {}", world.resource::<ScoreBoard>().get());
    println!(
        "  player alive: {}",
        world.get::<ResourceLedger>(player).is_some_and(|l| l.is_alive())
    );
    println!("  boss state: {:?}", world.get::<BossBrain>(boss).map(|b| b.activity));
    println!(
        "  bot: {}",
        match world.get::<BotBrain>(bot) {
            Some(brain) => format!("{:?}", brain.state),
            None => "despawned".to_string(),
        }
    );
}
