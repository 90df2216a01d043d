//! Tests for the boss decision engine (pure, scripted dice).

use super::brain::*;
use crate::ai::DecisionMaker;
use crate::dice::{DeterministicRng, ScriptedRolls};

fn ctx(distance_x: f32, health_fraction: f32) -> BossContext {
    BossContext {
        distance_x,
        distance_y: 0.0,
        delta_x: distance_x,
        health_fraction,
        move_speed: 4.0,
        upper_zone: false,
        claw_zone: false,
        bite_zone: false,
    }
}

#[test]
fn test_medium_band_at_55_percent_slashes_without_charge() {
    let mut brain = BossBrain::default();
    brain.update_rage(0.55);
    // Acid combo roll fails (0.9 > 0.5)
    let mut dice = ScriptedRolls::new([0.9, 0.0]);

    let decision = brain.decide(&ctx(3.0, 0.55), &mut dice);

    assert_eq!(decision, BossDecision::Attack(BossAttack::Slash));
    assert!(!brain.combo.charge_after_slash);
    // Health above threshold: the combo coin-flip is never taken
    assert_eq!(dice.consumed(), 1);
}

#[test]
fn test_medium_band_low_health_queues_charge() {
    let mut brain = BossBrain::default();
    let mut dice = ScriptedRolls::new([0.9, 0.5]);

    let decision = brain.decide(&ctx(4.0, 0.4), &mut dice);

    assert_eq!(decision, BossDecision::Attack(BossAttack::Slash));
    assert!(brain.combo.charge_after_slash);
}

#[test]
fn test_medium_band_acid_queues_slash() {
    let mut brain = BossBrain::default();
    let decision = brain.decide(&ctx(5.0, 1.0), &mut ScriptedRolls::new([0.5]));

    assert_eq!(decision, BossDecision::Attack(BossAttack::Acid));
    assert!(brain.combo.slash_after_action);
    assert!(brain.watchdog.is_running());
}

#[test]
fn test_close_band_bite_or_claw_slash() {
    let mut brain = BossBrain::default();
    assert_eq!(
        brain.decide(&ctx(2.0, 1.0), &mut ScriptedRolls::default()),
        BossDecision::Attack(BossAttack::Bite)
    );

    let mut brain = BossBrain::default();
    let mut context = ctx(1.0, 1.0);
    context.claw_zone = true;
    assert_eq!(
        brain.decide(&context, &mut ScriptedRolls::default()),
        BossDecision::Attack(BossAttack::Slash)
    );
}

#[test]
fn test_banding_property() {
    for seed in 0..32 {
        let mut dice = DeterministicRng::new(seed);

        for distance in [0.0, 0.5, 1.2, 2.0] {
            let mut brain = BossBrain::default();
            assert_eq!(
                brain.decide(&ctx(distance, 0.3), &mut dice),
                BossDecision::Attack(BossAttack::Bite)
            );
        }

        for distance in [2.01, 3.0, 4.5, 5.0] {
            let mut brain = BossBrain::default();
            let decision = brain.decide(&ctx(distance, 0.3), &mut dice);
            assert!(
                matches!(
                    decision,
                    BossDecision::Attack(BossAttack::Slash) | BossDecision::Attack(BossAttack::Acid)
                ),
                "d={} → {:?}",
                distance,
                decision
            );
        }

        for distance in [5.01, 8.0, 19.0] {
            let mut brain = BossBrain::default();
            let decision = brain.decide(&ctx(distance, 0.3), &mut dice);
            assert!(
                matches!(
                    decision,
                    BossDecision::Move(_) | BossDecision::Charge | BossDecision::Attack(BossAttack::Acid)
                ),
                "d={} → {:?}",
                distance,
                decision
            );
        }
    }
}

#[test]
fn test_far_band_rolls_on_cooldown_only() {
    let mut brain = BossBrain::default();
    // Charge roll 0.9 > 0.4, acid roll 0.9 > 0.3: nothing, keep walking
    let mut dice = ScriptedRolls::new([0.9, 0.9, 0.1]);

    assert_eq!(brain.decide(&ctx(8.0, 1.0), &mut dice), BossDecision::Move(4.0));
    assert_eq!(dice.consumed(), 2);

    // Cooldown running: walks without rolling
    assert_eq!(brain.decide(&ctx(8.0, 1.0), &mut dice), BossDecision::Move(4.0));
    assert_eq!(dice.consumed(), 2);

    brain.tick_decision_timer(1.0);
    assert_eq!(brain.decide(&ctx(8.0, 1.0), &mut dice), BossDecision::Charge);
    assert_eq!(brain.activity, BossActivity::Charging(ChargeState::Preparing));
}

#[test]
fn test_far_band_acid_on_second_roll() {
    let mut brain = BossBrain::default();
    let mut context = ctx(-9.0, 1.0);
    context.distance_x = 9.0;

    let decision = brain.decide(&context, &mut ScriptedRolls::new([0.5, 0.3]));

    assert_eq!(decision, BossDecision::Attack(BossAttack::Acid));
    assert!(!brain.combo.slash_after_action);
}

#[test]
fn test_upper_zone_forces_slash() {
    let mut brain = BossBrain::default();
    let mut context = ctx(12.0, 1.0);
    context.upper_zone = true;
    context.distance_y = 4.0;

    let mut dice = ScriptedRolls::default();
    assert_eq!(brain.decide(&context, &mut dice), BossDecision::Attack(BossAttack::Slash));
    assert_eq!(dice.consumed(), 0);
}

#[test]
fn test_vertical_gap_walks_under_target() {
    let mut brain = BossBrain::default();
    let mut context = ctx(3.0, 1.0);
    context.distance_y = 2.5;
    assert_eq!(brain.decide(&context, &mut ScriptedRolls::default()), BossDecision::Move(4.0));

    // Nearly aligned: horizontal dead zone stops the walk
    context.delta_x = -0.3;
    context.distance_x = 0.3;
    assert_eq!(brain.decide(&context, &mut ScriptedRolls::default()), BossDecision::Stop);

    context.claw_zone = true;
    assert_eq!(
        brain.decide(&context, &mut ScriptedRolls::default()),
        BossDecision::Attack(BossAttack::Slash)
    );
}

#[test]
fn test_rage_scaling_monotonic() {
    let mut previous = RageScaling::from_health_fraction(1.0);
    assert_eq!(previous, RageScaling::default());

    for step in (0..=20).rev() {
        let rage = RageScaling::from_health_fraction(step as f32 * 0.05);
        assert!(rage.speed_multiplier >= previous.speed_multiplier);
        assert!(rage.delay_multiplier <= previous.delay_multiplier);
        assert!(rage.delay_multiplier >= RageScaling::MIN_DELAY);
        previous = rage;
    }

    let rage = RageScaling::from_health_fraction(0.55);
    assert_eq!(rage.steps, 4);
    assert!((rage.speed_multiplier - 1.4).abs() < 1e-5);
    assert!((rage.delay_multiplier - 0.8).abs() < 1e-5);
}

#[test]
fn test_rage_speeds_up_walk() {
    let mut brain = BossBrain::default();
    brain.update_rage(0.0);
    let decision = brain.decide(&ctx(8.0, 0.0), &mut ScriptedRolls::new([0.9, 0.9]));
    match decision {
        BossDecision::Move(velocity) => assert!((velocity - 8.0).abs() < 1e-5),
        other => panic!("expected a walk, got {:?}", other),
    }
}

#[test]
fn test_acid_combo_consumed_once() {
    let mut brain = BossBrain::default();
    brain.start_attack(BossAttack::Acid, true);

    let mut dice = ScriptedRolls::default();
    assert_eq!(
        brain.attack_finished(1.0, &mut dice),
        BossDecision::Attack(BossAttack::Slash)
    );
    assert!(brain.combo.is_empty());

    assert_eq!(brain.attack_finished(1.0, &mut dice), BossDecision::Stop);
    assert_eq!(brain.activity, BossActivity::Idle);
}

#[test]
fn test_slash_combo_starts_charge() {
    let mut brain = BossBrain::default();
    brain.start_attack(BossAttack::Slash, true);

    assert_eq!(brain.attack_finished(0.3, &mut ScriptedRolls::default()), BossDecision::Charge);
    assert_eq!(brain.activity, BossActivity::Charging(ChargeState::Preparing));

    // Stale terminal frame mid-charge is ignored
    assert_eq!(brain.attack_finished(0.3, &mut ScriptedRolls::default()), BossDecision::Hold);
    assert_eq!(brain.activity, BossActivity::Charging(ChargeState::Preparing));
}

#[test]
fn test_watchdog_clears_queue() {
    let mut brain = BossBrain::default();
    brain.update_rage(0.55); // delay 0.8 → watchdog 2.4
    brain.start_attack(BossAttack::Acid, true);

    assert!(!brain.tick_watchdog(2.0));
    assert!(brain.tick_watchdog(0.5));
    assert_eq!(brain.activity, BossActivity::Idle);
    assert!(brain.combo.is_empty());
}

#[test]
fn test_charge_cycle_and_recovery() {
    let mut brain = BossBrain::default();
    let mut dice = ScriptedRolls::default();
    brain.start_charge();

    assert_eq!(brain.tick_charge(0.5, -1.0, 1.0, &mut dice), ChargeTick::None);
    assert_eq!(brain.tick_charge(0.5, -1.0, 1.0, &mut dice), ChargeTick::Go(-15.0));
    assert!(brain.is_charge_moving());
    assert_eq!(brain.tick_charge(1.0, 1.0, 1.0, &mut dice), ChargeTick::Running(-15.0));
    assert_eq!(brain.tick_charge(2.0, 1.0, 1.0, &mut dice), ChargeTick::Finished);

    assert_eq!(brain.activity, BossActivity::Recovering);
    assert_eq!(brain.decide(&ctx(1.0, 1.0), &mut dice), BossDecision::Hold);

    assert!(!brain.tick_recovery(0.5));
    assert!(brain.tick_recovery(0.2));
    assert!(brain.can_decide());
}

/// Zero-length windup, run and impact stun each finish on the next tick.
#[test]
fn test_zero_charge_durations_never_stall() {
    let mut brain = BossBrain::default();
    brain.config.charge_delay = 0.0;
    brain.config.charge_duration = 0.0;
    brain.config.impact_stun_duration = 0.0;
    let mut dice = ScriptedRolls::default();
    let dt = 1.0 / 60.0;

    brain.start_charge();
    assert_eq!(brain.tick_charge(dt, 1.0, 1.0, &mut dice), ChargeTick::Go(15.0));
    assert_eq!(brain.tick_charge(dt, 1.0, 1.0, &mut dice), ChargeTick::Finished);
    assert_eq!(brain.activity, BossActivity::Recovering);

    assert!(brain.tick_recovery(dt));
    assert_eq!(brain.activity, BossActivity::Idle);
    assert!(brain.can_decide());
}

#[test]
fn test_zero_impact_stun_recovers_after_contact() {
    let mut brain = BossBrain::default();
    brain.config.impact_stun_duration = 0.0;
    let mut dice = ScriptedRolls::default();

    brain.start_charge();
    assert!(brain.stop_charge(1.0, &mut dice));
    assert_eq!(brain.activity, BossActivity::Recovering);

    assert!(brain.tick_recovery(1.0 / 60.0));
    assert_eq!(brain.activity, BossActivity::Idle);
}

#[test]
fn test_stop_charge_drops_queue_in_recovery() {
    let mut brain = BossBrain::default();
    brain.start_charge();
    brain.combo.slash_after_action = true;

    assert!(brain.stop_charge(1.0, &mut ScriptedRolls::default()));
    assert!(brain.combo.is_empty());
    assert_eq!(brain.activity, BossActivity::Recovering);
    assert!(brain.recovery.is_running());

    // Only charges stop
    assert!(!brain.stop_charge(1.0, &mut ScriptedRolls::default()));
}

#[test]
fn test_death_cancels_everything() {
    let mut brain = BossBrain::default();
    brain.start_attack(BossAttack::Acid, true);
    brain.die();

    assert!(brain.combo.is_empty());
    assert!(!brain.watchdog.is_running());
    assert!(!brain.tick_watchdog(10.0));
    assert_eq!(brain.attack_finished(1.0, &mut ScriptedRolls::default()), BossDecision::Hold);
    assert_eq!(brain.decide(&ctx(1.0, 1.0), &mut ScriptedRolls::default()), BossDecision::Hold);
    assert!(brain.is_dead());
}
