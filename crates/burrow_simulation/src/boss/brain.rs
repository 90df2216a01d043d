//! Bug boss decision engine.
//!
//! Distance-banded selector with a one-slot combo queue, health-driven rage
//! scaling and a charge sub-FSM. Pure state: the systems in `boss::systems`
//! feed it contexts and translate its decisions into intents and animation
//! commands.

use bevy::prelude::*;

use crate::ai::DecisionMaker;
use crate::combat::CombatTimer;
use crate::config::BossConfig;
use crate::dice::Roller;

// ============================================================================
// Rage
// ============================================================================

/// Speed / delay multipliers derived from lost health.
///
/// Every full 10% of health lost: speed +10%, delay −5% (floored at 0.1).
/// Speed scales movement, charge speed, animation playback. Delay scales
/// charge windup, impact stun, watchdog and the far-band decision cooldown.
#[derive(Debug, Clone, Copy, PartialEq, Reflect)]
pub struct RageScaling {
    pub steps: u32,
    pub speed_multiplier: f32,
    pub delay_multiplier: f32,
}

impl Default for RageScaling {
    fn default() -> Self {
        Self {
            steps: 0,
            speed_multiplier: 1.0,
            delay_multiplier: 1.0,
        }
    }
}

impl RageScaling {
    pub const MIN_DELAY: f32 = 0.1;

    pub fn from_health_fraction(fraction: f32) -> Self {
        let lost = (1.0 - fraction.clamp(0.0, 1.0)).max(0.0);
        let steps = (lost * 10.0).floor() as u32;
        Self {
            steps,
            speed_multiplier: 1.0 + steps as f32 * 0.1,
            delay_multiplier: (1.0 - steps as f32 * 0.05).max(Self::MIN_DELAY),
        }
    }
}

// ============================================================================
// Actions
// ============================================================================

#[derive(Debug, Clone, Copy, PartialEq, Eq, Reflect)]
pub enum BossAttack {
    Bite,
    Slash,
    Acid,
}

impl BossAttack {
    pub const TRIGGERS: [&'static str; 3] = ["IsBite", "IsSlashing", "IsAcid"];

    /// Animator trigger starting this attack's clip
    pub fn trigger(&self) -> &'static str {
        match self {
            BossAttack::Bite => "IsBite",
            BossAttack::Slash => "IsSlashing",
            BossAttack::Acid => "IsAcid",
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Reflect)]
pub enum ChargeState {
    /// Windup, standing still
    Preparing,
    /// Running in the facing direction, contacts reported
    Moving,
}

/// What the boss is doing right now.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Reflect)]
pub enum BossActivity {
    /// Free to decide (walking counts as idle)
    #[default]
    Idle,
    Attacking(BossAttack),
    Charging(ChargeState),
    /// Impact stun after a charge, no decisions
    Recovering,
    Dead,
}

/// Follow-up flags, consumed once on `AttackFinished`.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Reflect)]
pub struct ComboQueue {
    /// Acid → Slash
    pub slash_after_action: bool,
    /// Slash → Charge
    pub charge_after_slash: bool,
}

impl ComboQueue {
    pub fn clear(&mut self) {
        *self = Self::default();
    }

    pub fn is_empty(&self) -> bool {
        !self.slash_after_action && !self.charge_after_slash
    }
}

/// Snapshot for one decision, recomputed every tick.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct BossContext {
    /// |dx| between boss and target origins
    pub distance_x: f32,
    pub distance_y: f32,
    /// target_x − boss_x (signed)
    pub delta_x: f32,
    pub health_fraction: f32,
    pub move_speed: f32,
    pub upper_zone: bool,
    pub claw_zone: bool,
    pub bite_zone: bool,
}

/// Effect of a decision step (or of a consumed follow-up).
#[derive(Debug, Clone, Copy, PartialEq)]
pub enum BossDecision {
    /// Busy or recovering, leave everything as is
    Hold,
    Move(f32),
    Stop,
    /// Stop and start the attack clip (state already switched)
    Attack(BossAttack),
    /// Stop and start the charge windup (state already switched)
    Charge,
}

/// Result of advancing the charge timer.
#[derive(Debug, Clone, Copy, PartialEq)]
pub enum ChargeTick {
    None,
    /// Windup over, start running at this velocity
    Go(f32),
    /// Keep running
    Running(f32),
    /// Ran for the full duration, now recovering
    Finished,
}

// ============================================================================
// Brain
// ============================================================================

#[derive(Component, Debug, Clone, PartialEq)]
pub struct BossBrain {
    pub config: BossConfig,
    pub activity: BossActivity,
    pub target: Option<Entity>,
    pub combo: ComboQueue,
    pub rage: RageScaling,
    /// Far-band roll cooldown (idle counts as ready)
    pub decision_timer: CombatTimer,
    /// Expected-callback timeout of the current attack
    pub watchdog: CombatTimer,
    pub recovery: CombatTimer,
    /// Windup, then run duration
    pub charge_timer: CombatTimer,
    pub charge_velocity: f32,
    /// Last `IsMoving` value sent to the animator
    pub was_moving: bool,
}

impl Default for BossBrain {
    fn default() -> Self {
        Self::new(BossConfig::default())
    }
}

impl BossBrain {
    pub fn new(config: BossConfig) -> Self {
        Self {
            config,
            activity: BossActivity::Idle,
            target: None,
            combo: ComboQueue::default(),
            rage: RageScaling::default(),
            decision_timer: CombatTimer::default(),
            watchdog: CombatTimer::default(),
            recovery: CombatTimer::default(),
            charge_timer: CombatTimer::default(),
            charge_velocity: 0.0,
            was_moving: false,
        }
    }

    pub fn is_dead(&self) -> bool {
        self.activity == BossActivity::Dead
    }

    /// Decisions run only when idle (not attacking, charging, recovering, dead).
    pub fn can_decide(&self) -> bool {
        self.activity == BossActivity::Idle
    }

    pub fn is_charge_moving(&self) -> bool {
        self.activity == BossActivity::Charging(ChargeState::Moving)
    }

    pub fn update_rage(&mut self, health_fraction: f32) {
        self.rage = RageScaling::from_health_fraction(health_fraction);
    }

    /// Starts an attack clip. `queue` posts the attack's follow-up
    /// (Slash → Charge, Acid → Slash; Bite has none).
    pub fn start_attack(&mut self, attack: BossAttack, queue: bool) -> BossDecision {
        match attack {
            BossAttack::Slash => self.combo.charge_after_slash = queue,
            BossAttack::Acid => self.combo.slash_after_action = queue,
            BossAttack::Bite => {}
        }
        self.activity = BossActivity::Attacking(attack);
        self.watchdog
            .start(self.config.watchdog_duration * self.rage.delay_multiplier);
        BossDecision::Attack(attack)
    }

    pub fn start_charge(&mut self) -> BossDecision {
        self.activity = BossActivity::Charging(ChargeState::Preparing);
        self.charge_timer
            .start(self.config.charge_delay * self.rage.delay_multiplier);
        BossDecision::Charge
    }

    /// Slash, queueing a charge iff health is low AND the combo roll passes.
    /// Rolls only when health is below the threshold.
    fn start_slash_with_combo(&mut self, health_fraction: f32, dice: &mut dyn Roller) -> BossDecision {
        let queue_charge = health_fraction < self.config.charge_combo_hp_threshold
            && dice.roll() <= self.config.charge_combo_chance;
        self.start_attack(BossAttack::Slash, queue_charge)
    }

    /// Horizontal approach; stops inside the dead zone.
    fn move_towards(&self, ctx: &BossContext) -> BossDecision {
        if ctx.delta_x.abs() < self.config.horizontal_dead_zone {
            return BossDecision::Stop;
        }
        BossDecision::Move(ctx.delta_x.signum() * ctx.move_speed * self.rage.speed_multiplier)
    }

    /// Terminal frame of bite / slash / acid (also reached from `stop_charge`).
    ///
    /// Consumes at most one queued follow-up. Ignored mid-charge, drops the
    /// queue during recovery.
    pub fn attack_finished(&mut self, health_fraction: f32, dice: &mut dyn Roller) -> BossDecision {
        match self.activity {
            BossActivity::Charging(_) | BossActivity::Dead => return BossDecision::Hold,
            BossActivity::Attacking(_) => self.activity = BossActivity::Idle,
            BossActivity::Idle | BossActivity::Recovering => {}
        }
        self.watchdog.cancel();

        if self.activity == BossActivity::Recovering {
            self.combo.clear();
            return BossDecision::Stop;
        }

        if self.combo.slash_after_action {
            self.combo.slash_after_action = false;
            return self.start_slash_with_combo(health_fraction, dice);
        }
        if self.combo.charge_after_slash {
            self.combo.charge_after_slash = false;
            return self.start_charge();
        }
        BossDecision::Stop
    }

    /// Ends a charge (timeout, wall or target contact) and enters impact
    /// recovery. Returns false if the boss wasn't charging.
    pub fn stop_charge(&mut self, health_fraction: f32, dice: &mut dyn Roller) -> bool {
        if !matches!(self.activity, BossActivity::Charging(_)) {
            return false;
        }
        self.charge_timer.cancel();
        self.charge_velocity = 0.0;
        self.activity = BossActivity::Recovering;
        self.recovery
            .start(self.config.impact_stun_duration * self.rage.delay_multiplier);
        self.attack_finished(health_fraction, dice);
        true
    }

    /// Advances windup / run. `facing_sign` is read when the run starts.
    pub fn tick_charge(
        &mut self,
        delta: f32,
        facing_sign: f32,
        health_fraction: f32,
        dice: &mut dyn Roller,
    ) -> ChargeTick {
        match self.activity {
            BossActivity::Charging(ChargeState::Preparing) => {
                if !self.charge_timer.tick(delta) {
                    return ChargeTick::None;
                }
                self.activity = BossActivity::Charging(ChargeState::Moving);
                self.charge_velocity = facing_sign * self.config.charge_speed * self.rage.speed_multiplier;
                self.charge_timer.start(self.config.charge_duration);
                ChargeTick::Go(self.charge_velocity)
            }
            BossActivity::Charging(ChargeState::Moving) => {
                if self.charge_timer.tick(delta) {
                    self.stop_charge(health_fraction, dice);
                    return ChargeTick::Finished;
                }
                ChargeTick::Running(self.charge_velocity)
            }
            _ => ChargeTick::None,
        }
    }

    /// Returns true if the watchdog fired (attack callback never arrived).
    pub fn tick_watchdog(&mut self, delta: f32) -> bool {
        if !self.watchdog.tick(delta) {
            return false;
        }
        if matches!(self.activity, BossActivity::Attacking(_)) {
            self.activity = BossActivity::Idle;
            self.combo.clear();
            return true;
        }
        false
    }

    /// Returns true when the recovery window closed this tick.
    pub fn tick_recovery(&mut self, delta: f32) -> bool {
        if self.recovery.tick(delta) && self.activity == BossActivity::Recovering {
            self.activity = BossActivity::Idle;
            return true;
        }
        false
    }

    pub fn tick_decision_timer(&mut self, delta: f32) {
        self.decision_timer.tick(delta);
    }

    /// Hard stop: every timer and queued follow-up is dropped.
    pub fn die(&mut self) {
        self.activity = BossActivity::Dead;
        self.combo.clear();
        self.watchdog.cancel();
        self.recovery.cancel();
        self.charge_timer.cancel();
        self.decision_timer.cancel();
        self.charge_velocity = 0.0;
    }
}

impl DecisionMaker for BossBrain {
    type Context = BossContext;
    type Decision = BossDecision;

    fn decide(&mut self, ctx: &BossContext, dice: &mut dyn Roller) -> BossDecision {
        if !self.can_decide() {
            return BossDecision::Hold;
        }

        // Elevated platform: upper slash wins over everything
        if ctx.upper_zone {
            return self.start_attack(BossAttack::Slash, false);
        }

        if ctx.distance_y > self.config.vertical_threshold {
            if ctx.claw_zone {
                return self.start_attack(BossAttack::Slash, false);
            }
            return self.move_towards(ctx);
        }

        if ctx.distance_x <= self.config.close_range {
            let attack = if ctx.claw_zone {
                BossAttack::Slash
            } else {
                BossAttack::Bite
            };
            return self.start_attack(attack, false);
        }

        if ctx.distance_x <= self.config.medium_range {
            if dice.roll() <= self.config.medium_range_acid_chance {
                return self.start_attack(BossAttack::Acid, true);
            }
            return self.start_slash_with_combo(ctx.health_fraction, dice);
        }

        // Far band: walk, roll on the cooldown only
        let walk = self.move_towards(ctx);
        if !self.decision_timer.is_ready() {
            return walk;
        }
        self.decision_timer
            .start(self.config.far_decision_interval * self.rage.delay_multiplier);

        if dice.roll() <= self.config.far_range_charge_chance {
            return self.start_charge();
        }
        if dice.roll() <= self.config.far_range_acid_chance {
            return self.start_attack(BossAttack::Acid, false);
        }
        walk
    }
}
