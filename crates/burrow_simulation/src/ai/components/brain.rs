//! Melee bot FSM components (state, stagger counter, waypoints).

use bevy::prelude::*;

use crate::ai::DecisionMaker;
use crate::combat::CombatTimer;
use crate::config::StaggerConfig;
use crate::dice::Roller;

/// Bot FSM состояния
///
/// `Patrol → Chase → Attack → SearchLastKnown → Patrol`, `Stunned` from any
/// live state, `Dead` terminal.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Reflect)]
pub enum BotState {
    #[default]
    Patrol,
    Chase,
    /// Swing in progress, waits for `EndAttack`
    Attack,
    SearchLastKnown,
    /// Waits for `EndStun` (or the fallback stun timer)
    Stunned,
    Dead,
}

/// Counter-based stagger roll.
///
/// 2nd hit: `second_hit_chance`. 3rd+ hit: `later_hit_chance`, and a failed
/// roll resets the counter too, so the cycle starts over instead of
/// compounding. Any successful stun resets the counter.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Reflect)]
pub struct StaggerCounter {
    pub hits: u32,
}

impl StaggerCounter {
    /// Registers a hit, returns true if it stuns. Rolls only on the 2nd+ hit.
    pub fn register_hit(&mut self, config: &StaggerConfig, dice: &mut dyn Roller) -> bool {
        self.hits += 1;

        let stunned = if self.hits == 2 {
            dice.roll() <= config.second_hit_chance
        } else if self.hits >= 3 {
            let stunned = dice.roll() <= config.later_hit_chance;
            if !stunned {
                self.hits = 0;
            }
            stunned
        } else {
            false
        };

        if stunned {
            self.hits = 0;
        }
        stunned
    }
}

/// Patrol route: x positions, visited in order and wrapping.
#[derive(Component, Debug, Clone, Default, PartialEq)]
pub struct Waypoints {
    pub points: Vec<f32>,
}

impl Waypoints {
    pub fn new(points: Vec<f32>) -> Self {
        Self { points }
    }
}

/// Per-tick snapshot for `BotBrain::decide`.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct BotContext {
    pub position_x: f32,
    /// Current target's x, if it still exists
    pub target_x: Option<f32>,
    /// Current target still overlaps the vision zone
    pub target_visible: bool,
    /// First player in the vision zone
    pub spotted: Option<Entity>,
    /// Current waypoint x and route length
    pub waypoint: Option<(f32, usize)>,
    pub attack_distance: f32,
    pub move_speed: f32,
    pub arrival_tolerance: f32,
}

/// Movement / attack effect of one decision.
#[derive(Debug, Clone, Copy, PartialEq)]
pub enum BotAction {
    /// Leave the current move intent as is
    Keep,
    Move(f32),
    Stop,
    /// Face the target (`dx` = target_x - x), stop, trigger the swing
    Attack { target_dx: f32 },
}

/// Melee bot brain (replaces the engine-driven update loop).
#[derive(Component, Debug, Clone, Default, PartialEq)]
pub struct BotBrain {
    pub state: BotState,
    pub target: Option<Entity>,
    pub last_known_x: Option<f32>,
    pub waypoint_index: usize,
    pub stagger: StaggerCounter,
    /// Fallback if the stagger clip never reports `EndStun`
    pub stun_timer: CombatTimer,
    /// Last `IsMoving` value sent to the animator
    pub was_moving: bool,
}

impl BotBrain {
    pub fn is_busy(&self) -> bool {
        matches!(self.state, BotState::Attack | BotState::Stunned | BotState::Dead)
    }

    /// Hit taken. Returns true if the bot got stunned (caller stops it and
    /// plays the stagger clip).
    pub fn on_damaged(&mut self, config: &StaggerConfig, dice: &mut dyn Roller) -> bool {
        if self.state == BotState::Dead {
            return false;
        }
        if !self.stagger.register_hit(config, dice) {
            return false;
        }

        // Hard reset: attack, target and search are dropped
        self.state = BotState::Stunned;
        self.target = None;
        self.last_known_x = None;
        self.stun_timer.start(config.stun_duration);
        true
    }

    pub fn end_stun(&mut self) {
        if self.state == BotState::Stunned {
            self.state = BotState::Patrol;
        }
        self.stun_timer.cancel();
    }

    /// `EndAttack` callback. Ignored while stunned.
    pub fn end_attack(&mut self) {
        if self.state == BotState::Attack {
            self.state = if self.target.is_some() {
                BotState::Chase
            } else {
                BotState::Patrol
            };
        }
    }

    /// Impact frame counts only while the swing is live.
    pub fn can_strike(&self) -> bool {
        self.state == BotState::Attack
    }

    pub fn die(&mut self) {
        self.state = BotState::Dead;
        self.target = None;
        self.stun_timer.cancel();
    }

    /// Advances the fallback stun timer. Returns true when it ended the stun.
    pub fn tick_stun(&mut self, delta: f32) -> bool {
        if self.state == BotState::Stunned && self.stun_timer.tick(delta) {
            self.end_stun();
            return true;
        }
        false
    }

    fn patrol(&mut self, ctx: &BotContext) -> BotAction {
        self.state = BotState::Patrol;
        let Some((waypoint_x, count)) = ctx.waypoint else {
            return BotAction::Stop;
        };

        if (waypoint_x - ctx.position_x).abs() <= ctx.arrival_tolerance {
            self.waypoint_index = (self.waypoint_index + 1) % count.max(1);
            return BotAction::Stop;
        }
        BotAction::Move((waypoint_x - ctx.position_x).signum() * ctx.move_speed)
    }
}

impl DecisionMaker for BotBrain {
    type Context = BotContext;
    type Decision = BotAction;

    fn decide(&mut self, ctx: &BotContext, _dice: &mut dyn Roller) -> BotAction {
        if self.is_busy() {
            return BotAction::Keep;
        }

        // Tracking a target
        if self.target.is_some() {
            return match ctx.target_x {
                Some(target_x) if ctx.target_visible => {
                    let dx = target_x - ctx.position_x;
                    if dx.abs() <= ctx.attack_distance {
                        self.state = BotState::Attack;
                        BotAction::Attack { target_dx: dx }
                    } else {
                        self.state = BotState::Chase;
                        BotAction::Move(dx.signum() * ctx.move_speed)
                    }
                }
                _ => {
                    // Lost sight: remember where it was, search next tick
                    self.last_known_x = ctx.target_x.or(self.last_known_x);
                    self.target = None;
                    self.state = BotState::SearchLastKnown;
                    BotAction::Keep
                }
            };
        }

        // Vision check before anything else
        if let Some(spotted) = ctx.spotted {
            self.target = Some(spotted);
            self.last_known_x = None;
            self.state = BotState::Chase;
            return BotAction::Keep;
        }

        if self.state == BotState::SearchLastKnown {
            if let Some(last_x) = self.last_known_x {
                if (last_x - ctx.position_x).abs() > ctx.arrival_tolerance {
                    return BotAction::Move((last_x - ctx.position_x).signum() * ctx.move_speed);
                }
            }
            self.last_known_x = None;
            self.state = BotState::Patrol;
            return BotAction::Stop;
        }

        self.patrol(ctx)
    }
}
