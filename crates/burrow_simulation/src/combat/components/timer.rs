//! Tick-sampled countdown timer.
//!
//! Replaces every "wait N seconds" in combat (cooldowns, cast delay, stun,
//! recovery, watchdog). Owned by exactly one component, polled once per tick.

use bevy::prelude::*;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Reflect)]
pub enum TimerState {
    #[default]
    Idle,
    Running,
    Expired,
}

#[derive(Debug, Clone, Copy, PartialEq, Default, Reflect)]
pub struct CombatTimer {
    pub state: TimerState,
    pub remaining: f32,
    pub duration: f32,
}

impl CombatTimer {
    /// (Re)starts the countdown. A non-positive duration expires on the next tick.
    pub fn start(&mut self, duration: f32) {
        self.duration = duration.max(0.0);
        self.remaining = self.duration;
        self.state = TimerState::Running;
    }

    /// Advances a running timer. Returns true on the tick it expires.
    pub fn tick(&mut self, delta: f32) -> bool {
        if self.state != TimerState::Running {
            return false;
        }

        self.remaining -= delta;
        if self.remaining <= 0.0 {
            self.remaining = 0.0;
            self.state = TimerState::Expired;
            return true;
        }
        false
    }

    pub fn is_expired(&self) -> bool {
        self.state == TimerState::Expired
    }

    pub fn is_running(&self) -> bool {
        self.state == TimerState::Running
    }

    /// Idle or expired: nothing blocks the owner.
    pub fn is_ready(&self) -> bool {
        !self.is_running()
    }

    pub fn cancel(&mut self) {
        self.state = TimerState::Idle;
        self.remaining = 0.0;
    }

    /// Elapsed fraction in `[0, 1]` (growth curves).
    pub fn progress(&self) -> f32 {
        match self.state {
            TimerState::Idle => 0.0,
            TimerState::Expired => 1.0,
            TimerState::Running if self.duration > 0.0 => 1.0 - self.remaining / self.duration,
            TimerState::Running => 1.0,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_timer_lifecycle() {
        let mut timer = CombatTimer::default();
        assert_eq!(timer.state, TimerState::Idle);
        assert!(timer.is_ready());

        timer.start(1.0);
        assert!(timer.is_running());
        assert!(!timer.is_ready());

        assert!(!timer.tick(0.25));
        assert!((timer.progress() - 0.25).abs() < 1e-6);
        assert!(!timer.tick(0.5));
        assert!(timer.tick(0.5)); // Expires exactly once
        assert!(timer.is_expired());
        assert!(!timer.tick(0.5));
        assert_eq!(timer.remaining, 0.0);
    }

    #[test]
    fn test_restart_while_running() {
        let mut timer = CombatTimer::default();
        timer.start(1.0);
        timer.tick(0.9);
        timer.start(1.0);
        assert!(!timer.tick(0.5));
        assert!(timer.is_running());
    }

    #[test]
    fn test_cancel_and_zero_duration() {
        let mut timer = CombatTimer::default();
        timer.start(2.0);
        timer.cancel();
        assert_eq!(timer.state, TimerState::Idle);
        assert!(!timer.tick(5.0));

        // Zero duration still reports its expiry exactly once
        timer.start(0.0);
        assert!(timer.is_running());
        assert!(timer.tick(1.0 / 60.0));
        assert!(timer.is_expired());
        assert!(!timer.tick(1.0 / 60.0));

        timer.start(-1.0);
        assert_eq!(timer.duration, 0.0);
        assert!(timer.tick(0.0));
    }
}
