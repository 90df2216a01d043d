//! Damageable capability.
//!
//! Anything that can be hit implements `Damageable`: actors (through their
//! ledger) and props. Finding *who* was hit is never done here; callers use
//! zone contacts or `physics::overlap_area` and send a `DamageRequest`.

use crate::combat::components::{Destructible, ResourceLedger, ResourceSnapshot};
use crate::error::CombatError;

/// What a hit did to its target.
#[derive(Debug, Clone, Copy, PartialEq)]
pub enum DamageOutcome {
    /// Target already broken / otherwise immune
    Ignored,
    /// Health changed (or was re-reported unchanged)
    Applied { snapshot: ResourceSnapshot, died: bool },
    /// Prop broke on this hit
    Broke { reward: Option<u32> },
}

pub trait Damageable {
    /// Negative amounts are rejected, state unchanged.
    fn take_damage(&mut self, amount: f32) -> Result<DamageOutcome, CombatError>;
}

impl Damageable for ResourceLedger {
    fn take_damage(&mut self, amount: f32) -> Result<DamageOutcome, CombatError> {
        let change = self.apply_damage(amount)?;
        Ok(DamageOutcome::Applied {
            snapshot: change.snapshot,
            died: change.died,
        })
    }
}

impl Damageable for Destructible {
    fn take_damage(&mut self, amount: f32) -> Result<DamageOutcome, CombatError> {
        if amount < 0.0 {
            return Err(CombatError::NegativeDamage(amount));
        }
        if self.broken {
            return Ok(DamageOutcome::Ignored);
        }

        self.broken = true;
        Ok(DamageOutcome::Broke {
            reward: self.score_reward.take(),
        })
    }
}
