//! Decision-making capability shared by bots and the boss.

use crate::dice::Roller;

/// One decision step over an immutable per-tick snapshot.
///
/// Implementors mutate only their own state; effects on the world (movement,
/// animation, damage) are returned as `Decision` and applied by the system.
pub trait DecisionMaker {
    type Context;
    type Decision;

    fn decide(&mut self, ctx: &Self::Context, dice: &mut dyn Roller) -> Self::Decision;
}
