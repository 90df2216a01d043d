//! Combat components

pub mod destructible;
pub mod ledger;
pub mod timer;

// Re-export all components
pub use destructible::*;
pub use ledger::*;
pub use timer::*;
