//! Combat systems

pub mod damage;
pub mod death;
pub mod regen;


pub use damage::*;
pub use death::*;
pub use regen::*;
