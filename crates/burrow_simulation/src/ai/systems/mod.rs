//! Melee bot systems

pub mod hooks;
pub mod reactions;
pub mod setup;
pub mod think;


pub use hooks::*;
pub use reactions::*;
pub use setup::*;
pub use think::*;
