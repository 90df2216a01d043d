//! ECS Components shared by every domain
//!
//! - actor: markers and lifecycle (Actor, Player, Dead, Inactive, DeathPolicy)

pub mod actor;

pub use actor::*;
