//! AI components

pub mod brain;


pub use brain::*;
