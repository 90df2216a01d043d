//! Error types for the simulation core.
//!
//! None of these abort the tick: systems log them through `crate::logger`
//! and leave state unchanged.

use thiserror::Error;

use crate::combat::ResourceKind;

/// Recoverable failures of combat operations (invalid input, bad setup).
#[derive(Debug, Clone, PartialEq, Error)]
pub enum CombatError {
    #[error("damage is negative ({0}), can't take")]
    NegativeDamage(f32),

    #[error("{kind:?} amount is not finite ({amount})")]
    NonFiniteAmount { kind: ResourceKind, amount: f32 },

    #[error("{kind:?} maximum can't be negative ({value})")]
    NegativeMaximum { kind: ResourceKind, value: f32 },

    #[error("actor carries no {0:?} resource")]
    MissingResource(ResourceKind),

    #[error("index {index} out of range for {what} (len {len})")]
    IndexOutOfRange {
        what: &'static str,
        index: usize,
        len: usize,
    },

    #[error("{owner}: required reference '{what}' is not assigned")]
    MissingReference { owner: &'static str, what: &'static str },
}

/// Failures while loading tuning data.
#[derive(Debug, Error)]
pub enum ConfigError {
    #[error("failed to read {path}: {source}")]
    Io {
        path: String,
        #[source]
        source: std::io::Error,
    },

    #[error("failed to parse tuning: {0}")]
    Parse(#[from] ron::error::SpannedError),

    #[error("invalid tuning value: {0}")]
    Invalid(String),
}
