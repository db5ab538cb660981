//! Contract violations raised by the interaction core.
//!
//! Recoverable situations (no target, stale target, unclassifiable hit, guard already held)
//! are outcomes, not errors. Only caller mistakes end up here.
use std::fmt;

use bevy::prelude::Vec3;

use super::hold::HoldState;

/// Hold-state transition that was requested.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum HoldTransition {
    Grab,
    Drop,
}

impl fmt::Display for HoldTransition {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let label = match self {
            Self::Grab => "grab",
            Self::Drop => "drop",
        };
        write!(f, "{}", label)
    }
}

#[derive(Debug, Clone, PartialEq)]
pub enum InteractionError {
    InvalidDirection { direction: Vec3 },
    InvalidRange { max_range: f32 },
    InvalidTransition {
        requested: HoldTransition,
        state: HoldState,
    },
}

impl InteractionError {
    pub fn invalid_direction(direction: Vec3) -> Self {
        Self::InvalidDirection { direction }
    }

    pub fn invalid_range(max_range: f32) -> Self {
        Self::InvalidRange { max_range }
    }

    pub fn invalid_transition(requested: HoldTransition, state: HoldState) -> Self {
        Self::InvalidTransition { requested, state }
    }
}

impl fmt::Display for InteractionError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::InvalidDirection { direction } => write!(
                f,
                "probe direction {} is not a unit vector (length {:.4})",
                direction,
                direction.length()
            ),
            Self::InvalidRange { max_range } => {
                write!(f, "probe range must be positive, got {}", max_range)
            }
            Self::InvalidTransition { requested, state } => {
                write!(f, "cannot {} while {}", requested, state)
            }
        }
    }
}

impl std::error::Error for InteractionError {}
