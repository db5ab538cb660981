//! One-object-at-a-time hold/drop state machine.
use std::fmt;

use bevy::prelude::Entity;

use super::errors::{HoldTransition, InteractionError};

#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum HoldState {
    #[default]
    Empty,
    Holding(Entity),
}

impl HoldState {
    pub fn held(self) -> Option<Entity> {
        match self {
            Self::Empty => None,
            Self::Holding(entity) => Some(entity),
        }
    }

    pub fn is_holding(self) -> bool {
        matches!(self, Self::Holding(_))
    }

    /// `Empty -> Holding(target)`.
    pub fn grab(&mut self, target: Entity) -> Result<(), InteractionError> {
        match *self {
            Self::Empty => {
                *self = Self::Holding(target);
                Ok(())
            }
            Self::Holding(_) => Err(InteractionError::invalid_transition(
                HoldTransition::Grab,
                *self,
            )),
        }
    }

    /// `Holding(object) -> Empty`, returning the released object.
    pub fn drop_held(&mut self) -> Result<Entity, InteractionError> {
        match *self {
            Self::Holding(entity) => {
                *self = Self::Empty;
                Ok(entity)
            }
            Self::Empty => Err(InteractionError::invalid_transition(
                HoldTransition::Drop,
                *self,
            )),
        }
    }
}

impl fmt::Display for HoldState {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Empty => write!(f, "empty-handed"),
            Self::Holding(entity) => write!(f, "holding {}", entity),
        }
    }
}
