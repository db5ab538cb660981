//! Routes a single interact event to grab, drop, or one per-category effect.
use std::fmt;

use bevy::prelude::*;

use super::{
    classify::{classify, Classification},
    components::{CharacterInteractionState, CharacterPose, InteractionCategory},
    errors::InteractionError,
    probe::ProbeHit,
};

/// Read-only view of the bodies a character can target.
pub trait InteractableRegistry {
    fn query_nearest(
        &self,
        origin: Vec3,
        direction: Vec3,
        max_range: f32,
    ) -> Result<Option<ProbeHit>, InteractionError>;

    fn is_alive(&self, entity: Entity) -> bool;
}

/// Per-category effect callbacks. Each is fire-and-forget from the dispatcher's side.
pub trait InteractionEffects {
    fn push(&mut self, target: Entity);
    fn drink(&mut self, target: Entity);
    fn scratch(&mut self, target: Entity);
    fn eat(&mut self, target: Entity);
    fn play(&mut self, target: Entity);
    fn sniff(&mut self, target: Entity);
    /// Attach the grabbed object to the character.
    fn grab(&mut self, target: Entity);
    /// Detach the previously held object.
    fn drop_held(&mut self, target: Entity);
}

/// How one interact event resolved.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum InteractionOutcome {
    /// Another interact event was still resolving.
    Ignored,
    NoTarget,
    /// The probed body vanished before dispatch; treated like `NoTarget`.
    StaleTarget { target: Entity },
    Unclassifiable { target: Entity },
    Applied {
        category: InteractionCategory,
        target: Entity,
    },
    Grabbed { target: Entity },
    Dropped { target: Entity },
}

impl InteractionOutcome {
    pub fn label(&self) -> &'static str {
        match self {
            Self::Ignored => "ignored",
            Self::NoTarget => "no_target",
            Self::StaleTarget { .. } => "stale_target",
            Self::Unclassifiable { .. } => "unclassifiable",
            Self::Applied { .. } => "applied",
            Self::Grabbed { .. } => "grabbed",
            Self::Dropped { .. } => "dropped",
        }
    }

    pub fn target(&self) -> Option<Entity> {
        match *self {
            Self::Ignored | Self::NoTarget => None,
            Self::StaleTarget { target }
            | Self::Unclassifiable { target }
            | Self::Applied { target, .. }
            | Self::Grabbed { target }
            | Self::Dropped { target } => Some(target),
        }
    }

    pub fn category(&self) -> Option<InteractionCategory> {
        match *self {
            Self::Applied { category, .. } => Some(category),
            Self::Grabbed { .. } | Self::Dropped { .. } => Some(InteractionCategory::Grab),
            _ => None,
        }
    }
}

impl fmt::Display for InteractionOutcome {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match (self.category(), self.target()) {
            (Some(category), Some(target)) => {
                write!(f, "{} ({} {})", self.label(), category, target)
            }
            (None, Some(target)) => write!(f, "{} ({})", self.label(), target),
            _ => write!(f, "{}", self.label()),
        }
    }
}

/// Resolves one "start interacting" event for a character.
///
/// While holding, the event always drops, whatever the character is facing. Otherwise the
/// probe picks a target and exactly one handler runs for it. The in-progress guard is held
/// for the whole call and released on every return path.
pub fn on_interact_start(
    state: &mut CharacterInteractionState,
    pose: CharacterPose,
    max_range: f32,
    registry: &impl InteractableRegistry,
    effects: &mut impl InteractionEffects,
) -> Result<InteractionOutcome, InteractionError> {
    if state.in_progress {
        return Ok(InteractionOutcome::Ignored);
    }

    state.in_progress = true;
    let result = resolve(state, pose, max_range, registry, effects);
    state.in_progress = false;
    result
}

fn resolve(
    state: &mut CharacterInteractionState,
    pose: CharacterPose,
    max_range: f32,
    registry: &impl InteractableRegistry,
    effects: &mut impl InteractionEffects,
) -> Result<InteractionOutcome, InteractionError> {
    if state.hold.is_holding() {
        let target = state.hold.drop_held()?;
        // A held object despawned elsewhere still clears the hand; there is nothing to detach.
        if registry.is_alive(target) {
            effects.drop_held(target);
        }
        return Ok(InteractionOutcome::Dropped { target });
    }

    let Some(hit) = registry.query_nearest(pose.origin, pose.forward, max_range)? else {
        return Ok(InteractionOutcome::NoTarget);
    };
    let target = hit.entity;
    if !registry.is_alive(target) {
        return Ok(InteractionOutcome::StaleTarget { target });
    }

    let category = match classify(&hit) {
        Classification::Category(category) => category,
        Classification::Unclassifiable => {
            return Ok(InteractionOutcome::Unclassifiable { target });
        }
    };

    match category {
        InteractionCategory::Grab => {
            state.hold.grab(target)?;
            effects.grab(target);
            return Ok(InteractionOutcome::Grabbed { target });
        }
        InteractionCategory::Push => effects.push(target),
        InteractionCategory::Drink => effects.drink(target),
        InteractionCategory::Scratch => effects.scratch(target),
        InteractionCategory::Food => effects.eat(target),
        InteractionCategory::Play => effects.play(target),
        InteractionCategory::Sniff => effects.sniff(target),
    }

    Ok(InteractionOutcome::Applied { category, target })
}
