//! Components describing interactable props and the characters that use them.
use std::fmt;

use bevy::prelude::*;
use serde::{Deserialize, Serialize};

use super::hold::HoldState;

/// Closed set of interaction kinds a prop can offer.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum InteractionCategory {
    Push,
    Drink,
    Scratch,
    Food,
    Grab,
    Play,
    Sniff,
}

impl InteractionCategory {
    pub const ALL: [InteractionCategory; 7] = [
        Self::Push,
        Self::Drink,
        Self::Scratch,
        Self::Food,
        Self::Grab,
        Self::Play,
        Self::Sniff,
    ];

    pub fn label(self) -> &'static str {
        match self {
            Self::Push => "push",
            Self::Drink => "drink",
            Self::Scratch => "scratch",
            Self::Food => "food",
            Self::Grab => "grab",
            Self::Play => "play",
            Self::Sniff => "sniff",
        }
    }

    /// Resolves a data-file tag such as `"Grab"` or `" sniff "`.
    pub fn from_tag(tag: &str) -> Option<Self> {
        let normalised = tag.trim().to_ascii_lowercase();
        Self::ALL
            .into_iter()
            .find(|category| category.label() == normalised)
    }
}

impl fmt::Display for InteractionCategory {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.label())
    }
}

/// Tags a world object with the single interaction it offers.
///
/// The category is fixed when the prop is spawned; nothing mutates it afterwards.
#[derive(Component, Debug, Clone, Copy, PartialEq, Eq)]
pub struct Interactable {
    category: InteractionCategory,
}

impl Interactable {
    pub fn new(category: InteractionCategory) -> Self {
        Self { category }
    }

    pub fn category(&self) -> InteractionCategory {
        self.category
    }
}

/// Bounding sphere hit by the interaction probe.
///
/// Bodies without an [`Interactable`] tag still block the ray.
#[derive(Component, Debug, Clone, Copy)]
pub struct ProbeCollider {
    pub radius: f32,
}

impl ProbeCollider {
    pub fn new(radius: f32) -> Self {
        Self {
            radius: radius.max(f32::EPSILON),
        }
    }
}

/// Marker for characters that issue interact events.
#[derive(Component, Debug, Default)]
pub struct Interactor;

/// Direction the character is looking, kept in sync by whatever drives the camera.
#[derive(Component, Debug, Clone, Copy)]
pub struct ViewForward(pub Dir3);

impl Default for ViewForward {
    fn default() -> Self {
        Self(Dir3::NEG_Z)
    }
}

/// Per-character hold state plus the re-entrancy guard for interact events.
#[derive(Component, Debug, Default, Clone)]
pub struct CharacterInteractionState {
    pub(crate) hold: HoldState,
    pub(crate) in_progress: bool,
}

impl CharacterInteractionState {
    #[allow(dead_code)]
    pub fn hold(&self) -> HoldState {
        self.hold
    }

    #[allow(dead_code)]
    pub fn held_object(&self) -> Option<Entity> {
        self.hold.held()
    }

    #[allow(dead_code)]
    pub fn is_interaction_in_progress(&self) -> bool {
        self.in_progress
    }
}

/// Where the character stands and which way it faces when an interact event resolves.
#[derive(Debug, Clone, Copy)]
pub struct CharacterPose {
    pub origin: Vec3,
    pub forward: Vec3,
}

impl CharacterPose {
    pub fn new(origin: Vec3, forward: Vec3) -> Self {
        Self { origin, forward }
    }
}
