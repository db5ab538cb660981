//! Maps a probe hit to the interaction it offers.
use super::{components::InteractionCategory, probe::ProbeHit};

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Classification {
    Category(InteractionCategory),
    Unclassifiable,
}

/// Reads the category tag stored on the hit body. No geometry is inspected.
pub fn classify(hit: &ProbeHit) -> Classification {
    match hit.category {
        Some(category) => Classification::Category(category),
        None => Classification::Unclassifiable,
    }
}
