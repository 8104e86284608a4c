//! Interaction plugin wiring proximity detection, activation, and feedback.
use bevy::prelude::*;

use crate::core::GameplaySet;

use super::{
    components::{InteractionActivated, Score},
    systems::{
        activate_interactables, apply_highlights, collect_items, detect_proximity,
        log_interactions,
    },
};

pub struct InteractionPlugin;

impl Plugin for InteractionPlugin {
    fn build(&self, app: &mut App) {
        app.add_message::<InteractionActivated>()
            .init_resource::<Score>()
            .add_systems(Update, detect_proximity.in_set(GameplaySet::Sense))
            .add_systems(
                Update,
                (
                    activate_interactables,
                    (log_interactions, collect_items),
                )
                    .chain()
                    .in_set(GameplaySet::Act),
            )
            .add_systems(Update, apply_highlights.in_set(GameplaySet::Present));
    }
}
