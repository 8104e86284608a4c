//! Transition plugin wiring zones, services, fades, and spawn placement.
use bevy::prelude::*;

use crate::core::GameplaySet;

use super::{
    services::{ActiveScene, GameState, SceneFade, SceneServices},
    systems::{
        advance_scene_fade, apply_scene_visibility, detect_zone_presence,
        place_actor_at_spawn_point, update_fade_overlay,
    },
};

pub struct TransitionPlugin;

impl Plugin for TransitionPlugin {
    fn build(&self, app: &mut App) {
        app.init_resource::<SceneServices>()
            .init_resource::<ActiveScene>()
            .init_resource::<GameState>()
            .init_resource::<SceneFade>()
            .add_systems(Update, detect_zone_presence.in_set(GameplaySet::Sense))
            .add_systems(
                Update,
                (
                    advance_scene_fade,
                    place_actor_at_spawn_point,
                    apply_scene_visibility,
                )
                    .chain()
                    .in_set(GameplaySet::Act),
            )
            .add_systems(Update, update_fade_overlay.in_set(GameplaySet::Present));
    }
}
