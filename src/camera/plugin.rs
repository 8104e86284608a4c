//! Camera plugin: follow runs late so it sees the actor's final position for the frame.
use bevy::{prelude::*, transform::TransformSystems};

use super::systems::follow_actor;

pub struct CameraPlugin;

impl Plugin for CameraPlugin {
    fn build(&self, app: &mut App) {
        app.add_systems(
            PostUpdate,
            follow_actor.before(TransformSystems::Propagate),
        );
    }
}
