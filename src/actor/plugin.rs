//! Actor plugin wiring registry resolution and movement.
use bevy::prelude::*;

use crate::{
    core::{input::read_action_input, GameplaySet},
    physics::systems::integrate_bodies,
};

use super::{
    components::ActorRegistry,
    systems::{drive_actor, resolve_actor},
};

pub struct ActorPlugin;

impl Plugin for ActorPlugin {
    fn build(&self, app: &mut App) {
        app.init_resource::<ActorRegistry>()
            .add_systems(
                Update,
                resolve_actor
                    .after(read_action_input)
                    .in_set(GameplaySet::Input),
            )
            .add_systems(
                Update,
                drive_actor
                    .before(integrate_bodies)
                    .in_set(GameplaySet::Act),
            );
    }
}
