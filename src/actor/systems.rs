//! Actor resolution, lookup, and movement systems.
use bevy::{
    ecs::system::SystemParam,
    log::{debug, info},
    prelude::*,
};

use crate::{
    core::{input::ActionInput, settings::ActorSettings},
    physics::components::Body,
};

use super::components::{facing_direction, Actor, ActorRegistry};

/// Read-only view of the actor's placement through the shared registry.
///
/// Mutable transform queries elsewhere must carry `Without<Actor>` to stay disjoint from this one.
#[derive(SystemParam)]
pub struct ActorLocator<'w, 's> {
    registry: Res<'w, ActorRegistry>,
    transforms: Query<'w, 's, &'static Transform, With<Actor>>,
}

impl ActorLocator<'_, '_> {
    #[cfg_attr(not(test), allow(dead_code))]
    pub fn entity(&self) -> Option<Entity> {
        self.registry
            .entity()
            .filter(|entity| self.transforms.contains(*entity))
    }

    pub fn position(&self) -> Option<Vec3> {
        self.registry
            .entity()
            .and_then(|entity| self.transforms.get(entity).ok())
            .map(|transform| transform.translation)
    }

    pub fn planar_position(&self) -> Option<Vec2> {
        self.position().map(|translation| translation.truncate())
    }
}

/// Binds the registry to the tagged actor, re-resolving only when the binding is missing or stale.
pub fn resolve_actor(mut registry: ResMut<ActorRegistry>, actors: Query<Entity, With<Actor>>) {
    if let Some(bound) = registry.entity() {
        if actors.contains(bound) {
            return;
        }
        debug!(target: "actor", "Actor {} no longer exists; re-resolving", bound);
        registry.clear();
    }

    if let Some(entity) = actors.iter().next() {
        registry.bind(entity);
        info!(target: "actor", "Actor bound to {}", entity);
    }
}

/// Sets the actor's planar velocity from the sampled movement input.
pub fn drive_actor(
    input: Res<ActionInput>,
    settings: Res<ActorSettings>,
    mut actors: Query<&mut Body, With<Actor>>,
) {
    for mut body in actors.iter_mut() {
        body.velocity = input.movement * settings.move_speed;
    }
}

/// Current facing of the actor for placement in front of it.
pub fn actor_facing(input: &ActionInput) -> Vec2 {
    facing_direction(input.movement)
}
