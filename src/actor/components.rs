//! Components and resources identifying the controlled actor.
use bevy::prelude::*;

/// Movement input below this length leaves the actor facing its default direction.
pub const FACING_THRESHOLD: f32 = 0.1;

/// Direction the actor faces when it is not moving ("down" on screen).
pub const DEFAULT_FACING: Vec2 = Vec2::NEG_Y;

/// Marker component for the single player-controlled entity.
#[derive(Component, Debug, Default)]
pub struct Actor;

/// Process-wide binding to the actor entity, resolved once and shared by every system.
#[derive(Resource, Debug, Default)]
pub struct ActorRegistry {
    entity: Option<Entity>,
}

impl ActorRegistry {
    pub fn entity(&self) -> Option<Entity> {
        self.entity
    }

    pub fn bind(&mut self, entity: Entity) {
        self.entity = Some(entity);
    }

    pub fn clear(&mut self) {
        self.entity = None;
    }
}

/// Facing derived from the movement input: the input itself when significant, else [`DEFAULT_FACING`].
pub fn facing_direction(movement: Vec2) -> Vec2 {
    if movement.length() > FACING_THRESHOLD {
        movement.normalize()
    } else {
        DEFAULT_FACING
    }
}
