//! Physics plugin wiring collider snapshots and body integration.
use bevy::prelude::*;

use crate::core::GameplaySet;

use super::{
    query::ColliderSnapshot,
    systems::{integrate_bodies, snapshot_colliders},
};

pub struct PhysicsPlugin;

impl Plugin for PhysicsPlugin {
    fn build(&self, app: &mut App) {
        app.init_resource::<ColliderSnapshot>()
            .add_systems(Update, snapshot_colliders.in_set(GameplaySet::Sense))
            .add_systems(Update, integrate_bodies.in_set(GameplaySet::Act));
    }
}
