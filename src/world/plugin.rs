//! WorldPlugin spawns the level.
use bevy::prelude::*;

use crate::world::systems::spawn_level;

pub struct WorldPlugin;

impl Plugin for WorldPlugin {
    fn build(&self, app: &mut App) {
        app.add_systems(Startup, spawn_level);
    }
}
