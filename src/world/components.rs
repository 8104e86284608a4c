//! Components used by the world module.
use bevy::prelude::*;

/// Marker for static blocking geometry.
#[derive(Component, Debug, Default)]
pub struct Wall;

/// Marker component identifying the main directional light (the "sun").
#[derive(Component, Debug, Default)]
pub struct PrimarySun;

/// Floor extent and placement of one scene area.
#[derive(Debug, Clone, Copy)]
pub struct AreaLayout {
    pub name: &'static str,
    pub origin: Vec2,
    pub half_extents: Vec2,
}

impl AreaLayout {
    pub const fn new(name: &'static str, origin: Vec2, half_extents: Vec2) -> Self {
        Self {
            name,
            origin,
            half_extents,
        }
    }

    /// World position of a point given relative to the area origin.
    pub fn at(&self, local: Vec2) -> Vec2 {
        self.origin + local
    }
}
