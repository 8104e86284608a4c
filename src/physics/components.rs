//! Bodies, colliders, and collision layers.
use bevy::prelude::*;

/// Bitmask of collision categories.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default)]
pub struct CollisionLayers(u32);

impl CollisionLayers {
    pub const NONE: Self = Self(0);
    pub const WALL: Self = Self(1 << 0);
    pub const PROP: Self = Self(1 << 1);
    pub const ACTOR: Self = Self(1 << 2);

    #[cfg_attr(not(test), allow(dead_code))]
    pub const fn bits(self) -> u32 {
        self.0
    }

    pub const fn union(self, other: Self) -> Self {
        Self(self.0 | other.0)
    }

    pub const fn intersects(self, other: Self) -> bool {
        self.0 & other.0 != 0
    }
}

/// How a body's position is driven.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum BodyKind {
    /// Integrated from velocity every frame.
    #[default]
    Dynamic,
    /// Positioned externally; never integrated.
    Kinematic,
}

/// Planar rigid body without gravity or rotation.
#[derive(Component, Debug, Clone, Default)]
pub struct Body {
    pub kind: BodyKind,
    pub velocity: Vec2,
    pub linear_damping: f32,
}

impl Body {
    pub fn dynamic(linear_damping: f32) -> Self {
        Self {
            kind: BodyKind::Dynamic,
            velocity: Vec2::ZERO,
            linear_damping: linear_damping.max(0.0),
        }
    }

    pub fn is_kinematic(&self) -> bool {
        self.kind == BodyKind::Kinematic
    }

    /// Switches to external positioning and drops residual velocity.
    pub fn make_kinematic(&mut self) {
        self.kind = BodyKind::Kinematic;
        self.velocity = Vec2::ZERO;
    }

    /// Returns to velocity integration from rest.
    pub fn make_dynamic(&mut self) {
        self.kind = BodyKind::Dynamic;
        self.velocity = Vec2::ZERO;
    }
}

/// Axis-aligned box collider centred on the entity's translation.
#[derive(Component, Debug, Clone)]
pub struct Collider {
    pub half_extents: Vec2,
    pub layers: CollisionLayers,
    /// Pass-through colliders never block and are ignored by obstruction queries.
    pub trigger: bool,
}

impl Collider {
    pub fn new(half_extents: Vec2, layers: CollisionLayers) -> Self {
        Self {
            half_extents: half_extents.abs(),
            layers,
            trigger: false,
        }
    }

    pub fn is_blocking(&self) -> bool {
        !self.trigger
    }

    pub fn set_pass_through(&mut self, pass_through: bool) {
        self.trigger = pass_through;
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn layers_combine_and_intersect() {
        let solid = CollisionLayers::WALL.union(CollisionLayers::PROP);
        assert!(solid.intersects(CollisionLayers::PROP));
        assert!(!solid.intersects(CollisionLayers::ACTOR));
        assert!(!CollisionLayers::NONE.intersects(solid));
        assert_eq!(solid.bits(), 0b11);
    }

    #[test]
    fn kind_switches_clear_velocity() {
        let mut body = Body::dynamic(10.0);
        body.velocity = Vec2::new(3.0, -1.0);
        body.make_kinematic();
        assert!(body.is_kinematic());
        assert_eq!(body.velocity, Vec2::ZERO);

        body.velocity = Vec2::X;
        body.make_dynamic();
        assert_eq!(body.kind, BodyKind::Dynamic);
        assert_eq!(body.velocity, Vec2::ZERO);
    }
}
