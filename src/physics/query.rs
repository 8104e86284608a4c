//! Spatial obstruction queries over a per-frame snapshot of colliders.
use bevy::prelude::*;

use super::components::{Collider, CollisionLayers};

/// Answers whether a circular region is occupied by blocking geometry.
pub trait ObstructionQuery {
    fn is_obstructed(&self, center: Vec2, radius: f32, layers: CollisionLayers) -> bool;
}

impl<F> ObstructionQuery for F
where
    F: Fn(Vec2, f32, CollisionLayers) -> bool,
{
    fn is_obstructed(&self, center: Vec2, radius: f32, layers: CollisionLayers) -> bool {
        self(center, radius, layers)
    }
}

#[derive(Debug, Clone)]
struct SnapshotEntry {
    entity: Entity,
    center: Vec2,
    half_extents: Vec2,
    layers: CollisionLayers,
}

/// Blocking colliders captured once per frame.
#[derive(Resource, Debug, Clone, Default)]
pub struct ColliderSnapshot {
    entries: Vec<SnapshotEntry>,
}

impl ColliderSnapshot {
    pub fn clear(&mut self) {
        self.entries.clear();
    }

    /// Records a collider; pass-through colliders are skipped.
    pub fn push(&mut self, entity: Entity, center: Vec2, collider: &Collider) {
        if !collider.is_blocking() {
            return;
        }
        self.entries.push(SnapshotEntry {
            entity,
            center,
            half_extents: collider.half_extents,
            layers: collider.layers,
        });
    }

    #[cfg_attr(not(test), allow(dead_code))]
    pub fn len(&self) -> usize {
        self.entries.len()
    }

    #[cfg_attr(not(test), allow(dead_code))]
    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }

    /// Whether a box centred at `center` overlaps any blocking collider on `layers`, other than `ignore`.
    pub fn blocks_box(
        &self,
        ignore: Entity,
        center: Vec2,
        half_extents: Vec2,
        layers: CollisionLayers,
    ) -> bool {
        self.entries.iter().any(|entry| {
            entry.entity != ignore
                && entry.layers.intersects(layers)
                && boxes_overlap(center, half_extents, entry.center, entry.half_extents)
        })
    }
}

impl ObstructionQuery for ColliderSnapshot {
    fn is_obstructed(&self, center: Vec2, radius: f32, layers: CollisionLayers) -> bool {
        self.entries.iter().any(|entry| {
            entry.layers.intersects(layers)
                && circle_overlaps_box(center, radius, entry.center, entry.half_extents)
        })
    }
}

fn circle_overlaps_box(center: Vec2, radius: f32, box_center: Vec2, half_extents: Vec2) -> bool {
    let closest = center.clamp(box_center - half_extents, box_center + half_extents);
    closest.distance_squared(center) <= radius * radius
}

fn boxes_overlap(a_center: Vec2, a_half: Vec2, b_center: Vec2, b_half: Vec2) -> bool {
    let delta = (a_center - b_center).abs();
    delta.x < a_half.x + b_half.x && delta.y < a_half.y + b_half.y
}

#[cfg(test)]
mod tests {
    use super::*;

    fn entities(count: usize) -> Vec<Entity> {
        let mut world = World::new();
        (0..count).map(|_| world.spawn_empty().id()).collect()
    }

    fn wall_snapshot(wall: Entity) -> ColliderSnapshot {
        let mut snapshot = ColliderSnapshot::default();
        snapshot.push(
            wall,
            Vec2::new(3.0, 0.0),
            &Collider::new(Vec2::new(0.5, 2.0), CollisionLayers::WALL),
        );
        snapshot
    }

    #[test]
    fn circle_touching_wall_is_obstructed() {
        let snapshot = wall_snapshot(entities(1)[0]);
        assert!(snapshot.is_obstructed(Vec2::new(2.1, 0.0), 0.5, CollisionLayers::WALL));
        assert!(!snapshot.is_obstructed(Vec2::new(1.5, 0.0), 0.5, CollisionLayers::WALL));
    }

    #[test]
    fn layers_outside_the_mask_are_ignored() {
        let snapshot = wall_snapshot(entities(1)[0]);
        assert!(!snapshot.is_obstructed(Vec2::new(3.0, 0.0), 0.5, CollisionLayers::PROP));
    }

    #[test]
    fn trigger_colliders_are_not_recorded() {
        let mut snapshot = ColliderSnapshot::default();
        let mut collider = Collider::new(Vec2::splat(0.5), CollisionLayers::PROP);
        collider.set_pass_through(true);
        snapshot.push(entities(1)[0], Vec2::ZERO, &collider);
        assert!(snapshot.is_empty());
    }

    #[test]
    fn box_query_skips_the_moving_entity() {
        let ids = entities(2);
        let (wall, mover) = (ids[0], ids[1]);
        let snapshot = wall_snapshot(wall);
        let center = Vec2::new(2.7, 0.0);
        let half = Vec2::splat(0.4);
        assert!(snapshot.blocks_box(mover, center, half, CollisionLayers::WALL));
        assert!(!snapshot.blocks_box(wall, center, half, CollisionLayers::WALL));
    }

    #[test]
    fn closures_act_as_obstruction_queries() {
        let always_blocked = |_: Vec2, _: f32, _: CollisionLayers| true;
        assert!(always_blocked.is_obstructed(Vec2::ZERO, 1.0, CollisionLayers::WALL));
    }
}
