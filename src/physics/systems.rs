//! Collider snapshotting and planar body integration.
use bevy::prelude::*;

use crate::core::SimulationClock;

use super::{
    components::{Body, Collider, CollisionLayers},
    query::ColliderSnapshot,
};

/// Layers that stop dynamic bodies from moving through them.
const MOVEMENT_BLOCKERS: CollisionLayers = CollisionLayers::WALL;

/// Captures every visible blocking collider for this frame's queries.
pub fn snapshot_colliders(
    mut snapshot: ResMut<ColliderSnapshot>,
    colliders: Query<(Entity, &Transform, &Collider, Option<&Visibility>)>,
) {
    snapshot.clear();
    for (entity, transform, collider, visibility) in colliders.iter() {
        if matches!(visibility, Some(Visibility::Hidden)) {
            continue;
        }
        snapshot.push(entity, transform.translation.truncate(), collider);
    }
}

/// Moves dynamic bodies by their velocity, sliding along walls, then applies damping.
pub fn integrate_bodies(
    clock: Res<SimulationClock>,
    snapshot: Res<ColliderSnapshot>,
    mut bodies: Query<(Entity, &mut Transform, &mut Body, Option<&Collider>)>,
) {
    let dt = clock.delta_secs();
    if dt <= 0.0 {
        return;
    }

    for (entity, mut transform, mut body, collider) in bodies.iter_mut() {
        if body.is_kinematic() || body.velocity == Vec2::ZERO {
            continue;
        }

        let from = transform.translation.truncate();
        let step = body.velocity * dt;
        let next = match collider {
            Some(collider) if collider.is_blocking() => {
                resolve_step(&snapshot, entity, from, step, collider.half_extents)
            }
            _ => from + step,
        };

        transform.translation.x = next.x;
        transform.translation.y = next.y;
        let linear_damping = body.linear_damping;
        body.velocity *= 1.0 / (1.0 + linear_damping * dt);
    }
}

fn resolve_step(
    snapshot: &ColliderSnapshot,
    entity: Entity,
    from: Vec2,
    step: Vec2,
    half_extents: Vec2,
) -> Vec2 {
    let candidates = [
        from + step,
        from + Vec2::new(step.x, 0.0),
        from + Vec2::new(0.0, step.y),
    ];
    candidates
        .into_iter()
        .find(|candidate| !snapshot.blocks_box(entity, *candidate, half_extents, MOVEMENT_BLOCKERS))
        .unwrap_or(from)
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::time::Duration;

    fn physics_app() -> App {
        let mut app = App::new();
        let mut clock = SimulationClock::default();
        clock.tick(Duration::from_millis(100));
        app.insert_resource(clock)
            .init_resource::<ColliderSnapshot>()
            .add_systems(Update, (snapshot_colliders, integrate_bodies).chain());
        app
    }

    #[test]
    fn dynamic_bodies_move_and_kinematic_bodies_stay() {
        let mut app = physics_app();

        let mut moving = Body::dynamic(0.0);
        moving.velocity = Vec2::new(10.0, 0.0);
        let dynamic = app.world_mut().spawn((Transform::default(), moving)).id();

        let mut held = Body::dynamic(0.0);
        held.make_kinematic();
        held.velocity = Vec2::new(10.0, 0.0);
        let kinematic = app.world_mut().spawn((Transform::default(), held)).id();

        app.update();

        let dynamic_x = app.world().get::<Transform>(dynamic).unwrap().translation.x;
        let kinematic_x = app.world().get::<Transform>(kinematic).unwrap().translation.x;
        assert!((dynamic_x - 1.0).abs() < 1e-4);
        assert_eq!(kinematic_x, 0.0);
    }

    #[test]
    fn walls_stop_blocking_bodies_but_allow_sliding() {
        let mut app = physics_app();
        app.world_mut().spawn((
            Transform::from_xyz(1.0, 0.0, 0.0),
            Collider::new(Vec2::new(0.5, 5.0), CollisionLayers::WALL),
        ));

        let mut body = Body::dynamic(0.0);
        body.velocity = Vec2::new(5.0, 5.0);
        let mover = app
            .world_mut()
            .spawn((
                Transform::default(),
                body,
                Collider::new(Vec2::splat(0.4), CollisionLayers::ACTOR),
            ))
            .id();

        app.update();

        let translation = app.world().get::<Transform>(mover).unwrap().translation;
        assert_eq!(translation.x, 0.0);
        assert!((translation.y - 0.5).abs() < 1e-4);
    }

    #[test]
    fn hidden_colliders_are_left_out_of_the_snapshot() {
        let mut app = physics_app();
        app.world_mut().spawn((
            Transform::default(),
            Collider::new(Vec2::ONE, CollisionLayers::WALL),
            Visibility::Hidden,
        ));
        app.world_mut().spawn((
            Transform::from_xyz(5.0, 0.0, 0.0),
            Collider::new(Vec2::ONE, CollisionLayers::WALL),
        ));

        app.update();

        assert_eq!(app.world().resource::<ColliderSnapshot>().len(), 1);
    }
}
