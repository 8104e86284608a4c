//! Camera follow system.
use bevy::prelude::*;

use crate::actor::{components::Actor, systems::ActorLocator};

use super::components::CameraFollow;

/// Moves every follow camera toward the actor; cameras hold still while no actor is bound.
pub fn follow_actor(
    actor: ActorLocator,
    mut cameras: Query<(&CameraFollow, &mut Transform), Without<Actor>>,
) {
    let Some(actor_position) = actor.position() else {
        return;
    };
    for (follow, mut transform) in cameras.iter_mut() {
        follow.step(&mut transform, actor_position);
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::actor::{components::ActorRegistry, systems::resolve_actor};

    #[test]
    fn camera_converges_on_actor_offset() {
        let mut app = App::new();
        app.init_resource::<ActorRegistry>()
            .add_systems(Update, resolve_actor)
            .add_systems(PostUpdate, follow_actor);

        app.world_mut()
            .spawn((Actor, Transform::from_xyz(4.0, 2.0, 0.0)));
        let camera = app
            .world_mut()
            .spawn((
                CameraFollow {
                    offset: Vec3::new(0.0, -6.0, 10.0),
                    blend: 0.5,
                    rotation: Quat::IDENTITY,
                },
                Transform::default(),
            ))
            .id();

        for _ in 0..40 {
            app.update();
        }

        let translation = app.world().get::<Transform>(camera).unwrap().translation;
        assert!(translation.abs_diff_eq(Vec3::new(4.0, -4.0, 10.0), 1e-4));
    }

    #[test]
    fn camera_stays_put_without_actor() {
        let mut app = App::new();
        app.init_resource::<ActorRegistry>()
            .add_systems(PostUpdate, follow_actor);
        let camera = app
            .world_mut()
            .spawn((
                CameraFollow {
                    offset: Vec3::ONE,
                    blend: 0.5,
                    rotation: Quat::IDENTITY,
                },
                Transform::from_xyz(1.0, 1.0, 1.0),
            ))
            .id();

        app.update();
        assert_eq!(
            app.world().get::<Transform>(camera).unwrap().translation,
            Vec3::ONE
        );
    }
}
