//! Systems running the carry protocol against the actor, input, and obstruction snapshot.
use bevy::{
    log::{debug, info, warn},
    prelude::*,
};

use crate::{
    actor::{
        components::Actor,
        systems::{actor_facing, ActorLocator},
    },
    core::{
        entity_label, input::ActionInput, prompt::PromptService, settings::CarrySettings,
        SimulationClock,
    },
    interaction::components::Interactable,
    physics::{
        components::{Body, Collider},
        query::ColliderSnapshot,
    },
};

use super::components::{Carryable, DropOutcome, ResetCarryable};

type CarryItem<'a> = (
    Entity,
    &'a mut Carryable,
    &'a mut Interactable,
    &'a mut Transform,
    &'a mut Body,
    &'a mut Collider,
    Option<&'a Name>,
);

/// Captures the original placement of newly spawned carryables.
pub fn capture_original_placement(
    mut added: Query<
        (
            Entity,
            &Transform,
            &mut Carryable,
            Has<Body>,
            Has<Collider>,
            Option<&Name>,
        ),
        Added<Carryable>,
    >,
) {
    for (entity, transform, mut carryable, has_body, has_collider, name) in added.iter_mut() {
        if carryable.capture_original(transform) {
            debug!(
                target: "carry",
                "Captured original placement of {} at {:?}",
                entity_label(entity, name),
                transform.translation
            );
        }
        if !has_body || !has_collider {
            warn!(
                target: "carry",
                "{} is carryable but lacks a Body or Collider; it cannot be picked up",
                entity_label(entity, name)
            );
        }
    }
}

/// Handles one activation press: drops the carried object, or picks up the nearest eligible one.
pub fn run_carry_protocol(
    input: Res<ActionInput>,
    clock: Res<SimulationClock>,
    settings: Res<CarrySettings>,
    snapshot: Res<ColliderSnapshot>,
    actor: ActorLocator,
    mut prompt: ResMut<PromptService>,
    mut carryables: Query<CarryItem<'static>, Without<Actor>>,
) {
    if !input.activate_pressed {
        return;
    }
    let Some(actor_position) = actor.planar_position() else {
        return;
    };

    let carrying = carryables.iter().any(|item| item.1.is_carried());
    if carrying {
        let now = clock.elapsed_secs();
        let facing = actor_facing(&input);
        for (entity, mut carryable, mut interactable, mut transform, mut body, mut collider, name) in
            carryables.iter_mut()
        {
            if !carryable.is_carried() {
                continue;
            }
            let label = entity_label(entity, name);
            match carryable.try_drop(now, actor_position, facing, &*snapshot) {
                DropOutcome::Placed(position) => {
                    transform.translation = position.extend(transform.translation.z);
                    if let Some(original) = carryable.original() {
                        transform.scale = original.scale;
                    }
                    body.make_dynamic();
                    collider.set_pass_through(false);
                    interactable.resume();
                    prompt.hide();
                    info!(target: "carry", "Placed {} at {:?}", label, position);
                }
                DropOutcome::Blocked(position) => {
                    prompt.show(&settings.blocked_message);
                    info!(target: "carry", "Drop of {} blocked at {:?}", label, position);
                }
                DropOutcome::CoolingDown => {
                    debug!(target: "carry", "Drop of {} ignored during cooldown", label);
                }
                DropOutcome::NotCarried => {}
            }
        }
        return;
    }

    let nearest = carryables
        .iter()
        .filter(|item| item.2.in_range() && !item.2.is_suspended())
        .map(|item| {
            let distance = actor_position.distance(item.3.translation.truncate());
            (item.0, item.1.within_pickup(distance), distance)
        })
        .filter(|(_, reachable, _)| *reachable)
        .min_by(|a, b| a.2.total_cmp(&b.2))
        .map(|(entity, _, _)| entity);

    let Some(target) = nearest else {
        return;
    };
    let Ok((entity, mut carryable, mut interactable, _, mut body, mut collider, name)) =
        carryables.get_mut(target)
    else {
        return;
    };

    if carryable.pick_up() {
        body.make_kinematic();
        collider.set_pass_through(true);
        interactable.suspend();
        prompt.hide();
        prompt.show(&settings.place_prompt);
        info!(target: "carry", "Picked up {}", entity_label(entity, name));
    }
}

/// Eases carried objects toward the spot in front of the actor and re-asserts their scale.
pub fn follow_carrier(
    input: Res<ActionInput>,
    clock: Res<SimulationClock>,
    actor: ActorLocator,
    mut carryables: Query<(&Carryable, &mut Transform), Without<Actor>>,
) {
    let Some(actor_position) = actor.planar_position() else {
        return;
    };
    let facing = actor_facing(&input);
    let dt = clock.delta_secs();

    for (carryable, mut transform) in carryables.iter_mut() {
        if !carryable.is_carried() {
            continue;
        }
        let target = carryable.carry_target(actor_position, facing);
        transform.translation = carryable.follow_step(transform.translation, target, dt);
        if let Some(original) = carryable.original() {
            transform.scale = original.scale;
        }
    }
}

/// Applies queued reset requests.
pub fn handle_carry_resets(
    mut requests: MessageReader<ResetCarryable>,
    mut prompt: ResMut<PromptService>,
    mut carryables: Query<
        (
            &mut Carryable,
            &mut Interactable,
            &mut Transform,
            &mut Body,
            &mut Collider,
            Option<&Name>,
        ),
        Without<Actor>,
    >,
) {
    for request in requests.read() {
        let Ok((mut carryable, mut interactable, mut transform, mut body, mut collider, name)) =
            carryables.get_mut(request.entity)
        else {
            warn!(target: "carry", "Reset requested for unknown carryable {}", request.entity);
            continue;
        };

        let was_carried = carryable.is_carried();
        let Some(original) = carryable.reset() else {
            warn!(
                target: "carry",
                "{} has no captured placement to reset to",
                entity_label(request.entity, name)
            );
            continue;
        };

        transform.translation = original.translation;
        transform.scale = original.scale;
        body.make_dynamic();
        collider.set_pass_through(false);
        let left_range = interactable.resume().is_some();
        if was_carried || left_range {
            prompt.hide();
        }
        info!(target: "carry", "Reset {}", entity_label(request.entity, name));
    }
}

#[cfg(feature = "core_debug")]
pub fn reset_all_on_hotkey(
    keyboard: Res<ButtonInput<KeyCode>>,
    carryables: Query<Entity, With<Carryable>>,
    mut requests: MessageWriter<ResetCarryable>,
) {
    if keyboard.just_pressed(KeyCode::F5) {
        requests.write_batch(carryables.iter().map(|entity| ResetCarryable { entity }));
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::{
        actor::{components::ActorRegistry, systems::resolve_actor},
        interaction::systems::detect_proximity,
        physics::{
            components::{BodyKind, CollisionLayers},
            systems::snapshot_colliders,
        },
    };
    use std::time::Duration;

    fn carry_app() -> App {
        let mut app = App::new();
        app.init_resource::<ActorRegistry>()
            .init_resource::<PromptService>()
            .init_resource::<ActionInput>()
            .init_resource::<ColliderSnapshot>()
            .init_resource::<SimulationClock>()
            .init_resource::<CarrySettings>()
            .add_message::<ResetCarryable>()
            .add_systems(
                Update,
                (
                    resolve_actor,
                    snapshot_colliders,
                    capture_original_placement,
                    detect_proximity,
                    run_carry_protocol,
                    follow_carrier,
                    handle_carry_resets,
                )
                    .chain(),
            );
        app
    }

    fn spawn_crate(app: &mut App, at: Vec3) -> Entity {
        let settings = CarrySettings::default();
        app.world_mut()
            .spawn((
                Name::new("Weight3"),
                Transform::from_translation(at).with_scale(Vec3::splat(0.8)),
                Carryable::new(&settings),
                Interactable::new(2.0, settings.pickup_prompt.clone(), Color::WHITE),
                Body::dynamic(8.0),
                Collider::new(Vec2::splat(0.4), CollisionLayers::PROP),
            ))
            .id()
    }

    fn press(app: &mut App, pressed: bool) {
        app.world_mut().resource_mut::<ActionInput>().activate_pressed = pressed;
    }

    fn advance(app: &mut App, secs: f32) {
        app.world_mut()
            .resource_mut::<SimulationClock>()
            .tick(Duration::from_secs_f32(secs));
    }

    fn prompt(app: &App) -> Option<String> {
        app.world()
            .resource::<PromptService>()
            .current()
            .map(str::to_string)
    }

    #[test]
    fn pickup_then_place_round_trip() {
        let mut app = carry_app();
        app.world_mut().spawn((Actor, Transform::default()));
        let object = spawn_crate(&mut app, Vec3::new(1.0, 0.0, 0.25));

        app.update();
        assert_eq!(prompt(&app).as_deref(), Some("Press E to pick up"));

        press(&mut app, true);
        app.update();
        {
            let world = app.world();
            assert!(world.get::<Carryable>(object).unwrap().is_carried());
            assert_eq!(world.get::<Body>(object).unwrap().kind, BodyKind::Kinematic);
            assert!(!world.get::<Collider>(object).unwrap().is_blocking());
            assert!(world.get::<Interactable>(object).unwrap().is_suspended());
        }
        assert_eq!(prompt(&app).as_deref(), Some("Press E to place"));

        press(&mut app, false);
        advance(&mut app, 1.0);
        app.update();

        press(&mut app, true);
        app.update();
        let world = app.world();
        let transform = world.get::<Transform>(object).unwrap();
        assert_eq!(transform.translation, Vec3::new(0.0, -1.0, 0.25));
        assert_eq!(transform.scale, Vec3::splat(0.8));
        assert!(!world.get::<Carryable>(object).unwrap().is_carried());
        assert_eq!(world.get::<Body>(object).unwrap().kind, BodyKind::Dynamic);
        assert!(world.get::<Collider>(object).unwrap().is_blocking());
    }

    #[test]
    fn blocked_drop_keeps_carrying_and_reports() {
        let mut app = carry_app();
        app.world_mut().spawn((Actor, Transform::default()));
        let object = spawn_crate(&mut app, Vec3::new(1.0, 0.0, 0.0));
        app.world_mut().spawn((
            Transform::from_xyz(0.0, -1.0, 0.0),
            Collider::new(Vec2::new(3.0, 0.2), CollisionLayers::WALL),
        ));

        app.update();
        press(&mut app, true);
        app.update();
        press(&mut app, false);
        advance(&mut app, 1.0);
        app.update();

        press(&mut app, true);
        app.update();
        assert!(app.world().get::<Carryable>(object).unwrap().is_carried());
        assert_eq!(
            prompt(&app).as_deref(),
            Some("Can't place here - blocked by obstacle")
        );
    }

    #[test]
    fn reset_restores_carried_object() {
        let mut app = carry_app();
        app.world_mut().spawn((Actor, Transform::default()));
        let start = Vec3::new(1.0, 0.0, 0.25);
        let object = spawn_crate(&mut app, start);

        app.update();
        press(&mut app, true);
        app.update();
        press(&mut app, false);
        advance(&mut app, 0.05);
        app.update();
        assert_ne!(
            app.world().get::<Transform>(object).unwrap().translation,
            start
        );

        app.world_mut()
            .resource_mut::<Messages<ResetCarryable>>()
            .write(ResetCarryable { entity: object });
        app.update();

        let world = app.world();
        let transform = world.get::<Transform>(object).unwrap();
        assert_eq!(transform.translation, start);
        assert_eq!(transform.scale, Vec3::splat(0.8));
        assert!(!world.get::<Carryable>(object).unwrap().is_carried());
        assert!(world.get::<Collider>(object).unwrap().is_blocking());
        assert_eq!(prompt(&app), None);
    }

    #[test]
    fn reset_of_idle_object_in_range_hides_its_prompt() {
        let mut app = carry_app();
        app.world_mut().spawn((Actor, Transform::from_xyz(20.0, 0.0, 0.0)));
        let object = spawn_crate(&mut app, Vec3::ZERO);
        app.update();
        assert_eq!(prompt(&app), None);

        app.world_mut()
            .get_mut::<Transform>(object)
            .unwrap()
            .translation
            .x = 21.0;
        app.update();
        assert_eq!(prompt(&app).as_deref(), Some("Press E to pick up"));

        app.world_mut()
            .resource_mut::<Messages<ResetCarryable>>()
            .write(ResetCarryable { entity: object });
        app.update();

        assert_eq!(
            app.world().get::<Transform>(object).unwrap().translation,
            Vec3::ZERO
        );
        assert_eq!(prompt(&app), None);

        app.update();
        assert_eq!(prompt(&app), None);
        assert!(!app.world().get::<Interactable>(object).unwrap().in_range());
    }

    #[test]
    fn carried_object_keeps_its_original_scale() {
        let mut app = carry_app();
        app.world_mut().spawn((Actor, Transform::default()));
        let object = spawn_crate(&mut app, Vec3::new(1.0, 0.0, 0.0));

        app.update();
        press(&mut app, true);
        app.update();
        assert!(app.world().get::<Carryable>(object).unwrap().is_carried());

        press(&mut app, false);
        app.world_mut().get_mut::<Transform>(object).unwrap().scale = Vec3::ONE;
        advance(&mut app, 0.05);
        app.update();

        assert_eq!(
            app.world().get::<Transform>(object).unwrap().scale,
            Vec3::splat(0.8)
        );
    }

    #[test]
    fn out_of_reach_objects_are_not_picked_up() {
        let mut app = carry_app();
        app.world_mut().spawn((Actor, Transform::default()));
        let object = spawn_crate(&mut app, Vec3::new(1.8, 0.0, 0.0));

        app.update();
        press(&mut app, true);
        app.update();

        assert!(!app.world().get::<Carryable>(object).unwrap().is_carried());
    }
}
