//! Occupant tracking, readout rendering, and gate updates.
use bevy::{
    ecs::system::SystemParam,
    log::{debug, info},
    prelude::*,
};

use crate::{carry::components::Carryable, core::entity_label, physics::components::Collider};

use super::components::{WeightDisplay, WeightGate, WeightPlatform, WeightScale};

/// Read access to platform readouts for any system that needs the current weight.
#[derive(SystemParam)]
pub struct WeightQuery<'w, 's> {
    scales: Query<'w, 's, (&'static WeightPlatform, &'static WeightScale)>,
    names: Query<'w, 's, &'static Name>,
}

impl WeightQuery<'_, '_> {
    /// Identity string of whatever occupies the platform, if anything.
    pub fn occupant_identity(&self, scale: Entity) -> Option<&str> {
        let (platform, _) = self.scales.get(scale).ok()?;
        let occupant = platform.occupant()?;
        self.names.get(occupant).ok().map(Name::as_str)
    }

    /// Current weight on `scale`, or `None` if the entity is not a scale.
    pub fn current_weight(&self, scale: Entity) -> Option<u32> {
        let (_, readout) = self.scales.get(scale).ok()?;
        Some(readout.current_weight(self.occupant_identity(scale)))
    }

    pub fn readout(&self, scale: Entity) -> Option<String> {
        let (_, readout) = self.scales.get(scale).ok()?;
        Some(readout.readout(self.occupant_identity(scale)))
    }
}

/// Picks the nearest idle carryable within each platform's radius.
pub fn track_platform_occupants(
    mut platforms: Query<(Entity, &Transform, &mut WeightPlatform)>,
    carryables: Query<(Entity, &Transform, &Carryable, Option<&Name>)>,
) {
    for (platform_entity, platform_transform, mut platform) in platforms.iter_mut() {
        let center = platform_transform.translation.truncate();
        let nearest = carryables
            .iter()
            .filter(|(_, _, carryable, _)| !carryable.is_carried())
            .map(|(entity, transform, _, name)| {
                (entity, name, center.distance(transform.translation.truncate()))
            })
            .filter(|(_, _, distance)| *distance <= platform.radius)
            .min_by(|a, b| a.2.total_cmp(&b.2));

        let occupant = nearest.map(|(entity, _, _)| entity);
        if platform.occupant() != occupant {
            platform.set_occupant(occupant);
            match nearest {
                Some((entity, name, _)) => debug!(
                    target: "scale",
                    "Platform {} now holds {}",
                    platform_entity,
                    entity_label(entity, name)
                ),
                None => debug!(target: "scale", "Platform {} is empty", platform_entity),
            }
        }
    }
}

/// Writes each scale's readout into its display text.
pub fn update_weight_displays(
    weights: WeightQuery,
    mut displays: Query<(&WeightDisplay, &mut Text)>,
) {
    for (display, mut text) in displays.iter_mut() {
        let Some(readout) = weights.readout(display.scale) else {
            continue;
        };
        if text.0 != readout {
            text.0 = readout;
        }
    }
}

/// Opens gates whose platform carries enough weight; an open gate neither blocks nor renders.
pub fn update_weight_gates(
    weights: WeightQuery,
    mut gates: Query<(Entity, &mut WeightGate, &mut Collider, &mut Visibility)>,
) {
    for (entity, mut gate, mut collider, mut visibility) in gates.iter_mut() {
        let weight = weights.current_weight(gate.platform).unwrap_or_default();
        let Some(open) = gate.update(weight) else {
            continue;
        };

        collider.set_pass_through(open);
        *visibility = if open {
            Visibility::Hidden
        } else {
            Visibility::Inherited
        };
        info!(
            target: "scale",
            "Gate {} {} at weight {} (needs {})",
            entity,
            if open { "opened" } else { "closed" },
            weight,
            gate.required_weight
        );
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::{
        core::settings::CarrySettings,
        physics::components::CollisionLayers,
    };

    fn scale_app() -> App {
        let mut app = App::new();
        app.add_systems(
            Update,
            (
                track_platform_occupants,
                update_weight_displays,
                update_weight_gates,
            )
                .chain(),
        );
        app
    }

    fn spawn_crate(app: &mut App, name: &str, x: f32) -> Entity {
        app.world_mut()
            .spawn((
                Name::new(name.to_string()),
                Transform::from_xyz(x, 0.0, 0.0),
                Carryable::new(&CarrySettings::default()),
            ))
            .id()
    }

    fn display_text(app: &App, display: Entity) -> String {
        app.world().get::<Text>(display).unwrap().0.clone()
    }

    #[test]
    fn readout_follows_the_occupant() {
        let mut app = scale_app();
        let platform = app
            .world_mut()
            .spawn((
                Transform::default(),
                WeightPlatform::new(1.0),
                WeightScale::default(),
            ))
            .id();
        let display = app
            .world_mut()
            .spawn((WeightDisplay { scale: platform }, Text::new("")))
            .id();

        app.update();
        assert_eq!(display_text(&app, display), "0");

        let heavy = spawn_crate(&mut app, "Weight5", 0.3);
        spawn_crate(&mut app, "Weight3", 0.9);
        app.update();
        assert_eq!(display_text(&app, display), "5");

        app.world_mut()
            .get_mut::<Carryable>(heavy)
            .unwrap()
            .pick_up();
        app.update();
        assert_eq!(display_text(&app, display), "3");
    }

    #[test]
    fn unnamed_weights_read_as_default() {
        let mut app = scale_app();
        let platform = app
            .world_mut()
            .spawn((
                Transform::default(),
                WeightPlatform::new(1.0),
                WeightScale::default(),
            ))
            .id();
        let display = app
            .world_mut()
            .spawn((WeightDisplay { scale: platform }, Text::new("")))
            .id();
        spawn_crate(&mut app, "Box", 0.0);

        app.update();
        assert_eq!(display_text(&app, display), "0");
    }

    #[test]
    fn gate_opens_at_required_weight() {
        let mut app = scale_app();
        let platform = app
            .world_mut()
            .spawn((
                Transform::default(),
                WeightPlatform::new(1.0),
                WeightScale::default(),
            ))
            .id();
        let gate = app
            .world_mut()
            .spawn((
                WeightGate::new(platform, 5),
                Collider::new(Vec2::new(1.0, 0.2), CollisionLayers::WALL),
                Visibility::Inherited,
            ))
            .id();

        spawn_crate(&mut app, "Weight3", 0.0);
        app.update();
        assert!(app.world().get::<Collider>(gate).unwrap().is_blocking());

        spawn_crate(&mut app, "Weight5", 0.1);
        app.update();
        // The nearer crate wins, so move the light one away.
        let world = app.world_mut();
        let light = world
            .query::<(Entity, &Name)>()
            .iter(world)
            .find(|(_, name)| name.as_str() == "Weight3")
            .map(|(entity, _)| entity)
            .unwrap();
        world.get_mut::<Transform>(light).unwrap().translation.x = 5.0;
        app.update();

        assert!(!app.world().get::<Collider>(gate).unwrap().is_blocking());
        assert_eq!(
            app.world().get::<Visibility>(gate),
            Some(&Visibility::Hidden)
        );
    }
}
