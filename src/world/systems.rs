//! Systems for the world module.
use bevy::{math::primitives::Plane3d, prelude::*};

use crate::{
    actor::components::Actor,
    camera::components::CameraFollow,
    carry::components::Carryable,
    core::settings::{CameraSettings, CarrySettings, InteractionSettings},
    interaction::components::{Collectible, Highlight, Interactable},
    physics::components::{Body, Collider, CollisionLayers},
    scale::components::{WeightDisplay, WeightGate, WeightPlatform, WeightScale},
    transition::components::{
        SceneMember, SceneTransitionZone, SpawnPoint, DEFAULT_SPAWN_POINT,
    },
};

use super::components::{AreaLayout, PrimarySun, Wall};

pub const ENV1: AreaLayout = AreaLayout::new("env1", Vec2::ZERO, Vec2::new(10.0, 7.0));
pub const ENV2: AreaLayout = AreaLayout::new("env2", Vec2::new(40.0, 0.0), Vec2::new(8.0, 6.0));

const WALL_THICKNESS: f32 = 0.2;
const WALL_HEIGHT: f32 = 1.0;
const CRATE_HALF: f32 = 0.4;
const CRATE_DAMPING: f32 = 8.0;
const ACTOR_HALF: f32 = 0.3;
const PLATFORM_RADIUS: f32 = 0.8;
const GATE_WEIGHT: u32 = 5;
const COIN_VALUE: u32 = 10;

const FLOOR_COLOR: Color = Color::srgb(0.35, 0.37, 0.4);
const ALT_FLOOR_COLOR: Color = Color::srgb(0.3, 0.4, 0.32);
const WALL_COLOR: Color = Color::srgb(0.55, 0.5, 0.45);
const GATE_COLOR: Color = Color::srgb(0.7, 0.25, 0.2);
const CRATE_COLOR: Color = Color::srgb(0.6, 0.42, 0.22);
const PLATFORM_COLOR: Color = Color::srgb(0.4, 0.45, 0.6);
const COIN_COLOR: Color = Color::srgb(0.95, 0.8, 0.2);
const ACTOR_COLOR: Color = Color::srgb(0.2, 0.5, 0.9);
const ZONE_COLOR: Color = Color::srgba(0.3, 0.6, 1.0, 0.35);

/// Mesh and material handles shared by the level builders.
struct LevelAssets<'a> {
    meshes: &'a mut Assets<Mesh>,
    materials: &'a mut Assets<StandardMaterial>,
}

impl LevelAssets<'_> {
    fn cuboid(&mut self, half: Vec3) -> Mesh3d {
        Mesh3d(self.meshes.add(Cuboid::from_size(half * 2.0)))
    }

    fn material(&mut self, color: Color) -> MeshMaterial3d<StandardMaterial> {
        MeshMaterial3d(self.materials.add(StandardMaterial {
            base_color: color,
            perceptual_roughness: 0.9,
            alpha_mode: if color.alpha() < 1.0 {
                AlphaMode::Blend
            } else {
                AlphaMode::Opaque
            },
            ..default()
        }))
    }
}

/// Spawns both areas, the actor, the follow camera, and light.
pub fn spawn_level(
    mut commands: Commands,
    mut meshes: ResMut<Assets<Mesh>>,
    mut materials: ResMut<Assets<StandardMaterial>>,
    carry: Res<CarrySettings>,
    interaction: Res<InteractionSettings>,
    camera: Res<CameraSettings>,
) {
    let mut assets = LevelAssets {
        meshes: &mut *meshes,
        materials: &mut *materials,
    };

    spawn_area_shell(&mut commands, &mut assets, ENV1, FLOOR_COLOR);
    spawn_area_shell(&mut commands, &mut assets, ENV2, ALT_FLOOR_COLOR);

    let actor_start = ENV1.at(Vec2::new(0.0, -3.0));
    spawn_point(&mut commands, ENV1, DEFAULT_SPAWN_POINT, actor_start);
    spawn_point(&mut commands, ENV1, "SpawnPoint_env1", ENV1.at(Vec2::new(8.5, 1.0)));
    spawn_point(&mut commands, ENV2, "SpawnPoint_env2", ENV2.at(Vec2::new(0.0, -3.0)));

    for (name, local) in [
        ("Weight3", Vec2::new(-3.0, 1.0)),
        ("Weight5", Vec2::new(3.0, 1.0)),
        ("Box", Vec2::new(-5.0, -3.0)),
    ] {
        spawn_crate(&mut commands, &mut assets, &carry, &interaction, name, ENV1.at(local));
    }

    let platform = spawn_platform(&mut commands, &mut assets, ENV1.at(Vec2::new(0.0, 4.0)));
    spawn_weight_display(&mut commands, platform);

    // Pocket in the top-right corner, closed off by the gate.
    spawn_wall(
        &mut commands,
        &mut assets,
        ENV1,
        ENV1.at(Vec2::new(8.5, 3.0)),
        Vec2::new(1.5, WALL_THICKNESS),
    );
    let gate_half = Vec3::new(WALL_THICKNESS, 2.0, WALL_HEIGHT / 2.0);
    commands.spawn((
        Name::new("Gate"),
        assets.cuboid(gate_half),
        assets.material(GATE_COLOR),
        Transform::from_translation(ENV1.at(Vec2::new(7.0, 5.0)).extend(gate_half.z)),
        Collider::new(gate_half.truncate(), CollisionLayers::WALL),
        WeightGate::new(platform, GATE_WEIGHT),
        SceneMember::new(ENV1.name),
    ));
    spawn_zone(
        &mut commands,
        &mut assets,
        ENV1,
        SceneTransitionZone::new(ENV2.name, ENV2.name, Vec2::ONE),
        ENV1.at(Vec2::new(8.5, 5.0)),
    );

    spawn_collectible(&mut commands, &mut assets, &interaction, ENV1, ENV1.at(Vec2::new(-7.0, 4.0)));
    spawn_collectible(&mut commands, &mut assets, &interaction, ENV2, ENV2.at(Vec2::new(5.0, 3.0)));
    spawn_zone(
        &mut commands,
        &mut assets,
        ENV2,
        SceneTransitionZone::new(ENV1.name, ENV1.name, Vec2::ONE).immediate(),
        ENV2.at(Vec2::new(0.0, 4.5)),
    );

    let actor_half = Vec3::splat(ACTOR_HALF);
    commands.spawn((
        Name::new("Player"),
        Actor,
        assets.cuboid(actor_half),
        assets.material(ACTOR_COLOR),
        Transform::from_translation(actor_start.extend(actor_half.z)),
        Body::dynamic(0.0),
        Collider::new(actor_half.truncate(), CollisionLayers::ACTOR),
    ));

    commands.spawn((
        DirectionalLight {
            illuminance: 12_000.0,
            shadows_enabled: true,
            ..default()
        },
        Transform::from_xyz(4.0, -8.0, 16.0).looking_at(Vec3::ZERO, Vec3::Z),
        PrimarySun,
    ));

    let follow = CameraFollow::from_settings(&camera);
    commands.spawn((
        Camera3d::default(),
        Transform::from_translation(actor_start.extend(0.0) + follow.offset)
            .with_rotation(follow.rotation),
        follow,
    ));

    info!(
        "Level spawned: areas {} and {}, actor at {:?}",
        ENV1.name, ENV2.name, actor_start
    );
}

fn spawn_area_shell(
    commands: &mut Commands,
    assets: &mut LevelAssets,
    area: AreaLayout,
    floor_color: Color,
) {
    commands.spawn((
        Name::new(format!("{} floor", area.name)),
        Mesh3d(
            assets
                .meshes
                .add(Plane3d::new(Vec3::Z, area.half_extents)),
        ),
        assets.material(floor_color),
        Transform::from_translation(area.origin.extend(0.0)),
        SceneMember::new(area.name),
    ));

    let half = area.half_extents;
    let sides = [
        (Vec2::new(0.0, half.y), Vec2::new(half.x, WALL_THICKNESS)),
        (Vec2::new(0.0, -half.y), Vec2::new(half.x, WALL_THICKNESS)),
        (Vec2::new(half.x, 0.0), Vec2::new(WALL_THICKNESS, half.y)),
        (Vec2::new(-half.x, 0.0), Vec2::new(WALL_THICKNESS, half.y)),
    ];
    for (offset, wall_half) in sides {
        spawn_wall(commands, assets, area, area.at(offset), wall_half);
    }
}

fn spawn_wall(
    commands: &mut Commands,
    assets: &mut LevelAssets,
    area: AreaLayout,
    center: Vec2,
    half: Vec2,
) {
    let half = half.extend(WALL_HEIGHT / 2.0);
    commands.spawn((
        Wall,
        assets.cuboid(half),
        assets.material(WALL_COLOR),
        Transform::from_translation(center.extend(half.z)),
        Collider::new(half.truncate(), CollisionLayers::WALL),
        SceneMember::new(area.name),
    ));
}

fn spawn_point(commands: &mut Commands, area: AreaLayout, name: &str, at: Vec2) {
    commands.spawn((
        Name::new(name.to_string()),
        SpawnPoint::new(name),
        Transform::from_translation(at.extend(0.0)),
        SceneMember::new(area.name),
    ));
}

fn spawn_crate(
    commands: &mut Commands,
    assets: &mut LevelAssets,
    carry: &CarrySettings,
    interaction: &InteractionSettings,
    name: &str,
    at: Vec2,
) {
    let half = Vec3::splat(CRATE_HALF);
    commands.spawn((
        Name::new(name.to_string()),
        assets.cuboid(half),
        assets.material(CRATE_COLOR),
        Transform::from_translation(at.extend(half.z)),
        Carryable::new(carry),
        Interactable::from_settings(interaction).with_prompt(carry.pickup_prompt.clone()),
        Highlight::new(CRATE_COLOR),
        Body::dynamic(CRATE_DAMPING),
        Collider::new(half.truncate(), CollisionLayers::PROP),
        SceneMember::new(ENV1.name),
    ));
}

fn spawn_platform(commands: &mut Commands, assets: &mut LevelAssets, at: Vec2) -> Entity {
    let half = Vec3::new(PLATFORM_RADIUS, PLATFORM_RADIUS, 0.02);
    commands
        .spawn((
            Name::new("Scale"),
            assets.cuboid(half),
            assets.material(PLATFORM_COLOR),
            Transform::from_translation(at.extend(half.z)),
            WeightPlatform::new(PLATFORM_RADIUS),
            WeightScale::default(),
            SceneMember::new(ENV1.name),
        ))
        .id()
}

fn spawn_weight_display(commands: &mut Commands, platform: Entity) {
    commands
        .spawn((
            Node {
                position_type: PositionType::Absolute,
                top: Val::Px(16.0),
                right: Val::Px(16.0),
                column_gap: Val::Px(8.0),
                ..default()
            },
            SceneMember::new(ENV1.name),
            Visibility::default(),
        ))
        .with_children(|row| {
            row.spawn((Text::new("Weight:"), TextColor(Color::WHITE)));
            row.spawn((
                Text::new(WeightScale::default().readout(None)),
                TextColor(COIN_COLOR),
                WeightDisplay { scale: platform },
            ));
        });
}

fn spawn_collectible(
    commands: &mut Commands,
    assets: &mut LevelAssets,
    interaction: &InteractionSettings,
    area: AreaLayout,
    at: Vec2,
) {
    let half = Vec3::new(0.25, 0.25, 0.05);
    commands.spawn((
        Name::new(format!("Coin ({})", area.name)),
        assets.cuboid(half),
        assets.material(COIN_COLOR),
        Transform::from_translation(at.extend(0.3)),
        Interactable::from_settings(interaction).with_prompt("Press E to collect"),
        Highlight::new(COIN_COLOR),
        Collectible::new(COIN_VALUE),
        SceneMember::new(area.name),
    ));
}

fn spawn_zone(
    commands: &mut Commands,
    assets: &mut LevelAssets,
    area: AreaLayout,
    zone: SceneTransitionZone,
    at: Vec2,
) {
    let half = zone.half_extents.extend(0.01);
    commands.spawn((
        Name::new(format!("To {}", zone.target_scene)),
        assets.cuboid(half),
        assets.material(ZONE_COLOR),
        Transform::from_translation(at.extend(half.z)),
        zone,
        SceneMember::new(area.name),
    ));
}

#[cfg(test)]
mod tests {
    use super::*;

    fn level_app() -> App {
        let mut app = App::new();
        app.init_resource::<Assets<Mesh>>()
            .init_resource::<Assets<StandardMaterial>>()
            .init_resource::<CarrySettings>()
            .init_resource::<InteractionSettings>()
            .init_resource::<CameraSettings>()
            .add_systems(Startup, spawn_level);
        app.update();
        app
    }

    #[test]
    fn level_has_one_actor_and_named_crates() {
        let mut app = level_app();
        let world = app.world_mut();

        assert_eq!(world.query::<&Actor>().iter(world).count(), 1);
        let mut crates: Vec<String> = world
            .query_filtered::<&Name, With<Carryable>>()
            .iter(world)
            .map(|name| name.as_str().to_string())
            .collect();
        crates.sort();
        assert_eq!(crates, vec!["Box", "Weight3", "Weight5"]);
    }

    #[test]
    fn every_zone_has_a_matching_spawn_point() {
        let mut app = level_app();
        let world = app.world_mut();

        let spawn_points: Vec<String> = world
            .query::<&SpawnPoint>()
            .iter(world)
            .map(|spawn| spawn.name.clone())
            .collect();
        let zones: Vec<SceneTransitionZone> = world
            .query::<&SceneTransitionZone>()
            .iter(world)
            .cloned()
            .collect();

        assert_eq!(zones.len(), 2);
        for zone in zones {
            let request = zone.request().expect("zone has a target scene");
            assert!(
                spawn_points.contains(&request.spawn_point),
                "missing {}",
                request.spawn_point
            );
        }
    }
}
