//! Zone detection, fade progression, spawn placement, and scene visibility.
use bevy::{
    log::{debug, error, info, warn},
    prelude::*,
};

use crate::{
    actor::{components::Actor, systems::ActorLocator},
    core::{input::ActionInput, prompt::PromptService, SimulationClock},
    physics::components::Body,
    scale::components::WeightGate,
};

use super::{
    components::{FadeOverlay, SceneMember, SceneTransitionZone, SpawnPoint, ZoneEdge},
    services::{ActiveScene, SceneFade, SceneServices},
};

/// Tracks the actor entering and leaving transition zones and issues scene requests.
pub fn detect_zone_presence(
    mut commands: Commands,
    actor: ActorLocator,
    input: Res<ActionInput>,
    mut prompt: ResMut<PromptService>,
    mut services: ResMut<SceneServices>,
    mut zones: Query<(&Transform, &mut SceneTransitionZone, Option<&Visibility>), Without<Actor>>,
) {
    let actor_position = actor.planar_position();

    for (transform, mut zone, visibility) in zones.iter_mut() {
        let active = !matches!(visibility, Some(Visibility::Hidden));
        let inside = active
            && actor_position
                .is_some_and(|position| zone.contains(transform.translation.truncate(), position));

        let fire = match zone.update_presence(inside) {
            Some(ZoneEdge::Entered) => {
                debug!(target: "transition", "Actor entered zone to {}", zone.target_scene);
                if zone.requires_interaction {
                    prompt.show(&zone.prompt);
                    input.activate_pressed
                } else {
                    true
                }
            }
            Some(ZoneEdge::Exited) => {
                prompt.hide();
                false
            }
            None => inside && zone.requires_interaction && input.activate_pressed,
        };

        if !fire {
            continue;
        }

        match zone.request() {
            Ok(request) => {
                if zone.requires_interaction {
                    prompt.hide();
                }
                services.request(&mut commands, &request);
            }
            Err(err) => error!(target: "transition", "Scene transition aborted: {}", err),
        }
    }
}

/// Advances the fade; at full black the scene switch goes through the direct-load services.
pub fn advance_scene_fade(
    mut commands: Commands,
    clock: Res<SimulationClock>,
    mut fade: ResMut<SceneFade>,
    mut services: ResMut<SceneServices>,
) {
    if !fade.is_active() {
        return;
    }
    if let Some(request) = fade.advance(clock.delta_secs()) {
        services.load_directly(&mut commands, &request);
    }
}

/// Mirrors the fade progress onto the overlay colour.
pub fn update_fade_overlay(
    fade: Res<SceneFade>,
    mut overlays: Query<&mut BackgroundColor, With<FadeOverlay>>,
) {
    if !fade.is_changed() {
        return;
    }
    let alpha = fade.alpha();
    for mut background in overlays.iter_mut() {
        background.0 = Color::BLACK.with_alpha(alpha);
    }
}

/// Moves the actor onto the requested spawn point after every scene load.
pub fn place_actor_at_spawn_point(
    active: Res<ActiveScene>,
    spawn_points: Query<(&SpawnPoint, &Transform, Option<&SceneMember>), Without<Actor>>,
    mut actors: Query<(&mut Transform, Option<&mut Body>), With<Actor>>,
) {
    if !active.is_changed() {
        return;
    }

    let target = spawn_points.iter().find(|(spawn, _, member)| {
        spawn.name == active.spawn_point
            && member.is_none_or(|member| member.scene == active.name)
    });
    let Some((_, spawn_transform, _)) = target else {
        if active.generation > 0 {
            warn!(
                target: "transition",
                "Spawn point {} not found in {}",
                active.spawn_point,
                active.name
            );
        }
        return;
    };

    for (mut transform, body) in actors.iter_mut() {
        transform.translation = spawn_transform
            .translation
            .truncate()
            .extend(transform.translation.z);
        if let Some(mut body) = body {
            body.velocity = Vec2::ZERO;
        }
    }
    info!(
        target: "transition",
        "Actor placed at {} in {}",
        active.spawn_point,
        active.name
    );
}

/// Shows members of the active scene and hides the rest. Open gates stay hidden.
pub fn apply_scene_visibility(
    active: Res<ActiveScene>,
    mut members: Query<(Ref<SceneMember>, Option<&WeightGate>, &mut Visibility)>,
) {
    let scene_changed = active.is_changed();
    for (member, gate, mut visibility) in members.iter_mut() {
        if !scene_changed && !member.is_added() {
            continue;
        }
        let open_gate = gate.is_some_and(WeightGate::is_open);
        let wanted = if member.scene == active.name && !open_gate {
            Visibility::Inherited
        } else {
            Visibility::Hidden
        };
        if *visibility != wanted {
            *visibility = wanted;
        }
    }
}
