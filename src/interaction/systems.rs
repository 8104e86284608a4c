//! Systems driving proximity, activation, highlight feedback, and collection.
use bevy::{
    log::{debug, info},
    prelude::*,
};

use crate::{
    actor::{components::Actor, systems::ActorLocator},
    core::{entity_label, input::ActionInput, prompt::PromptService},
};

use super::components::{
    Collectible, Highlight, Interactable, InteractionActivated, ProximityEdge, Score,
};

/// Recomputes each interactable's range flag and shows/hides its prompt on range edges.
pub fn detect_proximity(
    actor: ActorLocator,
    mut prompt: ResMut<PromptService>,
    mut interactables: Query<(&Transform, &mut Interactable), Without<Actor>>,
) {
    let actor_position = actor.planar_position();

    for (transform, mut interactable) in interactables.iter_mut() {
        if interactable.is_suspended() {
            continue;
        }

        let distance =
            actor_position.map(|position| position.distance(transform.translation.truncate()));
        match interactable.update_range(distance) {
            Some(ProximityEdge::Entered) => prompt.show(&interactable.prompt),
            Some(ProximityEdge::Exited) => prompt.hide(),
            None => {}
        }
    }
}

/// Emits one activation per press for every in-range interactable.
pub fn activate_interactables(
    input: Res<ActionInput>,
    interactables: Query<(Entity, &Interactable)>,
    mut activations: MessageWriter<InteractionActivated>,
) {
    if !input.activate_pressed {
        return;
    }

    for (entity, interactable) in interactables.iter() {
        if interactable.in_range() && !interactable.is_suspended() {
            activations.write(InteractionActivated { entity });
        }
    }
}

/// Default activation hook: records the interaction.
pub fn log_interactions(
    mut activations: MessageReader<InteractionActivated>,
    names: Query<&Name>,
) {
    for activation in activations.read() {
        let label = entity_label(activation.entity, names.get(activation.entity).ok());
        info!(target: "interaction", "Actor interacted with {}", label);
    }
}

/// Adds collectible points to the score and removes collected items.
pub fn collect_items(
    mut commands: Commands,
    mut activations: MessageReader<InteractionActivated>,
    mut score: ResMut<Score>,
    mut prompt: ResMut<PromptService>,
    items: Query<(&Collectible, Option<&Name>)>,
) {
    for activation in activations.read() {
        let Ok((collectible, name)) = items.get(activation.entity) else {
            continue;
        };

        let total = score.add(collectible.score_value);
        info!(
            target: "interaction",
            "Actor collected {} worth {} points (total {})",
            entity_label(activation.entity, name),
            collectible.score_value,
            total
        );

        if collectible.despawn_on_collect {
            prompt.hide();
            commands.entity(activation.entity).despawn();
        }
    }
}

/// Swaps material colour between highlight and original according to range state.
pub fn apply_highlights(
    mut materials: ResMut<Assets<StandardMaterial>>,
    interactables: Query<
        (&Interactable, &Highlight, &MeshMaterial3d<StandardMaterial>),
        Changed<Interactable>,
    >,
) {
    for (interactable, highlight, material) in interactables.iter() {
        let Some(material) = materials.get_mut(&material.0) else {
            debug!(target: "interaction", "Highlight material missing");
            continue;
        };
        let tint = interactable.tint(highlight.original);
        if material.base_color != tint {
            material.base_color = tint;
        }
    }
}
