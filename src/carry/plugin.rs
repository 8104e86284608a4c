//! Carry plugin wiring placement capture, the carry protocol, and resets.
use bevy::prelude::*;

use crate::{
    core::GameplaySet,
    interaction::systems::{activate_interactables, detect_proximity},
    physics::systems::integrate_bodies,
};

use super::{
    components::ResetCarryable,
    systems::{capture_original_placement, follow_carrier, handle_carry_resets, run_carry_protocol},
};

pub struct CarryPlugin;

impl Plugin for CarryPlugin {
    fn build(&self, app: &mut App) {
        app.add_message::<ResetCarryable>()
            .add_systems(
                Update,
                capture_original_placement
                    .before(detect_proximity)
                    .in_set(GameplaySet::Sense),
            )
            .add_systems(
                Update,
                (run_carry_protocol, follow_carrier, handle_carry_resets)
                    .chain()
                    .after(activate_interactables)
                    .after(integrate_bodies)
                    .in_set(GameplaySet::Act),
            );

        #[cfg(feature = "core_debug")]
        {
            app.add_systems(
                Update,
                super::systems::reset_all_on_hotkey.in_set(GameplaySet::Input),
            );
        }
    }
}
