//! Scale plugin wiring occupant tracking, readouts, and gates.
use bevy::prelude::*;

use crate::{carry::systems::run_carry_protocol, core::GameplaySet};

use super::systems::{track_platform_occupants, update_weight_displays, update_weight_gates};

pub struct ScalePlugin;

impl Plugin for ScalePlugin {
    fn build(&self, app: &mut App) {
        app.add_systems(
            Update,
            (track_platform_occupants, update_weight_gates)
                .chain()
                .after(run_carry_protocol)
                .in_set(GameplaySet::Act),
        )
        .add_systems(
            Update,
            update_weight_displays.in_set(GameplaySet::Present),
        );
    }
}
