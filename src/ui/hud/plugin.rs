// src/ui/hud/plugin.rs
//
// HudPlugin spawns the HUD and registers its update systems.

use bevy::prelude::*;

use crate::core::GameplaySet;

use super::components::HudSettings;
use super::systems::{spawn_hud, update_prompt_label, update_score_label};

pub struct HudPlugin;

impl Plugin for HudPlugin {
    fn build(&self, app: &mut App) {
        app.insert_resource(HudSettings::default())
            .add_systems(Startup, spawn_hud)
            .add_systems(
                Update,
                (update_prompt_label, update_score_label).in_set(GameplaySet::Present),
            );
    }
}
