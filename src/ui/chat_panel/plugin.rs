// src/ui/chat_panel/plugin.rs
//
// ChatPanelPlugin spawns the chat panel and keeps it in sync with the chat bridge.

use bevy::prelude::*;

use crate::core::GameplaySet;

use super::components::ChatPanelSettings;
use super::systems::{spawn_chat_panel, update_chat_input_label, update_chat_response_label};

pub struct ChatPanelPlugin;

impl Plugin for ChatPanelPlugin {
    fn build(&self, app: &mut App) {
        app.insert_resource(ChatPanelSettings::default())
            .add_systems(Startup, spawn_chat_panel)
            .add_systems(
                Update,
                (update_chat_input_label, update_chat_response_label)
                    .in_set(GameplaySet::Present),
            );
    }
}
