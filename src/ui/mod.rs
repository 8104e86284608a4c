// src/ui/mod.rs
//
// UI module providing screen-space elements: the HUD (prompt line, score,
// fade overlay) and the chat panel.

pub mod chat_panel;
pub mod hud;

use bevy::prelude::*;

/// Registers every screen-space UI plugin.
pub struct UiPlugin;

impl Plugin for UiPlugin {
    fn build(&self, app: &mut App) {
        info!("UiPlugin registered");
        app.add_plugins((hud::HudPlugin, chat_panel::ChatPanelPlugin));
    }
}
