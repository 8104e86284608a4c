// src/ui/hud/components.rs
//
// Markers and layout settings for HUD elements.

use bevy::prelude::*;

/// Text node mirroring the prompt surface.
#[derive(Component, Debug, Default)]
pub struct PromptLabel;

/// Text node showing the collected score.
#[derive(Component, Debug, Default)]
pub struct ScoreLabel;

/// Layout of the HUD.
#[derive(Resource, Debug)]
pub struct HudSettings {
    /// Offset of the prompt line from the bottom edge (pixels).
    pub prompt_bottom_offset: f32,

    /// Font size for the prompt line (points).
    pub prompt_font_size: f32,

    /// Font size for the score counter (points).
    pub score_font_size: f32,

    /// Inset of the score counter from the top-left corner (pixels).
    pub corner_offset: f32,
}

impl Default for HudSettings {
    fn default() -> Self {
        Self {
            prompt_bottom_offset: 120.0,
            prompt_font_size: 22.0,
            score_font_size: 18.0,
            corner_offset: 16.0,
        }
    }
}
