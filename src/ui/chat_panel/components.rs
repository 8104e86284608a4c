// src/ui/chat_panel/components.rs
//
// Markers and settings for the chat panel.

use bevy::prelude::*;

/// Root node of the chat panel.
#[derive(Component, Debug, Default)]
pub struct ChatPanel;

/// Text node showing the line being typed.
#[derive(Component, Debug, Default)]
pub struct ChatInputLabel;

/// Text node showing the latest reply.
#[derive(Component, Debug, Default)]
pub struct ChatResponseLabel;

/// Resource containing layout settings for the chat panel.
#[derive(Resource, Debug)]
pub struct ChatPanelSettings {
    /// Panel width (pixels).
    pub panel_width: f32,

    /// Padding inside panel (pixels).
    pub padding: f32,

    /// Border width (pixels).
    pub border_width: f32,

    /// Offset from bottom edge of screen (pixels).
    pub bottom_offset: f32,

    /// Offset from right edge of screen (pixels).
    pub right_offset: f32,

    /// Font size for the hint and input line (points).
    pub input_font_size: f32,

    /// Font size for the reply (points).
    pub text_font_size: f32,
}

impl Default for ChatPanelSettings {
    fn default() -> Self {
        Self {
            panel_width: 380.0,
            padding: 12.0,
            border_width: 2.0,
            bottom_offset: 20.0,
            right_offset: 20.0,
            input_font_size: 16.0,
            text_font_size: 16.0,
        }
    }
}
