// src/ui/chat_panel/systems.rs
//
// Systems spawning the chat panel and mirroring chat state into it.

use bevy::prelude::*;

use crate::chat::components::{ChatInput, ChatResponseText};

use super::components::{ChatInputLabel, ChatPanel, ChatPanelSettings, ChatResponseLabel};

const BACKGROUND_COLOR: Color = Color::srgba(0.1, 0.1, 0.1, 0.9);
const BORDER_COLOR: Color = Color::srgb(0.3, 0.3, 0.3);
const FOCUSED_BORDER_COLOR: Color = Color::srgb(1.0, 0.9, 0.4);
const TEXT_COLOR: Color = Color::WHITE;
const HINT_COLOR: Color = Color::srgb(0.6, 0.6, 0.6);
const HINT_TEXT: &str = "Tab: chat  |  Enter: send  |  Esc: leave";
const INPUT_PREFIX: &str = "> ";
const CURSOR: char = '_';

/// Input line as displayed; the cursor only shows while the line has focus.
pub fn input_line(chat: &ChatInput) -> String {
    let mut line = format!("{INPUT_PREFIX}{}", chat.buffer);
    if chat.focused {
        line.push(CURSOR);
    }
    line
}

/// Spawns the chat panel at the bottom-right corner.
pub fn spawn_chat_panel(mut commands: Commands, settings: Res<ChatPanelSettings>) {
    commands
        .spawn((
            Node {
                position_type: PositionType::Absolute,
                bottom: Val::Px(settings.bottom_offset),
                right: Val::Px(settings.right_offset),
                width: Val::Px(settings.panel_width),
                padding: UiRect::all(Val::Px(settings.padding)),
                border: UiRect::all(Val::Px(settings.border_width)),
                flex_direction: FlexDirection::Column,
                row_gap: Val::Px(6.0),
                ..default()
            },
            BackgroundColor(BACKGROUND_COLOR),
            BorderColor::from(BORDER_COLOR),
            ChatPanel,
        ))
        .with_children(|parent| {
            parent.spawn((
                Text::new(HINT_TEXT),
                TextFont {
                    font_size: settings.input_font_size * 0.8,
                    ..default()
                },
                TextColor(HINT_COLOR),
            ));

            parent.spawn((
                Text::new(""),
                TextFont {
                    font_size: settings.text_font_size,
                    ..default()
                },
                TextColor(TEXT_COLOR),
                Node {
                    max_width: Val::Px(settings.panel_width - settings.padding * 2.0),
                    ..default()
                },
                ChatResponseLabel,
            ));

            parent.spawn((
                Text::new(INPUT_PREFIX),
                TextFont {
                    font_size: settings.input_font_size,
                    ..default()
                },
                TextColor(TEXT_COLOR),
                ChatInputLabel,
            ));
        });
}

/// Mirrors the typed line and focus state.
pub fn update_chat_input_label(
    chat: Res<ChatInput>,
    mut labels: Query<&mut Text, With<ChatInputLabel>>,
    mut panels: Query<&mut BorderColor, With<ChatPanel>>,
) {
    if !chat.is_changed() {
        return;
    }

    let line = input_line(&chat);
    for mut text in labels.iter_mut() {
        text.0.clone_from(&line);
    }

    let border = if chat.focused {
        FOCUSED_BORDER_COLOR
    } else {
        BORDER_COLOR
    };
    for mut color in panels.iter_mut() {
        *color = BorderColor::from(border);
    }
}

/// Mirrors the latest reply.
pub fn update_chat_response_label(
    response: Res<ChatResponseText>,
    mut labels: Query<&mut Text, With<ChatResponseLabel>>,
) {
    if !response.is_changed() {
        return;
    }
    for mut text in labels.iter_mut() {
        text.0.clone_from(&response.text);
    }
}
