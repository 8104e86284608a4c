// src/ui/hud/systems.rs
//
// Systems spawning the HUD and keeping it in sync with prompt, score, and fade state.

use bevy::prelude::*;

use crate::{
    core::prompt::PromptService,
    interaction::components::Score,
    transition::components::FadeOverlay,
};

use super::components::{HudSettings, PromptLabel, ScoreLabel};

const PROMPT_BACKGROUND: Color = Color::srgba(0.0, 0.0, 0.0, 0.6);
const PROMPT_COLOR: Color = Color::WHITE;
const SCORE_COLOR: Color = Color::srgb(1.0, 0.9, 0.4);
const OVERLAY_Z_INDEX: i32 = 100;

pub fn score_text(total: u32) -> String {
    format!("Score: {}", total)
}

/// Spawns the prompt line, score counter, and a transparent full-screen fade overlay.
pub fn spawn_hud(mut commands: Commands, settings: Res<HudSettings>) {
    commands
        .spawn(Node {
            position_type: PositionType::Absolute,
            bottom: Val::Px(settings.prompt_bottom_offset),
            width: Val::Percent(100.0),
            justify_content: JustifyContent::Center,
            ..default()
        })
        .with_children(|row| {
            row.spawn((
                Text::new(""),
                TextFont {
                    font_size: settings.prompt_font_size,
                    ..default()
                },
                TextColor(PROMPT_COLOR),
                BackgroundColor(PROMPT_BACKGROUND),
                Node {
                    padding: UiRect::axes(Val::Px(12.0), Val::Px(6.0)),
                    ..default()
                },
                Visibility::Hidden,
                PromptLabel,
            ));
        });

    commands.spawn((
        Text::new(score_text(0)),
        TextFont {
            font_size: settings.score_font_size,
            ..default()
        },
        TextColor(SCORE_COLOR),
        Node {
            position_type: PositionType::Absolute,
            top: Val::Px(settings.corner_offset),
            left: Val::Px(settings.corner_offset),
            ..default()
        },
        ScoreLabel,
    ));

    commands.spawn((
        Node {
            position_type: PositionType::Absolute,
            width: Val::Percent(100.0),
            height: Val::Percent(100.0),
            ..default()
        },
        BackgroundColor(Color::BLACK.with_alpha(0.0)),
        GlobalZIndex(OVERLAY_Z_INDEX),
        FadeOverlay,
    ));
}

/// Shows the current prompt text, or hides the line when there is none.
pub fn update_prompt_label(
    prompt: Res<PromptService>,
    mut labels: Query<(&mut Text, &mut Visibility), With<PromptLabel>>,
) {
    if !prompt.is_changed() {
        return;
    }

    for (mut text, mut visibility) in labels.iter_mut() {
        match prompt.current() {
            Some(current) => {
                if text.0 != current {
                    text.0 = current.to_string();
                }
                *visibility = Visibility::Inherited;
            }
            None => *visibility = Visibility::Hidden,
        }
    }
}

pub fn update_score_label(score: Res<Score>, mut labels: Query<&mut Text, With<ScoreLabel>>) {
    if !score.is_changed() {
        return;
    }
    for mut text in labels.iter_mut() {
        text.0 = score_text(score.total());
    }
}
