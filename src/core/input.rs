//! Frame-level action input shared by every gameplay system.
use bevy::prelude::*;

/// Actions sampled once per frame from the keyboard.
///
/// Gameplay systems read this resource instead of `ButtonInput<KeyCode>`, so
/// text entry can capture the keyboard and tests can drive actions directly.
#[derive(Resource, Debug, Default, Clone)]
pub struct ActionInput {
    /// Normalised movement axis (zero when idle).
    pub movement: Vec2,
    /// True only on the frame the activate key went down.
    pub activate_pressed: bool,
    /// Set while another consumer (the chat line) owns the keyboard.
    pub captured: bool,
}

impl ActionInput {
    pub fn clear_actions(&mut self) {
        self.movement = Vec2::ZERO;
        self.activate_pressed = false;
    }
}

const ACTIVATE_KEY: KeyCode = KeyCode::KeyE;

/// Samples WASD/arrow movement and the edge-triggered activate key.
pub fn read_action_input(keyboard: Res<ButtonInput<KeyCode>>, mut input: ResMut<ActionInput>) {
    if input.captured {
        input.clear_actions();
        return;
    }

    let mut axis = Vec2::ZERO;
    if keyboard.any_pressed([KeyCode::KeyA, KeyCode::ArrowLeft]) {
        axis.x -= 1.0;
    }
    if keyboard.any_pressed([KeyCode::KeyD, KeyCode::ArrowRight]) {
        axis.x += 1.0;
    }
    if keyboard.any_pressed([KeyCode::KeyW, KeyCode::ArrowUp]) {
        axis.y += 1.0;
    }
    if keyboard.any_pressed([KeyCode::KeyS, KeyCode::ArrowDown]) {
        axis.y -= 1.0;
    }

    input.movement = axis.normalize_or_zero();
    input.activate_pressed = keyboard.just_pressed(ACTIVATE_KEY);
}
