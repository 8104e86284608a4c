//! Chat plugin wiring the bridge, keyboard capture, and polling.
use bevy::prelude::*;

use crate::core::{input::read_action_input, GameplaySet};

use super::{
    components::{ChatInput, ChatResponseText, ChatSubmitted},
    systems::{capture_chat_keys, install_chat_bridge, poll_chat_exchange, submit_chat_messages},
};

pub struct ChatPlugin;

impl Plugin for ChatPlugin {
    fn build(&self, app: &mut App) {
        app.init_resource::<ChatInput>()
            .init_resource::<ChatResponseText>()
            .add_message::<ChatSubmitted>()
            .add_systems(Startup, install_chat_bridge)
            .add_systems(
                Update,
                capture_chat_keys
                    .before(read_action_input)
                    .in_set(GameplaySet::Input),
            )
            .add_systems(
                Update,
                (submit_chat_messages, poll_chat_exchange)
                    .chain()
                    .in_set(GameplaySet::Act),
            );
    }
}
