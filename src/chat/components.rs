//! Chat line state, response display, and submission message.
use bevy::prelude::*;

/// Text being typed into the chat line; it owns the keyboard while focused.
#[derive(Resource, Debug, Default, Clone)]
pub struct ChatInput {
    pub buffer: String,
    pub focused: bool,
}

impl ChatInput {
    pub fn toggle_focus(&mut self) -> bool {
        self.focused = !self.focused;
        self.focused
    }

    pub fn clear(&mut self) {
        self.buffer.clear();
    }
}

/// Latest successful reply; failures never overwrite it.
#[derive(Resource, Debug, Default, Clone)]
pub struct ChatResponseText {
    pub text: String,
}

/// The chat line was submitted with `text`.
#[derive(Message, Debug, Clone, PartialEq, Eq)]
pub struct ChatSubmitted {
    pub text: String,
}
