//! Keyboard capture, submission, and exchange polling for the chat bridge.
use std::sync::Arc;

use bevy::{
    input::{
        keyboard::{Key, KeyboardInput},
        ButtonState,
    },
    log::{error, info, warn},
    prelude::*,
};

use crate::core::{
    event_log::{EventLevel, EventLog},
    input::ActionInput,
    settings::ChatSettings,
};

use super::{
    bridge::ChatBridge,
    components::{ChatInput, ChatResponseText, ChatSubmitted},
    transport::{ChatTransport, HttpChatTransport, OfflineTransport},
};

/// Builds the HTTP transport from settings, falling back to an offline stand-in.
pub fn install_chat_bridge(
    mut commands: Commands,
    settings: Res<ChatSettings>,
    mut log: ResMut<EventLog>,
) {
    let transport: Arc<dyn ChatTransport> = match HttpChatTransport::new(&settings) {
        Ok(transport) => Arc::new(transport),
        Err(err) => {
            warn!(target: "chat", "Chat bridge running offline ({})", err);
            log.record(EventLevel::Warning, format!("Chat bridge running offline ({})", err));
            Arc::new(OfflineTransport)
        }
    };

    let bridge = ChatBridge::new(transport);
    let message = format!(
        "Chat bridge initialized (endpoint: {}, timeout: {}s)",
        bridge.describe(),
        settings.timeout.as_secs()
    );
    info!(target: "chat", "{}", message);
    log.record(EventLevel::Log, message);
    commands.insert_resource(bridge);
}

/// Routes typed keys into the chat line while it has focus; Tab toggles focus.
pub fn capture_chat_keys(
    mut keys: MessageReader<KeyboardInput>,
    mut chat: ResMut<ChatInput>,
    mut input: ResMut<ActionInput>,
    mut submitted: MessageWriter<ChatSubmitted>,
) {
    for key in keys.read() {
        if key.state != ButtonState::Pressed {
            continue;
        }

        match &key.logical_key {
            Key::Tab => {
                chat.toggle_focus();
            }
            _ if !chat.focused => {}
            Key::Escape => chat.focused = false,
            Key::Enter => {
                submitted.write(ChatSubmitted {
                    text: chat.buffer.clone(),
                });
            }
            Key::Backspace => {
                chat.buffer.pop();
            }
            Key::Space => chat.buffer.push(' '),
            Key::Character(text) => chat.buffer.push_str(text),
            _ => {}
        }
    }

    if input.captured != chat.focused {
        input.captured = chat.focused;
    }
}

/// Sends submitted lines; the line is cleared only when the bridge accepts it.
pub fn submit_chat_messages(
    mut submissions: MessageReader<ChatSubmitted>,
    mut bridge: ResMut<ChatBridge>,
    mut chat: ResMut<ChatInput>,
    mut log: ResMut<EventLog>,
) {
    for submission in submissions.read() {
        match bridge.send(&submission.text) {
            Ok(()) => {
                let message = format!("Processing user message: {}", submission.text);
                info!(target: "chat", "{}", message);
                log.record(EventLevel::Log, message);
                chat.clear();
            }
            Err(rejected) => {
                info!(target: "chat", "{}", rejected);
                log.record(EventLevel::Log, rejected.to_string());
            }
        }
    }
}

/// Collects a finished exchange; only a success replaces the displayed reply.
pub fn poll_chat_exchange(
    mut bridge: ResMut<ChatBridge>,
    mut response: ResMut<ChatResponseText>,
    mut log: ResMut<EventLog>,
) {
    if !bridge.is_busy() {
        return;
    }
    let Some(result) = bridge.poll() else {
        return;
    };

    match result {
        Ok(text) => {
            let message = format!("Parsed response: {}", text);
            info!(target: "chat", "{}", message);
            log.record(EventLevel::Log, message);
            response.text = text;
        }
        Err(err) => {
            error!(target: "chat", "Chat exchange failed: {}", err);
            log.record(EventLevel::Error, format!("ERROR: {}", err));
        }
    }
    log.record(EventLevel::Log, "API call completed");
}
