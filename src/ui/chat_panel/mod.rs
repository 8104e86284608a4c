// src/ui/chat_panel/mod.rs
//
// Chat panel: bottom-right box with the typed line and the latest reply.

pub mod components;
pub mod plugin;
pub mod systems;

pub use plugin::ChatPanelPlugin;
