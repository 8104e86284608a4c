// src/ui/hud/mod.rs
//
// Heads-up display: interaction prompt line, score counter, and the scene fade overlay.

pub mod components;
pub mod plugin;
pub mod systems;

pub use plugin::HudPlugin;
