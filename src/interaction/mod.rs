//! Proximity detection, highlight feedback, and activation of interactable objects.
pub mod components;
pub mod plugin;
pub mod systems;

pub use plugin::InteractionPlugin;
