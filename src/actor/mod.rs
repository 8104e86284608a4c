//! Controlled actor: marker, registry, locator, and top-down movement.
pub mod components;
pub mod plugin;
pub mod systems;

pub use plugin::ActorPlugin;
