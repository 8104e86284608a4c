//! Scene transition zones, spawn points, and the services that perform a scene change.
pub mod components;
pub mod plugin;
pub mod services;
pub mod systems;

pub use plugin::TransitionPlugin;
