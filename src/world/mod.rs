//! World module housing the level layout: areas, props, actor, light, and camera.
pub mod components;
pub mod plugin;
pub mod systems;

pub use plugin::WorldPlugin;
