//! Late-frame camera that trails the actor at a fixed offset and angle.
pub mod components;
pub mod plugin;
pub mod systems;

pub use plugin::CameraPlugin;
