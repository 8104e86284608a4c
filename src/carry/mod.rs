//! Pick-up, carry, and place protocol for movable props.
pub mod components;
pub mod plugin;
pub mod systems;

pub use plugin::CarryPlugin;
