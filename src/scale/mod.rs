//! Weight readout for props resting on a platform, and gates keyed to it.
pub mod components;
pub mod plugin;
pub mod systems;

pub use plugin::ScalePlugin;
