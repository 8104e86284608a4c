//! Chat bridge: a single-flight HTTP exchange with a local language-model service.
pub mod bridge;
pub mod components;
pub mod errors;
pub mod plugin;
pub mod systems;
pub mod transport;

pub use plugin::ChatPlugin;
