//! Minimal top-down body/collider model and the obstruction query used for drop placement.
pub mod components;
pub mod plugin;
pub mod query;
pub mod systems;

pub use plugin::PhysicsPlugin;
