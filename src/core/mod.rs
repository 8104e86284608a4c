//! Core services shared by every gameplay plugin.
pub mod event_log;
pub mod input;
pub mod plugin;
pub mod prompt;
pub mod settings;

pub use plugin::{CorePlugin, GameplaySet, SimulationClock};

use bevy::prelude::{Entity, Name};

/// Human-readable label for log lines: the entity's `Name`, else its id.
pub fn entity_label(entity: Entity, name: Option<&Name>) -> String {
    name.map(|name| name.as_str().to_string())
        .unwrap_or_else(|| entity.to_string())
}
