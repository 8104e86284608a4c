use std::path::Path;

use bevy::prelude::*;

mod actor;
mod camera;
mod carry;
mod chat;
mod core;
mod interaction;
mod physics;
mod scale;
mod transition;
mod ui;
mod world;

use crate::{
    actor::ActorPlugin, camera::CameraPlugin, carry::CarryPlugin, chat::ChatPlugin,
    core::CorePlugin, interaction::InteractionPlugin, physics::PhysicsPlugin, scale::ScalePlugin,
    transition::TransitionPlugin, ui::UiPlugin, world::WorldPlugin,
};

fn main() {
    load_secrets_env();

    App::new()
        .add_plugins((
            DefaultPlugins,
            CorePlugin::default(),
            PhysicsPlugin,
            ActorPlugin,
            InteractionPlugin,
            CarryPlugin, // After InteractionPlugin: orders itself after activation
            ScalePlugin,
            TransitionPlugin,
            CameraPlugin,
            ChatPlugin,
            WorldPlugin,
            UiPlugin,
        ))
        .run();
}

fn load_secrets_env() {
    const SECRETS_FILE: &str = "secrets.env";

    let path = Path::new(SECRETS_FILE);
    if !path.exists() {
        return;
    }

    if let Err(err) = dotenvy::from_filename(path) {
        eprintln!("Failed to load {}: {}", SECRETS_FILE, err);
    }
}
