//! Camera follow parameters.
use bevy::prelude::*;

use crate::core::settings::CameraSettings;

/// Keeps the camera at `offset` from the actor, closing `blend` of the gap each frame.
#[derive(Component, Debug, Clone)]
pub struct CameraFollow {
    pub offset: Vec3,
    pub blend: f32,
    pub rotation: Quat,
}

impl CameraFollow {
    pub fn from_settings(settings: &CameraSettings) -> Self {
        Self {
            offset: settings.offset,
            blend: settings.blend,
            rotation: settings.rotation,
        }
    }

    /// One frame of follow: fixed-fraction lerp toward the target, then the fixed orientation.
    pub fn step(&self, transform: &mut Transform, actor: Vec3) {
        let desired = actor + self.offset;
        transform.translation = transform.translation.lerp(desired, self.blend);
        transform.rotation = self.rotation;
    }
}
