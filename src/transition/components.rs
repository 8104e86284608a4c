//! Transition zones, spawn points, scene membership, and request validation.
use std::fmt;

use bevy::prelude::*;

/// Prefix every normalised spawn-point identifier carries.
pub const SPAWN_POINT_PREFIX: &str = "SpawnPoint_";
/// Default spawn point, left as is by normalisation.
pub const DEFAULT_SPAWN_POINT: &str = "SpawnPoint";

/// Prefixes `raw` with [`SPAWN_POINT_PREFIX`] unless it is empty, already prefixed, or the default.
pub fn normalize_spawn_point(raw: &str) -> String {
    if raw.is_empty() || raw.starts_with(SPAWN_POINT_PREFIX) || raw == DEFAULT_SPAWN_POINT {
        raw.to_string()
    } else {
        format!("{SPAWN_POINT_PREFIX}{raw}")
    }
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum TransitionError {
    MissingTargetScene,
}

impl fmt::Display for TransitionError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::MissingTargetScene => write!(f, "target scene name is not set"),
        }
    }
}

impl std::error::Error for TransitionError {}

/// A validated scene change.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct SceneRequest {
    pub scene: String,
    pub spawn_point: String,
}

impl SceneRequest {
    pub fn new(scene: &str, spawn_point: &str) -> Result<Self, TransitionError> {
        if scene.trim().is_empty() {
            return Err(TransitionError::MissingTargetScene);
        }
        Ok(Self {
            scene: scene.to_string(),
            spawn_point: normalize_spawn_point(spawn_point),
        })
    }
}

/// Presence change reported by [`SceneTransitionZone::update_presence`].
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ZoneEdge {
    Entered,
    Exited,
}

/// Box-shaped area that sends the actor to another scene.
#[derive(Component, Debug, Clone)]
pub struct SceneTransitionZone {
    pub target_scene: String,
    pub spawn_point: String,
    pub requires_interaction: bool,
    pub prompt: String,
    pub half_extents: Vec2,
    actor_inside: bool,
}

impl SceneTransitionZone {
    pub const DEFAULT_PROMPT: &'static str = "Press E to enter";

    pub fn new(
        target_scene: impl Into<String>,
        spawn_point: impl Into<String>,
        half_extents: Vec2,
    ) -> Self {
        Self {
            target_scene: target_scene.into(),
            spawn_point: spawn_point.into(),
            requires_interaction: true,
            prompt: Self::DEFAULT_PROMPT.to_string(),
            half_extents: half_extents.abs(),
            actor_inside: false,
        }
    }

    /// Transitions as soon as the actor walks in.
    pub fn immediate(mut self) -> Self {
        self.requires_interaction = false;
        self
    }

    #[cfg_attr(not(test), allow(dead_code))]
    pub fn actor_inside(&self) -> bool {
        self.actor_inside
    }

    pub fn contains(&self, zone_center: Vec2, point: Vec2) -> bool {
        let delta = (point - zone_center).abs();
        delta.x <= self.half_extents.x && delta.y <= self.half_extents.y
    }

    pub fn update_presence(&mut self, inside: bool) -> Option<ZoneEdge> {
        let was_inside = self.actor_inside;
        self.actor_inside = inside;
        match (was_inside, inside) {
            (false, true) => Some(ZoneEdge::Entered),
            (true, false) => Some(ZoneEdge::Exited),
            _ => None,
        }
    }

    pub fn request(&self) -> Result<SceneRequest, TransitionError> {
        SceneRequest::new(&self.target_scene, &self.spawn_point)
    }
}

/// Named location the actor is placed at after a scene change.
#[derive(Component, Debug, Clone)]
pub struct SpawnPoint {
    pub name: String,
}

impl SpawnPoint {
    pub fn new(name: impl Into<String>) -> Self {
        Self { name: name.into() }
    }
}

/// Tags an entity as part of a scene; it is only visible while that scene is active.
#[derive(Component, Debug, Clone)]
pub struct SceneMember {
    pub scene: String,
}

impl SceneMember {
    pub fn new(scene: impl Into<String>) -> Self {
        Self {
            scene: scene.into(),
        }
    }
}

/// Full-screen overlay driven by [`SceneFade`](super::services::SceneFade).
#[derive(Component, Debug, Default)]
pub struct FadeOverlay;

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn spawn_points_are_prefixed_once() {
        assert_eq!(normalize_spawn_point("env2"), "SpawnPoint_env2");
        assert_eq!(normalize_spawn_point("SpawnPoint_env2"), "SpawnPoint_env2");
        assert_eq!(normalize_spawn_point("SpawnPoint"), "SpawnPoint");
        assert_eq!(normalize_spawn_point(""), "");
    }

    #[test]
    fn empty_target_scene_is_rejected() {
        assert_eq!(
            SceneRequest::new("", "env2"),
            Err(TransitionError::MissingTargetScene)
        );
        assert_eq!(
            SceneRequest::new("env2", "env2").map(|request| request.spawn_point),
            Ok("SpawnPoint_env2".to_string())
        );
    }

    #[test]
    fn presence_edges_fire_once() {
        let mut zone = SceneTransitionZone::new("env2", "env2", Vec2::ONE);
        assert!(zone.contains(Vec2::ZERO, Vec2::new(1.0, -1.0)));
        assert!(!zone.contains(Vec2::ZERO, Vec2::new(1.1, 0.0)));

        assert_eq!(zone.update_presence(true), Some(ZoneEdge::Entered));
        assert_eq!(zone.update_presence(true), None);
        assert_eq!(zone.update_presence(false), Some(ZoneEdge::Exited));
        assert!(!zone.actor_inside());
    }
}
