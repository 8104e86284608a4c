//! Carry state machine and the messages that drive it from outside.
use bevy::prelude::*;

use crate::{
    core::settings::CarrySettings,
    physics::{components::CollisionLayers, query::ObstructionQuery},
};

/// Layers a drop position must stay clear of.
pub const DEFAULT_OBSTRUCTION_LAYERS: CollisionLayers =
    CollisionLayers::WALL.union(CollisionLayers::PROP);

#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum CarryState {
    #[default]
    Idle,
    Carried,
}

/// Placement captured when the object first appears; `reset` returns here.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct OriginalPlacement {
    pub translation: Vec3,
    pub scale: Vec3,
}

/// Result of a drop attempt.
#[derive(Debug, Clone, Copy, PartialEq)]
pub enum DropOutcome {
    /// The object was not being carried.
    NotCarried,
    /// Ignored: the previous attempt was within the cooldown window.
    CoolingDown,
    /// Committed at the given planar position.
    Placed(Vec2),
    /// Rejected because the candidate position is occupied.
    Blocked(Vec2),
}

/// Prop that the actor can pick up and place in front of itself.
#[derive(Component, Debug, Clone)]
pub struct Carryable {
    state: CarryState,
    pub pickup_distance: f32,
    pub carry_distance: f32,
    pub drop_cooldown: f32,
    pub obstruction_radius: f32,
    pub obstruction_layers: CollisionLayers,
    pub follow_rate: f32,
    last_drop_attempt: Option<f32>,
    original: Option<OriginalPlacement>,
}

impl Carryable {
    pub fn new(settings: &CarrySettings) -> Self {
        Self {
            state: CarryState::Idle,
            pickup_distance: settings.pickup_distance,
            carry_distance: settings.carry_distance,
            drop_cooldown: settings.drop_cooldown_secs,
            obstruction_radius: settings.obstruction_radius,
            obstruction_layers: DEFAULT_OBSTRUCTION_LAYERS,
            follow_rate: settings.follow_rate,
            last_drop_attempt: None,
            original: None,
        }
    }

    #[cfg_attr(not(test), allow(dead_code))]
    pub fn state(&self) -> CarryState {
        self.state
    }

    pub fn is_carried(&self) -> bool {
        self.state == CarryState::Carried
    }

    pub fn original(&self) -> Option<OriginalPlacement> {
        self.original
    }

    /// Records the starting placement; later calls keep the first capture.
    pub fn capture_original(&mut self, transform: &Transform) -> bool {
        if self.original.is_some() {
            return false;
        }
        self.original = Some(OriginalPlacement {
            translation: transform.translation,
            scale: transform.scale,
        });
        true
    }

    pub fn within_pickup(&self, distance: f32) -> bool {
        distance <= self.pickup_distance
    }

    /// Idle -> Carried. Returns false when already carried.
    pub fn pick_up(&mut self) -> bool {
        if self.is_carried() {
            return false;
        }
        self.state = CarryState::Carried;
        true
    }

    pub fn carry_target(&self, actor: Vec2, facing: Vec2) -> Vec2 {
        actor + facing * self.carry_distance
    }

    pub fn cooling_down(&self, now: f32) -> bool {
        self.last_drop_attempt
            .is_some_and(|last| now - last <= self.drop_cooldown)
    }

    /// Carried -> Idle when the spot in front of the actor is clear.
    ///
    /// Both placed and blocked attempts restart the cooldown.
    pub fn try_drop(
        &mut self,
        now: f32,
        actor: Vec2,
        facing: Vec2,
        obstruction: &impl ObstructionQuery,
    ) -> DropOutcome {
        if !self.is_carried() {
            return DropOutcome::NotCarried;
        }
        if self.cooling_down(now) {
            return DropOutcome::CoolingDown;
        }

        self.last_drop_attempt = Some(now);
        let candidate = self.carry_target(actor, facing);
        if obstruction.is_obstructed(candidate, self.obstruction_radius, self.obstruction_layers) {
            return DropOutcome::Blocked(candidate);
        }

        self.state = CarryState::Idle;
        DropOutcome::Placed(candidate)
    }

    /// Next translation on the way to `target`; z is kept.
    pub fn follow_step(&self, current: Vec3, target: Vec2, dt: f32) -> Vec3 {
        let t = (self.follow_rate * dt).clamp(0.0, 1.0);
        let planar = current.truncate().lerp(target, t);
        planar.extend(current.z)
    }

    /// Forces Idle and hands back the captured placement, ignoring cooldown and obstruction.
    pub fn reset(&mut self) -> Option<OriginalPlacement> {
        self.state = CarryState::Idle;
        self.original
    }
}

/// Requests an unconditional return to the captured original placement.
#[derive(Message, Debug, Clone, Copy, PartialEq, Eq)]
pub struct ResetCarryable {
    pub entity: Entity,
}
