//! Components, messages, and resources for interactable objects.
use bevy::prelude::*;

use crate::core::settings::InteractionSettings;

const MIN_RADIUS: f32 = 0.01;

/// Range transition reported by [`Interactable::update_range`].
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ProximityEdge {
    Entered,
    Exited,
}

/// Object the actor can activate while standing within `radius`.
#[derive(Component, Debug, Clone)]
pub struct Interactable {
    pub radius: f32,
    pub prompt: String,
    pub highlight: Color,
    in_range: bool,
    suspended: bool,
}

impl Interactable {
    pub fn new(radius: f32, prompt: impl Into<String>, highlight: Color) -> Self {
        Self {
            radius: radius.max(MIN_RADIUS),
            prompt: prompt.into(),
            highlight,
            in_range: false,
            suspended: false,
        }
    }

    pub fn from_settings(settings: &InteractionSettings) -> Self {
        Self::new(settings.radius, settings.prompt.clone(), settings.highlight)
    }

    pub fn with_prompt(mut self, prompt: impl Into<String>) -> Self {
        self.prompt = prompt.into();
        self
    }

    pub fn in_range(&self) -> bool {
        self.in_range
    }

    pub fn is_suspended(&self) -> bool {
        self.suspended
    }

    /// Recomputes the range flag; `None` distance means no actor, which counts as out of range.
    pub fn update_range(&mut self, distance: Option<f32>) -> Option<ProximityEdge> {
        let now_in_range = distance.is_some_and(|distance| distance <= self.radius);
        let was_in_range = self.in_range;
        self.in_range = now_in_range;

        match (was_in_range, now_in_range) {
            (false, true) => Some(ProximityEdge::Entered),
            (true, false) => Some(ProximityEdge::Exited),
            _ => None,
        }
    }

    /// Stops proximity tracking (the object is being carried). The range flag and tint are frozen.
    pub fn suspend(&mut self) {
        self.suspended = true;
    }

    /// Resumes tracking from out-of-range so the prompt re-appears on the next update.
    ///
    /// Returns `Exited` when the object was in range, so callers can hide its prompt.
    pub fn resume(&mut self) -> Option<ProximityEdge> {
        self.suspended = false;
        std::mem::take(&mut self.in_range).then_some(ProximityEdge::Exited)
    }

    /// Colour to render given the object's original colour.
    pub fn tint(&self, original: Color) -> Color {
        if self.in_range {
            self.highlight
        } else {
            original
        }
    }
}

/// Original material colour restored when the actor walks away.
#[derive(Component, Debug, Clone, Copy)]
pub struct Highlight {
    pub original: Color,
}

impl Highlight {
    pub fn new(original: Color) -> Self {
        Self { original }
    }
}

/// Fired once per activation press for each in-range interactable.
#[derive(Message, Debug, Clone, Copy, PartialEq, Eq)]
pub struct InteractionActivated {
    pub entity: Entity,
}

/// Item that is collected for points when activated.
#[derive(Component, Debug, Clone)]
pub struct Collectible {
    pub score_value: u32,
    pub despawn_on_collect: bool,
}

impl Collectible {
    pub fn new(score_value: u32) -> Self {
        Self {
            score_value,
            despawn_on_collect: true,
        }
    }
}

/// Running total of collected points.
#[derive(Resource, Debug, Default)]
pub struct Score {
    total: u32,
}

impl Score {
    pub fn add(&mut self, points: u32) -> u32 {
        self.total = self.total.saturating_add(points);
        self.total
    }

    pub fn total(&self) -> u32 {
        self.total
    }
}
