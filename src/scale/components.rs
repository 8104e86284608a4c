//! Platform, readout, and gate components.
use bevy::prelude::*;

/// Value shown when nothing readable sits on the platform.
pub const DEFAULT_WEIGHT: u32 = 0;

/// Weight encoded in an identity string: its final character as a single decimal digit.
///
/// `"Weight3"` reads as 3; `"Box"`, `""` and `"Crate7x"` have no weight.
pub fn weight_from_identity(identity: &str) -> Option<u32> {
    identity.chars().last().and_then(|last| last.to_digit(10))
}

/// Area that reports the nearest idle carryable resting within `radius`.
#[derive(Component, Debug, Clone)]
pub struct WeightPlatform {
    pub radius: f32,
    occupant: Option<Entity>,
}

impl WeightPlatform {
    pub fn new(radius: f32) -> Self {
        Self {
            radius: radius.max(0.0),
            occupant: None,
        }
    }

    pub fn occupant(&self) -> Option<Entity> {
        self.occupant
    }

    pub fn set_occupant(&mut self, occupant: Option<Entity>) {
        self.occupant = occupant;
    }
}

/// Converts the platform occupant's identity into a displayed weight.
#[derive(Component, Debug, Clone)]
pub struct WeightScale {
    pub default_weight: u32,
}

impl Default for WeightScale {
    fn default() -> Self {
        Self {
            default_weight: DEFAULT_WEIGHT,
        }
    }
}

impl WeightScale {
    pub fn current_weight(&self, identity: Option<&str>) -> u32 {
        identity
            .and_then(weight_from_identity)
            .unwrap_or(self.default_weight)
    }

    pub fn readout(&self, identity: Option<&str>) -> String {
        self.current_weight(identity).to_string()
    }
}

/// Text element mirroring the readout of the scale on `scale`.
#[derive(Component, Debug, Clone, Copy)]
pub struct WeightDisplay {
    pub scale: Entity,
}

/// Barrier that lets things through while its platform reads at least `required_weight`.
#[derive(Component, Debug, Clone)]
pub struct WeightGate {
    pub platform: Entity,
    pub required_weight: u32,
    open: bool,
}

impl WeightGate {
    pub fn new(platform: Entity, required_weight: u32) -> Self {
        Self {
            platform,
            required_weight,
            open: false,
        }
    }

    pub fn is_open(&self) -> bool {
        self.open
    }

    /// Returns the new open state when it flips.
    pub fn update(&mut self, weight: u32) -> Option<bool> {
        let open = weight >= self.required_weight;
        if open == self.open {
            return None;
        }
        self.open = open;
        Some(open)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn identity_final_digit_is_the_weight() {
        assert_eq!(weight_from_identity("Weight3"), Some(3));
        assert_eq!(weight_from_identity("Weight0"), Some(0));
        assert_eq!(weight_from_identity("Box"), None);
        assert_eq!(weight_from_identity(""), None);
        assert_eq!(weight_from_identity("Crate7x"), None);
    }

    #[test]
    fn unreadable_identities_fall_back_to_default() {
        let scale = WeightScale::default();
        assert_eq!(scale.readout(Some("Weight3")), "3");
        assert_eq!(scale.readout(Some("Box")), "0");
        assert_eq!(scale.readout(Some("")), "0");
        assert_eq!(scale.readout(Some("Crate7x")), "0");
        assert_eq!(scale.readout(None), "0");
    }

    #[test]
    fn gate_reports_only_flips() {
        let platform = World::new().spawn_empty().id();
        let mut gate = WeightGate::new(platform, 5);
        assert_eq!(gate.update(3), None);
        assert_eq!(gate.update(5), Some(true));
        assert_eq!(gate.update(9), None);
        assert_eq!(gate.update(0), Some(false));
        assert!(!gate.is_open());
    }
}
