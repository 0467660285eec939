//=========================================================================
// Configuration
//=========================================================================
//
// Tunables for the interaction core, grouped per component.
//
// Every struct implements `Default` with the values the game ships with;
// `SessionBuilder` exposes them through fluent setters.
//
//=========================================================================

//=== Internal Dependencies ===============================================

use super::world::{Constraints, PhysicalProperties, Tag};

//=== Constants ===========================================================

/// Tag carried by every grabbable object.
pub const GRABBABLE_TAG: &str = "Pickable";

//=== RestoreMode =========================================================

/// Which physical properties a released object receives.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum RestoreMode {
    /// Apply [`CarryConfig::release_properties`] regardless of the object's
    /// state before it was grabbed.
    #[default]
    Defaults,

    /// Restore exactly what the object had when it was grabbed.
    Original,
}

//=== CarryConfig =========================================================

/// Carry controller tunables.
///
/// # Default Values
///
/// - **gain**: 50.0 (force per unit of displacement)
/// - **threshold**: 0.1 (dead-zone radius around the anchor)
/// - **carry_damping**: 10.0 linear and angular
/// - **release_properties**: gravity on, 0.0 linear, 0.05 angular, no constraints
/// - **restore_mode**: [`RestoreMode::Defaults`]
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct CarryConfig {
    pub gain: f32,
    pub threshold: f32,
    pub linear_damping: f32,
    pub angular_damping: f32,
    pub release_properties: PhysicalProperties,
    pub restore_mode: RestoreMode,
}

impl CarryConfig {
    /// Properties applied to a body for as long as it is carried.
    pub fn carry_properties(&self) -> PhysicalProperties {
        PhysicalProperties {
            use_gravity: false,
            linear_damping: self.linear_damping,
            angular_damping: self.angular_damping,
            constraints: Constraints::FreezeRotation,
        }
    }
}

impl Default for CarryConfig {
    fn default() -> Self {
        Self {
            gain: 50.0,
            threshold: 0.1,
            linear_damping: 10.0,
            angular_damping: 10.0,
            release_properties: PhysicalProperties::FREE,
            restore_mode: RestoreMode::Defaults,
        }
    }
}

//=== DetectionConfig =====================================================

/// Tag filter shared by the grab detector and the drop registry.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct DetectionConfig {
    pub grabbable_tag: Tag,
}

impl Default for DetectionConfig {
    fn default() -> Self {
        Self {
            grabbable_tag: Tag::new(GRABBABLE_TAG),
        }
    }
}

//=== FadeConfig ==========================================================

/// Durations (seconds) of the transient message display.
///
/// Defaults: instant appearance, 2.0 s fully visible, 1.0 s fade-out.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct FadeConfig {
    pub fade_in: f32,
    pub display_time: f32,
    pub fade_duration: f32,
}

impl Default for FadeConfig {
    fn default() -> Self {
        Self {
            fade_in: 0.0,
            display_time: 2.0,
            fade_duration: 1.0,
        }
    }
}

//=========================================================================
// Unit Tests
//=========================================================================

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn carry_defaults() {
        let config = CarryConfig::default();
        assert_eq!(config.gain, 50.0);
        assert_eq!(config.threshold, 0.1);
        assert_eq!(config.linear_damping, 10.0);
        assert_eq!(config.angular_damping, 10.0);
        assert_eq!(config.release_properties, PhysicalProperties::FREE);
        assert_eq!(config.restore_mode, RestoreMode::Defaults);
    }

    #[test]
    fn carry_properties_disable_gravity_and_rotation() {
        let props = CarryConfig::default().carry_properties();
        assert!(!props.use_gravity);
        assert_eq!(props.linear_damping, 10.0);
        assert_eq!(props.angular_damping, 10.0);
        assert_eq!(props.constraints, Constraints::FreezeRotation);
    }

    #[test]
    fn detection_default_tag() {
        assert_eq!(DetectionConfig::default().grabbable_tag, Tag::new("Pickable"));
    }

    #[test]
    fn fade_defaults() {
        let config = FadeConfig::default();
        assert_eq!(config.fade_in, 0.0);
        assert_eq!(config.display_time, 2.0);
        assert_eq!(config.fade_duration, 1.0);
    }
}
