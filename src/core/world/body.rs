//=========================================================================
// Rigid Body
//=========================================================================
//
// Point-mass body with damping, optional gravity and a rotation freeze.
//
// Integration (per step):
//   a  = F / m (+ g when gravity is on)
//   v  = (v + a·dt) / (1 + linear_damping·dt)
//   x += v·dt
//   ω  = 0 if rotation frozen, else ω / (1 + angular_damping·dt)
//
//=========================================================================

//=== External Dependencies ===============================================

use glam::{Quat, Vec3};

//=== Constraints =========================================================

/// Motion constraints applied to a body.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum Constraints {
    /// Body moves and rotates freely.
    #[default]
    None,

    /// Body translates but never rotates.
    FreezeRotation,
}

impl Constraints {
    #[inline]
    pub fn freezes_rotation(self) -> bool {
        matches!(self, Self::FreezeRotation)
    }
}

//=== PhysicalProperties ==================================================

/// Tunable physical response of a body.
///
/// The default matches a freshly created free body: gravity on, no linear
/// damping, small angular damping (0.05), no constraints.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct PhysicalProperties {
    pub use_gravity: bool,
    pub linear_damping: f32,
    pub angular_damping: f32,
    pub constraints: Constraints,
}

impl PhysicalProperties {
    /// Angular damping of a free body.
    pub const DEFAULT_ANGULAR_DAMPING: f32 = 0.05;

    /// Properties of a free, gravity-affected body.
    pub const FREE: Self = Self {
        use_gravity: true,
        linear_damping: 0.0,
        angular_damping: Self::DEFAULT_ANGULAR_DAMPING,
        constraints: Constraints::None,
    };
}

impl Default for PhysicalProperties {
    fn default() -> Self {
        Self::FREE
    }
}

//=== Body ================================================================

/// Simulated physical body of an entity.
#[derive(Debug, Clone, PartialEq)]
pub struct Body {
    pub position: Vec3,
    pub rotation: Quat,
    pub linear_velocity: Vec3,
    pub angular_velocity: Vec3,
    pub properties: PhysicalProperties,
    mass: f32,
    force: Vec3,
}

impl Body {
    /// Creates a unit-mass body at rest.
    pub fn new(position: Vec3) -> Self {
        Self {
            position,
            rotation: Quat::IDENTITY,
            linear_velocity: Vec3::ZERO,
            angular_velocity: Vec3::ZERO,
            properties: PhysicalProperties::default(),
            mass: 1.0,
            force: Vec3::ZERO,
        }
    }

    /// Sets the body mass.
    ///
    /// # Panics
    ///
    /// Panics if `mass` is not a positive finite number.
    pub fn with_mass(mut self, mass: f32) -> Self {
        assert!(
            mass.is_finite() && mass > 0.0,
            "Body mass must be positive, got {}",
            mass
        );
        self.mass = mass;
        self
    }

    pub fn with_properties(mut self, properties: PhysicalProperties) -> Self {
        self.properties = properties;
        self
    }

    pub fn with_angular_velocity(mut self, angular_velocity: Vec3) -> Self {
        self.angular_velocity = angular_velocity;
        self
    }

    pub fn mass(&self) -> f32 {
        self.mass
    }

    /// Force accumulated since the last step.
    pub fn accumulated_force(&self) -> Vec3 {
        self.force
    }

    //--- Simulation -------------------------------------------------------

    /// Adds a force applied over the next step.
    pub fn add_force(&mut self, force: Vec3) {
        self.force += force;
    }

    /// Advances the body by `dt` seconds and clears accumulated force.
    pub(crate) fn integrate(&mut self, dt: f32, gravity: Vec3) {
        let props = self.properties;

        let mut acceleration = self.force / self.mass;
        if props.use_gravity {
            acceleration += gravity;
        }

        self.linear_velocity += acceleration * dt;
        self.linear_velocity /= 1.0 + props.linear_damping * dt;
        self.position += self.linear_velocity * dt;

        if props.constraints.freezes_rotation() {
            self.angular_velocity = Vec3::ZERO;
        } else {
            self.angular_velocity /= 1.0 + props.angular_damping * dt;
            if self.angular_velocity.length_squared() > 0.0 {
                let spin = Quat::from_scaled_axis(self.angular_velocity * dt);
                self.rotation = (spin * self.rotation).normalize();
            }
        }

        self.force = Vec3::ZERO;
    }
}

//=========================================================================
// Unit Tests
//=========================================================================
