//! Physics components for ECS entities.

use glam::Vec2;

use crate::error::BodyError;

/// Rigid body component.
///
/// Edge bounce mutates `linear_velocity` and `angular_velocity` in place;
/// the body is never replaced.
#[derive(Debug, Clone)]
pub struct RigidBody {
    pub mass: f32,
    /// Rotational inertia about the center of mass.
    pub moment_of_inertia: f32,
    pub linear_velocity: Vec2,
    /// Angular velocity in radians per second.
    pub angular_velocity: f32,
    /// Coefficient of restitution (0.0 - 1.0). Default: 1.0.
    pub restitution: f32,
}

impl RigidBody {
    /// Create a body with explicit mass and moment of inertia.
    pub fn new(mass: f32, moment_of_inertia: f32) -> Self {
        Self {
            mass,
            moment_of_inertia,
            linear_velocity: Vec2::ZERO,
            angular_velocity: 0.0,
            restitution: 1.0,
        }
    }

    /// Create a solid disc body: I = 0.5 * m * r^2.
    pub fn new_disc(mass: f32, radius: f32) -> Self {
        Self::new(mass, 0.5 * mass * radius * radius)
    }

    /// Set the initial linear velocity.
    pub fn with_velocity(mut self, velocity: Vec2) -> Self {
        self.linear_velocity = velocity;
        self
    }

    /// Set the initial angular velocity.
    pub fn with_angular_velocity(mut self, angular_velocity: f32) -> Self {
        self.angular_velocity = angular_velocity;
        self
    }

    /// Set the coefficient of restitution.
    pub fn with_restitution(mut self, restitution: f32) -> Self {
        self.restitution = restitution;
        self
    }

    /// Check the preconditions for impulse resolution.
    pub fn validate(&self) -> Result<(), BodyError> {
        if !(self.mass.is_finite() && self.mass > 0.0) {
            return Err(BodyError::NonPositiveMass(self.mass));
        }
        if !(self.moment_of_inertia.is_finite() && self.moment_of_inertia > 0.0) {
            return Err(BodyError::NonPositiveInertia(self.moment_of_inertia));
        }
        if !self.restitution.is_finite() {
            return Err(BodyError::NonFiniteRestitution(self.restitution));
        }
        if !self.linear_velocity.is_finite() {
            return Err(BodyError::NonFiniteVelocity(self.linear_velocity));
        }
        if !self.angular_velocity.is_finite() {
            return Err(BodyError::NonFiniteAngularVelocity(self.angular_velocity));
        }
        Ok(())
    }

    #[inline]
    pub fn inv_mass(&self) -> f32 {
        1.0 / self.mass
    }

    #[inline]
    pub fn inv_inertia(&self) -> f32 {
        1.0 / self.moment_of_inertia
    }
}

/// Body geometry.
#[derive(Debug, Clone, Copy, PartialEq)]
pub enum Geometry {
    Circle { radius: f32 },
    Rectangle { half_extents: Vec2 },
    Point,
}

impl Geometry {
    /// Circle radius must be positive and finite.
    pub fn validate(&self) -> Result<(), BodyError> {
        match *self {
            Geometry::Circle { radius } if !(radius.is_finite() && radius > 0.0) => {
                Err(BodyError::InvalidRadius(radius))
            }
            _ => Ok(()),
        }
    }

    /// Short name of the geometry kind.
    pub fn name(&self) -> &'static str {
        match self {
            Geometry::Circle { .. } => "circle",
            Geometry::Rectangle { .. } => "rectangle",
            Geometry::Point => "point",
        }
    }
}
