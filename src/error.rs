//! Error types for configuration and per-body preconditions.

use glam::Vec2;
use thiserror::Error;

/// Errors raised while configuring behaviors or assembling a world.
#[derive(Debug, Clone, PartialEq, Error)]
pub enum PhysicsError {
    /// Edge bounce was configured without a boundary region.
    #[error("edge bounce requires a boundary region")]
    MissingBounds,

    /// Boundary region is degenerate or not finite.
    #[error("invalid boundary region: min {min} must be finite and below max {max}")]
    InvalidBounds { min: Vec2, max: Vec2 },

    /// A material coefficient cannot be used.
    #[error("invalid {name} coefficient: {value}")]
    InvalidCoefficient { name: &'static str, value: f32 },
}

/// Precondition failures that exclude a single body from resolution.
#[derive(Debug, Clone, Copy, PartialEq, Error)]
pub enum BodyError {
    #[error("mass must be positive and finite, got {0}")]
    NonPositiveMass(f32),

    #[error("moment of inertia must be positive and finite, got {0}")]
    NonPositiveInertia(f32),

    #[error("restitution must be finite, got {0}")]
    NonFiniteRestitution(f32),

    #[error("linear velocity must be finite, got {0}")]
    NonFiniteVelocity(Vec2),

    #[error("angular velocity must be finite, got {0}")]
    NonFiniteAngularVelocity(f32),

    /// Circle radius is zero, negative or not finite.
    #[error("circle radius must be positive and finite, got {0}")]
    InvalidRadius(f32),
}
