//! Closed-form contact impulse for a single body against a static surface.
//!
//! Velocities are split along the contact normal `n` and its tangent `t`.
//! The normal impulse applies restitution; friction is a tangential impulse
//! proportional to the normal impulse, capped at the impulse that would
//! bring the tangential slip to rest. This is a simplified Coulomb model
//! tied to the normal impulse, not a friction cone.

use glam::Vec2;

use crate::ecs::components::physics::RigidBody;

use super::contact::ContactFrame;

/// Friction coefficient between bodies and the boundary.
pub const DEFAULT_FRICTION: f32 = 0.6;

/// Impulses applied by one call to [`apply_impulse`].
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct ContactImpulse {
    /// Normal impulse magnitude.
    pub normal: f32,
    /// Tangential impulse, if friction was applied.
    pub friction: Option<f32>,
    /// Tangential impulse that would exactly zero the slip. Zero when
    /// friction was skipped.
    pub friction_limit: f32,
}

/// Contact tangent: the normal rotated clockwise by 90 degrees.
#[inline]
pub fn tangent(normal: Vec2) -> Vec2 {
    Vec2::new(normal.y, -normal.x)
}

/// Resolve one contact, updating the body's linear and angular velocity.
///
/// `restitution` is the combined coefficient and is clamped to [0, 1].
/// The body must satisfy [`RigidBody::validate`]; callers filter out bodies
/// that do not.
pub fn apply_impulse(
    body: &mut RigidBody,
    contact: &ContactFrame,
    restitution: f32,
    friction: f32,
) -> ContactImpulse {
    debug_assert!(body.validate().is_ok(), "invalid body reached the solver");

    let restitution = restitution.clamp(0.0, 1.0);
    let inv_mass = body.inv_mass();
    let inv_inertia = body.inv_inertia();

    let n = contact.normal;
    let t = tangent(n);

    let mut v_n = body.linear_velocity.dot(n);
    let mut v_t = body.linear_velocity.dot(t);
    let r_n = contact.offset.dot(n);
    let r_t = contact.offset.dot(t);
    let mut omega = body.angular_velocity;

    // Velocity of the contact point, including rotation
    v_n += omega * r_t;
    v_t += omega * r_n;

    let k_normal = inv_mass + inv_inertia * r_t * r_t;
    let j_normal = -(1.0 + restitution) * v_n / k_normal;
    v_n += j_normal * k_normal;
    omega -= j_normal * r_t * inv_inertia;

    let mut applied_friction = None;
    let mut friction_limit = 0.0;

    if friction > 0.0 && v_t != 0.0 {
        let k_tangent = inv_mass + inv_inertia * r_n * r_n;
        friction_limit = v_t / k_tangent;

        let sign = if v_t < 0.0 { -1.0 } else { 1.0 };
        let mut j_friction = sign * friction * j_normal;
        // Never push past zero slip
        j_friction = if sign > 0.0 {
            j_friction.min(friction_limit)
        } else {
            j_friction.max(friction_limit)
        };
        // A separating contact yields a negative normal impulse; keep the
        // magnitude bound in that case too.
        // `max`/`min` rather than `clamp`: a NaN bound must not panic.
        let bound = friction_limit.abs();
        j_friction = j_friction.max(-bound).min(bound);

        omega -= j_friction * r_n * inv_inertia;
        v_t -= j_friction * k_tangent;
        applied_friction = Some(j_friction);
    }

    body.angular_velocity = omega;
    body.linear_velocity = n * (v_n - omega * r_t) + t * (v_t - omega * r_n);

    ContactImpulse {
        normal: j_normal,
        friction: applied_friction,
        friction_limit,
    }
}
