//! Rigid body integration.

use glam::Vec2;

use crate::ecs::components::physics::RigidBody;
use crate::ecs::components::transform::Transform2D;
use crate::error::PhysicsError;

use super::contact::EventSink;
use super::{Behavior, StepReport};

/// Apply a constant acceleration to every body: v += g * dt.
pub fn apply_gravity(world: &mut hecs::World, gravity: Vec2, dt: f32) {
    if gravity == Vec2::ZERO {
        return;
    }
    for (_, rb) in world.query_mut::<&mut RigidBody>() {
        rb.linear_velocity += gravity * dt;
    }
}

/// Integrate positions and angles: p += v * dt, theta += omega * dt.
///
/// Returns the number of bodies moved.
pub fn integrate_positions(world: &mut hecs::World, dt: f32) -> usize {
    let mut moved = 0;
    for (_, (rb, transform)) in world.query_mut::<(&RigidBody, &mut Transform2D)>() {
        transform.position += rb.linear_velocity * dt;
        transform.angle += rb.angular_velocity * dt;
        moved += 1;
    }
    moved
}

/// Semi-implicit Euler integrator.
///
/// Runs ahead of edge bounce so contacts are resolved against the
/// positions reached this tick.
#[derive(Debug, Clone)]
pub struct Integrator {
    gravity: Vec2,
}

impl Integrator {
    pub fn new(gravity: Vec2) -> Self {
        Self { gravity }
    }
}

impl Default for Integrator {
    fn default() -> Self {
        Self::new(Vec2::ZERO)
    }
}

impl Behavior for Integrator {
    fn name(&self) -> &'static str {
        "integrator"
    }

    fn priority(&self) -> i32 {
        10
    }

    fn init(&mut self, _bodies: &hecs::World) -> Result<(), PhysicsError> {
        if self.gravity.is_finite() {
            Ok(())
        } else {
            Err(PhysicsError::InvalidCoefficient {
                name: "gravity",
                value: if self.gravity.x.is_finite() {
                    self.gravity.y
                } else {
                    self.gravity.x
                },
            })
        }
    }

    fn step(
        &mut self,
        bodies: &mut hecs::World,
        dt: f32,
        _events: &mut dyn EventSink,
    ) -> StepReport {
        apply_gravity(bodies, self.gravity, dt);
        StepReport {
            bodies_visited: integrate_positions(bodies, dt),
            ..StepReport::default()
        }
    }
}
