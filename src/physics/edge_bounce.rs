//! Circular bodies bouncing off the inside of a rectangular boundary.
//!
//! Each tick, every circle is tested against the four edges in
//! [`Edge::ORDER`]. A penetrating edge is fully resolved (position snap,
//! impulse, event) before the next edge is tested, so a body in a corner
//! receives two independent impulses rather than one combined response.

use glam::Vec2;
use tracing::{debug, info, trace, warn};

use crate::ecs::components::physics::{Geometry, RigidBody};
use crate::ecs::components::transform::Transform2D;
use crate::error::{BodyError, PhysicsError};

use super::boundary::{BoundaryRegion, Edge};
use super::contact::{ContactEvent, ContactFrame, ContactKind, EventSink};
use super::solver::{apply_impulse, DEFAULT_FRICTION};
use super::{Behavior, StepReport};

/// Configuration for [`EdgeBounce`].
#[derive(Debug, Clone, PartialEq)]
#[cfg_attr(
    feature = "serde",
    derive(serde::Serialize, serde::Deserialize),
    serde(default)
)]
pub struct EdgeBounceConfig {
    /// Enclosing region. Required.
    pub bounds: Option<BoundaryRegion>,
    /// Behavior restitution, multiplied with each body's own. Default: 1.0.
    pub restitution: f32,
    /// Friction coefficient against the boundary. Default: 0.6.
    pub friction: f32,
}

impl Default for EdgeBounceConfig {
    fn default() -> Self {
        Self {
            bounds: None,
            restitution: 1.0,
            friction: DEFAULT_FRICTION,
        }
    }
}

impl EdgeBounceConfig {
    /// Create a config with default coefficients and no bounds.
    pub fn new() -> Self {
        Self::default()
    }

    /// Set the boundary region.
    pub fn bounds(mut self, bounds: BoundaryRegion) -> Self {
        self.bounds = Some(bounds);
        self
    }

    /// Set the behavior restitution.
    pub fn restitution(mut self, restitution: f32) -> Self {
        self.restitution = restitution;
        self
    }

    /// Set the friction coefficient.
    pub fn friction(mut self, friction: f32) -> Self {
        self.friction = friction;
        self
    }
}

/// Edge bounce behavior.
#[derive(Debug, Clone)]
pub struct EdgeBounce {
    bounds: BoundaryRegion,
    restitution: f32,
    friction: f32,
}

impl EdgeBounce {
    /// Name used in logs and as the event topic.
    pub const NAME: &'static str = "edge-bounce";

    /// Validate the configuration and build the behavior.
    ///
    /// Fails with [`PhysicsError::MissingBounds`] when no region is given.
    pub fn new(config: EdgeBounceConfig) -> Result<Self, PhysicsError> {
        let bounds = config.bounds.ok_or(PhysicsError::MissingBounds)?;
        bounds.validate()?;
        check_restitution(config.restitution)?;
        if !(config.friction.is_finite() && config.friction >= 0.0) {
            return Err(PhysicsError::InvalidCoefficient {
                name: "friction",
                value: config.friction,
            });
        }

        Ok(Self {
            bounds,
            restitution: config.restitution,
            friction: config.friction,
        })
    }

    pub fn bounds(&self) -> &BoundaryRegion {
        &self.bounds
    }

    /// Replace the boundary region. Takes effect on the next step.
    pub fn set_bounds(&mut self, bounds: BoundaryRegion) -> Result<(), PhysicsError> {
        bounds.validate()?;
        debug!(min = %bounds.min, max = %bounds.max, "edge bounce bounds changed");
        self.bounds = bounds;
        Ok(())
    }

    pub fn restitution(&self) -> f32 {
        self.restitution
    }

    pub fn set_restitution(&mut self, restitution: f32) -> Result<(), PhysicsError> {
        check_restitution(restitution)?;
        self.restitution = restitution;
        Ok(())
    }

    pub fn friction(&self) -> f32 {
        self.friction
    }

    /// Resolve every penetrated edge for one circle. Returns the number of
    /// contacts, or the precondition failure that excluded the body.
    fn resolve_circle(
        &self,
        entity: hecs::Entity,
        position: &mut Vec2,
        body: &mut RigidBody,
        radius: f32,
        events: &mut dyn EventSink,
    ) -> Result<usize, BodyError> {
        let mut contacts = 0;
        let mut validated = false;

        for edge in Edge::ORDER {
            if !edge.penetrates(*position, radius, &self.bounds) {
                continue;
            }
            if !validated {
                body.validate()?;
                validated = true;
            }

            edge.clamp(position, radius, &self.bounds);

            let contact = ContactFrame::for_edge(edge, radius);
            let restitution = body.restitution * self.restitution;
            let impulse = apply_impulse(body, &contact, restitution, self.friction);

            let point = edge.contact_point(*position, &self.bounds);
            trace!(
                ?entity,
                edge = edge.name(),
                normal_impulse = impulse.normal,
                friction_impulse = ?impulse.friction,
                "edge contact resolved"
            );
            events.publish(ContactEvent {
                kind: ContactKind::EdgeBounce,
                body: entity,
                edge,
                point,
            });
            contacts += 1;
        }

        Ok(contacts)
    }
}

fn check_restitution(restitution: f32) -> Result<(), PhysicsError> {
    if restitution.is_finite() {
        Ok(())
    } else {
        Err(PhysicsError::InvalidCoefficient {
            name: "restitution",
            value: restitution,
        })
    }
}

impl Behavior for EdgeBounce {
    fn name(&self) -> &'static str {
        Self::NAME
    }

    fn priority(&self) -> i32 {
        2
    }

    fn init(&mut self, bodies: &hecs::World) -> Result<(), PhysicsError> {
        info!(
            min = %self.bounds.min,
            max = %self.bounds.max,
            restitution = self.restitution,
            friction = self.friction,
            bodies = bodies.len(),
            "edge bounce initialized"
        );
        Ok(())
    }

    /// `dt` is unused: resolution depends only on the current state.
    fn step(
        &mut self,
        bodies: &mut hecs::World,
        _dt: f32,
        events: &mut dyn EventSink,
    ) -> StepReport {
        let mut report = StepReport::default();

        for (entity, (transform, body, geometry)) in
            bodies.query_mut::<(&mut Transform2D, &mut RigidBody, &Geometry)>()
        {
            let Geometry::Circle { radius } = *geometry else {
                trace!(?entity, geometry = geometry.name(), "not a circle, skipped");
                continue;
            };
            report.bodies_visited += 1;

            if let Err(err) = geometry.validate() {
                warn!(?entity, %err, "body skipped by edge bounce");
                report.rejected.push((entity, err));
                continue;
            }

            match self.resolve_circle(entity, &mut transform.position, body, radius, events) {
                Ok(contacts) => report.contacts += contacts,
                Err(err) => {
                    warn!(?entity, %err, "body skipped by edge bounce");
                    report.rejected.push((entity, err));
                }
            }
        }

        if report.contacts > 0 {
            debug!(contacts = report.contacts, "edge bounce step");
        }
        report
    }
}
