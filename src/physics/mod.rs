//! 2D rigid-body simulation built from composable behaviors.
//!
//! # Architecture
//!
//! A [`SimulationWorld`] owns the bodies (a `hecs::World`) and an ordered
//! list of [`Behavior`]s. Each tick runs every behavior once, highest
//! priority first:
//!
//! 1. [`Integrator`] (priority 10): velocities and positions
//! 2. [`EdgeBounce`] (priority 2): boundary contacts
//!
//! Contact notifications go to the world's [`EventSink`], if one is set.

pub mod boundary;
pub mod contact;
pub mod edge_bounce;
pub mod rigid_body;
pub mod solver;

use tracing::debug;

use crate::error::{BodyError, PhysicsError};

use self::contact::EventSink;

pub use self::boundary::{BoundaryRegion, Edge};
pub use self::contact::{ContactEvent, ContactFrame, ContactKind, EventLog};
pub use self::edge_bounce::{EdgeBounce, EdgeBounceConfig};
pub use self::rigid_body::Integrator;
pub use self::solver::{apply_impulse, ContactImpulse, DEFAULT_FRICTION};

/// A per-tick simulation step over all bodies.
pub trait Behavior {
    /// Name used in logs.
    fn name(&self) -> &'static str;

    /// Higher priorities run first within a tick. Default: 0.
    fn priority(&self) -> i32 {
        0
    }

    /// Called once when the behavior is added to a world.
    fn init(&mut self, _bodies: &hecs::World) -> Result<(), PhysicsError> {
        Ok(())
    }

    /// Advance the behavior by one tick. Runs to completion.
    fn step(&mut self, bodies: &mut hecs::World, dt: f32, events: &mut dyn EventSink)
        -> StepReport;
}

/// Outcome of one behavior step (or an aggregate over several).
#[derive(Debug, Clone, Default, PartialEq)]
pub struct StepReport {
    /// Bodies the behavior acted on or considered.
    pub bodies_visited: usize,
    /// Contact notifications emitted.
    pub contacts: usize,
    /// Bodies excluded because they failed a precondition.
    pub rejected: Vec<(hecs::Entity, BodyError)>,
}

impl StepReport {
    /// Fold another report into this one.
    pub fn merge(&mut self, other: StepReport) {
        self.bodies_visited += other.bodies_visited;
        self.contacts += other.contacts;
        self.rejected.extend(other.rejected);
    }
}

/// Configuration for the simulation loop.
#[derive(Debug, Clone, PartialEq)]
#[cfg_attr(
    feature = "serde",
    derive(serde::Serialize, serde::Deserialize),
    serde(default)
)]
pub struct WorldConfig {
    /// Fixed timestep for [`SimulationWorld::advance`] in seconds. Default: 1/60.
    pub fixed_timestep: f64,
    /// Maximum number of sub-steps per call to `advance`. Default: 4.
    pub max_substeps: u32,
}

impl Default for WorldConfig {
    fn default() -> Self {
        Self {
            fixed_timestep: 1.0 / 60.0,
            max_substeps: 4,
        }
    }
}

/// Bodies plus the behaviors that act on them.
pub struct SimulationWorld {
    config: WorldConfig,
    accumulator: f64,
    bodies: hecs::World,
    behaviors: Vec<Box<dyn Behavior>>,
    sink: Option<Box<dyn EventSink>>,
}

impl SimulationWorld {
    /// Create an empty world with no behaviors.
    pub fn new(config: WorldConfig) -> Self {
        Self {
            config,
            accumulator: 0.0,
            bodies: hecs::World::new(),
            behaviors: Vec::new(),
            sink: None,
        }
    }

    pub fn config(&self) -> &WorldConfig {
        &self.config
    }

    pub fn bodies(&self) -> &hecs::World {
        &self.bodies
    }

    pub fn bodies_mut(&mut self) -> &mut hecs::World {
        &mut self.bodies
    }

    /// Initialize a behavior and insert it by priority.
    ///
    /// Behaviors of equal priority keep insertion order.
    pub fn add_behavior<B: Behavior + 'static>(
        &mut self,
        mut behavior: B,
    ) -> Result<(), PhysicsError> {
        behavior.init(&self.bodies)?;
        let priority = behavior.priority();
        let index = self
            .behaviors
            .iter()
            .position(|b| b.priority() < priority)
            .unwrap_or(self.behaviors.len());
        debug!(name = behavior.name(), priority, index, "behavior added");
        self.behaviors.insert(index, Box::new(behavior));
        Ok(())
    }

    /// Builder form of [`add_behavior`](Self::add_behavior).
    pub fn with_behavior<B: Behavior + 'static>(
        mut self,
        behavior: B,
    ) -> Result<Self, PhysicsError> {
        self.add_behavior(behavior)?;
        Ok(self)
    }

    /// Behavior names in execution order.
    pub fn behavior_names(&self) -> Vec<&'static str> {
        self.behaviors.iter().map(|b| b.name()).collect()
    }

    /// Route contact notifications to `sink`, returning the previous one.
    pub fn set_event_sink(
        &mut self,
        sink: impl EventSink + 'static,
    ) -> Option<Box<dyn EventSink>> {
        self.sink.replace(Box::new(sink))
    }

    /// Stop delivering notifications.
    pub fn clear_event_sink(&mut self) -> Option<Box<dyn EventSink>> {
        self.sink.take()
    }

    /// Run every behavior once with the given elapsed time.
    pub fn step(&mut self, dt: f32) -> StepReport {
        let mut report = StepReport::default();
        let mut discard = ();
        let events: &mut dyn EventSink = match self.sink.as_deref_mut() {
            Some(sink) => sink,
            None => &mut discard,
        };

        for behavior in &mut self.behaviors {
            report.merge(behavior.step(&mut self.bodies, dt, events));
        }
        report
    }

    /// Advance by `delta_time` seconds in fixed sub-steps.
    ///
    /// Returns the merged report of the sub-steps taken.
    pub fn advance(&mut self, delta_time: f64) -> StepReport {
        self.accumulator += delta_time;

        let mut report = StepReport::default();
        let mut substeps = 0u32;
        while self.accumulator >= self.config.fixed_timestep && substeps < self.config.max_substeps
        {
            report.merge(self.step(self.config.fixed_timestep as f32));
            self.accumulator -= self.config.fixed_timestep;
            substeps += 1;
        }

        // Clamp accumulator to avoid spiral of death
        if self.accumulator > self.config.fixed_timestep * self.config.max_substeps as f64 {
            self.accumulator = 0.0;
        }
        report
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::ecs::components::physics::{Geometry, RigidBody};
    use crate::ecs::components::transform::Transform2D;
    use glam::Vec2;
    use std::cell::RefCell;
    use std::rc::Rc;

    struct Named(&'static str, i32);

    impl Behavior for Named {
        fn name(&self) -> &'static str {
            self.0
        }

        fn priority(&self) -> i32 {
            self.1
        }

        fn step(&mut self, _: &mut hecs::World, _: f32, _: &mut dyn EventSink) -> StepReport {
            StepReport::default()
        }
    }

    fn bounce_world(friction: f32) -> SimulationWorld {
        let bounds = BoundaryRegion::from_size(100.0, 100.0).unwrap();
        SimulationWorld::new(WorldConfig::default())
            .with_behavior(
                EdgeBounce::new(EdgeBounceConfig::new().bounds(bounds).friction(friction))
                    .unwrap(),
            )
            .unwrap()
    }

    #[test]
    fn test_world_config_default() {
        let config = WorldConfig::default();
        assert!((config.fixed_timestep - 1.0 / 60.0).abs() < 1e-10);
        assert_eq!(config.max_substeps, 4);
    }

    #[test]
    fn test_behaviors_ordered_by_priority() {
        let bounds = BoundaryRegion::from_size(1.0, 1.0).unwrap();
        let edge_bounce = EdgeBounce::new(EdgeBounceConfig::new().bounds(bounds)).unwrap();
        let world = SimulationWorld::new(WorldConfig::default())
            .with_behavior(Named("low", 0))
            .unwrap()
            .with_behavior(edge_bounce)
            .unwrap()
            .with_behavior(Named("also-low", 0))
            .unwrap()
            .with_behavior(Integrator::default())
            .unwrap();

        assert_eq!(
            world.behavior_names(),
            vec!["integrator", "edge-bounce", "low", "also-low"]
        );
    }

    #[test]
    fn test_failed_init_does_not_register() {
        let mut world = SimulationWorld::new(WorldConfig::default());
        let err = world.add_behavior(Integrator::new(Vec2::new(f32::NAN, 0.0)));
        assert!(err.is_err());
        assert!(world.behavior_names().is_empty());
    }

    #[test]
    fn test_step_without_sink_still_resolves() {
        let mut world = bounce_world(0.0);
        let entity = world.bodies_mut().spawn((
            Transform2D::from_xy(99.0, 50.0),
            RigidBody::new(1.0, 1.0).with_velocity(Vec2::new(5.0, 0.0)),
            Geometry::Circle { radius: 2.0 },
        ));

        let report = world.step(1.0 / 60.0);

        assert_eq!(report.contacts, 1);
        let transform = world.bodies().get::<&Transform2D>(entity).unwrap();
        assert_eq!(transform.position.x, 98.0);
    }

    #[test]
    fn test_step_publishes_to_sink() {
        let mut world = bounce_world(0.0);
        let log = Rc::new(RefCell::new(EventLog::new()));
        assert!(world.set_event_sink(Rc::clone(&log)).is_none());

        let entity = world.bodies_mut().spawn((
            Transform2D::from_xy(1.0, 1.0),
            RigidBody::new(1.0, 1.0),
            Geometry::Circle { radius: 2.0 },
        ));

        world.step(1.0 / 60.0);

        let events = log.borrow_mut().drain();
        assert_eq!(events.len(), 2);
        assert!(events.iter().all(|e| e.body == entity));
        assert_eq!(events[0].edge, Edge::Left);
        assert_eq!(events[1].edge, Edge::Top);
        assert_eq!(events[0].point, Vec2::new(0.0, 1.0));
        assert_eq!(events[1].point, Vec2::new(2.0, 0.0));

        // Touching both edges again, but nothing is listening.
        assert!(world.clear_event_sink().is_some());
        world.step(1.0 / 60.0);
        assert!(log.borrow().is_empty());
    }

    #[test]
    fn test_report_collects_rejections() {
        let mut world = bounce_world(0.6);
        let bad = world.bodies_mut().spawn((
            Transform2D::from_xy(0.0, 50.0),
            RigidBody::new(1.0, 0.0),
            Geometry::Circle { radius: 1.0 },
        ));

        let report = world.step(1.0 / 60.0);

        assert_eq!(report.rejected, vec![(bad, BodyError::NonPositiveInertia(0.0))]);
        assert_eq!(report.contacts, 0);
    }

    #[test]
    fn test_advance_fixed_substeps() {
        let mut world = SimulationWorld::new(WorldConfig::default())
            .with_behavior(Integrator::default())
            .unwrap();
        let entity = world.bodies_mut().spawn((
            Transform2D::identity(),
            RigidBody::new(1.0, 1.0).with_velocity(Vec2::new(60.0, 0.0)),
        ));

        // Two and a half ticks of time: two sub-steps run, half a tick carries over.
        let report = world.advance(2.5 / 60.0);
        assert_eq!(report.bodies_visited, 2);
        let x = world.bodies().get::<&Transform2D>(entity).unwrap().position.x;
        assert!((x - 2.0).abs() < 1e-4, "x = {x}");

        let report = world.advance(1.0 / 60.0);
        assert_eq!(report.bodies_visited, 1);
    }

    #[test]
    fn test_advance_caps_substeps() {
        let mut world = SimulationWorld::new(WorldConfig::default())
            .with_behavior(Integrator::default())
            .unwrap();
        world.bodies_mut().spawn((Transform2D::identity(), RigidBody::new(1.0, 1.0)));

        let report = world.advance(1.0);
        assert_eq!(report.bodies_visited, 4);

        // Backlog was dropped rather than replayed.
        let report = world.advance(0.0);
        assert_eq!(report.bodies_visited, 0);
    }

    #[test]
    fn test_bouncing_stays_inside_bounds() {
        let bounds = BoundaryRegion::from_size(200.0, 150.0).unwrap();
        let mut world = SimulationWorld::new(WorldConfig::default())
            .with_behavior(Integrator::new(Vec2::new(0.0, 98.1)))
            .unwrap()
            .with_behavior(EdgeBounce::new(EdgeBounceConfig::new().bounds(bounds)).unwrap())
            .unwrap();

        for i in 0..20 {
            let radius = 2.0 + (i % 4) as f32;
            world.bodies_mut().spawn((
                Transform2D::from_xy(20.0 + i as f32 * 8.0, 30.0 + (i % 5) as f32 * 20.0),
                RigidBody::new_disc(1.0, radius)
                    .with_velocity(Vec2::new(40.0 - i as f32 * 4.0, -30.0 + i as f32 * 3.0))
                    .with_restitution(0.9),
                Geometry::Circle { radius },
            ));
        }

        let mut contacts = 0;
        for _ in 0..600 {
            contacts += world.step(1.0 / 60.0).contacts;
        }
        assert!(contacts > 0);

        for (_, (transform, rb, geometry)) in world
            .bodies_mut()
            .query_mut::<(&Transform2D, &RigidBody, &Geometry)>()
        {
            let Geometry::Circle { radius } = *geometry else {
                unreachable!()
            };
            let p = transform.position;
            assert!(p.x >= radius - 1e-3 && p.x <= 200.0 - radius + 1e-3, "x = {}", p.x);
            assert!(p.y >= radius - 1e-3 && p.y <= 150.0 - radius + 1e-3, "y = {}", p.y);
            assert!(rb.linear_velocity.is_finite());
        }
    }
}
