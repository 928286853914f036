//! Rein 2D edge bounce
//!
//! Impulse-based collision response between circular rigid bodies and the
//! inside of an axis-aligned rectangle, packaged as a simulation behavior.
//!
//! # Architecture
//!
//! The library is organized into layers:
//!
//! 1. **ecs** - Body components stored in a hecs `World` (transform, rigid body, geometry)
//! 2. **physics** - Boundary, contact impulse solver, behaviors and the simulation world
//! 3. **error** - Configuration and per-body precondition errors
//!
//! # Conventions
//!
//! Screen coordinates: y grows downward, so the "bottom" edge of a
//! [`BoundaryRegion`] is `max.y` and the "top" edge is `min.y`.

pub mod ecs;
pub mod error;
pub mod physics;

// Re-export commonly used types
pub use ecs::prelude::*;

pub use error::{BodyError, PhysicsError};

pub use physics::contact::EventSink;
pub use physics::{
    apply_impulse, Behavior, BoundaryRegion, ContactEvent, ContactFrame, ContactImpulse,
    ContactKind, EdgeBounce, EdgeBounceConfig, Edge, EventLog, Integrator, SimulationWorld,
    StepReport, WorldConfig, DEFAULT_FRICTION,
};

// Re-export glam and hecs for convenience
pub use glam;
pub use hecs;
