//! Scene setup shared by the benchmarks.

use glam::Vec2;
use rein_bounce::{
    BoundaryRegion, EdgeBounce, EdgeBounceConfig, Geometry, Integrator, RigidBody,
    SimulationWorld, Transform2D, WorldConfig,
};

/// Side length of the square benchmark arena.
pub const ARENA: f32 = 500.0;

pub fn arena() -> BoundaryRegion {
    BoundaryRegion::new(Vec2::ZERO, Vec2::splat(ARENA)).expect("arena bounds are valid")
}

/// Deterministic pseudo-random sequence in [0, 1).
fn lcg(state: &mut u32) -> f32 {
    *state = state.wrapping_mul(1_664_525).wrapping_add(1_013_904_223);
    (*state >> 8) as f32 / (1u32 << 24) as f32
}

/// Spawn `n` discs spread over the arena with random velocities.
pub fn spawn_discs(world: &mut hecs::World, n: usize, seed: u32) {
    let mut state = seed;
    for _ in 0..n {
        let radius = 2.0 + lcg(&mut state) * 6.0;
        let position = Vec2::new(lcg(&mut state), lcg(&mut state)) * ARENA;
        let velocity = (Vec2::new(lcg(&mut state), lcg(&mut state)) - 0.5) * 400.0;
        world.spawn((
            Transform2D::from_position(position),
            RigidBody::new_disc(1.0, radius)
                .with_velocity(velocity)
                .with_restitution(0.9),
            Geometry::Circle { radius },
        ));
    }
}

/// Spawn `n` discs that all overlap the bottom-right corner.
pub fn spawn_corner_discs(world: &mut hecs::World, n: usize) {
    for i in 0..n {
        let radius = 4.0;
        world.spawn((
            Transform2D::from_xy(ARENA - 1.0, ARENA - 1.0),
            RigidBody::new_disc(1.0, radius).with_velocity(Vec2::new(50.0, 30.0 + i as f32)),
            Geometry::Circle { radius },
        ));
    }
}

pub fn edge_bounce() -> EdgeBounce {
    EdgeBounce::new(EdgeBounceConfig::new().bounds(arena())).expect("edge bounce config")
}

/// World with an integrator, edge bounce and `n` discs.
pub fn setup_scene(n: usize) -> anyhow::Result<SimulationWorld> {
    let mut world = SimulationWorld::new(WorldConfig::default())
        .with_behavior(Integrator::new(Vec2::new(0.0, 98.1)))?
        .with_behavior(edge_bounce())?;
    spawn_discs(world.bodies_mut(), n, 0x5eed);
    Ok(world)
}
