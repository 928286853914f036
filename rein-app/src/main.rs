use std::cell::RefCell;
use std::rc::Rc;

use anyhow::Context;
use glam::Vec2;
use log::{info, warn};
use rein_bounce::{
    BoundaryRegion, Edge, EdgeBounce, EdgeBounceConfig, EventLog, Geometry, Integrator,
    RigidBody, SimulationWorld, Transform2D, WorldConfig,
};

const SECONDS: u32 = 5;
const BODIES: usize = 12;

fn spawn_discs(world: &mut hecs::World, bounds: &BoundaryRegion) {
    for i in 0..BODIES {
        let t = i as f32 / BODIES as f32;
        let radius = 4.0 + (i % 3) as f32 * 3.0;
        let position =
            bounds.min + Vec2::new(bounds.width() * (0.1 + 0.8 * t), bounds.height() * 0.3);
        world.spawn((
            Transform2D::from_position(position),
            RigidBody::new_disc(1.0 + t, radius)
                .with_velocity(Vec2::from_angle(t * std::f32::consts::TAU) * 150.0)
                .with_restitution(0.85),
            Geometry::Circle { radius },
        ));
    }

    // Not a circle: edge bounce leaves it alone
    world.spawn((
        Transform2D::from_position((bounds.min + bounds.max) * 0.5),
        RigidBody::new(1.0, 1.0),
        Geometry::Rectangle {
            half_extents: Vec2::splat(10.0),
        },
    ));
}

fn main() -> anyhow::Result<()> {
    env_logger::init();

    let bounds = BoundaryRegion::from_size(640.0, 480.0).context("arena bounds")?;
    let edge_bounce = EdgeBounce::new(EdgeBounceConfig::new().bounds(bounds).restitution(0.95))
        .context("edge bounce config")?;

    let mut world = SimulationWorld::new(WorldConfig::default())
        .with_behavior(Integrator::new(Vec2::new(0.0, 196.0)))?
        .with_behavior(edge_bounce)?;
    spawn_discs(world.bodies_mut(), &bounds);
    info!("behaviors: {:?}", world.behavior_names());

    let events = Rc::new(RefCell::new(EventLog::new()));
    world.set_event_sink(Rc::clone(&events));

    let mut per_edge = [0usize; 4];
    for frame in 0..SECONDS * 60 {
        let report = world.advance(1.0 / 60.0);
        for (entity, err) in &report.rejected {
            warn!("frame {frame}: rejected {entity:?}: {err}");
        }

        for event in events.borrow_mut().drain() {
            let slot = Edge::ORDER
                .iter()
                .position(|edge| *edge == event.edge)
                .unwrap_or_default();
            per_edge[slot] += 1;
            log::debug!(
                "frame {frame}: {} {:?} at ({:.1}, {:.1})",
                event.kind.as_str(),
                event.body,
                event.point.x,
                event.point.y
            );
        }
    }

    let escaped = world
        .bodies_mut()
        .query_mut::<(&Transform2D, &Geometry)>()
        .into_iter()
        .filter(|(_, (transform, geometry))| {
            matches!(geometry, Geometry::Circle { .. }) && !bounds.contains(transform.position)
        })
        .count();
    if escaped > 0 {
        warn!("{escaped} discs ended outside the arena");
    }

    for (edge, count) in Edge::ORDER.iter().zip(per_edge) {
        info!("{:>6}: {count} contacts", edge.name());
    }
    Ok(())
}
