//! Entity spawn factories for setting up the simulation world.
//!
//! Turns the generated static layout into collidable entities and creates
//! the player vehicle, pedestrians and AI traffic with their component
//! bundles.

use glam::Vec3;
use hecs::{Entity, World};
use rand_chacha::ChaCha8Rng;

use citydrive_agents::{pedestrian, traffic};
use citydrive_core::components::*;
use citydrive_core::constants::*;
use citydrive_core::enums::CollidableKind;
use citydrive_core::network::{RoadNetwork, SidewalkWaypoints};
use citydrive_core::types::{EntityHandle, Transform};
use citydrive_procgen::WorldLayout;

/// Hands out stable entity handles in spawn order.
#[derive(Debug, Default)]
pub struct HandleAllocator {
    next: u32,
}

impl HandleAllocator {
    pub fn allocate(&mut self) -> EntityHandle {
        let handle = EntityHandle(self.next);
        self.next += 1;
        handle
    }
}

/// Collidable entities in registration order. First match wins in every
/// sweep, so the order is part of the behavior.
pub type CollidableSet = Vec<(Entity, CollidableKind)>;

/// Spawn one entity per static collider of the layout and register it.
pub fn spawn_static_world(world: &mut World, layout: &WorldLayout, collidables: &mut CollidableSet) {
    for collider in &layout.static_colliders {
        let entity = world.spawn((
            Transform::new(collider.center, collider.yaw),
            Collider {
                half_extents: collider.half_extents,
            },
            Collidable {
                kind: collider.kind,
            },
        ));
        collidables.push((entity, collider.kind));
    }
}

/// Spawn the player's vehicle at the city center, facing +z.
pub fn spawn_player(world: &mut World, handles: &mut HandleAllocator) -> Entity {
    world.spawn((
        handles.allocate(),
        Transform::new(Vec3::new(0.0, PLAYER_HALF_EXTENTS.y, 0.0), 0.0),
        PlayerVehicle::default(),
        Collider {
            half_extents: PLAYER_HALF_EXTENTS,
        },
    ))
}

/// Spawn `count` pedestrians on random sidewalk waypoints.
pub fn spawn_pedestrians(
    world: &mut World,
    handles: &mut HandleAllocator,
    waypoints: &SidewalkWaypoints,
    rng: &mut ChaCha8Rng,
    count: u32,
) {
    for _ in 0..count {
        let Some((ped, transform)) = pedestrian::spawn(waypoints, rng) else {
            return;
        };
        spawn_pedestrian(world, handles, ped, transform);
    }
}

pub fn spawn_pedestrian(
    world: &mut World,
    handles: &mut HandleAllocator,
    ped: Pedestrian,
    transform: Transform,
) -> Entity {
    world.spawn((
        handles.allocate(),
        transform,
        ped,
        Collider {
            half_extents: PEDESTRIAN_HALF_EXTENTS,
        },
    ))
}

/// Spawn `count` AI vehicles on random lanes. Each is registered as a
/// collidable after the static world.
pub fn spawn_vehicles(
    world: &mut World,
    handles: &mut HandleAllocator,
    roads: &RoadNetwork,
    rng: &mut ChaCha8Rng,
    count: u32,
    collidables: &mut CollidableSet,
) {
    for _ in 0..count {
        let (vehicle, transform) = traffic::spawn(roads, rng);
        spawn_vehicle(world, handles, vehicle, transform, collidables);
    }
}

pub fn spawn_vehicle(
    world: &mut World,
    handles: &mut HandleAllocator,
    vehicle: AiVehicle,
    transform: Transform,
    collidables: &mut CollidableSet,
) -> Entity {
    let entity = world.spawn((
        handles.allocate(),
        transform,
        vehicle,
        Collider {
            half_extents: AI_VEHICLE_HALF_EXTENTS,
        },
        Collidable {
            kind: CollidableKind::AiVehicle,
        },
    ));
    collidables.push((entity, CollidableKind::AiVehicle));
    entity
}
