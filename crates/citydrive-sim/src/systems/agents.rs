//! Agent systems: run the pedestrian and traffic state machines from
//! citydrive-agents and write the results back into the ECS world.

use glam::Vec3;
use hecs::{Entity, World};
use rand_chacha::ChaCha8Rng;
use tracing::debug;

use citydrive_agents::pedestrian::{self, PedestrianContext, PedestrianUpdate};
use citydrive_agents::traffic::{self, TrafficContext, VehicleUpdate};
use citydrive_core::components::{AiVehicle, Pedestrian};
use citydrive_core::network::{RoadNetwork, SidewalkWaypoints};
use citydrive_core::types::{EntityHandle, Transform};

/// Run the pedestrian FSM for every pedestrian.
pub fn run_pedestrians(
    world: &mut World,
    waypoints: &SidewalkWaypoints,
    player_position: Vec3,
    delta_secs: f32,
    rng: &mut ChaCha8Rng,
) {
    let ctx = PedestrianContext {
        player_position,
        waypoints,
        delta_secs,
    };

    // Collect updates in a buffer to avoid borrow issues with hecs
    let mut updates: Vec<(Entity, EntityHandle, PedestrianUpdate)> = Vec::new();
    {
        let mut query = world.query::<(&EntityHandle, &Pedestrian, &Transform)>();
        for (entity, (handle, ped, transform)) in query.iter() {
            updates.push((entity, *handle, pedestrian::evaluate(ped, transform, &ctx, rng)));
        }
    }

    for (entity, handle, update) in updates {
        if update.recycled {
            debug!(handle = handle.0, position = ?update.transform.position, "pedestrian recycled");
        }
        if let Ok((ped, transform)) = world.query_one_mut::<(&mut Pedestrian, &mut Transform)>(entity) {
            *ped = update.pedestrian;
            *transform = update.transform;
        }
    }
}

/// Run the traffic FSM for every AI vehicle.
pub fn run_traffic(
    world: &mut World,
    roads: &RoadNetwork,
    wrap_extent: f32,
    player_position: Vec3,
    rng: &mut ChaCha8Rng,
) {
    let ctx = TrafficContext {
        roads,
        wrap_extent,
        player_position,
    };

    let mut updates: Vec<(Entity, EntityHandle, VehicleUpdate)> = Vec::new();
    {
        let mut query = world.query::<(&EntityHandle, &AiVehicle, &Transform)>();
        for (entity, (handle, vehicle, transform)) in query.iter() {
            updates.push((entity, *handle, traffic::evaluate(vehicle, transform, &ctx, rng)));
        }
    }

    for (entity, handle, update) in updates {
        if update.recycled {
            debug!(handle = handle.0, position = ?update.transform.position, "vehicle recycled");
        }
        if let Ok((vehicle, transform)) = world.query_one_mut::<(&mut AiVehicle, &mut Transform)>(entity) {
            *vehicle = update.vehicle;
            *transform = update.transform;
        }
    }
}
