//! Snapshot system: queries the ECS world and builds a complete SceneSnapshot.
//!
//! This system is read-only and never modifies the world.

use hecs::{Entity, World};

use citydrive_agents::pedestrian;
use citydrive_core::components::*;
use citydrive_core::events::SimEvent;
use citydrive_core::state::*;
use citydrive_core::types::{ChaseCamera, EntityHandle, SimTime, Transform};

use crate::systems::explosion;

/// Build a complete SceneSnapshot from the current world state.
pub fn build_snapshot(
    world: &World,
    player: Entity,
    time: &SimTime,
    score: u32,
    camera: &ChaseCamera,
    events: Vec<SimEvent>,
) -> SceneSnapshot {
    SceneSnapshot {
        time: *time,
        score,
        player: build_player(world, player),
        camera: *camera,
        pedestrians: build_pedestrians(world),
        vehicles: build_vehicles(world),
        missiles: build_missiles(world),
        explosions: build_explosions(world),
        events,
    }
}

fn build_player(world: &World, player: Entity) -> PlayerView {
    world
        .query_one::<(&EntityHandle, &Transform, &PlayerVehicle)>(player)
        .ok()
        .and_then(|mut query| {
            query.get().map(|(handle, transform, vehicle)| PlayerView {
                handle: *handle,
                transform: *transform,
                speed: vehicle.speed,
                fire_cooldown: vehicle.fire_cooldown,
            })
        })
        .unwrap_or_default()
}

fn build_pedestrians(world: &World) -> Vec<PedestrianView> {
    let mut views: Vec<PedestrianView> = world
        .query::<(&EntityHandle, &Transform, &Pedestrian)>()
        .iter()
        .map(|(_, (handle, transform, ped))| PedestrianView {
            handle: *handle,
            transform: *transform,
            state: ped.state,
            limb_swing: pedestrian::limb_swing(ped),
        })
        .collect();

    views.sort_by_key(|v| v.handle);
    views
}

fn build_vehicles(world: &World) -> Vec<VehicleView> {
    let mut views: Vec<VehicleView> = world
        .query::<(&EntityHandle, &Transform, &AiVehicle)>()
        .iter()
        .map(|(_, (handle, transform, vehicle))| VehicleView {
            handle: *handle,
            transform: *transform,
            state: vehicle.state,
            is_turning: vehicle.is_turning,
        })
        .collect();

    views.sort_by_key(|v| v.handle);
    views
}

fn build_missiles(world: &World) -> Vec<MissileView> {
    let mut views: Vec<MissileView> = world
        .query::<(&EntityHandle, &Transform, &Missile)>()
        .iter()
        .map(|(_, (handle, transform, missile))| MissileView {
            handle: *handle,
            transform: *transform,
            lifetime: missile.lifetime,
        })
        .collect();

    views.sort_by_key(|v| v.handle);
    views
}

fn build_explosions(world: &World) -> Vec<ExplosionView> {
    let mut views: Vec<ExplosionView> = world
        .query::<(&EntityHandle, &Transform, &Explosion)>()
        .iter()
        .map(|(_, (handle, transform, boom))| {
            let (scale, opacity) = explosion::visuals(boom);
            ExplosionView {
                handle: *handle,
                position: transform.position,
                scale,
                opacity,
            }
        })
        .collect();

    views.sort_by_key(|v| v.handle);
    views
}
