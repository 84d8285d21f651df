//! Collision and resolution.
//!
//! Two sweeps per frame over boxes recomputed from the current transforms:
//! missiles against collidables then pedestrians, and the player vehicle
//! against the world edge, collidables and pedestrians. Every sweep stops at
//! the first match in registration order; there is no closest-hit search
//! and no spatial index.
//!
//! This is the only place agent states are flipped to hit and the only
//! place player movement is rolled back.

use glam::Vec3;
use hecs::{Entity, World};
use tracing::debug;

use citydrive_agents::{pedestrian, traffic};
use citydrive_core::components::*;
use citydrive_core::constants::*;
use citydrive_core::enums::{CollidableKind, PedestrianState, VehicleState};
use citydrive_core::events::SimEvent;
use citydrive_core::types::{Aabb, EntityHandle, Transform};

use crate::events::EventBus;
use crate::systems::explosion;
use crate::systems::player::PlayerStep;
use crate::world_setup::{CollidableSet, HandleAllocator};

/// Shared frame state the collision passes write to.
pub struct Resolution<'a> {
    pub handles: &'a mut HandleAllocator,
    pub events: &'a mut EventBus,
    pub score: &'a mut u32,
    pub despawn_buffer: &'a mut Vec<Entity>,
}

impl Resolution<'_> {
    fn award_hit(&mut self) {
        *self.score += 1;
        self.events.emit(SimEvent::ScoreChanged {
            new_score: *self.score,
        });
    }
}

/// World box of an entity with a transform and a collider.
fn world_box(world: &World, entity: Entity) -> Option<Aabb> {
    let mut query = world.query_one::<(&Transform, &Collider)>(entity).ok()?;
    let (transform, collider) = query.get()?;
    Some(Aabb::from_oriented(transform.position, collider.half_extents, transform.yaw))
}

/// First registered collidable hit by `probe`. Hit AI vehicles are skipped
/// when `skip_wrecks` is set.
fn first_collidable(world: &World, collidables: &CollidableSet, probe: &Aabb, skip_wrecks: bool) -> Option<(Entity, CollidableKind)> {
    for &(entity, kind) in collidables {
        let Some(bounds) = world_box(world, entity) else {
            debug_assert!(!world.contains(entity), "collidable {entity:?} lost its collider");
            continue;
        };
        if skip_wrecks && kind == CollidableKind::AiVehicle && is_wreck(world, entity) {
            continue;
        }
        if probe.intersects(&bounds) {
            return Some((entity, kind));
        }
    }
    None
}

fn is_wreck(world: &World, entity: Entity) -> bool {
    world
        .get::<&AiVehicle>(entity)
        .map(|v| v.state == VehicleState::Hit)
        .unwrap_or(false)
}

/// Standing pedestrians in spawn order.
fn standing_pedestrians(world: &World) -> Vec<(Entity, Vec3, Aabb)> {
    let mut found: Vec<(EntityHandle, Entity, Vec3, Aabb)> = world
        .query::<(&EntityHandle, &Pedestrian, &Transform, &Collider)>()
        .iter()
        .filter(|(_, (_, ped, _, _))| ped.state != PedestrianState::Hit)
        .map(|(entity, (handle, _, transform, collider))| {
            (
                *handle,
                entity,
                transform.position,
                Aabb::from_oriented(transform.position, collider.half_extents, transform.yaw),
            )
        })
        .collect();
    found.sort_by_key(|(handle, ..)| *handle);
    found
        .into_iter()
        .map(|(_, entity, position, bounds)| (entity, position, bounds))
        .collect()
}

fn knock_down_pedestrian(world: &mut World, entity: Entity, push: Vec3) {
    if let Ok(mut ped) = world.get::<&mut Pedestrian>(entity) {
        pedestrian::knock_down(&mut ped, push);
    }
}

/// Resolve missiles: hits on collidables, then pedestrians, then expiry.
/// A missile ends on its first hit, so it scores at most once.
pub fn run_projectiles(world: &mut World, collidables: &CollidableSet, res: &mut Resolution<'_>) {
    let mut missiles: Vec<(EntityHandle, Entity, Vec3, Vec3, f32, Aabb)> = world
        .query::<(&EntityHandle, &Missile, &Transform, &Collider)>()
        .iter()
        .map(|(entity, (handle, missile, transform, collider))| {
            (
                *handle,
                entity,
                transform.position,
                missile.velocity,
                missile.lifetime,
                Aabb::from_oriented(transform.position, collider.half_extents, transform.yaw),
            )
        })
        .collect();
    missiles.sort_by_key(|(handle, ..)| *handle);

    for (handle, entity, position, velocity, lifetime, bounds) in missiles {
        if let Some((target, kind)) = first_collidable(world, collidables, &bounds, false) {
            if kind == CollidableKind::AiVehicle {
                strike_vehicle(world, target, velocity, res);
            }
            debug!(missile = handle.0, ?kind, "missile hit collidable");
            explosion::spawn(world, res.handles, position, res.events);
            res.despawn_buffer.push(entity);
            continue;
        }

        let struck = standing_pedestrians(world)
            .into_iter()
            .find(|(_, _, ped_bounds)| bounds.intersects(ped_bounds));
        if let Some((target, ped_position, _)) = struck {
            let push = (ped_position - position).normalize_or_zero() * MISSILE_PEDESTRIAN_PUSH
                + Vec3::Y * PEDESTRIAN_HIT_LIFT;
            knock_down_pedestrian(world, target, push);
            res.events.emit(SimEvent::PedestrianHit {
                position: ped_position,
            });
            res.award_hit();
            debug!(missile = handle.0, "missile hit pedestrian");
            explosion::spawn(world, res.handles, position, res.events);
            res.despawn_buffer.push(entity);
            continue;
        }

        if lifetime <= 0.0 {
            debug!(missile = handle.0, "missile expired");
            explosion::spawn(world, res.handles, position, res.events);
            res.despawn_buffer.push(entity);
        }
    }
}

/// A missile striking a driving vehicle knocks it away and scores. Wrecks
/// absorb the missile without scoring.
fn strike_vehicle(world: &mut World, target: Entity, missile_velocity: Vec3, res: &mut Resolution<'_>) {
    let struck_at = {
        let Ok((vehicle, transform)) = world.query_one_mut::<(&mut AiVehicle, &Transform)>(target) else {
            return;
        };
        if vehicle.state != VehicleState::Driving {
            return;
        }
        let push = missile_velocity.normalize_or_zero() * MISSILE_VEHICLE_PUSH + Vec3::Y * VEHICLE_HIT_LIFT;
        traffic::knock_away(vehicle, push);
        transform.position
    };
    res.events.emit(SimEvent::VehicleHit { position: struck_at });
    res.award_hit();
}

/// Resolve the player vehicle: world edge, collidables, then pedestrians.
pub fn run_player(
    world: &mut World,
    step: PlayerStep,
    collidables: &CollidableSet,
    world_half_extent: f32,
    res: &mut Resolution<'_>,
) {
    let limit = world_half_extent - WORLD_EDGE_MARGIN;
    let Ok((transform, vehicle, collider)) =
        world.query_one_mut::<(&mut Transform, &mut PlayerVehicle, &Collider)>(step.entity)
    else {
        return;
    };
    if transform.position.x.abs() > limit || transform.position.z.abs() > limit {
        transform.position = step.previous_position;
        vehicle.speed = 0.0;
    }
    let bounds = Aabb::from_oriented(transform.position, collider.half_extents, transform.yaw);

    if first_collidable(world, collidables, &bounds, true).is_some() {
        rollback(world, step, |speed| *speed = 0.0);
    }

    let struck = standing_pedestrians(world)
        .into_iter()
        .find(|(_, _, ped_bounds)| bounds.intersects(ped_bounds));
    let Some((target, ped_position, _)) = struck else {
        return;
    };

    let (player_position, speed) = match world.query_one_mut::<(&Transform, &PlayerVehicle)>(step.entity) {
        Ok((transform, vehicle)) => (transform.position, vehicle.speed),
        Err(_) => return,
    };
    let push = (ped_position - player_position).normalize_or_zero() * (speed.abs() * 2.0 + RAM_BASE_PUSH)
        + Vec3::Y * PEDESTRIAN_HIT_LIFT;
    knock_down_pedestrian(world, target, push);
    res.events.emit(SimEvent::PedestrianHit {
        position: ped_position,
    });
    res.award_hit();
    debug!(speed, "player ran down pedestrian");

    rollback(world, step, |speed| *speed *= PEDESTRIAN_BOUNCE_FACTOR);
}

fn rollback(world: &mut World, step: PlayerStep, adjust_speed: impl FnOnce(&mut f32)) {
    if let Ok((transform, vehicle)) = world.query_one_mut::<(&mut Transform, &mut PlayerVehicle)>(step.entity) {
        transform.position = step.previous_position;
        adjust_speed(&mut vehicle.speed);
    }
}
