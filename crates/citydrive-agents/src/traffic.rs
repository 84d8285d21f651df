//! AI traffic state machine.
//!
//! Driving vehicles follow road center lines, pick a turn when they enter
//! an intersection and wrap around at the city edge. Hit vehicles fly off
//! ballistically and are put back on a random lane once they fall out of
//! the world or out of the player's range.

use std::f32::consts::{FRAC_PI_2, PI};

use glam::Vec3;
use rand::seq::SliceRandom;
use rand::Rng;

use citydrive_core::components::AiVehicle;
use citydrive_core::constants::*;
use citydrive_core::enums::{TurnChoice, VehicleState};
use citydrive_core::network::RoadNetwork;
use citydrive_core::types::{heading_vector, Transform};

/// Input to the traffic FSM for a single frame.
pub struct TrafficContext<'a> {
    pub roads: &'a RoadNetwork,
    /// Vehicles crossing this coordinate on either axis wrap to the far side.
    pub wrap_extent: f32,
    pub player_position: Vec3,
}

/// Output from the traffic FSM.
#[derive(Debug, Clone, Copy)]
pub struct VehicleUpdate {
    pub vehicle: AiVehicle,
    pub transform: Transform,
    /// Turn drawn on entering an intersection this frame.
    pub turn: Option<TurnChoice>,
    /// The vehicle left the hit state by being placed on a fresh lane.
    pub recycled: bool,
}

/// Evaluate one frame of behavior for one AI vehicle.
pub fn evaluate<R: Rng>(
    vehicle: &AiVehicle,
    transform: &Transform,
    ctx: &TrafficContext,
    rng: &mut R,
) -> VehicleUpdate {
    match vehicle.state {
        VehicleState::Driving => evaluate_driving(vehicle, transform, ctx, rng),
        VehicleState::Hit => evaluate_hit(vehicle, transform, ctx, rng),
    }
}

fn evaluate_driving<R: Rng>(
    vehicle: &AiVehicle,
    transform: &Transform,
    ctx: &TrafficContext,
    rng: &mut R,
) -> VehicleUpdate {
    let mut next = *vehicle;
    let mut pose = *transform;
    let mut turn = None;

    let in_intersection = ctx
        .roads
        .intersection_near(pose.position, INTERSECTION_RADIUS)
        .is_some();
    if in_intersection && !next.is_turning {
        next.is_turning = true;
        let choice = draw_turn(rng);
        next.target_angle += turn_angle(choice);
        turn = Some(choice);
    } else if !in_intersection {
        next.is_turning = false;
    }

    pose.yaw += (next.target_angle - pose.yaw) * TURN_LERP;
    if (next.target_angle - pose.yaw).abs() < TURN_SNAP_THRESHOLD {
        pose.yaw = next.target_angle;
        next.velocity = heading_vector(next.target_angle) * next.speed;
    }

    pose.position += next.velocity;
    pose.position.x = wrap(pose.position.x, ctx.wrap_extent);
    pose.position.z = wrap(pose.position.z, ctx.wrap_extent);

    VehicleUpdate {
        vehicle: next,
        transform: pose,
        turn,
        recycled: false,
    }
}

fn evaluate_hit<R: Rng>(
    vehicle: &AiVehicle,
    transform: &Transform,
    ctx: &TrafficContext,
    rng: &mut R,
) -> VehicleUpdate {
    let mut next = *vehicle;
    let mut pose = *transform;

    pose.position += next.hit_velocity;
    next.hit_velocity.y -= VEHICLE_GRAVITY;
    let tumble = Vec3::new(next.hit_velocity.x, 0.0, next.hit_velocity.z).length() * VEHICLE_TUMBLE_FACTOR;
    pose.pitch += tumble;
    pose.roll += tumble;

    let fell_out = pose.position.y < RECYCLE_FLOOR_Y;
    let out_of_range = pose.position.distance(ctx.player_position) > HIT_DESPAWN_DISTANCE;
    if !(fell_out || out_of_range) {
        return VehicleUpdate {
            vehicle: next,
            transform: pose,
            turn: None,
            recycled: false,
        };
    }

    let (driving, placed) = place_on_lane(next.speed, ctx.roads, rng);
    VehicleUpdate {
        vehicle: driving,
        transform: placed,
        turn: None,
        recycled: true,
    }
}

/// 25% left, 25% right, otherwise straight on.
pub fn draw_turn<R: Rng>(rng: &mut R) -> TurnChoice {
    let roll: f32 = rng.gen();
    if roll < TURN_LEFT_PROBABILITY {
        TurnChoice::Left
    } else if roll < TURN_LEFT_PROBABILITY + TURN_RIGHT_PROBABILITY {
        TurnChoice::Right
    } else {
        TurnChoice::Straight
    }
}

/// Heading change for a turn choice (radians).
pub fn turn_angle(choice: TurnChoice) -> f32 {
    match choice {
        TurnChoice::Left => FRAC_PI_2,
        TurnChoice::Right => -FRAC_PI_2,
        TurnChoice::Straight => 0.0,
    }
}

/// Put a vehicle into ballistic flight along `push`.
pub fn knock_away(vehicle: &mut AiVehicle, push: Vec3) {
    vehicle.state = VehicleState::Hit;
    vehicle.hit_velocity = push;
    vehicle.is_turning = false;
}

/// A fresh driving vehicle on a random lane.
pub fn spawn<R: Rng>(roads: &RoadNetwork, rng: &mut R) -> (AiVehicle, Transform) {
    let speed = rng.gen_range(AI_VEHICLE_SPEED_MIN..=AI_VEHICLE_SPEED_MAX);
    place_on_lane(speed, roads, rng)
}

/// Pick a road center line, a point on it clear of the player start and a
/// heading along the road.
fn place_on_lane<R: Rng>(speed: f32, roads: &RoadNetwork, rng: &mut R) -> (AiVehicle, Transform) {
    const MAX_ATTEMPTS: usize = 16;

    let mut position = Vec3::new(0.0, AI_VEHICLE_HALF_EXTENTS.y, 0.0);
    let mut yaw = 0.0;
    for _ in 0..MAX_ATTEMPTS {
        let along_z = rng.gen_bool(0.5);
        let (lines, span) = if along_z {
            (&roads.x_lines, &roads.z_lines)
        } else {
            (&roads.z_lines, &roads.x_lines)
        };
        let (Some(&line), Some(&lo), Some(&hi)) = (lines.choose(rng), span.first(), span.last()) else {
            break;
        };
        let along = rng.gen_range(lo..=hi);
        let reverse = rng.gen_bool(0.5);

        if along_z {
            position = Vec3::new(line, AI_VEHICLE_HALF_EXTENTS.y, along);
            yaw = if reverse { PI } else { 0.0 };
        } else {
            position = Vec3::new(along, AI_VEHICLE_HALF_EXTENTS.y, line);
            yaw = if reverse { -FRAC_PI_2 } else { FRAC_PI_2 };
        }

        if Vec3::new(position.x, 0.0, position.z).length() >= AI_VEHICLE_SPAWN_CLEARANCE {
            break;
        }
    }

    let vehicle = AiVehicle {
        state: VehicleState::Driving,
        velocity: heading_vector(yaw) * speed,
        speed,
        target_angle: yaw,
        is_turning: false,
        hit_velocity: Vec3::ZERO,
    };
    (vehicle, Transform::new(position, yaw))
}

fn wrap(value: f32, extent: f32) -> f32 {
    if value > extent {
        -extent
    } else if value < -extent {
        extent
    } else {
        value
    }
}
