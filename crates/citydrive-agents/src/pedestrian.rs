//! Pedestrian state machine.
//!
//! Idle pedestrians wait out a timer, walkers head for a sidewalk waypoint
//! and freeze when the player drives close, and hit pedestrians tumble until
//! they fall out of the world or out of range, then reappear on a sidewalk.
//! No ECS dependency: operates on plain data.

use glam::Vec3;
use rand::seq::SliceRandom;
use rand::Rng;

use citydrive_core::components::Pedestrian;
use citydrive_core::constants::*;
use citydrive_core::enums::PedestrianState;
use citydrive_core::network::SidewalkWaypoints;
use citydrive_core::types::Transform;

/// Input to the pedestrian FSM for a single frame.
pub struct PedestrianContext<'a> {
    pub player_position: Vec3,
    pub waypoints: &'a SidewalkWaypoints,
    pub delta_secs: f32,
}

/// Output from the pedestrian FSM.
#[derive(Debug, Clone, Copy)]
pub struct PedestrianUpdate {
    pub pedestrian: Pedestrian,
    pub transform: Transform,
    pub state_changed: bool,
    /// The pedestrian left the hit state by being teleported to a sidewalk.
    pub recycled: bool,
}

/// Evaluate one frame of behavior for one pedestrian.
pub fn evaluate<R: Rng>(
    pedestrian: &Pedestrian,
    transform: &Transform,
    ctx: &PedestrianContext,
    rng: &mut R,
) -> PedestrianUpdate {
    match pedestrian.state {
        PedestrianState::Idle => evaluate_idle(pedestrian, transform, ctx, rng),
        PedestrianState::Walking => evaluate_walking(pedestrian, transform, ctx, rng),
        PedestrianState::Hit => evaluate_hit(pedestrian, transform, ctx, rng),
    }
}

fn evaluate_idle<R: Rng>(
    pedestrian: &Pedestrian,
    transform: &Transform,
    ctx: &PedestrianContext,
    rng: &mut R,
) -> PedestrianUpdate {
    let mut next = *pedestrian;
    let mut pose = *transform;
    next.idle_timer -= ctx.delta_secs;

    if next.idle_timer > 0.0 {
        return PedestrianUpdate {
            pedestrian: next,
            transform: pose,
            state_changed: false,
            recycled: false,
        };
    }

    next.state = PedestrianState::Walking;
    next.idle_timer = 0.0;
    next.animation_phase = 0.0;
    next.destination = choose_waypoint(ctx.waypoints, rng).unwrap_or(pose.position);
    pose.position.y = next.base_y;

    PedestrianUpdate {
        pedestrian: next,
        transform: pose,
        state_changed: true,
        recycled: false,
    }
}

fn evaluate_walking<R: Rng>(
    pedestrian: &Pedestrian,
    transform: &Transform,
    ctx: &PedestrianContext,
    rng: &mut R,
) -> PedestrianUpdate {
    let mut next = *pedestrian;
    let mut pose = *transform;

    // Stand still while the player is close; still logically walking.
    if pose.position.distance(ctx.player_position) < PEDESTRIAN_AVOID_RADIUS {
        return PedestrianUpdate {
            pedestrian: next,
            transform: pose,
            state_changed: false,
            recycled: false,
        };
    }

    let to_destination = Vec3::new(
        next.destination.x - pose.position.x,
        0.0,
        next.destination.z - pose.position.z,
    );

    if to_destination.length() < PEDESTRIAN_ARRIVAL_RADIUS {
        next.state = PedestrianState::Idle;
        next.idle_timer = rng.gen_range(PEDESTRIAN_IDLE_MIN_SECS..=PEDESTRIAN_IDLE_MAX_SECS);
        next.animation_phase = 0.0;
        pose.position.y = next.base_y;
        return PedestrianUpdate {
            pedestrian: next,
            transform: pose,
            state_changed: true,
            recycled: false,
        };
    }

    let direction = to_destination.normalize();
    pose.position += direction * next.speed;
    pose.yaw = direction.x.atan2(direction.z);
    next.animation_phase += PEDESTRIAN_WALK_CYCLE_RATE;
    pose.position.y = next.base_y + next.animation_phase.sin().abs() * PEDESTRIAN_BOB_HEIGHT;

    PedestrianUpdate {
        pedestrian: next,
        transform: pose,
        state_changed: false,
        recycled: false,
    }
}

fn evaluate_hit<R: Rng>(
    pedestrian: &Pedestrian,
    transform: &Transform,
    ctx: &PedestrianContext,
    rng: &mut R,
) -> PedestrianUpdate {
    let mut next = *pedestrian;
    let mut pose = *transform;

    pose.position += next.hit_velocity;
    next.hit_velocity.y -= PEDESTRIAN_GRAVITY;
    pose.pitch += PEDESTRIAN_TUMBLE_RATE;
    pose.roll += PEDESTRIAN_TUMBLE_RATE;

    let fell_out = pose.position.y < RECYCLE_FLOOR_Y;
    let out_of_range = pose.position.distance(ctx.player_position) > HIT_DESPAWN_DISTANCE;
    if !(fell_out || out_of_range) {
        return PedestrianUpdate {
            pedestrian: next,
            transform: pose,
            state_changed: false,
            recycled: false,
        };
    }

    let spot = choose_waypoint(ctx.waypoints, rng).unwrap_or(Vec3::ZERO);
    next.state = PedestrianState::Idle;
    next.hit_velocity = Vec3::ZERO;
    next.animation_phase = 0.0;
    next.destination = spot;
    next.idle_timer = rng.gen_range(PEDESTRIAN_IDLE_MIN_SECS..=PEDESTRIAN_IDLE_MAX_SECS);
    pose = Transform::new(Vec3::new(spot.x, next.base_y, spot.z), 0.0);

    PedestrianUpdate {
        pedestrian: next,
        transform: pose,
        state_changed: true,
        recycled: true,
    }
}

/// Put a pedestrian into the hit state, knocked along `push`.
pub fn knock_down(pedestrian: &mut Pedestrian, push: Vec3) {
    pedestrian.state = PedestrianState::Hit;
    pedestrian.hit_velocity = push;
    pedestrian.animation_phase = 0.0;
}

/// A fresh idle pedestrian standing on a random waypoint.
pub fn spawn<R: Rng>(waypoints: &SidewalkWaypoints, rng: &mut R) -> Option<(Pedestrian, Transform)> {
    let spot = choose_waypoint(waypoints, rng)?;
    let pedestrian = Pedestrian {
        state: PedestrianState::Idle,
        speed: rng.gen_range(PEDESTRIAN_SPEED_MIN..=PEDESTRIAN_SPEED_MAX),
        destination: spot,
        idle_timer: rng.gen_range(0.0..PEDESTRIAN_INITIAL_IDLE_MAX_SECS),
        animation_phase: 0.0,
        hit_velocity: Vec3::ZERO,
        base_y: PEDESTRIAN_BASE_Y,
    };
    let transform = Transform::new(Vec3::new(spot.x, PEDESTRIAN_BASE_Y, spot.z), 0.0);
    Some((pedestrian, transform))
}

/// Arm and leg swing angle for the current walk cycle.
pub fn limb_swing(pedestrian: &Pedestrian) -> f32 {
    match pedestrian.state {
        PedestrianState::Walking => pedestrian.animation_phase.sin() * PEDESTRIAN_LIMB_SWING,
        PedestrianState::Idle | PedestrianState::Hit => 0.0,
    }
}

fn choose_waypoint<R: Rng>(waypoints: &SidewalkWaypoints, rng: &mut R) -> Option<Vec3> {
    waypoints.points.choose(rng).copied()
}
