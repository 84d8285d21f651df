//! Player controller: turns drive intents into vehicle kinematics.

use glam::Vec3;
use hecs::{Entity, World};

use citydrive_core::commands::DriveIntents;
use citydrive_core::components::PlayerVehicle;
use citydrive_core::constants::*;
use citydrive_core::types::Transform;

/// Where the player was before this frame's move. The collision pass rolls
/// back to it.
#[derive(Debug, Clone, Copy)]
pub struct PlayerStep {
    pub entity: Entity,
    pub previous_position: Vec3,
}

/// Tick the fire cooldown, apply intents and integrate position.
pub fn run(world: &mut World, player: Entity, intents: &DriveIntents, delta_secs: f32) -> Option<PlayerStep> {
    let (transform, vehicle) = world
        .query_one_mut::<(&mut Transform, &mut PlayerVehicle)>(player)
        .ok()?;

    vehicle.fire_cooldown = (vehicle.fire_cooldown - delta_secs).max(0.0);
    vehicle.speed = next_speed(vehicle.speed, intents);
    transform.yaw += steering(vehicle.speed, intents);

    let previous_position = transform.position;
    transform.position += transform.forward() * vehicle.speed;

    Some(PlayerStep {
        entity: player,
        previous_position,
    })
}

/// Accelerate, brake/reverse or coast. Coasting never crosses zero.
pub fn next_speed(speed: f32, intents: &DriveIntents) -> f32 {
    if intents.forward {
        (speed + PLAYER_ACCELERATION).min(PLAYER_MAX_SPEED)
    } else if intents.backward {
        (speed - PLAYER_ACCELERATION).max(-PLAYER_MAX_SPEED / 2.0)
    } else if speed > 0.0 {
        (speed - PLAYER_FRICTION).max(0.0)
    } else if speed < 0.0 {
        (speed + PLAYER_FRICTION).min(0.0)
    } else {
        0.0
    }
}

/// Heading change for this frame. Steering is mirrored in reverse so it
/// follows the direction of travel.
pub fn steering(speed: f32, intents: &DriveIntents) -> f32 {
    if speed.abs() <= PLAYER_MIN_TURN_SPEED {
        return 0.0;
    }
    let direction = speed.signum();
    let mut turn = 0.0;
    if intents.turn_left {
        turn += PLAYER_TURN_RATE * direction;
    }
    if intents.turn_right {
        turn -= PLAYER_TURN_RATE * direction;
    }
    turn
}
