//! Missile launch and flight.

use hecs::{Entity, World};

use citydrive_core::components::{Collider, Missile, PlayerVehicle};
use citydrive_core::constants::*;
use citydrive_core::events::SimEvent;
use citydrive_core::types::Transform;

use crate::events::EventBus;
use crate::world_setup::HandleAllocator;

/// Launch a missile from the player vehicle unless the launcher is cooling
/// down. Returns the new missile.
pub fn fire(
    world: &mut World,
    player: Entity,
    handles: &mut HandleAllocator,
    events: &mut EventBus,
) -> Option<Entity> {
    let (launch, velocity) = {
        let (transform, vehicle) = world
            .query_one_mut::<(&Transform, &mut PlayerVehicle)>(player)
            .ok()?;
        if vehicle.fire_cooldown > 0.0 {
            return None;
        }
        vehicle.fire_cooldown = FIRE_COOLDOWN_SECS;

        let launch = Transform::new(transform.local_to_world(MISSILE_SPAWN_OFFSET), transform.yaw);
        let velocity = transform.forward() * (MISSILE_BASE_SPEED + vehicle.speed);
        (launch, velocity)
    };

    let missile = world.spawn((
        handles.allocate(),
        launch,
        Missile {
            velocity,
            lifetime: MISSILE_LIFETIME_SECS,
        },
        Collider {
            half_extents: MISSILE_HALF_EXTENTS,
        },
    ));
    events.emit(SimEvent::MissileFired {
        position: launch.position,
    });
    Some(missile)
}

/// Move every missile along its velocity and burn down its lifetime.
/// Detonation is decided by the collision pass.
pub fn advance(world: &mut World, delta_secs: f32) {
    for (_entity, (transform, missile)) in world.query_mut::<(&mut Transform, &mut Missile)>() {
        transform.position += missile.velocity;
        missile.lifetime -= delta_secs;
    }
}
