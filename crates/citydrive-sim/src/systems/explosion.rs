//! Explosion effects: spawn, aging and derived visuals.

use glam::Vec3;
use hecs::{Entity, World};

use citydrive_core::components::Explosion;
use citydrive_core::constants::{EXPLOSION_LIFETIME_SECS, EXPLOSION_MAX_SCALE};
use citydrive_core::events::SimEvent;
use citydrive_core::types::Transform;

use crate::events::EventBus;
use crate::world_setup::HandleAllocator;

pub fn spawn(world: &mut World, handles: &mut HandleAllocator, position: Vec3, events: &mut EventBus) -> Entity {
    let entity = world.spawn((
        handles.allocate(),
        Transform::new(position, 0.0),
        Explosion {
            lifetime: EXPLOSION_LIFETIME_SECS,
        },
    ));
    events.emit(SimEvent::Explosion { position });
    entity
}

/// Age every explosion; burnt-out ones are queued for despawn.
pub fn run(world: &mut World, delta_secs: f32, despawn_buffer: &mut Vec<Entity>) {
    for (entity, explosion) in world.query_mut::<&mut Explosion>() {
        explosion.lifetime -= delta_secs;
        if explosion.lifetime <= 0.0 {
            despawn_buffer.push(entity);
        }
    }
}

/// Scale and opacity for the remaining lifetime.
pub fn visuals(explosion: &Explosion) -> (f32, f32) {
    let opacity = (explosion.lifetime / EXPLOSION_LIFETIME_SECS).clamp(0.0, 1.0);
    let scale = 1.0 + (1.0 - opacity) * (EXPLOSION_MAX_SCALE - 1.0);
    (scale, opacity)
}
