//! Cleanup system: removes entities queued for despawn during the frame.

use hecs::{Entity, World};

/// Despawn every queued entity. Entities queued twice are ignored the
/// second time.
pub fn run(world: &mut World, despawn_buffer: &mut Vec<Entity>) {
    for entity in despawn_buffer.drain(..) {
        let _ = world.despawn(entity);
    }
}
