//! Chase camera follow.

use glam::Vec3;

use citydrive_core::constants::{CAMERA_LERP, CAMERA_OFFSET};
use citydrive_core::types::{ChaseCamera, Transform};

/// Camera placement with no smoothing, used at startup.
pub fn snap_to(target: &Transform) -> ChaseCamera {
    ChaseCamera {
        position: target.local_to_world(CAMERA_OFFSET),
        target: target.position,
    }
}

/// Ease the camera toward its spot behind the vehicle.
pub fn follow(camera: &mut ChaseCamera, target: &Transform) {
    let desired: Vec3 = target.local_to_world(CAMERA_OFFSET);
    camera.position = camera.position.lerp(desired, CAMERA_LERP);
    camera.target = target.position;
}
