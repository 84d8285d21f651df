//! Sidewalk waypoint sampling.

use glam::Vec3;

use citydrive_core::config::WorldParams;
use citydrive_core::network::SidewalkWaypoints;

use crate::city::CityBlock;

/// Sample points along the middle of each block's sidewalk ring.
///
/// Every edge is split into equal steps no longer than the configured
/// spacing; each corner is emitted once.
pub fn sample_waypoints(params: &WorldParams, blocks: &[CityBlock]) -> SidewalkWaypoints {
    let half = params.block_size / 2.0 - params.sidewalk_width / 2.0;
    let edge_length = half * 2.0;
    let steps = ((edge_length / params.waypoint_spacing).floor() as u32).max(1);
    let step = edge_length / steps as f32;

    let corners = [(-half, -half), (half, -half), (half, half), (-half, half)];
    let mut points = Vec::with_capacity(blocks.len() * 4 * steps as usize);

    for block in blocks {
        for (i, &(sx, sz)) in corners.iter().enumerate() {
            let (ex, ez) = corners[(i + 1) % corners.len()];
            let dir_x = (ex - sx) / edge_length;
            let dir_z = (ez - sz) / edge_length;
            for k in 0..steps {
                let t = k as f32 * step;
                points.push(Vec3::new(
                    block.center.x + sx + dir_x * t,
                    0.0,
                    block.center.z + sz + dir_z * t,
                ));
            }
        }
    }

    SidewalkWaypoints::new(points)
}
