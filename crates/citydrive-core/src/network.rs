//! Road network and sidewalk waypoints published by the world generator.
//!
//! Both are immutable once built and read by the agent state machines.

use glam::Vec3;
use serde::{Deserialize, Serialize};

/// Road center lines of the city grid.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct RoadNetwork {
    /// x coordinates of roads running along the z axis.
    pub x_lines: Vec<f32>,
    /// z coordinates of roads running along the x axis.
    pub z_lines: Vec<f32>,
}

impl RoadNetwork {
    pub fn new(x_lines: Vec<f32>, z_lines: Vec<f32>) -> Self {
        Self { x_lines, z_lines }
    }

    /// Every crossing point of an x line with a z line, as (x, z).
    pub fn intersections(&self) -> impl Iterator<Item = (f32, f32)> + '_ {
        self.x_lines
            .iter()
            .flat_map(move |&x| self.z_lines.iter().map(move |&z| (x, z)))
    }

    /// The first intersection within `radius` of `position` (horizontal distance).
    pub fn intersection_near(&self, position: Vec3, radius: f32) -> Option<(f32, f32)> {
        let radius_sq = radius * radius;
        self.intersections().find(|&(x, z)| {
            let dx = position.x - x;
            let dz = position.z - z;
            dx * dx + dz * dz < radius_sq
        })
    }

    /// Whether the crossing `(x, z)` touches the perimeter ring road.
    pub fn is_perimeter(&self, x: f32, z: f32) -> bool {
        let outer = |lines: &[f32], v: f32| {
            lines.first().is_some_and(|&first| first == v)
                || lines.last().is_some_and(|&last| last == v)
        };
        outer(&self.x_lines, x) || outer(&self.z_lines, z)
    }
}

/// Points along sidewalk edges. The only valid pedestrian destinations.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct SidewalkWaypoints {
    pub points: Vec<Vec3>,
}

impl SidewalkWaypoints {
    pub fn new(points: Vec<Vec3>) -> Self {
        Self { points }
    }

    pub fn len(&self) -> usize {
        self.points.len()
    }

    pub fn is_empty(&self) -> bool {
        self.points.is_empty()
    }

    pub fn contains(&self, point: Vec3) -> bool {
        self.points
            .iter()
            .any(|p| p.x == point.x && p.z == point.z)
    }
}
