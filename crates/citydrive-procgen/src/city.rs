//! City grid: roads, lane markings, blocks and street furniture.

use glam::Vec3;
use rand::Rng;
use serde::{Deserialize, Serialize};

use citydrive_core::config::WorldParams;
use citydrive_core::constants::*;
use citydrive_core::enums::{BlockLayout, RoadAxis, RoadKind};
use citydrive_core::network::RoadNetwork;

/// A straight stretch of road.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct RoadSegment {
    pub center: Vec3,
    pub axis: RoadAxis,
    pub length: f32,
    pub width: f32,
    pub kind: RoadKind,
}

/// One dash of a dashed center line.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct LaneDash {
    pub center: Vec3,
    pub axis: RoadAxis,
}

/// Something standing on a city block.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub enum BlockFeature {
    Building { center: Vec3, half_extents: Vec3 },
    Tree { position: Vec3, height: f32 },
    ParkingStall { center: Vec3, yaw: f32 },
}

/// A square block between streets.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct CityBlock {
    pub center: Vec3,
    pub size: f32,
    pub layout: BlockLayout,
    pub features: Vec<BlockFeature>,
}

#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct TrafficLight {
    pub position: Vec3,
    pub yaw: f32,
}

/// Opening in the city edge where the ring road meets the mountain pass.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct ExitGap {
    pub position: Vec3,
    pub width: f32,
}

/// Road center coordinates along one axis, outermost lines first and last.
pub fn road_lines(params: &WorldParams) -> Vec<f32> {
    let half = params.city_half_extent();
    (0..=params.grid_size)
        .map(|i| -half + params.street_width / 2.0 + i as f32 * params.road_pitch())
        .collect()
}

/// Road line closest to the world's north-south center line. The mountain
/// pass continues from it.
pub fn pass_line(lines: &[f32]) -> f32 {
    lines
        .iter()
        .copied()
        .min_by(|a, b| a.abs().total_cmp(&b.abs()))
        .unwrap_or(0.0)
}

/// Centers of all blocks, row by row.
pub fn block_centers(params: &WorldParams) -> Vec<Vec3> {
    let first = -params.city_half_extent() + params.street_width + params.block_size / 2.0;
    let mut centers = Vec::with_capacity((params.grid_size * params.grid_size) as usize);
    for row in 0..params.grid_size {
        for col in 0..params.grid_size {
            centers.push(Vec3::new(
                first + col as f32 * params.road_pitch(),
                0.0,
                first + row as f32 * params.road_pitch(),
            ));
        }
    }
    centers
}

/// City streets, the perimeter ring and the two mountain pass roads.
pub fn build_road_segments(params: &WorldParams, roads: &RoadNetwork, pass_x: f32) -> Vec<RoadSegment> {
    let mut segments = Vec::new();

    for (lines, axis) in [(&roads.x_lines, RoadAxis::AlongZ), (&roads.z_lines, RoadAxis::AlongX)] {
        let last = lines.len().saturating_sub(1);
        for (i, &line) in lines.iter().enumerate() {
            let center = match axis {
                RoadAxis::AlongZ => Vec3::new(line, 0.0, 0.0),
                RoadAxis::AlongX => Vec3::new(0.0, 0.0, line),
            };
            segments.push(RoadSegment {
                center,
                axis,
                length: params.ground_size,
                width: params.street_width,
                kind: if i == 0 || i == last {
                    RoadKind::Ring
                } else {
                    RoadKind::Street
                },
            });
        }
    }

    let city_half = params.city_half_extent();
    let pass_length = params.world_half_extent() - city_half;
    for side in [-1.0, 1.0] {
        segments.push(RoadSegment {
            center: Vec3::new(pass_x, 0.0, side * (city_half + pass_length / 2.0)),
            axis: RoadAxis::AlongZ,
            length: pass_length,
            width: params.street_width,
            kind: RoadKind::MountainPass,
        });
    }

    segments
}

/// Dashed center lines on every road, left out inside intersections.
pub fn build_lane_dashes(params: &WorldParams, segments: &[RoadSegment], roads: &RoadNetwork) -> Vec<LaneDash> {
    let pitch = LANE_DASH_LENGTH + LANE_DASH_GAP;
    let clearance = params.street_width / 2.0 + LANE_DASH_LENGTH / 2.0;
    let mut dashes = Vec::new();

    for segment in segments {
        let (along, crossing) = match segment.axis {
            RoadAxis::AlongZ => (segment.center.z, &roads.z_lines),
            RoadAxis::AlongX => (segment.center.x, &roads.x_lines),
        };
        let start = along - segment.length / 2.0;
        let end = along + segment.length / 2.0;

        let mut t = start + LANE_DASH_LENGTH / 2.0;
        while t + LANE_DASH_LENGTH / 2.0 <= end {
            let in_intersection = segment.kind != RoadKind::MountainPass
                && crossing.iter().any(|&c| (c - t).abs() < clearance);
            if !in_intersection {
                let center = match segment.axis {
                    RoadAxis::AlongZ => Vec3::new(segment.center.x, 0.0, t),
                    RoadAxis::AlongX => Vec3::new(t, 0.0, segment.center.z),
                };
                dashes.push(LaneDash {
                    center,
                    axis: segment.axis,
                });
            }
            t += pitch;
        }
    }

    dashes
}

/// Weighted layout draw: 70% buildings, 15% tree cluster, 15% parking.
pub fn draw_block_layout<R: Rng>(rng: &mut R) -> BlockLayout {
    let roll: f64 = rng.gen();
    if roll < BLOCK_BUILDINGS_WEIGHT {
        BlockLayout::Buildings
    } else if roll < BLOCK_BUILDINGS_WEIGHT + BLOCK_TREES_WEIGHT {
        BlockLayout::TreeCluster
    } else {
        BlockLayout::ParkingLot
    }
}

/// Populate one block with the features of a freshly drawn layout.
pub fn build_block<R: Rng>(params: &WorldParams, center: Vec3, rng: &mut R) -> CityBlock {
    let layout = draw_block_layout(rng);
    let lot_half = params.block_size / 2.0 - params.sidewalk_width;

    let features = match layout {
        BlockLayout::Buildings => {
            let quadrant = lot_half / 2.0;
            let mut features = Vec::with_capacity(4);
            for (dx, dz) in [(-1.0, -1.0), (1.0, -1.0), (-1.0, 1.0), (1.0, 1.0)] {
                let lot_center = center + Vec3::new(dx * quadrant, 0.0, dz * quadrant);
                if rng.gen_bool(BUILDING_LOT_PROBABILITY) {
                    let max_footprint = BUILDING_FOOTPRINT_MAX.min(quadrant * 2.0);
                    let width = rng.gen_range(BUILDING_FOOTPRINT_MIN.min(max_footprint)..=max_footprint);
                    let depth = rng.gen_range(BUILDING_FOOTPRINT_MIN.min(max_footprint)..=max_footprint);
                    let height = rng.gen_range(BUILDING_HEIGHT_MIN..=BUILDING_HEIGHT_MAX);
                    features.push(BlockFeature::Building {
                        center: Vec3::new(lot_center.x, height / 2.0, lot_center.z),
                        half_extents: Vec3::new(width / 2.0, height / 2.0, depth / 2.0),
                    });
                } else {
                    features.push(BlockFeature::Tree {
                        position: lot_center,
                        height: rng.gen_range(TREE_HEIGHT_MIN..=TREE_HEIGHT_MAX),
                    });
                }
            }
            features
        }
        BlockLayout::TreeCluster => {
            let count = rng.gen_range(TREE_CLUSTER_MIN..=TREE_CLUSTER_MAX);
            let spread = (lot_half - TREE_HALF_WIDTH).max(0.0);
            (0..count)
                .map(|_| BlockFeature::Tree {
                    position: center
                        + Vec3::new(
                            rng.gen_range(-spread..=spread),
                            0.0,
                            rng.gen_range(-spread..=spread),
                        ),
                    height: rng.gen_range(TREE_HEIGHT_MIN..=TREE_HEIGHT_MAX),
                })
                .collect()
        }
        BlockLayout::ParkingLot => {
            let per_row = ((lot_half * 2.0) / PARKING_STALL_WIDTH).floor() as u32;
            let row_offset = lot_half / 2.0;
            let mut features = Vec::with_capacity(per_row as usize * 2);
            for side in [-1.0, 1.0] {
                for i in 0..per_row {
                    let x = -lot_half + PARKING_STALL_WIDTH * (i as f32 + 0.5);
                    features.push(BlockFeature::ParkingStall {
                        center: center + Vec3::new(x, 0.0, side * row_offset),
                        yaw: 0.0,
                    });
                }
            }
            features
        }
    };

    CityBlock {
        center,
        size: params.block_size,
        layout,
        features,
    }
}

/// A traffic light on one corner of every intersection off the ring road.
pub fn build_traffic_lights(params: &WorldParams, roads: &RoadNetwork) -> Vec<TrafficLight> {
    let corner = params.street_width / 2.0 + params.sidewalk_width / 2.0;
    roads
        .intersections()
        .filter(|&(x, z)| !roads.is_perimeter(x, z))
        .map(|(x, z)| TrafficLight {
            position: Vec3::new(x + corner, 0.0, z + corner),
            yaw: std::f32::consts::FRAC_PI_4,
        })
        .collect()
}

/// The two openings where the pass leaves the city, north and south.
pub fn build_exits(params: &WorldParams, pass_x: f32) -> Vec<ExitGap> {
    let half = params.city_half_extent();
    [-half, half]
        .into_iter()
        .map(|z| ExitGap {
            position: Vec3::new(pass_x, 0.0, z),
            width: params.pass_strip_width,
        })
        .collect()
}
