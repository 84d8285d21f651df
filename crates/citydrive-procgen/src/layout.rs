//! Assembly of the complete static world.

use glam::Vec3;
use rand::Rng;
use serde::{Deserialize, Serialize};
use tracing::info;

use citydrive_core::config::WorldParams;
use citydrive_core::constants::*;
use citydrive_core::enums::{BlockLayout, CollidableKind};
use citydrive_core::network::{RoadNetwork, SidewalkWaypoints};
use citydrive_terrain::heightfield::{self, HeightFieldSpec, TerrainCell};
use citydrive_terrain::NoiseGenerator;

use crate::city::{self, BlockFeature, CityBlock, ExitGap, LaneDash, RoadSegment, TrafficLight};
use crate::sidewalk;

/// A static object registered in the collidable set.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct StaticCollider {
    pub kind: CollidableKind,
    /// Center of the collision box.
    pub center: Vec3,
    pub half_extents: Vec3,
    pub yaw: f32,
}

/// The immutable static world, built once at startup.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct WorldLayout {
    pub params: WorldParams,
    pub roads: RoadNetwork,
    pub road_segments: Vec<RoadSegment>,
    pub lane_dashes: Vec<LaneDash>,
    pub blocks: Vec<CityBlock>,
    pub traffic_lights: Vec<TrafficLight>,
    pub sidewalks: SidewalkWaypoints,
    pub exits: Vec<ExitGap>,
    pub terrain: Vec<TerrainCell>,
    /// Static collidables in registration order: block features, traffic
    /// lights, then terrain blocks.
    pub static_colliders: Vec<StaticCollider>,
}

impl WorldLayout {
    /// x coordinate of the mountain pass road.
    pub fn pass_x(&self) -> f32 {
        self.exits.first().map_or(0.0, |exit| exit.position.x)
    }

    pub fn blocks_with_layout(&self, layout: BlockLayout) -> usize {
        self.blocks.iter().filter(|b| b.layout == layout).count()
    }
}

/// Generate the whole static world from validated parameters.
pub fn generate<R: Rng>(params: &WorldParams, rng: &mut R) -> WorldLayout {
    debug_assert!(params.validate().is_ok(), "world params must be validated");

    let noise = NoiseGenerator::new(rng.gen::<f64>());

    let lines = city::road_lines(params);
    let pass_x = city::pass_line(&lines);
    let roads = RoadNetwork::new(lines.clone(), lines);

    let road_segments = city::build_road_segments(params, &roads, pass_x);
    let lane_dashes = city::build_lane_dashes(params, &road_segments, &roads);

    let blocks: Vec<CityBlock> = city::block_centers(params)
        .into_iter()
        .map(|center| city::build_block(params, center, rng))
        .collect();

    let traffic_lights = city::build_traffic_lights(params, &roads);
    let sidewalks = sidewalk::sample_waypoints(params, &blocks);
    let exits = city::build_exits(params, pass_x);

    let terrain = heightfield::build(
        &noise,
        &HeightFieldSpec {
            world_half_extent: params.world_half_extent(),
            city_half_extent: params.city_half_extent(),
            cell_size: params.terrain_cell_size,
            pass_x,
            pass_half_width: params.pass_strip_width / 2.0,
        },
    );

    let static_colliders = collect_colliders(&blocks, &traffic_lights, &terrain);

    info!(
        buildings = blocks.iter().filter(|b| b.layout == BlockLayout::Buildings).count(),
        tree_clusters = blocks.iter().filter(|b| b.layout == BlockLayout::TreeCluster).count(),
        parking_lots = blocks.iter().filter(|b| b.layout == BlockLayout::ParkingLot).count(),
        traffic_lights = traffic_lights.len(),
        waypoints = sidewalks.len(),
        terrain_cells = terrain.len(),
        collidables = static_colliders.len(),
        "world generated"
    );

    WorldLayout {
        params: params.clone(),
        roads,
        road_segments,
        lane_dashes,
        blocks,
        traffic_lights,
        sidewalks,
        exits,
        terrain,
        static_colliders,
    }
}

fn collect_colliders(
    blocks: &[CityBlock],
    traffic_lights: &[TrafficLight],
    terrain: &[TerrainCell],
) -> Vec<StaticCollider> {
    let mut colliders = Vec::new();

    for feature in blocks.iter().flat_map(|b| b.features.iter()) {
        match *feature {
            BlockFeature::Building {
                center,
                half_extents,
            } => colliders.push(StaticCollider {
                kind: CollidableKind::Building,
                center,
                half_extents,
                yaw: 0.0,
            }),
            BlockFeature::Tree { position, height } => colliders.push(StaticCollider {
                kind: CollidableKind::Tree,
                center: Vec3::new(position.x, height / 2.0, position.z),
                half_extents: Vec3::new(TREE_HALF_WIDTH, height / 2.0, TREE_HALF_WIDTH),
                yaw: 0.0,
            }),
            BlockFeature::ParkingStall { .. } => {}
        }
    }

    for light in traffic_lights {
        colliders.push(StaticCollider {
            kind: CollidableKind::TrafficLight,
            center: light.position + Vec3::new(0.0, TRAFFIC_LIGHT_HALF_EXTENTS.y, 0.0),
            half_extents: TRAFFIC_LIGHT_HALF_EXTENTS,
            yaw: 0.0,
        });
    }

    for cell in terrain.iter().filter(|c| c.is_collidable()) {
        colliders.push(StaticCollider {
            kind: CollidableKind::Terrain,
            center: cell.block_center(),
            half_extents: cell.half_extents(),
            yaw: 0.0,
        });
    }

    colliders
}
