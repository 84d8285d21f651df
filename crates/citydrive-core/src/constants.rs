//! Simulation constants and tuning parameters.
//!
//! Movement quantities are expressed per frame; timers are in seconds.

use glam::Vec3;

// --- Player vehicle ---

/// Speed gained per frame while accelerating.
pub const PLAYER_ACCELERATION: f32 = 0.01;

/// Forward speed cap. Reverse is capped at half of this.
pub const PLAYER_MAX_SPEED: f32 = 0.8;

/// Speed lost per frame when neither forward nor backward is held.
pub const PLAYER_FRICTION: f32 = 0.005;

/// Heading change per frame while steering (radians).
pub const PLAYER_TURN_RATE: f32 = 0.04;

/// Steering has no effect below this absolute speed.
pub const PLAYER_MIN_TURN_SPEED: f32 = 0.01;

/// Half extents of the player vehicle body.
pub const PLAYER_HALF_EXTENTS: Vec3 = Vec3::new(1.0, 0.75, 2.0);

/// Distance kept from the world edge; the vehicle cannot cross it.
pub const WORLD_EDGE_MARGIN: f32 = 10.0;

/// Speed multiplier applied when the player runs into a pedestrian.
pub const PEDESTRIAN_BOUNCE_FACTOR: f32 = -0.5;

// --- Camera ---

/// Camera offset in the vehicle's yaw frame (behind and above).
pub const CAMERA_OFFSET: Vec3 = Vec3::new(0.0, 6.0, -12.0);

/// Per-frame interpolation factor toward the desired camera position.
pub const CAMERA_LERP: f32 = 0.1;

// --- Missiles ---

/// Missile speed when fired from a stationary vehicle.
pub const MISSILE_BASE_SPEED: f32 = 2.0;

/// Seconds a missile flies before detonating on its own.
pub const MISSILE_LIFETIME_SECS: f32 = 5.0;

/// Minimum seconds between two shots.
pub const FIRE_COOLDOWN_SECS: f32 = 0.5;

/// Launch point in the vehicle's yaw frame.
pub const MISSILE_SPAWN_OFFSET: Vec3 = Vec3::new(0.0, 0.5, 2.5);

pub const MISSILE_HALF_EXTENTS: Vec3 = Vec3::new(0.15, 0.15, 0.4);

// --- Explosions ---

pub const EXPLOSION_LIFETIME_SECS: f32 = 0.5;

/// Scale reached at the end of an explosion's life (starts at 1).
pub const EXPLOSION_MAX_SCALE: f32 = 5.0;

// --- Hit responses ---

/// Scale applied to the missile direction when it knocks a vehicle away.
pub const MISSILE_VEHICLE_PUSH: f32 = 0.5;

/// Scale applied to the missile-to-pedestrian direction.
pub const MISSILE_PEDESTRIAN_PUSH: f32 = 1.0;

/// Upward velocity added to a struck vehicle.
pub const VEHICLE_HIT_LIFT: f32 = 0.5;

/// Upward velocity added to a struck pedestrian.
pub const PEDESTRIAN_HIT_LIFT: f32 = 0.3;

/// Base push when the player runs a pedestrian over (added to 2 x |speed|).
pub const RAM_BASE_PUSH: f32 = 0.2;

// --- Pedestrians ---

pub const PEDESTRIAN_SPEED_MIN: f32 = 0.02;
pub const PEDESTRIAN_SPEED_MAX: f32 = 0.04;

pub const PEDESTRIAN_IDLE_MIN_SECS: f32 = 2.0;
pub const PEDESTRIAN_IDLE_MAX_SECS: f32 = 5.0;

/// Upper bound of the idle timer drawn at world build.
pub const PEDESTRIAN_INITIAL_IDLE_MAX_SECS: f32 = 2.0;

/// Walkers freeze while the player vehicle is closer than this.
pub const PEDESTRIAN_AVOID_RADIUS: f32 = 3.0;

/// A walker within this distance of its destination stops.
pub const PEDESTRIAN_ARRIVAL_RADIUS: f32 = 1.0;

/// Vertical speed lost per frame while tumbling.
pub const PEDESTRIAN_GRAVITY: f32 = 0.02;

/// Walk cycle phase advance per frame.
pub const PEDESTRIAN_WALK_CYCLE_RATE: f32 = 0.2;

/// Height of the walk bob.
pub const PEDESTRIAN_BOB_HEIGHT: f32 = 0.05;

/// Peak limb swing while walking (radians).
pub const PEDESTRIAN_LIMB_SWING: f32 = 0.5;

/// Tumble applied per frame while hit (radians).
pub const PEDESTRIAN_TUMBLE_RATE: f32 = 0.1;

pub const PEDESTRIAN_HALF_EXTENTS: Vec3 = Vec3::new(0.3, 0.9, 0.3);

/// Resting height of a pedestrian's center above the ground.
pub const PEDESTRIAN_BASE_Y: f32 = 0.9;

// --- AI vehicles ---

pub const AI_VEHICLE_SPEED_MIN: f32 = 0.1;
pub const AI_VEHICLE_SPEED_MAX: f32 = 0.15;

/// A vehicle closer than this to an intersection point is "in" it.
pub const INTERSECTION_RADIUS: f32 = 1.0;

pub const TURN_LEFT_PROBABILITY: f32 = 0.25;
pub const TURN_RIGHT_PROBABILITY: f32 = 0.25;

/// Per-frame interpolation factor toward the target heading.
pub const TURN_LERP: f32 = 0.1;

/// Heading error below which the heading snaps to the target.
pub const TURN_SNAP_THRESHOLD: f32 = 0.05;

/// Vertical speed lost per frame in ballistic flight.
pub const VEHICLE_GRAVITY: f32 = 0.05;

/// Tumble per frame per unit of horizontal hit velocity.
pub const VEHICLE_TUMBLE_FACTOR: f32 = 0.1;

pub const AI_VEHICLE_HALF_EXTENTS: Vec3 = Vec3::new(1.0, 0.75, 2.0);

/// AI vehicles never spawn closer than this to the player start.
pub const AI_VEHICLE_SPAWN_CLEARANCE: f32 = 10.0;

// --- Agent recycling ---

/// Hit agents falling below this height are recycled.
pub const RECYCLE_FLOOR_Y: f32 = -5.0;

/// Hit agents farther than this from the player are recycled.
pub const HIT_DESPAWN_DISTANCE: f32 = 40.0;

// --- City props ---

pub const TRAFFIC_LIGHT_HALF_EXTENTS: Vec3 = Vec3::new(0.2, 2.5, 0.2);

/// Collision half width of a tree (trunk plus canopy).
pub const TREE_HALF_WIDTH: f32 = 1.2;

pub const TREE_HEIGHT_MIN: f32 = 4.0;
pub const TREE_HEIGHT_MAX: f32 = 8.0;

pub const BUILDING_FOOTPRINT_MIN: f32 = 5.0;
pub const BUILDING_FOOTPRINT_MAX: f32 = 8.0;
pub const BUILDING_HEIGHT_MIN: f32 = 8.0;
pub const BUILDING_HEIGHT_MAX: f32 = 40.0;

/// Chance that a lot in a building block gets a building instead of a tree.
pub const BUILDING_LOT_PROBABILITY: f64 = 0.75;

pub const TREE_CLUSTER_MIN: u32 = 4;
pub const TREE_CLUSTER_MAX: u32 = 8;

/// Weighted draw for block layouts (buildings, tree cluster; remainder parking).
pub const BLOCK_BUILDINGS_WEIGHT: f64 = 0.70;
pub const BLOCK_TREES_WEIGHT: f64 = 0.15;

/// Length of one lane marking dash and of the gap after it.
pub const LANE_DASH_LENGTH: f32 = 3.0;
pub const LANE_DASH_GAP: f32 = 3.0;

pub const PARKING_STALL_WIDTH: f32 = 3.0;

// --- Terrain ---

/// Band upper bounds (exclusive). Anything at or above the rock bound is snow.
pub const TERRAIN_WATER_MAX: f32 = 3.0;
pub const TERRAIN_SAND_MAX: f32 = 6.0;
pub const TERRAIN_GRASS_MAX: f32 = 25.0;
pub const TERRAIN_FOREST_MAX: f32 = 50.0;
pub const TERRAIN_ROCK_MAX: f32 = 70.0;

/// Water blocks are clamped to exactly this height.
pub const TERRAIN_WATER_LEVEL: f32 = 3.0;

/// Exponent applied to normalized noise before scaling.
pub const TERRAIN_NOISE_EXPONENT: f32 = 2.2;

/// Height of fully risen noise terrain.
pub const TERRAIN_NOISE_AMPLITUDE: f32 = 80.0;

/// World-space to noise-space scale.
pub const TERRAIN_NOISE_SCALE: f64 = 0.01;

/// Fraction of the world half extent where the edge rise begins.
pub const TERRAIN_EDGE_RISE_START: f32 = 0.5;

/// Height added at the very edge of the world.
pub const TERRAIN_EDGE_RISE_HEIGHT: f32 = 100.0;

// --- Noise ---

pub const NOISE_OCTAVES: u32 = 4;
pub const NOISE_PERSISTENCE: f64 = 0.5;
