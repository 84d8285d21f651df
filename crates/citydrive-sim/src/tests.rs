//! Tests for the simulation engine, player controller, projectiles and
//! collision resolution.

use glam::Vec3;

use citydrive_core::commands::{DriveIntents, FrameInput};
use citydrive_core::components::*;
use citydrive_core::config::SimConfig;
use citydrive_core::constants::*;
use citydrive_core::enums::*;
use citydrive_core::events::SimEvent;
use citydrive_core::types::{heading_vector, EntityHandle, Transform};
use citydrive_core::SimError;

use crate::engine::SimulationEngine;
use crate::events::EventBus;
use crate::systems::{explosion, player};

const FRAME: f32 = 1.0 / 60.0;

fn started(seed: u64) -> SimulationEngine {
    let mut engine = SimulationEngine::new(SimConfig {
        seed,
        ..Default::default()
    });
    engine.initialize().unwrap();
    engine
}

/// An initialized engine with no pedestrians or traffic.
fn empty_streets() -> SimulationEngine {
    let mut engine = started(7);
    engine.clear_agents();
    engine
}

fn set_player(engine: &mut SimulationEngine, position: Vec3, yaw: f32, speed: f32) {
    let player = engine.player_entity().unwrap();
    let (transform, vehicle) = engine
        .world_mut()
        .query_one_mut::<(&mut Transform, &mut PlayerVehicle)>(player)
        .unwrap();
    transform.position = position;
    transform.yaw = yaw;
    vehicle.speed = speed;
}

fn idle_pedestrian_at(position: Vec3) -> (Pedestrian, Transform) {
    (
        Pedestrian {
            state: PedestrianState::Idle,
            speed: 0.03,
            destination: position,
            idle_timer: 100.0,
            base_y: PEDESTRIAN_BASE_Y,
            ..Default::default()
        },
        Transform::new(position, 0.0),
    )
}

fn parked_vehicle(state: VehicleState) -> AiVehicle {
    AiVehicle {
        state,
        ..Default::default()
    }
}

fn count_missiles(engine: &SimulationEngine) -> usize {
    engine.world().query::<&Missile>().iter().count()
}

// ---- Lifecycle ----

#[test]
fn test_advance_before_initialize_rejected() {
    let mut engine = SimulationEngine::new(SimConfig::default());
    assert_eq!(engine.phase(), SimPhase::Uninitialized);
    assert_eq!(
        engine.advance(FRAME, &FrameInput::idle()).unwrap_err(),
        SimError::NotInitialized
    );
    assert!(engine.world_layout().is_none());
}

#[test]
fn test_initialize_twice_rejected() {
    let mut engine = started(1);
    assert_eq!(engine.phase(), SimPhase::Running);
    assert_eq!(engine.initialize().unwrap_err(), SimError::AlreadyInitialized);
}

#[test]
fn test_invalid_world_params_rejected() {
    let mut config = SimConfig::default();
    config.world.block_size = -1.0;
    let mut engine = SimulationEngine::new(config);
    assert!(matches!(
        engine.initialize(),
        Err(SimError::InvalidWorldParams(_))
    ));
    assert_eq!(engine.phase(), SimPhase::Uninitialized);
}

#[test]
fn test_bad_delta_rejected_without_side_effects() {
    let mut engine = started(2);
    engine.advance(FRAME, &FrameInput::forward()).unwrap();
    let before = engine.advance(FRAME, &FrameInput::idle()).unwrap();

    assert_eq!(
        engine.advance(-0.1, &FrameInput::forward()).unwrap_err(),
        SimError::NegativeDelta(-0.1)
    );
    assert_eq!(
        engine.advance(f32::NAN, &FrameInput::forward()).unwrap_err(),
        SimError::NonFiniteDelta
    );
    assert_eq!(engine.time(), before.time);
}

#[test]
fn test_zero_delta_accepted() {
    let mut engine = started(2);
    let snap = engine.advance(0.0, &FrameInput::idle()).unwrap();
    assert_eq!(snap.time.frame, 1);
    assert_eq!(snap.time.elapsed_secs, 0.0);
}

#[test]
fn test_initial_population() {
    let engine = started(3);
    let pedestrians = engine.world().query::<&Pedestrian>().iter().count();
    let vehicles = engine.world().query::<&AiVehicle>().iter().count();
    assert!((30..=50).contains(&pedestrians), "{pedestrians} pedestrians");
    assert!((10..=20).contains(&vehicles), "{vehicles} vehicles");

    let layout = engine.world_layout().unwrap();
    assert_eq!(
        engine.collidable_count(),
        layout.static_colliders.len() + vehicles
    );
}

#[test]
fn test_snapshot_sorted_by_handle() {
    let mut engine = started(4);
    let snap = engine.advance(FRAME, &FrameInput::idle()).unwrap();
    assert_eq!(snap.player.handle, EntityHandle(0));
    assert!(snap.pedestrians.windows(2).all(|w| w[0].handle < w[1].handle));
    assert!(snap.vehicles.windows(2).all(|w| w[0].handle < w[1].handle));
}

// ---- Determinism ----

#[test]
fn test_determinism_same_seed() {
    let mut engine_a = started(12345);
    let mut engine_b = started(12345);
    assert_eq!(engine_a.world_layout(), engine_b.world_layout());

    for frame in 0..300 {
        let input = FrameInput {
            intents: DriveIntents {
                forward: frame < 120,
                turn_left: (60..90).contains(&frame),
                ..Default::default()
            },
            fire: frame % 20 == 0,
        };
        let snap_a = engine_a.advance(FRAME, &input).unwrap();
        let snap_b = engine_b.advance(FRAME, &input).unwrap();

        let json_a = serde_json::to_string(&snap_a).unwrap();
        let json_b = serde_json::to_string(&snap_b).unwrap();
        assert_eq!(json_a, json_b, "Snapshots diverged with same seed");
    }
}

#[test]
fn test_determinism_different_seeds() {
    let engine_a = started(111);
    let engine_b = started(222);
    assert_ne!(engine_a.world_layout(), engine_b.world_layout());
}

// ---- Player controller ----

#[test]
fn test_speed_accelerates_and_caps() {
    let forward = DriveIntents {
        forward: true,
        ..Default::default()
    };
    assert!((player::next_speed(0.0, &forward) - PLAYER_ACCELERATION).abs() < 1e-6);
    assert_eq!(player::next_speed(PLAYER_MAX_SPEED, &forward), PLAYER_MAX_SPEED);

    let backward = DriveIntents {
        backward: true,
        ..Default::default()
    };
    assert_eq!(
        player::next_speed(-PLAYER_MAX_SPEED / 2.0, &backward),
        -PLAYER_MAX_SPEED / 2.0
    );
}

#[test]
fn test_friction_never_overshoots_zero() {
    let coast = DriveIntents::default();
    assert_eq!(player::next_speed(0.003, &coast), 0.0);
    assert_eq!(player::next_speed(-0.003, &coast), 0.0);
    assert!((player::next_speed(0.5, &coast) - (0.5 - PLAYER_FRICTION)).abs() < 1e-6);
}

#[test]
fn test_steering_needs_speed_and_mirrors_in_reverse() {
    let left = DriveIntents {
        turn_left: true,
        ..Default::default()
    };
    assert_eq!(player::steering(0.005, &left), 0.0);
    assert_eq!(player::steering(0.5, &left), PLAYER_TURN_RATE);
    assert_eq!(player::steering(-0.2, &left), -PLAYER_TURN_RATE);
}

#[test]
fn test_player_moves_along_heading() {
    let mut engine = empty_streets();
    set_player(&mut engine, Vec3::new(0.0, 0.75, 0.0), 0.0, 0.5);
    let snap = engine.advance(FRAME, &FrameInput::forward()).unwrap();
    assert!((snap.player.speed - 0.51).abs() < 1e-5);
    assert!((snap.player.transform.position.z - 0.51).abs() < 1e-5);
}

#[test]
fn test_camera_eases_toward_vehicle() {
    let mut engine = empty_streets();
    let start = engine.camera();
    assert_eq!(start.position, Vec3::new(0.0, 0.75 + 6.0, -12.0));

    set_player(&mut engine, Vec3::new(0.0, 0.75, 10.0), 0.0, 0.0);
    let snap = engine.advance(FRAME, &FrameInput::idle()).unwrap();
    let desired = Vec3::new(0.0, 6.75, -2.0);
    let expected = start.position.lerp(desired, CAMERA_LERP);
    assert!((snap.camera.position - expected).length() < 1e-5);
    assert_eq!(snap.camera.target, Vec3::new(0.0, 0.75, 10.0));
}

// ---- Projectiles ----

#[test]
fn test_fire_from_standstill_uses_base_speed() {
    let mut engine = empty_streets();
    let snap = engine.advance(FRAME, &FrameInput::fire()).unwrap();

    assert_eq!(snap.missiles.len(), 1);
    let velocity = engine
        .world()
        .query::<&Missile>()
        .iter()
        .map(|(_, m)| m.velocity)
        .next()
        .unwrap();
    assert_eq!(velocity.length(), MISSILE_BASE_SPEED);
    assert!(snap
        .events
        .iter()
        .any(|e| matches!(e, SimEvent::MissileFired { .. })));
}

#[test]
fn test_fire_while_moving_is_faster() {
    let mut engine = empty_streets();
    set_player(&mut engine, Vec3::new(0.0, 0.75, 0.0), 0.0, 0.4);
    engine.advance(FRAME, &FrameInput::fire()).unwrap();
    let velocity = engine
        .world()
        .query::<&Missile>()
        .iter()
        .map(|(_, m)| m.velocity)
        .next()
        .unwrap();
    // Coasting shaved one friction step off before launch.
    let expected = MISSILE_BASE_SPEED + 0.4 - PLAYER_FRICTION;
    assert!((velocity.length() - expected).abs() < 1e-5);
}

#[test]
fn test_cooldown_allows_one_missile() {
    let mut engine = empty_streets();
    let mut fired = 0;
    for _ in 0..10 {
        let snap = engine.advance(FRAME, &FrameInput::fire()).unwrap();
        fired += snap
            .events
            .iter()
            .filter(|e| matches!(e, SimEvent::MissileFired { .. }))
            .count();
    }
    assert_eq!(fired, 1);
    assert_eq!(count_missiles(&engine), 1);

    for _ in 0..30 {
        engine.advance(FRAME, &FrameInput::idle()).unwrap();
    }
    let snap = engine.advance(FRAME, &FrameInput::fire()).unwrap();
    assert!(snap
        .events
        .iter()
        .any(|e| matches!(e, SimEvent::MissileFired { .. })));
}

#[test]
fn test_missile_expires_into_explosion() {
    let mut engine = empty_streets();
    engine.advance(FRAME, &FrameInput::fire()).unwrap();
    let mut saw_explosion = false;
    for _ in 0..4 {
        let snap = engine.advance(MISSILE_LIFETIME_SECS / 4.0, &FrameInput::idle()).unwrap();
        saw_explosion |= snap
            .events
            .iter()
            .any(|e| matches!(e, SimEvent::Explosion { .. }));
    }
    assert!(saw_explosion);
    assert_eq!(count_missiles(&engine), 0);
}

#[test]
fn test_explosion_fades_then_disappears() {
    let mut engine = empty_streets();
    engine.world_mut().spawn((
        EntityHandle(9_999),
        Transform::new(Vec3::new(0.0, 1.0, 20.0), 0.0),
        Explosion {
            lifetime: EXPLOSION_LIFETIME_SECS,
        },
    ));

    let mut last_opacity = 1.0;
    for _ in 0..3 {
        let snap = engine.advance(0.125, &FrameInput::idle()).unwrap();
        assert_eq!(snap.explosions.len(), 1);
        let view = snap.explosions[0];
        assert!(view.opacity < last_opacity);
        assert!(view.scale > 1.0);
        last_opacity = view.opacity;
    }
    let snap = engine.advance(0.125, &FrameInput::idle()).unwrap();
    assert!(snap.explosions.is_empty());
}

#[test]
fn test_explosion_visuals_span_lifetime() {
    let fresh = explosion::visuals(&Explosion {
        lifetime: EXPLOSION_LIFETIME_SECS,
    });
    assert_eq!(fresh, (1.0, 1.0));
    let spent = explosion::visuals(&Explosion { lifetime: 0.0 });
    assert_eq!(spent, (EXPLOSION_MAX_SCALE, 0.0));
}

#[test]
fn test_missile_knocks_vehicle_and_scores() {
    let mut engine = empty_streets();
    let target = engine.spawn_test_vehicle(
        parked_vehicle(VehicleState::Driving),
        Transform::new(Vec3::new(0.0, 0.75, 10.0), 0.0),
    );

    let mut events = Vec::new();
    events.extend(engine.advance(FRAME, &FrameInput::fire()).unwrap().events);
    for _ in 0..3 {
        events.extend(engine.advance(FRAME, &FrameInput::idle()).unwrap().events);
    }

    assert_eq!(engine.score(), 1);
    assert_eq!(engine.world().get::<&AiVehicle>(target).unwrap().state, VehicleState::Hit);
    assert!(events.iter().any(|e| matches!(e, SimEvent::VehicleHit { .. })));
    assert!(events.contains(&SimEvent::ScoreChanged { new_score: 1 }));
    assert!(events.iter().any(|e| matches!(e, SimEvent::Explosion { .. })));
    assert_eq!(count_missiles(&engine), 0);
}

#[test]
fn test_missile_on_wreck_explodes_without_score() {
    let mut engine = empty_streets();
    engine.spawn_test_vehicle(
        parked_vehicle(VehicleState::Hit),
        Transform::new(Vec3::new(0.0, 0.75, 10.0), 0.0),
    );

    let mut events = Vec::new();
    events.extend(engine.advance(FRAME, &FrameInput::fire()).unwrap().events);
    for _ in 0..3 {
        events.extend(engine.advance(FRAME, &FrameInput::idle()).unwrap().events);
    }

    assert_eq!(engine.score(), 0);
    assert!(!events.iter().any(|e| matches!(e, SimEvent::VehicleHit { .. })));
    assert!(events.iter().any(|e| matches!(e, SimEvent::Explosion { .. })));
    assert_eq!(count_missiles(&engine), 0);
}

#[test]
fn test_missile_knocks_pedestrian_and_scores_once() {
    let mut engine = empty_streets();
    let (ped, pose) = idle_pedestrian_at(Vec3::new(0.0, PEDESTRIAN_BASE_Y, 8.5));
    let first = engine.spawn_test_pedestrian(ped, pose);
    let (ped, pose) = idle_pedestrian_at(Vec3::new(0.0, PEDESTRIAN_BASE_Y, 8.7));
    let second = engine.spawn_test_pedestrian(ped, pose);

    engine.advance(FRAME, &FrameInput::fire()).unwrap();
    for _ in 0..3 {
        engine.advance(FRAME, &FrameInput::idle()).unwrap();
    }

    assert_eq!(engine.score(), 1);
    let states = [first, second].map(|e| engine.world().get::<&Pedestrian>(e).unwrap().state);
    assert_eq!(states, [PedestrianState::Hit, PedestrianState::Idle]);
}

#[test]
fn test_missile_through_vehicle_and_pedestrian_scores_once() {
    let mut engine = empty_streets();
    let target = engine.spawn_test_vehicle(
        parked_vehicle(VehicleState::Driving),
        Transform::new(Vec3::new(0.0, 0.75, 10.0), 0.0),
    );
    let (ped, pose) = idle_pedestrian_at(Vec3::new(0.0, PEDESTRIAN_BASE_Y, 10.0));
    let bystander = engine.spawn_test_pedestrian(ped, pose);

    engine.advance(FRAME, &FrameInput::fire()).unwrap();
    for _ in 0..3 {
        engine.advance(FRAME, &FrameInput::idle()).unwrap();
    }

    assert_eq!(engine.score(), 1);
    assert_eq!(engine.world().get::<&AiVehicle>(target).unwrap().state, VehicleState::Hit);
    assert_eq!(
        engine.world().get::<&Pedestrian>(bystander).unwrap().state,
        PedestrianState::Idle
    );
    assert_eq!(count_missiles(&engine), 0);
}

// ---- Player collisions ----

#[test]
fn test_ram_pedestrian_bounces_vehicle() {
    let mut engine = empty_streets();
    let (ped, pose) = idle_pedestrian_at(Vec3::new(0.0, PEDESTRIAN_BASE_Y, 2.5));
    let victim = engine.spawn_test_pedestrian(ped, pose);
    set_player(&mut engine, Vec3::new(0.0, 0.75, 0.0), 0.0, 0.29);

    let snap = engine.advance(FRAME, &FrameInput::forward()).unwrap();

    assert_eq!(
        engine.world().get::<&Pedestrian>(victim).unwrap().state,
        PedestrianState::Hit
    );
    assert_eq!(snap.score, 1);
    assert_eq!(snap.player.transform.position, Vec3::new(0.0, 0.75, 0.0));
    assert!((snap.player.speed + 0.15).abs() < 1e-5, "speed {}", snap.player.speed);
    assert!(snap
        .events
        .iter()
        .any(|e| matches!(e, SimEvent::PedestrianHit { .. })));
    assert!(snap.events.contains(&SimEvent::ScoreChanged { new_score: 1 }));
}

#[test]
fn test_ram_push_scales_with_speed() {
    let mut engine = empty_streets();
    let (ped, pose) = idle_pedestrian_at(Vec3::new(0.0, PEDESTRIAN_BASE_Y, 2.5));
    let victim = engine.spawn_test_pedestrian(ped, pose);
    set_player(&mut engine, Vec3::new(0.0, 0.75, 0.0), 0.0, 0.29);
    engine.advance(FRAME, &FrameInput::forward()).unwrap();

    let push = engine.world().get::<&Pedestrian>(victim).unwrap().hit_velocity;
    let horizontal = Vec3::new(push.x, 0.0, push.z);
    // The pedestrian sits straight ahead, slightly above the vehicle center.
    assert!(horizontal.length() > 0.7 && horizontal.length() < 0.8 + 1e-3);
    assert!(push.y > PEDESTRIAN_HIT_LIFT);
}

#[test]
fn test_world_edge_is_a_hard_wall() {
    let mut engine = empty_streets();
    let pass_x = engine.world_layout().unwrap().pass_x();
    set_player(&mut engine, Vec3::new(pass_x, 0.75, 289.5), 0.0, 0.79);

    let snap = engine.advance(FRAME, &FrameInput::forward()).unwrap();
    assert_eq!(snap.player.transform.position, Vec3::new(pass_x, 0.75, 289.5));
    assert_eq!(snap.player.speed, 0.0);
}

#[test]
fn test_collidable_stops_vehicle() {
    let mut engine = empty_streets();
    engine.spawn_test_vehicle(
        parked_vehicle(VehicleState::Driving),
        Transform::new(Vec3::new(0.0, 0.75, 4.2), 0.0),
    );
    set_player(&mut engine, Vec3::new(0.0, 0.75, 0.0), 0.0, 0.29);

    let snap = engine.advance(FRAME, &FrameInput::forward()).unwrap();
    assert_eq!(snap.player.transform.position, Vec3::new(0.0, 0.75, 0.0));
    assert_eq!(snap.player.speed, 0.0);
    assert_eq!(snap.score, 0);
}

#[test]
fn test_wrecks_do_not_block_player() {
    let mut engine = empty_streets();
    engine.spawn_test_vehicle(
        parked_vehicle(VehicleState::Hit),
        Transform::new(Vec3::new(0.0, 0.75, 4.2), 0.0),
    );
    set_player(&mut engine, Vec3::new(0.0, 0.75, 0.0), 0.0, 0.29);

    let snap = engine.advance(FRAME, &FrameInput::forward()).unwrap();
    assert!(snap.player.transform.position.z > 0.29);
}

// ---- Agents in the engine ----

#[test]
fn test_idle_pedestrian_starts_walking_next_frame() {
    let mut engine = empty_streets();
    let (mut ped, pose) = idle_pedestrian_at(Vec3::new(40.0, PEDESTRIAN_BASE_Y, 40.0));
    ped.idle_timer = 0.0;
    let walker = engine.spawn_test_pedestrian(ped, pose);

    let snap = engine.advance(0.001, &FrameInput::idle()).unwrap();
    assert_eq!(snap.pedestrians.len(), 1);
    assert_eq!(snap.pedestrians[0].state, PedestrianState::Walking);
    let destination = engine.world().get::<&Pedestrian>(walker).unwrap().destination;
    assert!(engine.world_layout().unwrap().sidewalks.contains(destination));
}

#[test]
fn test_fallen_pedestrian_recycled_to_sidewalk() {
    let mut engine = empty_streets();
    let (mut ped, pose) = idle_pedestrian_at(Vec3::new(5.0, -5.5, 5.0));
    ped.state = PedestrianState::Hit;
    let body = engine.spawn_test_pedestrian(ped, pose);

    let snap = engine.advance(FRAME, &FrameInput::idle()).unwrap();
    assert_eq!(snap.pedestrians[0].state, PedestrianState::Idle);
    let position = engine.world().get::<&Transform>(body).unwrap().position;
    assert!(engine.world_layout().unwrap().sidewalks.contains(position));
    assert_eq!(position.y, PEDESTRIAN_BASE_Y);
}

#[test]
fn test_vehicle_at_intersection_turns() {
    let mut engine = empty_streets();
    let vehicle = AiVehicle {
        velocity: heading_vector(0.0) * 0.1,
        speed: 0.1,
        ..parked_vehicle(VehicleState::Driving)
    };
    engine.spawn_test_vehicle(vehicle, Transform::new(Vec3::new(32.0, 0.75, 31.5), 0.0));

    let snap = engine.advance(FRAME, &FrameInput::idle()).unwrap();
    assert!(snap.vehicles[0].is_turning);
}

// ---- Events ----

#[test]
fn test_audio_events_dropped_until_ready() {
    let mut engine = SimulationEngine::new(SimConfig {
        audio_ready: false,
        ..Default::default()
    });
    engine.initialize().unwrap();
    engine.clear_agents();
    let (ped, pose) = idle_pedestrian_at(Vec3::new(0.0, PEDESTRIAN_BASE_Y, 2.5));
    engine.spawn_test_pedestrian(ped, pose);
    set_player(&mut engine, Vec3::new(0.0, 0.75, 0.0), 0.0, 0.29);

    let snap = engine.advance(FRAME, &FrameInput::forward()).unwrap();
    assert_eq!(snap.events, vec![SimEvent::ScoreChanged { new_score: 1 }]);

    engine.set_audio_ready(true);
    assert!(engine.audio_ready());
    let snap = engine.advance(FRAME, &FrameInput::fire()).unwrap();
    assert!(snap
        .events
        .iter()
        .any(|e| matches!(e, SimEvent::MissileFired { .. })));
}

#[test]
fn test_event_bus_drains() {
    let mut bus = EventBus::new(true);
    bus.emit(SimEvent::Explosion {
        position: Vec3::ZERO,
    });
    assert_eq!(bus.drain().len(), 1);
    assert!(bus.drain().is_empty());
}
