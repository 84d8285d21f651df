//! Simulation engine, the frame orchestrator.
//!
//! `SimulationEngine` owns the hecs ECS world, the static world layout and
//! all per-run state, runs every system once per `advance` in a fixed order
//! and produces `SceneSnapshot`s. Completely headless, enabling
//! deterministic testing.

use hecs::{Entity, World};
use rand::{Rng, SeedableRng};
use rand_chacha::ChaCha8Rng;
use tracing::info;

use citydrive_core::commands::FrameInput;
use citydrive_core::config::SimConfig;
use citydrive_core::enums::SimPhase;
use citydrive_core::state::SceneSnapshot;
use citydrive_core::types::{ChaseCamera, SimTime, Transform};
use citydrive_core::SimError;
use citydrive_procgen::WorldLayout;

use crate::events::EventBus;
use crate::systems;
use crate::systems::collision::Resolution;
use crate::world_setup::{self, CollidableSet, HandleAllocator};

/// Everything that only exists once the world has been built.
struct Scene {
    layout: WorldLayout,
    player: Entity,
}

/// The simulation engine. Owns the ECS world and all sim state.
pub struct SimulationEngine {
    config: SimConfig,
    world: World,
    phase: SimPhase,
    time: SimTime,
    rng: ChaCha8Rng,
    scene: Option<Scene>,
    collidables: CollidableSet,
    camera: ChaseCamera,
    score: u32,
    handles: HandleAllocator,
    events: EventBus,
    despawn_buffer: Vec<Entity>,
}

impl SimulationEngine {
    /// Create an engine. Nothing is generated until [`initialize`](Self::initialize).
    pub fn new(config: SimConfig) -> Self {
        Self {
            world: World::new(),
            phase: SimPhase::default(),
            time: SimTime::default(),
            rng: ChaCha8Rng::seed_from_u64(config.seed),
            scene: None,
            collidables: Vec::new(),
            camera: ChaseCamera::default(),
            score: 0,
            handles: HandleAllocator::default(),
            events: EventBus::new(config.audio_ready),
            despawn_buffer: Vec::new(),
            config,
        }
    }

    /// Build the static world and spawn every agent. Called once by the host
    /// when it is ready to start.
    pub fn initialize(&mut self) -> Result<(), SimError> {
        if self.phase != SimPhase::Uninitialized {
            return Err(SimError::AlreadyInitialized);
        }
        let params = &self.config.world;
        params.validate()?;

        let layout = citydrive_procgen::generate(params, &mut self.rng);
        world_setup::spawn_static_world(&mut self.world, &layout, &mut self.collidables);

        let player = world_setup::spawn_player(&mut self.world, &mut self.handles);

        let pedestrians = self.rng.gen_range(params.pedestrian_count.clone());
        world_setup::spawn_pedestrians(
            &mut self.world,
            &mut self.handles,
            &layout.sidewalks,
            &mut self.rng,
            pedestrians,
        );

        let vehicles = self.rng.gen_range(params.vehicle_count.clone());
        world_setup::spawn_vehicles(
            &mut self.world,
            &mut self.handles,
            &layout.roads,
            &mut self.rng,
            vehicles,
            &mut self.collidables,
        );

        if let Ok(transform) = self.world.get::<&Transform>(player) {
            self.camera = systems::camera::snap_to(&transform);
        }

        info!(
            seed = self.config.seed,
            pedestrians,
            vehicles,
            collidables = self.collidables.len(),
            "simulation initialized"
        );

        self.scene = Some(Scene { layout, player });
        self.phase = SimPhase::Running;
        Ok(())
    }

    /// Advance the simulation by one frame and return the resulting snapshot.
    ///
    /// Rejected calls leave the simulation untouched.
    pub fn advance(&mut self, delta_secs: f32, input: &FrameInput) -> Result<SceneSnapshot, SimError> {
        let Some(scene) = self.scene.as_ref() else {
            return Err(SimError::NotInitialized);
        };
        if !delta_secs.is_finite() {
            return Err(SimError::NonFiniteDelta);
        }
        if delta_secs < 0.0 {
            return Err(SimError::NegativeDelta(delta_secs));
        }
        let player = scene.player;
        let params = &scene.layout.params;

        // 1. Player controller
        let step = systems::player::run(&mut self.world, player, &input.intents, delta_secs);
        // 2. Fire
        if input.fire {
            systems::projectile::fire(&mut self.world, player, &mut self.handles, &mut self.events);
        }
        let player_position = self
            .world
            .get::<&Transform>(player)
            .map(|t| t.position)
            .unwrap_or_default();
        // 3. Agent behavior
        systems::agents::run_pedestrians(
            &mut self.world,
            &scene.layout.sidewalks,
            player_position,
            delta_secs,
            &mut self.rng,
        );
        systems::agents::run_traffic(
            &mut self.world,
            &scene.layout.roads,
            params.wrap_extent(),
            player_position,
            &mut self.rng,
        );
        // 4. Projectile advance
        systems::projectile::advance(&mut self.world, delta_secs);
        // 5. Explosion aging
        systems::explosion::run(&mut self.world, delta_secs, &mut self.despawn_buffer);
        // 6. Collision resolution
        let mut res = Resolution {
            handles: &mut self.handles,
            events: &mut self.events,
            score: &mut self.score,
            despawn_buffer: &mut self.despawn_buffer,
        };
        systems::collision::run_projectiles(&mut self.world, &self.collidables, &mut res);
        if let Some(step) = step {
            systems::collision::run_player(
                &mut self.world,
                step,
                &self.collidables,
                params.world_half_extent(),
                &mut res,
            );
        }
        // 7. Camera follow
        if let Ok(transform) = self.world.get::<&Transform>(player) {
            systems::camera::follow(&mut self.camera, &transform);
        }
        // 8. Cleanup
        systems::cleanup::run(&mut self.world, &mut self.despawn_buffer);

        self.time.advance(delta_secs);

        Ok(systems::snapshot::build_snapshot(
            &self.world,
            player,
            &self.time,
            self.score,
            &self.camera,
            self.events.drain(),
        ))
    }

    /// Tell the engine whether the audio collaborator can play sounds.
    pub fn set_audio_ready(&mut self, ready: bool) {
        self.events.set_audio_ready(ready);
    }

    pub fn audio_ready(&self) -> bool {
        self.events.audio_ready()
    }

    /// The static world, for renderers to build geometry from once.
    pub fn world_layout(&self) -> Option<&WorldLayout> {
        self.scene.as_ref().map(|scene| &scene.layout)
    }

    /// Get the current lifecycle phase.
    pub fn phase(&self) -> SimPhase {
        self.phase
    }

    /// Get the current simulation time.
    pub fn time(&self) -> SimTime {
        self.time
    }

    pub fn score(&self) -> u32 {
        self.score
    }

    pub fn camera(&self) -> ChaseCamera {
        self.camera
    }

    pub fn config(&self) -> &SimConfig {
        &self.config
    }

    /// Get a read-only reference to the ECS world.
    pub fn world(&self) -> &World {
        &self.world
    }

    /// Number of registered collidables, static and dynamic.
    pub fn collidable_count(&self) -> usize {
        self.collidables.len()
    }

    #[cfg(test)]
    pub(crate) fn world_mut(&mut self) -> &mut World {
        &mut self.world
    }

    #[cfg(test)]
    pub(crate) fn player_entity(&self) -> Option<Entity> {
        self.scene.as_ref().map(|scene| scene.player)
    }

    /// Remove every pedestrian and AI vehicle so a test can stage its own.
    #[cfg(test)]
    pub(crate) fn clear_agents(&mut self) {
        use citydrive_core::components::{AiVehicle, Pedestrian};

        let mut doomed: Vec<Entity> = self.world.query::<&Pedestrian>().iter().map(|(e, _)| e).collect();
        doomed.extend(self.world.query::<&AiVehicle>().iter().map(|(e, _)| e));
        self.collidables.retain(|(entity, _)| !doomed.contains(entity));
        for entity in doomed {
            let _ = self.world.despawn(entity);
        }
    }

    #[cfg(test)]
    pub(crate) fn spawn_test_pedestrian(
        &mut self,
        ped: citydrive_core::components::Pedestrian,
        transform: Transform,
    ) -> Entity {
        world_setup::spawn_pedestrian(&mut self.world, &mut self.handles, ped, transform)
    }

    #[cfg(test)]
    pub(crate) fn spawn_test_vehicle(
        &mut self,
        vehicle: citydrive_core::components::AiVehicle,
        transform: Transform,
    ) -> Entity {
        world_setup::spawn_vehicle(
            &mut self.world,
            &mut self.handles,
            vehicle,
            transform,
            &mut self.collidables,
        )
    }
}
