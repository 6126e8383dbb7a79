//! UI module that visualizes the simulation state using Bevy
//!
//! Purely a viewer: all simulation logic lives in the `simulation` module.
//! Systems here read the world state and draw it; the only mutation is the
//! fixed-rate tick call.

mod render;

use bevy::prelude::*;

use crate::simulation::{World, WorldGenerator};

use render::draw_world;

/// Resource wrapper for the simulation world
#[derive(Resource)]
pub struct WorldResource(pub World);

/// Display bounds handed to the generator
const WORLD_WIDTH: f32 = 800.0;
const WORLD_HEIGHT: f32 = 600.0;

impl WorldResource {
    /// Generate a fresh world, seeded when a seed is given.
    pub fn generate(seed: Option<u64>) -> Self {
        let mut generator = match seed {
            Some(seed) => WorldGenerator::with_seed(seed),
            None => WorldGenerator::new(),
        };
        let world = generator
            .generate(WORLD_WIDTH, WORLD_HEIGHT)
            .expect("world generation with built-in constants");
        Self(world)
    }
}

/// Whether stepping is suspended. Takes effect at the next tick boundary;
/// a tick in flight always completes.
#[derive(Resource, Default)]
pub struct Paused(pub bool);

/// Seed used for regeneration, kept from startup
#[derive(Resource)]
pub struct WorldSeed(pub Option<u64>);

/// Plugin to register all UI systems
pub struct JamSimUiPlugin {
    pub seed: Option<u64>,
}

impl Plugin for JamSimUiPlugin {
    fn build(&self, app: &mut App) {
        app.insert_resource(WorldResource::generate(self.seed))
            .insert_resource(WorldSeed(self.seed))
            .init_resource::<Paused>()
            .add_systems(Startup, setup_camera)
            .add_systems(FixedUpdate, tick_simulation)
            .add_systems(Update, (handle_input, draw_world));
    }
}

/// Camera centered on the generated world
fn setup_camera(mut commands: Commands, world: Res<WorldResource>) {
    let center = Vec3::new(world.0.width * 0.5, world.0.height * 0.5, 0.0);
    commands.spawn((Camera2d, Transform::from_translation(center)));
}

/// System to run the simulation step at the fixed rate
fn tick_simulation(
    time: Res<Time>,
    paused: Res<Paused>,
    mut world: ResMut<WorldResource>,
) {
    if !paused.0 {
        world.0.step(time.delta_secs());
    }
}

/// Pause toggling and world regeneration
fn handle_input(
    keys: Res<ButtonInput<KeyCode>>,
    seed: Res<WorldSeed>,
    mut paused: ResMut<Paused>,
    mut world: ResMut<WorldResource>,
) {
    if keys.just_pressed(KeyCode::Space) {
        paused.0 = !paused.0;
    }
    if keys.just_pressed(KeyCode::KeyR) {
        *world = WorldResource::generate(seed.0);
    }
}
