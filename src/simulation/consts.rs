//! Tuning constants for the traffic engine

/// Nominal simulation rate for fixed-step runs
pub const TARGET_FPS: f32 = 30.0;

/// Range of per-car maximum acceleration (world units / s^2)
pub const MAX_ACCELERATION: f32 = 8.0;
pub const MIN_MAX_ACCELERATION: f32 = 2.0;

/// Range of per-car top speed (world units / s)
pub const MAX_SPEED: f32 = 100.0;
pub const MIN_MAX_SPEED: f32 = 70.0;

/// Range of the minimum travel time to the next car's rear that cars
/// keep while in motion (seconds)
pub const MAX_KEEPING_TIME: f32 = 2.0;
pub const MIN_KEEPING_TIME: f32 = 0.5;

/// Range of car lengths (world units)
pub const MIN_CAR_LENGTH: f32 = 5.0;
pub const MAX_CAR_LENGTH: f32 = 8.0;

/// Time-to-impact under which cars start braking (seconds)
pub const MIN_IMPACT_TIME: f32 = 1.0;

/// Hard minimum spacing to the next car's rear (world units)
pub const MIN_KEEPING_DISTANCE: f32 = 1.0;

/// General delta for floating-point comparisons
pub const DELTA: f32 = 0.001;

/// Slack added to the projected rear clearance before calling a wreck
pub const COLLISION_DISTANCE_DELTA: f32 = 0.1;

/// Display color for wrecked cars
pub const WRECKED_CAR_COLOR: [u8; 3] = [0, 0, 0];

/// Random world generation
pub const MAX_RANDOM_ROAD_POINTS: usize = 10;
pub const NUM_RANDOM_CARS_PER_ROAD: usize = 10;
pub const NUM_RANDOM_ROADS: usize = 1;
pub const LANES_PER_ROAD: usize = 2;

/// Circular track geometry
pub const LANE_WIDTH: f32 = 10.0;
pub const MIN_LANE_RADIUS: f32 = 150.0;
