//! Random world generation
//!
//! Seeds roads and cars for a fresh world. Kept outside the engine proper:
//! the step function never draws randomness, so a seeded generator gives
//! fully reproducible runs.

use anyhow::Result;
use log::debug;
use rand::rngs::StdRng;
use rand::{Rng, SeedableRng};

use super::car::Car;
use super::consts::{
    LANES_PER_ROAD, LANE_WIDTH, MAX_ACCELERATION, MAX_CAR_LENGTH, MAX_KEEPING_TIME,
    MAX_RANDOM_ROAD_POINTS, MAX_SPEED, MIN_CAR_LENGTH, MIN_KEEPING_DISTANCE, MIN_KEEPING_TIME,
    MIN_LANE_RADIUS, MIN_MAX_ACCELERATION, MIN_MAX_SPEED, NUM_RANDOM_CARS_PER_ROAD,
    NUM_RANDOM_ROADS,
};
use super::geometry::Vec2;
use super::road::Road;
use super::world::World;

/// Minimum segment length for random polyline points
const MIN_SEGMENT_LENGTH: f32 = 15.0;

/// Generates random worlds from a seeded RNG.
pub struct WorldGenerator {
    rng: StdRng,
}

impl WorldGenerator {
    /// Generator with an arbitrary seed.
    pub fn new() -> Self {
        Self::with_seed(rand::rng().random())
    }

    /// Generator with a fixed seed for reproducible worlds.
    pub fn with_seed(seed: u64) -> Self {
        Self {
            rng: StdRng::seed_from_u64(seed),
        }
    }

    /// Build a world of circular multi-lane tracks centered in the given
    /// display bounds, each lane seeded with cars packed nose to tail.
    pub fn generate(&mut self, width: f32, height: f32) -> Result<World> {
        let mut world = World::new(width, height);
        let center = Vec2::new(width, height) * 0.5;

        for _ in 0..NUM_RANDOM_ROADS {
            let mut road = Road::circular(center, MIN_LANE_RADIUS, LANE_WIDTH, LANES_PER_ROAD)?;
            for lane in 0..road.num_lanes() {
                for _ in 0..NUM_RANDOM_CARS_PER_ROAD {
                    self.add_random_car(&mut road, lane)?;
                }
            }
            road.sort_cars();
            debug!(
                "generated circular road: length {:.0}, {} cars",
                road.length,
                road.car_count()
            );
            world.add_road(road);
        }

        Ok(world)
    }

    /// A single-lane open polyline road seeded with random cars.
    pub fn random_polyline_road(&mut self, width: f32, height: f32) -> Result<Road> {
        let points = self.random_polyline_points(width, height);
        let mut road = Road::polyline(points, 1)?;
        for _ in 0..NUM_RANDOM_CARS_PER_ROAD {
            self.add_random_car(&mut road, 0)?;
        }
        road.sort_cars();
        Ok(road)
    }

    /// Random axis-aligned point chain: each segment extends the previous
    /// point along alternating axes.
    pub fn random_polyline_points(&mut self, width: f32, height: f32) -> Vec<Vec2> {
        let num_segments = self.rng.random_range(2..MAX_RANDOM_ROAD_POINTS + 2);
        let mut points = vec![self.random_point(width, height)];
        let mut prev = points[0];
        for segment in 0..num_segments {
            let mut delta;
            loop {
                delta = self.random_point(width, height) - prev;
                if delta.magnitude() >= MIN_SEGMENT_LENGTH {
                    break;
                }
            }
            let point = if segment % 2 == 0 {
                prev + Vec2::new(delta.x, 0.0)
            } else {
                prev + Vec2::new(0.0, delta.y)
            };
            points.push(point);
            prev = point;
        }
        points
    }

    /// Place a new random car just behind the last car already in the
    /// lane, with a small random gap.
    fn add_random_car(&mut self, road: &mut Road, lane: usize) -> Result<()> {
        let last = road
            .lanes
            .get(lane)
            .and_then(|cars| cars.last())
            .map(|car| (car.position, car.length));
        let (last_position, last_length) = last.unwrap_or((0.0, 0.0));

        let mut car = self.random_car();
        car.position = last_position
            + last_length
            + 1.0
            + self.rng.random_range(0.0..MIN_KEEPING_DISTANCE);
        road.add_car(car, lane)
    }

    fn random_car(&mut self) -> Car {
        let color = [
            self.rng.random_range(200..=255),
            self.rng.random_range(200..=255),
            self.rng.random_range(200..=255),
        ];
        Car::new(
            self.rng.random_range(MIN_CAR_LENGTH..MAX_CAR_LENGTH),
            self.rng.random_range(MIN_MAX_SPEED..MAX_SPEED),
            self.rng.random_range(MIN_MAX_ACCELERATION..MAX_ACCELERATION),
            self.rng.random_range(MIN_KEEPING_TIME..MAX_KEEPING_TIME),
            color,
        )
    }

    fn random_point(&mut self, width: f32, height: f32) -> Vec2 {
        Vec2::new(
            self.rng.random_range(0.0..width),
            self.rng.random_range(0.0..height),
        )
    }
}

impl Default for WorldGenerator {
    fn default() -> Self {
        Self::new()
    }
}
