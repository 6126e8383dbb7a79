//! The simulation world: an ordered collection of roads
//!
//! The world owns its roads; roads are independent of each other, so one
//! step is simply a sort-then-follow pass over every road in order.

use super::road::Road;

/// Aggregate per-step statistics for display.
#[derive(Debug, Clone, Copy, Default)]
pub struct WorldSummary {
    pub cars: usize,
    pub wrecked: usize,
    /// Mean speed over non-wrecked cars; zero when there are none
    pub mean_speed: f32,
}

/// The main simulation world
pub struct World {
    /// Display bounds. Informational only; the engine never reads them.
    pub width: f32,
    pub height: f32,
    pub roads: Vec<Road>,
}

impl World {
    pub fn new(width: f32, height: f32) -> Self {
        Self {
            width,
            height,
            roads: Vec::new(),
        }
    }

    pub fn add_road(&mut self, road: Road) {
        self.roads.push(road);
    }

    /// Advance the whole world by `dt` seconds: for each road, re-establish
    /// the per-lane position ordering, then run the car-following pass.
    pub fn step(&mut self, dt: f32) {
        for road in &mut self.roads {
            road.sort_cars();
            road.step(dt);
        }
    }

    pub fn car_count(&self) -> usize {
        self.roads.iter().map(Road::car_count).sum()
    }

    pub fn summary(&self) -> WorldSummary {
        let mut summary = WorldSummary::default();
        let mut moving_speed_total = 0.0;
        for road in &self.roads {
            road.for_each_car(|_, car, _| {
                summary.cars += 1;
                if car.wrecked {
                    summary.wrecked += 1;
                } else {
                    moving_speed_total += car.speed;
                }
            });
        }
        let moving = summary.cars - summary.wrecked;
        if moving > 0 {
            summary.mean_speed = moving_speed_total / moving as f32;
        }
        summary
    }

    /// Print a summary of the world state
    pub fn print_summary(&self) {
        let summary = self.summary();
        println!("=== Traffic Summary ===");
        println!("Roads: {}", self.roads.len());
        println!(
            "Cars: {} ({} wrecked), mean speed {:.1}",
            summary.cars, summary.wrecked, summary.mean_speed
        );
        for (index, road) in self.roads.iter().enumerate() {
            for (lane_index, lane_cars) in road.lanes.iter().enumerate() {
                let wrecked = lane_cars.iter().filter(|car| car.wrecked).count();
                println!(
                    "  Road {} lane {}: {} cars, {} wrecked, length {:.0}",
                    index,
                    lane_index,
                    lane_cars.len(),
                    wrecked,
                    road.length
                );
            }
        }
    }
}
