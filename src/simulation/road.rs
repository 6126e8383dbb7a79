//! Roads, lanes, and the road-position to world-space mapping
//!
//! A road is an ordered path with one or more lanes, each lane owning an
//! ordered collection of cars. Cars travel in a scalar coordinate along
//! the path; the path kind only matters when mapping that coordinate into
//! world space for rendering.

use anyhow::{bail, Context, Result};
use ordered_float::OrderedFloat;
use std::f32::consts::TAU;

use super::car::{Car, LeadState};
use super::geometry::{point_at, polyline_length, Placement, Vec2};

/// The geometry of a road's path.
#[derive(Debug, Clone)]
pub enum RoadPath {
    /// An open polyline through the given points
    Polyline(Vec<Vec2>),
    /// A closed circular band of lanes around a center. Lane `n` sits at
    /// radius `n * lane_width + min_radius`.
    Circular {
        center: Vec2,
        min_radius: f32,
        lane_width: f32,
    },
}

/// A road with one or more lanes of cars.
#[derive(Debug, Clone)]
pub struct Road {
    pub path: RoadPath,
    /// Per-lane ordered car collections. Ordering is re-established by
    /// `sort_cars` at the start of every step.
    pub lanes: Vec<Vec<Car>>,
    /// Precomputed path length: polyline arc length, or the innermost
    /// lane's circumference for the circular variant
    pub length: f32,
}

impl Road {
    /// An open polyline road. The points must describe a path of positive
    /// length.
    pub fn polyline(points: Vec<Vec2>, num_lanes: usize) -> Result<Self> {
        if num_lanes == 0 {
            bail!("a road needs at least one lane");
        }
        let length = polyline_length(&points);
        if length <= 0.0 {
            bail!("polyline road has no length ({} points)", points.len());
        }
        Ok(Self {
            path: RoadPath::Polyline(points),
            lanes: vec![Vec::new(); num_lanes],
            length,
        })
    }

    /// A closed circular multi-lane track around `center`.
    pub fn circular(
        center: Vec2,
        min_radius: f32,
        lane_width: f32,
        num_lanes: usize,
    ) -> Result<Self> {
        if num_lanes == 0 {
            bail!("a road needs at least one lane");
        }
        if min_radius <= 0.0 || lane_width <= 0.0 {
            bail!(
                "circular road needs positive radius and lane width (got {min_radius}, {lane_width})"
            );
        }
        Ok(Self {
            path: RoadPath::Circular {
                center,
                min_radius,
                lane_width,
            },
            lanes: vec![Vec::new(); num_lanes],
            // All lanes share the innermost lane's coordinate domain.
            length: TAU * min_radius,
        })
    }

    pub fn num_lanes(&self) -> usize {
        self.lanes.len()
    }

    pub fn car_count(&self) -> usize {
        self.lanes.iter().map(Vec::len).sum()
    }

    /// Append a car to the given lane and stamp its lane index. Ordering is
    /// not maintained until `sort_cars` runs.
    pub fn add_car(&mut self, mut car: Car, lane: usize) -> Result<()> {
        let lane_cars = self
            .lanes
            .get_mut(lane)
            .with_context(|| format!("lane {lane} out of range"))?;
        car.lane = lane;
        lane_cars.push(car);
        Ok(())
    }

    /// Stable-sort every lane by ascending position. Must run once per
    /// step, before the following pass, so that "next car in lane" is the
    /// immediate successor by position.
    pub fn sort_cars(&mut self) {
        for lane_cars in &mut self.lanes {
            lane_cars.sort_by_key(|car| OrderedFloat(car.position));
        }
    }

    /// Read-only traversal of every car with its lane successor. The
    /// successor wraps to the first car of the lane (the road is a closed
    /// loop of traffic) and is absent only when the lane holds exactly one
    /// car.
    pub fn for_each_car<F>(&self, mut f: F)
    where
        F: FnMut(&Road, &Car, Option<&Car>),
    {
        for lane_cars in &self.lanes {
            let count = lane_cars.len();
            for (index, car) in lane_cars.iter().enumerate() {
                let next = if count > 1 {
                    Some(&lane_cars[(index + 1) % count])
                } else {
                    None
                };
                f(self, car, next);
            }
        }
    }

    /// Map a road position in a lane to a world-space point and travel
    /// tangent. The position is wrapped modulo the road length first;
    /// wraparound is the steady-state case, not an error.
    pub fn position_to_world(&self, position: f32, lane: usize) -> Result<Placement> {
        if lane >= self.lanes.len() {
            bail!("lane {lane} out of range");
        }
        let s = position.rem_euclid(self.length);
        match &self.path {
            RoadPath::Polyline(points) => point_at(points, s),
            RoadPath::Circular {
                center,
                min_radius,
                lane_width,
            } => {
                let radius = lane as f32 * lane_width + min_radius;
                let angle = s / self.length * TAU;
                let radial = Vec2::new(angle.cos(), angle.sin());
                let translate = *center + radial * radius;
                Ok(Placement {
                    translate,
                    // Rotated radius normal, pointing the travel direction.
                    tangent: radial.normal()?,
                })
            }
        }
    }

    /// Run the car-following pass over every lane. `sort_cars` must have
    /// run first so the successor relation holds.
    pub fn step(&mut self, dt: f32) {
        for lane_index in 0..self.lanes.len() {
            let count = self.lanes[lane_index].len();
            for index in 0..count {
                let lead = if count > 1 {
                    let successor = &self.lanes[lane_index][(index + 1) % count];
                    Some(LeadState {
                        position: successor.position,
                        speed: successor.speed,
                    })
                } else {
                    None
                };

                let collided = self.lanes[lane_index][index].advance(lead, self.length, dt);
                if collided {
                    self.lanes[lane_index][(index + 1) % count].wreck();
                }
            }
        }
    }
}
