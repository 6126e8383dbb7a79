//! Car state and the car-following / collision rule
//!
//! Each car interacts only with its immediate successor in the same lane,
//! which keeps the rule O(1) per car while still producing the classic
//! backward-propagating braking waves in dense traffic.

use log::debug;

use super::consts::{COLLISION_DISTANCE_DELTA, DELTA, MIN_IMPACT_TIME, MIN_KEEPING_DISTANCE};

/// Position and speed of the next car in the lane, sampled before the
/// following pass mutates it.
#[derive(Debug, Clone, Copy)]
pub struct LeadState {
    pub position: f32,
    pub speed: f32,
}

/// A car in the traffic simulation
#[derive(Debug, Clone)]
pub struct Car {
    /// Car length in world units
    pub length: f32,
    /// Road-local scalar coordinate, wrapped into [0, road length) at the
    /// end of each step
    pub position: f32,
    pub speed: f32,
    pub acceleration: f32,
    pub max_speed: f32,
    pub max_acceleration: f32,
    /// Minimum travel time to the next car's rear kept while in motion
    pub min_keeping_time: f32,
    /// Lane index, stamped by `Road::add_car`
    pub lane: usize,
    /// Terminal collision state. Once set, speed is pinned to zero and the
    /// position never changes again.
    pub wrecked: bool,
    /// Opaque display attribute
    pub color: [u8; 3],
}

impl Car {
    pub fn new(
        length: f32,
        max_speed: f32,
        max_acceleration: f32,
        min_keeping_time: f32,
        color: [u8; 3],
    ) -> Self {
        debug_assert!(length > 0.0 && max_speed > 0.0 && max_acceleration > 0.0);
        debug_assert!(min_keeping_time > 0.0);
        Self {
            length,
            position: 0.0,
            speed: 0.0,
            acceleration: 0.0,
            max_speed,
            max_acceleration,
            min_keeping_time,
            lane: 0,
            wrecked: false,
            color,
        }
    }

    /// Freeze the car after a rear-end collision.
    pub fn wreck(&mut self) {
        self.speed = 0.0;
        self.acceleration = 0.0;
        self.wrecked = true;
    }

    /// Apply the car-following rule and integrate one step of `dt` seconds.
    ///
    /// `lead` is the successor's state, absent only when this car is alone
    /// in its lane. Returns `true` when the step ended in a rear-end
    /// collision; the caller must then wreck the successor as well.
    pub fn advance(&mut self, lead: Option<LeadState>, road_length: f32, dt: f32) -> bool {
        if self.wrecked {
            return false;
        }

        // Free-flow default: accelerate toward top speed.
        self.acceleration = self.max_acceleration;

        let mut clearance = None;
        if let Some(lead) = lead {
            let closing_speed = self.speed - lead.speed;
            let mut gap = lead.position - self.position;
            // Normalize across the loop seam.
            while gap < 0.0 {
                gap += road_length;
            }

            let impact_time = if closing_speed.abs() > DELTA {
                gap / closing_speed
            } else {
                // Matched speeds, no projected impact.
                -1.0
            };
            if impact_time >= 0.0 && impact_time <= MIN_IMPACT_TIME {
                self.acceleration = -self.max_acceleration;
            }
            if self.speed > DELTA && gap / self.speed < self.min_keeping_time {
                self.acceleration = -self.max_acceleration;
            }
            if gap < MIN_KEEPING_DISTANCE {
                self.acceleration = -self.max_acceleration;
            }

            clearance = Some((gap, closing_speed, lead.position));
        }

        self.speed = (self.speed + self.acceleration * dt).clamp(0.0, self.max_speed);
        self.position += self.speed * dt + 0.5 * self.acceleration * dt * dt;

        let mut collided = false;
        if let Some((gap, closing_speed, lead_position)) = clearance {
            // Projected rear clearance after one second at the closing speed.
            if gap - closing_speed + COLLISION_DISTANCE_DELTA < self.length {
                self.position = lead_position - self.length;
                self.wreck();
                debug!(
                    "wreck in lane {} at position {:.1} (gap {:.2}, closing {:.2})",
                    self.lane, self.position, gap, closing_speed
                );
                collided = true;
            }
        }

        while self.position >= road_length {
            self.position -= road_length;
        }
        while self.position < 0.0 {
            self.position += road_length;
        }

        collided
    }
}
