//! Vector algebra and polyline mapping for road geometry
//!
//! The engine itself works in a scalar road coordinate; these helpers map
//! that coordinate into 2D world space for rendering.

use anyhow::{bail, Result};
use std::ops::{Add, Mul, Sub};

use super::consts::DELTA;

/// A 2D vector. Operations return new values.
#[derive(Debug, Clone, Copy, PartialEq, Default)]
pub struct Vec2 {
    pub x: f32,
    pub y: f32,
}

impl Vec2 {
    pub fn new(x: f32, y: f32) -> Self {
        Self { x, y }
    }

    pub fn magnitude(&self) -> f32 {
        (self.x * self.x + self.y * self.y).sqrt()
    }

    pub fn distance(&self, other: &Vec2) -> f32 {
        (*other - *self).magnitude()
    }

    /// Unit vector in the same direction.
    /// Errors when the magnitude is (near) zero.
    pub fn unit(&self) -> Result<Vec2> {
        let magnitude = self.magnitude();
        if magnitude < DELTA {
            bail!("unit vector of a zero-magnitude vector");
        }
        Ok(Vec2::new(self.x / magnitude, self.y / magnitude))
    }

    /// Unit vector perpendicular to this one (90 degrees counterclockwise).
    /// Errors when the magnitude is (near) zero.
    pub fn normal(&self) -> Result<Vec2> {
        let unit = self.unit()?;
        Ok(Vec2::new(-unit.y, unit.x))
    }
}

impl Add for Vec2 {
    type Output = Vec2;

    fn add(self, other: Vec2) -> Vec2 {
        Vec2::new(self.x + other.x, self.y + other.y)
    }
}

impl Sub for Vec2 {
    type Output = Vec2;

    fn sub(self, other: Vec2) -> Vec2 {
        Vec2::new(self.x - other.x, self.y - other.y)
    }
}

impl Mul<f32> for Vec2 {
    type Output = Vec2;

    fn mul(self, scale: f32) -> Vec2 {
        Vec2::new(self.x * scale, self.y * scale)
    }
}

/// A point on a road path together with the travel direction there.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Placement {
    pub translate: Vec2,
    pub tangent: Vec2,
}

/// Total arc length of a polyline. Zero for a single point.
pub fn polyline_length(points: &[Vec2]) -> f32 {
    points
        .windows(2)
        .map(|pair| pair[0].distance(&pair[1]))
        .sum()
}

/// Walks the polyline to the point at cumulative arc length `s`.
///
/// `s` must already be wrapped into `[0, length]`; values outside that
/// range beyond a small tolerance are a caller bug and error out.
pub fn point_at(points: &[Vec2], s: f32) -> Result<Placement> {
    if points.len() < 2 {
        bail!("polyline needs at least 2 points to locate a position");
    }
    if s < -DELTA {
        bail!("negative road position {s} passed to point_at");
    }

    let mut remaining = s.max(0.0);
    let mut last_segment = None;
    for pair in points.windows(2) {
        let segment = pair[1] - pair[0];
        let segment_length = segment.magnitude();
        if segment_length < DELTA {
            // Repeated points contribute no length.
            continue;
        }
        if remaining <= segment_length {
            let tangent = segment.unit()?;
            return Ok(Placement {
                translate: pair[0] + tangent * remaining,
                tangent,
            });
        }
        remaining -= segment_length;
        last_segment = Some((pair[1], segment));
    }

    // Float residue can leave us just past the final point.
    if remaining <= DELTA {
        if let Some((end, segment)) = last_segment {
            return Ok(Placement {
                translate: end,
                tangent: segment.unit()?,
            });
        }
    }
    bail!("road position {s} exceeds polyline length");
}
