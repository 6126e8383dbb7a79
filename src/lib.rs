//! Traffic Jam Simulation Library
//!
//! A car-following traffic simulator that can run headless or with a Bevy
//! visualization.

pub mod simulation;

#[cfg(feature = "ui")]
pub mod ui;
