//! Standalone traffic simulation engine
//!
//! All the core logic lives here, independent of any rendering stack: a
//! world can be generated, stepped, and inspected headlessly. The optional
//! Bevy UI only reads the state this module exposes.

pub mod consts;

mod car;
mod generator;
mod geometry;
mod road;
mod timing;
mod world;

pub use car::{Car, LeadState};
pub use generator::WorldGenerator;
pub use geometry::{point_at, polyline_length, Placement, Vec2};
pub use road::{Road, RoadPath};
pub use timing::{FrameTimer, MovingAverage};
pub use world::{World, WorldSummary};
