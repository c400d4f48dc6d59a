//! Deterministic simulation module
//!
//! All ball logic lives here. This module must stay pure and deterministic:
//! - One fixed tick per update, no wall-clock time
//! - Seeded RNG only
//! - Stable iteration order (insertion order)
//! - No rendering or platform dependencies

pub mod params;
pub mod physics;
pub mod state;
pub mod world;

pub use params::{SimParams, Tunable};
pub use physics::{CollisionResult, advance, ball_bounce_circle_collision, reflect_velocity};
pub use state::{Ball, BallSet, random_point_in_disk};
pub use world::{FrameReport, InputEvent, LoopState, Simulation};
