//! Platform abstraction layer
//!
//! Handles browser/native differences for frame pacing. Input translation
//! lives with each entry point in `main.rs`.

pub mod time;

pub use time::FixedStep;
#[cfg(not(target_arch = "wasm32"))]
pub use time::TickClock;
