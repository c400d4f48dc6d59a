//! Bounce Arena - balls falling inside a tunable circular arena
//!
//! Core modules:
//! - `sim`: Deterministic simulation (ball physics, ball collection, input handling)
//! - `ui`: Settings panel layout, sliders and font selection
//! - `renderer`: WebGPU rendering pipeline
//! - `platform`: Frame pacing for browser and native hosts
//! - `settings`: Startup configuration

pub mod platform;
pub mod renderer;
pub mod settings;
pub mod sim;
pub mod ui;

pub use settings::Settings;

use glam::Vec2;

/// Arena and panel configuration constants
pub mod consts {
    /// Simulation rate (ticks per second)
    pub const TICK_RATE: u32 = 60;
    /// Fixed simulation timestep in seconds
    pub const SIM_DT: f32 = 1.0 / TICK_RATE as f32;
    /// Maximum ticks run in one animation frame
    pub const MAX_SUBSTEPS: u32 = 4;

    /// Canvas size in pixels
    pub const CANVAS_WIDTH: f32 = 1500.0;
    pub const CANVAS_HEIGHT: f32 = 700.0;

    /// Arena center sits in the left quarter of the canvas
    pub const ARENA_CENTER_X: f32 = CANVAS_WIDTH / 4.0;
    pub const ARENA_CENTER_Y: f32 = CANVAS_HEIGHT / 2.0;

    /// Tunable defaults
    pub const DEFAULT_BALL_RADIUS: f32 = 12.0;
    pub const DEFAULT_BOUNCE_RADIUS: f32 = 200.0;
    pub const DEFAULT_DELETE_RADIUS: f32 = 250.0;

    /// Physics constants (per tick, y grows downward)
    pub const GRAVITY: f32 = 0.5;
    pub const FLOOR_DAMPING: f32 = 0.8;
    pub const VELOCITY_THRESHOLD: f32 = 0.1;

    /// Slider bounds
    pub const BALL_RADIUS_MIN: f32 = 1.0;
    pub const BALL_RADIUS_MAX: f32 = 60.0;
    pub const BOUNCE_RADIUS_MIN: f32 = 50.0;
    pub const BOUNCE_RADIUS_MAX: f32 = 600.0;
    pub const DELETE_RADIUS_MIN: f32 = 50.0;
    pub const DELETE_RADIUS_MAX: f32 = 700.0;

    /// Settings panel docked on the right edge
    pub const PANEL_WIDTH: f32 = 300.0;
    pub const PANEL_X: f32 = CANVAS_WIDTH - PANEL_WIDTH;

    /// Slider geometry
    pub const SLIDER_X: f32 = PANEL_X + 20.0;
    pub const SLIDER_WIDTH: f32 = 260.0;
    pub const SLIDER_HEIGHT: f32 = 15.0;
    pub const SLIDER_KNOB_RADIUS: f32 = 15.0;
    pub const SLIDER_FIRST_Y: f32 = 140.0;
    pub const SLIDER_SPACING: f32 = 50.0;

    /// Label layout
    pub const TITLE_FONT_SIZE: f32 = 50.0;
    pub const LABEL_FONT_SIZE: f32 = 30.0;
    pub const LABEL_FIRST_Y: f32 = 100.0;

    /// Key that removes every ball (matched case-insensitively)
    pub const CLEAR_KEY: char = 'r';
}

/// Arena center in canvas pixel coordinates
#[inline]
pub fn arena_center() -> Vec2 {
    Vec2::new(consts::ARENA_CENTER_X, consts::ARENA_CENTER_Y)
}
