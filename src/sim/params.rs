//! Simulation parameters
//!
//! One struct owns every tunable and constant the physics step reads. The
//! loop mutates it between ticks; balls only ever borrow it.

use glam::Vec2;
use serde::{Deserialize, Serialize};

use crate::consts::*;

/// Process-wide simulation parameters
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct SimParams {
    /// Radius of every ball (slider-bound)
    pub ball_radius: f32,
    /// Radius of the circle balls bounce inside (slider-bound)
    pub bounce_radius: f32,
    /// Radius past which balls are deleted (slider-bound)
    pub delete_radius: f32,
    /// Added to vy once per tick
    pub gravity: f32,
    /// Vertical speed kept after a floor bounce
    pub floor_damping: f32,
    /// Floor contacts slower than this stop the ball
    pub velocity_threshold: f32,
    /// Arena center in canvas pixels
    pub center: Vec2,
    /// y coordinate of the screen floor
    pub floor_y: f32,
}

impl Default for SimParams {
    fn default() -> Self {
        Self {
            ball_radius: DEFAULT_BALL_RADIUS,
            bounce_radius: DEFAULT_BOUNCE_RADIUS,
            delete_radius: DEFAULT_DELETE_RADIUS,
            gravity: GRAVITY,
            floor_damping: FLOOR_DAMPING,
            velocity_threshold: VELOCITY_THRESHOLD,
            center: crate::arena_center(),
            floor_y: CANVAS_HEIGHT,
        }
    }
}

impl SimParams {
    /// Current value of a slider-bound parameter
    pub fn get(&self, tunable: Tunable) -> f32 {
        match tunable {
            Tunable::BallSize => self.ball_radius,
            Tunable::BounceCircle => self.bounce_radius,
            Tunable::DeleteCircle => self.delete_radius,
        }
    }

    /// Set a slider-bound parameter, clamped to its range
    pub fn set(&mut self, tunable: Tunable, value: f32) {
        let value = tunable.clamp(value);
        match tunable {
            Tunable::BallSize => self.ball_radius = value,
            Tunable::BounceCircle => self.bounce_radius = value,
            Tunable::DeleteCircle => self.delete_radius = value,
        }
    }
}

/// The three parameters exposed through sliders
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum Tunable {
    BallSize,
    BounceCircle,
    DeleteCircle,
}

impl Tunable {
    /// Panel order, which is also the hit-test order for drag start
    pub const ALL: [Tunable; 3] = [Tunable::BallSize, Tunable::BounceCircle, Tunable::DeleteCircle];

    pub fn label(&self) -> &'static str {
        match self {
            Tunable::BallSize => "Ball Size",
            Tunable::BounceCircle => "Bounce Circle Size",
            Tunable::DeleteCircle => "Delete Circle Size",
        }
    }

    pub fn min(&self) -> f32 {
        match self {
            Tunable::BallSize => BALL_RADIUS_MIN,
            Tunable::BounceCircle => BOUNCE_RADIUS_MIN,
            Tunable::DeleteCircle => DELETE_RADIUS_MIN,
        }
    }

    pub fn max(&self) -> f32 {
        match self {
            Tunable::BallSize => BALL_RADIUS_MAX,
            Tunable::BounceCircle => BOUNCE_RADIUS_MAX,
            Tunable::DeleteCircle => DELETE_RADIUS_MAX,
        }
    }

    /// Round to a whole value inside `[min, max]` (NaN maps to `min`)
    pub fn clamp(&self, value: f32) -> f32 {
        if value.is_nan() {
            return self.min();
        }
        value.round().clamp(self.min(), self.max())
    }

    /// Position of the slider knob for a value, in `[0, 1]`
    pub fn normalized(&self, value: f32) -> f32 {
        (value / self.max()).clamp(0.0, 1.0)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_set_clamps_to_range() {
        let mut params = SimParams::default();
        params.set(Tunable::BallSize, 0.0);
        assert_eq!(params.ball_radius, 1.0);
        params.set(Tunable::BounceCircle, 10_000.0);
        assert_eq!(params.bounce_radius, 600.0);
        params.set(Tunable::DeleteCircle, 321.4);
        assert_eq!(params.get(Tunable::DeleteCircle), 321.0);
    }

    #[test]
    fn test_normalized_uses_full_scale() {
        assert!((Tunable::BallSize.normalized(30.0) - 0.5).abs() < 1e-6);
        assert!((Tunable::BounceCircle.normalized(200.0) - 1.0 / 3.0).abs() < 1e-6);
        assert_eq!(Tunable::DeleteCircle.normalized(900.0), 1.0);
    }

    #[test]
    fn test_nan_clamps_to_min() {
        assert_eq!(Tunable::DeleteCircle.clamp(f32::NAN), DELETE_RADIUS_MIN);
    }
}
