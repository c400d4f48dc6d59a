//! Per-ball physics step
//!
//! Gravity and translation run first, then the boundary tests against the
//! position they produced. There is no sub-stepping, so a fast ball can
//! tunnel through a boundary in one tick.

use glam::Vec2;

use super::params::SimParams;
use super::state::Ball;

/// Below this center distance the boundary normal is undefined
pub const NORMAL_EPSILON: f32 = 1e-4;

/// Result of a boundary check
#[derive(Debug, Clone)]
pub struct CollisionResult {
    /// Whether the ball overlaps the boundary
    pub hit: bool,
    /// Unit vector from the arena center toward the ball
    pub normal: Vec2,
    /// How far the ball pokes past the boundary
    pub penetration: f32,
}

impl CollisionResult {
    pub fn miss() -> Self {
        Self {
            hit: false,
            normal: Vec2::ZERO,
            penetration: 0.0,
        }
    }
}

/// Reflect velocity off a surface with the given unit normal
#[inline]
pub fn reflect_velocity(velocity: Vec2, normal: Vec2) -> Vec2 {
    velocity - 2.0 * velocity.dot(normal) * normal
}

/// Unit vector from `center` to `pos`, if the two are far enough apart
#[inline]
pub fn outward_normal(pos: Vec2, center: Vec2) -> Option<Vec2> {
    let offset = pos - center;
    let dist = offset.length();
    (dist >= NORMAL_EPSILON).then(|| offset / dist)
}

/// Check a ball against the inside of the bounce circle
///
/// A ball sitting on the center cannot be corrected and always misses.
pub fn ball_bounce_circle_collision(
    ball_pos: Vec2,
    ball_radius: f32,
    center: Vec2,
    bounce_radius: f32,
) -> CollisionResult {
    let dist = ball_pos.distance(center);
    if dist + ball_radius <= bounce_radius {
        return CollisionResult::miss();
    }

    match outward_normal(ball_pos, center) {
        Some(normal) => CollisionResult {
            hit: true,
            normal,
            penetration: dist + ball_radius - bounce_radius,
        },
        None => CollisionResult::miss(),
    }
}

/// Whether a ball has crossed the delete circle
#[inline]
pub fn ball_outside_delete_circle(
    ball_pos: Vec2,
    ball_radius: f32,
    center: Vec2,
    delete_radius: f32,
) -> bool {
    ball_pos.distance(center) + ball_radius > delete_radius
}

/// Whether a ball touches the screen floor
#[inline]
pub fn ball_on_floor(ball_pos: Vec2, ball_radius: f32, floor_y: f32) -> bool {
    ball_pos.y + ball_radius >= floor_y
}

/// Advance one ball by one tick
///
/// Returns `true` when the ball crossed the delete circle and must be removed.
pub fn advance(ball: &mut Ball, params: &SimParams) -> bool {
    let radius = params.ball_radius;

    ball.vel.y += params.gravity;
    ball.pos += ball.vel;

    if ball_outside_delete_circle(ball.pos, radius, params.center, params.delete_radius) {
        return true;
    }

    let contact = ball_bounce_circle_collision(ball.pos, radius, params.center, params.bounce_radius);
    if contact.hit {
        ball.pos -= contact.normal * contact.penetration;

        // The correction can carry the ball across the center when the ball
        // is wider than the circle, so the normal is taken again.
        if let Some(normal) = outward_normal(ball.pos, params.center) {
            ball.vel = reflect_velocity(ball.vel, normal);
        }
    }

    if ball_on_floor(ball.pos, radius, params.floor_y) {
        if ball.vel.y.abs() < params.velocity_threshold {
            ball.vel.y = 0.0;
        } else {
            ball.vel.y *= -params.floor_damping;
        }
    }

    false
}

#[cfg(test)]
mod tests {
    use super::*;
    use proptest::prelude::*;

    fn params() -> SimParams {
        SimParams::default()
    }

    #[test]
    fn test_gravity_then_translation() {
        let params = params();
        let mut ball = Ball::at_rest(params.center);

        assert!(!advance(&mut ball, &params));
        assert_eq!(ball.vel, Vec2::new(0.0, params.gravity));
        assert_eq!(ball.pos, params.center + Vec2::new(0.0, params.gravity));

        assert!(!advance(&mut ball, &params));
        assert_eq!(ball.vel.y, 2.0 * params.gravity);
    }

    #[test]
    fn test_center_spawn_survives_first_tick() {
        let params = params();
        let mut ball = Ball::at_rest(params.center);
        assert!(!advance(&mut ball, &params));
    }

    #[test]
    fn test_reflect_velocity() {
        let reflected = reflect_velocity(Vec2::new(100.0, 0.0), Vec2::new(-1.0, 0.0));
        assert!((reflected.x + 100.0).abs() < 0.001);
        assert!(reflected.y.abs() < 0.001);
    }

    #[test]
    fn test_bounce_pushes_back_and_reflects() {
        let params = params();
        // Moving right, will overlap the bounce circle after translation
        let mut ball = Ball::new(params.center + Vec2::new(185.0, 0.0), Vec2::new(10.0, 0.0));

        assert!(!advance(&mut ball, &params));

        let dist = ball.pos.distance(params.center);
        assert!((dist + params.ball_radius - params.bounce_radius).abs() < 0.01);
        assert!(ball.vel.x < 0.0, "velocity should point back inward");
    }

    #[test]
    fn test_bounce_circle_miss_when_inside() {
        let result = ball_bounce_circle_collision(Vec2::new(100.0, 0.0), 12.0, Vec2::ZERO, 200.0);
        assert!(!result.hit);

        let result = ball_bounce_circle_collision(Vec2::new(195.0, 0.0), 12.0, Vec2::ZERO, 200.0);
        assert!(result.hit);
        assert!((result.penetration - 7.0).abs() < 0.001);
        assert_eq!(result.normal, Vec2::X);
    }

    #[test]
    fn test_degenerate_center_is_skipped() {
        // Ball wider than the bounce circle, resting exactly on the center
        let params = SimParams {
            ball_radius: 60.0,
            bounce_radius: 50.0,
            delete_radius: 700.0,
            gravity: 0.0,
            ..SimParams::default()
        };
        let mut ball = Ball::at_rest(params.center);

        assert!(!advance(&mut ball, &params));
        assert!(ball.pos.is_finite());
        assert!(ball.vel.is_finite());
        assert_eq!(ball.pos, params.center);
    }

    #[test]
    fn test_delete_circle_removal() {
        let params = params();
        let mut ball = Ball::new(params.center + Vec2::new(0.0, -245.0), Vec2::new(0.0, -20.0));
        assert!(advance(&mut ball, &params));
    }

    #[test]
    fn test_floor_bounce_damps() {
        let params = SimParams {
            bounce_radius: 600.0,
            delete_radius: 700.0,
            ..SimParams::default()
        };
        let floor_y = params.floor_y - params.ball_radius;
        let mut ball = Ball::new(Vec2::new(params.center.x, floor_y - 4.5), Vec2::new(0.0, 4.5));

        assert!(!advance(&mut ball, &params));
        assert!((ball.vel.y + 5.0 * params.floor_damping).abs() < 1e-4);
    }

    #[test]
    fn test_floor_rest_then_falls_again() {
        let params = SimParams {
            bounce_radius: 600.0,
            delete_radius: 700.0,
            gravity: 0.05,
            ..SimParams::default()
        };
        let rest_y = params.floor_y - params.ball_radius;
        let mut ball = Ball::new(Vec2::new(params.center.x, rest_y), Vec2::ZERO);

        // 0.05 is below the threshold: the floor zeroes it
        assert!(!advance(&mut ball, &params));
        assert_eq!(ball.vel.y, 0.0);

        // Resting is not sticky; gravity is added again on the next tick
        let mut grounded = ball.clone();
        grounded.pos.y = rest_y - 10.0;
        assert!(!advance(&mut grounded, &params));
        assert_eq!(grounded.vel.y, params.gravity);
    }

    proptest! {
        #[test]
        fn prop_gravity_applied_before_correction(
            x in -100.0f32..100.0,
            y in -100.0f32..100.0,
            vx in -3.0f32..3.0,
            vy in -3.0f32..3.0,
        ) {
            // Well inside every boundary, so nothing corrects the velocity
            let params = params();
            let mut ball = Ball::new(params.center + Vec2::new(x, y), Vec2::new(vx, vy));
            prop_assert!(!advance(&mut ball, &params));
            prop_assert!((ball.vel.y - (vy + params.gravity)).abs() < 1e-5);
            prop_assert_eq!(ball.vel.x, vx);
        }

        #[test]
        fn prop_survivors_stay_inside_delete_circle(
            angle in 0.0f32..std::f32::consts::TAU,
            dist in 0.0f32..260.0,
            vx in -30.0f32..30.0,
            vy in -30.0f32..30.0,
            ball_radius in 1.0f32..50.0,
        ) {
            let params = SimParams { ball_radius, ..SimParams::default() };
            let start = params.center + Vec2::from_angle(angle) * dist;
            let mut ball = Ball::new(start, Vec2::new(vx, vy));

            let removed = advance(&mut ball, &params);
            if !removed {
                let d = ball.pos.distance(params.center);
                prop_assert!(d + params.ball_radius <= params.delete_radius + 1e-3);
            }
        }
    }
}
