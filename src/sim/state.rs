//! Ball entities and the live ball collection

use glam::Vec2;
use rand::Rng;

use super::params::SimParams;
use super::physics::advance;

/// A ball entity
#[derive(Debug, Clone, PartialEq)]
pub struct Ball {
    /// Position in canvas pixels
    pub pos: Vec2,
    /// Velocity in pixels per tick
    pub vel: Vec2,
}

impl Ball {
    pub fn new(pos: Vec2, vel: Vec2) -> Self {
        Self { pos, vel }
    }

    /// A motionless ball at `pos`
    pub fn at_rest(pos: Vec2) -> Self {
        Self::new(pos, Vec2::ZERO)
    }
}

/// Live balls in insertion order
///
/// Balls never interact, so the order only matters for replaying a run.
#[derive(Debug, Clone, Default)]
pub struct BallSet {
    balls: Vec<Ball>,
}

impl BallSet {
    pub fn new() -> Self {
        Self::default()
    }

    /// Append a ball at rest at `point`
    pub fn spawn(&mut self, point: Vec2) {
        self.balls.push(Ball::at_rest(point));
    }

    /// Append an already-moving ball
    pub fn insert(&mut self, ball: Ball) {
        self.balls.push(ball);
    }

    /// Advance every ball one tick and drop the ones that crossed the
    /// delete circle. Returns how many were removed.
    pub fn tick(&mut self, params: &SimParams) -> usize {
        let before = self.balls.len();
        self.balls.retain_mut(|ball| !advance(ball, params));
        before - self.balls.len()
    }

    /// Remove every ball
    pub fn clear(&mut self) {
        self.balls.clear();
    }

    pub fn len(&self) -> usize {
        self.balls.len()
    }

    pub fn is_empty(&self) -> bool {
        self.balls.is_empty()
    }

    pub fn iter(&self) -> impl Iterator<Item = &Ball> {
        self.balls.iter()
    }

    pub fn as_slice(&self) -> &[Ball] {
        &self.balls
    }
}

/// Uniform random point inside a disk, by rejection sampling in the
/// bounding square
pub fn random_point_in_disk<R: Rng + ?Sized>(rng: &mut R, center: Vec2, radius: f32) -> Vec2 {
    if radius.is_nan() || radius <= 0.0 {
        return center;
    }
    loop {
        let x = rng.random_range(-radius..=radius);
        let y = rng.random_range(-radius..=radius);
        if x * x + y * y <= radius * radius {
            return center + Vec2::new(x, y);
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use rand::SeedableRng;
    use rand_pcg::Pcg32;

    #[test]
    fn test_spawn_at_rest_in_order() {
        let mut set = BallSet::new();
        set.spawn(Vec2::new(1.0, 2.0));
        set.spawn(Vec2::new(3.0, 4.0));

        assert_eq!(set.len(), 2);
        assert_eq!(set.as_slice()[0].pos, Vec2::new(1.0, 2.0));
        assert_eq!(set.as_slice()[1].pos, Vec2::new(3.0, 4.0));
        assert!(set.iter().all(|b| b.vel == Vec2::ZERO));
    }

    #[test]
    fn test_tick_prunes_and_keeps_order() {
        let params = SimParams::default();
        let mut set = BallSet::new();
        set.spawn(params.center + Vec2::new(-10.0, 0.0));
        // Already past the delete circle
        set.insert(Ball::new(params.center + Vec2::new(0.0, -260.0), Vec2::ZERO));
        set.spawn(params.center + Vec2::new(10.0, 0.0));

        let removed = set.tick(&params);

        assert_eq!(removed, 1);
        assert_eq!(set.len(), 2);
        assert!(set.as_slice()[0].pos.x < params.center.x);
        assert!(set.as_slice()[1].pos.x > params.center.x);
    }

    #[test]
    fn test_clear() {
        let mut set = BallSet::new();
        set.spawn(Vec2::ZERO);
        set.spawn(Vec2::ONE);
        set.clear();
        assert!(set.is_empty());
    }

    #[test]
    fn test_balls_are_independent() {
        let params = SimParams::default();
        let start = params.center + Vec2::new(40.0, -30.0);

        // Reference trajectory for a lone ball
        let mut lone = BallSet::new();
        lone.spawn(start);
        let mut reference = Vec::new();
        for _ in 0..200 {
            lone.tick(&params);
            reference.push(lone.as_slice()[0].clone());
        }

        // Same ball spawned 50 ticks after another one
        let mut shared = BallSet::new();
        shared.spawn(start);
        for _ in 0..50 {
            shared.tick(&params);
        }
        shared.spawn(start);
        for expected in reference.iter().take(150) {
            shared.tick(&params);
            assert_eq!(&shared.as_slice()[1], expected);
        }
    }

    #[test]
    fn test_random_point_in_disk() {
        let mut rng = Pcg32::seed_from_u64(7);
        let center = Vec2::new(375.0, 350.0);
        for _ in 0..1000 {
            let p = random_point_in_disk(&mut rng, center, 200.0);
            assert!(p.distance(center) <= 200.0 + 1e-3);
        }
    }

    #[test]
    fn test_random_point_zero_radius() {
        let mut rng = Pcg32::seed_from_u64(7);
        assert_eq!(random_point_in_disk(&mut rng, Vec2::ONE, 0.0), Vec2::ONE);
    }
}
