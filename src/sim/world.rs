//! Simulation loop core
//!
//! Owns the parameters, the live balls, the slider panel and the spawn RNG.
//! A host feeds it input events and calls [`Simulation::frame`] once per
//! frame; drawing and pacing stay with the host.

use glam::Vec2;
use rand::SeedableRng;
use rand_pcg::Pcg32;

use super::params::{SimParams, Tunable};
use super::state::{BallSet, random_point_in_disk};
use crate::consts::CLEAR_KEY;
use crate::settings::Settings;
use crate::ui::panel::in_arena_area;
use crate::ui::slider::{SliderLayout, SliderPanel};

/// Input delivered by the host, in canvas pixel coordinates
#[derive(Debug, Clone, Copy, PartialEq)]
pub enum InputEvent {
    /// Window closed or page going away
    Quit,
    PointerDown(Vec2),
    PointerUp,
    PointerMove(Vec2),
    KeyDown(char),
}

/// Whether the host loop should keep going
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum LoopState {
    Running,
    Stopped,
}

/// What happened during one frame
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct FrameReport {
    pub spawned: usize,
    pub removed: usize,
    pub cleared: bool,
}

pub struct Simulation {
    pub params: SimParams,
    pub balls: BallSet,
    sliders: SliderPanel,
    state: LoopState,
    time_ticks: u64,
    rng: Pcg32,
}

impl Simulation {
    pub fn new(params: SimParams, seed: u64) -> Self {
        Self {
            sliders: SliderPanel::new(&params),
            params,
            balls: BallSet::new(),
            state: LoopState::Running,
            time_ticks: 0,
            rng: Pcg32::seed_from_u64(seed),
        }
    }

    /// Build from settings, using `fallback_seed` when none is configured
    pub fn from_settings(settings: &Settings, fallback_seed: u64) -> Self {
        let seed = settings.seed.unwrap_or(fallback_seed);
        log::info!("Simulation seeded with {}", seed);
        Self::new(settings.sim_params(), seed)
    }

    pub fn state(&self) -> LoopState {
        self.state
    }

    pub fn is_running(&self) -> bool {
        self.state == LoopState::Running
    }

    /// Ticks simulated so far
    pub fn time_ticks(&self) -> u64 {
        self.time_ticks
    }

    pub fn slider_layouts(&self) -> &[SliderLayout; 3] {
        self.sliders.layouts()
    }

    pub fn slider_layout(&self, tunable: Tunable) -> &SliderLayout {
        self.sliders.layout_for(tunable)
    }

    /// Slider currently being dragged
    pub fn dragging(&self) -> Option<Tunable> {
        self.sliders.dragging()
    }

    /// Spawn a ball at rest at a random point inside the bounce circle
    pub fn spawn_random(&mut self) -> Vec2 {
        let point = random_point_in_disk(&mut self.rng, self.params.center, self.params.bounce_radius);
        self.balls.spawn(point);
        log::debug!("Spawned ball at ({:.1}, {:.1}), {} live", point.x, point.y, self.balls.len());
        point
    }

    /// Remove every ball
    pub fn clear(&mut self) {
        log::debug!("Cleared {} balls", self.balls.len());
        self.balls.clear();
    }

    /// Apply one input event
    pub fn handle_event(&mut self, event: InputEvent) -> FrameReport {
        let mut report = FrameReport::default();
        match event {
            InputEvent::Quit => {
                if self.state == LoopState::Running {
                    log::info!("Quit requested after {} ticks", self.time_ticks);
                }
                self.state = LoopState::Stopped;
            }
            InputEvent::PointerDown(p) => {
                if in_arena_area(p) {
                    self.spawn_random();
                    report.spawned += 1;
                }
                self.sliders.pointer_down(p, &mut self.params);
            }
            InputEvent::PointerUp => self.sliders.pointer_up(),
            InputEvent::PointerMove(p) => {
                self.sliders.pointer_move(p, &mut self.params);
            }
            InputEvent::KeyDown(key) => {
                if key.eq_ignore_ascii_case(&CLEAR_KEY) {
                    self.clear();
                    report.cleared = true;
                }
            }
        }
        report
    }

    /// Apply events in arrival order
    pub fn handle_events<I>(&mut self, events: I) -> FrameReport
    where
        I: IntoIterator<Item = InputEvent>,
    {
        events
            .into_iter()
            .fold(FrameReport::default(), |mut report, event| {
                let r = self.handle_event(event);
                report.spawned += r.spawned;
                report.cleared |= r.cleared;
                report
            })
    }

    /// Advance every ball one tick. Returns how many balls were removed.
    pub fn tick(&mut self) -> usize {
        self.time_ticks += 1;
        self.balls.tick(&self.params)
    }

    /// One full frame: refresh slider layout, drain events, then tick
    ///
    /// A quit arriving mid-frame still lets the frame finish; the host checks
    /// [`Simulation::is_running`] afterwards.
    pub fn frame<I>(&mut self, events: I) -> FrameReport
    where
        I: IntoIterator<Item = InputEvent>,
    {
        self.sliders.relayout(&self.params);
        let mut report = self.handle_events(events);
        report.removed = self.tick();
        report
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::consts::*;

    fn sim() -> Simulation {
        Simulation::new(SimParams::default(), 42)
    }

    #[test]
    fn test_click_in_arena_spawns_inside_bounce_circle() {
        let mut sim = sim();
        let report = sim.handle_event(InputEvent::PointerDown(Vec2::new(100.0, 100.0)));

        assert_eq!(report.spawned, 1);
        assert_eq!(sim.balls.len(), 1);
        let ball = &sim.balls.as_slice()[0];
        assert_eq!(ball.vel, Vec2::ZERO);
        assert!(ball.pos.distance(sim.params.center) <= sim.params.bounce_radius);
    }

    #[test]
    fn test_click_in_panel_does_not_spawn() {
        let mut sim = sim();
        sim.handle_event(InputEvent::PointerDown(Vec2::new(PANEL_X + 5.0, 600.0)));
        assert!(sim.balls.is_empty());
        assert_eq!(sim.dragging(), None);
    }

    #[test]
    fn test_clear_key_is_case_insensitive() {
        let mut sim = sim();
        sim.spawn_random();
        sim.spawn_random();

        sim.handle_event(InputEvent::KeyDown('x'));
        assert_eq!(sim.balls.len(), 2);

        let report = sim.handle_event(InputEvent::KeyDown('R'));
        assert!(report.cleared);
        assert!(sim.balls.is_empty());
    }

    #[test]
    fn test_quit_stops_loop() {
        let mut sim = sim();
        assert!(sim.is_running());
        sim.frame([InputEvent::Quit]);
        assert_eq!(sim.state(), LoopState::Stopped);
        // The frame still ran to completion
        assert_eq!(sim.time_ticks(), 1);
    }

    #[test]
    fn test_same_seed_same_spawns() {
        let mut a = Simulation::new(SimParams::default(), 7);
        let mut b = Simulation::new(SimParams::default(), 7);
        for _ in 0..10 {
            assert_eq!(a.spawn_random(), b.spawn_random());
        }
    }

    #[test]
    fn test_events_apply_in_order() {
        let mut sim = sim();
        let track = sim.slider_layouts()[0].track;
        let y = track.y + 1.0;

        sim.frame([
            InputEvent::PointerDown(Vec2::new(track.x + track.w * 0.5, y)),
            InputEvent::PointerMove(Vec2::new(track.x + track.w * 0.75, y)),
            InputEvent::PointerUp,
            InputEvent::PointerMove(Vec2::new(track.x + track.w * 0.1, y)),
        ]);

        assert_eq!(sim.params.ball_radius, 45.0);
        assert_eq!(sim.dragging(), None);
    }

    #[test]
    fn test_slider_layout_matches_tunable() {
        let sim = sim();
        for tunable in Tunable::ALL {
            assert_eq!(sim.slider_layout(tunable).tunable, tunable);
        }
    }
}
