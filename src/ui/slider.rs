//! Slider widgets bound to the simulation tunables
//!
//! Layout is recomputed from the live parameter values every frame. The only
//! state that survives between frames is which slider, if any, is dragging.

use glam::Vec2;

use crate::consts::*;
use crate::sim::params::{SimParams, Tunable};

/// Axis-aligned rectangle in canvas pixels
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Rect {
    pub x: f32,
    pub y: f32,
    pub w: f32,
    pub h: f32,
}

impl Rect {
    pub const fn new(x: f32, y: f32, w: f32, h: f32) -> Self {
        Self { x, y, w, h }
    }

    /// Half-open containment: left and top edges are inside, right and
    /// bottom edges are not
    pub fn contains(&self, p: Vec2) -> bool {
        p.x >= self.x && p.x < self.x + self.w && p.y >= self.y && p.y < self.y + self.h
    }
}

/// Render geometry of one slider for the current frame
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct SliderLayout {
    pub tunable: Tunable,
    /// Track rectangle, also the hit-test rectangle
    pub track: Rect,
    /// Filled part of the track
    pub fill: Rect,
    /// Knob center
    pub knob: Vec2,
    /// Knob position along the track in `[0, 1]`
    pub value: f32,
}

/// Lay out a slider track with its knob at `x + value * width`
pub fn layout(tunable: Tunable, x: f32, y: f32, width: f32, value: f32) -> SliderLayout {
    let value = value.clamp(0.0, 1.0);
    SliderLayout {
        tunable,
        track: Rect::new(x, y, width, SLIDER_HEIGHT),
        fill: Rect::new(x, y, width * value, SLIDER_HEIGHT),
        knob: Vec2::new(x + value * width, y + SLIDER_HEIGHT / 2.0),
        value,
    }
}

/// Map a pointer x coordinate on a track to a parameter value
///
/// The track spans `[0, max]`, not `[min, max]`, so the knob position
/// `value / max` lines up with the pointer and the right edge reaches `max`.
/// The result is rounded and clamped to `[min, max]` wherever the pointer is.
pub fn value_from_pointer(pointer_x: f32, x: f32, width: f32, min: f32, max: f32) -> f32 {
    if width.is_nan() || width <= 0.0 {
        return min;
    }
    let raw = ((pointer_x - x) / width * max).round();
    if raw.is_nan() {
        return min;
    }
    raw.clamp(min, max)
}

/// The three settings sliders and the drag target
#[derive(Debug, Clone)]
pub struct SliderPanel {
    layouts: [SliderLayout; 3],
    dragging: Option<Tunable>,
}

impl SliderPanel {
    pub fn new(params: &SimParams) -> Self {
        Self {
            layouts: Self::compute_layouts(params),
            dragging: None,
        }
    }

    fn compute_layouts(params: &SimParams) -> [SliderLayout; 3] {
        Tunable::ALL.map(|tunable| {
            let y = SLIDER_FIRST_Y + Self::row(tunable) as f32 * SLIDER_SPACING;
            layout(tunable, SLIDER_X, y, SLIDER_WIDTH, tunable.normalized(params.get(tunable)))
        })
    }

    fn row(tunable: Tunable) -> usize {
        match tunable {
            Tunable::BallSize => 0,
            Tunable::BounceCircle => 1,
            Tunable::DeleteCircle => 2,
        }
    }

    /// Recompute geometry from the current parameter values
    pub fn relayout(&mut self, params: &SimParams) {
        self.layouts = Self::compute_layouts(params);
    }

    pub fn layouts(&self) -> &[SliderLayout; 3] {
        &self.layouts
    }

    pub fn layout_for(&self, tunable: Tunable) -> &SliderLayout {
        &self.layouts[Self::row(tunable)]
    }

    /// Slider currently being dragged
    pub fn dragging(&self) -> Option<Tunable> {
        self.dragging
    }

    /// First slider whose track contains `p`, in panel order
    pub fn hit_test(&self, p: Vec2) -> Option<Tunable> {
        self.layouts
            .iter()
            .find(|l| l.track.contains(p))
            .map(|l| l.tunable)
    }

    /// Pointer pressed: start dragging the slider under the pointer and jump
    /// its value there. Returns the slider that took the press.
    pub fn pointer_down(&mut self, p: Vec2, params: &mut SimParams) -> Option<Tunable> {
        let tunable = self.hit_test(p)?;
        self.dragging = Some(tunable);
        self.apply(tunable, p, params);
        log::debug!("Dragging {} slider", tunable.label());
        Some(tunable)
    }

    /// Pointer moved: update the dragged slider while the pointer stays on
    /// its track. Returns whether a parameter changed.
    pub fn pointer_move(&mut self, p: Vec2, params: &mut SimParams) -> bool {
        let Some(tunable) = self.dragging else {
            return false;
        };
        if !self.layout_for(tunable).track.contains(p) {
            return false;
        }
        self.apply(tunable, p, params)
    }

    /// Pointer released anywhere: stop dragging
    pub fn pointer_up(&mut self) {
        if let Some(tunable) = self.dragging.take() {
            log::debug!("Released {} slider", tunable.label());
        }
    }

    fn apply(&mut self, tunable: Tunable, p: Vec2, params: &mut SimParams) -> bool {
        let track = self.layout_for(tunable).track;
        let value = value_from_pointer(p.x, track.x, track.w, tunable.min(), tunable.max());
        if params.get(tunable) == value {
            return false;
        }
        params.set(tunable, value);
        self.relayout(params);
        true
    }
}
