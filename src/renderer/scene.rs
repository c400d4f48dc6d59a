//! Per-frame scene assembly
//!
//! Turns the simulation into one triangle list, back to front: arena rings,
//! panel, sliders, balls. Text is drawn by the host.

use super::shapes;
use super::vertex::{Vertex, colors};
use crate::consts::SLIDER_KNOB_RADIUS;
use crate::sim::Simulation;
use crate::ui::panel::panel_rect;

/// Stroke width of the arena circles
const RING_WIDTH: f32 = 2.0;
/// Segments for the small knob and ball discs
const DISC_SEGMENTS: u32 = 24;

pub fn build(sim: &Simulation) -> Vec<Vertex> {
    let params = &sim.params;
    let mut vertices = Vec::new();

    vertices.extend(shapes::circle_outline(
        params.center,
        params.bounce_radius,
        RING_WIDTH,
        colors::BOUNCE_RING,
    ));
    vertices.extend(shapes::circle_outline(
        params.center,
        params.delete_radius,
        RING_WIDTH,
        colors::DELETE_RING,
    ));

    vertices.extend(shapes::rect(&panel_rect(), colors::PANEL));

    for slider in sim.slider_layouts() {
        vertices.extend(shapes::rect(&slider.track, colors::SLIDER_TRACK));
        vertices.extend(shapes::rect(&slider.fill, colors::SLIDER_FILL));
        vertices.extend(shapes::circle(
            slider.knob,
            SLIDER_KNOB_RADIUS,
            colors::SLIDER_KNOB,
            DISC_SEGMENTS,
        ));
    }

    for ball in sim.balls.iter() {
        vertices.extend(shapes::circle(
            ball.pos,
            params.ball_radius,
            colors::BALL,
            DISC_SEGMENTS,
        ));
    }

    vertices
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::sim::SimParams;

    #[test]
    fn test_each_ball_adds_a_disc() {
        let mut sim = Simulation::new(SimParams::default(), 1);
        let empty = build(&sim).len();

        sim.spawn_random();
        sim.spawn_random();
        assert_eq!(build(&sim).len(), empty + 2 * DISC_SEGMENTS as usize * 3);
    }

    #[test]
    fn test_balls_drawn_last() {
        let mut sim = Simulation::new(SimParams::default(), 1);
        let pos = sim.spawn_random();
        let vertices = build(&sim);
        let last = vertices.last().unwrap();
        assert_eq!(last.color, colors::BALL);
        assert_eq!(vertices[vertices.len() - 3].position, [pos.x, pos.y]);
    }
}
