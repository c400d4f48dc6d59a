//! Settings panel text layout

use glam::Vec2;

use super::slider::Rect;
use crate::consts::*;
use crate::sim::params::{SimParams, Tunable};

/// A line of text drawn on the panel
#[derive(Debug, Clone, PartialEq)]
pub struct PanelLabel {
    pub text: String,
    /// Top-left corner in canvas pixels
    pub pos: Vec2,
    pub font_size: f32,
}

/// Panel background, docked on the right edge at full height
pub fn panel_rect() -> Rect {
    Rect::new(PANEL_X, 0.0, PANEL_WIDTH, CANVAS_HEIGHT)
}

/// Whether a point lies left of the panel, where clicks spawn balls
pub fn in_arena_area(p: Vec2) -> bool {
    p.x < PANEL_X
}

/// Title plus one label above each slider, showing the live value
pub fn labels(params: &SimParams) -> Vec<PanelLabel> {
    let mut labels = Vec::with_capacity(Tunable::ALL.len() + 1);
    labels.push(PanelLabel {
        text: "Settings".to_string(),
        pos: Vec2::new(PANEL_X + 50.0, 20.0),
        font_size: TITLE_FONT_SIZE,
    });

    for (row, tunable) in Tunable::ALL.iter().enumerate() {
        labels.push(PanelLabel {
            text: format!("{}: {:.0}", tunable.label(), params.get(*tunable)),
            pos: Vec2::new(SLIDER_X, LABEL_FIRST_Y + row as f32 * SLIDER_SPACING),
            font_size: LABEL_FONT_SIZE,
        });
    }
    labels
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_labels_show_live_values() {
        let mut params = SimParams::default();
        params.set(Tunable::BounceCircle, 321.0);

        let texts: Vec<String> = labels(&params).into_iter().map(|l| l.text).collect();
        assert_eq!(
            texts,
            vec![
                "Settings",
                "Ball Size: 12",
                "Bounce Circle Size: 321",
                "Delete Circle Size: 250",
            ]
        );
    }

    #[test]
    fn test_labels_sit_above_sliders() {
        let labels = labels(&SimParams::default());
        assert_eq!(labels[1].pos.y, 100.0);
        assert_eq!(labels[3].pos.y, 200.0);
        assert!(labels[1].pos.y < SLIDER_FIRST_Y);
    }

    #[test]
    fn test_arena_area_excludes_panel() {
        assert!(in_arena_area(Vec2::new(PANEL_X - 1.0, 10.0)));
        assert!(!in_arena_area(Vec2::new(PANEL_X, 10.0)));
        assert!(panel_rect().contains(Vec2::new(PANEL_X + 5.0, 600.0)));
    }
}
