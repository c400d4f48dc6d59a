//! Settings panel: sliders, labels and label font

pub mod font;
pub mod panel;
pub mod slider;

pub use font::FontSelection;
pub use panel::{PanelLabel, in_arena_area, labels, panel_rect};
pub use slider::{Rect, SliderLayout, SliderPanel, value_from_pointer};
