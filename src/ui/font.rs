//! Best-effort label font selection
//!
//! Loading the preferred font face is allowed to fail; the panel then uses a
//! built-in family instead. The outcome is a value, never an error.

use std::fmt::Display;

use crate::settings::DEFAULT_FONT_FAMILY;

/// Font the labels end up using
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum FontSelection {
    /// The requested face loaded
    Primary { family: String },
    /// The requested face was unavailable
    Fallback { requested: String },
}

impl FontSelection {
    /// Resolve the outcome of loading `family`
    pub fn resolve<E: Display>(family: &str, load: Result<(), E>) -> Self {
        match load {
            Ok(()) => {
                log::info!("Using font '{}'", family);
                FontSelection::Primary {
                    family: family.to_string(),
                }
            }
            Err(e) => {
                log::info!("Font '{}' unavailable ({}), using {}", family, e, DEFAULT_FONT_FAMILY);
                FontSelection::Fallback {
                    requested: family.to_string(),
                }
            }
        }
    }

    pub fn family(&self) -> &str {
        match self {
            FontSelection::Primary { family } => family,
            FontSelection::Fallback { .. } => DEFAULT_FONT_FAMILY,
        }
    }

    pub fn is_fallback(&self) -> bool {
        matches!(self, FontSelection::Fallback { .. })
    }

    /// CSS `font` shorthand for a given pixel size
    pub fn css(&self, size: f32) -> String {
        match self {
            FontSelection::Primary { family } => {
                format!("{}px \"{}\", {}", size, family, DEFAULT_FONT_FAMILY)
            }
            FontSelection::Fallback { .. } => format!("{}px {}", size, DEFAULT_FONT_FAMILY),
        }
    }
}
