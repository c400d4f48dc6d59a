//! Startup configuration
//!
//! Read once at launch and never written back. Missing fields take their
//! defaults, so a partial JSON document only overrides what it names.

use serde::{Deserialize, Serialize};

use crate::consts::*;
use crate::sim::params::{SimParams, Tunable};

/// Fallback font used when the preferred family is missing
pub const DEFAULT_FONT_FAMILY: &str = "sans-serif";

/// Arena settings
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct Settings {
    // === Tunables (slider-bound) ===
    /// Initial ball radius in pixels
    pub ball_radius: f32,
    /// Initial bounce circle radius in pixels
    pub bounce_radius: f32,
    /// Initial delete circle radius in pixels
    pub delete_radius: f32,

    // === Physics ===
    /// Downward acceleration added to vy every tick
    pub gravity: f32,
    /// Fraction of vertical speed kept after a floor bounce
    pub floor_damping: f32,
    /// Below this vertical speed a floor contact stops the ball
    pub velocity_threshold: f32,

    // === Presentation ===
    /// Preferred label font family
    pub font_family: String,
    /// Where the preferred font face is fetched from
    pub font_url: String,

    /// RNG seed for ball spawning (time-derived when absent)
    pub seed: Option<u64>,
}

impl Default for Settings {
    fn default() -> Self {
        Self {
            ball_radius: DEFAULT_BALL_RADIUS,
            bounce_radius: DEFAULT_BOUNCE_RADIUS,
            delete_radius: DEFAULT_DELETE_RADIUS,

            gravity: GRAVITY,
            floor_damping: FLOOR_DAMPING,
            velocity_threshold: VELOCITY_THRESHOLD,

            font_family: "ADLaM Display".to_string(),
            font_url: "ADLaM_Display.ttf".to_string(),

            seed: None,
        }
    }
}

impl Settings {
    /// Parse settings from JSON
    pub fn from_json(json: &str) -> Result<Self, serde_json::Error> {
        serde_json::from_str(json)
    }

    /// Parse settings, logging and falling back to defaults on bad input
    pub fn from_json_or_default(json: &str) -> Self {
        match Self::from_json(json) {
            Ok(settings) => {
                log::info!("Loaded arena settings");
                settings.sanitized()
            }
            Err(e) => {
                log::warn!("Ignoring malformed arena settings: {}", e);
                Self::default()
            }
        }
    }

    /// Clamp tunables into their slider ranges, rounded to whole pixels
    pub fn sanitized(mut self) -> Self {
        self.ball_radius = Tunable::BallSize.clamp(self.ball_radius);
        self.bounce_radius = Tunable::BounceCircle.clamp(self.bounce_radius);
        self.delete_radius = Tunable::DeleteCircle.clamp(self.delete_radius);
        if !self.gravity.is_finite() {
            self.gravity = GRAVITY;
        }
        if !(0.0..=1.0).contains(&self.floor_damping) {
            self.floor_damping = FLOOR_DAMPING;
        }
        if !self.velocity_threshold.is_finite() || self.velocity_threshold < 0.0 {
            self.velocity_threshold = VELOCITY_THRESHOLD;
        }
        if self.delete_radius < self.bounce_radius {
            log::warn!(
                "Delete radius {} is inside bounce radius {}; balls will vanish before bouncing",
                self.delete_radius,
                self.bounce_radius
            );
        }
        self
    }

    /// Simulation parameters seeded from these settings
    pub fn sim_params(&self) -> SimParams {
        SimParams {
            ball_radius: self.ball_radius,
            bounce_radius: self.bounce_radius,
            delete_radius: self.delete_radius,
            gravity: self.gravity,
            floor_damping: self.floor_damping,
            velocity_threshold: self.velocity_threshold,
            ..SimParams::default()
        }
    }

    /// Element holding inline JSON settings in the host page
    #[cfg(target_arch = "wasm32")]
    const SETTINGS_ELEMENT_ID: &'static str = "arena-settings";

    /// Load settings from the page's inline JSON block (WASM only)
    #[cfg(target_arch = "wasm32")]
    pub fn load() -> Self {
        let json = web_sys::window()
            .and_then(|w| w.document())
            .and_then(|d| d.get_element_by_id(Self::SETTINGS_ELEMENT_ID))
            .and_then(|el| el.text_content());

        match json {
            Some(json) if !json.trim().is_empty() => Self::from_json_or_default(&json),
            _ => {
                log::info!("Using default settings");
                Self::default()
            }
        }
    }

    /// Load settings from an optional JSON file (native)
    #[cfg(not(target_arch = "wasm32"))]
    pub fn load(path: Option<&std::path::Path>) -> anyhow::Result<Self> {
        use anyhow::Context;

        let Some(path) = path else {
            log::info!("Using default settings");
            return Ok(Self::default());
        };
        let json = std::fs::read_to_string(path)
            .with_context(|| format!("reading settings file {}", path.display()))?;
        let settings = Self::from_json(&json)
            .with_context(|| format!("parsing settings file {}", path.display()))?;
        log::info!("Loaded arena settings from {}", path.display());
        Ok(settings.sanitized())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_partial_json_keeps_defaults() {
        let settings = Settings::from_json(r#"{ "bounce_radius": 300 }"#).unwrap();
        assert_eq!(settings.bounce_radius, 300.0);
        assert_eq!(settings.ball_radius, DEFAULT_BALL_RADIUS);
        assert_eq!(settings.gravity, GRAVITY);
        assert_eq!(settings.seed, None);
    }

    #[test]
    fn test_malformed_json_falls_back() {
        let settings = Settings::from_json_or_default("{ not json");
        assert_eq!(settings, Settings::default());
    }

    #[test]
    fn test_sanitized_clamps_tunables() {
        let settings = Settings {
            ball_radius: 500.0,
            bounce_radius: 10.0,
            delete_radius: 699.6,
            floor_damping: 3.0,
            ..Default::default()
        }
        .sanitized();

        assert_eq!(settings.ball_radius, BALL_RADIUS_MAX);
        assert_eq!(settings.bounce_radius, BOUNCE_RADIUS_MIN);
        assert_eq!(settings.delete_radius, 700.0);
        assert_eq!(settings.floor_damping, FLOOR_DAMPING);
    }

    #[test]
    fn test_sim_params_carry_settings() {
        let settings = Settings {
            gravity: 1.0,
            ..Default::default()
        };
        let params = settings.sim_params();
        assert_eq!(params.gravity, 1.0);
        assert_eq!(params.bounce_radius, DEFAULT_BOUNCE_RADIUS);
        assert_eq!(params.center, crate::arena_center());
    }
}
