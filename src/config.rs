//! Runtime gameplay configuration loaded from `assets/golf.toml`.
//!
//! [`GolfConfig`] is a Bevy [`Resource`] that mirrors every constant in
//! [`crate::constants`].  [`load_golf_config`] reads the TOML file before the app
//! is built and overwrites the defaults with any values present in it.  Missing keys
//! fall back to the compile-time defaults, so a minimal TOML can override just
//! the values you care about.
//!
//! Add `config: Res<GolfConfig>` to any system parameter list and read values
//! with `config.base_force_magnitude`, `config.settle_linear_speed`, etc.

use std::path::Path;

use crate::constants::*;
use bevy::prelude::*;
use serde::Deserialize;

/// Runtime-tunable gameplay and physics configuration.
#[derive(Resource, Debug, Clone, Deserialize)]
#[serde(default)]
pub struct GolfConfig {
    // ── Canvas / Playfield ───────────────────────────────────────────────────
    pub canvas_width: f32,
    pub canvas_height: f32,
    pub playfield_margin_x: f32,
    pub playfield_margin_y: f32,
    pub ball_sprite_size: f32,
    /// Surround the canvas with fixed walls so the ball cannot leave it.
    pub spawn_bounds: bool,
    pub bounds_thickness: f32,

    // ── Shot ──────────────────────────────────────────────────────────────────
    pub base_force_magnitude: f32,
    pub impulse_scale: f32,

    // ── Settle ────────────────────────────────────────────────────────────────
    pub settle_linear_speed: f32,
    pub settle_angular_speed: f32,
    pub steps_per_second: f32,

    // ── Ball body ─────────────────────────────────────────────────────────────
    pub ball_shape_key: String,
    pub air_friction_to_damping: f32,
    pub ball_angular_damping: f32,

    // ── Effects ───────────────────────────────────────────────────────────────
    pub pulse_scale: f32,
    pub pulse_half_duration: f32,

    // ── Camera ────────────────────────────────────────────────────────────────
    pub min_zoom: f32,
    pub max_zoom: f32,
    pub zoom_speed: f32,

    // ── HUD ───────────────────────────────────────────────────────────────────
    pub hud_font_size: f32,
}

impl Default for GolfConfig {
    fn default() -> Self {
        Self {
            // Canvas / Playfield
            canvas_width: CANVAS_WIDTH,
            canvas_height: CANVAS_HEIGHT,
            playfield_margin_x: PLAYFIELD_MARGIN_X,
            playfield_margin_y: PLAYFIELD_MARGIN_Y,
            ball_sprite_size: BALL_SPRITE_SIZE,
            spawn_bounds: true,
            bounds_thickness: BOUNDS_THICKNESS,
            // Shot
            base_force_magnitude: BASE_FORCE_MAGNITUDE,
            impulse_scale: IMPULSE_SCALE,
            // Settle
            settle_linear_speed: SETTLE_LINEAR_SPEED,
            settle_angular_speed: SETTLE_ANGULAR_SPEED,
            steps_per_second: STEPS_PER_SECOND,
            // Ball body
            ball_shape_key: BALL_SHAPE_KEY.to_string(),
            air_friction_to_damping: AIR_FRICTION_TO_DAMPING,
            ball_angular_damping: BALL_ANGULAR_DAMPING,
            // Effects
            pulse_scale: PULSE_SCALE,
            pulse_half_duration: PULSE_HALF_DURATION,
            // Camera
            min_zoom: MIN_ZOOM,
            max_zoom: MAX_ZOOM,
            zoom_speed: ZOOM_SPEED,
            // HUD
            hud_font_size: HUD_FONT_SIZE,
        }
    }
}

impl GolfConfig {
    /// Tile-map → playfield offset.
    #[inline]
    pub fn margin(&self) -> Vec2 {
        Vec2::new(self.playfield_margin_x, self.playfield_margin_y)
    }

    /// Full canvas size in world units.
    #[inline]
    pub fn canvas(&self) -> Vec2 {
        Vec2::new(self.canvas_width, self.canvas_height)
    }

    /// Parse a TOML document, keeping defaults for absent keys.
    pub fn from_toml_str(contents: &str) -> Result<Self, toml::de::Error> {
        toml::from_str::<GolfConfig>(contents)
    }
}

/// Load the config at `path`, falling back to defaults.
///
/// Runs before the Bevy app exists, so it reports with `[SETUP]` lines on
/// stderr.  A parse error is reported but does not abort the game; a missing
/// file is not an error.
pub fn load_golf_config(path: &Path) -> GolfConfig {
    match std::fs::read_to_string(path) {
        Ok(contents) => match GolfConfig::from_toml_str(&contents) {
            Ok(loaded) => {
                eprintln!("[SETUP] Loaded golf config from {}", path.display());
                loaded
            }
            Err(e) => {
                eprintln!(
                    "[SETUP] Failed to parse {}: {e}; using defaults",
                    path.display()
                );
                GolfConfig::default()
            }
        },
        Err(_) => {
            eprintln!("[SETUP] No {} found; using compiled defaults", path.display());
            GolfConfig::default()
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn partial_toml_overrides_only_present_keys() {
        let cfg = GolfConfig::from_toml_str(
            "base_force_magnitude = 0.1\nball_shape_key = \"tile-3\"\n",
        )
        .unwrap();
        assert_eq!(cfg.base_force_magnitude, 0.1);
        assert_eq!(cfg.ball_shape_key, "tile-3");
        assert_eq!(cfg.settle_linear_speed, SETTLE_LINEAR_SPEED);
        assert_eq!(cfg.canvas_width, CANVAS_WIDTH);
    }

    #[test]
    fn empty_toml_is_default() {
        let cfg = GolfConfig::from_toml_str("").unwrap();
        assert_eq!(cfg.pulse_scale, PULSE_SCALE);
        assert!(cfg.spawn_bounds);
    }

    #[test]
    fn ill_typed_value_is_an_error() {
        assert!(GolfConfig::from_toml_str("canvas_width = \"wide\"").is_err());
    }

    #[test]
    fn missing_file_falls_back_to_defaults() {
        let cfg = load_golf_config(Path::new("does/not/exist.toml"));
        assert_eq!(cfg.impulse_scale, IMPULSE_SCALE);
    }

    #[test]
    fn margin_and_canvas_helpers() {
        let cfg = GolfConfig::default();
        assert_eq!(cfg.margin(), Vec2::new(PLAYFIELD_MARGIN_X, PLAYFIELD_MARGIN_Y));
        assert_eq!(cfg.canvas(), Vec2::new(CANVAS_WIDTH, CANVAS_HEIGHT));
    }
}
