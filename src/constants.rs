//! Centralised gameplay and physics constants.
//!
//! All tuneable values live here so they can be found, reasoned-about, and
//! modified in one place.  Every constant is mirrored by a field on
//! [`crate::config::GolfConfig`] and can be overridden from `assets/golf.toml`
//! without recompiling.
//!
//! ## Units
//!
//! World units are pixels (`pixels_per_meter(1.0)`).  Level files use the
//! tile-map frame (y-down, upper-left origin); the world frame is Bevy's
//! (y-up, origin at the canvas centre).

// ── Canvas / Playfield ────────────────────────────────────────────────────────

/// Width of the visible canvas in world units.
///
/// Also the `playfield_width` that normalises drag distance into launch force,
/// so a pull the length of the whole canvas yields exactly `BASE_FORCE_MAGNITUDE`.
pub const CANVAS_WIDTH: f32 = 600.0;

/// Height of the visible canvas in world units.
pub const CANVAS_HEIGHT: f32 = 400.0;

/// Horizontal offset between the canvas edge and tile-map x = 0.
pub const PLAYFIELD_MARGIN_X: f32 = 44.0;

/// Vertical offset between the canvas edge and tile-map y = 0.
pub const PLAYFIELD_MARGIN_Y: f32 = 40.0;

/// Edge length of the ball sprite in tile-map pixels.
///
/// Player objects in the level files are authored corner-origin at sprite size,
/// so the spawn centre sits `BALL_SPRITE_SIZE / 2` in from the corner.
pub const BALL_SPRITE_SIZE: f32 = 32.0;

/// Thickness of the invisible walls placed around the canvas edge.
pub const BOUNDS_THICKNESS: f32 = 20.0;

// ── Shot ──────────────────────────────────────────────────────────────────────

/// Force produced by a drag spanning the whole playfield width.
///
/// Scales linearly with drag distance and is deliberately unclamped: releasing
/// far outside the canvas produces proportionally larger shots.
pub const BASE_FORCE_MAGNITUDE: f32 = 0.05;

/// Converts a force magnitude into a velocity change (world units / second).
///
/// The engine impulse is `direction × magnitude × IMPULSE_SCALE × mass`, which
/// makes the launch speed independent of the ball's collider density.
/// At 20 000 a half-canvas pull launches the ball at ~500 u/s.
pub const IMPULSE_SCALE: f32 = 20_000.0;

// ── Settle ────────────────────────────────────────────────────────────────────

/// Linear speed (world units per simulation step) below which the ball is at rest.
pub const SETTLE_LINEAR_SPEED: f32 = 0.05;

/// Angular speed (radians per simulation step) below which the ball is at rest.
pub const SETTLE_ANGULAR_SPEED: f32 = 0.05;

/// Simulation steps per second used to express per-second velocities per step.
pub const STEPS_PER_SECOND: f32 = 60.0;

// ── Ball body ─────────────────────────────────────────────────────────────────

/// Shape-library key of the ball's compound collider.
pub const BALL_SHAPE_KEY: &str = "tile-0";

/// Multiplier from a per-step air friction coefficient to Rapier linear damping.
pub const AIR_FRICTION_TO_DAMPING: f32 = 60.0;

/// Angular damping applied to the ball so spin bleeds off alongside speed.
pub const BALL_ANGULAR_DAMPING: f32 = 1.5;

// ── Effects ───────────────────────────────────────────────────────────────────

/// Peak scale of the settle pulse.
pub const PULSE_SCALE: f32 = 1.2;

/// Seconds to grow to `PULSE_SCALE`; the same again to shrink back.
pub const PULSE_HALF_DURATION: f32 = 0.25;

// ── Camera ────────────────────────────────────────────────────────────────────

/// Smallest orthographic scale (zoomed in).
pub const MIN_ZOOM: f32 = 0.5;

/// Largest orthographic scale (zoomed out).
pub const MAX_ZOOM: f32 = 2.0;

/// Scale change per zoom key press or wheel notch.
pub const ZOOM_SPEED: f32 = 0.1;

// ── HUD ───────────────────────────────────────────────────────────────────────

/// Font size of the stroke counter and level name.
pub const HUD_FONT_SIZE: f32 = 18.0;

// ── Assets ────────────────────────────────────────────────────────────────────

/// Directory scanned for Tiled `*.json` level exports.
pub const LEVELS_DIR: &str = "assets/levels";

/// PhysicsEditor shape export.
pub const SHAPES_PATH: &str = "assets/physics.json";

/// Optional TOML overrides for [`crate::config::GolfConfig`].
pub const CONFIG_PATH: &str = "assets/golf.toml";
