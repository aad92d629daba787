//! Shot controller: the drag-and-release state machine.
//!
//! ## States
//!
//! | State      | Entered when                                   | Left when                 |
//! |------------|------------------------------------------------|---------------------------|
//! | `Idle`     | level start, or the ball settles               | pointer pressed on ball   |
//! | `Aiming`   | pointer pressed inside the ball while `Idle`   | pointer released          |
//! | `Launched` | pointer released while `Aiming`                | settle monitor fires      |
//!
//! The controller never touches the engine.  Everything it needs to know
//! about the world comes through [`BallProbe`], so the whole state machine is
//! unit-testable with a plain struct standing in for Rapier.
//!
//! ## Launch
//!
//! The ball is pulled back like a slingshot: the impulse points from the
//! release point *through* the ball, with magnitude
//! `base_force × distance / playfield_width` (unclamped).  It is applied at the
//! release point rather than the centre of mass, so off-axis pulls add spin.

use bevy::math::Vec2;

use crate::config::GolfConfig;

/// Read-only view of the ball and target used by the shot and settle logic.
pub trait BallProbe {
    /// Current world-space centre of the ball.
    fn ball_position(&self) -> Vec2;
    /// Whether `point` lies inside the ball's collision volume.
    fn ball_contains(&self, point: Vec2) -> bool;
    /// Whether the ball's collision volume overlaps the target sensor.
    fn ball_overlaps_target(&self) -> bool;
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default)]
pub enum ShotState {
    #[default]
    Idle,
    Aiming,
    Launched,
}

/// Force scaling for a launch.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct ShotTuning {
    /// Force of a drag spanning the whole playfield width.
    pub base_force_magnitude: f32,
    pub playfield_width: f32,
}

impl From<&GolfConfig> for ShotTuning {
    fn from(config: &GolfConfig) -> Self {
        Self {
            base_force_magnitude: config.base_force_magnitude,
            playfield_width: config.canvas_width,
        }
    }
}

/// A computed launch, in engine-independent force units.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Launch {
    /// Unit vector from the release point towards the ball; zero if they coincide.
    pub direction: Vec2,
    pub magnitude: f32,
    /// World-space point the impulse is applied at (the release point).
    pub point: Vec2,
}

impl Launch {
    #[inline]
    pub fn force(&self) -> Vec2 {
        self.direction * self.magnitude
    }
}

/// Compute the launch for a ball at `ball` released from `release`.
pub fn compute_launch(ball: Vec2, release: Vec2, tuning: ShotTuning) -> Launch {
    let offset = ball - release;
    Launch {
        direction: offset.normalize_or_zero(),
        magnitude: tuning.base_force_magnitude * (offset.length() / tuning.playfield_width),
        point: release,
    }
}

/// Interaction state plus the stroke counter for one level attempt.
#[derive(Debug, Clone, Default)]
pub struct ShotController {
    state: ShotState,
    strokes: u32,
}

impl ShotController {
    pub fn new() -> Self {
        Self::default()
    }

    #[inline]
    pub fn state(&self) -> ShotState {
        self.state
    }

    /// Completed launches since the controller was created.
    #[inline]
    pub fn strokes(&self) -> u32 {
        self.strokes
    }

    /// Pointer pressed at `pointer`.  Enters `Aiming` only from `Idle` and only
    /// if the press lands on the ball.  Returns whether aiming started.
    pub fn press(&mut self, probe: &impl BallProbe, pointer: Vec2) -> bool {
        if self.state != ShotState::Idle || !probe.ball_contains(pointer) {
            return false;
        }
        self.state = ShotState::Aiming;
        true
    }

    /// Pointer released at `pointer`.  While `Aiming` this counts a stroke,
    /// moves to `Launched` and returns the launch to apply; otherwise no-op.
    pub fn release(
        &mut self,
        probe: &impl BallProbe,
        pointer: Vec2,
        tuning: ShotTuning,
    ) -> Option<Launch> {
        if self.state != ShotState::Aiming {
            return None;
        }
        self.state = ShotState::Launched;
        self.strokes += 1;
        Some(compute_launch(probe.ball_position(), pointer, tuning))
    }

    /// Ball came to rest: `Launched` → `Idle`.  Returns whether it was launched.
    pub fn settle(&mut self) -> bool {
        if self.state != ShotState::Launched {
            return false;
        }
        self.state = ShotState::Idle;
        true
    }
}

#[cfg(test)]
pub(crate) mod testing {
    use super::*;

    /// Circle ball and circle target, overlap by centre distance.
    #[derive(Debug, Clone, Copy)]
    pub struct CircleProbe {
        pub ball: Vec2,
        pub ball_radius: f32,
        pub target: Vec2,
        pub target_radius: f32,
    }

    impl CircleProbe {
        pub fn at(ball: Vec2) -> Self {
            Self {
                ball,
                ball_radius: 16.0,
                target: Vec2::new(1000.0, 1000.0),
                target_radius: 24.0,
            }
        }
    }

    impl BallProbe for CircleProbe {
        fn ball_position(&self) -> Vec2 {
            self.ball
        }

        fn ball_contains(&self, point: Vec2) -> bool {
            self.ball.distance(point) <= self.ball_radius
        }

        fn ball_overlaps_target(&self) -> bool {
            self.ball.distance(self.target) < self.ball_radius + self.target_radius
        }
    }
}

#[cfg(test)]
mod tests {
    use super::testing::CircleProbe;
    use super::*;

    const TUNING: ShotTuning = ShotTuning {
        base_force_magnitude: 0.05,
        playfield_width: 600.0,
    };

    fn aimed(probe: &CircleProbe) -> ShotController {
        let mut shot = ShotController::new();
        assert!(shot.press(probe, probe.ball));
        shot
    }

    #[test]
    fn press_on_ball_starts_aiming() {
        let probe = CircleProbe::at(Vec2::new(100.0, 100.0));
        let mut shot = ShotController::new();
        assert!(shot.press(&probe, Vec2::new(105.0, 98.0)));
        assert_eq!(shot.state(), ShotState::Aiming);
    }

    #[test]
    fn press_off_ball_is_ignored() {
        let probe = CircleProbe::at(Vec2::new(100.0, 100.0));
        let mut shot = ShotController::new();
        assert!(!shot.press(&probe, Vec2::new(200.0, 100.0)));
        assert_eq!(shot.state(), ShotState::Idle);
    }

    #[test]
    fn no_re_aim_while_launched() {
        let probe = CircleProbe::at(Vec2::new(100.0, 100.0));
        let mut shot = aimed(&probe);
        shot.release(&probe, Vec2::new(150.0, 100.0), TUNING);
        assert_eq!(shot.state(), ShotState::Launched);

        assert!(!shot.press(&probe, probe.ball));
        assert_eq!(shot.state(), ShotState::Launched);
    }

    #[test]
    fn one_release_counts_one_stroke() {
        let probe = CircleProbe::at(Vec2::new(100.0, 100.0));
        let mut shot = aimed(&probe);
        assert_eq!(shot.strokes(), 0);
        assert!(shot.release(&probe, Vec2::new(150.0, 100.0), TUNING).is_some());
        assert_eq!(shot.strokes(), 1);
    }

    #[test]
    fn release_while_idle_does_nothing() {
        let probe = CircleProbe::at(Vec2::new(100.0, 100.0));
        let mut shot = ShotController::new();
        assert!(shot.release(&probe, Vec2::new(150.0, 100.0), TUNING).is_none());
        assert_eq!(shot.strokes(), 0);
        assert_eq!(shot.state(), ShotState::Idle);
    }

    #[test]
    fn impulse_points_away_from_release() {
        let probe = CircleProbe::at(Vec2::new(100.0, 100.0));
        let mut shot = aimed(&probe);
        let launch = shot
            .release(&probe, Vec2::new(150.0, 100.0), TUNING)
            .unwrap();
        assert_eq!(launch.direction, Vec2::new(-1.0, 0.0));
        assert_eq!(launch.point, Vec2::new(150.0, 100.0));
    }

    #[test]
    fn magnitude_scales_with_distance_over_width() {
        let launch = compute_launch(Vec2::ZERO, Vec2::new(0.0, -300.0), TUNING);
        assert!((launch.magnitude - 0.025).abs() < 1e-7);
        assert_eq!(launch.direction, Vec2::Y);
        assert!((launch.force() - Vec2::new(0.0, 0.025)).length() < 1e-7);
    }

    #[test]
    fn magnitude_is_not_clamped() {
        let launch = compute_launch(Vec2::ZERO, Vec2::new(6000.0, 0.0), TUNING);
        assert!((launch.magnitude - 0.5).abs() < 1e-6);
    }

    #[test]
    fn release_on_ball_centre_is_zero_force_stroke() {
        let probe = CircleProbe::at(Vec2::new(100.0, 100.0));
        let mut shot = aimed(&probe);
        let launch = shot.release(&probe, probe.ball, TUNING).unwrap();
        assert_eq!(launch.force(), Vec2::ZERO);
        assert_eq!(shot.strokes(), 1);
    }

    #[test]
    fn settle_only_leaves_launched() {
        let probe = CircleProbe::at(Vec2::ZERO);
        let mut shot = ShotController::new();
        assert!(!shot.settle());

        shot.press(&probe, Vec2::ZERO);
        assert!(!shot.settle());
        assert_eq!(shot.state(), ShotState::Aiming);

        shot.release(&probe, Vec2::new(5.0, 0.0), TUNING);
        assert!(shot.settle());
        assert_eq!(shot.state(), ShotState::Idle);
    }

    #[test]
    fn tuning_from_config_uses_canvas_width() {
        let cfg = GolfConfig::default();
        let tuning = ShotTuning::from(&cfg);
        assert_eq!(tuning.playfield_width, cfg.canvas_width);
        assert_eq!(tuning.base_force_magnitude, cfg.base_force_magnitude);
    }
}
