//! Settle monitor and win evaluator.
//!
//! While the ball is `Launched`, every tick after the physics step checks
//! whether it has come to rest.  Speeds are compared per simulation step
//! (world units per second ÷ steps per second).  Once both the linear and the
//! angular speed are under their thresholds the residual velocity is forced
//! to exactly zero, so drift below the threshold can never re-trigger, and the
//! shot controller returns to `Idle`.  Only at that instant is the win
//! condition evaluated.

use bevy::prelude::*;
use bevy_rapier2d::prelude::*;

use crate::config::GolfConfig;
use crate::effects::{BallVisual, Pulse};
use crate::probe::RapierProbe;
use crate::session::{GameSession, LevelWon};
use crate::shot::{BallProbe, ShotController};

/// Rest thresholds, per simulation step.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct SettleThresholds {
    pub linear: f32,
    pub angular: f32,
    pub steps_per_second: f32,
}

impl From<&GolfConfig> for SettleThresholds {
    fn from(config: &GolfConfig) -> Self {
        Self {
            linear: config.settle_linear_speed,
            angular: config.settle_angular_speed,
            steps_per_second: config.steps_per_second,
        }
    }
}

impl SettleThresholds {
    /// Whether a body moving at `linvel` / `angvel` (per second) counts as at rest.
    pub fn is_at_rest(&self, linvel: Vec2, angvel: f32) -> bool {
        linvel.length() / self.steps_per_second < self.linear
            && angvel.abs() / self.steps_per_second < self.angular
    }
}

/// Result of one settle check.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum SettleOutcome {
    /// The ball is not in flight; nothing was checked.
    NotLaunched,
    /// Still faster than the thresholds.
    Moving,
    /// Came to rest this tick.  `won` is the win check at that instant.
    Settled { won: bool },
}

/// True iff the ball currently overlaps the target sensor.
#[inline]
pub fn is_won(probe: &impl BallProbe) -> bool {
    probe.ball_overlaps_target()
}

/// Run one settle check, zeroing `linvel`/`angvel` on settle.
pub fn check_settle(
    shot: &mut ShotController,
    linvel: &mut Vec2,
    angvel: &mut f32,
    thresholds: &SettleThresholds,
    probe: &impl BallProbe,
) -> SettleOutcome {
    if shot.state() != crate::shot::ShotState::Launched {
        return SettleOutcome::NotLaunched;
    }
    if !thresholds.is_at_rest(*linvel, *angvel) {
        return SettleOutcome::Moving;
    }
    *linvel = Vec2::ZERO;
    *angvel = 0.0;
    shot.settle();
    SettleOutcome::Settled {
        won: is_won(probe),
    }
}

/// Per-tick settle check.  Must run after Rapier's writeback so it sees this
/// frame's velocities, and before rendering so the pulse starts this frame.
#[allow(clippy::too_many_arguments)]
pub fn settle_monitor_system(
    mut commands: Commands,
    mut session: ResMut<GameSession>,
    mut q_ball: Query<(&Transform, &Collider, &mut Velocity)>,
    q_visual: Query<Entity, With<BallVisual>>,
    rapier_context: ReadRapierContext,
    config: Res<GolfConfig>,
    mut won_writer: MessageWriter<LevelWon>,
) {
    if session.shot.state() != crate::shot::ShotState::Launched {
        return;
    }
    let Ok(rapier) = rapier_context.single() else {
        return;
    };
    let (ball_entity, target_entity) = (session.ball, session.target);
    let Ok((transform, collider, mut velocity)) = q_ball.get_mut(ball_entity) else {
        error!("Session ball {:?} has no body", ball_entity);
        return;
    };

    let probe = RapierProbe::new(&rapier, ball_entity, target_entity, collider, transform);
    let thresholds = SettleThresholds::from(&*config);
    let mut linvel = velocity.linvel;
    let mut angvel = velocity.angvel;

    let outcome = check_settle(
        &mut session.shot,
        &mut linvel,
        &mut angvel,
        &thresholds,
        &probe,
    );
    let SettleOutcome::Settled { won } = outcome else {
        return;
    };

    velocity.linvel = linvel;
    velocity.angvel = angvel;
    for visual in q_visual.iter() {
        commands.entity(visual).insert(Pulse::from_config(&config));
    }
    debug!("Ball settled at {:?}", transform.translation.truncate());

    if won {
        won_writer.write(LevelWon {
            level: session.level_key.clone(),
            strokes: session.strokes(),
        });
    }
}
