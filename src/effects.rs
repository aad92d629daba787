//! Ball feedback: the settle pulse and the aiming tint.
//!
//! Both act on the ball's visual child ([`BallVisual`]), never on the body
//! itself.  Scaling the body's `Transform` would rescale its Rapier collider.

use bevy::prelude::*;

use crate::config::GolfConfig;
use crate::session::GameSession;
use crate::shot::ShotState;

/// Marker for the mesh child that draws the ball.
#[derive(Component, Debug)]
pub struct BallVisual;

/// One-shot grow-and-shrink animation.
#[derive(Component, Debug, Clone, Copy, PartialEq)]
pub struct Pulse {
    pub elapsed: f32,
    /// Seconds to reach `peak`; the shrink back takes as long again.
    pub half_duration: f32,
    pub peak: f32,
}

impl Pulse {
    pub fn from_config(config: &GolfConfig) -> Self {
        Self {
            elapsed: 0.0,
            half_duration: config.pulse_half_duration,
            peak: config.pulse_scale,
        }
    }

    #[inline]
    pub fn scale(&self) -> f32 {
        pulse_scale_at(self.elapsed, self.half_duration, self.peak)
    }

    #[inline]
    pub fn finished(&self) -> bool {
        self.elapsed >= self.half_duration * 2.0
    }
}

/// Linear yoyo: 1.0 → `peak` over `half`, back to 1.0 over the next `half`.
pub fn pulse_scale_at(elapsed: f32, half: f32, peak: f32) -> f32 {
    if half <= 0.0 {
        return 1.0;
    }
    let t = elapsed / half;
    let phase = if t <= 1.0 {
        t.max(0.0)
    } else if t <= 2.0 {
        2.0 - t
    } else {
        0.0
    };
    1.0 + (peak - 1.0) * phase
}

/// Fill colour of the ball for a shot state.
pub fn ball_color(state: ShotState) -> Color {
    match state {
        ShotState::Aiming => Color::srgb(1.0, 0.55, 0.35),
        ShotState::Idle | ShotState::Launched => Color::srgb(0.96, 0.96, 0.94),
    }
}

/// Advance every running pulse and drop it once finished.
pub fn pulse_system(
    mut commands: Commands,
    time: Res<Time>,
    mut q: Query<(Entity, &mut Pulse, &mut Transform)>,
) {
    let dt = time.delta_secs();
    for (entity, mut pulse, mut transform) in q.iter_mut() {
        pulse.elapsed += dt;
        if pulse.finished() {
            transform.scale = Vec3::ONE;
            commands.entity(entity).remove::<Pulse>();
        } else {
            transform.scale = Vec3::splat(pulse.scale());
        }
    }
}

/// Tint the ball while aiming; clear the tint on any other state.
pub fn ball_tint_system(
    session: Res<GameSession>,
    q_visual: Query<&MeshMaterial2d<ColorMaterial>, With<BallVisual>>,
    mut materials: ResMut<Assets<ColorMaterial>>,
) {
    if !session.is_changed() {
        return;
    }
    let color = ball_color(session.shot.state());
    for handle in q_visual.iter() {
        if let Some(material) = materials.get_mut(&handle.0) {
            if material.color != color {
                material.color = color;
            }
        }
    }
}
