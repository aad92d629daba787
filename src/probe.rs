//! Rapier-backed [`BallProbe`].
//!
//! Point containment is answered by the ball's own collider shape at its
//! current pose; ball/hole overlap comes from Rapier's narrow phase
//! (`intersection_pair`), so it reflects exactly what the physics step saw.

use bevy::prelude::*;
use bevy_rapier2d::prelude::*;

use crate::shot::BallProbe;

pub struct RapierProbe<'a, 'w> {
    context: &'a RapierContext<'w>,
    ball: Entity,
    target: Entity,
    ball_collider: &'a Collider,
    ball_position: Vec2,
    ball_angle: f32,
}

impl<'a, 'w> RapierProbe<'a, 'w> {
    pub fn new(
        context: &'a RapierContext<'w>,
        ball: Entity,
        target: Entity,
        ball_collider: &'a Collider,
        ball_transform: &Transform,
    ) -> Self {
        Self {
            context,
            ball,
            target,
            ball_collider,
            ball_position: ball_transform.translation.truncate(),
            ball_angle: ball_transform.rotation.to_euler(EulerRot::ZYX).0,
        }
    }
}

impl BallProbe for RapierProbe<'_, '_> {
    fn ball_position(&self) -> Vec2 {
        self.ball_position
    }

    fn ball_contains(&self, point: Vec2) -> bool {
        self.ball_collider
            .contains_point(self.ball_position, self.ball_angle, point)
    }

    fn ball_overlaps_target(&self) -> bool {
        self.context.intersection_pair(self.ball, self.target) == Some(true)
    }
}
