//! Pointer input adapter.
//!
//! ## Pipeline (runs in order every `Update` frame)
//!
//! 1. [`pointer_position_system`] — cursor → world-space [`PointerState`].
//! 2. [`shot_input_system`] — left button press/release → shot controller
//!    transitions; a completed release writes the launch impulse.
//!
//! Pointer handling never mutates shot state directly; it only calls
//! [`crate::shot::ShotController::press`] / `release`.

use bevy::prelude::*;
use bevy::window::PrimaryWindow;
use bevy_rapier2d::prelude::*;

use crate::config::GolfConfig;
use crate::probe::RapierProbe;
use crate::session::GameSession;
use crate::shot::{Launch, ShotTuning};

/// Pointer position in world coordinates.
#[derive(Resource, Debug, Clone, Copy, Default)]
pub struct PointerState {
    /// `None` while the cursor is outside the window.
    pub world: Option<Vec2>,
    /// Last position seen inside the window.  Survives the cursor leaving.
    pub last_world: Option<Vec2>,
}

impl PointerState {
    pub fn track(&mut self, world: Option<Vec2>) {
        self.world = world;
        if world.is_some() {
            self.last_world = world;
        }
    }

    /// Where a release lands.  A drag that ends outside the window releases
    /// at the last point the cursor was seen.
    #[inline]
    pub fn release_point(&self) -> Option<Vec2> {
        self.world.or(self.last_world)
    }
}

pub fn pointer_position_system(
    windows: Query<&Window, With<PrimaryWindow>>,
    q_camera: Query<(&Camera, &GlobalTransform)>,
    mut pointer: ResMut<PointerState>,
) {
    let Ok(window) = windows.single() else {
        return;
    };
    let Ok((camera, camera_transform)) = q_camera.single() else {
        return;
    };
    let world = window
        .cursor_position()
        .and_then(|cursor| camera.viewport_to_world_2d(camera_transform, cursor).ok());
    pointer.track(world);
}

/// Convert a launch into the Rapier impulse for a ball of `mass`, applied at
/// the release point relative to the ball's centre of mass.
pub fn launch_impulse(
    launch: &Launch,
    mass: f32,
    center_of_mass: Vec2,
    impulse_scale: f32,
) -> ExternalImpulse {
    let impulse = launch.force() * impulse_scale * mass;
    ExternalImpulse::at_point(impulse, launch.point, center_of_mass)
}

pub fn shot_input_system(
    buttons: Res<ButtonInput<MouseButton>>,
    pointer: Res<PointerState>,
    mut session: ResMut<GameSession>,
    mut q_ball: Query<(&Transform, &Collider, &ReadMassProperties, &mut ExternalImpulse)>,
    rapier_context: ReadRapierContext,
    config: Res<GolfConfig>,
) {
    let pressed = buttons.just_pressed(MouseButton::Left);
    let released = buttons.just_released(MouseButton::Left);
    if !pressed && !released {
        return;
    }
    // Presses need the cursor over the window; releases may happen outside it.
    let point = if released {
        pointer.release_point()
    } else {
        pointer.world
    };
    let Some(point) = point else {
        return;
    };
    let Ok(rapier) = rapier_context.single() else {
        return;
    };
    let ball_entity = session.ball;
    let target_entity = session.target;
    let Ok((transform, collider, mass_props, mut impulse)) = q_ball.get_mut(ball_entity) else {
        error!("Session ball {:?} has no body", ball_entity);
        return;
    };
    let probe = RapierProbe::new(&rapier, ball_entity, target_entity, collider, transform);

    if pressed && session.shot.press(&probe, point) {
        debug!("Aiming from {:?}", point);
    }

    if released {
        let tuning = ShotTuning::from(&*config);
        if let Some(launch) = session.shot.release(&probe, point, tuning) {
            let props = mass_props.get();
            let mass = if props.mass > 0.0 { props.mass } else { 1.0 };
            let center = transform
                .transform_point(props.local_center_of_mass.extend(0.0))
                .truncate();
            *impulse = launch_impulse(&launch, mass, center, config.impulse_scale);
            info!(
                "Stroke {}: force {:.4} towards {:?}",
                session.strokes(),
                launch.magnitude,
                launch.direction
            );
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn impulse_scales_with_mass_and_scale() {
        let launch = Launch {
            direction: Vec2::new(-1.0, 0.0),
            magnitude: 0.01,
            point: Vec2::new(0.0, 0.0),
        };
        let ext = launch_impulse(&launch, 2.0, Vec2::ZERO, 1000.0);
        assert!((ext.impulse - Vec2::new(-20.0, 0.0)).length() < 1e-4);
        // applied at the centre of mass: no spin
        assert!(ext.torque_impulse.abs() < 1e-6);
    }

    #[test]
    fn off_centre_release_adds_spin() {
        let launch = Launch {
            direction: Vec2::new(-1.0, 0.0),
            magnitude: 0.01,
            point: Vec2::new(10.0, 5.0),
        };
        let ext = launch_impulse(&launch, 1.0, Vec2::ZERO, 1000.0);
        assert!(ext.torque_impulse.abs() > 0.0);
    }

    #[test]
    fn leaving_the_window_keeps_the_last_point() {
        let mut pointer = PointerState::default();
        pointer.track(Some(Vec2::new(3.0, 4.0)));
        pointer.track(None);
        assert_eq!(pointer.world, None);
        assert_eq!(pointer.release_point(), Some(Vec2::new(3.0, 4.0)));
    }

    #[test]
    fn release_outside_window_still_launches() {
        use crate::shot::ShotState;
        use crate::testing;

        let mut app = testing::physics_app(&testing::open_level(250.0, 60.0));
        let ball = testing::ball_position(&app);

        testing::press(&mut app, Some(ball));
        assert_eq!(testing::session(&app).shot.state(), ShotState::Aiming);

        testing::move_pointer(&mut app, Some(ball - Vec2::new(100.0, 0.0)));
        testing::release(&mut app, None);

        let session = testing::session(&app);
        assert_eq!(session.shot.state(), ShotState::Launched);
        assert_eq!(session.strokes(), 1);
        app.update();
        assert!(testing::ball_velocity(&app).linvel.x > 0.0);
    }
}
