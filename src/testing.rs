//! Headless Rapier harness for the engine-facing systems.
//!
//! Runs the real input and settle systems against a real Rapier world:
//! `MinimalPlugins` plus the transform/asset/scene plugins Rapier needs, a
//! fixed 1/60 s clock, and no window.  Pointer and mouse button state are
//! written directly, standing in for `pointer_position_system` and Bevy's
//! input plugin.

use std::time::Duration;

use bevy::asset::AssetPlugin;
use bevy::scene::ScenePlugin;
use bevy::time::TimeUpdateStrategy;
use bevy::prelude::*;
use bevy_rapier2d::prelude::*;

use crate::config::GolfConfig;
use crate::course::{spawn_course, BallBody, CourseBlueprint};
use crate::effects::BallVisual;
use crate::game::disable_gravity_system;
use crate::input::{shot_input_system, PointerState};
use crate::level::{LevelDescriptor, ObjectKind, TiledObject};
use crate::session::{GameSession, LevelWon};
use crate::settle::settle_monitor_system;
use crate::shape::BodyMaterial;
use crate::shot::ShotState;

/// Open level with the ball at world (-140, -6) and a hole of radius
/// `hole_radius` centred `hole_offset` units to its right.
pub(crate) fn open_level(hole_offset: f32, hole_radius: f32) -> LevelDescriptor {
    // Ball object at (100, 150) → playfield centre (160, 206).
    let hole_x = 160.0 + hole_offset - hole_radius - 44.0;
    let hole_y = 206.0 - hole_radius - 40.0;
    LevelDescriptor {
        key: "range".into(),
        order: 1.0,
        name: "Range".into(),
        objects: vec![
            TiledObject::new(ObjectKind::Player, 100.0, 150.0, 32.0, 32.0),
            TiledObject::new(
                ObjectKind::Target,
                hole_x,
                hole_y,
                hole_radius * 2.0,
                hole_radius * 2.0,
            ),
        ],
    }
}

/// App with the course spawned and Rapier bodies initialised.
pub(crate) fn physics_app(level: &LevelDescriptor) -> App {
    let config = GolfConfig {
        spawn_bounds: false,
        ..Default::default()
    };
    let blueprint = CourseBlueprint::from_level(level, &config).expect("level has ball and hole");
    let ball = BallBody {
        collider: Collider::ball(14.0),
        material: BodyMaterial {
            density: 1.0,
            restitution: 0.5,
            friction: 0.1,
            friction_air: 0.02,
        },
    };

    let mut app = App::new();
    app.add_plugins((
        MinimalPlugins,
        TransformPlugin,
        AssetPlugin::default(),
        ScenePlugin,
        RapierPhysicsPlugin::<NoUserData>::pixels_per_meter(1.0),
    ));
    app.insert_resource(TimeUpdateStrategy::ManualDuration(Duration::from_secs_f64(
        1.0 / 60.0,
    )))
    .init_resource::<ButtonInput<MouseButton>>()
    .init_resource::<PointerState>()
    .add_message::<LevelWon>()
    .insert_resource(config.clone())
    .add_systems(Update, (disable_gravity_system, shot_input_system).chain())
    .add_systems(
        PostUpdate,
        settle_monitor_system.after(PhysicsSet::Writeback),
    );

    let handles = {
        let mut commands = app.world_mut().commands();
        spawn_course(&mut commands, &blueprint, &ball, &config)
    };
    app.world_mut().flush();
    app.insert_resource(GameSession::new(level, handles));
    app.world_mut().spawn(BallVisual);

    // Let Rapier build the bodies and report the ball's mass.
    for _ in 0..3 {
        app.update();
    }
    app
}

pub(crate) fn session(app: &App) -> &GameSession {
    app.world().resource::<GameSession>()
}

pub(crate) fn ball_position(app: &App) -> Vec2 {
    let ball = session(app).ball;
    app.world()
        .get::<Transform>(ball)
        .expect("ball has a transform")
        .translation
        .truncate()
}

pub(crate) fn ball_velocity(app: &App) -> Velocity {
    let ball = session(app).ball;
    *app.world().get::<Velocity>(ball).expect("ball has a velocity")
}

/// Move the cursor (`None` = outside the window) and run one frame.
pub(crate) fn move_pointer(app: &mut App, world: Option<Vec2>) {
    app.world_mut().resource_mut::<PointerState>().track(world);
    app.update();
}

pub(crate) fn press(app: &mut App, world: Option<Vec2>) {
    app.world_mut().resource_mut::<PointerState>().track(world);
    app.world_mut()
        .resource_mut::<ButtonInput<MouseButton>>()
        .press(MouseButton::Left);
    app.update();
    app.world_mut()
        .resource_mut::<ButtonInput<MouseButton>>()
        .clear();
}

pub(crate) fn release(app: &mut App, world: Option<Vec2>) {
    app.world_mut().resource_mut::<PointerState>().track(world);
    app.world_mut()
        .resource_mut::<ButtonInput<MouseButton>>()
        .release(MouseButton::Left);
    app.update();
    app.world_mut()
        .resource_mut::<ButtonInput<MouseButton>>()
        .clear();
}

/// Step until the shot returns to `Idle`, collecting every `LevelWon`.
pub(crate) fn run_until_idle(app: &mut App, max_frames: usize) -> Vec<LevelWon> {
    let mut won = Vec::new();
    for _ in 0..max_frames {
        app.update();
        won.extend(
            app.world_mut()
                .resource_mut::<Messages<LevelWon>>()
                .drain(),
        );
        if session(app).shot.state() == ShotState::Idle {
            return won;
        }
    }
    panic!("ball still moving after {max_frames} frames");
}
