//! Render adapter: everything drawn from live physics state.
//!
//! ## Layer model
//!
//! | Layer               | Technology | Shown                             |
//! |---------------------|------------|-----------------------------------|
//! | Ball fill           | `Mesh2d`   | always (child of the ball body)   |
//! | Hole highlight fill | `Mesh2d`   | while the ball overlaps the hole  |
//! | Hole ring           | Gizmos     | always                            |
//! | Aim line            | Gizmos     | while aiming                      |
//! | Wall silhouettes    | Gizmos     | always, from live transforms      |
//!
//! Cursor affordance is pushed to the window's `CursorIcon` whenever it
//! changes: grab over an idle ball, grabbing while aiming, default otherwise.

use bevy::prelude::*;
use bevy::window::{CursorIcon, PrimaryWindow, SystemCursorIcon};
use bevy_rapier2d::prelude::*;

use crate::config::GolfConfig;
use crate::course::{Ball, CourseWall, Target};
use crate::effects::{ball_color, BallVisual};
use crate::input::PointerState;
use crate::probe::RapierProbe;
use crate::session::GameSession;
use crate::shot::{BallProbe, ShotState};

fn wall_color() -> Color {
    Color::srgb(0.35, 0.62, 0.38)
}
fn ring_color() -> Color {
    Color::srgb(0.95, 0.95, 0.95)
}
fn highlight_color() -> Color {
    Color::srgba(0.98, 0.85, 0.25, 0.55)
}
fn aim_color() -> Color {
    Color::srgb(1.0, 0.55, 0.35)
}

/// Marker for the hole's fill disc.
#[derive(Component, Debug)]
pub struct TargetHighlight;

/// What the pointer should look like.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum CursorAffordance {
    #[default]
    Default,
    Grab,
    Grabbing,
}

pub fn cursor_affordance(state: ShotState, hovering_ball: bool) -> CursorAffordance {
    match state {
        ShotState::Aiming => CursorAffordance::Grabbing,
        ShotState::Idle if hovering_ball => CursorAffordance::Grab,
        _ => CursorAffordance::Default,
    }
}

impl From<CursorAffordance> for SystemCursorIcon {
    fn from(value: CursorAffordance) -> Self {
        match value {
            CursorAffordance::Default => SystemCursorIcon::Default,
            CursorAffordance::Grab => SystemCursorIcon::Grab,
            CursorAffordance::Grabbing => SystemCursorIcon::Grabbing,
        }
    }
}

// ── Spawn-time mesh attachment ────────────────────────────────────────────────

/// Attach the ball's fill disc as a child so it can pulse without touching
/// the collider.
pub fn attach_ball_visual_system(
    mut commands: Commands,
    query: Query<Entity, Added<Ball>>,
    mut meshes: ResMut<Assets<Mesh>>,
    mut materials: ResMut<Assets<ColorMaterial>>,
    config: Res<GolfConfig>,
) {
    for entity in query.iter() {
        let mesh = meshes.add(Circle::new(config.ball_sprite_size / 2.0));
        let material = materials.add(ColorMaterial::from_color(ball_color(ShotState::Idle)));
        let visual = commands
            .spawn((
                BallVisual,
                Mesh2d(mesh),
                MeshMaterial2d(material),
                Transform::default(),
            ))
            .id();
        commands.entity(entity).add_child(visual);
    }
}

/// Attach the hidden highlight disc under each new hole.
pub fn attach_target_visual_system(
    mut commands: Commands,
    query: Query<(Entity, &Target), Added<Target>>,
    mut meshes: ResMut<Assets<Mesh>>,
    mut materials: ResMut<Assets<ColorMaterial>>,
) {
    for (entity, target) in query.iter() {
        let highlight = commands
            .spawn((
                TargetHighlight,
                Mesh2d(meshes.add(Circle::new(target.radius))),
                MeshMaterial2d(materials.add(ColorMaterial::from_color(highlight_color()))),
                Transform::from_xyz(0.0, 0.0, -0.5),
                Visibility::Hidden,
            ))
            .id();
        commands.entity(entity).add_child(highlight);
    }
}

// ── Per-frame drawing ─────────────────────────────────────────────────────────

/// Hole ring every frame; highlight fill only while the ball overlaps.
pub fn target_render_system(
    mut gizmos: Gizmos,
    session: Res<GameSession>,
    q_ball: Query<(&Transform, &Collider), With<Ball>>,
    q_target: Query<(&Transform, &Target, Option<&Children>)>,
    mut q_highlight: Query<&mut Visibility, With<TargetHighlight>>,
    rapier_context: ReadRapierContext,
) {
    let Ok((target_transform, target, children)) = q_target.get(session.target) else {
        return;
    };
    gizmos.circle_2d(
        target_transform.translation.truncate(),
        target.radius,
        ring_color(),
    );

    let overlapping = match (q_ball.get(session.ball), rapier_context.single()) {
        (Ok((transform, collider)), Ok(rapier)) => {
            RapierProbe::new(&rapier, session.ball, session.target, collider, transform)
                .ball_overlaps_target()
        }
        _ => false,
    };
    let wanted = if overlapping {
        Visibility::Inherited
    } else {
        Visibility::Hidden
    };
    for child in children.into_iter().flat_map(|c| c.iter()) {
        if let Ok(mut visibility) = q_highlight.get_mut(child) {
            if *visibility != wanted {
                *visibility = wanted;
            }
        }
    }
}

/// Line from the ball to the pointer while aiming.
pub fn aim_line_system(
    mut gizmos: Gizmos,
    session: Res<GameSession>,
    pointer: Res<PointerState>,
    q_ball: Query<&Transform, With<Ball>>,
) {
    if session.shot.state() != ShotState::Aiming {
        return;
    }
    let (Some(point), Ok(ball)) = (pointer.world, q_ball.get(session.ball)) else {
        return;
    };
    let from = ball.translation.truncate();
    gizmos.line_2d(from, point, aim_color());
    gizmos.circle_2d(point, 3.0, aim_color());
}

/// Outline every wall of the current course at its current pose.
pub fn wall_silhouette_system(
    mut gizmos: Gizmos,
    session: Res<GameSession>,
    q_walls: Query<(&Transform, &CourseWall)>,
) {
    for (transform, wall) in q_walls.iter_many(&session.colliders) {
        let angle = transform.rotation.to_euler(EulerRot::ZYX).0;
        let isometry = Isometry2d::new(transform.translation.truncate(), Rot2::radians(angle));
        gizmos.rect_2d(isometry, wall.size, wall_color());
    }
}

/// Keep the window cursor in sync with the shot state.
pub fn cursor_affordance_system(
    mut commands: Commands,
    session: Res<GameSession>,
    pointer: Res<PointerState>,
    q_ball: Query<(&Transform, &Collider), With<Ball>>,
    q_window: Query<Entity, With<PrimaryWindow>>,
    rapier_context: ReadRapierContext,
    mut last: Local<CursorAffordance>,
) {
    let hovering = match (pointer.world, q_ball.get(session.ball), rapier_context.single()) {
        (Some(point), Ok((transform, collider)), Ok(rapier)) => {
            RapierProbe::new(&rapier, session.ball, session.target, collider, transform)
                .ball_contains(point)
        }
        _ => false,
    };
    let affordance = cursor_affordance(session.shot.state(), hovering);
    if affordance == *last {
        return;
    }
    let Ok(window) = q_window.single() else {
        return;
    };
    *last = affordance;
    commands
        .entity(window)
        .insert(CursorIcon::from(SystemCursorIcon::from(affordance)));
}
