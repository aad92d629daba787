//! Body factory: turns a translated level into Rapier bodies.
//!
//! | Role    | Body                          | Marker        |
//! |---------|-------------------------------|---------------|
//! | Walls   | `Fixed` + cuboid              | [`CourseWall`] |
//! | Ball    | `Dynamic` + compound shape    | [`Ball`]       |
//! | Hole    | `Fixed` + ball + `Sensor`     | [`Target`]     |
//! | Bounds  | `Fixed` + cuboid (optional)   | [`BoundsWall`] |
//!
//! Every spawned entity also carries [`LevelEntity`] so a restart can tear
//! the whole course down with one query.  Meshes are attached afterwards by
//! the render module (`Added<Ball>` / `Added<Target>`), which keeps spawning
//! free of asset access.

use bevy::prelude::*;
use bevy_rapier2d::prelude::*;

use crate::config::GolfConfig;
use crate::error::{GolfError, GolfResult, RequiredEntity};
use crate::level::{
    playfield_to_world, translate, ColliderSpec, LevelDescriptor, PlayerSpec, TargetSpec,
    TranslatedLevel,
};
use crate::shape::{BodyMaterial, ShapeLibrary};

// ── Components ─────────────────────────────────────────────────────────────────

/// The player-controlled ball.
#[derive(Component, Debug)]
pub struct Ball;

/// Hole sensor.
#[derive(Component, Debug, Clone, Copy)]
pub struct Target {
    pub radius: f32,
}

/// Static course collider authored in the level file.
#[derive(Component, Debug, Clone, Copy)]
pub struct CourseWall {
    /// Full width and height in world units.
    pub size: Vec2,
}

/// Canvas-edge wall added by the game, not by the level.
#[derive(Component, Debug)]
pub struct BoundsWall;

/// Despawned on restart / level change.
#[derive(Component, Debug, Default)]
pub struct LevelEntity;

// ── Blueprint ─────────────────────────────────────────────────────────────────

/// A translated level with its ball and hole guaranteed present.
#[derive(Debug, Clone, PartialEq)]
pub struct CourseBlueprint {
    pub level: String,
    pub colliders: Vec<ColliderSpec>,
    pub player: PlayerSpec,
    pub target: TargetSpec,
}

impl CourseBlueprint {
    /// Validate a translated level.  A level without a ball or without a hole
    /// cannot be won and is rejected here rather than at first use.
    pub fn from_translated(level: &str, translated: TranslatedLevel) -> GolfResult<Self> {
        let player = translated.player.ok_or_else(|| GolfError::MissingEntity {
            level: level.to_string(),
            entity: RequiredEntity::Player,
        })?;
        let target = translated.target.ok_or_else(|| GolfError::MissingEntity {
            level: level.to_string(),
            entity: RequiredEntity::Target,
        })?;
        Ok(Self {
            level: level.to_string(),
            colliders: translated.colliders,
            player,
            target,
        })
    }

    /// Translate and validate a level with the configured margin and sprite size.
    pub fn from_level(level: &LevelDescriptor, config: &GolfConfig) -> GolfResult<Self> {
        let translated = translate(&level.objects, config.margin(), config.ball_sprite_size);
        Self::from_translated(&level.key, translated)
    }
}

/// Ball collider and material, resolved once from the shape library.
#[derive(Resource, Debug, Clone)]
pub struct BallBody {
    pub collider: Collider,
    pub material: BodyMaterial,
}

impl BallBody {
    pub fn from_library(shapes: &ShapeLibrary, config: &GolfConfig) -> GolfResult<Self> {
        Ok(Self {
            collider: shapes.collider(&config.ball_shape_key, config.ball_sprite_size)?,
            material: shapes.material(&config.ball_shape_key)?,
        })
    }
}

/// Entity handles of one spawned course.
#[derive(Debug, Clone)]
pub struct CourseHandles {
    pub colliders: Vec<Entity>,
    pub bounds: Vec<Entity>,
    pub ball: Entity,
    pub target: Entity,
}

// ── Spawning ──────────────────────────────────────────────────────────────────

/// Spawn every body of `blueprint`.
pub fn spawn_course(
    commands: &mut Commands,
    blueprint: &CourseBlueprint,
    ball_body: &BallBody,
    config: &GolfConfig,
) -> CourseHandles {
    let canvas = config.canvas();
    let to_world = |x: f32, y: f32| playfield_to_world(Vec2::new(x, y), canvas);

    let colliders = blueprint
        .colliders
        .iter()
        .map(|c| {
            let size = Vec2::new(c.width, c.height);
            commands
                .spawn((
                    CourseWall { size },
                    LevelEntity,
                    RigidBody::Fixed,
                    Collider::cuboid(size.x / 2.0, size.y / 2.0),
                    Transform::from_translation(to_world(c.x, c.y).extend(0.0)),
                    Visibility::default(),
                ))
                .id()
        })
        .collect();

    let bounds = if config.spawn_bounds {
        spawn_bounds(commands, canvas, config.bounds_thickness)
    } else {
        Vec::new()
    };

    let target = commands
        .spawn((
            Target {
                radius: blueprint.target.radius,
            },
            LevelEntity,
            RigidBody::Fixed,
            Collider::ball(blueprint.target.radius),
            Sensor,
            Transform::from_translation(
                to_world(blueprint.target.x, blueprint.target.y).extend(0.0),
            ),
            Visibility::default(),
        ))
        .id();

    let material = ball_body.material;
    let ball = commands
        .spawn((
            Ball,
            LevelEntity,
            RigidBody::Dynamic,
            ball_body.collider.clone(),
            ColliderMassProperties::Density(material.density),
            ReadMassProperties::default(),
            Velocity::zero(),
            ExternalImpulse::default(),
            Damping {
                linear_damping: material.friction_air * config.air_friction_to_damping,
                angular_damping: config.ball_angular_damping,
            },
            Restitution::coefficient(material.restitution),
            Friction::coefficient(material.friction),
            Ccd::enabled(),
            Transform::from_translation(
                to_world(blueprint.player.x, blueprint.player.y).extend(1.0),
            ),
            Visibility::default(),
        ))
        .id();

    info!(
        "Spawned course '{}': {} colliders, ball at ({:.0}, {:.0})",
        blueprint.level,
        blueprint.colliders.len(),
        blueprint.player.x,
        blueprint.player.y
    );

    CourseHandles {
        colliders,
        bounds,
        ball,
        target,
    }
}

/// Four fixed walls just outside the canvas edge.
fn spawn_bounds(commands: &mut Commands, canvas: Vec2, thickness: f32) -> Vec<Entity> {
    let half = canvas / 2.0;
    let t = thickness / 2.0;
    let walls = [
        // (centre, half extents)
        (Vec2::new(0.0, half.y + t), Vec2::new(half.x + thickness, t)),
        (Vec2::new(0.0, -half.y - t), Vec2::new(half.x + thickness, t)),
        (Vec2::new(-half.x - t, 0.0), Vec2::new(t, half.y + thickness)),
        (Vec2::new(half.x + t, 0.0), Vec2::new(t, half.y + thickness)),
    ];
    walls
        .iter()
        .map(|&(center, half_extents)| {
            commands
                .spawn((
                    BoundsWall,
                    LevelEntity,
                    RigidBody::Fixed,
                    Collider::cuboid(half_extents.x, half_extents.y),
                    Transform::from_translation(center.extend(0.0)),
                ))
                .id()
        })
        .collect()
}
