//! Game session and scene controller.
//!
//! ## States
//!
//! | `GamePhase` | Description                                         |
//! |-------------|-----------------------------------------------------|
//! | `Playing`   | Ball can be aimed; settle monitor active            |
//! | `Won`       | Ball settled in the hole; victory overlay is shown  |
//!
//! All per-attempt state lives in the [`GameSession`] resource.  Restarting
//! or changing level never edits it in place: every [`LevelEntity`] is
//! despawned and a fresh session is built from the registry's current level.
//!
//! ## Systems
//!
//! | System                       | Schedule  | Purpose                                |
//! |------------------------------|-----------|----------------------------------------|
//! | `start_first_level_system`   | Startup   | Spawn the current level, insert session |
//! | `level_command_system`       | Update    | Apply `LevelCommand` (restart / skip)  |
//! | `level_won_system`           | PostUpdate| `LevelWon` → `GamePhase::Won`          |

use std::path::Path;

use bevy::prelude::*;

use crate::config::GolfConfig;
use crate::course::{spawn_course, BallBody, CourseBlueprint, CourseHandles, LevelEntity};
use crate::error::GolfResult;
use crate::level::{LevelDescriptor, LevelRegistry};
use crate::shape::ShapeLibrary;
use crate::shot::ShotController;

// ── States & messages ─────────────────────────────────────────────────────────

#[derive(States, Debug, Clone, Copy, PartialEq, Eq, Hash, Default)]
pub enum GamePhase {
    #[default]
    Playing,
    Won,
}

/// Commands accepted from the UI surface.
#[derive(Message, Debug, Clone, Copy, PartialEq, Eq)]
pub enum LevelCommand {
    /// Rebuild the current level from scratch.
    Restart,
    /// Advance to the next level (wrapping) and build it.
    Skip,
}

/// The ball settled inside the hole.
#[derive(Message, Debug, Clone, PartialEq, Eq)]
pub struct LevelWon {
    pub level: String,
    pub strokes: u32,
}

// ── Session ───────────────────────────────────────────────────────────────────

/// Everything that belongs to one attempt at one level.
#[derive(Resource, Debug, Clone)]
pub struct GameSession {
    pub level_key: String,
    pub level_name: String,
    pub ball: Entity,
    pub target: Entity,
    pub colliders: Vec<Entity>,
    pub shot: ShotController,
}

impl GameSession {
    pub fn new(level: &LevelDescriptor, handles: CourseHandles) -> Self {
        Self {
            level_key: level.key.clone(),
            level_name: level.name.clone(),
            ball: handles.ball,
            target: handles.target,
            colliders: handles.colliders,
            shot: ShotController::new(),
        }
    }

    #[inline]
    pub fn strokes(&self) -> u32 {
        self.shot.strokes()
    }
}

/// Validated blueprints for every level, in registry order.
///
/// Built once at startup so a broken level fails the launch instead of the
/// moment a player reaches it.
#[derive(Resource, Debug, Clone)]
pub struct CourseCatalog {
    blueprints: Vec<CourseBlueprint>,
}

impl CourseCatalog {
    pub fn build(registry: &LevelRegistry, config: &GolfConfig) -> GolfResult<Self> {
        let blueprints = registry
            .levels()
            .iter()
            .map(|level| CourseBlueprint::from_level(level, config))
            .collect::<GolfResult<Vec<_>>>()?;
        Ok(Self { blueprints })
    }

    pub fn get(&self, index: usize) -> Option<&CourseBlueprint> {
        self.blueprints.get(index)
    }
}

/// Everything loaded from disk before the app starts.
pub struct CourseAssets {
    pub registry: LevelRegistry,
    pub catalog: CourseCatalog,
    pub ball: BallBody,
}

impl CourseAssets {
    pub fn load(config: &GolfConfig, levels_dir: &Path, shapes_path: &Path) -> GolfResult<Self> {
        let registry = LevelRegistry::load_dir(levels_dir)?;
        let catalog = CourseCatalog::build(&registry, config)?;
        let shapes = ShapeLibrary::load(shapes_path)?;
        let ball = BallBody::from_library(&shapes, config)?;
        Ok(Self {
            registry,
            catalog,
            ball,
        })
    }
}

/// Spawn the registry's current level and return its fresh session.
pub fn open_level(
    commands: &mut Commands,
    registry: &LevelRegistry,
    catalog: &CourseCatalog,
    ball: &BallBody,
    config: &GolfConfig,
) -> Option<GameSession> {
    let level = registry.current();
    let Some(blueprint) = catalog.get(registry.index()) else {
        error!(
            "No blueprint for level '{}' (index {})",
            level.key,
            registry.index()
        );
        return None;
    };
    let handles = spawn_course(commands, blueprint, ball, config);
    info!("Level {}/{}: {}", registry.index() + 1, registry.len(), level.name);
    Some(GameSession::new(level, handles))
}

// ── Systems ───────────────────────────────────────────────────────────────────

pub fn start_first_level_system(
    mut commands: Commands,
    registry: Res<LevelRegistry>,
    catalog: Res<CourseCatalog>,
    ball: Res<BallBody>,
    config: Res<GolfConfig>,
) {
    if let Some(session) = open_level(&mut commands, &registry, &catalog, &ball, &config) {
        commands.insert_resource(session);
    }
}

/// Tear down the current course and build the next one.
///
/// Several commands in one frame collapse into a single rebuild; each `Skip`
/// still advances the registry once.
#[allow(clippy::too_many_arguments)]
pub fn level_command_system(
    mut commands: Commands,
    mut reader: MessageReader<LevelCommand>,
    mut registry: ResMut<LevelRegistry>,
    catalog: Res<CourseCatalog>,
    ball: Res<BallBody>,
    config: Res<GolfConfig>,
    q_level: Query<Entity, With<LevelEntity>>,
    mut next_phase: ResMut<NextState<GamePhase>>,
) {
    let mut rebuild = false;
    for command in reader.read() {
        rebuild = true;
        if *command == LevelCommand::Skip {
            registry.advance();
        }
    }
    if !rebuild {
        return;
    }

    for entity in q_level.iter() {
        commands.entity(entity).despawn();
    }
    if let Some(session) = open_level(&mut commands, &registry, &catalog, &ball, &config) {
        commands.insert_resource(session);
    }
    next_phase.set(GamePhase::Playing);
}

pub fn level_won_system(
    mut reader: MessageReader<LevelWon>,
    mut next_phase: ResMut<NextState<GamePhase>>,
) {
    if let Some(won) = reader.read().last() {
        info!("Level '{}' complete in {} strokes", won.level, won.strokes);
        next_phase.set(GamePhase::Won);
    }
}
