//! Level data: Tiled ingestion, geometry translation, and the level registry.
//!
//! | Module | Responsibility |
//! |--------|----------------|
//! | [`tiled`] | Parse and validate Tiled JSON into [`LevelDescriptor`] |
//! | [`translate`] | Corner-origin tile-map objects → centre-origin body descriptors |
//! | [`registry`] | Sort levels by `order`; current level and wrapping advance |

pub mod registry;
pub mod tiled;
pub mod translate;

pub use registry::LevelRegistry;
pub use tiled::{LevelDescriptor, ObjectKind, TiledObject};
pub use translate::{
    playfield_to_world, translate, ColliderSpec, PlayerSpec, TargetSpec, TranslatedLevel,
};
