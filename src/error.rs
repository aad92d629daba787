//! Load-time error types.
//!
//! Everything that can go wrong with external data (level files, the shape
//! asset) is caught while the game starts and reported through [`GolfError`].
//! Once a level is running, the shot/settle state machine has no failure
//! modes of its own.
//!
//! ## Usage
//!
//! ```rust,ignore
//! use crate::error::{GolfError, GolfResult};
//!
//! fn order_of(level: &str, value: Option<f64>) -> GolfResult<f64> {
//!     value.ok_or_else(|| GolfError::LevelData {
//!         level: level.to_string(),
//!         reason: "missing `order` property".into(),
//!     })
//! }
//! ```

use std::fmt;
use std::path::PathBuf;

/// Which required entity a level omitted.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum RequiredEntity {
    Player,
    Target,
}

impl fmt::Display for RequiredEntity {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            RequiredEntity::Player => f.write_str("player"),
            RequiredEntity::Target => f.write_str("target"),
        }
    }
}

/// Top-level error enum for level and asset loading.
#[derive(Debug)]
pub enum GolfError {
    /// A level has no `player` or no `target` object, so it cannot be won.
    MissingEntity {
        /// Level key (file stem).
        level: String,
        entity: RequiredEntity,
    },

    /// Tile-map data is structurally valid JSON but not a usable level.
    LevelData {
        /// Level key (file stem).
        level: String,
        /// Human-readable description of what is wrong.
        reason: String,
    },

    /// The shape library has no entry for the requested body identifier.
    ShapeNotFound { key: String },

    /// A shape entry exists but cannot be turned into a collider.
    InvalidShape { key: String, reason: String },

    /// The levels directory contained no `*.json` files.
    NoLevels { dir: PathBuf },

    /// Filesystem failure while reading an asset.
    Io {
        path: PathBuf,
        source: std::io::Error,
    },

    /// An asset file is not valid JSON for its expected schema.
    Json {
        path: PathBuf,
        source: serde_json::Error,
    },
}

impl fmt::Display for GolfError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            GolfError::MissingEntity { level, entity } => {
                write!(f, "level '{}' has no {} object", level, entity)
            }
            GolfError::LevelData { level, reason } => {
                write!(f, "level '{}' is malformed: {}", level, reason)
            }
            GolfError::ShapeNotFound { key } => {
                write!(f, "shape '{}' not found in shape library", key)
            }
            GolfError::InvalidShape { key, reason } => {
                write!(f, "shape '{}' is unusable: {}", key, reason)
            }
            GolfError::NoLevels { dir } => {
                write!(f, "no level files found in {}", dir.display())
            }
            GolfError::Io { path, source } => {
                write!(f, "failed to read {}: {}", path.display(), source)
            }
            GolfError::Json { path, source } => {
                write!(f, "failed to parse {}: {}", path.display(), source)
            }
        }
    }
}

impl std::error::Error for GolfError {
    fn source(&self) -> Option<&(dyn std::error::Error + 'static)> {
        match self {
            GolfError::Io { source, .. } => Some(source),
            GolfError::Json { source, .. } => Some(source),
            _ => None,
        }
    }
}

/// Convenience alias: a `Result` using `GolfError` as the error type.
pub type GolfResult<T> = Result<T, GolfError>;

/// Shorthand for a [`GolfError::LevelData`] with an owned level key.
pub(crate) fn level_data(level: &str, reason: impl Into<String>) -> GolfError {
    GolfError::LevelData {
        level: level.to_string(),
        reason: reason.into(),
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn display_names_the_level_and_entity() {
        let err = GolfError::MissingEntity {
            level: "hole-2".into(),
            entity: RequiredEntity::Target,
        };
        assert_eq!(err.to_string(), "level 'hole-2' has no target object");
    }

    #[test]
    fn io_error_exposes_source() {
        use std::error::Error;
        let err = GolfError::Io {
            path: PathBuf::from("assets/levels/x.json"),
            source: std::io::Error::new(std::io::ErrorKind::NotFound, "gone"),
        };
        assert!(err.source().is_some());
        assert!(err.to_string().contains("assets/levels/x.json"));
    }
}
