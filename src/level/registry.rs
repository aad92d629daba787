//! Ordered level list with a wrapping cursor.

use std::path::{Path, PathBuf};

use bevy::prelude::*;

use super::tiled::LevelDescriptor;
use crate::error::{GolfError, GolfResult};

/// All loaded levels sorted by `order`, plus the index of the one in play.
///
/// The only mutable state is the cursor: restarting re-enters the same index,
/// [`LevelRegistry::advance`] moves forward and wraps after the last level.
#[derive(Resource, Debug, Clone)]
pub struct LevelRegistry {
    levels: Vec<LevelDescriptor>,
    index: usize,
}

impl LevelRegistry {
    /// Sort `levels` by ascending `order`.  The sort is stable, so levels with
    /// equal `order` keep their input order.
    ///
    /// Returns `None` for an empty list; a registry always has a current level.
    pub fn new(mut levels: Vec<LevelDescriptor>) -> Option<Self> {
        if levels.is_empty() {
            return None;
        }
        levels.sort_by(|a, b| a.order.total_cmp(&b.order));
        Some(Self { levels, index: 0 })
    }

    /// Load every `*.json` file in `dir`.
    ///
    /// Files are visited in file-name order so ties on `order` resolve the
    /// same way on every platform.
    pub fn load_dir(dir: &Path) -> GolfResult<Self> {
        let entries = std::fs::read_dir(dir).map_err(|source| GolfError::Io {
            path: dir.to_path_buf(),
            source,
        })?;

        let mut paths: Vec<PathBuf> = Vec::new();
        for entry in entries {
            let entry = entry.map_err(|source| GolfError::Io {
                path: dir.to_path_buf(),
                source,
            })?;
            let path = entry.path();
            if path.extension().is_some_and(|ext| ext == "json") {
                paths.push(path);
            }
        }
        paths.sort();

        let levels = paths
            .iter()
            .map(|p| LevelDescriptor::from_file(p))
            .collect::<GolfResult<Vec<_>>>()?;

        Self::new(levels).ok_or_else(|| GolfError::NoLevels {
            dir: dir.to_path_buf(),
        })
    }

    pub fn current(&self) -> &LevelDescriptor {
        &self.levels[self.index]
    }

    /// Move to the next level, wrapping to the first after the last.
    pub fn advance(&mut self) {
        self.index = (self.index + 1) % self.levels.len();
    }

    /// Jump to the level with the given key.  Returns `false` if there is none.
    pub fn select(&mut self, key: &str) -> bool {
        match self.levels.iter().position(|l| l.key == key) {
            Some(i) => {
                self.index = i;
                true
            }
            None => false,
        }
    }

    pub fn index(&self) -> usize {
        self.index
    }

    pub fn len(&self) -> usize {
        self.levels.len()
    }

    pub fn is_empty(&self) -> bool {
        self.levels.is_empty()
    }

    /// Levels in play order.
    pub fn levels(&self) -> &[LevelDescriptor] {
        &self.levels
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn level(key: &str, order: f64) -> LevelDescriptor {
        LevelDescriptor {
            key: key.into(),
            order,
            name: key.to_uppercase(),
            objects: Vec::new(),
        }
    }

    fn keys(reg: &LevelRegistry) -> Vec<&str> {
        reg.levels().iter().map(|l| l.key.as_str()).collect()
    }

    #[test]
    fn levels_are_sorted_by_order() {
        let reg = LevelRegistry::new(vec![level("c", 3.0), level("a", 1.0), level("b", 2.0)])
            .unwrap();
        let orders: Vec<f64> = reg.levels().iter().map(|l| l.order).collect();
        assert_eq!(orders, vec![1.0, 2.0, 3.0]);
        assert_eq!(reg.current().key, "a");
    }

    #[test]
    fn equal_orders_keep_input_order() {
        let reg = LevelRegistry::new(vec![
            level("second", 1.0),
            level("first", 0.0),
            level("third", 1.0),
        ])
        .unwrap();
        assert_eq!(keys(&reg), vec!["first", "second", "third"]);
    }

    #[test]
    fn advance_wraps_to_start() {
        let mut reg =
            LevelRegistry::new(vec![level("a", 1.0), level("b", 2.0), level("c", 3.0)]).unwrap();
        reg.advance();
        reg.advance();
        assert_eq!(reg.index(), 2);
        reg.advance();
        assert_eq!(reg.index(), 0);
        assert_eq!(reg.current().key, "a");
    }

    #[test]
    fn single_level_advance_stays_put() {
        let mut reg = LevelRegistry::new(vec![level("only", 5.0)]).unwrap();
        reg.advance();
        assert_eq!(reg.index(), 0);
    }

    #[test]
    fn empty_list_has_no_registry() {
        assert!(LevelRegistry::new(Vec::new()).is_none());
    }

    #[test]
    fn select_by_key() {
        let mut reg = LevelRegistry::new(vec![level("a", 1.0), level("b", 2.0)]).unwrap();
        assert!(reg.select("b"));
        assert_eq!(reg.index(), 1);
        assert!(!reg.select("missing"));
        assert_eq!(reg.index(), 1);
    }

    #[test]
    fn load_dir_reports_missing_directory() {
        let err = LevelRegistry::load_dir(Path::new("definitely/not/here")).unwrap_err();
        assert!(matches!(err, GolfError::Io { .. }));
    }
}
