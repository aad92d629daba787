//! Compound body shapes exported from PhysicsEditor.
//!
//! The shape asset maps a body identifier (`"tile-0"`) to a list of fixtures,
//! each either a set of convex polygons or a circle, in sprite-local pixels
//! with the origin at the sprite's top-left corner and y pointing down.
//! [`ShapeLibrary::collider`] re-centres the fixtures on the sprite centre,
//! flips them into the y-up world frame and assembles a Rapier compound
//! collider.  Material values from the export (restitution, friction, air
//! friction) are carried over to the ball body.

use std::collections::HashMap;
use std::path::Path;

use bevy::prelude::*;
use bevy_rapier2d::prelude::*;
use serde::Deserialize;

use crate::error::{GolfError, GolfResult};

fn default_density() -> f32 {
    0.001
}

fn default_friction() -> f32 {
    0.1
}

fn default_friction_air() -> f32 {
    0.01
}

#[derive(Deserialize, Debug, Clone, Copy, PartialEq)]
pub struct ShapePoint {
    pub x: f32,
    pub y: f32,
}

#[derive(Deserialize, Debug, Clone, Copy, PartialEq)]
pub struct ShapeCircle {
    pub x: f32,
    pub y: f32,
    pub radius: f32,
}

/// One fixture: convex polygons, a circle, or (rarely) both.
#[derive(Deserialize, Debug, Clone, Default)]
pub struct Fixture {
    #[serde(default)]
    pub label: String,
    #[serde(default, rename = "isSensor")]
    pub is_sensor: bool,
    #[serde(default)]
    pub vertices: Vec<Vec<ShapePoint>>,
    #[serde(default)]
    pub circle: Option<ShapeCircle>,
}

/// A single body entry in the shape export.
#[derive(Deserialize, Debug, Clone)]
#[serde(rename_all = "camelCase")]
pub struct ShapeDefinition {
    #[serde(default)]
    pub label: String,
    #[serde(default = "default_density")]
    pub density: f32,
    #[serde(default)]
    pub restitution: f32,
    #[serde(default = "default_friction")]
    pub friction: f32,
    /// Fraction of velocity lost to air each simulation step.
    #[serde(default = "default_friction_air")]
    pub friction_air: f32,
    pub fixtures: Vec<Fixture>,
}

/// Top-level keys written by the exporter that are not shapes.
pub const METADATA_KEYS: &[&str] = &["generator_info"];

/// Surface and damping values for a body built from a shape.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct BodyMaterial {
    pub density: f32,
    pub restitution: f32,
    pub friction: f32,
    pub friction_air: f32,
}

/// All shapes from the PhysicsEditor export, keyed by body identifier.
#[derive(Resource, Debug, Clone, Default)]
pub struct ShapeLibrary {
    shapes: HashMap<String, ShapeDefinition>,
}

impl ShapeLibrary {
    pub fn from_json_str(json: &str) -> Result<Self, serde_json::Error> {
        let entries: HashMap<String, serde_json::Value> = serde_json::from_str(json)?;
        let mut shapes = HashMap::with_capacity(entries.len());
        for (key, value) in entries {
            if METADATA_KEYS.contains(&key.as_str()) {
                continue;
            }
            shapes.insert(key, serde_json::from_value::<ShapeDefinition>(value)?);
        }
        Ok(Self { shapes })
    }

    pub fn load(path: &Path) -> GolfResult<Self> {
        let contents = std::fs::read_to_string(path).map_err(|source| GolfError::Io {
            path: path.to_path_buf(),
            source,
        })?;
        Self::from_json_str(&contents).map_err(|source| GolfError::Json {
            path: path.to_path_buf(),
            source,
        })
    }

    pub fn get(&self, key: &str) -> GolfResult<&ShapeDefinition> {
        self.shapes.get(key).ok_or_else(|| GolfError::ShapeNotFound {
            key: key.to_string(),
        })
    }

    pub fn len(&self) -> usize {
        self.shapes.len()
    }

    pub fn is_empty(&self) -> bool {
        self.shapes.is_empty()
    }

    /// Material values of the shape `key`.
    pub fn material(&self, key: &str) -> GolfResult<BodyMaterial> {
        let def = self.get(key)?;
        Ok(BodyMaterial {
            density: def.density,
            restitution: def.restitution,
            friction: def.friction,
            friction_air: def.friction_air,
        })
    }

    /// Build the compound collider for `key`, centred on a sprite of
    /// `sprite_size` pixels.  Sensor fixtures are skipped.
    pub fn collider(&self, key: &str, sprite_size: f32) -> GolfResult<Collider> {
        let def = self.get(key)?;
        let half = sprite_size / 2.0;
        let to_local = |x: f32, y: f32| Vec2::new(x - half, half - y);

        let mut parts: Vec<(Vect, Rot, Collider)> = Vec::new();
        for fixture in def.fixtures.iter().filter(|f| !f.is_sensor) {
            for polygon in &fixture.vertices {
                let points: Vec<Vect> = polygon.iter().map(|p| to_local(p.x, p.y)).collect();
                let hull =
                    Collider::convex_polyline(points).ok_or_else(|| GolfError::InvalidShape {
                        key: key.to_string(),
                        reason: format!(
                            "fixture '{}' has a degenerate polygon ({} points)",
                            fixture.label,
                            polygon.len()
                        ),
                    })?;
                parts.push((Vec2::ZERO, 0.0, hull));
            }
            if let Some(circle) = fixture.circle {
                if circle.radius <= 0.0 {
                    return Err(GolfError::InvalidShape {
                        key: key.to_string(),
                        reason: format!("fixture '{}' has a non-positive radius", fixture.label),
                    });
                }
                parts.push((to_local(circle.x, circle.y), 0.0, Collider::ball(circle.radius)));
            }
        }

        if parts.is_empty() {
            return Err(GolfError::InvalidShape {
                key: key.to_string(),
                reason: "no solid fixtures".into(),
            });
        }
        Ok(Collider::compound(parts))
    }
}
