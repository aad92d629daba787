//! Tiled JSON ingestion.
//!
//! Levels are authored in the Tiled map editor and exported as JSON.  Only a
//! small part of that format matters here:
//!
//! ```text
//! {
//!   "layers": [ { "type": "objectgroup",
//!                 "objects": [ { "type": "collider", "x": 0, "y": 0,
//!                                "width": 64, "height": 16 }, ... ] } ],
//!   "properties": [ { "name": "order",     "type": "int",    "value": 1 },
//!                   { "name": "levelName", "type": "string", "value": "Warmup" } ]
//! }
//! ```
//!
//! The raw serde model mirrors the file; [`LevelDescriptor::from_json_str`]
//! validates it into the typed model so nothing downstream ever sees a
//! missing field.  Tiled 1.9+ writes the object tag as `class` instead of
//! `type`; both are accepted.  Group layers are searched recursively.

use std::path::Path;

use serde::Deserialize;
use serde_json::Value;

use crate::error::{level_data, GolfError, GolfResult};

/// Map property holding the numeric sort key.
pub const ORDER_PROPERTY: &str = "order";
/// Map property holding the display name.
pub const NAME_PROPERTY: &str = "levelName";

// ── Typed model ───────────────────────────────────────────────────────────────

/// Role of a tile-map object.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ObjectKind {
    Collider,
    Player,
    Target,
}

impl ObjectKind {
    fn parse(tag: &str) -> Option<Self> {
        match tag {
            "collider" => Some(ObjectKind::Collider),
            "player" => Some(ObjectKind::Player),
            "target" => Some(ObjectKind::Target),
            _ => None,
        }
    }
}

/// One typed rectangle in tile-map pixels, upper-left origin.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct TiledObject {
    pub kind: ObjectKind,
    pub x: f32,
    pub y: f32,
    pub width: f32,
    pub height: f32,
}

impl TiledObject {
    pub fn new(kind: ObjectKind, x: f32, y: f32, width: f32, height: f32) -> Self {
        Self {
            kind,
            x,
            y,
            width,
            height,
        }
    }
}

/// A fully validated level.  Immutable once loaded.
#[derive(Debug, Clone, PartialEq)]
pub struct LevelDescriptor {
    /// File stem the level was loaded from.
    pub key: String,
    /// Sort key from the `order` map property.
    pub order: f64,
    /// Display name from the `levelName` map property.
    pub name: String,
    pub objects: Vec<TiledObject>,
}

// ── Raw serde model ───────────────────────────────────────────────────────────

#[derive(Deserialize)]
struct RawMap {
    #[serde(default)]
    layers: Vec<RawLayer>,
    #[serde(default)]
    properties: Vec<RawProperty>,
}

#[derive(Deserialize)]
struct RawLayer {
    #[serde(rename = "type")]
    kind: String,
    #[serde(default)]
    name: String,
    #[serde(default)]
    objects: Vec<RawObject>,
    /// Children of a `group` layer.
    #[serde(default)]
    layers: Vec<RawLayer>,
}

#[derive(Deserialize)]
struct RawObject {
    #[serde(default)]
    id: u32,
    #[serde(rename = "type", default)]
    kind: String,
    #[serde(default)]
    class: String,
    x: f32,
    y: f32,
    #[serde(default)]
    width: f32,
    #[serde(default)]
    height: f32,
}

#[derive(Deserialize)]
struct RawProperty {
    name: String,
    value: Value,
}

fn property<'a>(props: &'a [RawProperty], name: &str) -> Option<&'a Value> {
    props.iter().find(|p| p.name == name).map(|p| &p.value)
}

fn collect_objects<'a>(layers: &'a [RawLayer], out: &mut Vec<(&'a str, &'a RawObject)>) {
    for layer in layers {
        match layer.kind.as_str() {
            "objectgroup" => out.extend(layer.objects.iter().map(|o| (layer.name.as_str(), o))),
            "group" => collect_objects(&layer.layers, out),
            _ => {}
        }
    }
}

/// Registry key for a level file: its file stem, which must be UTF-8.
pub fn level_key(path: &Path) -> GolfResult<String> {
    path.file_stem()
        .and_then(|s| s.to_str())
        .filter(|s| !s.is_empty())
        .map(str::to_string)
        .ok_or_else(|| {
            level_data(
                &path.display().to_string(),
                "file name is not a valid UTF-8 level key",
            )
        })
}

// ── Parsing ───────────────────────────────────────────────────────────────────

impl LevelDescriptor {
    /// Parse and validate one Tiled JSON export.
    ///
    /// `key` identifies the level in error messages and in the registry.
    pub fn from_json_str(key: &str, json: &str) -> GolfResult<Self> {
        let raw: RawMap = serde_json::from_str(json)
            .map_err(|e| level_data(key, format!("invalid tile-map JSON: {e}")))?;
        Self::from_raw(key, raw)
    }

    /// Read and parse a level file; the key is the file stem.
    pub fn from_file(path: &Path) -> GolfResult<Self> {
        let key = level_key(path)?;
        let contents = std::fs::read_to_string(path).map_err(|source| GolfError::Io {
            path: path.to_path_buf(),
            source,
        })?;
        let raw: RawMap = serde_json::from_str(&contents).map_err(|source| GolfError::Json {
            path: path.to_path_buf(),
            source,
        })?;
        Self::from_raw(&key, raw)
    }

    fn from_raw(key: &str, raw: RawMap) -> GolfResult<Self> {
        let order = match property(&raw.properties, ORDER_PROPERTY) {
            Some(value) => value
                .as_f64()
                .ok_or_else(|| level_data(key, "`order` property is not a number"))?,
            None => return Err(level_data(key, "missing `order` property")),
        };
        let name = match property(&raw.properties, NAME_PROPERTY) {
            Some(value) => value
                .as_str()
                .ok_or_else(|| level_data(key, "`levelName` property is not a string"))?
                .to_string(),
            None => return Err(level_data(key, "missing `levelName` property")),
        };

        let mut raw_objects = Vec::new();
        collect_objects(&raw.layers, &mut raw_objects);
        if !raw.layers.iter().any(|l| l.kind == "objectgroup" || l.kind == "group") {
            return Err(level_data(key, "no object layer"));
        }

        let mut objects = Vec::with_capacity(raw_objects.len());
        for (layer, obj) in raw_objects {
            let tag = if obj.kind.is_empty() {
                obj.class.as_str()
            } else {
                obj.kind.as_str()
            };
            let kind = ObjectKind::parse(tag).ok_or_else(|| {
                level_data(
                    key,
                    format!("object {} in layer '{}' has unknown type '{}'", obj.id, layer, tag),
                )
            })?;
            if obj.width < 0.0 || obj.height < 0.0 {
                return Err(level_data(
                    key,
                    format!("object {} has a negative size", obj.id),
                ));
            }
            objects.push(TiledObject::new(kind, obj.x, obj.y, obj.width, obj.height));
        }

        Ok(Self {
            key: key.to_string(),
            order,
            name,
            objects,
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    const SAMPLE: &str = r#"{
        "width": 16, "height": 10, "tilewidth": 32, "tileheight": 32,
        "layers": [
            { "type": "tilelayer", "name": "ground", "data": [] },
            { "type": "objectgroup", "name": "objects", "objects": [
                { "id": 1, "type": "collider", "x": 0, "y": 0, "width": 512, "height": 16,
                  "properties": [] },
                { "id": 2, "type": "player", "x": 48, "y": 150, "width": 32, "height": 32 },
                { "id": 3, "class": "target", "x": 400, "y": 140, "width": 48, "height": 48 }
            ] }
        ],
        "properties": [
            { "name": "levelName", "type": "string", "value": "Warmup" },
            { "name": "order", "type": "int", "value": 2 }
        ]
    }"#;

    fn with_properties(props: &str) -> String {
        format!(
            r#"{{ "layers": [ {{ "type": "objectgroup", "name": "o", "objects": [] }} ],
                 "properties": [{props}] }}"#
        )
    }

    #[test]
    fn parses_metadata_and_objects() {
        let level = LevelDescriptor::from_json_str("warmup", SAMPLE).unwrap();
        assert_eq!(level.key, "warmup");
        assert_eq!(level.order, 2.0);
        assert_eq!(level.name, "Warmup");
        assert_eq!(
            level.objects,
            vec![
                TiledObject::new(ObjectKind::Collider, 0.0, 0.0, 512.0, 16.0),
                TiledObject::new(ObjectKind::Player, 48.0, 150.0, 32.0, 32.0),
                TiledObject::new(ObjectKind::Target, 400.0, 140.0, 48.0, 48.0),
            ]
        );
    }

    #[test]
    fn missing_order_is_level_data_error() {
        let json = with_properties(r#"{ "name": "levelName", "value": "A" }"#);
        let err = LevelDescriptor::from_json_str("a", &json).unwrap_err();
        assert!(matches!(err, GolfError::LevelData { ref reason, .. } if reason.contains("order")));
    }

    #[test]
    fn missing_level_name_is_level_data_error() {
        let json = with_properties(r#"{ "name": "order", "value": 1 }"#);
        let err = LevelDescriptor::from_json_str("a", &json).unwrap_err();
        assert!(
            matches!(err, GolfError::LevelData { ref reason, .. } if reason.contains("levelName"))
        );
    }

    #[test]
    fn non_numeric_order_is_rejected() {
        let json = with_properties(
            r#"{ "name": "order", "value": "first" }, { "name": "levelName", "value": "A" }"#,
        );
        assert!(LevelDescriptor::from_json_str("a", &json).is_err());
    }

    #[test]
    fn unknown_object_type_is_rejected() {
        let json = r#"{
            "layers": [ { "type": "objectgroup", "objects": [
                { "id": 7, "type": "windmill", "x": 0, "y": 0, "width": 4, "height": 4 } ] } ],
            "properties": [ { "name": "order", "value": 1 }, { "name": "levelName", "value": "A" } ]
        }"#;
        let err = LevelDescriptor::from_json_str("a", json).unwrap_err();
        assert!(err.to_string().contains("windmill"));
    }

    #[test]
    fn objects_inside_group_layers_are_found() {
        let json = r#"{
            "layers": [ { "type": "group", "layers": [
                { "type": "objectgroup", "objects": [
                    { "type": "target", "x": 10, "y": 20, "width": 30, "height": 30 } ] } ] } ],
            "properties": [ { "name": "order", "value": 1 }, { "name": "levelName", "value": "A" } ]
        }"#;
        let level = LevelDescriptor::from_json_str("a", json).unwrap();
        assert_eq!(level.objects.len(), 1);
        assert_eq!(level.objects[0].kind, ObjectKind::Target);
    }

    #[test]
    fn map_without_object_layer_is_rejected() {
        let json = r#"{ "layers": [ { "type": "tilelayer" } ],
            "properties": [ { "name": "order", "value": 1 }, { "name": "levelName", "value": "A" } ] }"#;
        assert!(LevelDescriptor::from_json_str("a", json).is_err());
    }

    #[test]
    fn level_key_is_the_file_stem() {
        assert_eq!(level_key(Path::new("assets/levels/dogleg.json")).unwrap(), "dogleg");
    }

    #[cfg(unix)]
    #[test]
    fn non_utf8_file_name_is_level_data_error() {
        use std::ffi::OsStr;
        use std::os::unix::ffi::OsStrExt;

        let path = Path::new("assets/levels").join(OsStr::from_bytes(b"bad\xff.json"));
        let err = level_key(&path).unwrap_err();
        assert!(matches!(err, GolfError::LevelData { .. }), "got {err}");
    }
}
