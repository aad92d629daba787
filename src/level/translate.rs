//! Tile-map objects → simulation descriptors.
//!
//! Tiled rectangles are corner-origin; Rapier bodies are centre-origin.  The
//! translator moves every object to its centre and shifts it by the playfield
//! margin.  The player object is authored at sprite size, so its centre is
//! `sprite_size / 2` in from the corner regardless of the rectangle it was
//! drawn with.
//!
//! Output positions stay in the y-down playfield frame.  [`playfield_to_world`]
//! converts them into Bevy's y-up, centre-origin world frame at spawn time.

use bevy::math::Vec2;

use super::tiled::{ObjectKind, TiledObject};

/// Static rectangle, centre origin, playfield frame.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct ColliderSpec {
    pub x: f32,
    pub y: f32,
    pub width: f32,
    pub height: f32,
}

/// Ball spawn centre, playfield frame.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct PlayerSpec {
    pub x: f32,
    pub y: f32,
}

/// Hole centre and radius, playfield frame.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct TargetSpec {
    pub x: f32,
    pub y: f32,
    pub radius: f32,
}

/// Everything the body factory needs, before presence is validated.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct TranslatedLevel {
    pub colliders: Vec<ColliderSpec>,
    pub player: Option<PlayerSpec>,
    pub target: Option<TargetSpec>,
}

/// Translate tile-map objects into simulation descriptors.
///
/// Duplicates are not reported: the last `player` and the last `target` in
/// iteration order win.
pub fn translate(objects: &[TiledObject], margin: Vec2, sprite_size: f32) -> TranslatedLevel {
    let half_sprite = sprite_size / 2.0;
    let mut out = TranslatedLevel::default();

    for obj in objects {
        let center_x = obj.x + obj.width / 2.0 + margin.x;
        let center_y = obj.y + obj.height / 2.0 + margin.y;
        match obj.kind {
            ObjectKind::Collider => out.colliders.push(ColliderSpec {
                x: center_x,
                y: center_y,
                width: obj.width,
                height: obj.height,
            }),
            ObjectKind::Player => {
                out.player = Some(PlayerSpec {
                    x: obj.x + half_sprite + margin.x,
                    y: obj.y + half_sprite + margin.y,
                })
            }
            ObjectKind::Target => {
                out.target = Some(TargetSpec {
                    x: center_x,
                    y: center_y,
                    radius: obj.width / 2.0,
                })
            }
        }
    }

    out
}

/// Map a y-down playfield point onto the y-up world frame centred on the canvas.
#[inline]
pub fn playfield_to_world(point: Vec2, canvas: Vec2) -> Vec2 {
    Vec2::new(point.x - canvas.x / 2.0, canvas.y / 2.0 - point.y)
}
