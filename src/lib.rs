//! Physics mini-golf
//!
//! Levels are Tiled JSON maps: wall rectangles, a ball spawn and a hole.
//! The ball is flicked by dragging away from it and releasing; when it comes
//! to rest inside the hole the level is won.

pub mod config;
pub mod constants;
pub mod course;
pub mod effects;
pub mod error;
pub mod game;
pub mod graphics;
pub mod hud;
pub mod input;
pub mod level;
pub mod probe;
pub mod render;
pub mod session;
pub mod settle;
pub mod shape;
pub mod shot;

#[cfg(test)]
pub(crate) mod testing;
