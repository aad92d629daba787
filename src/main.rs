use std::env;
use std::path::Path;
use std::process;

use bevy::prelude::*;
use bevy::window::WindowResolution;
use bevy_rapier2d::prelude::*;

use putt::config::load_golf_config;
use putt::constants::{CONFIG_PATH, LEVELS_DIR, SHAPES_PATH};
use putt::game::GolfPlugin;
use putt::session::CourseAssets;

fn main() {
    // Load config first: level translation and the ball body both depend on it.
    let config = load_golf_config(Path::new(CONFIG_PATH));

    let mut assets = match CourseAssets::load(&config, Path::new(LEVELS_DIR), Path::new(SHAPES_PATH))
    {
        Ok(assets) => assets,
        Err(e) => {
            eprintln!("[SETUP] {e}");
            process::exit(1);
        }
    };
    eprintln!("[SETUP] {} levels loaded", assets.registry.len());

    // Optional first argument: key of the level to start on.
    if let Some(key) = env::args().nth(1) {
        if !assets.registry.select(&key) {
            eprintln!("[SETUP] Unknown level '{key}'; starting at the first level");
        }
    }

    let (width, height) = (config.canvas_width as u32, config.canvas_height as u32);

    App::new()
        .add_plugins(DefaultPlugins.set(WindowPlugin {
            primary_window: Some(Window {
                title: "Putt".into(),
                resolution: WindowResolution::new(width, height),
                ..Default::default()
            }),
            ..Default::default()
        }))
        .insert_resource(ClearColor(Color::srgb(0.12, 0.36, 0.18)))
        // One world unit per pixel; launch impulses are tuned for this scale.
        .add_plugins(RapierPhysicsPlugin::<NoUserData>::pixels_per_meter(1.0))
        .insert_resource(config)
        .insert_resource(assets.registry)
        .insert_resource(assets.catalog)
        .insert_resource(assets.ball)
        .add_plugins(GolfPlugin)
        .run();
}
