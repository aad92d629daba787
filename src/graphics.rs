use bevy::input::mouse::MouseWheel;
use bevy::prelude::*;

use crate::config::GolfConfig;

/// Setup camera for 2D rendering, centred on the canvas.
pub fn setup_camera(mut commands: Commands) {
    commands.spawn(Camera2d);
    info!("[SETUP] Camera spawned");
}

/// Next orthographic scale after `steps` zoom notches (positive = zoom in).
pub fn zoomed_scale(current: f32, steps: f32, config: &GolfConfig) -> f32 {
    (current - steps * config.zoom_speed).clamp(config.min_zoom, config.max_zoom)
}

/// Zoom with `+` / `-` (or `=`) and the mouse wheel; `0` resets.
pub fn camera_zoom_system(
    keys: Res<ButtonInput<KeyCode>>,
    mut wheel: MessageReader<MouseWheel>,
    mut q_projection: Query<&mut Projection, With<Camera2d>>,
    config: Res<GolfConfig>,
) {
    let mut steps: f32 = wheel.read().map(|e| e.y.signum()).sum();
    if keys.just_pressed(KeyCode::Equal) || keys.just_pressed(KeyCode::NumpadAdd) {
        steps += 1.0;
    }
    if keys.just_pressed(KeyCode::Minus) || keys.just_pressed(KeyCode::NumpadSubtract) {
        steps -= 1.0;
    }
    let reset = keys.just_pressed(KeyCode::Digit0);
    if steps == 0.0 && !reset {
        return;
    }

    let Ok(mut projection) = q_projection.single_mut() else {
        return;
    };
    if let Projection::Orthographic(ortho) = projection.as_mut() {
        ortho.scale = if reset {
            1.0
        } else {
            zoomed_scale(ortho.scale, steps, &config)
        };
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn zoom_is_clamped() {
        let cfg = GolfConfig::default();
        assert_eq!(zoomed_scale(1.0, 100.0, &cfg), cfg.min_zoom);
        assert_eq!(zoomed_scale(1.0, -100.0, &cfg), cfg.max_zoom);
        assert!((zoomed_scale(1.0, 1.0, &cfg) - 0.9).abs() < 1e-6);
    }
}
