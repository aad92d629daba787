//! Top-level plugin wiring every golf system into the Bevy schedules.
//!
//! ## Frame order
//!
//! | Schedule    | Systems (in order)                                              |
//! |-------------|-----------------------------------------------------------------|
//! | Startup     | gravity off, camera, first level, HUD, victory overlay          |
//! | Update      | pointer → shot input; keys / buttons / continue → level command |
//! |             | → HUD text; camera zoom                                         |
//! | PostUpdate  | *Rapier writeback* → settle monitor → win → pulse / tint        |
//! |             | → visual attachment, hole, aim line, walls, cursor              |
//!
//! The settle monitor must see the velocities Rapier just wrote back, so it is
//! ordered after [`PhysicsSet::Writeback`].

use bevy::prelude::*;
use bevy_rapier2d::prelude::*;

use crate::effects::{ball_tint_system, pulse_system};
use crate::graphics::{camera_zoom_system, setup_camera};
use crate::hud::{
    hide_victory_overlay, hud_button_system, hud_text_system, keyboard_command_system,
    setup_hud, setup_victory_overlay, show_victory_overlay, victory_continue_system,
};
use crate::input::{pointer_position_system, shot_input_system, PointerState};
use crate::render::{
    aim_line_system, attach_ball_visual_system, attach_target_visual_system,
    cursor_affordance_system, target_render_system, wall_silhouette_system,
};
use crate::session::{
    level_command_system, level_won_system, start_first_level_system, GamePhase, LevelCommand,
    LevelWon,
};
use crate::settle::settle_monitor_system;

pub struct GolfPlugin;

/// Top-down course: no gravity.
pub fn disable_gravity_system(mut config: Query<&mut RapierConfiguration>) {
    for mut cfg in config.iter_mut() {
        cfg.gravity = Vec2::ZERO;
    }
}

impl Plugin for GolfPlugin {
    fn build(&self, app: &mut App) {
        let has_session = resource_exists::<crate::session::GameSession>;

        app.init_state::<GamePhase>()
            .add_message::<LevelCommand>()
            .add_message::<LevelWon>()
            .init_resource::<PointerState>()
            .add_systems(
                Startup,
                (
                    disable_gravity_system,
                    setup_camera,
                    start_first_level_system,
                    setup_hud,
                    setup_victory_overlay,
                ),
            )
            .add_systems(
                Update,
                (
                    pointer_position_system,
                    shot_input_system
                        .run_if(in_state(GamePhase::Playing))
                        .run_if(has_session),
                )
                    .chain(),
            )
            .add_systems(
                Update,
                (
                    (
                        keyboard_command_system,
                        hud_button_system,
                        victory_continue_system.run_if(in_state(GamePhase::Won)),
                    ),
                    level_command_system,
                    hud_text_system.run_if(has_session),
                )
                    .chain()
                    .after(shot_input_system),
            )
            .add_systems(Update, camera_zoom_system)
            .add_systems(OnEnter(GamePhase::Won), show_victory_overlay.run_if(has_session))
            .add_systems(OnExit(GamePhase::Won), hide_victory_overlay)
            .add_systems(
                PostUpdate,
                (
                    settle_monitor_system.run_if(in_state(GamePhase::Playing)),
                    level_won_system,
                    (pulse_system, ball_tint_system),
                    (
                        attach_ball_visual_system,
                        attach_target_visual_system,
                        target_render_system,
                        aim_line_system,
                        wall_silhouette_system,
                        cursor_affordance_system,
                    ),
                )
                    .chain()
                    .run_if(has_session)
                    .after(PhysicsSet::Writeback),
            );
    }
}
