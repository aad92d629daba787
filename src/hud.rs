//! Heads-up display: stroke counter, level name, restart/skip buttons, and the
//! victory overlay.
//!
//! ## Systems
//!
//! | System                     | Schedule            | Purpose                          |
//! |----------------------------|---------------------|----------------------------------|
//! | `setup_hud`                | Startup             | Spawn HUD text and buttons       |
//! | `setup_victory_overlay`    | Startup             | Spawn hidden victory overlay     |
//! | `hud_text_system`          | Update              | Refresh strokes / level name     |
//! | `hud_button_system`        | Update              | Restart / Skip button clicks     |
//! | `keyboard_command_system`  | Update              | `R` restart, `N` skip            |
//! | `show_victory_overlay`     | `OnEnter(Won)`      | Show overlay with stroke count   |
//! | `hide_victory_overlay`     | `OnExit(Won)`       | Hide overlay                     |
//! | `victory_continue_system`  | Update / in `Won`   | Click anywhere → next level      |

use bevy::ecs::hierarchy::ChildSpawnerCommands;
use bevy::prelude::*;

use crate::config::GolfConfig;
use crate::session::{GameSession, LevelCommand};

// ── Colour helpers ────────────────────────────────────────────────────────────

fn hud_text() -> Color {
    Color::srgb(0.95, 0.88, 0.45)
}
fn button_bg() -> Color {
    Color::srgb(0.10, 0.22, 0.14)
}
fn button_border() -> Color {
    Color::srgb(0.25, 0.55, 0.32)
}
fn button_text() -> Color {
    Color::srgb(0.80, 0.95, 0.82)
}
fn overlay_bg() -> Color {
    Color::srgba(0.0, 0.0, 0.0, 0.65)
}

// ── Component markers ─────────────────────────────────────────────────────────

#[derive(Component)]
pub struct StrokeText;

#[derive(Component)]
pub struct LevelNameText;

#[derive(Component)]
pub struct RestartButton;

#[derive(Component)]
pub struct SkipButton;

/// Root node of the victory overlay.
#[derive(Component)]
pub struct VictoryOverlay;

#[derive(Component)]
pub struct VictoryText;

/// Text shown on the victory overlay.
pub fn victory_message(level_name: &str, strokes: u32) -> String {
    let noun = if strokes == 1 { "stroke" } else { "strokes" };
    format!("{level_name} complete in {strokes} {noun}!\nClick to continue")
}

// ── Startup ───────────────────────────────────────────────────────────────────

pub fn setup_hud(mut commands: Commands, config: Res<GolfConfig>) {
    let font = TextFont {
        font_size: config.hud_font_size,
        ..default()
    };

    commands
        .spawn(Node {
            position_type: PositionType::Absolute,
            left: Val::Px(10.0),
            top: Val::Px(10.0),
            flex_direction: FlexDirection::Column,
            row_gap: Val::Px(4.0),
            ..default()
        })
        .with_children(|parent| {
            parent.spawn((
                Text::new(""),
                font.clone(),
                TextColor(hud_text()),
                LevelNameText,
            ));
            parent.spawn((
                Text::new("Strokes: 0"),
                font.clone(),
                TextColor(hud_text()),
                StrokeText,
            ));
        });

    commands
        .spawn(Node {
            position_type: PositionType::Absolute,
            right: Val::Px(10.0),
            top: Val::Px(10.0),
            column_gap: Val::Px(8.0),
            ..default()
        })
        .with_children(|parent| {
            spawn_button(parent, "Restart (R)", RestartButton, &font);
            spawn_button(parent, "Skip (N)", SkipButton, &font);
        });
}

fn spawn_button(
    parent: &mut ChildSpawnerCommands<'_>,
    label: &str,
    marker: impl Component,
    font: &TextFont,
) {
    parent
        .spawn((
            Button,
            Node {
                padding: UiRect::axes(Val::Px(10.0), Val::Px(4.0)),
                border: UiRect::all(Val::Px(1.0)),
                ..default()
            },
            BackgroundColor(button_bg()),
            BorderColor::all(button_border()),
            marker,
        ))
        .with_children(|btn| {
            btn.spawn((Text::new(label), font.clone(), TextColor(button_text())));
        });
}

pub fn setup_victory_overlay(mut commands: Commands, config: Res<GolfConfig>) {
    commands
        .spawn((
            Node {
                position_type: PositionType::Absolute,
                width: Val::Percent(100.0),
                height: Val::Percent(100.0),
                justify_content: JustifyContent::Center,
                align_items: AlignItems::Center,
                ..default()
            },
            BackgroundColor(overlay_bg()),
            Visibility::Hidden,
            VictoryOverlay,
        ))
        .with_children(|parent| {
            parent.spawn((
                Text::new(""),
                TextFont {
                    font_size: config.hud_font_size * 2.0,
                    ..default()
                },
                TextColor(hud_text()),
                TextLayout::new_with_justify(Justify::Center),
                VictoryText,
            ));
        });
}

// ── Update ────────────────────────────────────────────────────────────────────

pub fn hud_text_system(
    session: Res<GameSession>,
    mut q_strokes: Query<&mut Text, (With<StrokeText>, Without<LevelNameText>)>,
    mut q_name: Query<&mut Text, (With<LevelNameText>, Without<StrokeText>)>,
) {
    if !session.is_changed() {
        return;
    }
    for mut text in q_strokes.iter_mut() {
        *text = Text::new(format!("Strokes: {}", session.strokes()));
    }
    for mut text in q_name.iter_mut() {
        *text = Text::new(session.level_name.clone());
    }
}

#[allow(clippy::type_complexity)]
pub fn hud_button_system(
    restart: Query<&Interaction, (Changed<Interaction>, With<RestartButton>)>,
    skip: Query<&Interaction, (Changed<Interaction>, With<SkipButton>)>,
    mut writer: MessageWriter<LevelCommand>,
) {
    if restart.iter().any(|i| *i == Interaction::Pressed) {
        writer.write(LevelCommand::Restart);
    }
    if skip.iter().any(|i| *i == Interaction::Pressed) {
        writer.write(LevelCommand::Skip);
    }
}

pub fn keyboard_command_system(
    keys: Res<ButtonInput<KeyCode>>,
    mut writer: MessageWriter<LevelCommand>,
) {
    if keys.just_pressed(KeyCode::KeyR) {
        writer.write(LevelCommand::Restart);
    }
    if keys.just_pressed(KeyCode::KeyN) {
        writer.write(LevelCommand::Skip);
    }
}

pub fn show_victory_overlay(
    session: Res<GameSession>,
    mut q_overlay: Query<&mut Visibility, With<VictoryOverlay>>,
    mut q_text: Query<&mut Text, With<VictoryText>>,
) {
    for mut text in q_text.iter_mut() {
        *text = Text::new(victory_message(&session.level_name, session.strokes()));
    }
    for mut visibility in q_overlay.iter_mut() {
        *visibility = Visibility::Visible;
    }
}

pub fn hide_victory_overlay(mut q_overlay: Query<&mut Visibility, With<VictoryOverlay>>) {
    for mut visibility in q_overlay.iter_mut() {
        *visibility = Visibility::Hidden;
    }
}

/// A left click anywhere but on a HUD button moves on to the next level.
pub fn victory_continue_system(
    buttons: Res<ButtonInput<MouseButton>>,
    q_buttons: Query<&Interaction, With<Button>>,
    mut writer: MessageWriter<LevelCommand>,
) {
    let over_button = q_buttons.iter().any(|i| *i != Interaction::None);
    if buttons.just_pressed(MouseButton::Left) && !over_button {
        writer.write(LevelCommand::Skip);
    }
}
