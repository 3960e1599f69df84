//! bottom‑of‑screen counters and the loss banner

use bevy::diagnostic::{DiagnosticsStore, FrameTimeDiagnosticsPlugin};
use bevy::prelude::*;

use crate::board::Board;
use crate::components::{BombRevealed, HudField};
use crate::constants::{HUD_FONT_SIZE, HUD_MARGIN};

fn hud_text(commands: &mut Commands, field: HudField, node: Node) {
    commands.spawn((
        Text::new(""),
        TextFont { font_size: HUD_FONT_SIZE, ..default() },
        TextColor(Color::WHITE),
        node,
        field,
    ));
}

pub fn setup_hud(mut commands: Commands) {
    let bottom = |node: Node| Node {
        position_type: PositionType::Absolute,
        bottom: Val::Px(HUD_MARGIN),
        ..node
    };

    hud_text(&mut commands, HudField::Chunks, bottom(Node { left: Val::Px(HUD_MARGIN), ..default() }));
    hud_text(&mut commands, HudField::Fps, bottom(Node { left: Val::Percent(45.0), ..default() }));
    hud_text(&mut commands, HudField::Seed, bottom(Node { right: Val::Px(HUD_MARGIN), ..default() }));
    hud_text(
        &mut commands,
        HudField::Status,
        Node {
            position_type: PositionType::Absolute,
            top: Val::Px(HUD_MARGIN),
            left: Val::Percent(45.0),
            ..default()
        },
    );
}

pub fn update_hud_system(
    board: Res<Board>,
    diagnostics: Res<DiagnosticsStore>,
    mut text_q: Query<(&mut Text, &HudField)>,
) {
    let fps = diagnostics
        .get(&FrameTimeDiagnosticsPlugin::FPS)
        .and_then(|d| d.smoothed())
        .unwrap_or(0.0);

    for (mut text, field) in &mut text_q {
        let next = match field {
            HudField::Chunks => format!("chunks created: {}", board.generated_chunks()),
            HudField::Fps => format!("fps: {fps:.3}"),
            HudField::Seed => format!("seed: {}", board.seed()),
            HudField::Status => continue,
        };
        if text.0 != next {
            text.0 = next;
        }
    }
}

pub fn loss_banner_system(
    mut bombs: EventReader<BombRevealed>,
    mut text_q: Query<(&mut Text, &HudField)>,
) {
    let Some(hit) = bombs.read().last() else { return };
    for (mut text, field) in &mut text_q {
        if *field == HudField::Status {
            text.0 = format!("game lost at ({}, {})", hit.at.x, hit.at.y);
        }
    }
}
