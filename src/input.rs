//! mouse buttons → reveal / flag

use bevy::input::ButtonInput;
use bevy::prelude::*;
use bevy::window::PrimaryWindow;

use crate::board::{Board, FlagOutcome, RevealOutcome};
use crate::camera::DragState;
use crate::components::{BombRevealed, MainCamera};
use crate::coords::TilePos;

/// tile under the cursor, if the cursor is over the window
fn cursor_tile(
    board: &Board,
    window_q: &Query<&Window, With<PrimaryWindow>>,
    cam_q: &Query<(&Camera, &GlobalTransform), With<MainCamera>>,
) -> Option<TilePos> {
    let window = window_q.get_single().ok()?;
    let cursor = window.cursor_position()?;
    let (cam, cam_tf) = cam_q.get_single().ok()?;
    let world = cam.viewport_to_world_2d(cam_tf, cursor).ok()?;
    Some(board.tile_at(world))
}

/* ===========================================================
   left release (not a drag) – reveal
   =========================================================== */
pub fn reveal_click_system(
    mouse: Res<ButtonInput<MouseButton>>,
    mut drag: ResMut<DragState>,
    mut board: ResMut<Board>,
    mut bombs: EventWriter<BombRevealed>,
    window_q: Query<&Window, With<PrimaryWindow>>,
    cam_q: Query<(&Camera, &GlobalTransform), With<MainCamera>>,
) {
    if !mouse.just_released(MouseButton::Left) {
        return;
    }
    let was_drag = drag.dragged;
    *drag = DragState::default();
    if was_drag {
        return;
    }
    let Some(pos) = cursor_tile(&board, &window_q, &cam_q) else { return };

    match board.reveal(pos) {
        Ok(RevealOutcome::Detonated(at)) => {
            info!("game lost at ({}, {})", at.x, at.y);
            bombs.send(BombRevealed { at });
        }
        Ok(RevealOutcome::Revealed { changed, truncated }) => {
            debug!("revealed {} tiles (truncated: {truncated})", changed.len());
        }
        Ok(RevealOutcome::Ignored | RevealOutcome::Finished) => {}
        Err(err) => {
            error!("reveal at ({}, {}) failed: {err}", pos.x, pos.y);
            debug_assert!(false, "reveal failed: {err}");
        }
    }
}

/* ===========================================================
   right release – toggle flag
   =========================================================== */
pub fn flag_click_system(
    mouse: Res<ButtonInput<MouseButton>>,
    mut board: ResMut<Board>,
    window_q: Query<&Window, With<PrimaryWindow>>,
    cam_q: Query<(&Camera, &GlobalTransform), With<MainCamera>>,
) {
    if !mouse.just_released(MouseButton::Right) {
        return;
    }
    let Some(pos) = cursor_tile(&board, &window_q, &cam_q) else { return };

    match board.toggle_flag(pos) {
        Ok(outcome @ (FlagOutcome::Flagged | FlagOutcome::Unflagged)) => {
            debug!("{outcome:?} ({}, {})", pos.x, pos.y);
        }
        Ok(FlagOutcome::Ignored | FlagOutcome::Finished) => {}
        Err(err) => {
            error!("flag at ({}, {}) failed: {err}", pos.x, pos.y);
            debug_assert!(false, "flag failed: {err}");
        }
    }
}
