//! camera pan / zoom and the per‑frame viewport feed into the board

use bevy::input::mouse::{MouseMotion, MouseScrollUnit, MouseWheel};
use bevy::input::ButtonInput;
use bevy::prelude::*;
use bevy::window::PrimaryWindow;

use crate::board::Board;
use crate::components::MainCamera;
use crate::config::ViewConfig;
use crate::constants::DRAG_THRESHOLD;
use crate::viewport::WorldRect;

/// zoom > 1 magnifies; projection scale is its inverse
#[derive(Resource, Clone, Copy, Debug)]
pub struct CameraZoom {
    pub zoom: f32,
    pub min: f32,
    pub max: f32,
    pub step: f32,
}

impl From<&ViewConfig> for CameraZoom {
    fn from(view: &ViewConfig) -> Self {
        Self {
            zoom: 1.0_f32.clamp(view.zoom_min, view.zoom_max),
            min: view.zoom_min,
            max: view.zoom_max,
            step: view.zoom_step,
        }
    }
}

impl CameraZoom {
    /// scrolling up zooms out
    pub fn scrolled(self, lines: f32) -> f32 {
        (self.zoom - lines * self.step).clamp(self.min, self.max)
    }
}

/// set while the left button has moved far enough to count as a drag
#[derive(Resource, Default, Debug)]
pub struct DragState {
    pub travelled: f32,
    pub dragged: bool,
}

/* ===========================================================
   startup
   =========================================================== */
pub fn setup_camera(mut commands: Commands, zoom: Res<CameraZoom>) {
    commands.spawn((
        Camera2d,
        MainCamera,
        OrthographicProjection {
            scale: 1.0 / zoom.zoom,
            ..OrthographicProjection::default_2d()
        },
    ));
}

/* ===========================================================
   drag to pan, wheel to zoom
   =========================================================== */
pub fn pan_zoom_system(
    mouse: Res<ButtonInput<MouseButton>>,
    mut motion: EventReader<MouseMotion>,
    mut wheel: EventReader<MouseWheel>,
    mut zoom: ResMut<CameraZoom>,
    mut drag: ResMut<DragState>,
    mut cam_q: Query<(&mut Transform, &mut OrthographicProjection), With<MainCamera>>,
) {
    let Ok((mut cam_tf, mut projection)) = cam_q.get_single_mut() else { return };

    let delta: Vec2 = motion.read().map(|m| m.delta).sum();
    if mouse.pressed(MouseButton::Left) && delta != Vec2::ZERO {
        drag.travelled += delta.length();
        if drag.travelled >= DRAG_THRESHOLD {
            drag.dragged = true;
        }
        // screen y grows downward, world y upward
        cam_tf.translation.x -= delta.x * projection.scale;
        cam_tf.translation.y += delta.y * projection.scale;
    }

    let lines: f32 = wheel
        .read()
        .map(|w| match w.unit {
            MouseScrollUnit::Line => w.y,
            MouseScrollUnit::Pixel => w.y / 16.0,
        })
        .sum();
    if lines != 0.0 {
        zoom.zoom = zoom.scrolled(lines);
        projection.scale = 1.0 / zoom.zoom;
    }
}

/* ===========================================================
   viewport → board (chunk diff + handle reconciliation)
   =========================================================== */
pub fn update_viewport_system(
    mut board: ResMut<Board>,
    cam_q: Query<(&Transform, &OrthographicProjection), With<MainCamera>>,
    window_q: Query<&Window, With<PrimaryWindow>>,
) {
    let Ok((cam_tf, projection)) = cam_q.get_single() else { return };
    let Ok(window) = window_q.get_single() else { return };

    let size = Vec2::new(window.width(), window.height()) * projection.scale;
    let rect = WorldRect::from_center_size(cam_tf.translation.truncate(), size);

    if let Err(err) = board.on_viewport_changed(rect) {
        error!("viewport update failed: {err}");
        debug_assert!(false, "viewport update failed: {err}");
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn zoom_is_clamped_to_range() {
        let zoom = CameraZoom::from(&ViewConfig::default());
        assert_eq!(zoom.zoom, 1.0);
        assert_eq!(zoom.scrolled(100.0), zoom.min);
        assert_eq!(zoom.scrolled(-100.0), zoom.max);
        assert!((zoom.scrolled(1.0) - 0.9).abs() < 1e-6);
    }
}
