//! `sweeper.toml` – board, camera and window tunables
//!
//! Every field has a default so a partial (or missing) file still works.

use std::path::Path;

use serde::Deserialize;
use thiserror::Error;

use crate::board::{BoardSettings, FlagRule};
use crate::constants::*;
use crate::viewport::max_chunks_per_axis;

#[derive(Debug, Error)]
pub enum ConfigError {
    #[error("failed to read config: {0}")]
    Io(#[from] std::io::Error),
    #[error("failed to parse config: {0}")]
    Parse(#[from] toml::de::Error),
    #[error("invalid config: {0}")]
    Invalid(String),
}

#[derive(Deserialize, Debug, Clone, Default, PartialEq)]
#[serde(default)]
pub struct SweeperConfig {
    pub board: BoardConfig,
    pub view: ViewConfig,
    pub window: WindowConfig,
}

#[derive(Deserialize, Debug, Clone, PartialEq)]
#[serde(default)]
pub struct BoardConfig {
    pub chunk_size: u32,
    pub mine_density: f32,
    pub flag_rule: FlagRule,
    pub flood_limit: usize,
}

impl Default for BoardConfig {
    fn default() -> Self {
        Self {
            chunk_size: CHUNK_SIZE,
            mine_density: MINE_DENSITY,
            flag_rule: FlagRule::Protect,
            flood_limit: 250_000,
        }
    }
}

#[derive(Deserialize, Debug, Clone, PartialEq)]
#[serde(default)]
pub struct ViewConfig {
    pub tile_pixels: f32,
    pub zoom_min: f32,
    pub zoom_max: f32,
    pub zoom_step: f32,
}

impl Default for ViewConfig {
    fn default() -> Self {
        Self {
            tile_pixels: TILE_PIXELS,
            zoom_min: ZOOM_MIN,
            zoom_max: ZOOM_MAX,
            zoom_step: ZOOM_STEP,
        }
    }
}

#[derive(Deserialize, Debug, Clone, PartialEq)]
#[serde(default)]
pub struct WindowConfig {
    pub width: f32,
    pub height: f32,
    pub title: String,
}

impl Default for WindowConfig {
    fn default() -> Self {
        Self {
            width: WINDOW_WIDTH,
            height: WINDOW_HEIGHT,
            title: WINDOW_TITLE.to_string(),
        }
    }
}

impl SweeperConfig {
    pub fn from_toml(text: &str) -> Result<Self, ConfigError> {
        let config: Self = toml::from_str(text)?;
        config.validate()?;
        Ok(config)
    }

    pub fn load(path: &Path) -> Result<Self, ConfigError> {
        let text = std::fs::read_to_string(path)?;
        Self::from_toml(&text)
    }

    /// a missing file means defaults; a broken one is still an error
    pub fn load_or_default(path: &Path) -> Result<Self, ConfigError> {
        match Self::load(path) {
            Err(ConfigError::Io(err)) if err.kind() == std::io::ErrorKind::NotFound => {
                log::warn!("{} not found, using default config", path.display());
                Ok(Self::default())
            }
            other => other,
        }
    }

    pub fn validate(&self) -> Result<(), ConfigError> {
        if self.board.chunk_size == 0 {
            return Err(ConfigError::Invalid("board.chunk_size must be positive".into()));
        }
        if self.board.chunk_size > MAX_CHUNK_SIZE {
            return Err(ConfigError::Invalid(format!(
                "board.chunk_size {} exceeds {MAX_CHUNK_SIZE}",
                self.board.chunk_size
            )));
        }
        if !(self.view.tile_pixels > 0.0) {
            return Err(ConfigError::Invalid("view.tile_pixels must be positive".into()));
        }
        if !(self.view.zoom_min > 0.0) || self.view.zoom_min > self.view.zoom_max {
            return Err(ConfigError::Invalid(format!(
                "view zoom range [{}, {}] is empty",
                self.view.zoom_min, self.view.zoom_max
            )));
        }
        if !(self.window.width > 0.0 && self.window.height > 0.0) {
            return Err(ConfigError::Invalid("window size must be positive".into()));
        }
        Ok(())
    }

    /// widest world span the camera can show, in pixels
    pub fn max_view_extent(&self) -> (f32, f32) {
        (
            self.window.width / self.view.zoom_min,
            self.window.height / self.view.zoom_min,
        )
    }

    /// engine settings, with the pool sized for the most zoomed‑out view
    pub fn board_settings(&self) -> BoardSettings {
        let chunk_pixels = self.board.chunk_size as f32 * self.view.tile_pixels;
        let (w, h) = self.max_view_extent();
        BoardSettings {
            chunk_size: self.board.chunk_size,
            mine_density: self.board.mine_density,
            tile_pixels: self.view.tile_pixels,
            pool_chunks: max_chunks_per_axis(w, chunk_pixels) * max_chunks_per_axis(h, chunk_pixels),
            flag_rule: self.board.flag_rule,
            flood_limit: self.board.flood_limit,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::io::Write;

    use bevy::math::Vec2;

    use crate::board::Board;
    use crate::viewport::WorldRect;

    #[test]
    fn defaults_give_a_three_by_three_pool() {
        let settings = SweeperConfig::default().board_settings();
        assert_eq!(settings.chunk_size, 32);
        assert_eq!(settings.pool_chunks, 9);
        assert_eq!(settings.flag_rule, FlagRule::Protect);
    }

    #[test]
    fn partial_file_keeps_other_defaults() {
        let config = SweeperConfig::from_toml(
            r#"
            [board]
            chunk_size = 8
            flag_rule = "reveal_clears"

            [view]
            zoom_max = 2.0
            "#,
        )
        .unwrap();
        assert_eq!(config.board.chunk_size, 8);
        assert_eq!(config.board.flag_rule, FlagRule::RevealClears);
        assert_eq!(config.board.mine_density, MINE_DENSITY);
        assert_eq!(config.view.zoom_max, 2.0);
        assert_eq!(config.window, WindowConfig::default());
    }

    #[test]
    fn semantic_errors_are_reported() {
        let err = SweeperConfig::from_toml("[board]\nchunk_size = 0").unwrap_err();
        assert!(matches!(err, ConfigError::Invalid(_)));

        let err = SweeperConfig::from_toml("[board]\nchunk_size = 70000").unwrap_err();
        assert!(matches!(err, ConfigError::Invalid(_)));
        assert!(SweeperConfig::from_toml("[board]\nchunk_size = 1024").is_ok());

        let err = SweeperConfig::from_toml("[view]\nzoom_min = 3.0\nzoom_max = 1.0").unwrap_err();
        assert!(matches!(err, ConfigError::Invalid(_)));

        let err = SweeperConfig::from_toml("[board\n").unwrap_err();
        assert!(matches!(err, ConfigError::Parse(_)));
    }

    #[test]
    fn widest_window_view_fits_the_pool() {
        let config = SweeperConfig::default();
        let mut board = Board::new("fit", config.board_settings());
        let (w, h) = config.max_view_extent();
        // off-grid centres so the rectangle straddles as many chunks as it can
        for (i, cx) in [0.0, 13.0, 511.0, 1023.5, -700.25].into_iter().enumerate() {
            let centre = Vec2::new(cx, -cx * 0.5 + i as f32);
            let rect = WorldRect::from_center_size(centre, Vec2::new(w, h));
            board.on_viewport_changed(rect).unwrap();
        }
    }

    #[test]
    fn missing_file_falls_back_to_defaults() {
        let dir = tempfile::tempdir().unwrap();
        let config = SweeperConfig::load_or_default(&dir.path().join("nope.toml")).unwrap();
        assert_eq!(config, SweeperConfig::default());
    }

    #[test]
    fn loads_from_disk() {
        let mut file = tempfile::NamedTempFile::new().unwrap();
        writeln!(file, "[window]\ntitle = \"test\"\nwidth = 400.0").unwrap();
        let config = SweeperConfig::load_or_default(file.path()).unwrap();
        assert_eq!(config.window.title, "test");
        assert_eq!(config.window.width, 400.0);
        assert_eq!(config.window.height, WINDOW_HEIGHT);
    }
}
