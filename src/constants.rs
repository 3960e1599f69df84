/// -------- tiles & chunks --------
pub const CHUNK_SIZE: u32   = 32;   // tiles per chunk edge
pub const TILE_PIXELS: f32  = 32.0; // on‑screen size of one tile
pub const MINE_DENSITY: f32 = 0.25;
pub const MAX_CHUNK_SIZE: u32 = 1024;

/// -------- camera --------
pub const ZOOM_MIN: f32  = 0.5;
pub const ZOOM_MAX: f32  = 4.0;
pub const ZOOM_STEP: f32 = 0.1;
pub const DRAG_THRESHOLD: f32 = 3.0; // px of travel before a press becomes a drag

/// -------- window --------
pub const WINDOW_WIDTH: f32  = 800.0;
pub const WINDOW_HEIGHT: f32 = 800.0;
pub const WINDOW_TITLE: &str = "∞-Sweeper";

/// -------- assets --------
pub const TILE_SHEET: &str     = "tiles.png";
pub const TILE_SHEET_COLS: u32 = 12;
pub const TILE_SHEET_CELL: u32 = 32;
pub const CONFIG_PATH: &str    = "assets/config/sweeper.toml";

/// -------- hud --------
pub const HUD_MARGIN: f32    = 5.0;
pub const HUD_FONT_SIZE: f32 = 16.0;
