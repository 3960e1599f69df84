//! endless, seeded minesweeper
//!
//! The engine (`coords` … `board`) knows nothing about windows; the Bevy
//! side (`camera`, `input`, `render`, `hud`) feeds it a viewport rectangle
//! and mouse clicks once per frame and mirrors the handle pool onto sprites.

pub mod board;
pub mod chunk;
pub mod cli;
pub mod config;
pub mod constants;
pub mod coords;
pub mod generator;
pub mod pool;
pub mod store;
pub mod texture;
pub mod tile;
pub mod viewport;

pub mod camera;
pub mod components;
pub mod hud;
pub mod input;
pub mod render;

pub use board::{Board, BoardSettings, FlagOutcome, FlagRule, RevealOutcome};
pub use coords::{ChunkPos, LocalPos, TilePos};
pub use pool::{Handle, HandlePool, PoolError};
pub use tile::Tile;
pub use viewport::WorldRect;
