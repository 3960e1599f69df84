use bevy::prelude::*;

use crate::coords::TilePos;

/* ===========================================================
   camera
   =========================================================== */
#[derive(Component)]
pub struct MainCamera;

/* ===========================================================
   board sprites – one entity per pool slot
   =========================================================== */
#[derive(Component)]
pub struct SlotSprite(pub usize);

/* ===========================================================
   hud
   =========================================================== */
#[derive(Component, Clone, Copy, PartialEq, Eq)]
pub enum HudField {
    Chunks,
    Fps,
    Seed,
    Status,
}

/* ===========================================================
   events
   =========================================================== */
/// a reveal uncovered a bomb; the board is finished
#[derive(Event, Clone, Copy, Debug)]
pub struct BombRevealed {
    pub at: TilePos,
}
