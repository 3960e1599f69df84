//! render context: tile sheet + one sprite per pool slot
//!
//! The board's handle pool is the source of truth; this module only mirrors
//! dirty slots onto sprite entities each frame.

use bevy::prelude::*;

use crate::board::Board;
use crate::components::SlotSprite;
use crate::constants::{TILE_SHEET, TILE_SHEET_CELL, TILE_SHEET_COLS};

/// Explicit render context, created at startup and torn down on exit.
#[derive(Resource)]
pub struct TileAtlas {
    pub image: Handle<Image>,
    pub layout: Handle<TextureAtlasLayout>,
    /// slot index → sprite entity
    pub sprites: Vec<Entity>,
}

/* ===========================================================
   init – load the sheet, spawn the (hidden) sprite pool
   =========================================================== */
pub fn init_render_context(
    mut commands: Commands,
    asset_server: Res<AssetServer>,
    mut layouts: ResMut<Assets<TextureAtlasLayout>>,
    board: Res<Board>,
) {
    let image = asset_server.load(TILE_SHEET);
    let layout = layouts.add(TextureAtlasLayout::from_grid(
        UVec2::splat(TILE_SHEET_CELL),
        TILE_SHEET_COLS,
        1,
        None,
        None,
    ));

    let size = Vec2::splat(board.settings().tile_pixels);
    let capacity = board.pool().capacity();
    let sprites = (0..capacity)
        .map(|slot| {
            let mut sprite = Sprite::from_atlas_image(
                image.clone(),
                TextureAtlas { layout: layout.clone(), index: 0 },
            );
            sprite.custom_size = Some(size);
            commands
                .spawn((sprite, Transform::default(), Visibility::Hidden, SlotSprite(slot)))
                .id()
        })
        .collect();

    info!("render context ready: {capacity} pooled sprites");
    commands.insert_resource(TileAtlas { image, layout, sprites });
}

/* ===========================================================
   sync – copy dirty pool slots onto their sprites
   =========================================================== */
pub fn sync_sprites_system(
    mut board: ResMut<Board>,
    atlas: Option<Res<TileAtlas>>,
    mut sprite_q: Query<(&mut Sprite, &mut Transform, &mut Visibility), With<SlotSprite>>,
) {
    let Some(atlas) = atlas else { return };

    for (slot, state) in board.drain_dirty() {
        let Some(&entity) = atlas.sprites.get(slot) else { continue };
        let Ok((mut sprite, mut tf, mut vis)) = sprite_q.get_mut(entity) else { continue };

        if let Some(tex) = sprite.texture_atlas.as_mut() {
            tex.index = state.texture.atlas_index();
        }
        tf.translation = state.position.extend(0.0);
        *vis = if state.visible { Visibility::Visible } else { Visibility::Hidden };
    }
}

/* ===========================================================
   teardown – hand every handle back and drop the context
   =========================================================== */
pub fn teardown_render_context(
    mut exit: EventReader<AppExit>,
    mut commands: Commands,
    mut board: ResMut<Board>,
    atlas: Option<Res<TileAtlas>>,
) {
    if exit.read().next().is_none() {
        return;
    }
    let Some(atlas) = atlas else { return };

    if let Err(err) = board.clear_view() {
        error!("releasing handles on exit failed: {err}");
    }
    for &entity in &atlas.sprites {
        commands.entity(entity).despawn();
    }
    commands.remove_resource::<TileAtlas>();
    info!("render context torn down");
}
