//! bootstrap for the endless minesweeper
//!
//! Seed from `--seed` or the terminal prompt, config from `sweeper.toml`,
//! then hand everything to Bevy. Works with **Bevy 0.15**.

use bevy::diagnostic::{FrameTimeDiagnosticsPlugin, LogDiagnosticsPlugin};
use bevy::prelude::*;
use bevy::window::PresentMode;
use clap::Parser;

use infinite_sweeper::board::Board;
use infinite_sweeper::camera::{pan_zoom_system, setup_camera, update_viewport_system, CameraZoom, DragState};
use infinite_sweeper::cli::{self, Cli};
use infinite_sweeper::components::BombRevealed;
use infinite_sweeper::config::SweeperConfig;
use infinite_sweeper::hud::{loss_banner_system, setup_hud, update_hud_system};
use infinite_sweeper::input::{flag_click_system, reveal_click_system};
use infinite_sweeper::render::{init_render_context, sync_sprites_system, teardown_render_context};

/* ------------------------------------------------------------------------ */
/* startup log                                                              */
/* ------------------------------------------------------------------------ */
/// stdin failure while prompting, reported once logging is up
#[derive(Resource)]
struct SeedFallback(Option<String>);

fn announce_board(board: Res<Board>, fallback: Res<SeedFallback>) {
    if let Some(err) = &fallback.0 {
        warn!("could not read seed from stdin ({err}), using a random one");
    }
    let s = board.settings();
    info!(
        "seed {:?}: {}×{} chunks, density {}, pool of {} handles",
        board.seed(),
        s.chunk_size,
        s.chunk_size,
        s.mine_density,
        board.pool().capacity()
    );
}

/* ------------------------------------------------------------------------ */
/* main                                                                     */
/* ------------------------------------------------------------------------ */
fn main() -> AppExit {
    let cli = Cli::parse();
    let config = match SweeperConfig::load_or_default(&cli.config) {
        Ok(config) => config,
        Err(err) => {
            eprintln!("{}: {err}", cli.config.display());
            return AppExit::error();
        }
    };
    let (seed, seed_error) = match cli.resolve_seed() {
        Ok(seed) => (seed, None),
        Err(err) => (cli::random_seed(), Some(err.to_string())),
    };

    App::new()
        /* diagnostics ----------------------------------------------------- */
        .add_plugins((
            LogDiagnosticsPlugin::default(),
            FrameTimeDiagnosticsPlugin::default(),
        ))

        /* bevy core ------------------------------------------------------- */
        .insert_resource(ClearColor(Color::srgb(0.1, 0.1, 0.12)))
        .add_plugins(
            DefaultPlugins
                .set(ImagePlugin::default_nearest())
                .set(WindowPlugin {
                    primary_window: Some(Window {
                        resolution: (config.window.width, config.window.height).into(),
                        title: config.window.title.clone(),
                        // the handle pool is sized for this window at zoom_min
                        resizable: false,
                        present_mode: PresentMode::AutoNoVsync,
                        ..default()
                    }),
                    ..default()
                }),
        )

        /* board & input state --------------------------------------------- */
        .insert_resource(Board::new(seed, config.board_settings()))
        .insert_resource(SeedFallback(seed_error))
        .insert_resource(CameraZoom::from(&config.view))
        .init_resource::<DragState>()
        .add_event::<BombRevealed>()

        /* startup systems ------------------------------------------------- */
        .add_systems(
            Startup,
            (announce_board, setup_camera, init_render_context, setup_hud),
        )

        /* frame‑update systems ------------------------------------------- */
        .add_systems(
            Update,
            (
                pan_zoom_system,        // drag / wheel
                update_viewport_system, // chunk diff + handle reuse
                reveal_click_system,    // LMB release
                flag_click_system,      // RMB release
                sync_sprites_system,    // dirty slots → sprites
            )
                .chain(),
        )
        .add_systems(Update, (update_hud_system, loss_banner_system))

        /* shutdown -------------------------------------------------------- */
        .add_systems(Last, teardown_render_context)
        .run()
}
