use anyhow::{Context, Result};
use log::{error, info, warn};
use std::time::{SystemTime, UNIX_EPOCH};
use winit::{
    event::{Event, WindowEvent},
    event_loop::{ControlFlow, EventLoop},
    window::{Fullscreen, WindowBuilder},
};

mod core;
mod engine;
mod game;

use engine::assets::{AssetLoader, AssetType};
use engine::audio::HeadlessAudio;
use engine::game_loop::{GameLoop, FIXED_TIMESTEP};
use engine::input::{Action, InputManager};
use game::config::GameConfig;
use game::map::{walled_arena, TileMap, TiledMap};
use game::stage::StageDirector;

const ASSET_ROOT: &str = "assets";
const CONFIG_FILE: &str = "config.json";
const MAP_FILE: &str = "map.json";

/// Size of the stand-in keep used when no map file ships
const FALLBACK_COLUMNS: usize = 32;
const FALLBACK_ROWS: usize = 24;

fn load_config(loader: &AssetLoader) -> Result<GameConfig> {
    if !loader.exists(AssetType::Config, CONFIG_FILE) {
        let path = loader.resolve_path(AssetType::Config, CONFIG_FILE);
        warn!("{} not found, using default tuning", path.display());
        return Ok(GameConfig::default());
    }

    let bytes = loader.load_bytes(AssetType::Config, CONFIG_FILE)?;
    let text = String::from_utf8(bytes).context("config.json is not valid UTF-8")?;
    GameConfig::from_json(&text).context("Invalid config.json")
}

fn load_map(loader: &AssetLoader) -> Result<TiledMap> {
    if !loader.exists(AssetType::Map, MAP_FILE) {
        warn!(
            "{} not found, using a {}x{} walled arena",
            loader.resolve_path(AssetType::Map, MAP_FILE).display(),
            FALLBACK_COLUMNS,
            FALLBACK_ROWS
        );
        return Ok(walled_arena(FALLBACK_COLUMNS, FALLBACK_ROWS));
    }

    let document: TiledMap = loader
        .load_json(AssetType::Map, MAP_FILE)
        .context("Failed to read the map")?;
    // Fail at startup rather than when the first fight begins
    TileMap::build(&document).context("Invalid map")?;
    Ok(document)
}

fn main() -> Result<()> {
    // Initialize logger
    env_logger::Builder::from_default_env()
        .filter_level(log::LevelFilter::Info)
        .parse_default_env()
        .init();

    info!("Starting Orc Keep...");

    let loader = AssetLoader::new(ASSET_ROOT);
    info!("Loading assets from {}", loader.base_path().display());
    let config = load_config(&loader)?;
    let map = load_map(&loader)?;

    let window_width = (map.width * map.tilewidth as usize) as f64 * config.global_scale as f64;
    let window_height = (map.height * map.tileheight as usize) as f64 * config.global_scale as f64;

    let seed = SystemTime::now()
        .duration_since(UNIX_EPOCH)
        .map(|elapsed| elapsed.as_nanos() as u64)
        .unwrap_or_default();
    info!("Random seed {}", seed);

    let mut audio = HeadlessAudio::new();
    let mut director = StageDirector::new(config, map, seed, &mut audio);
    let mut input = InputManager::new();
    let mut game_loop = GameLoop::new();

    // Create event loop and window
    let event_loop = EventLoop::new()?;
    event_loop.set_control_flow(ControlFlow::Poll);
    let window = WindowBuilder::new()
        .with_title("Orc Keep")
        .with_inner_size(winit::dpi::LogicalSize::new(window_width, window_height))
        .with_resizable(true)
        .build(&event_loop)?;

    info!("Window created successfully");

    // Main event loop
    event_loop
        .run(move |event, elwt| match event {
            Event::WindowEvent {
                event: WindowEvent::CloseRequested,
                ..
            } => {
                info!("Close requested, shutting down...");
                director.shutdown(&mut audio);
                elwt.exit();
            }
            Event::WindowEvent {
                event: WindowEvent::KeyboardInput { event, .. },
                ..
            } => {
                input.process_keyboard_event(&event);
            }
            Event::WindowEvent {
                event: WindowEvent::Focused(false),
                ..
            } => {
                input.reset();
            }
            Event::AboutToWait => {
                let ticks = game_loop.begin_frame();
                if ticks > 0 {
                    let keyboard = input.keyboard();
                    if keyboard.just_pressed(Action::ToggleFps) {
                        game_loop.toggle_fps_overlay();
                    }
                    if keyboard.just_pressed(Action::Fullscreen) {
                        let fullscreen = match window.fullscreen() {
                            Some(_) => None,
                            None => Some(Fullscreen::Borderless(None)),
                        };
                        window.set_fullscreen(fullscreen);
                    }

                    // Only the first tick of a frame sees fresh presses
                    for _ in 0..ticks {
                        let result = director.tick(FIXED_TIMESTEP, input.keyboard(), &mut audio);
                        if let Err(err) = result {
                            error!("Failed to start the fight: {}", err);
                        }
                        input.end_frame();
                    }
                }

                if let Some(fps) = game_loop.fps_report() {
                    info!("FPS: {:.1}", fps);
                }
                window.request_redraw();
            }
            _ => {}
        })
        .map_err(|e| anyhow::anyhow!("Event loop error: {}", e))?;

    Ok(())
}
