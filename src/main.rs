//! Tank Arena entry point
//!
//! Headless demo: builds the arena, scripts a few seconds of input, and logs
//! the outcome. A real deployment drives `Registry::frame_tick` from a
//! display-refresh callback and feeds `InputMap` from window events; the sim
//! itself is identical either way.

use tank_arena::assets::Assets;
use tank_arena::input::{InputMap, Key, Trigger};
use tank_arena::settings::Settings;
use tank_arena::sim::{Registry, build_arena};

const FRAME_DT: f32 = 1.0 / 60.0;

fn main() {
    env_logger::init();
    log::info!("Tank Arena (headless) starting...");

    let settings = Settings::default();
    let mut assets = Assets::new();
    if let Err(err) = assets.load_all() {
        log::error!("asset load failed: {err}");
        std::process::exit(1);
    }

    let input = InputMap::new();
    let mut registry = Registry::new(settings.seed);
    let player = match build_arena(&mut registry, &assets, input.flags(), settings.map_size) {
        Ok(id) => id,
        Err(err) => {
            log::error!("arena build failed: {err}");
            std::process::exit(1);
        }
    };

    // Drive forward for a second, turn for half a second, fire, then let
    // the effects play out.
    input.key_down(Key::Up);
    run_frames(&mut registry, &assets, 60);
    let _ = input.key_up(Key::Up);

    input.key_down(Key::Left);
    run_frames(&mut registry, &assets, 30);
    let _ = input.key_up(Key::Left);

    if let Some(Trigger::Fire) = input.key_up(Key::Fire) {
        if let Err(err) = registry.fire(&assets) {
            log::error!("fire failed: {err}");
        }
    }
    run_frames(&mut registry, &assets, 180);

    let position = registry.get(player).map(|e| e.position());
    log::info!(
        "demo done: {} live entities, {} disposed, player at {:?}, camera at {:?}",
        registry.len(),
        registry.disposed_total(),
        position,
        registry.camera().position,
    );
}

fn run_frames(registry: &mut Registry, assets: &Assets, frames: u32) {
    for _ in 0..frames {
        registry.frame_tick(FRAME_DT, assets);
    }
}
