//! Hero's Mission headless driver
//!
//! Runs the fixed-tick loop with scripted input and reports how the run went.
//! Windowing, audio, and fonts belong to whatever front end consumes `Frame`s.

#[cfg(not(target_arch = "wasm32"))]
fn main() {
    use heros_mission::consts::TICK_RATE;
    use heros_mission::sim::{Autopilot, GamePhase, GameState, tick};
    use heros_mission::view::render_frame;
    use heros_mission::{CameraMode, Settings};

    env_logger::init();
    log::info!("Hero's Mission (headless) starting...");

    let mut settings = Settings::load();
    // Optional first argument overrides the camera model
    if let Some(arg) = std::env::args().nth(1) {
        match CameraMode::from_str(&arg) {
            Some(mode) => settings.camera = mode,
            None => log::warn!(
                "Unknown camera mode {arg:?}, keeping {}",
                settings.camera.as_str()
            ),
        }
    }
    log::info!(
        "Camera: {}, seed: {:#x}, {} ticks",
        settings.camera.as_str(),
        settings.seed,
        settings.demo_ticks
    );

    let mut state = GameState::new(settings.seed);
    let mut pilot = Autopilot::new();
    let mut deaths = 0u32;
    let mut completed_at = None;
    let mut last_phase = state.phase;

    for _ in 0..settings.demo_ticks {
        let input = pilot.next_input(&state);
        if input.quit {
            log::info!("Quit requested at tick {}", state.time_ticks);
            break;
        }
        tick(&mut state, &input);

        if state.phase != last_phase {
            match state.phase {
                GamePhase::Death => deaths += 1,
                GamePhase::Timeskip => completed_at = Some(state.time_ticks),
                GamePhase::Mission | GamePhase::Ending => {}
            }
            last_phase = state.phase;
        }
    }

    let frame = render_frame(&state, &settings);
    let mission = &state.mission;
    println!("\n=== Run summary ===");
    println!(
        "Ticks:     {} ({:.1}s)",
        state.time_ticks,
        state.time_ticks as f32 / TICK_RATE as f32
    );
    println!("Seed:      {:#x}", state.seed);
    println!("Phase:     {:?}", state.phase);
    println!("Deaths:    {deaths}");
    match completed_at {
        Some(t) => println!("Completed: tick {t}"),
        None => println!(
            "Progress:  {}/{} hostages, {} enemies left, {} HP",
            mission.hostages_saved,
            mission.total_hostages(),
            mission.enemies.len(),
            mission.player.health
        ),
    }
    println!("Drawables: {}, captions: {}", frame.drawables.len(), frame.captions.len());

    if log::log_enabled!(log::Level::Debug) {
        match serde_json::to_string_pretty(&frame) {
            Ok(json) => log::debug!("Final frame:\n{json}"),
            Err(e) => log::warn!("Cannot serialize final frame: {e}"),
        }
    }
}

#[cfg(target_arch = "wasm32")]
fn main() {
    // Library-only on the web; a front end drives `sim::tick` itself
}
