use std::sync::Arc;
use std::time::Duration;

use bevy::app::ScheduleRunnerPlugin;
use bevy::log::LogPlugin;
use bevy::prelude::*;

use save::{FileStore, SavePlugin};
use simulation::{GameParams, GameState, SimulationPlugin, TickCounter};
use skyline::agent_mode::run_agent_mode;
use skyline::params::params_from_env;
use skyline::protocol::PROTOCOL_VERSION;
use skyline::Engine;

/// Ticks between status lines in real-time mode (ten seconds at 100 ms).
const STATUS_EVERY_TICKS: u64 = 100;

fn main() {
    let params = match params_from_env() {
        Ok(params) => params,
        Err(e) => {
            eprintln!("skyline: {e}; using default parameters");
            GameParams::default()
        }
    };
    let store = Arc::new(FileStore::from_env());

    if std::env::args().any(|a| a == "--agent") {
        let mut engine = Engine::new(params, store);
        eprintln!("skyline agent mode v{PROTOCOL_VERSION} ready, waiting for commands on stdin");
        let stdin = std::io::stdin();
        let stdout = std::io::stdout();
        if let Err(e) = run_agent_mode(&mut engine, stdin.lock(), stdout.lock()) {
            eprintln!("stdin/stdout error: {e}");
        }
        engine.stop();
        eprintln!("skyline agent mode shutting down");
        return;
    }

    run_realtime(params, store);
}

fn run_realtime(params: GameParams, store: Arc<FileStore>) {
    let tick = Duration::from_millis(params.construction_tick_ms);

    let mut app = App::new();
    app.add_plugins(
        MinimalPlugins.set(ScheduleRunnerPlugin::run_loop(Duration::from_millis(16))),
    )
    .add_plugins(LogPlugin::default());

    // Loaded after LogPlugin so a rejected save is reported.
    let state = save::load_or_default(store.as_ref(), &params);
    info!("Save file: {}", store.path().display());

    app.insert_resource(Time::<Fixed>::from_duration(tick))
        .insert_resource(params)
        .insert_resource(state)
        .add_plugins(SimulationPlugin)
        .add_plugins(SavePlugin::new(store))
        .add_systems(Update, log_city_status);

    info!("Skyline running, one tick every {} ms", tick.as_millis());
    app.run();
}

fn log_city_status(tick: Res<TickCounter>, state: Res<GameState>) {
    if !tick.is_changed() || tick.0 == 0 || tick.0 % STATUS_EVERY_TICKS != 0 {
        return;
    }
    info!(
        "t={}s level {} ({}/{} xp), {} currency, {} population, {} happiness, {} buildings",
        state.clock_ms / 1000,
        state.level,
        state.experience,
        state.required_xp(),
        state.currency,
        state.population,
        state.happiness,
        state.buildings.len()
    );
}
