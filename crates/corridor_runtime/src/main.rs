//! Corridor
//!
//! Headless driver for the section streamer. Walks a scripted agent through
//! the configured waypoints, ticking the session and logging every section
//! transition and fired action.
//!
//! Run with: cargo run --bin corridor -- [config.toml]

use corridor_runtime::prelude::*;
use corridor_section::JsonDirRepository;
use std::process::ExitCode;

fn main() -> ExitCode {
    // Initialize logging
    env_logger::Builder::from_env(env_logger::Env::default().default_filter_or("info")).init();

    match run() {
        Ok(()) => ExitCode::SUCCESS,
        Err(e) => {
            log::error!("{}", e);
            ExitCode::FAILURE
        }
    }
}

fn run() -> Result<(), RuntimeError> {
    let mut config = RuntimeConfig::load()?;
    let repository = JsonDirRepository::new(&config.sections.root);
    config.resolve_anomaly_pool(&repository)?;
    config.print_summary();

    let mut session = Session::new(config.streaming.clone(), repository)?;
    let first = session.start()?;
    log::info!("Entered '{}'", first.section_id);

    let mut agent = WaypointAgent::new(config.agent.waypoints.clone(), config.agent.speed);
    let mut sink = LogActionSink::new();
    let dt = config.session.tick_interval();

    while !agent.is_finished() {
        if config.session.max_ticks.is_some_and(|max| session.ticks() >= max) {
            log::info!("Tick limit reached");
            break;
        }

        agent.advance(dt);
        let report = session.tick(&agent, &mut sink)?;
        if report.is_quiet() {
            continue;
        }

        for transition in &report.transitions {
            log::info!(
                "Entered '{}' ({:?}) at {:?}, pass {}",
                transition.section_id,
                transition.choice,
                transition.frame.origin,
                transition.pass_counter
            );
        }
        for failure in &report.failures {
            log::warn!("Stayed in '{}': {}", session.streamer().state().section_id, failure);
        }
    }

    let state = session.streamer().state();
    log::info!(
        "Session finished after {} ticks in '{}' (pass {}), {} actions executed",
        session.ticks(),
        state.section_id,
        state.pass_counter,
        sink.executed()
    );
    Ok(())
}
