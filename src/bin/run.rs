use bevy::{log::LogPlugin, prelude::*, time::TimeUpdateStrategy};
use std::{env, time::Duration};

use touchdown::{
    components::AircraftState,
    plugins::{BirdStrikeRequest, LandingSimPlugin, ManualDeployRequest},
    resources::{EventLog, ScenarioConfig, ScriptedAction},
    systems::LatestTelemetry,
};

fn main() -> Result<(), Box<dyn std::error::Error>> {
    let scenario = match env::args().nth(1) {
        Some(path) => ScenarioConfig::load(&path)?,
        None => ScenarioConfig::default(),
    };

    let mut app = App::new();
    app.add_plugins(MinimalPlugins)
        .add_plugins(LogPlugin::default())
        .add_plugins(LandingSimPlugin::from_scenario(&scenario));

    // Headless runs are not tied to the wall clock: every update is one tick.
    app.insert_resource(TimeUpdateStrategy::ManualDuration(Duration::from_secs_f64(
        scenario.delta,
    )));

    // Plugins must be finalised before the app is stepped by hand.
    app.finish();
    app.cleanup();
    // Spawns the aircraft and starts the clock; no tick runs yet.
    app.update();

    let mut script = scenario.script.clone();
    script.sort_by(|a, b| a.at.total_cmp(&b.at));
    let mut next_action = 0;

    let max_ticks = (scenario.max_duration / scenario.delta).ceil() as usize;
    let report_every = scenario.report_every.max(1);

    for tick in 0..max_ticks {
        let elapsed = current_state(&mut app).map(|s| s.elapsed).unwrap_or(0.0);
        while let Some(event) = script.get(next_action).filter(|e| e.at <= elapsed) {
            match event.action {
                ScriptedAction::BirdStrike => {
                    app.world_mut().send_event(BirdStrikeRequest);
                }
                ScriptedAction::ManualDeploy => {
                    app.world_mut().send_event(ManualDeployRequest);
                }
            }
            next_action += 1;
        }

        app.update();

        let done = current_state(&mut app).map_or(true, |s| s.phase.is_terminal());
        if tick % report_every == 0 || done {
            if let Some(snapshot) = &app.world().resource::<LatestTelemetry>().0 {
                println!("{}", serde_json::to_string(snapshot)?);
            }
        }
        if done {
            break;
        }
    }

    for entry in app.world().resource::<EventLog>().entries() {
        println!("[{:>7.2}s] {:?}: {}", entry.time, entry.kind, entry.message);
    }
    Ok(())
}

fn current_state(app: &mut App) -> Option<AircraftState> {
    let world = app.world_mut();
    let mut query = world.query::<&AircraftState>();
    query.get_single(world).ok().cloned()
}
