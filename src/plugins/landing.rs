use bevy::prelude::*;

use crate::components::{AircraftConfig, AircraftState, InitialConditions, LandingPhase};
use crate::resources::{EnvironmentConfig, EventLog, ScenarioConfig, SimRng, SimulationSettings};
use crate::systems::{reset_run, telemetry, tick_with_transition, LatestTelemetry};

/// Operator request: strike the aircraft with a bird on the next tick.
#[derive(Event, Debug, Clone, Copy, Default)]
pub struct BirdStrikeRequest;

/// Operator request: fire the emergency cushion on the next tick.
#[derive(Event, Debug, Clone, Copy, Default)]
pub struct ManualDeployRequest;

#[derive(Event, Debug, Clone, Copy, Default)]
pub struct ResetRequest {
    /// Reseeds the random source; `None` keeps the configured seed.
    pub seed: Option<u64>,
}

#[derive(Event, Debug, Clone, Copy, PartialEq)]
pub struct PhaseChanged {
    pub entity: Entity,
    pub from: LandingPhase,
    pub to: LandingPhase,
    pub time: f64,
}

/// Landing simulation stages, run in order on every fixed tick.
#[derive(SystemSet, Debug, Hash, PartialEq, Eq, Clone)]
pub enum LandingSet {
    Requests,
    Simulate,
    Telemetry,
}

pub struct LandingSimPlugin {
    pub aircraft: AircraftConfig,
    pub environment: EnvironmentConfig,
    pub initial: InitialConditions,
    pub settings: SimulationSettings,
}

impl Default for LandingSimPlugin {
    fn default() -> Self {
        Self {
            aircraft: AircraftConfig::default(),
            environment: EnvironmentConfig::default(),
            initial: InitialConditions::default(),
            settings: SimulationSettings::default(),
        }
    }
}

impl LandingSimPlugin {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn with_environment(mut self, environment: EnvironmentConfig) -> Self {
        self.environment = environment;
        self
    }

    pub fn with_aircraft(mut self, aircraft: AircraftConfig) -> Self {
        self.aircraft = aircraft;
        self
    }

    pub fn with_settings(mut self, settings: SimulationSettings) -> Self {
        self.settings = settings;
        self
    }

    pub fn from_scenario(scenario: &ScenarioConfig) -> Self {
        Self {
            aircraft: scenario.aircraft.clone(),
            environment: scenario.environment.clone(),
            initial: scenario.initial,
            settings: scenario.settings(),
        }
    }
}

fn spawn_aircraft(
    commands: &mut Commands,
    aircraft: &AircraftConfig,
    initial: &InitialConditions,
) {
    info!("Spawning aircraft: {}", aircraft.name);
    commands.spawn((
        aircraft.clone(),
        AircraftState::from_initial(initial),
        Name::new(aircraft.name.clone()),
    ));
}

impl Plugin for LandingSimPlugin {
    fn build(&self, app: &mut App) {
        let mut log = EventLog::new();
        log.reset();

        app.insert_resource(self.environment.clone())
            .insert_resource(self.initial)
            .insert_resource(self.settings)
            .insert_resource(SimRng::from_seed(self.settings.seed))
            .insert_resource(log)
            .init_resource::<LatestTelemetry>();

        // The simulation advances on bevy's fixed clock, not once per rendered frame.
        app.insert_resource(Time::<Fixed>::from_seconds(self.settings.fixed_timestep()));

        app.add_event::<BirdStrikeRequest>()
            .add_event::<ManualDeployRequest>()
            .add_event::<ResetRequest>()
            .add_event::<PhaseChanged>();

        app.configure_sets(
            FixedUpdate,
            (
                LandingSet::Requests,
                LandingSet::Simulate,
                LandingSet::Telemetry,
            )
                .chain(),
        );

        let aircraft = self.aircraft.clone();
        app.add_systems(
            Startup,
            move |mut commands: Commands, initial: Res<InitialConditions>| {
                spawn_aircraft(&mut commands, &aircraft, &initial);
            },
        );
        app.add_systems(
            FixedUpdate,
            (
                handle_requests.in_set(LandingSet::Requests),
                simulation_tick_system.in_set(LandingSet::Simulate),
                refresh_telemetry.in_set(LandingSet::Telemetry),
            ),
        );
    }
}

/// Turns operator events into pending requests, and performs resets.
pub fn handle_requests(
    mut bird_strikes: EventReader<BirdStrikeRequest>,
    mut deploys: EventReader<ManualDeployRequest>,
    mut resets: EventReader<ResetRequest>,
    mut env: ResMut<EnvironmentConfig>,
    mut log: ResMut<EventLog>,
    mut rng: ResMut<SimRng>,
    initial: Res<InitialConditions>,
    settings: Res<SimulationSettings>,
    mut aircraft: Query<&mut AircraftState>,
) {
    // A reset in the same frame discards requests sent before it.
    if let Some(request) = resets.read().last() {
        for mut state in aircraft.iter_mut() {
            reset_run(&mut state, &mut env, &mut log, &initial);
        }
        if let Some(seed) = request.seed.or(settings.seed) {
            *rng = SimRng::seeded(seed);
        }
        bird_strikes.clear();
        deploys.clear();
        return;
    }

    if bird_strikes.read().count() > 0 {
        env.request_bird_strike();
    }
    if deploys.read().count() > 0 {
        env.request_manual_deploy();
    }
}

/// Advances every aircraft by one fixed tick.
///
/// # Arguments
/// - `aircraft`: State and parameters of each simulated aircraft.
/// - `env`: Operator-facing environment; pending requests are consumed here.
/// - `log`: Run event log.
/// - `rng`: Seeded source for turbulence and bird-strike perturbations.
/// - `time`: The fixed clock while running in `FixedUpdate`.
/// - `phase_events`: Receives one `PhaseChanged` per transition.
pub fn simulation_tick_system(
    mut aircraft: Query<(Entity, &mut AircraftState, &AircraftConfig)>,
    mut env: ResMut<EnvironmentConfig>,
    mut log: ResMut<EventLog>,
    mut rng: ResMut<SimRng>,
    time: Res<Time>,
    mut phase_events: EventWriter<PhaseChanged>,
) {
    let delta = time.delta_secs_f64();

    for (entity, mut state, config) in aircraft.iter_mut() {
        // Pending requests are consumed inside the tick, before integration.
        let output = tick_with_transition(
            &mut state,
            &mut env,
            config,
            &mut log,
            delta,
            rng.rng(),
        );
        if let Some(change) = output.transition {
            phase_events.send(PhaseChanged {
                entity,
                from: change.from,
                to: change.to,
                time: state.elapsed,
            });
        }
    }
}

/// Publishes the telemetry of the first aircraft.
pub fn refresh_telemetry(
    aircraft: Query<&AircraftState>,
    env: Res<EnvironmentConfig>,
    mut latest: ResMut<LatestTelemetry>,
) {
    let snapshot = env.snapshot();
    latest.0 = aircraft.iter().next().map(|state| telemetry(state, &snapshot));
}
