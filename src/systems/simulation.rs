use bevy::prelude::*;
use rand::Rng;

use crate::components::{AircraftConfig, AircraftState, InitialConditions};
use crate::resources::{EnvironmentConfig, EventKind, EventLog, ScenarioConfig, SimRng};
use crate::systems::phase::{advance_phase, PhaseTransition};
use crate::systems::physics::{clamp_delta, integrate};
use crate::systems::risk::evaluate_risk;
use crate::systems::telemetry::{telemetry, TelemetrySnapshot};

/// Outcome of a single tick.
#[derive(Debug, Clone, PartialEq)]
pub struct TickOutput {
    pub telemetry: TelemetrySnapshot,
    pub transition: Option<PhaseTransition>,
}

/// Advances the simulation by one frame and returns the resulting telemetry.
///
/// The environment is snapshotted once and its pending requests consumed
/// before anything else runs, so each request fires on exactly one tick.
pub fn tick<R: Rng + ?Sized>(
    state: &mut AircraftState,
    env: &mut EnvironmentConfig,
    config: &AircraftConfig,
    log: &mut EventLog,
    delta: f64,
    rng: &mut R,
) -> TelemetrySnapshot {
    tick_with_transition(state, env, config, log, delta, rng).telemetry
}

/// Like [`tick`], also reporting the phase change made during the frame.
pub fn tick_with_transition<R: Rng + ?Sized>(
    state: &mut AircraftState,
    env: &mut EnvironmentConfig,
    config: &AircraftConfig,
    log: &mut EventLog,
    delta: f64,
    rng: &mut R,
) -> TickOutput {
    let requests = env.take_requests();
    let snapshot = env.snapshot();
    let dt = clamp_delta(delta);

    integrate(state, &snapshot, requests, config, dt, rng, log);

    let risk = evaluate_risk(state, &snapshot, requests.manual_deploy);
    if requests.manual_deploy && !risk.is_engaged() {
        let reason = if state.cushion_deployed {
            "cushion already deployed"
        } else {
            "aircraft is not airborne"
        };
        log.push(
            state.elapsed,
            EventKind::Info,
            format!("Manual deploy ignored: {reason}"),
        );
    }

    let transition = advance_phase(state, &snapshot, risk, log);

    TickOutput {
        telemetry: telemetry(state, &snapshot),
        transition,
    }
}

/// Fresh state at the given initial conditions.
pub fn reset(initial: &InitialConditions) -> AircraftState {
    AircraftState::from_initial(initial)
}

/// Replaces the state, drops pending requests and clears the log to its sentinel.
pub fn reset_run(
    state: &mut AircraftState,
    env: &mut EnvironmentConfig,
    log: &mut EventLog,
    initial: &InitialConditions,
) {
    *state = reset(initial);
    env.take_requests();
    log.reset();
    info!("Simulation reset");
}

/// Telemetry for the current state without advancing time.
pub fn get_telemetry(state: &AircraftState, env: &EnvironmentConfig) -> TelemetrySnapshot {
    telemetry(state, &env.snapshot())
}

pub fn request_manual_deploy(env: &mut EnvironmentConfig) {
    env.request_manual_deploy();
}

pub fn request_bird_strike(env: &mut EnvironmentConfig) {
    env.request_bird_strike();
}

/// Owns one simulation run for drivers outside the ECS.
#[derive(Debug, Clone)]
pub struct Simulation {
    pub state: AircraftState,
    pub environment: EnvironmentConfig,
    pub aircraft: AircraftConfig,
    pub log: EventLog,
    pub initial: InitialConditions,
    rng: SimRng,
}

impl Default for Simulation {
    fn default() -> Self {
        Self::new(
            AircraftConfig::default(),
            EnvironmentConfig::default(),
            InitialConditions::default(),
            Some(0),
        )
    }
}

impl Simulation {
    pub fn new(
        aircraft: AircraftConfig,
        environment: EnvironmentConfig,
        initial: InitialConditions,
        seed: Option<u64>,
    ) -> Self {
        let mut log = EventLog::new();
        log.reset();
        Self {
            state: reset(&initial),
            environment,
            aircraft,
            log,
            initial,
            rng: SimRng::from_seed(seed),
        }
    }

    pub fn from_scenario(scenario: &ScenarioConfig) -> Self {
        Self::new(
            scenario.aircraft.clone(),
            scenario.environment.clone(),
            scenario.initial,
            scenario.seed,
        )
    }

    pub fn step(&mut self, delta: f64) -> TickOutput {
        tick_with_transition(
            &mut self.state,
            &mut self.environment,
            &self.aircraft,
            &mut self.log,
            delta,
            self.rng.rng(),
        )
    }

    /// Steps at a fixed delta until the run ends or `max_ticks` elapse.
    ///
    /// Returns every phase change in order.
    pub fn run_until_terminal(&mut self, delta: f64, max_ticks: usize) -> Vec<PhaseTransition> {
        let mut transitions = Vec::new();
        for _ in 0..max_ticks {
            if self.state.phase.is_terminal() {
                break;
            }
            if let Some(change) = self.step(delta).transition {
                transitions.push(change);
            }
        }
        transitions
    }

    pub fn reset(&mut self) {
        reset_run(
            &mut self.state,
            &mut self.environment,
            &mut self.log,
            &self.initial,
        );
    }

    pub fn telemetry(&self) -> TelemetrySnapshot {
        get_telemetry(&self.state, &self.environment)
    }

    pub fn request_manual_deploy(&mut self) {
        request_manual_deploy(&mut self.environment);
    }

    pub fn request_bird_strike(&mut self) {
        request_bird_strike(&mut self.environment);
    }
}
