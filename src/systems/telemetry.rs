use bevy::prelude::*;
use nalgebra::Vector3;
use serde::{Deserialize, Serialize};

use crate::components::{AircraftState, Attitude, ControlSurfaceCommand, LandingPhase};
use crate::constants::{ms_to_kt, STALL_SPEED_KT, STEEP_DESCENT_RATE};
use crate::resources::EnvironmentSnapshot;
use crate::systems::physics::ground_speed;
use crate::systems::risk::effective_speed_kt;

/// Read-only view of the aircraft handed to the presentation layer each tick.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct TelemetrySnapshot {
    /// Airspeed, or roll speed once on the runway (knots).
    pub speed_kt: f64,
    pub ground_speed_kt: f64,
    /// Altitude above the runway (m).
    pub altitude: f64,
    /// Vertical speed (m/s, positive up).
    pub vertical_speed: f64,
    pub stalled: bool,
    /// Damage in percent.
    pub damage_pct: f64,
    pub phase: LandingPhase,
    pub throttle: f64,
    pub attitude: Attitude,
    pub position: Vector3<f64>,
    pub controls: ControlSurfaceCommand,
    pub camera_shake: f64,
    pub cushion_deployed: bool,
    pub elapsed: f64,
}

/// Most recent telemetry, refreshed by the landing plugin after every tick.
#[derive(Resource, Debug, Clone, Default)]
pub struct LatestTelemetry(pub Option<TelemetrySnapshot>);

/// Builds the telemetry snapshot for the current state.
pub fn telemetry(state: &AircraftState, env: &EnvironmentSnapshot) -> TelemetrySnapshot {
    let rolling = matches!(state.phase, LandingPhase::Rolling | LandingPhase::Stopped);
    let speed_kt = if rolling {
        ms_to_kt(state.roll_speed)
    } else {
        ms_to_kt(state.airspeed())
    };
    let ground_speed_kt = if state.phase.is_airborne() {
        ms_to_kt(ground_speed(state, env))
    } else {
        ms_to_kt(state.roll_speed)
    };
    let stalled = state.phase.is_airborne()
        && (effective_speed_kt(state, env) < STALL_SPEED_KT
            || state.velocity.y < STEEP_DESCENT_RATE);

    TelemetrySnapshot {
        speed_kt,
        ground_speed_kt,
        altitude: state.altitude(),
        vertical_speed: state.velocity.y,
        stalled,
        damage_pct: state.damage * 100.0,
        phase: state.phase,
        throttle: state.throttle,
        attitude: state.attitude,
        position: state.position,
        controls: state.controls,
        camera_shake: state.camera_shake,
        cushion_deployed: state.cushion_deployed,
        elapsed: state.elapsed,
    }
}
