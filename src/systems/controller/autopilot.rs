use crate::components::{AircraftConfig, AircraftState, LandingPhase, PidGains};
use crate::constants::{GLIDESLOPE, SPEED_EPSILON, THROTTLE_DAMAGE_SLOPE, TOUCHDOWN_POINT_X};
use crate::resources::EnvironmentSnapshot;
use crate::systems::aerodynamics::{required_alpha, trim_throttle};

/// Altitude error gain on the commanded flight path (rad/m).
const ALTITUDE_GAIN: f64 = 0.002;
/// Largest flight path correction the approach mode may add (rad).
const MAX_PATH_CORRECTION: f64 = 0.06;
/// Sink rate commanded at zero altitude during the flare (m/s).
const FLARE_SINK_MIN: f64 = 0.6;
/// Additional sink rate per metre of altitude during the flare (1/s).
const FLARE_SINK_GAIN: f64 = 0.2;
const PITCH_LIMITS: (f64, f64) = (-0.15, 0.30);
/// First-order rate at which pitch follows its target (1/s).
const PITCH_RATE: f64 = 1.5;
/// Autothrottle speed error gain (1/(m/s)).
const SPEED_GAIN: f64 = 0.05;
/// Throttle lever slew limit (1/s).
const THROTTLE_SLEW: f64 = 0.5;
/// Rate at which yaw follows the lateral loop command (1/s).
const YAW_RATE: f64 = 1.0;
/// Rate at which roll is levelled (1/s).
const ROLL_LEVELING: f64 = 0.8;

/// Pitch and throttle targets produced by the autopilot for one tick.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct AutopilotCommand {
    pub pitch_target: f64,
    pub throttle_target: f64,
    pub flare: bool,
}

/// Glideslope altitude at longitudinal position `x`.
pub fn desired_altitude(x: f64) -> f64 {
    ((x - TOUCHDOWN_POINT_X) * GLIDESLOPE.tan()).max(0.0)
}

/// Highest throttle the damaged engines accept.
pub fn throttle_ceiling(damage: f64) -> f64 {
    (1.0 - THROTTLE_DAMAGE_SLOPE * damage).clamp(0.0, 1.0)
}

/// Smooths `current` toward `target` with a first-order lag of rate `rate`.
pub fn approach(current: f64, target: f64, rate: f64, dt: f64) -> f64 {
    current + (target - current) * (rate * dt).clamp(0.0, 1.0)
}

/// Computes the autopilot targets for the current state.
///
/// On approach the commanded flight path is the glideslope plus a bounded
/// correction for altitude error. In the flare it becomes a sink rate that
/// shrinks with remaining altitude, which raises the nose progressively. The
/// pitch target adds the angle of attack at which lift balances weight.
pub fn compute_command(
    state: &AircraftState,
    env: &EnvironmentSnapshot,
    config: &AircraftConfig,
) -> AutopilotCommand {
    let airspeed = state.airspeed().max(SPEED_EPSILON);
    let altitude = state.altitude().max(0.0);
    let flare = state.phase == LandingPhase::Flaring;

    let path_command = if flare {
        let sink = FLARE_SINK_MIN + FLARE_SINK_GAIN * altitude;
        (-sink).atan2(airspeed)
    } else {
        let error = desired_altitude(state.position.x) - altitude;
        -GLIDESLOPE + (ALTITUDE_GAIN * error).clamp(-MAX_PATH_CORRECTION, MAX_PATH_CORRECTION)
    };

    let alpha = required_alpha(config, env, airspeed);
    let pitch_target = (path_command + alpha).clamp(PITCH_LIMITS.0, PITCH_LIMITS.1);

    let ceiling = throttle_ceiling(state.damage);
    let throttle_target = if flare {
        0.0
    } else {
        let feed_forward = trim_throttle(config, env, airspeed, alpha);
        (feed_forward + SPEED_GAIN * (config.approach_speed - airspeed)).clamp(0.0, ceiling)
    };

    AutopilotCommand {
        pitch_target,
        throttle_target,
        flare,
    }
}

/// Runs the pitch autopilot and autothrottle for one tick.
pub fn apply_autopilot(
    state: &mut AircraftState,
    env: &EnvironmentSnapshot,
    config: &AircraftConfig,
    dt: f64,
) -> AutopilotCommand {
    let command = compute_command(state, env, config);
    let authority = state.authority();

    state.attitude.pitch = approach(
        state.attitude.pitch,
        command.pitch_target,
        PITCH_RATE * authority,
        dt,
    );

    let step = THROTTLE_SLEW * dt;
    let delta = (command.throttle_target - state.throttle).clamp(-step, step);
    state.throttle = (state.throttle + delta).clamp(0.0, throttle_ceiling(state.damage));

    let pitch_error = command.pitch_target - state.attitude.pitch;
    state.controls.elevator = (pitch_error * 10.0).clamp(-1.0, 1.0);
    command
}

/// Runs the lateral centreline loop for one tick and returns the yaw command.
pub fn apply_lateral_alignment(state: &mut AircraftState, dt: f64) -> f64 {
    let authority = state.authority();
    let error = state.position.z;
    let yaw_command = state
        .lateral_pid
        .update(&PidGains::LATERAL, error, dt, authority);

    state.attitude.yaw = approach(state.attitude.yaw, yaw_command, YAW_RATE * authority, dt);
    state.controls.rudder =
        ((yaw_command - state.attitude.yaw) / PidGains::LATERAL.output_limit).clamp(-1.0, 1.0);
    yaw_command
}

/// Wing leveller; always active while airborne.
pub fn level_wings(state: &mut AircraftState, dt: f64) {
    let authority = state.authority();
    state.attitude.roll = approach(state.attitude.roll, 0.0, ROLL_LEVELING * authority, dt);
    state.controls.aileron = (-state.attitude.roll * 2.0).clamp(-1.0, 1.0);
}
