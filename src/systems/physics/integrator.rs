use rand::Rng;
use std::f64::consts::PI;

use crate::components::{AircraftConfig, AircraftState, LandingPhase};
use crate::constants::{
    CRASH_FLOOR_Y, CRASH_SINK_RATE, CRASH_SLIDE_DECAY, CRASH_TUMBLE_RATE, CUSHION_DECEL_FACTOR,
    EMERGENCY_DESCENT_RATE, EMERGENCY_LEVELING_RATE, GRAVITY, MAX_DELTA, MAX_DAMAGE,
    ROLLOUT_DECEL,
};
use crate::resources::{EnvironmentSnapshot, EventLog, PendingRequests};
use crate::systems::aerodynamics::{calculate_forces, AirData};
use crate::systems::controller::{apply_autopilot, apply_lateral_alignment, approach, level_wings};

use super::perturbation::{apply_bird_strike, apply_turbulence, decay_shake};

/// Rate at which sideslip velocity relaxes toward the heading (1/s).
const LATERAL_RELAXATION: f64 = 1.0;
const VERTICAL_SPEED_LIMITS: (f64, f64) = (-80.0, 40.0);

/// Clamps a frame delta into `[0, MAX_DELTA]`; non-finite deltas become zero.
pub fn clamp_delta(delta: f64) -> f64 {
    if delta.is_finite() {
        delta.clamp(0.0, MAX_DELTA)
    } else {
        0.0
    }
}

/// Ground speed for the current air-relative motion and headwind (m/s).
pub fn ground_speed(state: &AircraftState, env: &EnvironmentSnapshot) -> f64 {
    (state.airspeed() - env.headwind_ms()).max(0.0)
}

/// Advances the continuous state of the aircraft by `dt` seconds.
///
/// `requests` must already have been taken from the configuration; the bird
/// strike it may carry is applied here exactly once.
///
/// # Arguments
/// - `state`: The aircraft to advance.
/// - `env`: Environment snapshot for this tick (wind, failures, toggles).
/// - `requests`: Edge requests consumed for this tick.
/// - `config`: Aerodynamic and mass parameters.
/// - `dt`: Frame delta, clamped into `[0, MAX_DELTA]`.
/// - `rng`: Source for turbulence and bird-strike perturbations.
/// - `log`: Run event log.
pub fn integrate<R: Rng + ?Sized>(
    state: &mut AircraftState,
    env: &EnvironmentSnapshot,
    requests: PendingRequests,
    config: &AircraftConfig,
    dt: f64,
    rng: &mut R,
    log: &mut EventLog,
) {
    let dt = clamp_delta(dt);
    state.elapsed += dt;

    // One-shot perturbations first, then the kinematics of the current phase
    if requests.bird_strike {
        apply_bird_strike(state, rng, log);
    }

    match state.phase {
        LandingPhase::Approaching | LandingPhase::Flaring | LandingPhase::EmergencyDescent => {
            integrate_flight(state, env, config, dt);
        }
        LandingPhase::Touchdown | LandingPhase::Rolling => integrate_rollout(state, dt),
        LandingPhase::Crashed => integrate_crash(state, dt),
        LandingPhase::Stopped => {
            state.velocity.fill(0.0);
            state.roll_speed = 0.0;
        }
    }

    // A zero-length tick (paused clock) must not move the aircraft.
    if env.turbulence && state.phase.is_airborne() && dt > 0.0 {
        apply_turbulence(state, rng);
    } else {
        decay_shake(state, dt);
    }

    // Never hand a non-finite value to the phase machine
    sanitize(state);
}

fn integrate_flight(
    state: &mut AircraftState,
    env: &EnvironmentSnapshot,
    config: &AircraftConfig,
    dt: f64,
) {
    let emergency = state.phase == LandingPhase::EmergencyDescent;

    if emergency {
        state.attitude.pitch = approach(state.attitude.pitch, 0.0, EMERGENCY_LEVELING_RATE, dt);
        state.attitude.roll = approach(state.attitude.roll, 0.0, EMERGENCY_LEVELING_RATE, dt);
    } else {
        if env.autopilot {
            apply_autopilot(state, env, config, dt);
        }
        if env.ai_assist {
            apply_lateral_alignment(state, dt);
        }
        level_wings(state, dt);
    }

    let air = AirData::calculate(&state.velocity, state.attitude.pitch);
    let forces = calculate_forces(&air, config, env, state.throttle);

    let ax = forces.longitudinal_acceleration(config.mass);
    state.velocity.x = (state.velocity.x + ax * dt).min(0.0);
    state.velocity.y = if emergency {
        EMERGENCY_DESCENT_RATE
    } else {
        (state.velocity.y + forces.vertical_acceleration(config.mass, GRAVITY) * dt)
            .clamp(VERTICAL_SPEED_LIMITS.0, VERTICAL_SPEED_LIMITS.1)
    };

    let ground = ground_speed(state, env);
    let heading_drift = ground * state.attitude.yaw.sin();
    state.velocity.z = approach(state.velocity.z, heading_drift, LATERAL_RELAXATION, dt);

    state.position.x -= ground * dt;
    state.position.y += state.velocity.y * dt;
    state.position.z += (state.velocity.z + env.crosswind_ms()) * dt;
}

fn integrate_rollout(state: &mut AircraftState, dt: f64) {
    let mut decel = ROLLOUT_DECEL * (1.0 + state.damage);
    if state.cushion_deployed {
        decel *= CUSHION_DECEL_FACTOR;
    }
    if state.phase == LandingPhase::Rolling {
        state.roll_speed = (state.roll_speed - decel * dt).max(0.0);
    }

    state.position.x -= state.roll_speed * dt;
    state.position.y = 0.0;
    state.velocity = nalgebra::Vector3::new(-state.roll_speed, 0.0, 0.0);
    state.attitude.pitch = approach(state.attitude.pitch, 0.0, EMERGENCY_LEVELING_RATE, dt);
    state.attitude.roll = approach(state.attitude.roll, 0.0, EMERGENCY_LEVELING_RATE, dt);
    state.throttle = approach(state.throttle, 0.0, EMERGENCY_LEVELING_RATE, dt);
    state.controls = Default::default();
}

fn integrate_crash(state: &mut AircraftState, dt: f64) {
    if state.position.y > CRASH_FLOOR_Y {
        let tumble = state.damage * CRASH_TUMBLE_RATE * dt;
        state.attitude.roll = wrap_angle(state.attitude.roll + tumble);
        state.attitude.pitch = wrap_angle(state.attitude.pitch + 0.4 * tumble);
        state.attitude.yaw = wrap_angle(state.attitude.yaw + 0.6 * tumble);
        state.velocity.y = -CRASH_SINK_RATE;
        state.position.y = (state.position.y - CRASH_SINK_RATE * dt).max(CRASH_FLOOR_Y);
    } else {
        state.position.y = CRASH_FLOOR_Y;
        state.velocity.y = 0.0;
    }

    let decay = (1.0 - CRASH_SLIDE_DECAY * dt).max(0.0);
    state.velocity.x *= decay;
    state.velocity.z *= decay;
    state.position.x += state.velocity.x * dt;
    state.position.z += state.velocity.z * dt;
    state.throttle = 0.0;
}

/// Wraps an angle into `(-PI, PI]`.
pub fn wrap_angle(angle: f64) -> f64 {
    let wrapped = (angle + PI).rem_euclid(2.0 * PI) - PI;
    if wrapped <= -PI {
        wrapped + 2.0 * PI
    } else {
        wrapped
    }
}

/// Replaces any non-finite component with zero and re-clamps bounded fields.
fn sanitize(state: &mut AircraftState) {
    fn finite(v: &mut f64) {
        if !v.is_finite() {
            *v = 0.0;
        }
    }

    state.position.iter_mut().for_each(finite);
    state.velocity.iter_mut().for_each(finite);
    finite(&mut state.attitude.pitch);
    finite(&mut state.attitude.roll);
    finite(&mut state.attitude.yaw);
    finite(&mut state.roll_speed);
    finite(&mut state.camera_shake);
    finite(&mut state.throttle);
    state.throttle = state.throttle.clamp(0.0, 1.0);
    state.damage = state.damage.clamp(0.0, MAX_DAMAGE);
}
