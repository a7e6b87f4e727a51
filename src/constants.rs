//! Tuning constants shared by the integrator, risk evaluator and phase machine.
//!
//! Aircraft-specific parameters (mass, wing area, coefficients) live in
//! [`crate::components::AircraftConfig`]; everything here describes the runway,
//! the environment and the emergency logic.

/// Gravitational acceleration along +y (m/s²).
pub const GRAVITY: f64 = -9.81;
/// Sea-level air density (kg/m³).
pub const AIR_DENSITY: f64 = 1.225;
/// Knots to metres per second.
pub const KT_TO_MS: f64 = 0.514_444;
/// Metres per second to knots.
pub const MS_TO_KT: f64 = 1.0 / KT_TO_MS;
/// Minimum speed used as a denominator when forming angles.
pub const SPEED_EPSILON: f64 = 1e-3;

/// Largest step the integrator will take in one tick (s).
pub const MAX_DELTA: f64 = 0.05;

// Runway geometry (x decreases along the approach).
/// Glideslope aim point / nominal touchdown point.
pub const TOUCHDOWN_POINT_X: f64 = 0.0;
/// Start of the paved runway; also the flare gate.
pub const RUNWAY_START_X: f64 = 300.0;
/// End of the paved runway.
pub const RUNWAY_END_X: f64 = -2700.0;
/// Glideslope angle (rad), 3 degrees.
pub const GLIDESLOPE: f64 = 0.052_36;

// Environment.
pub const MAX_WIND_SPEED_KT: f64 = 80.0;
pub const ICING_LIFT_FACTOR: f64 = 0.85;
pub const ICING_DRAG_FACTOR: f64 = 1.3;
pub const THROTTLE_FAILURE_THRUST: f64 = 0.35;
pub const TURBULENCE_PITCH: f64 = 0.002;
pub const TURBULENCE_ROLL: f64 = 0.01;
pub const TURBULENCE_HEAVE: f64 = 0.05;
pub const TURBULENCE_SHAKE: f64 = 0.6;
pub const SHAKE_DECAY: f64 = 2.0;

// Failures and damage.
pub const BIRD_STRIKE_DAMAGE: f64 = 0.30;
pub const BIRD_STRIKE_ROLL: f64 = 0.2;
pub const BIRD_STRIKE_LATERAL: f64 = 3.0;
pub const BIRD_STRIKE_THROTTLE_CUT: f64 = 0.6;
pub const MAX_DAMAGE: f64 = 1.0;
pub const CRASH_DAMAGE_THRESHOLD: f64 = 0.55;
pub const AUTHORITY_DAMAGE_SLOPE: f64 = 0.7;
pub const AUTHORITY_FLOOR: f64 = 0.25;
pub const THROTTLE_DAMAGE_SLOPE: f64 = 0.5;
pub const HARD_LANDING_SINK: f64 = 3.0;
pub const HARD_LANDING_DAMAGE_PER_MS: f64 = 0.08;

// Risk evaluation.
pub const RISK_ALTITUDE: f64 = 60.0;
pub const STEEP_DESCENT_RATE: f64 = -8.0;
pub const GEAR_FAILURE_PROXIMITY_X: f64 = 600.0;
pub const STALL_SPEED_KT: f64 = 100.0;
pub const THROTTLE_FAILURE_SPEED_FACTOR: f64 = 0.8;

// Emergency cushion.
pub const EMERGENCY_DESCENT_RATE: f64 = -6.0;
pub const EMERGENCY_LEVELING_RATE: f64 = 1.5;

// Rollout.
pub const ROLLOUT_DECEL: f64 = 2.5;
pub const CUSHION_DECEL_FACTOR: f64 = 1.8;
pub const STOP_SPEED: f64 = 0.5;

// Crash behaviour.
pub const CRASH_FLOOR_Y: f64 = -2.0;
pub const CRASH_SINK_RATE: f64 = 3.0;
pub const CRASH_TUMBLE_RATE: f64 = 2.5;
pub const CRASH_SLIDE_DECAY: f64 = 0.8;

/// Knots to metres per second.
pub fn kt_to_ms(kt: f64) -> f64 {
    kt * KT_TO_MS
}

/// Metres per second to knots.
pub fn ms_to_kt(ms: f64) -> f64 {
    ms * MS_TO_KT
}
