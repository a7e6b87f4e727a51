use crate::components::AircraftConfig;
use crate::constants::{ICING_DRAG_FACTOR, ICING_LIFT_FACTOR, THROTTLE_FAILURE_THRUST};
use crate::resources::EnvironmentSnapshot;

use super::air_data::{dynamic_pressure, AirData};

/// Forces acting along the simulation axes for one tick (N).
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct AeroForces {
    pub lift: f64,
    pub drag: f64,
    pub thrust: f64,
}

impl AeroForces {
    /// Vertical acceleration, gravity included (m/s²).
    pub fn vertical_acceleration(&self, mass: f64, gravity: f64) -> f64 {
        self.lift / mass + gravity
    }

    /// Longitudinal acceleration for an aircraft flying toward -x (m/s²).
    pub fn longitudinal_acceleration(&self, mass: f64) -> f64 {
        (-self.thrust + self.drag) / mass
    }
}

fn icing_lift(env: &EnvironmentSnapshot) -> f64 {
    if env.icing {
        ICING_LIFT_FACTOR
    } else {
        1.0
    }
}

fn icing_drag(env: &EnvironmentSnapshot) -> f64 {
    if env.icing {
        ICING_DRAG_FACTOR
    } else {
        1.0
    }
}

/// Fraction of rated thrust the engines can deliver.
pub fn thrust_fraction(env: &EnvironmentSnapshot) -> f64 {
    if env.throttle_failure {
        THROTTLE_FAILURE_THRUST
    } else {
        1.0
    }
}

/// Lift coefficient at `alpha`, including stall and icing.
///
/// Beyond `alpha_stall` lift drops to a fraction of its peak.
pub fn lift_coefficient(config: &AircraftConfig, env: &EnvironmentSnapshot, alpha: f64) -> f64 {
    let cl = if alpha > config.alpha_stall {
        (config.cl0 + config.cl_alpha * config.alpha_stall) * config.post_stall_factor
    } else {
        config.cl0 + config.cl_alpha * alpha
    };
    cl * icing_lift(env)
}

pub fn drag_coefficient(config: &AircraftConfig, env: &EnvironmentSnapshot, alpha: f64) -> f64 {
    (config.cd0 + config.cd_alpha * alpha.abs()) * icing_drag(env)
}

pub fn calculate_forces(
    air: &AirData,
    config: &AircraftConfig,
    env: &EnvironmentSnapshot,
    throttle: f64,
) -> AeroForces {
    let cl = lift_coefficient(config, env, air.alpha);
    let cd = drag_coefficient(config, env, air.alpha);
    let q_s = air.dynamic_pressure * config.wing_area;

    AeroForces {
        lift: q_s * cl,
        drag: q_s * cd,
        thrust: throttle.clamp(0.0, 1.0) * config.max_thrust * thrust_fraction(env),
    }
}

/// Angle of attack at which lift balances weight at `airspeed`, bounded to the
/// unstalled range.
pub fn required_alpha(config: &AircraftConfig, env: &EnvironmentSnapshot, airspeed: f64) -> f64 {
    let q_s = dynamic_pressure(airspeed) * config.wing_area * icing_lift(env);
    let max_alpha = config.alpha_stall * 0.9;
    if q_s <= f64::EPSILON {
        return max_alpha;
    }
    let cl_needed = config.mass * crate::constants::GRAVITY.abs() / q_s;
    ((cl_needed - config.cl0) / config.cl_alpha).clamp(-0.1, max_alpha)
}

/// Throttle setting whose thrust cancels drag at `airspeed` and `alpha`.
pub fn trim_throttle(
    config: &AircraftConfig,
    env: &EnvironmentSnapshot,
    airspeed: f64,
    alpha: f64,
) -> f64 {
    let drag = dynamic_pressure(airspeed) * config.wing_area * drag_coefficient(config, env, alpha);
    drag / (config.max_thrust * thrust_fraction(env))
}
