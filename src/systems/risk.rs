use serde::{Deserialize, Serialize};
use std::fmt;

use crate::components::{AircraftState, LandingPhase};
use crate::constants::{
    ms_to_kt, CRASH_DAMAGE_THRESHOLD, GEAR_FAILURE_PROXIMITY_X, RISK_ALTITUDE,
    STALL_SPEED_KT, STEEP_DESCENT_RATE, THROTTLE_FAILURE_SPEED_FACTOR,
};
use crate::resources::EnvironmentSnapshot;

/// Why the cushion was fired.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum RiskReason {
    Manual,
    SteepDescent,
    CriticalDamage,
    GearFailureNearRunway,
    Stall,
}

impl fmt::Display for RiskReason {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let text = match self {
            RiskReason::Manual => "manual deploy",
            RiskReason::SteepDescent => "excessive sink rate",
            RiskReason::CriticalDamage => "critical damage",
            RiskReason::GearFailureNearRunway => "gear failure on short final",
            RiskReason::Stall => "low airspeed",
        };
        f.write_str(text)
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum RiskAssessment {
    Nominal,
    Engage(RiskReason),
}

impl RiskAssessment {
    pub fn is_engaged(&self) -> bool {
        matches!(self, RiskAssessment::Engage(_))
    }

    pub fn reason(&self) -> Option<RiskReason> {
        match self {
            RiskAssessment::Nominal => None,
            RiskAssessment::Engage(reason) => Some(*reason),
        }
    }
}

/// Airspeed the risk logic sees, in knots.
///
/// A throttle failure is treated as a loss of energy margin.
pub fn effective_speed_kt(state: &AircraftState, env: &EnvironmentSnapshot) -> f64 {
    let speed = ms_to_kt(state.airspeed());
    if env.throttle_failure {
        speed * THROTTLE_FAILURE_SPEED_FACTOR
    } else {
        speed
    }
}

/// Decides whether the cushion should fire this tick.
///
/// Only an approaching or flaring aircraft without a deployed cushion can
/// engage. A manual request always wins. The automatic checks need
/// `ai_assist` and run below [`RISK_ALTITUDE`] in a fixed order.
pub fn evaluate_risk(
    state: &AircraftState,
    env: &EnvironmentSnapshot,
    manual_request: bool,
) -> RiskAssessment {
    let eligible = matches!(
        state.phase,
        LandingPhase::Approaching | LandingPhase::Flaring
    );
    if !eligible || state.cushion_deployed {
        return RiskAssessment::Nominal;
    }
    if manual_request {
        return RiskAssessment::Engage(RiskReason::Manual);
    }
    if !env.ai_assist || state.altitude() >= RISK_ALTITUDE {
        return RiskAssessment::Nominal;
    }

    if state.velocity.y < STEEP_DESCENT_RATE {
        RiskAssessment::Engage(RiskReason::SteepDescent)
    } else if state.damage > CRASH_DAMAGE_THRESHOLD {
        RiskAssessment::Engage(RiskReason::CriticalDamage)
    } else if env.gear_failure && state.position.x < GEAR_FAILURE_PROXIMITY_X {
        RiskAssessment::Engage(RiskReason::GearFailureNearRunway)
    } else if effective_speed_kt(state, env) < STALL_SPEED_KT {
        RiskAssessment::Engage(RiskReason::Stall)
    } else {
        RiskAssessment::Nominal
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::resources::EnvironmentConfig;

    fn low_state() -> AircraftState {
        let mut state = AircraftState::default();
        state.position.x = 800.0;
        state.position.y = 40.0;
        state
    }

    #[test]
    fn test_nominal_approach_is_safe() {
        let env = EnvironmentConfig::default().snapshot();
        assert_eq!(evaluate_risk(&low_state(), &env, false), RiskAssessment::Nominal);
        assert_eq!(
            evaluate_risk(&AircraftState::default(), &env, false),
            RiskAssessment::Nominal
        );
    }

    #[test]
    fn test_manual_request_engages_at_any_altitude() {
        let mut env = EnvironmentConfig::default();
        env.ai_assist = false;
        let assessment = evaluate_risk(&AircraftState::default(), &env.snapshot(), true);
        assert_eq!(assessment, RiskAssessment::Engage(RiskReason::Manual));
    }

    #[test]
    fn test_checks_follow_priority_order() {
        let mut env = EnvironmentConfig::default();
        env.gear_failure = true;
        let mut state = low_state();
        state.position.x = 500.0;
        state.velocity.y = -9.0;
        state.damage = 0.6;

        let env = env.snapshot();
        assert_eq!(
            evaluate_risk(&state, &env, false).reason(),
            Some(RiskReason::SteepDescent)
        );
        state.velocity.y = -3.0;
        assert_eq!(
            evaluate_risk(&state, &env, false).reason(),
            Some(RiskReason::CriticalDamage)
        );
        state.damage = 0.0;
        assert_eq!(
            evaluate_risk(&state, &env, false).reason(),
            Some(RiskReason::GearFailureNearRunway)
        );
    }

    #[test]
    fn test_throttle_failure_lowers_effective_speed() {
        let mut env = EnvironmentConfig::default();
        env.throttle_failure = true;
        let mut state = low_state();
        state.velocity.x = -60.0;
        let assessment = evaluate_risk(&state, &env.snapshot(), false);
        assert_eq!(assessment.reason(), Some(RiskReason::Stall));
    }

    #[test]
    fn test_automatic_checks_need_ai_assist() {
        let mut env = EnvironmentConfig::default();
        env.ai_assist = false;
        let mut state = low_state();
        state.velocity.y = -12.0;
        assert!(!evaluate_risk(&state, &env.snapshot(), false).is_engaged());
    }

    #[test]
    fn test_latched_cushion_never_reengages() {
        let env = EnvironmentConfig::default().snapshot();
        let mut state = low_state();
        state.cushion_deployed = true;
        assert!(!evaluate_risk(&state, &env, true).is_engaged());
        state.cushion_deployed = false;
        state.phase = LandingPhase::Rolling;
        assert!(!evaluate_risk(&state, &env, true).is_engaged());
    }
}
