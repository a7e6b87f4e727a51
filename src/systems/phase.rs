use bevy::prelude::*;
use serde::{Deserialize, Serialize};

use crate::components::{AircraftState, ControlSurfaceCommand, LandingPhase, TouchdownReport};
use crate::constants::{
    kt_to_ms, ms_to_kt, CRASH_DAMAGE_THRESHOLD, CRASH_SINK_RATE, EMERGENCY_DESCENT_RATE,
    HARD_LANDING_DAMAGE_PER_MS, HARD_LANDING_SINK, MAX_DAMAGE, RUNWAY_END_X, RUNWAY_START_X,
    STOP_SPEED,
};
use crate::resources::{EnvironmentSnapshot, EventKind, EventLog};
use crate::systems::physics::ground_speed;
use crate::systems::risk::RiskAssessment;

/// A phase change made during one tick.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct PhaseTransition {
    pub from: LandingPhase,
    pub to: LandingPhase,
}

/// Applies at most one phase transition and its entry actions.
///
/// Decisions use only the state, the environment snapshot and the risk
/// assessment, so identical inputs always give identical transitions.
///
/// # Arguments
/// - `state`: The aircraft, already integrated for this tick.
/// - `env`: Environment snapshot taken at the start of the tick.
/// - `risk`: Outcome of the risk evaluator; `Engage` deploys the cushion while airborne.
/// - `log`: Receives one entry per transition.
///
/// Returns the transition made, if any.
pub fn advance_phase(
    state: &mut AircraftState,
    env: &EnvironmentSnapshot,
    risk: RiskAssessment,
    log: &mut EventLog,
) -> Option<PhaseTransition> {
    let from = state.phase;
    if from.is_terminal() {
        return None;
    }

    if let RiskAssessment::Engage(reason) = risk {
        if from.is_airborne() && from != LandingPhase::EmergencyDescent && !state.cushion_deployed
        {
            enter_emergency(state, log, &reason.to_string());
            return Some(transition(state, from));
        }
    }

    // Ground contact takes precedence over the flare gate
    let contact = state.altitude() <= 0.0;
    match from {
        LandingPhase::Approaching if contact && state.position.x > RUNWAY_START_X => {
            enter_crash(state, log, "Impact short of the runway");
        }
        LandingPhase::Approaching | LandingPhase::Flaring if contact => {
            land(state, env, log);
        }
        LandingPhase::Approaching if state.position.x <= RUNWAY_START_X => {
            state.phase = LandingPhase::Flaring;
            log.push(state.elapsed, EventKind::PhaseChange, "Flare initiated");
        }
        LandingPhase::Touchdown => {
            state.phase = LandingPhase::Rolling;
            log.push(state.elapsed, EventKind::PhaseChange, "Rollout");
        }
        LandingPhase::EmergencyDescent if contact => {
            let report = record_contact(state, env, true);
            state.roll_speed = kt_to_ms(report.ground_speed_kt);
            settle_on_runway(state);
            state.phase = LandingPhase::Rolling;
            log.push(
                state.elapsed,
                EventKind::Touchdown,
                format!(
                    "Cushioned touchdown at {:.0} kt, sink {:.1} m/s",
                    report.ground_speed_kt, report.sink_rate
                ),
            );
        }
        LandingPhase::Rolling
            if state.position.x < RUNWAY_END_X || state.roll_speed < STOP_SPEED =>
        {
            state.phase = LandingPhase::Stopped;
            state.roll_speed = 0.0;
            state.velocity.fill(0.0);
            log.push(
                state.elapsed,
                EventKind::Stopped,
                format!("Aircraft stopped at x = {:.0} m", state.position.x),
            );
        }
        _ => {}
    }

    (state.phase != from).then(|| transition(state, from))
}

fn transition(state: &AircraftState, from: LandingPhase) -> PhaseTransition {
    let to = state.phase;
    info!("Landing phase {} -> {} at t = {:.2}s", from, to, state.elapsed);
    PhaseTransition { from, to }
}

fn enter_emergency(state: &mut AircraftState, log: &mut EventLog, reason: &str) {
    state.cushion_deployed = true;
    state.phase = LandingPhase::EmergencyDescent;
    state.velocity.y = EMERGENCY_DESCENT_RATE;
    state.controls = ControlSurfaceCommand::neutral();
    state.lateral_pid.reset();
    warn!("Emergency cushion deployed: {}", reason);
    log.push(
        state.elapsed,
        EventKind::CushionDeployed,
        format!("Emergency cushion deployed ({reason})"),
    );
}

fn enter_crash(state: &mut AircraftState, log: &mut EventLog, message: &str) {
    state.phase = LandingPhase::Crashed;
    state.raise_damage_to(MAX_DAMAGE);
    state.velocity.y = -CRASH_SINK_RATE;
    state.position.y = state.position.y.min(0.0);
    state.roll_speed = 0.0;
    state.throttle = 0.0;
    warn!("{}", message);
    log.push(state.elapsed, EventKind::Crash, message);
}

fn land(state: &mut AircraftState, env: &EnvironmentSnapshot, log: &mut EventLog) {
    if env.gear_failure {
        enter_crash(state, log, "Crash: landing gear failure");
        return;
    }
    if state.damage > CRASH_DAMAGE_THRESHOLD {
        enter_crash(state, log, "Crash: structural damage too severe");
        return;
    }

    let report = record_contact(state, env, false);
    if report.sink_rate > HARD_LANDING_SINK {
        state.add_damage((report.sink_rate - HARD_LANDING_SINK) * HARD_LANDING_DAMAGE_PER_MS);
        log.push(
            state.elapsed,
            EventKind::Warning,
            format!("Hard landing, sink {:.1} m/s", report.sink_rate),
        );
    }
    state.roll_speed = kt_to_ms(report.ground_speed_kt);
    settle_on_runway(state);
    state.phase = LandingPhase::Touchdown;
    log.push(
        state.elapsed,
        EventKind::Touchdown,
        format!(
            "Touchdown at {:.0} kt, sink {:.1} m/s",
            report.ground_speed_kt, report.sink_rate
        ),
    );
}

fn record_contact(
    state: &mut AircraftState,
    env: &EnvironmentSnapshot,
    cushioned: bool,
) -> TouchdownReport {
    let report = TouchdownReport {
        ground_speed_kt: ms_to_kt(ground_speed(state, env)),
        sink_rate: (-state.velocity.y).max(0.0),
        position_x: state.position.x,
        cushioned,
    };
    state.touchdown = Some(report);
    report
}

fn settle_on_runway(state: &mut AircraftState) {
    state.position.y = 0.0;
    state.velocity.y = 0.0;
    state.velocity.z = 0.0;
    state.lateral_pid.reset();
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::resources::EnvironmentConfig;
    use crate::systems::risk::RiskReason;
    use approx::assert_relative_eq;

    fn env() -> EnvironmentSnapshot {
        EnvironmentConfig::default().snapshot()
    }

    fn on_runway(phase: LandingPhase) -> AircraftState {
        let mut state = AircraftState::default();
        state.phase = phase;
        state.position.x = 0.0;
        state.position.y = -0.01;
        state.velocity.x = -68.0;
        state.velocity.y = -0.8;
        state
    }

    #[test]
    fn test_flare_gate() {
        let mut log = EventLog::new();
        let mut state = AircraftState::default();
        assert_eq!(advance_phase(&mut state, &env(), RiskAssessment::Nominal, &mut log), None);

        state.position.x = RUNWAY_START_X;
        let change = advance_phase(&mut state, &env(), RiskAssessment::Nominal, &mut log);
        assert_eq!(
            change,
            Some(PhaseTransition {
                from: LandingPhase::Approaching,
                to: LandingPhase::Flaring
            })
        );
        assert!(log.contains(EventKind::PhaseChange));
    }

    #[test]
    fn test_soft_touchdown_then_rolling() {
        let mut log = EventLog::new();
        let mut state = on_runway(LandingPhase::Flaring);
        advance_phase(&mut state, &env(), RiskAssessment::Nominal, &mut log);

        assert_eq!(state.phase, LandingPhase::Touchdown);
        assert_relative_eq!(state.damage, 0.0);
        assert_relative_eq!(state.roll_speed, 68.0, epsilon = 1e-9);
        assert_relative_eq!(state.altitude(), 0.0);
        let report = state.touchdown.unwrap();
        assert_relative_eq!(report.sink_rate, 0.8);
        assert!(!report.cushioned);

        advance_phase(&mut state, &env(), RiskAssessment::Nominal, &mut log);
        assert_eq!(state.phase, LandingPhase::Rolling);
    }

    #[test]
    fn test_hard_landing_adds_damage() {
        let mut log = EventLog::new();
        let mut state = on_runway(LandingPhase::Flaring);
        state.velocity.y = -5.0;
        advance_phase(&mut state, &env(), RiskAssessment::Nominal, &mut log);
        assert_eq!(state.phase, LandingPhase::Touchdown);
        assert_relative_eq!(state.damage, 2.0 * HARD_LANDING_DAMAGE_PER_MS, epsilon = 1e-12);
    }

    #[test]
    fn test_gear_failure_crashes_on_contact() {
        let mut log = EventLog::new();
        let mut config = EnvironmentConfig::default();
        config.gear_failure = true;
        let mut state = on_runway(LandingPhase::Flaring);
        advance_phase(&mut state, &config.snapshot(), RiskAssessment::Nominal, &mut log);
        assert_eq!(state.phase, LandingPhase::Crashed);
        assert_relative_eq!(state.damage, MAX_DAMAGE);
        assert!(log.contains(EventKind::Crash));
    }

    #[test]
    fn test_critical_damage_crashes_on_contact() {
        let mut log = EventLog::new();
        let mut state = on_runway(LandingPhase::Flaring);
        state.damage = 0.6;
        advance_phase(&mut state, &env(), RiskAssessment::Nominal, &mut log);
        assert_eq!(state.phase, LandingPhase::Crashed);
    }

    #[test]
    fn test_ground_contact_short_of_runway_crashes() {
        let mut log = EventLog::new();
        let mut state = on_runway(LandingPhase::Approaching);
        state.position.x = 900.0;
        advance_phase(&mut state, &env(), RiskAssessment::Nominal, &mut log);
        assert_eq!(state.phase, LandingPhase::Crashed);
    }

    #[test]
    fn test_risk_enters_emergency_once() {
        let mut log = EventLog::new();
        let mut state = AircraftState::default();
        let risk = RiskAssessment::Engage(RiskReason::Manual);

        advance_phase(&mut state, &env(), risk, &mut log);
        assert_eq!(state.phase, LandingPhase::EmergencyDescent);
        assert!(state.cushion_deployed);
        assert_relative_eq!(state.velocity.y, EMERGENCY_DESCENT_RATE);

        assert_eq!(advance_phase(&mut state, &env(), risk, &mut log), None);
        assert_eq!(log.count(EventKind::CushionDeployed), 1);
    }

    #[test]
    fn test_emergency_contact_rolls_cushioned() {
        let mut log = EventLog::new();
        let mut config = EnvironmentConfig::default();
        config.gear_failure = true;
        let mut state = on_runway(LandingPhase::EmergencyDescent);
        state.cushion_deployed = true;
        state.velocity.y = EMERGENCY_DESCENT_RATE;
        advance_phase(&mut state, &config.snapshot(), RiskAssessment::Nominal, &mut log);
        assert_eq!(state.phase, LandingPhase::Rolling);
        assert!(state.touchdown.unwrap().cushioned);
    }

    #[test]
    fn test_rolling_stops() {
        let mut log = EventLog::new();
        let mut state = on_runway(LandingPhase::Rolling);
        state.position.y = 0.0;
        state.roll_speed = 10.0;
        assert_eq!(advance_phase(&mut state, &env(), RiskAssessment::Nominal, &mut log), None);

        state.roll_speed = 0.2;
        advance_phase(&mut state, &env(), RiskAssessment::Nominal, &mut log);
        assert_eq!(state.phase, LandingPhase::Stopped);
        assert!(log.contains(EventKind::Stopped));

        let mut overrun = on_runway(LandingPhase::Rolling);
        overrun.roll_speed = 20.0;
        overrun.position.x = RUNWAY_END_X - 1.0;
        advance_phase(&mut overrun, &env(), RiskAssessment::Nominal, &mut log);
        assert_eq!(overrun.phase, LandingPhase::Stopped);
    }

    #[test]
    fn test_terminal_phases_absorb() {
        let mut log = EventLog::new();
        let mut state = on_runway(LandingPhase::Crashed);
        let risk = RiskAssessment::Engage(RiskReason::Manual);
        assert_eq!(advance_phase(&mut state, &env(), risk, &mut log), None);
        assert_eq!(state.phase, LandingPhase::Crashed);
    }
}
