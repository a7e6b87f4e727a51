use pretty_assertions::assert_eq;
use touchdown::{
    components::{AircraftState, LandingPhase},
    systems::{PhaseTransition, TelemetrySnapshot},
};

/// Assert that every continuous field of the aircraft is finite
#[track_caller]
pub fn assert_state_finite(state: &AircraftState) {
    for (axis, value) in ["x", "y", "z"].iter().zip(state.position.iter()) {
        assert!(value.is_finite(), "Position {} is not finite", axis);
    }
    for (axis, value) in ["x", "y", "z"].iter().zip(state.velocity.iter()) {
        assert!(value.is_finite(), "Velocity {} is not finite", axis);
    }
    assert!(state.attitude.pitch.is_finite(), "Pitch is not finite");
    assert!(state.attitude.roll.is_finite(), "Roll is not finite");
    assert!(state.attitude.yaw.is_finite(), "Yaw is not finite");
    assert!(
        (0.0..=1.0).contains(&state.throttle),
        "Throttle {} out of range",
        state.throttle
    );
    assert!(
        (0.0..=1.0).contains(&state.damage),
        "Damage {} out of range",
        state.damage
    );
    assert!(state.roll_speed.is_finite(), "Roll speed is not finite");
}

#[track_caller]
pub fn assert_telemetry_finite(snapshot: &TelemetrySnapshot) {
    assert!(snapshot.speed_kt.is_finite(), "Speed is not finite");
    assert!(snapshot.ground_speed_kt.is_finite(), "Ground speed is not finite");
    assert!(snapshot.altitude.is_finite(), "Altitude is not finite");
    assert!(snapshot.vertical_speed.is_finite(), "Vertical speed is not finite");
    assert!(snapshot.camera_shake.is_finite(), "Camera shake is not finite");
    assert!(
        snapshot.position.iter().all(|v| v.is_finite()),
        "Position contains non-finite values"
    );
}

/// Assert that damage never decreased between two consecutive ticks
#[track_caller]
pub fn assert_damage_non_decreasing(before: f64, after: f64) {
    assert!(
        after >= before,
        "Damage decreased from {} to {}",
        before,
        after
    );
}

/// Assert that a run visited exactly the given phases, in order
#[track_caller]
pub fn assert_phase_sequence(transitions: &[PhaseTransition], expected: &[LandingPhase]) {
    let mut visited = Vec::with_capacity(transitions.len() + 1);
    if let Some(first) = transitions.first() {
        visited.push(first.from);
    }
    visited.extend(transitions.iter().map(|t| t.to));
    assert_eq!(visited, expected.to_vec());
}
