#![allow(dead_code)]

mod assertions;
mod test_app;

pub use assertions::{
    assert_damage_non_decreasing, assert_phase_sequence, assert_state_finite,
    assert_telemetry_finite,
};
pub use test_app::{PhaseHistory, TestApp, TestAppBuilder};
