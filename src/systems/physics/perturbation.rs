use bevy::prelude::*;
use rand::Rng;

use crate::components::AircraftState;
use crate::constants::{
    BIRD_STRIKE_DAMAGE, BIRD_STRIKE_LATERAL, BIRD_STRIKE_ROLL, BIRD_STRIKE_THROTTLE_CUT,
    SHAKE_DECAY, TURBULENCE_HEAVE, TURBULENCE_PITCH, TURBULENCE_ROLL, TURBULENCE_SHAKE,
};
use crate::resources::{EventKind, EventLog};
use crate::systems::controller::throttle_ceiling;

/// Applies one bird strike: damage, a one-off roll and sideslip kick, and a throttle cut.
///
/// Returns false (and changes nothing) once the run has ended.
pub fn apply_bird_strike<R: Rng + ?Sized>(
    state: &mut AircraftState,
    rng: &mut R,
    log: &mut EventLog,
) -> bool {
    if state.phase.is_terminal() {
        log.push(
            state.elapsed,
            EventKind::Info,
            "Bird strike ignored: simulation has ended",
        );
        return false;
    }

    state.add_damage(BIRD_STRIKE_DAMAGE);

    if state.phase.is_airborne() {
        state.attitude.roll += rng.gen_range(-BIRD_STRIKE_ROLL..=BIRD_STRIKE_ROLL);
        state.velocity.z += rng.gen_range(-BIRD_STRIKE_LATERAL..=BIRD_STRIKE_LATERAL);
    }
    state.throttle =
        (state.throttle * BIRD_STRIKE_THROTTLE_CUT).min(throttle_ceiling(state.damage));
    state.camera_shake = state.camera_shake.max(1.0);

    warn!("Bird strike, damage now {:.0}%", state.damage * 100.0);
    log.push(
        state.elapsed,
        EventKind::BirdStrike,
        format!("Bird strike! Damage {:.0}%", state.damage * 100.0),
    );
    true
}

/// Adds per-tick turbulence jitter to pitch, roll and height.
pub fn apply_turbulence<R: Rng + ?Sized>(state: &mut AircraftState, rng: &mut R) {
    state.attitude.pitch += rng.gen_range(-TURBULENCE_PITCH..=TURBULENCE_PITCH);
    state.attitude.roll += rng.gen_range(-TURBULENCE_ROLL..=TURBULENCE_ROLL);
    state.position.y += rng.gen_range(-TURBULENCE_HEAVE..=TURBULENCE_HEAVE);
    state.camera_shake = state.camera_shake.max(TURBULENCE_SHAKE);
}

/// Lets camera shake die away when nothing is exciting it.
pub fn decay_shake(state: &mut AircraftState, dt: f64) {
    state.camera_shake = (state.camera_shake * (1.0 - SHAKE_DECAY * dt).max(0.0)).max(0.0);
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::components::LandingPhase;
    use approx::assert_relative_eq;
    use rand::SeedableRng;
    use rand_chacha::ChaCha8Rng;

    #[test]
    fn test_bird_strike_adds_fixed_damage() {
        let mut rng = ChaCha8Rng::seed_from_u64(1);
        let mut log = EventLog::new();
        let mut state = AircraftState::default();
        state.damage = 0.1;
        let throttle = state.throttle;

        assert!(apply_bird_strike(&mut state, &mut rng, &mut log));
        assert_relative_eq!(state.damage, 0.1 + BIRD_STRIKE_DAMAGE);
        assert!(state.throttle < throttle);
        assert_eq!(log.count(EventKind::BirdStrike), 1);
    }

    #[test]
    fn test_bird_strike_after_crash_is_ignored() {
        let mut rng = ChaCha8Rng::seed_from_u64(1);
        let mut log = EventLog::new();
        let mut state = AircraftState::default();
        state.phase = LandingPhase::Crashed;
        state.damage = 1.0;

        assert!(!apply_bird_strike(&mut state, &mut rng, &mut log));
        assert!(!log.contains(EventKind::BirdStrike));
    }

    #[test]
    fn test_turbulence_is_bounded() {
        let mut rng = ChaCha8Rng::seed_from_u64(9);
        let mut state = AircraftState::default();
        let before = state.clone();
        apply_turbulence(&mut state, &mut rng);
        assert!((state.attitude.pitch - before.attitude.pitch).abs() <= TURBULENCE_PITCH);
        assert!((state.attitude.roll - before.attitude.roll).abs() <= TURBULENCE_ROLL);
        assert!((state.position.y - before.position.y).abs() <= TURBULENCE_HEAVE);
        assert_relative_eq!(state.camera_shake, TURBULENCE_SHAKE);

        decay_shake(&mut state, 0.1);
        assert!(state.camera_shake < TURBULENCE_SHAKE);
    }
}
