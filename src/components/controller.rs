use serde::{Deserialize, Serialize};

/// Fixed gains and limits of a PID loop.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct PidGains {
    pub kp: f64,
    pub ki: f64,
    pub kd: f64,
    /// Anti-windup bound on the accumulated integral.
    pub integral_limit: f64,
    /// Bound on the controller output.
    pub output_limit: f64,
}

impl PidGains {
    /// Gains for holding the runway centreline; the output is a yaw command (rad).
    pub const LATERAL: PidGains = PidGains {
        kp: 0.004,
        ki: 0.0002,
        kd: 0.02,
        integral_limit: 400.0,
        output_limit: 0.15,
    };
}

/// Accumulators carried between ticks.
#[derive(Debug, Clone, Copy, PartialEq, Default, Serialize, Deserialize)]
pub struct PidState {
    pub integral: f64,
    pub previous_error: Option<f64>,
}

impl PidState {
    /// Advances the loop by one step and returns the command `-(P + I + D)`
    /// that drives `error` toward zero, scaled by `authority`.
    pub fn update(&mut self, gains: &PidGains, error: f64, dt: f64, authority: f64) -> f64 {
        if !error.is_finite() || dt <= 0.0 {
            return 0.0;
        }

        self.integral =
            (self.integral + error * dt).clamp(-gains.integral_limit, gains.integral_limit);

        let derivative = match self.previous_error {
            Some(previous) => (error - previous) / dt,
            None => 0.0,
        };
        self.previous_error = Some(error);

        let output = gains.kp * error + gains.ki * self.integral + gains.kd * derivative;
        (-output * authority).clamp(-gains.output_limit, gains.output_limit)
    }

    pub fn reset(&mut self) {
        *self = Self::default();
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use approx::assert_relative_eq;

    #[test]
    fn test_output_opposes_error() {
        let mut pid = PidState::default();
        let out = pid.update(&PidGains::LATERAL, 10.0, 0.1, 1.0);
        assert!(out < 0.0);

        let mut pid = PidState::default();
        let out = pid.update(&PidGains::LATERAL, -10.0, 0.1, 1.0);
        assert!(out > 0.0);
    }

    #[test]
    fn test_first_step_has_no_derivative_kick() {
        let gains = PidGains {
            kp: 1.0,
            ki: 0.0,
            kd: 100.0,
            integral_limit: 10.0,
            output_limit: 1.0e6,
        };
        let mut pid = PidState::default();
        assert_relative_eq!(pid.update(&gains, 2.0, 0.1, 1.0), -2.0);
        assert_relative_eq!(pid.update(&gains, 3.0, 0.1, 1.0), -(3.0 + 1000.0));
    }

    #[test]
    fn test_integral_is_clamped() {
        let mut pid = PidState::default();
        for _ in 0..10_000 {
            pid.update(&PidGains::LATERAL, 1000.0, 0.05, 1.0);
        }
        assert_relative_eq!(pid.integral, PidGains::LATERAL.integral_limit);
    }

    #[test]
    fn test_authority_scales_and_output_is_bounded() {
        let gains = PidGains {
            kp: 1.0,
            ki: 0.0,
            kd: 0.0,
            integral_limit: 1.0,
            output_limit: 0.5,
        };
        let mut pid = PidState::default();
        assert_relative_eq!(pid.update(&gains, 0.2, 0.1, 0.5), -0.1);
        assert_relative_eq!(pid.update(&gains, 100.0, 0.1, 1.0), -0.5);
    }

    #[test]
    fn test_ignores_bad_inputs() {
        let mut pid = PidState::default();
        assert_eq!(pid.update(&PidGains::LATERAL, f64::NAN, 0.1, 1.0), 0.0);
        assert_eq!(pid.update(&PidGains::LATERAL, 1.0, 0.0, 1.0), 0.0);
        assert_eq!(pid, PidState::default());
    }
}
