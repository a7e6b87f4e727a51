use nalgebra::Vector3;

use crate::constants::{AIR_DENSITY, SPEED_EPSILON};

/// Air-relative quantities derived from the velocity vector and pitch attitude.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct AirData {
    /// Longitudinal airspeed magnitude (m/s).
    pub airspeed: f64,
    /// Flight path angle (rad), negative when descending.
    pub flight_path_angle: f64,
    /// Angle of attack (rad).
    pub alpha: f64,
    /// Dynamic pressure on the longitudinal axis (Pa).
    pub dynamic_pressure: f64,
}

impl AirData {
    pub fn calculate(velocity: &Vector3<f64>, pitch: f64) -> Self {
        let airspeed = velocity.x.abs();
        let flight_path_angle = Self::calculate_flight_path_angle(velocity);
        let dynamic_pressure = 0.5 * AIR_DENSITY * airspeed * airspeed;

        Self {
            airspeed,
            flight_path_angle,
            alpha: pitch - flight_path_angle,
            dynamic_pressure,
        }
    }

    fn calculate_flight_path_angle(velocity: &Vector3<f64>) -> f64 {
        velocity.y.atan2(velocity.x.abs().max(SPEED_EPSILON))
    }
}

/// Dynamic pressure at a given longitudinal speed (Pa).
pub fn dynamic_pressure(airspeed: f64) -> f64 {
    0.5 * AIR_DENSITY * airspeed * airspeed
}

#[cfg(test)]
mod tests {
    use super::*;
    use approx::assert_relative_eq;

    #[test]
    fn test_level_flight() {
        let air = AirData::calculate(&Vector3::new(-70.0, 0.0, 0.0), 0.05);
        assert_relative_eq!(air.airspeed, 70.0);
        assert_relative_eq!(air.flight_path_angle, 0.0);
        assert_relative_eq!(air.alpha, 0.05);
        assert_relative_eq!(air.dynamic_pressure, 0.5 * 1.225 * 4900.0);
    }

    #[test]
    fn test_descending_raises_alpha() {
        let air = AirData::calculate(&Vector3::new(-70.0, -3.5, 0.0), 0.0);
        assert!(air.flight_path_angle < 0.0);
        assert_relative_eq!(air.alpha, (3.5f64 / 70.0).atan(), epsilon = 1e-12);
    }

    #[test]
    fn test_zero_speed_is_finite() {
        let air = AirData::calculate(&Vector3::new(0.0, -5.0, 0.0), 0.1);
        assert!(air.flight_path_angle.is_finite());
        assert!(air.alpha.is_finite());
        assert_relative_eq!(air.dynamic_pressure, 0.0);
    }
}
