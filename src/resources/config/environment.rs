use bevy::prelude::*;
use serde::{Deserialize, Serialize};

use crate::constants::{kt_to_ms, MAX_WIND_SPEED_KT};

/// Single-shot operator requests waiting to be consumed by the next tick.
///
/// Setting a request that is already pending does nothing: several writes
/// between two ticks form a single rising edge.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
pub struct PendingRequests {
    pub bird_strike: bool,
    pub manual_deploy: bool,
}

impl PendingRequests {
    pub fn is_empty(&self) -> bool {
        !self.bird_strike && !self.manual_deploy
    }
}

/// Operator-settable conditions, written by the control surface and read by the tick.
#[derive(Resource, Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct EnvironmentConfig {
    /// Wind speed (knots, >= 0).
    pub wind_speed_kt: f64,
    /// Wind direction relative to the runway heading (degrees, [0, 360)); 0 is a headwind.
    pub wind_direction_deg: f64,
    pub turbulence: bool,
    pub icing: bool,
    pub gear_failure: bool,
    pub throttle_failure: bool,
    /// Enables the lateral alignment loop and the automatic risk evaluator.
    pub ai_assist: bool,
    /// Enables the pitch autopilot and autothrottle.
    pub autopilot: bool,
    #[serde(skip)]
    pub requests: PendingRequests,
}

impl Default for EnvironmentConfig {
    fn default() -> Self {
        Self {
            wind_speed_kt: 0.0,
            wind_direction_deg: 0.0,
            turbulence: false,
            icing: false,
            gear_failure: false,
            throttle_failure: false,
            ai_assist: true,
            autopilot: true,
            requests: PendingRequests::default(),
        }
    }
}

impl EnvironmentConfig {
    /// Calm air, no failures, both automation layers on.
    pub fn nominal() -> Self {
        Self::default()
    }

    pub fn request_bird_strike(&mut self) {
        self.requests.bird_strike = true;
    }

    pub fn request_manual_deploy(&mut self) {
        self.requests.manual_deploy = true;
    }

    /// Consumes every pending request, leaving none behind.
    pub fn take_requests(&mut self) -> PendingRequests {
        std::mem::take(&mut self.requests)
    }

    /// Copies the configuration with every numeric field clamped into its valid range.
    pub fn snapshot(&self) -> EnvironmentSnapshot {
        let wind_speed_kt = if self.wind_speed_kt.is_finite() {
            self.wind_speed_kt.clamp(0.0, MAX_WIND_SPEED_KT)
        } else {
            0.0
        };
        let wind_direction_deg = if self.wind_direction_deg.is_finite() {
            self.wind_direction_deg.rem_euclid(360.0)
        } else {
            0.0
        };

        EnvironmentSnapshot {
            // rem_euclid can round up to exactly 360 for tiny negative inputs
            wind_direction_deg: if wind_direction_deg >= 360.0 {
                0.0
            } else {
                wind_direction_deg
            },
            wind_speed_kt,
            turbulence: self.turbulence,
            icing: self.icing,
            gear_failure: self.gear_failure,
            throttle_failure: self.throttle_failure,
            ai_assist: self.ai_assist,
            autopilot: self.autopilot,
        }
    }
}

/// Sanitised, immutable view of [`EnvironmentConfig`] taken once per tick.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct EnvironmentSnapshot {
    pub wind_speed_kt: f64,
    pub wind_direction_deg: f64,
    pub turbulence: bool,
    pub icing: bool,
    pub gear_failure: bool,
    pub throttle_failure: bool,
    pub ai_assist: bool,
    pub autopilot: bool,
}

impl Default for EnvironmentSnapshot {
    fn default() -> Self {
        EnvironmentConfig::default().snapshot()
    }
}

impl EnvironmentSnapshot {
    /// Wind component across the runway, positive toward +z (m/s).
    pub fn crosswind_ms(&self) -> f64 {
        self.wind_direction_deg.to_radians().sin() * kt_to_ms(self.wind_speed_kt)
    }

    /// Wind component against the direction of travel (m/s).
    pub fn headwind_ms(&self) -> f64 {
        self.wind_direction_deg.to_radians().cos() * kt_to_ms(self.wind_speed_kt)
    }
}
