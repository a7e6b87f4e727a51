use bevy::prelude::*;
use nalgebra::Vector3;
use serde::{Deserialize, Serialize};
use std::fmt;

use crate::components::PidState;

/// Discrete landing phases.
///
/// Phases only move forward; `Stopped` and `Crashed` absorb the run until a reset.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum LandingPhase {
    Approaching,
    Flaring,
    Touchdown,
    EmergencyDescent,
    Rolling,
    Stopped,
    Crashed,
}

impl LandingPhase {
    /// True while the aircraft has not yet made ground contact.
    pub fn is_airborne(self) -> bool {
        matches!(
            self,
            LandingPhase::Approaching | LandingPhase::Flaring | LandingPhase::EmergencyDescent
        )
    }

    pub fn is_terminal(self) -> bool {
        matches!(self, LandingPhase::Stopped | LandingPhase::Crashed)
    }

    /// Position of the phase along the forward-only progression.
    ///
    /// Emergency descent shares a rank with touchdown: both are reached from the
    /// airborne phases and both lead to rolling.
    pub fn order(self) -> u8 {
        match self {
            LandingPhase::Approaching => 0,
            LandingPhase::Flaring => 1,
            LandingPhase::Touchdown | LandingPhase::EmergencyDescent => 2,
            LandingPhase::Rolling => 3,
            LandingPhase::Stopped | LandingPhase::Crashed => 4,
        }
    }
}

impl fmt::Display for LandingPhase {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let name = match self {
            LandingPhase::Approaching => "approaching",
            LandingPhase::Flaring => "flaring",
            LandingPhase::Touchdown => "touchdown",
            LandingPhase::EmergencyDescent => "emergency_descent",
            LandingPhase::Rolling => "rolling",
            LandingPhase::Stopped => "stopped",
            LandingPhase::Crashed => "crashed",
        };
        f.write_str(name)
    }
}

/// Aircraft attitude in radians.
#[derive(Debug, Clone, Copy, PartialEq, Default, Serialize, Deserialize)]
pub struct Attitude {
    pub pitch: f64,
    pub roll: f64,
    pub yaw: f64,
}

impl Attitude {
    pub fn new(pitch: f64, roll: f64, yaw: f64) -> Self {
        Self { pitch, roll, yaw }
    }
}

/// Control surface deflection commands, normalised to [-1, 1].
///
/// Purely informational: the renderer polls these to animate the surfaces.
#[derive(Debug, Clone, Copy, PartialEq, Default, Serialize, Deserialize)]
pub struct ControlSurfaceCommand {
    pub aileron: f64,
    pub elevator: f64,
    pub rudder: f64,
}

impl ControlSurfaceCommand {
    pub fn neutral() -> Self {
        Self::default()
    }
}

/// Conditions recorded at the moment of ground contact.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct TouchdownReport {
    /// Ground speed at contact (knots).
    pub ground_speed_kt: f64,
    /// Sink rate at contact (m/s, positive down).
    pub sink_rate: f64,
    /// Longitudinal position of contact (m).
    pub position_x: f64,
    /// Whether the cushion absorbed the landing.
    pub cushioned: bool,
}

/// Fixed starting conditions for a run.
#[derive(Resource, Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct InitialConditions {
    pub position: Vector3<f64>,
    pub velocity: Vector3<f64>,
    pub pitch: f64,
    pub throttle: f64,
}

impl Default for InitialConditions {
    /// On a three degree glideslope, 4.5 km out at 250 m and 144 kt.
    fn default() -> Self {
        Self {
            position: Vector3::new(4500.0, 250.0, 0.0),
            velocity: Vector3::new(-74.0, -3.9, 0.0),
            pitch: 0.045,
            throttle: 0.40,
        }
    }
}

/// Complete mutable state of the simulated aircraft.
#[derive(Component, Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct AircraftState {
    /// Position (longitudinal, vertical, lateral) in metres.
    pub position: Vector3<f64>,
    /// Air-relative velocity along the position axes (m/s).
    pub velocity: Vector3<f64>,
    pub attitude: Attitude,
    /// Throttle lever in [0, 1].
    pub throttle: f64,
    /// Structural damage in [0, 1]; never decreases within a run.
    pub damage: f64,
    /// Ground speed during rollout (m/s).
    pub roll_speed: f64,
    pub phase: LandingPhase,
    /// Latched once the emergency cushion fires.
    pub cushion_deployed: bool,
    pub controls: ControlSurfaceCommand,
    /// Lateral alignment loop accumulators.
    pub lateral_pid: PidState,
    /// Simulated seconds since the run started.
    pub elapsed: f64,
    /// Camera shake intensity for the presentation layer.
    pub camera_shake: f64,
    pub touchdown: Option<TouchdownReport>,
}

impl Default for AircraftState {
    fn default() -> Self {
        Self::from_initial(&InitialConditions::default())
    }
}

impl AircraftState {
    pub fn from_initial(initial: &InitialConditions) -> Self {
        Self {
            position: initial.position,
            velocity: initial.velocity,
            attitude: Attitude::new(initial.pitch, 0.0, 0.0),
            throttle: initial.throttle.clamp(0.0, 1.0),
            damage: 0.0,
            roll_speed: 0.0,
            phase: LandingPhase::Approaching,
            cushion_deployed: false,
            controls: ControlSurfaceCommand::neutral(),
            lateral_pid: PidState::default(),
            elapsed: 0.0,
            camera_shake: 0.0,
            touchdown: None,
        }
    }

    /// Altitude above the runway surface (m).
    pub fn altitude(&self) -> f64 {
        self.position.y
    }

    /// Magnitude of the longitudinal air-relative speed (m/s).
    pub fn airspeed(&self) -> f64 {
        self.velocity.x.abs()
    }

    /// Adds damage, keeping it monotonic and within range.
    pub fn add_damage(&mut self, amount: f64) {
        if amount.is_finite() && amount > 0.0 {
            self.damage = (self.damage + amount).min(crate::constants::MAX_DAMAGE);
        }
    }

    /// Raises damage to at least `level`.
    pub fn raise_damage_to(&mut self, level: f64) {
        if level > self.damage {
            self.damage = level.min(crate::constants::MAX_DAMAGE);
        }
    }

    /// Control effectiveness remaining after damage.
    pub fn authority(&self) -> f64 {
        use crate::constants::{AUTHORITY_DAMAGE_SLOPE, AUTHORITY_FLOOR};
        (1.0 - self.damage * AUTHORITY_DAMAGE_SLOPE).clamp(AUTHORITY_FLOOR, 1.0)
    }

    /// True if every continuous field is finite.
    pub fn is_finite(&self) -> bool {
        self.position.iter().all(|v| v.is_finite())
            && self.velocity.iter().all(|v| v.is_finite())
            && self.attitude.pitch.is_finite()
            && self.attitude.roll.is_finite()
            && self.attitude.yaw.is_finite()
            && self.throttle.is_finite()
            && self.damage.is_finite()
            && self.roll_speed.is_finite()
    }
}
