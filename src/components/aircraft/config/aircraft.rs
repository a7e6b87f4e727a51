use bevy::prelude::*;
use serde::{Deserialize, Serialize};
use std::path::{Path, PathBuf};

use crate::components::aircraft::config::{ConfigError, RawAircraftConfig};

/// Mass, geometry and aerodynamic parameters of the simulated aircraft.
#[derive(Component, Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct AircraftConfig {
    /// Name of the aircraft, defaults to type name.
    pub name: String,
    /// Mass (kg).
    pub mass: f64,
    /// Reference wing area (m²).
    pub wing_area: f64,
    /// Zero angle-of-attack lift coefficient (landing flaps).
    pub cl0: f64,
    /// Lift curve slope (1/rad).
    pub cl_alpha: f64,
    /// Angle of attack above which the wing stalls (rad).
    pub alpha_stall: f64,
    /// Fraction of lift retained once stalled.
    pub post_stall_factor: f64,
    /// Zero-lift drag coefficient.
    pub cd0: f64,
    /// Drag growth with |alpha| (1/rad).
    pub cd_alpha: f64,
    /// Total static thrust at full throttle (N).
    pub max_thrust: f64,
    /// Speed the autothrottle holds on approach (m/s).
    pub approach_speed: f64,
}

impl Default for AircraftConfig {
    /// The narrow-body configuration is chosen as the default for convenience.
    fn default() -> Self {
        Self::narrow_body()
    }
}

impl AircraftConfig {
    /// Creates a new aircraft configuration from a given source.
    pub fn new(source: AircraftSource) -> Result<Self, ConfigError> {
        match source {
            AircraftSource::Programmed(aircraft_type) => Ok(Self::from_programmed(aircraft_type)),
            AircraftSource::File(path) => Self::load(path),
        }
    }

    fn from_programmed(aircraft_type: AircraftType) -> Self {
        match aircraft_type {
            AircraftType::NarrowBody => Self::narrow_body(),
            AircraftType::Regional => Self::regional(),
            AircraftType::Custom(name) => Self {
                name,
                ..Self::narrow_body()
            },
        }
    }

    /// Twin-jet airliner in landing configuration.
    pub fn narrow_body() -> Self {
        Self {
            name: "NarrowBody".to_string(),
            mass: 60_000.0,
            wing_area: 122.6,
            cl0: 0.9,
            cl_alpha: 5.5,
            alpha_stall: 0.28,
            post_stall_factor: 0.6,
            cd0: 0.05,
            cd_alpha: 0.3,
            max_thrust: 80_000.0,
            approach_speed: 72.0,
        }
    }

    /// Regional turboprop in landing configuration.
    pub fn regional() -> Self {
        Self {
            name: "Regional".to_string(),
            mass: 21_000.0,
            wing_area: 61.0,
            cl0: 0.9,
            cl_alpha: 5.2,
            alpha_stall: 0.26,
            post_stall_factor: 0.6,
            cd0: 0.06,
            cd_alpha: 0.3,
            max_thrust: 32_000.0,
            approach_speed: 62.0,
        }
    }

    /// Reads and validates a YAML parameter file.
    pub fn load<P: AsRef<Path>>(path: P) -> Result<Self, ConfigError> {
        let file_contents = std::fs::read_to_string(path)?;
        Self::from_yaml_str(&file_contents)
    }

    pub fn from_yaml_str(contents: &str) -> Result<Self, ConfigError> {
        let raw: RawAircraftConfig = serde_yaml::from_str(contents)?;
        Self::from_raw_config(raw)
    }

    fn from_raw_config(raw: RawAircraftConfig) -> Result<Self, ConfigError> {
        let config = Self {
            name: raw.name,
            mass: raw.mass,
            wing_area: raw.wing_area,
            cl0: raw.c_L_0,
            cl_alpha: raw.c_L_alpha,
            alpha_stall: raw.alpha_stall,
            post_stall_factor: raw.post_stall_factor,
            cd0: raw.c_D_0,
            cd_alpha: raw.c_D_alpha,
            max_thrust: raw.max_thrust,
            approach_speed: raw.approach_speed,
        };
        config.validate()?;
        Ok(config)
    }

    /// Rejects parameter sets that would make the force model divide by zero or diverge.
    pub fn validate(&self) -> Result<(), ConfigError> {
        let positive = [
            ("mass", self.mass),
            ("wing_area", self.wing_area),
            ("c_L_alpha", self.cl_alpha),
            ("alpha_stall", self.alpha_stall),
            ("max_thrust", self.max_thrust),
            ("approach_speed", self.approach_speed),
        ];
        for (name, value) in positive {
            if !value.is_finite() || value <= 0.0 {
                return Err(ConfigError::ValidationError(format!(
                    "{} must be positive and finite, got {}",
                    name, value
                )));
            }
        }

        let non_negative = [("c_D_0", self.cd0), ("c_D_alpha", self.cd_alpha)];
        for (name, value) in non_negative {
            if !value.is_finite() || value < 0.0 {
                return Err(ConfigError::ValidationError(format!(
                    "{} must be non-negative and finite, got {}",
                    name, value
                )));
            }
        }

        if !self.cl0.is_finite() {
            return Err(ConfigError::ValidationError("c_L_0 must be finite".into()));
        }

        if !(0.0..=1.0).contains(&self.post_stall_factor) {
            return Err(ConfigError::ValidationError(format!(
                "post_stall_factor must lie in [0, 1], got {}",
                self.post_stall_factor
            )));
        }

        Ok(())
    }
}

/// Source for aircraft configuration.
/// Can either be a hardcoded configuration (`Programmed`) or loaded from a file.
#[derive(Debug, Clone)]
pub enum AircraftSource {
    Programmed(AircraftType),
    File(PathBuf),
}

/// Enumeration of available aircraft types.
#[derive(Debug, Clone, Deserialize, Serialize, Hash, PartialEq, Eq)]
pub enum AircraftType {
    NarrowBody,
    Regional,
    Custom(String),
}
