use bevy::prelude::*;
use serde::{Deserialize, Serialize};
use std::path::Path;

use crate::components::{AircraftConfig, ConfigError, InitialConditions};
use crate::resources::EnvironmentConfig;

/// Tick rate and seeding for the landing plugin.
#[derive(Resource, Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct SimulationSettings {
    /// Length of one fixed simulation tick (s).
    pub timestep: f64,
    pub seed: Option<u64>,
}

impl Default for SimulationSettings {
    fn default() -> Self {
        Self {
            timestep: 1.0 / 60.0, // 60 Hz simulation rate
            seed: None,
        }
    }
}

impl SimulationSettings {
    /// The configured timestep, or the default when it is not a positive finite value.
    pub fn fixed_timestep(&self) -> f64 {
        if self.timestep.is_finite() && self.timestep > 0.0 {
            self.timestep
        } else {
            warn!("Invalid timestep {}, using default", self.timestep);
            Self::default().timestep
        }
    }
}

/// Operator action injected at a given simulation time.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum ScriptedAction {
    BirdStrike,
    ManualDeploy,
}

#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct ScriptedEvent {
    /// Simulation time at which the action fires (s).
    pub at: f64,
    pub action: ScriptedAction,
}

/// A complete scenario for the headless runner.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct ScenarioConfig {
    pub initial: InitialConditions,
    pub environment: EnvironmentConfig,
    pub aircraft: AircraftConfig,
    pub script: Vec<ScriptedEvent>,
    pub seed: Option<u64>,
    /// Tick length (s).
    pub delta: f64,
    /// Simulated time after which the run is abandoned (s).
    pub max_duration: f64,
    /// Emit telemetry every this many ticks.
    pub report_every: usize,
}

impl Default for ScenarioConfig {
    fn default() -> Self {
        Self {
            initial: InitialConditions::default(),
            environment: EnvironmentConfig::default(),
            aircraft: AircraftConfig::default(),
            script: Vec::new(),
            seed: Some(42),
            delta: 1.0 / 60.0,
            max_duration: 300.0,
            report_every: 60,
        }
    }
}

impl ScenarioConfig {
    pub fn load<P: AsRef<Path>>(path: P) -> Result<Self, ConfigError> {
        let file = std::fs::File::open(path)?;
        let config: Self = serde_yaml::from_reader(file)?;
        config.validate()?;
        Ok(config)
    }

    pub fn save<P: AsRef<Path>>(&self, path: P) -> Result<(), ConfigError> {
        let file = std::fs::File::create(path)?;
        serde_yaml::to_writer(file, self)?;
        Ok(())
    }

    pub fn validate(&self) -> Result<(), ConfigError> {
        self.aircraft.validate()?;
        if !self.delta.is_finite() || self.delta <= 0.0 {
            return Err(ConfigError::ValidationError(format!(
                "delta must be positive, got {}",
                self.delta
            )));
        }
        if !self.max_duration.is_finite() || self.max_duration <= 0.0 {
            return Err(ConfigError::ValidationError(format!(
                "max_duration must be positive, got {}",
                self.max_duration
            )));
        }
        Ok(())
    }

    /// Settings for driving this scenario through the bevy plugin.
    pub fn settings(&self) -> SimulationSettings {
        SimulationSettings {
            timestep: self.delta,
            seed: self.seed,
        }
    }
}
