use serde::Deserialize;
use thiserror::Error;

#[derive(Error, Debug)]
pub enum ConfigError {
    #[error("Failed to read config file: {0}")]
    FileError(#[from] std::io::Error),
    #[error("Failed to parse YAML: {0}")]
    YamlError(#[from] serde_yaml::Error),
    #[error("Invalid aircraft configuration: {0}")]
    ValidationError(String),
}

/// Flat YAML layout of an aircraft parameter file.
#[allow(non_snake_case)]
#[derive(Debug, Deserialize)]
pub struct RawAircraftConfig {
    /// Aircraft identification
    pub name: String,

    /// Mass properties
    pub mass: f64,

    /// Geometry
    pub wing_area: f64,

    /// Lift coefficients
    pub c_L_0: f64,
    pub c_L_alpha: f64,
    #[serde(default = "default_stall_alpha")]
    pub alpha_stall: f64,
    #[serde(default = "default_post_stall_factor")]
    pub post_stall_factor: f64,

    /// Drag coefficients
    pub c_D_0: f64,
    pub c_D_alpha: f64,

    /// Propulsion
    pub max_thrust: f64,

    /// Target approach speed (m/s)
    pub approach_speed: f64,
}

fn default_stall_alpha() -> f64 {
    0.28
}

fn default_post_stall_factor() -> f64 {
    0.6
}
