mod air_data;
mod force_calculator;

pub use air_data::{dynamic_pressure, AirData};
pub use force_calculator::{
    calculate_forces, drag_coefficient, lift_coefficient, required_alpha, thrust_fraction,
    trim_throttle, AeroForces,
};
