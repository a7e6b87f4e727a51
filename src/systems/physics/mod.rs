mod integrator;
mod perturbation;

pub use integrator::{clamp_delta, ground_speed, integrate, wrap_angle};
pub use perturbation::{apply_bird_strike, apply_turbulence, decay_shake};
