mod autopilot;

pub use autopilot::{
    apply_autopilot, apply_lateral_alignment, approach, compute_command, desired_altitude,
    level_wings, throttle_ceiling, AutopilotCommand,
};
