// Default tuning values, mirrored by the parameter table in `resources::config`.
pub const DEFAULT_MAX_OUTPUT_DERIV: f64 = 10.0; // 1/s
pub const DEFAULT_USER_DAMPENING: f64 = 1.0;
pub const DEFAULT_PID_COEFF_INERTIA: f64 = 15.0;
pub const DEFAULT_KI_KOEFF: f64 = 0.8;
pub const DEFAULT_KP_KD_RATIO: f64 = 0.33;
pub const DEFAULT_KD_OFFSET: f64 = 0.0;
pub const DEFAULT_KP_KOEFF: f64 = 0.75;
pub const DEFAULT_KP_OFFSET: f64 = 0.0;
pub const DEFAULT_SMALL_VALUE: f64 = 10.0;
pub const DEFAULT_INTEGRAL_FILL_TIME: f64 = 0.1; // s
pub const DEFAULT_I_GAIN: f64 = 1.0;
pub const DEFAULT_I_OVERSHOOT_GAIN: f64 = 1.0;
pub const DEFAULT_MIN_AUTHORITY: f64 = 0.05;
pub const DEFAULT_AUTHORITY_INERTIA: f64 = 10.0;
pub const DEFAULT_HANDOFF_AOA_WINDOW: f64 = 0.05; // rad
pub const DEFAULT_HANDOFF_SPEED_WINDOW: f64 = 50.0; // m/s
pub const DEFAULT_MAX_ANGULAR_ACCEL: f64 = 1.0; // rad/s^2
pub const DEFAULT_MAX_ANGULAR_JERK: f64 = 2.0; // rad/s^3

pub const DEFAULT_HISTORY_CAPACITY: usize = 8;
pub const DEFAULT_DOMINANT_MASS_CAP: usize = 20;
pub const DEFAULT_FULL_RECOMPUTE_INTERVAL: usize = 40; // ticks

// Numeric guards
pub const MIN_AXIS_INERTIA: f64 = 1e-9; // kg·m²
pub const MIN_BODY_MASS: f64 = 1e-9; // kg
pub const MIN_AOA_SPEED_SQUARED: f64 = 1.0; // (m/s)^2
pub const MIN_CONFIG_VALUE: f64 = 1e-3;
pub const MIN_AUTHORITY_INPUT_STEP: f64 = 0.005;
pub const INPUT_DEADBAND: f64 = 1e-6;

// Actuation range
pub const MIN_OUTPUT: f64 = -1.0;
pub const MAX_OUTPUT: f64 = 1.0;
