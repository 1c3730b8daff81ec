use bevy::prelude::*;
use serde::{Deserialize, Serialize};
use std::path::Path;

use crate::utils::*;

/// Whether a parameter is a real value or a count stored as `usize`.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum ParameterKind {
    Real,
    Count,
}

/// Static description of one tunable key, shared by persistence and any
/// introspection front end.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct ParameterSpec {
    pub name: &'static str,
    pub default: f64,
    pub min: f64,
    pub max: f64,
    pub kind: ParameterKind,
    /// Only read when the augmentation is (re)started.
    pub structural: bool,
}

impl ParameterSpec {
    const fn real(name: &'static str, default: f64, min: f64, max: f64) -> Self {
        Self {
            name,
            default,
            min,
            max,
            kind: ParameterKind::Real,
            structural: false,
        }
    }

    const fn count(name: &'static str, default: usize, min: f64, max: f64) -> Self {
        Self {
            name,
            default: default as f64,
            min,
            max,
            kind: ParameterKind::Count,
            structural: true,
        }
    }

    /// Checks a candidate value against finiteness and bounds.
    pub fn validate(&self, value: f64) -> Result<(), AugmentError> {
        if !value.is_finite() {
            return Err(AugmentError::NonFinite {
                name: self.name.to_string(),
                value,
            });
        }
        if value < self.min || value > self.max {
            return Err(AugmentError::OutOfBounds {
                name: self.name.to_string(),
                value,
                min: self.min,
                max: self.max,
            });
        }
        Ok(())
    }
}

/// Every tunable key with its default and accepted range.
pub const PARAMETERS: &[ParameterSpec] = &[
    ParameterSpec::real("max_output_deriv", DEFAULT_MAX_OUTPUT_DERIV, 0.0, 1000.0),
    ParameterSpec::real("user_dampening", DEFAULT_USER_DAMPENING, 0.0, 100.0),
    ParameterSpec::real("pid_coeff_inertia", DEFAULT_PID_COEFF_INERTIA, 0.0, 1000.0),
    ParameterSpec::real("ki_koeff", DEFAULT_KI_KOEFF, 0.0, 100.0),
    ParameterSpec::real("kp_kd_ratio", DEFAULT_KP_KD_RATIO, 0.0, 100.0),
    ParameterSpec::real("kd_offset", DEFAULT_KD_OFFSET, -100.0, 100.0),
    ParameterSpec::real("kp_koeff", DEFAULT_KP_KOEFF, 0.0, 100.0),
    ParameterSpec::real("kp_offset", DEFAULT_KP_OFFSET, -100.0, 100.0),
    ParameterSpec::real("small_value", DEFAULT_SMALL_VALUE, 0.0, 1000.0),
    ParameterSpec::real("integral_fill_time", DEFAULT_INTEGRAL_FILL_TIME, 0.0, 100.0),
    ParameterSpec::real("i_gain", DEFAULT_I_GAIN, 0.0, 100.0),
    ParameterSpec::real("i_overshoot_gain", DEFAULT_I_OVERSHOOT_GAIN, 0.0, 100.0),
    ParameterSpec::real("min_authority", DEFAULT_MIN_AUTHORITY, 0.0, 1000.0),
    ParameterSpec::real("authority_inertia", DEFAULT_AUTHORITY_INERTIA, 0.0, 1000.0),
    ParameterSpec::real("handoff_aoa_window", DEFAULT_HANDOFF_AOA_WINDOW, 0.0, 10.0),
    ParameterSpec::real("handoff_speed_window", DEFAULT_HANDOFF_SPEED_WINDOW, 0.0, 10000.0),
    ParameterSpec::real("max_angular_accel", DEFAULT_MAX_ANGULAR_ACCEL, 0.0, 1000.0),
    ParameterSpec::real("max_angular_jerk", DEFAULT_MAX_ANGULAR_JERK, 0.0, 1000.0),
    ParameterSpec::count("history_capacity", DEFAULT_HISTORY_CAPACITY, 2.0, 1024.0),
    ParameterSpec::count("dominant_mass_cap", DEFAULT_DOMINANT_MASS_CAP, 1.0, 4096.0),
    ParameterSpec::count("full_recompute_interval", DEFAULT_FULL_RECOMPUTE_INTERVAL, 1.0, 100_000.0),
];

/// Looks up a key in [`PARAMETERS`].
pub fn parameter(name: &str) -> Option<&'static ParameterSpec> {
    PARAMETERS.iter().find(|spec| spec.name == name)
}

/// Tuning for the flight augmentation. One instance is shared as a resource
/// and copied into every vessel when it changes.
#[derive(Resource, Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct AugmentationConfig {
    /// Maximum actuator slew rate, normalised units per second
    pub max_output_deriv: f64,
    /// Rate damping added to pilot input while flying manually
    pub user_dampening: f64,
    /// Smoothing of gain adaptation, in ticks
    pub pid_coeff_inertia: f64,
    pub ki_koeff: f64,
    pub kp_kd_ratio: f64,
    pub kd_offset: f64,
    pub kp_koeff: f64,
    pub kp_offset: f64,
    /// Error magnitude above which the integral term is wound down
    pub small_value: f64,
    /// Time for the accumulator to fill at `small_value` error
    pub integral_fill_time: f64,
    pub i_gain: f64,
    pub i_overshoot_gain: f64,

    /// Authority below which gains are held
    pub min_authority: f64,
    /// Smoothing of the online authority estimate, in samples
    pub authority_inertia: f64,
    /// Angle-of-attack drift that fully discards the accumulator on handoff
    pub handoff_aoa_window: f64,
    /// Airspeed drift that fully discards the accumulator on handoff
    pub handoff_speed_window: f64,
    pub max_angular_accel: f64,
    pub max_angular_jerk: f64,

    pub history_capacity: usize,
    pub dominant_mass_cap: usize,
    pub full_recompute_interval: usize,
}

impl Default for AugmentationConfig {
    fn default() -> Self {
        Self {
            max_output_deriv: DEFAULT_MAX_OUTPUT_DERIV,
            user_dampening: DEFAULT_USER_DAMPENING,
            pid_coeff_inertia: DEFAULT_PID_COEFF_INERTIA,
            ki_koeff: DEFAULT_KI_KOEFF,
            kp_kd_ratio: DEFAULT_KP_KD_RATIO,
            kd_offset: DEFAULT_KD_OFFSET,
            kp_koeff: DEFAULT_KP_KOEFF,
            kp_offset: DEFAULT_KP_OFFSET,
            small_value: DEFAULT_SMALL_VALUE,
            integral_fill_time: DEFAULT_INTEGRAL_FILL_TIME,
            i_gain: DEFAULT_I_GAIN,
            i_overshoot_gain: DEFAULT_I_OVERSHOOT_GAIN,
            min_authority: DEFAULT_MIN_AUTHORITY,
            authority_inertia: DEFAULT_AUTHORITY_INERTIA,
            handoff_aoa_window: DEFAULT_HANDOFF_AOA_WINDOW,
            handoff_speed_window: DEFAULT_HANDOFF_SPEED_WINDOW,
            max_angular_accel: DEFAULT_MAX_ANGULAR_ACCEL,
            max_angular_jerk: DEFAULT_MAX_ANGULAR_JERK,
            history_capacity: DEFAULT_HISTORY_CAPACITY,
            dominant_mass_cap: DEFAULT_DOMINANT_MASS_CAP,
            full_recompute_interval: DEFAULT_FULL_RECOMPUTE_INTERVAL,
        }
    }
}

impl AugmentationConfig {
    /// Reads a parameter by key.
    pub fn get(&self, name: &str) -> Result<f64, AugmentError> {
        let value = match name {
            "max_output_deriv" => self.max_output_deriv,
            "user_dampening" => self.user_dampening,
            "pid_coeff_inertia" => self.pid_coeff_inertia,
            "ki_koeff" => self.ki_koeff,
            "kp_kd_ratio" => self.kp_kd_ratio,
            "kd_offset" => self.kd_offset,
            "kp_koeff" => self.kp_koeff,
            "kp_offset" => self.kp_offset,
            "small_value" => self.small_value,
            "integral_fill_time" => self.integral_fill_time,
            "i_gain" => self.i_gain,
            "i_overshoot_gain" => self.i_overshoot_gain,
            "min_authority" => self.min_authority,
            "authority_inertia" => self.authority_inertia,
            "handoff_aoa_window" => self.handoff_aoa_window,
            "handoff_speed_window" => self.handoff_speed_window,
            "max_angular_accel" => self.max_angular_accel,
            "max_angular_jerk" => self.max_angular_jerk,
            "history_capacity" => self.history_capacity as f64,
            "dominant_mass_cap" => self.dominant_mass_cap as f64,
            "full_recompute_interval" => self.full_recompute_interval as f64,
            _ => return Err(AugmentError::UnknownParameter(name.to_string())),
        };
        Ok(value)
    }

    /// Writes a parameter by key after validating it. Count parameters are
    /// rounded to the nearest integer. On error the config is unchanged.
    pub fn set(&mut self, name: &str, value: f64) -> Result<(), AugmentError> {
        let spec = parameter(name).ok_or_else(|| AugmentError::UnknownParameter(name.to_string()))?;
        spec.validate(value)?;
        let count = value.round() as usize;

        match name {
            "max_output_deriv" => self.max_output_deriv = value,
            "user_dampening" => self.user_dampening = value,
            "pid_coeff_inertia" => self.pid_coeff_inertia = value,
            "ki_koeff" => self.ki_koeff = value,
            "kp_kd_ratio" => self.kp_kd_ratio = value,
            "kd_offset" => self.kd_offset = value,
            "kp_koeff" => self.kp_koeff = value,
            "kp_offset" => self.kp_offset = value,
            "small_value" => self.small_value = value,
            "integral_fill_time" => self.integral_fill_time = value,
            "i_gain" => self.i_gain = value,
            "i_overshoot_gain" => self.i_overshoot_gain = value,
            "min_authority" => self.min_authority = value,
            "authority_inertia" => self.authority_inertia = value,
            "handoff_aoa_window" => self.handoff_aoa_window = value,
            "handoff_speed_window" => self.handoff_speed_window = value,
            "max_angular_accel" => self.max_angular_accel = value,
            "max_angular_jerk" => self.max_angular_jerk = value,
            "history_capacity" => self.history_capacity = count,
            "dominant_mass_cap" => self.dominant_mass_cap = count,
            "full_recompute_interval" => self.full_recompute_interval = count,
            _ => return Err(AugmentError::UnknownParameter(name.to_string())),
        }
        Ok(())
    }

    /// Checks every parameter against [`PARAMETERS`].
    pub fn validate(&self) -> Result<(), AugmentError> {
        for spec in PARAMETERS {
            spec.validate(self.get(spec.name)?)?;
        }
        Ok(())
    }

    /// Whether any key that only applies on restart differs from `other`.
    pub fn structural_differs(&self, other: &Self) -> bool {
        self.history_capacity != other.history_capacity
            || self.dominant_mass_cap != other.dominant_mass_cap
            || self.full_recompute_interval != other.full_recompute_interval
    }

    pub fn from_yaml_str(yaml: &str) -> Result<Self, AugmentError> {
        let config: Self = serde_yaml::from_str(yaml)?;
        config.validate()?;
        Ok(config)
    }

    pub fn to_yaml_string(&self) -> Result<String, AugmentError> {
        Ok(serde_yaml::to_string(self)?)
    }

    /// Loads a YAML file. Missing keys take their defaults.
    pub fn from_file<P: AsRef<Path>>(path: P) -> Result<Self, AugmentError> {
        let file_contents = std::fs::read_to_string(path)?;
        Self::from_yaml_str(&file_contents)
    }

    pub fn save_to_file<P: AsRef<Path>>(&self, path: P) -> Result<(), AugmentError> {
        std::fs::write(path, self.to_yaml_string()?)?;
        Ok(())
    }
}
