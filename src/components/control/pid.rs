use serde::{Deserialize, Serialize};

use crate::resources::AugmentationConfig;
use crate::utils::{blend, clamp_output, slew_limit, MIN_CONFIG_VALUE};

/// Gains and integrator state of one axis controller.
///
/// Gains are re-derived every tick from the authority estimate and the
/// integral configuration; they are never fixed after construction.
#[derive(Debug, Clone, Copy, PartialEq, Default, Serialize, Deserialize)]
pub struct PidState {
    pub kp: f64,
    pub ki: f64,
    pub kd: f64,
    pub accumulator: f64,
    /// Error magnitude above which integration is throttled.
    pub integral_clamp: f64,
    /// Bound on `|accumulator|`.
    pub accumulator_clamp: f64,
    /// Bound on the accumulator's rate of change.
    pub accumulator_derivative_clamp: f64,
    /// Multiplier in [0, 1] applied to the error before integration.
    pub integral_gain: f64,
    /// Last applied output.
    pub last_output: f64,
}

/// Terms of the last control law evaluation, read by diagnostics.
#[derive(Debug, Clone, Copy, PartialEq, Default, Serialize, Deserialize)]
pub struct PidDebug {
    pub error: f64,
    pub proportional: f64,
    pub integral: f64,
    pub derivative: f64,
    /// Candidate output before slew and range limiting.
    pub raw_output: f64,
}

/// PID controller with authority-scaled gains, throttled integration and a
/// slew-limited output.
#[derive(Debug, Clone, PartialEq)]
pub struct AdaptivePid {
    state: PidState,
    debug: PidDebug,
}

impl AdaptivePid {
    /// Starts from the gains a unit authority would produce.
    pub fn new(config: &AugmentationConfig) -> Self {
        let kp = config.kp_koeff + config.kp_offset;
        Self {
            state: PidState {
                kp,
                kd: config.kp_kd_ratio * kp + config.kd_offset,
                integral_gain: 1.0,
                ..Default::default()
            },
            debug: PidDebug::default(),
        }
    }

    pub fn state(&self) -> &PidState {
        &self.state
    }

    pub fn debug(&self) -> &PidDebug {
        &self.debug
    }

    pub fn kp(&self) -> f64 {
        self.state.kp
    }

    pub fn ki(&self) -> f64 {
        self.state.ki
    }

    pub fn kd(&self) -> f64 {
        self.state.kd
    }

    pub fn accumulator(&self) -> f64 {
        self.state.accumulator
    }

    pub fn integral_gain(&self) -> f64 {
        self.state.integral_gain
    }

    pub fn last_output(&self) -> f64 {
        self.state.last_output
    }

    /// Blends KP and KD toward the values the current authority calls for.
    /// Returns false, leaving the gains untouched, when the authority is
    /// missing, non-finite or not above `min_authority`.
    pub fn adapt_gains(&mut self, authority: Option<f64>, config: &AugmentationConfig) -> bool {
        let Some(authority) = authority.filter(|a| a.is_finite() && *a > config.min_authority)
        else {
            return false;
        };

        let inertia = config.pid_coeff_inertia;
        let kp_target = config.kp_koeff / authority + config.kp_offset;
        self.state.kp = blend(self.state.kp, kp_target, inertia);
        let kd_target = config.kp_kd_ratio * self.state.kp + config.kd_offset;
        self.state.kd = blend(self.state.kd, kd_target, inertia);
        true
    }

    /// Re-derives the integral clamps, KI and the integral gain.
    ///
    /// The gain falls off linearly once `|error|` exceeds `small_value`, and
    /// again while the input is already moving toward the target at a rate
    /// approaching `small_value / integral_fill_time`, so integration is cut
    /// before an overshoot happens. Skipped when either setting is degenerate.
    pub fn adapt_integral(
        &mut self,
        error: f64,
        input_derivative: f64,
        config: &AugmentationConfig,
    ) -> bool {
        let small_value = config.small_value;
        let fill_time = config.integral_fill_time;
        if !(small_value > MIN_CONFIG_VALUE && fill_time > MIN_CONFIG_VALUE) {
            return false;
        }
        if !error.is_finite() || !input_derivative.is_finite() {
            return false;
        }

        self.state.integral_clamp = small_value;
        self.state.accumulator_clamp = small_value * fill_time;
        self.state.accumulator_derivative_clamp = self.state.accumulator_clamp / (3.0 * fill_time);
        self.state.ki = config.ki_koeff / self.state.accumulator_clamp;

        let magnitude = error.abs();
        let mut gain = if magnitude > small_value {
            1.0 - config.i_gain * (magnitude - small_value) / small_value
        } else {
            1.0
        };

        let reaction_derivative = small_value / fill_time;
        if input_derivative * error > 0.0 {
            gain *= 1.0 - config.i_overshoot_gain * input_derivative.abs() / reaction_derivative;
        }

        self.state.integral_gain = gain.clamp(0.0, 1.0);
        true
    }

    /// Evaluates `KP·e + KI·acc − KD·derivative_error`.
    ///
    /// With `integrate` set the accumulator first takes one clamped step.
    pub fn compute(&mut self, error: f64, derivative_error: f64, dt: f64, integrate: bool) -> f64 {
        if integrate && dt > 0.0 && error.is_finite() {
            let limit = self.state.accumulator_derivative_clamp;
            let rate = (error * self.state.integral_gain).clamp(-limit, limit);
            let bound = self.state.accumulator_clamp;
            self.state.accumulator = (self.state.accumulator + rate * dt).clamp(-bound, bound);
        }

        let proportional = self.state.kp * error;
        let integral = self.state.ki * self.state.accumulator;
        let derivative = -self.state.kd * derivative_error;
        let raw_output = proportional + integral + derivative;

        self.debug = PidDebug {
            error,
            proportional,
            integral,
            derivative,
            raw_output,
        };
        raw_output
    }

    /// Slew-limits `candidate` against the last applied output, clamps it to
    /// [-1, 1] and records it. A non-finite candidate repeats the last output.
    pub fn limit(&mut self, candidate: f64, dt: f64, max_output_deriv: f64) -> f64 {
        self.debug.raw_output = candidate;
        let previous = self.state.last_output;
        let output = if candidate.is_finite() {
            clamp_output(slew_limit(previous, candidate, max_output_deriv, dt))
        } else {
            previous
        };
        self.state.last_output = output;
        output
    }

    /// Records the output the host actually applied.
    pub fn record_applied(&mut self, applied: f64) {
        if applied.is_finite() {
            self.state.last_output = clamp_output(applied);
        }
    }

    pub fn scale_accumulator(&mut self, factor: f64) {
        self.state.accumulator *= factor.clamp(0.0, 1.0);
    }

    pub fn reset(&mut self, config: &AugmentationConfig) {
        *self = Self::new(config);
    }
}
