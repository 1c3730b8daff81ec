use crate::utils::{blend, SampleHistory, MIN_AUTHORITY_INPUT_STEP};

/// Online estimate of control authority: angular acceleration gained per unit
/// of applied control input.
#[derive(Debug, Clone, Copy, PartialEq, Default)]
pub struct AuthorityEstimator {
    estimate: Option<f64>,
}

impl AuthorityEstimator {
    pub fn new() -> Self {
        Self::default()
    }

    /// Folds in the latest input/acceleration pair.
    ///
    /// `input` holds applied commands captured after each tick, so its last
    /// entry is the command that produced the last entry of `acceleration`.
    /// Only input steps above `MIN_AUTHORITY_INPUT_STEP` yielding a finite,
    /// positive ratio are used.
    pub fn observe(&mut self, input: &SampleHistory, acceleration: &SampleHistory, inertia: f64) {
        if input.size() < 2 || acceleration.size() < 2 {
            return;
        }

        let input_step = input.last() - input.from_tail(1);
        if input_step.abs() <= MIN_AUTHORITY_INPUT_STEP {
            return;
        }

        let sample = (acceleration.last() - acceleration.from_tail(1)) / input_step;
        if !sample.is_finite() || sample <= 0.0 {
            return;
        }

        self.estimate = Some(match self.estimate {
            Some(previous) => blend(previous, sample, inertia),
            None => sample,
        });
    }

    pub fn estimate(&self) -> Option<f64> {
        self.estimate
    }

    pub fn reset(&mut self) {
        self.estimate = None;
    }
}
