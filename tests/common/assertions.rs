use flyer_augment::components::ControlSurfaceCommand;
use flyer_augment::utils::{Axis, PerAxis};

/// Assert that every command is finite and within the actuation range
#[track_caller]
pub fn assert_outputs_valid(outputs: &PerAxis<f64>) {
    for axis in Axis::ALL {
        let value = outputs[axis];
        assert!(value.is_finite(), "{} command is not finite", axis);
        assert!(
            (-1.0..=1.0).contains(&value),
            "{} command {} outside [-1, 1]",
            axis,
            value
        );
    }
}

#[track_caller]
pub fn assert_command_valid(command: &ControlSurfaceCommand) {
    assert_outputs_valid(&command.applied);
}

/// Assert that the peak magnitude of `series` strictly shrinks from one
/// window of `window` samples to the next.
#[track_caller]
pub fn assert_envelope_decays(series: &[f64], window: usize) {
    let peaks: Vec<f64> = series
        .chunks(window)
        .filter(|chunk| chunk.len() == window)
        .map(|chunk| chunk.iter().fold(0.0_f64, |peak, value| peak.max(value.abs())))
        .collect();

    assert!(peaks.len() >= 2, "Need at least two full windows");
    for pair in peaks.windows(2) {
        assert!(
            pair[1] < pair[0],
            "Command envelope grew from {:e} to {:e}",
            pair[0],
            pair[1]
        );
    }
}
