use nalgebra::{Matrix3, UnitQuaternion, Vector3};

use crate::utils::constants::{MAX_OUTPUT, MIN_OUTPUT};

/// Exponential smoothing step: moves `old` a `1/inertia` fraction toward `new`.
///
/// Inertia below 1 would overshoot, so it is treated as 1 (an instantaneous snap).
#[inline]
pub fn blend(old: f64, new: f64, inertia: f64) -> f64 {
    old + (new - old) / inertia.max(1.0)
}

/// Clamp a control command into the normalised actuation range.
#[inline]
pub fn clamp_output(value: f64) -> f64 {
    value.clamp(MIN_OUTPUT, MAX_OUTPUT)
}

/// Limit the step from `previous` to `candidate` to `max_rate * dt`.
pub fn slew_limit(previous: f64, candidate: f64, max_rate: f64, dt: f64) -> f64 {
    let max_step = max_rate.abs() * dt.max(0.0);
    previous + (candidate - previous).clamp(-max_step, max_step)
}

/// Linear ramp from 1 at zero drift down to 0 at `window`.
pub fn ramp_down(drift: f64, window: f64) -> f64 {
    if window.is_nan() || window <= 0.0 || !drift.is_finite() {
        return 0.0;
    }
    (1.0 - drift.abs() / window).clamp(0.0, 1.0)
}

/// Diagonal of `R · diag(principal) · Rᵗ`.
///
/// Off-diagonal coupling is dropped: the estimator works with a
/// per-axis inertia only.
pub fn rotated_inertia_diagonal(
    rotation: &UnitQuaternion<f64>,
    principal: &Vector3<f64>,
) -> Vector3<f64> {
    let r = rotation.to_rotation_matrix();
    let rotated: Matrix3<f64> = r.matrix() * Matrix3::from_diagonal(principal) * r.matrix().transpose();
    rotated.diagonal()
}

/// Point-mass inertia of `mass` at `offset` about the origin's axes.
#[inline]
pub fn point_inertia(mass: f64, offset: &Vector3<f64>) -> Vector3<f64> {
    Vector3::new(
        mass * (offset.y * offset.y + offset.z * offset.z),
        mass * (offset.x * offset.x + offset.z * offset.z),
        mass * (offset.x * offset.x + offset.y * offset.y),
    )
}
