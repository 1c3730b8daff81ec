use nalgebra::Vector3;
use std::f64::consts::PI;

use super::moments::MomentState;
use crate::components::assembly::ReferenceBasis;
use crate::utils::{Axis, PerAxis, SampleHistory, MIN_AOA_SPEED_SQUARED};

/// Latest estimates for one axis, as consumed by the controllers.
#[derive(Debug, Clone, Copy, PartialEq, Default)]
pub struct AxisSample {
    /// Angular velocity, pitch-up positive (rad/s).
    pub velocity: f64,
    /// Backward-difference angular acceleration (rad/s²).
    pub acceleration: f64,
    /// Angle of attack in the axis plane (rad).
    pub angle_of_attack: f64,
    /// Surface-relative speed (m/s).
    pub airspeed: f64,
}

/// Angle of attack of `velocity` in the plane of `axis`.
///
/// Pitch uses the up/forward plane, yaw the up/right plane, roll the
/// right/forward plane. Below 1 m/s of in-plane speed the angle is 0.
pub fn angle_of_attack(axis: Axis, basis: &ReferenceBasis, velocity: &Vector3<f64>) -> f64 {
    let (plane_a, plane_b, measure, quadrant) = match axis {
        Axis::Pitch => (basis.up, basis.forward, basis.forward, basis.up),
        Axis::Yaw => (basis.up, basis.right, basis.right, basis.up),
        Axis::Roll => (basis.right, basis.forward, basis.forward, basis.right),
    };

    let projected = plane_a * velocity.dot(&plane_a) + plane_b * velocity.dot(&plane_b);
    if projected.norm_squared() <= MIN_AOA_SPEED_SQUARED {
        return 0.0;
    }

    let direction = projected.normalize();
    let angle = direction.dot(&measure).clamp(-1.0, 1.0).asin();
    if direction.dot(&quadrant) < 0.0 {
        PI - angle
    } else {
        angle
    }
}

/// Per-axis velocity, acceleration and angle-of-attack histories.
#[derive(Debug, Clone)]
pub struct DerivativeEstimator {
    velocity: PerAxis<SampleHistory>,
    acceleration: PerAxis<SampleHistory>,
    angle_of_attack: PerAxis<SampleHistory>,
    airspeed: f64,
}

impl DerivativeEstimator {
    pub fn new(capacity: usize) -> Self {
        let history = SampleHistory::new(capacity, 0.0);
        Self {
            velocity: PerAxis::splat(history.clone()),
            acceleration: PerAxis::splat(history.clone()),
            angle_of_attack: PerAxis::splat(history),
            airspeed: 0.0,
        }
    }

    /// Pushes this tick's samples. `basis` is `None` when the root body is
    /// unavailable, in which case the angle of attack is held.
    pub fn update(
        &mut self,
        moments: &MomentState,
        basis: Option<&ReferenceBasis>,
        surface_velocity: &Vector3<f64>,
        dt: f64,
    ) {
        for axis in Axis::ALL {
            let velocity = -moments.angular_velocity[axis.index()];
            let history = &mut self.velocity[axis];
            history.put(velocity);

            if history.size() >= 2 && dt > 0.0 {
                let derivative = (velocity - history.from_tail(1)) / dt;
                self.acceleration[axis].put(derivative);
            }

            let aoa = match basis {
                Some(basis) => angle_of_attack(axis, basis, surface_velocity),
                None => self.angle_of_attack[axis].last(),
            };
            self.angle_of_attack[axis].put(aoa);
        }

        if surface_velocity.iter().all(|v| v.is_finite()) {
            self.airspeed = surface_velocity.norm();
        }
    }

    pub fn velocity(&self, axis: Axis) -> &SampleHistory {
        &self.velocity[axis]
    }

    pub fn acceleration(&self, axis: Axis) -> &SampleHistory {
        &self.acceleration[axis]
    }

    pub fn angle_of_attack(&self, axis: Axis) -> &SampleHistory {
        &self.angle_of_attack[axis]
    }

    pub fn airspeed(&self) -> f64 {
        self.airspeed
    }

    pub fn sample(&self, axis: Axis) -> AxisSample {
        AxisSample {
            velocity: self.velocity[axis].last(),
            acceleration: self.acceleration[axis].last(),
            angle_of_attack: self.angle_of_attack[axis].last(),
            airspeed: self.airspeed,
        }
    }
}
