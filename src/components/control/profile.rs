use std::fmt::Debug;

use crate::resources::AugmentationConfig;

/// Strategy producing the target angular acceleration fed to the PID's
/// derivative term from the current angular-velocity error.
pub trait AccelerationProfile: Debug + Send + Sync {
    fn desired_acceleration(&self, velocity_error: f64, config: &AugmentationConfig) -> f64;

    fn name(&self) -> &'static str;
}

/// Pure rate damping: always asks for zero angular acceleration.
#[derive(Debug, Clone, Copy, Default)]
pub struct DampingProfile;

impl AccelerationProfile for DampingProfile {
    fn desired_acceleration(&self, _velocity_error: f64, _config: &AugmentationConfig) -> f64 {
        0.0
    }

    fn name(&self) -> &'static str {
        "damping"
    }
}

/// Braking-distance approach to the target rate.
///
/// With angular jerk limited to `j`, closing a rate error `e` while bringing
/// the acceleration back to zero needs at most `sqrt(2·j·|e|)`, capped at
/// `max_angular_accel`.
#[derive(Debug, Clone, Copy, Default)]
pub struct BrakingProfile;

impl AccelerationProfile for BrakingProfile {
    fn desired_acceleration(&self, velocity_error: f64, config: &AugmentationConfig) -> f64 {
        if !velocity_error.is_finite() {
            return 0.0;
        }
        let braking = (2.0 * config.max_angular_jerk.max(0.0) * velocity_error.abs()).sqrt();
        velocity_error.signum() * braking.min(config.max_angular_accel.max(0.0))
    }

    fn name(&self) -> &'static str {
        "braking"
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use approx::assert_relative_eq;

    #[test]
    fn test_damping_profile_is_zero() {
        let config = AugmentationConfig::default();
        assert_eq!(DampingProfile.desired_acceleration(3.0, &config), 0.0);
    }

    #[test]
    fn test_braking_profile() {
        let config = AugmentationConfig {
            max_angular_accel: 1.0,
            max_angular_jerk: 2.0,
            ..Default::default()
        };
        // sqrt(2 * 2 * 0.0625) = 0.5
        assert_relative_eq!(BrakingProfile.desired_acceleration(0.0625, &config), 0.5);
        assert_relative_eq!(BrakingProfile.desired_acceleration(-0.0625, &config), -0.5);
        assert_relative_eq!(BrakingProfile.desired_acceleration(10.0, &config), 1.0);
        assert_eq!(BrakingProfile.desired_acceleration(0.0, &config), 0.0);
        assert_eq!(BrakingProfile.desired_acceleration(f64::NAN, &config), 0.0);
    }
}
