use flyer_augment::resources::AugmentationConfig;
use flyer_augment::utils::{Axis, PerAxis};

pub const DT: f64 = 0.02;

/// Rates with only `axis` non-zero.
pub fn rates_on(axis: Axis, rate: f64) -> PerAxis<f64> {
    let mut rates = PerAxis::default();
    rates[axis] = rate;
    rates
}

/// Default tuning with a fast, short-window configuration for lifecycle
/// tests.
pub fn short_history_config() -> AugmentationConfig {
    AugmentationConfig {
        history_capacity: 4,
        full_recompute_interval: 10,
        ..AugmentationConfig::default()
    }
}
