use bevy::log::warn;
use std::collections::HashMap;

use super::augmentation::{AugmentationConfig, PARAMETERS};

/// Flat key-value persistence owned by the host (save games, settings files,
/// a tuning GUI).
pub trait ParameterStore {
    fn read(&self, key: &str) -> Option<f64>;
    fn write(&mut self, key: &str, value: f64);
}

impl ParameterStore for HashMap<String, f64> {
    fn read(&self, key: &str) -> Option<f64> {
        self.get(key).copied()
    }

    fn write(&mut self, key: &str, value: f64) {
        self.insert(key.to_string(), value);
    }
}

impl AugmentationConfig {
    /// Applies every key present in `store`. Invalid values are skipped and
    /// the current value kept. Returns how many keys were applied.
    pub fn load_from(&mut self, store: &impl ParameterStore) -> usize {
        let mut applied = 0;
        for spec in PARAMETERS {
            let Some(value) = store.read(spec.name) else {
                continue;
            };
            match self.set(spec.name, value) {
                Ok(()) => applied += 1,
                Err(err) => warn!("Ignoring stored augmentation parameter: {}", err),
            }
        }
        applied
    }

    /// Writes every key to `store`.
    pub fn save_to(&self, store: &mut impl ParameterStore) {
        for spec in PARAMETERS {
            if let Ok(value) = self.get(spec.name) {
                store.write(spec.name, value);
            }
        }
    }
}
