use bevy::prelude::*;
use serde::{Deserialize, Serialize};

use crate::utils::{PerAxis, INPUT_DEADBAND};

/// Raw stick position and its neutral (trim) value for one axis.
#[derive(Debug, Clone, Copy, PartialEq, Default, Serialize, Deserialize)]
pub struct PilotAxisInput {
    pub value: f64,
    pub trim: f64,
}

impl PilotAxisInput {
    pub fn new(value: f64, trim: f64) -> Self {
        Self { value, trim }
    }

    /// Stick resting at `trim`.
    pub fn neutral(trim: f64) -> Self {
        Self { value: trim, trim }
    }

    /// Whether the pilot is moving the stick away from trim.
    pub fn is_overriding(&self) -> bool {
        (self.value - self.trim).abs() > INPUT_DEADBAND
    }
}

/// Pilot stick input for every axis, written by the host.
#[derive(Component, Debug, Clone, Copy, Default, Serialize, Deserialize)]
pub struct PilotControls {
    pub inputs: PerAxis<PilotAxisInput>,
}

impl PilotControls {
    pub fn centred() -> Self {
        Self::default()
    }
}

/// Normalised control-surface command per axis. The augmentation writes it
/// before physics; whatever it holds after physics is taken as applied.
#[derive(Component, Debug, Clone, Copy, Default, Serialize, Deserialize)]
pub struct ControlSurfaceCommand {
    pub applied: PerAxis<f64>,
}

/// Externally supplied control authority per axis. Axes left `None` use the
/// online estimate.
#[derive(Component, Debug, Clone, Copy, Default, Serialize, Deserialize)]
pub struct ControlAuthority {
    pub authority: PerAxis<Option<f64>>,
}

impl ControlAuthority {
    pub fn uniform(authority: f64) -> Self {
        Self {
            authority: PerAxis::splat(Some(authority)),
        }
    }
}
