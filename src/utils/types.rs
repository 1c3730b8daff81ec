use serde::{Deserialize, Serialize};
use std::fmt;
use std::ops::{Index, IndexMut};

/// Control axis. Root-frame mapping: pitch about x (right), roll about y
/// (longitudinal), yaw about z (ventral).
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum Axis {
    Pitch,
    Roll,
    Yaw,
}

impl Axis {
    pub const ALL: [Axis; 3] = [Axis::Pitch, Axis::Roll, Axis::Yaw];

    /// Component index of this axis in root-frame vectors.
    #[inline]
    pub fn index(self) -> usize {
        match self {
            Axis::Pitch => 0,
            Axis::Roll => 1,
            Axis::Yaw => 2,
        }
    }

    pub fn name(self) -> &'static str {
        match self {
            Axis::Pitch => "pitch",
            Axis::Roll => "roll",
            Axis::Yaw => "yaw",
        }
    }
}

impl fmt::Display for Axis {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.name())
    }
}

/// One value per control axis.
#[derive(Debug, Clone, Copy, PartialEq, Default, Serialize, Deserialize)]
pub struct PerAxis<T> {
    values: [T; 3],
}

impl<T> PerAxis<T> {
    pub fn new(pitch: T, roll: T, yaw: T) -> Self {
        Self {
            values: [pitch, roll, yaw],
        }
    }

    pub fn from_fn(mut f: impl FnMut(Axis) -> T) -> Self {
        Self {
            values: [f(Axis::Pitch), f(Axis::Roll), f(Axis::Yaw)],
        }
    }

    pub fn map<U>(&self, mut f: impl FnMut(&T) -> U) -> PerAxis<U> {
        PerAxis::from_fn(|axis| f(&self[axis]))
    }

    pub fn iter(&self) -> impl Iterator<Item = (Axis, &T)> {
        Axis::ALL.into_iter().zip(self.values.iter())
    }

    pub fn iter_mut(&mut self) -> impl Iterator<Item = (Axis, &mut T)> {
        Axis::ALL.into_iter().zip(self.values.iter_mut())
    }
}

impl<T: Clone> PerAxis<T> {
    pub fn splat(value: T) -> Self {
        Self::from_fn(|_| value.clone())
    }
}

impl<T> Index<Axis> for PerAxis<T> {
    type Output = T;

    fn index(&self, axis: Axis) -> &T {
        &self.values[axis.index()]
    }
}

impl<T> IndexMut<Axis> for PerAxis<T> {
    fn index_mut(&mut self, axis: Axis) -> &mut T {
        &mut self.values[axis.index()]
    }
}
