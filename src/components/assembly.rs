use bevy::prelude::*;
use nalgebra::{UnitQuaternion, Vector3};
use serde::{Deserialize, Serialize};

use crate::utils::MIN_BODY_MASS;

/// Host-assigned identity of a sub-body, stable for the body's lifetime.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
pub struct BodyId(pub u32);

/// A mass-bearing sub-body of a vessel. Every vector is in the world frame.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct RigidBody {
    pub id: BodyId,
    /// Mass (kg).
    pub mass: f64,
    /// Position of the body's centre of mass (m).
    pub position: Vector3<f64>,
    /// Linear velocity (m/s).
    pub velocity: Vector3<f64>,
    /// Own-rotation angular velocity (rad/s).
    pub angular_velocity: Vector3<f64>,
    /// Rotation from the body's principal axes to the world frame.
    pub orientation: UnitQuaternion<f64>,
    /// Principal moments of inertia (kg·m²).
    pub principal_inertia: Vector3<f64>,
    /// False for massless or non-simulated parts.
    pub physical: bool,
    /// False once the body has been detached or destroyed.
    pub attached: bool,
}

impl RigidBody {
    /// Creates a physical, attached body at rest at the world origin.
    pub fn new(id: BodyId, mass: f64) -> Self {
        Self {
            id,
            mass,
            position: Vector3::zeros(),
            velocity: Vector3::zeros(),
            angular_velocity: Vector3::zeros(),
            orientation: UnitQuaternion::identity(),
            principal_inertia: Vector3::zeros(),
            physical: true,
            attached: true,
        }
    }

    pub fn with_position(mut self, position: Vector3<f64>) -> Self {
        self.position = position;
        self
    }

    pub fn with_velocity(mut self, velocity: Vector3<f64>) -> Self {
        self.velocity = velocity;
        self
    }

    pub fn with_angular_velocity(mut self, angular_velocity: Vector3<f64>) -> Self {
        self.angular_velocity = angular_velocity;
        self
    }

    pub fn with_orientation(mut self, orientation: UnitQuaternion<f64>) -> Self {
        self.orientation = orientation;
        self
    }

    pub fn with_inertia(mut self, principal_inertia: Vector3<f64>) -> Self {
        self.principal_inertia = principal_inertia;
        self
    }

    /// Whether the body takes part in moment aggregation this tick.
    pub fn is_significant(&self) -> bool {
        self.physical
            && self.attached
            && self.mass > MIN_BODY_MASS
            && self.mass.is_finite()
            && self.position.iter().all(|v| v.is_finite())
            && self.velocity.iter().all(|v| v.is_finite())
    }
}

/// World-frame basis of the vessel's control reference, in host convention:
/// `up` is the longitudinal (nose) axis, `forward` the ventral axis.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct ReferenceBasis {
    pub right: Vector3<f64>,
    pub up: Vector3<f64>,
    pub forward: Vector3<f64>,
}

impl ReferenceBasis {
    pub fn from_orientation(orientation: &UnitQuaternion<f64>) -> Self {
        Self {
            right: orientation * Vector3::x(),
            up: orientation * Vector3::y(),
            forward: orientation * Vector3::z(),
        }
    }
}

/// Mass-weighted centre of the significant bodies.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct MassCentre {
    pub mass: f64,
    pub position: Vector3<f64>,
    pub velocity: Vector3<f64>,
}

/// Snapshot of a vessel's rigid-body decomposition, written by the host once
/// per tick. Bodies may appear or vanish between snapshots.
#[derive(Component, Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct RigidBodyAssembly {
    /// Body whose axes define the root frame.
    pub root: Option<BodyId>,
    pub bodies: Vec<RigidBody>,
    /// Velocity relative to the surrounding air mass (m/s, world frame).
    pub surface_velocity: Vector3<f64>,
}

impl Default for RigidBodyAssembly {
    fn default() -> Self {
        Self {
            root: None,
            bodies: Vec::new(),
            surface_velocity: Vector3::zeros(),
        }
    }
}

impl RigidBodyAssembly {
    pub fn new(root: BodyId, bodies: Vec<RigidBody>) -> Self {
        Self {
            root: Some(root),
            bodies,
            surface_velocity: Vector3::zeros(),
        }
    }

    pub fn with_surface_velocity(mut self, surface_velocity: Vector3<f64>) -> Self {
        self.surface_velocity = surface_velocity;
        self
    }

    pub fn body(&self, id: BodyId) -> Option<&RigidBody> {
        self.bodies.iter().find(|body| body.id == id)
    }

    /// Looks `id` up at `hint` first and falls back to a scan. Returns the
    /// index the body was found at.
    pub fn locate(&self, id: BodyId, hint: usize) -> Option<(usize, &RigidBody)> {
        match self.bodies.get(hint) {
            Some(body) if body.id == id => Some((hint, body)),
            _ => self.bodies.iter().enumerate().find(|(_, body)| body.id == id),
        }
    }

    pub fn body_mut(&mut self, id: BodyId) -> Option<&mut RigidBody> {
        self.bodies.iter_mut().find(|body| body.id == id)
    }

    /// The root body, if it is present and significant.
    pub fn root_body(&self) -> Option<&RigidBody> {
        self.root
            .and_then(|id| self.body(id))
            .filter(|body| body.is_significant())
    }

    pub fn reference_basis(&self) -> Option<ReferenceBasis> {
        self.root_body()
            .map(|root| ReferenceBasis::from_orientation(&root.orientation))
    }

    /// Centre of mass and its velocity, recomputed from the live bodies.
    pub fn mass_centre(&self) -> Option<MassCentre> {
        let (mass, moment, impulse) = self
            .bodies
            .iter()
            .filter(|body| body.is_significant())
            .fold(
                (0.0, Vector3::zeros(), Vector3::zeros()),
                |(mass, moment, impulse), body| {
                    (
                        mass + body.mass,
                        moment + body.position * body.mass,
                        impulse + body.velocity * body.mass,
                    )
                },
            );

        (mass > MIN_BODY_MASS).then(|| MassCentre {
            mass,
            position: moment / mass,
            velocity: impulse / mass,
        })
    }

    pub fn airspeed(&self) -> f64 {
        self.surface_velocity.norm()
    }
}
