use bevy::log::debug;
use nalgebra::{UnitQuaternion, Vector3};
use serde::{Deserialize, Serialize};

use crate::components::assembly::{
    BodyId, MassCentre, ReferenceBasis, RigidBody, RigidBodyAssembly,
};
use crate::utils::{point_inertia, rotated_inertia_diagonal, MIN_AXIS_INERTIA};

/// Aggregate rotational state of the assembly, in root-frame axes.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct MomentState {
    /// Total mass of the last full pass (kg).
    pub mass: f64,
    /// Diagonal inertia of the last full pass (kg·m²).
    pub inertia: Vector3<f64>,
    /// Angular momentum of the last full pass (kg·m²/s).
    pub angular_momentum: Vector3<f64>,
    /// `-L / I` per axis, following the host's handedness. Updated on every
    /// full or partial pass.
    pub angular_velocity: Vector3<f64>,
}

impl Default for MomentState {
    fn default() -> Self {
        Self {
            mass: 0.0,
            inertia: Vector3::zeros(),
            angular_momentum: Vector3::zeros(),
            angular_velocity: Vector3::zeros(),
        }
    }
}

/// Per-tick frame values shared by all three axes.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct TickFrame {
    pub centre: MassCentre,
    pub world_to_root: UnitQuaternion<f64>,
    pub basis: ReferenceBasis,
}

/// Which pass produced the current estimate.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum PassKind {
    Full,
    Partial,
    /// No usable bodies or root; the previous estimate was kept.
    Held,
}

#[derive(Debug, Clone, Copy, PartialEq)]
struct DominantBody {
    id: BodyId,
    mass: f64,
    /// Index in the assembly at the last lookup.
    hint: usize,
}

#[derive(Debug, Clone, Copy)]
struct Totals {
    mass: f64,
    inertia: Vector3<f64>,
    momentum: Vector3<f64>,
}

impl Totals {
    fn zero() -> Self {
        Self {
            mass: 0.0,
            inertia: Vector3::zeros(),
            momentum: Vector3::zeros(),
        }
    }

    fn accumulate(&mut self, body: &RigidBody, frame: &TickFrame) {
        let offset = frame.world_to_root * (body.position - frame.centre.position);
        let relative_velocity = frame.world_to_root * (body.velocity - frame.centre.velocity);

        let own_rotation = frame.world_to_root * body.orientation;
        let own_inertia = rotated_inertia_diagonal(&own_rotation, &body.principal_inertia);
        let own_rate = frame.world_to_root * body.angular_velocity;

        self.mass += body.mass;
        self.inertia += point_inertia(body.mass, &offset) + own_inertia;
        self.momentum +=
            offset.cross(&(relative_velocity * body.mass)) + own_inertia.component_mul(&own_rate);
    }

    /// Per-axis `-L / I`; axes with negligible inertia keep `previous`.
    fn angular_velocity(&self, previous: &Vector3<f64>) -> Vector3<f64> {
        Vector3::from_fn(|i, _| {
            let inertia = self.inertia[i];
            if inertia > MIN_AXIS_INERTIA && self.momentum[i].is_finite() {
                -self.momentum[i] / inertia
            } else {
                previous[i]
            }
        })
    }
}

/// Amortised inertia and angular-momentum aggregation over a changing set of
/// sub-bodies.
///
/// Every `full_interval` ticks (or at once when the cached set went stale) a
/// full pass walks the whole assembly and refreshes the dominant-mass cache.
/// On other ticks only the cached heaviest bodies are summed, which updates
/// the angular velocity but leaves the full-pass totals alone.
#[derive(Debug, Clone)]
pub struct MomentAggregator {
    state: MomentState,
    frame: Option<TickFrame>,
    dominant: Vec<DominantBody>,
    dominant_cap: usize,
    full_interval: usize,
    ticks_since_full: usize,
    force_full: bool,
    last_pass: PassKind,
}

impl MomentAggregator {
    pub fn new(dominant_cap: usize, full_interval: usize) -> Self {
        Self {
            state: MomentState::default(),
            frame: None,
            dominant: Vec::with_capacity(dominant_cap),
            dominant_cap: dominant_cap.max(1),
            full_interval: full_interval.max(1),
            ticks_since_full: 0,
            force_full: false,
            last_pass: PassKind::Held,
        }
    }

    pub fn state(&self) -> &MomentState {
        &self.state
    }

    /// Frame values of the last pass that found a root body.
    pub fn frame(&self) -> Option<&TickFrame> {
        self.frame.as_ref()
    }

    pub fn last_pass(&self) -> PassKind {
        self.last_pass
    }

    /// Ids of the cached dominant bodies, heaviest first.
    pub fn dominant_ids(&self) -> impl Iterator<Item = BodyId> + '_ {
        self.dominant.iter().map(|entry| entry.id)
    }

    /// Requests a full pass on the next update.
    pub fn invalidate(&mut self) {
        self.force_full = true;
    }

    /// Runs one pass over the assembly snapshot.
    pub fn update(&mut self, assembly: &RigidBodyAssembly) -> PassKind {
        let (Some(root), Some(centre)) = (assembly.root_body(), assembly.mass_centre()) else {
            self.last_pass = PassKind::Held;
            return self.last_pass;
        };

        let frame = TickFrame {
            centre,
            world_to_root: root.orientation.inverse(),
            basis: ReferenceBasis::from_orientation(&root.orientation),
        };
        self.frame = Some(frame);

        let due = self.force_full
            || self.dominant.is_empty()
            || self.ticks_since_full + 1 >= self.full_interval;

        self.last_pass = if due || !self.partial_pass(assembly, &frame) {
            self.full_pass(assembly, &frame)
        } else {
            self.ticks_since_full += 1;
            PassKind::Partial
        };
        self.last_pass
    }

    fn full_pass(&mut self, assembly: &RigidBodyAssembly, frame: &TickFrame) -> PassKind {
        let mut totals = Totals::zero();
        let mut candidates = Vec::with_capacity(assembly.bodies.len());
        let mut stale_member = false;

        for (index, body) in assembly.bodies.iter().enumerate() {
            if !body.is_significant() {
                if self.dominant.iter().any(|entry| entry.id == body.id) {
                    stale_member = true;
                }
                continue;
            }
            totals.accumulate(body, frame);
            candidates.push(DominantBody {
                id: body.id,
                mass: body.mass,
                hint: index,
            });
        }

        if totals.mass <= 0.0 {
            return PassKind::Held;
        }

        candidates.sort_by(|a, b| b.mass.total_cmp(&a.mass).then(a.id.cmp(&b.id)));
        candidates.truncate(self.dominant_cap);
        self.dominant = candidates;

        let angular_velocity = totals.angular_velocity(&self.state.angular_velocity);
        self.state = MomentState {
            mass: totals.mass,
            inertia: totals.inertia,
            angular_momentum: totals.momentum,
            angular_velocity,
        };

        if stale_member {
            debug!("Cached dominant body detached, scheduling another full pass");
        }
        self.force_full = stale_member;
        self.ticks_since_full = 0;
        PassKind::Full
    }

    /// Returns false without touching any state if a cached body is gone.
    fn partial_pass(&mut self, assembly: &RigidBodyAssembly, frame: &TickFrame) -> bool {
        let mut totals = Totals::zero();
        let mut hints = Vec::with_capacity(self.dominant.len());

        for entry in &self.dominant {
            match assembly.locate(entry.id, entry.hint) {
                Some((index, body)) if body.is_significant() => {
                    totals.accumulate(body, frame);
                    hints.push(index);
                }
                _ => {
                    debug!("Dominant body {:?} is stale, forcing a full pass", entry.id);
                    return false;
                }
            }
        }

        for (entry, hint) in self.dominant.iter_mut().zip(hints) {
            entry.hint = hint;
        }
        self.state.angular_velocity = totals.angular_velocity(&self.state.angular_velocity);
        true
    }
}
