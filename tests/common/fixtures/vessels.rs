use flyer_augment::components::{BodyId, RigidBody, RigidBodyAssembly};
use nalgebra::Vector3;

pub const ROOT: BodyId = BodyId(0);

/// Principal inertia of the root body (kg·m²).
pub const VESSEL_INERTIA: f64 = 1200.0;

/// A single rigid body flying along its nose axis at 100 m/s, rotating at
/// `rates` (pitch, roll, yaw) about its root axes.
pub fn single_body_vessel(rates: Vector3<f64>) -> RigidBodyAssembly {
    let root = RigidBody::new(ROOT, 800.0)
        .with_inertia(Vector3::repeat(VESSEL_INERTIA))
        .with_angular_velocity(rates)
        .with_velocity(Vector3::new(0.0, 100.0, 0.0));
    RigidBodyAssembly::new(ROOT, vec![root]).with_surface_velocity(Vector3::new(0.0, 100.0, 0.0))
}

/// A root fuselage with `parts` light sub-bodies strung along the wing, all
/// rotating rigidly at `rates` about the centre of mass.
pub fn multi_body_vessel(rates: Vector3<f64>, parts: usize) -> RigidBodyAssembly {
    let mut bodies = vec![RigidBody::new(ROOT, 800.0).with_inertia(Vector3::repeat(VESSEL_INERTIA))];
    for i in 0..parts {
        let side = if i % 2 == 0 { 1.0 } else { -1.0 };
        let span = 0.5 + (i / 2) as f64;
        bodies.push(
            RigidBody::new(BodyId(i as u32 + 1), 5.0 + i as f64)
                .with_position(Vector3::new(side * span, 0.2, 0.0))
                .with_inertia(Vector3::new(0.1, 0.1, 0.1)),
        );
    }

    let mut assembly = RigidBodyAssembly::new(ROOT, bodies)
        .with_surface_velocity(Vector3::new(0.0, 100.0, 0.0));
    spin_rigidly(&mut assembly, rates);
    assembly
}

/// Sets every body's rotation to `rates` and its velocity to the matching
/// rigid motion about the centre of mass.
pub fn spin_rigidly(assembly: &mut RigidBodyAssembly, rates: Vector3<f64>) {
    let Some(centre) = assembly.mass_centre() else {
        return;
    };
    for body in &mut assembly.bodies {
        body.angular_velocity = rates;
        body.velocity = rates.cross(&(body.position - centre.position));
    }
}
