use parking_lot::Mutex;
use rapier3d::prelude::{ContactModificationContext, PhysicsHooks, RigidBodyHandle, SolverContact};

use super::types::{Contact, Point, Vec3};
use crate::config::ContactMaterial;

/// Touching body pair captured while the pipeline steps.
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct RawContact {
    pub body1: RigidBodyHandle,
    pub body2: RigidBodyHandle,
    /// Normal points from `body1` toward `body2`.
    pub contact: Contact,
}

/// Narrow-phase hooks: writes the contact material into every solver contact
/// and records which body pairs actually touched.
///
/// Colliders opt in through `ActiveHooks::MODIFY_SOLVER_CONTACTS`. rapier
/// requires hooks to be `Send + Sync`, so the per-step buffer sits behind a
/// mutex even though stepping is single-threaded.
pub struct ContactHooks {
    material: ContactMaterial,
    dt: f32,
    recorded: Mutex<Vec<RawContact>>,
}

impl ContactHooks {
    pub fn new(material: ContactMaterial) -> Self {
        Self {
            material,
            dt: 0.0,
            recorded: Mutex::new(Vec::new()),
        }
    }

    #[inline]
    pub fn material(&self) -> &ContactMaterial {
        &self.material
    }

    /// Set the timestep the next pipeline step runs with.
    pub fn begin_step(&mut self, dt: f32) {
        self.dt = dt;
    }

    /// Pairs recorded since the last drain, in pipeline order. A pair touching
    /// over several substeps appears once per substep.
    pub fn drain(&mut self) -> Vec<RawContact> {
        std::mem::take(self.recorded.get_mut())
    }

    /// Apply friction/restitution and cap how deep a contact may claim to be,
    /// which bounds the separating velocity the solver produces.
    pub fn configure(&self, contacts: &mut [SolverContact]) {
        let deepest = -self.material.max_recovery_velocity * self.dt;
        for c in contacts {
            c.friction = self.material.friction;
            c.restitution = self.material.restitution;
            c.dist = c.dist.max(deepest);
        }
    }
}

impl PhysicsHooks for ContactHooks {
    fn modify_solver_contacts(&self, context: &mut ContactModificationContext) {
        self.configure(context.solver_contacts.as_mut_slice());

        let (Some(body1), Some(body2)) = (context.rigid_body1, context.rigid_body2) else {
            return;
        };
        let Some(first) = context.solver_contacts.first() else {
            return;
        };

        let n = *context.normal;
        let contact = Contact {
            point: Point::new(first.point.x, first.point.y, first.point.z),
            normal: Vec3::new(n.x, n.y, n.z),
        };
        self.recorded.lock().push(RawContact {
            body1,
            body2,
            contact,
        });
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn drain_empties_the_buffer() {
        let mut hooks = ContactHooks::new(ContactMaterial::default());
        hooks.begin_step(1.0 / 60.0);
        assert!(hooks.drain().is_empty());
        assert_eq!(hooks.material().friction, 0.8);
    }
}
