//! Rapier-backed rigid-body simulation.
//!
//! [`Simulation`] owns every rapier set and the physics pipeline, and exposes
//! only the handful of operations the entity layer needs: add/remove a box
//! body, step, read a pose or velocity, re-pose a kinematic body and apply an
//! impulse.
//!
//! Conventions
//! - Units are meters and seconds; Y is up.
//! - The pipeline runs with zero built-in gravity. Gravity is integrated by
//!   [`GravityIntegrator`](crate::GravityIntegrator) before each step.
//! - Vectors cross this boundary as `nalgebra` values and are converted
//!   component-wise, so the crate never relies on rapier's nalgebra re-export
//!   matching its own.

pub use rapier3d;

use nalgebra::Vector3;
use rapier3d::{na::Vector3 as RVector3, prelude::*};

use crate::rapier::{BodyDef, collider_from_def, rigid_body_from_def};

#[inline]
fn to_rapier(v: &Vector3<f32>) -> RVector3<f32> {
    RVector3::new(v.x, v.y, v.z)
}

#[inline]
fn from_rapier(v: &RVector3<f32>) -> Vector3<f32> {
    Vector3::new(v.x, v.y, v.z)
}

pub struct Simulation {
    pub bodies: RigidBodySet,
    pub colliders: ColliderSet,
    pub broad_phase: BroadPhaseBvh,
    pub narrow_phase: NarrowPhase,
    islands: IslandManager,
    impulse_joints: ImpulseJointSet,
    multibody_joints: MultibodyJointSet,
    ccd_solver: CCDSolver,
    pipeline: PhysicsPipeline,
    params: IntegrationParameters,
}

impl Default for Simulation {
    fn default() -> Self {
        Self::new()
    }
}

impl Simulation {
    pub fn new() -> Self {
        Self {
            bodies: RigidBodySet::new(),
            colliders: ColliderSet::new(),
            broad_phase: BroadPhaseBvh::new(),
            narrow_phase: NarrowPhase::new(),
            islands: IslandManager::new(),
            impulse_joints: ImpulseJointSet::new(),
            multibody_joints: MultibodyJointSet::new(),
            ccd_solver: CCDSolver::new(),
            pipeline: PhysicsPipeline::new(),
            params: IntegrationParameters::default(),
        }
    }

    /// Insert a box body with its collider attached.
    pub fn insert(&mut self, def: &BodyDef) -> RigidBodyHandle {
        let handle = self.bodies.insert(rigid_body_from_def(def));
        self.colliders
            .insert_with_parent(collider_from_def(def), handle, &mut self.bodies);
        handle
    }

    /// Remove a body and its colliders. Returns `false` for an unknown handle.
    pub fn remove(&mut self, handle: RigidBodyHandle) -> bool {
        self.bodies
            .remove(
                handle,
                &mut self.islands,
                &mut self.colliders,
                &mut self.impulse_joints,
                &mut self.multibody_joints,
                true,
            )
            .is_some()
    }

    /// Advance by `dt` seconds.
    pub fn step(&mut self, dt: f32, hooks: &dyn PhysicsHooks) {
        self.params.dt = dt;
        let gravity = RVector3::zeros();

        // NOTE: Rapier 0.31 signature:
        // step(gravity, params, islands, broad_phase, narrow_phase, bodies, colliders,
        //      impulse_joints, multibody_joints, ccd_solver, hooks, events)
        self.pipeline.step(
            &gravity,
            &self.params,
            &mut self.islands,
            &mut self.broad_phase,
            &mut self.narrow_phase,
            &mut self.bodies,
            &mut self.colliders,
            &mut self.impulse_joints,
            &mut self.multibody_joints,
            &mut self.ccd_solver,
            hooks,
            &(),
        );
    }

    pub fn contains(&self, handle: RigidBodyHandle) -> bool {
        self.bodies.contains(handle)
    }

    pub fn body_count(&self) -> usize {
        self.bodies.len()
    }

    pub fn translation(&self, handle: RigidBodyHandle) -> Option<Vector3<f32>> {
        self.bodies.get(handle).map(|b| from_rapier(b.translation()))
    }

    pub fn linvel(&self, handle: RigidBodyHandle) -> Option<Vector3<f32>> {
        self.bodies.get(handle).map(|b| from_rapier(b.linvel()))
    }

    pub fn is_dynamic(&self, handle: RigidBodyHandle) -> bool {
        self.bodies.get(handle).is_some_and(|b| b.is_dynamic())
    }

    /// Asleep, or not moved by the solver at all.
    pub fn is_resting(&self, handle: RigidBodyHandle) -> bool {
        self.bodies
            .get(handle)
            .is_some_and(|b| !b.is_dynamic() || b.is_sleeping())
    }

    /// Target translation a kinematic body reaches at the end of the next step.
    pub fn set_kinematic_translation(&mut self, handle: RigidBodyHandle, translation: &Vector3<f32>) {
        if let Some(body) = self.bodies.get_mut(handle) {
            body.set_next_kinematic_translation(to_rapier(translation));
        }
    }

    /// Apply a linear impulse, waking the body. Returns `false` for an unknown handle.
    pub fn apply_impulse(&mut self, handle: RigidBodyHandle, impulse: &Vector3<f32>) -> bool {
        let Some(body) = self.bodies.get_mut(handle) else {
            return false;
        };
        body.apply_impulse(to_rapier(impulse), true);
        true
    }

    /// Add `delta` to the linear velocity of every awake dynamic body.
    pub fn accelerate_awake_dynamic(&mut self, delta: &Vector3<f32>) {
        let delta = to_rapier(delta);
        for (_, body) in self.bodies.iter_mut() {
            if body.is_dynamic() && !body.is_sleeping() {
                let v = *body.linvel() + delta;
                body.set_linvel(v, false);
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::{config::SolverSettings, entity::Entity};

    #[test]
    fn insert_and_remove_round_trip() {
        let mut sim = Simulation::new();
        let def = BodyDef::from_entity(&Entity::cube("a", true), &SolverSettings::default());
        let handle = sim.insert(&def);

        assert!(sim.contains(handle));
        assert_eq!(sim.colliders.len(), 1);
        assert!(sim.remove(handle));
        assert!(!sim.contains(handle));
        assert_eq!(sim.colliders.len(), 0);
        assert!(!sim.remove(handle));
    }

    #[test]
    fn kinematic_body_reaches_target_after_one_step() {
        let mut sim = Simulation::new();
        let def = BodyDef::from_entity(&Entity::plane("floor", 2.0, 2.0), &SolverSettings::default());
        let handle = sim.insert(&def);

        let target = Vector3::new(3.0, 1.0, -2.0);
        sim.set_kinematic_translation(handle, &target);
        sim.step(1.0 / 60.0, &());

        let t = sim.translation(handle).unwrap_or_default();
        assert!((t - target).norm() < 1.0e-5, "{t:?}");
    }

    #[test]
    fn acceleration_skips_kinematic_bodies() {
        let mut sim = Simulation::new();
        let settings = SolverSettings::default();
        let dynamic = sim.insert(&BodyDef::from_entity(&Entity::cube("a", true), &settings));
        let kinematic = sim.insert(&BodyDef::from_entity(&Entity::cube("b", false), &settings));

        sim.accelerate_awake_dynamic(&Vector3::new(0.0, -1.0, 0.0));
        assert_eq!(sim.linvel(dynamic), Some(Vector3::new(0.0, -1.0, 0.0)));
        assert_eq!(sim.linvel(kinematic), Some(Vector3::zeros()));
        assert!(sim.is_resting(kinematic));
        assert!(!sim.is_resting(dynamic));
    }
}
