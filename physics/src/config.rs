//! Runtime configuration for a [`PhysicsSystem`](crate::PhysicsSystem).
//!
//! Every field defaults to the matching constant in [`crate::constants`], so
//! `PhysicsConfig::default()` reproduces the stock tuning. Override only what a
//! scene actually needs.

use nalgebra::Vector3;

use crate::constants::{
    CONTACT_FRICTION, CONTACT_RESTITUTION, DEFAULT_ADDITIONAL_SOLVER_ITERATIONS,
    DEFAULT_SUBSTEPS, GRAVITY_MPS2, MAX_RECOVERY_VELOCITY,
};

/// Top-level knobs handed to [`PhysicsSystem::new`](crate::PhysicsSystem::new).
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct PhysicsConfig {
    /// Constant acceleration applied to every awake dynamic body.
    pub gravity: Vector3<f32>,
    pub solver: SolverSettings,
    pub material: ContactMaterial,
}

impl Default for PhysicsConfig {
    fn default() -> Self {
        Self {
            gravity: Vector3::new(0.0, GRAVITY_MPS2, 0.0),
            solver: SolverSettings::default(),
            material: ContactMaterial::default(),
        }
    }
}

/// Fixed iteration/substep budget for the solver.
///
/// There is no worker-thread count: rapier is built without its `parallel`
/// feature, so every step runs on the calling thread.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct SolverSettings {
    /// Pipeline steps per `update`; each one advances `dt / substeps`.
    /// Zero is treated as one.
    pub substeps: u32,
    /// Solver iterations added to every body on top of rapier's default.
    pub additional_iterations: usize,
}

impl SolverSettings {
    /// Substep count with the zero case folded into one.
    #[inline]
    pub fn effective_substeps(&self) -> u32 {
        self.substeps.max(1)
    }
}

impl Default for SolverSettings {
    fn default() -> Self {
        Self {
            substeps: DEFAULT_SUBSTEPS,
            additional_iterations: DEFAULT_ADDITIONAL_SOLVER_ITERATIONS,
        }
    }
}

/// Material written into every solver contact by the narrow-phase hooks.
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct ContactMaterial {
    pub friction: f32,
    pub restitution: f32,
    /// Cap on how fast penetration is resolved (m/s). Lower values give
    /// softer, less jittery contacts.
    pub max_recovery_velocity: f32,
}

impl Default for ContactMaterial {
    fn default() -> Self {
        Self {
            friction: CONTACT_FRICTION,
            restitution: CONTACT_RESTITUTION,
            max_recovery_velocity: MAX_RECOVERY_VELOCITY,
        }
    }
}
