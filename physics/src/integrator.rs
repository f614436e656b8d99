use nalgebra::Vector3;

use crate::{constants::GRAVITY_MPS2, simulation::Simulation};

/// Pose-integration callback applying a constant acceleration to every awake
/// dynamic body, once per (sub)step.
///
/// Kinematic and sleeping bodies are never touched.
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct GravityIntegrator {
    pub gravity: Vector3<f32>,
}

impl Default for GravityIntegrator {
    fn default() -> Self {
        Self::new(Vector3::new(0.0, GRAVITY_MPS2, 0.0))
    }
}

impl GravityIntegrator {
    pub fn new(gravity: Vector3<f32>) -> Self {
        Self { gravity }
    }

    /// Velocity change for one step of `dt` seconds.
    #[inline]
    pub fn velocity_delta(&self, dt: f32) -> Vector3<f32> {
        self.gravity * dt
    }

    pub fn integrate(&self, simulation: &mut Simulation, dt: f32) {
        if self.gravity == Vector3::zeros() {
            return;
        }
        simulation.accelerate_awake_dynamic(&self.velocity_delta(dt));
    }
}
