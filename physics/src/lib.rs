pub mod bitmask_flags;
pub mod collision;
pub mod config;
pub mod constants;
pub mod entity;
pub mod error;
pub mod hitbox;
pub mod integrator;
pub mod physics_system;
pub mod rapier;
pub mod simulation;
pub mod utils;

pub use collision::{CollisionEvent, CollisionKind, CollisionSide, CollisionSides, Contact};
pub use config::{ContactMaterial, PhysicsConfig, SolverSettings};
pub use constants::{GRAVITY_MPS2, MIN_COLLIDER_EXTENT};
pub use entity::{Entity, EntityId, PhysicsProfile, Renderable};
pub use error::{PhysicsError, Result};
pub use hitbox::HitboxConfig;
pub use integrator::GravityIntegrator;
pub use physics_system::PhysicsSystem;
pub use rapier::{BodyDef, BodyKind};
pub use simulation::{Simulation, rapier3d};
pub use utils::{compose, euler_from_matrix, scale_of, translation_of};
