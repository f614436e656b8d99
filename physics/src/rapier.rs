use rapier3d::{
    na::{Translation3, UnitQuaternion},
    prelude::*,
};

use crate::{
    config::SolverSettings,
    constants::MIN_COLLIDER_EXTENT,
    entity::{Entity, PhysicsProfile},
};

/// How a registered body moves.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum BodyKind {
    /// Driven by gravity and contacts; pose read back into the entity.
    Dynamic,
    /// Position-based, follows the entity.
    Kinematic,
}

/// Backend-agnostic description of the box body mirroring one entity.
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct BodyDef {
    pub kind: BodyKind,
    /// World-space centre of the box (entity position + hitbox centre).
    pub translation: nalgebra::Vector3<f32>,
    pub half_extents: nalgebra::Vector3<f32>,
    pub mass: f32,
    pub linear_damping: f32,
    pub angular_damping: f32,
    pub lock_rotations: bool,
    pub additional_solver_iterations: usize,
}

impl BodyDef {
    /// Box covering the entity's default bounding box, placed at its current
    /// position. Each extent is clamped to [`MIN_COLLIDER_EXTENT`].
    pub fn from_entity(entity: &Entity, solver: &SolverSettings) -> Self {
        let size = entity.default_bounding_box_max() - entity.default_bounding_box_min();
        let half_extents = size.map(|s| s.max(MIN_COLLIDER_EXTENT) * 0.5);
        let translation = entity.position() + entity.hitbox_center();

        let (kind, profile) = if entity.apply_gravity {
            (BodyKind::Dynamic, entity.profile)
        } else {
            (BodyKind::Kinematic, PhysicsProfile::Standard)
        };

        Self {
            kind,
            translation,
            half_extents,
            mass: entity.mass * profile.inertia_multiplier(),
            linear_damping: profile.linear_damping(),
            angular_damping: profile.angular_damping(),
            lock_rotations: profile.locks_rotations(),
            additional_solver_iterations: solver.additional_iterations,
        }
    }
}

/// Build the rigid body for `def`.
pub fn rigid_body_from_def(def: &BodyDef) -> RigidBody {
    let t = def.translation;
    let iso = Isometry::from_parts(
        Translation3::new(t.x, t.y, t.z),
        UnitQuaternion::identity(),
    );

    let builder = match def.kind {
        BodyKind::Dynamic => RigidBodyBuilder::dynamic()
            .linear_damping(def.linear_damping)
            .angular_damping(def.angular_damping)
            .additional_solver_iterations(def.additional_solver_iterations),
        BodyKind::Kinematic => RigidBodyBuilder::kinematic_position_based(),
    };
    let builder = if def.lock_rotations {
        builder.lock_rotations()
    } else {
        builder
    };

    builder.pose(iso).build()
}

/// Build the box collider for `def`, with narrow-phase hooks enabled.
///
/// The collider sits at the body origin, so its local transform is identity.
pub fn collider_from_def(def: &BodyDef) -> Collider {
    let h = def.half_extents;
    let builder = ColliderBuilder::cuboid(h.x, h.y, h.z)
        .active_hooks(ActiveHooks::MODIFY_SOLVER_CONTACTS);

    match def.kind {
        BodyKind::Dynamic => builder.mass(def.mass).build(),
        BodyKind::Kinematic => builder.build(),
    }
}
