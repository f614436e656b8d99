//! Transform-bearing scene objects.
//!
//! An [`Entity`] stores a single column-vector model matrix and derives
//! position, rotation and scale from it on demand. Its world-space bounding box
//! is `position + default box` and is refreshed by every call that moves the
//! origin; rotation never refits it, so the box stays world-aligned.
//!
//! Entities are plain values. Registering one with a
//! [`PhysicsSystem`](crate::PhysicsSystem) moves it into the system's arena and
//! stamps it with an [`EntityId`].

use std::fmt;

use nalgebra::{Matrix4, Rotation3, Unit, Vector3};

use crate::{
    collision::{
        aabb::{aabb_from_corners, overlaps, touching_sides},
        types::{CollisionSide, CollisionSides},
    },
    constants::{
        AXIS_EPS, HIGH_STABILITY_INERTIA_MULTIPLIER, HIGH_STABILITY_LINEAR_DAMPING, SCALE_EPS,
        STANDARD_LINEAR_DAMPING,
    },
    error::{PhysicsError, Result},
    hitbox::HitboxConfig,
    utils::{compose, degrees_to_radians, euler_from_matrix, radians_to_degrees, scale_of, translation_of},
};

/// Stable key of an entity inside a `PhysicsSystem` arena.
#[derive(Clone, Copy, Debug, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub struct EntityId(pub(crate) u64);

impl EntityId {
    #[inline]
    pub fn raw(self) -> u64 {
        self.0
    }
}

impl fmt::Display for EntityId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "#{}", self.0)
    }
}

/// Opaque handle to whatever draws the entity. Only its name is visible here.
#[derive(Clone, Debug, Default, PartialEq, Eq)]
pub struct Renderable {
    name: String,
}

impl Renderable {
    pub fn new(name: impl Into<String>) -> Self {
        Self { name: name.into() }
    }

    #[inline]
    pub fn name(&self) -> &str {
        &self.name
    }
}

/// How a dynamic body is tuned when the entity is registered.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, Hash)]
pub enum PhysicsProfile {
    #[default]
    Standard,
    /// Heavier, damped and rotation-locked. Used for player-controlled bodies.
    HighStability,
}

impl PhysicsProfile {
    /// Factor applied to the entity mass.
    pub fn inertia_multiplier(self) -> f32 {
        match self {
            Self::Standard => 1.0,
            Self::HighStability => HIGH_STABILITY_INERTIA_MULTIPLIER,
        }
    }

    pub fn linear_damping(self) -> f32 {
        match self {
            Self::Standard => STANDARD_LINEAR_DAMPING,
            Self::HighStability => HIGH_STABILITY_LINEAR_DAMPING,
        }
    }

    pub fn angular_damping(self) -> f32 {
        self.linear_damping()
    }

    pub fn locks_rotations(self) -> bool {
        matches!(self, Self::HighStability)
    }
}

/// Reset target saved by `set_default*`.
#[derive(Clone, Copy, Debug, PartialEq)]
enum DefaultSnapshot {
    Matrix(Matrix4<f32>),
    Components {
        position: Option<Vector3<f32>>,
        rotation: Option<Vector3<f32>>,
        scale: Option<Vector3<f32>>,
    },
}

#[derive(Clone, Debug)]
pub struct Entity {
    renderable: Renderable,
    model: Matrix4<f32>,

    pub velocity: Vector3<f32>,
    pub apply_gravity: bool,
    pub enable_physics: bool,
    pub mass: f32,
    pub friction_coefficient: f32,
    pub profile: PhysicsProfile,

    /// Assigned box description. Call [`apply_hitbox_config`](Self::apply_hitbox_config)
    /// after editing it.
    pub hitbox_config: HitboxConfig,
    default_bounding_box_min: Vector3<f32>,
    default_bounding_box_max: Vector3<f32>,
    bounding_box_min: Vector3<f32>,
    bounding_box_max: Vector3<f32>,

    pub(crate) collision_sides: CollisionSides,
    pub(crate) is_colliding: bool,

    default_snapshot: Option<DefaultSnapshot>,
    pub(crate) registration: Option<EntityId>,
    hitbox_shown: bool,
}

impl Entity {
    /// Identity transform with a 1x1x1 box standing on the origin.
    pub fn new(renderable: Renderable, apply_gravity: bool) -> Self {
        let hitbox_config = HitboxConfig::new(1.0, 1.0, 1.0, 0.0);
        let min = hitbox_config.calculate_min();
        let max = hitbox_config.calculate_max();

        Self {
            renderable,
            model: Matrix4::identity(),
            velocity: Vector3::zeros(),
            apply_gravity,
            enable_physics: true,
            mass: 1.0,
            friction_coefficient: 1.0,
            profile: PhysicsProfile::Standard,
            hitbox_config,
            default_bounding_box_min: min,
            default_bounding_box_max: max,
            bounding_box_min: min,
            bounding_box_max: max,
            collision_sides: CollisionSides::default(),
            is_colliding: false,
            default_snapshot: None,
            registration: None,
            hitbox_shown: false,
        }
    }

    pub fn with_hitbox(mut self, config: HitboxConfig) -> Self {
        self.set_hitbox_config(config);
        self
    }

    pub fn with_profile(mut self, profile: PhysicsProfile) -> Self {
        self.profile = profile;
        self
    }

    pub fn with_mass(mut self, mass: f32) -> Self {
        self.mass = mass;
        self
    }

    /// Unit cube centred on its origin.
    pub fn cube(name: impl Into<String>, apply_gravity: bool) -> Self {
        Self::new(Renderable::new(name), apply_gravity).with_hitbox(HitboxConfig::default_cube())
    }

    /// Kinematic floor slab with its top face on the origin.
    pub fn plane(name: impl Into<String>, width: f32, length: f32) -> Self {
        Self::new(Renderable::new(name), false).with_hitbox(HitboxConfig::default_plane(width, length))
    }

    /// Gravity-driven player capsule stand-in.
    pub fn player(name: impl Into<String>) -> Self {
        Self::new(Renderable::new(name), true)
            .with_hitbox(HitboxConfig::default_player())
            .with_profile(PhysicsProfile::HighStability)
    }

    // ---- accessors ----

    #[inline]
    pub fn name(&self) -> &str {
        self.renderable.name()
    }

    #[inline]
    pub fn renderable(&self) -> &Renderable {
        &self.renderable
    }

    #[inline]
    pub fn model(&self) -> &Matrix4<f32> {
        &self.model
    }

    #[inline]
    pub fn position(&self) -> Vector3<f32> {
        translation_of(&self.model)
    }

    #[inline]
    pub fn scale(&self) -> Vector3<f32> {
        scale_of(&self.model)
    }

    /// Euler angles in radians: x = pitch, y = yaw, z = roll.
    #[inline]
    pub fn rotation(&self) -> Vector3<f32> {
        euler_from_matrix(&self.model)
    }

    #[inline]
    pub fn rotation_degrees(&self) -> Vector3<f32> {
        radians_to_degrees(&self.rotation())
    }

    #[inline]
    pub fn default_bounding_box_min(&self) -> Vector3<f32> {
        self.default_bounding_box_min
    }

    #[inline]
    pub fn default_bounding_box_max(&self) -> Vector3<f32> {
        self.default_bounding_box_max
    }

    #[inline]
    pub fn bounding_box_min(&self) -> Vector3<f32> {
        self.bounding_box_min
    }

    #[inline]
    pub fn bounding_box_max(&self) -> Vector3<f32> {
        self.bounding_box_max
    }

    /// Local offset from the origin to the middle of the default box.
    #[inline]
    pub fn hitbox_center(&self) -> Vector3<f32> {
        (self.default_bounding_box_min + self.default_bounding_box_max) * 0.5
    }

    #[inline]
    pub fn collision_sides(&self) -> CollisionSides {
        self.collision_sides
    }

    #[inline]
    pub fn is_touching(&self, side: CollisionSide) -> bool {
        self.collision_sides.has(side)
    }

    #[inline]
    pub fn is_colliding(&self) -> bool {
        self.is_colliding
    }

    /// Arena key while registered with a physics system.
    #[inline]
    pub fn registration(&self) -> Option<EntityId> {
        self.registration
    }

    #[inline]
    pub fn is_registered(&self) -> bool {
        self.registration.is_some()
    }

    // ---- transform ----

    /// Move by `offset` in world space.
    pub fn translate(&mut self, offset: Vector3<f32>) -> &mut Self {
        self.model = Matrix4::new_translation(&offset) * self.model;
        self.update_bounding_box();
        log::trace!("{} translated by {offset:?}", self.name());
        self
    }

    /// Rotate about a local `axis`. The bounding box is left as is.
    pub fn rotate(&mut self, radians: f32, axis: Vector3<f32>) -> &mut Self {
        let Some(axis) = Unit::try_new(axis, AXIS_EPS) else {
            log::warn!("{}: ignoring rotation about a zero-length axis", self.name());
            return self;
        };
        self.model *= Rotation3::from_axis_angle(&axis, radians).to_homogeneous();
        log::trace!("{} rotated {radians} rad about {:?}", self.name(), axis.into_inner());
        self
    }

    /// Multiply the current scale by `factors` along the local axes.
    pub fn set_scale(&mut self, factors: Vector3<f32>) -> &mut Self {
        self.model *= Matrix4::new_nonuniform_scaling(&factors);
        log::trace!("{} scaled by {factors:?}", self.name());
        self
    }

    pub fn set_scale_x(&mut self, scale: f32) -> &mut Self {
        self.set_axis_scales([Some(scale), None, None])
    }

    pub fn set_scale_y(&mut self, scale: f32) -> &mut Self {
        self.set_axis_scales([None, Some(scale), None])
    }

    pub fn set_scale_z(&mut self, scale: f32) -> &mut Self {
        self.set_axis_scales([None, None, Some(scale)])
    }

    /// Absolute scale `scale` on all three axes.
    pub fn set_uniform_scale(&mut self, scale: f32) -> &mut Self {
        self.set_axis_scales([Some(scale); 3])
    }

    /// Rescale each selected basis column to the requested length.
    fn set_axis_scales(&mut self, targets: [Option<f32>; 3]) -> &mut Self {
        let current = self.scale();
        for (i, target) in targets.into_iter().enumerate() {
            let Some(target) = target else { continue };
            if current[i] < SCALE_EPS {
                log::warn!("{}: axis {i} has collapsed scale, cannot rescale", self.name());
                continue;
            }
            let factor = target / current[i];
            for row in 0..3 {
                self.model[(row, i)] *= factor;
            }
        }
        log::trace!("{} scale set to {:?}", self.name(), self.scale());
        self
    }

    /// Overwrite the translation column, keeping rotation and scale.
    pub fn set_position(&mut self, position: Vector3<f32>) -> &mut Self {
        self.model[(0, 3)] = position.x;
        self.model[(1, 3)] = position.y;
        self.model[(2, 3)] = position.z;
        self.update_bounding_box();
        log::trace!("{} moved to {position:?}", self.name());
        self
    }

    pub fn set_model(&mut self, model: Matrix4<f32>) -> &mut Self {
        self.model = model;
        self.update_bounding_box();
        self
    }

    /// Replace the rotation with Euler angles (radians), keeping position and scale.
    pub fn set_rotation(&mut self, euler: Vector3<f32>) -> &mut Self {
        let position = self.position();
        let scale = self.scale();
        self.model = compose(&position, &euler, &scale);
        self.update_bounding_box();
        log::trace!("{} rotation set to {euler:?}", self.name());
        self
    }

    pub fn set_rotation_degrees(&mut self, euler: Vector3<f32>) -> &mut Self {
        self.set_rotation(degrees_to_radians(&euler))
    }

    pub fn set_rotation_x(&mut self, radians: f32) -> &mut Self {
        let mut euler = self.rotation();
        euler.x = radians;
        self.set_rotation(euler)
    }

    pub fn set_rotation_y(&mut self, radians: f32) -> &mut Self {
        let mut euler = self.rotation();
        euler.y = radians;
        self.set_rotation(euler)
    }

    pub fn set_rotation_z(&mut self, radians: f32) -> &mut Self {
        let mut euler = self.rotation();
        euler.z = radians;
        self.set_rotation(euler)
    }

    // ---- defaults ----

    /// Identity matrix, forgetting any saved default.
    pub fn absolute_reset(&mut self) -> &mut Self {
        self.model = Matrix4::identity();
        self.default_snapshot = None;
        self.update_bounding_box();
        log::trace!("{} reset to identity", self.name());
        self
    }

    /// Save the whole matrix as the reset target.
    pub fn set_default(&mut self) -> &mut Self {
        self.default_snapshot = Some(DefaultSnapshot::Matrix(self.model));
        self
    }

    /// Save only the selected components as the reset target. Components left
    /// out keep whatever value they have at reset time.
    pub fn set_default_components(
        &mut self,
        save_position: bool,
        save_rotation: bool,
        save_scale: bool,
    ) -> &mut Self {
        let position = save_position.then(|| self.position());
        let rotation = save_rotation.then(|| self.rotation());
        let scale = save_scale.then(|| self.scale());
        self.default_snapshot = Some(DefaultSnapshot::Components {
            position,
            rotation,
            scale,
        });
        self
    }

    #[inline]
    pub fn is_default_set(&self) -> bool {
        self.default_snapshot.is_some()
    }

    /// Restore the saved default, or fall back to [`absolute_reset`](Self::absolute_reset).
    pub fn reset(&mut self) -> &mut Self {
        match self.default_snapshot {
            None => {
                log::trace!("{}: no default saved, resetting to identity", self.name());
                self.absolute_reset()
            }
            Some(DefaultSnapshot::Matrix(model)) => self.set_model(model),
            Some(DefaultSnapshot::Components {
                position,
                rotation,
                scale,
            }) => {
                if let Some(rotation) = rotation {
                    self.set_rotation(rotation);
                }
                if let Some(scale) = scale {
                    self.set_axis_scales([Some(scale.x), Some(scale.y), Some(scale.z)]);
                }
                if let Some(position) = position {
                    self.set_position(position);
                }
                self
            }
        }
    }

    /// Drop the saved default.
    pub fn release(&mut self) -> Result<&mut Self> {
        if self.default_snapshot.take().is_none() {
            return Err(PhysicsError::NoDefaultSnapshot);
        }
        Ok(self)
    }

    // ---- hitbox ----

    /// Recompute the default and world boxes from `hitbox_config`.
    pub fn apply_hitbox_config(&mut self) -> &mut Self {
        self.default_bounding_box_min = self.hitbox_config.calculate_min();
        self.default_bounding_box_max = self.hitbox_config.calculate_max();
        self.update_bounding_box();
        self
    }

    /// Assign and apply `config`. Degenerate configs are applied anyway.
    pub fn set_hitbox_config(&mut self, config: HitboxConfig) -> &mut Self {
        if let Err(e) = config.validate() {
            log::warn!("{}: {e}", self.name());
        }
        self.hitbox_config = config;
        self.apply_hitbox_config()
    }

    /// Set the local box corners directly, bypassing `hitbox_config`.
    pub fn set_hitbox_default(&mut self, min: Vector3<f32>, max: Vector3<f32>) -> &mut Self {
        self.default_bounding_box_min = min;
        self.default_bounding_box_max = max;
        self.update_bounding_box();
        self
    }

    pub fn show_hitbox(&mut self) -> &mut Self {
        self.hitbox_shown = true;
        self
    }

    pub fn hide_hitbox(&mut self) -> &mut Self {
        self.hitbox_shown = false;
        self
    }

    pub fn toggle_hitbox(&mut self) -> &mut Self {
        self.hitbox_shown = !self.hitbox_shown;
        self
    }

    #[inline]
    pub fn is_hitbox_shown(&self) -> bool {
        self.hitbox_shown
    }

    /// World boxes overlap (touching faces included).
    pub fn overlaps(&self, other: &Entity) -> bool {
        overlaps(&self.world_aabb(), &other.world_aabb())
    }

    /// Overlap test that also records which of this entity's sides touch
    /// `other` into its collision sides.
    pub fn intersects(&mut self, other: &Entity) -> bool {
        let (a, b) = (self.world_aabb(), other.world_aabb());
        self.collision_sides = touching_sides(&a, &b);
        overlaps(&a, &b)
    }

    fn world_aabb(&self) -> rapier3d::parry::bounding_volume::Aabb {
        aabb_from_corners(&self.bounding_box_min, &self.bounding_box_max)
    }

    fn update_bounding_box(&mut self) {
        let position = self.position();
        self.bounding_box_min = position + self.default_bounding_box_min;
        self.bounding_box_max = position + self.default_bounding_box_max;
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn close(a: Vector3<f32>, b: Vector3<f32>, eps: f32) -> bool {
        (a - b).amax() < eps
    }

    fn bbox_follows(e: &Entity) -> bool {
        close(e.bounding_box_min(), e.position() + e.default_bounding_box_min(), 1.0e-6)
            && close(e.bounding_box_max(), e.position() + e.default_bounding_box_max(), 1.0e-6)
    }

    #[test]
    fn new_entity_stands_on_a_unit_box() {
        let e = Entity::new(Renderable::new("crate"), false);
        assert_eq!(e.name(), "crate");
        assert_eq!(*e.model(), Matrix4::identity());
        assert!(close(e.default_bounding_box_min(), Vector3::new(-0.5, 0.0, -0.5), 1.0e-7));
        assert!(close(e.default_bounding_box_max(), Vector3::new(0.5, 1.0, 0.5), 1.0e-7));
        assert_eq!(e.mass, 1.0);
        assert_eq!(e.friction_coefficient, 1.0);
        assert!(!e.is_registered());
    }

    #[test]
    fn translate_adds_to_position_and_moves_the_box() {
        let mut e = Entity::cube("a", false);
        e.set_rotation(Vector3::new(0.4, -0.2, 1.0)).set_scale(Vector3::new(2.0, 1.0, 0.5));

        let before = e.position();
        let t = Vector3::new(1.5, -2.0, 0.25);
        e.translate(t);

        assert!(close(e.position(), before + t, 1.0e-5));
        assert!(bbox_follows(&e));
    }

    #[test]
    fn set_rotation_round_trips_and_keeps_position_and_scale() {
        let mut e = Entity::cube("a", false);
        e.set_position(Vector3::new(3.0, 1.0, -4.0));
        e.set_uniform_scale(2.0);

        let samples = [
            Vector3::new(0.3, 1.2, -0.8),
            Vector3::new(-1.2, -0.5, 2.9),
            Vector3::new(0.0, 1.5, 0.0),
        ];
        for euler in samples {
            let (pos, scale) = (e.position(), e.scale());
            e.set_rotation(euler);
            assert!(close(e.rotation(), euler, 1.0e-4), "{:?} vs {euler:?}", e.rotation());
            assert!(close(e.position(), pos, 1.0e-5));
            assert!(close(e.scale(), scale, 1.0e-4));
            assert!(bbox_follows(&e));
        }
    }

    #[test]
    fn rotate_keeps_position_and_box() {
        let mut e = Entity::cube("a", false);
        e.set_position(Vector3::new(1.0, 2.0, 3.0));
        let (min, max) = (e.bounding_box_min(), e.bounding_box_max());

        e.rotate(0.7, Vector3::new(0.0, 2.0, 0.0));
        assert!(close(e.position(), Vector3::new(1.0, 2.0, 3.0), 1.0e-6));
        assert!(close(e.rotation(), Vector3::new(0.0, 0.7, 0.0), 1.0e-5));
        assert_eq!(e.bounding_box_min(), min);
        assert_eq!(e.bounding_box_max(), max);
    }

    #[test]
    fn rotate_about_zero_axis_is_ignored() {
        let mut e = Entity::cube("a", false);
        let before = *e.model();
        e.rotate(1.0, Vector3::zeros());
        assert_eq!(*e.model(), before);
    }

    #[test]
    fn set_scale_compounds_and_axis_setters_are_absolute() {
        let mut e = Entity::cube("a", false);
        e.set_position(Vector3::new(0.0, 5.0, 0.0));
        e.set_rotation(Vector3::new(0.2, 0.3, 0.4));

        e.set_scale(Vector3::new(2.0, 2.0, 2.0)).set_scale(Vector3::new(1.5, 1.0, 1.0));
        assert!(close(e.scale(), Vector3::new(3.0, 2.0, 2.0), 1.0e-5));

        let rotation = e.rotation();
        e.set_scale_x(0.5);
        assert!(close(e.scale(), Vector3::new(0.5, 2.0, 2.0), 1.0e-5));
        assert!(close(e.rotation(), rotation, 1.0e-4));
        assert!(close(e.position(), Vector3::new(0.0, 5.0, 0.0), 1.0e-6));

        e.set_uniform_scale(1.0);
        assert!(close(e.scale(), Vector3::new(1.0, 1.0, 1.0), 1.0e-5));
    }

    #[test]
    fn set_position_preserves_basis() {
        let mut e = Entity::cube("a", false);
        e.set_rotation(Vector3::new(0.1, 0.2, 0.3));
        let basis = e.model().fixed_view::<3, 3>(0, 0).into_owned();

        e.set_position(Vector3::new(-7.0, 0.5, 2.0));
        assert_eq!(e.model().fixed_view::<3, 3>(0, 0).into_owned(), basis);
        assert!(bbox_follows(&e));
    }

    #[test]
    fn reset_without_default_goes_to_identity() {
        let mut e = Entity::cube("a", false);
        e.translate(Vector3::new(1.0, 1.0, 1.0));
        e.reset();
        assert_eq!(*e.model(), Matrix4::identity());
        assert!(bbox_follows(&e));
    }

    #[test]
    fn reset_restores_whole_matrix_snapshot() {
        let mut e = Entity::cube("a", false);
        e.translate(Vector3::new(2.0, 0.0, 0.0)).set_default();
        let saved = *e.model();

        e.translate(Vector3::new(0.0, 9.0, 0.0)).rotate(1.0, Vector3::x());
        e.reset();
        assert_eq!(*e.model(), saved);
        assert!(e.is_default_set());
    }

    #[test]
    fn reset_restores_only_saved_components() {
        let mut e = Entity::cube("a", false);
        e.set_position(Vector3::new(1.0, 2.0, 3.0));
        e.set_rotation(Vector3::new(0.0, 0.5, 0.0));
        e.set_default_components(true, false, false);

        e.set_position(Vector3::new(9.0, 9.0, 9.0));
        e.set_rotation(Vector3::new(0.0, -0.5, 0.0));
        e.reset();

        assert!(close(e.position(), Vector3::new(1.0, 2.0, 3.0), 1.0e-6));
        assert!(close(e.rotation(), Vector3::new(0.0, -0.5, 0.0), 1.0e-5));
    }

    #[test]
    fn release_requires_a_snapshot() {
        let mut e = Entity::cube("a", false);
        assert_eq!(e.release().err(), Some(PhysicsError::NoDefaultSnapshot));

        e.set_default();
        assert!(e.release().is_ok());
        assert!(!e.is_default_set());
        assert!(e.release().is_err());
    }

    #[test]
    fn absolute_reset_clears_the_snapshot() {
        let mut e = Entity::cube("a", false);
        e.set_default();
        e.absolute_reset();
        assert!(!e.is_default_set());
    }

    #[test]
    fn hitbox_config_drives_the_default_box() {
        let mut e = Entity::new(Renderable::new("p"), true);
        e.set_position(Vector3::new(0.0, 2.0, 0.0));
        e.hitbox_config = HitboxConfig::for_cube(2.0, 0.5);
        e.apply_hitbox_config();

        assert!(close(e.default_bounding_box_min(), Vector3::new(-1.0, -1.0, -1.0), 1.0e-6));
        assert!(close(e.hitbox_center(), Vector3::zeros(), 1.0e-6));
        assert!(bbox_follows(&e));
    }

    #[test]
    fn hitbox_visibility_toggles() {
        let mut e = Entity::cube("a", false);
        assert!(!e.is_hitbox_shown());
        e.toggle_hitbox();
        assert!(e.is_hitbox_shown());
        e.hide_hitbox();
        assert!(!e.is_hitbox_shown());
        e.show_hitbox();
        assert!(e.is_hitbox_shown());
    }

    #[test]
    fn intersects_records_the_touching_side() {
        let mut cube = Entity::cube("cube", false);
        let floor = Entity::plane("floor", 10.0, 10.0);
        cube.set_position(Vector3::new(0.0, 0.45, 0.0));

        assert!(cube.intersects(&floor));
        assert!(cube.is_touching(CollisionSide::Bottom));
        assert!(!cube.is_touching(CollisionSide::Top));

        cube.set_position(Vector3::new(0.0, 3.0, 0.0));
        assert!(!cube.intersects(&floor));
        assert!(cube.collision_sides().is_empty());
    }

    #[test]
    fn set_rotation_x_replaces_only_pitch() {
        let mut e = Entity::cube("a", false);
        e.set_position(Vector3::new(1.0, 2.0, 3.0));
        e.set_uniform_scale(2.0);
        e.set_rotation(Vector3::new(0.2, 0.4, -0.6));

        e.set_rotation_x(1.0);
        assert!(close(e.rotation(), Vector3::new(1.0, 0.4, -0.6), 1.0e-4), "{:?}", e.rotation());
        assert!(close(e.position(), Vector3::new(1.0, 2.0, 3.0), 1.0e-5));
        assert!(close(e.scale(), Vector3::new(2.0, 2.0, 2.0), 1.0e-4));

        e.set_rotation_y(-0.3).set_rotation_z(0.9);
        assert!(close(e.rotation(), Vector3::new(1.0, -0.3, 0.9), 1.0e-4), "{:?}", e.rotation());
    }

    #[test]
    fn degree_rotation_matches_radian_rotation() {
        let degrees = Vector3::new(30.0, -45.0, 60.0);

        let mut a = Entity::cube("a", false);
        a.set_rotation_degrees(degrees);
        let mut b = Entity::cube("b", false);
        b.set_rotation(degrees.map(f32::to_radians));

        assert!((a.model() - b.model()).amax() < 1.0e-6);
        assert!(close(a.rotation_degrees(), degrees, 1.0e-3), "{:?}", a.rotation_degrees());
    }

    #[test]
    fn gimbal_locked_rotation_reports_zero_roll() {
        use std::f32::consts::FRAC_PI_2;

        let mut e = Entity::cube("a", false);
        e.set_rotation(Vector3::new(0.3, FRAC_PI_2, 0.2));
        let reported = e.rotation();

        // At yaw = 90 degrees only pitch - roll is observable; it all lands in pitch.
        assert_eq!(reported.z, 0.0);
        assert!((reported.x - 0.1).abs() < 1.0e-3, "{reported:?}");
        assert!((reported.y - FRAC_PI_2).abs() < 1.0e-3, "{reported:?}");

        // Rebuilding from the reported angles gives the same orientation.
        let model = *e.model();
        e.set_rotation(reported);
        assert!((e.model() - model).amax() < 1.0e-3);
    }

    #[test]
    fn rotate_about_near_zero_axis_is_ignored() {
        let mut e = Entity::cube("a", false);
        let before = *e.model();
        e.rotate(1.0, Vector3::new(1.0e-7, 0.0, 0.0));
        assert_eq!(*e.model(), before);

        e.rotate(1.0, Vector3::new(1.0e-3, 0.0, 0.0));
        assert!(close(e.rotation(), Vector3::new(1.0, 0.0, 0.0), 1.0e-5));
    }

    #[test]
    fn presets_pick_profile_and_gravity() {
        let player = Entity::player("hero");
        assert!(player.apply_gravity);
        assert_eq!(player.profile, PhysicsProfile::HighStability);
        assert!(player.profile.locks_rotations());

        let floor = Entity::plane("floor", 4.0, 4.0);
        assert!(!floor.apply_gravity);
        assert!(floor.default_bounding_box_max().y.abs() < 1.0e-6);
    }
}
