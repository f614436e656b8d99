//! Declarative local-space hitboxes.
//!
//! A [`HitboxConfig`] describes a box by its extents and where the entity origin
//! sits inside it, instead of by raw corners:
//!
//! - `ground_offset` is the fraction of `height` below the origin.
//!   `0.5` centres the box on the origin, `1.0` puts the origin on the top face,
//!   `0.0` puts it on the bottom face.
//! - `center_offset` shifts the whole box in local space.
//!
//! The config is not applied automatically: call
//! [`Entity::apply_hitbox_config`](crate::Entity::apply_hitbox_config) (or
//! `set_hitbox_config`) after changing it.

use nalgebra::Vector3;

use crate::error::{PhysicsError, Result};

#[derive(Clone, Copy, Debug, PartialEq)]
pub struct HitboxConfig {
    /// Extent along X (meters).
    pub width: f32,
    /// Extent along Y (meters).
    pub height: f32,
    /// Extent along Z (meters).
    pub length: f32,
    /// Portion of the height below the origin, in `[0, 1]`.
    pub ground_offset: f32,
    /// Local-space shift applied to both corners.
    pub center_offset: Vector3<f32>,
}

impl Default for HitboxConfig {
    fn default() -> Self {
        Self {
            width: 1.0,
            height: 1.0,
            length: 1.0,
            ground_offset: 0.5,
            center_offset: Vector3::zeros(),
        }
    }
}

impl HitboxConfig {
    pub fn new(width: f32, height: f32, length: f32, ground_offset: f32) -> Self {
        Self {
            width,
            height,
            length,
            ground_offset,
            center_offset: Vector3::zeros(),
        }
    }

    pub fn with_center_offset(mut self, offset: Vector3<f32>) -> Self {
        self.center_offset = offset;
        self
    }

    /// Minimum corner in local space.
    pub fn calculate_min(&self) -> Vector3<f32> {
        let half_width = self.width * 0.5;
        let half_length = self.length * 0.5;
        let bottom_y = -self.height * self.ground_offset;

        Vector3::new(-half_width, bottom_y, -half_length) + self.center_offset
    }

    /// Maximum corner in local space.
    pub fn calculate_max(&self) -> Vector3<f32> {
        let half_width = self.width * 0.5;
        let half_length = self.length * 0.5;
        let top_y = self.height * (1.0 - self.ground_offset);

        Vector3::new(half_width, top_y, half_length) + self.center_offset
    }

    /// `(width, height, length)`.
    #[inline]
    pub fn size(&self) -> Vector3<f32> {
        Vector3::new(self.width, self.height, self.length)
    }

    /// Local-space centre of the box, i.e. where its collider sits relative to
    /// the entity origin.
    #[inline]
    pub fn center(&self) -> Vector3<f32> {
        (self.calculate_min() + self.calculate_max()) * 0.5
    }

    /// Reject zero/negative/non-finite extents and ground offsets outside `[0, 1]`.
    ///
    /// `calculate_min`/`calculate_max` never call this; a degenerate config
    /// still yields a (flat or inverted) box.
    pub fn validate(&self) -> Result<()> {
        let extent_ok = |v: f32| v.is_finite() && v > 0.0;
        let offset_ok = (0.0..=1.0).contains(&self.ground_offset);

        if extent_ok(self.width) && extent_ok(self.height) && extent_ok(self.length) && offset_ok
        {
            return Ok(());
        }

        Err(PhysicsError::DegenerateHitbox {
            width: self.width,
            height: self.height,
            length: self.length,
            ground_offset: self.ground_offset,
        })
    }

    /// Thin upright box standing on the origin.
    pub fn for_player(width: f32, height: f32, length: f32, ground_offset: f32) -> Self {
        Self::new(width, height, length, ground_offset)
    }

    /// [`for_player`](Self::for_player) with the stock 0.2 x 0.4 x 0.2 size.
    pub fn default_player() -> Self {
        Self::for_player(0.2, 0.4, 0.2, 1.0)
    }

    /// Symmetric cube; `ground_offset = 0.5` centres it on the origin.
    pub fn for_cube(size: f32, ground_offset: f32) -> Self {
        Self::new(size, size, size, ground_offset)
    }

    /// [`for_cube`](Self::for_cube) with a unit, centred cube.
    pub fn default_cube() -> Self {
        Self::for_cube(1.0, 0.5)
    }

    /// Flat slab whose top face is at the origin.
    pub fn for_plane(width: f32, length: f32, thickness: f32) -> Self {
        Self::new(width, thickness, length, 1.0)
    }

    /// [`for_plane`](Self::for_plane) with the stock 0.1 thickness.
    pub fn default_plane(width: f32, length: f32) -> Self {
        Self::for_plane(width, length, 0.1)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn close(a: Vector3<f32>, b: Vector3<f32>) -> bool {
        (a - b).norm() < 1.0e-6
    }

    #[test]
    fn extents_match_dimensions_for_any_ground_offset() {
        for &g in &[0.0, 0.25, 0.5, 0.75, 1.0] {
            let cfg = HitboxConfig::new(2.0, 3.0, 4.0, g);
            let size = cfg.calculate_max() - cfg.calculate_min();
            assert!(close(size, Vector3::new(2.0, 3.0, 4.0)), "g={g}: {size:?}");
            assert!((cfg.calculate_min().y + 3.0 * g).abs() < 1.0e-6);
        }
    }

    #[test]
    fn centred_cube_is_symmetric_about_origin() {
        let cfg = HitboxConfig::for_cube(2.0, 0.5);
        assert!(close(cfg.calculate_min(), Vector3::new(-1.0, -1.0, -1.0)));
        assert!(close(cfg.calculate_max(), Vector3::new(1.0, 1.0, 1.0)));
        assert!(close(cfg.center(), Vector3::zeros()));
    }

    #[test]
    fn full_ground_offset_puts_the_top_face_on_the_origin() {
        let cfg = HitboxConfig::default_plane(10.0, 6.0);
        assert!((cfg.calculate_max().y).abs() < 1.0e-6);
        assert!((cfg.calculate_min().y + 0.1).abs() < 1.0e-6);
        assert!((cfg.calculate_max().x - 5.0).abs() < 1.0e-6);
        assert!((cfg.calculate_max().z - 3.0).abs() < 1.0e-6);
    }

    #[test]
    fn center_offset_shifts_both_corners() {
        let offset = Vector3::new(0.5, -1.0, 2.0);
        let base = HitboxConfig::default_cube();
        let shifted = base.with_center_offset(offset);

        assert!(close(shifted.calculate_min(), base.calculate_min() + offset));
        assert!(close(shifted.calculate_max(), base.calculate_max() + offset));
        assert!(close(shifted.center(), offset));
    }

    #[test]
    fn player_preset_is_thin_and_upright() {
        let cfg = HitboxConfig::default_player();
        assert!(close(cfg.size(), Vector3::new(0.2, 0.4, 0.2)));
        assert_eq!(cfg.ground_offset, 1.0);
        assert!(cfg.validate().is_ok());
    }

    #[test]
    fn validate_rejects_degenerate_boxes_but_calculation_still_runs() {
        let flat = HitboxConfig::new(1.0, 0.0, 1.0, 0.5);
        assert!(matches!(
            flat.validate(),
            Err(PhysicsError::DegenerateHitbox { height, .. }) if height == 0.0
        ));
        assert_eq!(flat.calculate_min().y, flat.calculate_max().y);

        let bad_offset = HitboxConfig::new(1.0, 1.0, 1.0, 1.5);
        assert!(bad_offset.validate().is_err());
    }
}
