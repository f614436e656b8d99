//! Affine matrix decomposition helpers.
//!
//! Matrices are nalgebra column-vector transforms: the basis vectors are the
//! first three columns and the translation is the fourth. A model matrix is
//! expected to be `T * R * S` (no shear); decomposition divides each basis
//! column by its own length, so a collapsed axis yields non-finite rotation.

use nalgebra::{Matrix4, Rotation3, Vector3};

use crate::constants::GIMBAL_LOCK_EPS;

/// Translation column.
#[inline]
pub fn translation_of(m: &Matrix4<f32>) -> Vector3<f32> {
    Vector3::new(m[(0, 3)], m[(1, 3)], m[(2, 3)])
}

/// Basis column `i` of the upper-left 3x3 block.
#[inline]
pub fn basis_column(m: &Matrix4<f32>, i: usize) -> Vector3<f32> {
    Vector3::new(m[(0, i)], m[(1, i)], m[(2, i)])
}

/// Per-axis scale: the lengths of the three basis columns.
#[inline]
pub fn scale_of(m: &Matrix4<f32>) -> Vector3<f32> {
    Vector3::new(
        basis_column(m, 0).norm(),
        basis_column(m, 1).norm(),
        basis_column(m, 2).norm(),
    )
}

/// Euler angles `(pitch, yaw, roll)` (rotation about X, Y, Z) of the unscaled
/// basis of `m`.
///
/// The basis is read as `Rz(roll) * Ry(yaw) * Rx(pitch)`. When `cos(yaw)`
/// drops to [`GIMBAL_LOCK_EPS`] the roll is folded into pitch and reported as
/// zero.
pub fn euler_from_matrix(m: &Matrix4<f32>) -> Vector3<f32> {
    let scale = scale_of(m);

    // Named after the row-major layout: m_ij is row i, column j of the transposed basis.
    let m11 = m[(0, 0)] / scale.x;
    let m12 = m[(1, 0)] / scale.x;
    let m13 = m[(2, 0)] / scale.x;
    let m22 = m[(1, 1)] / scale.y;
    let m23 = m[(2, 1)] / scale.y;
    let m32 = m[(1, 2)] / scale.z;
    let m33 = m[(2, 2)] / scale.z;

    // Rounding can push |sy| a hair past 1; asin would return NaN.
    let sy = (-m13).clamp(-1.0, 1.0);
    let cy = (1.0 - sy * sy).sqrt();

    if cy > GIMBAL_LOCK_EPS {
        Vector3::new(m23.atan2(m33), sy.asin(), m12.atan2(m11))
    } else {
        Vector3::new((-m32).atan2(m22), sy.asin(), 0.0)
    }
}

/// Homogeneous rotation for Euler angles `(pitch, yaw, roll)`, the inverse of
/// [`euler_from_matrix`] away from gimbal lock.
#[inline]
pub fn rotation_from_euler(euler: &Vector3<f32>) -> Matrix4<f32> {
    Rotation3::from_euler_angles(euler.x, euler.y, euler.z).to_homogeneous()
}

/// Build `T(position) * R(euler) * S(scale)`.
pub fn compose(position: &Vector3<f32>, euler: &Vector3<f32>, scale: &Vector3<f32>) -> Matrix4<f32> {
    Matrix4::new_translation(position)
        * rotation_from_euler(euler)
        * Matrix4::new_nonuniform_scaling(scale)
}

#[inline]
pub fn degrees_to_radians(v: &Vector3<f32>) -> Vector3<f32> {
    v.map(f32::to_radians)
}

#[inline]
pub fn radians_to_degrees(v: &Vector3<f32>) -> Vector3<f32> {
    v.map(f32::to_degrees)
}
