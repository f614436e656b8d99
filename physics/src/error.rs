use thiserror::Error;

/// Errors surfaced by the transform and physics layer.
///
/// Lookup misses (unknown entity ids) are not errors: they are logged and
/// ignored. Only call-sequence mistakes and explicit validation fail.
#[derive(Debug, Clone, PartialEq, Error)]
pub enum PhysicsError {
    /// `release` was called without a prior `set_default`.
    #[error("unable to release lock state as it has not been created")]
    NoDefaultSnapshot,

    /// A hitbox with non-positive extents or an out-of-range ground offset.
    #[error(
        "degenerate hitbox: width={width}, height={height}, length={length}, ground_offset={ground_offset}"
    )]
    DegenerateHitbox {
        width: f32,
        height: f32,
        length: f32,
        ground_offset: f32,
    },
}

pub type Result<T, E = PhysicsError> = std::result::Result<T, E>;
