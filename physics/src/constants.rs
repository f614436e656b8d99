/// Gravitational acceleration applied to dynamic bodies (m/s^2).
///
/// Convention: Y is up, so the default pulls along -Y.
pub const GRAVITY_MPS2: f32 = -9.81;

/// Smallest full extent (meters) a box collider may have on any axis.
///
/// Hitboxes thinner than this are clamped when the collider is built so the
/// backend never sees a zero-volume cuboid.
pub const MIN_COLLIDER_EXTENT: f32 = 0.01;

/// Threshold on `cos(yaw)` below which Euler extraction treats the basis as
/// gimbal-locked and pins roll to zero.
pub const GIMBAL_LOCK_EPS: f32 = 1.0e-6;

/// Basis column lengths below this are treated as a collapsed axis.
pub const SCALE_EPS: f32 = 1.0e-8;

/// Rotation axes shorter than this cannot be normalized; the rotation is skipped.
pub const AXIS_EPS: f32 = 1.0e-6;

/// Friction coefficient written into every solver contact.
pub const CONTACT_FRICTION: f32 = 0.8;

/// Restitution written into every solver contact. Zero keeps stacked boxes quiet.
pub const CONTACT_RESTITUTION: f32 = 0.0;

/// Maximum speed (m/s) at which the solver may push overlapping bodies apart.
pub const MAX_RECOVERY_VELOCITY: f32 = 1.0;

/// Linear damping for dynamic bodies with the standard profile.
pub const STANDARD_LINEAR_DAMPING: f32 = 0.01;

/// Linear damping for dynamic bodies with the high-stability profile.
pub const HIGH_STABILITY_LINEAR_DAMPING: f32 = 0.2;

/// Mass multiplier for high-stability bodies. Heavier bodies are pushed around
/// less by light props they land on.
pub const HIGH_STABILITY_INERTIA_MULTIPLIER: f32 = 2.0;

/// Number of pipeline steps one `update` is split into.
pub const DEFAULT_SUBSTEPS: u32 = 1;

/// Extra solver iterations granted to every body on top of rapier's default.
pub const DEFAULT_ADDITIONAL_SOLVER_ITERATIONS: usize = 0;
