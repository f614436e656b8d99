/*!
Collision root module.

Contact handling between registered entities is split into:

- types:        shared data (Contact, CollisionEvent, CollisionSide)
- aabb:         world-aligned box overlap and touching-side classification
- narrow_phase: rapier hooks that set the contact material and record touching pairs
- events:       listeners and the tracker that turns pairs into enter/stay/exit
*/

pub mod aabb;
pub mod events;
pub mod narrow_phase;
pub mod types;

pub use aabb::{aabb_from_corners, overlaps, touching_sides};
pub use events::{CollisionHandler, CollisionListeners, ContactTracker, ordered_pair};
pub use narrow_phase::{ContactHooks, RawContact};
pub use types::{CollisionEvent, CollisionKind, CollisionSide, CollisionSides, Contact, Point, Vec3};
