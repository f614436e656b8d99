/*!
Collision data types shared by the contact plumbing.

Nothing here runs an algorithm. These are the values exchanged between:
- narrow_phase (rapier hooks recording touching body pairs during a step)
- events (turning per-step pairs into enter/stay/exit notifications)
- aabb (render-side overlap tests on entity bounding boxes)
- the entity, which keeps the set of sides currently touching something
*/

use nalgebra as na;

use crate::{bitmask_flags::BitmaskFlags, define_bitmask_flags, entity::EntityId};

pub type Vec3 = na::Vector3<f32>;
pub type Point = na::Point3<f32>;

define_bitmask_flags!(
    /// Face of an entity's hitbox. `Top` is +Y, `Right` is +X, `Front` is +Z.
    CollisionSide,
    u8,
    {
        Top,
        Bottom,
        Left,
        Right,
        Front,
        Back,
    }
);

/// Sides of one hitbox currently in contact.
pub type CollisionSides = BitmaskFlags<u8>;

impl CollisionSide {
    /// Side of a hitbox facing along `normal`, picked by its dominant axis.
    ///
    /// Ties prefer Y, then X, so a box resting on a corner reports `Bottom`.
    pub fn from_normal(normal: &Vec3) -> Self {
        let (ax, ay, az) = (normal.x.abs(), normal.y.abs(), normal.z.abs());
        if ay >= ax && ay >= az {
            if normal.y >= 0.0 {
                Self::Top
            } else {
                Self::Bottom
            }
        } else if ax >= az {
            if normal.x >= 0.0 {
                Self::Right
            } else {
                Self::Left
            }
        } else if normal.z >= 0.0 {
            Self::Front
        } else {
            Self::Back
        }
    }
}

/// Contact geometry reported with a collision event.
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct Contact {
    /// World-space point of the first solver contact.
    pub point: Point,
    /// World-space unit normal, pointing from the first entity toward the second.
    pub normal: Vec3,
}

impl Contact {
    /// The same contact seen from the other participant.
    #[inline]
    pub fn flipped(&self) -> Self {
        Self {
            point: self.point,
            normal: -self.normal,
        }
    }
}

#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
pub enum CollisionKind {
    /// First step a pair touches.
    Enter,
    /// Every further step the pair keeps touching.
    Stay,
    /// First step a previously touching pair no longer does.
    Exit,
}

/// One collision notification between two registered entities.
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct CollisionEvent {
    pub kind: CollisionKind,
    pub a: EntityId,
    pub b: EntityId,
    pub contact: Contact,
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn dominant_axis_picks_side() {
        assert_eq!(CollisionSide::from_normal(&Vec3::new(0.1, -0.9, 0.2)), CollisionSide::Bottom);
        assert_eq!(CollisionSide::from_normal(&Vec3::new(0.0, 1.0, 0.0)), CollisionSide::Top);
        assert_eq!(CollisionSide::from_normal(&Vec3::new(-0.8, 0.3, 0.1)), CollisionSide::Left);
        assert_eq!(CollisionSide::from_normal(&Vec3::new(0.8, 0.3, 0.1)), CollisionSide::Right);
        assert_eq!(CollisionSide::from_normal(&Vec3::new(0.1, 0.1, 0.9)), CollisionSide::Front);
        assert_eq!(CollisionSide::from_normal(&Vec3::new(0.1, 0.1, -0.9)), CollisionSide::Back);
    }

    #[test]
    fn flipped_contact_reverses_normal_only() {
        let c = Contact {
            point: Point::new(1.0, 2.0, 3.0),
            normal: Vec3::y(),
        };
        let f = c.flipped();
        assert_eq!(f.point, c.point);
        assert_eq!(f.normal, -Vec3::y());
    }
}
