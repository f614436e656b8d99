use rapier3d::{
    na::Point3,
    parry::bounding_volume::{Aabb, BoundingVolume},
};

use super::types::{CollisionSide, CollisionSides, Vec3};

/// World-space box from two corners.
#[inline]
pub fn aabb_from_corners(min: &Vec3, max: &Vec3) -> Aabb {
    Aabb::new(
        Point3::new(min.x, min.y, min.z),
        Point3::new(max.x, max.y, max.z),
    )
}

/// Inclusive overlap test; boxes that share a face count as touching.
#[inline]
pub fn overlaps(a: &Aabb, b: &Aabb) -> bool {
    a.intersects(b)
}

/// Which faces of `a` are pressed against `b`.
///
/// Returns an empty set when the boxes do not overlap. A side is reported when
/// `b` reaches across that face of `a` without swallowing it on the other end,
/// so a box sitting on a floor reports `Bottom` and a box fully inside a larger
/// one reports nothing.
pub fn touching_sides(a: &Aabb, b: &Aabb) -> CollisionSides {
    let mut sides = CollisionSides::default();
    if !overlaps(a, b) {
        return sides;
    }

    let (a_min, a_max) = (a.mins, a.maxs);
    let (b_min, b_max) = (b.mins, b.maxs);

    if a_max.x >= b_min.x && a_min.x < b_min.x {
        sides.add(CollisionSide::Right);
    }
    if a_min.x <= b_max.x && a_max.x > b_max.x {
        sides.add(CollisionSide::Left);
    }
    if a_max.y >= b_min.y && a_min.y < b_min.y {
        sides.add(CollisionSide::Top);
    }
    if a_min.y <= b_max.y && a_max.y > b_max.y {
        sides.add(CollisionSide::Bottom);
    }
    if a_max.z >= b_min.z && a_min.z < b_min.z {
        sides.add(CollisionSide::Front);
    }
    if a_min.z <= b_max.z && a_max.z > b_max.z {
        sides.add(CollisionSide::Back);
    }

    sides
}

#[cfg(test)]
mod tests {
    use super::*;

    fn boxed(min: [f32; 3], max: [f32; 3]) -> Aabb {
        aabb_from_corners(&Vec3::from(min), &Vec3::from(max))
    }

    #[test]
    fn separated_boxes_report_nothing() {
        let a = boxed([0.0, 0.0, 0.0], [1.0, 1.0, 1.0]);
        let b = boxed([2.0, 0.0, 0.0], [3.0, 1.0, 1.0]);
        assert!(!overlaps(&a, &b));
        assert!(touching_sides(&a, &b).is_empty());
    }

    #[test]
    fn box_resting_on_floor_touches_bottom() {
        let cube = boxed([-0.5, 0.0, -0.5], [0.5, 1.0, 0.5]);
        let floor = boxed([-5.0, -0.1, -5.0], [5.0, 0.0, 5.0]);

        let sides = touching_sides(&cube, &floor);
        assert!(sides.has(CollisionSide::Bottom));
        assert!(!sides.has(CollisionSide::Top));
        assert!(!sides.has(CollisionSide::Left));
        assert!(!sides.has(CollisionSide::Right));
    }

    #[test]
    fn overlap_from_the_right_reports_right() {
        let a = boxed([0.0, 0.0, 0.0], [1.0, 1.0, 1.0]);
        let b = boxed([0.9, 0.0, 0.0], [2.0, 1.0, 1.0]);

        let sides = touching_sides(&a, &b);
        assert!(sides.has(CollisionSide::Right));
        assert!(!sides.has(CollisionSide::Left));
    }

    #[test]
    fn enclosed_box_reports_no_side() {
        let inner = boxed([0.4, 0.4, 0.4], [0.6, 0.6, 0.6]);
        let outer = boxed([0.0, 0.0, 0.0], [1.0, 1.0, 1.0]);
        assert!(overlaps(&inner, &outer));
        assert!(touching_sides(&inner, &outer).is_empty());
    }
}
