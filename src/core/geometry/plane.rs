use crate::core::base::*;
use crate::core::geometry::ray::Ray;

/// Infinite plane through `point` with unit `normal`. Supporting geometry
/// for the triangle-model intersector and for mesh-trimming utilities.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Plane {
    pub point: Point3f,
    pub normal: Normal3f,
}

impl Plane {
    pub fn new(point: &Point3f, normal: &Normal3f) -> Self {
        Plane {
            point: *point,
            normal: normal.normalize(),
        }
    }

    /// Plane containing the three points, with normal `(b-a) x (c-a)`.
    /// Returns `None` for collinear points.
    pub fn from_points(a: &Point3f, b: &Point3f, c: &Point3f) -> Option<Self> {
        let n = (*b - *a).cross(*c - *a);
        if n.length_squared() <= 0.0 {
            return None;
        }
        return Some(Plane::new(a, &n));
    }

    #[inline]
    pub fn signed_distance(&self, p: &Point3f) -> Float {
        return self.normal.dot(*p - self.point);
    }

    /// Distance along the ray to the plane. A ray parallel to the plane, or
    /// one that would hit behind its origin, yields `None`.
    pub fn intersect_ray(&self, ray: &Ray) -> Option<Float> {
        let denom = self.normal.dot(ray.d);
        if denom == 0.0 {
            return None;
        }
        let t = -self.signed_distance(&ray.o) / denom;
        if t < DIST_EPSILON {
            return None;
        }
        return Some(t);
    }
}
