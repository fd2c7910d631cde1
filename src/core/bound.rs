use crate::core::base::*;
use crate::core::geometry::ray::Ray;

use std::sync::atomic::{AtomicU64, Ordering};

/// Identity source for everything the spatial machinery can address.
/// Allocated ids are even and strictly increasing; ids 0 and 1 are reserved
/// sentinels (0 marks "no item" in an intersection record, and the low bit
/// of any reported id carries the front/back facing flag, never identity).
///
/// The allocator is owned by the scene-construction context and passed to
/// constructors explicitly, so parallel scene builds stay reproducible.
#[derive(Debug)]
pub struct IdAllocator {
    next: AtomicU64,
}

/// Sentinel id of an intersection record that has not accepted a hit.
pub const NO_ITEM_ID: u64 = 0;

impl IdAllocator {
    pub const FIRST_ID: u64 = 2;

    pub fn new() -> Self {
        IdAllocator {
            next: AtomicU64::new(Self::FIRST_ID),
        }
    }

    pub fn allocate(&self) -> u64 {
        return self.next.fetch_add(2, Ordering::Relaxed);
    }
}

impl Default for IdAllocator {
    fn default() -> Self {
        Self::new()
    }
}

/// Candidate produced by the full ray/sphere solve. `front` is true when
/// the surface normal faces against the ray direction, i.e. the ray arrived
/// from outside.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct SphereHit {
    pub t: Float,
    pub normal: Normal3f,
    pub front: bool,
}

/// Minimal sphere bound with identity. An infinite radius means
/// "unbounded": such a bound admits every ray.
///
/// `Clone` copies the source's `item_id` verbatim; a clone aliases the
/// identity of its source rather than allocating a fresh one. Callers that
/// need a distinct identity must construct a new instance.
#[derive(Debug, Clone)]
pub struct BoundingSphere {
    pub center: Point3f,
    pub radius: Float,
    /// Opaque caller tag; not interpreted here.
    pub user_index: u32,
    /// Opaque caller tag; not interpreted here.
    pub user_group: u32,
    item_id: u64,
}

impl BoundingSphere {
    pub fn new(ids: &IdAllocator, center: &Point3f, radius: Float) -> Self {
        BoundingSphere {
            center: *center,
            radius,
            user_index: 0,
            user_group: 0,
            item_id: ids.allocate(),
        }
    }

    /// Bound that admits every ray.
    pub fn unbounded(ids: &IdAllocator) -> Self {
        return BoundingSphere::new(ids, &Point3f::ZERO, Float::INFINITY);
    }

    #[inline]
    pub fn item_id(&self) -> u64 {
        return self.item_id;
    }

    /// The even item id with the facing flag ORed into the low bit
    /// (1 = front face).
    #[inline]
    pub fn face_id(&self, front: bool) -> u64 {
        return self.item_id | front as u64;
    }

    /// Admission test: true iff the ray's closest point of approach to the
    /// center lies within the radius. Constant time, no allocation.
    pub fn admits(&self, ray: &Ray) -> bool {
        let a = ray.o - self.center;
        let ad_sq = a.length_squared() - self.radius * self.radius;
        if ad_sq <= 0.0 {
            // Ray origin is inside the sphere.
            return true;
        }
        let b = a.dot(ray.d);
        if b > 0.0 {
            // Center is behind the ray origin and receding.
            return false;
        }
        return ad_sq - b * b <= 0.0;
    }

    /// Full ray/sphere solve. The entry root is preferred when it lies
    /// ahead of the origin, else the exit root (ray starting inside); a
    /// negative discriminant or a sphere entirely behind the origin is a
    /// silent miss.
    pub fn intersect_sphere(&self, ray: &Ray) -> Option<SphereHit> {
        let oc = ray.o - self.center;
        let a = ray.d.length_squared();
        let b = 2.0 * ray.d.dot(oc);
        let c = oc.length_squared() - self.radius * self.radius;

        let d = b * b - 4.0 * a * c;
        if d < 0.0 || a == 0.0 {
            return None;
        }
        let root_d = Float::sqrt(d);
        let inv_2a = 0.5 / a;
        let t0 = (-b - root_d) * inv_2a;
        let t1 = (-b + root_d) * inv_2a;

        let t = if t0 > DIST_EPSILON {
            t0
        } else if t1 > DIST_EPSILON {
            t1
        } else {
            return None;
        };

        let normal = (ray.position(t) - self.center).normalize_or_zero();
        let front = normal.dot(ray.d) < 0.0;
        return Some(SphereHit { t, normal, front });
    }
}

/// Anything the spatial query machinery can index: geometric primitives and
/// stored photons alike.
pub trait Bounded {
    fn bound(&self) -> &BoundingSphere;
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_001() {
        let ids = IdAllocator::new();
        let b0 = BoundingSphere::new(&ids, &Point3f::ZERO, 1.0);
        let b1 = BoundingSphere::new(&ids, &Point3f::ZERO, 1.0);
        assert_eq!(b0.item_id(), 2);
        assert_eq!(b1.item_id(), 4);
        assert_eq!(b0.item_id() & 1, 0);

        // A clone aliases identity.
        let b2 = b0.clone();
        assert_eq!(b2.item_id(), b0.item_id());

        assert_eq!(b0.face_id(true), 3);
        assert_eq!(b0.face_id(false), 2);
    }

    #[test]
    fn test_002() {
        let ids = IdAllocator::new();
        let b = BoundingSphere::new(&ids, &Point3f::ZERO, 1.0);
        let d = Vector3f::new(-1.0, 0.0, 0.0);

        // Through the center.
        assert!(b.admits(&Ray::new(&Point3f::new(2.0, 0.0, 0.0), &d)));
        // Tangent.
        assert!(b.admits(&Ray::new(&Point3f::new(2.0, 1.0, 0.0), &d)));
        // Missing by a little.
        assert!(!b.admits(&Ray::new(&Point3f::new(2.0, 1.001, 0.0), &d)));
        // Sphere behind the origin.
        assert!(!b.admits(&Ray::new(
            &Point3f::new(2.0, 0.0, 0.0),
            &Vector3f::new(1.0, 0.0, 0.0)
        )));
        // Origin inside always admits.
        assert!(b.admits(&Ray::new(
            &Point3f::new(0.5, 0.0, 0.0),
            &Vector3f::new(1.0, 0.0, 0.0)
        )));
    }

    #[test]
    fn test_003() {
        let ids = IdAllocator::new();
        let b = BoundingSphere::unbounded(&ids);
        let r = Ray::new(&Point3f::new(1e6, -1e6, 3.0), &Vector3f::new(0.0, 1.0, 0.0));
        assert!(b.admits(&r));
    }

    #[test]
    fn test_004() {
        let ids = IdAllocator::new();
        let b = BoundingSphere::new(&ids, &Point3f::ZERO, 1.0);
        let r = Ray::new(&Point3f::new(2.0, 0.0, 0.0), &Vector3f::new(-1.0, 0.0, 0.0));
        let hit = b.intersect_sphere(&r).unwrap();
        assert!((hit.t - 1.0).abs() < 1e-5);
        assert_eq!(hit.normal, Normal3f::new(1.0, 0.0, 0.0));
        assert!(hit.front);

        // From inside: the exit root wins and the hit is a back face.
        let r2 = Ray::new(&Point3f::ZERO, &Vector3f::new(-1.0, 0.0, 0.0));
        let hit2 = b.intersect_sphere(&r2).unwrap();
        assert!((hit2.t - 1.0).abs() < 1e-5);
        assert!(!hit2.front);

        // Sphere behind.
        let r3 = Ray::new(&Point3f::new(2.0, 0.0, 0.0), &Vector3f::new(1.0, 0.0, 0.0));
        assert!(b.intersect_sphere(&r3).is_none());
    }
}
