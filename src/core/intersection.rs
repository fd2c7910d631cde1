use crate::core::base::*;
use crate::core::bound::NO_ITEM_ID;
use crate::core::geometry::ray::Ray;
use crate::core::primitive::Primitive;

/// Nearest-hit accumulator shared by every primitive test of one query.
///
/// `distance` only ever decreases, and `normal`/`item_id`/`item` change
/// together with it, so primitives may be tested in any order. One instance
/// belongs to exactly one in-flight query; it is not meant to be shared
/// across concurrently executing queries.
pub struct Intersection<'a> {
    pub ray_id0: u64,
    pub ray_id1: u32,
    pub distance: Float,
    pub normal: Normal3f,
    pub item_id: u64,
    pub item: Option<&'a dyn Primitive>,
}

impl<'a> Intersection<'a> {
    /// Accumulator seeded to "no hit yet".
    pub fn new(ray: &Ray) -> Self {
        return Intersection::with_bound(ray, Float::INFINITY);
    }

    /// Accumulator seeded with a prior upper bound, for shadow/any-hit
    /// style queries that only care about hits closer than `t_max`.
    pub fn with_bound(ray: &Ray, t_max: Float) -> Self {
        Intersection {
            ray_id0: ray.id0,
            ray_id1: ray.id1,
            distance: t_max,
            normal: Normal3f::ZERO,
            item_id: NO_ITEM_ID,
            item: None,
        }
    }

    /// Accept a candidate hit iff it is ahead of the ray origin and
    /// strictly closer than the best hit so far. All four hit fields are
    /// overwritten together; returns whether the candidate was accepted.
    pub fn record(
        &mut self,
        t: Float,
        normal: &Normal3f,
        item_id: u64,
        item: &'a dyn Primitive,
    ) -> bool {
        if t < DIST_EPSILON || t >= self.distance {
            return false;
        }
        self.distance = t;
        self.normal = *normal;
        self.item_id = item_id;
        self.item = Some(item);
        return true;
    }

    #[inline]
    pub fn is_hit(&self) -> bool {
        return self.item.is_some();
    }

    /// Facing flag carried in the low bit of the reported id.
    #[inline]
    pub fn front_face(&self) -> bool {
        return self.item_id & 1 == 1;
    }

    /// The even identity of the hit item, facing bit stripped.
    #[inline]
    pub fn hit_item_id(&self) -> u64 {
        return self.item_id & !1;
    }
}
