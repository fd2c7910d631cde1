use crate::core::bound::Bounded;
use crate::core::geometry::ray::Ray;
use crate::core::intersection::Intersection;
use crate::core::material::Material;

/// Contract shared by every geometric primitive.
///
/// `intersect` writes into the shared accumulator only when it finds a
/// strictly closer positive hit; absence of an update *is* the "no closer
/// hit" result, so the protocol is associative and commutative over any
/// candidate set. Implementations must route candidate hits through
/// `Intersection::record` rather than assigning fields directly.
pub trait Primitive: Bounded + Send + Sync {
    fn material(&self) -> &dyn Material;

    fn intersect<'a>(&'a self, ray: &Ray, isect: &mut Intersection<'a>);

    /// Cheap conservative admission test; callers skip `intersect` when
    /// this is false.
    fn admits(&self, ray: &Ray) -> bool {
        return self.bound().admits(ray);
    }
}
