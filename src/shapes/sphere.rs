use crate::core::prelude::*;

/// Sphere primitive; its geometry *is* its bounding sphere.
#[derive(Clone)]
pub struct Sphere {
    bound: BoundingSphere,
    material: Box<dyn Material>,
}

impl Sphere {
    pub fn new(
        ids: &IdAllocator,
        center: &Point3f,
        radius: Float,
        material: Box<dyn Material>,
    ) -> Self {
        Sphere {
            bound: BoundingSphere::new(ids, center, radius),
            material,
        }
    }

    #[inline]
    pub fn item_id(&self) -> u64 {
        return self.bound.item_id();
    }
}

impl Bounded for Sphere {
    fn bound(&self) -> &BoundingSphere {
        return &self.bound;
    }
}

impl Primitive for Sphere {
    fn material(&self) -> &dyn Material {
        return self.material.as_ref();
    }

    fn intersect<'a>(&'a self, ray: &Ray, isect: &mut Intersection<'a>) {
        if let Some(hit) = self.bound.intersect_sphere(ray) {
            isect.record(hit.t, &hit.normal, self.bound.face_id(hit.front), self);
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::materials::MatteMaterial;

    fn unit_sphere(ids: &IdAllocator) -> Sphere {
        return Sphere::new(
            ids,
            &Point3f::ZERO,
            1.0,
            Box::new(MatteMaterial::new(&Spectrum::from_scalar(0.5))),
        );
    }

    #[test]
    fn test_001() {
        // Entry hit from (2,0,0) along -x: distance 1, normal +x, front face.
        let ids = IdAllocator::new();
        let s = unit_sphere(&ids);
        let ray = Ray::new(&Point3f::new(2.0, 0.0, 0.0), &Vector3f::new(-1.0, 0.0, 0.0));
        let mut isect = Intersection::new(&ray);
        s.intersect(&ray, &mut isect);

        assert!(isect.is_hit());
        assert!((isect.distance - 1.0).abs() < 1e-5);
        assert_eq!(isect.normal, Normal3f::new(1.0, 0.0, 0.0));
        assert!(isect.front_face());
        assert_eq!(isect.hit_item_id(), s.item_id());
    }

    #[test]
    fn test_002() {
        // Seeding the accumulator below the entry distance suppresses the
        // update entirely.
        let ids = IdAllocator::new();
        let s = unit_sphere(&ids);
        let ray = Ray::new(&Point3f::new(2.0, 0.0, 0.0), &Vector3f::new(-1.0, 0.0, 0.0));
        let mut isect = Intersection::with_bound(&ray, 0.5);
        s.intersect(&ray, &mut isect);
        assert!(!isect.is_hit());
        assert_eq!(isect.distance, 0.5);
    }

    #[test]
    fn test_003() {
        // From inside the sphere the exit root is reported as a back face.
        let ids = IdAllocator::new();
        let s = unit_sphere(&ids);
        let ray = Ray::new(&Point3f::ZERO, &Vector3f::new(0.0, 1.0, 0.0));
        let mut isect = Intersection::new(&ray);
        s.intersect(&ray, &mut isect);
        assert!(isect.is_hit());
        assert!((isect.distance - 1.0).abs() < 1e-5);
        assert!(!isect.front_face());
    }

    #[test]
    fn test_004() {
        // Cloned spheres intersect identically and alias identity.
        let ids = IdAllocator::new();
        let s = unit_sphere(&ids);
        let c = s.clone();
        assert_eq!(s.item_id(), c.item_id());

        let ray = Ray::new(&Point3f::new(0.3, -2.0, 0.1), &Vector3f::new(0.0, 1.0, 0.0));
        let mut a = Intersection::new(&ray);
        let mut b = Intersection::new(&ray);
        s.intersect(&ray, &mut a);
        c.intersect(&ray, &mut b);
        assert_eq!(a.distance, b.distance);
        assert_eq!(a.normal, b.normal);
        assert_eq!(a.item_id, b.item_id);
    }
}
