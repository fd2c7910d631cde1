use crate::core::prelude::*;

/// Disk-shaped Lambertian emitter: photons leave from a uniform point on
/// the disk with a cosine-lobe direction about the emitting side.
pub struct AreaLight {
    center: Point3f,
    normal: Normal3f,
    radius: Float,
    power: Spectrum,
}

impl AreaLight {
    pub fn new(center: &Point3f, normal: &Normal3f, radius: Float, power: &Spectrum) -> Self {
        AreaLight {
            center: *center,
            normal: normal.normalize(),
            radius,
            power: *power,
        }
    }
}

impl Light for AreaLight {
    fn power(&self) -> Spectrum {
        return self.power;
    }

    fn emit_photon(
        &self,
        ids: &IdAllocator,
        energy: &Spectrum,
        sampler: &mut dyn Sampler,
    ) -> Photon {
        let d = concentric_sample_disk(&sampler.next_2d()) * self.radius;
        let (t, b) = coordinate_system(&self.normal);
        let origin = self.center + t * d.x + b * d.y;
        let dir = cosine_sample_around(&self.normal, &sampler.next_2d());
        return Photon::new(ids, &origin, &dir, energy);
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_001() {
        let ids = IdAllocator::new();
        let light = AreaLight::new(
            &Point3f::new(0.0, 3.0, 0.0),
            &Normal3f::new(0.0, -1.0, 0.0),
            0.5,
            &Spectrum::from_scalar(25.0),
        );
        let mut rng = Rng::with_sequence(4);
        for _ in 0..200 {
            let p = light.emit_photon(&ids, &Spectrum::one(), &mut rng);
            // Emitted from the disk plane...
            assert!((p.position().y - 3.0).abs() < 1e-5);
            assert!(
                Point3f::new(p.position().x, 0.0, p.position().z).length() <= 0.5 + 1e-5
            );
            // ...into the emitting hemisphere.
            assert!(p.norm_dir.y <= 0.0);
        }
    }
}
