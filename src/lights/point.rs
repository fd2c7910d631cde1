use crate::core::prelude::*;

/// Isotropic point emitter.
pub struct PointLight {
    position: Point3f,
    power: Spectrum,
}

impl PointLight {
    pub fn new(position: &Point3f, power: &Spectrum) -> Self {
        PointLight {
            position: *position,
            power: *power,
        }
    }
}

impl Light for PointLight {
    fn power(&self) -> Spectrum {
        return self.power;
    }

    fn emit_photon(
        &self,
        ids: &IdAllocator,
        energy: &Spectrum,
        sampler: &mut dyn Sampler,
    ) -> Photon {
        let dir = uniform_sample_sphere(&sampler.next_2d());
        return Photon::new(ids, &self.position, &dir, energy);
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_001() {
        let light = PointLight::new(&Point3f::new(0.0, 5.0, 0.0), &Spectrum::from_scalar(60.0));
        // 60 units of flux for one unit of time at 0.5 per quantum.
        assert_eq!(light.photon_count(0.5, 1.0), 120);
        let e = light.photon_energy(0.5, 1.0);
        assert!((e.average() - 0.5).abs() < 1e-5);
    }

    #[test]
    fn test_002() {
        let ids = IdAllocator::new();
        let light = PointLight::new(&Point3f::new(0.0, 5.0, 0.0), &Spectrum::from_scalar(60.0));
        let mut rng = Rng::with_sequence(2);
        let p = light.emit_photon(&ids, &Spectrum::from_scalar(0.5), &mut rng);
        assert_eq!(p.position(), Point3f::new(0.0, 5.0, 0.0));
        assert!((p.norm_dir.length() - 1.0).abs() < 1e-5);
        assert_eq!(p.scatter_count, 0);
    }
}
