use crate::core::prelude::*;

/// Lambertian diffuse surface.
#[derive(Debug, Clone)]
pub struct MatteMaterial {
    kd: Spectrum,
}

impl MatteMaterial {
    pub fn new(kd: &Spectrum) -> Self {
        MatteMaterial {
            kd: kd.clamp(0.0, 1.0),
        }
    }
}

impl Material for MatteMaterial {
    fn diffuse_reflectance(&self, _world_position: &Point3f) -> Spectrum {
        return self.kd;
    }

    fn bsdf(
        &self,
        dir_in: &Vector3f,
        dir_out: &Vector3f,
        normal: &Normal3f,
        _world_position: &Point3f,
    ) -> Spectrum {
        // Reflection only: both directions must share the normal's side.
        if dir_in.dot(*normal) * dir_out.dot(*normal) <= 0.0 {
            return Spectrum::zero();
        }
        return self.kd * INV_PI;
    }

    fn bsdf_peak(&self, dir_in: &Vector3f, normal: &Normal3f) -> (Vector3f, Spectrum) {
        // The cosine-weighted lobe peaks straight along the incoming-side
        // normal.
        let n = if dir_in.dot(*normal) < 0.0 {
            -*normal
        } else {
            *normal
        };
        return (n, self.kd * INV_PI);
    }

    /// Closed-form variant: cosine-lobe direction about the incoming-side
    /// normal after one colour-roulette reflectance test.
    fn scatter_photon_direct(
        &self,
        photon: &Photon,
        normal: &Normal3f,
        world_position: &Point3f,
        sampler: &mut dyn Sampler,
    ) -> Photon {
        let mut out = photon.clone();
        out.scatter_count = photon.scatter_count + 1;
        out.set_position(world_position);

        let albedo = self.kd.average();
        if albedo <= 0.0 || sampler.next_float() > albedo {
            out.terminate();
            return out;
        }

        let n = if photon.norm_dir.dot(*normal) > 0.0 {
            -*normal
        } else {
            *normal
        };
        out.norm_dir = cosine_sample_around(&n, &sampler.next_2d());
        out.energy = photon.energy * (self.kd / albedo);
        return out;
    }

    fn clone_box(&self) -> Box<dyn Material> {
        return Box::new(self.clone());
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_001() {
        let m = MatteMaterial::new(&Spectrum::new(0.9, 0.6, 0.3));
        let p = Point3f::ZERO;
        let n = Normal3f::Y;
        assert!((m.albedo(&p).average() - 0.6).abs() < 1e-6);

        let a = Vector3f::new(0.0, 1.0, 0.0);
        let b = Vector3f::new(0.3, 0.8, 0.1).normalize();
        let f = m.bsdf(&a, &b, &n, &p);
        assert!((f.average() - 0.6 * INV_PI).abs() < 1e-6);

        // Transmission side is dark.
        let below = Vector3f::new(0.0, -1.0, 0.0);
        assert!(m.bsdf(&a, &below, &n, &p).is_black());
    }

    #[test]
    fn test_002() {
        // Direct scattering keeps survivors on the incoming side with
        // expected energy preserved by the colour roulette.
        let ids = IdAllocator::new();
        let m = MatteMaterial::new(&Spectrum::from_scalar(0.7));
        let photon = Photon::new(
            &ids,
            &Point3f::new(0.0, 1.0, 0.0),
            &Vector3f::new(0.0, -1.0, 0.0),
            &Spectrum::one(),
        );
        let mut rng = Rng::with_sequence(11);
        for _ in 0..200 {
            let out = m.scatter_photon_direct(&photon, &Normal3f::Y, &Point3f::ZERO, &mut rng);
            assert_eq!(out.scatter_count, 1);
            if !out.is_terminated() {
                assert!(out.norm_dir.dot(Vector3f::Y) >= 0.0);
                // Grey reflectance: the mask is exactly 1.
                assert!((out.energy.average() - 1.0).abs() < 1e-5);
            }
        }
    }
}
