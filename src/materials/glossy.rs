use crate::core::prelude::*;

/// Diffuse base with a Phong-style reflection lobe. The lobe exponent
/// controls the spread; large exponents approach the specular material.
#[derive(Debug, Clone)]
pub struct GlossyMaterial {
    kd: Spectrum,
    ks: Spectrum,
    exponent: Float,
}

impl GlossyMaterial {
    pub fn new(kd: &Spectrum, ks: &Spectrum, exponent: Float) -> Self {
        GlossyMaterial {
            kd: kd.clamp(0.0, 1.0),
            ks: ks.clamp(0.0, 1.0),
            exponent: Float::max(exponent, 1.0),
        }
    }

    fn mirror_dir(&self, dir_in: &Vector3f, normal: &Normal3f) -> Vector3f {
        return reflect(&-*dir_in, normal);
    }

    fn lobe(&self, cos_alpha: Float) -> Float {
        if cos_alpha <= 0.0 {
            return 0.0;
        }
        return (self.exponent + 2.0) * INV_2_PI * Float::powf(cos_alpha, self.exponent);
    }
}

impl Material for GlossyMaterial {
    fn diffuse_reflectance(&self, _world_position: &Point3f) -> Spectrum {
        return self.kd;
    }

    fn specular_reflectance(&self, _world_position: &Point3f) -> Spectrum {
        return self.ks;
    }

    fn bsdf(
        &self,
        dir_in: &Vector3f,
        dir_out: &Vector3f,
        normal: &Normal3f,
        _world_position: &Point3f,
    ) -> Spectrum {
        if dir_in.dot(*normal) * dir_out.dot(*normal) <= 0.0 {
            return Spectrum::zero();
        }
        let mirror = self.mirror_dir(dir_in, normal);
        let spec = self.lobe(dir_out.dot(mirror));
        return self.kd * INV_PI + self.ks * spec;
    }

    fn bsdf_peak(&self, dir_in: &Vector3f, normal: &Normal3f) -> (Vector3f, Spectrum) {
        // Single-lobe assumption: the cosine-weighted maximum is taken at
        // the mirror direction, where the Phong term is largest.
        let mirror = self.mirror_dir(dir_in, normal);
        let f = self.kd * INV_PI + self.ks * self.lobe(1.0);
        return (mirror, f * Float::abs(mirror.dot(*normal)));
    }

    /// Phong-lobe perturbation of the mirror direction for distributed ray
    /// tracing; resampled if the perturbed direction dives below the
    /// surface.
    fn stochastic_reflect(
        &self,
        dir: &Vector3f,
        normal: &Normal3f,
        sampler: &mut dyn Sampler,
    ) -> Vector3f {
        let mirror = reflect(dir, normal);
        let n = if dir.dot(*normal) > 0.0 { -*normal } else { *normal };
        for _ in 0..MAX_REJECTION_ROUNDS {
            let u = sampler.next_2d();
            let cos_alpha = Float::powf(u.x, 1.0 / (self.exponent + 1.0));
            let sin_alpha = Float::sqrt(Float::max(0.0, 1.0 - cos_alpha * cos_alpha));
            let phi = 2.0 * PI * u.y;
            let local = Vector3f::new(
                sin_alpha * Float::cos(phi),
                sin_alpha * Float::sin(phi),
                cos_alpha,
            );
            let d = from_local_frame(&local, &mirror).normalize();
            if d.dot(n) > 0.0 {
                return d;
            }
        }
        return mirror;
    }

    fn clone_box(&self) -> Box<dyn Material> {
        return Box::new(self.clone());
    }
}
