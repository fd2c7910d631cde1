use crate::core::prelude::*;

/// Default lobe sharpness; large enough that the Gaussian is a usable
/// stand-in for the specular delta while keeping the rejection sampler's
/// acceptance rate finite.
pub const DEFAULT_SHARPNESS: Float = 1000.0;

/// Mirror/dielectric surface. The BSDF is a sharp Gaussian lobe around the
/// mirror-reflection direction (an approximation of the specular Dirac
/// delta) so the general rejection machinery still applies; the
/// closed-form sampler bypasses it entirely.
#[derive(Debug, Clone)]
pub struct SpecularMaterial {
    kr: Spectrum,
    kt: Spectrum,
    eta: Float,
    sharpness: Float,
}

impl SpecularMaterial {
    pub fn new(kr: &Spectrum, kt: &Spectrum, eta: Float, sharpness: Float) -> Self {
        SpecularMaterial {
            kr: kr.clamp(0.0, 1.0),
            kt: kt.clamp(0.0, 1.0),
            eta,
            sharpness,
        }
    }

    /// Perfect mirror with no transmission.
    pub fn mirror(kr: &Spectrum) -> Self {
        return SpecularMaterial::new(kr, &Spectrum::zero(), 1.0, DEFAULT_SHARPNESS);
    }

    fn mirror_dir(&self, dir_in: &Vector3f, normal: &Normal3f) -> Vector3f {
        // dir_in arrives *from*; the travelling direction is its negation.
        return reflect(&-*dir_in, normal);
    }
}

impl Material for SpecularMaterial {
    fn specular_reflectance(&self, _world_position: &Point3f) -> Spectrum {
        return self.kr;
    }

    fn specular_transmittance(&self, _world_position: &Point3f) -> Spectrum {
        return self.kt;
    }

    fn refractive_index(&self) -> Float {
        return self.eta;
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
        let g = Float::exp(-self.sharpness * (1.0 - dir_out.dot(mirror)));
        return self.kr * g;
    }

    fn bsdf_peak(&self, dir_in: &Vector3f, normal: &Normal3f) -> (Vector3f, Spectrum) {
        let mirror = self.mirror_dir(dir_in, normal);
        let peak = self.kr * Float::abs(mirror.dot(*normal));
        return (mirror, peak);
    }

    /// Closed-form sampler: one reflect-or-refract decision, no rejection
    /// loop. Total internal reflection folds the transmission branch back
    /// into reflection.
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

        let r = self.kr.average();
        let t = self.kt.average();
        if r + t <= 0.0 || sampler.next_float() > r + t {
            out.terminate();
            return out;
        }

        let reflectivity = r / (r + t);
        if sampler.next_float() < reflectivity {
            out.norm_dir = self.reflected_ray(&photon.norm_dir, normal);
            out.energy = photon.energy * (self.kr / r);
        } else {
            match self.refracted_ray(&photon.norm_dir, normal) {
                Some(d) => {
                    out.norm_dir = d.normalize();
                    out.energy = photon.energy * (self.kt / t);
                }
                None => {
                    out.norm_dir = self.reflected_ray(&photon.norm_dir, normal);
                    out.energy = photon.energy * (self.kt / t);
                }
            }
        }
        return out;
    }

    /// The stochastic bounce of a perfect mirror is the mirror itself.
    fn stochastic_reflect(
        &self,
        dir: &Vector3f,
        normal: &Normal3f,
        _sampler: &mut dyn Sampler,
    ) -> Vector3f {
        return self.reflected_ray(dir, normal);
    }

    fn clone_box(&self) -> Box<dyn Material> {
        return Box::new(self.clone());
    }
}
