use crate::core::base::*;
use crate::core::photon::Photon;
use crate::core::rng::Sampler;
use crate::core::sampling::*;
use crate::core::spectrum::Spectrum;

use log::debug;

/// Retry bound for the BSDF rejection loop. The loop has no natural
/// termination for pathological lobes; past this many rounds the photon is
/// treated as absorbed.
pub const MAX_REJECTION_ROUNDS: usize = 1024;

/// Mirror reflection of the travel direction `d` about `n`.
#[inline]
pub fn reflect(d: &Vector3f, n: &Normal3f) -> Vector3f {
    return *d - 2.0 * d.dot(*n) * *n;
}

/// Refraction of the travel direction `d` at a surface with normal `n`
/// oriented against `d`, with `eta = eta_i / eta_t`. Total internal
/// reflection yields `None`.
pub fn refract(d: &Vector3f, n: &Normal3f, eta: Float) -> Option<Vector3f> {
    let cos_i = -d.dot(*n);
    let sin2_i = Float::max(0.0, 1.0 - cos_i * cos_i);
    let sin2_t = eta * eta * sin2_i;
    if sin2_t >= 1.0 {
        return None;
    }
    let cos_t = Float::sqrt(1.0 - sin2_t);
    return Some(*d * eta + *n * (eta * cos_i - cos_t));
}

/// Surface appearance and photon-scattering behaviour. Stateless with
/// respect to any particular surface point; the world position is passed
/// per call.
///
/// Directions follow the photon-travel convention: `dir_in` is the
/// direction light arrives *from* (opposite the photon's flight), `dir_out`
/// the direction it leaves toward.
pub trait Material: Send + Sync {
    /// Radiance emitted at the point; zero for non-emitters.
    fn emission(&self, _world_position: &Point3f) -> Spectrum {
        return Spectrum::zero();
    }

    fn diffuse_reflectance(&self, _world_position: &Point3f) -> Spectrum {
        return Spectrum::zero();
    }

    fn specular_reflectance(&self, _world_position: &Point3f) -> Spectrum {
        return Spectrum::zero();
    }

    fn specular_transmittance(&self, _world_position: &Point3f) -> Spectrum {
        return Spectrum::zero();
    }

    /// Fraction of incident energy the surface re-emits; its average is the
    /// survival probability of the Russian-roulette absorption test.
    fn albedo(&self, world_position: &Point3f) -> Spectrum {
        let a = self.diffuse_reflectance(world_position)
            + self.specular_reflectance(world_position)
            + self.specular_transmittance(world_position);
        return a.clamp(0.0, 1.0);
    }

    fn refractive_index(&self) -> Float {
        return 1.0;
    }

    /// Bidirectional scattering distribution between the two directions.
    fn bsdf(
        &self,
        dir_in: &Vector3f,
        dir_out: &Vector3f,
        normal: &Normal3f,
        world_position: &Point3f,
    ) -> Spectrum;

    /// Peak outgoing direction of the lobe for `dir_in`, together with the
    /// cosine-weighted BSDF value there. The averaged value is the upper
    /// bound of the rejection sampler; for a multi-lobe distribution a
    /// single peak may under-estimate the true bound, so implementations
    /// are expected to stay single-lobed.
    fn bsdf_peak(&self, dir_in: &Vector3f, normal: &Normal3f) -> (Vector3f, Spectrum);

    /// Scatter an incoming photon into an outgoing one by rejection
    /// sampling against the BSDF. Two-stage decision: Russian-roulette
    /// absorption on the mean albedo, then candidate directions drawn
    /// uniformly over the sphere until one passes the cosine-weighted BSDF
    /// acceptance test. The survivor keeps the incoming energy modulated by
    /// the colour-roulette mask `Q / average(Q)`, which preserves expected
    /// energy per channel.
    fn scatter_photon(
        &self,
        photon: &Photon,
        normal: &Normal3f,
        world_position: &Point3f,
        sampler: &mut dyn Sampler,
    ) -> Photon {
        let mut out = photon.clone();
        out.scatter_count = photon.scatter_count + 1;
        out.set_position(world_position);

        let albedo = self.albedo(world_position).average();
        if sampler.next_float() > albedo {
            out.terminate();
            return out;
        }

        let dir_a = -photon.norm_dir;
        let (_, peak) = self.bsdf_peak(&dir_a, normal);
        let m = peak.average();
        if m <= 0.0 {
            out.terminate();
            return out;
        }

        for _ in 0..MAX_REJECTION_ROUNDS {
            let dir_b = uniform_sample_sphere(&sampler.next_2d());
            let q = self.bsdf(&dir_a, &dir_b, normal, world_position)
                * Float::abs(dir_b.dot(*normal));
            let q_avg = q.average();
            if q_avg <= 0.0 {
                continue;
            }
            if sampler.next_float() * m <= q_avg {
                out.norm_dir = dir_b;
                out.energy = photon.energy * (q / q_avg);
                return out;
            }
        }

        debug!(
            "rejection sampler exhausted {} rounds, photon treated as absorbed",
            MAX_REJECTION_ROUNDS
        );
        out.terminate();
        return out;
    }

    /// Closed-form scattering for materials that have one (perfect mirrors,
    /// Lambertian lobes). Falls back to the rejection sampler.
    fn scatter_photon_direct(
        &self,
        photon: &Photon,
        normal: &Normal3f,
        world_position: &Point3f,
        sampler: &mut dyn Sampler,
    ) -> Photon {
        return self.scatter_photon(photon, normal, world_position, sampler);
    }

    /// Deterministic Whitted-style mirror direction.
    fn reflected_ray(&self, dir: &Vector3f, normal: &Normal3f) -> Vector3f {
        return reflect(dir, normal);
    }

    /// Deterministic Whitted-style transmission direction, orienting the
    /// normal to the incoming side and choosing the index ratio from the
    /// travel direction. `None` on total internal reflection.
    fn refracted_ray(&self, dir: &Vector3f, normal: &Normal3f) -> Option<Vector3f> {
        let eta = self.refractive_index();
        if dir.dot(*normal) < 0.0 {
            return refract(dir, normal, 1.0 / eta);
        } else {
            return refract(dir, &-*normal, eta);
        }
    }

    /// Single stochastic bounce direction for distributed ray tracing;
    /// default is a cosine lobe about the normal on the incoming side.
    fn stochastic_reflect(
        &self,
        dir: &Vector3f,
        normal: &Normal3f,
        sampler: &mut dyn Sampler,
    ) -> Vector3f {
        let n = if dir.dot(*normal) > 0.0 { -*normal } else { *normal };
        return cosine_sample_around(&n, &sampler.next_2d());
    }

    /// Deep polymorphic copy; each concrete material clones itself.
    fn clone_box(&self) -> Box<dyn Material>;
}

impl Clone for Box<dyn Material> {
    fn clone(&self) -> Self {
        return self.clone_box();
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_001() {
        let d = Vector3f::new(1.0, -1.0, 0.0).normalize();
        let n = Normal3f::new(0.0, 1.0, 0.0);
        let r = reflect(&d, &n);
        assert!((r - Vector3f::new(1.0, 1.0, 0.0).normalize()).length() < 1e-6);
        assert!((r.length() - 1.0).abs() < 1e-6);
    }

    #[test]
    fn test_002() {
        // Normal incidence passes straight through for any index ratio.
        let d = Vector3f::new(0.0, 0.0, -1.0);
        let n = Normal3f::new(0.0, 0.0, 1.0);
        let t = refract(&d, &n, 1.0 / 1.5).unwrap();
        assert!((t - d).length() < 1e-6);
    }

    #[test]
    fn test_003() {
        // Grazing exit from the dense side reflects internally.
        let d = Vector3f::new(1.0, -0.2, 0.0).normalize();
        let n = Normal3f::new(0.0, 1.0, 0.0);
        assert!(refract(&d, &n, 1.5).is_none());
    }
}
