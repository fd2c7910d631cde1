use crate::core::prelude::*;

/// Pure emitter: constant radiance, no scattering of any kind. Every
/// photon reaching it is absorbed (zero albedo).
#[derive(Debug, Clone)]
pub struct EmissiveMaterial {
    radiance: Spectrum,
}

impl EmissiveMaterial {
    pub fn new(radiance: &Spectrum) -> Self {
        EmissiveMaterial {
            radiance: *radiance,
        }
    }
}

impl Material for EmissiveMaterial {
    fn emission(&self, _world_position: &Point3f) -> Spectrum {
        return self.radiance;
    }

    fn bsdf(
        &self,
        _dir_in: &Vector3f,
        _dir_out: &Vector3f,
        _normal: &Normal3f,
        _world_position: &Point3f,
    ) -> Spectrum {
        return Spectrum::zero();
    }

    fn bsdf_peak(&self, dir_in: &Vector3f, _normal: &Normal3f) -> (Vector3f, Spectrum) {
        return (-*dir_in, Spectrum::zero());
    }

    fn clone_box(&self) -> Box<dyn Material> {
        return Box::new(self.clone());
    }
}
