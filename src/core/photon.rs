use crate::core::base::*;
use crate::core::bound::{Bounded, BoundingSphere, IdAllocator};
use crate::core::spectrum::Spectrum;

/// Auxiliary provenance carried by some transport variants; plain photon
/// tracing leaves it empty.
#[derive(Debug, Clone, PartialEq)]
pub struct PhotonPayload {
    /// Identity of the item that generated (emitted or last scattered)
    /// the photon.
    pub source_id: u64,
    /// Point the current flight segment started from.
    pub origin: Point3f,
    /// Blur radius used by splatting reconstruction.
    pub blur_radius: Float,
}

/// A quantum of light in flight or at rest on a surface. Its position is a
/// zero-radius bounding sphere, so stored photons are indexed by the same
/// spatial machinery as geometry.
///
/// A zero direction marks a terminated photon; its energy is then the zero
/// spectrum as well. `scatter_count` counts every surface interaction,
/// terminating ones included.
#[derive(Debug, Clone)]
pub struct Photon {
    bound: BoundingSphere,
    pub norm_dir: Vector3f,
    pub energy: Spectrum,
    pub scatter_count: u32,
    pub payload: Option<Box<PhotonPayload>>,
}

impl Photon {
    pub fn new(ids: &IdAllocator, position: &Point3f, dir: &Vector3f, energy: &Spectrum) -> Self {
        Photon {
            bound: BoundingSphere::new(ids, position, 0.0),
            norm_dir: dir.normalize_or_zero(),
            energy: *energy,
            scatter_count: 0,
            payload: None,
        }
    }

    #[inline]
    pub fn position(&self) -> Point3f {
        return self.bound.center;
    }

    pub fn set_position(&mut self, p: &Point3f) {
        self.bound.center = *p;
    }

    #[inline]
    pub fn item_id(&self) -> u64 {
        return self.bound.item_id();
    }

    /// Zero the energy and leave the direction degenerate; this is the
    /// termination signal, no separate flag exists.
    pub fn terminate(&mut self) {
        self.energy = Spectrum::zero();
        self.norm_dir = Vector3f::ZERO;
    }

    #[inline]
    pub fn is_terminated(&self) -> bool {
        return self.norm_dir == Vector3f::ZERO;
    }
}

impl Bounded for Photon {
    fn bound(&self) -> &BoundingSphere {
        return &self.bound;
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_001() {
        let ids = IdAllocator::new();
        let p = Photon::new(
            &ids,
            &Point3f::new(1.0, 2.0, 3.0),
            &Vector3f::new(0.0, 0.0, -2.0),
            &Spectrum::one(),
        );
        assert_eq!(p.position(), Point3f::new(1.0, 2.0, 3.0));
        assert_eq!(p.norm_dir, Vector3f::new(0.0, 0.0, -1.0));
        assert_eq!(p.bound().radius, 0.0);
        assert!(!p.is_terminated());
    }

    #[test]
    fn test_002() {
        let ids = IdAllocator::new();
        let mut p = Photon::new(&ids, &Point3f::ZERO, &Vector3f::X, &Spectrum::one());
        p.terminate();
        assert!(p.is_terminated());
        assert!(p.energy.is_black());
    }

    #[test]
    fn test_003() {
        // Payload is exclusively owned and deep-copied on clone.
        let ids = IdAllocator::new();
        let mut p = Photon::new(&ids, &Point3f::ZERO, &Vector3f::X, &Spectrum::one());
        p.payload = Some(Box::new(PhotonPayload {
            source_id: 42,
            origin: Point3f::ZERO,
            blur_radius: 0.5,
        }));
        let mut q = p.clone();
        q.payload.as_mut().unwrap().blur_radius = 2.0;
        assert_eq!(p.payload.as_ref().unwrap().blur_radius, 0.5);
        // Identity aliases on clone.
        assert_eq!(p.item_id(), q.item_id());
    }
}
