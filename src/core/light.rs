use crate::core::base::*;
use crate::core::bound::IdAllocator;
use crate::core::photon::Photon;
use crate::core::rng::Sampler;
use crate::core::spectrum::Spectrum;

/// Photon emitter. Lights sit outside the intersection core but feed it:
/// they turn radiated power into discrete photons whose transport the
/// materials carry forward.
pub trait Light: Send + Sync {
    /// Total radiated flux.
    fn power(&self) -> Spectrum;

    /// Draw one photon leaving the light, carrying `energy`.
    fn emit_photon(
        &self,
        ids: &IdAllocator,
        energy: &Spectrum,
        sampler: &mut dyn Sampler,
    ) -> Photon;

    /// Number of photons representing the energy radiated over `duration`,
    /// one quantum each.
    fn photon_count(&self, quantum_energy: Float, duration: Float) -> usize {
        assert!(quantum_energy > 0.0, "quantum energy must be positive");
        let total = self.power().average() * duration;
        return Float::ceil(total / quantum_energy) as usize;
    }

    /// Spectral energy carried by each emitted photon so that the batch
    /// sums to the energy radiated over `duration`.
    fn photon_energy(&self, quantum_energy: Float, duration: Float) -> Spectrum {
        let n = self.photon_count(quantum_energy, duration);
        if n == 0 {
            return Spectrum::zero();
        }
        return self.power() * (duration / n as Float);
    }
}
