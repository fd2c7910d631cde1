use crate::core::base::*;

const PCG32_DEFAULT_STATE: u64 = 0x853c49e6748fea9b;
const PCG32_DEFAULT_STREAM: u64 = 0xda3e39cb94b95bdb;
const PCG32_MULT: u64 = 0x5851f42d4c957f2d;

/// Injectable uniform-sampler service consumed by the stochastic scattering
/// and Russian-roulette code. Implementations are not required to be
/// thread-safe; concurrent workers each own an independent stream
/// (`Rng::with_sequence` per worker) instead of sharing one generator.
pub trait Sampler {
    /// Uniform draw in [0, 1).
    fn next_float(&mut self) -> Float;

    fn next_2d(&mut self) -> Point2f {
        let a = self.next_float();
        let b = self.next_float();
        return Point2f::new(a, b);
    }
}

/// PCG32 generator. Cheap to seed, deterministic per sequence index, and
/// streams with distinct indices never collide.
#[derive(Debug, PartialEq, Clone)]
pub struct Rng {
    state: u64,
    inc: u64,
}

impl Rng {
    pub fn new() -> Self {
        Rng {
            state: PCG32_DEFAULT_STATE,
            inc: PCG32_DEFAULT_STREAM,
        }
    }

    pub fn with_sequence(initseq: u64) -> Self {
        let mut rng = Rng { state: 0, inc: (initseq << 1) | 1 };
        rng.uniform_u32();
        rng.state = rng.state.wrapping_add(PCG32_DEFAULT_STATE);
        rng.uniform_u32();
        return rng;
    }

    #[inline]
    pub fn uniform_u32(&mut self) -> u32 {
        let oldstate = self.state;
        self.state = oldstate.wrapping_mul(PCG32_MULT).wrapping_add(self.inc);
        let xorshifted = (((oldstate >> 18) ^ oldstate) >> 27) as u32;
        let rot = (oldstate >> 59) as u32;
        return xorshifted.rotate_right(rot);
    }

    /// Uniform draw in [0, b).
    pub fn uniform_u32_below(&mut self, b: u32) -> u32 {
        let threshold = b.wrapping_neg() % b;
        loop {
            let r = self.uniform_u32();
            if r >= threshold {
                return r % b;
            }
        }
    }

    #[inline]
    pub fn uniform_float(&mut self) -> Float {
        let f = self.uniform_u32() as Float * 2.3283064365386963e-10;
        return Float::min(ONE_MINUS_EPSILON, f);
    }
}

impl Default for Rng {
    fn default() -> Self {
        Self::new()
    }
}

impl Sampler for Rng {
    #[inline]
    fn next_float(&mut self) -> Float {
        return self.uniform_float();
    }
}
