use rand::{Rng, SeedableRng};
use rand_chacha::ChaCha8Rng;

//===========================================================================//

/// A source of "floating pin" values.
///
/// Reading a data line that nothing is driving (an empty device slot, or a
/// location past the end of a device's storage) yields an arbitrary byte
/// rather than an error.  Each component that can produce such values owns
/// its own `Noise`, so that a whole machine can be made deterministic by
/// seeding a single root source and [forking](Noise::fork) it.
#[derive(Clone, Debug)]
pub struct Noise {
    rng: ChaCha8Rng,
}

impl Noise {
    /// Returns a noise source seeded from the operating system's entropy.
    pub fn from_entropy() -> Noise {
        Noise { rng: ChaCha8Rng::from_entropy() }
    }

    /// Returns a deterministic noise source.  Two sources created with the
    /// same seed produce the same sequence of bytes.
    pub fn seeded(seed: u64) -> Noise {
        Noise { rng: ChaCha8Rng::seed_from_u64(seed) }
    }

    /// Derives a new, independent noise source from this one.
    pub fn fork(&mut self) -> Noise {
        Noise::seeded(self.rng.r#gen())
    }

    /// Returns the value currently floating on an undriven 8-bit data bus.
    pub fn byte(&mut self) -> u8 {
        self.rng.r#gen()
    }
}

impl Default for Noise {
    fn default() -> Noise {
        Noise::from_entropy()
    }
}

//===========================================================================//


//===========================================================================//
