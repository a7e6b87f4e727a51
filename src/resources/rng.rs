use bevy::prelude::*;
use rand::{RngCore, SeedableRng};
use rand_chacha::ChaCha8Rng;

/// Random source for turbulence and bird-strike perturbations.
#[derive(Resource, Debug, Clone)]
pub struct SimRng {
    rng: ChaCha8Rng,
    seed: Option<u64>,
}

impl Default for SimRng {
    fn default() -> Self {
        Self::from_seed(None)
    }
}

impl SimRng {
    pub fn seeded(seed: u64) -> Self {
        Self::from_seed(Some(seed))
    }

    /// Uses entropy when no seed is given.
    pub fn from_seed(seed: Option<u64>) -> Self {
        let rng = match seed {
            Some(seed) => {
                info!("Creating simulation RNG with seed: {}", seed);
                ChaCha8Rng::seed_from_u64(seed)
            }
            None => {
                warn!("No seed provided, using entropy");
                ChaCha8Rng::from_entropy()
            }
        };
        Self { rng, seed }
    }

    pub fn seed(&self) -> Option<u64> {
        self.seed
    }

    pub fn rng(&mut self) -> &mut ChaCha8Rng {
        &mut self.rng
    }
}

impl RngCore for SimRng {
    fn next_u32(&mut self) -> u32 {
        self.rng.next_u32()
    }

    fn next_u64(&mut self) -> u64 {
        self.rng.next_u64()
    }

    fn fill_bytes(&mut self, dest: &mut [u8]) {
        self.rng.fill_bytes(dest)
    }

    fn try_fill_bytes(&mut self, dest: &mut [u8]) -> Result<(), rand::Error> {
        self.rng.try_fill_bytes(dest)
    }
}
