use rand::RngExt;
use rand::SeedableRng;
use rand_chacha::ChaCha8Rng;
use rand_distr::{Distribution, Normal};

use crate::error::{QmfError, Result};
use crate::signal_processing::{Sample, saturate};

fn create_rng(seed: Option<u64>) -> ChaCha8Rng {
    match seed {
        Some(s) => ChaCha8Rng::seed_from_u64(s),
        None => rand::make_rng(),
    }
}

/// Gaussian noise in LSBs, saturated to the sample range
pub fn white_noise(len: usize, std_dev_lsb: f64, seed: Option<u64>) -> Result<Vec<Sample>> {
    let normal = Normal::new(0.0, std_dev_lsb)
        .map_err(|e| QmfError::Config(format!("noise std dev {}: {}", std_dev_lsb, e)))?;
    let mut rng = create_rng(seed);
    Ok((0..len)
        .map(|_| saturate(normal.sample(&mut rng).round() as i64))
        .collect())
}

/// Add Gaussian noise in place
pub fn apply_noise(signal: &mut [Sample], std_dev_lsb: f64, seed: Option<u64>) -> Result<()> {
    let noise = white_noise(signal.len(), std_dev_lsb, seed)?;
    for (sample, n) in signal.iter_mut().zip(noise) {
        *sample = saturate(*sample as i64 + n as i64);
    }
    Ok(())
}

/// Random valid/ready pattern for exercising backpressure
///
/// Each call draws independently; a probability of 1.0 never stalls.
#[derive(Debug, Clone)]
pub struct HandshakeJitter {
    rng: ChaCha8Rng,
    probability: f32,
}

impl HandshakeJitter {
    pub fn new(probability: f32, seed: Option<u64>) -> Self {
        Self {
            rng: create_rng(seed),
            probability: probability.clamp(0.0, 1.0),
        }
    }

    pub fn next(&mut self) -> bool {
        self.rng.random::<f32>() < self.probability
    }
}
