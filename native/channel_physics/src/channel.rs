//! Additive noise channel
//!
//! Applies a per-symbol (ΔI, ΔQ) perturbation drawn from the configured
//! [`NoiseModel`]. Draws are independent across symbols and across I/Q
//! within a symbol. The input is borrowed and never modified; the noisy
//! symbols are a fresh sequence.

use rand::{Rng, SeedableRng};
use rand_chacha::ChaCha8Rng;

use phy_modem::{Result, Symbol};

use super::noise::{NoiseModel, NoiseSource};

/// Noise channel with its own generator
pub struct NoiseChannel<R: Rng> {
    model: NoiseModel,
    noise: NoiseSource<R>,
}

impl NoiseChannel<ChaCha8Rng> {
    /// Reproducible channel seeded from a single `u64`
    pub fn seeded(model: NoiseModel, seed: u64) -> Result<Self> {
        Self::new(model, ChaCha8Rng::seed_from_u64(seed))
    }
}

impl<R: Rng> NoiseChannel<R> {
    pub fn new(model: NoiseModel, rng: R) -> Result<Self> {
        let noise = NoiseSource::new(model, rng)?;
        Ok(Self { model, noise })
    }

    pub fn model(&self) -> NoiseModel {
        self.model
    }

    /// Return `symbols` plus independent noise, component-wise
    pub fn apply(&mut self, symbols: &[Symbol]) -> Vec<Symbol> {
        let noisy: Vec<Symbol> = symbols
            .iter()
            .map(|&s| {
                let (di, dq) = self.noise.next_pair();
                s + Symbol::new(di, dq)
            })
            .collect();

        tracing::trace!(
            count = noisy.len(),
            model = ?self.model,
            "applied channel noise"
        );
        noisy
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use phy_modem::{BitSource, QpskModulator};

    fn reference_symbols(count: usize, seed: u64) -> Vec<Symbol> {
        let bits = BitSource::seeded(seed).generate(2 * count).unwrap();
        QpskModulator::default().modulate(bits.as_slice()).unwrap()
    }

    #[test]
    fn test_zero_scale_is_identity() {
        let clean = reference_symbols(64, 1);

        for model in [NoiseModel::uniform(0.0).unwrap(), NoiseModel::gaussian(0.0).unwrap()] {
            let mut channel = NoiseChannel::seeded(model, 11).unwrap();
            assert_eq!(channel.apply(&clean), clean, "{:?}", model);
        }
    }

    #[test]
    fn test_uniform_deltas_bounded() {
        let clean = reference_symbols(5000, 2);
        let scale = 0.2;
        let mut channel = NoiseChannel::seeded(NoiseModel::uniform(scale).unwrap(), 5).unwrap();
        let noisy = channel.apply(&clean);

        assert_eq!(noisy.len(), clean.len());
        for (n, c) in noisy.iter().zip(&clean) {
            let d = *n - *c;
            assert!(d.i.abs() <= scale + 1e-12, "ΔI {}", d.i);
            assert!(d.q.abs() <= scale + 1e-12, "ΔQ {}", d.q);
        }
    }

    #[test]
    fn test_gaussian_deltas_statistics() {
        let clean = reference_symbols(20_000, 3);
        let scale = 0.5;
        let mut channel = NoiseChannel::seeded(NoiseModel::gaussian(scale).unwrap(), 8).unwrap();
        let noisy = channel.apply(&clean);

        let deltas: Vec<f64> = noisy
            .iter()
            .zip(&clean)
            .flat_map(|(n, c)| {
                let d = *n - *c;
                [d.i, d.q]
            })
            .collect();

        let n = deltas.len() as f64;
        let mean = deltas.iter().sum::<f64>() / n;
        let std = (deltas.iter().map(|x| (x - mean).powi(2)).sum::<f64>() / n).sqrt();

        assert!(mean.abs() < 0.02, "mean {}", mean);
        assert!((std - scale).abs() < 0.02, "std {}", std);
        assert!(deltas.iter().any(|&x| x < 0.0), "noise must go negative");
    }

    #[test]
    fn test_i_and_q_uncorrelated() {
        let clean = reference_symbols(20_000, 4);
        let mut channel = NoiseChannel::seeded(NoiseModel::gaussian(1.0).unwrap(), 9).unwrap();
        let noisy = channel.apply(&clean);

        let n = clean.len() as f64;
        let corr: f64 = noisy
            .iter()
            .zip(&clean)
            .map(|(a, b)| {
                let d = *a - *b;
                d.i * d.q
            })
            .sum::<f64>()
            / n;
        assert!(corr.abs() < 0.05, "ΔI·ΔQ correlation {}", corr);
    }

    #[test]
    fn test_input_untouched() {
        let clean = reference_symbols(20, 5);
        let before = clean.clone();
        let mut channel = NoiseChannel::seeded(NoiseModel::gaussian(0.3).unwrap(), 1).unwrap();
        let noisy = channel.apply(&clean);

        assert_eq!(clean, before);
        assert_ne!(noisy, clean);
    }

    #[test]
    fn test_seeded_channel_reproducible() {
        let clean = reference_symbols(20, 6);
        let model = NoiseModel::uniform(0.1).unwrap();
        let a = NoiseChannel::seeded(model, 77).unwrap().apply(&clean);
        let b = NoiseChannel::seeded(model, 77).unwrap().apply(&clean);
        assert_eq!(a, b);
    }
}
