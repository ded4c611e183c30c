//! Additive noise generators
//!
//! Gaussian samples come from the Box-Muller transform. Both outputs of
//! each transform are used (the sine branch is cached for the next draw),
//! so the samples are zero-mean normal rather than radius-only.

use rand::{Rng, SeedableRng};
use rand_chacha::ChaCha8Rng;
use std::f64::consts::PI;

use phy_modem::{ModemError, Result};

/// Distribution selector, chosen once per run by configuration
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
#[cfg_attr(feature = "cli", derive(clap::ValueEnum))]
pub enum NoiseKind {
    Uniform,
    Gaussian,
}

impl NoiseKind {
    pub fn with_scale(self, scale: f64) -> Result<NoiseModel> {
        match self {
            Self::Uniform => NoiseModel::uniform(scale),
            Self::Gaussian => NoiseModel::gaussian(scale),
        }
    }
}

/// Channel noise model with its spread parameter
#[derive(Debug, Clone, Copy, PartialEq)]
pub enum NoiseModel {
    /// ΔI, ΔQ uniform on `[-scale, +scale]`
    Uniform { scale: f64 },
    /// ΔI, ΔQ zero-mean normal with standard deviation `scale`
    Gaussian { scale: f64 },
}

impl NoiseModel {
    pub fn uniform(scale: f64) -> Result<Self> {
        check_scale(scale)?;
        Ok(Self::Uniform { scale })
    }

    pub fn gaussian(scale: f64) -> Result<Self> {
        check_scale(scale)?;
        Ok(Self::Gaussian { scale })
    }

    /// Noiseless channel
    pub fn none() -> Self {
        Self::Uniform { scale: 0.0 }
    }

    pub fn kind(&self) -> NoiseKind {
        match self {
            Self::Uniform { .. } => NoiseKind::Uniform,
            Self::Gaussian { .. } => NoiseKind::Gaussian,
        }
    }

    pub fn scale(&self) -> f64 {
        match *self {
            Self::Uniform { scale } | Self::Gaussian { scale } => scale,
        }
    }

    /// Re-check a model that may have been built from its public variants
    pub fn validate(&self) -> Result<()> {
        check_scale(self.scale())
    }
}

fn check_scale(scale: f64) -> Result<()> {
    if !scale.is_finite() || scale < 0.0 {
        return Err(ModemError::InvalidArgument(format!(
            "noise scale must be finite and non-negative, got {}",
            scale
        )));
    }
    Ok(())
}

/// Child generator seeded from the next draw of `parent`
///
/// Successive calls on the same parent give independent streams, and the
/// whole family is reproducible from the parent's seed.
pub fn derive_rng(parent: &mut impl Rng) -> ChaCha8Rng {
    ChaCha8Rng::seed_from_u64(parent.gen())
}

/// Uniform noise on `[-scale, +scale]`
pub struct UniformNoise<R: Rng> {
    scale: f64,
    rng: R,
}

impl<R: Rng> UniformNoise<R> {
    pub fn new(scale: f64, rng: R) -> Self {
        Self { scale, rng }
    }

    pub fn next_sample(&mut self) -> f64 {
        let u: f64 = self.rng.gen();
        (2.0 * u - 1.0) * self.scale
    }
}

/// Gaussian noise generator with configurable standard deviation
pub struct GaussianNoise<R: Rng> {
    std_dev: f64,

    /// Internal RNG
    rng: R,

    /// Cached second sample from Box-Muller
    cached: Option<f64>,
}

impl<R: Rng> GaussianNoise<R> {
    pub fn new(std_dev: f64, rng: R) -> Self {
        Self {
            std_dev,
            rng,
            cached: None,
        }
    }

    pub fn std_dev(&self) -> f64 {
        self.std_dev
    }

    /// Generate next Gaussian noise sample using Box-Muller transform
    pub fn next_sample(&mut self) -> f64 {
        if let Some(cached) = self.cached.take() {
            return cached * self.std_dev;
        }

        let u1: f64 = self.rng.gen();
        let u2: f64 = self.rng.gen();

        // Avoid log(0)
        let u1 = u1.max(1e-10);

        let r = (-2.0 * u1.ln()).sqrt();
        let theta = 2.0 * PI * u2;

        let z0 = r * theta.cos();
        let z1 = r * theta.sin();

        self.cached = Some(z1);

        z0 * self.std_dev
    }
}

/// Per-run noise sampler built from a [`NoiseModel`]
pub enum NoiseSource<R: Rng> {
    Uniform(UniformNoise<R>),
    Gaussian(GaussianNoise<R>),
}

impl<R: Rng> NoiseSource<R> {
    pub fn new(model: NoiseModel, rng: R) -> Result<Self> {
        model.validate()?;
        Ok(match model {
            NoiseModel::Uniform { scale } => Self::Uniform(UniformNoise::new(scale, rng)),
            NoiseModel::Gaussian { scale } => Self::Gaussian(GaussianNoise::new(scale, rng)),
        })
    }

    pub fn next_sample(&mut self) -> f64 {
        match self {
            Self::Uniform(n) => n.next_sample(),
            Self::Gaussian(n) => n.next_sample(),
        }
    }

    /// One (ΔI, ΔQ) pair
    pub fn next_pair(&mut self) -> (f64, f64) {
        let di = self.next_sample();
        let dq = self.next_sample();
        (di, dq)
    }
}
