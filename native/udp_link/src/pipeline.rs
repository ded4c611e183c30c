//! Transmit pipeline
//!
//! bits → QPSK symbols → channel noise → wire payload → one datagram.
//!
//! Each transmission unit is built from scratch; the only state carried
//! between units is the position of the two random streams. A `Pipeline`
//! owns its generators, so separate pipelines can run on separate threads
//! without coordination.

use bytes::Bytes;
use rand::SeedableRng;
use rand_chacha::ChaCha8Rng;

use channel_physics::{derive_rng, NoiseChannel, NoiseModel};
use phy_modem::{BitSource, FrameLayout, ModemError, QpskModulator, Symbol, WireProfile};

use crate::error::Result;
use crate::transport::Transport;

/// Wire format selector
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, clap::ValueEnum)]
pub enum ProfileKind {
    /// Zero-padded 3P-value frame
    #[default]
    Padded,
    /// Interleaved real/imag values, no padding
    Compact,
    /// `(r,i)` text pairs
    Text,
}

impl ProfileKind {
    pub fn with_layout(self, layout: FrameLayout) -> WireProfile {
        match self {
            Self::Padded => WireProfile::Padded(layout),
            Self::Compact => WireProfile::Compact,
            Self::Text => WireProfile::Text,
        }
    }
}

/// Fixed parameters of a run, validated once in [`Pipeline::new`]
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct PipelineConfig {
    pub layout: FrameLayout,
    pub noise: NoiseModel,
    pub profile: ProfileKind,
}

impl Default for PipelineConfig {
    fn default() -> Self {
        Self {
            layout: FrameLayout::default(),
            noise: NoiseModel::Gaussian { scale: 0.5 },
            profile: ProfileKind::Padded,
        }
    }
}

/// Output of one pass through the pipeline
#[derive(Debug, Clone, PartialEq)]
pub struct TransmissionUnit {
    /// Symbols after channel noise
    pub symbols: Vec<Symbol>,
    /// Bytes handed to the transport
    pub payload: Bytes,
}

pub struct Pipeline {
    layout: FrameLayout,
    profile: WireProfile,
    bits: BitSource<ChaCha8Rng>,
    modulator: QpskModulator,
    channel: NoiseChannel<ChaCha8Rng>,
}

impl Pipeline {
    /// Build a pipeline whose bit and noise streams derive from `seed`
    pub fn new(config: PipelineConfig, seed: u64) -> Result<Self> {
        let mut master = ChaCha8Rng::seed_from_u64(seed);
        let bit_rng = derive_rng(&mut master);
        let noise_rng = derive_rng(&mut master);

        let channel = NoiseChannel::new(config.noise, noise_rng)?;

        tracing::debug!(
            seed,
            symbols = config.layout.symbols(),
            padding = config.layout.padding(),
            noise = ?config.noise,
            profile = ?config.profile,
            "pipeline configured"
        );

        Ok(Self {
            layout: config.layout,
            profile: config.profile.with_layout(config.layout),
            bits: BitSource::new(bit_rng),
            modulator: QpskModulator::default(),
            channel,
        })
    }

    pub fn profile(&self) -> WireProfile {
        self.profile
    }

    /// Expected payload size for the binary profiles
    pub fn payload_len(&self) -> Option<usize> {
        self.profile.payload_len(self.layout.symbols())
    }

    /// Run known bits through modulation, noise and encoding
    ///
    /// The padded profile needs exactly one frame's worth of bits; that is
    /// checked before the noise stream is touched.
    pub fn process(&mut self, bits: &[u8]) -> Result<TransmissionUnit> {
        if let WireProfile::Padded(layout) = self.profile {
            if bits.len() != layout.bits() {
                return Err(ModemError::InvalidArgument(format!(
                    "padded frame needs {} bits, got {}",
                    layout.bits(),
                    bits.len()
                ))
                .into());
            }
        }
        let clean = self.modulator.modulate(bits)?;
        let symbols = self.channel.apply(&clean);
        let payload = self.profile.encode(&symbols)?;

        tracing::debug!(
            real = ?symbols.iter().map(|s| s.i).collect::<Vec<_>>(),
            imag = ?symbols.iter().map(|s| s.q).collect::<Vec<_>>(),
            "noisy symbols"
        );

        Ok(TransmissionUnit { symbols, payload })
    }

    /// Draw a fresh frame's worth of bits and process them
    pub fn run_unit(&mut self) -> Result<TransmissionUnit> {
        let bits = self.bits.generate(self.layout.bits())?;
        tracing::debug!(bits = ?bits.as_slice(), "data bits");
        self.process(bits.as_slice())
    }

    /// Build one unit and hand it to `transport` in a single send
    pub fn transmit<T: Transport>(&mut self, transport: &mut T) -> Result<usize> {
        let unit = self.run_unit()?;
        let sent = transport.send(&unit.payload)?;
        tracing::info!(bytes = sent, profile = self.profile.name(), "payload sent");
        Ok(sent)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::error::LinkError;
    use phy_modem::deserialize;

    struct Recorder {
        sent: Vec<Bytes>,
    }

    impl Transport for Recorder {
        fn send(&mut self, payload: &[u8]) -> Result<usize> {
            self.sent.push(Bytes::copy_from_slice(payload));
            Ok(payload.len())
        }
    }

    struct Refuser;

    impl Transport for Refuser {
        fn send(&mut self, _payload: &[u8]) -> Result<usize> {
            Err(LinkError::TransmissionFailure {
                dest: "test".into(),
                source: std::io::Error::new(std::io::ErrorKind::Other, "refused"),
            })
        }
    }

    fn noiseless(profile: ProfileKind, symbols: usize) -> PipelineConfig {
        PipelineConfig {
            layout: FrameLayout::new(symbols, 256).unwrap(),
            noise: NoiseModel::none(),
            profile,
        }
    }

    #[test]
    fn test_reference_bits_noiseless() {
        let mut pipeline = Pipeline::new(noiseless(ProfileKind::Compact, 4), 1).unwrap();
        let unit = pipeline.process(&[0, 0, 0, 1, 1, 0, 1, 1]).unwrap();

        let expected = [(1.0, 1.0), (-1.0, 1.0), (1.0, -1.0), (-1.0, -1.0)];
        for (s, (si, sq)) in unit.symbols.iter().zip(expected) {
            assert!((s.i - si * 0.7071).abs() < 1e-4);
            assert!((s.q - sq * 0.7071).abs() < 1e-4);
        }

        let values = deserialize(&unit.payload).unwrap();
        assert_eq!(values.len(), 8);
        assert_eq!(values[0], unit.symbols[0].i as f32);
        assert_eq!(values[1], unit.symbols[0].q as f32);
    }

    #[test]
    fn test_bit_stream_derived_from_seed() {
        let mut master = ChaCha8Rng::seed_from_u64(5);
        let bits = BitSource::new(derive_rng(&mut master)).generate(8).unwrap();
        let expected = QpskModulator::default().modulate(bits.as_slice()).unwrap();

        let mut pipeline = Pipeline::new(noiseless(ProfileKind::Compact, 4), 5).unwrap();
        assert_eq!(pipeline.run_unit().unwrap().symbols, expected);
    }

    #[test]
    fn test_padded_unit_layout() {
        let config = PipelineConfig {
            noise: NoiseModel::uniform(0.1).unwrap(),
            ..PipelineConfig::default()
        };
        let mut pipeline = Pipeline::new(config, 5).unwrap();
        let unit = pipeline.run_unit().unwrap();

        assert_eq!(unit.payload.len(), 3072);
        assert_eq!(pipeline.payload_len(), Some(3072));

        let values = deserialize(&unit.payload).unwrap();
        for (k, s) in unit.symbols.iter().enumerate() {
            assert_eq!(values[256 + k], s.i as f32);
            assert_eq!(values[512 + k], s.q as f32);
        }
        assert!(values[276..512].iter().all(|&v| v == 0.0));
    }

    #[test]
    fn test_same_seed_same_payload() {
        let a = Pipeline::new(PipelineConfig::default(), 42).unwrap().run_unit().unwrap();
        let b = Pipeline::new(PipelineConfig::default(), 42).unwrap().run_unit().unwrap();
        let c = Pipeline::new(PipelineConfig::default(), 43).unwrap().run_unit().unwrap();
        assert_eq!(a, b);
        assert_ne!(a.payload, c.payload);
    }

    #[test]
    fn test_units_differ() {
        let mut pipeline = Pipeline::new(PipelineConfig::default(), 42).unwrap();
        let first = pipeline.run_unit().unwrap();
        let second = pipeline.run_unit().unwrap();
        assert_ne!(first.payload, second.payload);
    }

    #[test]
    fn test_text_profile() {
        let mut pipeline = Pipeline::new(noiseless(ProfileKind::Text, 2), 1).unwrap();
        let unit = pipeline.process(&[0, 0, 1, 1]).unwrap();
        assert_eq!(
            unit.payload.as_ref(),
            b"(0.707107,0.707107),(-0.707107,-0.707107)"
        );
        assert_eq!(pipeline.payload_len(), None);
    }

    #[test]
    fn test_wrong_bit_count_for_padded_frame() {
        let mut pipeline = Pipeline::new(noiseless(ProfileKind::Padded, 20), 1).unwrap();
        let err = pipeline.process(&[0, 1, 1, 0]).unwrap_err();
        assert!(err.is_invalid_argument());
    }

    #[test]
    fn test_invalid_noise_rejected_at_construction() {
        let config = PipelineConfig {
            noise: NoiseModel::Gaussian { scale: -0.5 },
            ..PipelineConfig::default()
        };
        assert!(matches!(Pipeline::new(config, 0), Err(LinkError::Modem(_))));
    }

    #[test]
    fn test_transmit_sends_once() {
        let mut pipeline = Pipeline::new(PipelineConfig::default(), 3).unwrap();
        let mut recorder = Recorder { sent: Vec::new() };

        assert_eq!(pipeline.transmit(&mut recorder).unwrap(), 3072);
        assert_eq!(recorder.sent.len(), 1);
        assert_eq!(recorder.sent[0].len(), 3072);
    }

    #[test]
    fn test_transmit_failure_surfaced() {
        let mut pipeline = Pipeline::new(PipelineConfig::default(), 3).unwrap();
        let err = pipeline.transmit(&mut Refuser).unwrap_err();
        assert!(err.is_transmission_failure());
    }
}
