use std::io;
use std::path::PathBuf;

use phy_modem::ModemError;

/// Errors surfaced by the transmit link.
///
/// Nothing here is retried or recovered internally; the caller decides
/// what to do with a failed transmission unit.
#[derive(Debug, thiserror::Error)]
pub enum LinkError {
    /// A pipeline stage rejected its input.
    #[error(transparent)]
    Modem(#[from] ModemError),

    /// Malformed link configuration.
    #[error("invalid configuration: {0}")]
    InvalidConfig(String),

    /// The config file exists but could not be read.
    #[error("failed to read config {path}: {source}")]
    ConfigRead { path: PathBuf, source: io::Error },

    /// The datagram channel could not be set up.
    #[error("transport unavailable ({what}): {source}")]
    ResourceUnavailable {
        what: String,
        source: io::Error,
    },

    /// The transport reported a failed send.
    #[error("send to {dest} failed: {source}")]
    TransmissionFailure { dest: String, source: io::Error },

    /// The datagram left truncated.
    #[error("short send to {dest}: {sent} of {expected} bytes")]
    ShortWrite {
        dest: String,
        sent: usize,
        expected: usize,
    },
}

impl LinkError {
    /// True for the malformed-input category (modem or config).
    pub fn is_invalid_argument(&self) -> bool {
        matches!(self, Self::Modem(_) | Self::InvalidConfig(_))
    }

    /// True when the transport reported a failed or partial send.
    pub fn is_transmission_failure(&self) -> bool {
        matches!(self, Self::TransmissionFailure { .. } | Self::ShortWrite { .. })
    }
}

pub type Result<T> = std::result::Result<T, LinkError>;
