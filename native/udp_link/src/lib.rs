//! UDP transmit link for QPSK frames
//!
//! Glues the PHY stages (`phy_modem`) and the noise channel
//! (`channel_physics`) into a per-unit pipeline, and provides the thin
//! collaborators around it: the `key=value` config loader and the UDP
//! transport.

pub mod config;
pub mod error;
pub mod exit;
pub mod logging;
pub mod pipeline;
pub mod transport;

pub use config::LinkConfig;
pub use error::{LinkError, Result};
pub use pipeline::{Pipeline, PipelineConfig, ProfileKind, TransmissionUnit};
pub use transport::{Transport, UdpTransport};
