//! Diagnostics setup for `qpsk-tx`
//!
//! Events go to stderr so nothing shares a stream with payload tooling.
//! The chosen level applies to the link's own crates; everything else is
//! capped at WARN.

use clap::ValueEnum;
use tracing::level_filters::LevelFilter;
use tracing_subscriber::filter::Targets;
use tracing_subscriber::fmt;
use tracing_subscriber::prelude::*;

/// Crates whose events follow `--log-level`
pub const LINK_TARGETS: [&str; 4] = ["phy_modem", "channel_physics", "udp_link", "qpsk_tx"];

#[derive(Copy, Clone, Debug, ValueEnum)]
pub enum LogFormat {
    Text,
    /// One JSON object per event
    Json,
}

#[derive(Copy, Clone, Debug, ValueEnum)]
pub enum LogLevel {
    Error,
    Warn,
    /// Config source and per-unit send results
    Info,
    /// Pipeline setup and generated bits
    Debug,
    /// Per-symbol noise application
    Trace,
}

impl LogLevel {
    pub fn as_filter(self) -> LevelFilter {
        match self {
            LogLevel::Error => LevelFilter::ERROR,
            LogLevel::Warn => LevelFilter::WARN,
            LogLevel::Info => LevelFilter::INFO,
            LogLevel::Debug => LevelFilter::DEBUG,
            LogLevel::Trace => LevelFilter::TRACE,
        }
    }
}

/// Per-target filter: link crates at `level`, others no louder than WARN
pub fn link_filter(level: LogLevel) -> Targets {
    let level = level.as_filter();
    Targets::new()
        .with_targets(LINK_TARGETS.map(|target| (target, level)))
        .with_default(level.min(LevelFilter::WARN))
}

/// Install the stderr subscriber; a second call is a no-op.
pub fn init_logging(format: LogFormat, level: LogLevel) {
    let layer = fmt::layer().with_writer(std::io::stderr).with_ansi(false);
    let registry = tracing_subscriber::registry().with(link_filter(level));

    let _ = match format {
        LogFormat::Text => registry.with(layer).try_init(),
        LogFormat::Json => registry.with(layer.json()).try_init(),
    };
}
