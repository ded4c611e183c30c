use std::path::PathBuf;
use std::time::{SystemTime, UNIX_EPOCH};

use clap::Parser;

use channel_physics::NoiseKind;
use phy_modem::FrameLayout;
use udp_link::config::{LinkConfig, DEFAULT_CONFIG_PATH};
use udp_link::exit;
use udp_link::logging::{init_logging, LogFormat, LogLevel};
use udp_link::{Pipeline, PipelineConfig, ProfileKind, Result, UdpTransport};

#[derive(Parser, Debug)]
#[command(name = "qpsk-tx", version, about = "Send noisy QPSK frames over UDP")]
struct Cli {
    /// Link configuration file (key=value).
    #[arg(value_name = "CONFIG", default_value = DEFAULT_CONFIG_PATH)]
    config: PathBuf,

    /// Wire format.
    #[arg(long, value_name = "PROFILE", default_value = "padded")]
    profile: ProfileKind,

    /// Channel noise distribution.
    #[arg(long, value_name = "KIND", default_value = "gaussian")]
    noise: NoiseKind,

    /// Noise spread (std-dev for gaussian, half-width for uniform).
    #[arg(long, default_value_t = 0.5)]
    scale: f64,

    /// RNG seed; defaults to the current time.
    #[arg(long, env = "QPSK_TX_SEED")]
    seed: Option<u64>,

    /// Transmission units to send.
    #[arg(long, default_value_t = 1, value_parser = clap::value_parser!(u32).range(1..))]
    units: u32,

    /// Build payloads without opening a socket.
    #[arg(long)]
    dry_run: bool,

    /// Log output format (stderr).
    #[arg(long, value_name = "FORMAT", default_value = "text")]
    log_format: LogFormat,

    /// Minimum log level (stderr).
    #[arg(long, value_name = "LEVEL", default_value = "info")]
    log_level: LogLevel,
}

fn wall_clock_seed() -> u64 {
    SystemTime::now()
        .duration_since(UNIX_EPOCH)
        .map(|d| d.as_nanos() as u64)
        .unwrap_or_default()
}

fn run(cli: Cli) -> Result<()> {
    let link = LinkConfig::load(&cli.config)?;
    tracing::info!(host = %link.host, port = link.port, "link configuration");

    let config = PipelineConfig {
        layout: FrameLayout::default(),
        noise: cli.noise.with_scale(cli.scale)?,
        profile: cli.profile,
    };
    let seed = cli.seed.unwrap_or_else(wall_clock_seed);
    let mut pipeline = Pipeline::new(config, seed)?;

    if cli.dry_run {
        for unit in 0..cli.units {
            let built = pipeline.run_unit()?;
            tracing::info!(unit, bytes = built.payload.len(), "dry run, not sent");
        }
        return Ok(());
    }

    let mut transport = UdpTransport::connect(&link)?;
    for unit in 0..cli.units {
        let sent = pipeline.transmit(&mut transport)?;
        tracing::debug!(unit, sent, "unit complete");
    }
    tracing::info!(
        dest = %transport.destination(),
        units = cli.units,
        "transmission finished"
    );
    Ok(())
}

fn main() {
    let cli = Cli::parse();
    init_logging(cli.log_format, cli.log_level);

    match run(cli) {
        Ok(()) => std::process::exit(exit::SUCCESS),
        Err(err) => {
            eprintln!("error: {err}");
            std::process::exit(exit::code_for(&err));
        }
    }
}
