//! Command-line sender for LED interactive sensor test traffic

use anyhow::{Context, bail};
use clap::{ArgAction, Parser, Subcommand};
use std::path::PathBuf;
use tokio_util::sync::CancellationToken;
use tracing::{info, warn};
use tracing_subscriber::EnvFilter;

use led_sensor_sim::codec::HexDump;
use led_sensor_sim::{Emulator, EmulatorConfig, MemoryTransport, Pattern};

#[derive(Debug, Parser)]
#[command(
    name = "led-sensor-sim",
    version,
    about = "Send LED interactive sensor test packets over UDP"
)]
struct Cli {
    #[command(subcommand)]
    command: Command,

    /// YAML configuration file
    #[arg(long, global = true)]
    config: Option<PathBuf>,

    /// Receiver port
    #[arg(short, long, global = true)]
    port: Option<u16>,

    /// Seed for random patterns
    #[arg(long, global = true)]
    seed: Option<u64>,

    /// Pacing multiplier (0.1 - 10)
    #[arg(long, global = true)]
    speed: Option<f64>,

    /// Increase log verbosity (-v debug, -vv trace with packet hex)
    #[arg(short, long, global = true, action = ArgAction::Count)]
    verbose: u8,
}

#[derive(Debug, Subcommand)]
enum Command {
    /// Send one pattern (name or legacy menu number 1-5)
    Run {
        pattern: Pattern,
        /// Receiver host, defaults to 127.0.0.1
        host: Option<String>,
    },
    /// Send every finite pattern in order
    Conformance {
        /// Receiver host, defaults to 127.0.0.1
        host: Option<String>,
    },
    /// Print a pattern's packets as hex without sending
    Dump {
        pattern: Pattern,
        /// Maximum frames to print (required for the stream pattern)
        #[arg(long)]
        limit: Option<usize>,
    },
    /// List available patterns
    List,
}

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    let cli = Cli::parse();
    init_tracing(cli.verbose);

    let mut config = match &cli.config {
        Some(path) => EmulatorConfig::load(path)
            .with_context(|| format!("loading configuration from {}", path.display()))?,
        None => EmulatorConfig::default(),
    };
    if let Some(port) = cli.port {
        config.target.port = port;
    }
    if cli.seed.is_some() {
        config.seed = cli.seed;
    }
    if let Some(speed) = cli.speed {
        config.speed = speed;
    }

    match cli.command {
        Command::List => {
            for pattern in Pattern::ALL {
                let menu = pattern.menu_number().map(|n| n.to_string()).unwrap_or_default();
                println!("{:>2}  {:<11} {}", menu, pattern.name(), pattern.description());
            }
        }
        Command::Dump { pattern, limit } => {
            if pattern.is_unbounded() && limit.is_none() {
                bail!("the {} pattern never ends; pass --limit", pattern);
            }
            let mut emulator = Emulator::with_transport(config, MemoryTransport::new())?;
            let source = emulator.source(pattern);
            for scheduled in source.take(limit.unwrap_or(usize::MAX)) {
                let frame = scheduled.frame;
                let packet = frame.encode()?;
                let points: Vec<String> = frame.points.iter().map(ToString::to_string).collect();
                let points = points.join(", ");
                println!("Frame {:5}: {} | {}", frame.frame_number, points, HexDump(&packet));
            }
        }
        Command::Run { pattern, host } => {
            if let Some(host) = host {
                config.target.host = host;
            }
            let mut emulator = Emulator::connect(config).await.context("opening UDP transport")?;
            if pattern.is_unbounded() {
                info!("Streaming until interrupted (Ctrl+C to stop)");
            }
            let report = emulator.run(pattern, &cancel_on_interrupt()).await;
            println!("{report}");
        }
        Command::Conformance { host } => {
            if let Some(host) = host {
                config.target.host = host;
            }
            let mut emulator = Emulator::connect(config).await.context("opening UDP transport")?;
            match emulator.run_conformance(&cancel_on_interrupt()).await {
                Ok(reports) => {
                    for report in reports {
                        println!("{report}");
                    }
                }
                Err(e) if e.is_cancelled() => warn!("Conformance pass interrupted: {}", e),
                Err(e) => return Err(e.into()),
            }
        }
    }

    Ok(())
}

fn init_tracing(verbose: u8) {
    let default_level = match verbose {
        0 => "info",
        1 => "debug",
        _ => "trace",
    };
    let filter =
        EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new(default_level));
    tracing_subscriber::fmt().with_env_filter(filter).init();
}

/// Token cancelled on the first Ctrl+C
fn cancel_on_interrupt() -> CancellationToken {
    cancel_when(tokio::signal::ctrl_c())
}

/// Token cancelled once `signal` resolves; a failed signal is logged and
/// leaves the token untouched
fn cancel_when<F>(signal: F) -> CancellationToken
where
    F: Future<Output = std::io::Result<()>> + Send + 'static,
{
    let cancel = CancellationToken::new();
    let trigger = cancel.clone();
    tokio::spawn(async move {
        match signal.await {
            Ok(()) => {
                info!("Interrupt received, stopping after the current frame");
                trigger.cancel();
            }
            Err(e) => warn!("Ctrl+C handler unavailable, runs can only end on their own: {}", e),
        }
    });
    cancel
}
