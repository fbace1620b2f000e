//! UDP traffic generator emulating an LED interactive position sensor.
//!
//! The sensor reports a frame number and a list of (x, y) points per frame
//! over UDP. This crate reproduces that traffic so a receiving application's
//! decoder can be exercised without hardware.
//!
//! # Features
//!
//! - **Packet codec**: byte-exact encoder for the sensor's little-endian layout, plus a decoder
//!   for verification
//! - **Patterns**: documentation vectors, motion paths, random clouds, an endless stream and
//!   boundary cases
//! - **Reproducible**: random patterns take an injected, seedable RNG
//! - **Resilient**: send failures are counted and logged, generation continues
//!
//! # Quick Start
//!
//! ```rust,no_run
//! use led_sensor_sim::{Emulator, EmulatorConfig, Pattern};
//! use tokio_util::sync::CancellationToken;
//!
//! #[tokio::main]
//! async fn main() -> led_sensor_sim::Result<()> {
//!     let mut emulator = Emulator::connect(EmulatorConfig::default()).await?;
//!     let report = emulator.run(Pattern::Circle, &CancellationToken::new()).await;
//!     println!("{report}");
//!     Ok(())
//! }
//! ```

// Core types and error handling
pub mod codec;
pub mod config;
mod error;
#[cfg(test)]
mod test_utils;
pub mod types;

// Generation and delivery
pub mod driver;
pub mod pattern;
pub mod stream;
pub mod transport;
pub mod transports;

// Core exports
pub use config::EmulatorConfig;
pub use error::*;
pub use types::{Frame, Point};

// Main API exports
pub use driver::{Driver, RunOutcome, RunReport};
pub use pattern::{FrameSource, Pattern};
pub use transport::Transport;
pub use transports::{MemoryTransport, UdpTransport};

use rand::{RngCore, SeedableRng};
use rand_chacha::ChaCha8Rng;
use tokio_util::sync::CancellationToken;
use tracing::{debug, info};

/// Unified entry point for running patterns against a transport.
///
/// Owns the transport for its whole lifetime; dropping the emulator releases
/// the socket, including after a cancelled run.
///
/// # Examples
///
/// ## UDP to the default receiver
/// ```rust,no_run
/// use led_sensor_sim::{Emulator, EmulatorConfig};
///
/// #[tokio::main]
/// async fn main() -> led_sensor_sim::Result<()> {
///     let emulator = Emulator::connect(EmulatorConfig::default()).await?;
///     // Run patterns...
///     Ok(())
/// }
/// ```
///
/// ## Recording packets in memory
/// ```rust
/// use led_sensor_sim::{Emulator, EmulatorConfig, MemoryTransport, Pattern};
/// use tokio_util::sync::CancellationToken;
///
/// # #[tokio::main(flavor = "current_thread")]
/// # async fn main() -> led_sensor_sim::Result<()> {
/// let mut config = EmulatorConfig::default();
/// config.examples.interval_ms = 0;
///
/// let mut emulator = Emulator::with_transport(config, MemoryTransport::new())?;
/// emulator.run(Pattern::Examples, &CancellationToken::new()).await;
/// assert_eq!(emulator.transport().packets().len(), 2);
/// # Ok(())
/// # }
/// ```
pub struct Emulator<T = UdpTransport> {
    transport: T,
    config: EmulatorConfig,
    rng: ChaCha8Rng,
}

impl Emulator<UdpTransport> {
    /// Bind a UDP transport to the configured target.
    ///
    /// # Errors
    ///
    /// Returns an error if:
    /// - The configuration is invalid
    /// - The target host cannot be resolved
    /// - No local UDP socket can be bound
    pub async fn connect(config: EmulatorConfig) -> Result<Self> {
        config.validate()?;
        let transport = UdpTransport::connect(&config.target.host, config.target.port).await?;
        Self::with_transport(config, transport)
    }
}

impl<T: Transport> Emulator<T> {
    /// Use an already constructed transport.
    pub fn with_transport(config: EmulatorConfig, transport: T) -> Result<Self> {
        config.validate()?;
        let rng = match config.seed {
            Some(seed) => {
                debug!("Random patterns seeded with {}", seed);
                ChaCha8Rng::seed_from_u64(seed)
            }
            None => ChaCha8Rng::from_entropy(),
        };
        Ok(Self { transport, config, rng })
    }

    pub fn config(&self) -> &EmulatorConfig {
        &self.config
    }

    pub fn transport(&self) -> &T {
        &self.transport
    }

    pub fn into_transport(self) -> T {
        self.transport
    }

    /// Build a generator for `pattern`, drawing a fresh seed for it.
    pub fn source(&mut self, pattern: Pattern) -> Box<dyn FrameSource> {
        let rng = ChaCha8Rng::seed_from_u64(self.rng.next_u64());
        pattern.source(&self.config, rng)
    }

    /// Run one pattern until it ends or `cancel` fires.
    pub async fn run(&mut self, pattern: Pattern, cancel: &CancellationToken) -> RunReport {
        let source = self.source(pattern);
        let speed = self.config.effective_speed();
        Driver::run(source, &mut self.transport, cancel, speed).await
    }

    /// Run every bounded pattern in order, as a decoder conformance pass.
    ///
    /// # Errors
    ///
    /// Returns [`EmulatorError::Cancelled`] if `cancel` fires before the last
    /// pattern completes.
    pub async fn run_conformance(&mut self, cancel: &CancellationToken) -> Result<Vec<RunReport>> {
        let mut reports = Vec::new();
        for pattern in Pattern::bounded() {
            let report = self.run(pattern, cancel).await;
            report.ensure_completed()?;
            reports.push(report);
        }

        let failures: u64 = reports.iter().map(RunReport::failures).sum();
        info!("Conformance pass finished: {} patterns, {} failed frames", reports.len(), failures);
        Ok(reports)
    }
}
