//! Error types for packet generation and delivery.
//!
//! All errors implement the `std::error::Error` trait and carry enough context
//! to tell the operator what went wrong and where.
//!
//! ## Error Categories
//!
//! - **Invalid arguments**: a frame number, reserved field, coordinate or point
//!   count that does not fit the 16-bit wire fields
//! - **Transport errors**: socket bind or send failures
//! - **Unknown patterns**: a pattern selector that names no known pattern
//! - **Cancellation**: an operator-initiated stop of a run sequence
//! - **Decode errors**: malformed packets handed to [`decode`](crate::codec::decode)
//! - **Configuration errors**: unreadable or inconsistent YAML settings
//!
//! ## Recovery and Retry
//!
//! ```rust
//! use led_sensor_sim::EmulatorError;
//!
//! let error = EmulatorError::invalid_argument("frame_number", 70_000, u16::MAX.into());
//! assert!(!error.is_retryable());
//! for suggestion in error.recovery_suggestions() {
//!     println!("  - {}", suggestion);
//! }
//! ```

use std::net::SocketAddr;
use std::path::PathBuf;
use thiserror::Error;

/// Result type alias for emulator operations.
pub type Result<T, E = EmulatorError> = std::result::Result<T, E>;

/// Main error type for emulator operations.
#[derive(Error, Debug)]
#[non_exhaustive]
pub enum EmulatorError {
    #[error("Invalid {field}: {value} exceeds maximum {max}")]
    InvalidArgument { field: &'static str, value: u64, max: u64 },

    #[error("Failed to send to {target}")]
    Transport {
        target: SocketAddr,
        #[source]
        source: std::io::Error,
    },

    #[error("Failed to resolve target host '{host}'")]
    AddressResolution {
        host: String,
        #[source]
        source: std::io::Error,
    },

    #[error("Unknown pattern '{name}'")]
    UnknownPattern { name: String },

    #[error("Run cancelled after {frames_sent} frames")]
    Cancelled { frames_sent: u64 },

    #[error("Decode error in {context}: {details}")]
    Decode { context: String, details: String },

    #[error("Invalid configuration: {details}")]
    Config { details: String },

    #[error("Configuration file error: {path}")]
    File {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },
}

impl EmulatorError {
    /// Returns whether this error is potentially recoverable through retry.
    pub fn is_retryable(&self) -> bool {
        match self {
            EmulatorError::Transport { .. } => true,
            EmulatorError::AddressResolution { .. } => true,
            EmulatorError::InvalidArgument { .. } => false,
            EmulatorError::UnknownPattern { .. } => false,
            EmulatorError::Cancelled { .. } => false,
            EmulatorError::Decode { .. } => false,
            EmulatorError::Config { .. } => false,
            EmulatorError::File { .. } => false,
        }
    }

    /// Returns whether this error represents a normal, operator-requested stop.
    pub fn is_cancelled(&self) -> bool {
        matches!(self, EmulatorError::Cancelled { .. })
    }

    /// Returns suggested recovery actions for this error.
    pub fn recovery_suggestions(&self) -> Vec<&'static str> {
        match self {
            EmulatorError::InvalidArgument { .. } => vec![
                "Reduce frame numbers modulo 65536 before encoding",
                "Keep coordinates within 0..=65535",
                "Lower the number of points per frame",
            ],
            EmulatorError::Transport { .. } => vec![
                "Check that the receiving host is reachable",
                "Verify the target port is correct",
                "Check local firewall rules for outgoing UDP",
            ],
            EmulatorError::AddressResolution { .. } => vec![
                "Check the host name spelling",
                "Use a literal IP address such as 127.0.0.1",
            ],
            EmulatorError::UnknownPattern { .. } => vec![
                "Run the `list` command to see available patterns",
                "Use a menu number 1-5 or a pattern name such as `circle`",
            ],
            EmulatorError::Cancelled { .. } => vec!["Run the pattern again to resume traffic"],
            EmulatorError::Decode { .. } => vec![
                "Check the packet was produced by a compatible sender",
                "Verify the datagram was not truncated in transit",
            ],
            EmulatorError::Config { .. } => vec![
                "Check point count bounds are ordered and within limits",
                "Check the playback speed is a positive number",
            ],
            EmulatorError::File { .. } => vec![
                "Check file exists and is readable",
                "Check file permissions",
            ],
        }
    }

    /// Helper constructor for out-of-range arguments.
    pub fn invalid_argument(field: &'static str, value: u64, max: u64) -> Self {
        EmulatorError::InvalidArgument { field, value, max }
    }

    /// Helper constructor for transport failures.
    pub fn transport(target: SocketAddr, source: std::io::Error) -> Self {
        EmulatorError::Transport { target, source }
    }

    /// Helper constructor for decode errors.
    pub fn decode(context: impl Into<String>, details: impl Into<String>) -> Self {
        EmulatorError::Decode { context: context.into(), details: details.into() }
    }

    /// Helper constructor for configuration errors.
    pub fn config(details: impl Into<String>) -> Self {
        EmulatorError::Config { details: details.into() }
    }

    /// Helper constructor for configuration file errors with path context.
    pub fn file_error(path: PathBuf, source: std::io::Error) -> Self {
        EmulatorError::File { path, source }
    }
}

impl From<serde_yaml_ng::Error> for EmulatorError {
    fn from(err: serde_yaml_ng::Error) -> Self {
        EmulatorError::Config { details: err.to_string() }
    }
}
