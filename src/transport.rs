//! Transport trait for packet delivery

use std::net::SocketAddr;
use tokio::net::lookup_host;
use tracing::debug;

use crate::{EmulatorError, Result};

/// Trait for packet sinks
///
/// The driver hands every encoded packet to a transport and never opens or
/// closes it; whoever owns the transport owns its lifecycle. Send failures
/// are reported per packet and must leave the transport usable for the next
/// frame.
#[async_trait::async_trait]
pub trait Transport: Send {
    /// Send one packet as a single datagram
    ///
    /// Returns the number of bytes handed to the network.
    async fn send(&mut self, packet: &[u8]) -> Result<usize>;

    /// Human-readable destination for logs
    fn describe(&self) -> String;
}

/// Resolve `host:port`, preferring an IPv4 address when the host has both.
pub async fn resolve_target(host: &str, port: u16) -> Result<SocketAddr> {
    let addrs: Vec<SocketAddr> = lookup_host((host, port))
        .await
        .map_err(|source| EmulatorError::AddressResolution { host: host.to_string(), source })?
        .collect();

    let target = addrs.iter().find(|a| a.is_ipv4()).or_else(|| addrs.first()).copied().ok_or_else(
        || EmulatorError::AddressResolution {
            host: host.to_string(),
            source: std::io::Error::new(std::io::ErrorKind::NotFound, "no addresses found"),
        },
    )?;

    debug!("Resolved {}:{} to {}", host, port, target);
    Ok(target)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[tokio::test]
    async fn resolves_literal_addresses() {
        let addr = resolve_target("127.0.0.1", 25000).await.unwrap();
        assert_eq!(addr, "127.0.0.1:25000".parse().unwrap());

        let addr = resolve_target("::1", 25000).await.unwrap();
        assert!(addr.is_ipv6());
    }

    #[tokio::test]
    async fn unresolvable_host_is_reported() {
        let err = resolve_target("host.invalid", 25000).await.unwrap_err();
        assert!(matches!(err, EmulatorError::AddressResolution { .. }));
        assert!(err.to_string().contains("host.invalid"));
    }
}
