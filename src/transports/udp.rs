//! UDP transport to the receiving application

use std::net::{Ipv4Addr, Ipv6Addr, SocketAddr};
use tokio::net::UdpSocket;
use tracing::{debug, info};

use crate::transport::{Transport, resolve_target};
use crate::{EmulatorError, Result};

/// Sends each packet as one datagram to a fixed target
///
/// Binds an ephemeral local port of the target's address family. The socket
/// is closed when the transport is dropped.
pub struct UdpTransport {
    socket: UdpSocket,
    target: SocketAddr,
}

impl UdpTransport {
    /// Bind a local socket for sending to `target`
    pub async fn bind(target: SocketAddr) -> Result<Self> {
        let local: SocketAddr = if target.is_ipv4() {
            (Ipv4Addr::UNSPECIFIED, 0).into()
        } else {
            (Ipv6Addr::UNSPECIFIED, 0).into()
        };
        let socket =
            UdpSocket::bind(local).await.map_err(|e| EmulatorError::transport(target, e))?;

        info!(
            "UDP transport ready: {} -> {}",
            socket.local_addr().map(|a| a.to_string()).unwrap_or_else(|_| "?".to_string()),
            target
        );

        Ok(Self { socket, target })
    }

    /// Resolve `host:port` and bind a transport to it
    pub async fn connect(host: &str, port: u16) -> Result<Self> {
        let target = resolve_target(host, port).await?;
        Self::bind(target).await
    }

    pub fn target(&self) -> SocketAddr {
        self.target
    }

    pub fn local_addr(&self) -> Result<SocketAddr> {
        self.socket.local_addr().map_err(|e| EmulatorError::transport(self.target, e))
    }
}

#[async_trait::async_trait]
impl Transport for UdpTransport {
    async fn send(&mut self, packet: &[u8]) -> Result<usize> {
        self.socket
            .send_to(packet, self.target)
            .await
            .map_err(|e| EmulatorError::transport(self.target, e))
    }

    fn describe(&self) -> String {
        format!("udp://{}", self.target)
    }
}

impl Drop for UdpTransport {
    fn drop(&mut self) {
        debug!("Closing UDP transport to {}", self.target);
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::codec::decode;

    #[tokio::test]
    async fn delivers_datagrams_unchanged() {
        let receiver = UdpSocket::bind("127.0.0.1:0").await.unwrap();
        let target = receiver.local_addr().unwrap();

        let mut transport = UdpTransport::bind(target).await.unwrap();
        let packet = [0x86, 0x55, 0x01, 0x00, 0x01, 0x00, 0x1D, 0x01, 0x05, 0x00];
        assert_eq!(transport.send(&packet).await.unwrap(), packet.len());

        let mut buf = [0u8; 64];
        let (len, from) = receiver.recv_from(&mut buf).await.unwrap();
        assert_eq!(&buf[..len], &packet);
        assert_eq!(from.port(), transport.local_addr().unwrap().port());
        assert_eq!(decode(&buf[..len]).unwrap().frame_number, 0x5586);
    }

    #[tokio::test]
    async fn connect_resolves_host_names() {
        let transport = UdpTransport::connect("localhost", 25000).await.unwrap();
        assert_eq!(transport.target().port(), 25000);
        assert!(transport.describe().starts_with("udp://"));
    }
}
