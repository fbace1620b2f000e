//! In-memory transport for dry runs and tests

use crate::Result;
use crate::codec::decode;
use crate::transport::Transport;
use crate::types::Frame;

/// Records every packet instead of sending it
#[derive(Debug, Default)]
pub struct MemoryTransport {
    packets: Vec<Vec<u8>>,
}

impl MemoryTransport {
    pub fn new() -> Self {
        Self::default()
    }

    /// Packets recorded so far, in send order
    pub fn packets(&self) -> &[Vec<u8>] {
        &self.packets
    }

    /// Decode every recorded packet
    pub fn frames(&self) -> Result<Vec<Frame>> {
        self.packets.iter().map(|p| decode(p)).collect()
    }

    /// Take the recorded packets, leaving the transport empty
    pub fn take_packets(&mut self) -> Vec<Vec<u8>> {
        std::mem::take(&mut self.packets)
    }
}

#[async_trait::async_trait]
impl Transport for MemoryTransport {
    async fn send(&mut self, packet: &[u8]) -> Result<usize> {
        self.packets.push(packet.to_vec());
        Ok(packet.len())
    }

    fn describe(&self) -> String {
        "memory".to_string()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::types::Point;

    #[tokio::test]
    async fn records_and_decodes_in_order() {
        let mut transport = MemoryTransport::new();
        let first = Frame::new(1, 1, vec![Point::new(1, 2)]);
        let second = Frame::new(2, 1, Vec::new());

        transport.send(&first.encode().unwrap()).await.unwrap();
        transport.send(&second.encode().unwrap()).await.unwrap();

        assert_eq!(transport.frames().unwrap(), vec![first, second]);
        assert_eq!(transport.take_packets().len(), 2);
        assert!(transport.packets().is_empty());
    }
}
