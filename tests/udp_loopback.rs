//! End-to-end delivery over a real loopback socket
//!
//! A local UDP socket plays the receiving application: every datagram must
//! decode to the frame the pattern generated.

use std::time::Duration;

use led_sensor_sim::codec::decode;
use led_sensor_sim::{Emulator, EmulatorConfig, Frame, Pattern, Point};
use tokio::net::UdpSocket;
use tokio::time::timeout;
use tokio_util::sync::CancellationToken;

async fn receiver() -> (UdpSocket, EmulatorConfig) {
    let _ = tracing_subscriber::fmt::try_init();

    let socket = UdpSocket::bind("127.0.0.1:0").await.expect("bind receiver");
    let port = socket.local_addr().expect("receiver address").port();

    let yaml = format!(
        "target:\n  port: {port}\nseed: 2024\nexamples:\n  interval_ms: 0\n\
         sweep:\n  interval_ms: 0\nedge_cases:\n  interval_ms: 0\n  many_points: 64\n\
         stream:\n  interval_ms: 1\n  start_frame: 65533\n"
    );
    let config = EmulatorConfig::from_yaml_str(&yaml).expect("valid config");
    (socket, config)
}

async fn receive(socket: &UdpSocket, count: usize) -> Vec<Frame> {
    let mut frames = Vec::with_capacity(count);
    let mut buf = vec![0u8; 65_536];
    for _ in 0..count {
        let (len, _) = timeout(Duration::from_secs(5), socket.recv_from(&mut buf))
            .await
            .expect("datagram within timeout")
            .expect("recv");
        frames.push(decode(&buf[..len]).expect("well-formed packet"));
    }
    frames
}

#[tokio::test]
async fn documentation_examples_arrive_byte_exact() {
    let (socket, config) = receiver().await;
    let mut emulator = Emulator::connect(config).await.expect("connect");

    let report = emulator.run(Pattern::Examples, &CancellationToken::new()).await;
    assert_eq!(report.packets_sent, 2);

    let mut buf = [0u8; 64];
    let (len, _) = socket.recv_from(&mut buf).await.unwrap();
    assert_eq!(&buf[..len], &[0x86, 0x55, 0x01, 0x00, 0x01, 0x00, 0x1D, 0x01, 0x05, 0x00]);
    let (len, _) = socket.recv_from(&mut buf).await.unwrap();
    assert_eq!(
        &buf[..len],
        &[0xCA, 0x56, 0x01, 0x00, 0x02, 0x00, 0xF5, 0x00, 0x05, 0x00, 0xFF, 0x00, 0x0F, 0x00]
    );
}

#[tokio::test]
async fn edge_cases_survive_the_wire() {
    let (socket, config) = receiver().await;
    let mut emulator = Emulator::connect(config).await.expect("connect");

    let report = emulator.run(Pattern::EdgeCases, &CancellationToken::new()).await;
    let frames = receive(&socket, report.packets_sent as usize).await;

    assert_eq!(frames.len(), 8);
    assert!(frames[0].points.is_empty());
    assert_eq!(frames[2].points, vec![Point::new(65_535, 65_535)]);
    assert_eq!(frames[4].point_count(), 64);
    assert_eq!(frames.last().map(|f| f.frame_number), Some(0));
}

#[tokio::test]
async fn stream_wraps_and_stops_when_cancelled() {
    let (socket, config) = receiver().await;
    let mut emulator = Emulator::connect(config).await.expect("connect");

    let cancel = CancellationToken::new();
    let run = emulator.run(Pattern::Stream, &cancel);
    let collect = async {
        let frames = receive(&socket, 5).await;
        cancel.cancel();
        frames
    };
    let (report, frames) = tokio::join!(run, collect);

    assert!(report.is_cancelled());
    assert!(report.packets_sent >= 5);
    let numbers: Vec<u16> = frames.iter().map(|f| f.frame_number).collect();
    assert_eq!(numbers, vec![65_533, 65_534, 65_535, 0, 1]);
    for frame in &frames {
        assert!((1..=3).contains(&frame.point_count()));
        assert!(frame.points.iter().all(|p| p.x <= 1920 && p.y <= 1080));
    }
}
