//! Driver runs a pattern against a transport

use std::fmt;
use std::pin::pin;

use futures::StreamExt;
use tokio_util::sync::CancellationToken;
use tracing::{debug, error, info, trace, warn};

use crate::codec::{HexDump, encode_into};
use crate::pattern::{FrameSource, Pattern};
use crate::stream::PaceExt;
use crate::transport::Transport;
use crate::types::frame_after;
use crate::{EmulatorError, Result};

/// How a run ended
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum RunOutcome {
    /// The pattern produced its last frame
    Completed,
    /// The run was stopped through its cancellation token
    Cancelled,
}

/// Counters collected over one pattern run
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct RunReport {
    pub pattern: Pattern,
    pub frames_generated: u64,
    pub packets_sent: u64,
    pub bytes_sent: u64,
    pub send_failures: u64,
    pub encode_failures: u64,
    /// Frames whose number does not follow the previous one under the
    /// half-range rule, so a receiver would see them as stale
    pub out_of_sequence: u64,
    pub last_frame_number: Option<u16>,
    pub outcome: RunOutcome,
}

impl RunReport {
    fn new(pattern: Pattern) -> Self {
        Self {
            pattern,
            frames_generated: 0,
            packets_sent: 0,
            bytes_sent: 0,
            send_failures: 0,
            encode_failures: 0,
            out_of_sequence: 0,
            last_frame_number: None,
            outcome: RunOutcome::Completed,
        }
    }

    /// Frames that were generated but never reached the transport
    pub fn failures(&self) -> u64 {
        self.send_failures + self.encode_failures
    }

    pub fn is_cancelled(&self) -> bool {
        self.outcome == RunOutcome::Cancelled
    }

    /// Turn a cancelled run into [`EmulatorError::Cancelled`]
    ///
    /// Used to stop a sequence of runs once the operator interrupts one.
    pub fn ensure_completed(&self) -> Result<()> {
        match self.outcome {
            RunOutcome::Completed => Ok(()),
            RunOutcome::Cancelled => {
                Err(EmulatorError::Cancelled { frames_sent: self.packets_sent })
            }
        }
    }
}

impl fmt::Display for RunReport {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(
            f,
            "{}: {} frames, {} packets ({} bytes) sent, {} send failures, {} encode failures",
            self.pattern,
            self.frames_generated,
            self.packets_sent,
            self.bytes_sent,
            self.send_failures,
            self.encode_failures
        )?;
        if self.is_cancelled() {
            f.write_str(" [cancelled]")?;
        }
        Ok(())
    }
}

/// Driver pulls frames from a source, encodes them and hands them to a transport
///
/// Runs on the caller's task: one pattern at a time, no shared state. A failed
/// send is logged and counted, and the next frame is generated as usual.
pub struct Driver;

impl Driver {
    /// Run `source` to completion or until `cancel` fires
    ///
    /// Cancellation is observed between frames, during the pacing delay and
    /// while a send is pending. An abandoned send never leaves a partial
    /// packet on the wire since each packet is a single datagram.
    pub async fn run<S, T>(
        source: S,
        transport: &mut T,
        cancel: &CancellationToken,
        speed: f64,
    ) -> RunReport
    where
        S: FrameSource,
        T: Transport + ?Sized,
    {
        let pattern = source.pattern();
        match source.total_frames() {
            Some(total) => {
                info!("Running {} pattern ({} frames) -> {}", pattern, total, transport.describe())
            }
            None => {
                info!("Running {} pattern until cancelled -> {}", pattern, transport.describe())
            }
        }

        let mut report = RunReport::new(pattern);
        let mut frames = pin!(source.paced(speed));
        let mut buffer = Vec::new();
        let mut consecutive_failures = 0u32;

        loop {
            let frame = tokio::select! {
                biased;
                _ = cancel.cancelled() => {
                    info!("{} pattern cancelled", pattern);
                    report.outcome = RunOutcome::Cancelled;
                    break;
                }
                next = frames.next() => match next {
                    Some(frame) => frame,
                    None => break,
                },
            };

            report.frames_generated += 1;
            if let Some(previous) = report.last_frame_number {
                if !frame_after(frame.frame_number, previous) {
                    report.out_of_sequence += 1;
                    debug!("Frame {} does not follow frame {}", frame.frame_number, previous);
                }
            }
            report.last_frame_number = Some(frame.frame_number);

            if let Err(e) = encode_into(&frame, &mut buffer) {
                report.encode_failures += 1;
                error!("Frame {} could not be encoded: {}", frame.frame_number, e);
                continue;
            }

            trace!(
                "Frame {:5}: {} points | {}",
                frame.frame_number,
                frame.point_count(),
                HexDump(&buffer)
            );

            let result = tokio::select! {
                biased;
                _ = cancel.cancelled() => {
                    info!(
                        "{} pattern cancelled while sending frame {}",
                        pattern, frame.frame_number
                    );
                    report.outcome = RunOutcome::Cancelled;
                    break;
                }
                result = transport.send(&buffer) => result,
            };

            match result {
                Ok(bytes) => {
                    report.packets_sent += 1;
                    report.bytes_sent += bytes as u64;
                    if consecutive_failures > 0 {
                        info!("Transport recovered after {} failed sends", consecutive_failures);
                        consecutive_failures = 0;
                    }
                }
                Err(e) => {
                    // Transport errors are not fatal - count and keep generating
                    report.send_failures += 1;
                    consecutive_failures += 1;
                    warn!(
                        "Send failed for frame {} ({} in a row): {}",
                        frame.frame_number, consecutive_failures, e
                    );
                }
            }
        }

        info!("Run finished: {}", report);
        if report.failures() > 0 {
            warn!(
                "{} of {} frames from {} were not delivered",
                report.failures(),
                report.frames_generated,
                pattern
            );
        }
        debug!("Last frame number: {:?}", report.last_frame_number);

        report
    }
}
