//! Frame pacing

use futures::{Stream, ready};
use pin_project_lite::pin_project;
use std::future::Future;
use std::pin::Pin;
use std::task::{Context, Poll};
use std::time::Duration;
use tokio::time::{Instant, Sleep, sleep};

use crate::config::clamp_speed;
use crate::types::{Frame, ScheduledFrame};

/// Extension trait to pace any frame generator into a Stream
pub trait PaceExt: Iterator<Item = ScheduledFrame> {
    /// Emit each frame, then wait its delay divided by `speed` before the next
    ///
    /// Must be called within a tokio runtime.
    fn paced(self, speed: f64) -> Paced<Self>
    where
        Self: Sized,
    {
        Paced::new(self, speed)
    }
}

impl<T: Iterator<Item = ScheduledFrame>> PaceExt for T {}

pin_project! {
    /// A stream that yields frames with the pause each one requests after it
    ///
    /// The first frame is ready immediately. Pacing is a plain timer, so
    /// jitter under load is expected.
    pub struct Paced<S> {
        source: S,
        #[pin]
        sleep: Sleep,
        armed: bool,
        speed: f64,
    }
}

impl<S> Paced<S> {
    /// Create a new paced stream; `speed` is clamped to the supported range
    /// and a NaN speed plays at normal pace
    pub fn new(source: S, speed: f64) -> Self {
        Self {
            source,
            sleep: sleep(Duration::ZERO),
            armed: false,
            speed: clamp_speed(speed),
        }
    }

    /// The wrapped generator
    pub fn get_ref(&self) -> &S {
        &self.source
    }

    pub fn speed(&self) -> f64 {
        self.speed
    }
}

impl<S: Iterator<Item = ScheduledFrame>> Stream for Paced<S> {
    type Item = Frame;

    fn poll_next(self: Pin<&mut Self>, cx: &mut Context<'_>) -> Poll<Option<Self::Item>> {
        let mut this = self.project();

        // Wait out the previous frame's delay
        if *this.armed {
            ready!(this.sleep.as_mut().poll(cx));
            *this.armed = false;
        }

        match this.source.next() {
            Some(ScheduledFrame { frame, delay }) => {
                let delay = delay.div_f64(*this.speed);
                if !delay.is_zero() {
                    this.sleep.as_mut().reset(Instant::now() + delay);
                    *this.armed = true;
                }
                Poll::Ready(Some(frame))
            }
            None => Poll::Ready(None),
        }
    }

    fn size_hint(&self) -> (usize, Option<usize>) {
        self.source.size_hint()
    }
}
