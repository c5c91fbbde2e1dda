//! Fixed frame-time pacing
//!
//! [`FrameClock::tick`] busy-waits until one target period has passed since
//! the previous tick, then reports how many periods actually elapsed. The
//! game loop scales movement by that delta so speed is independent of
//! overruns.

use std::time::Instant;

use tracing::trace;

use crate::types::FRAME_TIME_MS;

/// Millisecond time source.
pub trait Clock {
    /// Monotonic milliseconds since some fixed origin.
    fn now_ms(&mut self) -> u64;
}

/// Monotonic wall clock backed by [`Instant`].
#[derive(Debug, Clone, Copy)]
pub struct SystemClock {
    origin: Instant,
}

impl SystemClock {
    pub fn new() -> Self {
        Self {
            origin: Instant::now(),
        }
    }
}

impl Default for SystemClock {
    fn default() -> Self {
        Self::new()
    }
}

impl Clock for SystemClock {
    fn now_ms(&mut self) -> u64 {
        self.origin.elapsed().as_millis() as u64
    }
}

#[derive(Debug)]
pub struct FrameClock<C: Clock = SystemClock> {
    clock: C,
    target_ms: f64,
    last_tick_ms: u64,
    delta: f64,
}

impl FrameClock<SystemClock> {
    /// Pace on the system clock at the default frame period.
    pub fn system() -> Self {
        Self::new(SystemClock::new(), FRAME_TIME_MS)
    }
}

impl<C: Clock> FrameClock<C> {
    /// `target_ms` is clamped to at least 1 ms; NaN falls back to the default period.
    pub fn new(mut clock: C, target_ms: f64) -> Self {
        let target_ms = if target_ms.is_nan() {
            FRAME_TIME_MS
        } else {
            target_ms.max(1.0)
        };
        let last_tick_ms = clock.now_ms();
        Self {
            clock,
            target_ms,
            last_tick_ms,
            delta: 1.0,
        }
    }

    /// Wait for the next frame and return the elapsed time in target periods.
    ///
    /// Always at least 1.0; larger when the previous frame overran.
    pub fn tick(&mut self) -> f64 {
        let now = loop {
            let now = self.clock.now_ms();
            if now.saturating_sub(self.last_tick_ms) as f64 >= self.target_ms {
                break now;
            }
            std::hint::spin_loop();
        };

        self.delta = (now - self.last_tick_ms) as f64 / self.target_ms;
        self.last_tick_ms = now;
        if self.delta >= 2.0 {
            trace!(delta = self.delta, "frame overrun");
        }
        self.delta
    }

    pub fn delta(&self) -> f64 {
        self.delta
    }

    /// Frames per second implied by the last delta.
    pub fn actual_fps(&self) -> f64 {
        1000.0 / (self.target_ms * self.delta)
    }

    pub fn last_tick_ms(&self) -> u64 {
        self.last_tick_ms
    }

    pub fn target_ms(&self) -> f64 {
        self.target_ms
    }

    pub fn clock(&self) -> &C {
        &self.clock
    }
}
