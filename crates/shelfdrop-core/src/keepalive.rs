#![forbid(unsafe_code)]

//! Keepalive replay for suppressed classifications.
//!
//! While the classifier is withholding its output during a settle window, the
//! host pointer sensor sees a motionless pointer and an empty target list, and
//! may stop re-evaluating overlaps entirely. [`KeepaliveDispatcher`] arms a
//! one-shot replay of the last known pointer position; once the window
//! elapses, pumping it feeds a synthetic pointer-move back into the sensor's
//! input channel so the now-settled classification is delivered promptly
//! instead of waiting for the user's next physical motion.
//!
//! # Invariants
//!
//! 1. At most one replay is pending at a time; arming while one is pending is
//!    a no-op and the first request's pointer is retained.
//! 2. A pending replay expires only by firing. There is no cancel: a replay
//!    that fires after the need has passed re-triggers an evaluation that
//!    reproduces the current decision.
//! 3. A due replay fires exactly once per [`pump`](KeepaliveDispatcher::pump).
//!
//! Like the rest of the engine, the dispatcher never reads a clock; callers
//! inject `now` on every call.

use std::time::Duration;

use web_time::Instant;

use crate::geometry::Point;

/// Receiving end of the host sensor's input channel.
///
/// A browser host adapts this to dispatching a synthetic `pointermove`; any
/// other host can pass a closure straight into its sensor's event handler.
pub trait SensorChannel {
    /// Feed a synthetic pointer-move at the given position into the sensor.
    fn replay_pointer_move(&mut self, at: Point);
}

impl<F: FnMut(Point)> SensorChannel for F {
    fn replay_pointer_move(&mut self, at: Point) {
        self(at)
    }
}

/// One armed replay.
#[derive(Debug, Clone, Copy)]
struct PendingReplay {
    pointer: Point,
    armed_at: Instant,
}

/// Schedules and delivers the synthetic pointer replay that keeps the host
/// sensor's drag loop live while output is suppressed.
///
/// Call [`schedule`](KeepaliveDispatcher::schedule) when suppressing, and
/// [`pump`](KeepaliveDispatcher::pump) from the host's tick source.
#[derive(Debug)]
pub struct KeepaliveDispatcher {
    delay: Duration,
    pending: Option<PendingReplay>,
}

impl KeepaliveDispatcher {
    /// Create a dispatcher firing `delay` after each successful schedule.
    #[must_use]
    pub fn new(delay: Duration) -> Self {
        Self {
            delay,
            pending: None,
        }
    }

    /// Arm a replay of `pointer` due `delay` after `now`.
    ///
    /// Idempotent: returns `false` without touching the pending replay if one
    /// is already armed.
    pub fn schedule(&mut self, pointer: Point, now: Instant) -> bool {
        if self.pending.is_some() {
            return false;
        }
        self.pending = Some(PendingReplay {
            pointer,
            armed_at: now,
        });
        tracing::trace!(target: "shelfdrop.keepalive", pointer = ?pointer, "armed pointer replay");
        true
    }

    /// Fire the pending replay into `channel` if its delay has elapsed.
    ///
    /// Returns `true` if a replay fired. The pending slot is cleared on fire,
    /// so a later suppression can arm a fresh one.
    pub fn pump(&mut self, now: Instant, channel: &mut impl SensorChannel) -> bool {
        let due = self
            .pending
            .as_ref()
            .is_some_and(|replay| now.duration_since(replay.armed_at) >= self.delay);
        if !due {
            return false;
        }
        if let Some(replay) = self.pending.take() {
            tracing::trace!(target: "shelfdrop.keepalive", pointer = ?replay.pointer, "replaying pointer move");
            channel.replay_pointer_move(replay.pointer);
        }
        true
    }

    /// Whether a replay is currently armed.
    #[inline]
    #[must_use]
    pub fn is_pending(&self) -> bool {
        self.pending.is_some()
    }

    /// The configured replay delay.
    #[inline]
    #[must_use]
    pub fn delay(&self) -> Duration {
        self.delay
    }

    /// Drop any armed replay. Used when a fresh gesture begins.
    pub fn reset(&mut self) {
        self.pending = None;
    }
}
