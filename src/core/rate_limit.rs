// src/core/rate_limit.rs
use std::time::{Duration, Instant};

/// Which edge of the quiet window a debounced call fires on.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Edge {
    Leading,
    Trailing,
}

/// Collapses a burst of calls into one per quiet interval.
///
/// Arming while a deadline is pending replaces it, so only the most
/// recent schedule survives a burst. The caller supplies every `Instant`;
/// this type never reads the clock, which keeps the single-threaded event
/// loop (and the tests) in charge of time.
#[derive(Debug, Clone)]
pub struct Debouncer {
    quiet: Duration,
    edge: Edge,
    deadline: Option<Instant>,
}

impl Debouncer {
    pub fn new(quiet: Duration, edge: Edge) -> Self {
        Self {
            quiet,
            edge,
            deadline: None,
        }
    }

    /// Registers a call at `now`. Returns true when the call should run
    /// immediately, which only a leading-edge debouncer outside its quiet
    /// window does; trailing-edge callers wait for `fire_due`.
    pub fn arm(&mut self, now: Instant) -> bool {
        match self.edge {
            Edge::Trailing => {
                self.deadline = Some(now + self.quiet);
                false
            }
            Edge::Leading => {
                let idle = self.deadline.map_or(true, |d| now >= d);
                self.deadline = Some(now + self.quiet);
                idle
            }
        }
    }

    /// True once the quiet interval has elapsed since the last arm.
    /// Clears the deadline, so the deferred call runs exactly once.
    /// Trailing edge only; a leading-edge debouncer already ran.
    pub fn fire_due(&mut self, now: Instant) -> bool {
        match (self.edge, self.deadline) {
            (Edge::Trailing, Some(deadline)) if now >= deadline => {
                self.deadline = None;
                true
            }
            _ => false,
        }
    }

    /// Whether a deferred call is still scheduled.
    pub fn pending(&self) -> bool {
        self.edge == Edge::Trailing && self.deadline.is_some()
    }

    /// Drops any scheduled call.
    pub fn cancel(&mut self) {
        self.deadline = None;
    }
}

/// At most one execution per interval, leading edge; calls landing inside
/// the window are dropped, not deferred.
#[derive(Debug, Clone)]
pub struct Throttle {
    interval: Duration,
    open_at: Option<Instant>,
}

impl Throttle {
    pub fn new(interval: Duration) -> Self {
        Self {
            interval,
            open_at: None,
        }
    }

    /// True when the gate is open at `now`; passing through closes it for
    /// the next interval.
    pub fn ready(&mut self, now: Instant) -> bool {
        if self.open_at.map_or(true, |t| now >= t) {
            self.open_at = Some(now + self.interval);
            true
        } else {
            false
        }
    }
}
