// This Source Code Form is subject to the terms of the Mozilla Public
// License, v. 2.0. If a copy of the MPL was not distributed with this
// file, You can obtain one at https://mozilla.org/MPL/2.0/.

//! Rate-limited progress reporting.
//!
//! Long extractions emit human-readable status lines to a caller-supplied
//! sink. Messages are a courtesy signal: dropping them never changes
//! extraction output. Rate limiting is an explicit policy object rather
//! than a timer polled inside the element loop, so the channel behind the
//! sink cannot be saturated by large models.

use std::time::{Duration, Instant};

/// Fire-and-forget receiver for free-text status messages.
pub trait ProgressSink {
    fn report(&mut self, message: &str);
}

/// Discards all messages.
#[derive(Debug, Default, Clone, Copy)]
pub struct NullProgress;

impl ProgressSink for NullProgress {
    fn report(&mut self, _message: &str) {}
}

/// Minimum-interval emission policy. The first event always passes; after
/// that an event passes only once `min_interval` has elapsed since the last
/// emission.
#[derive(Debug, Clone)]
pub struct Throttle {
    min_interval: Duration,
    last_emit: Option<Instant>,
}

impl Throttle {
    /// Default spacing between status messages.
    pub const DEFAULT_INTERVAL: Duration = Duration::from_secs(3);

    pub fn new(min_interval: Duration) -> Self {
        Self {
            min_interval,
            last_emit: None,
        }
    }

    /// Whether an event may be emitted now; records the emission if so.
    pub fn allow(&mut self) -> bool {
        let now = Instant::now();
        match self.last_emit {
            Some(last) if now.duration_since(last) < self.min_interval => false,
            _ => {
                self.last_emit = Some(now);
                true
            }
        }
    }
}

impl Default for Throttle {
    fn default() -> Self {
        Self::new(Self::DEFAULT_INTERVAL)
    }
}

/// Wraps any sink with a [`Throttle`].
#[derive(Debug)]
pub struct ThrottledSink<S> {
    inner: S,
    throttle: Throttle,
}

impl<S: ProgressSink> ThrottledSink<S> {
    pub fn new(inner: S, throttle: Throttle) -> Self {
        Self { inner, throttle }
    }

    pub fn into_inner(self) -> S {
        self.inner
    }
}

impl<S: ProgressSink> ProgressSink for ThrottledSink<S> {
    fn report(&mut self, message: &str) {
        if self.throttle.allow() {
            self.inner.report(message);
        }
    }
}
