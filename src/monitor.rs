//! Bounded polling for attestation availability.
//!
//! Emission and verification are decoupled by an arbitrary delay while the
//! transport collects signatures; an observer who wants end-to-end
//! completion polls for the attestation. Timing out is an ordinary outcome,
//! not a protocol failure.

use std::time::{Duration, Instant};

use crate::address::Address32;

/// Observer-side feed of signed attestations, keyed by emitter and sequence.
pub trait AttestationSource {
    fn fetch(&self, emitter: &Address32, sequence: u64) -> Option<Vec<u8>>;
}

#[derive(Debug, Clone)]
pub struct PollOptions {
    pub timeout: Duration,
    pub poll_interval: Duration,
}

impl Default for PollOptions {
    fn default() -> Self {
        Self {
            timeout: Duration::from_secs(30),
            poll_interval: Duration::from_millis(500),
        }
    }
}

impl PollOptions {
    #[must_use]
    pub fn with_timeout(mut self, timeout: Duration) -> Self {
        self.timeout = timeout;
        self
    }

    #[must_use]
    pub fn with_poll_interval(mut self, poll_interval: Duration) -> Self {
        self.poll_interval = poll_interval;
        self
    }
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum PollOutcome {
    Available(Vec<u8>),
    /// The transport may simply still be collecting signatures.
    NotYetAvailable,
}

/// Polls `source` until the attestation for `(emitter, sequence)` shows up
/// or the timeout lapses. Always fetches at least once.
pub fn await_attestation(
    source: &dyn AttestationSource,
    emitter: &Address32,
    sequence: u64,
    options: &PollOptions,
) -> PollOutcome {
    let start = Instant::now();
    loop {
        if let Some(raw) = source.fetch(emitter, sequence) {
            return PollOutcome::Available(raw);
        }
        if start.elapsed() >= options.timeout {
            return PollOutcome::NotYetAvailable;
        }
        std::thread::sleep(options.poll_interval);
    }
}
