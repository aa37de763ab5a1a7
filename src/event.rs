//! Audit trail of destination-side effects.
//!
//! A target call's failure is data, never an error crossing the trust
//! boundary: the pipeline records it and returns normally.

use serde::{Deserialize, Serialize};

use crate::address::Address32;

/// What happened when the target call was dispatched.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum CallOutcome {
    Succeeded { return_data: Vec<u8> },
    Failed { reason: String },
}

impl CallOutcome {
    pub fn is_success(&self) -> bool {
        matches!(self, CallOutcome::Succeeded { .. })
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub enum Event {
    /// The target call completed; the sequence is consumed.
    Executed {
        sequence: u64,
        target: Address32,
        return_data: Vec<u8>,
    },
    /// The target call reverted or threw; the sequence is still consumed.
    ExecutionFailed {
        sequence: u64,
        target: Address32,
        reason: String,
    },
    TargetAllowed {
        target: Address32,
        allowed: bool,
    },
    AttestationSourceChanged {
        emitter: Address32,
    },
    Paused,
    Unpaused,
}
