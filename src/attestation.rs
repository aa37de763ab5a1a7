use serde::{Deserialize, Serialize};
use std::fmt::{self, Debug};

use crate::address::Address32;
use crate::ChainId;

/// An externally signed assertion that a specific origin-chain message was
/// genuinely emitted. Produced by the verifier capability from raw bytes and
/// consumed read-only by the destination pipeline.
#[derive(Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Attestation {
    pub origin_chain: ChainId,
    pub emitter: Address32,
    pub sequence: u64,
    pub consistency_level: u8,
    pub payload: Vec<u8>,
}

impl Debug for Attestation {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(
            f,
            "Att(chain={}, emitter={:?}, seq={})",
            self.origin_chain, self.emitter, self.sequence
        )
    }
}

impl Attestation {
    /// The identity under which this message is consumed at most once.
    pub fn message_id(&self) -> MessageId {
        MessageId {
            chain: self.origin_chain,
            emitter: self.emitter,
            sequence: self.sequence,
        }
    }
}

/// Replay-protection key: (origin chain, emitter, per-emitter sequence).
#[derive(
    Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize,
)]
pub struct MessageId {
    pub chain: ChainId,
    pub emitter: Address32,
    pub sequence: u64,
}

/// External capability that parses and authenticates raw attestation bytes.
///
/// Implementations return the structured attestation when the guardian
/// quorum's signatures check out, or a human-readable reason when they do
/// not. The pipeline never inspects raw bytes itself.
pub trait AttestationVerifier {
    fn verify(&self, raw: &[u8]) -> std::result::Result<Attestation, String>;
}
