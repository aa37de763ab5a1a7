use serde::{Deserialize, Serialize};

use crate::address::Address32;
use crate::error::{Error, Result};
use crate::record;

/// Global origin-side configuration. Created once at initialization; mutated
/// only by the authority (quorum rotation) and by the emission step
/// (sequence).
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct RelayConfig {
    /// May rotate the authorized quorum.
    pub authority: Address32,
    /// The external multisig allowed to own proposals.
    pub authorized_quorum: Address32,
    /// Attested-messaging program on the origin ledger.
    pub transport_program: Address32,
    /// The transport's bridge state identity.
    pub transport_bridge: Address32,
    /// Where the transport collects emission fees.
    pub fee_collector: Address32,
    /// The sender identity the transport signs our messages under.
    pub emitter: Address32,
    /// Count of messages emitted so far; the next message takes sequence + 1.
    pub sequence: u64,
}

impl RelayConfig {
    pub const RECORD_NAME: &'static str = "RelayConfig";

    pub fn to_record_bytes(&self) -> Result<Vec<u8>> {
        record::seal(record::record_tag(Self::RECORD_NAME), self)
    }

    pub fn from_record_bytes(bytes: &[u8]) -> Result<Self> {
        record::open(record::record_tag(Self::RECORD_NAME), bytes)
    }

    /// Authority-only rotation of the quorum allowed to own proposals.
    pub fn rotate_quorum(&mut self, caller: &Address32, new_quorum: Address32) -> Result<()> {
        if caller != &self.authority {
            return Err(Error::Unauthorized { caller: *caller });
        }
        self.authorized_quorum = new_quorum;
        Ok(())
    }
}
