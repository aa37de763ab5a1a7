use serde::{Deserialize, Serialize};

use crate::address::Address32;
use crate::error::{Error, Result};
use crate::record;
use crate::ChainId;

/// Status of a cross-chain proposal.
///
/// `Executed` means the message was emitted through the transport. The
/// destination call's outcome is only observable from destination-side
/// events and is reconciled out-of-band; the origin ledger cannot await it.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum ProposalStatus {
    /// Waiting on the quorum to reach its approval threshold.
    Pending,
    /// Message emitted; sequence assigned.
    Executed,
    /// The transport definitively refused emission.
    Failed,
    /// Withdrawn before emission.
    Cancelled,
}

/// One proposed cross-chain call, owned by a quorum on the origin ledger.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct CrossChainProposal {
    /// The quorum this proposal belongs to.
    pub quorum: Address32,
    /// Quorum-assigned index, unique per quorum; cross-checked against the
    /// quorum's own ledger at creation.
    pub transaction_index: u64,
    /// Destination chain identifier, in the transport's numbering scheme.
    pub target_chain: ChainId,
    /// Destination target in canonical 32-byte form.
    pub target: Address32,
    /// Raw destination-chain call arguments.
    pub call_data: Vec<u8>,
    /// Execution budget on the destination side.
    pub gas_limit: u64,
    pub status: ProposalStatus,
    /// Transport-assigned sequence; set at most once, at emission.
    pub emitted_sequence: Option<u64>,
    pub created_at: i64,
    pub executed_at: Option<i64>,
}

impl CrossChainProposal {
    pub const RECORD_NAME: &'static str = "CrossChainProposal";

    /// Deterministic 32-byte reference carried in the payload; opaque to the
    /// destination side.
    pub fn record_id(&self) -> Address32 {
        Address32::derive(
            &self.quorum,
            &[b"proposal", &self.transaction_index.to_le_bytes()],
        )
    }

    pub fn to_record_bytes(&self) -> Result<Vec<u8>> {
        record::seal(record::record_tag(Self::RECORD_NAME), self)
    }

    pub fn from_record_bytes(bytes: &[u8]) -> Result<Self> {
        record::open(record::record_tag(Self::RECORD_NAME), bytes)
    }

    fn ensure_pending(&self) -> Result<()> {
        if self.status != ProposalStatus::Pending {
            return Err(Error::ProposalNotPending { found: self.status });
        }
        Ok(())
    }

    /// Pending -> Executed. Records the assigned sequence and timestamp.
    pub fn mark_executed(&mut self, sequence: u64, at: i64) -> Result<()> {
        self.ensure_pending()?;
        self.status = ProposalStatus::Executed;
        self.emitted_sequence = Some(sequence);
        self.executed_at = Some(at);
        Ok(())
    }

    /// Pending -> Failed. Terminal; re-propose under a fresh index.
    pub fn mark_failed(&mut self) -> Result<()> {
        self.ensure_pending()?;
        self.status = ProposalStatus::Failed;
        Ok(())
    }

    /// Pending -> Cancelled. Only possible before emission.
    pub fn mark_cancelled(&mut self) -> Result<()> {
        self.ensure_pending()?;
        self.status = ProposalStatus::Cancelled;
        Ok(())
    }
}
