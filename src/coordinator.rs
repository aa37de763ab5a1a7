//! Execution readiness, computed from the external quorum's live tally.

use crate::address::Address32;

/// Read-only view of the external multisig's ledger state.
///
/// The coordinator and the origin state machine only ever read through this
/// trait; vote state is mutated by the multisig program itself, elsewhere.
pub trait QuorumLedger {
    /// Does `member` hold the initiate capability in `quorum`?
    fn has_initiate_capability(&self, quorum: &Address32, member: &Address32) -> bool;

    /// Does the quorum's own ledger record a transaction at `index`?
    fn has_transaction(&self, quorum: &Address32, index: u64) -> bool;

    /// Current approval count for the transaction at `index`.
    fn approvals(&self, quorum: &Address32, index: u64) -> usize;

    /// The quorum's configured approval threshold.
    fn threshold(&self, quorum: &Address32) -> usize;
}

/// Stateless readiness computation. Every call re-reads the ledger, so a
/// fresh approval or a cancellation is visible immediately; nothing is
/// cached and nothing is mutated.
pub struct ApprovalCoordinator<'a, L: QuorumLedger + ?Sized> {
    ledger: &'a L,
}

impl<'a, L: QuorumLedger + ?Sized> ApprovalCoordinator<'a, L> {
    pub fn new(ledger: &'a L) -> Self {
        Self { ledger }
    }

    /// The raw (approvals, threshold) pair, for operator display.
    pub fn readiness(&self, quorum: &Address32, index: u64) -> (usize, usize) {
        (
            self.ledger.approvals(quorum, index),
            self.ledger.threshold(quorum),
        )
    }

    pub fn is_ready_to_execute(&self, quorum: &Address32, index: u64) -> bool {
        let (approvals, threshold) = self.readiness(quorum, index);
        approvals >= threshold
    }
}
