//! Origin-side proposal store and emission state machine.
//!
//! Driven strictly sequentially by the hosting ledger; each operation either
//! completes its mutation or leaves the state untouched.

use log::{info, warn};
use rand::{CryptoRng, Rng};
use std::collections::BTreeMap;

use crate::address::Address32;
use crate::config::RelayConfig;
use crate::coordinator::{ApprovalCoordinator, QuorumLedger};
use crate::error::{Error, Result};
use crate::operation::{
    CancelProposalArgs, ExecuteProposalArgs, InitializeArgs, Operation, ProposeTransactionArgs,
};
use crate::payload::{TransactionPayload, MAX_CALL_DATA_SIZE};
use crate::proposal::{CrossChainProposal, ProposalStatus};

// Finalized consistency = 1, instant = 200.
pub const CONSISTENCY_LEVEL_FINALIZED: u8 = 1;

/// Upper bound on a proposal's destination gas budget.
pub const MAX_GAS_LIMIT: u64 = 10_000_000;

/// Attested-messaging emission endpoint on the origin ledger.
pub trait MessageTransport {
    /// Emits `payload` under our emitter identity. The returned sequence is
    /// the one the transport actually assigned and is authoritative over any
    /// local count. `Err` is a definitive refusal, not a transient fault.
    fn publish(
        &mut self,
        nonce: u32,
        payload: Vec<u8>,
        consistency_level: u8,
    ) -> std::result::Result<u64, String>;

    /// The transport's own count of messages emitted under our emitter.
    fn emitted_count(&self) -> u64;
}

#[derive(Debug, Default)]
pub struct OriginState {
    config: Option<RelayConfig>,
    proposals: BTreeMap<(Address32, u64), CrossChainProposal>,
}

impl OriginState {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn config(&self) -> Result<&RelayConfig> {
        self.config.as_ref().ok_or(Error::NotInitialized)
    }

    pub fn proposal(&self, quorum: &Address32, index: u64) -> Option<&CrossChainProposal> {
        self.proposals.get(&(*quorum, index))
    }

    /// Dispatch table over the closed operation set.
    pub fn apply<R: Rng + CryptoRng>(
        &mut self,
        op: Operation,
        ledger: &dyn QuorumLedger,
        transport: &mut dyn MessageTransport,
        rng: &mut R,
        now: i64,
    ) -> Result<()> {
        match op {
            Operation::Initialize(args) => self.initialize(args),
            Operation::ProposeTransaction(args) => self.propose_transaction(ledger, args, now),
            Operation::CancelProposal(args) => self.cancel_proposal(ledger, args),
            Operation::ExecuteProposal(args) => self
                .execute_proposal(ledger, transport, rng, args, now)
                .map(|_| ()),
        }
    }

    pub fn initialize(&mut self, args: InitializeArgs) -> Result<()> {
        if self.config.is_some() {
            return Err(Error::AlreadyInitialized);
        }
        info!(
            "[ORG] initialized; authority {:?}, quorum {:?}, emitter {:?}",
            args.authority, args.quorum, args.emitter
        );
        self.config = Some(RelayConfig {
            authority: args.authority,
            authorized_quorum: args.quorum,
            transport_program: args.transport_program,
            transport_bridge: args.transport_bridge,
            fee_collector: args.fee_collector,
            emitter: args.emitter,
            sequence: 0,
        });
        Ok(())
    }

    /// Records a new Pending proposal. All preconditions are checked before
    /// any mutation; a violation leaves no partial record.
    pub fn propose_transaction(
        &mut self,
        ledger: &dyn QuorumLedger,
        args: ProposeTransactionArgs,
        now: i64,
    ) -> Result<()> {
        let config = self.config()?;
        if args.quorum != config.authorized_quorum {
            return Err(Error::UnauthorizedQuorum { quorum: args.quorum });
        }
        if !ledger.has_initiate_capability(&args.quorum, &args.proposer) {
            return Err(Error::MissingInitiateCapability {
                proposer: args.proposer,
                quorum: args.quorum,
            });
        }
        // The index is assigned by the quorum, not by us; it must exist on
        // the quorum's own ledger.
        if !ledger.has_transaction(&args.quorum, args.transaction_index) {
            return Err(Error::TransactionIndexMismatch {
                quorum: args.quorum,
                index: args.transaction_index,
            });
        }
        if args.call_data.len() > MAX_CALL_DATA_SIZE {
            return Err(Error::CallDataTooLarge {
                found: args.call_data.len(),
                max: MAX_CALL_DATA_SIZE,
            });
        }
        if args.gas_limit > MAX_GAS_LIMIT {
            return Err(Error::GasLimitTooHigh {
                limit: args.gas_limit,
                max: MAX_GAS_LIMIT,
            });
        }
        let key = (args.quorum, args.transaction_index);
        if self.proposals.contains_key(&key) {
            return Err(Error::DuplicateProposal {
                quorum: args.quorum,
                index: args.transaction_index,
            });
        }

        info!(
            "[ORG] proposal {} for quorum {:?}: target {:?} on chain {}, {} byte call",
            args.transaction_index,
            args.quorum,
            args.target,
            args.target_chain,
            args.call_data.len()
        );
        self.proposals.insert(
            key,
            CrossChainProposal {
                quorum: args.quorum,
                transaction_index: args.transaction_index,
                target_chain: args.target_chain,
                target: args.target,
                call_data: args.call_data,
                gas_limit: args.gas_limit,
                status: ProposalStatus::Pending,
                emitted_sequence: None,
                created_at: now,
                executed_at: None,
            },
        );
        Ok(())
    }

    /// Withdraws a Pending proposal. Once emitted a proposal cannot be
    /// recalled; the destination only knows replay rejection.
    pub fn cancel_proposal(
        &mut self,
        ledger: &dyn QuorumLedger,
        args: CancelProposalArgs,
    ) -> Result<()> {
        if !ledger.has_initiate_capability(&args.quorum, &args.caller) {
            return Err(Error::MissingInitiateCapability {
                proposer: args.caller,
                quorum: args.quorum,
            });
        }
        let proposal = self
            .proposals
            .get_mut(&(args.quorum, args.transaction_index))
            .ok_or(Error::ProposalNotFound {
                quorum: args.quorum,
                index: args.transaction_index,
            })?;
        proposal.mark_cancelled()?;
        info!(
            "[ORG] proposal {} for quorum {:?} cancelled",
            args.transaction_index, args.quorum
        );
        Ok(())
    }

    /// Emits an approved proposal through the transport and returns the
    /// assigned sequence.
    ///
    /// The payload carries the sequence we predict the transport will
    /// assign; on acknowledgment the transport's answer is adopted as
    /// authoritative rather than re-emitting under a disputed slot.
    pub fn execute_proposal<R: Rng + CryptoRng>(
        &mut self,
        ledger: &dyn QuorumLedger,
        transport: &mut dyn MessageTransport,
        rng: &mut R,
        args: ExecuteProposalArgs,
        now: i64,
    ) -> Result<u64> {
        let config = self.config.as_mut().ok_or(Error::NotInitialized)?;
        let proposal = self
            .proposals
            .get_mut(&(args.quorum, args.transaction_index))
            .ok_or(Error::ProposalNotFound {
                quorum: args.quorum,
                index: args.transaction_index,
            })?;
        if proposal.status != ProposalStatus::Pending {
            return Err(Error::ProposalNotPending {
                found: proposal.status,
            });
        }

        let coordinator = ApprovalCoordinator::new(ledger);
        let (approvals, threshold) = coordinator.readiness(&args.quorum, args.transaction_index);
        if approvals < threshold {
            return Err(Error::NotEnoughApprovals {
                approvals,
                threshold,
            });
        }

        let nonce: u32 = rng.gen();
        let predicted = config.sequence + 1;
        let payload = TransactionPayload {
            sequence: predicted,
            timestamp: now,
            nonce,
            proposal_id: proposal.record_id(),
            target: proposal.target,
            gas_limit: proposal.gas_limit,
            call_data: proposal.call_data.clone(),
        };

        match transport.publish(nonce, payload.encode(), CONSISTENCY_LEVEL_FINALIZED) {
            Ok(assigned) => {
                if assigned != predicted {
                    warn!(
                        "[ORG] transport assigned sequence {} where we predicted {}; adopting theirs",
                        assigned, predicted
                    );
                }
                config.sequence = assigned;
                proposal.mark_executed(assigned, now)?;
                info!(
                    "[ORG] proposal {} emitted with sequence {}",
                    args.transaction_index, assigned
                );
                Ok(assigned)
            }
            Err(reason) => {
                warn!(
                    "[ORG] transport refused proposal {}: {}",
                    args.transaction_index, reason
                );
                proposal.mark_failed()?;
                Err(Error::EmissionFailed { reason })
            }
        }
    }

    /// Re-reads the transport's emitted count after a lost acknowledgment.
    /// Never re-emits; the transport's state wins.
    pub fn reconcile_sequence(&mut self, transport: &dyn MessageTransport) -> Result<u64> {
        let config = self.config.as_mut().ok_or(Error::NotInitialized)?;
        let theirs = transport.emitted_count();
        if theirs != config.sequence {
            warn!(
                "[ORG] local sequence {} out of step with transport {}; adopting transport",
                config.sequence, theirs
            );
            config.sequence = theirs;
        }
        Ok(config.sequence)
    }

    /// Authority-only rotation of the authorized quorum.
    pub fn rotate_quorum(&mut self, caller: &Address32, new_quorum: Address32) -> Result<()> {
        let config = self.config.as_mut().ok_or(Error::NotInitialized)?;
        config.rotate_quorum(caller, new_quorum)?;
        info!("[ORG] authorized quorum rotated to {:?}", new_quorum);
        Ok(())
    }
}
