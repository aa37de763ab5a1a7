//! A quorum of parties on one ledger authorizes execution of an arbitrary
//! call on a second, independent ledger, with an attested messaging layer as
//! the only channel between them.
//!
//! The crate is a pure protocol library: the origin-side proposal state
//! machine, the canonical payload codec, the destination-side verification
//! pipeline with replay protection, and the approval-readiness coordinator.
//! Key custody, ledger connectivity and the attestation transport itself
//! live behind traits and are someone else's problem.

pub mod address;
pub mod attestation;
pub mod config;
pub mod coordinator;
pub mod destination;
pub mod error;
pub mod event;
pub mod monitor;
pub mod operation;
pub mod origin;
pub mod payload;
pub mod proposal;
pub mod record;
pub mod stores;

pub use crate::address::Address32;
pub use crate::attestation::{Attestation, AttestationVerifier, MessageId};
pub use crate::config::RelayConfig;
pub use crate::coordinator::{ApprovalCoordinator, QuorumLedger};
pub use crate::destination::{CallDispatcher, DestinationState, DEFAULT_MAX_GAS_LIMIT};
pub use crate::error::{Error, Result};
pub use crate::event::{CallOutcome, Event};
pub use crate::monitor::{await_attestation, AttestationSource, PollOptions, PollOutcome};
pub use crate::operation::{
    operation_tag, CancelProposalArgs, ExecuteProposalArgs, InitializeArgs, Operation,
    ProposeTransactionArgs,
};
pub use crate::origin::{
    MessageTransport, OriginState, CONSISTENCY_LEVEL_FINALIZED, MAX_GAS_LIMIT,
};
pub use crate::payload::{
    MessageKind, TransactionPayload, MAX_CALL_DATA_SIZE, MIN_PAYLOAD_LEN, PAYLOAD_VERSION,
};
pub use crate::proposal::{CrossChainProposal, ProposalStatus};
pub use crate::stores::{Allowlist, ReplayLedger};

/// Chain identifier in the transport's numbering scheme.
pub type ChainId = u16;
