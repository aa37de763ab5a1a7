//! The origin program boundary.
//!
//! Each supported operation is addressed by a stable 8-byte tag prefixing
//! its bincode-encoded arguments. Tags derive from the operation name and
//! must not collide; dispatch is an exhaustive match over a closed enum.

use serde::{Deserialize, Serialize};

use crate::address::Address32;
use crate::error::{Error, Result};
use crate::record;
use crate::ChainId;

pub const OPERATION_TAG_LEN: usize = 8;

const INITIALIZE: &str = "initialize";
const PROPOSE_TRANSACTION: &str = "propose-transaction";
const CANCEL_PROPOSAL: &str = "cancel-proposal";
const EXECUTE_PROPOSAL: &str = "execute-proposal";

/// Stable tag for an operation name.
pub fn operation_tag(name: &str) -> [u8; OPERATION_TAG_LEN] {
    record::name_tag("op", name)
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct InitializeArgs {
    pub authority: Address32,
    pub quorum: Address32,
    pub transport_program: Address32,
    pub transport_bridge: Address32,
    pub fee_collector: Address32,
    pub emitter: Address32,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ProposeTransactionArgs {
    pub proposer: Address32,
    pub quorum: Address32,
    pub transaction_index: u64,
    pub target_chain: ChainId,
    pub target: Address32,
    pub call_data: Vec<u8>,
    pub gas_limit: u64,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct CancelProposalArgs {
    pub caller: Address32,
    pub quorum: Address32,
    pub transaction_index: u64,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ExecuteProposalArgs {
    pub quorum: Address32,
    pub transaction_index: u64,
}

/// Closed set of operations accepted at the origin boundary.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Operation {
    Initialize(InitializeArgs),
    ProposeTransaction(ProposeTransactionArgs),
    CancelProposal(CancelProposalArgs),
    ExecuteProposal(ExecuteProposalArgs),
}

impl Operation {
    pub const NAMES: [&'static str; 4] = [
        INITIALIZE,
        PROPOSE_TRANSACTION,
        CANCEL_PROPOSAL,
        EXECUTE_PROPOSAL,
    ];

    pub fn name(&self) -> &'static str {
        match self {
            Operation::Initialize(_) => INITIALIZE,
            Operation::ProposeTransaction(_) => PROPOSE_TRANSACTION,
            Operation::CancelProposal(_) => CANCEL_PROPOSAL,
            Operation::ExecuteProposal(_) => EXECUTE_PROPOSAL,
        }
    }

    pub fn tag(&self) -> [u8; OPERATION_TAG_LEN] {
        operation_tag(self.name())
    }

    pub fn encode(&self) -> Result<Vec<u8>> {
        let args = match self {
            Operation::Initialize(args) => bincode::serialize(args)?,
            Operation::ProposeTransaction(args) => bincode::serialize(args)?,
            Operation::CancelProposal(args) => bincode::serialize(args)?,
            Operation::ExecuteProposal(args) => bincode::serialize(args)?,
        };
        let mut out = Vec::with_capacity(OPERATION_TAG_LEN + args.len());
        out.extend_from_slice(&self.tag());
        out.extend_from_slice(&args);
        Ok(out)
    }

    pub fn decode(bytes: &[u8]) -> Result<Self> {
        if bytes.len() < OPERATION_TAG_LEN {
            return Err(Error::TruncatedOperation(bytes.len()));
        }
        let mut tag = [0u8; OPERATION_TAG_LEN];
        tag.copy_from_slice(&bytes[..OPERATION_TAG_LEN]);
        let body = &bytes[OPERATION_TAG_LEN..];

        let op = if tag == operation_tag(INITIALIZE) {
            Operation::Initialize(bincode::deserialize(body)?)
        } else if tag == operation_tag(PROPOSE_TRANSACTION) {
            Operation::ProposeTransaction(bincode::deserialize(body)?)
        } else if tag == operation_tag(CANCEL_PROPOSAL) {
            Operation::CancelProposal(bincode::deserialize(body)?)
        } else if tag == operation_tag(EXECUTE_PROPOSAL) {
            Operation::ExecuteProposal(bincode::deserialize(body)?)
        } else {
            return Err(Error::UnknownOperation(tag));
        };
        Ok(op)
    }
}
