use thiserror::Error;

use crate::address::Address32;
use crate::proposal::ProposalStatus;
use crate::ChainId;

#[derive(Error, Debug)]
pub enum Error {
    // Validation: the message itself is not a genuine, well-formed
    // instruction. Permanent for this message.
    #[error("attestation rejected by verifier: {reason}")]
    InvalidAttestation { reason: String },
    #[error("attestation origin chain {found} does not match configured origin {expected}")]
    WrongOriginChain { expected: ChainId, found: ChainId },
    #[error("attestation emitter {found} is not the configured emitter")]
    UnauthorizedEmitter { found: Address32 },
    #[error("payload is {found} bytes, below the {expected} byte minimum")]
    PayloadTooShort { expected: usize, found: usize },
    #[error("declared call data length {declared} does not match the {remaining} bytes remaining")]
    InvalidCallDataLength { declared: usize, remaining: usize },
    #[error("unsupported payload version {0}")]
    UnsupportedVersion(u8),
    #[error("unsupported message kind {0}")]
    UnsupportedMessageKind(u8),
    #[error("address must be {expected} bytes, got {found}")]
    InvalidTargetAddress { expected: usize, found: usize },

    // Replay: the intended terminal outcome of any execution attempt past
    // the validation gates, successful or not.
    #[error("message ({chain}, {emitter}, {sequence}) was already processed")]
    AlreadyProcessed {
        chain: ChainId,
        emitter: Address32,
        sequence: u64,
    },

    // Policy: the message is genuine but the destination refuses it.
    #[error("target {target} is not allowlisted")]
    TargetNotAllowed { target: Address32 },
    #[error("gas limit {limit} exceeds the maximum of {max}")]
    GasLimitTooHigh { limit: u64, max: u64 },
    #[error("call data is {found} bytes, over the {max} byte maximum")]
    CallDataTooLarge { found: usize, max: usize },
    #[error("execution is paused")]
    ExecutionPaused,

    // Configuration and authorization.
    #[error("caller {caller} is not authorized for this operation")]
    Unauthorized { caller: Address32 },
    #[error("quorum {quorum} is not the authorized quorum")]
    UnauthorizedQuorum { quorum: Address32 },
    #[error("the relay configuration has not been initialized")]
    NotInitialized,
    #[error("the relay configuration was already initialized")]
    AlreadyInitialized,
    #[error("unknown operation tag {}", hex::encode(.0))]
    UnknownOperation([u8; 8]),
    #[error("operation bytes are truncated at {0} bytes")]
    TruncatedOperation(usize),
    #[error("unknown record discriminator {}", hex::encode(.0))]
    UnknownRecordKind([u8; 8]),
    #[error("unsupported record version {found}, expected {expected}")]
    UnsupportedRecordVersion { expected: u8, found: u8 },
    #[error("record is truncated: {0} bytes is too short for the frame header")]
    RecordTooShort(usize),

    // Origin-side state machine.
    #[error("proposer {proposer} does not hold the initiate capability in quorum {quorum}")]
    MissingInitiateCapability {
        proposer: Address32,
        quorum: Address32,
    },
    #[error("quorum ledger has no transaction at index {index} for quorum {quorum}")]
    TransactionIndexMismatch { quorum: Address32, index: u64 },
    #[error("a proposal already exists for quorum {quorum} at index {index}")]
    DuplicateProposal { quorum: Address32, index: u64 },
    #[error("no proposal found for quorum {quorum} at index {index}")]
    ProposalNotFound { quorum: Address32, index: u64 },
    #[error("proposal is {found:?}, expected it to be pending")]
    ProposalNotPending { found: ProposalStatus },
    #[error("proposal has {approvals} of {threshold} required approvals")]
    NotEnoughApprovals { approvals: usize, threshold: usize },
    #[error("transport refused the message: {reason}")]
    EmissionFailed { reason: String },

    #[error("Failed to encode with bincode")]
    Encoding(#[from] bincode::Error),
}

pub type Result<T, E = Error> = std::result::Result<T, E>;
