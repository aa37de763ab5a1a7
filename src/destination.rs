//! Destination-side verification pipeline and trust boundary.
//!
//! Every gate in `execute_transaction` runs in a fixed order; a failure at
//! any gate aborts before state changes, with one deliberate exception: the
//! replay ledger is written immediately before the target call, so that a
//! reverting or re-entering target can never replay the same message.

use log::{info, warn};

use crate::address::Address32;
use crate::attestation::AttestationVerifier;
use crate::error::{Error, Result};
use crate::event::{CallOutcome, Event};
use crate::payload::TransactionPayload;
use crate::stores::{Allowlist, ReplayLedger};
use crate::ChainId;

/// Default gas ceiling accepted by the pipeline.
pub const DEFAULT_MAX_GAS_LIMIT: u64 = 10_000_000;

/// Destination ledger call primitive. A failed call must not unwind across
/// this boundary; it comes back as `Err(reason)` and is turned into data.
pub trait CallDispatcher {
    fn call(
        &mut self,
        target: &Address32,
        call_data: &[u8],
        gas_limit: u64,
    ) -> std::result::Result<Vec<u8>, String>;
}

#[derive(Debug)]
pub struct DestinationState {
    owner: Address32,
    origin_chain: ChainId,
    emitter: Address32,
    paused: bool,
    max_gas_limit: u64,
    replay: ReplayLedger,
    allowlist: Allowlist,
    events: Vec<Event>,
}

impl DestinationState {
    pub fn new(owner: Address32, origin_chain: ChainId, emitter: Address32) -> Self {
        Self {
            owner,
            origin_chain,
            emitter,
            paused: false,
            max_gas_limit: DEFAULT_MAX_GAS_LIMIT,
            replay: ReplayLedger::new(),
            allowlist: Allowlist::new(),
            events: Vec::new(),
        }
    }

    #[must_use]
    pub fn with_max_gas_limit(mut self, max_gas_limit: u64) -> Self {
        self.max_gas_limit = max_gas_limit;
        self
    }

    /// Verifies an attestation and, if every gate passes, dispatches the
    /// authorized call.
    ///
    /// Only validation failures (gates before the replay write) are `Err`;
    /// a target-call failure is an `Ok(CallOutcome::Failed)` with the
    /// sequence consumed.
    pub fn execute_transaction(
        &mut self,
        raw: &[u8],
        verifier: &dyn AttestationVerifier,
        dispatcher: &mut dyn CallDispatcher,
    ) -> Result<CallOutcome> {
        if self.paused {
            return Err(Error::ExecutionPaused);
        }

        let attestation = verifier
            .verify(raw)
            .map_err(|reason| Error::InvalidAttestation { reason })?;

        if attestation.origin_chain != self.origin_chain {
            return Err(Error::WrongOriginChain {
                expected: self.origin_chain,
                found: attestation.origin_chain,
            });
        }
        if attestation.emitter != self.emitter {
            return Err(Error::UnauthorizedEmitter {
                found: attestation.emitter,
            });
        }

        let id = attestation.message_id();
        if self.replay.is_consumed(&id) {
            return Err(Error::AlreadyProcessed {
                chain: id.chain,
                emitter: id.emitter,
                sequence: id.sequence,
            });
        }

        let payload = TransactionPayload::decode(&attestation.payload)?;

        if !self.allowlist.is_allowed(&payload.target) {
            return Err(Error::TargetNotAllowed {
                target: payload.target,
            });
        }
        if payload.gas_limit > self.max_gas_limit {
            return Err(Error::GasLimitTooHigh {
                limit: payload.gas_limit,
                max: self.max_gas_limit,
            });
        }

        // Consume the sequence before dispatching. The check above and this
        // write happen within one ledger operation, so a concurrent
        // submission of the same attestation observes the write.
        self.replay.consume(id);

        let outcome =
            match dispatcher.call(&payload.target, &payload.call_data, payload.gas_limit) {
                Ok(return_data) => {
                    info!(
                        "[DST] sequence {} executed against {:?}",
                        id.sequence, payload.target
                    );
                    self.events.push(Event::Executed {
                        sequence: id.sequence,
                        target: payload.target,
                        return_data: return_data.clone(),
                    });
                    CallOutcome::Succeeded { return_data }
                }
                Err(reason) => {
                    warn!(
                        "[DST] sequence {} call to {:?} failed: {}",
                        id.sequence, payload.target, reason
                    );
                    self.events.push(Event::ExecutionFailed {
                        sequence: id.sequence,
                        target: payload.target,
                        reason: reason.clone(),
                    });
                    CallOutcome::Failed { reason }
                }
            };
        Ok(outcome)
    }

    fn ensure_owner(&self, caller: &Address32) -> Result<()> {
        if caller != &self.owner {
            return Err(Error::Unauthorized { caller: *caller });
        }
        Ok(())
    }

    pub fn set_target_allowed(
        &mut self,
        caller: &Address32,
        target: Address32,
        allowed: bool,
    ) -> Result<()> {
        self.ensure_owner(caller)?;
        self.allowlist.set(target, allowed);
        self.events.push(Event::TargetAllowed { target, allowed });
        info!("[DST] target {:?} allowed={}", target, allowed);
        Ok(())
    }

    /// Rotates the emitter identity accepted at gate three.
    pub fn set_attestation_source(&mut self, caller: &Address32, emitter: Address32) -> Result<()> {
        self.ensure_owner(caller)?;
        self.emitter = emitter;
        self.events.push(Event::AttestationSourceChanged { emitter });
        info!("[DST] attestation source rotated to {:?}", emitter);
        Ok(())
    }

    pub fn pause(&mut self, caller: &Address32) -> Result<()> {
        self.ensure_owner(caller)?;
        self.paused = true;
        self.events.push(Event::Paused);
        warn!("[DST] execution paused");
        Ok(())
    }

    pub fn unpause(&mut self, caller: &Address32) -> Result<()> {
        self.ensure_owner(caller)?;
        self.paused = false;
        self.events.push(Event::Unpaused);
        info!("[DST] execution resumed");
        Ok(())
    }

    pub fn is_paused(&self) -> bool {
        self.paused
    }

    pub fn is_allowed(&self, target: &Address32) -> bool {
        self.allowlist.is_allowed(target)
    }

    pub fn replay_ledger(&self) -> &ReplayLedger {
        &self.replay
    }

    pub fn events(&self) -> &[Event] {
        &self.events
    }
}
