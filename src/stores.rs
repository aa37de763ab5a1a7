//! Keyed stores behind the destination-side trust boundary.
//!
//! Both stores are deliberately narrow: the replay ledger is insert-only,
//! the allowlist is a plain owner-keyed upsert map. Attribution and audit
//! events live in the `destination` state machine, not here.

use serde::{Deserialize, Serialize};
use std::collections::{BTreeMap, BTreeSet};

use crate::address::Address32;
use crate::attestation::MessageId;

/// Set of consumed message identities. Grows monotonically; there is no way
/// to remove an entry.
#[derive(Debug, Default, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ReplayLedger {
    consumed: BTreeSet<MessageId>,
}

impl ReplayLedger {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn is_consumed(&self, id: &MessageId) -> bool {
        self.consumed.contains(id)
    }

    /// Atomic check-and-set. Returns false when the identity was already
    /// present, in which case nothing changes.
    pub fn consume(&mut self, id: MessageId) -> bool {
        self.consumed.insert(id)
    }

    pub fn len(&self) -> usize {
        self.consumed.len()
    }

    pub fn is_empty(&self) -> bool {
        self.consumed.is_empty()
    }
}

/// Destination targets permitted to receive calls. Read at execution time,
/// so revoking a target between approval and execution blocks execution.
#[derive(Debug, Default, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Allowlist {
    targets: BTreeMap<Address32, bool>,
}

impl Allowlist {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn set(&mut self, target: Address32, allowed: bool) {
        self.targets.insert(target, allowed);
    }

    pub fn is_allowed(&self, target: &Address32) -> bool {
        self.targets.get(target).copied().unwrap_or(false)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn id(sequence: u64) -> MessageId {
        MessageId {
            chain: 1,
            emitter: Address32::from([5u8; 32]),
            sequence,
        }
    }

    #[test]
    fn test_consume_is_check_and_set() {
        let mut ledger = ReplayLedger::new();
        assert!(!ledger.is_consumed(&id(1)));
        assert!(ledger.consume(id(1)));
        assert!(ledger.is_consumed(&id(1)));
        assert!(!ledger.consume(id(1)));
        assert_eq!(ledger.len(), 1);
    }

    #[test]
    fn test_allowlist_defaults_closed_and_revokes() {
        let target = Address32::from([9u8; 32]);
        let mut allowlist = Allowlist::new();
        assert!(!allowlist.is_allowed(&target));
        allowlist.set(target, true);
        assert!(allowlist.is_allowed(&target));
        allowlist.set(target, false);
        assert!(!allowlist.is_allowed(&target));
    }
}
