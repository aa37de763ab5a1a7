//! Canonical byte layout of the cross-chain transaction message.
//!
//! The origin side encodes, the destination side decodes, both against the
//! fixed offsets below. Integers are little-endian. Encode is total; decode
//! reports the precise failure mode and never truncates silently.
//!
//! Layout:
//! - version: 1 byte (must be 1)
//! - message kind: 1 byte (must be 1, transaction call)
//! - sequence: 8 bytes (copy of the attested sequence, informational)
//! - timestamp: 8 bytes (origin-side creation time)
//! - nonce: 4 bytes (anti-duplication salt, not a replay key)
//! - proposal id: 32 bytes (origin-side reference, opaque to destination)
//! - target address: 32 bytes
//! - gas limit: 8 bytes
//! - call data length: 4 bytes
//! - call data: variable

use serde::{Deserialize, Serialize};

use crate::address::Address32;
use crate::error::{Error, Result};

pub const PAYLOAD_VERSION: u8 = 1;

/// All fixed-width fields together; decode rejects anything shorter.
pub const MIN_PAYLOAD_LEN: usize = 98;

/// Upper bound on call data accepted into a proposal.
pub const MAX_CALL_DATA_SIZE: usize = 10_000;

/// Message kinds carried over the transport. Only transaction calls for now.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[repr(u8)]
pub enum MessageKind {
    TransactionCall = 1,
}

#[derive(Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct TransactionPayload {
    pub sequence: u64,
    pub timestamp: i64,
    pub nonce: u32,
    pub proposal_id: Address32,
    pub target: Address32,
    pub gas_limit: u64,
    pub call_data: Vec<u8>,
}

impl std::fmt::Debug for TransactionPayload {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(
            f,
            "Payload(seq={}, target={:?}, gas={}, data={}b)",
            self.sequence,
            self.target,
            self.gas_limit,
            self.call_data.len()
        )
    }
}

impl TransactionPayload {
    pub fn encode(&self) -> Vec<u8> {
        let mut out = Vec::with_capacity(MIN_PAYLOAD_LEN + self.call_data.len());
        out.push(PAYLOAD_VERSION);
        out.push(MessageKind::TransactionCall as u8);
        out.extend_from_slice(&self.sequence.to_le_bytes());
        out.extend_from_slice(&self.timestamp.to_le_bytes());
        out.extend_from_slice(&self.nonce.to_le_bytes());
        out.extend_from_slice(self.proposal_id.as_fixed_bytes());
        out.extend_from_slice(self.target.as_fixed_bytes());
        out.extend_from_slice(&self.gas_limit.to_le_bytes());
        out.extend_from_slice(&(self.call_data.len() as u32).to_le_bytes());
        out.extend_from_slice(&self.call_data);
        out
    }

    pub fn decode(bytes: &[u8]) -> Result<Self> {
        if bytes.len() < MIN_PAYLOAD_LEN {
            return Err(Error::PayloadTooShort {
                expected: MIN_PAYLOAD_LEN,
                found: bytes.len(),
            });
        }

        let mut at = 0usize;
        let version = read_u8(bytes, &mut at);
        if version != PAYLOAD_VERSION {
            return Err(Error::UnsupportedVersion(version));
        }
        let kind = read_u8(bytes, &mut at);
        if kind != MessageKind::TransactionCall as u8 {
            return Err(Error::UnsupportedMessageKind(kind));
        }

        let sequence = read_u64(bytes, &mut at);
        let timestamp = read_i64(bytes, &mut at);
        let nonce = read_u32(bytes, &mut at);
        let proposal_id = read_address(bytes, &mut at);
        let target = read_address(bytes, &mut at);
        let gas_limit = read_u64(bytes, &mut at);

        let declared = read_u32(bytes, &mut at) as usize;
        let remaining = bytes.len() - at;
        if declared != remaining {
            return Err(Error::InvalidCallDataLength {
                declared,
                remaining,
            });
        }
        let call_data = bytes[at..].to_vec();

        Ok(TransactionPayload {
            sequence,
            timestamp,
            nonce,
            proposal_id,
            target,
            gas_limit,
            call_data,
        })
    }
}

// Cursor reads over the fixed-width region; bounds are pre-checked against
// MIN_PAYLOAD_LEN before the first read.
fn read_u8(bytes: &[u8], at: &mut usize) -> u8 {
    let v = bytes[*at];
    *at += 1;
    v
}

fn read_u32(bytes: &[u8], at: &mut usize) -> u32 {
    let mut buf = [0u8; 4];
    buf.copy_from_slice(&bytes[*at..*at + 4]);
    *at += 4;
    u32::from_le_bytes(buf)
}

fn read_u64(bytes: &[u8], at: &mut usize) -> u64 {
    let mut buf = [0u8; 8];
    buf.copy_from_slice(&bytes[*at..*at + 8]);
    *at += 8;
    u64::from_le_bytes(buf)
}

fn read_i64(bytes: &[u8], at: &mut usize) -> i64 {
    let mut buf = [0u8; 8];
    buf.copy_from_slice(&bytes[*at..*at + 8]);
    *at += 8;
    i64::from_le_bytes(buf)
}

fn read_address(bytes: &[u8], at: &mut usize) -> Address32 {
    let mut buf = [0u8; 32];
    buf.copy_from_slice(&bytes[*at..*at + 32]);
    *at += 32;
    Address32::from(buf)
}

#[cfg(test)]
mod tests {
    use super::*;

    fn sample() -> TransactionPayload {
        TransactionPayload {
            sequence: 5,
            timestamp: 1_700_000_000,
            nonce: 0xDEAD_BEEF,
            proposal_id: Address32::from([3u8; 32]),
            target: Address32::from([9u8; 32]),
            gas_limit: 100_000,
            call_data: vec![0xCA, 0xFE, 0xBA, 0xBE],
        }
    }

    #[test]
    fn test_round_trip() {
        let payload = sample();
        let decoded = TransactionPayload::decode(&payload.encode()).unwrap();
        assert_eq!(decoded, payload);
    }

    #[test]
    fn test_round_trip_empty_call_data() {
        let mut payload = sample();
        payload.call_data = vec![];
        let encoded = payload.encode();
        assert_eq!(encoded.len(), MIN_PAYLOAD_LEN);
        assert_eq!(TransactionPayload::decode(&encoded).unwrap(), payload);
    }

    #[test]
    fn test_encoded_length_is_fixed_plus_call_data() {
        let payload = sample();
        assert_eq!(
            payload.encode().len(),
            MIN_PAYLOAD_LEN + payload.call_data.len()
        );
    }

    #[test]
    fn test_rejects_short_payload() {
        let encoded = sample().encode();
        assert!(matches!(
            TransactionPayload::decode(&encoded[..MIN_PAYLOAD_LEN - 1]),
            Err(Error::PayloadTooShort { expected, found })
                if expected == MIN_PAYLOAD_LEN && found == MIN_PAYLOAD_LEN - 1
        ));
    }

    #[test]
    fn test_rejects_unknown_version() {
        let mut encoded = sample().encode();
        encoded[0] = 2;
        assert!(matches!(
            TransactionPayload::decode(&encoded),
            Err(Error::UnsupportedVersion(2))
        ));
    }

    #[test]
    fn test_rejects_unknown_message_kind() {
        let mut encoded = sample().encode();
        encoded[1] = 7;
        assert!(matches!(
            TransactionPayload::decode(&encoded),
            Err(Error::UnsupportedMessageKind(7))
        ));
    }

    #[test]
    fn test_rejects_overdeclared_call_data_length() {
        let mut encoded = sample().encode();
        // Declare one more byte than is actually present.
        encoded[94..98].copy_from_slice(&5u32.to_le_bytes());
        assert!(matches!(
            TransactionPayload::decode(&encoded),
            Err(Error::InvalidCallDataLength {
                declared: 5,
                remaining: 4
            })
        ));
    }

    #[test]
    fn test_rejects_trailing_bytes_past_declared_length() {
        let mut encoded = sample().encode();
        encoded.push(0);
        assert!(matches!(
            TransactionPayload::decode(&encoded),
            Err(Error::InvalidCallDataLength {
                declared: 4,
                remaining: 5
            })
        ));
    }
}
