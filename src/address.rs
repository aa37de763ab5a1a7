use serde::{Deserialize, Serialize};
use std::fmt::{self, Debug, Display};
use tiny_keccak::{Hasher, Sha3};

use crate::error::{Error, Result};

const ADDRESS32_SIZE: usize = 32;

/// A canonical 32-byte account identity. Native address formats shorter than
/// 32 bytes are zero-left-padded into this form.
#[derive(Clone, Copy, Serialize, Deserialize, Eq, PartialEq, Ord, PartialOrd, Hash)]
pub struct Address32([u8; ADDRESS32_SIZE]);

impl Address32 {
    pub const ZERO: Address32 = Address32([0; ADDRESS32_SIZE]);

    pub fn from_bytes(data: &[u8]) -> Result<Self> {
        let bytes: &[u8; ADDRESS32_SIZE] =
            data.try_into().map_err(|_| Error::InvalidTargetAddress {
                expected: ADDRESS32_SIZE,
                found: data.len(),
            })?;
        Ok(Self(*bytes))
    }

    /// Pads a shorter native address (e.g. a 20-byte EVM address) into the
    /// canonical form. Rejects anything longer than 32 bytes.
    pub fn from_native(data: &[u8]) -> Result<Self> {
        if data.len() > ADDRESS32_SIZE {
            return Err(Error::InvalidTargetAddress {
                expected: ADDRESS32_SIZE,
                found: data.len(),
            });
        }
        let mut bytes = [0u8; ADDRESS32_SIZE];
        bytes[ADDRESS32_SIZE - data.len()..].copy_from_slice(data);
        Ok(Self(bytes))
    }

    /// Derives a deterministic sub-identity from a base identity and seed
    /// bytes. Opaque to the rest of the protocol; only stability matters.
    pub fn derive(base: &Address32, seeds: &[&[u8]]) -> Self {
        let mut sha3 = Sha3::v256();
        let mut hash = [0u8; ADDRESS32_SIZE];
        sha3.update(&base.0);
        for seed in seeds {
            sha3.update(seed);
        }
        sha3.finalize(&mut hash);
        Address32(hash)
    }

    pub fn as_fixed_bytes(&self) -> &[u8; ADDRESS32_SIZE] {
        &self.0
    }

    pub fn to_bytes(&self) -> Vec<u8> {
        self.0.to_vec()
    }
}

impl From<[u8; ADDRESS32_SIZE]> for Address32 {
    fn from(val: [u8; ADDRESS32_SIZE]) -> Self {
        Self(val)
    }
}

impl Display for Address32 {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", hex::encode(self.0))
    }
}

impl Debug for Address32 {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}..", hex::encode(&self.0[..4]))
    }
}
