//! Framing for persisted records: an 8-byte discriminator derived from the
//! record name, a version byte, then the bincode-encoded body.

use serde::de::DeserializeOwned;
use serde::Serialize;
use tiny_keccak::{Hasher, Sha3};

use crate::error::{Error, Result};

pub const RECORD_VERSION: u8 = 1;

const TAG_LEN: usize = 8;
const FRAME_LEN: usize = TAG_LEN + 1;

/// Derives a stable 8-byte tag from a namespaced name.
pub(crate) fn name_tag(namespace: &str, name: &str) -> [u8; TAG_LEN] {
    let mut sha3 = Sha3::v256();
    let mut hash = [0u8; 32];
    sha3.update(namespace.as_bytes());
    sha3.update(b":");
    sha3.update(name.as_bytes());
    sha3.finalize(&mut hash);
    let mut tag = [0u8; TAG_LEN];
    tag.copy_from_slice(&hash[..TAG_LEN]);
    tag
}

pub fn record_tag(name: &str) -> [u8; TAG_LEN] {
    name_tag("record", name)
}

pub fn seal<T: Serialize>(tag: [u8; TAG_LEN], value: &T) -> Result<Vec<u8>> {
    let body = bincode::serialize(value)?;
    let mut out = Vec::with_capacity(FRAME_LEN + body.len());
    out.extend_from_slice(&tag);
    out.push(RECORD_VERSION);
    out.extend_from_slice(&body);
    Ok(out)
}

pub fn open<T: DeserializeOwned>(tag: [u8; TAG_LEN], bytes: &[u8]) -> Result<T> {
    if bytes.len() < FRAME_LEN {
        return Err(Error::RecordTooShort(bytes.len()));
    }
    let mut found = [0u8; TAG_LEN];
    found.copy_from_slice(&bytes[..TAG_LEN]);
    if found != tag {
        return Err(Error::UnknownRecordKind(found));
    }
    if bytes[TAG_LEN] != RECORD_VERSION {
        return Err(Error::UnsupportedRecordVersion {
            expected: RECORD_VERSION,
            found: bytes[TAG_LEN],
        });
    }
    Ok(bincode::deserialize(&bytes[FRAME_LEN..])?)
}
