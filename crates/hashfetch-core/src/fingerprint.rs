//! Content fingerprint over fetched bytes.
//!
//! MD5 is used purely as a stable 128-bit identifier of response content,
//! never for integrity or authenticity.

use md5::{Digest, Md5};
use std::fmt;

/// 128-bit content fingerprint.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct Fingerprint([u8; 16]);

impl Fingerprint {
    /// Fingerprint of `data`, computed over the exact bytes given.
    pub fn of(data: &[u8]) -> Self {
        let digest = Md5::digest(data);
        let mut out = [0u8; 16];
        out.copy_from_slice(&digest);
        Self(out)
    }

    pub fn as_bytes(&self) -> &[u8; 16] {
        &self.0
    }

    /// 32 lowercase hex characters.
    pub fn to_hex(&self) -> String {
        hex::encode(self.0)
    }
}

impl From<[u8; 16]> for Fingerprint {
    fn from(bytes: [u8; 16]) -> Self {
        Self(bytes)
    }
}

impl fmt::Display for Fingerprint {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.to_hex())
    }
}
