//! Canonical textual encoding of shares
//!
//! A share travels between the library and storage as a single lowercase hex
//! string:
//!
//! ```text
//! version (1) || index (1) || value (n) || crc32 (4, big endian)
//! ```
//!
//! The CRC covers everything before it and catches transcription errors. It
//! does not authenticate the share: a well-formed share from another wallet
//! decodes fine and is only caught when the reconstructed address mismatches.
//!
//! # Examples
//!
//! ```rust
//! use splitkeys::codec::Share;
//! use splitkeys::domain::ShareIndex;
//!
//! # fn main() -> Result<(), Box<dyn std::error::Error>> {
//! let share = Share::new(ShareIndex::new(3)?, vec![0xde, 0xad, 0xbe, 0xef])?;
//! let text = share.to_string();
//!
//! let parsed: Share = text.parse()?;
//! assert_eq!(parsed, share);
//! assert_eq!(parsed.to_string(), text);
//! # Ok(())
//! # }
//! ```

use std::str::FromStr;

use crc::{CRC_32_ISO_HDLC, Crc};
use serde::{Deserialize, Deserializer, Serialize, Serializer};
use zeroize::Zeroizing;

use crate::domain::ShareIndex;
use crate::error::{Error, Result};

/// CRC32 algorithm for share integrity checking
const CRC32: Crc<u32> = Crc::<u32>::new(&CRC_32_ISO_HDLC);

/// Leading byte of every encoded share
pub const FORMAT_VERSION: u8 = 0x01;

const HEADER_LEN: usize = 2;
const CHECKSUM_LEN: usize = 4;

/// One evaluation of the sharing polynomials: an x coordinate and one y byte
/// per secret byte
///
/// The value is wiped on drop.
#[derive(Clone, PartialEq, Eq)]
pub struct Share {
    index: ShareIndex,
    value: Zeroizing<Vec<u8>>,
}

impl Share {
    /// Creates a share from its index and value bytes
    ///
    /// # Errors
    /// Returns [`Error::InvalidShares`] if the value is empty
    pub fn new(index: ShareIndex, value: Vec<u8>) -> Result<Self> {
        let value = Zeroizing::new(value);
        if value.is_empty() {
            return Err(Error::InvalidShares);
        }
        Ok(Self { index, value })
    }

    #[must_use]
    pub fn index(&self) -> ShareIndex {
        self.index
    }

    #[must_use]
    pub fn value(&self) -> &[u8] {
        &self.value
    }

    fn encode(&self) -> String {
        let mut bytes = Zeroizing::new(Vec::with_capacity(
            HEADER_LEN + self.value.len() + CHECKSUM_LEN,
        ));
        bytes.push(FORMAT_VERSION);
        bytes.push(*self.index);
        bytes.extend_from_slice(&self.value);
        let checksum = CRC32.checksum(&bytes);
        bytes.extend_from_slice(&checksum.to_be_bytes());
        hex::encode(bytes.as_slice())
    }
}

impl std::fmt::Display for Share {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        let encoded = Zeroizing::new(self.encode());
        f.write_str(&encoded)
    }
}

impl std::fmt::Debug for Share {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("Share")
            .field("index", &*self.index)
            .field("len", &self.value.len())
            .finish_non_exhaustive()
    }
}

impl FromStr for Share {
    type Err = Error;

    fn from_str(s: &str) -> Result<Self> {
        let bytes = Zeroizing::new(hex::decode(s.trim()).map_err(|e| {
            tracing::debug!(error = %e, "share is not valid hex");
            Error::InvalidShares
        })?);

        if bytes.len() <= HEADER_LEN + CHECKSUM_LEN {
            tracing::debug!(len = bytes.len(), "share too short");
            return Err(Error::InvalidShares);
        }

        let (body, checksum) = bytes.split_at(bytes.len() - CHECKSUM_LEN);
        let expected = CRC32.checksum(body);
        let actual = u32::from_be_bytes([checksum[0], checksum[1], checksum[2], checksum[3]]);
        if expected != actual {
            tracing::debug!("share checksum mismatch");
            return Err(Error::InvalidShares);
        }

        if body[0] != FORMAT_VERSION {
            tracing::debug!(version = body[0], "unsupported share version");
            return Err(Error::InvalidShares);
        }

        let index = ShareIndex::new(body[1])?;
        Self::new(index, body[HEADER_LEN..].to_vec())
    }
}

impl Serialize for Share {
    fn serialize<S: Serializer>(&self, serializer: S) -> std::result::Result<S::Ok, S::Error> {
        serializer.collect_str(self)
    }
}

impl<'de> Deserialize<'de> for Share {
    fn deserialize<D: Deserializer<'de>>(deserializer: D) -> std::result::Result<Self, D::Error> {
        let s = Zeroizing::new(String::deserialize(deserializer)?);
        s.parse().map_err(serde::de::Error::custom)
    }
}

/// Decodes a collection of share strings
///
/// # Errors
/// Returns [`Error::InvalidShares`] if the collection is empty or any entry
/// fails to decode
pub fn parse_shares<S: AsRef<str>>(shares: &[S]) -> Result<Vec<Share>> {
    if shares.is_empty() {
        return Err(Error::InvalidShares);
    }
    shares.iter().map(|s| s.as_ref().parse()).collect()
}
