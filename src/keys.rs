//! Private key derivation and Ethereum addressing

use std::str::FromStr;

use hkdf::Hkdf;
use k256::ecdsa::{SigningKey, VerifyingKey};
use rand::RngCore;
use serde::{Deserialize, Deserializer, Serialize, Serializer};
use sha2::Sha256;
use sha3::{Digest, Keccak256};
use zeroize::Zeroizing;

use crate::domain::Entropy;
use crate::error::{Error, Result};

/// Length of a secp256k1 private key
pub const KEY_LEN: usize = 32;

/// Length of the per-wallet derivation salt
pub const SALT_LEN: usize = 32;

/// Length of an Ethereum address
pub const ADDRESS_LEN: usize = 20;

/// Candidate keys are drawn until one is a valid scalar. Failing even once
/// has probability around 2^-128.
const MAX_DERIVATION_ATTEMPTS: u32 = 16;

/// secp256k1 private key
///
/// Wiped on drop. Not `Clone` and never serialized; the scalar bytes cannot
/// be read from outside this crate.
///
/// ```compile_fail
/// fn leak(key: &splitkeys::keys::PrivateKey) -> Vec<u8> {
///     key.as_bytes().to_vec()
/// }
/// ```
pub struct PrivateKey(Zeroizing<[u8; KEY_LEN]>);

impl PrivateKey {
    /// Wraps 32 bytes as a private key
    ///
    /// # Errors
    /// Returns [`Error::InvalidPrivateKey`] if `bytes` is not 32 bytes long or
    /// is not a scalar in `[1, n)`
    pub fn from_bytes(bytes: &[u8]) -> Result<Self> {
        let mut buf = Zeroizing::new([0u8; KEY_LEN]);
        if bytes.len() != KEY_LEN {
            return Err(Error::InvalidPrivateKey);
        }
        buf.copy_from_slice(bytes);
        let key = Self(buf);
        key.signing_key()?;
        Ok(key)
    }

    /// Raw scalar bytes, for splitting only
    #[must_use]
    pub(crate) fn as_bytes(&self) -> &[u8] {
        self.0.as_slice()
    }

    pub(crate) fn signing_key(&self) -> Result<SigningKey> {
        SigningKey::from_slice(self.0.as_slice()).map_err(|_| Error::InvalidPrivateKey)
    }
}

impl std::fmt::Debug for PrivateKey {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str("PrivateKey(<redacted>)")
    }
}

/// Draws a fresh derivation salt from the thread-local CSPRNG
#[must_use]
pub fn random_salt() -> [u8; SALT_LEN] {
    let mut salt = [0u8; SALT_LEN];
    rand::rng().fill_bytes(&mut salt);
    salt
}

/// Stretches entropy into a private key with HKDF-SHA256
///
/// Deterministic: the same entropy and salt always give the same key.
///
/// # Errors
/// Returns [`Error::KeyDerivation`] if no valid scalar could be derived
pub fn derive_key(entropy: &Entropy, salt: &[u8; SALT_LEN]) -> Result<PrivateKey> {
    let hk = Hkdf::<Sha256>::new(Some(salt.as_slice()), entropy.as_bytes());

    for counter in 0..MAX_DERIVATION_ATTEMPTS {
        let mut okm = Zeroizing::new([0u8; KEY_LEN]);
        let info = format!("splitkeys:private-key:{counter}");
        hk.expand(info.as_bytes(), okm.as_mut_slice())
            .map_err(|_| Error::KeyDerivation)?;

        match PrivateKey::from_bytes(okm.as_slice()) {
            Ok(key) => return Ok(key),
            Err(_) => tracing::debug!(counter, "derived value out of range, retrying"),
        }
    }

    Err(Error::KeyDerivation)
}

/// Derives the Ethereum address controlled by `key`
///
/// # Errors
/// Returns [`Error::InvalidPrivateKey`] if the key is not a valid scalar
pub fn derive_address(key: &PrivateKey) -> Result<Address> {
    let signing_key = key.signing_key()?;
    Ok(Address::from_verifying_key(signing_key.verifying_key()))
}

/// 20-byte Ethereum address
///
/// Displays in EIP-55 mixed-case checksum form.
#[derive(Clone, Copy, PartialEq, Eq, Hash)]
pub struct Address([u8; ADDRESS_LEN]);

impl Address {
    #[must_use]
    pub const fn from_bytes(bytes: [u8; ADDRESS_LEN]) -> Self {
        Self(bytes)
    }

    #[must_use]
    pub fn as_bytes(&self) -> &[u8; ADDRESS_LEN] {
        &self.0
    }

    /// Last 20 bytes of the Keccak-256 hash of the uncompressed public key
    pub(crate) fn from_verifying_key(key: &VerifyingKey) -> Self {
        let point = key.to_encoded_point(false);
        // Skip the 0x04 SEC1 tag
        let hash = Keccak256::digest(&point.as_bytes()[1..]);
        let mut bytes = [0u8; ADDRESS_LEN];
        bytes.copy_from_slice(&hash[hash.len() - ADDRESS_LEN..]);
        Self(bytes)
    }

    /// EIP-55 checksum encoding, with `0x` prefix
    #[must_use]
    pub fn to_checksum(&self) -> String {
        let lower = hex::encode(self.0);
        let hash = Keccak256::digest(lower.as_bytes());

        let mut out = String::with_capacity(2 + lower.len());
        out.push_str("0x");
        for (i, c) in lower.chars().enumerate() {
            let nibble = if i % 2 == 0 {
                hash[i / 2] >> 4
            } else {
                hash[i / 2] & 0x0f
            };
            if nibble >= 8 {
                out.push(c.to_ascii_uppercase());
            } else {
                out.push(c);
            }
        }
        out
    }
}

impl std::fmt::Display for Address {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(&self.to_checksum())
    }
}

impl std::fmt::Debug for Address {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "Address({})", self.to_checksum())
    }
}

impl FromStr for Address {
    type Err = Error;

    /// Parses `0x` followed by 40 hex digits
    ///
    /// All-lowercase and all-uppercase digits are accepted as is; mixed case
    /// must match the EIP-55 checksum.
    fn from_str(s: &str) -> Result<Self> {
        let digits = s.strip_prefix("0x").ok_or(Error::InvalidAddress)?;
        if digits.len() != 2 * ADDRESS_LEN {
            return Err(Error::InvalidAddress);
        }

        let mut bytes = [0u8; ADDRESS_LEN];
        hex::decode_to_slice(digits, &mut bytes).map_err(|_| Error::InvalidAddress)?;
        let address = Self(bytes);

        let has_lower = digits.chars().any(|c| c.is_ascii_lowercase());
        let has_upper = digits.chars().any(|c| c.is_ascii_uppercase());
        if has_lower && has_upper && address.to_checksum() != s {
            tracing::debug!("address checksum mismatch");
            return Err(Error::InvalidAddress);
        }

        Ok(address)
    }
}

impl Serialize for Address {
    fn serialize<S: Serializer>(&self, serializer: S) -> std::result::Result<S::Ok, S::Error> {
        serializer.collect_str(self)
    }
}

impl<'de> Deserialize<'de> for Address {
    fn deserialize<D: Deserializer<'de>>(deserializer: D) -> std::result::Result<Self, D::Error> {
        let s = String::deserialize(deserializer)?;
        s.parse().map_err(serde::de::Error::custom)
    }
}
