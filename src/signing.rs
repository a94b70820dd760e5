//! Ethereum personal-message signing
//!
//! Messages are hashed with the `personal_sign` prefix so a signature over a
//! message can never be replayed as a signature over a transaction.

use k256::ecdsa::{RecoveryId, Signature, VerifyingKey};
use serde::{Deserialize, Serialize};
use sha3::{Digest, Keccak256};

use crate::error::{Error, Result};
use crate::keys::{Address, PrivateKey};

/// Token replaced with the signer's address before signing
pub const ADDRESS_PLACEHOLDER: &str = "{address}";

const MESSAGE_PREFIX: &str = "\x19Ethereum Signed Message:\n";

/// Offset added to the recovery id to form `v`
const V_OFFSET: u8 = 27;

const SIGNATURE_LEN: usize = 65;

/// A message together with its signature
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct SignedMessage {
    /// Message after placeholder substitution
    pub message: String,
    /// `0x` hex Keccak-256 digest that was signed
    pub message_hash: String,
    /// `0x` hex of `r || s || v`
    pub signature: String,
    /// 27 or 28
    pub v: u8,
    /// `0x` hex, 32 bytes
    pub r: String,
    /// `0x` hex, 32 bytes, low-S normalized
    pub s: String,
}

/// Replaces every [`ADDRESS_PLACEHOLDER`] in `template`
#[must_use]
pub fn render_message(template: &str, address: &Address) -> String {
    template.replace(ADDRESS_PLACEHOLDER, &address.to_string())
}

/// Keccak-256 of the `personal_sign` framing of `message`
#[must_use]
pub fn hash_message(message: &str) -> [u8; 32] {
    let mut hasher = Keccak256::new();
    hasher.update(MESSAGE_PREFIX.as_bytes());
    hasher.update(message.len().to_string().as_bytes());
    hasher.update(message.as_bytes());

    let mut digest = [0u8; 32];
    digest.copy_from_slice(&hasher.finalize());
    digest
}

fn prefixed_hex(bytes: &[u8]) -> String {
    format!("0x{}", hex::encode(bytes))
}

/// Signs an already rendered message
///
/// Nonces are RFC 6979 deterministic and `s` is normalized to the lower half
/// of the curve order.
///
/// # Errors
/// [`Error::InvalidPrivateKey`] or [`Error::Signing`]
pub fn sign(key: &PrivateKey, message: String) -> Result<SignedMessage> {
    let signing_key = key.signing_key()?;
    let digest = hash_message(&message);

    let (signature, recovery_id) = match signing_key.sign_prehash_recoverable(&digest) {
        Ok(signed) => signed,
        Err(e) => {
            tracing::warn!(error = %e, "signer rejected digest");
            return Err(Error::Signing);
        }
    };

    let v = V_OFFSET + recovery_id.to_byte();
    let (r, s) = signature.split_bytes();

    let mut compact = Vec::with_capacity(SIGNATURE_LEN);
    compact.extend_from_slice(&r);
    compact.extend_from_slice(&s);
    compact.push(v);

    Ok(SignedMessage {
        message,
        message_hash: prefixed_hex(&digest),
        signature: prefixed_hex(&compact),
        v,
        r: prefixed_hex(&r),
        s: prefixed_hex(&s),
    })
}

/// Recovers the address that produced `signed`
///
/// The digest is recomputed from `signed.message`, so a tampered message
/// recovers to a different address.
///
/// # Errors
/// Returns [`Error::InvalidSignature`] if the signature is malformed or does
/// not recover to a public key
pub fn recover_address(signed: &SignedMessage) -> Result<Address> {
    let hex_sig = signed
        .signature
        .strip_prefix("0x")
        .ok_or(Error::InvalidSignature)?;
    let bytes = hex::decode(hex_sig).map_err(|_| Error::InvalidSignature)?;
    if bytes.len() != SIGNATURE_LEN {
        return Err(Error::InvalidSignature);
    }

    let signature = Signature::from_slice(&bytes[..64]).map_err(|_| Error::InvalidSignature)?;
    let recovery_id = bytes[64]
        .checked_sub(V_OFFSET)
        .and_then(RecoveryId::from_byte)
        .ok_or(Error::InvalidSignature)?;

    let digest = hash_message(&signed.message);
    let key = VerifyingKey::recover_from_prehash(&digest, &signature, recovery_id)
        .map_err(|_| Error::InvalidSignature)?;

    Ok(Address::from_verifying_key(&key))
}
