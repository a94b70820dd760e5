//! Wallet lifecycle: creation, share verification and signing
//!
//! These are the typed operations. Raw, loosely-typed input is parsed into
//! the types used here by [`crate::api`].
//!
//! A reconstructed key never leaves this module: callers get an address
//! comparison or a signature, not the key.
//!
//! ```compile_fail
//! use splitkeys::wallet::with_reconstructed_key;
//! ```

use serde::{Deserialize, Serialize};

use crate::codec::Share;
use crate::domain::{Entropy, SplitConfig};
use crate::error::{Error, Result};
use crate::keys::{self, Address, KEY_LEN, PrivateKey};
use crate::sharing;
use crate::signing::{self, SignedMessage};

/// An address and the shares of the key behind it
///
/// The private key itself is not part of a wallet.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Wallet {
    address: Address,
    shares: Vec<Share>,
}

impl Wallet {
    #[must_use]
    pub fn address(&self) -> &Address {
        &self.address
    }

    #[must_use]
    pub fn shares(&self) -> &[Share] {
        &self.shares
    }

    /// Canonical text of every share, in index order
    #[must_use]
    pub fn share_strings(&self) -> Vec<String> {
        self.shares.iter().map(ToString::to_string).collect()
    }
}

/// Derives a fresh private key from `entropy`, splits it and returns the
/// address with the shares
///
/// Each call mixes a new random salt into the derivation, so two wallets made
/// from the same entropy are unrelated.
///
/// # Errors
/// Returns [`Error::KeyDerivation`] if the entropy cannot be stretched into a key
#[tracing::instrument(
    level = "debug",
    skip_all,
    fields(share_count = *config.share_count(), threshold = *config.threshold())
)]
pub fn create_wallet(entropy: &Entropy, config: SplitConfig) -> Result<Wallet> {
    let salt = keys::random_salt();
    let key = keys::derive_key(entropy, &salt)?;
    let address = keys::derive_address(&key)?;
    let shares = sharing::split(key.as_bytes(), config)?;
    drop(key);

    tracing::debug!(%address, "wallet created");
    Ok(Wallet { address, shares })
}

/// Rebuilds the private key from `shares` and hands it to `f`
///
/// The key and the combined secret are zeroed when this returns, whichever
/// way it returns. `f` must not move key material out.
///
/// # Errors
/// - [`Error::InvalidShares`] if `shares` is empty or a share is not key sized
/// - [`Error::Arithmetic`] if two shares claim the same index with different values
/// - [`Error::InvalidPrivateKey`] if the shares combine to an out-of-range scalar
/// - anything `f` returns
pub(crate) fn with_reconstructed_key<T, F>(shares: &[Share], f: F) -> Result<T>
where
    F: FnOnce(&PrivateKey) -> Result<T>,
{
    if shares.is_empty() || shares.iter().any(|s| s.value().len() != KEY_LEN) {
        return Err(Error::InvalidShares);
    }

    let key = {
        let secret = sharing::combine(shares)?;
        PrivateKey::from_bytes(&secret)?
    };
    f(&key)
}

/// Checks whether `shares` reconstruct the key behind `address`
///
/// A share set that reconstructs some other key (too few shares, repeated
/// shares, shares from another wallet) is a normal `false`, not an error.
///
/// # Errors
/// Returns [`Error::InvalidShares`] if `shares` is empty or malformed
#[tracing::instrument(level = "debug", skip_all, fields(shares = shares.len()))]
pub fn verify_shares(shares: &[Share], address: &Address) -> Result<bool> {
    match with_reconstructed_key(shares, keys::derive_address) {
        Ok(derived) => Ok(derived == *address),
        Err(Error::Arithmetic(e)) => {
            tracing::debug!(error = %e, "shares are inconsistent");
            Ok(false)
        }
        Err(Error::InvalidPrivateKey) => {
            tracing::debug!("shares combine to an invalid key");
            Ok(false)
        }
        Err(e) => Err(e),
    }
}

/// Signs `template` with the key reconstructed from `shares`
///
/// Every `{address}` in `template` is replaced with the reconstructed
/// wallet's address before hashing.
///
/// # Errors
/// Returns [`Error::InvalidShares`] if `shares` is empty, malformed or
/// does not combine to a usable key
#[tracing::instrument(level = "debug", skip_all, fields(shares = shares.len()))]
pub fn sign_message(shares: &[Share], template: &str) -> Result<SignedMessage> {
    with_reconstructed_key(shares, |key| {
        let address = keys::derive_address(key)?;
        let message = signing::render_message(template, &address);
        signing::sign(key, message)
    })
    .map_err(|e| match e {
        Error::Arithmetic(_) | Error::InvalidPrivateKey => Error::InvalidShares,
        other => other,
    })
}
