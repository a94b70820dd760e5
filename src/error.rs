//! Error taxonomy for wallet operations
//!
//! Every precondition failure carries a fixed, human-readable message. Callers
//! (and existing automated checks) match on these strings, so they must not change.

use crate::field::ArithmeticError;

/// Result alias used throughout the library
pub type Result<T, E = Error> = std::result::Result<T, E>;

/// Failure kinds surfaced by the library
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum Error {
    /// Entropy was missing or empty at split time
    #[error("entropy cannot be undefined or empty")]
    InvalidSecret,

    /// Share count or threshold was missing, non-numeric, zero or out of range
    #[error("numShares or threshold invalid")]
    InvalidParameters,

    /// Share count or threshold was negative
    #[error("numShares and threshold cannot be negative")]
    NegativeParameters,

    /// More shares are required for reconstruction than would be created
    #[error("numShares cannot be less than threshold")]
    ThresholdExceedsShares,

    /// Share collection was empty or contained a malformed share
    #[error("invalid value passed for shares")]
    InvalidShares,

    /// Message to sign was missing or not a string
    #[error("invalid value passed for message")]
    InvalidMessage,

    /// Address was missing or not a well-formed address
    #[error("invalid value passed for address")]
    InvalidAddress,

    /// Field arithmetic hit a degenerate input
    #[error(transparent)]
    Arithmetic(#[from] ArithmeticError),

    /// Secret bytes do not form a usable secp256k1 private key
    #[error("value is not a valid secp256k1 private key")]
    InvalidPrivateKey,

    /// Entropy could not be stretched into a private key
    #[error("key derivation failed")]
    KeyDerivation,

    /// The signer rejected the digest
    #[error("signing failed")]
    Signing,

    /// A signature could not be decoded or recovered
    #[error("invalid signature")]
    InvalidSignature,

    /// A dispatched request named no known operation
    #[error("unknown method: {0}")]
    UnknownMethod(String),
}
