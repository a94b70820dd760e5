//! Threshold-shared Ethereum wallets
//!
//! A wallet's private key is derived from caller entropy, split into Shamir
//! shares over GF(2^8) and then forgotten. Any threshold-sized subset of the
//! shares can later prove it controls the wallet's address or sign a message,
//! without the key ever being stored.

pub mod api;
pub mod codec;
pub mod domain;
pub mod error;
pub mod field;
pub mod keys;
pub mod sharing;
pub mod signing;
pub mod wallet;

#[cfg(feature = "cli")]
pub mod cli;
#[cfg(feature = "cli")]
pub mod commands;

#[cfg(target_arch = "wasm32")]
pub mod wasm;

pub use error::{Error, Result};
pub use wallet::{Wallet, create_wallet, sign_message, verify_shares};
