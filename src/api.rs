//! Loosely-typed entry points
//!
//! Callers that hold untyped values (JSON requests, JavaScript through the
//! wasm bindings) come in here. Each argument is an optional
//! [`serde_json::Value`]: `None` is a missing argument. Values are parsed into
//! the typed domain once, in a fixed order, and the typed operations in
//! [`crate::wallet`] do the rest.
//!
//! # Examples
//!
//! ```rust
//! use serde_json::json;
//! use splitkeys::{Error, api};
//!
//! assert_eq!(
//!     api::create_wallet(Some(&json!("test")), Some(&json!(3)), Some(&json!(5))).err(),
//!     Some(Error::ThresholdExceedsShares)
//! );
//!
//! let wallet = api::create_wallet(Some(&json!("test")), Some(&json!(5)), Some(&json!(3))).unwrap();
//! let shares = json!(wallet.share_strings()[1..4]);
//! let address = json!(wallet.address().to_string());
//! assert!(api::verify_shares(Some(&shares), Some(&address)).unwrap());
//! ```

use serde::Serialize;
use serde_json::Value;

use crate::codec;
use crate::domain::{Entropy, SplitConfig};
use crate::error::{Error, Result};
use crate::keys::Address;
use crate::signing::SignedMessage;
use crate::wallet::{self, Wallet};

/// Reads an integer argument
///
/// Anything that is not a JSON integer counts as missing; strings are never
/// coerced to numbers.
fn integer(value: Option<&Value>) -> Option<i64> {
    let number = value?.as_number()?;
    number
        .as_i64()
        .or_else(|| number.as_u64().map(|_| i64::MAX))
}

/// Reads a non-empty array of strings
fn share_strings(value: Option<&Value>) -> Result<Vec<&str>> {
    let Some(Value::Array(items)) = value else {
        return Err(Error::InvalidShares);
    };
    if items.is_empty() {
        return Err(Error::InvalidShares);
    }
    items
        .iter()
        .map(|item| item.as_str().ok_or(Error::InvalidShares))
        .collect()
}

/// Creates a wallet from raw arguments
///
/// # Errors
/// In order of precedence: [`Error::InvalidSecret`],
/// [`Error::InvalidParameters`], [`Error::NegativeParameters`],
/// [`Error::ThresholdExceedsShares`]
pub fn create_wallet(
    entropy: Option<&Value>,
    num_shares: Option<&Value>,
    threshold: Option<&Value>,
) -> Result<Wallet> {
    let Some(Value::String(entropy)) = entropy else {
        return Err(Error::InvalidSecret);
    };
    let entropy = Entropy::new(entropy)?;
    let config = SplitConfig::from_raw(integer(num_shares), integer(threshold))?;
    wallet::create_wallet(&entropy, config)
}

/// Verifies raw shares against a raw address
///
/// # Errors
/// [`Error::InvalidShares`] if `shares` is not a non-empty array of strings,
/// then [`Error::InvalidAddress`] if `address` is not an address string,
/// then [`Error::InvalidShares`] if any share fails to decode
pub fn verify_shares(shares: Option<&Value>, address: Option<&Value>) -> Result<bool> {
    let raw = share_strings(shares)?;
    let Some(Value::String(address)) = address else {
        return Err(Error::InvalidAddress);
    };
    let address: Address = address.parse()?;
    let shares = codec::parse_shares(&raw)?;
    wallet::verify_shares(&shares, &address)
}

/// Signs a raw message with raw shares
///
/// # Errors
/// [`Error::InvalidShares`] if `shares` is missing, empty or holds anything
/// that does not decode as a share, then [`Error::InvalidMessage`] if
/// `message` is not a string
pub fn sign_message(shares: Option<&Value>, message: Option<&Value>) -> Result<SignedMessage> {
    let raw = share_strings(shares)?;
    let shares = codec::parse_shares(&raw)?;
    let Some(Value::String(message)) = message else {
        return Err(Error::InvalidMessage);
    };
    wallet::sign_message(&shares, message)
}

fn to_json<T: Serialize>(value: &T) -> Value {
    serde_json::to_value(value)
        .unwrap_or_else(|_| unreachable!("wallet types always serialize to JSON"))
}

/// Runs a `{"method": ..., "params": [...]}` request
///
/// Methods are `createWallet`, `verifyShares` and `signMessage`; params are
/// positional and may be shorter than the method's argument list.
///
/// # Errors
/// Whatever the method returns, or [`Error::UnknownMethod`]
pub fn dispatch(request: &Value) -> Result<Value> {
    let method = request
        .get("method")
        .and_then(Value::as_str)
        .unwrap_or_default();
    let params = request
        .get("params")
        .and_then(Value::as_array)
        .map(Vec::as_slice)
        .unwrap_or_default();
    let arg = |i: usize| params.get(i);

    tracing::debug!(method, params = params.len(), "dispatching request");
    match method {
        "createWallet" => create_wallet(arg(0), arg(1), arg(2)).map(|w| to_json(&w)),
        "verifyShares" => verify_shares(arg(0), arg(1)).map(Value::Bool),
        "signMessage" => sign_message(arg(0), arg(1)).map(|m| to_json(&m)),
        other => Err(Error::UnknownMethod(other.to_owned())),
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    fn wallet() -> Wallet {
        create_wallet(Some(&json!("test")), Some(&json!(5)), Some(&json!(3))).unwrap()
    }

    #[test]
    fn test_integer_reading() {
        assert_eq!(integer(None), None);
        assert_eq!(integer(Some(&Value::Null)), None);
        assert_eq!(integer(Some(&json!("5"))), None);
        assert_eq!(integer(Some(&json!(2.5))), None);
        assert_eq!(integer(Some(&json!(-3))), Some(-3));
        assert_eq!(integer(Some(&json!(u64::MAX))), Some(i64::MAX));
    }

    #[test]
    fn test_numeric_strings_are_not_coerced() {
        assert_eq!(
            create_wallet(Some(&json!("test")), Some(&json!("5")), Some(&json!("3"))).err(),
            Some(Error::InvalidParameters)
        );
    }

    #[test]
    fn test_non_string_entropy() {
        assert_eq!(
            create_wallet(Some(&json!(42)), Some(&json!(5)), Some(&json!(3))).err(),
            Some(Error::InvalidSecret)
        );
        assert_eq!(
            create_wallet(Some(&json!("")), Some(&json!(5)), Some(&json!(3))).err(),
            Some(Error::InvalidSecret)
        );
    }

    #[test]
    fn test_verify_checks_shares_before_address() {
        assert_eq!(
            verify_shares(Some(&json!(["123"])), Some(&json!(1))),
            Err(Error::InvalidAddress)
        );
        assert_eq!(
            verify_shares(Some(&json!([1, 2])), Some(&json!(1))),
            Err(Error::InvalidShares)
        );
    }

    #[test]
    fn test_verify_decodes_shares_after_address() {
        let w = wallet();
        let address = json!(w.address().to_string());
        assert_eq!(
            verify_shares(Some(&json!(["123"])), Some(&address)),
            Err(Error::InvalidShares)
        );
    }

    #[test]
    fn test_sign_checks_shares_before_message() {
        assert_eq!(sign_message(None, None).err(), Some(Error::InvalidShares));
        assert_eq!(
            sign_message(Some(&json!(["123"])), None).err(),
            Some(Error::InvalidShares)
        );
        let w = wallet();
        let shares = json!(w.share_strings()[1..4]);
        assert_eq!(
            sign_message(Some(&shares), Some(&json!(123))).err(),
            Some(Error::InvalidMessage)
        );
    }

    #[test]
    fn test_dispatch_round_trip() {
        let created = dispatch(&json!({
            "method": "createWallet",
            "params": ["test", 5, 3],
        }))
        .unwrap();
        let address = created["address"].clone();
        let shares = json!(created["shares"].as_array().unwrap()[..3]);

        let verified = dispatch(&json!({
            "method": "verifyShares",
            "params": [shares.clone(), address.clone()],
        }))
        .unwrap();
        assert_eq!(verified, Value::Bool(true));

        let signed = dispatch(&json!({
            "method": "signMessage",
            "params": [shares, "hello {address}"],
        }))
        .unwrap();
        assert_eq!(
            signed["message"],
            format!("hello {}", address.as_str().unwrap())
        );
    }

    #[test]
    fn test_dispatch_missing_params() {
        assert_eq!(
            dispatch(&json!({"method": "createWallet"})),
            Err(Error::InvalidSecret)
        );
        assert_eq!(
            dispatch(&json!({"method": "signMessage", "params": []})),
            Err(Error::InvalidShares)
        );
    }

    #[test]
    fn test_dispatch_unknown_method() {
        assert_eq!(
            dispatch(&json!({"method": "burn"})),
            Err(Error::UnknownMethod("burn".to_owned()))
        );
    }
}
