//! WASM bindings
//!
//! Exposes `createWallet`, `verifyShares` and `signMessage` to JavaScript with
//! the same argument leniency as [`crate::api`]: `undefined`, `null` and values
//! of the wrong type are reported with the library's error messages, thrown as
//! JavaScript `Error`s.
//!
//! # Example (JavaScript)
//! ```javascript
//! const { address, shares } = createWallet("some entropy", 5, 3);
//! verifyShares(shares.slice(0, 3), address); // true
//! const signed = signMessage(shares.slice(2), "I own {address}");
//! console.log(signed.signature);
//! ```

use serde::Serialize;
use serde_json::Value;
use wasm_bindgen::prelude::*;

use crate::api;

/// Initialize panic hook for better error messages in the browser console
#[wasm_bindgen(start)]
pub fn init() {
    console_error_panic_hook::set_once();
}

/// Use wee_alloc as the global allocator for smaller WASM binary size
#[global_allocator]
static ALLOC: wee_alloc::WeeAlloc = wee_alloc::WeeAlloc::INIT;

/// Converts a JavaScript argument, treating `undefined` as missing
///
/// Values with no JSON form (functions, symbols) count as missing too; the
/// operation then reports its usual error for that argument.
fn argument(value: &JsValue) -> Option<Value> {
    if value.is_undefined() {
        return None;
    }
    serde_wasm_bindgen::from_value(value.clone()).ok()
}

fn to_js<T: Serialize>(value: &T) -> Result<JsValue, JsError> {
    value
        .serialize(&serde_wasm_bindgen::Serializer::json_compatible())
        .map_err(|e| JsError::new(&e.to_string()))
}

fn to_js_error(err: crate::Error) -> JsError {
    JsError::new(&err.to_string())
}

/// Creates a wallet and returns `{ address, shares }`
#[wasm_bindgen(js_name = createWallet)]
pub fn create_wallet(
    entropy: JsValue,
    num_shares: JsValue,
    threshold: JsValue,
) -> Result<JsValue, JsError> {
    let wallet = api::create_wallet(
        argument(&entropy).as_ref(),
        argument(&num_shares).as_ref(),
        argument(&threshold).as_ref(),
    )
    .map_err(to_js_error)?;
    to_js(&wallet)
}

/// Returns whether `shares` reconstruct the key behind `address`
#[wasm_bindgen(js_name = verifyShares)]
pub fn verify_shares(shares: JsValue, address: JsValue) -> Result<bool, JsError> {
    api::verify_shares(argument(&shares).as_ref(), argument(&address).as_ref())
        .map_err(to_js_error)
}

/// Signs `message` and returns `{ message, messageHash, signature, v, r, s }`
#[wasm_bindgen(js_name = signMessage)]
pub fn sign_message(shares: JsValue, message: JsValue) -> Result<JsValue, JsError> {
    let signed = api::sign_message(argument(&shares).as_ref(), argument(&message).as_ref())
        .map_err(to_js_error)?;
    to_js(&signed)
}
