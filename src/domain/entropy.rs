//! `Entropy` newtype for key derivation input

use zeroize::Zeroizing;

use crate::error::{Error, Result};

/// Caller-supplied entropy (never empty)
///
/// Wrapped in `Zeroizing` so the input is wiped once the wallet is created.
/// Not `Clone`: the only copy is the one the caller parsed.
///
/// ```compile_fail
/// let entropy = splitkeys::domain::Entropy::new("seed").unwrap();
/// let copy = entropy.clone();
/// ```
pub struct Entropy(Zeroizing<String>);

impl Entropy {
    /// Creates new entropy from a string
    ///
    /// # Errors
    /// Returns [`Error::InvalidSecret`] if the string is empty
    ///
    /// # Examples
    ///
    /// ```rust
    /// use splitkeys::domain::Entropy;
    ///
    /// assert!(Entropy::new("correct horse battery staple").is_ok());
    /// assert!(Entropy::new("").is_err());
    /// ```
    pub fn new(value: &str) -> Result<Self> {
        if value.is_empty() {
            return Err(Error::InvalidSecret);
        }
        Ok(Self(Zeroizing::new(value.to_owned())))
    }

    /// Gets the raw entropy bytes
    #[must_use]
    pub fn as_bytes(&self) -> &[u8] {
        self.0.as_bytes()
    }
}

impl std::fmt::Debug for Entropy {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str("Entropy(<redacted>)")
    }
}
