//! Threshold newtype for Shamir Secret Sharing

use crate::error::{Error, Result};

/// Threshold for Shamir Secret Sharing (1..=255)
///
/// A threshold of 1 is accepted: every share is then a full copy of the secret.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord)]
pub struct Threshold(u8);

impl Threshold {
    /// Creates a new threshold, returning an error if value is 0
    ///
    /// # Errors
    /// Returns [`Error::InvalidParameters`] if the threshold is 0
    ///
    /// # Examples
    ///
    /// ```rust
    /// use splitkeys::domain::Threshold;
    ///
    /// let threshold = Threshold::new(3).unwrap();
    /// assert_eq!(*threshold, 3);
    /// assert_eq!(threshold.degree(), 2);
    ///
    /// assert!(Threshold::new(0).is_err());
    /// ```
    pub fn new(value: u8) -> Result<Self> {
        if value == 0 {
            return Err(Error::InvalidParameters);
        }
        Ok(Self(value))
    }

    /// Degree of the sharing polynomial
    #[must_use]
    pub fn degree(self) -> usize {
        usize::from(self.0) - 1
    }
}

impl std::ops::Deref for Threshold {
    type Target = u8;

    #[inline]
    fn deref(&self) -> &Self::Target {
        &self.0
    }
}
