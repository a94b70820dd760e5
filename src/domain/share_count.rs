//! `ShareCount` newtype for Shamir Secret Sharing

use crate::error::{Error, Result};

/// Number of shares to create (1..=255)
///
/// Shares are evaluated at x = 1..=count over GF(256), which caps the count at 255.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord)]
pub struct ShareCount(u8);

impl ShareCount {
    /// Minimum valid share count
    pub const MIN: u8 = 1;

    /// Maximum valid share count
    pub const MAX: u8 = 255;

    /// Creates a new share count
    ///
    /// # Errors
    /// Returns [`Error::InvalidParameters`] if count is 0
    ///
    /// # Examples
    ///
    /// ```rust
    /// use splitkeys::domain::ShareCount;
    ///
    /// let count = ShareCount::new(5).unwrap();
    /// assert_eq!(*count, 5);
    ///
    /// assert!(ShareCount::new(0).is_err());
    /// ```
    pub fn new(value: u8) -> Result<Self> {
        if value < Self::MIN {
            return Err(Error::InvalidParameters);
        }
        Ok(Self(value))
    }
}

impl std::ops::Deref for ShareCount {
    type Target = u8;

    #[inline]
    fn deref(&self) -> &Self::Target {
        &self.0
    }
}
