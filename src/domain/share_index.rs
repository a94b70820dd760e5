//! `ShareIndex` newtype for Shamir Secret Sharing

use crate::error::{Error, Result};

/// Share index (1..=255)
///
/// The index is the x coordinate the share was evaluated at. Index 0 would be
/// the secret itself and is never handed out.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub struct ShareIndex(u8);

impl ShareIndex {
    /// Minimum valid share index
    pub const MIN: u8 = 1;

    /// Creates a new share index
    ///
    /// # Errors
    /// Returns [`Error::InvalidShares`] if index is 0
    ///
    /// # Examples
    ///
    /// ```rust
    /// use splitkeys::domain::ShareIndex;
    ///
    /// let index = ShareIndex::new(1).unwrap();
    /// assert_eq!(*index, 1);
    ///
    /// assert!(ShareIndex::new(0).is_err());
    /// ```
    pub fn new(value: u8) -> Result<Self> {
        if value < Self::MIN {
            return Err(Error::InvalidShares);
        }
        Ok(Self(value))
    }
}

impl std::ops::Deref for ShareIndex {
    type Target = u8;

    #[inline]
    fn deref(&self) -> &Self::Target {
        &self.0
    }
}
