//! Configuration validation for Shamir Secret Sharing splits

use crate::error::{Error, Result};

use super::{ShareCount, Threshold};

/// Validated pair of threshold and share count
///
/// Enforces the invariant that threshold <= `share_count` at the type level.
/// This prevents creating configurations where more shares are required
/// than actually exist.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct SplitConfig {
    threshold: Threshold,
    share_count: ShareCount,
}

impl SplitConfig {
    /// Creates a new split configuration
    ///
    /// # Errors
    /// Returns [`Error::ThresholdExceedsShares`] if threshold exceeds share count
    ///
    /// # Examples
    ///
    /// ```rust
    /// use splitkeys::domain::{SplitConfig, Threshold, ShareCount};
    ///
    /// let config = SplitConfig::new(
    ///     Threshold::new(3).unwrap(),
    ///     ShareCount::new(5).unwrap()
    /// ).unwrap();
    ///
    /// assert_eq!(*config.threshold(), 3);
    /// assert_eq!(*config.share_count(), 5);
    ///
    /// let result = SplitConfig::new(
    ///     Threshold::new(5).unwrap(),
    ///     ShareCount::new(3).unwrap()
    /// );
    /// assert!(result.is_err());
    /// ```
    pub fn new(threshold: Threshold, share_count: ShareCount) -> Result<Self> {
        if *threshold > *share_count {
            return Err(Error::ThresholdExceedsShares);
        }
        Ok(Self {
            threshold,
            share_count,
        })
    }

    /// Validates raw caller-supplied numbers
    ///
    /// Checks run in a fixed order so callers always see the same error for
    /// the same input: missing values, then negative values, then zero, then a
    /// threshold above the share count, then a share count beyond what the
    /// field can address.
    ///
    /// # Errors
    /// [`Error::InvalidParameters`], [`Error::NegativeParameters`] or
    /// [`Error::ThresholdExceedsShares`]
    ///
    /// # Examples
    ///
    /// ```rust
    /// use splitkeys::domain::SplitConfig;
    /// use splitkeys::Error;
    ///
    /// assert!(SplitConfig::from_raw(Some(5), Some(3)).is_ok());
    /// assert_eq!(SplitConfig::from_raw(None, Some(3)), Err(Error::InvalidParameters));
    /// assert_eq!(SplitConfig::from_raw(Some(-1), Some(5)), Err(Error::NegativeParameters));
    /// assert_eq!(SplitConfig::from_raw(Some(3), Some(5)), Err(Error::ThresholdExceedsShares));
    /// ```
    pub fn from_raw(num_shares: Option<i64>, threshold: Option<i64>) -> Result<Self> {
        let (Some(num_shares), Some(threshold)) = (num_shares, threshold) else {
            return Err(Error::InvalidParameters);
        };
        if num_shares < 0 || threshold < 0 {
            return Err(Error::NegativeParameters);
        }
        if num_shares == 0 || threshold == 0 {
            return Err(Error::InvalidParameters);
        }
        if num_shares < threshold {
            return Err(Error::ThresholdExceedsShares);
        }

        let share_count = u8::try_from(num_shares).map_err(|_| Error::InvalidParameters)?;
        let threshold = u8::try_from(threshold).map_err(|_| Error::InvalidParameters)?;

        Self::new(Threshold::new(threshold)?, ShareCount::new(share_count)?)
    }

    /// Gets the threshold value
    #[must_use]
    pub fn threshold(&self) -> Threshold {
        self.threshold
    }

    /// Gets the share count value
    #[must_use]
    pub fn share_count(&self) -> ShareCount {
        self.share_count
    }
}
