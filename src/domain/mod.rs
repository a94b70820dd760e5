//! Domain types for wallet share splitting
//!
//! This module contains validated newtypes parsed once at the boundary:
//! - [`Entropy`] - Non-empty caller-supplied entropy
//! - [`Threshold`] - Minimum shares required for reconstruction (1..=255)
//! - [`ShareIndex`] - Share x coordinate (1..=255)
//! - [`ShareCount`] - Total number of shares to create (1..=255)
//! - [`SplitConfig`] - Validated threshold and share count pair

mod config;
mod entropy;
mod share_count;
mod share_index;
mod threshold;

pub use config::SplitConfig;
pub use entropy::Entropy;
pub use share_count::ShareCount;
pub use share_index::ShareIndex;
pub use threshold::Threshold;
