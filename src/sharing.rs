//! Shamir secret sharing over GF(2^8)
//!
//! Each byte of the secret is shared with its own random polynomial of degree
//! `threshold - 1`. Share `i` holds the evaluations of every polynomial at
//! x = i, so shares are as long as the secret.
//!
//! Reconstruction interpolates whatever points it is given. It cannot tell
//! whether those points came from the same polynomials or whether there are
//! enough of them: too few or mixed shares yield a wrong secret, not an
//! error. Callers that need to know check the result against something
//! derived from the real secret (see [`crate::wallet::verify_shares`]).

use rand::{CryptoRng, RngCore};
use zeroize::Zeroizing;

use crate::codec::Share;
use crate::domain::{ShareIndex, SplitConfig};
use crate::error::{Error, Result};
use crate::field::{Gf256, Point, Polynomial, interpolate_at_zero};

/// Splits `secret` into shares using the thread-local CSPRNG
///
/// # Errors
/// Returns [`Error::InvalidSecret`] if the secret is empty
pub fn split(secret: &[u8], config: SplitConfig) -> Result<Vec<Share>> {
    split_with_rng(secret, config, &mut rand::rng())
}

/// Splits `secret` into `config.share_count()` shares, any
/// `config.threshold()` of which reconstruct it
///
/// # Errors
/// Returns [`Error::InvalidSecret`] if the secret is empty
pub fn split_with_rng<R: RngCore + CryptoRng + ?Sized>(
    secret: &[u8],
    config: SplitConfig,
    rng: &mut R,
) -> Result<Vec<Share>> {
    if secret.is_empty() {
        return Err(Error::InvalidSecret);
    }

    let degree = config.threshold().degree();
    let xs: Vec<u8> = (1..=*config.share_count()).collect();
    let mut values: Vec<Zeroizing<Vec<u8>>> = xs
        .iter()
        .map(|_| Zeroizing::new(Vec::with_capacity(secret.len())))
        .collect();

    for &byte in secret {
        let poly = Polynomial::random(Gf256::new(byte), degree, rng);
        for (value, &x) in values.iter_mut().zip(&xs) {
            value.push(poly.evaluate(Gf256::new(x)).value());
        }
    }

    xs.into_iter()
        .zip(values)
        .map(|(x, value)| Share::new(ShareIndex::new(x)?, value.to_vec()))
        .collect()
}

/// Reconstructs a secret from shares by interpolating at x = 0
///
/// Byte-identical duplicates count as one point.
///
/// # Errors
/// - [`Error::InvalidShares`] if `shares` is empty or the values differ in length
/// - [`Error::Arithmetic`] if two different values claim the same index
pub fn combine(shares: &[Share]) -> Result<Zeroizing<Vec<u8>>> {
    let Some(first) = shares.first() else {
        return Err(Error::InvalidShares);
    };
    let secret_len = first.value().len();
    if shares.iter().any(|s| s.value().len() != secret_len) {
        tracing::debug!("shares have mismatched lengths");
        return Err(Error::InvalidShares);
    }

    let mut distinct: Vec<&Share> = Vec::with_capacity(shares.len());
    for share in shares {
        if !distinct.contains(&share) {
            distinct.push(share);
        }
    }

    let mut points: Zeroizing<Vec<Point>> =
        Zeroizing::new(vec![(Gf256::ZERO, Gf256::ZERO); distinct.len()]);
    let mut secret = Zeroizing::new(Vec::with_capacity(secret_len));

    for byte_idx in 0..secret_len {
        for (point, share) in points.iter_mut().zip(&distinct) {
            *point = (
                Gf256::new(*share.index()),
                Gf256::new(share.value()[byte_idx]),
            );
        }
        secret.push(interpolate_at_zero(&points)?.value());
    }

    Ok(secret)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::domain::{ShareCount, Threshold};
    use crate::field::ArithmeticError;

    fn config(threshold: u8, shares: u8) -> SplitConfig {
        SplitConfig::new(
            Threshold::new(threshold).unwrap(),
            ShareCount::new(shares).unwrap(),
        )
        .unwrap()
    }

    const SECRET: &[u8] = b"split-keys-test-secret-32-bytes!";

    #[test]
    fn test_split_produces_requested_share_count() {
        let shares = split(SECRET, config(3, 5)).unwrap();
        assert_eq!(shares.len(), 5);
        for (i, share) in shares.iter().enumerate() {
            assert_eq!(usize::from(*share.index()), i + 1);
            assert_eq!(share.value().len(), SECRET.len());
        }
    }

    #[test]
    fn test_every_threshold_subset_recovers_secret() {
        let shares = split(SECRET, config(3, 5)).unwrap();
        for a in 0..5 {
            for b in (a + 1)..5 {
                for c in (b + 1)..5 {
                    let subset = [shares[a].clone(), shares[b].clone(), shares[c].clone()];
                    let recovered = combine(&subset).unwrap();
                    assert_eq!(recovered.as_slice(), SECRET, "subset {a},{b},{c}");
                }
            }
        }
    }

    #[test]
    fn test_more_than_threshold_recovers_secret() {
        let shares = split(SECRET, config(2, 4)).unwrap();
        let recovered = combine(&shares).unwrap();
        assert_eq!(recovered.as_slice(), SECRET);
    }

    #[test]
    fn test_threshold_one_shares_are_copies() {
        let shares = split(SECRET, config(1, 3)).unwrap();
        for share in &shares {
            assert_eq!(share.value(), SECRET);
            assert_eq!(
                combine(std::slice::from_ref(share)).unwrap().as_slice(),
                SECRET
            );
        }
    }

    #[test]
    fn test_insufficient_shares_give_wrong_secret() {
        let shares = split(SECRET, config(3, 5)).unwrap();
        let recovered = combine(&shares[..2]).unwrap();
        assert_ne!(recovered.as_slice(), SECRET);
    }

    #[test]
    fn test_duplicate_shares_collapse_to_one_point() {
        let shares = split(SECRET, config(3, 5)).unwrap();
        let repeated = [shares[0].clone(), shares[0].clone(), shares[0].clone()];
        let recovered = combine(&repeated).unwrap();
        // A single point interpolates to a constant: the share's own value
        assert_eq!(recovered.as_slice(), shares[0].value());
    }

    #[test]
    fn test_conflicting_index_is_arithmetic_error() {
        let a = split(SECRET, config(2, 3)).unwrap();
        let b = split(SECRET, config(2, 3)).unwrap();
        let result = combine(&[a[0].clone(), b[0].clone()]);
        assert_eq!(
            result.map(|s| s.to_vec()),
            Err(Error::Arithmetic(ArithmeticError::DuplicatePoint(1)))
        );
    }

    #[test]
    fn test_combine_rejects_empty_input() {
        assert_eq!(combine(&[]).map(|s| s.to_vec()), Err(Error::InvalidShares));
    }

    #[test]
    fn test_combine_rejects_mismatched_lengths() {
        let long = split(SECRET, config(2, 2)).unwrap();
        let short = split(b"short", config(2, 2)).unwrap();
        let result = combine(&[long[0].clone(), short[1].clone()]);
        assert_eq!(result.map(|s| s.to_vec()), Err(Error::InvalidShares));
    }

    #[test]
    fn test_split_rejects_empty_secret() {
        assert_eq!(split(&[], config(2, 3)).err(), Some(Error::InvalidSecret));
    }

    #[test]
    fn test_split_uses_fresh_randomness() {
        let a = split(SECRET, config(2, 3)).unwrap();
        let b = split(SECRET, config(2, 3)).unwrap();
        assert_ne!(a[0].value(), b[0].value());
    }
}
