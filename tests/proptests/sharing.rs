//! Property tests for split/combine workflows

use quickcheck::{Arbitrary, Gen};
use quickcheck_macros::quickcheck;
use splitkeys::domain::{ShareCount, SplitConfig, Threshold};
use splitkeys::sharing::{combine, split};

/// Non-empty secret of up to 64 bytes
#[derive(Clone, Debug)]
struct Secret(Vec<u8>);

impl Arbitrary for Secret {
    fn arbitrary(g: &mut Gen) -> Self {
        let len = usize::from(u8::arbitrary(g) % 64) + 1;
        Secret((0..len).map(|_| u8::arbitrary(g)).collect())
    }
}

/// Wrapper for valid threshold and share count pairs
#[derive(Clone, Copy, Debug)]
struct ValidShamirParams {
    threshold: u8,
    num_shares: u8,
}

impl ValidShamirParams {
    fn config(self) -> SplitConfig {
        SplitConfig::new(
            Threshold::new(self.threshold).unwrap(),
            ShareCount::new(self.num_shares).unwrap(),
        )
        .unwrap()
    }
}

impl Arbitrary for ValidShamirParams {
    fn arbitrary(g: &mut Gen) -> Self {
        // Keep share counts small enough for fast runs
        let num_shares = (u8::arbitrary(g) % 20) + 1; // 1..=20
        let threshold = (u8::arbitrary(g) % num_shares) + 1; // 1..=num_shares

        ValidShamirParams {
            threshold,
            num_shares,
        }
    }
}

/// Picks `count` distinct positions out of `len`, driven by `seed`
fn select(len: usize, count: usize, seed: u64) -> Vec<usize> {
    let mut indices: Vec<usize> = (0..len).collect();
    let mut seed = seed;
    for i in 0..count {
        seed = seed.wrapping_mul(6_364_136_223_846_793_005).wrapping_add(1);
        let range = u64::try_from(len - i).unwrap_or_else(|_| unreachable!("len fits in u64"));
        let offset = usize::try_from((seed >> 33) % range)
            .unwrap_or_else(|_| unreachable!("offset < range fits in usize"));
        indices.swap(i, i + offset);
    }
    indices.truncate(count);
    indices
}

#[quickcheck]
fn prop_split_produces_requested_shares(secret: Secret, params: ValidShamirParams) -> bool {
    let shares = split(&secret.0, params.config()).unwrap();
    shares.len() == usize::from(params.num_shares)
        && shares
            .iter()
            .enumerate()
            .all(|(i, s)| usize::from(*s.index()) == i + 1 && s.value().len() == secret.0.len())
}

#[quickcheck]
fn prop_random_share_selection_works(
    secret: Secret,
    params: ValidShamirParams,
    selection_seed: u64,
) -> bool {
    let shares = split(&secret.0, params.config()).unwrap();
    let chosen: Vec<_> = select(shares.len(), usize::from(params.threshold), selection_seed)
        .into_iter()
        .map(|i| shares[i].clone())
        .collect();

    combine(&chosen).is_ok_and(|recovered| recovered.as_slice() == secret.0.as_slice())
}

#[quickcheck]
fn prop_more_than_threshold_also_works(secret: Secret, params: ValidShamirParams) -> bool {
    let shares = split(&secret.0, params.config()).unwrap();
    combine(&shares).is_ok_and(|recovered| recovered.as_slice() == secret.0.as_slice())
}

/// Below the threshold the result is unrelated to the secret
///
/// Single-byte secrets are skipped: a wrong guess matches them 1 time in 256.
#[quickcheck]
fn prop_insufficient_shares_do_not_recover(secret: Secret, params: ValidShamirParams) -> bool {
    if params.threshold < 2 || secret.0.len() < 8 {
        return true;
    }
    let shares = split(&secret.0, params.config()).unwrap();
    let insufficient = &shares[..usize::from(params.threshold) - 1];

    combine(insufficient).is_ok_and(|recovered| recovered.as_slice() != secret.0.as_slice())
}
