//! Property tests for wallet creation and verification

use quickcheck::{Arbitrary, Gen};
use quickcheck_macros::quickcheck;
use splitkeys::domain::{Entropy, ShareCount, SplitConfig, Threshold};
use splitkeys::{create_wallet, signing, sign_message, verify_shares};

/// Non-empty entropy text
#[derive(Clone, Debug)]
struct EntropyText(String);

impl Arbitrary for EntropyText {
    fn arbitrary(g: &mut Gen) -> Self {
        let text = String::arbitrary(g);
        if text.is_empty() {
            EntropyText("x".to_owned())
        } else {
            EntropyText(text)
        }
    }
}

fn config(threshold: u8, num_shares: u8) -> SplitConfig {
    SplitConfig::new(
        Threshold::new(threshold).unwrap(),
        ShareCount::new(num_shares).unwrap(),
    )
    .unwrap()
}

/// Any contiguous threshold-sized window of shares verifies
#[quickcheck]
fn prop_threshold_window_verifies(entropy: EntropyText, start: u8) -> bool {
    let entropy = Entropy::new(&entropy.0).unwrap();
    let wallet = create_wallet(&entropy, config(3, 7)).unwrap();
    let start = usize::from(start % 5);

    verify_shares(&wallet.shares()[start..start + 3], wallet.address()).unwrap()
}

/// A signature from any quorum recovers to the wallet address
#[quickcheck]
fn prop_signature_recovers_wallet_address(entropy: EntropyText, message: String) -> bool {
    let entropy = Entropy::new(&entropy.0).unwrap();
    let wallet = create_wallet(&entropy, config(2, 3)).unwrap();
    let signed = sign_message(&wallet.shares()[1..], &message).unwrap();

    signing::recover_address(&signed).is_ok_and(|a| a == *wallet.address())
}
