//! Property tests for share text decoding

use quickcheck_macros::quickcheck;
use splitkeys::Error;
use splitkeys::codec::Share;
use splitkeys::domain::ShareIndex;

/// Arbitrary text either decodes to a canonical share or is rejected cleanly
#[quickcheck]
fn prop_arbitrary_text_never_panics(text: String) -> bool {
    match text.parse::<Share>() {
        Ok(share) => share.to_string().parse::<Share>() == Ok(share),
        Err(e) => e == Error::InvalidShares,
    }
}

/// Flipping any single bit of an encoded share is detected
#[quickcheck]
fn prop_single_bit_flips_are_detected(
    value: Vec<u8>,
    index: u8,
    position: usize,
    bit: u8,
) -> bool {
    let Ok(index) = ShareIndex::new(index) else {
        return true;
    };
    let Ok(share) = Share::new(index, value) else {
        return true;
    };

    let mut bytes = hex::decode(share.to_string()).unwrap();
    let position = position % bytes.len();
    bytes[position] ^= 1 << (bit % 8);

    hex::encode(bytes).parse::<Share>() == Err(Error::InvalidShares)
}
