//! Property tests for GF(2^8) arithmetic

use quickcheck_macros::quickcheck;
use splitkeys::field::{Gf256, Polynomial, interpolate_at_zero};

#[quickcheck]
fn prop_multiplication_commutes(a: u8, b: u8) -> bool {
    Gf256::new(a) * Gf256::new(b) == Gf256::new(b) * Gf256::new(a)
}

#[quickcheck]
fn prop_multiplication_distributes(a: u8, b: u8, c: u8) -> bool {
    let (a, b, c) = (Gf256::new(a), Gf256::new(b), Gf256::new(c));
    a * (b + c) == a * b + a * c
}

#[quickcheck]
fn prop_every_nonzero_element_has_inverse(a: u8) -> bool {
    let a = Gf256::new(a);
    match a.inverse() {
        Ok(inv) => a * inv == Gf256::ONE,
        Err(_) => a == Gf256::ZERO,
    }
}

/// Interpolating degree+1 distinct points of a polynomial yields its constant
#[quickcheck]
fn prop_interpolation_recovers_constant(coefficients: Vec<u8>, offset: u8) -> bool {
    if coefficients.is_empty() || coefficients.len() > 64 {
        return true;
    }
    let coefficients: Vec<Gf256> = coefficients.iter().copied().map(Gf256::new).collect();
    let constant = coefficients[0];
    let poly = Polynomial::from_coefficients(coefficients);

    // Distinct non-zero x coordinates starting at an arbitrary offset
    let points: Vec<_> = (0..=poly.degree())
        .map(|i| {
            let x = (usize::from(offset) + i) % 255 + 1;
            let x = Gf256::new(u8::try_from(x).unwrap_or_else(|_| unreachable!("x <= 255")));
            (x, poly.evaluate(x))
        })
        .collect();

    interpolate_at_zero(&points) == Ok(constant)
}
