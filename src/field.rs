//! Arithmetic in GF(2^8) and polynomials over it
//!
//! The field uses the AES reduction polynomial `x^8 + x^4 + x^3 + x + 1`
//! with generator 3. Multiplication and inversion go through log/exp tables
//! built at compile time.
//!
//! None of this is constant time. Table lookups are indexed by secret data.

use std::ops::{Add, Mul, Sub};

use rand::{CryptoRng, RngCore};
use zeroize::{Zeroize, Zeroizing};

/// Degenerate inputs to field operations
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum ArithmeticError {
    #[error("zero has no multiplicative inverse")]
    ZeroInverse,

    #[error("duplicate interpolation point at x = {0}")]
    DuplicatePoint(u8),

    #[error("interpolation requires at least one point")]
    NoPoints,
}

const fn build_tables() -> ([u8; 256], [u8; 256]) {
    let mut exp = [0u8; 256];
    let mut log = [0u8; 256];
    let mut x: u8 = 1;
    let mut i = 0;
    while i < 255 {
        exp[i] = x;
        log[x as usize] = i as u8;
        // x * 3 == (x * 2) ^ x
        let mut doubled = x << 1;
        if x & 0x80 != 0 {
            doubled ^= 0x1b;
        }
        x = doubled ^ x;
        i += 1;
    }
    exp[255] = exp[0];
    (exp, log)
}

const TABLES: ([u8; 256], [u8; 256]) = build_tables();
const EXP: [u8; 256] = TABLES.0;
const LOG: [u8; 256] = TABLES.1;

/// An element of GF(2^8)
///
/// Elements are secret bytes or their shares, so `Debug` does not print them.
#[derive(Clone, Copy, Default, PartialEq, Eq, Zeroize)]
pub struct Gf256(u8);

/// (x, y) pair on a polynomial
pub type Point = (Gf256, Gf256);

impl Gf256 {
    /// Additive identity
    pub const ZERO: Self = Self(0);

    /// Multiplicative identity
    pub const ONE: Self = Self(1);

    #[must_use]
    pub const fn new(value: u8) -> Self {
        Self(value)
    }

    #[must_use]
    pub const fn value(self) -> u8 {
        self.0
    }

    /// Draws a uniformly random element
    pub fn random<R: RngCore + CryptoRng + ?Sized>(rng: &mut R) -> Self {
        let mut byte = [0u8; 1];
        rng.fill_bytes(&mut byte);
        Self(byte[0])
    }

    /// Multiplicative inverse
    ///
    /// # Errors
    /// Returns [`ArithmeticError::ZeroInverse`] for the zero element
    pub fn inverse(self) -> Result<Self, ArithmeticError> {
        if self.0 == 0 {
            return Err(ArithmeticError::ZeroInverse);
        }
        let log = usize::from(LOG[usize::from(self.0)]);
        Ok(Self(EXP[(255 - log) % 255]))
    }
}

impl std::fmt::Debug for Gf256 {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str("Gf256(<redacted>)")
    }
}

impl Add for Gf256 {
    type Output = Self;

    #[allow(
        clippy::suspicious_arithmetic_impl,
        reason = "addition in characteristic 2 is XOR"
    )]
    fn add(self, rhs: Self) -> Self {
        Self(self.0 ^ rhs.0)
    }
}

impl Sub for Gf256 {
    type Output = Self;

    #[allow(
        clippy::suspicious_arithmetic_impl,
        reason = "subtraction in characteristic 2 is XOR"
    )]
    fn sub(self, rhs: Self) -> Self {
        Self(self.0 ^ rhs.0)
    }
}

impl Mul for Gf256 {
    type Output = Self;

    fn mul(self, rhs: Self) -> Self {
        if self.0 == 0 || rhs.0 == 0 {
            return Self::ZERO;
        }
        let sum = usize::from(LOG[usize::from(self.0)]) + usize::from(LOG[usize::from(rhs.0)]);
        Self(EXP[sum % 255])
    }
}

/// Polynomial with coefficients in GF(2^8), constant term first
///
/// Coefficients are wiped when the polynomial is dropped.
pub struct Polynomial {
    coefficients: Zeroizing<Vec<Gf256>>,
}

impl Polynomial {
    /// Builds a polynomial of the given degree with `constant` as its constant
    /// term and every other coefficient drawn from `rng`
    pub fn random<R: RngCore + CryptoRng + ?Sized>(
        constant: Gf256,
        degree: usize,
        rng: &mut R,
    ) -> Self {
        let mut coefficients = Zeroizing::new(Vec::with_capacity(degree + 1));
        coefficients.push(constant);
        for _ in 0..degree {
            coefficients.push(Gf256::random(rng));
        }
        Self { coefficients }
    }

    #[must_use]
    pub fn from_coefficients(coefficients: Vec<Gf256>) -> Self {
        Self {
            coefficients: Zeroizing::new(coefficients),
        }
    }

    #[must_use]
    pub fn degree(&self) -> usize {
        self.coefficients.len().saturating_sub(1)
    }

    /// Evaluates the polynomial at `x` using Horner's rule
    #[must_use]
    pub fn evaluate(&self, x: Gf256) -> Gf256 {
        self.coefficients
            .iter()
            .rev()
            .fold(Gf256::ZERO, |acc, &c| acc * x + c)
    }
}

/// Lagrange interpolation of the polynomial through `points`, evaluated at x = 0
///
/// # Errors
/// Fails on an empty point set or when two points share an x coordinate
pub fn interpolate_at_zero(points: &[Point]) -> Result<Gf256, ArithmeticError> {
    if points.is_empty() {
        return Err(ArithmeticError::NoPoints);
    }

    for (i, (xi, _)) in points.iter().enumerate() {
        if points[..i].iter().any(|(xj, _)| xj == xi) {
            return Err(ArithmeticError::DuplicatePoint(xi.value()));
        }
    }

    let mut result = Gf256::ZERO;
    for (i, &(xi, yi)) in points.iter().enumerate() {
        let mut basis = Gf256::ONE;
        for (j, &(xj, _)) in points.iter().enumerate() {
            if i == j {
                continue;
            }
            // (0 - xj) / (xi - xj), signs vanish in characteristic 2
            basis = basis * xj * (xi - xj).inverse()?;
        }
        result = result + yi * basis;
    }

    Ok(result)
}
