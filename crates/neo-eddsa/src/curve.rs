//! Twisted Edwards curve `a·x² + y² = 1 + d·x²·y²`.
//!
//! Only what constant precomputation and witness generation need: affine
//! points and the unified addition law. With `a` square and `d` non-square
//! the law is complete, so doubling reuses it.

use ff::{Field, PrimeField};

#[derive(Clone, Debug, PartialEq, Eq)]
pub struct CurveParams<F: PrimeField> {
    pub a: F,
    pub d: F,
    /// Generator of the prime-order subgroup used for signing.
    pub base: EdwardsPoint<F>,
    /// Order of that subgroup, little-endian bits without leading zeros.
    pub order: Option<Vec<bool>>,
}

/// Affine point with coordinates in the circuit field.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct EdwardsPoint<F: PrimeField> {
    pub x: F,
    pub y: F,
}

impl<F: PrimeField> EdwardsPoint<F> {
    pub fn new(x: F, y: F) -> Self {
        Self { x, y }
    }

    /// The neutral element `(0, 1)`.
    pub fn identity() -> Self {
        Self { x: F::ZERO, y: F::ONE }
    }

    pub fn is_identity(&self) -> bool {
        *self == Self::identity()
    }

    pub fn is_on_curve(&self, curve: &CurveParams<F>) -> bool {
        let x2 = self.x.square();
        let y2 = self.y.square();
        curve.a * x2 + y2 == F::ONE + curve.d * x2 * y2
    }

    /// Unified addition. A vanishing denominator (possible only off-curve or
    /// for incomplete parameters) yields a zero coordinate.
    pub fn add(&self, other: &Self, curve: &CurveParams<F>) -> Self {
        let beta = self.x * other.y;
        let gamma = self.y * other.x;
        let delta = self.y * other.y;
        let epsilon = self.x * other.x;
        let tau = curve.d * delta * epsilon;
        Self {
            x: (beta + gamma) * invert_or_zero(F::ONE + tau),
            y: (delta - curve.a * epsilon) * invert_or_zero(F::ONE - tau),
        }
    }

    pub fn double(&self, curve: &CurveParams<F>) -> Self {
        self.add(self, curve)
    }

    /// `k · self` for `k = Σ 2^i bits[i]`.
    pub fn mul_le_bits<I>(&self, bits: I, curve: &CurveParams<F>) -> Self
    where
        I: IntoIterator<Item = bool>,
    {
        let mut acc = Self::identity();
        let mut base = *self;
        for bit in bits {
            if bit {
                acc = acc.add(&base, curve);
            }
            base = base.double(curve);
        }
        acc
    }
}

pub(crate) fn invert_or_zero<F: Field>(value: F) -> F {
    Option::<F>::from(value.invert()).unwrap_or(F::ZERO)
}
