//! Typed bundles of wires: bit-strings and affine points.

use ff::PrimeField;

use super::lc::{LinearCombination, Variable};
use super::protoboard::Protoboard;
use crate::curve::EdwardsPoint;
use crate::error::{CircuitError, Result};

/// Ordered bit wires, little-endian.
#[derive(Clone, Debug, Default, PartialEq, Eq)]
pub struct VariableArray(Vec<Variable>);

impl VariableArray {
    pub fn new(vars: Vec<Variable>) -> Self {
        Self(vars)
    }

    pub fn allocate<F: PrimeField>(pb: &mut Protoboard<F>, len: usize, annotation: &str) -> Self {
        Self(
            (0..len)
                .map(|i| pb.allocate(format!("{}[{}]", annotation, i)))
                .collect(),
        )
    }

    pub fn allocate_input<F: PrimeField>(
        pb: &mut Protoboard<F>,
        len: usize,
        annotation: &str,
    ) -> Self {
        Self(
            (0..len)
                .map(|i| pb.allocate_input(format!("{}[{}]", annotation, i)))
                .collect(),
        )
    }

    /// Concatenate in the given order.
    pub fn flatten(parts: &[&VariableArray]) -> Self {
        Self(parts.iter().flat_map(|part| part.0.iter().copied()).collect())
    }

    pub fn len(&self) -> usize {
        self.0.len()
    }

    pub fn is_empty(&self) -> bool {
        self.0.is_empty()
    }

    pub fn iter(&self) -> impl Iterator<Item = Variable> + '_ {
        self.0.iter().copied()
    }

    pub fn as_slice(&self) -> &[Variable] {
        &self.0
    }

    pub fn fill_with_bits<F: PrimeField>(&self, pb: &mut Protoboard<F>, bits: &[bool]) -> Result<()> {
        if bits.len() != self.0.len() {
            return Err(CircuitError::LengthMismatch {
                what: "bit assignment",
                expected: self.0.len(),
                actual: bits.len(),
            });
        }
        for (var, bit) in self.0.iter().zip(bits) {
            pb.assign(*var, if *bit { F::ONE } else { F::ZERO })?;
        }
        Ok(())
    }

    /// Read the assigned bits back. Any value other than 0 reads as 1.
    pub fn get_bits<F: PrimeField>(&self, pb: &Protoboard<F>) -> Result<Vec<bool>> {
        self.0
            .iter()
            .map(|var| Ok(!bool::from(pb.value_of(*var)?.is_zero())))
            .collect()
    }
}

/// `Σ 2^i · bits[i]`.
pub fn pack_bits<F: PrimeField>(bits: &[Variable]) -> LinearCombination<F> {
    let mut coeff = F::ONE;
    let mut lc = LinearCombination::zero();
    for bit in bits {
        lc = lc + (coeff, *bit);
        coeff = coeff.double();
    }
    lc
}

/// Affine point wires. Every point-producing gadget in the crate returns
/// this representation, so two results can be compared coordinate-wise.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct VariablePoint {
    pub x: Variable,
    pub y: Variable,
}

impl VariablePoint {
    pub fn new(x: Variable, y: Variable) -> Self {
        Self { x, y }
    }

    pub fn allocate<F: PrimeField>(pb: &mut Protoboard<F>, annotation: &str) -> Self {
        Self {
            x: pb.allocate(format!("{}.x", annotation)),
            y: pb.allocate(format!("{}.y", annotation)),
        }
    }

    pub fn allocate_input<F: PrimeField>(pb: &mut Protoboard<F>, annotation: &str) -> Self {
        Self {
            x: pb.allocate_input(format!("{}.x", annotation)),
            y: pb.allocate_input(format!("{}.y", annotation)),
        }
    }

    pub fn assign<F: PrimeField>(&self, pb: &mut Protoboard<F>, point: &EdwardsPoint<F>) -> Result<()> {
        pb.assign(self.x, point.x)?;
        pb.assign(self.y, point.y)
    }

    pub fn value<F: PrimeField>(&self, pb: &Protoboard<F>) -> Result<EdwardsPoint<F>> {
        Ok(EdwardsPoint::new(pb.value_of(self.x)?, pb.value_of(self.y)?))
    }
}
