//! Variable handles and sparse linear combinations.
//!
//! The operator set mirrors bellpepper's `LinearCombination` so constraint
//! closures read the same way: `|lc| lc + x + (coeff, y) - &other`.

use core::ops::{Add, Sub};
use ff::PrimeField;

/// Opaque handle to a wire on a [`Protoboard`](super::Protoboard).
#[derive(Clone, Copy, Debug, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub struct Variable(pub(crate) usize);

impl Variable {
    /// The constant wire, always assigned 1.
    pub const ONE: Variable = Variable(0);

    pub fn index(self) -> usize {
        self.0
    }
}

/// `Σ coeff_i · var_i`, with constants carried on [`Variable::ONE`].
#[derive(Clone, Debug, Default, PartialEq, Eq)]
pub struct LinearCombination<F: PrimeField> {
    terms: Vec<(Variable, F)>,
}

impl<F: PrimeField> LinearCombination<F> {
    pub fn zero() -> Self {
        Self { terms: Vec::new() }
    }

    pub fn constant(value: F) -> Self {
        Self::zero() + (value, Variable::ONE)
    }

    pub fn terms(&self) -> &[(Variable, F)] {
        &self.terms
    }

    pub fn is_empty(&self) -> bool {
        self.terms.is_empty()
    }

    /// Sort by variable, merge duplicates and drop zero coefficients.
    pub fn compress(mut self) -> Self {
        self.terms.sort_by_key(|(var, _)| *var);
        let mut out: Vec<(Variable, F)> = Vec::with_capacity(self.terms.len());
        for (var, coeff) in self.terms {
            if let Some(last) = out.last_mut() {
                if last.0 == var {
                    last.1 += coeff;
                    if bool::from(last.1.is_zero()) {
                        out.pop();
                    }
                    continue;
                }
            }
            if !bool::from(coeff.is_zero()) {
                out.push((var, coeff));
            }
        }
        Self { terms: out }
    }

    pub fn variables(&self) -> impl Iterator<Item = Variable> + '_ {
        self.terms.iter().map(|(var, _)| *var)
    }
}

impl<F: PrimeField> From<Variable> for LinearCombination<F> {
    fn from(var: Variable) -> Self {
        Self::zero() + var
    }
}

impl<F: PrimeField> Add<Variable> for LinearCombination<F> {
    type Output = Self;

    fn add(mut self, var: Variable) -> Self {
        self.terms.push((var, F::ONE));
        self
    }
}

impl<F: PrimeField> Sub<Variable> for LinearCombination<F> {
    type Output = Self;

    fn sub(mut self, var: Variable) -> Self {
        self.terms.push((var, -F::ONE));
        self
    }
}

impl<F: PrimeField> Add<(F, Variable)> for LinearCombination<F> {
    type Output = Self;

    fn add(mut self, (coeff, var): (F, Variable)) -> Self {
        self.terms.push((var, coeff));
        self
    }
}

impl<F: PrimeField> Sub<(F, Variable)> for LinearCombination<F> {
    type Output = Self;

    fn sub(mut self, (coeff, var): (F, Variable)) -> Self {
        self.terms.push((var, -coeff));
        self
    }
}

impl<F: PrimeField> Add<&LinearCombination<F>> for LinearCombination<F> {
    type Output = Self;

    fn add(mut self, other: &LinearCombination<F>) -> Self {
        self.terms.extend_from_slice(&other.terms);
        self
    }
}

impl<F: PrimeField> Sub<&LinearCombination<F>> for LinearCombination<F> {
    type Output = Self;

    fn sub(mut self, other: &LinearCombination<F>) -> Self {
        self.terms
            .extend(other.terms.iter().map(|(var, coeff)| (*var, -*coeff)));
        self
    }
}

impl<F: PrimeField> Add<(F, &LinearCombination<F>)> for LinearCombination<F> {
    type Output = Self;

    fn add(mut self, (scale, other): (F, &LinearCombination<F>)) -> Self {
        self.terms
            .extend(other.terms.iter().map(|(var, coeff)| (*var, scale * coeff)));
        self
    }
}
