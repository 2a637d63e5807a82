//! Scalar multiplication gadgets.
//!
//! All three walk the scalar from the least significant bit and return an
//! affine [`VariablePoint`]:
//! - [`FixedBaseMul`]: constant base, variable bits (`s·B`)
//! - [`VariableBaseMul`]: variable base, variable bits (`c·A`)
//! - [`ConstantScalarMul`]: variable base, constant bits (`l·R`)

use ff::PrimeField;

use super::point::PointAdder;
use super::{Gadget, PointResult};
use crate::curve::{CurveParams, EdwardsPoint};
use crate::error::{CircuitError, Result};
use crate::r1cs::{Protoboard, Variable, VariableArray, VariablePoint};

/// `Σ b_i · (2^i·B)` for a constant `B`: each bit selects the precomputed
/// power or the identity (2 constraints), then the selections are summed.
#[derive(Clone, Debug)]
pub struct FixedBaseMul<F: PrimeField> {
    bits: VariableArray,
    powers: Vec<EdwardsPoint<F>>,
    selected: Vec<VariablePoint>,
    adders: Vec<PointAdder<F>>,
    annotation: String,
}

impl<F: PrimeField> FixedBaseMul<F> {
    pub fn new(
        pb: &mut Protoboard<F>,
        curve: &CurveParams<F>,
        base: &EdwardsPoint<F>,
        bits: &VariableArray,
        annotation: &str,
    ) -> Result<Self> {
        if bits.is_empty() {
            return Err(CircuitError::EmptyScalar);
        }

        let mut powers = Vec::with_capacity(bits.len());
        let mut power = *base;
        for _ in 0..bits.len() {
            powers.push(power);
            power = power.double(curve);
        }

        let selected: Vec<VariablePoint> = (0..bits.len())
            .map(|i| VariablePoint::allocate(pb, &format!("{}.sel[{}]", annotation, i)))
            .collect();

        let mut adders = Vec::with_capacity(bits.len() - 1);
        let mut acc = selected[0];
        for (i, sel) in selected.iter().enumerate().skip(1) {
            let adder = PointAdder::new(pb, curve, acc, *sel, &format!("{}.add[{}]", annotation, i));
            acc = adder.result();
            adders.push(adder);
        }

        Ok(Self {
            bits: bits.clone(),
            powers,
            selected,
            adders,
            annotation: annotation.to_owned(),
        })
    }
}

impl<F: PrimeField> PointResult for FixedBaseMul<F> {
    fn result(&self) -> VariablePoint {
        self.adders
            .last()
            .map(PointResult::result)
            .unwrap_or(self.selected[0])
    }
}

impl<F: PrimeField> Gadget<F> for FixedBaseMul<F> {
    fn emit_constraints(&self, pb: &mut Protoboard<F>) -> Result<()> {
        for (i, ((bit, power), sel)) in self
            .bits
            .iter()
            .zip(&self.powers)
            .zip(&self.selected)
            .enumerate()
        {
            // sel = bit ? 2^i·B : (0, 1)
            pb.enforce(
                || format!("{}.sel[{}].x", self.annotation, i),
                |lc| lc + bit,
                |lc| lc + (power.x, Variable::ONE),
                |lc| lc + sel.x,
            )?;
            pb.enforce(
                || format!("{}.sel[{}].y", self.annotation, i),
                |lc| lc + bit,
                |lc| lc + (power.y - F::ONE, Variable::ONE),
                |lc| lc + sel.y - Variable::ONE,
            )?;
        }
        for adder in &self.adders {
            adder.emit_constraints(pb)?;
        }
        Ok(())
    }

    fn compute_witness(&self, pb: &mut Protoboard<F>) -> Result<()> {
        for ((bit, power), sel) in self.bits.iter().zip(&self.powers).zip(&self.selected) {
            let b = pb.value_of(bit)?;
            pb.assign(sel.x, b * power.x)?;
            pb.assign(sel.y, F::ONE + b * (power.y - F::ONE))?;
        }
        for adder in &self.adders {
            adder.compute_witness(pb)?;
        }
        Ok(())
    }
}

#[derive(Clone, Debug)]
struct MulStep<F: PrimeField> {
    bit: Variable,
    doubler: PointAdder<F>,
    adder: PointAdder<F>,
    prev: VariablePoint,
    next: VariablePoint,
}

/// Double-and-add over a variable base: per bit one doubling, one addition
/// and a conditional select (16 constraints).
#[derive(Clone, Debug)]
pub struct VariableBaseMul<F: PrimeField> {
    base: VariablePoint,
    first_bit: Variable,
    first: VariablePoint,
    steps: Vec<MulStep<F>>,
    annotation: String,
}

impl<F: PrimeField> VariableBaseMul<F> {
    pub fn new(
        pb: &mut Protoboard<F>,
        curve: &CurveParams<F>,
        base: VariablePoint,
        bits: &VariableArray,
        annotation: &str,
    ) -> Result<Self> {
        let (&first_bit, rest) = bits
            .as_slice()
            .split_first()
            .ok_or(CircuitError::EmptyScalar)?;
        let first = VariablePoint::allocate(pb, &format!("{}.acc[0]", annotation));

        let mut steps = Vec::with_capacity(rest.len());
        let mut power = base;
        let mut acc = first;
        for (i, &bit) in rest.iter().enumerate() {
            let i = i + 1;
            let doubler = PointAdder::new(pb, curve, power, power, &format!("{}.double[{}]", annotation, i));
            power = doubler.result();
            let adder = PointAdder::new(pb, curve, acc, power, &format!("{}.add[{}]", annotation, i));
            let next = VariablePoint::allocate(pb, &format!("{}.acc[{}]", annotation, i));
            steps.push(MulStep {
                bit,
                doubler,
                adder,
                prev: acc,
                next,
            });
            acc = next;
        }

        Ok(Self {
            base,
            first_bit,
            first,
            steps,
            annotation: annotation.to_owned(),
        })
    }
}

impl<F: PrimeField> PointResult for VariableBaseMul<F> {
    fn result(&self) -> VariablePoint {
        self.steps.last().map(|step| step.next).unwrap_or(self.first)
    }
}

impl<F: PrimeField> Gadget<F> for VariableBaseMul<F> {
    fn emit_constraints(&self, pb: &mut Protoboard<F>) -> Result<()> {
        let (bit, base, first) = (self.first_bit, self.base, self.first);
        pb.enforce(
            || format!("{}.acc[0].x", self.annotation),
            |lc| lc + bit,
            |lc| lc + base.x,
            |lc| lc + first.x,
        )?;
        pb.enforce(
            || format!("{}.acc[0].y", self.annotation),
            |lc| lc + bit,
            |lc| lc + base.y - Variable::ONE,
            |lc| lc + first.y - Variable::ONE,
        )?;

        for (i, step) in self.steps.iter().enumerate() {
            step.doubler.emit_constraints(pb)?;
            step.adder.emit_constraints(pb)?;

            // next = prev + bit·(sum − prev)
            let sum = step.adder.result();
            let (prev, next) = (step.prev, step.next);
            pb.enforce(
                || format!("{}.acc[{}].x", self.annotation, i + 1),
                |lc| lc + step.bit,
                |lc| lc + sum.x - prev.x,
                |lc| lc + next.x - prev.x,
            )?;
            pb.enforce(
                || format!("{}.acc[{}].y", self.annotation, i + 1),
                |lc| lc + step.bit,
                |lc| lc + sum.y - prev.y,
                |lc| lc + next.y - prev.y,
            )?;
        }
        Ok(())
    }

    fn compute_witness(&self, pb: &mut Protoboard<F>) -> Result<()> {
        let base = self.base.value(pb)?;
        let first = if is_set(pb, self.first_bit)? {
            base
        } else {
            EdwardsPoint::identity()
        };
        self.first.assign(pb, &first)?;

        for step in &self.steps {
            step.doubler.compute_witness(pb)?;
            step.adder.compute_witness(pb)?;
            let chosen = if is_set(pb, step.bit)? {
                step.adder.result()
            } else {
                step.prev
            };
            let value = chosen.value(pb)?;
            step.next.assign(pb, &value)?;
        }
        Ok(())
    }
}

/// Witness-side bit read. Non-boolean inputs are caught by the booleanity
/// rows of whoever owns the bits; here anything non-zero selects.
fn is_set<F: PrimeField>(pb: &Protoboard<F>, bit: Variable) -> Result<bool> {
    Ok(!bool::from(pb.value_of(bit)?.is_zero()))
}

/// `k·P` for a constant scalar `k` (little-endian bits). Only set bits cost
/// an addition; the first set bit costs nothing.
#[derive(Clone, Debug)]
pub struct ConstantScalarMul<F: PrimeField> {
    doublers: Vec<PointAdder<F>>,
    adders: Vec<PointAdder<F>>,
    result: VariablePoint,
}

impl<F: PrimeField> ConstantScalarMul<F> {
    pub fn new(
        pb: &mut Protoboard<F>,
        curve: &CurveParams<F>,
        point: VariablePoint,
        scalar: &[bool],
        annotation: &str,
    ) -> Result<Self> {
        let top = scalar
            .iter()
            .rposition(|bit| *bit)
            .ok_or(CircuitError::EmptyScalar)?;

        let mut doublers = Vec::with_capacity(top);
        let mut adders = Vec::new();
        let mut power = point;
        let mut acc: Option<VariablePoint> = None;
        for (i, &bit) in scalar.iter().enumerate().take(top + 1) {
            if i > 0 {
                let doubler = PointAdder::new(pb, curve, power, power, &format!("{}.double[{}]", annotation, i));
                power = doubler.result();
                doublers.push(doubler);
            }
            if bit {
                acc = Some(match acc {
                    None => power,
                    Some(prev) => {
                        let adder = PointAdder::new(pb, curve, prev, power, &format!("{}.add[{}]", annotation, i));
                        let sum = adder.result();
                        adders.push(adder);
                        sum
                    }
                });
            }
        }

        Ok(Self {
            doublers,
            adders,
            result: acc.unwrap_or(power),
        })
    }
}

impl<F: PrimeField> PointResult for ConstantScalarMul<F> {
    fn result(&self) -> VariablePoint {
        self.result
    }
}

impl<F: PrimeField> Gadget<F> for ConstantScalarMul<F> {
    fn emit_constraints(&self, pb: &mut Protoboard<F>) -> Result<()> {
        for gadget in self.doublers.iter().chain(&self.adders) {
            gadget.emit_constraints(pb)?;
        }
        Ok(())
    }

    /// The doubling chain only depends on the input point, so it is filled
    /// first; each addition then only needs earlier results.
    fn compute_witness(&self, pb: &mut Protoboard<F>) -> Result<()> {
        for gadget in self.doublers.iter().chain(&self.adders) {
            gadget.compute_witness(pb)?;
        }
        Ok(())
    }
}
