//! Bit gadgets: booleanity and strict field-to-bits decomposition.

use ff::{PrimeField, PrimeFieldBits};

use super::Gadget;
use crate::error::Result;
use crate::r1cs::{pack_bits, Protoboard, Variable, VariableArray};

/// Constrain every wire of a bit-string to {0, 1}.
#[derive(Clone, Debug)]
pub struct Booleanity {
    bits: VariableArray,
    annotation: String,
}

impl Booleanity {
    pub fn new(bits: &VariableArray, annotation: &str) -> Self {
        Self {
            bits: bits.clone(),
            annotation: annotation.to_owned(),
        }
    }
}

impl<F: PrimeField> Gadget<F> for Booleanity {
    fn emit_constraints(&self, pb: &mut Protoboard<F>) -> Result<()> {
        for (i, bit) in self.bits.iter().enumerate() {
            enforce_boolean(pb, bit, &format!("{}[{}]", self.annotation, i))?;
        }
        Ok(())
    }

    /// The bits are inputs; nothing to compute.
    fn compute_witness(&self, _pb: &mut Protoboard<F>) -> Result<()> {
        Ok(())
    }
}

fn enforce_boolean<F: PrimeField>(pb: &mut Protoboard<F>, bit: Variable, label: &str) -> Result<()> {
    pb.enforce(
        || format!("{} boolean", label),
        |lc| lc + bit,
        |lc| lc + Variable::ONE - bit,
        |lc| lc,
    )
}

#[derive(Clone, Copy, Debug)]
struct AndStep {
    left: Variable,
    right: Variable,
    out: Variable,
}

/// Decompose a field wire into `F::NUM_BITS` little-endian bits.
///
/// Strict: besides `Σ 2^i b_i = x`, the bits are forced to encode an integer
/// `≤ p − 1`, so every field element has exactly one accepted decomposition.
/// The comparison walks `p − 1` from the top bit; each maximal run of ones
/// is AND-ed (together with the previous run) and, where `p − 1` has a zero,
/// the candidate bit must be zero whenever that running AND is one.
#[derive(Clone, Debug)]
pub struct FieldToBits {
    input: Variable,
    bits: VariableArray,
    ands: Vec<AndStep>,
    forbidden: Vec<(Variable, Variable)>,
    annotation: String,
}

impl FieldToBits {
    pub fn new<F: PrimeFieldBits>(pb: &mut Protoboard<F>, input: Variable, annotation: &str) -> Self {
        let n = F::NUM_BITS as usize;
        let bits = VariableArray::allocate(pb, n, &format!("{}.bits", annotation));
        let max: Vec<bool> = (-F::ONE).to_le_bits().iter().by_vals().take(n).collect();

        let mut ands = Vec::new();
        let mut forbidden = Vec::new();
        let mut current_run: Vec<Variable> = Vec::new();
        let mut last_run: Option<Variable> = None;

        for i in (0..n).rev() {
            let bit = bits.as_slice()[i];
            if max[i] {
                current_run.push(bit);
                continue;
            }
            if !current_run.is_empty() {
                if let Some(prev) = last_run {
                    current_run.push(prev);
                }
                let mut acc = current_run[0];
                for next in &current_run[1..] {
                    let out = pb.allocate(format!("{}.run_and[{}]", annotation, ands.len()));
                    ands.push(AndStep {
                        left: acc,
                        right: *next,
                        out,
                    });
                    acc = out;
                }
                last_run = Some(acc);
                current_run.clear();
            }
            if let Some(run) = last_run {
                forbidden.push((run, bit));
            }
        }

        Self {
            input,
            bits,
            ands,
            forbidden,
            annotation: annotation.to_owned(),
        }
    }

    pub fn result(&self) -> &VariableArray {
        &self.bits
    }
}

impl<F: PrimeFieldBits> Gadget<F> for FieldToBits {
    fn emit_constraints(&self, pb: &mut Protoboard<F>) -> Result<()> {
        for (i, bit) in self.bits.iter().enumerate() {
            enforce_boolean(pb, bit, &format!("{}.bits[{}]", self.annotation, i))?;
        }

        let packed = pack_bits::<F>(self.bits.as_slice());
        pb.enforce(
            || format!("{}.pack", self.annotation),
            |lc| lc + &packed,
            |lc| lc + Variable::ONE,
            |lc| lc + self.input,
        )?;

        for (i, step) in self.ands.iter().enumerate() {
            pb.enforce(
                || format!("{}.run_and[{}]", self.annotation, i),
                |lc| lc + step.left,
                |lc| lc + step.right,
                |lc| lc + step.out,
            )?;
        }

        for (i, (run, bit)) in self.forbidden.iter().enumerate() {
            pb.enforce(
                || format!("{}.canonical[{}]", self.annotation, i),
                |lc| lc + *run,
                |lc| lc + *bit,
                |lc| lc,
            )?;
        }
        Ok(())
    }

    fn compute_witness(&self, pb: &mut Protoboard<F>) -> Result<()> {
        let value = pb.value_of(self.input)?;
        let bits: Vec<bool> = value
            .to_le_bits()
            .iter()
            .by_vals()
            .take(self.bits.len())
            .collect();
        self.bits.fill_with_bits(pb, &bits)?;

        for step in &self.ands {
            let out = pb.value_of(step.left)? * pb.value_of(step.right)?;
            pb.assign(step.out, out)?;
        }
        Ok(())
    }
}
