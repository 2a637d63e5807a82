//! The protoboard: variables, constraints and the current witness.
//!
//! Gadgets declare wires with [`Protoboard::allocate`], add `<a>·<b> = <c>`
//! rows with [`Protoboard::enforce`] and fill values with
//! [`Protoboard::assign`]. The three steps are independent, so one board can
//! be compiled once and re-witnessed for every signature.
//!
//! [`Protoboard::synthesize_into`] replays the board into any bellpepper
//! `ConstraintSystem`, which is how the circuit reaches a prover (and how the
//! tests cross-check satisfiability with `TestConstraintSystem`).

use bellpepper_core::{Circuit, ConstraintSystem, SynthesisError};
use ff::PrimeField;
use tracing::debug;

use super::lc::{LinearCombination, Variable};
use crate::error::{CircuitError, Result};

/// A single R1CS row `<a, z> * <b, z> = <c, z>`.
#[derive(Clone, Debug)]
pub struct Constraint<F: PrimeField> {
    pub a: LinearCombination<F>,
    pub b: LinearCombination<F>,
    pub c: LinearCombination<F>,
    pub annotation: String,
}

#[derive(Clone, Debug)]
struct VariableInfo {
    annotation: String,
    public: bool,
}

/// Handle recording whether a gadget has emitted its constraints on the
/// board it was built on.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct EmissionMark(usize);

#[derive(Clone, Debug)]
pub struct Protoboard<F: PrimeField> {
    variables: Vec<VariableInfo>,
    values: Vec<Option<F>>,
    constraints: Vec<Constraint<F>>,
    emitted: Vec<bool>,
}

impl<F: PrimeField> Default for Protoboard<F> {
    fn default() -> Self {
        Self::new()
    }
}

impl<F: PrimeField> Protoboard<F> {
    pub fn new() -> Self {
        Self {
            variables: vec![VariableInfo {
                annotation: "ONE".into(),
                public: true,
            }],
            values: vec![Some(F::ONE)],
            constraints: Vec::new(),
            emitted: Vec::new(),
        }
    }

    pub fn one() -> Variable {
        Variable::ONE
    }

    /// Declare a private (auxiliary) wire.
    pub fn allocate(&mut self, annotation: impl Into<String>) -> Variable {
        self.push_variable(annotation.into(), false)
    }

    /// Declare a public-input wire.
    pub fn allocate_input(&mut self, annotation: impl Into<String>) -> Variable {
        self.push_variable(annotation.into(), true)
    }

    fn push_variable(&mut self, annotation: String, public: bool) -> Variable {
        let var = Variable(self.variables.len());
        self.variables.push(VariableInfo { annotation, public });
        self.values.push(None);
        var
    }

    /// Add the constraint `a * b = c`.
    pub fn enforce<A, AR, LA, LB, LC>(&mut self, annotation: A, a: LA, b: LB, c: LC) -> Result<()>
    where
        A: FnOnce() -> AR,
        AR: Into<String>,
        LA: FnOnce(LinearCombination<F>) -> LinearCombination<F>,
        LB: FnOnce(LinearCombination<F>) -> LinearCombination<F>,
        LC: FnOnce(LinearCombination<F>) -> LinearCombination<F>,
    {
        let a = a(LinearCombination::zero()).compress();
        let b = b(LinearCombination::zero()).compress();
        let c = c(LinearCombination::zero()).compress();
        for var in a.variables().chain(b.variables()).chain(c.variables()) {
            self.check(var)?;
        }
        self.constraints.push(Constraint {
            a,
            b,
            c,
            annotation: annotation().into(),
        });
        Ok(())
    }

    pub fn assign(&mut self, var: Variable, value: F) -> Result<()> {
        self.check(var)?;
        if var == Variable::ONE {
            return Err(CircuitError::ConstantAssignment);
        }
        self.values[var.0] = Some(value);
        Ok(())
    }

    pub fn value_of(&self, var: Variable) -> Result<F> {
        self.check(var)?;
        self.values[var.0].ok_or_else(|| CircuitError::UnassignedVariable {
            index: var.0,
            annotation: self.variables[var.0].annotation.clone(),
        })
    }

    /// Evaluate a linear combination under the current witness.
    pub fn eval(&self, lc: &LinearCombination<F>) -> Result<F> {
        lc.terms().iter().try_fold(F::ZERO, |acc, (var, coeff)| {
            Ok(acc + *coeff * self.value_of(*var)?)
        })
    }

    /// Register a gadget whose witness pass must follow its emission.
    pub fn track_emission(&mut self) -> EmissionMark {
        self.emitted.push(false);
        EmissionMark(self.emitted.len() - 1)
    }

    pub fn mark_emitted(&mut self, mark: EmissionMark) -> Result<()> {
        let slot = self
            .emitted
            .get_mut(mark.0)
            .ok_or(CircuitError::UnknownEmissionMark { index: mark.0 })?;
        *slot = true;
        Ok(())
    }

    /// Fails with [`CircuitError::ConstraintsNotEmitted`] unless `mark` was
    /// passed to [`mark_emitted`](Self::mark_emitted).
    pub fn require_emitted(&self, mark: EmissionMark, annotation: &str) -> Result<()> {
        match self.emitted.get(mark.0) {
            Some(true) => Ok(()),
            Some(false) => Err(CircuitError::ConstraintsNotEmitted {
                annotation: annotation.to_owned(),
            }),
            None => Err(CircuitError::UnknownEmissionMark { index: mark.0 }),
        }
    }

    /// Drop every witness value except the constant ONE.
    pub fn clear_witness(&mut self) {
        for value in self.values.iter_mut().skip(1) {
            *value = None;
        }
    }

    pub fn assignment(&self) -> &[Option<F>] {
        &self.values
    }

    pub fn annotation(&self, var: Variable) -> Result<&str> {
        self.check(var)?;
        Ok(&self.variables[var.0].annotation)
    }

    /// Number of wires, including the constant ONE.
    pub fn num_variables(&self) -> usize {
        self.variables.len()
    }

    /// Number of public wires, including the constant ONE.
    pub fn num_inputs(&self) -> usize {
        self.variables.iter().filter(|info| info.public).count()
    }

    pub fn num_constraints(&self) -> usize {
        self.constraints.len()
    }

    pub fn constraints(&self) -> &[Constraint<F>] {
        &self.constraints
    }

    fn check(&self, var: Variable) -> Result<()> {
        if var.0 >= self.variables.len() {
            return Err(CircuitError::UnknownVariable { index: var.0 });
        }
        Ok(())
    }

    fn row_holds(&self, row: &Constraint<F>) -> Result<bool> {
        let a = self.eval(&row.a)?;
        let b = self.eval(&row.b)?;
        let c = self.eval(&row.c)?;
        Ok(a * b == c)
    }

    /// Every constraint holds under the current witness. Missing values
    /// count as unsatisfied.
    pub fn is_satisfied(&self) -> bool {
        self.which_is_unsatisfied().is_none()
    }

    /// Annotation of the first constraint that fails (or cannot be evaluated).
    pub fn which_is_unsatisfied(&self) -> Option<&str> {
        self.constraints
            .iter()
            .find(|row| !matches!(self.row_holds(row), Ok(true)))
            .map(|row| row.annotation.as_str())
    }

    /// Like [`is_satisfied`](Self::is_satisfied), but reports which row
    /// failed and distinguishes a missing witness value from a violated row.
    pub fn check_satisfied(&self) -> Result<()> {
        for (index, row) in self.constraints.iter().enumerate() {
            if !self.row_holds(row)? {
                debug!(
                    index,
                    annotation = %row.annotation,
                    "[r1cs] first failing constraint"
                );
                return Err(CircuitError::Unsatisfied {
                    index,
                    annotation: row.annotation.clone(),
                });
            }
        }
        Ok(())
    }

    /// Replay all wires and constraints into a bellpepper constraint system.
    ///
    /// Names are prefixed with the wire/row index so they are unique, and
    /// path separators are stripped.
    pub fn synthesize_into<CS: ConstraintSystem<F>>(
        &self,
        cs: &mut CS,
    ) -> core::result::Result<(), SynthesisError> {
        let mut wires = Vec::with_capacity(self.variables.len());
        wires.push(CS::one());
        for (idx, info) in self.variables.iter().enumerate().skip(1) {
            let value = self.values[idx];
            let name = || format!("v{}_{}", idx, sanitize(&info.annotation));
            let witness = || value.ok_or(SynthesisError::AssignmentMissing);
            let wire = if info.public {
                cs.alloc_input(name, witness)?
            } else {
                cs.alloc(name, witness)?
            };
            wires.push(wire);
        }

        let lower = |lc: bellpepper_core::LinearCombination<F>, row: &LinearCombination<F>| {
            row.terms()
                .iter()
                .fold(lc, |lc, (var, coeff)| lc + (*coeff, wires[var.0]))
        };
        for (idx, row) in self.constraints.iter().enumerate() {
            cs.enforce(
                || format!("c{}_{}", idx, sanitize(&row.annotation)),
                |lc| lower(lc, &row.a),
                |lc| lower(lc, &row.b),
                |lc| lower(lc, &row.c),
            );
        }
        Ok(())
    }
}

impl<F: PrimeField> Circuit<F> for Protoboard<F> {
    fn synthesize<CS: ConstraintSystem<F>>(
        self,
        cs: &mut CS,
    ) -> core::result::Result<(), SynthesisError> {
        self.synthesize_into(cs)
    }
}

fn sanitize(annotation: &str) -> String {
    annotation.replace('/', "_")
}
