//! Gadgets for circuit synthesis
//!
//! This module provides protoboard gadgets for:
//! - Bits (booleanity, strict field-to-bits decomposition)
//! - Twisted Edwards points (validity, addition)
//! - Scalar multiplication (fixed base, variable base, constant scalar)
//! - MiMC hash-to-bits
//!
//! Every gadget follows the same lifecycle: `new` allocates its wires,
//! [`Gadget::emit_constraints`] adds its rows, [`Gadget::compute_witness`]
//! fills its wires from already-assigned inputs. Parents drive children in
//! construction order in both phases.

pub mod bits;
pub mod mimc;
pub mod point;
pub mod scalar_mult;

use ff::PrimeField;

use crate::error::Result;
use crate::r1cs::{Protoboard, Variable, VariablePoint};

pub use bits::{Booleanity, FieldToBits};
pub use mimc::{hash_to_bits, hash_to_field, MimcHashToBits};
pub use point::{PointAdder, PointValidator};
pub use scalar_mult::{ConstantScalarMul, FixedBaseMul, VariableBaseMul};

/// Two-phase capability shared by every gadget.
pub trait Gadget<F: PrimeField> {
    fn emit_constraints(&self, pb: &mut Protoboard<F>) -> Result<()>;

    fn compute_witness(&self, pb: &mut Protoboard<F>) -> Result<()>;
}

/// Gadgets whose output is an affine point.
pub trait PointResult {
    fn result(&self) -> VariablePoint;

    fn result_x(&self) -> Variable {
        self.result().x
    }

    fn result_y(&self) -> Variable {
        self.result().y
    }
}
