use ff::PrimeFieldBits;

use super::RAM_DOMAIN;
use crate::error::Result;
use crate::gadgets::{FieldToBits, Gadget, MimcHashToBits};
use crate::params::EdDsaParams;
use crate::r1cs::{Protoboard, VariableArray, VariablePoint};

/// `H(R.x ∥ A.x ∥ M)` as `F::NUM_BITS` little-endian bits.
///
/// Only the x-coordinates are hashed; both are decomposed strictly so each
/// point has exactly one bit encoding.
#[derive(Clone, Debug)]
pub struct HashRam<'a, F: PrimeFieldBits> {
    r_x: FieldToBits,
    a_x: FieldToBits,
    hash: MimcHashToBits<'a, F>,
}

impl<'a, F: PrimeFieldBits> HashRam<'a, F> {
    pub fn new(
        pb: &mut Protoboard<F>,
        params: &'a EdDsaParams<F>,
        r: VariablePoint,
        a: VariablePoint,
        msg: &VariableArray,
        annotation: &str,
    ) -> Self {
        let r_x = FieldToBits::new(pb, r.x, &format!("{}.R.x", annotation));
        let a_x = FieldToBits::new(pb, a.x, &format!("{}.A.x", annotation));
        let input = VariableArray::flatten(&[r_x.result(), a_x.result(), msg]);
        let hash = MimcHashToBits::new(
            pb,
            &params.hash,
            RAM_DOMAIN,
            &input,
            &format!("{}.hash", annotation),
        );
        Self { r_x, a_x, hash }
    }

    /// The challenge bits.
    pub fn result(&self) -> &VariableArray {
        self.hash.result()
    }
}

impl<'a, F: PrimeFieldBits> Gadget<F> for HashRam<'a, F> {
    fn emit_constraints(&self, pb: &mut Protoboard<F>) -> Result<()> {
        self.r_x.emit_constraints(pb)?;
        self.a_x.emit_constraints(pb)?;
        self.hash.emit_constraints(pb)
    }

    fn compute_witness(&self, pb: &mut Protoboard<F>) -> Result<()> {
        self.r_x.compute_witness(pb)?;
        self.a_x.compute_witness(pb)?;
        self.hash.compute_witness(pb)
    }
}
