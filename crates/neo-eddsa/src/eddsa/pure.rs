use ff::PrimeFieldBits;
use tracing::debug;

use super::hash_ram::HashRam;
use crate::curve::EdwardsPoint;
use crate::error::{CircuitError, ParamsError, Result};
use crate::gadgets::{
    Booleanity, FixedBaseMul, Gadget, PointAdder, PointResult, PointValidator, VariableBaseMul,
};
use crate::params::EdDsaParams;
use crate::r1cs::{EmissionMark, Protoboard, VariableArray, VariablePoint};

/// PureEdDSA verification: `S·B == R + H(R, A, M)·A`.
///
/// `S` enters as its bits `s`; `R` is checked against the curve (and, under
/// [`ValidityPolicy::PrimeOrder`](crate::ValidityPolicy::PrimeOrder), the
/// subgroup). `A` is not checked here.
///
/// An invalid signature does not fail construction or witness generation;
/// it leaves the protoboard unsatisfied. Computing the witness before
/// emitting the constraints fails with
/// [`CircuitError::ConstraintsNotEmitted`].
#[derive(Clone, Debug)]
pub struct PureEdDsa<'a, F: PrimeFieldBits> {
    s_bits: Booleanity,
    msg_bits: Option<Booleanity>,
    validator: PointValidator<F>,
    lhs: FixedBaseMul<F>,
    hash: HashRam<'a, F>,
    at: VariableBaseMul<F>,
    rhs: PointAdder<F>,
    emission: EmissionMark,
    annotation: String,
}

impl<'a, F: PrimeFieldBits> PureEdDsa<'a, F> {
    #[allow(clippy::too_many_arguments)]
    pub fn new(
        pb: &mut Protoboard<F>,
        params: &'a EdDsaParams<F>,
        base: &EdwardsPoint<F>,
        a: VariablePoint,
        r: VariablePoint,
        s: &VariableArray,
        msg: &VariableArray,
        annotation: &str,
    ) -> Result<Self> {
        check_message(params, msg)?;
        Self::build(pb, params, base, a, r, s, msg, true, annotation)
    }

    /// Inner gadget of [`EdDsa`](super::EdDsa): `msg` is a hash digest that
    /// is already boolean and has a fixed width.
    #[allow(clippy::too_many_arguments)]
    pub(crate) fn over_digest(
        pb: &mut Protoboard<F>,
        params: &'a EdDsaParams<F>,
        base: &EdwardsPoint<F>,
        a: VariablePoint,
        r: VariablePoint,
        s: &VariableArray,
        digest: &VariableArray,
        annotation: &str,
    ) -> Result<Self> {
        Self::build(pb, params, base, a, r, s, digest, false, annotation)
    }

    #[allow(clippy::too_many_arguments)]
    fn build(
        pb: &mut Protoboard<F>,
        params: &'a EdDsaParams<F>,
        base: &EdwardsPoint<F>,
        a: VariablePoint,
        r: VariablePoint,
        s: &VariableArray,
        msg: &VariableArray,
        check_msg: bool,
        annotation: &str,
    ) -> Result<Self> {
        if s.len() != params.scalar_bits {
            return Err(CircuitError::LengthMismatch {
                what: "signature scalar",
                expected: params.scalar_bits,
                actual: s.len(),
            });
        }
        if !base.is_on_curve(&params.curve) {
            return Err(ParamsError::BaseNotOnCurve.into());
        }

        let allocated_before = pb.num_variables();
        let curve = &params.curve;
        let s_bits = Booleanity::new(s, &format!("{}.s", annotation));
        let msg_bits = check_msg.then(|| Booleanity::new(msg, &format!("{}.msg", annotation)));

        let validator = PointValidator::new(
            pb,
            curve,
            params.validity,
            r,
            &format!("{}.R_valid", annotation),
        )?;
        let lhs = FixedBaseMul::new(pb, curve, base, s, &format!("{}.lhs", annotation))?;
        let hash = HashRam::new(pb, params, r, a, msg, &format!("{}.H_RAM", annotation));
        let at = VariableBaseMul::new(pb, curve, a, hash.result(), &format!("{}.At", annotation))?;
        let rhs = PointAdder::new(pb, curve, r, at.result(), &format!("{}.rhs", annotation));
        let emission = pb.track_emission();

        debug!(
            "[eddsa] {}: allocated {} variables for a {}-bit message",
            annotation,
            pb.num_variables() - allocated_before,
            msg.len()
        );

        Ok(Self {
            s_bits,
            msg_bits,
            validator,
            lhs,
            hash,
            at,
            rhs,
            emission,
            annotation: annotation.to_owned(),
        })
    }

    /// The challenge bits `c`.
    pub fn challenge(&self) -> &VariableArray {
        self.hash.result()
    }

    /// `S·B`.
    pub fn lhs(&self) -> VariablePoint {
        self.lhs.result()
    }

    /// `R + c·A`.
    pub fn rhs(&self) -> VariablePoint {
        self.rhs.result()
    }

    /// Whether `S·B` and `R + c·A` agree under the current witness. This is
    /// only the final equation; use [`Protoboard::is_satisfied`] for the
    /// whole circuit.
    pub fn is_valid(&self, pb: &Protoboard<F>) -> Result<bool> {
        Ok(self.lhs().value(pb)? == self.rhs().value(pb)?)
    }
}

pub(super) fn check_message<F: PrimeFieldBits>(params: &EdDsaParams<F>, msg: &VariableArray) -> Result<()> {
    if msg.is_empty() {
        return Err(CircuitError::EmptyMessage);
    }
    if msg.len() > params.max_message_bits {
        return Err(CircuitError::MessageTooLong {
            actual: msg.len(),
            limit: params.max_message_bits,
        });
    }
    Ok(())
}

impl<'a, F: PrimeFieldBits> Gadget<F> for PureEdDsa<'a, F> {
    fn emit_constraints(&self, pb: &mut Protoboard<F>) -> Result<()> {
        Gadget::<F>::emit_constraints(&self.s_bits, pb)?;
        if let Some(msg_bits) = &self.msg_bits {
            Gadget::<F>::emit_constraints(msg_bits, pb)?;
        }
        self.validator.emit_constraints(pb)?;
        self.lhs.emit_constraints(pb)?;
        self.hash.emit_constraints(pb)?;
        self.at.emit_constraints(pb)?;
        self.rhs.emit_constraints(pb)?;

        let (lhs, rhs) = (self.lhs(), self.rhs());
        pb.enforce(
            || format!("{}.lhs.x == rhs.x", self.annotation),
            |lc| lc + lhs.x,
            |lc| lc + Protoboard::<F>::one(),
            |lc| lc + rhs.x,
        )?;
        pb.enforce(
            || format!("{}.lhs.y == rhs.y", self.annotation),
            |lc| lc + lhs.y,
            |lc| lc + Protoboard::<F>::one(),
            |lc| lc + rhs.y,
        )?;
        pb.mark_emitted(self.emission)?;

        debug!(
            "[eddsa] {}: {} constraints emitted",
            self.annotation,
            pb.num_constraints()
        );
        Ok(())
    }

    fn compute_witness(&self, pb: &mut Protoboard<F>) -> Result<()> {
        pb.require_emitted(self.emission, &self.annotation)?;
        Gadget::<F>::compute_witness(&self.s_bits, pb)?;
        if let Some(msg_bits) = &self.msg_bits {
            Gadget::<F>::compute_witness(msg_bits, pb)?;
        }
        self.validator.compute_witness(pb)?;
        self.lhs.compute_witness(pb)?;
        self.hash.compute_witness(pb)?;
        self.at.compute_witness(pb)?;
        self.rhs.compute_witness(pb)
    }
}
