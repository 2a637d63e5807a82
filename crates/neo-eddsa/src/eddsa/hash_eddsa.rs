use ff::PrimeFieldBits;
use tracing::debug;

use super::pure::{check_message, PureEdDsa};
use super::MESSAGE_DOMAIN;
use crate::curve::EdwardsPoint;
use crate::error::Result;
use crate::gadgets::{Booleanity, Gadget, MimcHashToBits};
use crate::params::EdDsaParams;
use crate::r1cs::{EmissionMark, Protoboard, VariableArray, VariablePoint};

/// HashEdDSA: the raw message `m` is compressed to `M = H'(m)` and the
/// signature is checked as PureEdDSA over `M`.
#[derive(Clone, Debug)]
pub struct EdDsa<'a, F: PrimeFieldBits> {
    message_hash: MimcHashToBits<'a, F>,
    m_bits: Booleanity,
    inner: PureEdDsa<'a, F>,
    emission: EmissionMark,
    annotation: String,
}

impl<'a, F: PrimeFieldBits> EdDsa<'a, F> {
    #[allow(clippy::too_many_arguments)]
    pub fn new(
        pb: &mut Protoboard<F>,
        params: &'a EdDsaParams<F>,
        base: &EdwardsPoint<F>,
        a: VariablePoint,
        r: VariablePoint,
        s: &VariableArray,
        m: &VariableArray,
        annotation: &str,
    ) -> Result<Self> {
        check_message(params, m)?;

        let message_hash = MimcHashToBits::new(
            pb,
            &params.hash,
            MESSAGE_DOMAIN,
            m,
            &format!("{}.H_M", annotation),
        );
        let m_bits = Booleanity::new(m, &format!("{}.m", annotation));
        let inner = PureEdDsa::over_digest(
            pb,
            params,
            base,
            a,
            r,
            s,
            message_hash.result(),
            &format!("{}.pure", annotation),
        )?;
        let emission = pb.track_emission();

        debug!(
            "[eddsa] {}: HashEdDSA over a {}-bit message",
            annotation,
            m.len()
        );

        Ok(Self {
            message_hash,
            m_bits,
            inner,
            emission,
            annotation: annotation.to_owned(),
        })
    }

    /// The compressed message `M`.
    pub fn message_digest(&self) -> &VariableArray {
        self.message_hash.result()
    }

    pub fn inner(&self) -> &PureEdDsa<'a, F> {
        &self.inner
    }

    /// See [`PureEdDsa::is_valid`].
    pub fn is_valid(&self, pb: &Protoboard<F>) -> Result<bool> {
        self.inner.is_valid(pb)
    }
}

impl<'a, F: PrimeFieldBits> Gadget<F> for EdDsa<'a, F> {
    fn emit_constraints(&self, pb: &mut Protoboard<F>) -> Result<()> {
        self.message_hash.emit_constraints(pb)?;
        Gadget::<F>::emit_constraints(&self.m_bits, pb)?;
        self.inner.emit_constraints(pb)?;
        pb.mark_emitted(self.emission)
    }

    fn compute_witness(&self, pb: &mut Protoboard<F>) -> Result<()> {
        pb.require_emitted(self.emission, &self.annotation)?;
        self.message_hash.compute_witness(pb)?;
        Gadget::<F>::compute_witness(&self.m_bits, pb)?;
        self.inner.compute_witness(pb)
    }
}
