//! Jubjub over the BLS12-381 scalar field.
//!
//! `-x² + y² = 1 + d·x²·y²` with `d = -(10240/10241)`, cofactor 8. The
//! base point is the prime-order subgroup generator of the `jubjub` crate
//! and the subgroup order is the modulus of `jubjub::Fr`.

use bls12_381::Scalar;
use ff::{Field, PrimeField, PrimeFieldBits};
use group::Group;
use jubjub::{AffinePoint, ExtendedPoint, Fr, SubgroupPoint};

use crate::curve::{CurveParams, EdwardsPoint};
use crate::error::ParamsError;
use crate::params::{EdDsaParams, HashConfig, ValidityPolicy};

/// Width of a reduced Jubjub scalar.
pub const JUBJUB_SCALAR_BITS: usize = Fr::NUM_BITS as usize;

pub const JUBJUB_MAX_MESSAGE_BITS: usize = 1 << 16;

pub fn jubjub_curve() -> Result<CurveParams<Scalar>, ParamsError> {
    let inv: Option<Scalar> = Scalar::from(10241u64).invert().into();
    let inv = inv.ok_or(ParamsError::Invalid("10241 is not invertible"))?;
    let d = -(Scalar::from(10240u64) * inv);

    let generator = AffinePoint::from(ExtendedPoint::from(SubgroupPoint::generator()));
    let order = Fr::char_le_bits()
        .iter()
        .by_vals()
        .take(JUBJUB_SCALAR_BITS)
        .collect();

    Ok(CurveParams {
        a: -Scalar::ONE,
        d,
        base: EdwardsPoint::new(generator.get_u(), generator.get_v()),
        order: Some(order),
    })
}

pub fn jubjub(validity: ValidityPolicy) -> Result<EdDsaParams<Scalar>, ParamsError> {
    jubjub_with_hash(&HashConfig::default(), validity)
}

pub fn jubjub_with_hash(
    hash: &HashConfig,
    validity: ValidityPolicy,
) -> Result<EdDsaParams<Scalar>, ParamsError> {
    EdDsaParams::new(
        jubjub_curve()?,
        hash,
        JUBJUB_SCALAR_BITS,
        JUBJUB_MAX_MESSAGE_BITS,
        validity,
    )
}
