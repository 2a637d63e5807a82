//! Typed parameter sets for the EdDSA gadgets.
//!
//! [`EdDsaParams`] bundles the curve, the hash constants and the bit widths
//! every gadget in one verification instance shares. It is built once,
//! validated, and then only ever borrowed.
//!
//! Correctness precondition: `base` must generate the prime-order subgroup
//! that honest public keys live in. The circuit computes `c·A` rather than
//! `(c·k)·B` and relies on `l·B = O` to make the two agree; this is not
//! re-checked in-circuit.
//!
//! `S` is only range-limited by `scalar_bits`. With `scalar_bits` wider than
//! the subgroup order (252 bits for Jubjub), both `S` and `S + l` satisfy the
//! circuit. Callers that need non-malleable signatures must check `S < l`
//! outside the circuit.

use blake2b_simd::Params as Blake2bParams;
use ff::PrimeField;
use serde::{Deserialize, Serialize};

use crate::curve::CurveParams;
use crate::error::ParamsError;

/// Round count of MiMC-5 for a ~255-bit field: ceil(255 / log2(5)).
pub const DEFAULT_MIMC_ROUNDS: usize = 110;

/// Public, fixed seed for round constants and domain IVs.
pub const DEFAULT_MIMC_SEED: &str = "neo/eddsa/mimc5/v1";

#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct HashConfig {
    pub rounds: usize,
    pub seed: String,
}

impl Default for HashConfig {
    fn default() -> Self {
        Self {
            rounds: DEFAULT_MIMC_ROUNDS,
            seed: DEFAULT_MIMC_SEED.into(),
        }
    }
}

/// What the validity check on `R` proves.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, Serialize, Deserialize)]
pub enum ValidityPolicy {
    /// `R` satisfies the curve equation.
    #[default]
    OnCurve,
    /// `R` is on the curve and `l·R` is the identity.
    PrimeOrder,
}

/// Expanded MiMC constants. `x ↦ x^5` must be a permutation of `F`
/// (`gcd(5, p − 1) = 1`), which holds for the BLS12-381 scalar field.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct MimcParams<F: PrimeField> {
    seed: String,
    round_constants: Vec<F>,
}

impl<F: PrimeField> MimcParams<F> {
    pub fn from_config(config: &HashConfig) -> Self {
        let round_constants = (0..config.rounds)
            .map(|r| {
                let mut msg = Vec::with_capacity(config.seed.len() + 16);
                msg.extend_from_slice(config.seed.as_bytes());
                msg.extend_from_slice(b"/round/");
                msg.extend_from_slice(&(r as u64).to_le_bytes());
                field_from_blake2b(&msg)
            })
            .collect();
        Self {
            seed: config.seed.clone(),
            round_constants,
        }
    }

    pub fn rounds(&self) -> usize {
        self.round_constants.len()
    }

    pub fn round_constants(&self) -> &[F] {
        &self.round_constants
    }

    /// Initial chaining value for a hash domain.
    pub fn domain_iv(&self, domain: &str) -> F {
        let mut msg = Vec::with_capacity(self.seed.len() + domain.len() + 4);
        msg.extend_from_slice(self.seed.as_bytes());
        msg.extend_from_slice(b"/iv/");
        msg.extend_from_slice(domain.as_bytes());
        field_from_blake2b(&msg)
    }
}

/// Reduce a 512-bit Blake2b digest into `F` (bias is negligible for
/// fields under 2^448).
fn field_from_blake2b<F: PrimeField>(msg: &[u8]) -> F {
    let hash = Blake2bParams::new().hash_length(64).hash(msg);
    let shift = F::from(1u64 << 32).square();
    hash.as_bytes().chunks_exact(8).fold(F::ZERO, |acc, chunk| {
        let mut limb = [0u8; 8];
        limb.copy_from_slice(chunk);
        acc * shift + F::from(u64::from_le_bytes(limb))
    })
}

#[derive(Clone, Debug, PartialEq, Eq)]
pub struct EdDsaParams<F: PrimeField> {
    pub curve: CurveParams<F>,
    pub hash: MimcParams<F>,
    /// Width of the signature scalar `S` (bits).
    pub scalar_bits: usize,
    /// Upper bound on raw message length (bits).
    pub max_message_bits: usize,
    pub validity: ValidityPolicy,
}

impl<F: PrimeField> EdDsaParams<F> {
    /// Construct and validate a parameter set.
    pub fn new(
        curve: CurveParams<F>,
        hash: &HashConfig,
        scalar_bits: usize,
        max_message_bits: usize,
        validity: ValidityPolicy,
    ) -> Result<Self, ParamsError> {
        if bool::from(curve.a.is_zero()) {
            return Err(ParamsError::Invalid("curve coefficient a must be non-zero"));
        }
        if bool::from(curve.d.is_zero()) {
            return Err(ParamsError::Invalid("curve coefficient d must be non-zero"));
        }
        if curve.a == curve.d {
            return Err(ParamsError::Invalid("curve coefficients a and d must differ"));
        }
        if !curve.base.is_on_curve(&curve) {
            return Err(ParamsError::BaseNotOnCurve);
        }
        if curve.base.is_identity() {
            return Err(ParamsError::Invalid("base point must not be the identity"));
        }
        if scalar_bits == 0 || scalar_bits > F::NUM_BITS as usize {
            return Err(ParamsError::Invalid("scalar_bits must be in 1..=F::NUM_BITS"));
        }
        if max_message_bits == 0 {
            return Err(ParamsError::Invalid("max_message_bits must be positive"));
        }
        if hash.rounds == 0 {
            return Err(ParamsError::Invalid("hash rounds must be positive"));
        }
        match (&curve.order, validity) {
            (None, ValidityPolicy::PrimeOrder) => return Err(ParamsError::MissingSubgroupOrder),
            (Some(order), _) if !order.iter().any(|bit| *bit) => {
                return Err(ParamsError::Invalid("subgroup order must be non-zero"));
            }
            _ => {}
        }

        Ok(Self {
            hash: MimcParams::from_config(hash),
            curve,
            scalar_bits,
            max_message_bits,
            validity,
        })
    }

    /// Width of the challenge `c = H(R, A, M)` and of the compressed message.
    pub fn challenge_bits(&self) -> usize {
        F::NUM_BITS as usize
    }
}
