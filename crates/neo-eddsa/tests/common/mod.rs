//! Shared helpers: a test-only Jubjub signer and circuit drivers.
#![allow(dead_code)]

use bls12_381::Scalar;
use ff::{Field, PrimeField, PrimeFieldBits};
use group::Group;
use jubjub::{AffinePoint, ExtendedPoint, Fr, SubgroupPoint};
use rand_chacha::ChaCha8Rng;
use rand_core::SeedableRng;

use neo_eddsa::{
    hash_to_bits, EdDsa, EdDsaParams, EdwardsPoint, Gadget, Protoboard, PureEdDsa, VariableArray,
    VariablePoint, MESSAGE_DOMAIN, RAM_DOMAIN,
};

pub type F = Scalar;

pub fn rng(seed: u64) -> ChaCha8Rng {
    ChaCha8Rng::seed_from_u64(seed)
}

pub fn to_edwards(point: SubgroupPoint) -> EdwardsPoint<F> {
    let affine = AffinePoint::from(ExtendedPoint::from(point));
    EdwardsPoint::new(affine.get_u(), affine.get_v())
}

pub fn field_bits(x: F) -> Vec<bool> {
    x.to_le_bits()
        .iter()
        .by_vals()
        .take(F::NUM_BITS as usize)
        .collect()
}

pub fn fr_bits(s: Fr) -> Vec<bool> {
    s.to_le_bits()
        .iter()
        .by_vals()
        .take(Fr::NUM_BITS as usize)
        .collect()
}

/// Reduce a little-endian bit-string mod the subgroup order.
fn bits_to_fr(bits: &[bool]) -> Fr {
    bits.iter().rev().fold(Fr::ZERO, |acc, bit| {
        let acc = acc.double();
        if *bit {
            acc + Fr::ONE
        } else {
            acc
        }
    })
}

pub fn message_from_str(bits: &str) -> Vec<bool> {
    bits.chars().map(|c| c == '1').collect()
}

#[derive(Clone, Debug)]
pub struct Keypair {
    pub secret: Fr,
    pub public: EdwardsPoint<F>,
}

impl Keypair {
    pub fn generate(rng: &mut ChaCha8Rng) -> Self {
        let secret = Fr::random(&mut *rng);
        Self {
            secret,
            public: to_edwards(SubgroupPoint::generator() * secret),
        }
    }
}

#[derive(Clone, Debug)]
pub struct Signature {
    pub r: EdwardsPoint<F>,
    pub s: Vec<bool>,
}

/// PureEdDSA signature with the circuit's challenge hash.
pub fn sign_pure(
    params: &EdDsaParams<F>,
    key: &Keypair,
    msg: &[bool],
    rng: &mut ChaCha8Rng,
) -> Signature {
    let nonce = Fr::random(&mut *rng);
    let r = to_edwards(SubgroupPoint::generator() * nonce);

    let mut input = field_bits(r.x);
    input.extend(field_bits(key.public.x));
    input.extend_from_slice(msg);
    let c = hash_to_bits(&params.hash, RAM_DOMAIN, &input);

    let s = nonce + bits_to_fr(&c) * key.secret;
    Signature { r, s: fr_bits(s) }
}

/// HashEdDSA signature: PureEdDSA over `H'(m)`.
pub fn sign_hashed(
    params: &EdDsaParams<F>,
    key: &Keypair,
    m: &[bool],
    rng: &mut ChaCha8Rng,
) -> Signature {
    let digest = hash_to_bits(&params.hash, MESSAGE_DOMAIN, m);
    sign_pure(params, key, &digest, rng)
}

#[derive(Clone, Debug)]
pub struct Wires {
    pub a: VariablePoint,
    pub r: VariablePoint,
    pub s: VariableArray,
    pub msg: VariableArray,
}

impl Wires {
    pub fn allocate(pb: &mut Protoboard<F>, params: &EdDsaParams<F>, msg_len: usize) -> Self {
        Self {
            a: VariablePoint::allocate_input(pb, "A"),
            r: VariablePoint::allocate(pb, "R"),
            s: VariableArray::allocate(pb, params.scalar_bits, "S"),
            msg: VariableArray::allocate_input(pb, msg_len, "msg"),
        }
    }

    pub fn assign(
        &self,
        pb: &mut Protoboard<F>,
        public: &EdwardsPoint<F>,
        sig: &Signature,
        msg: &[bool],
    ) -> anyhow::Result<()> {
        self.a.assign(pb, public)?;
        self.r.assign(pb, &sig.r)?;
        self.s.fill_with_bits(pb, &sig.s)?;
        self.msg.fill_with_bits(pb, msg)?;
        Ok(())
    }
}

pub struct PureCircuit<'a> {
    pub pb: Protoboard<F>,
    pub wires: Wires,
    pub gadget: PureEdDsa<'a, F>,
}

impl<'a> PureCircuit<'a> {
    pub fn build(params: &'a EdDsaParams<F>, msg_len: usize) -> anyhow::Result<Self> {
        let mut pb = Protoboard::new();
        let wires = Wires::allocate(&mut pb, params, msg_len);
        let gadget = PureEdDsa::new(
            &mut pb,
            params,
            &params.curve.base,
            wires.a,
            wires.r,
            &wires.s,
            &wires.msg,
            "pure",
        )?;
        gadget.emit_constraints(&mut pb)?;
        Ok(Self { pb, wires, gadget })
    }

    /// Assign the inputs, run the witness pass, report satisfaction.
    pub fn verify(
        &mut self,
        public: &EdwardsPoint<F>,
        sig: &Signature,
        msg: &[bool],
    ) -> anyhow::Result<bool> {
        self.wires.assign(&mut self.pb, public, sig, msg)?;
        self.gadget.compute_witness(&mut self.pb)?;
        Ok(self.pb.is_satisfied())
    }
}

pub struct HashedCircuit<'a> {
    pub pb: Protoboard<F>,
    pub wires: Wires,
    pub gadget: EdDsa<'a, F>,
}

impl<'a> HashedCircuit<'a> {
    pub fn build(params: &'a EdDsaParams<F>, msg_len: usize) -> anyhow::Result<Self> {
        let mut pb = Protoboard::new();
        let wires = Wires::allocate(&mut pb, params, msg_len);
        let gadget = EdDsa::new(
            &mut pb,
            params,
            &params.curve.base,
            wires.a,
            wires.r,
            &wires.s,
            &wires.msg,
            "eddsa",
        )?;
        gadget.emit_constraints(&mut pb)?;
        Ok(Self { pb, wires, gadget })
    }

    pub fn verify(
        &mut self,
        public: &EdwardsPoint<F>,
        sig: &Signature,
        m: &[bool],
    ) -> anyhow::Result<bool> {
        self.wires.assign(&mut self.pb, public, sig, m)?;
        self.gadget.compute_witness(&mut self.pb)?;
        Ok(self.pb.is_satisfied())
    }
}
