//! MiMC-5 hash-to-bits.
//!
//! Input bits are packed little-endian into `F::CAPACITY`-bit blocks, and a
//! final block carries the input length. Blocks are chained with
//! Miyaguchi–Preneel over the MiMC-5 cipher:
//!
//! ```text
//! E_k(m):  x_0 = m,  x_{r+1} = (x_r + k + c_r)^5,  E = x_R + k
//! h_0 = IV(domain),  h_{j+1} = E_{h_j}(m_j) + h_j + m_j
//! ```
//!
//! The digest is decomposed strictly into `F::NUM_BITS` bits. [`hash_to_bits`]
//! computes the same function outside the circuit.

use core::iter;

use ff::{PrimeField, PrimeFieldBits};

use super::bits::FieldToBits;
use super::Gadget;
use crate::error::Result;
use crate::params::MimcParams;
use crate::r1cs::{pack_bits, LinearCombination, Protoboard, Variable, VariableArray};

fn pack_native<F: PrimeField>(bits: &[bool]) -> F {
    bits.iter().rev().fold(F::ZERO, |acc, bit| {
        let acc = acc.double();
        if *bit {
            acc + F::ONE
        } else {
            acc
        }
    })
}

fn native_blocks<F: PrimeField>(bits: &[bool]) -> Vec<F> {
    bits.chunks(F::CAPACITY as usize)
        .map(pack_native)
        .chain(iter::once(F::from(bits.len() as u64)))
        .collect()
}

fn compress<F: PrimeField>(params: &MimcParams<F>, key: F, message: F) -> F {
    let mut x = message;
    for c in params.round_constants() {
        let t = x + key + c;
        x = t.square().square() * t;
    }
    x + key.double() + message
}

/// Digest of `bits` under `domain`, as a field element.
pub fn hash_to_field<F: PrimeField>(params: &MimcParams<F>, domain: &str, bits: &[bool]) -> F {
    native_blocks::<F>(bits)
        .into_iter()
        .fold(params.domain_iv(domain), |key, block| compress(params, key, block))
}

/// Digest of `bits` under `domain`, as `F::NUM_BITS` little-endian bits.
pub fn hash_to_bits<F: PrimeFieldBits>(params: &MimcParams<F>, domain: &str, bits: &[bool]) -> Vec<bool> {
    hash_to_field(params, domain, bits)
        .to_le_bits()
        .iter()
        .by_vals()
        .take(F::NUM_BITS as usize)
        .collect()
}

#[derive(Clone, Debug)]
struct Round {
    t2: Variable,
    t4: Variable,
    t5: Variable,
}

#[derive(Clone, Debug)]
struct Block<F: PrimeField> {
    message: LinearCombination<F>,
    key: LinearCombination<F>,
    rounds: Vec<Round>,
    out: Variable,
}

/// In-circuit [`hash_to_bits`]: 3 constraints per round, one per block for
/// the feed-forward, plus the strict decomposition of the digest.
#[derive(Clone, Debug)]
pub struct MimcHashToBits<'a, F: PrimeFieldBits> {
    params: &'a MimcParams<F>,
    blocks: Vec<Block<F>>,
    output: FieldToBits,
    annotation: String,
}

impl<'a, F: PrimeFieldBits> MimcHashToBits<'a, F> {
    pub fn new(
        pb: &mut Protoboard<F>,
        params: &'a MimcParams<F>,
        domain: &str,
        input: &VariableArray,
        annotation: &str,
    ) -> Self {
        let messages = input
            .as_slice()
            .chunks(F::CAPACITY as usize)
            .map(pack_bits::<F>)
            .chain(iter::once(LinearCombination::constant(F::from(
                input.len() as u64,
            ))));

        let mut key = LinearCombination::constant(params.domain_iv(domain));
        let mut blocks = Vec::new();
        for (j, message) in messages.enumerate() {
            let rounds = (0..params.rounds())
                .map(|r| {
                    let label = format!("{}.block[{}].round[{}]", annotation, j, r);
                    Round {
                        t2: pb.allocate(format!("{}.t2", label)),
                        t4: pb.allocate(format!("{}.t4", label)),
                        t5: pb.allocate(format!("{}.t5", label)),
                    }
                })
                .collect();
            let out = pb.allocate(format!("{}.block[{}].h", annotation, j));
            blocks.push(Block {
                message,
                key,
                rounds,
                out,
            });
            key = LinearCombination::from(out);
        }

        // There is always at least the length block.
        let digest = blocks.last().map(|block| block.out).unwrap_or(Variable::ONE);
        let output = FieldToBits::new(pb, digest, &format!("{}.digest", annotation));

        Self {
            params,
            blocks,
            output,
            annotation: annotation.to_owned(),
        }
    }

    pub fn result(&self) -> &VariableArray {
        self.output.result()
    }

    /// The digest wire before bit decomposition.
    pub fn digest(&self) -> Variable {
        self.blocks.last().map(|block| block.out).unwrap_or(Variable::ONE)
    }
}

impl<'a, F: PrimeFieldBits> Gadget<F> for MimcHashToBits<'a, F> {
    fn emit_constraints(&self, pb: &mut Protoboard<F>) -> Result<()> {
        for (j, block) in self.blocks.iter().enumerate() {
            let mut x = block.message.clone();
            for (r, (round, c)) in block
                .rounds
                .iter()
                .zip(self.params.round_constants())
                .enumerate()
            {
                let t = x + &block.key + (*c, Variable::ONE);
                let label = format!("{}.block[{}].round[{}]", self.annotation, j, r);
                pb.enforce(
                    || format!("{}.t2", label),
                    |lc| lc + &t,
                    |lc| lc + &t,
                    |lc| lc + round.t2,
                )?;
                pb.enforce(
                    || format!("{}.t4", label),
                    |lc| lc + round.t2,
                    |lc| lc + round.t2,
                    |lc| lc + round.t4,
                )?;
                pb.enforce(
                    || format!("{}.t5", label),
                    |lc| lc + round.t4,
                    |lc| lc + &t,
                    |lc| lc + round.t5,
                )?;
                x = LinearCombination::from(round.t5);
            }

            let two = F::ONE.double();
            pb.enforce(
                || format!("{}.block[{}].h", self.annotation, j),
                |lc| lc + &x + (two, &block.key) + &block.message,
                |lc| lc + Variable::ONE,
                |lc| lc + block.out,
            )?;
        }
        self.output.emit_constraints(pb)
    }

    fn compute_witness(&self, pb: &mut Protoboard<F>) -> Result<()> {
        for block in &self.blocks {
            let message = pb.eval(&block.message)?;
            let key = pb.eval(&block.key)?;
            let mut x = message;
            for (round, c) in block.rounds.iter().zip(self.params.round_constants()) {
                let t = x + key + c;
                let t2 = t.square();
                let t4 = t2.square();
                let t5 = t4 * t;
                pb.assign(round.t2, t2)?;
                pb.assign(round.t4, t4)?;
                pb.assign(round.t5, t5)?;
                x = t5;
            }
            pb.assign(block.out, x + key.double() + message)?;
        }
        self.output.compute_witness(pb)
    }
}
