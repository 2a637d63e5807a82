//! Error types for circuit construction and witness generation

use thiserror::Error;

/// Rejected parameter sets.
#[derive(Debug, Error, PartialEq, Eq)]
pub enum ParamsError {
    #[error("invalid parameter: {0}")]
    Invalid(&'static str),

    #[error("base point does not satisfy the curve equation")]
    BaseNotOnCurve,

    #[error("prime-order validity policy requires the subgroup order")]
    MissingSubgroupOrder,
}

/// Caller contract violations.
///
/// An invalid signature is never reported here: it shows up as an
/// unsatisfied constraint system.
#[derive(Debug, Error)]
pub enum CircuitError {
    #[error("variable {index} was not allocated on this protoboard")]
    UnknownVariable { index: usize },

    #[error("variable {index} ({annotation}) has no witness value")]
    UnassignedVariable { index: usize, annotation: String },

    #[error("{annotation}: witness computed before constraints were emitted")]
    ConstraintsNotEmitted { annotation: String },

    #[error("emission mark {index} was not issued by this protoboard")]
    UnknownEmissionMark { index: usize },

    #[error("the constant ONE cannot be reassigned")]
    ConstantAssignment,

    #[error("{what}: expected {expected} bits, got {actual}")]
    LengthMismatch {
        what: &'static str,
        expected: usize,
        actual: usize,
    },

    #[error("message has {actual} bits, limit is {limit}")]
    MessageTooLong { actual: usize, limit: usize },

    #[error("message must contain at least one bit")]
    EmptyMessage,

    #[error("scalar multiplication needs a non-empty, non-zero scalar")]
    EmptyScalar,

    #[error("constraint {index} not satisfied: {annotation}")]
    Unsatisfied { index: usize, annotation: String },

    #[error("parameter error: {0}")]
    Params(#[from] ParamsError),

    #[error("bellpepper synthesis error: {0:?}")]
    Synthesis(#[from] bellpepper_core::SynthesisError),
}

pub type Result<T> = std::result::Result<T, CircuitError>;
