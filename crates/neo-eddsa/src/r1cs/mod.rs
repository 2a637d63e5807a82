//! Rank-1 constraint system builder
//!
//! - `lc`: variable handles and sparse linear combinations
//! - `protoboard`: wire allocation, constraints, witness, bellpepper export
//! - `wires`: bit-string and affine point bundles

pub mod lc;
pub mod protoboard;
pub mod wires;

pub use lc::{LinearCombination, Variable};
pub use protoboard::{Constraint, EmissionMark, Protoboard};
pub use wires::{pack_bits, VariableArray, VariablePoint};
