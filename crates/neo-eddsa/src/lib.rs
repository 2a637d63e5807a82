#![forbid(unsafe_code)]

//! neo-eddsa
//!
//! **In-circuit EdDSA verification**: R1CS gadgets proving that `(R, S)` is a
//! valid signature on a message under a public key `A`, over a twisted
//! Edwards curve embedded in the proof system's scalar field.
//!
//! ## Architecture
//!
//! - **Protoboard**: owns wires, `<a>·<b> = <c>` rows and the witness; replays
//!   into any bellpepper `ConstraintSystem`
//! - **Two-phase gadgets**: every gadget allocates in `new`, then
//!   [`Gadget::emit_constraints`] and [`Gadget::compute_witness`]
//! - **PureEdDSA**: `S·B == R + H(R.x ∥ A.x ∥ M)·A`
//! - **HashEdDSA**: PureEdDSA over `H'(m)`
//!
//! ## Usage
//!
//! ```ignore
//! let params = presets::jubjub(ValidityPolicy::OnCurve)?;
//! let mut pb = Protoboard::new();
//! let a = VariablePoint::allocate_input(&mut pb, "A");
//! let r = VariablePoint::allocate(&mut pb, "R");
//! let s = VariableArray::allocate(&mut pb, params.scalar_bits, "S");
//! let m = VariableArray::allocate_input(&mut pb, msg_len, "m");
//! let gadget = EdDsa::new(&mut pb, &params, &params.curve.base, a, r, &s, &m, "eddsa")?;
//! gadget.emit_constraints(&mut pb)?;
//! // assign A, R, S and m, then:
//! gadget.compute_witness(&mut pb)?;
//! assert!(pb.is_satisfied());
//! ```
//!
//! An invalid signature never produces an error: it leaves the protoboard
//! unsatisfied. Errors are reserved for misuse (unassigned inputs, wrong
//! widths, bad parameters).

pub mod curve;
pub mod eddsa;
pub mod error;
pub mod gadgets;
pub mod params;
pub mod presets;
pub mod r1cs;

pub use curve::{CurveParams, EdwardsPoint};
pub use eddsa::{EdDsa, HashRam, PureEdDsa, MESSAGE_DOMAIN, RAM_DOMAIN};
pub use error::{CircuitError, ParamsError, Result};
pub use gadgets::{hash_to_bits, Gadget, PointResult};
pub use params::{EdDsaParams, HashConfig, ValidityPolicy};
pub use r1cs::{LinearCombination, Protoboard, Variable, VariableArray, VariablePoint};
