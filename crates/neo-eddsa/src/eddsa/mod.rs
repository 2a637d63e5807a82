//! EdDSA verification gadgets
//!
//! - [`HashRam`]: the challenge `c = H(R.x ∥ A.x ∥ M)`
//! - [`PureEdDsa`]: `S·B == R + c·A`
//! - [`EdDsa`]: HashEdDSA, i.e. [`PureEdDsa`] over `H'(m)`

mod hash_eddsa;
mod hash_ram;
mod pure;

pub use hash_eddsa::EdDsa;
pub use hash_ram::HashRam;
pub use pure::PureEdDsa;

/// Domain tag of the challenge hash.
pub const RAM_DOMAIN: &str = "EdDSA_Verify.RAM";

/// Domain tag of the HashEdDSA message compression.
pub const MESSAGE_DOMAIN: &str = "EdDSA_Verify.M";
