//! # dbls
//!
//! BLS12-381 pairing cryptography in pure Rust: prime and extension field
//! arithmetic, G1/G2 point arithmetic, hash-to-curve, the optimal ate pairing
//! and BLS signatures with aggregation and batch verification.
//!
//! ## Usage
//!
//! Add this to your `Cargo.toml`:
//!
//! ```toml
//! [dependencies]
//! dbls = "0.3"
//! ```
//!
//! ## Features
//!
//! - `algorithms` (default): field, curve, hash-to-curve and pairing primitives
//! - `sign` (default): the BLS signature scheme
//! - `serde`: hex-string serialization for public keys and signatures
//! - `full`: All features enabled
//!
//! ## Crate Structure
//!
//! This is a facade crate that re-exports functionality from several sub-crates:
//!
//! - [`dbls-api`]: Error type and signature traits
//! - [`dbls-params`]: Curve constants, encoding sizes and domain separation tags
//! - [`dbls-algorithms`]: BLS12-381 arithmetic and the pairing
//! - [`dbls-sign`]: BLS signatures

// Core re-exports (always available)
pub use dbls_api as api;
pub use dbls_params as params;

// Feature-gated re-exports
#[cfg(feature = "algorithms")]
pub use dbls_algorithms as algorithms;

#[cfg(feature = "sign")]
pub use dbls_sign as sign;

/// Common imports for dbls users
pub mod prelude {
    // Re-export error types
    pub use crate::api::{Error, Result};

    // Re-export core traits
    pub use crate::api::{Signature, SignatureSerialize};

    #[cfg(feature = "algorithms")]
    pub use crate::algorithms::ec::bls12_381::{
        pairing, Field, Fp, Fp12, Fp2, G1Projective, G2Prepared, G2Projective, HashToCurve,
        Scalar,
    };

    #[cfg(feature = "sign")]
    pub use crate::sign::{
        aggregate_public_keys, aggregate_signatures, get_public_key, sign, verify, verify_batch,
        BlsMinPk, BlsMinSig, Key, KeyType, PrivateKey,
    };
}
