//! BLS signatures over BLS12-381
//!
//! This crate implements the BLS signature scheme on top of the curve
//! arithmetic in `dbls-algorithms`: signing, verification, aggregation of
//! keys and signatures, and batch verification of aggregated signatures
//! over distinct messages.
//!
//! Public keys and signatures live in opposite groups. Either layout is
//! supported: the [`KeyType`] selector picks the group of the value being
//! produced, and the [`Key`] enum carries a point of either group.

#![forbid(unsafe_code)]

pub mod error;
pub mod traditional;

pub use error::{Error, Result};

// Re-exports from traditional schemes
pub use traditional::bls::{
    aggregate_public_keys, aggregate_signatures, get_public_key, sign, verify, verify_batch,
    BlsMinPk, BlsMinSig, Key, KeyType, PrivateKey,
};
