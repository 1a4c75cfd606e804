//! Constants for pairing-friendly curves and the schemes built on them

pub mod bls12_381;
