//! Trait definitions implemented by the dbls schemes

pub mod signature;

pub use signature::{Signature, SignatureSerialize};
