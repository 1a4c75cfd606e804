//! Public API traits and types for the dbls library
//!
//! This crate provides the public API surface shared by the dbls crates:
//! the error type every layer converts into, and the signature traits the
//! concrete schemes implement.

pub mod error;
pub mod traits;

// Re-export commonly used items at the crate level for convenience
pub use error::{Error, Result, ResultExt};

// Re-export all traits from the traits module
pub use traits::{Signature, SignatureSerialize};

// Re-export trait modules for direct access
pub use traits::signature;
