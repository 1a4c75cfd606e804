//! Error handling for the dbls ecosystem

pub mod traits;
pub mod types;

// Re-export the primary error type and result
pub use types::{Error, Result};

// Re-export error traits
pub use traits::ResultExt;

impl From<core::array::TryFromSliceError> for Error {
    fn from(_: core::array::TryFromSliceError) -> Self {
        Self::InvalidLength {
            context: "array conversion",
            expected: 0,
            actual: 0,
        }
    }
}

impl From<core::fmt::Error> for Error {
    fn from(e: core::fmt::Error) -> Self {
        Self::SerializationError {
            context: "formatting",
            message: e.to_string(),
        }
    }
}

impl std::error::Error for Error {}

// Specialized result types for different operations
pub type KeyResult<T> = Result<T>;
pub type SignatureResult<T> = Result<T>;
