//! Context helpers for results crossing into the API error type

use super::types::{Error, Result};

/// Attach context to any result whose error converts into [`Error`]
pub trait ResultExt<T, E>: Sized {
    /// Convert the error and replace its context, e.g. `"BLS public key"`
    fn with_context(self, context: &'static str) -> Result<T>
    where
        E: Into<Error>;

    /// Convert the error and replace its message
    fn with_message(self, message: impl Into<String>) -> Result<T>
    where
        E: Into<Error>;
}

impl<T, E> ResultExt<T, E> for core::result::Result<T, E> {
    fn with_context(self, context: &'static str) -> Result<T>
    where
        E: Into<Error>,
    {
        self.map_err(|e| e.into().with_context(context))
    }

    fn with_message(self, message: impl Into<String>) -> Result<T>
    where
        E: Into<Error>,
    {
        self.map_err(|e| e.into().with_message(message))
    }
}
