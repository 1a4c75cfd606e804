//! Error types for the signature crate

use thiserror::Error;

/// Errors that can occur during signature operations
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum Error {
    /// The private key reduces to zero modulo the group order
    #[error("private key cannot be zero")]
    ZeroPrivateKey,

    /// An aggregation or batch input list was empty
    #[error("{context}: expected at least one input")]
    EmptyInput {
        /// Operation that received the empty list
        context: &'static str,
    },

    /// Batch verification got a different number of messages and keys
    #[error("batch verification needs one public key per message, got {messages} messages and {public_keys} public keys")]
    LengthMismatch {
        /// Number of messages supplied
        messages: usize,
        /// Number of public keys supplied
        public_keys: usize,
    },

    /// Points of the wrong group were combined
    #[error("{context}: points from G1 and G2 cannot be mixed")]
    MixedGroups {
        /// Operation that saw the mismatch
        context: &'static str,
    },

    /// Unknown key type selector
    #[error("invalid key type `{0}`, expected `g1` or `g2`")]
    InvalidKeyType(String),

    /// Malformed key material
    #[error("invalid key: {0}")]
    InvalidKey(String),

    /// Encoding error
    #[error("encoding error: {0}")]
    Encoding(String),

    /// Failure in the underlying curve arithmetic
    #[error(transparent)]
    Algorithm(#[from] dbls_algorithms::Error),
}

/// Result type for signature operations
pub type Result<T> = core::result::Result<T, Error>;

impl From<hex::FromHexError> for Error {
    fn from(err: hex::FromHexError) -> Self {
        Error::Encoding(err.to_string())
    }
}

// Convert to api::Error
impl From<Error> for dbls_api::Error {
    fn from(err: Error) -> Self {
        match err {
            Error::ZeroPrivateKey => dbls_api::Error::InvalidKey {
                context: "BLS private key",
                message: err.to_string(),
            },
            Error::EmptyInput { context } => dbls_api::Error::InvalidParameter {
                context,
                message: err.to_string(),
            },
            Error::LengthMismatch { .. } => dbls_api::Error::InvalidParameter {
                context: "verify_batch",
                message: err.to_string(),
            },
            Error::MixedGroups { context } => dbls_api::Error::InvalidParameter {
                context,
                message: err.to_string(),
            },
            Error::InvalidKeyType(_) => dbls_api::Error::InvalidParameter {
                context: "key type",
                message: err.to_string(),
            },
            Error::InvalidKey(msg) => dbls_api::Error::InvalidKey {
                context: "BLS",
                message: msg,
            },
            Error::Encoding(msg) => dbls_api::Error::SerializationError {
                context: "BLS",
                message: msg,
            },
            Error::Algorithm(e) => e.into(),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_messages() {
        assert_eq!(Error::ZeroPrivateKey.to_string(), "private key cannot be zero");
        assert_eq!(
            Error::InvalidKeyType("g3".into()).to_string(),
            "invalid key type `g3`, expected `g1` or `g2`"
        );
        let err = Error::LengthMismatch {
            messages: 2,
            public_keys: 3,
        };
        assert!(err.to_string().contains("2 messages and 3 public keys"));
    }

    #[test]
    fn test_algorithm_errors_are_transparent() {
        let inner = dbls_algorithms::Error::Pairing {
            details: "pairing with the point at infinity",
        };
        let err = Error::from(inner.clone());
        assert_eq!(err.to_string(), inner.to_string());
    }

    #[test]
    fn test_api_conversion() {
        match dbls_api::Error::from(Error::ZeroPrivateKey) {
            dbls_api::Error::InvalidKey { context, .. } => assert_eq!(context, "BLS private key"),
            other => panic!("unexpected variant {:?}", other),
        }
        match dbls_api::Error::from(Error::EmptyInput {
            context: "aggregate_signatures",
        }) {
            dbls_api::Error::InvalidParameter { context, .. } => {
                assert_eq!(context, "aggregate_signatures")
            }
            other => panic!("unexpected variant {:?}", other),
        }
    }
}
