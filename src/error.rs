//! Error types for key generation, signing and text decoding.

use thiserror::Error;

/// Failure to turn hex text back into a signature, certificate or public key.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum DecodeError {
    /// The text is not valid base16.
    #[error("invalid hex: {0}")]
    InvalidHex(String),

    /// The text is valid hex but the bytes are not a well-formed encoding.
    #[error("invalid encoding: {0}")]
    InvalidEncoding(String),
}

/// Custom error type for proxy signature operations
#[derive(Debug, Error)]
pub enum ProxySignatureError {
    /// Error from libsodium operations
    #[error("libsodium error: {0}")]
    Libsodium(libsodium_rs::SodiumError),

    /// The secure randomness source failed while generating a key
    #[error("randomness unavailable: {0}")]
    RandomnessUnavailable(#[source] rand::Error),

    /// The signing key does not belong to the delegate named in the certificate
    #[error("delegate private key does not match the certificate's delegate public key")]
    KeyCertificateMismatch,

    /// A non-empty passphrase was supplied to a scheme that stores keys unencrypted
    #[error("passphrase-protected keys are not supported")]
    UnsupportedPassphrase,

    /// Canonical serialization of a payload failed
    #[error("serialization error: {0}")]
    Serialization(String),

    /// Text decoding error
    #[error(transparent)]
    Decode(#[from] DecodeError),
}

impl From<libsodium_rs::SodiumError> for ProxySignatureError {
    fn from(error: libsodium_rs::SodiumError) -> Self {
        ProxySignatureError::Libsodium(error)
    }
}

/// Result type alias for proxy signature operations
pub type Result<T> = std::result::Result<T, ProxySignatureError>;
