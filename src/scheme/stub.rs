//! Insecure deterministic scheme for protocol tests.
//!
//! A "signature" is a keyed hash of the public key and message, so anyone
//! holding the public key can forge one. Only the plumbing is exercised.

use zeroize::Zeroizing;

use super::{hash_to_array, ExtendedSecret, PublicKeyBytes, Scheme, Seed, SignatureBytes};
use crate::error::{ProxySignatureError, Result};

const PUBLIC_CONTEXT: &[u8] = b"stub/public";
const SIGN_CONTEXT: &[u8] = b"stub/sign";

#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Hash)]
pub(crate) struct StubScheme;

impl Scheme for StubScheme {
    fn derive(seed: &Seed) -> Result<(PublicKeyBytes, Zeroizing<ExtendedSecret>)> {
        let public: PublicKeyBytes = hash_to_array(&[PUBLIC_CONTEXT, seed])?;
        let mut secret = Zeroizing::new([0u8; 96]);
        secret[..32].copy_from_slice(seed);
        secret[32..].copy_from_slice(&public);
        Ok((public, secret))
    }

    fn sign(secret: &ExtendedSecret, passphrase: &[u8], message: &[u8]) -> Result<SignatureBytes> {
        if !passphrase.is_empty() {
            return Err(ProxySignatureError::UnsupportedPassphrase);
        }
        hash_to_array(&[SIGN_CONTEXT, &secret[32..], message])
    }

    fn verify(public: &PublicKeyBytes, message: &[u8], signature: &SignatureBytes) -> bool {
        match hash_to_array::<64>(&[SIGN_CONTEXT, public, message]) {
            Ok(expected) => expected == *signature,
            Err(_) => false,
        }
    }

    fn is_valid_public(_public: &PublicKeyBytes) -> bool {
        true
    }
}
