//! The signature primitive the protocol layers are built on.
//!
//! Everything above this module (key generation, tagged signing, proxy
//! signatures) only ever calls through [`Scheme`], so the curve can be swapped
//! out, e.g. for a deterministic stub in tests.

mod ristretto;
#[cfg(test)]
pub(crate) mod stub;

pub use ristretto::Ristretto255;

use std::fmt;
use std::hash::Hash;

use libsodium_rs::crypto_core::ristretto255;
use libsodium_rs::crypto_generichash;
use zeroize::Zeroizing;

use crate::error::Result;

/// Length of a key derivation seed.
pub const SEED_BYTES: usize = 32;

/// Length of an extended public key: group element followed by chain code.
pub const PUBLIC_KEY_BYTES: usize = 64;

/// Length of an extended private key: scalar, nonce prefix, chain code.
pub const EXTENDED_SECRET_BYTES: usize = 96;

/// Length of a signature.
pub const SIGNATURE_BYTES: usize = 64;

/// Passphrase used for every signing call. Keys are never stored encrypted.
pub const EMPTY_PASSPHRASE: &[u8] = b"";

/// A 32-byte key derivation seed.
pub type Seed = [u8; SEED_BYTES];

/// Raw extended public key bytes.
pub type PublicKeyBytes = [u8; PUBLIC_KEY_BYTES];

/// Raw extended private key bytes.
pub type ExtendedSecret = [u8; EXTENDED_SECRET_BYTES];

/// Raw signature bytes.
pub type SignatureBytes = [u8; SIGNATURE_BYTES];

/// A deterministic signature scheme over extended keys.
///
/// Implementations are zero-sized markers and must be deterministic: the
/// same key and message always produce the same signature.
pub trait Scheme: Copy + fmt::Debug + Eq + Hash + Send + Sync + 'static {
    /// Derive an extended key pair from a seed. Must succeed for every seed.
    ///
    /// # Errors
    /// Returns an error only if the underlying primitive fails
    fn derive(seed: &Seed) -> Result<(PublicKeyBytes, Zeroizing<ExtendedSecret>)>;

    /// Sign `message` with an extended private key.
    ///
    /// # Errors
    /// Returns an error if the passphrase is rejected or a primitive fails
    fn sign(secret: &ExtendedSecret, passphrase: &[u8], message: &[u8]) -> Result<SignatureBytes>;

    /// Check `signature` over `message` against an extended public key.
    ///
    /// Malformed keys or signatures verify as `false`.
    fn verify(public: &PublicKeyBytes, message: &[u8], signature: &SignatureBytes) -> bool;

    /// Whether `public` is a well-formed extended public key for this scheme.
    fn is_valid_public(public: &PublicKeyBytes) -> bool;
}

/// Hash multiple byte arrays to produce a Ristretto255 scalar
fn hash_to_scalar(parts: &[&[u8]]) -> Result<[u8; ristretto255::SCALARBYTES]> {
    let hash: [u8; 64] = hash_to_array(parts)?;
    Ok(ristretto255::scalar_reduce(&hash)?)
}

/// BLAKE2b over the concatenation of `parts`, with an `N`-byte digest.
pub(crate) fn hash_to_array<const N: usize>(parts: &[&[u8]]) -> Result<[u8; N]> {
    let mut state = crypto_generichash::State::new(None, N)?;
    for part in parts {
        state.update(part);
    }
    let hash = state.finalize();
    let mut out = [0u8; N];
    out.copy_from_slice(&hash[..N]);
    Ok(out)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn hash_depends_on_every_part() -> Result<()> {
        let a: [u8; 32] = hash_to_array(&[&b"abc"[..], &b"def"[..]])?;
        let b: [u8; 32] = hash_to_array(&[&b"abc"[..], &b"deg"[..]])?;
        let c: [u8; 32] = hash_to_array(&[&b"abcd"[..], &b"ef"[..]])?;
        assert_ne!(a, b);
        // parts are concatenated without separators
        assert_eq!(a, c);
        Ok(())
    }

    #[test]
    fn hash_to_scalar_is_deterministic() -> Result<()> {
        let parts: [&[u8]; 2] = [b"context", &[7u8; 32]];
        assert_eq!(hash_to_scalar(&parts)?, hash_to_scalar(&parts)?);
        Ok(())
    }
}
