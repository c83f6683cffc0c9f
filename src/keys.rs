//! Key pairs, generated from secure randomness or derived from a seed.

use std::fmt;
use std::hash::{Hash, Hasher};
use std::marker::PhantomData;

use libsodium_rs::utils;
use rand::rngs::OsRng;
use rand::{CryptoRng, RngCore};
use zeroize::Zeroizing;

use crate::encoding::encode;
use crate::error::{ProxySignatureError, Result};
use crate::scheme::{ExtendedSecret, PublicKeyBytes, Ristretto255, Scheme, Seed, SEED_BYTES};

/// Extended public key (64 bytes) of scheme `S`.
pub struct PublicKey<S = Ristretto255> {
    bytes: PublicKeyBytes,
    _scheme: PhantomData<S>,
}

impl<S> PublicKey<S> {
    /// Wrap raw extended public key bytes.
    pub const fn from_bytes(bytes: PublicKeyBytes) -> Self {
        PublicKey {
            bytes,
            _scheme: PhantomData,
        }
    }

    /// Get a reference to the raw key bytes
    pub fn as_bytes(&self) -> &PublicKeyBytes {
        &self.bytes
    }

    /// The chain code half of the extended key.
    pub fn chain_code(&self) -> &[u8] {
        &self.bytes[32..]
    }

    /// Short fingerprint for logs: the first 8 hex characters.
    pub fn fingerprint(&self) -> String {
        let mut hex = encode(&self.bytes);
        hex.truncate(8);
        hex
    }

    /// Constant-time equality.
    pub fn ct_eq(&self, other: &Self) -> bool {
        utils::memcmp(&self.bytes, &other.bytes)
    }
}

impl<S> Clone for PublicKey<S> {
    fn clone(&self) -> Self {
        *self
    }
}

impl<S> Copy for PublicKey<S> {}

impl<S> PartialEq for PublicKey<S> {
    fn eq(&self, other: &Self) -> bool {
        self.bytes == other.bytes
    }
}

impl<S> Eq for PublicKey<S> {}

impl<S> Hash for PublicKey<S> {
    fn hash<H: Hasher>(&self, state: &mut H) {
        self.bytes.hash(state);
    }
}

impl<S> AsRef<[u8]> for PublicKey<S> {
    fn as_ref(&self) -> &[u8] {
        &self.bytes
    }
}

impl<S> fmt::Debug for PublicKey<S> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_tuple("PublicKey").field(&encode(&self.bytes)).finish()
    }
}

/// Extended private key of scheme `S`, zeroed on drop.
///
/// The paired public key is computed once at derivation and kept alongside.
pub struct PrivateKey<S = Ristretto255> {
    extended: Zeroizing<ExtendedSecret>,
    public: PublicKey<S>,
}

impl<S> PrivateKey<S> {
    /// The public key paired with this private key.
    pub fn public_key(&self) -> &PublicKey<S> {
        &self.public
    }

    pub(crate) fn extended(&self) -> &ExtendedSecret {
        &self.extended
    }
}

impl<S> Clone for PrivateKey<S> {
    fn clone(&self) -> Self {
        PrivateKey {
            extended: self.extended.clone(),
            public: self.public,
        }
    }
}

impl<S> PartialEq for PrivateKey<S> {
    fn eq(&self, other: &Self) -> bool {
        utils::memcmp(&self.extended[..], &other.extended[..])
    }
}

impl<S> Eq for PrivateKey<S> {}

impl<S> fmt::Debug for PrivateKey<S> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("PrivateKey")
            .field("extended", &"<redacted>")
            .field("public", &self.public)
            .finish()
    }
}

/// Turn a seed into an extended key pair. Shared by generation and derivation.
fn keypair_from_seed<S: Scheme>(seed: &Seed) -> Result<(PublicKey<S>, PrivateKey<S>)> {
    let (public, extended) = S::derive(seed)?;
    let public = PublicKey::from_bytes(public);
    Ok((public, PrivateKey { extended, public }))
}

fn keypair_from_rng<S: Scheme, R: RngCore + CryptoRng>(
    rng: &mut R,
) -> Result<(PublicKey<S>, PrivateKey<S>)> {
    let mut seed = Zeroizing::new([0u8; SEED_BYTES]);
    rng.try_fill_bytes(&mut seed[..])
        .map_err(ProxySignatureError::RandomnessUnavailable)?;
    keypair_from_seed(&seed)
}

/// Generate a key pair from the operating system's secure randomness.
///
/// # Errors
/// Returns `RandomnessUnavailable` if the OS source fails
pub fn generate_keypair() -> Result<(PublicKey, PrivateKey)> {
    generate_keypair_from_rng(&mut OsRng)
}

/// Generate a key pair from 32 bytes drawn from `rng`.
///
/// # Errors
/// Returns `RandomnessUnavailable` if `rng` fails; no other source is tried
pub fn generate_keypair_from_rng<R: RngCore + CryptoRng>(
    rng: &mut R,
) -> Result<(PublicKey, PrivateKey)> {
    keypair_from_rng(rng)
}

/// Deterministically derive a key pair from a seed.
///
/// Equal seeds always give equal key pairs. Seed quality is the caller's
/// responsibility.
pub fn derive_keypair_from_seed(seed: &Seed) -> Result<(PublicKey, PrivateKey)> {
    keypair_from_seed(seed)
}

/// Cryptographic key pair containing a private key and corresponding public key
#[derive(Clone, PartialEq, Eq)]
pub struct KeyPair<S = Ristretto255> {
    /// Public key
    pub pk: PublicKey<S>,
    /// Private key
    pub sk: PrivateKey<S>,
}

impl<S: Scheme> KeyPair<S> {
    /// Generate a new random key pair
    ///
    /// # Errors
    /// Returns `RandomnessUnavailable` if the OS source fails
    pub fn generate() -> Result<Self> {
        Self::from_rng(&mut OsRng)
    }

    /// Generate a key pair from a caller-supplied secure RNG
    ///
    /// # Errors
    /// Returns `RandomnessUnavailable` if `rng` fails
    pub fn from_rng<R: RngCore + CryptoRng>(rng: &mut R) -> Result<Self> {
        let (pk, sk) = keypair_from_rng(rng)?;
        Ok(KeyPair { pk, sk })
    }

    /// Derive a key pair from a seed
    ///
    /// # Errors
    /// Returns an error only if the underlying primitive fails
    pub fn from_seed(seed: &Seed) -> Result<Self> {
        let (pk, sk) = keypair_from_seed(seed)?;
        Ok(KeyPair { pk, sk })
    }
}

impl<S> KeyPair<S> {
    /// Get a reference to the public key
    pub fn public_key(&self) -> &PublicKey<S> {
        &self.pk
    }

    /// Get a reference to the private key
    pub fn secret_key(&self) -> &PrivateKey<S> {
        &self.sk
    }
}

impl<S> fmt::Debug for KeyPair<S> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("KeyPair")
            .field("sk", &"<redacted>")
            .field("pk", &encode(self.pk.as_bytes()))
            .finish()
    }
}

impl<S> fmt::Display for KeyPair<S> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "KeyPair(pk: {}...)", self.pk.fingerprint())
    }
}

impl<S> AsRef<PublicKey<S>> for KeyPair<S> {
    fn as_ref(&self) -> &PublicKey<S> {
        &self.pk
    }
}

impl<S> Hash for KeyPair<S> {
    fn hash<H: Hasher>(&self, state: &mut H) {
        // Only hash the public key, not the secret key
        self.pk.hash(state);
    }
}
