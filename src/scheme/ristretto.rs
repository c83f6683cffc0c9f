//! Deterministic Schnorr signatures over the Ristretto255 prime-order group.
//!
//! ## Key layout
//!
//! - extended public key: `A ‖ chain_code` where `A = x*G`
//! - extended private key: `x ‖ nonce_prefix ‖ chain_code`
//!
//! ## Signing
//!
//! 1. `r = H(nonce_prefix || m)`, `R = r*G`
//! 2. `e = H(R || A || chain_code || m)`
//! 3. `s = r + e*x`, signature is `R ‖ s`
//!
//! Verification rejects a non-canonical `s` (not below the group order), then
//! checks `s*G == R + e*A`.

use libsodium_rs::crypto_core::{ed25519, ristretto255};
use libsodium_rs::crypto_scalarmult::ristretto255 as scalarmult_ristretto;
use libsodium_rs::utils;
use tracing::debug;
use zeroize::Zeroizing;

use super::{
    hash_to_array, hash_to_scalar, ExtendedSecret, PublicKeyBytes, Scheme, Seed, SignatureBytes,
    EXTENDED_SECRET_BYTES,
};
use crate::error::{ProxySignatureError, Result};

/// Type alias for Ristretto255 scalar values (32 bytes)
type Scalar = [u8; ristretto255::SCALARBYTES];

/// Type alias for Ristretto255 point values (32 bytes)
type Point = [u8; ristretto255::BYTES];

const SCALAR_CONTEXT: &[u8] = b"proxy-delegation/ristretto255/scalar";
const NONCE_PREFIX_CONTEXT: &[u8] = b"proxy-delegation/ristretto255/nonce";
const CHAIN_CODE_CONTEXT: &[u8] = b"proxy-delegation/ristretto255/chain";

/// The default [`Scheme`]: deterministic Schnorr over Ristretto255.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Hash)]
pub struct Ristretto255;

impl Scheme for Ristretto255 {
    fn derive(seed: &Seed) -> Result<(PublicKeyBytes, Zeroizing<ExtendedSecret>)> {
        let sk = Zeroizing::new(hash_to_scalar(&[SCALAR_CONTEXT, seed])?);
        let nonce_prefix = Zeroizing::new(hash_to_array::<32>(&[NONCE_PREFIX_CONTEXT, seed])?);
        let chain_code: [u8; 32] = hash_to_array(&[CHAIN_CODE_CONTEXT, seed])?;
        let pk: Point = scalarmult_ristretto::scalarmult_base(&*sk)?;

        let mut public = [0u8; 64];
        public[..32].copy_from_slice(&pk);
        public[32..].copy_from_slice(&chain_code);

        let mut secret = Zeroizing::new([0u8; EXTENDED_SECRET_BYTES]);
        secret[..32].copy_from_slice(&sk[..]);
        secret[32..64].copy_from_slice(&nonce_prefix[..]);
        secret[64..].copy_from_slice(&chain_code);

        Ok((public, secret))
    }

    fn sign(secret: &ExtendedSecret, passphrase: &[u8], message: &[u8]) -> Result<SignatureBytes> {
        if !passphrase.is_empty() {
            return Err(ProxySignatureError::UnsupportedPassphrase);
        }

        let mut sk = Zeroizing::new([0u8; ristretto255::SCALARBYTES]);
        sk.copy_from_slice(&secret[..32]);
        let nonce_prefix = &secret[32..64];
        let chain_code = &secret[64..];

        let k = Zeroizing::new(hash_to_scalar(&[nonce_prefix, message])?);
        let r: Point = scalarmult_ristretto::scalarmult_base(&*k)?;
        let pk: Point = scalarmult_ristretto::scalarmult_base(&*sk)?;

        let e = hash_to_scalar(&[&r[..], &pk[..], chain_code, message])?;
        let e_times_sk = ristretto255::scalar_mul(&e, &*sk)?;
        let s: Scalar = ed25519::scalar_add(&*k, &e_times_sk)?;

        let mut signature = [0u8; 64];
        signature[..32].copy_from_slice(&r);
        signature[32..].copy_from_slice(&s);
        Ok(signature)
    }

    fn verify(public: &PublicKeyBytes, message: &[u8], signature: &SignatureBytes) -> bool {
        match verify_equation(public, message, signature) {
            Ok(valid) => valid,
            Err(error) => {
                debug!(%error, "rejecting malformed key or signature");
                false
            }
        }
    }

    fn is_valid_public(public: &PublicKeyBytes) -> bool {
        let mut point: Point = [0u8; ristretto255::BYTES];
        point.copy_from_slice(&public[..32]);
        ristretto255::is_valid_point(&point).unwrap_or(false)
    }
}

/// Whether `s` is already reduced modulo the group order.
fn is_canonical_scalar(s: &Scalar) -> Result<bool> {
    let mut wide = [0u8; 64];
    wide[..32].copy_from_slice(s);
    let reduced: Scalar = ristretto255::scalar_reduce(&wide)?;
    Ok(utils::memcmp(&reduced, s))
}

fn verify_equation(
    public: &PublicKeyBytes,
    message: &[u8],
    signature: &SignatureBytes,
) -> Result<bool> {
    let mut pk: Point = [0u8; ristretto255::BYTES];
    pk.copy_from_slice(&public[..32]);
    let mut r: Point = [0u8; ristretto255::BYTES];
    r.copy_from_slice(&signature[..32]);
    let mut s: Scalar = [0u8; ristretto255::SCALARBYTES];
    s.copy_from_slice(&signature[32..]);
    if !is_canonical_scalar(&s)? {
        debug!("rejecting signature with non-canonical scalar");
        return Ok(false);
    }

    // `public` already is `A ‖ chain_code`
    let e = hash_to_scalar(&[&r[..], &public[..], message])?;
    let left = scalarmult_ristretto::scalarmult_base(&s)?;
    let e_times_pk = scalarmult_ristretto::scalarmult(&e, &pk)?;
    let right = ristretto255::add(&r, &e_times_pk)?;

    // Use constant-time comparison
    Ok(utils::memcmp(&left, &right))
}
