//! Delegation certificates and proxy signatures.
//!
//! ## Protocol Flow
//!
//! 1. Certification: issuer `I` authorizes delegate `D` under restriction `w`
//!    by signing `"00" || D_pk || cbor(w)` with tag [`SignTag::ProxySk`].
//!    The resulting [`ProxySecretKey`] is `{I_pk, D_pk, w, cert}`.
//! 2. Trust: whoever receives a [`ProxySecretKey`] checks it with
//!    [`verify_psk`] before relying on it.
//! 3. Signing: `D` signs `0x01 || I_pk || tag || cbor(m)` with its own key.
//! 4. Verification: accept iff the caller's predicate accepts `w` and `D_pk`
//!    verifies the rebuilt payload.
//!
//! [`proxy_verify`] does not re-check the certificate; that is step 2.

use std::fmt;
use std::hash::{Hash, Hasher};
use std::marker::PhantomData;

use minicbor::Encode;
use tracing::{debug, error};

use crate::encoding::HexEncoded;
use crate::error::{ProxySignatureError, Result};
use crate::keys::{PrivateKey, PublicKey};
use crate::scheme::{Ristretto255, Scheme, SignatureBytes, EMPTY_PASSPHRASE, PUBLIC_KEY_BYTES};
use crate::signing::{check_sig_raw, serialize, sign_raw, Signature};
use crate::tag::SignTag;

/// Leading byte of every proxy signature payload.
///
/// Reserved to distinguish future payload kinds, such as chained delegation.
pub const PROXY_PAYLOAD_VERSION: u8 = 0x01;

/// Separator between the certificate tag and the delegate key.
const CERT_PAYLOAD_PREFIX: &[u8] = b"00";

/// Issuer's signature authorizing one delegate key under one restriction.
pub struct ProxyCert<W> {
    bytes: SignatureBytes,
    _restriction: PhantomData<fn() -> W>,
}

impl<W> ProxyCert<W> {
    /// Wrap raw certificate bytes.
    pub const fn from_bytes(bytes: SignatureBytes) -> Self {
        ProxyCert {
            bytes,
            _restriction: PhantomData,
        }
    }

    /// Get a reference to the raw certificate bytes
    pub fn as_bytes(&self) -> &SignatureBytes {
        &self.bytes
    }
}

impl<W> Clone for ProxyCert<W> {
    fn clone(&self) -> Self {
        *self
    }
}

impl<W> Copy for ProxyCert<W> {}

impl<W> PartialEq for ProxyCert<W> {
    fn eq(&self, other: &Self) -> bool {
        self.bytes == other.bytes
    }
}

impl<W> Eq for ProxyCert<W> {}

impl<W> Hash for ProxyCert<W> {
    fn hash<H: Hasher>(&self, state: &mut H) {
        self.bytes.hash(state);
    }
}

impl<W> fmt::Debug for ProxyCert<W> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_tuple("ProxyCert").field(&self.to_hex()).finish()
    }
}

/// A delegation: who issued it, to whom, under which restriction, and the
/// issuer's certificate over the last two.
///
/// Nothing here is checked on construction. Run [`verify_psk`] on any value
/// that did not come from [`create_psk`].
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub struct ProxySecretKey<W, S = Ristretto255> {
    /// Issuer's public key
    pub issuer_pk: PublicKey<S>,
    /// Delegate's public key
    pub delegate_pk: PublicKey<S>,
    /// Restriction on what the delegate may sign
    pub omega: W,
    /// Issuer's certificate over `(delegate_pk, omega)`
    pub cert: ProxyCert<W>,
}

impl<W, S> ProxySecretKey<W, S> {
    /// Whether this delegation names `pk` as its delegate.
    pub fn is_delegated_to(&self, pk: &PublicKey<S>) -> bool {
        self.delegate_pk.ct_eq(pk)
    }
}

impl<W: Encode<()>, S: Scheme> ProxySecretKey<W, S> {
    /// Shorthand for [`verify_psk`].
    pub fn verify(&self) -> bool {
        verify_psk(self)
    }
}

impl<W, S> fmt::Display for ProxySecretKey<W, S> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(
            f,
            "ProxySecretKey(issuer: {}..., delegate: {}...)",
            self.issuer_pk.fingerprint(),
            self.delegate_pk.fingerprint()
        )
    }
}

/// A delegate's signature over a message of type `A`, with the delegation it
/// was made under.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ProxySignature<W, A, S = Ristretto255> {
    psk: ProxySecretKey<W, S>,
    sig: Signature<A>,
}

impl<W, A, S> ProxySignature<W, A, S> {
    /// The delegation this signature claims.
    pub fn psk(&self) -> &ProxySecretKey<W, S> {
        &self.psk
    }

    /// The delegate's signature.
    pub fn signature(&self) -> &Signature<A> {
        &self.sig
    }
}

fn cert_payload<W: Encode<()>, S>(delegate_pk: &PublicKey<S>, omega: &W) -> Result<Vec<u8>> {
    let omega = serialize(omega)?;
    let mut payload =
        Vec::with_capacity(CERT_PAYLOAD_PREFIX.len() + PUBLIC_KEY_BYTES + omega.len());
    payload.extend_from_slice(CERT_PAYLOAD_PREFIX);
    payload.extend_from_slice(delegate_pk.as_bytes());
    payload.extend_from_slice(&omega);
    Ok(payload)
}

/// Canonical proxy signature payload: `0x01 || issuer_pk || tag || cbor(message)`.
///
/// The issuer key has a fixed width, which keeps the layout unambiguous.
pub(crate) fn proxy_payload<A: Encode<()>, S>(
    issuer_pk: &PublicKey<S>,
    tag: SignTag,
    message: &A,
) -> Result<Vec<u8>> {
    let tag = tag.as_bytes();
    let message = serialize(message)?;
    let mut payload = Vec::with_capacity(1 + PUBLIC_KEY_BYTES + tag.len() + message.len());
    payload.push(PROXY_PAYLOAD_VERSION);
    payload.extend_from_slice(issuer_pk.as_bytes());
    payload.extend_from_slice(tag);
    payload.extend_from_slice(&message);
    Ok(payload)
}

/// Issue a certificate authorizing `delegate_pk` under restriction `omega`.
///
/// # Errors
/// Returns an error if serialization or the underlying primitive fails
pub fn create_proxy_cert<W: Encode<()>, S: Scheme>(
    issuer_sk: &PrivateKey<S>,
    delegate_pk: &PublicKey<S>,
    omega: &W,
) -> Result<ProxyCert<W>> {
    let payload = cert_payload(delegate_pk, omega)?;
    let sig = sign_raw(Some(SignTag::ProxySk), issuer_sk, &payload)?;
    Ok(ProxyCert::from_bytes(*sig.as_bytes()))
}

/// Issue a complete [`ProxySecretKey`] for `delegate_pk`.
///
/// # Errors
/// Returns an error if serialization or the underlying primitive fails
pub fn create_psk<W: Encode<()>, S: Scheme>(
    issuer_sk: &PrivateKey<S>,
    delegate_pk: PublicKey<S>,
    omega: W,
) -> Result<ProxySecretKey<W, S>> {
    let cert = create_proxy_cert(issuer_sk, &delegate_pk, &omega)?;
    Ok(ProxySecretKey {
        issuer_pk: *issuer_sk.public_key(),
        delegate_pk,
        omega,
        cert,
    })
}

/// Check that `psk.cert` was issued by `psk.issuer_pk` for exactly
/// `(psk.delegate_pk, psk.omega)`.
pub fn verify_psk<W: Encode<()>, S: Scheme>(psk: &ProxySecretKey<W, S>) -> bool {
    let payload = match cert_payload(&psk.delegate_pk, &psk.omega) {
        Ok(payload) => payload,
        Err(error) => {
            debug!(%error, "cannot serialize certificate restriction");
            return false;
        }
    };
    let sig = Signature::from_bytes(*psk.cert.as_bytes());
    check_sig_raw(Some(SignTag::ProxySk), &psk.issuer_pk, &payload, &sig)
}

/// Sign `message` as the delegate of `psk`.
///
/// The caller must make sure `delegate_sk` belongs to `psk.delegate_pk`
/// before calling; this is checked again here and nothing is signed on a
/// mismatch.
///
/// # Errors
/// Returns `KeyCertificateMismatch` if `delegate_sk` is not the delegate's
/// key, or an error if serialization or the primitive fails
pub fn proxy_sign<W: Clone, A: Encode<()>, S: Scheme>(
    tag: SignTag,
    delegate_sk: &PrivateKey<S>,
    psk: &ProxySecretKey<W, S>,
    message: &A,
) -> Result<ProxySignature<W, A, S>> {
    if !psk.is_delegated_to(delegate_sk.public_key()) {
        error!(
            delegate = %psk.delegate_pk.fingerprint(),
            signer = %delegate_sk.public_key().fingerprint(),
            "proxy_sign called with a key that does not match the certificate"
        );
        return Err(ProxySignatureError::KeyCertificateMismatch);
    }

    let payload = proxy_payload(&psk.issuer_pk, tag, message)?;
    let sig = S::sign(delegate_sk.extended(), EMPTY_PASSPHRASE, &payload)?;
    Ok(ProxySignature {
        psk: psk.clone(),
        sig: Signature::from_bytes(sig),
    })
}

/// Verify a proxy signature over `message` under `tag`.
///
/// Returns `true` only if `predicate` accepts the certificate's restriction
/// AND the delegate's signature matches. The certificate itself is not
/// checked; see [`verify_psk`].
pub fn proxy_verify<W, A, S, P>(
    tag: SignTag,
    proxy_sig: &ProxySignature<W, A, S>,
    predicate: P,
    message: &A,
) -> bool
where
    A: Encode<()>,
    S: Scheme,
    P: FnOnce(&W) -> bool,
{
    let psk = &proxy_sig.psk;
    if !predicate(&psk.omega) {
        debug!(%tag, "proxy signature restriction rejected by predicate");
        return false;
    }

    let payload = match proxy_payload(&psk.issuer_pk, tag, message) {
        Ok(payload) => payload,
        Err(error) => {
            debug!(%error, %tag, "cannot serialize proxy-signed message");
            return false;
        }
    };
    S::verify(psk.delegate_pk.as_bytes(), &payload, proxy_sig.sig.as_bytes())
}
