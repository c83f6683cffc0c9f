//! Domain-separated signing of raw bytes and CBOR-serializable values.

use std::fmt;
use std::hash::{Hash, Hasher};
use std::marker::PhantomData;

use minicbor::Encode;
use tracing::debug;

use crate::encoding::HexEncoded;
use crate::error::{ProxySignatureError, Result};
use crate::keys::{PrivateKey, PublicKey};
use crate::scheme::{Scheme, SignatureBytes, EMPTY_PASSPHRASE};
use crate::tag::{tagged_payload, SignTag};

/// Message type marker for signatures over raw byte strings.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Raw {}

/// A signature over a value of type `T`.
///
/// `T` exists only at compile time; the bytes carry no record of it.
pub struct Signature<T> {
    bytes: SignatureBytes,
    _message: PhantomData<fn() -> T>,
}

impl<T> Signature<T> {
    /// Wrap raw signature bytes.
    pub const fn from_bytes(bytes: SignatureBytes) -> Self {
        Signature {
            bytes,
            _message: PhantomData,
        }
    }

    /// Get a reference to the raw signature bytes
    pub fn as_bytes(&self) -> &SignatureBytes {
        &self.bytes
    }

    pub(crate) fn retag<U>(self) -> Signature<U> {
        Signature::from_bytes(self.bytes)
    }
}

impl<T> Clone for Signature<T> {
    fn clone(&self) -> Self {
        *self
    }
}

impl<T> Copy for Signature<T> {}

impl<T> PartialEq for Signature<T> {
    fn eq(&self, other: &Self) -> bool {
        self.bytes == other.bytes
    }
}

impl<T> Eq for Signature<T> {}

impl<T> Hash for Signature<T> {
    fn hash<H: Hasher>(&self, state: &mut H) {
        self.bytes.hash(state);
    }
}

impl<T> fmt::Debug for Signature<T> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_tuple("Signature").field(&self.to_hex()).finish()
    }
}

/// Canonical CBOR bytes of a value.
pub(crate) fn serialize<T: Encode<()>>(value: &T) -> Result<Vec<u8>> {
    minicbor::to_vec(value).map_err(|e| ProxySignatureError::Serialization(e.to_string()))
}

/// Sign `tag_bytes(tag) || payload` exactly.
///
/// Pass `None` only when the bytes must match an externally defined format.
///
/// # Errors
/// Returns an error if the underlying primitive fails
pub fn sign_raw<S: Scheme>(
    tag: Option<SignTag>,
    sk: &PrivateKey<S>,
    payload: &[u8],
) -> Result<Signature<Raw>> {
    let message = tagged_payload(tag, payload);
    let bytes = S::sign(sk.extended(), EMPTY_PASSPHRASE, &message)?;
    Ok(Signature::from_bytes(bytes))
}

/// Sign the CBOR encoding of `value` under `tag`.
///
/// # Errors
/// Returns an error if serialization or the underlying primitive fails
pub fn sign<S: Scheme, T: Encode<()>>(
    tag: SignTag,
    sk: &PrivateKey<S>,
    value: &T,
) -> Result<Signature<T>> {
    let payload = serialize(value)?;
    Ok(sign_raw(Some(tag), sk, &payload)?.retag())
}

/// Check a signature produced by [`sign_raw`] with the same tag convention.
pub fn check_sig_raw<S: Scheme>(
    tag: Option<SignTag>,
    pk: &PublicKey<S>,
    payload: &[u8],
    signature: &Signature<Raw>,
) -> bool {
    let message = tagged_payload(tag, payload);
    S::verify(pk.as_bytes(), &message, signature.as_bytes())
}

/// Check a signature produced by [`sign`].
pub fn check_sig<S: Scheme, T: Encode<()>>(
    tag: SignTag,
    pk: &PublicKey<S>,
    value: &T,
    signature: &Signature<T>,
) -> bool {
    match serialize(value) {
        Ok(payload) => check_sig_raw(Some(tag), pk, &payload, &signature.retag()),
        Err(error) => {
            debug!(%error, %tag, "cannot serialize value for verification");
            false
        }
    }
}

/// A value together with a signature over it.
///
/// Only [`mk_signed`] builds one, so the signature matched the value when it
/// was created. The fields are read-only.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Signed<T> {
    value: T,
    signature: Signature<T>,
}

impl<T> Signed<T> {
    /// The signed value.
    pub fn value(&self) -> &T {
        &self.value
    }

    /// The signature over the value.
    pub fn signature(&self) -> &Signature<T> {
        &self.signature
    }

    /// Split into the value and its signature.
    pub fn into_parts(self) -> (T, Signature<T>) {
        (self.value, self.signature)
    }
}

impl<T: Encode<()>> Signed<T> {
    /// Check the signature against `pk` under `tag`.
    pub fn verify<S: Scheme>(&self, tag: SignTag, pk: &PublicKey<S>) -> bool {
        check_sig(tag, pk, &self.value, &self.signature)
    }
}

/// Sign `value` and keep it next to its signature.
///
/// # Errors
/// Returns an error if serialization or the underlying primitive fails
pub fn mk_signed<S: Scheme, T: Encode<()>>(
    tag: SignTag,
    sk: &PrivateKey<S>,
    value: T,
) -> Result<Signed<T>> {
    let signature = sign(tag, sk, &value)?;
    Ok(Signed { value, signature })
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::keys::{derive_keypair_from_seed, KeyPair};
    use crate::scheme::stub::StubScheme;

    #[test]
    fn test_tagged_round_trip() -> Result<()> {
        let (pk, sk) = derive_keypair_from_seed(&[0u8; 32])?;
        let message = "hello".to_string();

        let sig = sign(SignTag::Testing, &sk, &message)?;
        assert!(check_sig(SignTag::Testing, &pk, &message, &sig));
        assert!(!check_sig(SignTag::Testing, &pk, &"world".to_string(), &sig));
        Ok(())
    }

    #[test]
    fn test_tags_do_not_cross_verify() -> Result<()> {
        let (pk, sk) = derive_keypair_from_seed(&[1u8; 32])?;
        let message = 42u64;

        let sig = sign(SignTag::Tx, &sk, &message)?;
        for tag in SignTag::ALL {
            assert_eq!(check_sig(tag, &pk, &message, &sig), tag == SignTag::Tx);
        }
        Ok(())
    }

    #[test]
    fn test_sign_is_sign_raw_over_cbor() -> Result<()> {
        let (pk, sk) = derive_keypair_from_seed(&[2u8; 32])?;
        let message = vec![1u32, 2, 3];

        let typed = sign(SignTag::Commitment, &sk, &message)?;
        let raw = sign_raw(Some(SignTag::Commitment), &sk, &minicbor::to_vec(&message).unwrap())?;
        assert_eq!(typed.as_bytes(), raw.as_bytes());
        assert!(check_sig_raw(
            Some(SignTag::Commitment),
            &pk,
            &minicbor::to_vec(&message).unwrap(),
            &raw
        ));
        Ok(())
    }

    #[test]
    fn test_untagged_signature_covers_exact_bytes() -> Result<()> {
        let (pk, sk) = derive_keypair_from_seed(&[3u8; 32])?;
        let foreign = b"externally defined bytes";

        let sig = sign_raw(None, &sk, foreign)?;
        assert!(check_sig_raw(None, &pk, foreign, &sig));
        // Must use the same tag convention on both sides
        assert!(!check_sig_raw(Some(SignTag::Testing), &pk, foreign, &sig));

        // An untagged signature over `tag || payload` is the tagged signature
        let mut prefixed = SignTag::Testing.as_bytes().to_vec();
        prefixed.extend_from_slice(foreign);
        assert!(check_sig_raw(
            Some(SignTag::Testing),
            &pk,
            foreign,
            &sign_raw(None, &sk, &prefixed)?
        ));
        Ok(())
    }

    #[test]
    fn test_mk_signed() -> Result<()> {
        let keys = KeyPair::<StubScheme>::from_seed(&[4u8; 32])?;
        let signed = mk_signed(SignTag::UsVote, &keys.sk, "yes".to_string())?;

        assert_eq!(signed.value(), "yes");
        assert!(signed.verify(SignTag::UsVote, &keys.pk));
        assert!(!signed.verify(SignTag::UsProposal, &keys.pk));

        let other = KeyPair::<StubScheme>::from_seed(&[5u8; 32])?;
        assert!(!signed.verify(SignTag::UsVote, &other.pk));

        let (value, signature) = signed.into_parts();
        assert!(check_sig(SignTag::UsVote, &keys.pk, &value, &signature));
        Ok(())
    }
}
