//! Hex text form of signatures, certificates and public keys.

use std::fmt;
use std::str::FromStr;

use ct_codecs::{Decoder, Encoder, Hex};

use crate::error::DecodeError;
use crate::keys::PublicKey;
use crate::proxy::ProxyCert;
use crate::scheme::{Scheme, PUBLIC_KEY_BYTES, SIGNATURE_BYTES};
use crate::signing::Signature;

/// Values with a lowercase base16 text form.
pub trait HexEncoded: Sized {
    /// Lowercase hex of the raw bytes.
    fn to_hex(&self) -> String;

    /// Parse the output of [`to_hex`](Self::to_hex).
    ///
    /// # Errors
    /// `InvalidHex` if `text` is not base16, `InvalidEncoding` if the decoded
    /// bytes have the wrong shape
    fn from_hex(text: &str) -> Result<Self, DecodeError>;
}

/// Format a signature, certificate or public key as hex.
pub fn format_hex<V: HexEncoded>(value: &V) -> String {
    value.to_hex()
}

/// Parse a signature, certificate or public key from hex.
///
/// # Errors
/// See [`HexEncoded::from_hex`]
pub fn parse_hex<V: HexEncoded>(text: &str) -> Result<V, DecodeError> {
    V::from_hex(text)
}

#[allow(clippy::expect_used)]
pub(crate) fn encode(bytes: &[u8]) -> String {
    // Only fails when the output would overflow usize
    Hex::encode_to_string(bytes).expect("hex encoding of a fixed-size buffer")
}

fn decode<const N: usize>(text: &str, what: &str) -> Result<[u8; N], DecodeError> {
    let bytes =
        Hex::decode_to_vec(text, None).map_err(|e| DecodeError::InvalidHex(format!("{e:?}")))?;
    <[u8; N]>::try_from(bytes.as_slice()).map_err(|_| {
        DecodeError::InvalidEncoding(format!(
            "{what}: expected {N} bytes, got {}",
            bytes.len()
        ))
    })
}

impl<T> HexEncoded for Signature<T> {
    fn to_hex(&self) -> String {
        encode(self.as_bytes())
    }

    fn from_hex(text: &str) -> Result<Self, DecodeError> {
        decode::<SIGNATURE_BYTES>(text, "signature").map(Signature::from_bytes)
    }
}

impl<W> HexEncoded for ProxyCert<W> {
    fn to_hex(&self) -> String {
        encode(self.as_bytes())
    }

    fn from_hex(text: &str) -> Result<Self, DecodeError> {
        decode::<SIGNATURE_BYTES>(text, "proxy certificate").map(ProxyCert::from_bytes)
    }
}

impl<S: Scheme> HexEncoded for PublicKey<S> {
    fn to_hex(&self) -> String {
        encode(self.as_bytes())
    }

    fn from_hex(text: &str) -> Result<Self, DecodeError> {
        let bytes = decode::<PUBLIC_KEY_BYTES>(text, "public key")?;
        if !S::is_valid_public(&bytes) {
            return Err(DecodeError::InvalidEncoding(
                "public key: not a valid group element".to_string(),
            ));
        }
        Ok(PublicKey::from_bytes(bytes))
    }
}

macro_rules! impl_text {
    ($ty:ident < $param:ident $(: $bound:path)? >) => {
        impl<$param $(: $bound)?> fmt::Display for $ty<$param> {
            fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
                f.write_str(&self.to_hex())
            }
        }

        impl<$param $(: $bound)?> FromStr for $ty<$param> {
            type Err = DecodeError;

            fn from_str(s: &str) -> Result<Self, Self::Err> {
                Self::from_hex(s)
            }
        }
    };
}

impl_text!(Signature<T>);
impl_text!(ProxyCert<W>);
impl_text!(PublicKey<S: Scheme>);

#[cfg(test)]
mod tests {
    use super::*;
    use crate::error::Result;
    use crate::keys::derive_keypair_from_seed;
    use crate::scheme::Ristretto255;
    use crate::signing::{sign, Raw};
    use crate::tag::SignTag;

    #[test]
    fn test_signature_round_trip() -> Result<()> {
        let (_, sk) = derive_keypair_from_seed(&[7u8; 32])?;
        let sig = sign(SignTag::Testing, &sk, &"hex me".to_string())?;

        let text = format_hex(&sig);
        assert_eq!(text.len(), 128);
        assert_eq!(text, text.to_lowercase());
        assert_eq!(parse_hex::<Signature<String>>(&text), Ok(sig));
        assert_eq!(text.parse::<Signature<String>>(), Ok(sig));
        assert_eq!(sig.to_string(), text);
        Ok(())
    }

    #[test]
    fn test_public_key_round_trip() -> Result<()> {
        let (pk, _) = derive_keypair_from_seed(&[8u8; 32])?;
        let parsed: PublicKey = pk.to_hex().parse()?;
        assert_eq!(parsed, pk);
        Ok(())
    }

    #[test]
    fn test_decode_errors_are_distinguished() {
        match Signature::<Raw>::from_hex("not hex at all") {
            Err(DecodeError::InvalidHex(_)) => (),
            other => panic!("Expected InvalidHex, got {:?}", other),
        }
        match Signature::<Raw>::from_hex("abcd") {
            Err(DecodeError::InvalidEncoding(msg)) => assert!(msg.contains("got 2")),
            other => panic!("Expected InvalidEncoding, got {:?}", other),
        }
        assert!(matches!(
            ProxyCert::<u64>::from_hex(&"00".repeat(65)),
            Err(DecodeError::InvalidEncoding(_))
        ));
        assert!(matches!(
            PublicKey::<Ristretto255>::from_hex(&"00".repeat(32)),
            Err(DecodeError::InvalidEncoding(_))
        ));
        // right length, but the first half is not a group element
        match PublicKey::<Ristretto255>::from_hex(&"ff".repeat(64)) {
            Err(DecodeError::InvalidEncoding(msg)) => assert!(msg.contains("group element")),
            other => panic!("Expected InvalidEncoding, got {:?}", other),
        }
    }
}
