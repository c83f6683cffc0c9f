//! # Delegated Proxy Signatures
//!
//! Domain-separated signing plus a delegation extension: an issuer certifies a
//! delegate key under a restriction value ("omega"), and the delegate signs on
//! the issuer's behalf. Verifiers accept a proxy signature only if their own
//! predicate accepts the certified restriction.
//!
//! ## Protocol Flow
//!
//! 1. Keys: [`generate_keypair`] or [`derive_keypair_from_seed`]
//! 2. Ordinary signing: [`sign`] / [`check_sig`] under a [`SignTag`]
//! 3. Delegation: issuer calls [`create_psk`] for the delegate's public key
//! 4. Trust: the receiver checks the certificate with [`verify_psk`]
//! 5. Signing: delegate calls [`proxy_sign`]; payload is
//!    `0x01 || issuer_pk || tag || cbor(message)`
//! 6. Verification: [`proxy_verify`] with a restriction predicate
//!
//! The signature primitive is the [`Scheme`] trait; [`Ristretto255`] is the
//! default, a deterministic Schnorr scheme over Ristretto255.

pub mod reexports {
    pub use ct_codecs;
    pub use libsodium_rs;
    pub use minicbor;
}

pub mod encoding;
pub mod error;
pub mod keys;
pub mod proxy;
pub mod restriction;
pub mod scheme;
pub mod signing;
pub mod tag;

pub use encoding::{format_hex, parse_hex, HexEncoded};
pub use error::{DecodeError, ProxySignatureError, Result};
pub use keys::{
    derive_keypair_from_seed, generate_keypair, generate_keypair_from_rng, KeyPair, PrivateKey,
    PublicKey,
};
pub use proxy::{
    create_proxy_cert, create_psk, proxy_sign, proxy_verify, verify_psk, ProxyCert,
    ProxySecretKey, ProxySignature, PROXY_PAYLOAD_VERSION,
};
pub use restriction::{EpochIndex, EpochRange};
pub use scheme::{Ristretto255, Scheme, Seed, EMPTY_PASSPHRASE};
pub use signing::{check_sig, check_sig_raw, mk_signed, sign, sign_raw, Raw, Signature, Signed};
pub use tag::{tag_bytes, SignTag};
