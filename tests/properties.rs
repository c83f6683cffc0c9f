//! Property-based tests for signing, domain separation and hex round trips
//!
//! Uses proptest to check the protocol invariants across random seeds and
//! messages.

use proxy_delegation::{
    check_sig, check_sig_raw, create_psk, derive_keypair_from_seed, format_hex, parse_hex,
    proxy_sign, proxy_verify, sign, sign_raw, EpochIndex, Raw, SignTag, Signature,
};
use proptest::prelude::*;

fn any_tag() -> impl Strategy<Value = SignTag> {
    proptest::sample::select(SignTag::ALL.to_vec())
}

proptest! {
    #![proptest_config(ProptestConfig::with_cases(32))]

    /// Property: seed derivation is deterministic
    #[test]
    fn prop_seed_derivation_determinism(seed in any::<[u8; 32]>()) {
        let (pk1, sk1) = derive_keypair_from_seed(&seed).unwrap();
        let (pk2, sk2) = derive_keypair_from_seed(&seed).unwrap();
        prop_assert_eq!(pk1, pk2);
        prop_assert_eq!(sk1, sk2);
    }

    /// Property: a signature verifies under the tag and key that made it
    #[test]
    fn prop_sign_then_check(
        seed in any::<[u8; 32]>(),
        tag in any_tag(),
        message in proptest::collection::vec(any::<u8>(), 0..64),
    ) {
        let (pk, sk) = derive_keypair_from_seed(&seed).unwrap();
        let sig = sign(tag, &sk, &message).unwrap();
        prop_assert!(check_sig(tag, &pk, &message, &sig));
    }

    /// Property: a signature never verifies under a different tag
    #[test]
    fn prop_domain_separation(
        seed in any::<[u8; 32]>(),
        t1 in any_tag(),
        t2 in any_tag(),
        message in ".{0,32}",
    ) {
        prop_assume!(t1 != t2);
        let (pk, sk) = derive_keypair_from_seed(&seed).unwrap();
        let sig = sign(t1, &sk, &message).unwrap();
        prop_assert!(!check_sig(t2, &pk, &message, &sig));
    }

    /// Property: hex formatting round-trips
    #[test]
    fn prop_hex_round_trip(bytes in any::<[u8; 32]>(), tail in any::<[u8; 32]>()) {
        let mut raw = [0u8; 64];
        raw[..32].copy_from_slice(&bytes);
        raw[32..].copy_from_slice(&tail);
        let sig = Signature::<Raw>::from_bytes(raw);
        prop_assert_eq!(parse_hex::<Signature<Raw>>(&format_hex(&sig)), Ok(sig));
    }

    /// Property: raw signatures only verify for the exact payload
    #[test]
    fn prop_raw_signature_binds_payload(
        seed in any::<[u8; 32]>(),
        payload in proptest::collection::vec(any::<u8>(), 1..64),
        flip in any::<prop::sample::Index>(),
    ) {
        let (pk, sk) = derive_keypair_from_seed(&seed).unwrap();
        let sig = sign_raw(None, &sk, &payload).unwrap();
        prop_assert!(check_sig_raw(None, &pk, &payload, &sig));

        let mut tampered = payload.clone();
        let i = flip.index(tampered.len());
        tampered[i] ^= 0x01;
        prop_assert!(!check_sig_raw(None, &pk, &tampered, &sig));
    }

    /// Property: proxy verification requires both the predicate and the signature
    #[test]
    fn prop_proxy_verify_requires_both_checks(
        issuer_seed in any::<[u8; 32]>(),
        delegate_seed in any::<[u8; 32]>(),
        epoch in any::<u64>(),
        message in any::<u64>(),
        other in any::<u64>(),
    ) {
        prop_assume!(message != other);
        let (_, issuer_sk) = derive_keypair_from_seed(&issuer_seed).unwrap();
        let (delegate_pk, delegate_sk) = derive_keypair_from_seed(&delegate_seed).unwrap();
        let psk = create_psk(&issuer_sk, delegate_pk, EpochIndex(epoch)).unwrap();
        let proxy_sig = proxy_sign(SignTag::Tx, &delegate_sk, &psk, &message).unwrap();

        prop_assert!(proxy_verify(SignTag::Tx, &proxy_sig, |w| w.0 == epoch, &message));
        prop_assert!(!proxy_verify(SignTag::Tx, &proxy_sig, |w| w.0 != epoch, &message));
        prop_assert!(!proxy_verify(SignTag::Tx, &proxy_sig, |_| true, &other));
    }
}
