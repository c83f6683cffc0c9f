//! Example demonstration of delegated proxy signatures

use proxy_delegation::{
    check_sig, create_psk, proxy_sign, proxy_verify, sign, verify_psk, EpochIndex, EpochRange,
    HexEncoded, KeyPair, Result, SignTag,
};

fn main() -> Result<()> {
    println!("=== Delegated Proxy Signatures Demo ===\n");

    // 1) Key generation
    println!("1. Generating keys...");
    let issuer: KeyPair = KeyPair::generate()?;
    let delegate: KeyPair = KeyPair::from_seed(&[0u8; 32])?;
    println!("   Issuer public key:   {}", issuer.pk);
    println!("   Delegate public key: {}", delegate.pk);

    // 2) Ordinary tagged signature
    println!("\n2. Signing directly...");
    let note = "hello".to_string();
    let sig = sign(SignTag::Testing, &delegate.sk, &note)?;
    println!("   Signature: {}", sig.to_hex());
    println!(
        "   Valid under Testing? {}",
        check_sig(SignTag::Testing, &delegate.pk, &note, &sig)
    );
    println!(
        "   Valid under Tx? {} (should be false)",
        check_sig(SignTag::Tx, &delegate.pk, &note, &sig)
    );

    // 3) Delegation with an epoch range
    println!("\n3. Creating delegation...");
    let omega = EpochRange::new(EpochIndex(10), EpochIndex(20)).expect("10 <= 20");
    let psk = create_psk(&issuer.sk, delegate.pk, omega)?;
    println!("   Restriction: {}", omega);
    println!("   Certificate: {}", psk.cert);
    println!("   Certificate valid? {}", verify_psk(&psk));

    // 4) Proxy signs
    println!("\n4. Creating proxy signature...");
    let block = "block 15 body".to_string();
    let proxy_sig = proxy_sign(SignTag::MainBlockLight, &delegate.sk, &psk, &block)?;
    println!("   Message: {}", block);

    // 5) Verify proxy signature
    println!("\n5. Verifying proxy signature...");
    let valid = proxy_verify(
        SignTag::MainBlockLight,
        &proxy_sig,
        EpochRange::covering(EpochIndex(15)),
        &block,
    );
    println!("   Valid in epoch 15? {}", valid);

    let out_of_range = proxy_verify(
        SignTag::MainBlockLight,
        &proxy_sig,
        EpochRange::covering(EpochIndex(21)),
        &block,
    );
    println!("   Valid in epoch 21? {} (should be false)", out_of_range);

    // 6) Test with wrong message
    println!("\n6. Testing with wrong message...");
    let invalid = proxy_verify(
        SignTag::MainBlockLight,
        &proxy_sig,
        EpochRange::covering(EpochIndex(15)),
        &"block 16 body".to_string(),
    );
    println!("   Wrong message valid? {} (should be false)", invalid);

    // 7) Wrong signer
    println!("\n7. Signing with a key the certificate does not name...");
    match proxy_sign(SignTag::MainBlockLight, &issuer.sk, &psk, &block) {
        Err(e) => println!("   Refused: {}", e),
        Ok(_) => println!("   Unexpectedly signed"),
    }

    println!("\nAll operations completed.");

    Ok(())
}
