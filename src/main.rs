//! Command-line interface for proxy delegation keys
//!
//! Run the example with: `cargo run --example demo`

use libsodium_rs::ensure_init;
use proxy_delegation::{derive_keypair_from_seed, generate_keypair, HexEncoded, Seed};
use tracing::{error, info};
use tracing_subscriber::EnvFilter;

fn usage() {
    println!("Proxy Delegation");
    println!("================");
    println!();
    println!("Usage:");
    println!("  proxy-delegation keygen            random key pair");
    println!("  proxy-delegation keygen <seed-hex> key pair derived from a 32-byte seed");
    println!();
    println!("To see a delegation walkthrough, run:");
    println!("  cargo run --example demo");
}

fn parse_seed(text: &str) -> Option<Seed> {
    use ct_codecs::{Decoder, Hex};
    let bytes = Hex::decode_to_vec(text, None).ok()?;
    Seed::try_from(bytes.as_slice()).ok()
}

fn main() {
    let filter = EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("info"));
    tracing_subscriber::fmt().with_env_filter(filter).init();

    if let Err(e) = ensure_init() {
        error!("Failed to initialize libsodium: {}", e);
        std::process::exit(1);
    }

    let args: Vec<String> = std::env::args().skip(1).collect();
    let keys = match args.iter().map(String::as_str).collect::<Vec<_>>().as_slice() {
        ["keygen"] => generate_keypair(),
        ["keygen", seed] => match parse_seed(seed) {
            Some(seed) => derive_keypair_from_seed(&seed),
            None => {
                error!("seed must be 64 hex characters");
                std::process::exit(2);
            }
        },
        _ => {
            usage();
            return;
        }
    };

    match keys {
        Ok((pk, _sk)) => {
            info!(fingerprint = %pk.fingerprint(), "key pair ready");
            println!("{}", pk.to_hex());
        }
        Err(e) => {
            error!("Key generation failed: {}", e);
            std::process::exit(1);
        }
    }
}
