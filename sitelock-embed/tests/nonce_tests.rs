use base64::{Engine, engine::general_purpose::STANDARD};
use rand::{SeedableRng, rngs::StdRng};
use sitelock_embed::nonce::NONCE_BYTES;
use sitelock_embed::{Nonce, NonceSource, OsNonceSource};
use std::collections::HashSet;
use std::sync::Arc;

#[test]
fn thousand_nonces_are_distinct() {
    let source = OsNonceSource;
    let nonces: HashSet<String> = (0..1000).map(|_| source.issue().to_string()).collect();
    assert_eq!(nonces.len(), 1000);
}

#[test]
fn nonce_decodes_to_sixteen_bytes() {
    let nonce = OsNonceSource.issue();
    assert_eq!(nonce.as_str().len(), 24);
    assert_eq!(STANDARD.decode(nonce.as_str()).unwrap().len(), NONCE_BYTES);
}

#[test]
fn seeded_rng_is_reproducible() {
    let a = Nonce::generate_with(&mut StdRng::seed_from_u64(42));
    let b = Nonce::generate_with(&mut StdRng::seed_from_u64(42));
    let c = Nonce::generate_with(&mut StdRng::seed_from_u64(43));
    assert_eq!(a, b);
    assert_ne!(a, c);
}

#[test]
fn concurrent_callers_get_distinct_nonces() {
    let source = Arc::new(OsNonceSource);
    let handles: Vec<_> = (0..8)
        .map(|_| {
            let source = Arc::clone(&source);
            std::thread::spawn(move || (0..200).map(|_| source.issue()).collect::<Vec<_>>())
        })
        .collect();

    let mut seen = HashSet::new();
    for handle in handles {
        for nonce in handle.join().unwrap() {
            assert!(seen.insert(nonce));
        }
    }
    assert_eq!(seen.len(), 1600);
}
