#![no_main]

use elgamal_blocks::{Decrypt, DecryptBytes, Encrypt, EncryptBytes, KeyPair, KeyPairBuilder};
use libfuzzer_sys::fuzz_target;
use std::sync::OnceLock;

static KEYPAIR: OnceLock<KeyPair> = OnceLock::new();

fuzz_target!(|data: &[u8]| {
    let key_pair = KEYPAIR.get_or_init(|| KeyPairBuilder::new().bit_length(40).build().unwrap());
    let p = key_pair.public_key().p();

    // Byte path must be exact for any payload
    let ciphertext = key_pair.encrypt_bytes(data).unwrap();
    assert_eq!(key_pair.decrypt_bytes(&ciphertext).unwrap(), data);

    // Block path over raw words reduced into the group
    let blocks: Vec<u64> = data
        .chunks(8)
        .map(|chunk| {
            let mut word = [0u8; 8];
            word[..chunk.len()].copy_from_slice(chunk);
            u64::from_le_bytes(word) % p
        })
        .collect();

    let ciphertext = key_pair.encrypt(&blocks).unwrap();
    assert!(ciphertext.ephemeral().iter().all(|&a| a != 0 && a < p));
    assert_eq!(key_pair.decrypt(&ciphertext).unwrap(), blocks);
});
