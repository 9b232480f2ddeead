#![no_main]

use elgamal_blocks::present::{parse_presented, present_pairs};
use libfuzzer_sys::fuzz_target;

fuzz_target!(|data: &[u8]| {
    let Ok(pairs) = parse_presented(data) else {
        assert_ne!(data.len() % 4, 0);
        return;
    };

    let masked: Vec<u64> = pairs.iter().map(|p| u64::from(p.masked)).collect();
    let ephemeral: Vec<u64> = pairs.iter().map(|p| u64::from(p.ephemeral)).collect();

    // Every byte string of whole pairs is a valid encoding
    assert_eq!(present_pairs(&masked, &ephemeral).unwrap(), data);
});
