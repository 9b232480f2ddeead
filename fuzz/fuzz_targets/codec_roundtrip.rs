#![no_main]

use elgamal_blocks::BlockCodec;
use libfuzzer_sys::fuzz_target;

fuzz_target!(|data: &[u8]| {
    let Some((&selector, message)) = data.split_first() else {
        return;
    };

    let width = usize::from(selector % 7) + 1;
    let pad_byte = selector.rotate_left(3);
    let codec = BlockCodec::new(width, u64::MAX).unwrap().with_pad_byte(pad_byte);

    let padded = codec.pad(message).unwrap();
    assert_eq!(padded.len() % width, 0);
    assert_eq!(&padded[..message.len()], message);

    let blocks = codec.bytes_to_blocks(&padded, padded.len() / width).unwrap();
    assert_eq!(codec.decode(&blocks, message.len()).unwrap(), message);

    // Stripping only ever removes trailing pad bytes
    let stripped = codec.blocks_to_bytes(&blocks, blocks.len(), padded.len()).unwrap();
    assert!(message.starts_with(&stripped));
    assert!(message[stripped.len()..].iter().all(|&b| b == pad_byte));
});
