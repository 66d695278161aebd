#![no_main]

use bytes::Bytes;
use libfuzzer_sys::fuzz_target;
use rechunkrs::{Rebuffer, RebufferConfig};

fuzz_target!(|input: (u8, bool, Vec<Vec<u8>>)| {
    let (size, discard, blocks) = input;
    let size = usize::from(size).max(1);
    let config = RebufferConfig::new(size)
        .unwrap()
        .with_discard_incomplete_chunks(discard);

    let mut rebuffer = Rebuffer::new(config);
    let mut chunks = Vec::new();
    for block in &blocks {
        chunks.extend(rebuffer.push(Bytes::from(block.clone())));
        assert!(rebuffer.pending_len() < size);
    }
    chunks.extend(rebuffer.finish());

    let input: Vec<u8> = blocks.concat();
    let kept = if discard {
        input.len() - input.len() % size
    } else {
        input.len()
    };

    // Verify: every chunk but the last is exactly `size` bytes
    if let Some((last, rest)) = chunks.split_last() {
        assert!(rest.iter().all(|c| c.len() == size));
        assert!(!last.is_empty() && last.len() <= size);
    }

    // Verify: output is the input, minus the dropped tail
    let output: Vec<u8> = chunks.iter().flat_map(|c| c.data.to_vec()).collect();
    assert_eq!(output, &input[..kept]);

    // Verify: splitting does not matter
    let whole = Rebuffer::new(config).chunk_bytes(input);
    assert_eq!(whole, chunks);
});
