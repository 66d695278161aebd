#![no_main]

use std::io::Cursor;

use libfuzzer_sys::fuzz_target;
use rechunkrs::{ChunkIter, Rebuffer};

fuzz_target!(|input: (u8, u8, Vec<u8>)| {
    let (size, read_size, data) = input;
    let size = usize::from(size).max(1);

    let rebuffer = Rebuffer::with_size(size).unwrap();
    let chunks = ChunkIter::with_read_size(Cursor::new(&data), rebuffer, usize::from(read_size))
        .collect::<Result<Vec<_>, _>>()
        .unwrap();

    // Verify: offsets are contiguous and cover the input
    let mut expected_offset = 0u64;
    for chunk in &chunks {
        assert_eq!(chunk.offset, expected_offset);
        expected_offset += chunk.len() as u64;
    }
    assert_eq!(expected_offset, data.len() as u64);

    // Verify: same result as feeding the bytes directly
    let direct = Rebuffer::with_size(size).unwrap().chunk_bytes(data);
    assert_eq!(direct, chunks);
});
