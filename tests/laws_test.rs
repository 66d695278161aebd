// Property tests: the output of a Rebuffer depends only on the concatenated
// input bytes, the chunk size and the tail policy.

use bytes::Bytes;
use proptest::prelude::*;
use rechunkrs::{Chunk, Rebuffer, RebufferConfig};

fn rechunk(size: usize, discard: bool, blocks: &[Vec<u8>]) -> Vec<Chunk> {
    let config = RebufferConfig::new(size)
        .unwrap()
        .with_discard_incomplete_chunks(discard);
    let mut rebuffer = Rebuffer::new(config);

    let mut out = Vec::new();
    for block in blocks {
        out.extend(rebuffer.push(Bytes::from(block.clone())));
        assert_pending_below(rebuffer.pending_len(), size);
    }
    out.extend(rebuffer.finish());
    out
}

fn assert_pending_below(pending: usize, size: usize) {
    assert!(pending < size, "pending {} must stay below {}", pending, size);
}

fn concat(chunks: &[Chunk]) -> Vec<u8> {
    chunks.iter().flat_map(|c| c.data.iter().copied()).collect()
}

fn blocks_strategy() -> impl Strategy<Value = Vec<Vec<u8>>> {
    prop::collection::vec(prop::collection::vec(any::<u8>(), 0..40), 0..12)
}

proptest! {
    #[test]
    fn prop_concatenation(size in 1usize..20, blocks in blocks_strategy()) {
        let input: Vec<u8> = blocks.concat();
        let chunks = rechunk(size, false, &blocks);
        prop_assert_eq!(concat(&chunks), input);
    }

    #[test]
    fn prop_fixed_size(size in 1usize..20, discard: bool, blocks in blocks_strategy()) {
        let chunks = rechunk(size, discard, &blocks);
        if let Some((last, rest)) = chunks.split_last() {
            prop_assert!(rest.iter().all(|c| c.len() == size));
            prop_assert!(last.len() >= 1 && last.len() <= size);
            if discard {
                prop_assert_eq!(last.len(), size);
            }
        }
    }

    #[test]
    fn prop_discard(size in 1usize..20, blocks in blocks_strategy()) {
        let input: Vec<u8> = blocks.concat();
        let kept = input.len() - input.len() % size;

        let discarded = rechunk(size, true, &blocks);
        prop_assert_eq!(concat(&discarded), input[..kept].to_vec());

        if input.len() % size == 0 {
            prop_assert_eq!(discarded, rechunk(size, false, &blocks));
        }
    }

    #[test]
    fn prop_split_independence(
        size in 1usize..20,
        discard: bool,
        blocks in blocks_strategy(),
        resplit in 1usize..17,
    ) {
        let input: Vec<u8> = blocks.concat();
        let resplit: Vec<Vec<u8>> = input.chunks(resplit).map(<[u8]>::to_vec).collect();
        let whole = vec![input];

        let a = rechunk(size, discard, &blocks);
        prop_assert_eq!(&a, &rechunk(size, discard, &resplit));
        prop_assert_eq!(&a, &rechunk(size, discard, &whole));
    }

    #[test]
    fn prop_offsets_contiguous(size in 1usize..20, blocks in blocks_strategy()) {
        let chunks = rechunk(size, false, &blocks);
        let mut offset = 0u64;
        for chunk in &chunks {
            prop_assert_eq!(chunk.offset, offset);
            offset = chunk.end();
        }
        prop_assert_eq!(offset, blocks.iter().map(|b| b.len() as u64).sum::<u64>());
    }
}

#[test]
fn test_eight_one_byte_blocks_equal_one_eight_byte_block() {
    let input: Vec<u8> = (0..8).collect();
    let singles: Vec<Vec<u8>> = input.iter().map(|&b| vec![b]).collect();

    for size in 1..=9 {
        for discard in [false, true] {
            assert_eq!(
                rechunk(size, discard, &[input.clone()]),
                rechunk(size, discard, &singles),
                "size {} discard {}",
                size,
                discard
            );
        }
    }
}
