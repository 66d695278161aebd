//! Basic synchronous re-chunking with the streaming API.
//!
//! Run with:
//!     RUST_LOG=debug cargo run --example sync_basic

use bytes::Bytes;
use rechunkrs::{Rebuffer, RebufferConfig};

fn main() -> Result<(), Box<dyn std::error::Error>> {
    env_logger::init();

    // Input arrives in irregular pieces, like short reads from a socket
    let data: Vec<u8> = (0..10_000u32).map(|i| (i % 256) as u8).collect();
    let piece_sizes = [1, 700, 33, 4096, 5, 2000];

    // 16-byte cipher blocks
    let mut rebuffer = Rebuffer::new(RebufferConfig::new(16)?);

    println!("Re-chunking {} bytes into 16-byte blocks...\n", data.len());

    let mut total_chunks = 0;
    let mut pos = 0;
    for size in piece_sizes.iter().cycle() {
        if pos >= data.len() {
            break;
        }
        let end = (pos + size).min(data.len());
        let block = Bytes::copy_from_slice(&data[pos..end]);

        let chunks = rebuffer.push(block);
        println!(
            "Received {:>5} bytes -> {:>3} blocks, {:>2} bytes pending",
            end - pos,
            chunks.len(),
            rebuffer.pending_len()
        );
        total_chunks += chunks.len();
        pos = end;
    }

    // Finalize stream
    if let Some(tail) = rebuffer.finish() {
        total_chunks += 1;
        println!("Tail block: {} bytes @ {}", tail.len(), tail.offset);
    }

    let stats = rebuffer.stats();
    println!(
        "\nTotal: {} blocks, {} bytes in, {} bytes out",
        total_chunks, stats.bytes_in, stats.bytes_out
    );

    Ok(())
}
