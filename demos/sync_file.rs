//! File re-chunking example: split a file into 512-byte sectors.
//!
//! Run with:
//!     cargo run --example sync_file -- /path/to/file

use std::env;
use std::fs::File;

use rechunkrs::{HashConfig, Rebuffer, RebufferConfig};

fn main() -> Result<(), Box<dyn std::error::Error>> {
    env_logger::init();

    let path = env::args()
        .nth(1)
        .unwrap_or_else(|| "Cargo.toml".to_string());

    println!("Re-chunking file: {}\n", path);

    let file = File::open(&path)?;
    println!("File size: {} bytes\n", file.metadata()?.len());

    // Whole sectors only; a partial last sector is dropped
    let config = RebufferConfig::new(512)?
        .with_discard_incomplete_chunks(true)
        .with_hash_config(HashConfig::enabled());

    let mut iter = Rebuffer::new(config).reader(file);
    for chunk in iter.by_ref() {
        let chunk = chunk?;
        match chunk.hash {
            Some(hash) => println!(
                "Sector @ {:>10}: len={}, hash={}",
                chunk.offset,
                chunk.len(),
                &hash.to_hex()[..16]
            ),
            None => println!("Sector @ {:>10}: len={}", chunk.offset, chunk.len()),
        }
    }

    let stats = iter.rebuffer().stats();
    println!(
        "\nTotal: {} sectors, {} trailing bytes dropped",
        stats.chunks_out, stats.bytes_discarded
    );

    Ok(())
}
