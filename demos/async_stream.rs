//! Re-chunking a stream of network-like packets into fixed frames.
//!
//! Run with:
//!     cargo run --example async_stream --features async-io

use std::time::Duration;

use bytes::Bytes;
use futures_util::{StreamExt, stream};
use rechunkrs::{RebufferConfig, rebuffer_stream};

#[tokio::main]
async fn main() -> Result<(), Box<dyn std::error::Error>> {
    env_logger::init();

    // Packets of uneven size, arriving over time
    let packets = stream::iter(0..40u32).then(|i| async move {
        tokio::time::sleep(Duration::from_millis(1)).await;
        let len = (i * 37 % 300) as usize;
        Ok::<_, std::io::Error>(Bytes::from(vec![i as u8; len]))
    });

    // 188-byte frames, drop a partial trailing frame
    let config = RebufferConfig::new(188)?.with_discard_incomplete_chunks(true);
    let mut frames = Box::pin(rebuffer_stream(packets, config));

    let mut count = 0;
    while let Some(frame) = frames.next().await {
        let frame = frame?;
        count += 1;
        println!("Frame {:>3}: offset={:>6}, len={}", count, frame.offset, frame.len());
    }

    let stats = frames.rebuffer().stats();
    println!(
        "\nTotal: {} frames, {} bytes in, {} bytes dropped",
        count, stats.bytes_in, stats.bytes_discarded
    );
    Ok(())
}
