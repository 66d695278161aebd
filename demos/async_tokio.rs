//! Async re-chunking of a tokio file.
//!
//! Uses `tokio_util::compat` to turn a tokio reader into a
//! `futures_io::AsyncRead`.
//!
//! Run with:
//!     cargo run --example async_tokio --features async-io -- /path/to/file

use std::env;

use futures_util::StreamExt;
use rechunkrs::{RebufferConfig, chunk_async};
use tokio_util::compat::TokioAsyncReadCompatExt;

#[tokio::main]
async fn main() -> Result<(), Box<dyn std::error::Error>> {
    env_logger::init();

    let path = env::args()
        .nth(1)
        .unwrap_or_else(|| "Cargo.toml".to_string());

    let file = tokio::fs::File::open(&path).await?;

    // 4 KiB pages, last page may be short
    let mut pages = chunk_async(file.compat(), RebufferConfig::new(4096)?);

    let mut count = 0;
    while let Some(page) = pages.next().await {
        let page = page?;
        count += 1;
        println!("Page {:>4}: offset={:>10}, len={}", count, page.offset, page.len());
    }

    println!("\n{}: {} pages", path, count);
    Ok(())
}
