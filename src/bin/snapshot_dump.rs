//! Emit one dashboard snapshot as pretty JSON. Useful for eyeballing the
//! generated shapes and for producing golden files from a fixed seed:
//!
//!   FEED_SEED=42 cargo run --bin snapshot_dump

use anyhow::Result;

use fpaforge::{Config, MockFeed};

fn main() -> Result<()> {
    let cfg = Config::from_env();
    let mut feed = MockFeed::new(cfg);
    let snap = feed.snapshot();
    println!("{}", serde_json::to_string_pretty(&snap)?);
    Ok(())
}
