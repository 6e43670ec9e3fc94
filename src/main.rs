use anyhow::Result;
use serde_json::json;

use fpaforge::logging::{log, obj, Domain, Level};
use fpaforge::retrysim::{RetrySimConfig, SimulatedFetch};
use fpaforge::{AlertBoard, Config, MockFeed, Refresher};

#[tokio::main]
async fn main() -> Result<()> {
    let cfg = Config::from_env();
    log(
        Level::Info,
        Domain::System,
        "startup",
        obj(&[
            ("refresh_secs", json!(cfg.refresh_secs)),
            ("alert_count", json!(cfg.alert_count)),
            ("seeded", json!(cfg.feed_seed.is_some())),
        ]),
    );

    // Demo banner: one simulated fetch cycle before the feed starts.
    let mut banner = SimulatedFetch::new(RetrySimConfig::from_config(&cfg));
    for state in banner.run().await {
        println!("banner: {}", serde_json::to_string(&state)?);
    }

    let feed = MockFeed::new(cfg);
    let handle = Refresher::spawn(feed);
    let mut rx = handle.subscribe();
    let mut board = AlertBoard::new();

    loop {
        {
            let snap = rx.borrow_and_update().clone();
            board.replace(snap.alerts.clone());
            println!("{}", serde_json::to_string(&snap)?);
        }
        tokio::select! {
            changed = rx.changed() => {
                if changed.is_err() {
                    break;
                }
            }
            _ = tokio::signal::ctrl_c() => {
                log(Level::Info, Domain::System, "shutdown", obj(&[]));
                break;
            }
        }
    }

    handle.stop();
    Ok(())
}
