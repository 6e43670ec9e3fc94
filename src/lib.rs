//! fpaforge: synthetic FP&A dashboard feed.
//!
//! Generates randomized KPI, alert, anomaly, recommendation, and financial
//! statement records on demand and re-generates them on a timer to simulate
//! a live feed. All data is mock; there is no backend anywhere.

pub mod generator;
pub mod logging;
pub mod model;
pub mod refresh;
pub mod retrysim;
pub mod snapshot;
pub mod state;
pub mod statements;

pub use generator::MockFeed;
pub use model::DashboardSnapshot;
pub use refresh::{RefreshHandle, Refresher};
pub use snapshot::AlertBoard;
pub use state::Config;
