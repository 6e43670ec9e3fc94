#[derive(Debug, Clone)]
pub struct Config {
    /// Alerts per generation pass.
    pub alert_count: usize,
    /// Anomalies per generation pass.
    pub anomaly_count: usize,
    /// Recommendations per generation pass.
    pub reco_count: usize,
    /// Live-update cadence for the refresh task.
    pub refresh_secs: u64,
    /// Optional fixed seed; None draws from OS entropy.
    pub feed_seed: Option<u64>,
    /// Retry-simulation knobs (cosmetic banner only).
    pub retry_max: u32,
    pub retry_base_ms: u64,
    pub retry_success_rate: f64,
}

impl Config {
    pub fn from_env() -> Self {
        Self {
            alert_count: std::env::var("ALERT_COUNT").ok().and_then(|v| v.parse().ok()).unwrap_or(4),
            anomaly_count: std::env::var("ANOMALY_COUNT").ok().and_then(|v| v.parse().ok()).unwrap_or(3),
            reco_count: std::env::var("RECO_COUNT").ok().and_then(|v| v.parse().ok()).unwrap_or(4),
            refresh_secs: std::env::var("REFRESH_SECS").ok().and_then(|v| v.parse().ok()).unwrap_or(30),
            feed_seed: std::env::var("FEED_SEED").ok().and_then(|v| v.parse().ok()),
            retry_max: std::env::var("RETRY_MAX").ok().and_then(|v| v.parse().ok()).unwrap_or(3),
            retry_base_ms: std::env::var("RETRY_BASE_MS").ok().and_then(|v| v.parse().ok()).unwrap_or(100),
            retry_success_rate: std::env::var("RETRY_SUCCESS_RATE").ok().and_then(|v| v.parse().ok()).unwrap_or(0.7),
        }
    }
}

impl Default for Config {
    fn default() -> Self {
        Self {
            alert_count: 4,
            anomaly_count: 3,
            reco_count: 4,
            refresh_secs: 30,
            feed_seed: None,
            retry_max: 3,
            retry_base_ms: 100,
            retry_success_rate: 0.7,
        }
    }
}

pub fn now_ts() -> u64 {
    chrono::Utc::now().timestamp() as u64
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn default_counts_are_nonzero() {
        let d = Config::default();
        assert!(d.alert_count > 0);
        assert!(d.anomaly_count > 0);
        assert!(d.reco_count > 0);
        assert!(d.refresh_secs > 0);
        assert!(d.feed_seed.is_none());
        assert!(d.retry_success_rate > 0.0 && d.retry_success_rate <= 1.0);
    }
}
