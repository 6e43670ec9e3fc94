//! Mock network-retry banner.
//!
//! Demonstration only: drives an exponential-backoff retry loop against a
//! coin-flip "fetch" and reports each transition as a banner state for the
//! host UI to render. This is not an error-handling policy; nothing real is
//! fetched and nothing depends on the outcome.

use rand::rngs::StdRng;
use rand::{Rng, SeedableRng};
use serde::{Deserialize, Serialize};
use tokio::time::{sleep, Duration};

use crate::logging::log_retry_attempt;
use crate::state::Config;

#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case", tag = "state")]
pub enum BannerState {
    Loading,
    Retrying { attempt: u32 },
    Loaded,
    Failed,
}

#[derive(Clone, Debug)]
pub struct RetrySimConfig {
    pub max_retries: u32,
    pub base_delay_ms: u64,
    pub max_delay_ms: u64,
    pub jitter_factor: f64,
    /// Probability a single simulated fetch succeeds.
    pub success_rate: f64,
}

impl Default for RetrySimConfig {
    fn default() -> Self {
        Self {
            max_retries: 3,
            base_delay_ms: 100,
            max_delay_ms: 5000,
            jitter_factor: 0.3,
            success_rate: 0.7,
        }
    }
}

impl RetrySimConfig {
    pub fn from_config(cfg: &Config) -> Self {
        Self {
            max_retries: cfg.retry_max,
            base_delay_ms: cfg.retry_base_ms,
            success_rate: cfg.retry_success_rate,
            ..Self::default()
        }
    }

    /// Exponential backoff with jitter, clamped to max_delay_ms.
    fn delay_for_attempt(&self, attempt: u32, rng: &mut StdRng) -> Duration {
        let base = self.base_delay_ms as f64 * 2.0_f64.powi(attempt as i32);
        let clamped = base.min(self.max_delay_ms as f64);

        let jitter_range = clamped * self.jitter_factor;
        let jitter: f64 = if jitter_range > 0.0 {
            rng.gen_range(-jitter_range..=jitter_range)
        } else {
            0.0
        };
        let final_delay = (clamped + jitter).max(0.0);

        Duration::from_millis(final_delay as u64)
    }
}

pub struct SimulatedFetch {
    cfg: RetrySimConfig,
    rng: StdRng,
}

impl SimulatedFetch {
    pub fn with_seed(cfg: RetrySimConfig, seed: u64) -> Self {
        Self {
            cfg,
            rng: StdRng::seed_from_u64(seed),
        }
    }

    pub fn new(cfg: RetrySimConfig) -> Self {
        Self {
            cfg,
            rng: StdRng::from_entropy(),
        }
    }

    /// Run one simulated fetch cycle and return every banner transition in
    /// order. Always ends in Loaded or Failed.
    pub async fn run(&mut self) -> Vec<BannerState> {
        let mut states = vec![BannerState::Loading];

        for attempt in 0..=self.cfg.max_retries {
            if self.rng.gen_bool(self.cfg.success_rate.clamp(0.0, 1.0)) {
                log_retry_attempt(attempt, self.cfg.max_retries, "ok", 0);
                states.push(BannerState::Loaded);
                return states;
            }
            if attempt < self.cfg.max_retries {
                let delay = self.cfg.delay_for_attempt(attempt, &mut self.rng);
                log_retry_attempt(
                    attempt,
                    self.cfg.max_retries,
                    "retry",
                    delay.as_millis() as u64,
                );
                states.push(BannerState::Retrying {
                    attempt: attempt + 1,
                });
                sleep(delay).await;
            } else {
                log_retry_attempt(attempt, self.cfg.max_retries, "failed", 0);
            }
        }

        states.push(BannerState::Failed);
        states
    }
}
