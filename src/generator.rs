//! Randomized producers for the synthetic FP&A feed.
//!
//! Each producer draws a fresh, fully-allocated sequence of records on every
//! call. Generation cannot fail: no producer returns a Result. The only state
//! the feed carries is its RNG and a generation counter; seeding the RNG
//! makes the whole output stream reproducible for tests.

use rand::rngs::StdRng;
use rand::seq::SliceRandom;
use rand::{Rng, SeedableRng};

use crate::model::{
    Alert, AlertAction, AlertKind, AlertPriority, Anomaly, Impact, KpiKind, KpiMetric,
    Recommendation, Severity, TrendDirection,
};
use crate::state::{now_ts, Config};

/// Change band for period-over-period KPI deltas, percent.
pub const CHANGE_PCT_MAX: f64 = 15.0;

/// Delta magnitude below which a KPI renders as flat.
const FLAT_BAND_PCT: f64 = 0.5;

pub struct MockFeed {
    cfg: Config,
    rng: StdRng,
    seq: u64,
}

impl MockFeed {
    /// Reproducible feed: same seed, same config, same output stream.
    pub fn with_seed(cfg: Config, seed: u64) -> Self {
        Self {
            cfg,
            rng: StdRng::seed_from_u64(seed),
            seq: 0,
        }
    }

    /// Seed from config if set, otherwise OS entropy.
    pub fn new(cfg: Config) -> Self {
        match cfg.feed_seed {
            Some(seed) => Self::with_seed(cfg, seed),
            None => Self {
                cfg,
                rng: StdRng::from_entropy(),
                seq: 0,
            },
        }
    }

    pub fn config(&self) -> &Config {
        &self.cfg
    }

    /// Generation counter, bumped once per snapshot assembly.
    pub fn seq(&self) -> u64 {
        self.seq
    }

    pub(crate) fn next_seq(&mut self) -> u64 {
        self.seq += 1;
        self.seq
    }

    pub(crate) fn rng(&mut self) -> &mut StdRng {
        &mut self.rng
    }

    // =========================================================================
    // KPIs
    // =========================================================================

    /// One metric per kind, each value inside its plausible band.
    pub fn kpis(&mut self) -> Vec<KpiMetric> {
        let seq = self.seq;
        KpiKind::ALL
            .iter()
            .enumerate()
            .map(|(i, &kind)| {
                let value = self.draw_kpi_value(kind);
                let change_pct = self.rng.gen_range(-CHANGE_PCT_MAX..=CHANGE_PCT_MAX);
                KpiMetric {
                    id: format!("kpi-{}-{}", seq, i),
                    kind,
                    label: kind.label().to_string(),
                    value,
                    unit: kind.unit().to_string(),
                    trend: trend_for(change_pct),
                    change_pct,
                }
            })
            .collect()
    }

    fn draw_kpi_value(&mut self, kind: KpiKind) -> f64 {
        let (lo, hi) = kpi_band(kind);
        let v = self.rng.gen_range(lo..=hi);
        match kind {
            // Headcount is a whole number of people.
            KpiKind::Headcount => v.round(),
            _ => round2(v),
        }
    }

    // =========================================================================
    // Alerts
    // =========================================================================

    pub fn alerts(&mut self) -> Vec<Alert> {
        let seq = self.seq;
        let count = self.cfg.alert_count;
        let ts = now_ts();
        (0..count)
            .map(|i| {
                let kind = self.draw_alert_kind();
                let (title, description) = alert_text(kind, self.rng.gen_range(0..ALERT_TEXT_PER_KIND));
                let priority = self.draw_alert_priority(kind);
                let actionable = self.rng.gen_bool(0.5);
                Alert {
                    id: format!("alert-{}-{}", seq, i),
                    kind,
                    title: title.to_string(),
                    description: description.to_string(),
                    ts,
                    priority,
                    actionable,
                    action: actionable.then(|| AlertAction {
                        label: "Review".to_string(),
                        target: format!("/alerts/{}-{}", seq, i),
                    }),
                }
            })
            .collect()
    }

    fn draw_alert_kind(&mut self) -> AlertKind {
        // Warning-heavy mix; a live dashboard is mostly caution flags.
        let roll: f64 = self.rng.gen();
        if roll < 0.40 {
            AlertKind::Warning
        } else if roll < 0.65 {
            AlertKind::Info
        } else if roll < 0.85 {
            AlertKind::Error
        } else {
            AlertKind::Success
        }
    }

    fn draw_alert_priority(&mut self, kind: AlertKind) -> AlertPriority {
        let roll: f64 = self.rng.gen();
        match kind {
            AlertKind::Error => {
                if roll < 0.6 {
                    AlertPriority::High
                } else {
                    AlertPriority::Medium
                }
            }
            AlertKind::Warning => {
                if roll < 0.3 {
                    AlertPriority::High
                } else if roll < 0.8 {
                    AlertPriority::Medium
                } else {
                    AlertPriority::Low
                }
            }
            AlertKind::Info | AlertKind::Success => {
                if roll < 0.3 {
                    AlertPriority::Medium
                } else {
                    AlertPriority::Low
                }
            }
        }
    }

    // =========================================================================
    // Anomalies
    // =========================================================================

    pub fn anomalies(&mut self) -> Vec<Anomaly> {
        let seq = self.seq;
        let count = self.cfg.anomaly_count;
        let ts = now_ts();
        (0..count)
            .map(|i| {
                let severity = self.draw_severity();
                let (lo, hi) = severity.deviation_band();
                let magnitude = self.rng.gen_range(lo..hi);
                let sign = if self.rng.gen_bool(0.5) { 1.0 } else { -1.0 };
                let metric = *ANOMALY_METRICS
                    .choose(&mut self.rng)
                    .unwrap_or(&ANOMALY_METRICS[0]);
                Anomaly {
                    id: format!("anomaly-{}-{}", seq, i),
                    metric: metric.to_string(),
                    description: format!(
                        "{} deviated {:.1}% from forecast",
                        metric,
                        magnitude * sign
                    ),
                    severity,
                    deviation_pct: round2(magnitude * sign),
                    ts,
                }
            })
            .collect()
    }

    fn draw_severity(&mut self) -> Severity {
        let roll: f64 = self.rng.gen();
        if roll < 0.35 {
            Severity::Low
        } else if roll < 0.70 {
            Severity::Medium
        } else if roll < 0.92 {
            Severity::High
        } else {
            Severity::Critical
        }
    }

    // =========================================================================
    // Recommendations
    // =========================================================================

    /// Always returns exactly `reco_count` entries. Titles are drawn without
    /// replacement until the catalog runs out, then the catalog is reused.
    pub fn recommendations(&mut self) -> Vec<Recommendation> {
        let seq = self.seq;
        let count = self.cfg.reco_count;
        let mut picks: Vec<&(&str, &str, &str)> = Vec::with_capacity(count);
        while picks.len() < count {
            let take = (count - picks.len()).min(RECO_CATALOG.len());
            picks.extend(RECO_CATALOG.choose_multiple(&mut self.rng, take));
        }
        picks
            .into_iter()
            .enumerate()
            .map(|(i, &(title, description, timeline))| {
                let impact_m = self.rng.gen_range(0.2..3.5);
                Recommendation {
                    id: format!("reco-{}-{}", seq, i),
                    title: title.to_string(),
                    description: description.to_string(),
                    priority: self.draw_severity(),
                    impact: self.draw_impact(),
                    estimated_impact: format!("${:.1}M annualized", impact_m),
                    timeline: timeline.to_string(),
                }
            })
            .collect()
    }

    fn draw_impact(&mut self) -> Impact {
        let roll: f64 = self.rng.gen();
        if roll < 0.35 {
            Impact::Low
        } else if roll < 0.75 {
            Impact::Medium
        } else {
            Impact::High
        }
    }
}

pub fn trend_for(change_pct: f64) -> TrendDirection {
    if change_pct.abs() < FLAT_BAND_PCT {
        TrendDirection::Flat
    } else if change_pct > 0.0 {
        TrendDirection::Up
    } else {
        TrendDirection::Down
    }
}

/// Plausible band per KPI kind (unit as declared by the kind).
pub fn kpi_band(kind: KpiKind) -> (f64, f64) {
    match kind {
        KpiKind::Revenue => (80.0, 140.0),
        KpiKind::GrossMargin => (55.0, 75.0),
        KpiKind::OperatingExpenses => (30.0, 60.0),
        KpiKind::Ebitda => (10.0, 40.0),
        KpiKind::CashBalance => (20.0, 90.0),
        KpiKind::Headcount => (800.0, 1400.0),
    }
}

fn round2(v: f64) -> f64 {
    (v * 100.0).round() / 100.0
}

const ALERT_TEXT_PER_KIND: usize = 3;

fn alert_text(kind: AlertKind, idx: usize) -> (&'static str, &'static str) {
    let table: &[(&str, &str); 3] = match kind {
        AlertKind::Info => &[
            ("Forecast refresh available", "The Q3 rolling forecast was rebuilt overnight."),
            ("New cost center mapped", "Cost center 4410 was added to the consolidation tree."),
            ("FX rates updated", "Month-end FX rates loaded from treasury."),
        ],
        AlertKind::Warning => &[
            ("Opex trending over budget", "Operating expenses are pacing 6% above plan this month."),
            ("DSO creeping up", "Days sales outstanding rose for the third straight week."),
            ("Headcount plan variance", "Open requisitions exceed the approved hiring plan."),
        ],
        AlertKind::Error => &[
            ("Ledger sync failed", "Last GL import did not complete; figures may be stale."),
            ("Budget upload rejected", "Department budget file failed validation."),
            ("Consolidation mismatch", "Intercompany eliminations do not net to zero."),
        ],
        AlertKind::Success => &[
            ("Close cycle complete", "Month-end close finished ahead of schedule."),
            ("Variance review signed off", "All department variance reviews are approved."),
            ("Cash target met", "Quarter-end cash balance exceeded target."),
        ],
    };
    table[idx % table.len()]
}

const ANOMALY_METRICS: &[&str] = &[
    "Revenue",
    "Gross Margin",
    "Operating Expenses",
    "Marketing Spend",
    "Cloud Costs",
    "Travel & Entertainment",
    "Accounts Receivable",
];

const RECO_CATALOG: &[(&str, &str, &str)] = &[
    (
        "Renegotiate cloud commitments",
        "Committed-use discounts would cover 80% of current baseline compute spend.",
        "next quarter",
    ),
    (
        "Consolidate SaaS vendors",
        "Three overlapping analytics subscriptions can be collapsed into one contract.",
        "60 days",
    ),
    (
        "Tighten travel policy",
        "T&E is pacing above plan; advance-booking rules would recover most of the gap.",
        "this quarter",
    ),
    (
        "Accelerate collections",
        "Automated dunning on the top decile of aged receivables shortens DSO.",
        "30 days",
    ),
    (
        "Shift contractor mix",
        "Converting two long-running contractor roles to FTE reduces run-rate cost.",
        "next two quarters",
    ),
    (
        "Rebalance marketing channels",
        "Paid acquisition CAC is drifting up while organic holds; shift 10% of budget.",
        "next quarter",
    ),
];
