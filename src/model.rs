//! Record shapes for the synthetic FP&A feed.
//!
//! Everything here is an immutable value type: each generation pass builds a
//! fresh set of records and the previous set is discarded wholesale. Nothing
//! is mutated in place after construction.

use std::collections::BTreeMap;

use serde::{Deserialize, Serialize};

// =============================================================================
// KPIs
// =============================================================================

/// Named KPI category. Consumers look metrics up by kind, never by position
/// in the generated array.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum KpiKind {
    Revenue,
    GrossMargin,
    OperatingExpenses,
    Ebitda,
    CashBalance,
    Headcount,
}

impl KpiKind {
    pub const ALL: [KpiKind; 6] = [
        KpiKind::Revenue,
        KpiKind::GrossMargin,
        KpiKind::OperatingExpenses,
        KpiKind::Ebitda,
        KpiKind::CashBalance,
        KpiKind::Headcount,
    ];

    pub fn label(&self) -> &'static str {
        match self {
            KpiKind::Revenue => "Revenue",
            KpiKind::GrossMargin => "Gross Margin",
            KpiKind::OperatingExpenses => "Operating Expenses",
            KpiKind::Ebitda => "EBITDA",
            KpiKind::CashBalance => "Cash Balance",
            KpiKind::Headcount => "Headcount",
        }
    }

    pub fn unit(&self) -> &'static str {
        match self {
            KpiKind::Revenue | KpiKind::OperatingExpenses | KpiKind::Ebitda => "$M",
            KpiKind::GrossMargin => "%",
            KpiKind::CashBalance => "$M",
            KpiKind::Headcount => "FTE",
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum TrendDirection {
    Up,
    Down,
    Flat,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct KpiMetric {
    pub id: String,
    pub kind: KpiKind,
    pub label: String,
    pub value: f64,
    pub unit: String,
    pub trend: TrendDirection,
    /// Period-over-period change, bounded to a plausible ±15%.
    pub change_pct: f64,
}

// =============================================================================
// Alerts
// =============================================================================

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum AlertKind {
    Info,
    Warning,
    Error,
    Success,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum AlertPriority {
    Low,
    Medium,
    High,
}

/// Descriptor for the button an actionable alert renders. Nothing is ever
/// executed; `target` is an opaque route hint for the host UI.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct AlertAction {
    pub label: String,
    pub target: String,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Alert {
    pub id: String,
    pub kind: AlertKind,
    pub title: String,
    pub description: String,
    pub ts: u64,
    pub priority: AlertPriority,
    pub actionable: bool,
    pub action: Option<AlertAction>,
}

// =============================================================================
// Anomalies
// =============================================================================

#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Severity {
    Low,
    Medium,
    High,
    Critical,
}

impl Severity {
    /// Deviation band (absolute percent) a detector at this severity reports.
    pub fn deviation_band(&self) -> (f64, f64) {
        match self {
            Severity::Low => (2.0, 8.0),
            Severity::Medium => (8.0, 18.0),
            Severity::High => (18.0, 35.0),
            Severity::Critical => (35.0, 60.0),
        }
    }
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Anomaly {
    pub id: String,
    pub metric: String,
    pub description: String,
    pub severity: Severity,
    /// Signed deviation from the expected value, percent.
    pub deviation_pct: f64,
    pub ts: u64,
}

// =============================================================================
// Recommendations
// =============================================================================

#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Impact {
    Low,
    Medium,
    High,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Recommendation {
    pub id: String,
    pub title: String,
    pub description: String,
    pub priority: Severity,
    pub impact: Impact,
    /// Free-text sizing, e.g. "$1.2M annualized".
    pub estimated_impact: String,
    /// Free-text horizon, e.g. "next quarter".
    pub timeline: String,
}

// =============================================================================
// Financial statements
// =============================================================================

/// One statement line: actual vs budget with the derived variance.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct VarianceLine {
    pub actual: f64,
    pub budget: f64,
    pub variance: f64,
}

impl VarianceLine {
    pub fn new(actual: f64, budget: f64) -> Self {
        Self {
            actual,
            budget,
            variance: actual - budget,
        }
    }
}

/// Ordered line-item name -> variance triple.
pub type Section = BTreeMap<String, VarianceLine>;

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct PnlStatement {
    pub revenue: Section,
    pub expenses: Section,
    /// Gross profit, EBITDA, net income. Arithmetically derived from the
    /// revenue and expense lines, not independently drawn.
    pub totals: Section,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct BalanceSheet {
    pub assets: Section,
    pub liabilities: Section,
    pub equity: Section,
}

impl BalanceSheet {
    pub fn total(section: &Section) -> f64 {
        section.values().map(|l| l.actual).sum()
    }
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct CashFlowStatement {
    pub operating: Section,
    pub investing: Section,
    pub financing: Section,
    /// Single "Net Change in Cash" line equal to the sum of the three
    /// section subtotals.
    pub net_change: VarianceLine,
}

// =============================================================================
// Snapshot
// =============================================================================

/// One complete generation pass. Replaces the prior snapshot wholesale;
/// there is no incremental update path.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct DashboardSnapshot {
    pub generated_at: u64,
    /// Monotonic per-feed generation counter.
    pub seq: u64,
    pub kpis: Vec<KpiMetric>,
    pub alerts: Vec<Alert>,
    pub anomalies: Vec<Anomaly>,
    pub recommendations: Vec<Recommendation>,
    pub pnl: PnlStatement,
    pub balance_sheet: BalanceSheet,
    pub cash_flow: CashFlowStatement,
}

impl DashboardSnapshot {
    /// Look a KPI up by kind. The generated ordering carries no meaning.
    pub fn kpi(&self, kind: KpiKind) -> Option<&KpiMetric> {
        self.kpis.iter().find(|k| k.kind == kind)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn variance_is_actual_minus_budget() {
        let line = VarianceLine::new(120.0, 100.0);
        assert!((line.variance - 20.0).abs() < 1e-9);
    }

    #[test]
    fn severity_bands_are_ordered_and_disjoint() {
        let bands: Vec<(f64, f64)> = [
            Severity::Low,
            Severity::Medium,
            Severity::High,
            Severity::Critical,
        ]
        .iter()
        .map(|s| s.deviation_band())
        .collect();
        for pair in bands.windows(2) {
            assert!(pair[0].1 <= pair[1].0);
        }
    }

    #[test]
    fn kpi_kind_labels_unique() {
        let labels: std::collections::HashSet<_> =
            KpiKind::ALL.iter().map(|k| k.label()).collect();
        assert_eq!(labels.len(), KpiKind::ALL.len());
    }
}
