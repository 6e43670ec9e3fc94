//! Snapshot assembly and the ephemeral alert board.

use std::collections::HashSet;

use crate::generator::MockFeed;
use crate::logging::log_dismiss;
use crate::model::{Alert, DashboardSnapshot};
use crate::state::now_ts;

impl MockFeed {
    /// One full generation pass. Every category is rebuilt; nothing from the
    /// previous snapshot survives.
    pub fn snapshot(&mut self) -> DashboardSnapshot {
        let seq = self.next_seq();
        DashboardSnapshot {
            generated_at: now_ts(),
            seq,
            kpis: self.kpis(),
            alerts: self.alerts(),
            anomalies: self.anomalies(),
            recommendations: self.recommendations(),
            pnl: self.pnl(),
            balance_sheet: self.balance_sheet(),
            cash_flow: self.cash_flow(),
        }
    }
}

/// Viewer-local alert state. Dismissals live only in memory and only until
/// the next snapshot replaces the alert set.
#[derive(Debug, Default)]
pub struct AlertBoard {
    alerts: Vec<Alert>,
    dismissed: HashSet<String>,
}

impl AlertBoard {
    pub fn new() -> Self {
        Self::default()
    }

    /// Install a fresh alert set, dropping all prior dismissals.
    pub fn replace(&mut self, alerts: Vec<Alert>) {
        self.alerts = alerts;
        self.dismissed.clear();
    }

    /// Hide one alert locally. Unknown ids are ignored.
    pub fn dismiss(&mut self, id: &str) {
        if self.alerts.iter().any(|a| a.id == id) {
            self.dismissed.insert(id.to_string());
            log_dismiss(id, self.visible().len());
        }
    }

    pub fn visible(&self) -> Vec<&Alert> {
        self.alerts
            .iter()
            .filter(|a| !self.dismissed.contains(&a.id))
            .collect()
    }

    pub fn total(&self) -> usize {
        self.alerts.len()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::state::Config;

    fn feed(seed: u64) -> MockFeed {
        MockFeed::with_seed(Config::default(), seed)
    }

    #[test]
    fn snapshot_seq_is_monotonic() {
        let mut f = feed(53);
        let a = f.snapshot();
        let b = f.snapshot();
        assert!(b.seq > a.seq);
    }

    #[test]
    fn snapshot_has_all_categories() {
        let mut f = feed(59);
        let cfg = Config::default();
        let s = f.snapshot();
        assert!(!s.kpis.is_empty());
        assert_eq!(s.alerts.len(), cfg.alert_count);
        assert_eq!(s.anomalies.len(), cfg.anomaly_count);
        assert_eq!(s.recommendations.len(), cfg.reco_count);
        assert!(!s.pnl.totals.is_empty());
    }

    #[test]
    fn dismiss_hides_until_replace() {
        let mut f = feed(61);
        let mut board = AlertBoard::new();
        board.replace(f.snapshot().alerts);
        let first_id = board.visible()[0].id.clone();

        board.dismiss(&first_id);
        assert_eq!(board.visible().len(), board.total() - 1);
        assert!(board.visible().iter().all(|a| a.id != first_id));

        // A new snapshot wipes the dismissal.
        board.replace(f.snapshot().alerts);
        assert_eq!(board.visible().len(), board.total());
    }

    #[test]
    fn dismiss_unknown_id_is_noop() {
        let mut f = feed(67);
        let mut board = AlertBoard::new();
        board.replace(f.snapshot().alerts);
        board.dismiss("alert-999-0");
        assert_eq!(board.visible().len(), board.total());
    }
}
